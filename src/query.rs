//! Census API URL construction
//!
//! The Census Data API is addressed with plain query strings whose values
//! contain characters (`:`, `*`, `/`, `,`, `(`, `)`, `+`) that the API expects
//! verbatim. Only spaces are percent-encoded, so URLs are assembled by hand
//! instead of through a generic form encoder.

/// Builder for a single Census API request URL
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: String,
    path: String,
    params: Vec<(String, String)>,
    key: Option<String>,
}

impl QueryBuilder {
    /// Create a builder for `{base}/{path}`
    pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            path: path.into(),
            params: Vec::new(),
            key: None,
        }
    }

    /// Append a query parameter, preserving insertion order
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Attach the API key; it is always rendered as the last parameter
    pub fn key(mut self, key: Option<&str>) -> Self {
        self.key = key.map(|k| k.to_string());
        self
    }

    /// Full request URL, including the key when one is attached
    pub fn url(&self) -> String {
        self.render(true)
    }

    /// Request URL with the key omitted, suitable as a cache key
    pub fn cache_url(&self) -> String {
        self.render(false)
    }

    fn render(&self, with_key: bool) -> String {
        let mut url = format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );

        let mut pairs: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name, encode_value(value)))
            .collect();

        if with_key {
            if let Some(ref key) = self.key {
                pairs.push(format!("key={}", encode_value(key)));
            }
        }

        if !pairs.is_empty() {
            url.push('?');
            url.push_str(&pairs.join("&"));
        }

        url
    }
}

/// Percent-encode spaces only; everything else the API consumes literally
fn encode_value(value: &str) -> String {
    value.replace(' ', "%20")
}
