//! Command execution handlers

use std::future::Future;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::ResponseCache;
use crate::client::CensusClient;
use crate::config::Config;
use crate::error::{CensusError, Result};
use crate::models::{AcsEstimate, Geography, ProfileKind, Table, TimePeriod};

use super::{Cli, OutputArgs, OutputFormat};

/// Load configuration honoring the global --config flag
fn load_config(cli: &Cli) -> Result<Config> {
    Config::load_from(cli.config.as_deref())
}

/// Build a client from configuration and global flags
fn build_client(cli: &Cli) -> Result<CensusClient> {
    let config = load_config(cli)?;

    let mut client =
        CensusClient::from_config(&config).offline(cli.offline || config.network.offline);
    if cli.no_cache {
        client = client.without_cache();
    }
    if let Some(ref key) = cli.api_key {
        client = client.with_api_key(key.clone());
    }

    Ok(client)
}

/// Run a fetch behind a spinner unless --quiet
async fn with_spinner<F>(cli: &Cli, message: &str, fut: F) -> Result<Table>
where
    F: Future<Output = Result<Table>>,
{
    if cli.quiet {
        return fut.await;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}").unwrap());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    pb.finish_and_clear();
    result
}

/// Write a fetched table in the requested format
fn write_table(cli: &Cli, table: &Table, out: &OutputArgs) -> Result<()> {
    let rendered = match out.format {
        OutputFormat::Pretty => render_pretty(table, out.limit),
        OutputFormat::Json => serde_json::to_string_pretty(&table.to_records())?,
        OutputFormat::Csv => table.to_csv(),
    };

    match &out.output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())?;
            if !cli.quiet {
                eprintln!(
                    "{} {} rows to {}",
                    style("Wrote").green().bold(),
                    table.len(),
                    path.display()
                );
            }
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

/// Widest cell a pretty column may occupy before truncation
const MAX_CELL_WIDTH: usize = 32;

/// Render a table as aligned plain-text columns
fn render_pretty(table: &Table, limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(table.len()).min(table.len());

    let mut widths: Vec<usize> = table.header().iter().map(|h| cell_width(h)).collect();
    for row in table.rows().iter().take(shown) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell_width(cell.as_deref().unwrap_or("")));
        }
    }

    let mut out = String::new();
    push_pretty_row(&mut out, &widths, table.header().iter().map(|h| h.as_str()));
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');
    for row in table.rows().iter().take(shown) {
        push_pretty_row(
            &mut out,
            &widths,
            row.iter().map(|c| c.as_deref().unwrap_or("")),
        );
    }

    if shown < table.len() {
        out.push_str(&format!(
            "... {} of {} rows shown\n",
            shown,
            table.len()
        ));
    } else {
        out.push_str(&format!(
            "{} rows x {} columns\n",
            table.len(),
            table.width()
        ));
    }

    out
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count().min(MAX_CELL_WIDTH)
}

fn push_pretty_row<'a>(
    out: &mut String,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) {
    let mut first = true;
    for (cell, width) in cells.zip(widths) {
        if !first {
            out.push_str("  ");
        }
        first = false;

        let truncated: String = if cell.chars().count() > *width {
            let mut s: String = cell.chars().take(width.saturating_sub(1)).collect();
            s.push('…');
            s
        } else {
            let mut s = cell.to_string();
            let pad = *width - cell.chars().count();
            s.push_str(&" ".repeat(pad));
            s
        };
        out.push_str(&truncated);
    }
    out.push('\n');
}

/// Execute the acs command
pub async fn execute_acs(cli: &Cli, args: &super::AcsArgs) -> Result<()> {
    let estimate = AcsEstimate::try_from(args.estimate)?;
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching American Community Survey detailed tables...",
        client.detailed_tables(args.year, &args.group, estimate),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the profile command
pub async fn execute_profile(cli: &Cli, args: &super::ProfileArgs) -> Result<()> {
    let kind = if args.comparison {
        ProfileKind::Comparison
    } else {
        ProfileKind::Subject
    };
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching ACS profile tables...",
        client.profile(args.year, &args.group, kind),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the pop-profile command
pub async fn execute_pop_profile(cli: &Cli, args: &super::PopProfileArgs) -> Result<()> {
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching selected population profiles...",
        client.population_profile(args.year, &args.group, &args.popgroup),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the supplemental command
pub async fn execute_supplemental(cli: &Cli, args: &super::SupplementalArgs) -> Result<()> {
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching supplemental estimates...",
        client.supplemental(args.year, args.state.as_deref()),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

fn ase_scope(state: Option<&str>, metro: bool) -> Result<Geography> {
    if metro {
        Ok(Geography::Metro)
    } else {
        Geography::state(state)
    }
}

/// Execute the entrepreneurship command
pub async fn execute_entrepreneurship(
    cli: &Cli,
    args: &super::EntrepreneurshipArgs,
) -> Result<()> {
    let scope = ase_scope(args.state.as_deref(), args.metro)?;
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching entrepreneurship survey data...",
        client.entrepreneurship(args.year, &scope),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the business command
pub async fn execute_business(cli: &Cli, args: &super::BusinessArgs) -> Result<()> {
    let scope = ase_scope(args.state.as_deref(), args.metro)?;
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching business characteristics...",
        client.business_characteristics(args.year, &scope),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the manufacturing command
pub async fn execute_manufacturing(cli: &Cli, args: &super::ManufacturingArgs) -> Result<()> {
    let client = build_client(cli)?;

    let table = match args.by {
        None => {
            with_spinner(
                cli,
                "Fetching manufacturing survey data...",
                client.manufacturing(args.year, &args.sector),
            )
            .await?
        }
        Some(by) => {
            with_spinner(
                cli,
                "Fetching manufacturing cross-section data...",
                client.state_manufacturing(args.year, &args.sector, by.into(), args.state.as_deref()),
            )
            .await?
        }
    };

    write_table(cli, &table, &args.out)
}

/// Execute the nonemployer command
pub async fn execute_nonemployer(cli: &Cli, args: &super::NonemployerArgs) -> Result<()> {
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching nonemployer statistics...",
        client.nonemployer(args.year, &args.sector, args.state.as_deref()),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the cbp command
pub async fn execute_cbp(cli: &Cli, args: &super::CbpArgs) -> Result<()> {
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching County Business Patterns...",
        client.county_business_patterns(args.year, &args.sector, args.state.as_deref()),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the econ command
pub async fn execute_econ(cli: &Cli, args: &super::EconArgs) -> Result<()> {
    let period = match args.through {
        Some(through) => {
            TimePeriod::range((args.year, args.from_month), (through, args.to_month))?
        }
        None => TimePeriod::Year(args.year),
    };
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching economic indicators...",
        client.economic_indicators(args.subset, period),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the health command
pub async fn execute_health(cli: &Cli, args: &super::HealthArgs) -> Result<()> {
    let client = build_client(cli)?;

    let table = with_spinner(
        cli,
        "Fetching health insurance estimates...",
        client.health_insurance(args.year, args.state.as_deref(), args.county.as_deref()),
    )
    .await?;

    write_table(cli, &table, &args.out)
}

/// Execute the config command
pub async fn execute_config(cli: &Cli, args: &super::ConfigArgs) -> Result<()> {
    match &args.command {
        super::ConfigCommands::Show => {
            let config = load_config(cli)?;
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| CensusError::Config(e.to_string()))?
            );
        }
        super::ConfigCommands::Edit => {
            let config_path = Config::config_path()?;
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());
            std::process::Command::new(editor).arg(&config_path).status()?;
        }
        super::ConfigCommands::Reset => {
            Config::reset()?;
            println!("Configuration reset to defaults");
        }
        super::ConfigCommands::Set { key, value } => {
            let mut config = load_config(cli)?;
            config.set(key, value)?;
            match &cli.config {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
            println!("Set {} = {}", key, value);
        }
        super::ConfigCommands::Get { key } => {
            let config = load_config(cli)?;
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                println!("Key '{}' not found", key);
            }
        }
        super::ConfigCommands::Init { force } => {
            Config::init(*force)?;

            let key: String = dialoguer::Input::new()
                .with_prompt("Census API key (leave blank to skip)")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| CensusError::Other(e.to_string()))?;

            if !key.trim().is_empty() {
                let mut config = Config::load()?;
                config.set("api.key", key.trim())?;
                config.save()?;
            }

            println!("Configuration initialized");
        }
    }

    Ok(())
}

/// Execute the clean command
pub async fn execute_clean(cli: &Cli, args: &super::CleanArgs) -> Result<()> {
    let config = load_config(cli)?;
    let cache = ResponseCache::new(
        config.cache_dir().join("responses"),
        config.cache.max_age_hours,
    );

    if args.dry_run {
        println!("Would remove: {}", cache.dir().display());
        return Ok(());
    }

    let removed = cache.clear()?;
    if removed == 0 {
        println!("Nothing to clean");
    } else {
        println!("Removed {} cached responses", removed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> Table {
        Table::from_value(json!([
            ["NAME", "B01001_001E"],
            ["United States", "328239523"],
            ["Puerto Rico", null]
        ]))
        .unwrap()
    }

    #[test]
    fn test_render_pretty_alignment() {
        let rendered = render_pretty(&table(), None);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "NAME           B01001_001E");
        assert!(lines[1].starts_with("----"));
        assert_eq!(lines[2], "United States  328239523  ");
        assert_eq!(lines.last().unwrap(), &"2 rows x 2 columns");
    }

    #[test]
    fn test_render_pretty_limit() {
        let rendered = render_pretty(&table(), Some(1));
        assert!(rendered.contains("United States"));
        assert!(!rendered.contains("Puerto Rico"));
        assert!(rendered.contains("... 1 of 2 rows shown"));
    }

    #[test]
    fn test_render_pretty_truncates_wide_cells() {
        let long = "x".repeat(100);
        let wide = Table::from_value(json!([["COL"], [long]])).unwrap();
        let rendered = render_pretty(&wide, None);
        let data_line = rendered.lines().nth(2).unwrap();
        assert!(data_line.chars().count() <= MAX_CELL_WIDTH);
        assert!(data_line.ends_with('…'));
    }
}
