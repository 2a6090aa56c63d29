//! Command-line interface for us-census

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{AsmCrossSection, EconSubset, Sector, TableGroup};

/// us-census - US Census Bureau survey data from the command line
///
/// Fetch American Community Survey tables, business and manufacturing
/// surveys, and economic time series as pretty tables, JSON, or CSV.
#[derive(Parser, Debug)]
#[command(name = "us-census")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "US_CENSUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Census API key (overrides the configured key)
    #[arg(
        short = 'k',
        long = "key",
        global = true,
        env = "CENSUS_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Serve cached responses only, never touch the network
    #[arg(long, global = true)]
    pub offline: bool,

    /// Bypass the response cache
    #[arg(long, global = true)]
    pub no_cache: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch American Community Survey detailed tables
    Acs(AcsArgs),

    /// Fetch ACS subject tables or comparison profiles
    Profile(ProfileArgs),

    /// Fetch ACS selected population profiles
    PopProfile(PopProfileArgs),

    /// Fetch ACS supplemental estimates by state
    Supplemental(SupplementalArgs),

    /// Fetch entrepreneurship survey company summaries
    Entrepreneurship(EntrepreneurshipArgs),

    /// Fetch business characteristics survey data
    Business(BusinessArgs),

    /// Fetch Annual Survey of Manufactures data
    Manufacturing(ManufacturingArgs),

    /// Fetch nonemployer statistics by county
    Nonemployer(NonemployerArgs),

    /// Fetch County Business Patterns establishment counts
    Cbp(CbpArgs),

    /// Fetch economic indicator time series
    Econ(EconArgs),

    /// Fetch small area health insurance estimates
    Health(HealthArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Clean cached responses
    Clean(CleanArgs),
}

/// Output options shared by every fetch command
#[derive(Parser, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Write the table to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of rows to print (pretty format only)
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Output format for fetched tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable aligned columns
    Pretty,
    /// JSON records keyed by column name
    Json,
    /// Comma-separated values
    Csv,
}

/// Arguments for the acs command
#[derive(Parser, Debug)]
pub struct AcsArgs {
    /// Survey year (e.g. 2019)
    pub year: u16,

    /// Table group code (e.g. B01001)
    pub group: TableGroup,

    /// Estimate span in years: 1, 3, or 5
    #[arg(short, long, default_value_t = 1)]
    pub estimate: u8,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the profile command
#[derive(Parser, Debug)]
pub struct ProfileArgs {
    /// Survey year (e.g. 2019)
    pub year: u16,

    /// Table group code (e.g. CP05)
    pub group: TableGroup,

    /// Fetch comparison profiles instead of subject tables
    #[arg(long)]
    pub comparison: bool,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the pop-profile command
#[derive(Parser, Debug)]
pub struct PopProfileArgs {
    /// Survey year (e.g. 2019)
    pub year: u16,

    /// Table group code (e.g. S0201)
    pub group: TableGroup,

    /// Population subgroup code (e.g. 001)
    pub popgroup: String,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the supplemental command
#[derive(Parser, Debug)]
pub struct SupplementalArgs {
    /// Survey year (e.g. 2019)
    pub year: u16,

    /// State FIPS code (default: all states)
    #[arg(short, long)]
    pub state: Option<String>,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the entrepreneurship command
#[derive(Parser, Debug)]
pub struct EntrepreneurshipArgs {
    /// Survey year (e.g. 2016)
    pub year: u16,

    /// State FIPS code (default: all states)
    #[arg(short, long)]
    pub state: Option<String>,

    /// Fetch metro/micro statistical areas instead of states
    #[arg(long, conflicts_with = "state")]
    pub metro: bool,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the business command
#[derive(Parser, Debug)]
pub struct BusinessArgs {
    /// Survey year (e.g. 2016)
    pub year: u16,

    /// State FIPS code (default: all states)
    #[arg(short, long)]
    pub state: Option<String>,

    /// Fetch metro/micro statistical areas instead of states
    #[arg(long, conflicts_with = "state")]
    pub metro: bool,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the manufacturing command
#[derive(Parser, Debug)]
pub struct ManufacturingArgs {
    /// Survey year (e.g. 2017)
    pub year: u16,

    /// NAICS sector code (e.g. 31-33)
    pub sector: Sector,

    /// Fetch the state or industry cross-section instead of the national series
    #[arg(long, value_enum)]
    pub by: Option<CrossSection>,

    /// State FIPS code (cross-section series only)
    #[arg(short, long, requires = "by")]
    pub state: Option<String>,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Cross-section selector for the manufacturing command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CrossSection {
    /// Per-state series
    State,
    /// Per-industry series
    Industry,
}

impl From<CrossSection> for AsmCrossSection {
    fn from(value: CrossSection) -> Self {
        match value {
            CrossSection::State => Self::State,
            CrossSection::Industry => Self::Industry,
        }
    }
}

/// Arguments for the nonemployer command
#[derive(Parser, Debug)]
pub struct NonemployerArgs {
    /// Survey year (e.g. 2002)
    pub year: u16,

    /// NAICS sector code (e.g. 54)
    pub sector: Sector,

    /// State FIPS code (default: all states)
    #[arg(short, long)]
    pub state: Option<String>,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the cbp command
#[derive(Parser, Debug)]
pub struct CbpArgs {
    /// Survey year (e.g. 2018)
    pub year: u16,

    /// NAICS sector code (e.g. 72)
    pub sector: Sector,

    /// State FIPS code (default: all states)
    #[arg(short, long)]
    pub state: Option<String>,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the econ command
#[derive(Parser, Debug)]
pub struct EconArgs {
    /// Time series subset: hv (housing) or resconst (residential construction)
    pub subset: EconSubset,

    /// First (or only) year of the series
    pub year: u16,

    /// Last year of the series; selects a month range
    #[arg(long)]
    pub through: Option<u16>,

    /// First month of the range (with --through)
    #[arg(long, default_value_t = 1, requires = "through")]
    pub from_month: u8,

    /// Last month of the range (with --through)
    #[arg(long, default_value_t = 12, requires = "through")]
    pub to_month: u8,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the health command
#[derive(Parser, Debug)]
pub struct HealthArgs {
    /// Estimate year (e.g. 2018)
    pub year: u16,

    /// State FIPS code (default: all states)
    #[arg(short, long)]
    pub state: Option<String>,

    /// County FIPS code (default: all counties)
    #[arg(long)]
    pub county: Option<String>,

    /// Output options
    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Edit configuration file
    Edit,
    /// Reset configuration to defaults
    Reset,
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Initialize configuration file and prompt for an API key
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Dry run - show what would be deleted
    #[arg(short, long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_acs() {
        let cli = Cli::try_parse_from(["us-census", "acs", "2019", "B01001", "--estimate", "5"])
            .unwrap();
        match cli.command {
            Commands::Acs(args) => {
                assert_eq!(args.year, 2019);
                assert_eq!(args.group.as_str(), "B01001");
                assert_eq!(args.estimate, 5);
                assert_eq!(args.out.format, OutputFormat::Pretty);
            }
            _ => panic!("expected acs command"),
        }
    }

    #[test]
    fn test_metro_conflicts_with_state() {
        assert!(Cli::try_parse_from([
            "us-census",
            "entrepreneurship",
            "2016",
            "--state",
            "06",
            "--metro"
        ])
        .is_err());
    }

    #[test]
    fn test_manufacturing_state_requires_cross_section() {
        assert!(
            Cli::try_parse_from(["us-census", "manufacturing", "2016", "31-33", "-s", "02"])
                .is_err()
        );
        assert!(Cli::try_parse_from([
            "us-census",
            "manufacturing",
            "2016",
            "31-33",
            "--by",
            "state",
            "-s",
            "02"
        ])
        .is_ok());
    }
}
