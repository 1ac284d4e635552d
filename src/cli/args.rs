//! Command-line argument definitions for the airport reporter
//!
//! Defines the CLI interface using the clap derive API. Running without a
//! subcommand starts the interactive session.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the airport reporter
///
/// Answers two queries over the OurAirports CSV datasets: a ranking of
/// countries by airport count, and the runway identifiers of every airport
/// in one country.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "airport-reporter",
    version,
    about = "Rank countries by airport count and list per-airport runway identifiers",
    long_about = "Answers two fixed queries over the airports, countries and runways CSV \
                  datasets: the top countries by number of registered airports, and the \
                  runway identifiers of every airport in a given country (matched by ISO \
                  code or name). Run without a subcommand for an interactive session."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the airport reporter
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the countries with the highest number of airports
    Top(TopArgs),
    /// List every airport of a country with its runway identifiers
    Runways(RunwaysArgs),
}

/// Arguments for the top command (airport-count ranking)
#[derive(Debug, Clone, Parser)]
pub struct TopArgs {
    /// Path to the airports source
    ///
    /// A file, or a directory containing airports.csv. Defaults to the
    /// configured data directory.
    #[arg(
        short = 'a',
        long = "airports",
        value_name = "PATH",
        help = "Path to the airports CSV file or its directory"
    )]
    pub airports: Option<PathBuf>,

    /// Path to the countries source
    ///
    /// A file, or a directory containing countries.csv. Defaults to the
    /// configured data directory.
    #[arg(
        short = 'c',
        long = "countries",
        value_name = "PATH",
        help = "Path to the countries CSV file or its directory"
    )]
    pub countries: Option<PathBuf>,

    /// Number of ranking entries to emit
    ///
    /// Fewer countries than the limit is not an error; the whole table is
    /// shown in that case.
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "COUNT",
        help = "Number of ranking entries to emit (config default: 10)"
    )]
    pub limit: Option<usize>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/airport-reporter/config.toml
    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the ranking
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the runways command (per-airport runway listing)
#[derive(Debug, Clone, Parser)]
pub struct RunwaysArgs {
    /// Country to query, by exact ISO code or by name (any case)
    #[arg(value_name = "COUNTRY", help = "Country code or country name to query")]
    pub country: String,

    /// Path to the airports source
    #[arg(
        short = 'a',
        long = "airports",
        value_name = "PATH",
        help = "Path to the airports CSV file or its directory"
    )]
    pub airports: Option<PathBuf>,

    /// Path to the countries source
    #[arg(
        short = 'c',
        long = "countries",
        value_name = "PATH",
        help = "Path to the countries CSV file or its directory"
    )]
    pub countries: Option<PathBuf>,

    /// Path to the runways source
    #[arg(
        short = 'r',
        long = "runways",
        value_name = "PATH",
        help = "Path to the runways CSV file or its directory"
    )]
    pub runways: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the runway listing
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl TopArgs {
    /// Validate the top command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(Error::configuration(
                    "Ranking limit must be greater than 0",
                ));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }
}

impl RunwaysArgs {
    /// Validate the runways command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.country.trim().is_empty() {
            return Err(Error::configuration("Country query cannot be empty"));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }
}

fn log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_command() {
        let args = Args::parse_from([
            "airport-reporter",
            "top",
            "--airports",
            "/data/airports.csv",
            "--countries",
            "/data",
            "-n",
            "5",
        ]);

        match args.command {
            Some(Commands::Top(top)) => {
                assert_eq!(top.airports, Some(PathBuf::from("/data/airports.csv")));
                assert_eq!(top.countries, Some(PathBuf::from("/data")));
                assert_eq!(top.limit, Some(5));
                assert_eq!(top.output_format, OutputFormat::Human);
            }
            other => panic!("expected top command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_runways_command() {
        let args = Args::parse_from([
            "airport-reporter",
            "runways",
            "Spain",
            "-a",
            "/data",
            "-c",
            "/data",
            "-r",
            "/data",
            "--output-format",
            "json",
        ]);

        match args.command {
            Some(Commands::Runways(runways)) => {
                assert_eq!(runways.country, "Spain");
                assert_eq!(runways.output_format, OutputFormat::Json);
            }
            other => panic!("expected runways command, got {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let args = Args::parse_from(["airport-reporter"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_top_args_validation() {
        let mut top = TopArgs {
            airports: None,
            countries: None,
            limit: Some(10),
            config_file: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
        };
        assert!(top.validate().is_ok());

        top.limit = Some(0);
        assert!(top.validate().is_err());

        top.limit = None;
        top.config_file = Some(PathBuf::from("/nonexistent/config.toml"));
        assert!(top.validate().is_err());
    }

    #[test]
    fn test_runways_args_validation() {
        let mut runways = RunwaysArgs {
            country: "ES".to_string(),
            airports: None,
            countries: None,
            runways: None,
            config_file: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
        };
        assert!(runways.validate().is_ok());

        runways.country = "   ".to_string();
        assert!(runways.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false, 0), "warn");
        assert_eq!(log_level(false, 1), "info");
        assert_eq!(log_level(false, 2), "debug");
        assert_eq!(log_level(false, 3), "trace");
        assert_eq!(log_level(true, 0), "error");
    }
}
