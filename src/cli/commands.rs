//! Command implementations for the airport reporter CLI
//!
//! Contains the command execution logic: logging setup, layered configuration,
//! source-file resolution and validation, query orchestration and report
//! rendering. The core services only ever see paths this module has already
//! validated.

use crate::app::models::ResolvedCountry;
use crate::app::services::airport_join::{find_airports, find_runways};
use crate::app::services::country_registry::CountryRegistry;
use crate::app::services::ranking::{top_n, RankingEntry};
use crate::cli::args::{Args, Commands, OutputFormat, RunwaysArgs, TopArgs};
use crate::cli::input;
use crate::config::Config;
use crate::constants::{MIN_SOURCE_BYTES, MIN_SOURCE_LINES};
use crate::{Error, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runway listing for a single resolved country
#[derive(Debug, Clone, Serialize)]
pub struct RunwayReport {
    pub country: ResolvedCountry,
    pub airports: Vec<AirportRunways>,
}

/// One airport of the report with its runway identifiers in file order
#[derive(Debug, Clone, Serialize)]
pub struct AirportRunways {
    pub id: String,
    pub name: String,
    pub runways: Vec<String>,
}

/// Main command runner
///
/// Dispatches to the requested subcommand, or starts the interactive session
/// when none was given. Any returned error maps to a non-zero exit status in
/// `main`.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Top(top)) => run_top(top),
        Some(Commands::Runways(runways)) => run_runways(runways),
        None => run_interactive(),
    }
}

fn run_top(args: TopArgs) -> Result<()> {
    args.validate()?;
    setup_logging(args.get_log_level(), args.quiet);

    let config = load_configuration(args.config_file.as_deref())?;
    let limit = args.limit.unwrap_or(config.report.ranking_limit);

    let countries = locate_source(
        args.countries.as_deref(),
        &config,
        &config.sources.countries_file,
    )?;
    let airports = locate_source(
        args.airports.as_deref(),
        &config,
        &config.sources.airports_file,
    )?;

    let ranking = execute_top(&airports, &countries, limit)?;
    print!("{}", render_ranking(&ranking, limit, args.output_format)?);
    Ok(())
}

fn run_runways(args: RunwaysArgs) -> Result<()> {
    args.validate()?;
    setup_logging(args.get_log_level(), args.quiet);

    let config = load_configuration(args.config_file.as_deref())?;

    let countries = locate_source(
        args.countries.as_deref(),
        &config,
        &config.sources.countries_file,
    )?;
    let airports = locate_source(
        args.airports.as_deref(),
        &config,
        &config.sources.airports_file,
    )?;
    let runways = locate_source(
        args.runways.as_deref(),
        &config,
        &config.sources.runways_file,
    )?;

    let report = execute_runways(&airports, &countries, &runways, &args.country)?;
    print!("{}", render_runway_report(&report, args.output_format)?);
    Ok(())
}

fn run_interactive() -> Result<()> {
    let config = load_configuration(None)?;
    setup_logging(&config.logging.level, false);
    input::run_session(&config)
}

/// Run the ranking query: load the country table, count airports, rank
pub fn execute_top(
    airports_path: &Path,
    countries_path: &Path,
    limit: usize,
) -> Result<Vec<RankingEntry>> {
    info!("Running ranking query (limit {})", limit);
    let registry = CountryRegistry::load(countries_path)?;
    let counts = registry.airport_counts(airports_path)?;
    Ok(top_n(&counts, limit))
}

/// Run the runway query: resolve the country, collect its airports, then
/// join their runways
///
/// When the country has no airports the runway source is never opened and
/// the report carries an empty airport list.
pub fn execute_runways(
    airports_path: &Path,
    countries_path: &Path,
    runways_path: &Path,
    country_query: &str,
) -> Result<RunwayReport> {
    info!("Running runway query for '{}'", country_query);
    let registry = CountryRegistry::load(countries_path)?;
    let country = registry.resolve(country_query)?;

    let airports = find_airports(airports_path, &country.code)?;
    if airports.is_empty() {
        debug!(
            "No airports registered for {} ({}), skipping runway source",
            country.name, country.code
        );
        return Ok(RunwayReport {
            country,
            airports: Vec::new(),
        });
    }

    let runways = find_runways(runways_path, &airports)?;
    let airports = airports
        .into_iter()
        .map(|(id, name)| {
            let runways = runways.get(&id).cloned().unwrap_or_default();
            AirportRunways { id, name, runways }
        })
        .collect();

    Ok(RunwayReport { country, airports })
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airport_reporter={}", log_level)));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A second init (e.g. from tests) is harmless
    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration with the layered approach and validate it
fn load_configuration(config_file: Option<&Path>) -> Result<Config> {
    let config = Config::load_layered(config_file)?;
    config.validate()?;
    Ok(config)
}

/// Pick the source path from the CLI argument or the configured data directory
fn locate_source(arg: Option<&Path>, config: &Config, default_file: &str) -> Result<PathBuf> {
    let base = match arg {
        Some(path) => path.to_path_buf(),
        None => config
            .sources
            .data_dir
            .clone()
            .ok_or_else(|| {
                Error::configuration(format!(
                    "No path given for '{}' and no data directory is configured",
                    default_file
                ))
            })?,
    };
    resolve_source_file(&base, default_file)
}

/// Resolve and validate a user-supplied source path
///
/// A directory resolves to `default_file` inside it. The resolved path must
/// exist, be a regular readable file and hold at least [`MIN_SOURCE_LINES`]
/// lines and [`MIN_SOURCE_BYTES`] bytes before it is handed to the core.
pub fn resolve_source_file(route: &Path, default_file: &str) -> Result<PathBuf> {
    let path = if route.is_dir() {
        route.join(default_file)
    } else {
        route.to_path_buf()
    };
    let display = path.display().to_string();

    if !path.exists() {
        return Err(Error::invalid_source(&display, "no file has been found"));
    }
    if !path.is_file() {
        return Err(Error::invalid_source(&display, "not a regular file"));
    }

    let metadata = std::fs::metadata(&path).map_err(|e| Error::io(&display, e))?;
    if metadata.len() < MIN_SOURCE_BYTES {
        return Err(Error::invalid_source(
            &display,
            format!("file is smaller than {} bytes", MIN_SOURCE_BYTES),
        ));
    }

    let file = File::open(&path).map_err(|e| Error::io(&display, e))?;
    let lines = BufReader::new(file).lines().count();
    if lines < MIN_SOURCE_LINES {
        return Err(Error::invalid_source(
            &display,
            format!("file holds fewer than {} lines", MIN_SOURCE_LINES),
        ));
    }

    debug!("Validated source file {}", path.display());
    Ok(path)
}

/// Render the airport-count ranking in the requested format
pub fn render_ranking(
    entries: &[RankingEntry],
    limit: usize,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            out.push_str(&format!(
                "{}\n",
                format!("Top {} countries with the most airports", limit).bold()
            ));
            for (position, entry) in entries.iter().enumerate() {
                out.push_str(&format!(
                    "{}. {}: {}\n",
                    position + 1,
                    entry.code.cyan(),
                    entry.airports
                ));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let json = serde_json::json!({ "ranking": entries });
            Ok(format!(
                "{}\n",
                serde_json::to_string_pretty(&json)
                    .map_err(|e| Error::configuration(format!("JSON rendering failed: {}", e)))?
            ))
        }
        OutputFormat::Csv => {
            let mut out = String::from("rank,code,airports\n");
            for (position, entry) in entries.iter().enumerate() {
                out.push_str(&format!(
                    "{},{},{}\n",
                    position + 1,
                    entry.code,
                    entry.airports
                ));
            }
            Ok(out)
        }
    }
}

/// Render the per-airport runway listing in the requested format
pub fn render_runway_report(report: &RunwayReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            if report.airports.is_empty() {
                out.push_str(&format!(
                    "The country '{}' ({}) has no airports registered.\n",
                    report.country.name, report.country.code
                ));
                out.push_str("The runway source will not be processed.\n");
                return Ok(out);
            }

            out.push_str(&format!(
                "{}\n",
                format!(
                    "Runway identifiers for the airports in {} ({}):",
                    report.country.name, report.country.code
                )
                .bold()
            ));
            for airport in &report.airports {
                let runways = if airport.runways.is_empty() {
                    "(none)".to_string()
                } else {
                    airport.runways.join(", ")
                };
                out.push_str(&format!(
                    "* {} (id {}): {}\n",
                    airport.name.green(),
                    airport.id,
                    runways
                ));
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(format!(
            "{}\n",
            serde_json::to_string_pretty(report)
                .map_err(|e| Error::configuration(format!("JSON rendering failed: {}", e)))?
        )),
        OutputFormat::Csv => {
            let mut out = String::from("country_code,airport_id,airport_name,runway_id\n");
            for airport in &report.airports {
                if airport.runways.is_empty() {
                    out.push_str(&format!(
                        "{},{},{},\n",
                        report.country.code, airport.id, airport.name
                    ));
                } else {
                    for runway in &airport.runways {
                        out.push_str(&format!(
                            "{},{},{},{}\n",
                            report.country.code, airport.id, airport.name, runway
                        ));
                    }
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_sources(dir: &Path) {
        let mut countries = File::create(dir.join("countries.csv")).unwrap();
        writeln!(countries, "\"id\",\"code\",\"name\"").unwrap();
        writeln!(countries, "1,\"ES\",\"Spain\"").unwrap();
        writeln!(countries, "2,\"FR\",\"France\"").unwrap();

        let mut airports = File::create(dir.join("airports.csv")).unwrap();
        writeln!(airports, "\"id\",\"name\",\"iso_country\"").unwrap();
        writeln!(airports, "1,\"Madrid-Barajas\",\"ES\"").unwrap();
        writeln!(airports, "2,\"Paris-Orly\",\"FR\"").unwrap();
        writeln!(airports, "3,\"Nice\",\"FR\"").unwrap();

        let mut runways = File::create(dir.join("runways.csv")).unwrap();
        writeln!(runways, "\"id\",\"airport_ref\"").unwrap();
        writeln!(runways, "10,1").unwrap();
        writeln!(runways, "11,1").unwrap();
        writeln!(runways, "12,2").unwrap();
    }

    #[test]
    fn test_resolve_source_file_directory_lookup() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path());

        let resolved = resolve_source_file(temp_dir.path(), "countries.csv").unwrap();
        assert_eq!(resolved, temp_dir.path().join("countries.csv"));

        // A direct file path passes through unchanged
        let direct = temp_dir.path().join("airports.csv");
        assert_eq!(resolve_source_file(&direct, "airports.csv").unwrap(), direct);
    }

    #[test]
    fn test_resolve_source_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err =
            resolve_source_file(&temp_dir.path().join("countries.csv"), "countries.csv")
                .unwrap_err();
        assert!(matches!(err, Error::InvalidSource { .. }));
    }

    #[test]
    fn test_resolve_source_file_too_short() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tiny.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "\"code\",\"name\"").unwrap();
        writeln!(file, "\"ES\",\"Spain\"").unwrap();

        let err = resolve_source_file(&path, "tiny.csv").unwrap_err();
        match err {
            Error::InvalidSource { reason, .. } => assert!(reason.contains("lines")),
            other => panic!("expected InvalidSource, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_source_file_too_small() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");
        File::create(&path).unwrap();

        let err = resolve_source_file(&path, "empty.csv").unwrap_err();
        match err {
            Error::InvalidSource { reason, .. } => assert!(reason.contains("bytes")),
            other => panic!("expected InvalidSource, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_top_scenario() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path());

        let ranking = execute_top(
            &temp_dir.path().join("airports.csv"),
            &temp_dir.path().join("countries.csv"),
            2,
        )
        .unwrap();

        assert_eq!(ranking.len(), 2);
        assert_eq!((ranking[0].code.as_str(), ranking[0].airports), ("FR", 2));
        assert_eq!((ranking[1].code.as_str(), ranking[1].airports), ("ES", 1));
    }

    #[test]
    fn test_execute_runways_scenario() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path());

        let report = execute_runways(
            &temp_dir.path().join("airports.csv"),
            &temp_dir.path().join("countries.csv"),
            &temp_dir.path().join("runways.csv"),
            "FR",
        )
        .unwrap();

        assert_eq!(report.country.name, "France");
        assert_eq!(report.airports.len(), 2);
        assert_eq!(report.airports[0].runways, ["12"]);
        assert!(report.airports[1].runways.is_empty());
    }

    #[test]
    fn test_execute_runways_not_found_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path());

        let err = execute_runways(
            &temp_dir.path().join("airports.csv"),
            &temp_dir.path().join("countries.csv"),
            &temp_dir.path().join("runways.csv"),
            "Atlantis",
        )
        .unwrap_err();
        assert!(matches!(err, Error::CountryNotFound { .. }));
    }

    #[test]
    fn test_render_ranking_csv_and_json() {
        let entries = vec![
            RankingEntry {
                code: "FR".to_string(),
                airports: 2,
            },
            RankingEntry {
                code: "ES".to_string(),
                airports: 1,
            },
        ];

        let csv = render_ranking(&entries, 2, OutputFormat::Csv).unwrap();
        assert_eq!(csv, "rank,code,airports\n1,FR,2\n2,ES,1\n");

        let json = render_ranking(&entries, 2, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["ranking"][0]["code"], "FR");
        assert_eq!(parsed["ranking"][0]["airports"], 2);
    }

    #[test]
    fn test_render_runway_report_human_empty() {
        let report = RunwayReport {
            country: ResolvedCountry::new("ES", "Spain"),
            airports: Vec::new(),
        };

        let out = render_runway_report(&report, OutputFormat::Human).unwrap();
        assert!(out.contains("'Spain' (ES) has no airports registered"));
        assert!(out.contains("will not be processed"));
    }

    #[test]
    fn test_render_runway_report_csv() {
        let report = RunwayReport {
            country: ResolvedCountry::new("FR", "France"),
            airports: vec![
                AirportRunways {
                    id: "2".to_string(),
                    name: "Paris-Orly".to_string(),
                    runways: vec!["12".to_string()],
                },
                AirportRunways {
                    id: "3".to_string(),
                    name: "Nice".to_string(),
                    runways: Vec::new(),
                },
            ],
        };

        let csv = render_runway_report(&report, OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "country_code,airport_id,airport_name,runway_id\nFR,2,Paris-Orly,12\nFR,3,Nice,\n"
        );
    }
}
