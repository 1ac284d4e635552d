//! Interactive session for the airport reporter
//!
//! Started when the binary runs without a subcommand: prompts for the three
//! source files (re-prompting until each path validates), then loops over a
//! small menu. A failed country lookup is recoverable and returns to the
//! menu; anything else aborts the session.

use crate::cli::args::OutputFormat;
use crate::cli::commands::{
    execute_runways, execute_top, render_ranking, render_runway_report, resolve_source_file,
};
use crate::config::Config;
use crate::{Error, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Menu options of the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Top,
    Runways,
    Exit,
}

/// Parse a menu selection: the option number or the word in caps (any case)
fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    let input = input.trim();
    if input == "1" || input.eq_ignore_ascii_case("TOP") {
        Some(MenuChoice::Top)
    } else if input == "2" || input.eq_ignore_ascii_case("RUNWAYS") {
        Some(MenuChoice::Runways)
    } else if input == "3" || input.eq_ignore_ascii_case("EXIT") {
        Some(MenuChoice::Exit)
    } else {
        None
    }
}

/// Run the interactive session until the user exits
pub fn run_session(config: &Config) -> Result<()> {
    print_banner();

    let airports = ask_for_source(
        "You may now specify the route of the airports source to use:",
        &config.sources.airports_file,
    )?;
    let countries = ask_for_source(
        "OK. You may now specify the route of the countries source to use:",
        &config.sources.countries_file,
    )?;
    let runways = ask_for_source(
        "OK. You may now specify the route of the runways source to use:",
        &config.sources.runways_file,
    )?;

    println!("OK. What would you like to do?");
    menu_loop(config, &airports, &countries, &runways)?;

    println!("BYE");
    Ok(())
}

fn print_banner() {
    println!("/-------------------/");
    println!("/      AIRPORT      /");
    println!("/-------------------/");
    println!("{:>20}", format!("v{}", env!("CARGO_PKG_VERSION")));
    println!(" > INTERACTIVE MODE");
    println!();
}

fn menu_loop(
    config: &Config,
    airports: &Path,
    countries: &Path,
    runways: &Path,
) -> Result<()> {
    let mut first_round = true;

    loop {
        if first_round {
            println!("You can use the number as well as the word in CAPS to select an option:");
            println!(
                "1. TOP {} countries with highest number of airports",
                config.report.ranking_limit
            );
            println!("2. RUNWAYS for each airport given a country code or country name");
            println!("3. EXIT");
        } else {
            println!();
            println!("OK. Something else? (1. TOP; 2. RUNWAYS; 3. EXIT)");
        }
        first_round = false;

        let choice = match prompt()? {
            Some(line) => parse_menu_choice(&line),
            // Closed stdin ends the session like EXIT
            None => Some(MenuChoice::Exit),
        };

        match choice {
            Some(MenuChoice::Top) => {
                let ranking = execute_top(airports, countries, config.report.ranking_limit)?;
                print!(
                    "{}",
                    render_ranking(&ranking, config.report.ranking_limit, OutputFormat::Human)?
                );
            }
            Some(MenuChoice::Runways) => {
                println!(
                    "OK. For which country? You may query the exact country code or country name"
                );
                let query = match prompt()? {
                    Some(line) => line,
                    None => return Ok(()),
                };

                match execute_runways(airports, countries, runways, &query) {
                    Ok(report) => {
                        print!("{}", render_runway_report(&report, OutputFormat::Human)?)
                    }
                    Err(error) if error.is_recoverable() => eprintln!("{}", error),
                    Err(error) => return Err(error),
                }
            }
            Some(MenuChoice::Exit) => return Ok(()),
            None => {
                // Unknown input falls through and re-prompts
            }
        }
    }
}

/// Prompt until the user supplies a path that validates as a data source
fn ask_for_source(message: &str, default_file: &str) -> Result<PathBuf> {
    println!("{}", message);

    loop {
        let line = match prompt()? {
            Some(line) => line,
            None => {
                return Err(Error::Input {
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "input ended"),
                })
            }
        };

        match resolve_source_file(Path::new(&line), default_file) {
            Ok(path) => return Ok(path),
            Err(error) => {
                eprintln!("{}", error);
                println!("Please specify another route:");
            }
        }
    }
}

/// Print the prompt marker and read one trimmed line.
/// Returns `None` when standard input is exhausted.
fn prompt() -> Result<Option<String>> {
    print!("> ");
    io::stdout()
        .flush()
        .map_err(|e| Error::Input { source: e })?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| Error::Input { source: e })?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_choice_numbers_and_words() {
        assert_eq!(parse_menu_choice("1"), Some(MenuChoice::Top));
        assert_eq!(parse_menu_choice("TOP"), Some(MenuChoice::Top));
        assert_eq!(parse_menu_choice("top"), Some(MenuChoice::Top));
        assert_eq!(parse_menu_choice("2"), Some(MenuChoice::Runways));
        assert_eq!(parse_menu_choice("Runways"), Some(MenuChoice::Runways));
        assert_eq!(parse_menu_choice("3"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("exit"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice(" 1 "), Some(MenuChoice::Top));
    }

    #[test]
    fn test_parse_menu_choice_rejects_unknown() {
        assert_eq!(parse_menu_choice(""), None);
        assert_eq!(parse_menu_choice("4"), None);
        assert_eq!(parse_menu_choice("topmost"), None);
        assert_eq!(parse_menu_choice("12"), None);
    }
}
