//! Airport Reporter Library
//!
//! A Rust library for answering two fixed queries over the OurAirports
//! reference datasets (airports, countries, runways):
//! - Ranking countries by number of registered airports
//! - Listing every airport of a country together with its runway identifiers
//!
//! This library provides tools for:
//! - Parsing the comma-delimited source files with header-driven column lookup
//! - Building insertion-ordered country and airport-count tables
//! - Resolving a free-form country query (ISO code or name) against the source
//! - Joining airports to their runways for a single country
//! - Comprehensive error handling with typed failure kinds

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod airport_join;
        pub mod country_registry;
        pub mod csv_table;
        pub mod ranking;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{AirportRecord, CountryRecord, ResolvedCountry, RunwayRecord};
pub use config::Config;

/// Result type alias for the airport reporter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dataset loading and query operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Source file could not be opened or read
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from a source file header
    #[error("required column '{column}' is absent in the specified file '{file}'")]
    Schema { file: String, column: String },

    /// The country query matched no row in the countries source.
    /// Recoverable: an interactive caller may re-prompt.
    #[error("no match on countries with '{query}' has been found")]
    CountryNotFound { query: String },

    /// A user-supplied path failed the shell's source validation
    #[error("'{path}' is not a valid data source: {reason}")]
    InvalidSource { path: String, reason: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Interactive input could not be read
    #[error("the provided input could not be processed: {source}")]
    Input {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an I/O error with the offending path attached
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a schema error naming the file and the missing column
    pub fn schema(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::Schema {
            file: file.into(),
            column: column.into(),
        }
    }

    /// Create a country-not-found error for a query string
    pub fn country_not_found(query: impl Into<String>) -> Self {
        Self::CountryNotFound {
            query: query.into(),
        }
    }

    /// Create an invalid-source error
    pub fn invalid_source(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for failures an interactive session can recover from by re-prompting
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CountryNotFound { .. } | Self::InvalidSource { .. } | Self::Input { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Input { source: error }
    }
}
