//! Data models for the three source datasets
//!
//! Each record type mirrors the columns the queries need; everything else in
//! the source files is ignored at parse time. Records are immutable once
//! built and live only for the duration of a single query.

use serde::Serialize;

/// One row of the countries source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    /// Short unique identifier, e.g. an ISO-like two-letter code
    pub code: String,
    /// Display name
    pub name: String,
}

/// One row of the airports source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportRecord {
    /// Unique airport identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Foreign key into the country codes
    pub iso_country: String,
}

/// One row of the runways source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunwayRecord {
    /// Runway identifier
    pub id: String,
    /// Foreign key into the airport ids
    pub airport_ref: String,
}

/// Canonical code and name of a country matched by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCountry {
    pub code: String,
    pub name: String,
}

impl ResolvedCountry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
