//! Country table loading, airport counting and country resolution
//!
//! The registry is an immutable snapshot of the countries source: an
//! insertion-ordered code-to-name table. Airport counting and country
//! resolution both re-scan their source file per call; nothing is cached
//! across queries.

use crate::app::models::{CountryRecord, ResolvedCountry};
use crate::app::services::csv_table::{normalize_field, Row, TableReader};
use crate::constants::columns;
use crate::Result;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Airport count per country code, in country-table insertion order
pub type AirportCounts = IndexMap<String, usize>;

/// Resolved column positions for the countries source
#[derive(Debug, Clone, Copy)]
struct CountrySchema {
    code: usize,
    name: usize,
}

impl CountrySchema {
    fn resolve(reader: &TableReader) -> Result<Self> {
        Ok(Self {
            code: reader.require(columns::COUNTRY_CODE)?,
            name: reader.require(columns::COUNTRY_NAME)?,
        })
    }

    fn record(&self, row: &Row) -> CountryRecord {
        CountryRecord {
            code: row.get(self.code).to_string(),
            name: row.get(self.name).to_string(),
        }
    }
}

/// Insertion-ordered snapshot of the countries source
///
/// Duplicate codes keep the position of their first occurrence and the name
/// of their last one. The resolver deliberately bypasses this table and
/// re-scans the raw source, so it always reports the first occurrence.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    source: PathBuf,
    countries: IndexMap<String, String>,
}

impl CountryRegistry {
    /// Load the code-to-name table from the countries source
    ///
    /// Fails with a schema error if the `code` or `name` column is absent,
    /// or with an I/O error if the source cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = TableReader::open(path)?;
        let schema = CountrySchema::resolve(&reader)?;

        let mut countries = IndexMap::new();
        for row in reader.rows() {
            let record = schema.record(&row?);
            countries.insert(record.code, record.name);
        }

        info!(
            "Loaded {} countries from {}",
            countries.len(),
            path.display()
        );

        Ok(Self {
            source: path.to_path_buf(),
            countries,
        })
    }

    /// Number of distinct country codes in the table
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// True when the countries source held no data rows
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Display name for a code, if the table knows it
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.countries.get(code).map(String::as_str)
    }

    /// The code-to-name table in insertion order
    pub fn countries(&self) -> &IndexMap<String, String> {
        &self.countries
    }

    /// Count airports per country
    ///
    /// Every known code starts at zero; each airport row whose `iso_country`
    /// matches a known code increments that country. Rows referencing unknown
    /// codes are join misses and are ignored without error.
    pub fn airport_counts(&self, airports_path: &Path) -> Result<AirportCounts> {
        let mut counts: AirportCounts = self
            .countries
            .keys()
            .map(|code| (code.clone(), 0))
            .collect();

        let reader = TableReader::open(airports_path)?;
        let iso_country = reader.require(columns::AIRPORT_ISO_COUNTRY)?;

        let mut scanned = 0usize;
        for row in reader.rows() {
            let row = row?;
            scanned += 1;
            if let Some(count) = counts.get_mut(row.get(iso_country)) {
                *count += 1;
            }
        }

        debug!(
            "Counted airports for {} countries over {} airport rows",
            counts.len(),
            scanned
        );
        Ok(counts)
    }

    /// Resolve a free-form query (code or name) to a canonical country
    ///
    /// The query is trimmed and quote-stripped with the field normalization
    /// rule, then matched against the raw source rows in file order: a row
    /// matches on exact code (case-sensitive) or on name ignoring case. The
    /// scan stops at the first match. An exhausted source fails with
    /// `CountryNotFound`, which callers may treat as recoverable.
    pub fn resolve(&self, query: &str) -> Result<ResolvedCountry> {
        let query = normalize_field(query).to_string();
        let query_lower = query.to_lowercase();

        let reader = TableReader::open(&self.source)?;
        let schema = CountrySchema::resolve(&reader)?;

        for row in reader.rows() {
            let record = schema.record(&row?);
            if query == record.code || query_lower == record.name.to_lowercase() {
                debug!("Resolved '{}' to {} ({})", query, record.name, record.code);
                return Ok(ResolvedCountry::new(record.code, record.name));
            }
        }

        Err(crate::Error::country_not_found(query))
    }
}
