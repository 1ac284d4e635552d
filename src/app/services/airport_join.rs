//! Country-scoped airport lookup and runway join
//!
//! Given a resolved country code, the join engine scans the airports source
//! for that country's airports, then scans the runways source once to attach
//! runway identifiers to each of them. Callers must skip the runway scan
//! entirely when no airport matched; `find_runways` is never responsible for
//! that short-circuit.

use crate::app::models::{AirportRecord, RunwayRecord};
use crate::app::services::csv_table::{Row, TableReader};
use crate::constants::columns;
use crate::Result;
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

/// Airport id to airport name, in file order
pub type AirportTable = IndexMap<String, String>;

/// Airport id to its runway identifiers, in file order
pub type RunwayTable = IndexMap<String, Vec<String>>;

/// Resolved column positions for the airports source
#[derive(Debug, Clone, Copy)]
struct AirportSchema {
    id: usize,
    name: usize,
    iso_country: usize,
}

impl AirportSchema {
    fn resolve(reader: &TableReader) -> Result<Self> {
        Ok(Self {
            iso_country: reader.require(columns::AIRPORT_ISO_COUNTRY)?,
            id: reader.require(columns::AIRPORT_ID)?,
            name: reader.require(columns::AIRPORT_NAME)?,
        })
    }

    fn record(&self, row: &Row) -> AirportRecord {
        AirportRecord {
            id: row.get(self.id).to_string(),
            name: row.get(self.name).to_string(),
            iso_country: row.get(self.iso_country).to_string(),
        }
    }
}

/// Resolved column positions for the runways source
#[derive(Debug, Clone, Copy)]
struct RunwaySchema {
    id: usize,
    airport_ref: usize,
}

impl RunwaySchema {
    fn resolve(reader: &TableReader) -> Result<Self> {
        Ok(Self {
            airport_ref: reader.require(columns::RUNWAY_AIRPORT_REF)?,
            id: reader.require(columns::RUNWAY_ID)?,
        })
    }

    fn record(&self, row: &Row) -> RunwayRecord {
        RunwayRecord {
            id: row.get(self.id).to_string(),
            airport_ref: row.get(self.airport_ref).to_string(),
        }
    }
}

/// Scan the airports source and keep the airports of one country
///
/// Returns an id-to-name table holding only rows whose `iso_country` equals
/// `country_code`, in file order. An empty result is not an error; the caller
/// decides whether the runway source is worth opening.
pub fn find_airports(airports_path: &Path, country_code: &str) -> Result<AirportTable> {
    let reader = TableReader::open(airports_path)?;
    let schema = AirportSchema::resolve(&reader)?;

    let mut airports = AirportTable::new();
    for row in reader.rows() {
        let record = schema.record(&row?);
        if record.iso_country == country_code {
            airports.insert(record.id, record.name);
        }
    }

    debug!(
        "Found {} airports for country '{}' in {}",
        airports.len(),
        country_code,
        airports_path.display()
    );
    Ok(airports)
}

/// Scan the runways source and attach runway ids to the given airports
///
/// Every airport id starts with an empty list; each runway row whose
/// `airport_ref` is one of the given ids appends its runway id, preserving
/// file order. Runways referencing airports outside the set are join misses
/// and are ignored.
pub fn find_runways(runways_path: &Path, airports: &AirportTable) -> Result<RunwayTable> {
    let mut runways: RunwayTable = airports
        .keys()
        .map(|id| (id.clone(), Vec::new()))
        .collect();

    let reader = TableReader::open(runways_path)?;
    let schema = RunwaySchema::resolve(&reader)?;

    for row in reader.rows() {
        let record = schema.record(&row?);
        if let Some(ids) = runways.get_mut(&record.airport_ref) {
            ids.push(record.id);
        }
    }

    debug!(
        "Joined runways for {} airports from {}",
        runways.len(),
        runways_path.display()
    );
    Ok(runways)
}
