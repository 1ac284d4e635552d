//! Application-wide constants for source files, columns and reporting

/// Default filename looked up when a directory is given for the airports source
pub const DEFAULT_AIRPORTS_FILE: &str = "airports.csv";

/// Default filename looked up when a directory is given for the countries source
pub const DEFAULT_COUNTRIES_FILE: &str = "countries.csv";

/// Default filename looked up when a directory is given for the runways source
pub const DEFAULT_RUNWAYS_FILE: &str = "runways.csv";

/// Number of ranking entries emitted by default
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Minimum line count for a path to be accepted as a data source
pub const MIN_SOURCE_LINES: usize = 3;

/// Minimum byte size for a path to be accepted as a data source
pub const MIN_SOURCE_BYTES: u64 = 10;

/// Field delimiter of all three source files. Delimiters embedded inside
/// quoted fields are not supported; rows are split on every occurrence.
pub const FIELD_DELIMITER: char = ',';

/// Required column names per source file, matched against normalized header cells
pub mod columns {
    /// Country code column in the countries source
    pub const COUNTRY_CODE: &str = "code";
    /// Country display-name column in the countries source
    pub const COUNTRY_NAME: &str = "name";

    /// Airport identifier column in the airports source
    pub const AIRPORT_ID: &str = "id";
    /// Airport display-name column in the airports source
    pub const AIRPORT_NAME: &str = "name";
    /// Foreign key from an airport row to a country code
    pub const AIRPORT_ISO_COUNTRY: &str = "iso_country";

    /// Runway identifier column in the runways source
    pub const RUNWAY_ID: &str = "id";
    /// Foreign key from a runway row to an airport id
    pub const RUNWAY_AIRPORT_REF: &str = "airport_ref";
}
