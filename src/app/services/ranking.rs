//! Country ranking by airport count
//!
//! Sorting is stable, so equal counts keep their country-table insertion
//! order. That makes the ranking deterministic across runs of the same
//! source files.

use crate::app::services::country_registry::AirportCounts;
use serde::Serialize;

/// One entry of the airport-count ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub code: String,
    pub airports: usize,
}

/// The top `limit` countries by airport count, descending
///
/// Fewer than `limit` countries is not an error; the whole table is returned
/// in that case.
pub fn top_n(counts: &AirportCounts, limit: usize) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = counts
        .iter()
        .map(|(code, airports)| RankingEntry {
            code: code.clone(),
            airports: *airports,
        })
        .collect();

    // Stable sort: ties stay in insertion order
    entries.sort_by(|a, b| b.airports.cmp(&a.airports));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::country_registry::AirportCounts;

    fn counts_from(pairs: &[(&str, usize)]) -> AirportCounts {
        pairs
            .iter()
            .map(|(code, count)| (code.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_top_n_descending() {
        let counts = counts_from(&[("ES", 1), ("FR", 2)]);
        let top = top_n(&counts, 2);

        assert_eq!(top.len(), 2);
        assert_eq!((top[0].code.as_str(), top[0].airports), ("FR", 2));
        assert_eq!((top[1].code.as_str(), top[1].airports), ("ES", 1));
    }

    #[test]
    fn test_top_n_fewer_countries_than_limit() {
        let counts = counts_from(&[("ES", 3), ("FR", 1), ("DE", 2)]);
        let top = top_n(&counts, 10);

        assert_eq!(top.len(), 3);
        let codes: Vec<&str> = top.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["ES", "DE", "FR"]);
    }

    #[test]
    fn test_top_n_ties_keep_insertion_order() {
        let counts = counts_from(&[("AA", 1), ("BB", 2), ("CC", 1), ("DD", 2)]);
        let top = top_n(&counts, 4);

        let codes: Vec<&str> = top.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["BB", "DD", "AA", "CC"]);
    }

    #[test]
    fn test_top_n_truncates() {
        let counts = counts_from(&[("AA", 5), ("BB", 4), ("CC", 3)]);
        let top = top_n(&counts, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].code, "AA");
        assert_eq!(top[1].code, "BB");
    }

    #[test]
    fn test_top_n_empty_counts() {
        let counts = AirportCounts::new();
        assert!(top_n(&counts, 10).is_empty());
    }

    #[test]
    fn test_top_n_zero_limit() {
        let counts = counts_from(&[("ES", 1)]);
        assert!(top_n(&counts, 0).is_empty());
    }
}
