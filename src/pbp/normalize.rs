//! Normalization of raw Shot Finder table rows into canonical records.

use serde::Serialize;

use super::description::parse_description;
use super::error::ScrapeError;

/// One row exactly as decoded from a Shot Finder results table, before any
/// parsing. Produced by the page decoder, consumed once by [`normalize_row`].
#[derive(Debug, Clone, Default)]
pub struct RawTableRow {
    /// Home/away marker cell: `"@"` for road games, blank for home games.
    pub home_away: String,
    pub quarter: String,
    pub time: String,
    /// Result cell text (e.g. `"Made 3-pt"`). The authoritative make/miss
    /// signal is the verb inside the description, not this cell.
    pub result: String,
    pub description: String,
}

/// Canonical shot attempt. The exported column order is fixed:
/// `home, distance, type, assisted, result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShotRecord {
    pub is_home: bool,
    pub distance_ft: u32,
    pub shot_type: String,
    pub assisted: bool,
    pub made: bool,
}

/// The site repeats the column header mid-table; those echo rows carry this
/// literal in the description cell.
const HEADER_ECHO: &str = "Description";

/// Normalize one raw row.
///
/// `Ok(None)` is a benign skip (a repeated-header artifact), `Err` is a real
/// parse failure that must surface to the caller.
pub fn normalize_row(row: &RawTableRow) -> Result<Option<ShotRecord>, ScrapeError> {
    if row.description == HEADER_ECHO {
        return Ok(None);
    }
    if row.description.trim().is_empty() {
        return Err(ScrapeError::MalformedRow {
            reason: "missing description field".to_string(),
        });
    }

    let fragment = parse_description(&row.description)?;
    Ok(Some(ShotRecord {
        is_home: row.home_away != "@",
        distance_ft: fragment.distance_ft,
        shot_type: fragment.shot_type,
        assisted: fragment.assisted,
        made: fragment.made,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(home_away: &str, description: &str) -> RawTableRow {
        RawTableRow {
            home_away: home_away.to_string(),
            quarter: "1st".to_string(),
            time: "10:42".to_string(),
            result: "Made 2-pt".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn at_marker_means_away() {
        let rec = normalize_row(&row("@", "A makes layup from 2 ft"))
            .unwrap()
            .unwrap();
        assert!(!rec.is_home);
    }

    #[test]
    fn blank_or_other_marker_means_home() {
        for marker in ["", " ", "vs"] {
            let rec = normalize_row(&row(marker, "A makes layup from 2 ft"))
                .unwrap()
                .unwrap();
            assert!(rec.is_home, "marker {marker:?} should mean home");
        }
    }

    #[test]
    fn header_echo_is_a_benign_skip() {
        assert!(normalize_row(&row("", "Description")).unwrap().is_none());
    }

    #[test]
    fn missing_description_is_malformed_row() {
        let err = normalize_row(&row("@", "  ")).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedRow { .. }));
    }

    #[test]
    fn parser_fields_are_merged() {
        let rec = normalize_row(&row(
            "@",
            "Brandon Ingram misses 3-pt jump shot from 26 ft",
        ))
        .unwrap()
        .unwrap();
        assert_eq!(
            rec,
            ShotRecord {
                is_home: false,
                distance_ft: 26,
                shot_type: "3-pt jump shot".into(),
                assisted: false,
                made: false,
            }
        );
    }

    #[test]
    fn parse_failure_propagates() {
        let err = normalize_row(&row("", "unintelligible")).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedDescription { .. }));
    }
}
