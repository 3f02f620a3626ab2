//! Parser for Shot Finder free-text shot descriptions.
//!
//! A description reads like
//! `"LeBron James makes 3-pt jump shot from 25 ft (assist by Kevin Love)"`
//! or `"LeBron James misses dunk at rim"`. The make/miss verb anchors the
//! sentence: everything before it is the player name echoed by the site,
//! everything after it carries the shot type, the stated distance and the
//! assist attribution. Anything that does not fit the grammar is an error,
//! never a silently-defaulted record.

use super::error::ScrapeError;

/// The description-derived fields of a shot, before the home/away merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotFragment {
    /// Stated distance in feet; `0` for shots at the rim, which carry none.
    pub distance_ft: u32,
    /// Shot classification token, verbatim from the sentence
    /// (e.g. `"3-pt jump shot"`, `"layup"`). Open vocabulary, not an enum.
    pub shot_type: String,
    pub assisted: bool,
    pub made: bool,
}

const MAKES: &str = " makes ";
const MISSES: &str = " misses ";

/// Parse one shot description into a [`ShotFragment`].
///
/// The verb markers are case-sensitive and must appear with their natural
/// spacing; a sentence containing neither (or both) is not resolvable and
/// fails with [`ScrapeError::MalformedDescription`].
pub fn parse_description(text: &str) -> Result<ShotFragment, ScrapeError> {
    if text.trim().is_empty() {
        return Err(malformed(text, "empty description"));
    }

    let (made, remainder) = if let Some((_subject, rest)) = text.split_once(MAKES) {
        if text.contains(MISSES) {
            return Err(malformed(text, "both make and miss markers present"));
        }
        (true, rest)
    } else if let Some((_subject, rest)) = text.split_once(MISSES) {
        (false, rest)
    } else {
        return Err(malformed(text, "no make/miss marker"));
    };

    let (shot_type, distance_ft) = if let Some((shot_type, tail)) = remainder.split_once(" from ")
    {
        // "jump shot from 25 ft (assist by ...)" -- the leading token of
        // the piece before " ft" must be the stated distance.
        let Some((stated, _)) = tail.split_once(" ft") else {
            return Err(malformed(text, "distance clause without ft unit"));
        };
        let token = stated.split_whitespace().next().unwrap_or("");
        let distance = token
            .parse::<u32>()
            .map_err(|_| malformed(text, "distance token is not an unsigned integer"))?;
        (shot_type.to_string(), distance)
    } else {
        // "dunk at rim" -- shots at the rim have no stated distance.
        let shot_type = remainder.split_once(" at ").map_or(remainder, |(t, _)| t);
        (shot_type.to_string(), 0)
    };

    Ok(ShotFragment {
        distance_ft,
        shot_type,
        // The assist clause always trails the distance/type split point.
        assisted: remainder.contains("assist"),
        made,
    })
}

fn malformed(text: &str, reason: &'static str) -> ScrapeError {
    ScrapeError::MalformedDescription {
        text: text.to_string(),
        reason,
    }
}
