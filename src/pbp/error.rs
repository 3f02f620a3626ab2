use thiserror::Error;

/// Failures surfaced by the play-by-play pipeline.
///
/// Parse failures always carry the offending raw text so a bad page can be
/// diagnosed from the error alone; the core never guesses a default value
/// for a field it could not parse.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A free-text shot description did not match the expected grammar.
    #[error("malformed description ({reason}): {text:?}")]
    MalformedDescription { text: String, reason: &'static str },

    /// A table row was structurally unusable (e.g. missing cells).
    #[error("malformed row: {reason}")]
    MalformedRow { reason: String },

    /// A page fetch failed. The aggregation is aborted, not retried.
    #[error("page fetch failed: {0}")]
    FetchFailed(anyhow::Error),

    /// The caller raised the cancellation flag between page fetches.
    #[error("aggregation cancelled")]
    Cancelled,
}
