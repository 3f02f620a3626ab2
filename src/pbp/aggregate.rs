//! Page-by-page aggregation of Shot Finder results.
//!
//! Pagination is inherently sequential: each next-page link is discovered
//! only after the prior page is decoded. The aggregator owns that walk and
//! nothing else; network retrieval and HTML decoding are collaborator
//! traits so the state machine stays testable with synthetic pages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use super::error::ScrapeError;
use super::normalize::{normalize_row, RawTableRow, ShotRecord};

/// Network collaborator: retrieves one page body per locator.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, locator: &Url) -> anyhow::Result<String>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Decoding collaborator: pulls table rows and the next-page link out of an
/// already-fetched page body.
pub trait PageDecoder: Send + Sync {
    fn rows(&self, page: &str) -> Result<Vec<RawTableRow>, ScrapeError>;
    fn next_page(&self, page: &str) -> Option<Url>;
}

/// Aggregation knobs. The default is strict: any failure aborts the whole
/// run and no partial dataset escapes.
#[derive(Clone, Default)]
pub struct AggregateOptions {
    /// Return the rows collected before a mid-run fetch failure or
    /// cancellation instead of failing the aggregation. Caller opt-in only;
    /// parse failures abort in every mode.
    pub allow_partial: bool,
    /// Checked between page fetches; raising it stops the aggregation.
    pub cancel: Option<Arc<AtomicBool>>,
}

/// Transient pagination state: the page just fetched plus where to go next.
struct PaginationCursor {
    body: String,
    next: Option<Url>,
}

/// Walk every results page starting from `start`, normalizing rows in page
/// order, row order. Returns the full ordered record sequence.
pub async fn aggregate_shots(
    start: Url,
    fetcher: &dyn PageFetcher,
    decoder: &dyn PageDecoder,
    options: &AggregateOptions,
) -> Result<Vec<ShotRecord>, ScrapeError> {
    let first_page = fetcher
        .fetch(&start)
        .await
        .map_err(ScrapeError::FetchFailed)?;
    aggregate_from_page(first_page, fetcher, decoder, options).await
}

/// Same as [`aggregate_shots`] but with the first page already loaded, for
/// callers that inspected it (e.g. to read the page header) before
/// aggregating.
pub async fn aggregate_from_page(
    first_page: String,
    fetcher: &dyn PageFetcher,
    decoder: &dyn PageDecoder,
    options: &AggregateOptions,
) -> Result<Vec<ShotRecord>, ScrapeError> {
    let mut records: Vec<ShotRecord> = Vec::new();
    let mut pages = 0usize;
    let mut cursor = PaginationCursor {
        next: decoder.next_page(&first_page),
        body: first_page,
    };

    loop {
        pages += 1;
        for row in decoder.rows(&cursor.body)? {
            if let Some(record) = normalize_row(&row)? {
                records.push(record);
            }
        }
        info!(
            "collected {} shots over {} page(s) from {}",
            records.len(),
            pages,
            fetcher.name()
        );

        let Some(next) = cursor.next.take() else {
            break; // no more pages
        };

        if let Some(flag) = &options.cancel {
            if flag.load(Ordering::Relaxed) {
                if options.allow_partial {
                    warn!("cancelled after {} rows, returning partial set", records.len());
                    return Ok(records);
                }
                return Err(ScrapeError::Cancelled);
            }
        }

        match fetcher.fetch(&next).await {
            Ok(body) => {
                cursor = PaginationCursor {
                    next: decoder.next_page(&body),
                    body,
                };
            }
            Err(e) if options.allow_partial => {
                warn!(
                    "fetch failed after {} rows, returning partial set: {e}",
                    records.len()
                );
                return Ok(records);
            }
            Err(e) => return Err(ScrapeError::FetchFailed(e)),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicBool;

    /// Serves pages from a map; URLs absent from the map fail the fetch.
    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, locator: &Url) -> anyhow::Result<String> {
            self.pages
                .get(locator.as_str())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no page at {locator}"))
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    /// Line-oriented stand-in for the HTML decoder: `shot <description>`
    /// lines become rows, a `next <url>` line becomes the pagination link.
    struct LineDecoder;

    impl PageDecoder for LineDecoder {
        fn rows(&self, page: &str) -> Result<Vec<RawTableRow>, ScrapeError> {
            Ok(page
                .lines()
                .filter_map(|l| l.strip_prefix("shot "))
                .map(|desc| RawTableRow {
                    description: desc.to_string(),
                    ..RawTableRow::default()
                })
                .collect())
        }

        fn next_page(&self, page: &str) -> Option<Url> {
            page.lines()
                .find_map(|l| l.strip_prefix("next "))
                .and_then(|href| Url::parse(href).ok())
        }
    }

    fn three_pages() -> StubFetcher {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com/p1".to_string(),
            "shot A makes layup from 1 ft\nshot A misses dunk at rim\nnext https://example.com/p2"
                .to_string(),
        );
        pages.insert(
            "https://example.com/p2".to_string(),
            "shot Description\nshot A makes jump shot from 15 ft\nnext https://example.com/p3"
                .to_string(),
        );
        pages.insert(
            "https://example.com/p3".to_string(),
            "shot A misses 3-pt jump shot from 26 ft".to_string(),
        );
        StubFetcher { pages }
    }

    fn start() -> Url {
        Url::parse("https://example.com/p1").unwrap()
    }

    #[tokio::test]
    async fn walks_all_pages_in_order() {
        let fetcher = three_pages();
        let records = aggregate_shots(start(), &fetcher, &LineDecoder, &AggregateOptions::default())
            .await
            .unwrap();
        // 4 valid rows across 3 pages; the header echo on page 2 is skipped.
        assert_eq!(records.len(), 4);
        let distances: Vec<u32> = records.iter().map(|r| r.distance_ft).collect();
        assert_eq!(distances, vec![1, 0, 15, 26]);
    }

    #[tokio::test]
    async fn fetch_failure_discards_partial_result_by_default() {
        let mut fetcher = three_pages();
        fetcher.pages.remove("https://example.com/p2");
        let err = aggregate_shots(start(), &fetcher, &LineDecoder, &AggregateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn fetch_failure_with_partial_opt_in_returns_prior_rows() {
        let mut fetcher = three_pages();
        fetcher.pages.remove("https://example.com/p2");
        let options = AggregateOptions {
            allow_partial: true,
            ..AggregateOptions::default()
        };
        let records = aggregate_shots(start(), &fetcher, &LineDecoder, &options)
            .await
            .unwrap();
        assert_eq!(records.len(), 2); // page 1 only
    }

    #[tokio::test]
    async fn first_page_fetch_failure_is_fetch_failed_even_with_partial() {
        let fetcher = StubFetcher {
            pages: HashMap::new(),
        };
        let options = AggregateOptions {
            allow_partial: true,
            ..AggregateOptions::default()
        };
        let err = aggregate_shots(start(), &fetcher, &LineDecoder, &options)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn cancellation_stops_between_page_fetches() {
        let fetcher = three_pages();
        let flag = Arc::new(AtomicBool::new(true));
        let options = AggregateOptions {
            allow_partial: false,
            cancel: Some(Arc::clone(&flag)),
        };
        let err = aggregate_shots(start(), &fetcher, &LineDecoder, &options)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Cancelled));
    }

    #[tokio::test]
    async fn cancellation_with_partial_returns_rows_so_far() {
        let fetcher = three_pages();
        let flag = Arc::new(AtomicBool::new(true));
        let options = AggregateOptions {
            allow_partial: true,
            cancel: Some(Arc::clone(&flag)),
        };
        let records = aggregate_shots(start(), &fetcher, &LineDecoder, &options)
            .await
            .unwrap();
        assert_eq!(records.len(), 2); // page 1 rows, then the flag stops page 2
    }

    #[tokio::test]
    async fn malformed_description_aborts_in_every_mode() {
        let mut fetcher = three_pages();
        fetcher.pages.insert(
            "https://example.com/p2".to_string(),
            "shot total nonsense\nnext https://example.com/p3".to_string(),
        );
        for allow_partial in [false, true] {
            let options = AggregateOptions {
                allow_partial,
                ..AggregateOptions::default()
            };
            let err = aggregate_shots(start(), &fetcher, &LineDecoder, &options)
                .await
                .unwrap_err();
            assert!(matches!(err, ScrapeError::MalformedDescription { .. }));
        }
    }
}
