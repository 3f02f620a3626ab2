pub mod aggregate;
pub mod description;
pub mod error;
pub mod normalize;

pub use aggregate::{
    aggregate_from_page, aggregate_shots, AggregateOptions, PageDecoder, PageFetcher,
};
pub use description::{parse_description, ShotFragment};
pub use error::ScrapeError;
pub use normalize::{normalize_row, RawTableRow, ShotRecord};
