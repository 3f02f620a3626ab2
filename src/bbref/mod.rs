pub mod client;
pub mod page;

pub use client::{BbrefClient, PlayerHit, Season};
pub use page::{season_label, ShotFinderPage};
