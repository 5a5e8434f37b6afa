//! Plant Catalogue
//!
//! Filter/sort/render pipeline for a public plant catalogue:
//! - `record`: catalogue record types (serde)
//! - `media`: image URL resolution
//! - `query`: predicate filter and comparator sort
//! - `view`: card/detail view models, builders, detail panel state
//!
//! The `web` feature adds the impure boundary: a one-shot catalogue
//! client, an Axum server rendering askama templates, and the JSON API.
//!
//! The core is pure and synchronous; one pipeline run borrows the record
//! array, applies the captured query snapshot, and projects view models.
//! Nothing in it can fail — missing data degrades to documented fallbacks.

pub mod media;
pub mod query;
pub mod record;
pub mod view;

#[cfg(feature = "web")]
pub mod client;
#[cfg(feature = "web")]
pub mod server;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use media::resolve_image_url;
pub use query::{filter, filter_and_sort, sort, AttributeKey, QuerySnapshot, SortMode};
pub use record::PlantRecord;
pub use view::{build_card, build_detail, build_grid, CardViewModel, DetailPanel, DetailViewModel, GridViewModel};
