//! Catalog feed compiler.
//!
//! Turns primary and secondary catalog rows into a marketplace feed:
//!
//! 1. [`grouping`] partitions rows by product code
//! 2. [`ids`] derives group ids and variant disambiguators
//! 3. [`normalize`] cleans and merges per-group fields
//! 4. [`offers`] builds the main and variant offers of a group
//! 5. [`pipeline`] runs the whole cycle and renders the document
//!
//! Compiled feeds are published through [`snapshot::FeedSnapshot`] and
//! refreshed periodically by [`refresh::Refresher`].

pub mod context;
pub mod grouping;
pub mod ids;
pub mod normalize;
pub mod offers;
pub mod pipeline;
pub mod refresh;
pub mod snapshot;

pub use context::CompileContext;
pub use grouping::group_rows;
pub use ids::{
    DISAMBIGUATOR_LEN, GROUP_ID_MODULUS, group_id, main_offer_id, variant_disambiguator,
    variant_offer_id,
};
pub use normalize::{NormalizedGroup, NormalizedVariant, normalize_group};
pub use offers::build_offers;
pub use pipeline::{CompileReport, CompiledFeed, FeedCompiler, build_document};
pub use refresh::{PublishHook, RefreshOutcome, Refresher};
pub use snapshot::{FeedSnapshot, NotReady};
