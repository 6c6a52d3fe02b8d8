//! Catalog feed output.
//!
//! - **YML writer**: renders a [`feed_model::FeedDocument`] as marketplace feed text
//! - **Feed file**: replaces a feed file on disk without exposing partial writes
//! - **YML reader**: parses a feed back into offers for inspection

mod common;
mod file;
mod reader;
mod yml;

pub use common::{CONTENT_TYPE, ENCODING, FEED_DATE_FORMAT};
pub use file::write_feed_file;
pub use reader::{ParsedFeed, ParsedOffer, ParsedShop, read_feed};
pub use yml::render_feed;
