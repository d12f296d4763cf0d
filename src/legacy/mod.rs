//! This module handles the "Selected anniversaries" pages, a source that only has pre-rendered HTML
//!
//! Records are scraped from the HTML, then handed out through the regular [`FeedSource`](crate::traits::FeedSource) interface,
//! so that nothing else in this crate needs to know about the scraping.

mod parser;
pub use parser::{parse_extract, ParsedAnniversaries};
mod feed;
pub use feed::{first_page_extract, AnniversaryFeed};
