use std::error::Error;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::category::Category;
use crate::record::RawRecord;

/// Something that knows what happened on a given day
///
/// Only the month and day of `date` are meaningful, the year is ignored.
#[async_trait]
pub trait FeedSource {
    /// Returns the raw records of a category, in the order the source lists them
    async fn fetch_category(&self, category: Category, date: NaiveDate) -> Result<Vec<RawRecord>, Box<dyn Error + Send + Sync>>;
}
