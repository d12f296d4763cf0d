//! Fetching everything the feed knows about a day, in one go

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::JoinHandle;

use crate::category::Category;
use crate::record::{normalize_category, CategoryRecord};
use crate::traits::FeedSource;

/// The message shown when a whole fetch failed
pub const GLOBAL_FETCH_ERROR: &str = "Failed to fetch historical data";

/// The normalized records of every category, for a single day
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayHistory {
    pub events: Vec<CategoryRecord>,
    pub births: Vec<CategoryRecord>,
    pub deaths: Vec<CategoryRecord>,
    pub holidays: Vec<CategoryRecord>,
}

impl DayHistory {
    pub fn category(&self, category: Category) -> &[CategoryRecord] {
        match category {
            Category::Events => &self.events,
            Category::Births => &self.births,
            Category::Deaths => &self.deaths,
            Category::Holidays => &self.holidays,
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.category(*c).is_empty())
    }
}

/// Where a fetch stands
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState {
    Loading,
    Error(String),
    Ready(DayHistory),
}

impl Default for FetchState {
    fn default() -> Self {
        Self::Loading
    }
}

impl FetchState {
    pub fn is_loading(&self) -> bool { matches!(self, FetchState::Loading) }

    pub fn history(&self) -> Option<&DayHistory> {
        match self {
            FetchState::Ready(history) => Some(history),
            _ => None,
        }
    }
}


/// Fetches the four categories of a day from a [`FeedSource`]
pub struct HistoryClient<S> {
    source: Arc<S>,
}

impl<S> Clone for HistoryClient<S> {
    fn clone(&self) -> Self {
        Self { source: Arc::clone(&self.source) }
    }
}

impl<S> HistoryClient<S>
where
    S: FeedSource + Send + Sync + 'static,
{
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S { &self.source }

    /// Fetch every category of `date` concurrently, and wait until all of them have settled.
    ///
    /// A failing category is logged and left empty. Only a failure of the fan-in itself
    /// (a category task that panicked, or got cancelled) turns the whole result into [`FetchState::Error`].
    pub async fn fetch_all(&self, date: NaiveDate) -> FetchState {
        log::info!("Fetching history for {}", date.format("%m/%d"));

        let events = self.spawn_category(Category::Events, date);
        let births = self.spawn_category(Category::Births, date);
        let deaths = self.spawn_category(Category::Deaths, date);
        let holidays = self.spawn_category(Category::Holidays, date);

        match tokio::join!(events, births, deaths, holidays) {
            (Ok(events), Ok(births), Ok(deaths), Ok(holidays)) => {
                log::debug!("Got {} events, {} births, {} deaths and {} holidays for {}",
                    events.len(), births.len(), deaths.len(), holidays.len(), date.format("%m/%d"));
                FetchState::Ready(DayHistory { events, births, deaths, holidays })
            },
            results => {
                let errors = [results.0.err(), results.1.err(), results.2.err(), results.3.err()];
                for err in errors.iter().flatten() {
                    log::error!("Unable to join a category fetch for {}: {}", date.format("%m/%d"), err);
                }
                FetchState::Error(GLOBAL_FETCH_ERROR.to_string())
            },
        }
    }

    fn spawn_category(&self, category: Category, date: NaiveDate) -> JoinHandle<Vec<CategoryRecord>> {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            match source.fetch_category(category, date).await {
                Ok(raws) => normalize_category(category, raws),
                Err(err) => {
                    log::warn!("Unable to fetch {} for {}: {}. Leaving it empty.", category, date.format("%m/%d"), err);
                    Vec::new()
                },
            }
        })
    }
}
