//! This crate tells what happened on a given day: historical events, notable births and deaths, and holidays.
//!
//! Data comes from the Wikimedia "On this day" feed, through the [`client`] module.
//! The four categories of a day are fetched concurrently by a [`HistoryClient`](history::HistoryClient), and their
//! records normalized into a uniform `(year, text)` shape (see [`record`]).
//!
//! A [`DateController`](controller::DateController) owns the selected date and the state of its fetch. It makes sure
//! the results of a date that is not selected anymore never overwrite the ones of the current selection.
//! A [`ViewModel`](view::ViewModel) turns this state into something a presentation layer can display.
//!
//! Any other data source can be plugged in by implementing [`FeedSource`](traits::FeedSource). The [`legacy`] module
//! provides one that scrapes the pre-rendered "Selected anniversaries" pages.

pub mod traits;

mod category;
pub use category::Category;
pub mod record;
pub use record::{CategoryRecord, RawRecord, Year};

pub mod client;
pub use client::Client;
pub mod history;
pub use history::{DayHistory, FetchState, HistoryClient};
pub mod controller;
pub use controller::DateController;
pub mod view;
pub use view::ViewModel;

pub mod legacy;
pub mod mock_behaviour;
pub mod mock_feed;

pub mod config;
pub mod utils;

/// The current local date, which is the date selected at startup
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
