//! This module provides a client to the Wikimedia "On this day" feed

use std::error::Error;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;
use url::Url;

use crate::category::Category;
use crate::config;
use crate::record::RawRecord;
use crate::traits::FeedSource;

/// Wikimedia APIs ask browser-like clients to identify themselves with this header
pub static API_USER_AGENT_HEADER: &str = "Api-User-Agent";

/// A [`FeedSource`] that fetches its data from the remote feed
#[derive(Clone, Debug)]
pub struct Client {
    base: Url,
    user_agent: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString>(base_url: S, user_agent: T) -> Result<Self, Box<dyn Error>> {
        let base_url = base_url.as_ref().trim_end_matches('/');
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(format!("{} cannot be used as a feed root", base_url).into());
        }

        let user_agent = user_agent.to_string();
        HeaderValue::from_str(&user_agent)
            .map_err(|err| format!("Invalid user agent {:?}: {}", user_agent, err))?;

        let http = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .build()?;

        Ok(Self { base, user_agent, http })
    }

    /// Create a client from the values in [`crate::config`]
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(config::get(&config::FEED_BASE_URL), config::get(&config::USER_AGENT))
    }

    pub fn base(&self) -> &Url { &self.base }

    /// The URL of a category for a given day, e.g. `{base}/births/03/07`
    pub fn category_url(&self, category: Category, date: NaiveDate) -> Url {
        let mut url = self.base.clone();
        // `cannot_be_a_base` has been ruled out in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(category.as_str())
                .push(&format!("{:02}", date.month()))
                .push(&format!("{:02}", date.day()));
        }
        url
    }
}

#[async_trait]
impl FeedSource for Client {
    async fn fetch_category(&self, category: Category, date: NaiveDate) -> Result<Vec<RawRecord>, Box<dyn Error + Send + Sync>> {
        let url = self.category_url(category, date);
        log::debug!("Fetching {}", url);

        let response = self.http
            .get(url.clone())
            .header(API_USER_AGENT_HEADER, self.user_agent.as_str())
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), url).into());
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|err| format!("Invalid JSON reply for {}: {}", url, err))?;
        extract_records(category, body)
    }
}

/// Pick the records array out of a feed reply
///
/// The reply is an object with a key named after the category. A reply without it simply has no records.
pub fn extract_records(category: Category, mut body: Value) -> Result<Vec<RawRecord>, Box<dyn Error + Send + Sync>> {
    let records = match body.get_mut(category.as_str()) {
        None | Some(Value::Null) => {
            log::warn!("Reply for {} has no {:?} key, assuming no records", category, category.as_str());
            return Ok(Vec::new());
        },
        Some(records) => records.take(),
    };

    match serde_json::from_value(records) {
        Ok(records) => Ok(records),
        Err(err) => Err(format!("Unable to decode {} records: {}", category, err).into()),
    }
}
