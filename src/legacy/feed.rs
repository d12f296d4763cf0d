use std::error::Error;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use crate::category::Category;
use crate::client::API_USER_AGENT_HEADER;
use crate::config;
use crate::record::RawRecord;
use crate::traits::FeedSource;

use super::parser::{parse_extract, ParsedAnniversaries};

/// A [`FeedSource`] backed by the "Wikipedia:Selected anniversaries" pages of the MediaWiki API
///
/// A page covers events, births and deaths at once, so it is downloaded once per day
/// and shared by the category requests. A failed download fails all of them without being retried
/// until another day is asked for. It never has any holidays.
pub struct AnniversaryFeed {
    api: Url,
    user_agent: String,
    http: reqwest::Client,

    /// The last page, or why it could not be had
    last_page: Mutex<Option<((u32, u32), Result<ParsedAnniversaries, String>)>>,
}

impl AnniversaryFeed {
    pub fn new<S: AsRef<str>, T: ToString>(api_url: S, user_agent: T) -> Result<Self, Box<dyn Error>> {
        let api = Url::parse(api_url.as_ref())?;
        let user_agent = user_agent.to_string();
        let http = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .build()?;

        Ok(Self { api, user_agent, http, last_page: Mutex::new(None) })
    }

    /// Create a feed from the values in [`crate::config`]
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(config::get(&config::LEGACY_API_URL), config::get(&config::USER_AGENT))
    }

    /// The API query for the page of a given day, e.g. `Wikipedia:Selected_anniversaries/March_3`
    pub fn page_url(&self, date: NaiveDate) -> Url {
        let title = format!("Wikipedia:Selected_anniversaries/{}_{}", date.format("%B"), date.day());
        let mut url = self.api.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("format", "json")
            .append_pair("prop", "extracts")
            .append_pair("titles", &title)
            .append_pair("origin", "*");
        url
    }

    async fn download(&self, date: NaiveDate) -> Result<ParsedAnniversaries, Box<dyn Error + Send + Sync>> {
        let url = self.page_url(date);
        log::debug!("Fetching {}", url);

        let response = self.http
            .get(url.clone())
            .header(API_USER_AGENT_HEADER, self.user_agent.as_str())
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), url).into());
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        let extract = first_page_extract(&body).ok_or("No data found for this date")?;
        Ok(parse_extract(extract))
    }
}

/// The extract of the first page of a `query` reply
pub fn first_page_extract(body: &Value) -> Option<&str> {
    body.get("query")?
        .get("pages")?
        .as_object()?
        .values()
        .next()?
        .get("extract")?
        .as_str()
        .filter(|extract| extract.is_empty() == false)
}

#[async_trait]
impl FeedSource for AnniversaryFeed {
    async fn fetch_category(&self, category: Category, date: NaiveDate) -> Result<Vec<RawRecord>, Box<dyn Error + Send + Sync>> {
        if category == Category::Holidays {
            return Ok(Vec::new());
        }

        let key = (date.month(), date.day());
        // Held while downloading, so that concurrent categories wait for the same page
        let mut last_page = self.last_page.lock().await;
        let up_to_date = matches!(&*last_page, Some((cached_key, _)) if *cached_key == key);
        if up_to_date == false {
            let page = self.download(date).await.map_err(|err| err.to_string());
            *last_page = Some((key, page));
        }
        let parsed = match &*last_page {
            Some((_, Ok(parsed))) => parsed,
            Some((_, Err(err))) => return Err(err.clone().into()),
            None => return Err("Anniversaries page has vanished".into()),
        };

        let records = match category {
            Category::Events => &parsed.events,
            Category::Births => &parsed.births,
            Category::Deaths => &parsed.deaths,
            Category::Holidays => return Ok(Vec::new()),
        };
        Ok(records.clone())
    }
}
