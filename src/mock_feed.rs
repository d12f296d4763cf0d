//! An in-memory [`FeedSource`], to test everything that sits on top of a feed without a network

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tokio::sync::Semaphore;

use crate::category::Category;
use crate::mock_behaviour::MockBehaviour;
use crate::record::RawRecord;
use crate::traits::FeedSource;

type MonthDay = (u32, u32);

fn month_day(date: NaiveDate) -> MonthDay {
    (date.month(), date.day())
}

/// A feed that serves canned records
///
/// Records can be set for every day, or for a given day (which wins over the former).
/// Every request is recorded as `{category}/{MM}/{DD}`, i.e. the path a real feed would be asked for.
#[derive(Default)]
pub struct MockFeed {
    records: Mutex<HashMap<(Option<MonthDay>, Category), Vec<RawRecord>>>,
    behaviour: Mutex<MockBehaviour>,
    panicking: Mutex<HashSet<Category>>,
    gates: Mutex<HashMap<MonthDay, Arc<Semaphore>>>,
    requests: Mutex<Vec<String>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for `category`, whatever the day
    pub fn with_records(self, category: Category, records: Vec<RawRecord>) -> Self {
        self.records.lock().unwrap().insert((None, category), records);
        self
    }

    /// Serve `records` for `category` on the day of `date` only
    pub fn with_day_records(self, date: NaiveDate, category: Category, records: Vec<RawRecord>) -> Self {
        self.records.lock().unwrap().insert((Some(month_day(date)), category), records);
        self
    }

    pub fn with_behaviour(self, behaviour: MockBehaviour) -> Self {
        *self.behaviour.lock().unwrap() = behaviour;
        self
    }

    /// Fetching `category` will panic, which the fetching task cannot recover from
    pub fn with_panic(self, category: Category) -> Self {
        self.panicking.lock().unwrap().insert(category);
        self
    }

    /// Requests for the day of `date` will not complete until [`Self::release`] is called
    pub fn hold(&self, date: NaiveDate) {
        self.gates.lock().unwrap()
            .entry(month_day(date))
            .or_insert_with(|| Arc::new(Semaphore::new(0)));
    }

    /// Let the requests for the day of `date` complete
    pub fn release(&self, date: NaiveDate) {
        if let Some(gate) = self.gates.lock().unwrap().get(&month_day(date)) {
            // Every waiter gives the permit back once it is through
            gate.add_permits(1);
        }
    }

    /// The requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl FeedSource for MockFeed {
    async fn fetch_category(&self, category: Category, date: NaiveDate) -> Result<Vec<RawRecord>, Box<dyn Error + Send + Sync>> {
        let key = month_day(date);
        self.requests.lock().unwrap().push(format!("{}/{:02}/{:02}", category, key.0, key.1));

        let gate = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            log::debug!("Mock feed: holding {} for {:02}/{:02}", category, key.0, key.1);
            let _permit = gate.acquire().await
                .map_err(|err| format!("Mock gate is closed: {}", err))?;
        }

        if self.panicking.lock().unwrap().contains(&category) {
            panic!("Mock feed: panicking while fetching {}", category);
        }

        self.behaviour.lock().unwrap().can_fetch(category)?;

        let records = self.records.lock().unwrap();
        let served = records.get(&(Some(key), category))
            .or_else(|| records.get(&(None, category)))
            .cloned()
            .unwrap_or_default();
        Ok(served)
    }
}
