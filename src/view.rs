//! What the presentation layer shows for a [`Snapshot`](crate::controller::Snapshot)

use std::fmt::{Display, Error, Formatter};

use chrono::NaiveDate;

use crate::category::Category;
use crate::controller::Snapshot;
use crate::history::{DayHistory, FetchState};
use crate::record::CategoryRecord;

pub const LOADING_MESSAGE: &str = "Loading historical data...";

/// A titled list of records
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub category: Category,
    pub records: Vec<CategoryRecord>,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self.category {
            Category::Events => "Historical Events",
            Category::Births => "Famous Birthdays",
            Category::Deaths => "Notable Deaths",
            Category::Holidays => "Holidays & Observances",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self.category {
            Category::Events => "No historical events found for this date.",
            Category::Births => "No famous birthdays found for this date.",
            Category::Deaths => "No notable deaths found for this date.",
            Category::Holidays => "No holidays found for this date.",
        }
    }
}

/// How many records each category holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub events: usize,
    pub births: usize,
    pub deaths: usize,
    pub holidays: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} events | {} births | {} deaths | {} holidays",
            self.events, self.births, self.deaths, self.holidays)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewBody {
    Loading,
    Error(String),
    Panels {
        /// The first holiday of the day, if any
        holiday_banner: Option<String>,
        panels: Vec<Panel>,
        summary: Summary,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub date: NaiveDate,
    pub body: ViewBody,
}

impl ViewModel {
    pub fn new(date: NaiveDate, state: &FetchState) -> Self {
        let body = match state {
            FetchState::Loading => ViewBody::Loading,
            FetchState::Error(msg) => ViewBody::Error(msg.clone()),
            FetchState::Ready(history) => panels_for(history),
        };
        Self { date, body }
    }

    /// Date heading, e.g. "March 3, 2026"
    pub fn heading(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

impl From<&Snapshot> for ViewModel {
    fn from(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.date, &snapshot.state)
    }
}

fn panels_for(history: &DayHistory) -> ViewBody {
    let holiday_banner = history.holidays.first().map(|holiday| holiday.text().to_string());
    let panels = Category::ALL.iter()
        .map(|category| Panel { category: *category, records: history.category(*category).to_vec() })
        .collect();
    let summary = Summary {
        events: history.events.len(),
        births: history.births.len(),
        deaths: history.deaths.len(),
        holidays: history.holidays.len(),
    };

    ViewBody::Panels { holiday_banner, panels, summary }
}

impl Display for ViewModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(f, "=== Today in History: {} ===", self.heading())?;

        match &self.body {
            ViewBody::Loading => writeln!(f, "{}", LOADING_MESSAGE),
            ViewBody::Error(msg) => writeln!(f, "Error: {}", msg),
            ViewBody::Panels { holiday_banner, panels, summary } => {
                if let Some(banner) = holiday_banner {
                    writeln!(f, "* Celebrating today: {}", banner)?;
                }
                for panel in panels {
                    writeln!(f)?;
                    writeln!(f, "--- {} ---", panel.title())?;
                    if panel.records.is_empty() {
                        writeln!(f, "  {}", panel.empty_message())?;
                    }
                    for record in &panel.records {
                        writeln!(f, "  - {}", record)?;
                    }
                }
                writeln!(f)?;
                writeln!(f, "{}", summary)
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Year;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
    }

    #[test]
    fn loading_and_errors_have_no_panels() {
        let view = ViewModel::new(date(), &FetchState::Loading);
        assert_eq!(view.body, ViewBody::Loading);
        assert!(view.to_string().contains(LOADING_MESSAGE));

        let view = ViewModel::new(date(), &FetchState::Error("Failed to fetch historical data".to_string()));
        let text = view.to_string();
        assert!(text.contains("Failed to fetch historical data"));
        assert!(text.contains("Historical Events") == false);
    }

    #[test]
    fn ready_state_renders_every_panel() {
        let history = DayHistory {
            events: vec![CategoryRecord::new(Year::Known(json!(1845)), "Florida becomes a state".to_string())],
            births: Vec::new(),
            deaths: vec![CategoryRecord::new(Year::Known(json!(1792)), "Robert Adam".to_string())],
            holidays: vec![CategoryRecord::new(Year::Unknown, "Hinamatsuri".to_string())],
        };
        let view = ViewModel::new(date(), &FetchState::Ready(history));
        assert_eq!(view.heading(), "March 3, 2026");

        match &view.body {
            ViewBody::Panels { holiday_banner, panels, summary } => {
                assert_eq!(holiday_banner.as_deref(), Some("Hinamatsuri"));
                assert_eq!(panels.len(), 4);
                assert_eq!(*summary, Summary { events: 1, births: 0, deaths: 1, holidays: 1 });
            },
            other => panic!("unexpected body {:?}", other),
        }

        let text = view.to_string();
        assert!(text.contains("1845: Florida becomes a state"));
        assert!(text.contains("No famous birthdays found for this date."));
        assert!(text.contains("Celebrating today: Hinamatsuri"));
        assert!(text.contains("1 events | 0 births | 1 deaths | 1 holidays"));
    }
}
