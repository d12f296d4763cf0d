//! The four kinds of items the feed knows about

use std::fmt::{Display, Error, Formatter};

use serde::{Deserialize, Serialize};

/// A category of the "On this day" feed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Events,
    Births,
    Deaths,
    Holidays,
}

impl Category {
    /// Every category, in the order panels are displayed
    pub const ALL: [Category; 4] = [
        Category::Events,
        Category::Births,
        Category::Deaths,
        Category::Holidays,
    ];

    /// The path segment used by the feed, which is also the key of the records array in its replies
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Events => "events",
            Category::Births => "births",
            Category::Deaths => "deaths",
            Category::Holidays => "holidays",
        }
    }

    /// How many records of this category are kept after a fetch
    pub fn display_limit(&self) -> usize {
        match self {
            Category::Holidays => 10,
            _ => 15,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}
