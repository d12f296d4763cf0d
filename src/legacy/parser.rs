//! A module to parse the pre-rendered "Selected anniversaries" pages

use scraper::Html;
use serde_json::Value;

use crate::record::RawRecord;
use crate::utils::{closest, find_elems, own_text, previous_element, text_content};

/// What separates the year of an item from its text, e.g. "1969 – Apollo 11 lands"
const YEAR_SEPARATORS: [&str; 3] = [" – ", " — ", " - "];

/// The records found in an anniversaries page
///
/// These pages have no notion of holidays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedAnniversaries {
    pub events: Vec<RawRecord>,
    pub births: Vec<RawRecord>,
    pub deaths: Vec<RawRecord>,
}

/// Parse the HTML extract of an anniversaries page
///
/// The extract is parsed the way a browser would, so that unclosed tags or HTML entities are fine.
/// Every list item with some text of its own (nested lists excluded) is sorted into a category:
/// * items that start with a year are events
/// * otherwise, items of a list that follows a "births" (resp. "deaths") heading are births (resp. deaths)
/// * anything else is an event
pub fn parse_extract(html: &str) -> ParsedAnniversaries {
    let fragment = Html::parse_fragment(html);
    let mut parsed = ParsedAnniversaries::default();

    for item in find_elems(fragment.root_element(), "li") {
        let section = closest(item, "ul")
            .and_then(previous_element)
            .map(text_content)
            .unwrap_or_default()
            .to_lowercase();
        classify(&own_text(item), &section, &mut parsed);
    }
    parsed
}

fn classify(text: &str, section: &str, parsed: &mut ParsedAnniversaries) {
    if text.is_empty() {
        return;
    }

    if text.starts_with(|c: char| c.is_ascii_digit()) {
        parsed.events.push(dated_record(text));
    } else if section.contains("birth") {
        parsed.births.push(RawRecord::new(None, text));
    } else if section.contains("death") {
        parsed.deaths.push(RawRecord::new(None, text));
    } else {
        parsed.events.push(RawRecord::new(None, text));
    }
}

/// "1969 – Apollo 11 lands" has the year 1969, and the text "Apollo 11 lands"
///
/// Whatever comes before the first separator is the year ("44 BC", "1990s"...), provided it is short enough to be one.
/// Without a separator, the leading digits are the year.
fn dated_record(text: &str) -> RawRecord {
    let separated = YEAR_SEPARATORS.iter()
        .filter_map(|separator| text.find(separator).map(|index| (index, separator.len())))
        .min_by_key(|(index, _)| *index)
        .filter(|(index, _)| text[..*index].split_whitespace().count() <= 2);

    let (year, rest) = match separated {
        Some((index, separator_len)) => (text[..index].trim(), text[index + separator_len..].trim()),
        None => {
            let digits_end = text.find(|c: char| c.is_ascii_digit() == false).unwrap_or_else(|| text.len());
            let (digits, rest) = text.split_at(digits_end);
            (digits, rest.trim_start_matches(|c: char| c.is_whitespace() || c == '–' || c == '—' || c == '-' || c == ':'))
        },
    };
    let description = if rest.is_empty() { text } else { rest };

    let year = match year.parse::<i64>() {
        Ok(year) => Value::from(year),
        Err(_) => Value::from(year),
    };

    RawRecord {
        year: Some(year),
        text: Some(description.to_string()),
        ..RawRecord::default()
    }
}
