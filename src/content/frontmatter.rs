//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::ParseError;

const DELIMITER: &str = "---";

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Option<Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value]))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(Some(vec))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter exactly as written in the file, before validation.
/// Unrecognized keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<String>,
    excerpt: Option<String>,
    date: Option<String>,
    #[serde(rename = "readTime", alias = "read_time")]
    read_time: Option<String>,
    category: Option<String>,
    author: Option<String>,
    image: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    keywords: Option<Vec<String>>,
}

/// Validated front-matter of a post
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub excerpt: String,
    /// Date as written in the file
    pub date: String,
    /// `date`, resolved to an instant
    pub published: DateTime<Utc>,
    pub read_time: String,
    pub category: String,
    pub author: String,
    pub image: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl FrontMatter {
    /// Parse front-matter from the raw text of a content file.
    /// Returns (front_matter, body). Takes no ambient state.
    pub fn parse(raw: &str) -> Result<(Self, &str), ParseError> {
        let (yaml, body) = split(raw)?;

        let fm = if yaml.trim().is_empty() {
            RawFrontMatter::default()
        } else {
            serde_yaml::from_str::<RawFrontMatter>(yaml)?
        };

        Ok((Self::validate(fm)?, body))
    }

    fn validate(raw: RawFrontMatter) -> Result<Self, ParseError> {
        let date = raw.date.ok_or(ParseError::MissingField("date"))?;
        let published =
            parse_date_string(&date).ok_or_else(|| ParseError::InvalidDate(date.clone()))?;

        Ok(Self {
            title: raw.title.ok_or(ParseError::MissingField("title"))?,
            excerpt: raw.excerpt.ok_or(ParseError::MissingField("excerpt"))?,
            date,
            published,
            read_time: raw.read_time.ok_or(ParseError::MissingField("readTime"))?,
            category: raw.category.ok_or(ParseError::MissingField("category"))?,
            author: raw.author.ok_or(ParseError::MissingField("author"))?,
            image: raw.image,
            keywords: raw.keywords,
        })
    }
}

/// Split raw text into the YAML block and the body following it
fn split(raw: &str) -> Result<(&str, &str), ParseError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = text.split_inclusive('\n');
    let opening = lines.next().ok_or(ParseError::MissingFrontMatter)?;
    if opening.trim_end() != DELIMITER {
        return Err(ParseError::MissingFrontMatter);
    }

    let rest = &text[opening.len()..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(ParseError::UnterminatedFrontMatter)
}

/// Parse a date string in the accepted formats. Naive values are taken as UTC.
pub(crate) fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
