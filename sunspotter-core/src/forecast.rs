//! Parsing the raw forecast document and deriving the sunny verdict.
//!
//! This is a pure function over the response body: identical input and time
//! zone always produce identical output. The parse is all-or-nothing; a
//! malformed element anywhere fails the whole document and no partial list
//! escapes.

use std::fmt;

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::error::Error;
use crate::model::{ForecastEntry, ForecastReport, SunnyVerdict};

/// Display pattern for forecast times, e.g. "Sun, 2:46 AM".
const TIME_FORMAT: &str = "%a, %-l:%M %p";

/// Prefix turning an upstream icon code into a presentation lookup key.
const ICON_PREFIX: &str = "icon";

/// Condition label that counts as sunshine.
const SUNNY_CONDITION: &str = "Clear";

/// Parse a forecast document, formatting times in the host's local zone.
pub fn parse_forecast(raw: &str) -> Result<ForecastReport, Error> {
    parse_forecast_in(raw, &chrono::Local)
}

/// Parse a forecast document, formatting times in an explicit zone.
///
/// The app passes [`chrono::Local`]; tests pass [`Utc`] so the expected
/// strings do not depend on the host.
pub fn parse_forecast_in<Tz>(raw: &str, tz: &Tz) -> Result<ForecastReport, Error>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let parsed: RawForecast =
        serde_json::from_str(raw).map_err(|e| Error::parse(e.to_string()))?;

    let mut entries = Vec::with_capacity(parsed.list.len());
    let mut verdict = SunnyVerdict::default();

    for (index, point) in parsed.list.iter().enumerate() {
        let weather = point
            .weather
            .first()
            .ok_or_else(|| Error::parse(format!("entry {index} has an empty `weather` array")))?;

        let entry = ForecastEntry {
            condition: weather.main.clone(),
            observed_at: format_unix(point.dt.seconds()?, tz)?,
            temperature_label: format!("({}°F)", point.main.temp),
            icon_key: format!("{ICON_PREFIX}{}", weather.icon),
        };

        // The earliest "Clear" slot wins; later ones never move the time.
        if !verdict.is_sunny && entry.condition == SUNNY_CONDITION {
            verdict.is_sunny = true;
            verdict.first_sunny_at = Some(entry.observed_at.clone());
        }

        entries.push(entry);
    }

    Ok(ForecastReport { entries, verdict })
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    list: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    dt: Timestamp,
    main: RawMain,
    weather: Vec<RawWeather>,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    temp: Scalar,
}

#[derive(Debug, Deserialize)]
struct RawWeather {
    main: String,
    icon: String,
}

/// Unix timestamp in seconds. The API encodes it as a number, but
/// string-encoded timestamps are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Seconds(i64),
    Text(String),
}

impl Timestamp {
    fn seconds(&self) -> Result<i64, Error> {
        match self {
            Timestamp::Seconds(s) => Ok(*s),
            Timestamp::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::parse(format!("`dt` is not a unix timestamp: {s:?}"))),
        }
    }
}

/// A JSON value carried into display text exactly as the API spelled it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => fmt::Display::fmt(n, f),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

fn format_unix<Tz>(secs: i64, tz: &Tz) -> Result<String, Error>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let utc = Utc
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| Error::parse(format!("`dt` {secs} is out of range")))?;

    Ok(utc.with_timezone(tz).format(TIME_FORMAT).to_string())
}
