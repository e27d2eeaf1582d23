use serde::{Deserialize, Serialize};

/// One time-stamped data point from the forecast series.
///
/// Entries keep the order the upstream API returned them in; nothing is
/// reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Short category label, e.g. "Clear" or "Rain".
    pub condition: String,
    /// Formatted time of the data point, e.g. "Sat, 3:05 PM".
    pub observed_at: String,
    /// Display temperature, e.g. "(72°F)".
    pub temperature_label: String,
    /// Lookup key for a presentation icon, e.g. "icon01d". Resolving the key
    /// to artwork is the presentation layer's job.
    pub icon_key: String,
}

/// Whether sunshine shows up anywhere in the series, and when it first does.
///
/// Derived from the entries, never fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunnyVerdict {
    pub is_sunny: bool,
    /// Formatted time of the earliest "Clear" entry; `None` when there is none.
    pub first_sunny_at: Option<String>,
}

/// Everything one successful search produces. Recomputed in full on every
/// fetch; nothing carries over from the previous search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub entries: Vec<ForecastEntry>,
    pub verdict: SunnyVerdict,
}
