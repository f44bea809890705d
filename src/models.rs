use crate::errors::ParseDayKeyError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, fmt, str::FromStr};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
/// Day keys written by the browser widget (`Date.prototype.toDateString`).
const LEGACY_DAY_KEY_FORMAT: &str = "%a %b %d %Y";

/// A local calendar day. Serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The previous calendar day, or `None` at the lower end of the calendar.
    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Whole days from `self` to `later`; negative when `later` is earlier.
    pub fn days_until(self, later: Self) -> i64 {
        later.0.signed_duration_since(self.0).num_days()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ParseDayKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, DAY_KEY_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(value, LEGACY_DAY_KEY_FORMAT))
            .map(Self)
            .map_err(|_| ParseDayKeyError(value.to_string()))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One daily submission. Built by the recorder from a validated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    task: String,
    #[serde(default)]
    note: String,
    timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(task: impl Into<String>, note: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            task: task.into(),
            note: note.into(),
            timestamp,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn note(&self) -> Option<&str> {
        if self.note.is_empty() {
            None
        } else {
            Some(&self.note)
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// At most one entry per day, iterated in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionLog(BTreeMap<DayKey, ActivityEntry>);

impl SubmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, day: DayKey) -> Option<&ActivityEntry> {
        self.0.get(&day)
    }

    pub fn contains(&self, day: DayKey) -> bool {
        self.0.contains_key(&day)
    }

    pub fn latest_day(&self) -> Option<DayKey> {
        self.0.last_key_value().map(|(day, _)| *day)
    }

    pub fn days(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.0.keys().copied()
    }

    /// Last write wins; returns the entry that was replaced, if any.
    pub(crate) fn upsert(&mut self, day: DayKey, entry: ActivityEntry) -> Option<ActivityEntry> {
        self.0.insert(day, entry)
    }
}

impl FromIterator<(DayKey, ActivityEntry)> for SubmissionLog {
    fn from_iter<I: IntoIterator<Item = (DayKey, ActivityEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl StreakState {
    pub fn new(current_streak: u32, longest_streak: u32) -> Self {
        Self {
            current_streak,
            longest_streak,
        }
    }
}

/// The persisted snapshot: `{ submissions, currentStreak, longestStreak }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    pub(crate) submissions: SubmissionLog,
    #[serde(flatten)]
    pub(crate) streaks: StreakState,
}

impl AppData {
    pub fn submissions(&self) -> &SubmissionLog {
        &self.submissions
    }

    pub fn streaks(&self) -> StreakState {
        self.streaks
    }

    pub fn has_entry_for(&self, day: DayKey) -> bool {
        self.submissions.contains(day)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub task: String,
    #[serde(default)]
    pub note: String,
}

impl SubmissionRequest {
    pub fn new(task: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            note: note.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: DayKey,
    pub submitted: bool,
    pub entry: Option<ActivityEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemLevel {
    Inactive,
    Initializing,
    Processing,
    Stable,
    Optimized,
    Peak,
}

impl SystemLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Initializing => "Initializing",
            Self::Processing => "Processing",
            Self::Stable => "Stable",
            Self::Optimized => "Optimized",
            Self::Peak => "Peak",
        }
    }
}

/// Growth stage of the garden visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GardenStage {
    Dormant,
    Node,
    Branch,
    Network,
    Matrix,
    System,
}

impl GardenStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dormant => "Initialization",
            Self::Node => "Processing",
            Self::Branch => "Expanding",
            Self::Network => "Connecting",
            Self::Matrix => "Stabilizing",
            Self::System => "Optimized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTier {
    Initialize,
    Building,
    Expanding,
    Established,
    Mastery,
}

impl VolumeTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Initialize => "Initialize",
            Self::Building => "Building",
            Self::Expanding => "Expanding",
            Self::Established => "Established",
            Self::Mastery => "Mastery",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub today: DayKey,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_submissions: usize,
    pub last_submission: Option<DayKey>,
    pub submitted_today: bool,
    pub level: SystemLevel,
    pub days_to_next_level: Option<u32>,
    pub stage: GardenStage,
    pub volume: VolumeTier,
    pub new_record: bool,
    pub at_risk: bool,
    pub decaying: bool,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: DayKey,
    pub day: u32,
    pub has_entry: bool,
    pub is_today: bool,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Weekday of the 1st, Sunday = 0.
    pub first_weekday: u32,
    pub active_days: u32,
    pub days: Vec<CalendarDay>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn day_key_parses_iso_and_legacy_forms() {
        assert_eq!("2026-10-18".parse::<DayKey>().unwrap(), day(2026, 10, 18));
        assert_eq!("Sun Oct 18 2026".parse::<DayKey>().unwrap(), day(2026, 10, 18));
        assert_eq!("Mon Oct 05 2026".parse::<DayKey>().unwrap(), day(2026, 10, 5));
        assert!("18/10/2026".parse::<DayKey>().is_err());
        assert_eq!(day(2026, 1, 2).to_string(), "2026-01-02");
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 17, 21, 4, 0).unwrap();
        let submissions: SubmissionLog = [
            (day(2026, 10, 16), ActivityEntry::new("read", "", ts)),
            (day(2026, 10, 17), ActivityEntry::new("run 5k", "slow pace", ts)),
        ]
        .into_iter()
        .collect();
        let data = AppData {
            submissions,
            streaks: StreakState::new(2, 2),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["currentStreak"], 2);
        assert_eq!(json["longestStreak"], 2);
        assert_eq!(json["submissions"]["2026-10-17"]["task"], "run 5k");
        assert_eq!(json["submissions"]["2026-10-16"]["note"], "");

        let back: AppData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn legacy_snapshot_loads_with_iso_keys() {
        let raw = r#"{
            "submissions": {
                "Sat Oct 17 2026": { "task": "stretch", "note": "", "timestamp": "2026-10-17T08:00:00.000Z" }
            },
            "currentStreak": 1,
            "longestStreak": 3
        }"#;
        let data: AppData = serde_json::from_str(raw).unwrap();
        assert!(data.has_entry_for(day(2026, 10, 17)));
        assert_eq!(data.streaks(), StreakState::new(1, 3));
        let out = serde_json::to_string(&data).unwrap();
        assert!(out.contains("\"2026-10-17\""));
    }

    #[test]
    fn latest_day_is_the_greatest_key() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let log: SubmissionLog = [
            (day(2026, 3, 1), ActivityEntry::new("a", "", ts)),
            (day(2025, 12, 31), ActivityEntry::new("b", "", ts)),
        ]
        .into_iter()
        .collect();
        assert_eq!(log.latest_day(), Some(day(2026, 3, 1)));
        assert_eq!(log.days().next(), Some(day(2025, 12, 31)));
        assert_eq!(log.get(day(2026, 3, 1)).unwrap().note(), None);
    }
}
