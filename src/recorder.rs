use crate::errors::SubmissionError;
use crate::models::{ActivityEntry, AppData, DayKey, StreakState, SubmissionRequest};
use crate::streak::compute_streaks;
use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, warn};

pub const MAX_TASK_CHARS: usize = 100;
pub const MAX_NOTE_CHARS: usize = 300;

/// Rejects a request whose task is blank once trimmed.
pub fn validate(request: &SubmissionRequest) -> Result<(), SubmissionError> {
    if request.task.trim().is_empty() {
        return Err(SubmissionError::EmptyTask);
    }
    Ok(())
}

pub fn record_submission(
    data: &mut AppData,
    request: SubmissionRequest,
) -> Result<StreakState, SubmissionError> {
    record_submission_at(data, request, &Local::now())
}

/// Stores `request` under the calendar day of `now` and recomputes both streaks.
///
/// This is the only writer of [`AppData`].
pub fn record_submission_at<Tz: TimeZone>(
    data: &mut AppData,
    request: SubmissionRequest,
    now: &DateTime<Tz>,
) -> Result<StreakState, SubmissionError> {
    let entry = build_entry(request, now.with_timezone(&Utc))?;
    let today = DayKey::new(now.date_naive());

    if data.submissions.upsert(today, entry).is_some() {
        debug!(day = %today, "replaced existing submission");
    }

    let streaks = compute_streaks(&data.submissions, today);
    data.streaks = streaks;

    debug!(
        day = %today,
        current = streaks.current_streak,
        longest = streaks.longest_streak,
        "streaks recomputed"
    );
    Ok(streaks)
}

fn build_entry(
    request: SubmissionRequest,
    timestamp: DateTime<Utc>,
) -> Result<ActivityEntry, SubmissionError> {
    validate(&request)?;
    let task = clamp_chars(request.task.trim(), MAX_TASK_CHARS, "task");
    let note = clamp_chars(request.note.trim(), MAX_NOTE_CHARS, "note");
    Ok(ActivityEntry::new(task, note, timestamp))
}

fn clamp_chars(value: &str, limit: usize, field: &'static str) -> String {
    match value.char_indices().nth(limit) {
        Some((cut, _)) => {
            warn!(field, limit, "truncating over-long submission field");
            value[..cut].trim_end().to_string()
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn blank_task_is_rejected_without_mutation() {
        let mut data = AppData::default();
        let err = record_submission_at(&mut data, SubmissionRequest::new("   ", "note"), &at(2026, 10, 18, 9))
            .unwrap_err();
        assert_eq!(err, SubmissionError::EmptyTask);
        assert_eq!(data, AppData::default());
    }

    #[test]
    fn submission_is_trimmed_and_keyed_by_day() {
        let mut data = AppData::default();
        let now = at(2026, 10, 18, 9);
        let streaks =
            record_submission_at(&mut data, SubmissionRequest::new("  read  ", " ch. 4 \n"), &now)
                .unwrap();

        assert_eq!(streaks, StreakState::new(1, 1));
        assert_eq!(data.streaks(), streaks);
        let entry = data.submissions().get(day(2026, 10, 18)).unwrap();
        assert_eq!(entry.task(), "read");
        assert_eq!(entry.note(), Some("ch. 4"));
        assert_eq!(entry.timestamp(), now);
    }

    #[test]
    fn same_day_submission_overwrites() {
        let mut data = AppData::default();
        record_submission_at(&mut data, SubmissionRequest::new("first", ""), &at(2026, 10, 18, 8)).unwrap();
        record_submission_at(&mut data, SubmissionRequest::new("second", ""), &at(2026, 10, 18, 20)).unwrap();

        assert_eq!(data.submissions().len(), 1);
        assert_eq!(data.submissions().get(day(2026, 10, 18)).unwrap().task(), "second");
        assert_eq!(data.streaks(), StreakState::new(1, 1));
    }

    #[test]
    fn day_key_follows_the_callers_wall_clock() {
        let mut data = AppData::default();
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2026-10-18 20:00 UTC is already the 19th at UTC+9.
        let now = at(2026, 10, 18, 20).with_timezone(&tz);
        record_submission_at(&mut data, SubmissionRequest::new("plan", ""), &now).unwrap();

        assert!(data.has_entry_for(day(2026, 10, 19)));
        assert!(!data.has_entry_for(day(2026, 10, 18)));
    }

    #[test]
    fn over_long_fields_are_truncated_by_chars() {
        let mut data = AppData::default();
        let task = "é".repeat(MAX_TASK_CHARS + 20);
        let note = "n".repeat(MAX_NOTE_CHARS + 1);
        record_submission_at(&mut data, SubmissionRequest::new(task, note), &at(2026, 10, 18, 9)).unwrap();

        let entry = data.submissions().get(day(2026, 10, 18)).unwrap();
        assert_eq!(entry.task().chars().count(), MAX_TASK_CHARS);
        assert_eq!(entry.note().unwrap().len(), MAX_NOTE_CHARS);
    }

    #[test]
    fn consecutive_days_grow_the_streak() {
        let mut data = AppData::default();
        for d in 10..=14 {
            record_submission_at(&mut data, SubmissionRequest::new("lift", ""), &at(2026, 10, d, 12)).unwrap();
        }
        assert_eq!(data.streaks(), StreakState::new(5, 5));

        record_submission_at(&mut data, SubmissionRequest::new("lift", ""), &at(2026, 10, 17, 12)).unwrap();
        assert_eq!(data.streaks(), StreakState::new(1, 5));
    }
}
