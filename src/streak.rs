//! Streak engine: a pure function of the submission log and an injected "today".

use crate::models::{DayKey, StreakState, SubmissionLog};

/// Derives the current and longest streak from `log` as seen on `today`.
///
/// The current streak counts backward from `today`. When `today` has no entry
/// but the day before does, counting starts at the day before without a seed,
/// so a run ending yesterday is reported at its full length.
pub fn compute_streaks(log: &SubmissionLog, today: DayKey) -> StreakState {
    if log.is_empty() {
        return StreakState::default();
    }

    let mut current = 0u32;
    let mut cursor = today.pred();

    if log.contains(today) {
        current = 1;
    } else if !cursor.is_some_and(|day| log.contains(day)) {
        let longest = all_streaks(log).into_iter().max().unwrap_or(0);
        return StreakState::new(0, longest);
    }

    while let Some(day) = cursor.filter(|day| log.contains(*day)) {
        current += 1;
        cursor = day.pred();
    }

    let longest = all_streaks(log).into_iter().fold(current, u32::max);
    StreakState::new(current, longest)
}

/// Lengths of every maximal run of consecutive days, oldest run first.
pub fn all_streaks(log: &SubmissionLog) -> Vec<u32> {
    let mut days = log.days();
    let Some(mut prev) = days.next() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut run = 1u32;
    for day in days {
        if prev.days_until(day) == 1 {
            run += 1;
        } else {
            runs.push(run);
            run = 1;
        }
        prev = day;
    }
    runs.push(run);
    runs
}
