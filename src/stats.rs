use crate::errors::CalendarError;
use crate::models::{
    AppData, CalendarDay, CalendarResponse, DayKey, GardenStage, StreakState, SummaryResponse,
    SystemLevel, VolumeTier,
};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Hours since the last submitted day after which the streak is shown as at risk.
pub const AT_RISK_HOURS: i64 = 20;
pub const DECAY_HOURS: i64 = 24;

const LEVEL_THRESHOLDS: [u32; 4] = [3, 7, 14, 30];

pub fn build_summary(data: &AppData) -> SummaryResponse {
    build_summary_at(Local::now().naive_local(), data)
}

pub fn build_summary_at(now: NaiveDateTime, data: &AppData) -> SummaryResponse {
    let today = DayKey::new(now.date());
    let StreakState {
        current_streak,
        longest_streak,
    } = data.streaks();
    let last_submission = data.submissions().latest_day();
    let total_submissions = data.submissions().len();

    let since_last = last_submission.map(|day| now - day.date().and_time(NaiveTime::MIN));
    let exceeds = |hours: i64| since_last.is_some_and(|elapsed| elapsed > Duration::hours(hours));

    SummaryResponse {
        today,
        current_streak,
        longest_streak,
        total_submissions,
        last_submission,
        submitted_today: data.has_entry_for(today),
        level: system_level(current_streak),
        days_to_next_level: days_to_next_level(current_streak),
        stage: garden_stage(current_streak),
        volume: volume_tier(total_submissions),
        new_record: current_streak > 0 && current_streak == longest_streak,
        at_risk: exceeds(AT_RISK_HOURS),
        decaying: exceeds(DECAY_HOURS),
    }
}

pub fn system_level(streak: u32) -> SystemLevel {
    match streak {
        0 => SystemLevel::Inactive,
        1..=3 => SystemLevel::Initializing,
        4..=7 => SystemLevel::Processing,
        8..=14 => SystemLevel::Stable,
        15..=30 => SystemLevel::Optimized,
        _ => SystemLevel::Peak,
    }
}

pub fn days_to_next_level(streak: u32) -> Option<u32> {
    LEVEL_THRESHOLDS
        .iter()
        .find(|threshold| streak < **threshold)
        .map(|threshold| threshold - streak)
}

pub fn garden_stage(streak: u32) -> GardenStage {
    match streak {
        0 => GardenStage::Dormant,
        1..=3 => GardenStage::Node,
        4..=7 => GardenStage::Branch,
        8..=14 => GardenStage::Network,
        15..=30 => GardenStage::Matrix,
        _ => GardenStage::System,
    }
}

pub fn volume_tier(total: usize) -> VolumeTier {
    match total {
        0 => VolumeTier::Initialize,
        1..=9 => VolumeTier::Building,
        10..=29 => VolumeTier::Expanding,
        30..=99 => VolumeTier::Established,
        _ => VolumeTier::Mastery,
    }
}

pub fn build_calendar(
    data: &AppData,
    year: i32,
    month: u32,
    today: DayKey,
) -> Result<CalendarResponse, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }

    let first_day =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange(year))?;
    let first_day_next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = first_day_next_month
        .and_then(|date| date.pred_opt())
        .ok_or(CalendarError::YearOutOfRange(year))?;

    let days: Vec<CalendarDay> = first_day
        .iter_days()
        .take_while(|date| *date <= last_day)
        .map(|date| {
            let key = DayKey::new(date);
            CalendarDay {
                date: key,
                day: date.day(),
                has_entry: data.has_entry_for(key),
                is_today: key == today,
            }
        })
        .collect();

    let active_days = days.iter().filter(|day| day.has_entry).count() as u32;

    Ok(CalendarResponse {
        year,
        month,
        days_in_month: last_day.day(),
        first_weekday: first_day.weekday().num_days_from_sunday(),
        active_days,
        days,
    })
}
