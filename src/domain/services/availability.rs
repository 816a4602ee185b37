use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use crate::domain::models::availability::AvailabilityConfig;
use crate::domain::models::blocked_date::BlockedDate;
use crate::domain::models::budget::Budget;
use std::fmt;

/// Why a proposed slot was turned down. Each variant maps to exactly one of
/// the validation rules below and renders as the message shown to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotRejection {
    DateBlocked { reason: String },
    DayUnavailable { weekday: String },
    OutsideSchedule,
    CapacityReached { max: i64 },
    IntervalTooShort { minutes: i64 },
}

impl fmt::Display for SlotRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRejection::DateBlocked { reason } => {
                write!(f, "Date is blocked: {}", reason)
            }
            SlotRejection::DayUnavailable { weekday } => {
                write!(f, "Decorator does not work on {}", weekday)
            }
            SlotRejection::OutsideSchedule => {
                write!(f, "Requested time is outside the decorator's working hours")
            }
            SlotRejection::CapacityReached { max } => {
                write!(f, "Daily service limit reached ({} per day)", max)
            }
            SlotRejection::IntervalTooShort { minutes } => {
                write!(f, "Another service is scheduled within {} minutes of this time", minutes)
            }
        }
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Accepts "HH:MM" with optional seconds.
pub fn parse_event_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Checks one proposed slot against a decorator's availability rules.
/// Read-only; rules short-circuit in order. A decorator with no config at
/// all imposes no restriction.
///
/// `same_day` must hold the decorator's countable budgets for `date`;
/// `exclude_id` drops the budget being edited from capacity and spacing
/// checks.
pub fn validate_slot(
    config: Option<&AvailabilityConfig>,
    blocked_dates: &[BlockedDate],
    same_day: &[Budget],
    date: NaiveDate,
    time: NaiveTime,
    exclude_id: Option<&str>,
) -> Result<(), SlotRejection> {
    let Some(config) = config else {
        return Ok(());
    };

    if let Some(blocked) = blocked_dates.iter().find(|b| b.matches(date)) {
        return Err(SlotRejection::DateBlocked {
            reason: blocked.reason.clone(),
        });
    }

    let weekday = weekday_name(date.weekday());

    let available_days = config.available_days();
    if !available_days.is_empty() && !available_days.iter().any(|d| d == weekday) {
        return Err(SlotRejection::DayUnavailable {
            weekday: weekday.to_string(),
        });
    }

    // Windows are only enforced when the decorator configured any, for any
    // weekday. Bounds are inclusive.
    let windows = config.windows();
    if !windows.is_empty() {
        let fits = windows.iter().any(|w| {
            if w.day != weekday {
                return false;
            }
            match (parse_event_time(&w.start), parse_event_time(&w.end)) {
                (Some(start), Some(end)) => time >= start && time <= end,
                _ => false,
            }
        });
        if !fits {
            return Err(SlotRejection::OutsideSchedule);
        }
    }

    let countable: Vec<&Budget> = same_day
        .iter()
        .filter(|b| b.counts_toward_capacity())
        .filter(|b| exclude_id != Some(b.id.as_str()))
        .collect();

    if countable.len() as i64 >= config.max_daily_services {
        return Err(SlotRejection::CapacityReached {
            max: config.max_daily_services,
        });
    }

    if let Some(rule) = config.interval_rules().iter().find(|r| r.day == weekday) {
        let min_gap = rule.minutes();
        if min_gap > 0 {
            let proposed = time.signed_duration_since(NaiveTime::MIN).num_minutes();
            for other in &countable {
                let existing = other
                    .event_time
                    .signed_duration_since(NaiveTime::MIN)
                    .num_minutes();
                if (proposed - existing).abs() < min_gap {
                    return Err(SlotRejection::IntervalTooShort { minutes: min_gap });
                }
            }
        }
    }

    Ok(())
}
