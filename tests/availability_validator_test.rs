use chrono::{NaiveDate, NaiveTime};
use decora_backend::domain::models::availability::{
    AvailabilityConfig, IntervalRule, NewAvailabilityParams, ScheduleWindow,
};
use decora_backend::domain::models::blocked_date::BlockedDate;
use decora_backend::domain::models::budget::{Budget, NewBudgetParams};
use decora_backend::domain::services::availability::{
    parse_event_time, validate_slot, SlotRejection,
};
use decora_backend::domain::services::budget_service::validate_arc_size;
use decora_backend::domain::services::slug::{slugify, with_suffix};

fn config(
    days: &[&str],
    windows: Vec<ScheduleWindow>,
    intervals: Vec<IntervalRule>,
    max_daily: i64,
) -> AvailabilityConfig {
    AvailabilityConfig::new(NewAvailabilityParams {
        decorator_id: "dec-1".to_string(),
        available_days: days.iter().map(|d| d.to_string()).collect(),
        windows,
        intervals,
        max_daily_services: max_daily,
    })
}

fn window(day: &str, start: &str, end: &str) -> ScheduleWindow {
    ScheduleWindow {
        day: day.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

fn budget_at(time: &str) -> Budget {
    Budget::new(NewBudgetParams {
        decorator_id: "dec-1".to_string(),
        client_name: "Ana".to_string(),
        client_email: "ana@example.com".to_string(),
        client_phone: None,
        event_date: monday(),
        event_time: parse_event_time(time).unwrap(),
        service_type: "escultura".to_string(),
        tamanho_arco_m: None,
        event_address: None,
        notes: None,
    })
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn at(time: &str) -> NaiveTime {
    parse_event_time(time).unwrap()
}

#[test]
fn no_config_accepts_everything() {
    assert_eq!(validate_slot(None, &[], &[], monday(), at("03:00"), None), Ok(()));
}

#[test]
fn blocked_date_wins_over_everything_else() {
    let cfg = config(&["monday"], vec![], vec![], 5);
    let blocked = vec![BlockedDate::new(
        "dec-1".to_string(),
        monday(),
        false,
        "Aniversário".to_string(),
    )];

    let result = validate_slot(Some(&cfg), &blocked, &[], monday(), at("10:00"), None);
    assert_eq!(
        result,
        Err(SlotRejection::DateBlocked {
            reason: "Aniversário".to_string()
        })
    );
}

#[test]
fn recurring_block_matches_by_month_and_day() {
    let cfg = config(&[], vec![], vec![], 5);
    let blocked = vec![BlockedDate::new(
        "dec-1".to_string(),
        NaiveDate::from_ymd_opt(2020, 12, 25).unwrap(),
        true,
        "Natal".to_string(),
    )];

    let christmas_2025 = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
    assert!(validate_slot(Some(&cfg), &blocked, &[], christmas_2025, at("10:00"), None).is_err());

    let day_after = NaiveDate::from_ymd_opt(2025, 12, 26).unwrap();
    assert!(validate_slot(Some(&cfg), &blocked, &[], day_after, at("10:00"), None).is_ok());
}

#[test]
fn weekday_check_only_applies_when_days_are_listed() {
    let restricted = config(&["tuesday"], vec![], vec![], 5);
    let result = validate_slot(Some(&restricted), &[], &[], monday(), at("10:00"), None);
    assert_eq!(
        result,
        Err(SlotRejection::DayUnavailable {
            weekday: "monday".to_string()
        })
    );

    // Empty set means every day is fair game.
    let open = config(&[], vec![], vec![], 5);
    assert!(validate_slot(Some(&open), &[], &[], monday(), at("10:00"), None).is_ok());
}

#[test]
fn window_bounds_are_inclusive() {
    let cfg = config(&[], vec![window("monday", "08:00", "18:00")], vec![], 5);

    assert!(validate_slot(Some(&cfg), &[], &[], monday(), at("08:00"), None).is_ok());
    assert!(validate_slot(Some(&cfg), &[], &[], monday(), at("18:00"), None).is_ok());
    assert_eq!(
        validate_slot(Some(&cfg), &[], &[], monday(), at("07:59"), None),
        Err(SlotRejection::OutsideSchedule)
    );
    assert_eq!(
        validate_slot(Some(&cfg), &[], &[], monday(), at("18:01"), None),
        Err(SlotRejection::OutsideSchedule)
    );
}

#[test]
fn windows_elsewhere_still_constrain_uncovered_days() {
    // Only Tuesday has a window: Monday offers no slot at all.
    let cfg = config(&[], vec![window("tuesday", "08:00", "18:00")], vec![], 5);
    assert_eq!(
        validate_slot(Some(&cfg), &[], &[], monday(), at("10:00"), None),
        Err(SlotRejection::OutsideSchedule)
    );
}

#[test]
fn capacity_counts_only_countable_budgets() {
    let cfg = config(&[], vec![], vec![], 2);

    let mut cancelled = budget_at("08:00");
    cancelled.status = "cancelado".to_string();
    let same_day = vec![cancelled, budget_at("09:00"), budget_at("10:00")];

    // Two countable budgets fill the cap of 2.
    let result = validate_slot(Some(&cfg), &[], &same_day, monday(), at("14:00"), None);
    assert_eq!(result, Err(SlotRejection::CapacityReached { max: 2 }));

    // Excluding one of them (an update of that very budget) frees a slot.
    let exclude = same_day[1].id.clone();
    assert!(validate_slot(Some(&cfg), &[], &same_day, monday(), at("14:00"), Some(&exclude)).is_ok());
}

#[test]
fn interval_rule_converts_hours_to_minutes() {
    let rule = IntervalRule {
        day: "monday".to_string(),
        interval: 2,
        unit: "hours".to_string(),
    };
    assert_eq!(rule.minutes(), 120);

    let cfg = config(&[], vec![], vec![rule], 5);
    let same_day = vec![budget_at("10:00")];

    assert_eq!(
        validate_slot(Some(&cfg), &[], &same_day, monday(), at("11:59"), None),
        Err(SlotRejection::IntervalTooShort { minutes: 120 })
    );
    // The gap is symmetric: earlier slots are spaced too.
    assert_eq!(
        validate_slot(Some(&cfg), &[], &same_day, monday(), at("08:30"), None),
        Err(SlotRejection::IntervalTooShort { minutes: 120 })
    );
    // At exactly the configured gap the slot is fine.
    assert!(validate_slot(Some(&cfg), &[], &same_day, monday(), at("12:00"), None).is_ok());
    assert!(validate_slot(Some(&cfg), &[], &same_day, monday(), at("08:00"), None).is_ok());
}

#[test]
fn event_time_parses_with_and_without_seconds() {
    assert_eq!(parse_event_time("14:30"), NaiveTime::from_hms_opt(14, 30, 0));
    assert_eq!(parse_event_time("14:30:15"), NaiveTime::from_hms_opt(14, 30, 15));
    assert_eq!(parse_event_time("25:00"), None);
    assert_eq!(parse_event_time("bolo"), None);
}

#[test]
fn arc_size_rules() {
    assert!(validate_arc_size("arco_organico", Some(2.5)).is_ok());
    assert!(validate_arc_size("arco_tradicional", Some(30.0)).is_ok());
    assert!(validate_arc_size("arco_organico", Some(0.5)).is_ok());

    assert!(validate_arc_size("arco_organico", None).is_err());
    assert!(validate_arc_size("arco_organico", Some(0.4)).is_err());
    assert!(validate_arc_size("arco_organico", Some(30.1)).is_err());
    assert!(validate_arc_size("arco_organico", Some(2.55)).is_err());

    assert!(validate_arc_size("escultura", None).is_ok());
    assert!(validate_arc_size("escultura", Some(2.0)).is_err());
    assert!(validate_arc_size("trampolim", None).is_err());
}

#[test]
fn slugify_handles_accents_and_spacing() {
    assert_eq!(slugify("Maria Balões"), "maria-baloes");
    assert_eq!(slugify("  João   & Cia.  "), "joao-cia");
    assert_eq!(slugify("Décorações São João"), "decoracoes-sao-joao");
    assert_eq!(slugify("!!!"), "");

    assert_eq!(with_suffix("maria", 1), "maria");
    assert_eq!(with_suffix("maria", 3), "maria-3");
}
