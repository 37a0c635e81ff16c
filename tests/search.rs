use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use cronkit::{Expression, ScheduleOptions};

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second).unwrap().timestamp()
}

fn datetime(epoch: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(epoch, 0).unwrap()
}

// a fixed horizon, so that backward searches into 2024 keep working as the
// default ten years before now moves on
fn cron(text: &str) -> Expression {
    let horizon = ScheduleOptions::new().begin_epoch(0).end_epoch(utc(2040, 1, 1, 0, 0, 0));
    Expression::with_options(text, &horizon).unwrap()
}

// 2024-01-15 is a Monday
fn monday() -> i64 {
    utc(2024, 1, 15, 0, 0, 0)
}

#[test]
fn every_second_is_adjacent() {
    let expression = cron("* * * * * ? *");
    assert_eq!(expression.next(Some(monday())), Some(monday() + 1));
    assert_eq!(expression.previous(Some(monday())), Some(monday() - 1));
}

#[test]
fn quarter_hours() {
    let expression = cron("0 */15 * * * ? *");
    assert_eq!(expression.next(Some(monday())), Some(utc(2024, 1, 15, 0, 15, 0)));
    assert_eq!(expression.previous(Some(monday())), Some(utc(2024, 1, 14, 23, 45, 0)));
    assert_eq!(
        expression.next(Some(utc(2024, 1, 15, 0, 14, 59))),
        Some(utc(2024, 1, 15, 0, 15, 0))
    );
}

#[test]
fn reference_instant_is_exclusive() {
    let expression = cron("0 30 9 * * ?");
    let at = utc(2024, 1, 15, 9, 30, 0);
    assert_eq!(expression.next(Some(at)), Some(utc(2024, 1, 16, 9, 30, 0)));
    assert_eq!(expression.previous(Some(at)), Some(utc(2024, 1, 14, 9, 30, 0)));
}

#[test]
fn daily_at_half_past_nine() {
    let expression = cron("0 30 9 * * ?");
    assert_eq!(expression.next(Some(monday())), Some(utc(2024, 1, 15, 9, 30, 0)));
    assert_eq!(expression.previous(Some(monday())), Some(utc(2024, 1, 14, 9, 30, 0)));
}

#[test]
fn last_day_of_month_tracks_leap_years() {
    let expression = cron("0 0 0 L * ? *");
    assert_eq!(expression.next(Some(monday())), Some(utc(2024, 1, 31, 0, 0, 0)));
    assert_eq!(expression.next(Some(utc(2024, 2, 1, 0, 0, 0))), Some(utc(2024, 2, 29, 0, 0, 0)));
    assert_eq!(expression.next(Some(utc(2023, 2, 1, 0, 0, 0))), Some(utc(2023, 2, 28, 0, 0, 0)));
    assert_eq!(expression.previous(Some(utc(2024, 3, 15, 0, 0, 0))), Some(utc(2024, 2, 29, 0, 0, 0)));

    let days: Vec<u32> = expression
        .occurrences(Some(utc(2023, 12, 31, 12, 0, 0)))
        .take(12)
        .map(|epoch| datetime(epoch).day())
        .collect();
    assert_eq!(days, vec![31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
}

#[test]
fn first_monday_across_every_starting_weekday() {
    // the months of 2024 start on each of the seven weekdays
    let expression = cron("0 0 9 ? * MON#1 *");
    let found: Vec<DateTime<Utc>> = expression
        .occurrences(Some(utc(2023, 12, 31, 0, 0, 0)))
        .take(12)
        .map(datetime)
        .collect();
    for (i, dt) in found.iter().enumerate() {
        let month = i as u32 + 1;
        let first = Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap();
        let expected_day = 1 + (8 - first.weekday().number_from_monday()) % 7;
        assert_eq!((dt.month(), dt.day()), (month, expected_day));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (9, 0, 0));
    }
}

#[test]
fn impossible_dates_never_match() {
    let options = ScheduleOptions::new()
        .begin_epoch(utc(2020, 1, 1, 0, 0, 0))
        .end_epoch(utc(2030, 1, 1, 0, 0, 0));
    let expression = Expression::with_options("0 0 0 30 2 ? *", &options).unwrap();
    assert_eq!(expression.next(Some(monday())), None);
    assert_eq!(expression.previous(Some(monday())), None);
    assert!(expression.occurrences(Some(monday())).next().is_none());
}

#[test]
fn hourly_alias_matches_its_expansion() {
    let alias = cron("@hourly");
    let explicit = cron("0 0 * * * ? *");
    assert_eq!(alias.as_string(), explicit.as_string());
    assert_eq!(alias.nodes(), explicit.nodes());
    let from = utc(2024, 1, 15, 10, 20, 30);
    assert_eq!(alias.next(Some(from)), explicit.next(Some(from)));
    assert_eq!(alias.next(Some(from)), Some(utc(2024, 1, 15, 11, 0, 0)));
    assert_eq!(alias.previous(Some(from)), Some(utc(2024, 1, 15, 10, 0, 0)));
}

#[test]
fn year_field_bounds_the_search() {
    let future = cron("0 0 0 1 1 ? 2030");
    assert_eq!(future.next(Some(monday())), Some(utc(2030, 1, 1, 0, 0, 0)));
    assert_eq!(future.previous(Some(monday())), None);

    let past = cron("0 0 0 1 1 ? 2020");
    assert_eq!(past.previous(Some(monday())), Some(utc(2020, 1, 1, 0, 0, 0)));
    assert_eq!(past.next(Some(monday())), None);
}

#[test]
fn horizon_limits_the_day_scan() {
    let mut expression = cron("0 0 12 29 2 ? *");
    expression.set_end_epoch(Some(utc(2027, 1, 1, 0, 0, 0)));
    assert_eq!(expression.next(Some(utc(2024, 3, 1, 0, 0, 0))), None);
    expression.set_end_epoch(None);
    assert_eq!(expression.next(Some(utc(2024, 3, 1, 0, 0, 0))), Some(utc(2028, 2, 29, 12, 0, 0)));

    expression.set_begin_epoch(utc(2024, 6, 1, 0, 0, 0)).unwrap();
    assert_eq!(expression.previous(Some(utc(2025, 1, 1, 0, 0, 0))), None);
    assert!(expression.set_begin_epoch(-1).is_err());
}

#[test]
fn weekdays_and_lists() {
    let expression = cron("0 0 9 ? * MON-FRI *");
    // Friday 2024-01-19 17:00 -> Monday 2024-01-22 09:00
    assert_eq!(
        expression.next(Some(utc(2024, 1, 19, 17, 0, 0))),
        Some(utc(2024, 1, 22, 9, 0, 0))
    );
    assert_eq!(
        expression.previous(Some(utc(2024, 1, 22, 8, 0, 0))),
        Some(utc(2024, 1, 19, 9, 0, 0))
    );

    let weekend = cron("0 0 10 ? * SAT-MON *");
    let days: Vec<u32> = weekend
        .occurrences(Some(monday()))
        .take(4)
        .map(|epoch| datetime(epoch).weekday().number_from_monday())
        .collect();
    assert_eq!(days, vec![1, 6, 7, 1]);
}

#[test]
fn matches_epoch_checks_all_fields() {
    let expression = cron("0 0 0 L * ? *");
    assert!(expression.matches_epoch(utc(2024, 2, 29, 0, 0, 0)));
    assert!(!expression.matches_epoch(utc(2024, 2, 28, 0, 0, 0)));
    assert!(!expression.matches_epoch(utc(2024, 2, 29, 0, 0, 1)));
}

#[test]
fn occurrences_are_strictly_increasing() {
    let expression = cron("*/20 * * * * ? *");
    let found: Vec<i64> = expression.occurrences(Some(monday())).take(5).collect();
    assert_eq!(
        found,
        vec![monday() + 20, monday() + 40, monday() + 60, monday() + 80, monday() + 100]
    );
}

// every matching second in [start, end) found by brute force
fn brute_force(expression: &Expression, start: i64, end: i64) -> Vec<i64> {
    (start..end).filter(|epoch| expression.matches_epoch(*epoch)).collect()
}

fn forward(expression: &Expression, start: i64, end: i64) -> Vec<i64> {
    expression
        .occurrences(Some(start - 1))
        .take_while(|epoch| *epoch < end)
        .collect()
}

fn backward(expression: &Expression, start: i64, end: i64) -> Vec<i64> {
    let mut found = Vec::new();
    let mut cursor = end;
    while let Some(epoch) = expression.previous(Some(cursor)) {
        if epoch < start {
            break;
        }
        found.push(epoch);
        cursor = epoch;
    }
    found.reverse();
    found
}

#[test]
fn no_instant_is_skipped() {
    // a window across the end of a leap February
    let start = utc(2024, 2, 27, 0, 0, 0);
    let end = utc(2024, 3, 2, 0, 0, 0);
    for text in [
        "30 */20 8-10 * * ? *",
        "0 0 */6 L * ? *",
        "15,45 59 23 ? * 4#5,5 *",
        "0 0 12 LW * ? *",
    ] {
        let expression = cron(text);
        let expected = brute_force(&expression, start, end);
        assert!(!expected.is_empty(), "{text} matches inside the window");
        assert_eq!(forward(&expression, start, end), expected, "forward {text}");
        assert_eq!(backward(&expression, start, end), expected, "backward {text}");
    }
}
