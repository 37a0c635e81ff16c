use cronkit::Expression;

fn describe(text: &str) -> String {
    Expression::new(text).expect("valid expression").describe()
}

#[test]
fn last_day_of_every_month() {
    assert_eq!(describe("0 0 0 L * ? *"), "midnight on the last day of every month");
    assert_eq!(describe("@monthly"), "midnight on the last day of every month");
}

#[test]
fn wildcards_collapse_into_the_first() {
    assert_eq!(describe("* * * * * ? *"), "every second");
    assert_eq!(describe("0 * * * * ? *"), "every minute");
    assert_eq!(describe("@hourly"), "every hour");
}

#[test]
fn clock_phrases() {
    assert_eq!(describe("0 30 14 * * ? *"), "2:30 PM every day of every month");
    assert_eq!(describe("0 0 12 * * ? *"), "12 PM every day of every month");
    assert_eq!(describe("5 15 9 * * ? *"), "9:15:05 AM every day of every month");
    assert_eq!(describe("@daily"), "midnight every day of every month");
}

#[test]
fn sub_day_phrases_join_with_of() {
    assert_eq!(describe("0 */15 9 * * ? *"), "every 15 minutes of hour 9 every day of every month");
    assert_eq!(describe("10 * 9-17 * * ? *"), "second 10 of every minute of every hour from 9 to 17 every day of every month");
}

#[test]
fn day_of_month_clauses() {
    assert_eq!(describe("0 0 0 15 * ? *"), "midnight on the 15th of every month");
    assert_eq!(describe("0 0 0 1 1 ? *"), "midnight on the 1st of January");
    assert_eq!(describe("0 0 0 LW * ? *"), "midnight on the last weekday of every month");
    assert_eq!(
        describe("0 0 0 15W * ? *"),
        "midnight on the nearest weekday to the 15th of every month"
    );
    assert_eq!(describe("0 0 0 L-2 * ? *"), "midnight on the 3rd to last day of every month");
}

#[test]
fn day_of_week_clauses() {
    assert_eq!(describe("0 0 9 ? * MON *"), "9 AM every Monday of every month");
    assert_eq!(describe("0 0 9 ? * MON#1 *"), "9 AM on the 1st Monday of every month");
    assert_eq!(describe("0 0 9 ? * 5L *"), "9 AM on the last Friday of every month");
    assert_eq!(
        describe("0 0 9 ? * MON-FRI *"),
        "9 AM every day from Monday to Friday of every month"
    );
}

#[test]
fn both_day_clauses_join_with_and() {
    assert_eq!(
        describe("0 0 0 13 * 5 *"),
        "midnight on the 13th of every month and every Friday of every month"
    );
}

#[test]
fn year_clause() {
    assert_eq!(describe("0 0 0 1 1 ? 2030"), "midnight on the 1st of January 2030");
    assert_eq!(
        describe("0 0 0 1 1 ? 2025-2030"),
        "midnight on the 1st of January every year from 2025 to 2030"
    );
}

#[test]
fn ordinals_and_clock_helpers() {
    use cronkit::field::{format_time, ordinal};
    let ordinals: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 31].into_iter().map(ordinal).collect();
    assert_eq!(ordinals, ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "31st"]);
    assert_eq!(format_time(0, 0, 0), "midnight");
    assert_eq!(format_time(0, 5, 0), "12:05 AM");
    assert_eq!(format_time(0, 0, 23), "11 PM");
}
