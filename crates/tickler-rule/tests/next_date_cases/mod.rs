use tickler_rule::calendar::parse_date;
use tickler_rule::{RuleError, next_date};

pub enum Expected {
    Date(&'static str),
    InvalidDate,
    InvalidRule,
    Exhausted,
}

pub struct NextDateCase {
    pub name: &'static str,
    pub now: &'static str,
    pub date: &'static str,
    pub repeat: &'static str,
    pub expected: Expected,
}

const NOW: &str = "20240126";

const fn case(
    name: &'static str,
    date: &'static str,
    repeat: &'static str,
    expected: Expected,
) -> NextDateCase {
    NextDateCase {
        name,
        now: NOW,
        date,
        repeat,
        expected,
    }
}

pub fn next_date_cases() -> Vec<NextDateCase> {
    use Expected::{Date, Exhausted, InvalidDate, InvalidRule};

    vec![
        case("empty_rule", "20240126", "", InvalidRule),
        case("unknown_kind", "20240126", "k 34", InvalidRule),
        case("garbage_rule", "20240126", "ooops", InvalidRule),
        case("bad_month_in_date", "15000156", "y", InvalidDate),
        case("garbage_date", "ooops", "y", InvalidDate),
        case("yearly_from_distant_past", "16890220", "y", Date("20240220")),
        case("yearly_from_future", "20250701", "y", Date("20260701")),
        case("yearly_new_year", "20240101", "y", Date("20250101")),
        case("yearly_new_years_eve", "20231231", "y", Date("20241231")),
        case("yearly_leap_day_rolls_to_march", "20240229", "y", Date("20250301")),
        case("yearly_after_leap_day", "20240301", "y", Date("20250301")),
        case("days_without_count", "20240113", "d", InvalidRule),
        case("days_7", "20240113", "d 7", Date("20240127")),
        case("days_20", "20240120", "d 20", Date("20240209")),
        case("days_30_from_future", "20240202", "d 30", Date("20240303")),
        case("days_over_limit", "20240320", "d 401", InvalidRule),
        case("days_12_across_year", "20231225", "d 12", Date("20240130")),
        case("days_1_into_leap_day", "20240228", "d 1", Date("20240229")),
        case("monthly_single_day", "20231106", "m 13", Date("20240213")),
        case("monthly_day_over_31", "20240120", "m 40,11,19", InvalidRule),
        case("monthly_two_days", "20240116", "m 16,5", Date("20240205")),
        case("monthly_skips_today", "20240126", "m 25,26,7", Date("20240207")),
        case("monthly_31_skips_short_month", "20240409", "m 31", Date("20240531")),
        case("monthly_limited_months", "20240329", "m 10,17 12,8,1", Date("20240810")),
        case("monthly_zero_padded", "20230311", "m 07,19 05,6", Date("20240507")),
        case("monthly_first_of_jan_feb", "20230311", "m 1 1,2", Date("20240201")),
        case("monthly_last_day", "20240127", "m -1", Date("20240131")),
        case("monthly_second_to_last", "20240222", "m -2", Date("20240228")),
        case("monthly_minus_three", "20240222", "m -2,-3", InvalidRule),
        case("monthly_last_two", "20240326", "m -1,-2", Date("20240330")),
        case("monthly_mixed_selectors", "20240201", "m -1,18", Date("20240218")),
        case("monthly_impossible_day", "20240101", "m 31 2", Exhausted),
        case("weekly_early_week", "20240125", "w 1,2,3", Date("20240129")),
        case("weekly_sunday", "20240126", "w 7", Date("20240128")),
        case("weekly_later_this_week", "20230126", "w 4,5", Date("20240201")),
        case("weekly_bad_weekday", "20230226", "w 8,4,5", InvalidRule),
        NextDateCase {
            name: "days_5_same_day",
            now: "20240101",
            date: "20240101",
            repeat: "d 5",
            expected: Date("20240106"),
        },
        NextDateCase {
            name: "weekly_from_wednesday",
            now: "20240124",
            date: "20240124",
            repeat: "w 1,3",
            expected: Date("20240129"),
        },
        NextDateCase {
            name: "monthly_last_day_mid_month",
            now: "20240115",
            date: "20240101",
            repeat: "m -1",
            expected: Date("20240131"),
        },
        NextDateCase {
            name: "yearly_leap_day_stays_on_march_first",
            now: "20270301",
            date: "20240229",
            repeat: "y",
            expected: Date("20280301"),
        },
    ]
}

pub fn assert_case(case: &NextDateCase) {
    let now = parse_date(case.now)
        .unwrap_or_else(|err| panic!("Case {} has a bad reference date: {err}", case.name));
    let actual = next_date(now, case.date, case.repeat);

    match (&case.expected, &actual) {
        (Expected::Date(expected), Ok(actual)) => {
            assert_eq!(actual.as_str(), *expected, "Case {} did not match", case.name);
        }
        (Expected::InvalidDate, Err(RuleError::InvalidDate(_)))
        | (Expected::InvalidRule, Err(RuleError::InvalidRule(_)))
        | (Expected::Exhausted, Err(RuleError::Exhausted { .. })) => {}
        _ => panic!("Case {} produced unexpected {actual:?}", case.name),
    }
}
