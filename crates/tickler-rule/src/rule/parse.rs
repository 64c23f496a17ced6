//! Rule grammar.
//!
//! ```text
//! rule    = "y"
//!         / "d" SP int
//!         / "w" SP list
//!         / "m" SP list [SP list]
//! list    = int *("," int)
//! ```

use crate::error::{RuleError, RuleResult};
use crate::rule::core::{DayInterval, MonthlyRule, Rule, WeekdaySet};

const EMPTY_RULE: &str = "no recurrence rule specified";
const UNRECOGNIZED: &str = "unrecognized recurrence format";

/// Parses a recurrence rule string.
///
/// ## Errors
/// Returns `InvalidRule` for an empty string, an unknown shape, or any token that
/// is not a number in range for its position.
pub fn parse_rule(input: &str) -> RuleResult<Rule> {
    if input.is_empty() {
        return Err(RuleError::invalid_rule(EMPTY_RULE));
    }

    let mut parts = input.split(' ');
    let kind = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let rule = match (kind, args.as_slice()) {
        ("y", []) => Rule::Yearly,
        ("d", [days]) => Rule::EveryNDays(DayInterval::new(parse_int(days)?)?),
        ("w", [weekdays]) => Rule::Weekly(WeekdaySet::new(parse_list(weekdays)?)?),
        ("m", [days]) => Rule::Monthly(MonthlyRule::new(parse_list(days)?, None::<Vec<i64>>)?),
        ("m", [days, months]) => Rule::Monthly(MonthlyRule::new(
            parse_list(days)?,
            Some(parse_list(months)?),
        )?),
        _ => return Err(RuleError::invalid_rule(UNRECOGNIZED)),
    };

    tracing::trace!(input, rule = %rule, "Parsed recurrence rule");
    Ok(rule)
}

fn parse_int(token: &str) -> RuleResult<i64> {
    token
        .parse::<i64>()
        .map_err(|_err| RuleError::invalid_rule(format!("{token:?} is not a number")))
}

fn parse_list(list: &str) -> RuleResult<Vec<i64>> {
    list.split(',').map(parse_int).collect()
}
