//! Typed recurrence rules.

use std::collections::BTreeSet;
use std::fmt;

use crate::calendar::{days_in_month, resolve_day_selector};
use crate::error::{RuleError, RuleResult};

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `y`: same day every year.
    Yearly,
    /// `d <n>`: every `n` days.
    EveryNDays(DayInterval),
    /// `w <d1,d2,...>`: on the listed ISO weekdays.
    Weekly(WeekdaySet),
    /// `m <d1,d2,...>[ <m1,m2,...>]`: on the listed days of the listed months.
    Monthly(MonthlyRule),
}

/// Step of an every-N-days rule, within `1..=400`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayInterval(u16);

impl DayInterval {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 400;

    /// ## Errors
    /// Returns `InvalidRule` if `days` is outside `1..=400`.
    pub fn new(days: i64) -> RuleResult<Self> {
        u16::try_from(days)
            .ok()
            .filter(|d| (Self::MIN..=Self::MAX).contains(d))
            .map(Self)
            .ok_or_else(|| {
                RuleError::invalid_rule(format!(
                    "day interval {days} is outside {}..={}",
                    Self::MIN,
                    Self::MAX
                ))
            })
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Non-empty set of ISO weekdays (1 = Monday … 7 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdaySet(BTreeSet<u8>);

impl WeekdaySet {
    /// ## Errors
    /// Returns `InvalidRule` if the set is empty or a weekday is outside `1..=7`.
    pub fn new(weekdays: impl IntoIterator<Item = i64>) -> RuleResult<Self> {
        let set = weekdays
            .into_iter()
            .map(|day| {
                u8::try_from(day)
                    .ok()
                    .filter(|d| (1..=7).contains(d))
                    .ok_or_else(|| {
                        RuleError::invalid_rule(format!("weekday {day} is outside 1..=7"))
                    })
            })
            .collect::<RuleResult<BTreeSet<u8>>>()?;

        if set.is_empty() {
            return Err(RuleError::invalid_rule("weekly rule needs at least one weekday"));
        }
        Ok(Self(set))
    }

    /// Weekdays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, weekday: u8) -> bool {
        self.0.contains(&weekday)
    }
}

/// Day-of-month selector: `1..=31` counts from the start, `-1` and `-2` from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DaySelector(i8);

impl DaySelector {
    /// ## Errors
    /// Returns `InvalidRule` if the selector is zero or outside `-2..=31`.
    pub fn new(selector: i64) -> RuleResult<Self> {
        i8::try_from(selector)
            .ok()
            .filter(|s| (-2..=31).contains(s) && *s != 0)
            .map(Self)
            .ok_or_else(|| {
                RuleError::invalid_rule(format!(
                    "day {selector} is outside -2..=31 or zero"
                ))
            })
    }

    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }

    /// The concrete day this selector lands on in a month of `days_in_month` days.
    #[must_use]
    pub fn resolve(self, days_in_month: u32) -> Option<u32> {
        resolve_day_selector(self.0, days_in_month)
    }
}

/// Day selectors plus the months they apply to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRule {
    days: BTreeSet<DaySelector>,
    months: BTreeSet<u8>,
}

impl MonthlyRule {
    /// Builds a monthly rule. `months` of `None` allows all twelve months.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if either list is empty or holds an out-of-range value.
    pub fn new(
        days: impl IntoIterator<Item = i64>,
        months: Option<impl IntoIterator<Item = i64>>,
    ) -> RuleResult<Self> {
        let days = days
            .into_iter()
            .map(DaySelector::new)
            .collect::<RuleResult<BTreeSet<_>>>()?;
        if days.is_empty() {
            return Err(RuleError::invalid_rule("monthly rule needs at least one day"));
        }

        let months = match months {
            None => (1..=12).collect(),
            Some(months) => {
                let set = months
                    .into_iter()
                    .map(|month| {
                        u8::try_from(month)
                            .ok()
                            .filter(|m| (1..=12).contains(m))
                            .ok_or_else(|| {
                                RuleError::invalid_rule(format!("month {month} is outside 1..=12"))
                            })
                    })
                    .collect::<RuleResult<BTreeSet<u8>>>()?;
                if set.is_empty() {
                    return Err(RuleError::invalid_rule(
                        "monthly rule month list must not be empty",
                    ));
                }
                set
            }
        };

        Ok(Self { days, months })
    }

    pub fn days(&self) -> impl Iterator<Item = DaySelector> + '_ {
        self.days.iter().copied()
    }

    pub fn months(&self) -> impl Iterator<Item = u8> + '_ {
        self.months.iter().copied()
    }

    #[must_use]
    pub fn allows_month(&self, month: u32) -> bool {
        u8::try_from(month).is_ok_and(|m| self.months.contains(&m))
    }

    #[must_use]
    pub fn allows_all_months(&self) -> bool {
        self.months.len() == 12
    }

    /// Concrete days this rule fires on in the given month, ascending.
    #[must_use]
    pub fn resolved_days(&self, month: u32, year: i32) -> BTreeSet<u32> {
        let length = days_in_month(month, year);
        self.days.iter().filter_map(|s| s.resolve(length)).collect()
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical rule text; parses back to an equal [`Rule`].
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yearly => f.write_str("y"),
            Self::EveryNDays(interval) => write!(f, "d {}", interval.get()),
            Self::Weekly(weekdays) => {
                f.write_str("w ")?;
                write_list(f, weekdays.iter())
            }
            Self::Monthly(rule) => {
                f.write_str("m ")?;
                write_list(f, rule.days())?;
                if !rule.allows_all_months() {
                    f.write_str(" ")?;
                    write_list(f, rule.months())?;
                }
                Ok(())
            }
        }
    }
}

impl std::str::FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse::parse_rule(s)
    }
}
