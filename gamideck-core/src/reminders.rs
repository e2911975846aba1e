use crate::CoreError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest gap between reminders a custom frequency may ask for.
pub const MAX_REMINDER_DAYS: u32 = 3650;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "days")]
pub enum ReminderFrequency {
    #[default]
    Daily,
    EveryDays(u32),
}

impl ReminderFrequency {
    pub fn custom(days: u32) -> Result<Self, CoreError> {
        match days {
            0 => Err(CoreError::Invalid("reminder frequency must be at least one day")),
            1 => Ok(ReminderFrequency::Daily),
            n if n > MAX_REMINDER_DAYS => Err(CoreError::Invalid("reminder frequency is at most 3650 days")),
            n => Ok(ReminderFrequency::EveryDays(n)),
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            ReminderFrequency::Daily => 1,
            ReminderFrequency::EveryDays(n) => *n,
        }
    }
}

impl fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderFrequency::Daily => f.write_str("daily"),
            ReminderFrequency::EveryDays(7) => f.write_str("weekly"),
            ReminderFrequency::EveryDays(n) => write!(f, "every {n} days"),
        }
    }
}

/// Accepts the preset choices `1`, `2`, `3`, `5`, `7` (also `daily`,
/// `weekly`) or `custom:N`.
impl FromStr for ReminderFrequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "1" | "daily" => Ok(ReminderFrequency::Daily),
            "2" => Ok(ReminderFrequency::EveryDays(2)),
            "3" => Ok(ReminderFrequency::EveryDays(3)),
            "5" => Ok(ReminderFrequency::EveryDays(5)),
            "7" | "weekly" => Ok(ReminderFrequency::EveryDays(7)),
            _ => {
                let days = s
                    .strip_prefix("custom:")
                    .and_then(|d| d.trim().parse::<u32>().ok())
                    .ok_or(CoreError::Invalid("unknown reminder frequency"))?;
                Self::custom(days)
            }
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub vacation: bool,
    pub deadline: Option<NaiveDate>,
    pub frequency: ReminderFrequency,
}

impl ReminderSettings {
    /// Date of the next study reminder after `last`, if one is due at all.
    /// A date past the calendar's range counts as never.
    pub fn next_reminder(&self, last: NaiveDate) -> Option<NaiveDate> {
        if !self.enabled || self.vacation {
            return None;
        }
        let next = last.checked_add_days(Days::new(u64::from(self.frequency.days())))?;
        match self.deadline {
            Some(d) if next > d => None,
            _ => Some(next),
        }
    }
}
