//! Weekly availability: one optional time range per weekday.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};

use super::fields::{FieldError, FieldMap};

pub const TIME_FORMAT: &str = "%H:%M";

/// Weekdays in display order, with the column suffix each one is stored under.
pub const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "mon"),
    (Weekday::Tue, "tue"),
    (Weekday::Wed, "wed"),
    (Weekday::Thu, "thu"),
    (Weekday::Fri, "fri"),
    (Weekday::Sat, "sat"),
    (Weekday::Sun, "sun"),
];

/// Column / form field name for a weekday, e.g. `schedule_mon`.
pub fn schedule_field(day: Weekday) -> String {
    let suffix = WEEKDAYS[day.num_days_from_monday() as usize].1;
    format!("schedule_{suffix}")
}

/// A same-day working window, `start` strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, String> {
        if start >= end {
            return Err(format!(
                "start {} must be before end {}",
                start.format(TIME_FORMAT),
                end.format(TIME_FORMAT)
            ));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

impl FromStr for TimeRange {
    type Err = String;

    /// Accepts `HH:MM-HH:MM`, spaces around the dash allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("'{s}' is not a time range (expected HH:MM-HH:MM)"))?;
        let parse = |t: &str| {
            NaiveTime::parse_from_str(t.trim(), TIME_FORMAT)
                .map_err(|_| format!("'{}' is not a time (expected HH:MM)", t.trim()))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

/// Day → time range, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    slots: [Option<TimeRange>; 7],
}

impl WeeklySchedule {
    pub fn get(&self, day: Weekday) -> Option<TimeRange> {
        self.slots[day.num_days_from_monday() as usize]
    }

    pub fn set(&mut self, day: Weekday, range: Option<TimeRange>) {
        self.slots[day.num_days_from_monday() as usize] = range;
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Days with a range, in week order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, TimeRange)> + '_ {
        WEEKDAYS
            .iter()
            .filter_map(|(day, _)| self.get(*day).map(|range| (*day, range)))
    }

    pub fn read_fields(fields: &FieldMap) -> Result<Self, FieldError> {
        let mut schedule = Self::default();
        for (day, _) in WEEKDAYS {
            let name = schedule_field(day);
            if let Some(raw) = fields.opt(&name) {
                let range = raw
                    .parse::<TimeRange>()
                    .map_err(|message| FieldError::new(name.as_str(), message))?;
                schedule.set(day, Some(range));
            }
        }
        Ok(schedule)
    }

    pub fn write_fields(&self, fields: &mut FieldMap) {
        for (day, _) in WEEKDAYS {
            fields.set_opt(&schedule_field(day), self.get(day));
        }
    }
}

impl fmt::Display for WeeklySchedule {
    /// `Mon 09:00-12:00; Wed 17:00-20:00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .days()
            .map(|(day, range)| format!("{day} {range}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}
