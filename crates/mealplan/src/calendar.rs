//! Month grid for the meal calendar.

use serde::Serialize;
use time::{Date, Duration, Month};

pub const GRID_DAYS: usize = 42;

/// A displayed month. Navigation wraps across years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    #[serde(serialize_with = "serialize_month")]
    pub month: Month,
}

fn serialize_month<S: serde::Serializer>(
    month: &Month,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*month))
}

impl MonthCursor {
    pub fn new(year: i32, month: u8) -> recipebox_shared::Result<Self> {
        Ok(Self {
            year,
            month: Month::try_from(month)?,
        })
    }

    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> recipebox_shared::Result<Date> {
        Ok(Date::from_calendar_date(self.year, self.month, 1)?)
    }

    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => Self {
                year: self.year.saturating_sub(1),
                month: Month::December,
            },
            month => Self {
                year: self.year,
                month: month.previous(),
            },
        }
    }

    pub fn next(&self) -> Self {
        match self.month {
            Month::December => Self {
                year: self.year.saturating_add(1),
                month: Month::January,
            },
            month => Self {
                year: self.year,
                month: month.next(),
            },
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Sunday on or before the first of the month.
    pub fn grid_start(&self) -> recipebox_shared::Result<Date> {
        let first = self.first_day()?;
        let offset = first.weekday().number_days_from_sunday();

        match first.checked_sub(Duration::days(offset.into())) {
            Some(start) => Ok(start),
            None => recipebox_shared::user!("month out of range"),
        }
    }

    /// The 42 consecutive days shown for this month.
    pub fn grid(&self) -> recipebox_shared::Result<Vec<Date>> {
        let start = self.grid_start()?;
        let mut days = Vec::with_capacity(GRID_DAYS);

        for offset in 0..GRID_DAYS as i64 {
            let Some(day) = start.checked_add(Duration::days(offset)) else {
                recipebox_shared::user!("month out of range");
            };
            days.push(day);
        }

        Ok(days)
    }
}
