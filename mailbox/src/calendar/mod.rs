//! # Calendar module
//!
//! Module dedicated to the calendar of a mailbox.
//!
//! The calendar shows the events of the index in four views: month,
//! week, day and schedule. The [`Calendar`] structure holds the view
//! state (current view and date) and builds the view models; the
//! [`range`] and [`hours`] modules contain the date-range and hour
//! bucketing helpers.
//!
//! Months are zero-indexed everywhere in this module: January is 0,
//! December is 11.

pub mod hours;
pub mod range;

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use self::{
    hours::{HourSlot, ScheduleDay},
    range::DayCell,
};
use crate::{de::lenient_date, email::date};

/// The default year the calendar opens on.
pub const DEFAULT_YEAR: i32 = 2001;

pub const NO_SUBJECT: &str = "Event";
pub const NO_EVENTS_FOR_DAY: &str = "No events for this day.";
pub const NO_EVENTS_FOR_MONTH: &str = "No events scheduled for this month.";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the full English name of the given zero-indexed month.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month % 12) as usize]
}

/// The calendar event.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The raw start date, as found in the index.
    #[serde(default, deserialize_with = "lenient_date")]
    pub start: Option<String>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub end: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,
}

impl CalendarEvent {
    pub fn new(start: impl ToString, end: Option<impl ToString>, subject: impl ToString) -> Self {
        Self {
            start: Some(start.to_string()),
            end: end.map(|end| end.to_string()),
            subject: Some(subject.to_string()),
        }
    }

    /// Returns the start date on the local wall clock.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
            .as_deref()
            .and_then(date::parse_datetime)
            .map(|start| date::to_local(&start))
    }

    /// Returns the end date on the local wall clock.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
            .as_deref()
            .and_then(date::parse_datetime)
            .map(|end| date::to_local(&end))
    }

    /// Returns the calendar date of the start of the event.
    pub fn date(&self) -> Option<CalendarDate> {
        self.start().map(|start| start.date().into())
    }

    pub fn subject_or_placeholder(&self) -> &str {
        self.subject
            .as_deref()
            .filter(|subject| !subject.is_empty())
            .unwrap_or(NO_SUBJECT)
    }

    /// Returns the event line, for example `2:00 PM - 3:00 PM:
    /// Budget review`.
    pub fn line(&self) -> String {
        let subject = self.subject_or_placeholder();

        match (self.start(), self.end()) {
            (Some(start), Some(end)) => format!(
                "{} - {}: {subject}",
                date::format_time(&start),
                date::format_time(&end)
            ),
            (Some(start), None) => format!("{}: {subject}", date::format_time(&start)),
            (None, _) => subject.to_owned(),
        }
    }
}

/// The calendar date, with a zero-indexed month.
///
/// Out of range days and months overflow into the following ones
/// when converted to a real date: day 0 is the last day of the
/// previous month, month 12 is January of the following year.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Converts the date to a real date, normalizing overflowing
    /// days and months.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let year = self.year.checked_add((self.month / 12) as i32)?;
        let first = NaiveDate::from_ymd_opt(year, self.month % 12 + 1, 1)?;
        first.checked_add_signed(Duration::days(i64::from(self.day) - 1))
    }

    /// Returns the normalized version of the date.
    pub fn normalize(&self) -> Self {
        self.to_naive().map(Self::from).unwrap_or(*self)
    }

    /// Returns the day of the week, 0 being Sunday.
    pub fn weekday(&self) -> u32 {
        self.to_naive()
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or_default()
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.to_naive()
            .and_then(|date| date.checked_add_signed(Duration::days(days)))
            .map(Self::from)
            .unwrap_or(*self)
    }

    /// Steps by the given number of months, clamping the day to the
    /// length of the target month.
    pub fn add_months(&self, months: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month) + i64::from(months);
        let year = total.div_euclid(12) as i32;
        let month = total.rem_euclid(12) as u32;
        let day = self.day.clamp(1, days_in_month(year, month));
        Self { year, month, day }
    }

    /// Returns `true` if the given date-time falls on this date.
    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        date.year() == self.year && date.month0() == self.month && date.day() == self.day
    }

    /// Formats the date as `June 15, 2001`.
    pub fn long(&self) -> String {
        format!("{} {}, {}", month_name(self.month), self.day, self.year)
    }

    /// Formats the date as `Fri, June 15`.
    pub fn week_day_header(&self) -> String {
        let weekday = self
            .to_naive()
            .map(|date| date.format("%a").to_string())
            .unwrap_or_default();
        format!("{weekday}, {} {}", month_name(self.month), self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0(), date.day())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

/// Returns the number of days of the given zero-indexed month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    CalendarDate::new(year, month + 1, 0)
        .to_naive()
        .map(|date| date.day())
        .unwrap_or(28)
}

/// The calendar view enumeration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
    Schedule,
}

impl CalendarView {
    pub const ALL: [CalendarView; 4] = [Self::Month, Self::Week, Self::Day, Self::Schedule];

    /// Returns the label of the view switcher button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Week => "Week",
            Self::Day => "Day",
            Self::Schedule => "Schedule",
        }
    }
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            view if view.eq_ignore_ascii_case("month") => Ok(Self::Month),
            view if view.eq_ignore_ascii_case("week") => Ok(Self::Week),
            view if view.eq_ignore_ascii_case("day") => Ok(Self::Day),
            view if view.eq_ignore_ascii_case("schedule") => Ok(Self::Schedule),
            view => Err(format!("cannot parse calendar view {view}")),
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}

/// The view model of the current calendar view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CalendarPage<'a> {
    /// Rows of 7 cells, Sunday first. Blank cells are `None`.
    Month(Vec<Vec<Option<DayCell<'a>>>>),

    /// The days of the week, Monday to Friday then Saturday and
    /// Sunday.
    Week(Vec<DayCell<'a>>),

    /// The hour slots of the day, empty when the day has no event.
    Day(Vec<HourSlot<'a>>),

    /// The days of the month having events.
    Schedule(Vec<ScheduleDay<'a>>),
}

impl<'a> CalendarPage<'a> {
    /// Returns the message to display when the view has no event.
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            Self::Day(slots) if slots.is_empty() => Some(NO_EVENTS_FOR_DAY),
            Self::Schedule(days) if days.is_empty() => Some(NO_EVENTS_FOR_MONTH),
            _ => None,
        }
    }
}

/// The calendar state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Calendar {
    pub view: CalendarView,
    pub date: CalendarDate,
}

impl Calendar {
    /// Opens the calendar in month view, on the given year with the
    /// month and day of `today`.
    pub fn new(year: i32, today: NaiveDate) -> Self {
        let month = today.month0();
        let day = today.day().min(days_in_month(year, month));

        Self {
            view: CalendarView::Month,
            date: CalendarDate::new(year, month, day),
        }
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    /// Steps backward (negative) or forward (positive).
    ///
    /// Month and schedule views step by months, week view by 7 days
    /// and day view by 1 day.
    pub fn navigate(&mut self, step: i32) {
        self.date = match self.view {
            CalendarView::Month | CalendarView::Schedule => self.date.add_months(step),
            CalendarView::Week => self.date.add_days(i64::from(step) * 7),
            CalendarView::Day => self.date.add_days(i64::from(step)),
        };
        debug!("calendar navigated to {} ({})", self.date, self.view);
    }

    /// Selects the given date and switches to day view.
    pub fn select(&mut self, date: CalendarDate) {
        self.date = date.normalize();
        self.view = CalendarView::Day;
    }

    pub fn title(&self) -> String {
        let CalendarDate { year, month, .. } = self.date;

        match self.view {
            CalendarView::Month | CalendarView::Schedule => {
                format!("{} {year}", month_name(month))
            }
            CalendarView::Week => {
                let week = range::week_of(year, month, self.date.day);
                let (first, last) = (week[0], week[6]);
                format!(
                    "{} {} - {} {}, {}",
                    month_name(first.month),
                    first.day,
                    month_name(last.month),
                    last.day,
                    first.year
                )
            }
            CalendarView::Day => self.date.long(),
        }
    }

    /// Builds the view model of the current view.
    pub fn page<'a>(&self, events: &'a [CalendarEvent]) -> CalendarPage<'a> {
        let CalendarDate { year, month, day } = self.date;

        match self.view {
            CalendarView::Month => CalendarPage::Month(range::month_grid(events, year, month, day)),
            CalendarView::Week => CalendarPage::Week(range::week_cells(events, self.date)),
            CalendarView::Day => {
                CalendarPage::Day(hours::day_hours(range::events_on_day(events, year, month, day)))
            }
            CalendarView::Schedule => CalendarPage::Schedule(hours::schedule(events, year, month)),
        }
    }
}
