//! Module dedicated to calendar date ranges.
//!
//! Events are matched against days and months using the calendar
//! components of their local start date, never elapsed time.

use super::{days_in_month, CalendarDate, CalendarEvent};

/// The number of events shown in a day cell before collapsing.
pub const VISIBLE_EVENTS: usize = 3;

/// The maximum number of rows of a month grid.
pub const MAX_WEEKS: usize = 6;

/// Returns the events starting on the given day, in index order.
pub fn events_on_day(
    events: &[CalendarEvent],
    year: i32,
    month: u32,
    day: u32,
) -> Vec<&CalendarEvent> {
    let date = CalendarDate::new(year, month, day);

    events
        .iter()
        .filter(|event| {
            event
                .start()
                .map(|start| date.contains(&start))
                .unwrap_or_default()
        })
        .collect()
}

/// Returns the events starting in the given month, in index order.
pub fn events_in_month(events: &[CalendarEvent], year: i32, month: u32) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| {
            event
                .date()
                .map(|date| date.year == year && date.month == month)
                .unwrap_or_default()
        })
        .collect()
}

/// Returns the 7 days of the week containing the given date, from
/// Sunday to Saturday.
pub fn week_of(year: i32, month: u32, day: u32) -> [CalendarDate; 7] {
    let date = CalendarDate::new(year, month, day).normalize();
    let sunday = date.add_days(-i64::from(date.weekday()));
    let mut week = [sunday; 7];

    for (i, day) in week.iter_mut().enumerate() {
        *day = sunday.add_days(i as i64);
    }

    week
}

/// A day of the month or week views.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DayCell<'a> {
    pub date: CalendarDate,

    /// The first events of the day.
    pub events: Vec<&'a CalendarEvent>,

    /// The number of events not shown.
    pub more: usize,

    pub selected: bool,
}

impl<'a> DayCell<'a> {
    pub fn new(events: &'a [CalendarEvent], date: CalendarDate, selected: bool) -> Self {
        let mut events = events_on_day(events, date.year, date.month, date.day);
        let more = events.len().saturating_sub(VISIBLE_EVENTS);
        events.truncate(VISIBLE_EVENTS);

        Self {
            date,
            events,
            more,
            selected,
        }
    }

    /// Returns the `+N more` label when events are hidden.
    pub fn more_label(&self) -> Option<String> {
        if self.more == 0 {
            None
        } else {
            Some(format!("+{} more", self.more))
        }
    }
}

/// Builds the month grid: Sunday-first rows of 7 cells, blank before
/// the first day and after the last one.
pub fn month_grid<'a>(
    events: &'a [CalendarEvent],
    year: i32,
    month: u32,
    selected_day: u32,
) -> Vec<Vec<Option<DayCell<'a>>>> {
    let first_weekday = CalendarDate::new(year, month, 1).weekday() as usize;
    let last_day = days_in_month(year, month);
    let mut rows = Vec::new();
    let mut day = 1;

    for week in 0..MAX_WEEKS {
        let mut row = Vec::with_capacity(7);

        for weekday in 0..7 {
            if (week == 0 && weekday < first_weekday) || day > last_day {
                row.push(None);
            } else {
                let date = CalendarDate::new(year, month, day);
                row.push(Some(DayCell::new(events, date, day == selected_day)));
                day += 1;
            }
        }

        rows.push(row);

        if day > last_day {
            break;
        }
    }

    rows
}

/// Builds the cells of the week containing the given date, in
/// display order: Monday to Friday, then Saturday and Sunday.
pub fn week_cells(events: &[CalendarEvent], date: CalendarDate) -> Vec<DayCell<'_>> {
    let week = week_of(date.year, date.month, date.day);
    let selected = date.normalize();

    [1, 2, 3, 4, 5, 6, 0]
        .into_iter()
        .map(|i| DayCell::new(events, week[i], week[i] == selected))
        .collect()
}
