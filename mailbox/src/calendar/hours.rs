//! Module dedicated to hour bucketing, used by the day and schedule
//! views.

use std::{collections::BTreeMap, ops::RangeInclusive};

use chrono::Timelike;

use super::{range, CalendarDate, CalendarEvent};

/// The working hours, always shown in the day view.
pub const WORKING_HOURS: RangeInclusive<u32> = 8..=18;

/// Formats an hour of the day on a 12-hour clock, for example `2:00
/// PM`.
pub fn hour_label(hour: u32) -> String {
    let display_hour = match hour % 12 {
        0 => 12,
        hour => hour,
    };
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    format!("{display_hour}:00 {meridiem}")
}

/// An hour of a day and its events.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HourSlot<'a> {
    pub hour: u32,

    /// The events starting in that hour, sorted by start time.
    pub events: Vec<&'a CalendarEvent>,
}

impl<'a> HourSlot<'a> {
    pub fn label(&self) -> String {
        hour_label(self.hour)
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(|event| event.line()).collect()
    }
}

/// Groups the given events by local start hour.
///
/// Events without a valid start date are dropped. Within an hour,
/// events are sorted by start time, keeping index order for equal
/// start times.
pub fn group_by_hour<'a>(
    events: impl IntoIterator<Item = &'a CalendarEvent>,
) -> BTreeMap<u32, Vec<&'a CalendarEvent>> {
    let mut hours: BTreeMap<u32, Vec<(chrono::NaiveDateTime, &CalendarEvent)>> = BTreeMap::new();

    for event in events {
        if let Some(start) = event.start() {
            hours.entry(start.hour()).or_default().push((start, event));
        }
    }

    hours
        .into_iter()
        .map(|(hour, mut events)| {
            events.sort_by_key(|(start, _)| *start);
            (hour, events.into_iter().map(|(_, event)| event).collect())
        })
        .collect()
}

/// Builds the hour slots of a day view.
///
/// The slots cover the working hours plus every hour having at least
/// one event. A day without event has no slot.
pub fn day_hours<'a>(events: impl IntoIterator<Item = &'a CalendarEvent>) -> Vec<HourSlot<'a>> {
    let mut hours = group_by_hour(events);

    if hours.is_empty() {
        return Vec::new();
    }

    for hour in WORKING_HOURS {
        hours.entry(hour).or_default();
    }

    hours
        .into_iter()
        .map(|(hour, events)| HourSlot { hour, events })
        .collect()
}

/// A day of the schedule view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleDay<'a> {
    pub date: CalendarDate,

    /// The hours having events, ascending.
    pub hours: Vec<HourSlot<'a>>,
}

impl<'a> ScheduleDay<'a> {
    /// Returns the heading of the day, for example `June 15, 2001`.
    pub fn heading(&self) -> String {
        self.date.long()
    }
}

/// Builds the schedule of the given month: the days having events,
/// ascending, each with the hours having events.
pub fn schedule(events: &[CalendarEvent], year: i32, month: u32) -> Vec<ScheduleDay<'_>> {
    let mut days: BTreeMap<CalendarDate, Vec<&CalendarEvent>> = BTreeMap::new();

    for event in range::events_in_month(events, year, month) {
        if let Some(date) = event.date() {
            days.entry(date).or_default().push(event);
        }
    }

    days.into_iter()
        .map(|(date, events)| ScheduleDay {
            date,
            hours: group_by_hour(events)
                .into_iter()
                .map(|(hour, events)| HourSlot { hour, events })
                .collect(),
        })
        .collect()
}
