//! Slot and week template models.
//!
//! A slot is one bookable (day, hour) unit of the weekly grid. Slots are
//! created once, when a session builds its grid from a [`WeekTemplate`],
//! and are identified by [`SlotId`] within that session.
//!
//! # Occupancy
//! Each slot tracks which courses currently occupy it. This back-reference
//! set is written only by the assignment engine; the engine keeps it in
//! sync with each course's own occupied-slot set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::CourseId;

/// Identifies a slot within its owning session.
///
/// Slot ids are minted by the session when the grid is built and are only
/// meaningful for that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

/// A single bookable (day, hour) timetable unit.
#[derive(Debug, Clone)]
pub struct Slot {
    pub(crate) day: String,
    pub(crate) hour: u8,
    pub(crate) occupants: HashSet<CourseId>,
}

impl Slot {
    pub(crate) fn new(day: impl Into<String>, hour: u8) -> Self {
        Self {
            day: day.into(),
            hour,
            occupants: HashSet::new(),
        }
    }

    /// Day name (one of the week template's days).
    #[inline]
    pub fn day(&self) -> &str {
        &self.day
    }

    /// Starting hour.
    #[inline]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Courses currently occupying this slot.
    pub fn occupants(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.occupants.iter().copied()
    }

    /// Whether the given course occupies this slot.
    pub fn is_occupied_by(&self, course: CourseId) -> bool {
        self.occupants.contains(&course)
    }

    /// Number of courses occupying this slot.
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }
}

/// Week shape used to build a session's slot grid.
///
/// Day names and hour values are configuration, not constants: a session
/// built for evening programs or six-day weeks uses the same grid logic
/// with a different template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTemplate {
    /// Day names, in grid order.
    pub days: Vec<String>,
    /// Hour values, in grid order.
    pub hours: Vec<u8>,
}

impl WeekTemplate {
    /// Creates a template from explicit days and hours.
    pub fn new(days: Vec<String>, hours: Vec<u8>) -> Self {
        Self { days, hours }
    }

    /// Adds a day.
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.days.push(day.into());
        self
    }

    /// Adds an hour.
    pub fn with_hour(mut self, hour: u8) -> Self {
        self.hours.push(hour);
        self
    }

    /// Total number of slots in a grid built from this template.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.hours.len()
    }

    /// Grid index of a day name.
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    /// Grid index of an hour value.
    pub fn hour_index(&self, hour: u8) -> Option<usize> {
        self.hours.iter().position(|&h| h == hour)
    }
}

impl Default for WeekTemplate {
    /// Five weekdays, ten one-hour slots from 08:00 to 17:00.
    fn default() -> Self {
        Self {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .map(String::from)
                .to_vec(),
            hours: (8..=17).collect(),
        }
    }
}
