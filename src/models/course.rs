//! Course model.
//!
//! A course is the central aggregate of the timetable: fixed identity
//! (id, name, credits, instructor, enrolled students) plus the only two
//! pieces of state that mutate after ingestion — the set of slots the
//! course occupies and the classroom paired with each occupied slot.
//!
//! The mutations themselves (`assign_slot`, `assign_classroom`,
//! `remove_slot`) live on [`Session`](super::Session) in the
//! [`assignment`](crate::assignment) engine, which owns the arenas the
//! conflict checks have to scan.

use std::collections::{HashMap, HashSet};

use super::{ClassroomId, InstructorId, SlotId, StudentId};

/// Identifies a course within its owning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseId(pub(crate) usize);

/// A course with fixed enrollment and mutable scheduling state.
#[derive(Debug, Clone)]
pub struct Course {
    /// Unique course identifier (document-wide).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Credit count. Zero is valid (e.g. a seminar).
    pub credits: u32,
    pub(crate) instructor: InstructorId,
    pub(crate) students: Vec<StudentId>,
    pub(crate) slots: HashSet<SlotId>,
    pub(crate) classrooms: HashMap<SlotId, ClassroomId>,
}

impl Course {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
        instructor: InstructorId,
        students: Vec<StudentId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits,
            instructor,
            students,
            slots: HashSet::new(),
            classrooms: HashMap::new(),
        }
    }

    /// The instructor teaching this course.
    #[inline]
    pub fn instructor(&self) -> InstructorId {
        self.instructor
    }

    /// Enrolled students, in document order.
    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    /// Slots this course currently occupies.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().copied()
    }

    /// Whether this course occupies the given slot.
    #[inline]
    pub fn occupies(&self, slot: SlotId) -> bool {
        self.slots.contains(&slot)
    }

    /// Number of occupied slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The classroom paired with an occupied slot, if one has been assigned.
    pub fn classroom_for(&self, slot: SlotId) -> Option<ClassroomId> {
        self.classrooms.get(&slot).copied()
    }

    /// Read-only view of the slot-to-classroom pairings.
    ///
    /// Every key is a slot this course occupies; a slot without a pairing
    /// is occupied but has no room yet.
    pub fn classrooms(&self) -> &HashMap<SlotId, ClassroomId> {
        &self.classrooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_starts_unscheduled() {
        let course = Course::new(
            "c1",
            "Algorithms",
            4,
            InstructorId(0),
            vec![StudentId(0), StudentId(1)],
        );

        assert_eq!(course.id, "c1");
        assert_eq!(course.credits, 4);
        assert_eq!(course.instructor(), InstructorId(0));
        assert_eq!(course.students(), &[StudentId(0), StudentId(1)]);
        assert_eq!(course.slot_count(), 0);
        assert!(!course.occupies(SlotId(0)));
        assert!(course.classroom_for(SlotId(0)).is_none());
        assert!(course.classrooms().is_empty());
    }
}
