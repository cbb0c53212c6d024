//! Conflict-aware slot and classroom assignment.
//!
//! The engine validates and records scheduling decisions proposed by the
//! caller; it never searches for a timetable itself. Operations live on
//! [`Session`] because every check has to scan arenas the session owns.
//!
//! # Conflict Rules
//!
//! An assignment is refused when it would double-book:
//! - a **student** — another course sharing a student already occupies the
//!   slot;
//! - an **instructor** — another course with the same instructor already
//!   occupies the slot;
//! - a **classroom** — a course occupying the slot has already paired that
//!   room with it.
//!
//! # Error Policy
//!
//! Every mutation returns `Result<(), AssignmentError>`. Conflicts
//! (expected, recoverable — callers branch on them) and contract
//! violations (a held slot assigned twice, an unheld slot released or
//! given a room — bugs in correct caller code) share the error type and
//! are separated by [`AssignmentError::is_conflict`]. A refused operation
//! leaves the entity graph untouched.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", §2: hard
//! constraints of school and university timetabling.

use log::debug;
use thiserror::Error;

use crate::models::{ClassroomId, CourseId, Session, SlotId};

/// Result type for scheduling mutations.
pub type AssignmentResult = Result<(), AssignmentError>;

/// Why a scheduling mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// A student of the course is already booked in this slot.
    #[error("student `{student}` already attends `{with}` on {day} hour {hour}")]
    StudentConflict {
        student: String,
        with: String,
        day: String,
        hour: u8,
    },

    /// The course's instructor is already booked in this slot.
    #[error("instructor `{instructor}` already teaches `{with}` on {day} hour {hour}")]
    InstructorConflict {
        instructor: String,
        with: String,
        day: String,
        hour: u8,
    },

    /// The classroom is already paired with this slot by an occupying course.
    #[error("classroom `{classroom}` is already taken by `{with}` on {day} hour {hour}")]
    ClassroomConflict {
        classroom: String,
        with: String,
        day: String,
        hour: u8,
    },

    /// The course already occupies the slot it tried to claim.
    #[error("course `{course}` already occupies {day} hour {hour}")]
    SlotAlreadyAssigned {
        course: String,
        day: String,
        hour: u8,
    },

    /// The course does not occupy the slot the operation targets.
    #[error("course `{course}` does not occupy {day} hour {hour}")]
    SlotNotAssigned {
        course: String,
        day: String,
        hour: u8,
    },
}

impl AssignmentError {
    /// Whether this is an expected scheduling conflict.
    ///
    /// Conflicts are recoverable — the caller picks another slot or room.
    /// The remaining variants are caller contract violations that should
    /// not occur in correct code.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::StudentConflict { .. }
                | Self::InstructorConflict { .. }
                | Self::ClassroomConflict { .. }
        )
    }
}

impl Session {
    /// Whether `course` could claim `slot` without double-booking a student
    /// or its instructor.
    ///
    /// Only *other* courses are consulted; the course's own occupancy of
    /// `slot` is [`assign_slot`](Session::assign_slot)'s guard, not a
    /// conflict. Runs in O(students × their courses + instructor's courses).
    pub fn is_slot_available(&self, course: CourseId, slot: SlotId) -> bool {
        self.slot_conflict(course, slot).is_none()
    }

    /// Claims `slot` for `course`.
    ///
    /// Refuses with `SlotAlreadyAssigned` if the course already holds the
    /// slot, or with the specific conflict if a student or the instructor
    /// is double-booked. On success both sides of the occupancy relation
    /// are updated together. No classroom is assigned; that is a separate
    /// step.
    pub fn assign_slot(&mut self, course: CourseId, slot: SlotId) -> AssignmentResult {
        if self.course(course).occupies(slot) {
            return Err(self.refused(self.held_violation(course, slot)));
        }
        if let Some(conflict) = self.slot_conflict(course, slot) {
            return Err(self.refused(conflict));
        }

        self.slots[slot.0].occupants.insert(course);
        self.courses[course.0].slots.insert(slot);
        Ok(())
    }

    /// Releases `slot` from `course`.
    ///
    /// Refuses with `SlotNotAssigned` if the course does not hold the slot.
    /// On success the slot leaves the course's occupied set, the course
    /// leaves the slot's occupant set, and any classroom pairing for the
    /// slot is dropped — all three together.
    pub fn remove_slot(&mut self, course: CourseId, slot: SlotId) -> AssignmentResult {
        if !self.course(course).occupies(slot) {
            return Err(self.refused(self.unheld_violation(course, slot)));
        }

        self.slots[slot.0].occupants.remove(&course);
        let record = &mut self.courses[course.0];
        record.slots.remove(&slot);
        record.classrooms.remove(&slot);
        Ok(())
    }

    /// Whether `classroom` is free at `slot`.
    ///
    /// Scans every course occupying the slot — across the whole session,
    /// not just one course — for an existing pairing of that room with
    /// that slot.
    pub fn is_classroom_available(&self, slot: SlotId, classroom: ClassroomId) -> bool {
        self.classroom_holder(slot, classroom).is_none()
    }

    /// Pairs `classroom` with `slot` for `course`.
    ///
    /// Refuses with `SlotNotAssigned` if the course does not occupy the
    /// slot — a room on an unclaimed slot is a contract violation, not a
    /// conflict. Refuses with `ClassroomConflict` if the room is taken at
    /// that slot. Re-pairing an occupied slot with a different free room
    /// overwrites the previous pairing.
    pub fn assign_classroom(
        &mut self,
        course: CourseId,
        slot: SlotId,
        classroom: ClassroomId,
    ) -> AssignmentResult {
        if !self.course(course).occupies(slot) {
            return Err(self.refused(self.unheld_violation(course, slot)));
        }
        if let Some(holder) = self.classroom_holder(slot, classroom) {
            let at = self.slot(slot);
            return Err(self.refused(AssignmentError::ClassroomConflict {
                classroom: self.classroom(classroom).id.clone(),
                with: self.course(holder).id.clone(),
                day: at.day().to_string(),
                hour: at.hour(),
            }));
        }

        self.courses[course.0].classrooms.insert(slot, classroom);
        Ok(())
    }

    /// First student or instructor double-booking that claiming `slot`
    /// would cause, excluding `course` itself.
    fn slot_conflict(&self, course: CourseId, slot: SlotId) -> Option<AssignmentError> {
        let subject = self.course(course);
        let at = self.slot(slot);

        for &student in &subject.students {
            for &other in self.student(student).courses() {
                if other != course && self.course(other).occupies(slot) {
                    return Some(AssignmentError::StudentConflict {
                        student: self.student(student).id.clone(),
                        with: self.course(other).id.clone(),
                        day: at.day().to_string(),
                        hour: at.hour(),
                    });
                }
            }
        }

        for &other in self.instructor(subject.instructor()).courses() {
            if other != course && self.course(other).occupies(slot) {
                return Some(AssignmentError::InstructorConflict {
                    instructor: self.instructor(subject.instructor()).id.clone(),
                    with: self.course(other).id.clone(),
                    day: at.day().to_string(),
                    hour: at.hour(),
                });
            }
        }

        None
    }

    /// The course occupying `slot` that has paired `classroom` with it.
    fn classroom_holder(&self, slot: SlotId, classroom: ClassroomId) -> Option<CourseId> {
        self.slot(slot)
            .occupants()
            .find(|&occupant| self.course(occupant).classroom_for(slot) == Some(classroom))
    }

    fn held_violation(&self, course: CourseId, slot: SlotId) -> AssignmentError {
        let at = self.slot(slot);
        AssignmentError::SlotAlreadyAssigned {
            course: self.course(course).id.clone(),
            day: at.day().to_string(),
            hour: at.hour(),
        }
    }

    fn unheld_violation(&self, course: CourseId, slot: SlotId) -> AssignmentError {
        let at = self.slot(slot);
        AssignmentError::SlotNotAssigned {
            course: self.course(course).id.clone(),
            day: at.day().to_string(),
            hour: at.hour(),
        }
    }

    fn refused(&self, error: AssignmentError) -> AssignmentError {
        debug!("session `{}`: refused assignment: {error}", self.id());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{CourseDoc, DepartmentDoc, ProgramDoc, SessionDoc};
    use crate::models::SlotId;

    /// One department; c1 and c2 share instructor i1, c1 and c3 share
    /// student s1, c4 shares nothing with c1 or c2.
    fn sample_session() -> Session {
        let doc = SessionDoc::new("2024-fall", "Fall 2024").with_program(
            ProgramDoc::new("eng", "Engineering").with_department(
                DepartmentDoc::new("cs", "Computer Science")
                    .with_classroom("r1", 40)
                    .with_classroom("r2", 30)
                    .with_instructor("i1", "Instructor One")
                    .with_instructor("i2", "Instructor Two")
                    .with_student("s1", "Student One")
                    .with_student("s2", "Student Two")
                    .with_student("s3", "Student Three")
                    .with_course(CourseDoc::new("c1", "Algorithms", 4, "i1").with_student("s1"))
                    .with_course(CourseDoc::new("c2", "Compilers", 3, "i1").with_student("s2"))
                    .with_course(CourseDoc::new("c3", "Databases", 3, "i2").with_student("s1"))
                    .with_course(CourseDoc::new("c4", "Networks", 2, "i2").with_student("s3")),
            ),
        );
        Session::from_document(doc).unwrap()
    }

    fn ids(session: &Session) -> (CourseId, CourseId, CourseId, CourseId) {
        (
            session.course_id("c1").unwrap(),
            session.course_id("c2").unwrap(),
            session.course_id("c3").unwrap(),
            session.course_id("c4").unwrap(),
        )
    }

    #[test]
    fn test_assign_slot_updates_both_sides() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        assert!(session.assign_slot(c1, mon8).is_ok());
        assert!(session.course(c1).occupies(mon8));
        assert!(session.slot(mon8).is_occupied_by(c1));
        assert_eq!(session.slot(mon8).occupant_count(), 1);
    }

    #[test]
    fn test_shared_instructor_blocks_slot() {
        let mut session = sample_session();
        let (c1, c2, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        session.assign_slot(c1, mon8).unwrap();
        assert!(!session.is_slot_available(c2, mon8));

        let err = session.assign_slot(c2, mon8).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            err,
            AssignmentError::InstructorConflict {
                instructor: "i1".into(),
                with: "c1".into(),
                day: "Monday".into(),
                hour: 8,
            }
        );
    }

    #[test]
    fn test_shared_student_blocks_slot() {
        let mut session = sample_session();
        let (c1, _, c3, _) = ids(&session);
        let tue9 = session.slot_at("Tuesday", 9).unwrap();

        session.assign_slot(c1, tue9).unwrap();
        let err = session.assign_slot(c3, tue9).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            err,
            AssignmentError::StudentConflict {
                student: "s1".into(),
                with: "c1".into(),
                day: "Tuesday".into(),
                hour: 9,
            }
        );
    }

    #[test]
    fn test_unrelated_courses_share_slot() {
        let mut session = sample_session();
        let (c1, _, _, c4) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        session.assign_slot(c1, mon8).unwrap();
        // c4 shares neither student nor instructor with c1
        assert!(session.is_slot_available(c4, mon8));
        assert!(session.assign_slot(c4, mon8).is_ok());
        assert_eq!(session.slot(mon8).occupant_count(), 2);
    }

    #[test]
    fn test_failed_assign_mutates_nothing() {
        let mut session = sample_session();
        let (c1, c2, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        session.assign_slot(c1, mon8).unwrap();
        session.assign_slot(c2, mon8).unwrap_err();

        assert_eq!(session.course(c2).slot_count(), 0);
        assert_eq!(session.slot(mon8).occupant_count(), 1);
        assert!(!session.slot(mon8).is_occupied_by(c2));
    }

    #[test]
    fn test_reassigning_held_slot_is_contract_violation() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        session.assign_slot(c1, mon8).unwrap();
        let err = session.assign_slot(c1, mon8).unwrap_err();
        assert!(!err.is_conflict());
        assert!(matches!(err, AssignmentError::SlotAlreadyAssigned { .. }));
        assert_eq!(session.course(c1).slot_count(), 1);
    }

    #[test]
    fn test_availability_ignores_own_occupancy() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        session.assign_slot(c1, mon8).unwrap();
        // Own slots are assign_slot's guard, not a conflict
        assert!(session.is_slot_available(c1, mon8));
    }

    #[test]
    fn test_remove_unheld_slot_is_contract_violation() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        let err = session.remove_slot(c1, mon8).unwrap_err();
        assert!(!err.is_conflict());
        assert!(matches!(err, AssignmentError::SlotNotAssigned { .. }));
    }

    #[test]
    fn test_remove_restores_availability() {
        let mut session = sample_session();
        let (c1, c2, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();

        session.assign_slot(c1, mon8).unwrap();
        assert!(!session.is_slot_available(c2, mon8));

        session.remove_slot(c1, mon8).unwrap();
        assert!(!session.slot(mon8).is_occupied_by(c1));
        assert!(session.is_slot_available(c2, mon8));
        assert!(session.assign_slot(c2, mon8).is_ok());
    }

    #[test]
    fn test_remove_drops_classroom_pairing() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();
        let r1 = session.classroom_id("r1").unwrap();

        session.assign_slot(c1, mon8).unwrap();
        session.assign_classroom(c1, mon8, r1).unwrap();
        session.remove_slot(c1, mon8).unwrap();

        // Re-claiming the slot starts from the unpaired state
        session.assign_slot(c1, mon8).unwrap();
        assert!(session.course(c1).classroom_for(mon8).is_none());
    }

    #[test]
    fn test_classroom_exclusive_within_slot() {
        let mut session = sample_session();
        let (c1, _, _, c4) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();
        let r1 = session.classroom_id("r1").unwrap();
        let r2 = session.classroom_id("r2").unwrap();

        session.assign_slot(c1, mon8).unwrap();
        session.assign_slot(c4, mon8).unwrap();
        session.assign_classroom(c1, mon8, r1).unwrap();

        assert!(!session.is_classroom_available(mon8, r1));
        let err = session.assign_classroom(c4, mon8, r1).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            err,
            AssignmentError::ClassroomConflict {
                classroom: "r1".into(),
                with: "c1".into(),
                day: "Monday".into(),
                hour: 8,
            }
        );
        assert!(session.course(c4).classroom_for(mon8).is_none());

        // A different room in the same slot is fine
        assert!(session.assign_classroom(c4, mon8, r2).is_ok());
    }

    #[test]
    fn test_classroom_free_in_other_slot() {
        let mut session = sample_session();
        let (c1, c2, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();
        let mon9 = session.slot_at("Monday", 9).unwrap();
        let r1 = session.classroom_id("r1").unwrap();

        session.assign_slot(c1, mon8).unwrap();
        session.assign_classroom(c1, mon8, r1).unwrap();

        session.assign_slot(c2, mon9).unwrap();
        // Same room, different slot: independent
        assert!(session.is_classroom_available(mon9, r1));
        assert!(session.assign_classroom(c2, mon9, r1).is_ok());
    }

    #[test]
    fn test_classroom_on_unheld_slot_is_distinct_error() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let tue9 = session.slot_at("Tuesday", 9).unwrap();
        let r1 = session.classroom_id("r1").unwrap();

        let err = session.assign_classroom(c1, tue9, r1).unwrap_err();
        // Never reported as a conflict: the caller broke the contract
        assert!(!err.is_conflict());
        assert_eq!(
            err,
            AssignmentError::SlotNotAssigned {
                course: "c1".into(),
                day: "Tuesday".into(),
                hour: 9,
            }
        );
    }

    #[test]
    fn test_repairing_slot_with_free_room_overwrites() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let mon8 = session.slot_at("Monday", 8).unwrap();
        let r1 = session.classroom_id("r1").unwrap();
        let r2 = session.classroom_id("r2").unwrap();

        session.assign_slot(c1, mon8).unwrap();
        session.assign_classroom(c1, mon8, r1).unwrap();

        // The identical pairing is seen as taken (by this course itself)
        let err = session.assign_classroom(c1, mon8, r1).unwrap_err();
        assert!(err.is_conflict());

        // Moving to a free room replaces the pairing
        session.assign_classroom(c1, mon8, r2).unwrap();
        assert_eq!(session.course(c1).classroom_for(mon8), Some(r2));
        assert!(session.is_classroom_available(mon8, r1));
    }

    #[test]
    fn test_scenario_one_instructor_two_courses() {
        // I1 teaches C1(St1) and C2(St2); R1 serves both in different slots
        let doc = SessionDoc::new("s", "Scenario").with_program(
            ProgramDoc::new("p", "Program").with_department(
                DepartmentDoc::new("d", "Department")
                    .with_classroom("R1", 25)
                    .with_instructor("I1", "Instructor")
                    .with_student("St1", "First")
                    .with_student("St2", "Second")
                    .with_course(CourseDoc::new("C1", "First Course", 3, "I1").with_student("St1"))
                    .with_course(CourseDoc::new("C2", "Second Course", 3, "I1").with_student("St2")),
            ),
        );
        let mut session = Session::from_document(doc).unwrap();
        let c1 = session.course_id("C1").unwrap();
        let c2 = session.course_id("C2").unwrap();
        let r1 = session.classroom_id("R1").unwrap();
        let mon8 = session.slot_at("Monday", 8).unwrap();
        let mon9 = session.slot_at("Monday", 9).unwrap();

        assert!(session.assign_slot(c1, mon8).is_ok());

        let err = session.assign_slot(c2, mon8).unwrap_err();
        assert!(matches!(err, AssignmentError::InstructorConflict { .. }));

        assert!(session.assign_slot(c2, mon9).is_ok());
        assert!(session.assign_classroom(c1, mon8, r1).is_ok());
        assert!(session.assign_classroom(c2, mon9, r1).is_ok());
    }

    #[test]
    fn test_slot_ids_stable_across_mutations() {
        let mut session = sample_session();
        let (c1, ..) = ids(&session);
        let fri17 = session.slot_at("Friday", 17).unwrap();
        assert_eq!(fri17, SlotId(49)); // last cell of the 5x10 grid

        session.assign_slot(c1, fri17).unwrap();
        assert_eq!(session.slot_at("Friday", 17), Some(fri17));
    }
}
