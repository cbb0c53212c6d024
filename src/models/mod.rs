//! Timetabling domain models.
//!
//! Provides the entity graph for one academic session: programs group
//! departments, departments own classrooms, instructors, students, and
//! courses, and the session owns the weekly slot grid everything is
//! scheduled against.
//!
//! # Entity References
//!
//! All entities live in arenas owned by [`Session`] and refer to each
//! other through stable `Copy` ids ([`CourseId`], [`SlotId`], ...). The
//! bidirectional relations of the domain (course ↔ slot occupancy,
//! course ↔ instructor, course ↔ student) are id sets on both sides, kept
//! in sync by the [`assignment`](crate::assignment) engine.

mod classroom;
mod course;
mod department;
mod instructor;
mod session;
mod slot;
mod student;

pub use classroom::{Classroom, ClassroomId};
pub use course::{Course, CourseId};
pub use department::{Department, Program};
pub use instructor::{Instructor, InstructorId};
pub use session::Session;
pub use slot::{Slot, SlotId, WeekTemplate};
pub use student::{Student, StudentId};
