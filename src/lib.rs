//! Academic timetabling domain for the U-Engine ecosystem.
//!
//! Models one academic session — programs, departments, classrooms,
//! instructors, students, courses, and a weekly slot grid — and lets
//! courses claim slots and classrooms without double-booking a student,
//! an instructor, or a room. The engine validates and records assignments
//! proposed by the caller; it does not generate timetables (no solver).
//!
//! # Modules
//!
//! - **`models`**: Entity graph — `Session`, `Program`, `Department`,
//!   `Course`, `Classroom`, `Instructor`, `Student`, `Slot`, `WeekTemplate`
//! - **`assignment`**: Conflict-aware slot/classroom assignment on `Session`
//! - **`ingest`**: Document schema, validation, and session construction
//!
//! # Example
//!
//! ```
//! use u_timetable::ingest::{CourseDoc, DepartmentDoc, ProgramDoc, SessionDoc};
//! use u_timetable::models::Session;
//!
//! let doc = SessionDoc::new("2024-fall", "Fall 2024").with_program(
//!     ProgramDoc::new("eng", "Engineering").with_department(
//!         DepartmentDoc::new("cs", "Computer Science")
//!             .with_classroom("r1", 40)
//!             .with_instructor("i1", "Instructor")
//!             .with_student("s1", "Student")
//!             .with_course(CourseDoc::new("c1", "Algorithms", 4, "i1").with_student("s1")),
//!     ),
//! );
//!
//! let mut session = Session::from_document(doc).unwrap();
//! let course = session.course_id("c1").unwrap();
//! let room = session.classroom_id("r1").unwrap();
//! let slot = session.slot_at("Monday", 8).unwrap();
//!
//! assert!(session.assign_slot(course, slot).is_ok());
//! assert!(session.assign_classroom(course, slot, room).is_ok());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Carter & Laporte (1998), "Recent Developments in Practical Course
//!   Timetabling"

pub mod assignment;
pub mod ingest;
pub mod models;
