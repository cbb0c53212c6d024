//! Instructor model.

use super::CourseId;

/// Identifies an instructor within its owning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructorId(pub(crate) usize);

/// A teaching staff member.
///
/// The course list is an enrollment back-reference: it reflects which
/// courses name this instructor, is filled once when courses are
/// constructed, and never shrinks. Scheduling state lives on the courses.
#[derive(Debug, Clone)]
pub struct Instructor {
    /// Unique instructor identifier (document-wide).
    pub id: String,
    /// Display name.
    pub name: String,
    pub(crate) courses: Vec<CourseId>,
}

impl Instructor {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            courses: Vec::new(),
        }
    }

    /// Courses taught by this instructor.
    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }
}
