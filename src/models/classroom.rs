//! Classroom model.

/// Identifies a classroom within its owning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassroomId(pub(crate) usize);

/// A physical room that courses can be assigned to.
///
/// Classrooms carry no mutable state; which course uses a room at which
/// slot is recorded on the course side.
#[derive(Debug, Clone)]
pub struct Classroom {
    /// Unique classroom identifier (document-wide).
    pub id: String,
    /// Seating capacity. Zero is valid (e.g. a remote-only room).
    pub capacity: u32,
}

impl Classroom {
    pub(crate) fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}
