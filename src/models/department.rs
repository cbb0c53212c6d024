//! Department and program containers.
//!
//! Pure grouping structures: a department lists the classrooms,
//! instructors, students, and courses that were validated as its members
//! at ingestion; a program groups departments. Neither carries behavior
//! beyond aggregation.

use super::{ClassroomId, CourseId, InstructorId, StudentId};

/// A department and its validated members.
#[derive(Debug, Clone)]
pub struct Department {
    /// Department identifier (unique within its program).
    pub id: String,
    /// Display name.
    pub name: String,
    pub(crate) classrooms: Vec<ClassroomId>,
    pub(crate) instructors: Vec<InstructorId>,
    pub(crate) students: Vec<StudentId>,
    pub(crate) courses: Vec<CourseId>,
}

impl Department {
    /// Classrooms belonging to this department, in document order.
    pub fn classrooms(&self) -> &[ClassroomId] {
        &self.classrooms
    }

    /// Instructors belonging to this department.
    pub fn instructors(&self) -> &[InstructorId] {
        &self.instructors
    }

    /// Students belonging to this department.
    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    /// Courses offered by this department.
    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }
}

/// A program grouping one or more departments.
#[derive(Debug, Clone)]
pub struct Program {
    /// Program identifier (unique within its session).
    pub id: String,
    /// Display name.
    pub name: String,
    pub(crate) departments: Vec<Department>,
}

impl Program {
    /// Departments of this program, in document order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }
}
