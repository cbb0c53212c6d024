//! Document ingestion.
//!
//! Turns an external session document — a pre-parsed [`SessionDoc`] or its
//! JSON encoding — into a validated [`Session`]. Ingestion is
//! all-or-nothing: the first validation failure aborts with a descriptive
//! [`IngestError`] and no session is returned.
//!
//! # Document Shape
//!
//! ```text
//! Session  { id, name, programs: [Program] }
//! Program  { id, name, departments: [Department] }
//! Department {
//!   id, name,
//!   classrooms: [{ id, capacity }],
//!   instructors: [{ id, name }],
//!   students:    [{ id, name }],
//!   courses:     [{ id, name, credits, instructorId, studentIds: [id] }]
//! }
//! ```
//!
//! # Validation
//!
//! Structural requirements (field presence, `studentIds` being an array,
//! numeric `capacity`/`credits` — zero valid) are enforced by the schema
//! types. On top of that, ingestion checks per department, in two passes:
//! pass 1 registers classrooms, instructors, and students, enforcing
//! id-uniqueness across the whole document; pass 2 checks that every
//! course's instructor and students exist *and* belong to the same
//! department before any course is constructed. Course construction
//! registers the enrollment back-references; departments, programs, and
//! the session are assembled bottom-up after their children.

use std::collections::{HashMap, HashSet};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Classroom, ClassroomId, Course, CourseId, Department, Instructor, InstructorId, Program,
    Session, Student, StudentId, WeekTemplate,
};

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Why a session document was rejected.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The textual encoding is not valid JSON for the document schema.
    #[error("malformed session document: {0}")]
    Json(#[from] serde_json::Error),

    /// An entity id is empty.
    #[error("{entity} id must be non-empty")]
    EmptyId { entity: &'static str },

    /// A required text field is empty.
    #[error("{entity} `{id}`: `{field}` must be non-empty")]
    EmptyField {
        entity: &'static str,
        id: String,
        field: &'static str,
    },

    /// The same id appears twice in the document.
    #[error("duplicate {entity} id `{id}`")]
    DuplicateId { entity: &'static str, id: String },

    /// A course references an instructor id that exists nowhere.
    #[error("course `{course}` references unknown instructor `{instructor}`")]
    UnknownInstructor { course: String, instructor: String },

    /// A course references a student id that exists nowhere.
    #[error("course `{course}` references unknown student `{student}`")]
    UnknownStudent { course: String, student: String },

    /// A course references an instructor from another department.
    #[error("instructor `{instructor}` is not a member of department `{department}` (course `{course}`)")]
    ForeignInstructor {
        course: String,
        instructor: String,
        department: String,
    },

    /// A course references a student from another department.
    #[error("student `{student}` is not a member of department `{department}` (course `{course}`)")]
    ForeignStudent {
        course: String,
        student: String,
        department: String,
    },
}

/// Top-level session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDoc {
    pub id: String,
    pub name: String,
    pub programs: Vec<ProgramDoc>,
}

/// A program and its departments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDoc {
    pub id: String,
    pub name: String,
    pub departments: Vec<DepartmentDoc>,
}

/// A department and its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDoc {
    pub id: String,
    pub name: String,
    pub classrooms: Vec<ClassroomDoc>,
    pub instructors: Vec<InstructorDoc>,
    pub students: Vec<StudentDoc>,
    pub courses: Vec<CourseDoc>,
}

/// A classroom record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomDoc {
    pub id: String,
    pub capacity: u32,
}

/// An instructor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorDoc {
    pub id: String,
    pub name: String,
}

/// A student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDoc {
    pub id: String,
    pub name: String,
}

/// A course record referencing its instructor and students by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDoc {
    pub id: String,
    pub name: String,
    pub credits: u32,
    pub instructor_id: String,
    pub student_ids: Vec<String>,
}

impl SessionDoc {
    /// Creates an empty session document.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            programs: Vec::new(),
        }
    }

    /// Adds a program.
    pub fn with_program(mut self, program: ProgramDoc) -> Self {
        self.programs.push(program);
        self
    }
}

impl ProgramDoc {
    /// Creates an empty program document.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            departments: Vec::new(),
        }
    }

    /// Adds a department.
    pub fn with_department(mut self, department: DepartmentDoc) -> Self {
        self.departments.push(department);
        self
    }
}

impl DepartmentDoc {
    /// Creates an empty department document.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            classrooms: Vec::new(),
            instructors: Vec::new(),
            students: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Adds a classroom.
    pub fn with_classroom(mut self, id: impl Into<String>, capacity: u32) -> Self {
        self.classrooms.push(ClassroomDoc {
            id: id.into(),
            capacity,
        });
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.instructors.push(InstructorDoc {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Adds a student.
    pub fn with_student(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.students.push(StudentDoc {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: CourseDoc) -> Self {
        self.courses.push(course);
        self
    }
}

impl CourseDoc {
    /// Creates a course document with no students.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
        instructor_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits,
            instructor_id: instructor_id.into(),
            student_ids: Vec::new(),
        }
    }

    /// Adds an enrolled student id.
    pub fn with_student(mut self, student_id: impl Into<String>) -> Self {
        self.student_ids.push(student_id.into());
        self
    }
}

impl Session {
    /// Ingests a session from its JSON encoding, with the default week.
    pub fn from_json_str(text: &str) -> IngestResult<Self> {
        match serde_json::from_str(text) {
            Ok(doc) => Self::from_document(doc),
            Err(error) => {
                let error = IngestError::from(error);
                warn!("session document rejected: {error}");
                Err(error)
            }
        }
    }

    /// Ingests a pre-parsed session document, with the default week.
    pub fn from_document(doc: SessionDoc) -> IngestResult<Self> {
        Self::from_document_with_week(doc, WeekTemplate::default())
    }

    /// Ingests a pre-parsed session document against a custom week.
    pub fn from_document_with_week(doc: SessionDoc, week: WeekTemplate) -> IngestResult<Self> {
        match build_session(doc, week) {
            Ok(session) => {
                info!(
                    "ingested session `{}`: {} programs, {} courses, {} classrooms",
                    session.id(),
                    session.programs().len(),
                    session.course_count(),
                    session.classroom_count()
                );
                Ok(session)
            }
            Err(error) => {
                warn!("session document rejected: {error}");
                Err(error)
            }
        }
    }

    /// Exports this session back to the document schema.
    ///
    /// The result reproduces the ingested document exactly: ids, names,
    /// credits, capacities, and every membership, in document order.
    /// Scheduling state is not part of the schema and is not exported.
    pub fn to_document(&self) -> SessionDoc {
        SessionDoc {
            id: self.id().to_string(),
            name: self.name().to_string(),
            programs: self
                .programs()
                .iter()
                .map(|program| ProgramDoc {
                    id: program.id.clone(),
                    name: program.name.clone(),
                    departments: program
                        .departments()
                        .iter()
                        .map(|department| self.department_to_doc(department))
                        .collect(),
                })
                .collect(),
        }
    }

    fn department_to_doc(&self, department: &Department) -> DepartmentDoc {
        DepartmentDoc {
            id: department.id.clone(),
            name: department.name.clone(),
            classrooms: department
                .classrooms()
                .iter()
                .map(|&id| {
                    let classroom = self.classroom(id);
                    ClassroomDoc {
                        id: classroom.id.clone(),
                        capacity: classroom.capacity,
                    }
                })
                .collect(),
            instructors: department
                .instructors()
                .iter()
                .map(|&id| {
                    let instructor = self.instructor(id);
                    InstructorDoc {
                        id: instructor.id.clone(),
                        name: instructor.name.clone(),
                    }
                })
                .collect(),
            students: department
                .students()
                .iter()
                .map(|&id| {
                    let student = self.student(id);
                    StudentDoc {
                        id: student.id.clone(),
                        name: student.name.clone(),
                    }
                })
                .collect(),
            courses: department
                .courses()
                .iter()
                .map(|&id| {
                    let course = self.course(id);
                    CourseDoc {
                        id: course.id.clone(),
                        name: course.name.clone(),
                        credits: course.credits,
                        instructor_id: self.instructor(course.instructor()).id.clone(),
                        student_ids: course
                            .students()
                            .iter()
                            .map(|&s| self.student(s).id.clone())
                            .collect(),
                    }
                })
                .collect(),
        }
    }
}

fn require_id(entity: &'static str, id: &str) -> IngestResult<()> {
    if id.is_empty() {
        Err(IngestError::EmptyId { entity })
    } else {
        Ok(())
    }
}

fn require_field(entity: &'static str, id: &str, field: &'static str, value: &str) -> IngestResult<()> {
    if value.is_empty() {
        Err(IngestError::EmptyField {
            entity,
            id: id.to_string(),
            field,
        })
    } else {
        Ok(())
    }
}

fn build_session(doc: SessionDoc, week: WeekTemplate) -> IngestResult<Session> {
    require_id("session", &doc.id)?;
    require_field("session", &doc.id, "name", &doc.name)?;

    let mut classrooms: Vec<Classroom> = Vec::new();
    let mut instructors: Vec<Instructor> = Vec::new();
    let mut students: Vec<Student> = Vec::new();
    let mut courses: Vec<Course> = Vec::new();

    // Document-wide id registries; uniqueness is global, not per department.
    let mut classroom_ids: HashMap<String, ClassroomId> = HashMap::new();
    let mut instructor_ids: HashMap<String, InstructorId> = HashMap::new();
    let mut student_ids: HashMap<String, StudentId> = HashMap::new();
    let mut course_ids: HashMap<String, CourseId> = HashMap::new();

    let mut programs: Vec<Program> = Vec::new();

    for program_doc in doc.programs {
        require_id("program", &program_doc.id)?;
        require_field("program", &program_doc.id, "name", &program_doc.name)?;

        let mut departments: Vec<Department> = Vec::new();

        for dept_doc in program_doc.departments {
            require_id("department", &dept_doc.id)?;
            require_field("department", &dept_doc.id, "name", &dept_doc.name)?;

            // Pass 1: register this department's classrooms, instructors,
            // and students.
            let mut dept_classrooms: Vec<ClassroomId> = Vec::new();
            for classroom_doc in dept_doc.classrooms {
                require_id("classroom", &classroom_doc.id)?;
                if classroom_ids.contains_key(&classroom_doc.id) {
                    return Err(IngestError::DuplicateId {
                        entity: "classroom",
                        id: classroom_doc.id,
                    });
                }
                let id = ClassroomId(classrooms.len());
                classroom_ids.insert(classroom_doc.id.clone(), id);
                classrooms.push(Classroom::new(classroom_doc.id, classroom_doc.capacity));
                dept_classrooms.push(id);
            }

            let mut dept_instructors: Vec<InstructorId> = Vec::new();
            for instructor_doc in dept_doc.instructors {
                require_id("instructor", &instructor_doc.id)?;
                require_field("instructor", &instructor_doc.id, "name", &instructor_doc.name)?;
                if instructor_ids.contains_key(&instructor_doc.id) {
                    return Err(IngestError::DuplicateId {
                        entity: "instructor",
                        id: instructor_doc.id,
                    });
                }
                let id = InstructorId(instructors.len());
                instructor_ids.insert(instructor_doc.id.clone(), id);
                instructors.push(Instructor::new(instructor_doc.id, instructor_doc.name));
                dept_instructors.push(id);
            }

            let mut dept_students: Vec<StudentId> = Vec::new();
            for student_doc in dept_doc.students {
                require_id("student", &student_doc.id)?;
                require_field("student", &student_doc.id, "name", &student_doc.name)?;
                if student_ids.contains_key(&student_doc.id) {
                    return Err(IngestError::DuplicateId {
                        entity: "student",
                        id: student_doc.id,
                    });
                }
                let id = StudentId(students.len());
                student_ids.insert(student_doc.id.clone(), id);
                students.push(Student::new(student_doc.id, student_doc.name));
                dept_students.push(id);
            }

            // Pass 2: validate every course of the department before any
            // course object is constructed.
            let mut seen_courses: HashSet<String> = HashSet::new();
            for course_doc in &dept_doc.courses {
                require_id("course", &course_doc.id)?;
                require_field("course", &course_doc.id, "name", &course_doc.name)?;
                if course_ids.contains_key(&course_doc.id)
                    || !seen_courses.insert(course_doc.id.clone())
                {
                    return Err(IngestError::DuplicateId {
                        entity: "course",
                        id: course_doc.id.clone(),
                    });
                }

                let instructor = instructor_ids.get(&course_doc.instructor_id).copied();
                match instructor {
                    None => {
                        return Err(IngestError::UnknownInstructor {
                            course: course_doc.id.clone(),
                            instructor: course_doc.instructor_id.clone(),
                        })
                    }
                    Some(id) if !dept_instructors.contains(&id) => {
                        return Err(IngestError::ForeignInstructor {
                            course: course_doc.id.clone(),
                            instructor: course_doc.instructor_id.clone(),
                            department: dept_doc.id.clone(),
                        })
                    }
                    Some(_) => {}
                }

                for student_id in &course_doc.student_ids {
                    match student_ids.get(student_id).copied() {
                        None => {
                            return Err(IngestError::UnknownStudent {
                                course: course_doc.id.clone(),
                                student: student_id.clone(),
                            })
                        }
                        Some(id) if !dept_students.contains(&id) => {
                            return Err(IngestError::ForeignStudent {
                                course: course_doc.id.clone(),
                                student: student_id.clone(),
                                department: dept_doc.id.clone(),
                            })
                        }
                        Some(_) => {}
                    }
                }
            }

            // Construct the validated courses and register their
            // enrollment back-references.
            let mut dept_courses: Vec<CourseId> = Vec::new();
            for course_doc in dept_doc.courses {
                let instructor = instructor_ids[&course_doc.instructor_id];
                let enrolled: Vec<StudentId> = course_doc
                    .student_ids
                    .iter()
                    .map(|id| student_ids[id])
                    .collect();

                let id = CourseId(courses.len());
                instructors[instructor.0].courses.push(id);
                // Repeated student ids enroll once
                for student in enrolled.iter().copied().collect::<HashSet<_>>() {
                    students[student.0].courses.push(id);
                }

                course_ids.insert(course_doc.id.clone(), id);
                courses.push(Course::new(
                    course_doc.id,
                    course_doc.name,
                    course_doc.credits,
                    instructor,
                    enrolled,
                ));
                dept_courses.push(id);
            }

            departments.push(Department {
                id: dept_doc.id,
                name: dept_doc.name,
                classrooms: dept_classrooms,
                instructors: dept_instructors,
                students: dept_students,
                courses: dept_courses,
            });
        }

        programs.push(Program {
            id: program_doc.id,
            name: program_doc.name,
            departments,
        });
    }

    Ok(Session::assemble(
        doc.id,
        doc.name,
        week,
        programs,
        classrooms,
        instructors,
        students,
        courses,
    ))
}
