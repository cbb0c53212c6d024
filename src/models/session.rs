//! Session model — the aggregate root.
//!
//! A session owns everything: the program tree, the entity arenas, the
//! weekly slot grid, and flat id-indexes over every course and classroom
//! reachable through its programs. All of it is built once, at
//! construction; afterwards only course scheduling state mutates, through
//! the [`assignment`](crate::assignment) engine.
//!
//! # Grid
//! The grid is one [`Slot`] per (day, hour) of the session's
//! [`WeekTemplate`], stored row-major by day and never resized. Slots are
//! addressed by [`SlotId`], by `(day index, hour index)`, or resolved from
//! `(day name, hour value)` with [`Session::slot_at`].

use std::collections::HashMap;

use super::{
    Classroom, ClassroomId, Course, CourseId, Instructor, InstructorId, Program, Slot, SlotId,
    Student, StudentId, WeekTemplate,
};

/// An academic session: program tree, entity arenas, and slot grid.
///
/// Entity ids ([`CourseId`], [`SlotId`], ...) are minted by this session
/// and must not be used with any other session.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) week: WeekTemplate,
    pub(crate) programs: Vec<Program>,
    pub(crate) slots: Vec<Slot>,
    pub(crate) classrooms: Vec<Classroom>,
    pub(crate) instructors: Vec<Instructor>,
    pub(crate) students: Vec<Student>,
    pub(crate) courses: Vec<Course>,
    pub(crate) courses_by_id: HashMap<String, CourseId>,
    pub(crate) classrooms_by_id: HashMap<String, ClassroomId>,
}

impl Session {
    /// Builds the session from already-validated parts: eagerly constructs
    /// the slot grid from the week template and indexes every course and
    /// classroom reachable through the program tree.
    pub(crate) fn assemble(
        id: String,
        name: String,
        week: WeekTemplate,
        programs: Vec<Program>,
        classrooms: Vec<Classroom>,
        instructors: Vec<Instructor>,
        students: Vec<Student>,
        courses: Vec<Course>,
    ) -> Self {
        let mut slots = Vec::with_capacity(week.slot_count());
        for day in &week.days {
            for &hour in &week.hours {
                slots.push(Slot::new(day.clone(), hour));
            }
        }

        let mut courses_by_id = HashMap::new();
        let mut classrooms_by_id = HashMap::new();
        for program in &programs {
            for department in &program.departments {
                for &course in &department.courses {
                    courses_by_id.insert(courses[course.0].id.clone(), course);
                }
                for &classroom in &department.classrooms {
                    classrooms_by_id.insert(classrooms[classroom.0].id.clone(), classroom);
                }
            }
        }

        Self {
            id,
            name,
            week,
            programs,
            slots,
            classrooms,
            instructors,
            students,
            courses,
            courses_by_id,
            classrooms_by_id,
        }
    }

    /// Session identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Session display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The week template this session's grid was built from.
    pub fn week(&self) -> &WeekTemplate {
        &self.week
    }

    /// Program tree, in document order.
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    // --- slot grid ---

    /// The slot with the given id.
    pub fn slot(&self, slot: SlotId) -> &Slot {
        &self.slots[slot.0]
    }

    /// All slots, day-major (every hour of day 0, then day 1, ...).
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &Slot)> {
        self.slots.iter().enumerate().map(|(i, s)| (SlotId(i), s))
    }

    /// One day's row of the grid, in hour order.
    pub fn day_slots(&self, day_index: usize) -> Option<&[Slot]> {
        let hours = self.week.hours.len();
        if day_index >= self.week.days.len() || hours == 0 {
            return None;
        }
        Some(&self.slots[day_index * hours..(day_index + 1) * hours])
    }

    /// Slot id at a grid position.
    pub fn slot_index(&self, day_index: usize, hour_index: usize) -> Option<SlotId> {
        if day_index < self.week.days.len() && hour_index < self.week.hours.len() {
            Some(SlotId(day_index * self.week.hours.len() + hour_index))
        } else {
            None
        }
    }

    /// Resolves a slot from a day name and hour value.
    pub fn slot_at(&self, day: &str, hour: u8) -> Option<SlotId> {
        let day_index = self.week.day_index(day)?;
        let hour_index = self.week.hour_index(hour)?;
        self.slot_index(day_index, hour_index)
    }

    // --- entity arenas ---

    /// The course with the given id.
    pub fn course(&self, course: CourseId) -> &Course {
        &self.courses[course.0]
    }

    /// The classroom with the given id.
    pub fn classroom(&self, classroom: ClassroomId) -> &Classroom {
        &self.classrooms[classroom.0]
    }

    /// The instructor with the given id.
    pub fn instructor(&self, instructor: InstructorId) -> &Instructor {
        &self.instructors[instructor.0]
    }

    /// The student with the given id.
    pub fn student(&self, student: StudentId) -> &Student {
        &self.students[student.0]
    }

    // --- id indexes ---

    /// Looks up a course by its document id.
    pub fn course_id(&self, id: &str) -> Option<CourseId> {
        self.courses_by_id.get(id).copied()
    }

    /// Looks up a course record by its document id.
    pub fn course_by_id(&self, id: &str) -> Option<&Course> {
        self.course_id(id).map(|c| self.course(c))
    }

    /// Looks up a classroom by its document id.
    pub fn classroom_id(&self, id: &str) -> Option<ClassroomId> {
        self.classrooms_by_id.get(id).copied()
    }

    /// Looks up a classroom record by its document id.
    pub fn classroom_by_id(&self, id: &str) -> Option<&Classroom> {
        self.classroom_id(id).map(|c| self.classroom(c))
    }

    /// Read-only view of the course id-index.
    pub fn course_index(&self) -> &HashMap<String, CourseId> {
        &self.courses_by_id
    }

    /// Read-only view of the classroom id-index.
    pub fn classroom_index(&self) -> &HashMap<String, ClassroomId> {
        &self.classrooms_by_id
    }

    /// Number of courses across all programs.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of classrooms across all programs.
    pub fn classroom_count(&self) -> usize {
        self.classrooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_session(week: WeekTemplate) -> Session {
        Session::assemble(
            "s".into(),
            "Session".into(),
            week,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_grid_shape_default_week() {
        let session = empty_session(WeekTemplate::default());
        assert_eq!(session.slots().count(), 50);

        let monday = session.day_slots(0).unwrap();
        assert_eq!(monday.len(), 10);
        assert_eq!(monday[0].day(), "Monday");
        assert_eq!(monday[0].hour(), 8);
        assert_eq!(monday[9].hour(), 17);

        let friday = session.day_slots(4).unwrap();
        assert_eq!(friday[9].day(), "Friday");
        assert!(session.day_slots(5).is_none());
    }

    #[test]
    fn test_slot_addressing() {
        let session = empty_session(WeekTemplate::default());

        let id = session.slot_at("Tuesday", 9).unwrap();
        let slot = session.slot(id);
        assert_eq!(slot.day(), "Tuesday");
        assert_eq!(slot.hour(), 9);
        assert_eq!(session.slot_index(1, 1), Some(id));

        assert!(session.slot_at("Sunday", 9).is_none());
        assert!(session.slot_at("Tuesday", 7).is_none());
        assert!(session.slot_index(0, 10).is_none());
    }

    #[test]
    fn test_custom_week_grid() {
        let week = WeekTemplate::new(vec!["Sat".into(), "Sun".into()], vec![18, 19, 20]);
        let session = empty_session(week);

        assert_eq!(session.slots().count(), 6);
        let id = session.slot_at("Sun", 20).unwrap();
        assert_eq!(id, SlotId(5)); // last slot of a 2x3 grid
    }

    #[test]
    fn test_empty_indexes() {
        let session = empty_session(WeekTemplate::default());
        assert!(session.course_by_id("c1").is_none());
        assert!(session.classroom_by_id("r1").is_none());
        assert_eq!(session.course_count(), 0);
        assert_eq!(session.classroom_count(), 0);
    }
}
