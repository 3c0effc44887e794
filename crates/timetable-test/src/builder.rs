//! Builder for hand-made timetables.
//!
//! # Example
//!
//! ```
//! use timetable_core::{QualificationLevel, WeekPattern};
//! use timetable_test::TimetableBuilder;
//!
//! let mut b = TimetableBuilder::new(5, 6);
//! let math = b.subject("Mathematics", "MA");
//! let class = b.school_class("5a", 5, 24);
//! let ada = b.teacher("Ada");
//! b.qualify(ada, math, QualificationLevel::Primary, &[5]);
//! let room = b.room("101", Some(30));
//!
//! let lesson = b.lesson(class, math, WeekPattern::Every);
//! b.place(lesson, 0, 2, Some(room), Some(ada));
//!
//! let timetable = b.build();
//! assert_eq!(timetable.lessons.len(), 1);
//! assert_eq!(timetable.time_slots.len(), 30);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Duration, NaiveTime};
use timetable_core::{
    Assignment, Lesson, Qualification, QualificationLevel, Room, RoomId, SchoolClass,
    SchoolClassId, SlotKey, Subject, SubjectId, Teacher, TeacherId, TermId, TimeSlot, TimeSlotId,
    Timetable, WeekPattern,
};

pub struct TimetableBuilder {
    periods_per_day: u8,
    timetable: Timetable,
    explicit_teachers: HashSet<usize>,
    explicit_rooms: HashSet<usize>,
}

impl TimetableBuilder {
    /// Creates a week of `days` days with `periods` 45-minute periods each,
    /// starting at 08:00 with five minutes between periods.
    pub fn new(days: u8, periods: u8) -> Self {
        let mut timetable = Timetable::new(TermId::new());
        let first = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN);
        for day in 0..days {
            for period in 1..=periods {
                let start = first + Duration::minutes(50 * (period as i64 - 1));
                timetable.time_slots.push(TimeSlot {
                    id: TimeSlotId::new(),
                    day_of_week: day,
                    period,
                    start_time: start,
                    end_time: start + Duration::minutes(45),
                    is_break: false,
                });
            }
        }
        Self {
            periods_per_day: periods,
            timetable,
            explicit_teachers: HashSet::new(),
            explicit_rooms: HashSet::new(),
        }
    }

    pub fn slot_index(&self, day: u8, period: u8) -> usize {
        day as usize * self.periods_per_day as usize + (period as usize - 1)
    }

    pub fn mark_break(&mut self, day: u8, period: u8) -> &mut Self {
        let idx = self.slot_index(day, period);
        self.timetable.time_slots[idx].is_break = true;
        self
    }

    pub fn allow_unresourced(&mut self, allow: bool) -> &mut Self {
        self.timetable.allow_unresourced = allow;
        self
    }

    pub fn subject(&mut self, name: &str, abbreviation: &str) -> usize {
        self.timetable.subjects.push(Subject {
            id: SubjectId::new(),
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
        });
        self.timetable.subjects.len() - 1
    }

    pub fn school_class(&mut self, name: &str, grade: u8, student_count: u32) -> usize {
        self.timetable.school_classes.push(SchoolClass {
            id: SchoolClassId::new(),
            name: name.to_string(),
            grade,
            student_count,
            class_teacher: None,
        });
        self.timetable.school_classes.len() - 1
    }

    pub fn class_teacher(&mut self, school_class: usize, teacher: usize) -> &mut Self {
        self.timetable.school_classes[school_class].class_teacher = Some(teacher);
        self
    }

    pub fn teacher(&mut self, name: &str) -> usize {
        self.timetable
            .teachers
            .push(Teacher::new(TeacherId::new(), name));
        self.timetable.teachers.len() - 1
    }

    pub fn qualify(
        &mut self,
        teacher: usize,
        subject: usize,
        level: QualificationLevel,
        grades: &[u8],
    ) -> &mut Self {
        self.timetable.teachers[teacher].qualifications.insert(
            subject,
            Qualification {
                level,
                grades: grades.iter().copied().collect::<BTreeSet<_>>(),
            },
        );
        self
    }

    pub fn max_hours(&mut self, teacher: usize, hours: u32) -> &mut Self {
        self.timetable.teachers[teacher].max_hours_per_week = Some(hours);
        self
    }

    pub fn block(&mut self, teacher: usize, day: u8, period: u8) -> &mut Self {
        self.timetable.teachers[teacher]
            .blocked
            .insert(SlotKey::new(day, period));
        self
    }

    pub fn prefer(&mut self, teacher: usize, day: u8, period: u8) -> &mut Self {
        self.timetable.teachers[teacher]
            .preferred
            .insert(SlotKey::new(day, period));
        self
    }

    pub fn room(&mut self, name: &str, capacity: Option<u32>) -> usize {
        self.timetable.rooms.push(Room {
            id: RoomId::new(),
            name: name.to_string(),
            capacity,
            suitable_subjects: HashSet::new(),
        });
        self.timetable.rooms.len() - 1
    }

    /// Restricts a room to the given subjects.
    pub fn suit(&mut self, room: usize, subjects: &[usize]) -> &mut Self {
        self.timetable.rooms[room]
            .suitable_subjects
            .extend(subjects.iter().copied());
        self
    }

    /// Adds an unplaced lesson. Unless overridden, every teacher and every
    /// suitable room becomes a candidate when the timetable is built.
    pub fn lesson(&mut self, school_class: usize, subject: usize, pattern: WeekPattern) -> usize {
        let id = self.timetable.lessons.len();
        self.timetable
            .lessons
            .push(Lesson::new(id, school_class, subject, pattern));
        id
    }

    pub fn candidate_teachers(&mut self, lesson: usize, teachers: &[usize]) -> &mut Self {
        self.timetable.lessons[lesson].candidate_teachers = teachers.to_vec();
        self.explicit_teachers.insert(lesson);
        self
    }

    pub fn candidate_rooms(&mut self, lesson: usize, rooms: &[usize]) -> &mut Self {
        self.timetable.lessons[lesson].candidate_rooms = rooms.to_vec();
        self.explicit_rooms.insert(lesson);
        self
    }

    /// Places a lesson at `day`/`period`.
    pub fn place(
        &mut self,
        lesson: usize,
        day: u8,
        period: u8,
        room: Option<usize>,
        teacher: Option<usize>,
    ) -> &mut Self {
        let slot = self.slot_index(day, period);
        self.timetable.lessons[lesson].set_assignment(Assignment::new(Some(slot), room, teacher));
        self
    }

    pub fn assign_teacher(&mut self, lesson: usize, teacher: usize) -> &mut Self {
        self.timetable.lessons[lesson].teacher = Some(teacher);
        self
    }

    pub fn build(&self) -> Timetable {
        let mut timetable = self.timetable.clone();
        let all_teachers: Vec<usize> = (0..timetable.teachers.len()).collect();
        let rooms_by_subject: HashMap<usize, Vec<usize>> = (0..timetable.subjects.len())
            .map(|subject| {
                let suited = timetable
                    .rooms
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.suits(subject))
                    .map(|(idx, _)| idx)
                    .collect();
                (subject, suited)
            })
            .collect();

        for lesson in &mut timetable.lessons {
            if !self.explicit_teachers.contains(&lesson.id) {
                lesson.candidate_teachers = all_teachers.clone();
            }
            if !self.explicit_rooms.contains(&lesson.id) {
                lesson.candidate_rooms = rooms_by_subject
                    .get(&lesson.subject)
                    .cloned()
                    .unwrap_or_default();
            }
        }
        timetable
    }
}
