use crate::error::{Result, TimetableError};
use crate::score::HardSoftScore;

use super::facts::{Room, SchoolClass, SlotKey, Subject, Teacher, TimeSlot};
use super::ids::TermId;
use super::lesson::Lesson;

/// The planning solution: all facts of one term plus the lessons to place.
#[derive(Debug, Clone)]
pub struct Timetable {
    pub term_id: TermId,
    pub time_slots: Vec<TimeSlot>,
    pub rooms: Vec<Room>,
    pub subjects: Vec<Subject>,
    pub school_classes: Vec<SchoolClass>,
    pub teachers: Vec<Teacher>,
    pub lessons: Vec<Lesson>,
    /// Lets lessons finish without a room or teacher.
    pub allow_unresourced: bool,
    pub score: Option<HardSoftScore>,
}

impl Timetable {
    pub fn new(term_id: TermId) -> Self {
        Self {
            term_id,
            time_slots: Vec::new(),
            rooms: Vec::new(),
            subjects: Vec::new(),
            school_classes: Vec::new(),
            teachers: Vec::new(),
            lessons: Vec::new(),
            allow_unresourced: false,
            score: None,
        }
    }

    /// Indexes of the slots lessons may be placed in.
    pub fn assignable_slots(&self) -> Vec<usize> {
        self.time_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_break)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn slot_of(&self, lesson: &Lesson) -> Option<&TimeSlot> {
        lesson.time_slot.map(|idx| &self.time_slots[idx])
    }

    pub fn slot_key_of(&self, lesson: &Lesson) -> Option<SlotKey> {
        self.slot_of(lesson).map(TimeSlot::key)
    }

    pub fn unassigned_count(&self) -> usize {
        self.lessons
            .iter()
            .filter(|l| !l.is_complete(self.allow_unresourced))
            .count()
    }

    /// Checks that every lesson index points into the fact arenas and that
    /// assigned values come from the lesson's candidate lists.
    pub fn validate(&self) -> Result<()> {
        for (pos, lesson) in self.lessons.iter().enumerate() {
            if lesson.id != pos {
                return Err(TimetableError::DomainModel(format!(
                    "lesson at position {} carries id {}",
                    pos, lesson.id
                )));
            }
            if lesson.school_class >= self.school_classes.len() {
                return Err(dangling("school class", pos, lesson.school_class));
            }
            if lesson.subject >= self.subjects.len() {
                return Err(dangling("subject", pos, lesson.subject));
            }
            if let Some(&t) = lesson
                .candidate_teachers
                .iter()
                .find(|&&t| t >= self.teachers.len())
            {
                return Err(dangling("teacher", pos, t));
            }
            if let Some(&r) = lesson
                .candidate_rooms
                .iter()
                .find(|&&r| r >= self.rooms.len())
            {
                return Err(dangling("room", pos, r));
            }
            if let Some(slot) = lesson.time_slot {
                if slot >= self.time_slots.len() {
                    return Err(dangling("time slot", pos, slot));
                }
            }
            if lesson
                .teacher
                .is_some_and(|t| !lesson.candidate_teachers.contains(&t))
            {
                return Err(TimetableError::DomainModel(format!(
                    "lesson {} is assigned a teacher outside its candidates",
                    pos
                )));
            }
            if lesson
                .room
                .is_some_and(|r| !lesson.candidate_rooms.contains(&r))
            {
                return Err(TimetableError::DomainModel(format!(
                    "lesson {} is assigned a room outside its candidates",
                    pos
                )));
            }
        }
        Ok(())
    }
}

fn dangling(kind: &str, lesson: usize, index: usize) -> TimetableError {
    TimetableError::DomainModel(format!(
        "lesson {} references unknown {} index {}",
        lesson, kind, index
    ))
}
