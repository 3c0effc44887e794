//! Turns a solved [`Timetable`] into persisted lesson records.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use timetable_core::{
    RoomId, SchoolClassId, SubjectId, TeacherId, TermId, TimeSlotId, Timetable, WeekPattern,
};

/// One placed lesson, in the shape the lesson store keeps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    pub term_id: TermId,
    pub school_class_id: SchoolClassId,
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub time_slot_id: TimeSlotId,
    pub room_id: Option<RoomId>,
    pub week_pattern: WeekPattern,
}

/// A lesson left the solver without a value it must have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lesson {lesson} ({subject} for class {school_class}) has no {missing}")]
pub struct UnresolvedAssignmentError {
    pub lesson: usize,
    pub school_class: String,
    pub subject: String,
    pub missing: &'static str,
}

/// Converts every lesson of `timetable` into a [`LessonRecord`], ordered by
/// day, period and class name.
///
/// Fails on the first lesson without a time slot, or without a room or
/// teacher when the timetable does not allow unresourced lessons. Nothing
/// is returned in that case.
pub fn extract(timetable: &Timetable) -> Result<Vec<LessonRecord>, UnresolvedAssignmentError> {
    let mut keyed = Vec::with_capacity(timetable.lessons.len());

    for lesson in &timetable.lessons {
        let class = &timetable.school_classes[lesson.school_class];
        let unresolved = |missing| UnresolvedAssignmentError {
            lesson: lesson.id,
            school_class: class.name.clone(),
            subject: timetable.subjects[lesson.subject].name.clone(),
            missing,
        };

        let slot = timetable
            .slot_of(lesson)
            .ok_or_else(|| unresolved("time slot"))?;
        if !timetable.allow_unresourced {
            if lesson.room.is_none() {
                return Err(unresolved("room"));
            }
            if lesson.teacher.is_none() {
                return Err(unresolved("teacher"));
            }
        }

        let record = LessonRecord {
            term_id: timetable.term_id,
            school_class_id: class.id,
            subject_id: timetable.subjects[lesson.subject].id,
            teacher_id: lesson.teacher.map(|t| timetable.teachers[t].id),
            time_slot_id: slot.id,
            room_id: lesson.room.map(|r| timetable.rooms[r].id),
            week_pattern: lesson.week_pattern,
        };
        keyed.push(((slot.day_of_week, slot.period, class.name.as_str(), lesson.id), record));
    }

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

#[cfg(test)]
mod tests;
