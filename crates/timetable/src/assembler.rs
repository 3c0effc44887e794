//! Builds a [`Timetable`] planning problem from a [`SchedulingInput`].

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use thiserror::Error;
use timetable_core::{
    Lesson, Qualification, Room, SchoolClass, SlotKey, Subject, Teacher, TimeSlot, Timetable,
    WeekPattern,
};
use tracing::debug;

use crate::input::{AvailabilityType, SchedulingInput};

/// The input cannot produce a solvable timetable.
///
/// Raised before any search starts and never worth retrying with the same
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemAssemblyError {
    #[error("unknown {kind} {id}")]
    UnknownReference { kind: &'static str, id: String },

    #[error("no teacher is qualified to teach {subject} to class {school_class}")]
    NoQualifiedTeacher {
        school_class: String,
        subject: String,
    },

    #[error("no room is suitable for {subject}")]
    NoSuitableRoom { subject: String },

    #[error(
        "class {school_class} needs {required} slots but only {available} teaching slots exist"
    )]
    InsufficientSlots {
        school_class: String,
        required: usize,
        available: usize,
    },
}

/// Maps external ids to arena positions.
struct Arena<K>(HashMap<K, usize>);

impl<K: Copy + Eq + Hash + ToString> Arena<K> {
    fn new(ids: impl Iterator<Item = K>) -> Self {
        Self(ids.enumerate().map(|(idx, id)| (id, idx)).collect())
    }

    fn resolve(&self, kind: &'static str, id: K) -> Result<usize, ProblemAssemblyError> {
        self.0
            .get(&id)
            .copied()
            .ok_or_else(|| ProblemAssemblyError::UnknownReference {
                kind,
                id: id.to_string(),
            })
    }
}

/// Assembles the planning problem for `input.term_id`.
///
/// One lesson is created per required weekly hour. Each lesson's teacher is
/// seeded with its best-ranked candidate; time slot and room stay open for
/// the construction phase. `input` is only read.
pub fn assemble(
    input: &SchedulingInput,
    allow_unresourced: bool,
) -> Result<Timetable, ProblemAssemblyError> {
    let subject_idx = Arena::new(input.subjects.iter().map(|s| s.id));
    let teacher_idx = Arena::new(input.teachers.iter().map(|t| t.id));
    let class_idx = Arena::new(input.school_classes.iter().map(|c| c.id));

    let mut timetable = Timetable::new(input.term_id);
    timetable.allow_unresourced = allow_unresourced;

    timetable.time_slots = input
        .time_slots
        .iter()
        .map(|slot| TimeSlot {
            id: slot.id,
            day_of_week: slot.day_of_week,
            period: slot.period,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_break: slot.is_break,
        })
        .collect();

    timetable.subjects = input
        .subjects
        .iter()
        .map(|s| Subject {
            id: s.id,
            name: s.name.clone(),
            abbreviation: s.abbreviation.clone(),
        })
        .collect();

    for room in &input.rooms {
        let suitable_subjects = room
            .suitable_subject_ids
            .iter()
            .map(|&id| subject_idx.resolve("subject", id))
            .collect::<Result<_, _>>()?;
        timetable.rooms.push(Room {
            id: room.room_id,
            name: room.name.clone(),
            capacity: room.capacity,
            suitable_subjects,
        });
    }

    for class in &input.school_classes {
        let class_teacher = class
            .class_teacher_id
            .map(|id| teacher_idx.resolve("teacher", id))
            .transpose()?;
        timetable.school_classes.push(SchoolClass {
            id: class.id,
            name: class.name.clone(),
            grade: class.grade,
            student_count: class.student_count,
            class_teacher,
        });
    }

    timetable.teachers = input
        .teachers
        .iter()
        .map(|t| Teacher::new(t.id, t.name.clone()))
        .collect();

    for record in &input.qualifications {
        let teacher = teacher_idx.resolve("teacher", record.teacher_id)?;
        let subject = subject_idx.resolve("subject", record.subject_id)?;
        let teacher = &mut timetable.teachers[teacher];

        let qualification = teacher
            .qualifications
            .entry(subject)
            .or_insert_with(|| Qualification {
                level: record.qualification_level,
                grades: BTreeSet::new(),
            });
        qualification.level = qualification.level.min(record.qualification_level);
        qualification
            .grades
            .extend(record.can_teach_grades.iter().copied());

        if let Some(hours) = record.max_hours_per_week {
            teacher.max_hours_per_week =
                Some(teacher.max_hours_per_week.map_or(hours, |h| h.min(hours)));
        }
    }

    for record in &input.availabilities {
        if record.term_id.is_some_and(|term| term != input.term_id) {
            continue;
        }
        let teacher = &mut timetable.teachers[teacher_idx.resolve("teacher", record.teacher_id)?];
        let key = SlotKey::new(record.day_of_week, record.period);
        match record.availability_type {
            AvailabilityType::Blocked => {
                teacher.blocked.insert(key);
            }
            AvailabilityType::Preferred => {
                teacher.preferred.insert(key);
            }
            AvailabilityType::Available => {}
        }
    }

    for requirement in &input.requirements {
        let school_class = class_idx.resolve("school class", requirement.school_class_id)?;
        let subject = subject_idx.resolve("subject", requirement.subject_id)?;
        let grade = timetable.school_classes[school_class].grade;

        let pool = if requirement.candidate_teacher_ids.is_empty() {
            (0..timetable.teachers.len()).collect()
        } else {
            requirement
                .candidate_teacher_ids
                .iter()
                .map(|&id| teacher_idx.resolve("teacher", id))
                .collect::<Result<Vec<_>, _>>()?
        };
        let mut seen = HashSet::new();
        let mut candidate_teachers: Vec<usize> = pool
            .into_iter()
            .filter(|&t| seen.insert(t) && timetable.teachers[t].is_qualified(subject, grade))
            .collect();
        // Stable, so equally qualified teachers keep their input order.
        candidate_teachers.sort_by_key(|&t| timetable.teachers[t].qualification_level(subject));
        if candidate_teachers.is_empty() {
            return Err(ProblemAssemblyError::NoQualifiedTeacher {
                school_class: timetable.school_classes[school_class].name.clone(),
                subject: timetable.subjects[subject].name.clone(),
            });
        }

        let candidate_rooms: Vec<usize> = timetable
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.suits(subject))
            .map(|(idx, _)| idx)
            .collect();
        if candidate_rooms.is_empty() && !allow_unresourced {
            return Err(ProblemAssemblyError::NoSuitableRoom {
                subject: timetable.subjects[subject].name.clone(),
            });
        }

        for _ in 0..requirement.weekly_hours {
            let mut lesson = Lesson::new(
                timetable.lessons.len(),
                school_class,
                subject,
                requirement.week_pattern,
            );
            lesson.candidate_teachers = candidate_teachers.clone();
            lesson.candidate_rooms = candidate_rooms.clone();
            lesson.teacher = candidate_teachers.first().copied();
            timetable.lessons.push(lesson);
        }
    }

    check_slot_supply(&timetable)?;

    debug!(
        event = "problem_assembled",
        term_id = %timetable.term_id,
        lessons = timetable.lessons.len(),
        teachers = timetable.teachers.len(),
        rooms = timetable.rooms.len(),
        slots = timetable.assignable_slots().len(),
    );
    Ok(timetable)
}

/// A class cannot hold more weekly lessons than there are teaching slots.
/// `A` and `B` lessons may pair up in one slot.
fn check_slot_supply(timetable: &Timetable) -> Result<(), ProblemAssemblyError> {
    let available = timetable.assignable_slots().len();
    // (every, a, b) per class
    let mut counts = vec![(0usize, 0usize, 0usize); timetable.school_classes.len()];
    for lesson in &timetable.lessons {
        let entry = &mut counts[lesson.school_class];
        match lesson.week_pattern {
            WeekPattern::Every => entry.0 += 1,
            WeekPattern::A => entry.1 += 1,
            WeekPattern::B => entry.2 += 1,
        }
    }

    for (class, (every, a, b)) in counts.into_iter().enumerate() {
        let required = every + a.max(b);
        if required > available {
            return Err(ProblemAssemblyError::InsufficientSlots {
                school_class: timetable.school_classes[class].name.clone(),
                required,
                available,
            });
        }
    }
    Ok(())
}
