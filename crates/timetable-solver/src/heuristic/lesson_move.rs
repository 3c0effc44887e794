use std::fmt;

use smallvec::SmallVec;
use timetable_core::{Assignment, Lesson, Timetable};
use timetable_scoring::LessonChange;

/// A candidate change to one or two lessons.
///
/// Moves are plain data: undoing one means applying [`LessonMove::undo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonMove {
    changes: SmallVec<[LessonChange; 2]>,
}

impl LessonMove {
    /// Reassigns `lesson` to `to`.
    pub fn change(lesson: &Lesson, to: Assignment) -> Self {
        let mut changes = SmallVec::new();
        changes.push(LessonChange::new(lesson.id, lesson.assignment(), to));
        Self { changes }
    }

    /// Exchanges the time slots of two lessons, and their rooms too when
    /// `with_rooms` is set.
    pub fn swap(a: &Lesson, b: &Lesson, with_rooms: bool) -> Self {
        let from_a = a.assignment();
        let from_b = b.assignment();
        let mut to_a = Assignment {
            time_slot: from_b.time_slot,
            ..from_a
        };
        let mut to_b = Assignment {
            time_slot: from_a.time_slot,
            ..from_b
        };
        if with_rooms {
            to_a.room = from_b.room;
            to_b.room = from_a.room;
        }

        let mut changes = SmallVec::new();
        changes.push(LessonChange::new(a.id, from_a, to_a));
        changes.push(LessonChange::new(b.id, from_b, to_b));
        Self { changes }
    }

    pub fn changes(&self) -> &[LessonChange] {
        &self.changes
    }

    pub fn lesson_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().map(|ch| ch.lesson)
    }

    /// The move that restores the state before this one.
    pub fn undo(&self) -> Self {
        Self {
            changes: self.changes.iter().map(LessonChange::reversed).collect(),
        }
    }

    /// A move is doable when it changes something and every change still
    /// starts from the lesson's current assignment.
    pub fn is_doable(&self, timetable: &Timetable) -> bool {
        !self.changes.iter().all(LessonChange::is_noop)
            && self
                .changes
                .iter()
                .all(|ch| timetable.lessons[ch.lesson].assignment() == ch.from)
    }
}

impl fmt::Display for LessonMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ch) in self.changes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "lesson {} {:?}/{:?}/{:?} -> {:?}/{:?}/{:?}",
                ch.lesson,
                ch.from.time_slot,
                ch.from.room,
                ch.from.teacher,
                ch.to.time_slot,
                ch.to.room,
                ch.to.teacher
            )?;
        }
        Ok(())
    }
}
