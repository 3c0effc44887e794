//! Random move sampling for local search.

use std::fmt::Debug;

use rand::rngs::StdRng;
use rand::Rng;
use timetable_config::LessonVariable;
use timetable_core::{Assignment, Lesson, Timetable};

use super::LessonMove;

/// Draws before a selector gives up on one sample.
const SAMPLE_ATTEMPTS: usize = 16;

/// Samples candidate moves from the working timetable.
pub trait MoveSelector: Send + Debug {
    /// Returns a doable move, or `None` if none was found after a few
    /// attempts. `slots` holds the assignable (non-break) slot indexes.
    fn sample(&self, timetable: &Timetable, slots: &[usize], rng: &mut StdRng)
        -> Option<LessonMove>;
}

impl<T: MoveSelector + ?Sized> MoveSelector for Box<T> {
    fn sample(
        &self,
        timetable: &Timetable,
        slots: &[usize],
        rng: &mut StdRng,
    ) -> Option<LessonMove> {
        (**self).sample(timetable, slots, rng)
    }
}

fn pick<'a, T>(rng: &mut StdRng, values: &'a [T]) -> Option<&'a T> {
    if values.is_empty() {
        None
    } else {
        Some(&values[rng.random_range(0..values.len())])
    }
}

/// Picks a value other than `current`, or `None` if there is no other.
fn pick_other(rng: &mut StdRng, values: &[usize], current: Option<usize>) -> Option<usize> {
    let others = values.iter().filter(|&&v| Some(v) != current).count();
    if others == 0 {
        return None;
    }
    values
        .iter()
        .copied()
        .filter(|&v| Some(v) != current)
        .nth(rng.random_range(0..others))
}

/// Reassigns one planning variable of one lesson.
///
/// Pinned teachers are never changed.
#[derive(Debug, Clone)]
pub struct ChangeMoveSelector {
    variables: Vec<LessonVariable>,
}

impl ChangeMoveSelector {
    /// A selector over the given variables; an empty list means all three.
    pub fn new(variables: Vec<LessonVariable>) -> Self {
        let variables = if variables.is_empty() {
            vec![
                LessonVariable::TimeSlot,
                LessonVariable::Room,
                LessonVariable::Teacher,
            ]
        } else {
            variables
        };
        Self { variables }
    }

    fn change_variable(
        lesson: &Lesson,
        variable: LessonVariable,
        slots: &[usize],
        rng: &mut StdRng,
    ) -> Option<Assignment> {
        let current = lesson.assignment();
        match variable {
            LessonVariable::TimeSlot => {
                pick_other(rng, slots, current.time_slot).map(|time_slot| Assignment {
                    time_slot: Some(time_slot),
                    ..current
                })
            }
            LessonVariable::Room => {
                pick_other(rng, &lesson.candidate_rooms, current.room).map(|room| Assignment {
                    room: Some(room),
                    ..current
                })
            }
            LessonVariable::Teacher if !lesson.is_teacher_pinned() => {
                pick_other(rng, &lesson.candidate_teachers, current.teacher).map(|teacher| {
                    Assignment {
                        teacher: Some(teacher),
                        ..current
                    }
                })
            }
            LessonVariable::Teacher => None,
        }
    }
}

impl Default for ChangeMoveSelector {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MoveSelector for ChangeMoveSelector {
    fn sample(
        &self,
        timetable: &Timetable,
        slots: &[usize],
        rng: &mut StdRng,
    ) -> Option<LessonMove> {
        for _ in 0..SAMPLE_ATTEMPTS {
            let lesson = pick(rng, &timetable.lessons)?;
            let variable = *pick(rng, &self.variables)?;
            if let Some(to) = Self::change_variable(lesson, variable, slots, rng) {
                return Some(LessonMove::change(lesson, to));
            }
        }
        None
    }
}

/// Exchanges the time slots of two placed lessons.
///
/// Rooms travel with the slot when each room is a candidate for the other
/// lesson; otherwise both lessons keep their rooms.
#[derive(Debug, Clone, Default)]
pub struct SwapMoveSelector;

impl SwapMoveSelector {
    pub fn new() -> Self {
        Self
    }
}

impl MoveSelector for SwapMoveSelector {
    fn sample(
        &self,
        timetable: &Timetable,
        _slots: &[usize],
        rng: &mut StdRng,
    ) -> Option<LessonMove> {
        let lessons = &timetable.lessons;
        if lessons.len() < 2 {
            return None;
        }
        for _ in 0..SAMPLE_ATTEMPTS {
            let a = &lessons[rng.random_range(0..lessons.len())];
            let b = &lessons[rng.random_range(0..lessons.len())];
            if a.id == b.id
                || a.time_slot.is_none()
                || b.time_slot.is_none()
                || a.time_slot == b.time_slot
            {
                continue;
            }
            let with_rooms = a.room != b.room
                && a.room.is_some_and(|r| b.candidate_rooms.contains(&r))
                && b.room.is_some_and(|r| a.candidate_rooms.contains(&r));
            return Some(LessonMove::swap(a, b, with_rooms));
        }
        None
    }
}

/// Samples from one child selector chosen uniformly at random.
#[derive(Debug, Default)]
pub struct UnionMoveSelector {
    selectors: Vec<Box<dyn MoveSelector>>,
}

impl UnionMoveSelector {
    pub fn new(selectors: Vec<Box<dyn MoveSelector>>) -> Self {
        Self { selectors }
    }

    /// Change moves over every variable plus swap moves.
    pub fn change_and_swap() -> Self {
        Self::new(vec![
            Box::new(ChangeMoveSelector::default()),
            Box::new(SwapMoveSelector::new()),
        ])
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl MoveSelector for UnionMoveSelector {
    fn sample(
        &self,
        timetable: &Timetable,
        slots: &[usize],
        rng: &mut StdRng,
    ) -> Option<LessonMove> {
        if self.selectors.is_empty() {
            return None;
        }
        let first = rng.random_range(0..self.selectors.len());
        // Fall through to the other children when the chosen one is dry.
        (0..self.selectors.len())
            .map(|offset| (first + offset) % self.selectors.len())
            .find_map(|i| self.selectors[i].sample(timetable, slots, rng))
    }
}
