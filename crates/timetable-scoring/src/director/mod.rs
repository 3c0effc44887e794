//! Incremental score director.
//!
//! [`TimetableScoreDirector`] owns the working timetable and keeps its score
//! current. Candidate moves are scored through [`score_if`] on a shared
//! reference, so many candidates can be scored in parallel; the chosen one
//! is then committed with [`apply`].
//!
//! [`score_if`]: TimetableScoreDirector::score_if
//! [`apply`]: TimetableScoreDirector::apply

mod index;

#[cfg(test)]
mod tests;

use smallvec::SmallVec;
use thiserror::Error;
use timetable_core::{Assignment, HardSoftScore, Timetable};

use crate::constraint::{ConstraintResult, Join, LessonView};
use crate::constraint_set::ConstraintSet;
use crate::constraints::TimetableConstraints;

use index::LessonIndex;

/// One lesson moving from one assignment to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LessonChange {
    pub lesson: usize,
    pub from: Assignment,
    pub to: Assignment,
}

impl LessonChange {
    pub fn new(lesson: usize, from: Assignment, to: Assignment) -> Self {
        Self { lesson, from, to }
    }

    /// The change that undoes this one.
    pub fn reversed(&self) -> Self {
        Self {
            lesson: self.lesson,
            from: self.to,
            to: self.from,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectorError {
    #[error("change for lesson {lesson} expects {expected:?} but the lesson holds {actual:?}")]
    StaleChange {
        lesson: usize,
        expected: Assignment,
        actual: Assignment,
    },

    #[error("lesson {0} appears more than once in one move")]
    DuplicateLesson(usize),

    #[error("incremental score {cached} drifted from recalculated score {actual}")]
    ScoreDrift {
        cached: HardSoftScore,
        actual: HardSoftScore,
    },
}

pub struct TimetableScoreDirector<C = TimetableConstraints>
where
    C: ConstraintSet,
{
    working: Timetable,
    constraints: C,
    index: LessonIndex,
    score: HardSoftScore,
}

impl<C: ConstraintSet> TimetableScoreDirector<C> {
    /// Indexes the timetable and computes its score from scratch.
    pub fn new(timetable: Timetable, constraints: C) -> Self {
        let index = LessonIndex::build(&timetable);
        let score = constraints.evaluate_all(&timetable);
        Self {
            working: timetable,
            constraints,
            index,
            score,
        }
    }

    pub fn working_solution(&self) -> &Timetable {
        &self.working
    }

    pub fn constraints(&self) -> &C {
        &self.constraints
    }

    /// The cached score of the working timetable.
    pub fn score(&self) -> HardSoftScore {
        self.score
    }

    /// Score the working timetable would have after `changes`.
    ///
    /// Each change's `from` must match the lesson's current assignment and
    /// no lesson may appear twice.
    pub fn score_if(&self, changes: &[LessonChange]) -> HardSoftScore {
        self.score + self.delta(changes)
    }

    /// Score difference `changes` would cause.
    pub fn delta(&self, changes: &[LessonChange]) -> HardSoftScore {
        let tt = &self.working;
        let c = &self.constraints;
        let mut delta = HardSoftScore::ZERO;
        let is_moved = |id: usize| changes.iter().any(|ch| ch.lesson == id);

        for ch in changes {
            let lesson = &tt.lessons[ch.lesson];
            delta += c.lesson_score(tt, LessonView::with(lesson, ch.to));
            delta -= c.lesson_score(tt, LessonView::with(lesson, ch.from));
        }

        for join in Join::ALL {
            if !c.uses_join(join) {
                continue;
            }
            for (i, ch) in changes.iter().enumerate() {
                let lesson = &tt.lessons[ch.lesson];
                let old = LessonView::with(lesson, ch.from);
                let new = LessonView::with(lesson, ch.to);

                // Partners that stay where they are.
                if let Some(key) = old.bucket(join, tt) {
                    for &other in self.index.bucket(join, key) {
                        if is_moved(other) {
                            continue;
                        }
                        let other = LessonView::current(&tt.lessons[other]);
                        if old.pairs_with(&other, join, tt) {
                            delta -= c.pair_score(tt, join, old, other);
                        }
                    }
                }
                if let Some(key) = new.bucket(join, tt) {
                    for &other in self.index.bucket(join, key) {
                        if is_moved(other) {
                            continue;
                        }
                        let other = LessonView::current(&tt.lessons[other]);
                        if new.pairs_with(&other, join, tt) {
                            delta += c.pair_score(tt, join, new, other);
                        }
                    }
                }

                // Partners that move too.
                for later in &changes[i + 1..] {
                    let partner = &tt.lessons[later.lesson];
                    let partner_old = LessonView::with(partner, later.from);
                    let partner_new = LessonView::with(partner, later.to);
                    if old.pairs_with(&partner_old, join, tt) {
                        delta -= c.pair_score(tt, join, old, partner_old);
                    }
                    if new.pairs_with(&partner_new, join, tt) {
                        delta += c.pair_score(tt, join, new, partner_new);
                    }
                }
            }
        }

        if c.uses_load() {
            let mut teachers: SmallVec<[usize; 4]> = SmallVec::new();
            for ch in changes {
                for t in [ch.from.teacher, ch.to.teacher].into_iter().flatten() {
                    if !teachers.contains(&t) {
                        teachers.push(t);
                    }
                }
            }
            for t in teachers {
                let before = self.index.load(t);
                let mut after = i64::from(before);
                for ch in changes {
                    let units = i64::from(tt.lessons[ch.lesson].week_pattern.load_units());
                    if ch.from.teacher == Some(t) {
                        after -= units;
                    }
                    if ch.to.teacher == Some(t) {
                        after += units;
                    }
                }
                let after = u32::try_from(after).unwrap_or(0);
                if after != before {
                    let teacher = &tt.teachers[t];
                    delta += c.load_score(teacher, after);
                    delta -= c.load_score(teacher, before);
                }
            }
        }

        delta
    }

    /// Commits `changes` and returns the new score.
    pub fn apply(&mut self, changes: &[LessonChange]) -> Result<HardSoftScore, DirectorError> {
        for (i, ch) in changes.iter().enumerate() {
            if changes[..i].iter().any(|prev| prev.lesson == ch.lesson) {
                return Err(DirectorError::DuplicateLesson(ch.lesson));
            }
            let actual = self.working.lessons[ch.lesson].assignment();
            if actual != ch.from {
                return Err(DirectorError::StaleChange {
                    lesson: ch.lesson,
                    expected: ch.from,
                    actual,
                });
            }
        }

        let delta = self.delta(changes);
        for ch in changes {
            self.index.retract(
                &self.working,
                LessonView::current(&self.working.lessons[ch.lesson]),
            );
            self.working.lessons[ch.lesson].set_assignment(ch.to);
            self.index.insert(
                &self.working,
                LessonView::current(&self.working.lessons[ch.lesson]),
            );
        }
        self.score += delta;
        Ok(self.score)
    }

    /// Recomputes the score from scratch and compares it with the cached one.
    pub fn verify(&self) -> Result<(), DirectorError> {
        let actual = self.constraints.evaluate_all(&self.working);
        if actual == self.score {
            Ok(())
        } else {
            Err(DirectorError::ScoreDrift {
                cached: self.score,
                actual,
            })
        }
    }

    /// Per-constraint breakdown of the working timetable.
    pub fn explain(&self) -> Vec<ConstraintResult> {
        self.constraints.evaluate_each(&self.working)
    }

    /// A copy of the working timetable carrying the current score.
    pub fn clone_solution(&self) -> Timetable {
        let mut solution = self.working.clone();
        solution.score = Some(self.score);
        solution
    }

    pub fn into_solution(self) -> Timetable {
        let mut solution = self.working;
        solution.score = Some(self.score);
        solution
    }

    /// Replaces the working timetable, e.g. to restore the best one found.
    pub fn reset(&mut self, timetable: Timetable) {
        self.index = LessonIndex::build(&timetable);
        self.score = self.constraints.evaluate_all(&timetable);
        self.working = timetable;
    }
}
