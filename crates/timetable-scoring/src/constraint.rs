//! The constraint trait and the lesson views constraints are judged on.

use std::collections::HashMap;

use timetable_core::{Assignment, HardSoftScore, Lesson, Teacher, TimeSlot, Timetable};

/// The fact a pairwise constraint matches lessons on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Join {
    Teacher,
    Room,
    SchoolClass,
}

impl Join {
    pub const ALL: [Join; 3] = [Join::Teacher, Join::Room, Join::SchoolClass];

    pub(crate) const fn index(self) -> usize {
        match self {
            Join::Teacher => 0,
            Join::Room => 1,
            Join::SchoolClass => 2,
        }
    }
}

/// What a constraint iterates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// One lesson at a time.
    Unary,
    /// Pairs of same-day lessons with overlapping week patterns that share
    /// the joined fact.
    Pair(Join),
    /// Each teacher's weekly load.
    TeacherLoad,
}

/// A lesson seen with a particular assignment.
///
/// Lets the score director ask "what if" questions without mutating the
/// lesson: the assignment may differ from the lesson's stored one.
#[derive(Debug, Clone, Copy)]
pub struct LessonView<'a> {
    pub lesson: &'a Lesson,
    pub assignment: Assignment,
}

impl<'a> LessonView<'a> {
    pub fn current(lesson: &'a Lesson) -> Self {
        Self {
            lesson,
            assignment: lesson.assignment(),
        }
    }

    pub fn with(lesson: &'a Lesson, assignment: Assignment) -> Self {
        Self { lesson, assignment }
    }

    pub fn slot<'t>(&self, timetable: &'t Timetable) -> Option<&'t TimeSlot> {
        self.assignment
            .time_slot
            .map(|idx| &timetable.time_slots[idx])
    }

    pub fn day(&self, timetable: &Timetable) -> Option<u8> {
        self.slot(timetable).map(|s| s.day_of_week)
    }

    /// The joined fact's arena index, if assigned.
    pub fn key(&self, join: Join) -> Option<usize> {
        match join {
            Join::Teacher => self.assignment.teacher,
            Join::Room => self.assignment.room,
            Join::SchoolClass => Some(self.lesson.school_class),
        }
    }

    /// The `(key, day)` bucket this view falls in for `join`.
    pub fn bucket(&self, join: Join, timetable: &Timetable) -> Option<(usize, u8)> {
        Some((self.key(join)?, self.day(timetable)?))
    }

    /// Returns true if the two views form a candidate pair for `join`.
    pub fn pairs_with(&self, other: &LessonView<'_>, join: Join, timetable: &Timetable) -> bool {
        self.lesson.id != other.lesson.id
            && self.lesson.week_pattern.overlaps(other.lesson.week_pattern)
            && matches!(
                (self.bucket(join, timetable), other.bucket(join, timetable)),
                (Some(a), Some(b)) if a == b
            )
    }
}

/// A single timetabling rule.
///
/// A constraint reports match multiplicities; the score impact is the
/// multiplicity times [`weight`](Self::weight). Only the hook matching
/// [`kind`](Self::kind) is ever called.
pub trait TimetableConstraint: Send + Sync {
    fn name(&self) -> &str;

    fn is_hard(&self) -> bool;

    /// Score per match. Penalties are negative, rewards positive.
    fn weight(&self) -> HardSoftScore;

    fn kind(&self) -> ConstraintKind;

    fn lesson_matches(&self, _timetable: &Timetable, _lesson: LessonView<'_>) -> i64 {
        0
    }

    /// Called only for views where `a.pairs_with(&b, join)` holds.
    fn pair_matches(&self, _timetable: &Timetable, _a: LessonView<'_>, _b: LessonView<'_>) -> i64 {
        0
    }

    /// `units` is the teacher's load in half hours ([`WeekPattern::load_units`]).
    ///
    /// [`WeekPattern::load_units`]: timetable_core::WeekPattern::load_units
    fn load_matches(&self, _teacher: &Teacher, _units: u32) -> i64 {
        0
    }

    fn impact(&self, matches: i64) -> HardSoftScore {
        let w = self.weight();
        HardSoftScore::of(w.hard() * matches, w.soft() * matches)
    }

    /// Full evaluation over the timetable's current assignments.
    fn evaluate(&self, timetable: &Timetable) -> HardSoftScore {
        self.impact(scan(self, timetable).0)
    }

    /// Number of lessons, pairs or teachers with a non-zero match.
    fn match_count(&self, timetable: &Timetable) -> usize {
        scan(self, timetable).1
    }
}

/// Result of evaluating a single constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintResult {
    pub name: String,
    pub score: HardSoftScore,
    pub match_count: usize,
    pub is_hard: bool,
}

/// Groups lessons by the `(key, day)` bucket of their current assignment.
pub(crate) fn buckets(timetable: &Timetable, join: Join) -> HashMap<(usize, u8), Vec<usize>> {
    let mut map: HashMap<(usize, u8), Vec<usize>> = HashMap::new();
    for lesson in &timetable.lessons {
        if let Some(bucket) = LessonView::current(lesson).bucket(join, timetable) {
            map.entry(bucket).or_default().push(lesson.id);
        }
    }
    map
}

/// Weekly load in half hours per teacher arena index.
pub(crate) fn teacher_loads(timetable: &Timetable) -> Vec<u32> {
    let mut loads = vec![0; timetable.teachers.len()];
    for lesson in &timetable.lessons {
        if let Some(teacher) = lesson.teacher {
            loads[teacher] += lesson.week_pattern.load_units();
        }
    }
    loads
}

/// Returns `(total multiplicity, non-zero match count)`.
fn scan<C: TimetableConstraint + ?Sized>(constraint: &C, timetable: &Timetable) -> (i64, usize) {
    let mut total = 0;
    let mut count = 0;
    let mut record = |m: i64| {
        if m != 0 {
            total += m;
            count += 1;
        }
    };

    match constraint.kind() {
        ConstraintKind::Unary => {
            for lesson in &timetable.lessons {
                record(constraint.lesson_matches(timetable, LessonView::current(lesson)));
            }
        }
        ConstraintKind::Pair(join) => {
            for members in buckets(timetable, join).values() {
                for (i, &a) in members.iter().enumerate() {
                    let a = LessonView::current(&timetable.lessons[a]);
                    for &b in &members[i + 1..] {
                        let b = LessonView::current(&timetable.lessons[b]);
                        if a.lesson.week_pattern.overlaps(b.lesson.week_pattern) {
                            record(constraint.pair_matches(timetable, a, b));
                        }
                    }
                }
            }
        }
        ConstraintKind::TeacherLoad => {
            for (teacher, units) in timetable.teachers.iter().zip(teacher_loads(timetable)) {
                record(constraint.load_matches(teacher, units));
            }
        }
    }
    (total, count)
}
