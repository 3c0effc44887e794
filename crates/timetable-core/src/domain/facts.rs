//! Problem facts: immutable inputs the solver reads but never changes.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::ids::{RoomId, SchoolClassId, SubjectId, TeacherId, TimeSlotId};

/// Day-and-period position in the week, independent of any slot id.
///
/// Teacher availability is expressed in slot keys so that it survives
/// slot catalogs being rebuilt between terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: u8,
    pub period: u8,
}

impl SlotKey {
    pub const fn new(day: u8, period: u8) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.period)
    }
}

/// A teaching period on a given weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    /// 0 = Monday through 4 = Friday.
    pub day_of_week: u8,
    /// 1-based period within the day.
    pub period: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_break: bool,
}

impl TimeSlot {
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.day_of_week, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// `None` means the room has no recorded seat limit.
    pub capacity: Option<u32>,
    /// Subjects the room is equipped for, by subject arena index.
    pub suitable_subjects: HashSet<usize>,
}

impl Room {
    /// An empty suitability set marks a general-purpose room.
    pub fn suits(&self, subject: usize) -> bool {
        self.suitable_subjects.is_empty() || self.suitable_subjects.contains(&subject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub abbreviation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolClass {
    pub id: SchoolClassId,
    pub name: String,
    pub grade: u8,
    pub student_count: u32,
    /// Designated class-teacher, by teacher arena index.
    pub class_teacher: Option<usize>,
}

/// How strongly a teacher is qualified for a subject.
///
/// Ordered best first, so sorting candidates ranks primary teachers ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualificationLevel {
    Primary,
    Secondary,
    Substitute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualification {
    pub level: QualificationLevel,
    pub grades: BTreeSet<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub max_hours_per_week: Option<u32>,
    pub blocked: HashSet<SlotKey>,
    pub preferred: HashSet<SlotKey>,
    /// Keyed by subject arena index.
    pub qualifications: HashMap<usize, Qualification>,
}

impl Teacher {
    /// A teacher with no availability rules and no qualifications.
    pub fn new(id: TeacherId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            max_hours_per_week: None,
            blocked: HashSet::new(),
            preferred: HashSet::new(),
            qualifications: HashMap::new(),
        }
    }

    /// Returns true if the teacher may teach `subject` to a class in `grade`.
    ///
    /// A qualification with an empty grade set qualifies for nothing.
    pub fn is_qualified(&self, subject: usize, grade: u8) -> bool {
        self.qualifications
            .get(&subject)
            .is_some_and(|q| q.grades.contains(&grade))
    }

    pub fn qualification_level(&self, subject: usize) -> Option<QualificationLevel> {
        self.qualifications.get(&subject).map(|q| q.level)
    }

    pub fn is_blocked(&self, key: SlotKey) -> bool {
        self.blocked.contains(&key)
    }

    pub fn prefers(&self, key: SlotKey) -> bool {
        self.preferred.contains(&key)
    }
}
