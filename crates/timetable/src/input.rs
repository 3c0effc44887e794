//! Read-only snapshot of everything needed to timetable one term.
//!
//! Field names follow the camelCase JSON of the surrounding school
//! administration system.

use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use timetable_core::{
    QualificationLevel, RoomId, SchoolClassId, SubjectId, TeacherId, TermId, TimeSlotId,
    WeekPattern,
};

/// The complete input for one term.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInput {
    pub term_id: TermId,
    pub time_slots: Vec<TimeSlotInput>,
    pub rooms: Vec<RoomInput>,
    pub subjects: Vec<SubjectInput>,
    pub school_classes: Vec<SchoolClassInput>,
    pub teachers: Vec<TeacherInput>,
    #[serde(default)]
    pub qualifications: Vec<TeacherQualificationInput>,
    #[serde(default)]
    pub availabilities: Vec<TeacherAvailabilityInput>,
    pub requirements: Vec<CurriculumRequirement>,
}

impl SchedulingInput {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&contents)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotInput {
    pub id: TimeSlotId,
    /// 0 = Monday through 4 = Friday.
    pub day_of_week: u8,
    pub period: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub is_break: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInput {
    pub room_id: RoomId,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Empty for a general-purpose room.
    #[serde(default)]
    pub suitable_subject_ids: Vec<SubjectId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInput {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClassInput {
    pub id: SchoolClassId,
    pub name: String,
    pub grade: u8,
    pub student_count: u32,
    #[serde(default)]
    pub class_teacher_id: Option<TeacherId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInput {
    pub id: TeacherId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherQualificationInput {
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub qualification_level: QualificationLevel,
    pub can_teach_grades: Vec<u8>,
    #[serde(default)]
    pub max_hours_per_week: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityType {
    Available,
    Preferred,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAvailabilityInput {
    pub teacher_id: TeacherId,
    /// `None` applies to every term.
    #[serde(default)]
    pub term_id: Option<TermId>,
    pub day_of_week: u8,
    pub period: u8,
    #[serde(rename = "type")]
    pub availability_type: AvailabilityType,
}

/// How many hours of a subject a class gets per week.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumRequirement {
    pub school_class_id: SchoolClassId,
    pub subject_id: SubjectId,
    pub weekly_hours: u32,
    #[serde(default)]
    pub week_pattern: WeekPattern,
    /// Restricts the teacher choice; empty leaves it to the solver.
    #[serde(default)]
    pub candidate_teacher_ids: Vec<TeacherId>,
}
