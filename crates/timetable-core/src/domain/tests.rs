use std::collections::{BTreeSet, HashSet};

use chrono::NaiveTime;

use super::*;

fn slot(day: u8, period: u8, is_break: bool) -> TimeSlot {
    TimeSlot {
        id: TimeSlotId::new(),
        day_of_week: day,
        period,
        start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(8, 45, 0).unwrap(),
        is_break,
    }
}

#[test]
fn test_week_pattern_overlap() {
    use WeekPattern::*;
    assert!(Every.overlaps(Every));
    assert!(Every.overlaps(A));
    assert!(B.overlaps(Every));
    assert!(A.overlaps(A));
    assert!(B.overlaps(B));
    assert!(!A.overlaps(B));
    assert!(!B.overlaps(A));
}

#[test]
fn test_week_pattern_serde() {
    assert_eq!(serde_json::to_string(&WeekPattern::Every).unwrap(), "\"EVERY\"");
    let b: WeekPattern = serde_json::from_str("\"B\"").unwrap();
    assert_eq!(b, WeekPattern::B);
    assert_eq!(WeekPattern::A.load_units() + WeekPattern::B.load_units(), 2);
}

#[test]
fn test_slot_key_display() {
    assert_eq!(SlotKey::new(2, 5).to_string(), "2-5");
    assert_eq!(slot(1, 3, false).key(), SlotKey::new(1, 3));
}

#[test]
fn test_room_suitability() {
    let general = Room {
        id: RoomId::new(),
        name: "101".into(),
        capacity: Some(30),
        suitable_subjects: HashSet::new(),
    };
    let lab = Room {
        id: RoomId::new(),
        name: "Lab".into(),
        capacity: None,
        suitable_subjects: HashSet::from([3]),
    };
    assert!(general.suits(0));
    assert!(lab.suits(3));
    assert!(!lab.suits(0));
}

#[test]
fn test_teacher_qualification() {
    let mut teacher = Teacher::new(TeacherId::new(), "Ada");
    teacher.qualifications.insert(
        0,
        Qualification {
            level: QualificationLevel::Primary,
            grades: BTreeSet::from([5, 6]),
        },
    );
    teacher.qualifications.insert(
        1,
        Qualification {
            level: QualificationLevel::Secondary,
            grades: BTreeSet::new(),
        },
    );

    assert!(teacher.is_qualified(0, 5));
    assert!(!teacher.is_qualified(0, 7));
    assert!(!teacher.is_qualified(1, 5));
    assert!(!teacher.is_qualified(2, 5));
    assert_eq!(teacher.qualification_level(1), Some(QualificationLevel::Secondary));
    assert!(QualificationLevel::Primary < QualificationLevel::Substitute);
}

#[test]
fn test_lesson_assignment() {
    let mut lesson = Lesson::new(0, 0, 0, WeekPattern::Every);
    assert_eq!(lesson.assignment(), Assignment::UNASSIGNED);
    assert!(!lesson.is_complete(true));

    lesson.set_assignment(Assignment::new(Some(2), None, None));
    assert!(lesson.is_complete(true));
    assert!(!lesson.is_complete(false));

    lesson.candidate_teachers = vec![4];
    assert!(lesson.is_teacher_pinned());
}

#[test]
fn test_timetable_assignable_slots_skip_breaks() {
    let mut tt = Timetable::new(TermId::new());
    tt.time_slots = vec![slot(0, 1, false), slot(0, 2, true), slot(0, 3, false)];
    assert_eq!(tt.assignable_slots(), vec![0, 2]);
}

#[test]
fn test_timetable_validate_dangling_index() {
    let mut tt = Timetable::new(TermId::new());
    tt.lessons.push(Lesson::new(0, 0, 0, WeekPattern::Every));
    let err = tt.validate().unwrap_err();
    assert!(err.to_string().contains("school class"));
}
