use super::*;
use crate::assembler::assemble;
use crate::input::SchedulingInput;

fn assembled() -> Timetable {
    let input =
        SchedulingInput::from_json_str(include_str!("../../tests/data/sample_term.json")).unwrap();
    assemble(&input, false).unwrap()
}

/// Places lesson `i` in the `i`-th teaching slot, counted from the end of
/// the week so that arena order and slot order disagree.
fn place_all(timetable: &mut Timetable) {
    let slots = timetable.assignable_slots();
    for lesson in &mut timetable.lessons {
        lesson.time_slot = Some(slots[slots.len() - 1 - lesson.id]);
        lesson.room = lesson.candidate_rooms.first().copied();
    }
}

#[test]
fn test_records_ordered_by_day_period_class() {
    let mut timetable = assembled();
    place_all(&mut timetable);
    // Two lessons share the first slot; "5a" sorts before "6a".
    let last = timetable.lessons.len() - 1;
    timetable.lessons[0].time_slot = timetable.lessons[last].time_slot;

    let records = extract(&timetable).unwrap();
    assert_eq!(records.len(), timetable.lessons.len());

    let position = |record: &LessonRecord| {
        let slot = timetable
            .time_slots
            .iter()
            .find(|s| s.id == record.time_slot_id)
            .unwrap();
        (slot.day_of_week, slot.period)
    };
    for pair in records.windows(2) {
        assert!(position(&pair[0]) <= position(&pair[1]));
    }
    assert_eq!(records[0].school_class_id, timetable.school_classes[0].id);
    assert_eq!(records[1].school_class_id, timetable.school_classes[1].id);
    assert!(records.iter().all(|r| r.term_id == timetable.term_id));
    assert!(records.iter().all(|r| r.room_id.is_some() && r.teacher_id.is_some()));
}

#[test]
fn test_record_ids_resolve_to_facts() {
    let mut timetable = assembled();
    place_all(&mut timetable);
    let records = extract(&timetable).unwrap();

    let lesson = &timetable.lessons[0];
    let slot_id = timetable.time_slots[lesson.time_slot.unwrap()].id;
    let record = records.iter().find(|r| r.time_slot_id == slot_id).unwrap();
    assert_eq!(record.subject_id, timetable.subjects[lesson.subject].id);
    assert_eq!(
        record.teacher_id,
        Some(timetable.teachers[lesson.teacher.unwrap()].id)
    );
    assert_eq!(
        record.room_id,
        Some(timetable.rooms[lesson.room.unwrap()].id)
    );
    assert_eq!(record.week_pattern, lesson.week_pattern);
}

#[test]
fn test_missing_time_slot_fails() {
    let mut timetable = assembled();
    place_all(&mut timetable);
    timetable.lessons[3].time_slot = None;

    let err = extract(&timetable).unwrap_err();
    assert_eq!(err.lesson, 3);
    assert_eq!(err.missing, "time slot");
    assert_eq!(err.school_class, "5a");
}

#[test]
fn test_missing_room_depends_on_unresourced_flag() {
    let mut timetable = assembled();
    place_all(&mut timetable);
    timetable.lessons[2].room = None;

    let err = extract(&timetable).unwrap_err();
    assert_eq!(err.missing, "room");

    timetable.allow_unresourced = true;
    timetable.lessons[4].teacher = None;
    let records = extract(&timetable).unwrap();
    assert_eq!(records.iter().filter(|r| r.room_id.is_none()).count(), 1);
    assert_eq!(records.iter().filter(|r| r.teacher_id.is_none()).count(), 1);
}

#[test]
fn test_record_json_is_camel_case() {
    let mut timetable = assembled();
    place_all(&mut timetable);
    let records = extract(&timetable).unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();
    assert!(json.get("schoolClassId").is_some());
    assert!(json.get("timeSlotId").is_some());
    assert_eq!(json["weekPattern"], "EVERY");
}
