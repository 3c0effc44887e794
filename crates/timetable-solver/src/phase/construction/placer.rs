use std::cmp::Reverse;

use timetable_core::{Assignment, Timetable};

use crate::heuristic::LessonMove;

/// Lessons still lacking a time slot, most constrained first: fewest
/// candidate teachers, then fewest candidate rooms, then largest class.
pub fn placement_order(timetable: &Timetable) -> Vec<usize> {
    let mut queue: Vec<usize> = timetable
        .lessons
        .iter()
        .filter(|l| l.time_slot.is_none())
        .map(|l| l.id)
        .collect();
    queue.sort_by_key(|&id| {
        let lesson = &timetable.lessons[id];
        let students = timetable.school_classes[lesson.school_class].student_count;
        (
            lesson.candidate_teachers.len(),
            lesson.candidate_rooms.len(),
            Reverse(students),
            id,
        )
    });
    queue
}

/// Every slot × room × teacher placement for one lesson.
///
/// A lesson without candidate rooms stays without a room. A pinned teacher,
/// or the current teacher when there are no candidates, is kept.
pub fn candidate_moves(timetable: &Timetable, lesson: usize, slots: &[usize]) -> Vec<LessonMove> {
    let lesson = &timetable.lessons[lesson];
    let rooms: Vec<Option<usize>> = if lesson.candidate_rooms.is_empty() {
        vec![lesson.room]
    } else {
        lesson.candidate_rooms.iter().copied().map(Some).collect()
    };
    let teachers: Vec<Option<usize>> =
        if lesson.is_teacher_pinned() || lesson.candidate_teachers.is_empty() {
            vec![lesson.teacher.or(lesson.candidate_teachers.first().copied())]
        } else {
            lesson.candidate_teachers.iter().copied().map(Some).collect()
        };

    let mut moves = Vec::with_capacity(slots.len() * rooms.len() * teachers.len());
    for &slot in slots {
        for &room in &rooms {
            for &teacher in &teachers {
                moves.push(LessonMove::change(
                    lesson,
                    Assignment::new(Some(slot), room, teacher),
                ));
            }
        }
    }
    moves
}
