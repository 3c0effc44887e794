//! A small two-class school that has at least one conflict-free timetable.
//!
//! Lessons are unplaced; each carries its qualified teachers (best first)
//! with the top-ranked one pre-assigned, the way the problem assembler
//! seeds them.

use timetable_core::{QualificationLevel, Timetable, WeekPattern};

use crate::builder::TimetableBuilder;

/// Indexes into the sample school's arenas.
pub struct SampleSchool {
    pub timetable: Timetable,
    pub ada: usize,
    pub grace: usize,
    pub alan: usize,
    pub marie: usize,
    pub class_5a: usize,
    pub class_6a: usize,
    pub physics_lab: usize,
}

pub fn sample_school() -> SampleSchool {
    let mut b = TimetableBuilder::new(5, 6);

    let math = b.subject("Mathematics", "MA");
    let german = b.subject("German", "DE");
    let english = b.subject("English", "EN");
    let physics = b.subject("Physics", "PH");

    let class_5a = b.school_class("5a", 5, 24);
    let class_6a = b.school_class("6a", 6, 28);

    let ada = b.teacher("Ada");
    let grace = b.teacher("Grace");
    let alan = b.teacher("Alan");
    let marie = b.teacher("Marie");
    b.qualify(ada, math, QualificationLevel::Primary, &[5, 6])
        .qualify(ada, physics, QualificationLevel::Secondary, &[6])
        .qualify(grace, german, QualificationLevel::Primary, &[5, 6])
        .qualify(alan, english, QualificationLevel::Primary, &[5, 6])
        .qualify(alan, math, QualificationLevel::Secondary, &[5])
        .qualify(marie, physics, QualificationLevel::Primary, &[6])
        .max_hours(ada, 20)
        .block(grace, 0, 1)
        .block(grace, 0, 2)
        .prefer(alan, 1, 2)
        .prefer(alan, 3, 2)
        .class_teacher(class_5a, grace);

    b.room("101", Some(30));
    b.room("102", Some(30));
    let physics_lab = b.room("Physics Lab", Some(30));
    b.suit(physics_lab, &[physics]);

    let curriculum: [(usize, usize, WeekPattern, u8, &[usize]); 9] = [
        (class_5a, math, WeekPattern::Every, 4, &[ada, alan]),
        (class_5a, german, WeekPattern::Every, 4, &[grace]),
        (class_5a, english, WeekPattern::Every, 3, &[alan]),
        (class_5a, english, WeekPattern::B, 1, &[alan]),
        (class_6a, math, WeekPattern::Every, 4, &[ada]),
        (class_6a, german, WeekPattern::Every, 3, &[grace]),
        (class_6a, english, WeekPattern::Every, 3, &[alan]),
        (class_6a, physics, WeekPattern::Every, 2, &[marie, ada]),
        (class_6a, physics, WeekPattern::A, 1, &[marie, ada]),
    ];
    for (class, subject, pattern, hours, teachers) in curriculum {
        for _ in 0..hours {
            let lesson = b.lesson(class, subject, pattern);
            b.candidate_teachers(lesson, teachers)
                .assign_teacher(lesson, teachers[0]);
        }
    }

    SampleSchool {
        timetable: b.build(),
        ada,
        grace,
        alan,
        marie,
        class_5a,
        class_6a,
        physics_lab,
    }
}
