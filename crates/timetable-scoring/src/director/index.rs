//! Reverse indexes from facts to the lessons currently using them.

use std::collections::HashMap;

use smallvec::SmallVec;
use timetable_core::Timetable;

use crate::constraint::{buckets, teacher_loads, Join, LessonView};

type Bucket = SmallVec<[usize; 8]>;

/// Lessons per `(key, day)` for every join, plus each teacher's load.
#[derive(Debug, Clone, Default)]
pub(crate) struct LessonIndex {
    buckets: [HashMap<(usize, u8), Bucket>; 3],
    loads: Vec<u32>,
}

impl LessonIndex {
    pub(crate) fn build(timetable: &Timetable) -> Self {
        let mut index = Self {
            loads: teacher_loads(timetable),
            ..Self::default()
        };
        for join in Join::ALL {
            index.buckets[join.index()] = buckets(timetable, join)
                .into_iter()
                .map(|(key, members)| (key, Bucket::from_vec(members)))
                .collect();
        }
        index
    }

    pub(crate) fn bucket(&self, join: Join, key: (usize, u8)) -> &[usize] {
        self.buckets[join.index()]
            .get(&key)
            .map_or(&[], |b| b.as_slice())
    }

    pub(crate) fn load(&self, teacher: usize) -> u32 {
        self.loads[teacher]
    }

    pub(crate) fn retract(&mut self, timetable: &Timetable, view: LessonView<'_>) {
        for join in Join::ALL {
            if let Some(key) = view.bucket(join, timetable) {
                let map = &mut self.buckets[join.index()];
                if let Some(bucket) = map.get_mut(&key) {
                    bucket.retain(|id| *id != view.lesson.id);
                    if bucket.is_empty() {
                        map.remove(&key);
                    }
                }
            }
        }
        if let Some(teacher) = view.assignment.teacher {
            self.loads[teacher] -= view.lesson.week_pattern.load_units();
        }
    }

    pub(crate) fn insert(&mut self, timetable: &Timetable, view: LessonView<'_>) {
        for join in Join::ALL {
            if let Some(key) = view.bucket(join, timetable) {
                self.buckets[join.index()]
                    .entry(key)
                    .or_default()
                    .push(view.lesson.id);
            }
        }
        if let Some(teacher) = view.assignment.teacher {
            self.loads[teacher] += view.lesson.week_pattern.load_units();
        }
    }
}
