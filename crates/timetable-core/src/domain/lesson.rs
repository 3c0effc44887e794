use super::week_pattern::WeekPattern;

/// The three planning variables of a lesson, as arena indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Assignment {
    pub time_slot: Option<usize>,
    pub room: Option<usize>,
    pub teacher: Option<usize>,
}

impl Assignment {
    pub const UNASSIGNED: Assignment = Assignment {
        time_slot: None,
        room: None,
        teacher: None,
    };

    pub const fn new(time_slot: Option<usize>, room: Option<usize>, teacher: Option<usize>) -> Self {
        Self {
            time_slot,
            room,
            teacher,
        }
    }
}

/// One scheduled hour of a subject for a school class.
///
/// The class, subject and week pattern are fixed by the curriculum. The
/// solver chooses the time slot, the room among `candidate_rooms`, and the
/// teacher among `candidate_teachers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    /// Position of this lesson in the timetable's lesson arena.
    pub id: usize,
    pub school_class: usize,
    pub subject: usize,
    pub week_pattern: WeekPattern,
    /// Qualified teachers, best ranked first.
    pub candidate_teachers: Vec<usize>,
    pub candidate_rooms: Vec<usize>,
    pub time_slot: Option<usize>,
    pub room: Option<usize>,
    pub teacher: Option<usize>,
}

impl Lesson {
    pub fn new(id: usize, school_class: usize, subject: usize, week_pattern: WeekPattern) -> Self {
        Self {
            id,
            school_class,
            subject,
            week_pattern,
            candidate_teachers: Vec::new(),
            candidate_rooms: Vec::new(),
            time_slot: None,
            room: None,
            teacher: None,
        }
    }

    pub fn assignment(&self) -> Assignment {
        Assignment::new(self.time_slot, self.room, self.teacher)
    }

    pub fn set_assignment(&mut self, assignment: Assignment) {
        self.time_slot = assignment.time_slot;
        self.room = assignment.room;
        self.teacher = assignment.teacher;
    }

    /// A single candidate leaves the solver nothing to choose.
    pub fn is_teacher_pinned(&self) -> bool {
        self.candidate_teachers.len() == 1
    }

    /// Returns true if the lesson has every variable it needs to be published.
    pub fn is_complete(&self, allow_unresourced: bool) -> bool {
        self.time_slot.is_some()
            && (allow_unresourced || (self.room.is_some() && self.teacher.is_some()))
    }
}
