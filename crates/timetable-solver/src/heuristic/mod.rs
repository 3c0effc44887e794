//! Heuristic components for solving
//!
//! - [`LessonMove`]: one or two lesson changes applied together
//! - Selectors: components that sample moves from the working timetable

mod lesson_move;
mod selector;

pub use lesson_move::LessonMove;
pub use selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector, UnionMoveSelector};
