//! Composite termination: stop when any child stops.

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates when ANY child terminates, reporting the first child's reason.
///
/// Wraps either a tuple of terminations or a `Vec<Box<dyn Termination>>`
/// assembled from configuration.
///
/// ```
/// use timetable_solver::{OrTermination, StepCountTermination, TimeTermination};
///
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     StepCountTermination::new(1000),
/// ));
/// # let _ = termination;
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
                None$(.or_else(|| (self.0).$idx.check(solver_scope)))+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);

impl Termination for OrTermination<Vec<Box<dyn Termination>>> {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        self.0.iter().find_map(|t| t.check(solver_scope))
    }
}
