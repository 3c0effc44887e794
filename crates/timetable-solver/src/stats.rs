//! Counters for solver and phase progress.

use std::time::{Duration, Instant};

/// Aggregate counters across every phase of one solve.
///
/// # Example
///
/// ```
/// use timetable_solver::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_evaluations(3);
/// stats.record_accepted();
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 3);
/// assert_eq!(stats.moves_accepted, 1);
/// assert_eq!(stats.score_calculations, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    start_time: Option<Instant>,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    /// Incremental score calculations, one per evaluated candidate.
    pub score_calculations: u64,
    /// Times the best timetable was replaced.
    pub best_score_improvements: u64,
}

impl SolverStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Records a batch of scored candidate moves.
    pub fn record_evaluations(&mut self, count: usize) {
        self.moves_evaluated += count as u64;
        self.score_calculations += count as u64;
    }

    pub fn record_accepted(&mut self) {
        self.moves_accepted += 1;
    }

    pub fn record_improvement(&mut self) {
        self.best_score_improvements += 1;
    }

    pub fn moves_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.moves_evaluated as f64 / secs
        } else {
            0.0
        }
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Counters for a single phase, logged when the phase ends.
#[derive(Debug)]
pub struct PhaseStats {
    pub phase_index: usize,
    pub phase_type: &'static str,
    start_time: Instant,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
}

impl PhaseStats {
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
            start_time: Instant::now(),
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_evaluations(&mut self, count: usize) {
        self.moves_evaluated += count as u64;
    }

    pub fn record_accepted(&mut self) {
        self.moves_accepted += 1;
    }

    /// Evaluated moves per second of phase time.
    pub fn speed(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.moves_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_without_work() {
        let stats = SolverStats::default();
        assert_eq!(stats.moves_per_second(), 0.0);
        assert_eq!(stats.acceptance_rate(), 0.0);
        assert_eq!(stats.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_acceptance_rate() {
        let mut stats = SolverStats::default();
        stats.record_evaluations(8);
        stats.record_accepted();
        stats.record_accepted();
        assert!((stats.acceptance_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_phase_stats() {
        let mut stats = PhaseStats::new(1, "Local Search");
        stats.record_step();
        stats.record_evaluations(40);
        stats.record_accepted();
        assert_eq!(stats.phase_index, 1);
        assert_eq!(stats.phase_type, "Local Search");
        assert_eq!(stats.step_count, 1);
        assert_eq!(stats.moves_evaluated, 40);
        assert_eq!(stats.moves_accepted, 1);
    }
}
