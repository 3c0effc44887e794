//! Simulated annealing acceptor.

use rand::rngs::StdRng;
use rand::Rng;
use timetable_core::Score;

use super::Acceptor;

/// Accepts improving moves always and worsening moves with probability
/// `exp(-delta / T)`, where `delta` is the loss measured by
/// [`Score::to_scalar`] and `T` decays by `cooling_rate` after every step.
///
/// A hard-level loss is a million times a soft one on the scalar scale, so
/// at moderate temperatures only soft losses get through.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    cooling_rate: f64,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(starting_temperature: f64, cooling_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            cooling_rate,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.current_temperature
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(1.0, 0.999)
    }
}

impl<Sc: Score> Acceptor<Sc> for SimulatedAnnealingAcceptor {
    fn is_accepted(&mut self, last_step_score: &Sc, move_score: &Sc, rng: &mut StdRng) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        if self.current_temperature <= 0.0 {
            return false;
        }
        let delta = last_step_score.to_scalar() - move_score.to_scalar();
        let probability = (-delta / self.current_temperature).exp();
        rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &Sc) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &Sc) {
        self.current_temperature *= self.cooling_rate;
    }
}
