use rand::rngs::StdRng;
use rand::SeedableRng;
use timetable_core::HardSoftScore;

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn test_hill_climbing() {
    let mut acceptor: Box<dyn Acceptor> = Box::new(HillClimbingAcceptor::new());
    let mut rng = rng();
    let last = HardSoftScore::of(-1, -5);

    assert!(acceptor.is_accepted(&last, &HardSoftScore::of(0, -50), &mut rng));
    assert!(acceptor.is_accepted(&last, &HardSoftScore::of(-1, -4), &mut rng));
    assert!(!acceptor.is_accepted(&last, &last, &mut rng));
    assert!(!acceptor.is_accepted(&last, &HardSoftScore::of(-2, 0), &mut rng));
}

#[test]
fn test_late_acceptance_history() {
    let mut acceptor = LateAcceptanceAcceptor::<HardSoftScore>::new(3);
    let mut rng = rng();
    acceptor.phase_started(&HardSoftScore::of(0, -10));

    // Worse than the last step but no worse than the score three steps ago.
    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -5), &HardSoftScore::of(0, -8), &mut rng));
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -5), &HardSoftScore::of(0, -11), &mut rng));

    for step_score in [-5, -4, -3] {
        acceptor.step_ended(&HardSoftScore::of(0, step_score));
    }
    // The oldest entry is now -5.
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -3), &HardSoftScore::of(0, -8), &mut rng));
    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -3), &HardSoftScore::of(0, -5), &mut rng));
}

#[test]
fn test_late_acceptance_zero_size_clamped() {
    let acceptor = LateAcceptanceAcceptor::<HardSoftScore>::new(0);
    assert_eq!(acceptor.size(), 1);
}

#[test]
fn test_simulated_annealing_accepts_improving_and_equal() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(0.0, 0.9);
    let mut rng = rng();
    let last = HardSoftScore::of(0, -10);
    assert!(Acceptor::<HardSoftScore>::is_accepted(
        &mut acceptor,
        &last,
        &HardSoftScore::of(0, -9),
        &mut rng
    ));
    assert!(Acceptor::<HardSoftScore>::is_accepted(
        &mut acceptor,
        &last,
        &last,
        &mut rng
    ));
    // Frozen: nothing worse gets through.
    assert!(!Acceptor::<HardSoftScore>::is_accepted(
        &mut acceptor,
        &last,
        &HardSoftScore::of(0, -11),
        &mut rng
    ));
}

#[test]
fn test_simulated_annealing_rejects_hard_losses() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(2.0, 0.99);
    let mut rng = rng();
    let last = HardSoftScore::of(0, 0);
    let worse = HardSoftScore::of(-1, 100);
    for _ in 0..1000 {
        assert!(!Acceptor::<HardSoftScore>::is_accepted(
            &mut acceptor,
            &last,
            &worse,
            &mut rng
        ));
    }
}

#[test]
fn test_simulated_annealing_sometimes_accepts_soft_losses() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(5.0, 0.99);
    let mut rng = rng();
    let last = HardSoftScore::of(0, -10);
    let worse = HardSoftScore::of(0, -11);
    let accepted = (0..1000)
        .filter(|_| Acceptor::<HardSoftScore>::is_accepted(&mut acceptor, &last, &worse, &mut rng))
        .count();
    // exp(-1/5) is about 0.82.
    assert!((700..950).contains(&accepted), "accepted {}", accepted);
}

#[test]
fn test_simulated_annealing_cools_and_restarts() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(1.0, 0.5);
    let score = HardSoftScore::ZERO;
    Acceptor::<HardSoftScore>::step_ended(&mut acceptor, &score);
    Acceptor::<HardSoftScore>::step_ended(&mut acceptor, &score);
    assert!((acceptor.temperature() - 0.25).abs() < f64::EPSILON);

    Acceptor::<HardSoftScore>::phase_started(&mut acceptor, &score);
    assert!((acceptor.temperature() - 1.0).abs() < f64::EPSILON);
}
