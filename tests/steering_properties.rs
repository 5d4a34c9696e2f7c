//! Behavioural properties of the steering core.
//!
//! Covers arrival, determinism, straight-line convergence, repulsion and the
//! immutability of clouds across whole runs.

use approx::assert_relative_eq;
use contrail::{tick, RunOutcome, SimulationConfig, SteeringEngine};
use glam::DVec2;
use rstest::{fixture, rstest};
use test_utils::assert_heading_near;
use test_utils::fixtures::{agent, clouds, simulation};

#[fixture]
fn engine() -> SteeringEngine {
    SteeringEngine::new(&SimulationConfig::default())
}

#[rstest]
#[case::east((0.0, 0.0), (100.0, 0.0))]
#[case::diagonal((37.0, 420.0), (900.0, 80.0))]
#[case::westward((1150.0, 600.0), (50.0, 120.0))]
fn free_flight_closes_distance_every_tick(
    engine: SteeringEngine,
    #[case] start: (f64, f64),
    #[case] goal: (f64, f64),
) {
    let mut current = agent(start, goal);
    let mut last_distance = current.distance_to_goal();
    for _ in 0..2_000 {
        current = tick(&current, &[], &engine);
        let distance = current.distance_to_goal();
        assert!(
            distance < last_distance,
            "distance grew from {last_distance} to {distance}"
        );
        last_distance = distance;
        if current.arrived() {
            break;
        }
    }
    assert!(current.arrived());
    assert!(current.distance_to_goal() < 10.0);
}

#[rstest]
fn arrived_agent_is_a_fixed_point(engine: SteeringEngine) {
    let cloud = clouds(&[(40.0, -30.0)]);
    let mut current = agent((0.0, 0.0), (60.0, 0.0));
    for _ in 0..1_000 {
        if current.arrived() {
            break;
        }
        current = tick(&current, &cloud, &engine);
    }
    assert!(current.arrived());
    let once = tick(&current, &cloud, &engine);
    let twice = tick(&once, &cloud, &engine);
    assert_eq!(once, current);
    assert_eq!(twice, once);
}

#[rstest]
fn heading_choice_is_deterministic(engine: SteeringEngine) {
    let cloud = clouds(&[(20.0, -5.0), (60.0, 30.0), (-10.0, 12.0)]);
    let subject = agent((10.0, 10.0), (400.0, 30.0));
    let first = engine.choose_heading(&subject, &cloud);
    for _ in 0..10 {
        assert_eq!(engine.choose_heading(&subject, &cloud).to_bits(), first.to_bits());
    }
    assert_eq!(engine.evaluate(&subject, &cloud), engine.evaluate(&subject, &cloud));
}

#[rstest]
fn straight_line_convergence(engine: SteeringEngine) {
    let mut current = agent((0.0, 0.0), (100.0, 0.0));
    let mut ticks = 0;
    while !current.arrived() {
        current = tick(&current, &[], &engine);
        ticks += 1;
        assert_heading_near(current.heading(), 0.0, 1e-9);
        assert!(ticks <= 51, "no arrival within 51 ticks");
    }
    assert_eq!(ticks, 46);
    assert_relative_eq!(current.position().y, 0.0, epsilon = 1e-9);
}

#[rstest]
fn nearby_vertex_bends_heading_without_changing_winner(engine: SteeringEngine) {
    let subject = agent((0.0, 0.0), (1000.0, 0.0));
    let cloud = clouds(&[(-48.0, -40.0)]);

    let evaluations = engine.evaluate(&subject, &cloud);
    let direct = evaluations.first().expect("direct candidate");
    assert_ne!(direct.repulsion, DVec2::ZERO);

    let decision = engine.decide(&subject, &cloud).expect("decision");
    let best_unobstructed = evaluations
        .iter()
        .map(|eval| eval.distance_to_goal)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(decision.candidate, 0);
    assert_relative_eq!(decision.distance_to_goal, best_unobstructed);
    assert!(decision.heading.abs() > 1e-3);
}

#[rstest]
fn coincident_goal_still_samples_full_circle(engine: SteeringEngine) {
    let subject = agent((250.0, 250.0), (250.0, 250.0));
    assert_eq!(engine.evaluate(&subject, &[]).len(), 36);
}

#[test]
fn clouds_never_move() {
    let anchors = [(120.0, 80.0), (300.0, 160.0), (500.0, 40.0), (700.0, 120.0)];
    let mut sim = simulation((0.0, 100.0), (900.0, 100.0), &anchors);
    let before = sim.obstacles().to_vec();
    let outcome = sim.run(1_500);
    assert!(outcome.ticks() > 0);
    assert_eq!(sim.obstacles(), before.as_slice());
    assert_eq!(sim.obstacles(), clouds(&anchors).as_slice());
}

#[test]
fn long_crossing_arrives_on_schedule() {
    let mut sim = simulation((50.0, 300.0), (1150.0, 450.0), &[]);
    let outcome = sim.run(600);
    match outcome {
        RunOutcome::Arrived { ticks } => assert!(ticks <= 551, "arrived after {ticks} ticks"),
        RunOutcome::Exhausted { ticks } => panic!("no arrival after {ticks} ticks"),
    }
    assert!(sim.agent().position().distance(DVec2::new(1150.0, 450.0)) < 10.0);
}
