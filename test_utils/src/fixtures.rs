//! Convenience constructors for agents, clouds and simulations used in tests.

use contrail::{Agent, Obstacle, Simulation, SimulationConfig, SteeringEngine};
use glam::DVec2;

/// Create an agent at `start` heading for `goal` with default settings.
///
/// # Examples
/// ```
/// use test_utils::fixtures::agent;
/// let a = agent((0.0, 0.0), (100.0, 0.0));
/// assert!(!a.arrived());
/// ```
#[must_use]
pub fn agent(start: (f64, f64), goal: (f64, f64)) -> Agent {
    Agent::new(
        DVec2::new(start.0, start.1),
        DVec2::new(goal.0, goal.1),
        &SimulationConfig::default(),
    )
}

/// Create clouds anchored at each of `anchors`.
#[must_use]
pub fn clouds(anchors: &[(f64, f64)]) -> Vec<Obstacle> {
    anchors
        .iter()
        .map(|&(x, y)| Obstacle::new(DVec2::new(x, y)))
        .collect()
}

/// Create a simulation with default settings.
#[must_use]
pub fn simulation(start: (f64, f64), goal: (f64, f64), anchors: &[(f64, f64)]) -> Simulation {
    Simulation::new(
        agent(start, goal),
        clouds(anchors),
        SteeringEngine::new(&SimulationConfig::default()),
    )
}
