//! Local steering between clouds.
//!
//! Each tick the engine samples evenly spaced candidate headings around the
//! bearing to the goal. For every candidate it projects one step ahead, sums
//! an inverse-distance repulsion from cloud vertices near that projection,
//! and bends the candidate by that force. The candidate whose *unbent*
//! projection lands closest to the goal wins, and its *bent* heading is the
//! one applied. Obstacles therefore shape the applied heading but never
//! which candidate is selected.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use log::trace;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::agent::Agent;
use crate::config::{AngleDifference, SimulationConfig};
use crate::constants::MIN_REPULSION_DISTANCE;
use crate::obstacle::Obstacle;
use crate::vector_math::{bearing, heading_vector, vec_angle, wrapped_angle_distance};

/// Outcome of scoring a single candidate heading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CandidateEvaluation {
    /// Position of the candidate in the sampling order; `0` is the goal bearing.
    pub index: usize,
    /// Candidate heading in radians, not normalised.
    pub direction: f64,
    /// Agent position one step along `direction`, ignoring repulsion.
    pub projected: DVec2,
    /// Summed repulsion from cloud vertices near `projected`.
    pub repulsion: DVec2,
    /// Heading of the step vector plus `repulsion`.
    pub resultant_heading: f64,
    /// Distance from `projected` to the goal; the selection score.
    pub distance_to_goal: f64,
}

/// The winning candidate for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SteeringDecision {
    /// Index of the winning candidate.
    pub candidate: usize,
    /// The winning candidate's unbent direction.
    pub direction: f64,
    /// Heading to apply, bent by repulsion.
    pub heading: f64,
    /// Selection score of the winning candidate.
    pub distance_to_goal: f64,
}

impl From<&CandidateEvaluation> for SteeringDecision {
    fn from(eval: &CandidateEvaluation) -> Self {
        Self {
            candidate: eval.index,
            direction: eval.direction,
            heading: eval.resultant_heading,
            distance_to_goal: eval.distance_to_goal,
        }
    }
}

/// Chooses the agent's next heading from its state and the static clouds.
///
/// The engine holds no state between ticks; identical inputs always produce
/// identical output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringEngine {
    buffer_zone: f64,
    num_directions: usize,
    angle_difference: AngleDifference,
}

impl SteeringEngine {
    /// Creates an engine using the steering settings in `config`.
    #[must_use]
    pub const fn new(config: &SimulationConfig) -> Self {
        Self {
            buffer_zone: config.buffer_zone,
            num_directions: config.num_directions,
            angle_difference: config.angle_difference,
        }
    }

    /// Number of candidate headings sampled per tick.
    #[must_use]
    pub const fn num_directions(&self) -> usize {
        self.num_directions
    }

    /// Scores every candidate heading for `agent`.
    ///
    /// Candidates are offsets from the goal bearing, not from the agent's
    /// current heading, so they always cover the full circle. When the agent
    /// sits on its goal the goal bearing is taken as `0.0`.
    #[must_use]
    pub fn evaluate(&self, agent: &Agent, obstacles: &[Obstacle]) -> Vec<CandidateEvaluation> {
        let position = agent.position();
        let goal = agent.goal();
        let angle_to_goal = bearing(position, goal);
        let step_angle = self.step_angle();

        (0..self.num_directions)
            .map(|index| {
                let direction = index_angle(angle_to_goal, step_angle, index);
                let step = heading_vector(direction, agent.speed());
                let projected = position + step;
                let repulsion = self.repulsion(position, projected, direction, obstacles);
                CandidateEvaluation {
                    index,
                    direction,
                    projected,
                    repulsion,
                    resultant_heading: vec_angle(step + repulsion),
                    distance_to_goal: projected.distance(goal),
                }
            })
            .collect()
    }

    /// Picks the candidate whose projection lands closest to the goal.
    ///
    /// Ties go to the lowest index. Returns `None` once the agent has arrived
    /// or when no candidates are sampled.
    #[must_use]
    pub fn decide(&self, agent: &Agent, obstacles: &[Obstacle]) -> Option<SteeringDecision> {
        if agent.arrived() {
            return None;
        }
        let candidates = self.evaluate(agent, obstacles);
        // `min_by_key` keeps the first of equal minima.
        let best = candidates
            .iter()
            .min_by_key(|eval| OrderedFloat(eval.distance_to_goal))?;
        trace!(
            "Candidate {} of {} wins at distance {:.3}, heading {:.4}",
            best.index,
            candidates.len(),
            best.distance_to_goal,
            best.resultant_heading
        );
        Some(SteeringDecision::from(best))
    }

    /// Returns the heading the agent should fly next tick.
    ///
    /// Keeps the current heading when the agent has arrived or no candidate
    /// is available.
    #[must_use]
    pub fn choose_heading(&self, agent: &Agent, obstacles: &[Obstacle]) -> f64 {
        self.decide(agent, obstacles)
            .map_or(agent.heading(), |decision| decision.heading)
    }

    /// Accumulates repulsion for one candidate.
    ///
    /// Proximity is measured from the projected position, while the side of
    /// the push is decided from the bearing of the vertex to the agent's
    /// current position.
    fn repulsion(
        &self,
        position: DVec2,
        projected: DVec2,
        direction: f64,
        obstacles: &[Obstacle],
    ) -> DVec2 {
        obstacles
            .iter()
            .flat_map(Obstacle::vertices)
            .filter_map(|vertex| {
                let distance = projected.distance(vertex);
                if distance >= self.buffer_zone {
                    return None;
                }
                let vertex_bearing = vec_angle(position - vertex);
                let avoidance = if self.angle_between(vertex_bearing, direction) < FRAC_PI_2 {
                    direction + FRAC_PI_2
                } else {
                    direction - FRAC_PI_2
                };
                let magnitude = distance.max(MIN_REPULSION_DISTANCE).recip();
                Some(heading_vector(avoidance, magnitude))
            })
            .fold(DVec2::ZERO, |acc, force| acc + force)
    }

    fn angle_between(&self, vertex_bearing: f64, direction: f64) -> f64 {
        match self.angle_difference {
            AngleDifference::Literal => (vertex_bearing - direction).abs(),
            AngleDifference::Wrapped => wrapped_angle_distance(vertex_bearing, direction),
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "Direction counts are small enough to be exact in f64."
    )]
    fn step_angle(&self) -> f64 {
        TAU / self.num_directions as f64
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Candidate indices are small enough to be exact in f64."
)]
fn index_angle(base: f64, step: f64, index: usize) -> f64 {
    base + step * index as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};
    use static_assertions::const_assert;
    use std::f64::consts::PI;

    const_assert!(crate::constants::NUM_DIRECTIONS > 0);

    #[fixture]
    fn engine() -> SteeringEngine {
        SteeringEngine::new(&SimulationConfig::default())
    }

    fn agent(start: DVec2, goal: DVec2) -> Agent {
        Agent::new(start, goal, &SimulationConfig::default())
    }

    #[rstest]
    fn candidates_start_at_goal_bearing(engine: SteeringEngine) {
        let evals = engine.evaluate(&agent(DVec2::ZERO, DVec2::new(0.0, 100.0)), &[]);
        assert_eq!(evals.len(), 36);
        let first = evals.first().expect("at least one candidate");
        assert_relative_eq!(first.direction, FRAC_PI_2);
        for (k, eval) in evals.iter().enumerate() {
            assert_eq!(eval.index, k);
            assert_relative_eq!(
                eval.direction,
                FRAC_PI_2 + TAU * k as f64 / 36.0,
                epsilon = 1e-12
            );
        }
    }

    #[rstest]
    fn free_flight_picks_the_goal_bearing(engine: SteeringEngine) {
        let subject = agent(DVec2::new(10.0, 10.0), DVec2::new(110.0, 110.0));
        let decision = engine.decide(&subject, &[]).expect("a decision");
        assert_eq!(decision.candidate, 0);
        assert_relative_eq!(decision.heading, PI / 4.0, epsilon = 1e-12);
    }

    #[rstest]
    fn distant_clouds_exert_no_force(engine: SteeringEngine) {
        let subject = agent(DVec2::ZERO, DVec2::new(1000.0, 0.0));
        let far = [Obstacle::new(DVec2::new(500.0, 500.0))];
        let evals = engine.evaluate(&subject, &far);
        assert!(evals.iter().all(|eval| eval.repulsion == DVec2::ZERO));
    }

    #[rstest]
    fn repulsion_bends_heading_but_not_selection(engine: SteeringEngine) {
        let subject = agent(DVec2::ZERO, DVec2::new(1000.0, 0.0));
        // Lowest cloud vertex sits 20 units from the direct projection (2, 0).
        let cloud = [Obstacle::new(DVec2::new(-48.0, -40.0))];
        let decision = engine.decide(&subject, &cloud).expect("a decision");
        let unobstructed = engine.decide(&subject, &[]).expect("a decision");
        assert_eq!(decision.candidate, unobstructed.candidate);
        assert_eq!(decision.candidate, 0);
        assert_relative_eq!(decision.heading, -0.024_994_793_618_920_163, epsilon = 1e-9);
        assert!((decision.heading - unobstructed.heading).abs() > 1e-3);
    }

    #[rstest]
    fn coincident_vertex_yields_finite_heading(engine: SteeringEngine) {
        // The direct projection (5, 2) lands exactly on the first vertex.
        let subject = agent(DVec2::new(3.0, 2.0), DVec2::new(1000.0, 2.0));
        let cloud = [Obstacle::new(DVec2::ZERO)];
        let heading = engine.choose_heading(&subject, &cloud);
        assert!(heading.is_finite());
        assert!(heading.abs() > 1.0);
    }

    #[rstest]
    fn arrived_agent_keeps_heading(engine: SteeringEngine) {
        let mut subject = agent(DVec2::ZERO, DVec2::new(5.0, 0.0)).with_heading(0.75);
        subject.advance();
        assert!(subject.arrived());
        assert!(engine.decide(&subject, &[]).is_none());
        assert_relative_eq!(engine.choose_heading(&subject, &[]), 0.75);
    }

    #[rstest]
    fn agent_on_goal_still_samples_every_direction(engine: SteeringEngine) {
        let subject = agent(DVec2::new(5.0, 5.0), DVec2::new(5.0, 5.0));
        let evals = engine.evaluate(&subject, &[]);
        assert_eq!(evals.len(), 36);
        let first = evals.first().expect("at least one candidate");
        assert_eq!(first.direction, 0.0);
        for eval in &evals {
            assert_relative_eq!(eval.distance_to_goal, 2.0, epsilon = 1e-12);
        }
        assert!(engine.decide(&subject, &[]).is_some());
    }

    #[test]
    fn wrapped_and_literal_differ_past_half_turn() {
        // Flying west with a cloud just behind and below: the vertex bearing
        // is near -π while candidates sit near +π.
        let subject = agent(DVec2::ZERO, DVec2::new(-1000.0, 0.0));
        let cloud = [Obstacle::new(DVec2::new(0.0, 1.0))];
        let literal = SteeringEngine::new(&SimulationConfig::default());
        let wrapped = SteeringEngine::new(&SimulationConfig {
            angle_difference: AngleDifference::Wrapped,
            ..SimulationConfig::default()
        });
        let literal_heading = literal.choose_heading(&subject, &cloud);
        let wrapped_heading = wrapped.choose_heading(&subject, &cloud);
        assert_relative_eq!(literal_heading, -3.133_647_009_678_314_4, epsilon = 1e-9);
        assert_relative_eq!(wrapped_heading, -2.906_755_995_852_721_6, epsilon = 1e-9);
    }

    #[test]
    fn no_directions_keeps_current_heading() {
        let engine = SteeringEngine::new(&SimulationConfig {
            num_directions: 0,
            ..SimulationConfig::default()
        });
        let subject = agent(DVec2::ZERO, DVec2::new(100.0, 0.0)).with_heading(2.5);
        assert!(engine.evaluate(&subject, &[]).is_empty());
        assert_relative_eq!(engine.choose_heading(&subject, &[]), 2.5);
    }
}
