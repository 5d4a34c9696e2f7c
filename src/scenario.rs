//! Random scenario setup.
//!
//! A scenario places the start and goal on opposite vertical edges of the
//! world, scatters clouds uniformly inside the margins and picks a random
//! initial heading. Generation is driven by a caller-supplied RNG so a seed
//! reproduces the same run.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use glam::DVec2;
use log::{debug, info};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::agent::Agent;
use crate::config::{SimulationConfig, WorldBounds};
use crate::constants::MAX_GOAL_DRAWS;
use crate::obstacle::Obstacle;

/// Reasons a scenario cannot be generated or flown.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScenarioError {
    /// Start and goal coincide, so there is nowhere to fly.
    #[error("start and goal coincide at {0:?}")]
    StartIsGoal(DVec2),
    /// A coordinate is NaN or infinite.
    #[error("scenario contains a non-finite {what}")]
    NonFinite {
        /// Which value was malformed.
        what: &'static str,
    },
    /// No goal far enough from the start was drawn.
    #[error("no goal further than {min_separation} from the start after {attempts} draws")]
    SeparationUnreachable {
        /// Required separation.
        min_separation: f64,
        /// Draws attempted.
        attempts: u32,
    },
    /// The margins leave no whole-unit coordinates to draw from.
    #[error("no placement coordinates between {low} and {high}")]
    EmptyPlacementRange {
        /// Lower bound after the margin.
        low: f64,
        /// Upper bound after the margin.
        high: f64,
    },
}

/// Start, goal and clouds for one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scenario {
    /// Where the agent takes off.
    pub start: DVec2,
    /// Where the agent is headed.
    pub goal: DVec2,
    /// Heading for the first tick.
    pub initial_heading: f64,
    /// Static clouds.
    pub obstacles: Vec<Obstacle>,
    /// World extent the scenario was generated in.
    pub bounds: WorldBounds,
}

impl Scenario {
    /// Draws a scenario from `rng` using the placement settings in `config`.
    ///
    /// Coordinates are whole world units. The goal's y coordinate is redrawn
    /// until the goal lies strictly further than `config.min_separation`
    /// from the start.
    ///
    /// # Errors
    /// Returns [`ScenarioError::EmptyPlacementRange`] when the margins leave
    /// no room and [`ScenarioError::SeparationUnreachable`] when no distant
    /// enough goal turns up.
    pub fn generate<R: Rng>(
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<Self, ScenarioError> {
        let bounds = config.bounds;
        let xs = placement_range(config.edge_margin, bounds.width)?;
        let ys = placement_range(config.edge_margin, bounds.height)?;
        let (left, right) = (*xs.start(), *xs.end());

        let start_x = if rng.gen_bool(0.5) { left } else { right };
        let goal_x = if start_x == left { right } else { left };
        let start = DVec2::new(to_coord(start_x), to_coord(rng.gen_range(ys.clone())));

        let mut attempts = 0;
        let goal = loop {
            if attempts == MAX_GOAL_DRAWS {
                return Err(ScenarioError::SeparationUnreachable {
                    min_separation: config.min_separation,
                    attempts,
                });
            }
            attempts += 1;
            let candidate = DVec2::new(to_coord(goal_x), to_coord(rng.gen_range(ys.clone())));
            if start.distance(candidate) > config.min_separation {
                break candidate;
            }
        };

        let obstacles = (0..config.obstacle_count)
            .map(|_| {
                Obstacle::new(DVec2::new(
                    to_coord(rng.gen_range(xs.clone())),
                    to_coord(rng.gen_range(ys.clone())),
                ))
            })
            .collect();
        let initial_heading = rng.gen_range(0.0..TAU);

        info!("Source: ({}, {})", start.x, start.y);
        info!("Destination: ({}, {})", goal.x, goal.y);
        debug!("Placed {} clouds after {attempts} goal draws", config.obstacle_count);

        Ok(Self {
            start,
            goal,
            initial_heading,
            obstacles,
            bounds,
        })
    }

    /// Rejects scenarios the steering core cannot fly.
    ///
    /// # Errors
    /// Returns [`ScenarioError::NonFinite`] for NaN or infinite values and
    /// [`ScenarioError::StartIsGoal`] when start and goal coincide.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !self.start.is_finite() {
            return Err(ScenarioError::NonFinite { what: "start" });
        }
        if !self.goal.is_finite() {
            return Err(ScenarioError::NonFinite { what: "goal" });
        }
        if !self.initial_heading.is_finite() {
            return Err(ScenarioError::NonFinite {
                what: "initial heading",
            });
        }
        if self.obstacles.iter().any(|cloud| !cloud.anchor().is_finite()) {
            return Err(ScenarioError::NonFinite {
                what: "obstacle anchor",
            });
        }
        if self.start == self.goal {
            return Err(ScenarioError::StartIsGoal(self.start));
        }
        Ok(())
    }

    /// Builds the agent for this scenario after validating it.
    ///
    /// # Errors
    /// As for [`Scenario::validate`].
    pub fn agent(&self, config: &SimulationConfig) -> Result<Agent, ScenarioError> {
        self.validate()?;
        Ok(Agent::new(self.start, self.goal, config).with_heading(self.initial_heading))
    }
}

/// Whole-unit coordinates inside `[margin, extent - margin]`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "World extents are validated finite and far below i64 limits."
)]
fn placement_range(margin: f64, extent: f64) -> Result<RangeInclusive<i64>, ScenarioError> {
    let low = margin.ceil();
    let high = (extent - margin).floor();
    if !(low.is_finite() && high.is_finite()) || low > high {
        return Err(ScenarioError::EmptyPlacementRange {
            low: margin,
            high: extent - margin,
        });
    }
    Ok(low as i64..=high as i64)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Placement coordinates are small whole numbers."
)]
const fn to_coord(value: i64) -> f64 {
    value as f64
}
