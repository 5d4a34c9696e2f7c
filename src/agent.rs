//! The airplane's kinematic state.
//!
//! An [`Agent`] moves at a constant speed along its heading and freezes once
//! it comes within the arrival radius of its goal.

use glam::DVec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::vector_math::{bearing, heading_vector};

/// Mutable kinematic state of the single agent in a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    position: DVec2,
    heading: f64,
    speed: f64,
    goal: DVec2,
    arrival_radius: f64,
    arrived: bool,
}

impl Agent {
    /// Creates an agent at `start` heading straight for `goal`.
    ///
    /// Speed and arrival radius come from `config`. Construction never marks
    /// the agent as arrived; arrival is only detected after a move.
    #[must_use]
    pub fn new(start: DVec2, goal: DVec2, config: &SimulationConfig) -> Self {
        debug!("Creating agent at {start:?} bound for {goal:?}");
        Self {
            position: start,
            heading: bearing(start, goal),
            speed: config.speed,
            goal,
            arrival_radius: config.arrival_radius,
            arrived: false,
        }
    }

    /// Replaces the initial heading.
    #[must_use]
    pub const fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    /// Current location in world units.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Current direction of travel in radians; not normalised.
    #[must_use]
    pub const fn heading(&self) -> f64 {
        self.heading
    }

    /// Distance covered per tick.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Fixed target position.
    #[must_use]
    pub const fn goal(&self) -> DVec2 {
        self.goal
    }

    /// Whether the agent has reached its goal.
    #[must_use]
    pub const fn arrived(&self) -> bool {
        self.arrived
    }

    /// Remaining straight-line distance to the goal.
    #[must_use]
    pub fn distance_to_goal(&self) -> f64 {
        self.position.distance(self.goal)
    }

    /// Sets the heading for the next move. Ignored once arrived.
    pub fn set_heading(&mut self, heading: f64) {
        if !self.arrived {
            self.heading = heading;
        }
    }

    /// Integrates one tick of motion along the current heading.
    ///
    /// Does nothing once the agent has arrived. After moving, the agent is
    /// marked as arrived if it lies strictly within the arrival radius.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec2;
    /// use contrail::{Agent, SimulationConfig};
    /// let config = SimulationConfig::default();
    /// let mut agent = Agent::new(DVec2::ZERO, DVec2::new(11.0, 0.0), &config);
    /// agent.advance();
    /// assert!(agent.arrived());
    /// assert_eq!(agent.position(), DVec2::new(2.0, 0.0));
    /// ```
    pub fn advance(&mut self) {
        if self.arrived {
            return;
        }
        self.position += heading_vector(self.heading, self.speed);
        if self.distance_to_goal() < self.arrival_radius {
            self.arrived = true;
            info!("Agent arrived at {:?} near goal {:?}", self.position, self.goal);
        }
    }
}
