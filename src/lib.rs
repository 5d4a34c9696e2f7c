#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the Contrail steering simulation.
//!
//! A single airplane flies from a start point to a goal across a plane dotted
//! with static clouds. Each tick it moves along its heading and then picks a
//! new heading by sampling candidate directions and bending them away from
//! nearby cloud vertices. Drawing, windowing and input are left to callers,
//! which read [`Frame`] snapshots or the [`Agent`] directly.
pub mod agent;
pub mod config;
pub mod constants;
pub mod logging;
pub mod obstacle;
pub mod scenario;
pub mod simulation;
pub mod steering;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use agent::Agent;
pub use config::{AngleDifference, ConfigError, SimulationConfig, WorldBounds};
pub use logging::init as init_logging;
pub use obstacle::{Obstacle, CLOUD_OUTLINE};
pub use scenario::{Scenario, ScenarioError};
pub use simulation::{tick, Frame, RunOutcome, Simulation};
pub use steering::{CandidateEvaluation, SteeringDecision, SteeringEngine};
pub use vector_math::{bearing, heading_vector};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use contrail::prelude::*;
    //! ```

    pub use crate::Agent;
    pub use crate::Obstacle;
    pub use crate::Simulation;
    pub use crate::SimulationConfig;
    pub use crate::SteeringEngine;
    pub use glam::DVec2;
}
