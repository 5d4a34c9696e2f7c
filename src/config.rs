//! Runtime configuration for a simulation run.
//!
//! [`SimulationConfig`] gathers every tunable the steering core and the
//! scenario generator read. Values are layered with `figment`: built-in
//! defaults, then an optional TOML file, then `CONTRAIL_`-prefixed
//! environment variables (nested keys split on `__`).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    ARRIVAL_RADIUS, BUFFER_ZONE, DEFAULT_MAX_TICKS, DEFAULT_OBSTACLE_COUNT, DEFAULT_SPEED,
    EDGE_MARGIN, MIN_START_GOAL_SEPARATION, NUM_DIRECTIONS, TICK_RATE, WORLD_HEIGHT, WORLD_WIDTH,
};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "CONTRAIL_";

/// Errors raised while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    /// A value parsed but is outside its permitted range.
    #[error("invalid configuration value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// How the repulsion heuristic measures the angle between a candidate
/// heading and the bearing from an obstacle vertex to the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleDifference {
    /// Raw absolute difference of the two angles, never wrapped.
    ///
    /// Candidates beyond half a turn from the goal bearing can therefore
    /// report a large difference for an obstacle that is angularly close.
    #[default]
    Literal,
    /// Absolute difference wrapped into `[0, π]`.
    Wrapped,
}

/// Extent of the rectangular world, anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Extent along the x axis.
    pub width: f64,
    /// Extent along the y axis.
    pub height: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Settings shared by the agent, the steering engine and the scenario
/// generator for the duration of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Distance travelled per tick.
    pub speed: f64,
    /// Vertex clearance below which repulsion applies.
    pub buffer_zone: f64,
    /// Goal distance below which the agent has arrived.
    pub arrival_radius: f64,
    /// Number of candidate headings sampled per tick.
    pub num_directions: usize,
    /// Angle measure used when choosing the avoidance side.
    pub angle_difference: AngleDifference,
    /// World extent used by the scenario generator.
    pub bounds: WorldBounds,
    /// Inset from the world edges for generated positions.
    pub edge_margin: f64,
    /// Start and goal must be strictly further apart than this.
    pub min_separation: f64,
    /// Number of clouds the scenario generator places.
    pub obstacle_count: usize,
    /// Ticks per second when the driver paces in real time.
    pub tick_rate: f64,
    /// Tick budget for a run.
    pub max_ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            buffer_zone: BUFFER_ZONE,
            arrival_radius: ARRIVAL_RADIUS,
            num_directions: NUM_DIRECTIONS,
            angle_difference: AngleDifference::default(),
            bounds: WorldBounds::default(),
            edge_margin: EDGE_MARGIN,
            min_separation: MIN_START_GOAL_SEPARATION,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            tick_rate: TICK_RATE,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl SimulationConfig {
    /// Builds the layered provider stack without extracting it.
    ///
    /// Exposed so callers can merge further providers, such as command line
    /// overrides, before extraction.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let base = Figment::from(Serialized::defaults(Self::default()));
        let with_file = match path {
            Some(file) => base.merge(Toml::file(file)),
            None => base,
        };
        with_file.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates configuration from defaults, an optional TOML
    /// file and the environment.
    ///
    /// A missing file is skipped, matching `figment`'s TOML provider.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a provider yields malformed data
    /// and [`ConfigError::Invalid`] when validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(path))
    }

    /// Extracts and validates configuration from a prepared provider stack.
    ///
    /// # Errors
    /// As for [`SimulationConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by the steering core and the
    /// scenario generator.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("speed", self.speed)?;
        positive("buffer_zone", self.buffer_zone)?;
        positive("arrival_radius", self.arrival_radius)?;
        positive("tick_rate", self.tick_rate)?;
        positive("bounds.width", self.bounds.width)?;
        positive("bounds.height", self.bounds.height)?;
        non_negative("edge_margin", self.edge_margin)?;
        non_negative("min_separation", self.min_separation)?;
        if self.num_directions == 0 {
            return Err(ConfigError::Invalid {
                field: "num_directions",
                reason: "at least one candidate direction is required".to_owned(),
            });
        }
        if self.bounds.width <= 2.0 * self.edge_margin
            || self.bounds.height <= 2.0 * self.edge_margin
        {
            return Err(ConfigError::Invalid {
                field: "edge_margin",
                reason: format!(
                    "margin {} leaves no placement area inside {}x{}",
                    self.edge_margin, self.bounds.width, self.bounds.height
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite positive number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite non-negative number, got {value}"),
        })
    }
}
