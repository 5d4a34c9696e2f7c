//! Simulation constants shared across the crate.
//!
//! These are the defaults baked into [`SimulationConfig`](crate::SimulationConfig);
//! a loaded configuration may override most of them for a run.

/// Distance to the goal below which the agent counts as arrived.
pub const ARRIVAL_RADIUS: f64 = 10.0;
/// Clearance below which an obstacle vertex exerts repulsion.
pub const BUFFER_ZONE: f64 = 30.0;
/// Number of candidate headings sampled around the goal bearing each tick.
pub const NUM_DIRECTIONS: usize = 36;
/// Distance travelled per tick.
pub const DEFAULT_SPEED: f64 = 2.0;
/// Smallest distance used in the inverse-distance repulsion.
///
/// A projected position that lands exactly on an obstacle vertex is treated
/// as this far away, giving a large but finite push.
pub const MIN_REPULSION_DISTANCE: f64 = 1e-6;

/// Width of the world in world units.
pub const WORLD_WIDTH: f64 = 1200.0;
/// Height of the world in world units.
pub const WORLD_HEIGHT: f64 = 700.0;
/// Inset from the world edges used when placing the start, goal and clouds.
pub const EDGE_MARGIN: f64 = 50.0;
/// Start and goal must be strictly further apart than this.
pub const MIN_START_GOAL_SEPARATION: f64 = 350.0;
/// Number of clouds placed by the scenario generator.
pub const DEFAULT_OBSTACLE_COUNT: usize = 30;
/// Ticks per second used when pacing the simulation in real time.
pub const TICK_RATE: f64 = 60.0;
/// Tick budget for a single run before the driver gives up.
pub const DEFAULT_MAX_TICKS: u64 = 10_000;
/// Upper bound on goal redraws while searching for a distant enough goal.
pub const MAX_GOAL_DRAWS: u32 = 10_000;
