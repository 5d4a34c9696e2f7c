//! Tick orchestration.
//!
//! A tick moves the agent along the heading chosen on the previous tick and
//! then steers for the next one. [`Simulation`] drives ticks until the agent
//! arrives or a tick budget runs out, emitting a [`Frame`] per tick for
//! whatever renders or records the run.

use log::{debug, info, warn};
use serde::Serialize;

use crate::agent::Agent;
use crate::obstacle::Obstacle;
use crate::steering::SteeringEngine;

/// Advances `agent` by one tick and returns the updated state.
///
/// The agent first moves along its current heading, which may mark it as
/// arrived, and is then steered for the following tick.
///
/// # Examples
/// ```
/// use glam::DVec2;
/// use contrail::{tick, Agent, SimulationConfig, SteeringEngine};
/// let config = SimulationConfig::default();
/// let engine = SteeringEngine::new(&config);
/// let agent = Agent::new(DVec2::ZERO, DVec2::new(100.0, 0.0), &config);
/// let next = tick(&agent, &[], &engine);
/// assert_eq!(next.position(), DVec2::new(2.0, 0.0));
/// ```
#[must_use]
pub fn tick(agent: &Agent, obstacles: &[Obstacle], engine: &SteeringEngine) -> Agent {
    let mut next = *agent;
    next.advance();
    let heading = engine.choose_heading(&next, obstacles);
    next.set_heading(heading);
    next
}

/// Read-only snapshot of the agent after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Frame {
    /// Number of ticks completed, starting from 1.
    pub tick: u64,
    /// Agent position as `[x, y]`.
    pub position: [f64; 2],
    /// Heading for the next tick, in radians.
    pub heading: f64,
    /// Whether the agent has arrived.
    pub arrived: bool,
}

impl Frame {
    fn capture(tick: u64, agent: &Agent) -> Self {
        Self {
            tick,
            position: agent.position().to_array(),
            heading: agent.heading(),
            arrived: agent.arrived(),
        }
    }
}

/// How a bounded run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The agent reached its goal after `ticks` ticks.
    Arrived {
        /// Ticks taken.
        ticks: u64,
    },
    /// The budget ran out before arrival.
    Exhausted {
        /// Ticks taken.
        ticks: u64,
    },
}

impl RunOutcome {
    /// Total ticks the run performed.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        match self {
            Self::Arrived { ticks } | Self::Exhausted { ticks } => *ticks,
        }
    }
}

/// One agent flying through a fixed set of clouds.
#[derive(Clone, Debug)]
pub struct Simulation {
    agent: Agent,
    obstacles: Vec<Obstacle>,
    engine: SteeringEngine,
    ticks: u64,
}

impl Simulation {
    /// Creates a simulation that has not ticked yet.
    #[must_use]
    pub const fn new(agent: Agent, obstacles: Vec<Obstacle>, engine: SteeringEngine) -> Self {
        Self {
            agent,
            obstacles,
            engine,
            ticks: 0,
        }
    }

    /// Current agent state.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// The static clouds.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Ticks completed so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one tick and returns the resulting frame.
    ///
    /// Ticks after arrival still count but leave the agent unchanged.
    pub fn step(&mut self) -> Frame {
        self.agent = tick(&self.agent, &self.obstacles, &self.engine);
        self.ticks += 1;
        let frame = Frame::capture(self.ticks, &self.agent);
        debug!(
            "Tick {}: position ({:.2}, {:.2}) heading {:.4}",
            frame.tick,
            frame.position[0],
            frame.position[1],
            frame.heading
        );
        frame
    }

    /// Steps until the agent arrives or `max_ticks` more ticks have run.
    pub fn run(&mut self, max_ticks: u64) -> RunOutcome {
        self.run_with(max_ticks, |_| {})
    }

    /// Like [`Simulation::run`], passing each frame to `observer`.
    ///
    /// An agent that has already arrived returns immediately without
    /// ticking.
    pub fn run_with<F>(&mut self, max_ticks: u64, mut observer: F) -> RunOutcome
    where
        F: FnMut(&Frame),
    {
        let mut remaining = max_ticks;
        while !self.agent.arrived() && remaining > 0 {
            let frame = self.step();
            observer(&frame);
            remaining -= 1;
        }

        if self.agent.arrived() {
            info!(
                "Arrived after {} ticks, {:.2} units from goal",
                self.ticks,
                self.agent.distance_to_goal()
            );
            RunOutcome::Arrived { ticks: self.ticks }
        } else {
            warn!(
                "Tick budget of {max_ticks} exhausted, {:.2} units from goal",
                self.agent.distance_to_goal()
            );
            RunOutcome::Exhausted { ticks: self.ticks }
        }
    }
}
