//! Ways of running the simulation.
//!
//! Each [`GameMode`] variant wraps a session assembled from the same engine and policy
//! parts, and [`GameMode::tick`] dispatches on the variant:
//!
//! - [`GameMode::ManualPlay`] - a single bird driven by external input ([`ManualSession`])
//! - [`GameMode::Training`] - the evolution loop ([`PopulationManager`])
//! - [`GameMode::BestAgentReplay`] - a trained genome flying alone, optionally racing a
//!   manually controlled bird on the same course ([`ReplaySession`])
//!
//! Physics and collision are identical regardless of where an action comes from.

use flappy_engine::{Bird, ConfigError, Course, Seed, WorldConfig};

use crate::{
    agent::Agent,
    config::{TrainingConfig, TrainingConfigError},
    genome::Genome,
    population::PopulationManager,
};

/// A bird controlled from outside, e.g. by keyboard.
#[derive(Debug, Clone)]
pub struct ManualSession {
    course: Course,
    bird: Bird,
}

impl ManualSession {
    pub fn new(world: WorldConfig, seed: Seed) -> Result<Self, ConfigError> {
        let bird = Bird::new(&world);
        let mut course = Course::new(world, seed)?;
        course.reset();
        Ok(Self { course, bird })
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        !self.bird.is_alive()
    }

    /// Input, physics, collision. Does nothing once the bird is dead.
    pub fn tick(&mut self, trigger: bool) {
        if self.is_over() {
            return;
        }
        self.course.tick();
        fly_manually(&mut self.bird, &self.course, trigger);
    }
}

/// A trained genome flying on a fresh course.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    course: Course,
    agent: Agent,
    player: Option<Bird>,
    training: TrainingConfig,
    tick: u64,
}

impl ReplaySession {
    /// With `with_player`, a manually controlled bird shares the course with the agent.
    pub fn new(
        world: WorldConfig,
        training: TrainingConfig,
        genome: Genome,
        seed: Seed,
        with_player: bool,
    ) -> Result<Self, TrainingConfigError> {
        training.validate()?;
        let agent = Agent::new(genome, &world);
        let player = with_player.then(|| Bird::new(&world));
        let mut course = Course::new(world, seed)?;
        course.reset();
        Ok(Self {
            course,
            agent,
            player,
            training,
            tick: 0,
        })
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub fn player(&self) -> Option<&Bird> {
        self.player.as_ref()
    }

    /// Over once every bird on the course is dead.
    #[must_use]
    pub fn is_over(&self) -> bool {
        !self.agent.is_alive() && self.player.as_ref().is_none_or(|p| !p.is_alive())
    }

    /// `trigger` only affects the player bird.
    pub fn tick(&mut self, trigger: bool) {
        if self.is_over() {
            return;
        }
        self.course.tick();
        let decide = self.tick % u64::from(self.training.decide_every) == 0;
        self.agent.step(&self.course, decide, self.training.confidence);
        if let Some(player) = &mut self.player {
            fly_manually(player, &self.course, trigger);
        }
        self.tick += 1;
    }
}

fn fly_manually(bird: &mut Bird, course: &Course, trigger: bool) {
    if !bird.is_alive() {
        return;
    }
    let config = course.config();
    bird.receive_external_action(trigger, config);
    bird.step_physics(config);
    course.collide(bird);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ModeKind {
    #[display("manual")]
    ManualPlay,
    #[display("training")]
    Training,
    #[display("replay")]
    BestAgentReplay,
}

/// Display state shared by every mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStatus {
    pub kind: ModeKind,
    /// Only training has generations.
    pub generation: Option<u32>,
    pub score: u32,
    pub alive_count: usize,
    pub is_over: bool,
}

#[derive(Debug, Clone)]
pub enum GameMode {
    ManualPlay(ManualSession),
    Training(Box<PopulationManager>),
    BestAgentReplay(ReplaySession),
}

impl GameMode {
    #[must_use]
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::ManualPlay(_) => ModeKind::ManualPlay,
            Self::Training(_) => ModeKind::Training,
            Self::BestAgentReplay(_) => ModeKind::BestAgentReplay,
        }
    }

    /// Advances one tick. `trigger` is the external flap input; training ignores it.
    pub fn tick(&mut self, trigger: bool) -> ModeStatus {
        match self {
            Self::ManualPlay(session) => session.tick(trigger),
            Self::Training(manager) => {
                manager.tick();
            }
            Self::BestAgentReplay(session) => session.tick(trigger),
        }
        self.status()
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        match self {
            Self::ManualPlay(session) => session.course(),
            Self::Training(manager) => manager.course(),
            Self::BestAgentReplay(session) => session.course(),
        }
    }

    /// Every bird on the course, dead ones included. The player bird, if any, comes last.
    #[must_use]
    pub fn birds(&self) -> Vec<&Bird> {
        match self {
            Self::ManualPlay(session) => vec![session.bird()],
            Self::Training(manager) => manager.agents().iter().map(Agent::bird).collect(),
            Self::BestAgentReplay(session) => {
                let mut birds = vec![session.agent().bird()];
                birds.extend(session.player());
                birds
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> ModeStatus {
        let alive_count = self.birds().iter().filter(|b| b.is_alive()).count();
        let (generation, is_over) = match self {
            Self::ManualPlay(session) => (None, session.is_over()),
            Self::Training(manager) => (Some(manager.generation()), false),
            Self::BestAgentReplay(session) => (None, session.is_over()),
        };
        ModeStatus {
            kind: self.kind(),
            generation,
            score: self.course().score(),
            alive_count,
            is_over,
        }
    }
}
