use flappy_engine::ConfigError;
use serde::{Deserialize, Serialize};

/// Parameters of the evolution loop.
///
/// Defaults: 50 agents, learning rate 1.0 decaying by 0.85 per generation, jump when the
/// policy output exceeds 0.5, decide every other tick, no tick limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of agents per generation.
    pub population_size: usize,
    /// Mutation step of generation 0.
    pub learning_rate: f32,
    /// Per-generation decay of the mutation step, in `[0, 1]`.
    pub discount: f32,
    /// Policy output a decision must exceed to trigger a jump.
    pub confidence: f32,
    /// Decisions are made on ticks divisible by this value, identically for every agent.
    pub decide_every: u32,
    /// Ends a generation after this many ticks even if agents are still alive.
    pub tick_limit: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            learning_rate: 1.0,
            discount: 0.85,
            confidence: 0.5,
            decide_every: 2,
            tick_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrainingConfigError {
    #[display("population must contain at least one agent")]
    EmptyPopulation,
    #[display("expected {expected} genomes, got {actual}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
    #[display("learning rate must be finite and non-negative, got {value}")]
    InvalidLearningRate { value: f32 },
    #[display("discount must lie in [0, 1], got {value}")]
    InvalidDiscount { value: f32 },
    #[display("confidence must lie in [0, 1], got {value}")]
    InvalidConfidence { value: f32 },
    #[display("decision cadence must be at least one tick")]
    ZeroDecisionCadence,
    #[display("tick limit must be at least one tick")]
    ZeroTickLimit,
    #[display("invalid world: {_0}")]
    World(ConfigError),
}

impl From<ConfigError> for TrainingConfigError {
    fn from(err: ConfigError) -> Self {
        Self::World(err)
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), TrainingConfigError> {
        if self.population_size == 0 {
            return Err(TrainingConfigError::EmptyPopulation);
        }
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(TrainingConfigError::InvalidLearningRate {
                value: self.learning_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(TrainingConfigError::InvalidDiscount {
                value: self.discount,
            });
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(TrainingConfigError::InvalidConfidence {
                value: self.confidence,
            });
        }
        if self.decide_every == 0 {
            return Err(TrainingConfigError::ZeroDecisionCadence);
        }
        if self.tick_limit == Some(0) {
            return Err(TrainingConfigError::ZeroTickLimit);
        }
        Ok(())
    }
}
