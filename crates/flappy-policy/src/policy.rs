use std::fmt;

use flappy_engine::Observation;

/// Maps an observation to the probability of jumping.
///
/// Implementations must be pure: the same observation always yields the same output,
/// which lies in `[0.0, 1.0]` for every finite input.
pub trait Policy: fmt::Debug + Send + Sync {
    fn evaluate(&self, observation: &Observation) -> f32;

    /// Whether the output clears `confidence`. Equality does not trigger a jump.
    fn should_jump(&self, observation: &Observation, confidence: f32) -> bool {
        self.evaluate(observation) > confidence
    }
}
