use std::iter;

use flappy_engine::Observation;

use crate::Policy;

pub const INPUTS: usize = Observation::LEN;
pub const HIDDEN: usize = 5;

/// Weights of the 3→5→1 network.
///
/// `w1[j][i]` connects input `j` to hidden unit `i`; `w2[i]` connects hidden unit `i` to the
/// output. The flat layout used by [`Self::from_flat`] and [`Self::to_flat`] is `w1` in
/// row-major order followed by `w2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyParams {
    pub w1: [[f32; HIDDEN]; INPUTS],
    pub w2: [f32; HIDDEN],
}

impl PolicyParams {
    /// Number of weights in the network.
    pub const LEN: usize = INPUTS * HIDDEN + HIDDEN;

    pub const ZERO: Self = Self {
        w1: [[0.0; HIDDEN]; INPUTS],
        w2: [0.0; HIDDEN],
    };

    #[must_use]
    pub fn from_flat(flat: &[f32; Self::LEN]) -> Self {
        let mut params = Self::ZERO;
        let (w1, w2) = flat.split_at(INPUTS * HIDDEN);
        for (row, chunk) in iter::zip(&mut params.w1, w1.chunks_exact(HIDDEN)) {
            row.copy_from_slice(chunk);
        }
        params.w2.copy_from_slice(w2);
        params
    }

    #[must_use]
    pub fn to_flat(&self) -> [f32; Self::LEN] {
        let mut flat = [0.0; Self::LEN];
        let (w1, w2) = flat.split_at_mut(INPUTS * HIDDEN);
        for (chunk, row) in iter::zip(w1.chunks_exact_mut(HIDDEN), &self.w1) {
            chunk.copy_from_slice(row);
        }
        w2.copy_from_slice(&self.w2);
        flat
    }

    /// Glorot-uniform bound of the layer a flat weight index belongs to.
    ///
    /// Weights are initialised uniformly in `[-limit, limit]` with
    /// `limit = sqrt(6 / (fan_in + fan_out))`: about 0.866 for the hidden layer
    /// and 1.0 for the output layer.
    #[must_use]
    pub fn init_limit(index: usize) -> f32 {
        #[expect(clippy::cast_precision_loss)]
        let fans = if index < INPUTS * HIDDEN {
            (INPUTS + HIDDEN) as f32
        } else {
            (HIDDEN + 1) as f32
        };
        (6.0 / fans).sqrt()
    }
}

/// The fixed-topology feed-forward policy.
///
/// ```text
/// hidden[i] = relu(Σ_j input[j] · w1[j][i])
/// output    = sigmoid(Σ_i hidden[i] · w2[i])
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardPolicy {
    params: PolicyParams,
}

impl FeedForwardPolicy {
    #[must_use]
    pub const fn new(params: PolicyParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub const fn params(&self) -> &PolicyParams {
        &self.params
    }
}

impl Policy for FeedForwardPolicy {
    #[inline]
    fn evaluate(&self, observation: &Observation) -> f32 {
        let input = observation.to_array();
        let mut hidden = [0.0; HIDDEN];
        for (x, row) in iter::zip(input, &self.params.w1) {
            for (h, w) in iter::zip(&mut hidden, row) {
                *h += x * w;
            }
        }
        let logit = iter::zip(hidden, self.params.w2)
            .map(|(h, w)| relu(h) * w)
            .sum::<f32>();
        sigmoid(logit)
    }
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
