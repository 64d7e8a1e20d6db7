//! Genomes and their mutation.
//!
//! A [`Genome`] is the flat weight vector of one policy. Evolution only ever sees this
//! vector: it never inspects the network that is built from it. Reproduction is asexual,
//! every offspring is a copy of a single parent with independent uniform noise added to
//! each weight.
//!
//! # Annealed Mutation
//!
//! The noise bound shrinks geometrically with the generation number,
//! `step = learning_rate * discount^generation`, so early generations explore widely and
//! later ones refine. See [`MutationStep::annealed`].

use std::array;

use flappy_policy::PolicyParams;
use rand::Rng;
use rand_distr::{Distribution as _, Uniform};

/// Immutable flat weight vector of a [`flappy_policy::FeedForwardPolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Genome([f32; Genome::LEN]);

impl Genome {
    pub const LEN: usize = PolicyParams::LEN;

    #[must_use]
    pub const fn from_genes(genes: [f32; Self::LEN]) -> Self {
        Self(genes)
    }

    /// Draws every weight uniformly from its layer's Glorot bound.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self(array::from_fn(|i| {
            let limit = PolicyParams::init_limit(i);
            rng.random_range(-limit..=limit)
        }))
    }

    #[must_use]
    pub const fn genes(&self) -> &[f32; Self::LEN] {
        &self.0
    }

    #[must_use]
    pub fn params(&self) -> PolicyParams {
        PolicyParams::from_flat(&self.0)
    }

    /// Returns a copy with independent noise from `[-step, step]` added to every weight.
    #[must_use]
    pub fn mutate<R>(&self, step: MutationStep, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let noise = step.distribution();
        Self(array::from_fn(|i| self.0[i] + noise.sample(rng)))
    }
}

impl From<PolicyParams> for Genome {
    fn from(params: PolicyParams) -> Self {
        Self(params.to_flat())
    }
}

/// Bound of the per-weight mutation noise; always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MutationStep(f32);

impl MutationStep {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub fn new(step: f32) -> Option<Self> {
        (step.is_finite() && step >= 0.0).then_some(Self(step))
    }

    /// `learning_rate * discount^generation`.
    ///
    /// Inputs outside the validated ranges of
    /// [`TrainingConfig`](crate::config::TrainingConfig) collapse to [`Self::ZERO`].
    #[must_use]
    pub fn annealed(learning_rate: f32, discount: f32, generation: u32) -> Self {
        let exponent = i32::try_from(generation).unwrap_or(i32::MAX);
        Self::new(learning_rate * discount.powi(exponent)).unwrap_or(Self::ZERO)
    }

    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }

    fn distribution(self) -> Uniform<f32> {
        Uniform::new_inclusive(-self.0, self.0).expect("mutation step is finite and non-negative")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_within_init_limits() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let genome = Genome::random(&mut rng);
            for (i, &gene) in genome.genes().iter().enumerate() {
                let limit = PolicyParams::init_limit(i);
                assert!(gene.abs() <= limit, "gene {i} = {gene} exceeds {limit}");
            }
        }
    }

    #[test]
    fn test_mutation_stays_within_step() {
        let mut rng = Pcg32::seed_from_u64(5);
        let parent = Genome::random(&mut rng);
        let step = MutationStep::annealed(1.0, 0.85, 3);
        for _ in 0..200 {
            let child = parent.mutate(step, &mut rng);
            for (i, (&p, &c)) in parent.genes().iter().zip(child.genes()).enumerate() {
                assert!(
                    c >= p - step.get() && c <= p + step.get(),
                    "gene {i}: {c} outside {p} ± {}",
                    step.get()
                );
            }
        }
    }

    #[test]
    fn test_mutation_perturbs_every_weight_independently() {
        let mut rng = Pcg32::seed_from_u64(8);
        let parent = Genome::from_genes([0.0; Genome::LEN]);
        let child = parent.mutate(MutationStep::new(1.0).unwrap(), &mut rng);
        assert!(child.genes().iter().all(|&g| g != 0.0));
        let distinct = child
            .genes()
            .iter()
            .filter(|&&g| g != child.genes()[0])
            .count();
        assert_eq!(distinct, Genome::LEN - 1);
    }

    #[test]
    fn test_zero_step_copies_parent() {
        let mut rng = Pcg32::seed_from_u64(2);
        let parent = Genome::random(&mut rng);
        assert_eq!(parent.mutate(MutationStep::ZERO, &mut rng), parent);
    }

    #[test]
    fn test_annealed_step_decays() {
        assert_eq!(MutationStep::annealed(1.0, 0.85, 0).get(), 1.0);
        assert!((MutationStep::annealed(1.0, 0.85, 2).get() - 0.7225).abs() < 1e-6);
        assert!(MutationStep::annealed(1.0, 0.85, 10) < MutationStep::annealed(1.0, 0.85, 9));
        assert_eq!(MutationStep::annealed(1.0, 0.85, u32::MAX).get(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_steps() {
        assert_eq!(MutationStep::new(-0.1), None);
        assert_eq!(MutationStep::new(f32::INFINITY), None);
        assert_eq!(MutationStep::annealed(f32::NAN, 0.5, 1), MutationStep::ZERO);
    }
}
