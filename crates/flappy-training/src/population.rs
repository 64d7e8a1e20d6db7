//! The evolution loop.
//!
//! [`PopulationManager`] owns the agents and the course and advances both one tick at a
//! time. It is a two-state machine:
//!
//! ```text
//!            every agent dead (or tick limit)
//! Running ──────────────────────────────────▶ GenerationEnd
//!    ▲                                             │
//!    └───── select, reproduce, reset (next tick) ──┘
//! ```
//!
//! While `Running`, a tick advances the course once and then decides, integrates and
//! collides every alive agent in population order. The tick after the last agent died performs
//! generation end:
//!
//! 1. **Select** - the first agent with the largest lifetime is the parent
//! 2. **Reproduce** - `N` offspring, each the parent's genome mutated with the annealed step
//! 3. **Reset** - the course is cleared with one obstacle force-spawned, score returns to zero,
//!    the generation counter increments
//!
//! There is no terminal state: the loop runs for as long as the caller keeps ticking.

use flappy_engine::{Course, Seed, WorldConfig};
use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{
    agent::Agent,
    config::{TrainingConfig, TrainingConfigError},
    genome::{Genome, MutationStep},
    stats::LifetimeStats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PopulationState {
    /// At least one agent is alive.
    Running,
    /// Every agent is dead; the next tick reproduces.
    GenerationEnd,
}

/// What a finished generation achieved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub generation: u32,
    /// Ticks the generation ran for.
    pub ticks: u64,
    /// Obstacles passed before the last agent died.
    pub score: u32,
    pub best_index: usize,
    pub best_lifetime: u64,
    pub lifetimes: LifetimeStats,
    /// Mutation bound used to breed the next generation.
    pub mutation_step: f32,
}

/// State returned by every [`PopulationManager::tick`], for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSnapshot {
    pub generation: u32,
    pub score: u32,
    pub alive_count: usize,
    /// Ticks elapsed in the current generation.
    pub tick: u64,
    /// Agents that overlapped more than one obstacle during this tick.
    pub invariant_violations: usize,
    /// Set on the tick that performed generation end, describing the generation that ended.
    pub generation_end: Option<GenerationSummary>,
}

/// Index of the fittest agent: the first occurrence of the maximal lifetime.
///
/// ```
/// # use flappy_training::population::select_fittest;
/// assert_eq!(select_fittest([10, 25, 25]), Some(1));
/// assert_eq!(select_fittest([]), None);
/// ```
pub fn select_fittest<I>(lifetimes: I) -> Option<usize>
where
    I: IntoIterator<Item = u64>,
{
    let mut best: Option<(usize, u64)> = None;
    for (index, lifetime) in lifetimes.into_iter().enumerate() {
        if best.is_none_or(|(_, max)| lifetime > max) {
            best = Some((index, lifetime));
        }
    }
    best.map(|(index, _)| index)
}

/// Owns the population and the course, and drives the generation cycle.
#[derive(Debug, Clone)]
pub struct PopulationManager {
    world: WorldConfig,
    training: TrainingConfig,
    course: Course,
    rng: Pcg32,
    agents: Vec<Agent>,
    state: PopulationState,
    generation: u32,
    tick: u64,
    best: Option<Agent>,
}

impl PopulationManager {
    /// Seeds a population of `population_size` random policies.
    ///
    /// Both configurations are validated here; nothing fails once the loop runs.
    pub fn new(
        world: WorldConfig,
        training: TrainingConfig,
        seed: Seed,
    ) -> Result<Self, TrainingConfigError> {
        training.validate()?;
        let mut rng = seed.rng();
        let genomes = (0..training.population_size)
            .map(|_| Genome::random(&mut rng))
            .collect();
        Self::build(world, training, rng, genomes)
    }

    /// Like [`Self::new`], but starts from the given genomes.
    pub fn with_genomes(
        world: WorldConfig,
        training: TrainingConfig,
        seed: Seed,
        genomes: Vec<Genome>,
    ) -> Result<Self, TrainingConfigError> {
        check_genomes(&training, &genomes)?;
        Self::build(world, training, seed.rng(), genomes)
    }

    /// Like [`Self::with_genomes`], but the first generation flies `course` as it is.
    ///
    /// Later generations start from a reset course as usual.
    pub fn on_course(
        course: Course,
        training: TrainingConfig,
        seed: Seed,
        genomes: Vec<Genome>,
    ) -> Result<Self, TrainingConfigError> {
        check_genomes(&training, &genomes)?;
        Ok(Self::assemble(course, training, seed.rng(), genomes))
    }

    fn build(
        world: WorldConfig,
        training: TrainingConfig,
        mut rng: Pcg32,
        genomes: Vec<Genome>,
    ) -> Result<Self, TrainingConfigError> {
        let mut course = Course::new(world, rng.random())?;
        course.reset();
        Ok(Self::assemble(course, training, rng, genomes))
    }

    fn assemble(
        course: Course,
        training: TrainingConfig,
        rng: Pcg32,
        genomes: Vec<Genome>,
    ) -> Self {
        let world = course.config().clone();
        let agents = genomes
            .into_iter()
            .map(|genome| Agent::new(genome, &world))
            .collect();
        Self {
            world,
            training,
            course,
            rng,
            agents,
            state: PopulationState::Running,
            generation: 0,
            tick: 0,
            best: None,
        }
    }

    #[must_use]
    pub fn world_config(&self) -> &WorldConfig {
        &self.world
    }

    #[must_use]
    pub fn training_config(&self) -> &TrainingConfig {
        &self.training
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Current population in update order. Dead agents stay until generation end.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn state(&self) -> PopulationState {
        self.state
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// The fittest agent of the most recent generation end, if any generation has ended.
    #[must_use]
    pub fn best_agent(&self) -> Option<&Agent> {
        self.best.as_ref()
    }

    /// Mutation bound the current generation will be bred with.
    #[must_use]
    pub fn mutation_step(&self) -> MutationStep {
        MutationStep::annealed(
            self.training.learning_rate,
            self.training.discount,
            self.generation,
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            generation: self.generation,
            score: self.course.score(),
            alive_count: self.alive_count(),
            tick: self.tick,
            invariant_violations: 0,
            generation_end: None,
        }
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) -> TickSnapshot {
        match self.state {
            PopulationState::GenerationEnd => {
                let summary = self.end_generation();
                TickSnapshot {
                    generation_end: Some(summary),
                    ..self.snapshot()
                }
            }
            PopulationState::Running => {
                self.course.tick();
                let decide = self.tick % u64::from(self.training.decide_every) == 0;
                let mut invariant_violations = 0;
                for agent in &mut self.agents {
                    let collision = agent.step(&self.course, decide, self.training.confidence);
                    if collision.invariant_violation {
                        invariant_violations += 1;
                    }
                }
                self.tick += 1;

                let snapshot = TickSnapshot {
                    invariant_violations,
                    ..self.snapshot()
                };
                let limit_reached = self.training.tick_limit.is_some_and(|l| self.tick >= l);
                if snapshot.alive_count == 0 || limit_reached {
                    self.state = PopulationState::GenerationEnd;
                }
                snapshot
            }
        }
    }

    /// Runs `dt_ticks` ticks and returns the last snapshot.
    ///
    /// If a generation ended within the batch, its summary is carried in the returned snapshot.
    pub fn tick_n(&mut self, dt_ticks: u32) -> TickSnapshot {
        let mut ended = None;
        let mut snapshot = self.snapshot();
        for _ in 0..dt_ticks {
            snapshot = self.tick();
            if snapshot.generation_end.is_some() {
                ended.clone_from(&snapshot.generation_end);
            }
        }
        snapshot.generation_end = ended;
        snapshot
    }

    /// Ticks until the current generation has been replaced and returns its summary.
    pub fn run_generation(&mut self) -> GenerationSummary {
        loop {
            if let Some(summary) = self.tick().generation_end {
                return summary;
            }
        }
    }

    fn end_generation(&mut self) -> GenerationSummary {
        let best_index = select_fittest(self.agents.iter().map(Agent::lifetime_ticks))
            .expect("population is never empty");
        let best = self.agents[best_index].clone();
        let step = self.mutation_step();
        let lifetimes = LifetimeStats::new(self.agents.iter().map(Agent::lifetime_ticks))
            .expect("population is never empty");

        let summary = GenerationSummary {
            generation: self.generation,
            ticks: self.tick,
            score: self.course.score(),
            best_index,
            best_lifetime: best.lifetime_ticks(),
            lifetimes,
            mutation_step: step.get(),
        };
        tracing::info!(
            generation = summary.generation,
            best_index,
            best_lifetime = summary.best_lifetime,
            mean_lifetime = summary.lifetimes.mean,
            score = summary.score,
            step = summary.mutation_step,
            "generation finished"
        );

        self.agents = (0..self.training.population_size)
            .map(|_| Agent::new(best.genome().mutate(step, &mut self.rng), &self.world))
            .collect();
        self.best = Some(best);
        self.course.reset();
        self.generation += 1;
        self.tick = 0;
        self.state = PopulationState::Running;
        summary
    }
}

fn check_genomes(training: &TrainingConfig, genomes: &[Genome]) -> Result<(), TrainingConfigError> {
    training.validate()?;
    if genomes.len() != training.population_size {
        return Err(TrainingConfigError::PopulationSizeMismatch {
            expected: training.population_size,
            actual: genomes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use flappy_policy::PolicyParams;

    use super::*;

    fn manager(population_size: usize) -> PopulationManager {
        let training = TrainingConfig {
            population_size,
            tick_limit: Some(5_000),
            ..TrainingConfig::default()
        };
        PopulationManager::new(WorldConfig::default(), training, Seed::from_u128(9)).unwrap()
    }

    /// Policies that never jump: every agent falls to the floor on the same tick.
    fn never_jumping(population_size: usize) -> PopulationManager {
        let training = TrainingConfig {
            population_size,
            ..TrainingConfig::default()
        };
        PopulationManager::with_genomes(
            WorldConfig::default(),
            training,
            Seed::from_u128(9),
            vec![Genome::from(PolicyParams::ZERO); population_size],
        )
        .unwrap()
    }

    #[test]
    fn test_select_fittest_first_maximum() {
        assert_eq!(select_fittest([10, 25, 25]), Some(1));
        assert_eq!(select_fittest([0, 0, 0]), Some(0));
        assert_eq!(select_fittest([3, 1, 7, 7, 2]), Some(2));
    }

    #[test]
    fn test_rejects_empty_population() {
        let training = TrainingConfig {
            population_size: 0,
            ..TrainingConfig::default()
        };
        let err = PopulationManager::new(WorldConfig::default(), training, Seed::from_u128(0))
            .unwrap_err();
        assert_eq!(err, TrainingConfigError::EmptyPopulation);
    }

    #[test]
    fn test_rejects_invalid_world() {
        let world = WorldConfig {
            pipe_gap: -5,
            ..WorldConfig::default()
        };
        let err = PopulationManager::new(world, TrainingConfig::default(), Seed::from_u128(0))
            .unwrap_err();
        assert!(matches!(err, TrainingConfigError::World(_)));
    }

    #[test]
    fn test_rejects_genome_count_mismatch() {
        let err = PopulationManager::with_genomes(
            WorldConfig::default(),
            TrainingConfig::default(),
            Seed::from_u128(0),
            vec![Genome::from(PolicyParams::ZERO); 3],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TrainingConfigError::PopulationSizeMismatch {
                expected: 50,
                actual: 3
            }
        );
    }

    #[test]
    fn test_starts_with_reference_obstacle() {
        let manager = manager(4);
        assert_eq!(manager.course().obstacles().count(), 1);
        assert_eq!(manager.alive_count(), 4);
        assert!(manager.state().is_running());
        assert!(manager.best_agent().is_none());
    }

    #[test]
    fn test_generation_end_on_tick_after_last_death() {
        let mut manager = never_jumping(5);
        let mut last = manager.tick();
        while last.alive_count > 0 {
            assert!(last.generation_end.is_none());
            last = manager.tick();
        }
        // every agent is dead but the generation is still in place
        assert!(manager.state().is_generation_end());
        assert_eq!(manager.generation(), 0);
        assert_eq!(manager.agents().len(), 5);
        assert!(manager.agents().iter().all(|a| !a.is_alive()));

        let ended = manager.tick();
        let summary = ended.generation_end.unwrap();
        assert_eq!(summary.generation, 0);
        assert_eq!(ended.generation, 1);
        assert_eq!(ended.alive_count, 5);
        assert_eq!(ended.score, 0);
        assert!(manager.state().is_running());
        assert_eq!(manager.course().obstacles().count(), 1);
    }

    #[test]
    fn test_population_size_preserved() {
        let mut manager = manager(7);
        for generation in 0..5 {
            let summary = manager.run_generation();
            assert_eq!(summary.generation, generation);
            assert_eq!(manager.agents().len(), 7);
            assert_eq!(manager.generation(), generation + 1);
        }
    }

    #[test]
    fn test_offspring_within_step_of_best() {
        let mut manager = manager(10);
        let step = manager.mutation_step().get();
        let summary = manager.run_generation();
        assert_eq!(summary.mutation_step, step);

        let best = manager.best_agent().unwrap();
        assert_eq!(best.lifetime_ticks(), summary.best_lifetime);
        for agent in manager.agents() {
            for (&p, &c) in best.genome().genes().iter().zip(agent.genome().genes()) {
                assert!(c >= p - step && c <= p + step, "{c} outside {p} ± {step}");
            }
        }
    }

    #[test]
    fn test_best_has_maximal_lifetime() {
        let mut manager = manager(12);
        while manager.state().is_running() {
            manager.tick();
        }
        let lifetimes = manager
            .agents()
            .iter()
            .map(Agent::lifetime_ticks)
            .collect::<Vec<_>>();
        let summary = manager.tick().generation_end.unwrap();
        let max = *lifetimes.iter().max().unwrap();
        assert_eq!(summary.best_lifetime, max);
        assert_eq!(
            lifetimes.iter().position(|&l| l == max),
            Some(summary.best_index)
        );
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = manager(6);
        let mut b = manager(6);
        for _ in 0..3 {
            assert_eq!(a.run_generation(), b.run_generation());
        }
    }

    #[test]
    fn test_tick_limit_ends_generation() {
        // a zero-weight policy never jumps; give it room to fall for a long time
        let training = TrainingConfig {
            population_size: 2,
            tick_limit: Some(10),
            ..TrainingConfig::default()
        };
        let mut manager = PopulationManager::with_genomes(
            WorldConfig::default(),
            training,
            Seed::from_u128(0),
            vec![Genome::from(PolicyParams::ZERO); 2],
        )
        .unwrap();
        let snapshot = manager.tick_n(11);
        let summary = snapshot.generation_end.unwrap();
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.best_lifetime, 10);
        assert_eq!(summary.best_index, 0);
    }

    #[test]
    fn test_tick_n_zero_is_a_no_op() {
        let mut manager = manager(3);
        let before = manager.snapshot();
        assert_eq!(manager.tick_n(0), before);
    }
}
