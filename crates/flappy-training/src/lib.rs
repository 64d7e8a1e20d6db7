//! Neuroevolution of flapping policies.
//!
//! This crate evolves the weights of [`flappy_policy::FeedForwardPolicy`] networks by letting a
//! whole population fly the same [`flappy_engine::Course`] and breeding the longest survivor.
//!
//! # How Training Works
//!
//! 1. **Population** - `N` agents, each flying a policy built from a random Glorot-initialized
//!    [`genome::Genome`]
//! 2. **Flight** - every tick the course advances once, then each alive agent observes the nearest
//!    obstacle ahead, decides (on the shared decision cadence), integrates and collides
//! 3. **Fitness** - ticks survived; the generation lasts until every agent is dead
//! 4. **Selection** - the first agent with the largest lifetime becomes the single parent
//! 5. **Reproduction** - `N` asexual offspring, each weight perturbed by uniform noise whose bound
//!    decays geometrically with the generation number
//! 6. **Repeat** - the course resets and the next generation starts on the following tick
//!
//! # Architecture
//!
//! ```text
//! PopulationManager
//!     ↓ owns
//! Course (flappy-engine)  +  Agents
//!                              ↓ each wraps
//!                  Bird (flappy-engine) + Genome → FeedForwardPolicy (flappy-policy)
//! ```
//!
//! [`mode::GameMode`] puts the same pieces behind manual play and best-agent replay, so a human
//! flyer and a trained one share physics and collision rules.
//!
//! # Example
//!
//! ```
//! use flappy_engine::{Seed, WorldConfig};
//! use flappy_training::{config::TrainingConfig, population::PopulationManager};
//!
//! let training = TrainingConfig {
//!     population_size: 8,
//!     tick_limit: Some(2_000),
//!     ..TrainingConfig::default()
//! };
//! let mut manager =
//!     PopulationManager::new(WorldConfig::default(), training, Seed::from_u128(1)).unwrap();
//!
//! let summary = manager.run_generation();
//! assert_eq!(summary.generation, 0);
//! assert_eq!(manager.generation(), 1);
//! assert!(manager.best_agent().is_some());
//! ```
//!
//! # Current Limitations
//!
//! - **Single parent**: no crossover and no elitism, the best genome itself is not carried over
//!   unmutated
//! - **Single course per generation**: fitness depends on one obstacle layout, so a lucky layout
//!   can promote a weak policy
//! - **Sequential**: agents are updated in population order on one thread

pub mod agent;
pub mod config;
pub mod genome;
pub mod mode;
pub mod population;
pub mod stats;
