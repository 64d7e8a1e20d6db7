//! Tick-driven side-scrolling course simulation.
//!
//! This crate owns everything that happens inside the play area:
//!
//! - [`WorldConfig`] - Geometry and kinematic constants, validated once at construction
//! - [`Bird`] - A single flyer's kinematic state, physics step and collision test
//! - [`Obstacle`] - A pair of solid segments with a gap, scrolling left at constant speed
//! - [`Course`] - The environment driver: spawns, advances and removes obstacles, keeps score
//! - [`Seed`] - 128-bit seed for reproducible obstacle layouts
//!
//! Nothing here knows how a bird decides to flap. Policies live in `flappy-policy`, and the
//! evolutionary loop that ties the two together lives in `flappy-training`.
//!
//! # Example
//!
//! ```
//! use flappy_engine::{Bird, Course, Seed, WorldConfig};
//!
//! let config = WorldConfig::default();
//! let mut course = Course::new(config.clone(), Seed::from_bytes([7; 16])).unwrap();
//! let mut bird = Bird::new(&config);
//!
//! while bird.is_alive() {
//!     course.tick();
//!     bird.step_physics(&config);
//!     course.collide(&mut bird);
//! }
//! assert!(bird.lifetime_ticks() > 0);
//! ```

pub use self::{config::*, core::*, engine::*};

mod config;
pub mod core;
pub mod engine;

/// Rejected [`WorldConfig`] values.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: i64 },
    #[display("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f32 },
    #[display("gap height must be positive, got {gap}")]
    NonPositiveGapHeight { gap: i32 },
    #[display("gap height {gap} exceeds play height {play_height}")]
    GapExceedsPlayHeight { gap: i32, play_height: i32 },
    #[display("obstacles spawn {spacing} units apart, which does not clear their width {width}")]
    ObstacleSpacing { spacing: i64, width: i32 },
    #[display("bird start y {y} with radius {radius} lies outside the play height {play_height}")]
    BirdOutOfBounds {
        y: f32,
        radius: i32,
        play_height: i32,
    },
}
