//! Course progression and reproducibility.
//!
//! - [`Course`] - the environment driver, advancing shared obstacle state once per tick
//! - [`Collision`] - outcome of testing a bird against the course
//! - [`Seed`] - seed for deterministic obstacle generation
//!
//! # Tick Order
//!
//! Within one tick the course is advanced first, then every bird steps its physics and is
//! tested with [`Course::collide`]. Birds only ever read the course, so the order in which
//! they are processed does not change the outcome.

pub use self::{course::*, seed::*};

mod course;
mod seed;
