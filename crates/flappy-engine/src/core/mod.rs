//! Entities living in the play area.
//!
//! - [`Bird`] - kinematic state of one flyer
//! - [`Obstacle`] - a gapped pair of solid segments
//! - [`Observation`] - the normalized view a bird has of the obstacle ahead

pub use self::{bird::*, obstacle::*, observation::*};

mod bird;
mod obstacle;
mod observation;
