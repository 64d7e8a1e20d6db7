//! Decision policies mapping an [`Observation`] to a flap probability.
//!
//! - [`Policy`] - the seam between the simulation and whatever decides to jump
//! - [`FeedForwardPolicy`] - the fixed 3→5→1 network (ReLU hidden layer, sigmoid output)
//! - [`PolicyParams`] - the network's weights, with a flat view used by evolution
//!
//! The network has no biases and its topology never changes; only the 20 weight values
//! vary between individuals. Training code does not touch the network directly: it mutates
//! a flat weight vector and rebuilds the policy from it (see `flappy-training`).
//!
//! # Example
//!
//! ```
//! use flappy_engine::Observation;
//! use flappy_policy::{FeedForwardPolicy, Policy, PolicyParams};
//!
//! let policy = FeedForwardPolicy::new(PolicyParams::ZERO);
//! let observation = Observation { height: 0.5, vertical_distance: -0.1, jump_phase: 0.0 };
//! assert_eq!(policy.evaluate(&observation), 0.5);
//! ```
//!
//! [`Observation`]: flappy_engine::Observation

pub use self::{feed_forward::*, policy::*};

mod feed_forward;
mod policy;
