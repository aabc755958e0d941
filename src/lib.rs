//! Hand-gesture driven particle swarm.
//!
//! Each tick a [`landmarks::LandmarkFrame`] goes through the motion gate and
//! the gesture classifier; tracking poses feed the fingertip trail, and the
//! resulting gesture steers a [`swarm::SwarmController`]. [`pipeline::Session`]
//! wires the whole flow together.

pub mod config;
pub mod error;
pub mod gestures;
pub mod input;
pub mod landmarks;
pub mod motion;
pub mod pipeline;
pub mod smoothing;
pub mod swarm;
pub mod tracker;
pub mod trail;
pub mod tween;

#[cfg(test)]
mod fixtures;

pub use config::Profile;
pub use error::{Error, Result};
pub use gestures::{GestureClassifier, GestureState, TrackDirection};
pub use landmarks::{Joint, LandmarkFrame};
pub use pipeline::{Session, TickOutput};
pub use swarm::{ParticlePose, SwarmController, SwarmState};
