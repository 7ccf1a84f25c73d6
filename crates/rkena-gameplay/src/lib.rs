//! # Rkena Gameplay
//!
//! Combat simulation core for Rkena MMA.
//!
//! This crate owns everything that happens inside the cage:
//! - Fighter model and per-tick state machine
//! - Scripted AI opponent with seeded randomness
//! - Hitbox resolution (strikes, blocks, takedowns, clashes, sprawls)
//! - Cosmetic blood particles and commentator shouts
//! - Fixed-timestep simulation world, round clock and match lifecycle
//! - Balance tuning loaded from config
//!
//! Nothing here draws, plays sound or reads devices. Hosts feed input and
//! wall-clock deltas in and read snapshots and events out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ai;
pub mod combat;
pub mod commentary;
pub mod events;
pub mod fighter;
pub mod input;
pub mod match_state;
pub mod particles;
pub mod snapshot;
pub mod state_machine;
pub mod timing;
pub mod tuning;
pub mod world;


/// Prelude for convenient imports
pub mod prelude {
    pub use crate::ai::*;
    pub use crate::combat::*;
    pub use crate::commentary::*;
    pub use crate::events::*;
    pub use crate::fighter::*;
    pub use crate::input::*;
    pub use crate::match_state::*;
    pub use crate::particles::*;
    pub use crate::snapshot::*;
    pub use crate::state_machine::*;
    pub use crate::timing::*;
    pub use crate::tuning::*;
    pub use crate::world::*;
}

pub use prelude::*;
