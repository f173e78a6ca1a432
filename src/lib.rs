//! A virtual pet that gets hungry, bored and sick, grows through life
//! stages, and takes on a personality shaped by how it was cared for.

pub mod config;
pub mod error;
pub mod evolution;
pub mod illness;
pub mod ingredient;
pub mod inventory;
pub mod memory;
pub mod meter;
pub mod notify;
pub mod personality;
pub mod pet;
pub mod room;
pub mod rules;
pub mod sim;
pub mod sleep;
pub mod snapshot;
pub mod stage;
pub mod storage;
pub mod waste;

pub use pet::{Pet, PetEvent};
pub use rules::Rules;
pub use stage::LifeStage;
