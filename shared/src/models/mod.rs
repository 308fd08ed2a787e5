//! Domain models for the Construction Materials Inventory Platform

pub mod analysis;
pub mod material;
pub mod movement;
pub mod project;
pub mod provider;
pub mod transfer;
pub mod user;

pub use analysis::*;
pub use material::*;
pub use movement::*;
pub use project::*;
pub use provider::*;
pub use transfer::*;
pub use user::*;
