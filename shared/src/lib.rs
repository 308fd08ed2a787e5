//! Shared types and models for the Construction Materials Inventory Platform
//!
//! This crate contains types shared between the backend and any future
//! clients (mobile, web) of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
