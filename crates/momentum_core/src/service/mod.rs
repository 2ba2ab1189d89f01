//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, engine and persistence into tracker operations.
//! - Keep CLI/rendering layers decoupled from storage details.

pub mod feedback;
pub mod goal_service;
