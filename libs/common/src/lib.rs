//! Common library for the SkillHub marketplace
//!
//! This crate provides shared functionality used by the marketplace
//! service: the in-memory table primitive backing the repositories and
//! the store error types.

pub mod error;
pub mod store;
