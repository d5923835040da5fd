//! SkillHub marketplace API service
//!
//! Catalog browsing, bearer-session authentication, and a mocked checkout
//! flow for one-time course purchases and monthly/annual subscriptions,
//! all backed by an in-memory store.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod state;
pub mod validation;
