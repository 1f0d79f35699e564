//! Decision Matrix - Multi-criteria decision analysis engine
//!
//! Ranks alternatives with the weighted sum model, explains each score,
//! and reports how sensitive the winner is to weight changes. Input enters
//! through a single gateway and becomes an immutable, validated matrix.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
