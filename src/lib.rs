//! `pretimed` - Fixed-time traffic signal controller
//!
//! A deterministic cycle of signal phases drives two perpendicular
//! directions so that exactly one has right-of-way at a time, with a
//! yellow clearance interval between conflicting phases. The phase
//! scheduler is a pure state machine; the controller runtime ticks it
//! once per second and feeds observers through a read-only snapshot.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod observability;
pub mod phase;
