//! # vlab-dashboard-domain
//!
//! Pure domain model for the VLAB board-pool dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, formatting helpers
//! - Define **board payloads** (per-board snapshots, fleet totals, per-class
//!   summaries) exactly as the backend reports them
//! - Define **statistics payloads** (hourly histogram, per-user table, denial log)
//! - Define the **action state machine** driving the hardware-test and
//!   config-reload buttons
//! - Define the **chart dataset** and its tick-thinning rule
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

mod de;

pub mod error;
pub mod format;
pub mod time;

pub mod action;
pub mod board;
pub mod chart;
pub mod stats;
