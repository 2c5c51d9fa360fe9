//! # vlab-dashboard-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DashboardBackend` — the board/statistics/trigger HTTP endpoints
//!   - `DashboardView` — render targets fed by the polling cycles
//!   - `ChartHandle` — the owned hourly chart instance
//! - Provide the use-case services:
//!   - `ActionController` — one per triggerable action, arbitrates clicks
//!     against poll-observed progress
//!   - `Poller` — the two fixed-cadence fetch-and-dispatch cycles
//! - Orchestrate domain objects without knowing *how* HTTP or rendering works
//!
//! ## Dependency rule
//! Depends on `vlab-dashboard-domain` only (plus `tokio` for tasks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
