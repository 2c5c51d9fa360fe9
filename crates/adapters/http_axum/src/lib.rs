//! # vlab-dashboard-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - The **render pipeline**: pure functions turning payloads into markup
//!   through askama templates (`widgets`), and the badge lookups
//! - The [`Document`](document::Document): the in-memory view the poller and
//!   the action controllers render into
//! - The [`SvgChart`](chart::SvgChart): the hourly chart handle, drawn with
//!   plotters into the document
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: action buttons are `<form>` elements that POST and
//!   redirect (PRG pattern), and `<meta http-equiv="refresh">` reloads the page
//!
//! ## Dependency rule
//! Depends on `vlab-dashboard-app` (for port traits and services) and
//! `vlab-dashboard-domain` (for payload types). Never leaks axum types into
//! the domain.

pub mod api;
pub mod chart;
pub mod dashboard;
pub mod document;
pub mod router;
pub mod state;
pub mod widgets;
