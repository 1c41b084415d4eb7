//! Selection store, wall clock, and derived views for the Incident Solver.
//!
//! This crate owns the only mutable state in the system: which station,
//! line, and incident are selected, the active intent and scenario, and the
//! current time. Everything a presentation layer shows is derived from that
//! state and the immutable [`Catalog`](incident_catalog::Catalog).
//!
//! # Modules
//!
//! - [`clock`] -- Wall clock with a fixed tick interval and the
//!   [`TickObserver`] seam.
//! - [`config`] -- Configuration loading from `incident-config.yaml` into
//!   strongly-typed structs.
//! - [`derive`] -- Pure derivations: filtered recommendations, elapsed-time
//!   labels, line names, scenario datasets, station search.
//! - [`map`] -- Stations to pin and the viewport for the current incident.
//! - [`store`] -- [`SelectionStore`] and its serializable snapshot.
//!
//! [`TickObserver`]: clock::TickObserver
//! [`SelectionStore`]: store::SelectionStore

pub mod clock;
pub mod config;
pub mod derive;
pub mod map;
pub mod store;
