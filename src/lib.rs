//! Analysis core for the seismic event dashboard.
//!
//! Ingests raw event records from two collaborators — a live USGS feed
//! covering a recent sliding window and a static multi-decade historical
//! archive — and turns them into the structures every page renders from:
//! normalized event sequences, filtered subsets, per-country attribution,
//! and summary statistics. Retrieval mechanics (HTTP, file loading) and
//! all rendering live outside this crate.
//!
//! Data flows one way:
//! raw records -> `ingest` -> `merge` -> `filter` -> `attribution` ->
//! `analysis` -> plain serializable outputs.
//!
//! Every stage is a pure function over immutable inputs except the
//! attribution cache inside `attribution::AttributionIndex`, which is an
//! injectable, lock-guarded memo. Country attribution is deliberately
//! approximate — coastal and oceanic epicenters resolve by nearest
//! boundary within a cutoff, or not at all — and its results are
//! statistical estimates for aggregation, not geopolitical assertions.

pub mod analysis;
pub mod attribution;
pub mod boundaries;
pub mod filter;
pub mod ingest;
pub mod logging;
pub mod merge;
pub mod model;
pub mod settings;
