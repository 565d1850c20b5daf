//! return-boundary library: provenance and return-boundary tracing over a code-property graph.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod server;
