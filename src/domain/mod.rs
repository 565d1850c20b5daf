pub mod node;
pub mod edge;
pub mod graph;
pub mod index;
pub mod provenance;
pub mod chain;
pub mod consumer;
pub mod returns;
pub mod classifier;
pub mod cross_method;
pub mod ports;
