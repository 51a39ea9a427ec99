//! Compilation of semantic facts into a [`crate::TransitGraph`]
//!
//! A build is all-or-nothing: any bad fact aborts it and no partially
//! constructed graph is ever returned. Rebuilds run the whole pipeline
//! again; there is no incremental update.

mod builder;
mod config;
mod transfers;

pub use builder::build_graph;
pub use config::GraphConfig;
