//! hyperview - 4D polytope viewer core
//!
//! Host-side pieces around [`hyperview_core`]: layered configuration and a
//! headless animation system that drives the projection pipeline.

pub mod config;
pub mod systems;
