//! Port definitions
//!
//! Interfaces the application layer expects from the outside world.
//! Adapters live in the infrastructure and presentation layers.

pub mod progress;
pub mod reasoning;
pub mod research;
