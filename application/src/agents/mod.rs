//! Research agents
//!
//! Each agent receives its ports at construction and exposes only the
//! operation its role needs:
//!
//! - [`CoarseDiscoveryAgent`]: symptoms to candidate names
//! - [`DeepResearchAgent`]: one candidate to one finding
//! - [`ForumCoordinator`]: findings to adjusted confidences

pub mod coarse_discovery;
pub mod deep_research;
pub mod forum;

pub use coarse_discovery::{CoarseDiscoveryAgent, DiscoveryOutcome};
pub use deep_research::{DeepResearchAgent, DeepResearchOutcome};
pub use forum::ForumCoordinator;
