//! Entity-load select statements and their caches.

pub mod influencers;
pub mod loader;

pub use influencers::{AppliedGraph, CascadingFetchProfile, LoadQueryInfluencers};
pub use loader::{JdbcSelect, MultiIdLoader, SingleIdLoader, UniqueKeyLoader};
