//! Engagement on posts and job listings, and the owner checks guarding
//! owner-only edits.

pub mod aggregator;
pub mod ownership;

pub use aggregator::EngagementAggregator;
pub use ownership::{Owned, ensure_owner};
