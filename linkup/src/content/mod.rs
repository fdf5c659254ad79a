//! Owner-managed posts and job listings.

pub mod jobs;
pub mod posts;

pub use jobs::JobService;
pub use posts::PostService;
