//! Domain models for users, posts, jobs and messages

pub mod id_set;
pub mod ids;
pub mod job;
pub mod message;
pub mod post;
pub mod user;
pub mod views;

// Re-export important models
pub use id_set::IdSet;
pub use ids::{CommentId, JobId, MessageId, PostId, UserId};
pub use job::{Job, JobPatch, JobType, NewJob, Salary};
pub use message::Message;
pub use post::{Comment, Post, PostPatch};
pub use user::{
    DEFAULT_AVATAR, Education, Experience, NewUser, ProfilePatch, User, UserSummary,
    normalize_email,
};
pub use views::{CommentView, Conversation, JobView, MessageView, PostView, UserDirectory};
