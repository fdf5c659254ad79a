//! Data Transfer Objects for the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use linkup::models::{
    CommentView, Conversation, Education, Experience, JobPatch, JobType, JobView, MessageView,
    PostPatch, PostView, ProfilePatch, Salary, User, UserSummary,
};
use linkup::storage::JobFilter;

use crate::error::{ServerError, bad_request};

/// Response envelope used by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of items when `data` is a list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            count: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            message: None,
        }
    }
}

/// Envelope carrying only a message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Full profile without credentials
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub title: String,
    pub location: String,
    pub avatar: String,
    pub bio: String,
    #[schema(value_type = Vec<Object>)]
    pub experience: Vec<Experience>,
    #[schema(value_type = Vec<Object>)]
    pub education: Vec<Education>,
    pub connections: u32,
    /// Ids of accepted connections
    pub connections_list: Vec<String>,
    /// Ids of users waiting for this user to accept
    pub pending_connections: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_inner(),
            name: user.name,
            email: user.email,
            title: user.title,
            location: user.location,
            avatar: user.avatar,
            bio: user.bio,
            experience: user.experience,
            education: user.education,
            connections: user.connections,
            connections_list: user.connections_list.iter().map(|id| id.to_string()).collect(),
            pending_connections: user
                .pending_connections
                .iter()
                .map(|id| id.to_string())
                .collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Display fields for a referenced user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: String,
    pub name: String,
    pub title: String,
    pub location: String,
    pub avatar: String,
    pub connections: u32,
}

impl From<UserSummary> for UserSummaryDto {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id.into_inner(),
            name: summary.name,
            title: summary.title,
            location: summary.location,
            avatar: summary.avatar,
            connections: summary.connections,
        }
    }
}

fn summaries(list: Vec<UserSummary>) -> Vec<UserSummaryDto> {
    list.into_iter().map(UserSummaryDto::from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: String,
    pub author: Option<UserSummaryDto>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentView> for CommentDto {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.id.into_inner(),
            author: view.author.map(Into::into),
            content: view.content,
            created_at: view.created_at,
        }
    }
}

/// Post with likes, comments and shares resolved to users
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: String,
    pub author: Option<UserSummaryDto>,
    pub content: String,
    pub image: String,
    pub likes: Vec<UserSummaryDto>,
    pub comments: Vec<CommentDto>,
    pub shares: Vec<UserSummaryDto>,
    pub likes_count: usize,
    pub comments_count: usize,
    pub shares_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostView> for PostDto {
    fn from(view: PostView) -> Self {
        Self {
            id: view.id.into_inner(),
            author: view.author.map(Into::into),
            content: view.content,
            image: view.image,
            likes: summaries(view.likes),
            comments: view.comments.into_iter().map(Into::into).collect(),
            shares: summaries(view.shares),
            likes_count: view.likes_count,
            comments_count: view.comments_count,
            shares_count: view.shares_count,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

/// Job listing with its poster and applicants resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobDto {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Full-time, Part-time, Contract or Internship
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
    pub posted_by: Option<UserSummaryDto>,
    pub applicants: Vec<UserSummaryDto>,
    pub applicants_count: usize,
    pub requirements: Vec<String>,
    #[schema(value_type = Option<Object>)]
    pub salary: Option<Salary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobView> for JobDto {
    fn from(view: JobView) -> Self {
        Self {
            id: view.id.into_inner(),
            title: view.title,
            company: view.company,
            location: view.location,
            job_type: view.job_type.to_string(),
            description: view.description,
            posted_by: view.posted_by.map(Into::into),
            applicants: summaries(view.applicants),
            applicants_count: view.applicants_count,
            requirements: view.requirements,
            salary: view.salary,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub id: String,
    pub sender: Option<UserSummaryDto>,
    pub receiver: Option<UserSummaryDto>,
    pub content: String,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<MessageView> for MessageDto {
    fn from(view: MessageView) -> Self {
        Self {
            id: view.id.into_inner(),
            sender: view.sender.map(Into::into),
            receiver: view.receiver.map(Into::into),
            content: view.content,
            read: view.read,
            read_at: view.read_at,
            created_at: view.created_at,
        }
    }
}

/// Latest message with one partner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationDto {
    pub partner: Option<UserSummaryDto>,
    pub last_message: MessageDto,
    pub unread_count: usize,
}

impl From<Conversation> for ConversationDto {
    fn from(conversation: Conversation) -> Self {
        Self {
            partner: conversation.partner.map(Into::into),
            last_message: conversation.last_message.into(),
            unread_count: conversation.unread_count,
        }
    }
}

/// User signup request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    /// Password (will be hashed)
    pub password: String,
    pub title: Option<String>,
    pub location: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    /// JWT token
    pub token: String,
    /// Token expiration timestamp
    pub expires_at: i64,
    pub user: UserDto,
}

/// Profile fields the owner may change
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub experience: Option<Vec<Experience>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub education: Option<Vec<Education>>,
}

impl From<UpdateProfileRequest> for ProfilePatch {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfilePatch {
            name: request.name,
            title: request.title,
            location: request.location,
            avatar: request.avatar,
            bio: request.bio,
            experience: request.experience,
            education: request.education,
        }
    }
}

/// Paging for list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Maximum number of items
    pub limit: Option<usize>,
    /// Number of items to skip
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub content: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub image: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(request: UpdatePostRequest) -> Self {
        PostPatch {
            content: request.content,
            image: request.image,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub content: String,
}

fn parse_job_type(value: &str) -> Result<JobType, ServerError> {
    value.parse().map_err(|e: String| bad_request(&e))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// Defaults to Full-time
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[schema(value_type = Option<Object>)]
    pub salary: Option<Salary>,
}

impl TryFrom<CreateJobRequest> for linkup::models::NewJob {
    type Error = ServerError;

    fn try_from(request: CreateJobRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: request.title,
            company: request.company,
            location: request.location,
            job_type: request
                .job_type
                .as_deref()
                .map(parse_job_type)
                .transpose()?
                .unwrap_or_default(),
            description: request.description,
            requirements: request.requirements,
            salary: request.salary,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub salary: Option<Salary>,
}

impl TryFrom<UpdateJobRequest> for JobPatch {
    type Error = ServerError;

    fn try_from(request: UpdateJobRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: request.title,
            company: request.company,
            location: request.location,
            job_type: request.job_type.as_deref().map(parse_job_type).transpose()?,
            description: request.description,
            requirements: request.requirements,
            salary: request.salary,
        })
    }
}

/// Job list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct JobQueryParams {
    /// Exact employment type, e.g. "Full-time"
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Case-insensitive substring of the company
    pub company: Option<String>,
}

impl TryFrom<JobQueryParams> for JobFilter {
    type Error = ServerError;

    fn try_from(params: JobQueryParams) -> Result<Self, Self::Error> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Ok(Self {
            job_type: non_empty(params.job_type)
                .as_deref()
                .map(parse_job_type)
                .transpose()?,
            location: non_empty(params.location),
            company: non_empty(params.company),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Id of the receiving user
    #[serde(alias = "receiver")]
    pub receiver_id: Option<String>,
    pub content: Option<String>,
}
