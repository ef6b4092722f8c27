use crate::entity::report::{Report, ReportComment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentReadDto {
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CommentReadDto {
    pub fn from(model: ReportComment) -> CommentReadDto {
        Self {
            author: model.author,
            text: model.text,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportReadDto {
    pub id: Uuid,
    pub file_name: String,
    pub report_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub comments: Vec<CommentReadDto>,
}

impl ReportReadDto {
    pub fn from(model: Report, comments: Vec<ReportComment>) -> ReportReadDto {
        Self {
            id: model.id,
            file_name: model.file_name,
            report_type: model.report_type,
            uploaded_at: model.uploaded_at,
            comments: comments.into_iter().map(CommentReadDto::from).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct CommentCreateDto {
    #[validate(length(min = 1, max = 2000, message = "Comment text is required"))]
    pub text: String,
    #[validate(length(min = 1, max = 200, message = "Comment author is required"))]
    pub author: String,
}
