//! Idea data models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An idea posted to the board.
///
/// `votes` is kept equal to the number of vote rows referencing the idea;
/// it is only ever incremented inside the vote-casting transaction.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Idea {
    pub id: Uuid,
    pub title: String,
    pub votes: i32,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new idea.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateIdeaDto {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
}

/// DTO for updating an idea's title. Creator-only.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateTitleDto {
    #[serde(rename = "newTitle")]
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub new_title: String,
}

/// Detailed report of an idea: creator and voters are projected to
/// usernames only, never raw user records.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct IdeaReport {
    pub id: Uuid,
    pub title: String,
    pub creator: String,
    #[serde(rename = "votesCount")]
    pub votes_count: i32,
    pub voters: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_title_dto_uses_camel_case_field() {
        let dto: UpdateTitleDto = serde_json::from_value(serde_json::json!({
            "newTitle": "Better title"
        }))
        .unwrap();
        assert_eq!(dto.new_title, "Better title");
    }

    #[test]
    fn test_report_serializes_votes_count_camel_case() {
        let report = IdeaReport {
            id: Uuid::new_v4(),
            title: "Dark mode".to_string(),
            creator: "alice".to_string(),
            votes_count: 2,
            voters: vec!["bob".to_string(), "carol".to_string()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["votesCount"], 2);
        assert_eq!(json["voters"][0], "bob");
    }
}
