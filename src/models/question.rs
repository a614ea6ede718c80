use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A question posed to the player. `answer_id` points at the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Option<i32>,
    pub text: Option<String>,
    /// Response kind, see [`ResponseType`](super::kinds::ResponseType).
    #[serde(rename = "type")]
    pub kind: Option<i32>,
    pub answer_id: Option<i32>,
}
