use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::dto::answer_dto::UpdateAnswerPayload;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: Option<i32>,
    pub text: Option<String>,
    /// Animal category, see [`AnimalType`](super::kinds::AnimalType).
    #[serde(rename = "type")]
    pub kind: Option<i32>,
    pub question_id: Option<i32>,
}

impl Answer {
    /// Overwrites the fields the patch carries and leaves the rest alone.
    /// Link fields are not patchable.
    pub fn merge(&mut self, patch: UpdateAnswerPayload) {
        if let Some(text) = patch.text {
            self.text = Some(text);
        }
        if let Some(kind) = patch.kind {
            self.kind = Some(kind);
        }
    }
}
