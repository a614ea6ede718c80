use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /questions`. A client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionPayload {
    #[validate(required, length(min = 1))]
    pub text: Option<String>,
    #[serde(rename = "type")]
    #[validate(required)]
    pub kind: Option<i32>,
    #[validate(required)]
    pub answer_id: Option<i32>,
}
