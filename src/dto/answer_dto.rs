use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /answers`. A client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerPayload {
    #[validate(required, length(min = 1))]
    pub text: Option<String>,
    #[serde(rename = "type")]
    #[validate(required)]
    pub kind: Option<i32>,
    pub question_id: Option<i32>,
}

/// Body of `PATCH /answers`. Only supplied fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswerPayload {
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_text_and_type() {
        let payload: CreateAnswerPayload = serde_json::from_str(r#"{"type": 1}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: CreateAnswerPayload =
            serde_json::from_str(r#"{"text": "", "type": 1}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: CreateAnswerPayload = serde_json::from_str(r#"{"text": "Cat"}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: CreateAnswerPayload =
            serde_json::from_str(r#"{"id": 99, "text": "Cat", "type": 1, "questionId": 2}"#)
                .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.question_id, Some(2));
    }

    #[test]
    fn patch_rejects_empty_text_but_allows_absent_text() {
        let payload: UpdateAnswerPayload = serde_json::from_str(r#"{"text": ""}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: UpdateAnswerPayload = serde_json::from_str(r#"{"type": 2}"#).unwrap();
        assert!(payload.validate().is_ok());
    }
}
