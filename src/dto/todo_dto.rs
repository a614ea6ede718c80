use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the legacy `POST /` and `PATCH /` routes. `id` and `url` are
/// assigned by the server and ignored when sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TodoPayload {
    pub user: Option<String>,
    pub order: Option<i32>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}
