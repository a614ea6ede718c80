use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::dto::todo_dto::TodoPayload;

/// Legacy to-do record kept from the service's first revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ToDo {
    pub id: Option<i32>,
    #[sqlx(rename = "owner")]
    pub user: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: Option<i32>,
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub url: Option<String>,
}

impl ToDo {
    pub fn merge(&mut self, patch: TodoPayload) {
        if let Some(user) = patch.user {
            self.user = Some(user);
        }
        if let Some(order) = patch.order {
            self.order = Some(order);
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(completed) = patch.completed {
            self.completed = Some(completed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_completed_keeps_title() {
        let mut current = ToDo {
            id: Some(0),
            user: None,
            order: None,
            title: Some("a".into()),
            completed: Some(false),
            url: Some("http://localhost:8080/0".into()),
        };
        current.merge(TodoPayload {
            completed: Some(true),
            ..Default::default()
        });
        assert_eq!(current.title.as_deref(), Some("a"));
        assert_eq!(current.completed, Some(true));
        assert_eq!(current.url.as_deref(), Some("http://localhost:8080/0"));
    }
}
