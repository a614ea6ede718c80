use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::database::Store;
use crate::dto::todo_dto::TodoPayload;
use crate::error::{Error, Result};
use crate::models::todo::ToDo;
use crate::services::id_allocator::IdAllocator;
use crate::utils::time::with_timeout;

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn Store>,
    ids: Arc<IdAllocator>,
    timeout: Duration,
    base_url: String,
}

impl TodoService {
    pub fn new(
        store: Arc<dyn Store>,
        ids: Arc<IdAllocator>,
        timeout: Duration,
        base_url: String,
    ) -> Self {
        Self {
            store,
            ids,
            timeout,
            base_url,
        }
    }

    pub async fn list(&self) -> Result<Vec<ToDo>> {
        with_timeout(self.timeout, "list todos", self.store.find_all_todos()).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ToDo> {
        with_timeout(self.timeout, "find todo", self.store.find_todo(id))
            .await?
            .ok_or_else(|| Error::NotFound(format!("ToDo {} not found", id)))
    }

    pub async fn create(&self, payload: TodoPayload) -> Result<ToDo> {
        let id = self.ids.next()?;
        let todo = ToDo {
            id: Some(id),
            user: payload.user,
            order: payload.order,
            title: payload.title,
            completed: Some(payload.completed.unwrap_or(false)),
            url: Some(format!("{}/{}", self.base_url, id)),
        };
        let stored = with_timeout(self.timeout, "insert todo", self.store.insert_todo(&todo))
            .await
            .map_err(Error::into_bad_request)?;
        info!(todo_id = id, "todo created");
        Ok(stored)
    }

    pub async fn update(&self, id: i32, patch: TodoPayload) -> Result<ToDo> {
        let mut current = self.get_by_id(id).await?;
        if current.id != Some(id) {
            error!(requested = id, found = ?current.id, "todo lookup returned a different record");
            return Err(Error::Internal(format!(
                "ToDo lookup for {} returned record {:?}",
                id, current.id
            )));
        }

        current.merge(patch);
        with_timeout(self.timeout, "update todo", self.store.update_todo(&current))
            .await?
            .ok_or_else(|| Error::NotFound(format!("ToDo {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !with_timeout(self.timeout, "delete todo", self.store.delete_todo(id)).await? {
            return Err(Error::NotFound(format!("ToDo {} not found", id)));
        }
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<u64> {
        with_timeout(self.timeout, "delete todos", self.store.delete_all_todos()).await
    }
}
