pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::database::Store;
use crate::services::{
    answer_service::AnswerService, id_allocator::IdAllocators, question_service::QuestionService,
    todo_service::TodoService,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub store_timeout: Duration,
    pub question_service: QuestionService,
    pub answer_service: AnswerService,
    pub todo_service: TodoService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, ids: IdAllocators, config: &Config) -> Self {
        let question_service =
            QuestionService::new(store.clone(), ids.questions, config.store_timeout);
        let answer_service = AnswerService::new(store.clone(), ids.answers, config.store_timeout);
        let todo_service = TodoService::new(
            store.clone(),
            ids.todos,
            config.store_timeout,
            config.public_base_url.clone(),
        );

        Self {
            store,
            store_timeout: config.store_timeout,
            question_service,
            answer_service,
            todo_service,
        }
    }

    /// Creates missing tables, then resumes each id allocator after the
    /// highest persisted id.
    pub async fn initialize(store: Arc<dyn Store>, config: &Config) -> error::Result<Self> {
        store.create_tables().await?;
        let ids = IdAllocators::load(store.as_ref(), config.id_floor).await?;
        Ok(Self::new(store, ids, config))
    }
}
