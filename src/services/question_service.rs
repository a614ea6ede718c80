use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::database::Store;
use crate::dto::question_dto::CreateQuestionPayload;
use crate::error::{Error, Result};
use crate::models::{kinds::ResponseType, question::Question};
use crate::services::id_allocator::IdAllocator;
use crate::utils::{time::with_timeout, validation};

#[derive(Clone)]
pub struct QuestionService {
    store: Arc<dyn Store>,
    ids: Arc<IdAllocator>,
    timeout: Duration,
}

impl QuestionService {
    pub fn new(store: Arc<dyn Store>, ids: Arc<IdAllocator>, timeout: Duration) -> Self {
        Self { store, ids, timeout }
    }

    pub async fn list(&self) -> Result<Vec<Question>> {
        with_timeout(self.timeout, "list questions", self.store.find_all_questions()).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Question> {
        with_timeout(self.timeout, "find question", self.store.find_question(id))
            .await?
            .ok_or_else(|| Error::NotFound(format!("Question {} not found", id)))
    }

    /// Stores a new question and points its answer back at it.
    ///
    /// Nothing is allocated or written unless the payload is valid and the
    /// referenced answer exists and is still unlinked.
    pub async fn create(&self, payload: CreateQuestionPayload) -> Result<Question> {
        validation::validate(&payload)?;
        let (Some(text), Some(kind), Some(answer_id)) =
            (payload.text, payload.kind, payload.answer_id)
        else {
            return Err(Error::BadRequest("text, type and answerId are required".into()));
        };

        let answer = with_timeout(self.timeout, "find answer", self.store.find_answer(answer_id))
            .await?
            .ok_or_else(|| Error::NotFound(format!("Answer {} not found", answer_id)))?;
        if let Some(owner) = answer.question_id {
            return Err(Error::LinkConflict(format!(
                "Answer {} is already linked to question {}",
                answer_id, owner
            )));
        }

        let question = Question {
            id: Some(self.ids.next()?),
            text: Some(text),
            kind: Some(kind),
            answer_id: Some(answer_id),
        };
        let stored = with_timeout(
            self.timeout,
            "insert question",
            self.store.insert_question_linked(&question),
        )
        .await
        .map_err(Error::into_bad_request)?;

        info!(
            question_id = ?stored.id,
            answer_id,
            response_type = ?ResponseType::try_from(kind).ok(),
            "question created and linked"
        );
        Ok(stored)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let deleted =
            with_timeout(self.timeout, "delete question", self.store.delete_question(id)).await?;
        if !deleted {
            return Err(Error::NotFound(format!("Question {} not found", id)));
        }
        info!(question_id = id, "question deleted");
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<u64> {
        let removed =
            with_timeout(self.timeout, "delete questions", self.store.delete_all_questions())
                .await?;
        info!(removed, "all questions deleted");
        Ok(removed)
    }
}
