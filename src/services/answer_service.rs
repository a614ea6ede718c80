use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::database::Store;
use crate::dto::answer_dto::{CreateAnswerPayload, UpdateAnswerPayload};
use crate::error::{Error, Result};
use crate::models::{answer::Answer, kinds::AnimalType};
use crate::services::id_allocator::IdAllocator;
use crate::utils::{time::with_timeout, validation};

#[derive(Clone)]
pub struct AnswerService {
    store: Arc<dyn Store>,
    ids: Arc<IdAllocator>,
    timeout: Duration,
}

impl AnswerService {
    pub fn new(store: Arc<dyn Store>, ids: Arc<IdAllocator>, timeout: Duration) -> Self {
        Self { store, ids, timeout }
    }

    pub async fn list(&self) -> Result<Vec<Answer>> {
        with_timeout(self.timeout, "list answers", self.store.find_all_answers()).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Answer> {
        with_timeout(self.timeout, "find answer", self.store.find_answer(id))
            .await?
            .ok_or_else(|| Error::NotFound(format!("Answer {} not found", id)))
    }

    /// Stores a new answer. With a `questionId`, the question must exist and
    /// have no answer yet; it is then pointed at the new answer.
    pub async fn create(&self, payload: CreateAnswerPayload) -> Result<Answer> {
        validation::validate(&payload)?;
        let (Some(text), Some(kind)) = (payload.text, payload.kind) else {
            return Err(Error::BadRequest("text and type are required".into()));
        };
        let animal = validation::decode_kind::<AnimalType>("type", kind)?;

        if let Some(question_id) = payload.question_id {
            let question =
                with_timeout(self.timeout, "find question", self.store.find_question(question_id))
                    .await?
                    .ok_or_else(|| {
                        Error::BadRequest(format!("Question {} does not exist", question_id))
                    })?;
            if let Some(owner) = question.answer_id {
                return Err(Error::LinkConflict(format!(
                    "Question {} already has answer {}",
                    question_id, owner
                )));
            }
        }

        let answer = Answer {
            id: Some(self.ids.next()?),
            text: Some(text),
            kind: Some(kind),
            question_id: payload.question_id,
        };
        let stored = with_timeout(
            self.timeout,
            "insert answer",
            self.store.insert_answer_linked(&answer),
        )
        .await
        .map_err(Error::into_bad_request)?;

        info!(
            answer_id = ?stored.id,
            question_id = ?stored.question_id,
            "answer created {}",
            animal.emoji()
        );
        Ok(stored)
    }

    /// Applies the non-null fields of `patch` to answer `id`.
    pub async fn update(&self, id: i32, patch: UpdateAnswerPayload) -> Result<Answer> {
        validation::validate(&patch)?;
        if let Some(kind) = patch.kind {
            validation::decode_kind::<AnimalType>("type", kind)?;
        }

        let mut current = self.get_by_id(id).await?;
        if current.id != Some(id) {
            error!(requested = id, found = ?current.id, "answer lookup returned a different record");
            return Err(Error::Internal(format!(
                "Answer lookup for {} returned record {:?}",
                id, current.id
            )));
        }

        current.merge(patch);
        let updated = with_timeout(self.timeout, "update answer", self.store.update_answer(&current))
            .await?
            .ok_or_else(|| Error::NotFound(format!("Answer {} not found", id)))?;
        info!(answer_id = id, "answer updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let deleted =
            with_timeout(self.timeout, "delete answer", self.store.delete_answer(id)).await?;
        if !deleted {
            return Err(Error::NotFound(format!("Answer {} not found", id)));
        }
        info!(answer_id = id, "answer deleted");
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<u64> {
        let removed =
            with_timeout(self.timeout, "delete answers", self.store.delete_all_answers()).await?;
        info!(removed, "all answers deleted");
        Ok(removed)
    }
}
