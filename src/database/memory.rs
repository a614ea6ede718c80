use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::database::store::{require_id, EntityKind, Store};
use crate::error::{Error, Result};
use crate::models::{answer::Answer, question::Question, todo::ToDo};

#[derive(Debug, Default)]
struct Tables {
    questions: BTreeMap<i32, Question>,
    answers: BTreeMap<i32, Answer>,
    todos: BTreeMap<i32, ToDo>,
}

/// Embedded store. Every call holds one lock over all tables, so the linked
/// writes are atomic without further coordination.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store over previously persisted rows, as found after a restart.
    /// Rows without an id are skipped.
    pub fn from_records(questions: Vec<Question>, answers: Vec<Answer>, todos: Vec<ToDo>) -> Self {
        let tables = Tables {
            questions: questions
                .into_iter()
                .filter_map(|q| q.id.map(|id| (id, q)))
                .collect(),
            answers: answers
                .into_iter()
                .filter_map(|a| a.id.map(|id| (id, a)))
                .collect(),
            todos: todos
                .into_iter()
                .filter_map(|t| t.id.map(|id| (id, t)))
                .collect(),
        };
        Self {
            tables: Mutex::new(tables),
        }
    }
}

fn duplicate(kind: EntityKind, id: i32) -> Error {
    Error::BadRequest(format!("{} {} already exists", kind, id))
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn create_tables(&self) -> Result<()> {
        Ok(())
    }

    async fn max_id(&self, kind: EntityKind) -> Result<Option<i32>> {
        let tables = self.tables.lock().await;
        let max = match kind {
            EntityKind::Question => tables.questions.keys().next_back().copied(),
            EntityKind::Answer => tables.answers.keys().next_back().copied(),
            EntityKind::Todo => tables.todos.keys().next_back().copied(),
        };
        Ok(max)
    }

    async fn find_question(&self, id: i32) -> Result<Option<Question>> {
        Ok(self.tables.lock().await.questions.get(&id).cloned())
    }

    async fn find_all_questions(&self) -> Result<Vec<Question>> {
        Ok(self.tables.lock().await.questions.values().cloned().collect())
    }

    async fn insert_question_linked(&self, question: &Question) -> Result<Question> {
        let question_id = require_id(EntityKind::Question, question.id)?;
        let answer_id = question
            .answer_id
            .ok_or_else(|| Error::BadRequest("Question must reference an answer".into()))?;

        let mut tables = self.tables.lock().await;
        if tables.questions.contains_key(&question_id) {
            return Err(duplicate(EntityKind::Question, question_id));
        }
        let answer = tables
            .answers
            .get_mut(&answer_id)
            .ok_or_else(|| Error::NotFound(format!("Answer {} not found", answer_id)))?;
        if let Some(owner) = answer.question_id {
            return Err(Error::LinkConflict(format!(
                "Answer {} is already linked to question {}",
                answer_id, owner
            )));
        }
        answer.question_id = Some(question_id);
        tables.questions.insert(question_id, question.clone());
        Ok(question.clone())
    }

    async fn delete_question(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        for answer in tables.answers.values_mut() {
            if answer.question_id == Some(id) {
                answer.question_id = None;
            }
        }
        Ok(tables.questions.remove(&id).is_some())
    }

    async fn delete_all_questions(&self) -> Result<u64> {
        let mut tables = self.tables.lock().await;
        for answer in tables.answers.values_mut() {
            answer.question_id = None;
        }
        let removed = tables.questions.len() as u64;
        tables.questions.clear();
        Ok(removed)
    }

    async fn find_answer(&self, id: i32) -> Result<Option<Answer>> {
        Ok(self.tables.lock().await.answers.get(&id).cloned())
    }

    async fn find_all_answers(&self) -> Result<Vec<Answer>> {
        Ok(self.tables.lock().await.answers.values().cloned().collect())
    }

    async fn insert_answer_linked(&self, answer: &Answer) -> Result<Answer> {
        let answer_id = require_id(EntityKind::Answer, answer.id)?;

        let mut tables = self.tables.lock().await;
        if tables.answers.contains_key(&answer_id) {
            return Err(duplicate(EntityKind::Answer, answer_id));
        }
        if let Some(question_id) = answer.question_id {
            let question = tables.questions.get_mut(&question_id).ok_or_else(|| {
                Error::BadRequest(format!("Question {} does not exist", question_id))
            })?;
            if let Some(owner) = question.answer_id {
                return Err(Error::LinkConflict(format!(
                    "Question {} already has answer {}",
                    question_id, owner
                )));
            }
            question.answer_id = Some(answer_id);
        }
        tables.answers.insert(answer_id, answer.clone());
        Ok(answer.clone())
    }

    async fn update_answer(&self, answer: &Answer) -> Result<Option<Answer>> {
        let id = require_id(EntityKind::Answer, answer.id)?;
        let mut tables = self.tables.lock().await;
        Ok(tables.answers.get_mut(&id).map(|current| {
            current.text = answer.text.clone();
            current.kind = answer.kind;
            current.clone()
        }))
    }

    async fn delete_answer(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        for question in tables.questions.values_mut() {
            if question.answer_id == Some(id) {
                question.answer_id = None;
            }
        }
        Ok(tables.answers.remove(&id).is_some())
    }

    async fn delete_all_answers(&self) -> Result<u64> {
        let mut tables = self.tables.lock().await;
        for question in tables.questions.values_mut() {
            question.answer_id = None;
        }
        let removed = tables.answers.len() as u64;
        tables.answers.clear();
        Ok(removed)
    }

    async fn find_todo(&self, id: i32) -> Result<Option<ToDo>> {
        Ok(self.tables.lock().await.todos.get(&id).cloned())
    }

    async fn find_all_todos(&self) -> Result<Vec<ToDo>> {
        Ok(self.tables.lock().await.todos.values().cloned().collect())
    }

    async fn insert_todo(&self, todo: &ToDo) -> Result<ToDo> {
        let id = require_id(EntityKind::Todo, todo.id)?;
        let mut tables = self.tables.lock().await;
        if tables.todos.contains_key(&id) {
            return Err(duplicate(EntityKind::Todo, id));
        }
        tables.todos.insert(id, todo.clone());
        Ok(todo.clone())
    }

    async fn update_todo(&self, todo: &ToDo) -> Result<Option<ToDo>> {
        let id = require_id(EntityKind::Todo, todo.id)?;
        let mut tables = self.tables.lock().await;
        Ok(tables.todos.get_mut(&id).map(|current| {
            *current = todo.clone();
            current.clone()
        }))
    }

    async fn delete_todo(&self, id: i32) -> Result<bool> {
        Ok(self.tables.lock().await.todos.remove(&id).is_some())
    }

    async fn delete_all_todos(&self) -> Result<u64> {
        let mut tables = self.tables.lock().await;
        let removed = tables.todos.len() as u64;
        tables.todos.clear();
        Ok(removed)
    }
}
