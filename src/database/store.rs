use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{answer::Answer, question::Question, todo::ToDo};

/// The persisted entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Question,
    Answer,
    Todo,
}

impl EntityKind {
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Question => "questions",
            EntityKind::Answer => "answers",
            EntityKind::Todo => "todos",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Question => "question",
            EntityKind::Answer => "answer",
            EntityKind::Todo => "todo",
        };
        f.write_str(name)
    }
}

/// Narrow repository over the three tables.
///
/// The `*_linked` inserts write the new record and the back-reference on the
/// record it points at as one unit: either both land or neither does. The
/// back-reference is only written if the target is still unlinked, otherwise
/// the call fails with [`Error::LinkConflict`](crate::error::Error::LinkConflict).
///
/// Deletes clear the back-reference on the partner record in the same unit.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<()>;

    /// Creates missing tables. Tables that already exist are logged and skipped.
    async fn create_tables(&self) -> Result<()>;

    async fn max_id(&self, kind: EntityKind) -> Result<Option<i32>>;

    async fn find_question(&self, id: i32) -> Result<Option<Question>>;
    async fn find_all_questions(&self) -> Result<Vec<Question>>;
    /// Inserts `question` and sets `questionId` on the answer it references.
    /// Fails with `NotFound` if that answer does not exist.
    async fn insert_question_linked(&self, question: &Question) -> Result<Question>;
    async fn delete_question(&self, id: i32) -> Result<bool>;
    async fn delete_all_questions(&self) -> Result<u64>;

    async fn find_answer(&self, id: i32) -> Result<Option<Answer>>;
    async fn find_all_answers(&self) -> Result<Vec<Answer>>;
    /// Inserts `answer`; when it carries a `questionId`, sets `answerId` on
    /// that question. Fails with `BadRequest` if the question does not exist.
    async fn insert_answer_linked(&self, answer: &Answer) -> Result<Answer>;
    async fn update_answer(&self, answer: &Answer) -> Result<Option<Answer>>;
    async fn delete_answer(&self, id: i32) -> Result<bool>;
    async fn delete_all_answers(&self) -> Result<u64>;

    async fn find_todo(&self, id: i32) -> Result<Option<ToDo>>;
    async fn find_all_todos(&self) -> Result<Vec<ToDo>>;
    async fn insert_todo(&self, todo: &ToDo) -> Result<ToDo>;
    async fn update_todo(&self, todo: &ToDo) -> Result<Option<ToDo>>;
    async fn delete_todo(&self, id: i32) -> Result<bool>;
    async fn delete_all_todos(&self) -> Result<u64>;
}

pub(crate) fn require_id(kind: EntityKind, id: Option<i32>) -> Result<i32> {
    id.ok_or_else(|| crate::error::Error::Internal(format!("{} record has no id", kind)))
}
