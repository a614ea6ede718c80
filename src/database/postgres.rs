use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::store::{require_id, EntityKind, Store};
use crate::error::{Error, Result};
use crate::models::{answer::Answer, question::Question, todo::ToDo};

const DUPLICATE_TABLE: &str = "42P07";

const CREATE_ANSWERS: &str = r#"
    CREATE TABLE answers (
        id INTEGER PRIMARY KEY,
        text TEXT,
        kind INTEGER,
        question_id INTEGER
    )
"#;

const CREATE_QUESTIONS: &str = r#"
    CREATE TABLE questions (
        id INTEGER PRIMARY KEY,
        text TEXT,
        kind INTEGER,
        answer_id INTEGER
    )
"#;

const CREATE_TODOS: &str = r#"
    CREATE TABLE todos (
        id INTEGER PRIMARY KEY,
        owner TEXT,
        sort_order INTEGER,
        title TEXT,
        completed BOOLEAN,
        url TEXT
    )
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn create_table(&self, kind: EntityKind, ddl: &str) -> Result<()> {
        match sqlx::query(ddl).execute(&self.pool).await {
            Ok(_) => {
                tracing::info!(table = kind.table(), "created table");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(DUPLICATE_TABLE) => {
                tracing::warn!(table = kind.table(), "table already exists: {}", db_err);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_tables(&self) -> Result<()> {
        self.create_table(EntityKind::Answer, CREATE_ANSWERS).await?;
        self.create_table(EntityKind::Question, CREATE_QUESTIONS).await?;
        self.create_table(EntityKind::Todo, CREATE_TODOS).await?;
        Ok(())
    }

    async fn max_id(&self, kind: EntityKind) -> Result<Option<i32>> {
        let query = format!("SELECT MAX(id) FROM {}", kind.table());
        let max = sqlx::query_scalar::<_, Option<i32>>(&query)
            .fetch_one(&self.pool)
            .await?;
        Ok(max)
    }

    async fn find_question(&self, id: i32) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, text, kind, answer_id FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn find_all_questions(&self) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, text, kind, answer_id FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn insert_question_linked(&self, question: &Question) -> Result<Question> {
        let question_id = require_id(EntityKind::Question, question.id)?;
        let answer_id = question
            .answer_id
            .ok_or_else(|| Error::BadRequest("Question must reference an answer".into()))?;

        let mut tx = self.pool.begin().await?;

        let linked = sqlx::query(
            "UPDATE answers SET question_id = $1 WHERE id = $2 AND question_id IS NULL",
        )
        .bind(question_id)
        .bind(answer_id)
        .execute(&mut *tx)
        .await?;

        if linked.rows_affected() == 0 {
            let current = sqlx::query_scalar::<_, Option<i32>>(
                "SELECT question_id FROM answers WHERE id = $1",
            )
            .bind(answer_id)
            .fetch_optional(&mut *tx)
            .await?;
            // dropping `tx` rolls back
            return Err(match current {
                None => Error::NotFound(format!("Answer {} not found", answer_id)),
                Some(owner) => Error::LinkConflict(format!(
                    "Answer {} is already linked to question {}",
                    answer_id,
                    owner.unwrap_or_default()
                )),
            });
        }

        let stored = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (id, text, kind, answer_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, kind, answer_id
            "#,
        )
        .bind(question_id)
        .bind(&question.text)
        .bind(question.kind)
        .bind(answer_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn delete_question(&self, id: i32) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE answers SET question_id = NULL WHERE question_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all_questions(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE answers SET question_id = NULL WHERE question_id IS NOT NULL")
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM questions").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(res.rows_affected())
    }

    async fn find_answer(&self, id: i32) -> Result<Option<Answer>> {
        let answer = sqlx::query_as::<_, Answer>(
            "SELECT id, text, kind, question_id FROM answers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(answer)
    }

    async fn find_all_answers(&self) -> Result<Vec<Answer>> {
        let answers = sqlx::query_as::<_, Answer>(
            "SELECT id, text, kind, question_id FROM answers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(answers)
    }

    async fn insert_answer_linked(&self, answer: &Answer) -> Result<Answer> {
        let answer_id = require_id(EntityKind::Answer, answer.id)?;

        let mut tx = self.pool.begin().await?;

        if let Some(question_id) = answer.question_id {
            let linked = sqlx::query(
                "UPDATE questions SET answer_id = $1 WHERE id = $2 AND answer_id IS NULL",
            )
            .bind(answer_id)
            .bind(question_id)
            .execute(&mut *tx)
            .await?;

            if linked.rows_affected() == 0 {
                let current = sqlx::query_scalar::<_, Option<i32>>(
                    "SELECT answer_id FROM questions WHERE id = $1",
                )
                .bind(question_id)
                .fetch_optional(&mut *tx)
                .await?;
                return Err(match current {
                    None => Error::BadRequest(format!("Question {} does not exist", question_id)),
                    Some(owner) => Error::LinkConflict(format!(
                        "Question {} already has answer {}",
                        question_id,
                        owner.unwrap_or_default()
                    )),
                });
            }
        }

        let stored = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (id, text, kind, question_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, kind, question_id
            "#,
        )
        .bind(answer_id)
        .bind(&answer.text)
        .bind(answer.kind)
        .bind(answer.question_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn update_answer(&self, answer: &Answer) -> Result<Option<Answer>> {
        let id = require_id(EntityKind::Answer, answer.id)?;
        let updated = sqlx::query_as::<_, Answer>(
            r#"
            UPDATE answers
            SET text = $2, kind = $3
            WHERE id = $1
            RETURNING id, text, kind, question_id
            "#,
        )
        .bind(id)
        .bind(&answer.text)
        .bind(answer.kind)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_answer(&self, id: i32) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE questions SET answer_id = NULL WHERE answer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all_answers(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE questions SET answer_id = NULL WHERE answer_id IS NOT NULL")
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM answers").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(res.rows_affected())
    }

    async fn find_todo(&self, id: i32) -> Result<Option<ToDo>> {
        let todo = sqlx::query_as::<_, ToDo>(
            "SELECT id, owner, sort_order, title, completed, url FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn find_all_todos(&self) -> Result<Vec<ToDo>> {
        let todos = sqlx::query_as::<_, ToDo>(
            "SELECT id, owner, sort_order, title, completed, url FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn insert_todo(&self, todo: &ToDo) -> Result<ToDo> {
        let id = require_id(EntityKind::Todo, todo.id)?;
        let stored = sqlx::query_as::<_, ToDo>(
            r#"
            INSERT INTO todos (id, owner, sort_order, title, completed, url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner, sort_order, title, completed, url
            "#,
        )
        .bind(id)
        .bind(&todo.user)
        .bind(todo.order)
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(&todo.url)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn update_todo(&self, todo: &ToDo) -> Result<Option<ToDo>> {
        let id = require_id(EntityKind::Todo, todo.id)?;
        let updated = sqlx::query_as::<_, ToDo>(
            r#"
            UPDATE todos
            SET owner = $2, sort_order = $3, title = $4, completed = $5, url = $6
            WHERE id = $1
            RETURNING id, owner, sort_order, title, completed, url
            "#,
        )
        .bind(id)
        .bind(&todo.user)
        .bind(todo.order)
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(&todo.url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_todo(&self, id: i32) -> Result<bool> {
        let res = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all_todos(&self) -> Result<u64> {
        let res = sqlx::query("DELETE FROM todos").execute(&self.pool).await?;
        Ok(res.rows_affected())
    }
}
