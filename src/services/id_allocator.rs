use std::sync::{Arc, Mutex, PoisonError};

use crate::database::{EntityKind, Store};
use crate::error::{Error, Result};

/// Hands out fresh ids for one table. Ids are never handed out twice, even
/// after the record that held one is deleted.
#[derive(Debug)]
pub struct IdAllocator {
    kind: EntityKind,
    // Wider than an id so a table already holding `i32::MAX` still loads.
    next: Mutex<i64>,
}

impl IdAllocator {
    pub fn starting_at(kind: EntityKind, next: i32) -> Self {
        Self::resuming_at(kind, i64::from(next))
    }

    fn resuming_at(kind: EntityKind, next: i64) -> Self {
        Self {
            kind,
            next: Mutex::new(next),
        }
    }

    /// Resumes after the highest persisted id, or at `floor` if that is higher.
    pub async fn from_store(store: &dyn Store, kind: EntityKind, floor: i32) -> Result<Self> {
        let floor = i64::from(floor);
        let next = match store.max_id(kind).await? {
            Some(max) => (i64::from(max) + 1).max(floor),
            None => floor,
        };
        if next > i64::from(i32::MAX) {
            tracing::warn!(table = kind.table(), "id space exhausted, inserts will fail");
        } else {
            tracing::info!(table = kind.table(), next_id = next, "id allocator ready");
        }
        Ok(Self::resuming_at(kind, next))
    }

    pub fn next(&self) -> Result<i32> {
        let mut guard = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let id = i32::try_from(*guard)
            .map_err(|_| Error::Internal(format!("{} ids exhausted", self.kind)))?;
        *guard += 1;
        Ok(id)
    }

    /// The id the next call to [`next`](Self::next) will return.
    pub fn peek(&self) -> i64 {
        *self.next.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One allocator per table.
#[derive(Debug, Clone)]
pub struct IdAllocators {
    pub questions: Arc<IdAllocator>,
    pub answers: Arc<IdAllocator>,
    pub todos: Arc<IdAllocator>,
}

impl IdAllocators {
    pub async fn load(store: &dyn Store, floor: i32) -> Result<Self> {
        Ok(Self {
            questions: Arc::new(IdAllocator::from_store(store, EntityKind::Question, floor).await?),
            answers: Arc::new(IdAllocator::from_store(store, EntityKind::Answer, floor).await?),
            todos: Arc::new(IdAllocator::from_store(store, EntityKind::Todo, floor).await?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::{answer::Answer, question::Question};

    #[test]
    fn hands_out_increasing_ids() {
        let ids = IdAllocator::starting_at(EntityKind::Answer, 7);
        assert_eq!(tokio_test::assert_ok!(ids.next()), 7);
        assert_eq!(tokio_test::assert_ok!(ids.next()), 8);
        assert_eq!(ids.peek(), 9);
    }

    #[test]
    fn refuses_to_wrap_around() {
        let ids = IdAllocator::starting_at(EntityKind::Todo, i32::MAX);
        assert_eq!(tokio_test::assert_ok!(ids.next()), i32::MAX);
        tokio_test::assert_err!(ids.next());
        tokio_test::assert_err!(ids.next());
    }

    #[test]
    fn concurrent_callers_never_share_an_id() {
        let ids = Arc::new(IdAllocator::starting_at(EntityKind::Question, 0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..100).map(|_| ids.next().unwrap()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<i32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
        assert_eq!(ids.peek(), 800);
    }

    #[tokio::test]
    async fn resumes_per_table_after_restart() {
        let questions = (0..3)
            .map(|id| Question {
                id: Some(id),
                text: Some(format!("q{}", id)),
                kind: Some(1),
                answer_id: None,
            })
            .collect();
        let answers = (3..5)
            .map(|id| Answer {
                id: Some(id),
                text: Some(format!("a{}", id)),
                kind: Some(0),
                question_id: None,
            })
            .collect();
        let store = MemoryStore::from_records(questions, answers, vec![]);

        let ids = IdAllocators::load(&store, 0).await.unwrap();
        assert_eq!(ids.questions.peek(), 3);
        assert_eq!(ids.answers.peek(), 5);
        assert_eq!(ids.todos.peek(), 0);
    }

    #[tokio::test]
    async fn floor_wins_over_low_existing_ids() {
        let store = MemoryStore::new();
        let ids = IdAllocators::load(&store, 100).await.unwrap();
        assert_eq!(ids.answers.next().unwrap(), 100);
    }

    #[tokio::test]
    async fn full_table_still_loads_and_fails_on_next() {
        let question = Question {
            id: Some(i32::MAX),
            text: Some("last".into()),
            kind: Some(1),
            answer_id: None,
        };
        let store = MemoryStore::from_records(vec![question], vec![], vec![]);

        let ids = tokio_test::assert_ok!(IdAllocators::load(&store, 0).await);
        assert_eq!(ids.questions.peek(), i64::from(i32::MAX) + 1);
        tokio_test::assert_err!(ids.questions.next());
        assert_eq!(tokio_test::assert_ok!(ids.answers.next()), 0);
    }
}
