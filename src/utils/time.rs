use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};

/// Bounds a persistence call. `what` names the operation in the error.
pub async fn with_timeout<T, F>(limit: Duration, what: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation = what, timeout_ms = limit.as_millis() as u64, "store call timed out");
            Err(Error::Timeout(format!(
                "{} did not complete within {:?}",
                what, limit
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_fast_results() {
        let value = with_timeout(Duration::from_secs(1), "noop", async { Ok(5) })
            .await
            .unwrap();
        assert_eq!(value, 5);
    }

    #[tokio::test]
    async fn slow_calls_become_timeouts() {
        let result: Result<()> = with_timeout(Duration::from_millis(20), "sleep", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(Error::Timeout(_))));
    }
}
