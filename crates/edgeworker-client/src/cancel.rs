//! Cooperative cancellation for network calls.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Run `fut` until it completes or `cancel` fires.
///
/// On cancellation the future is dropped, which aborts the underlying HTTP
/// request, and `ClientError::Cancelled` is returned.
pub(crate) async fn cancellable<F, T>(cancel: &CancellationToken, fut: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    if cancel.is_cancelled() {
        return Err(ClientError::Cancelled);
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ClientError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let cancel = CancellationToken::new();
        let result = cancellable(&cancel, async { Ok::<_, ClientError>(7) }).await;
        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test]
    async fn test_already_cancelled_returns_immediately() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result =
            cancellable(&cancel, std::future::pending::<Result<(), ClientError>>()).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });
        let started = std::time::Instant::now();
        let result = cancellable(&cancel, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<(), ClientError>(())
        })
        .await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
