use crate::Error;
use sea_orm::DbErr;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Run a query until it completes, or until `token` gets cancelled.
///
/// On cancellation the query future is dropped, which aborts the statement.
pub async fn cancellable<F, T>(token: &CancellationToken, query: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, DbErr>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Error::Cancelled),
        result = query => Ok(result?),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::future::pending;

    #[tokio::test]
    async fn completes() {
        let token = CancellationToken::new();
        let result = cancellable(&token, async { Ok::<_, DbErr>(42) }).await;
        assert!(matches!(result, Ok(42)));
    }

    #[tokio::test]
    async fn passes_errors_on() {
        let token = CancellationToken::new();
        let result =
            cancellable(&token, async { Err::<(), _>(DbErr::Custom("broken".into())) }).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn cancelled_while_waiting() {
        let token = CancellationToken::new();
        let canceller = token.clone();

        tokio::spawn(async move {
            tokio::task::yield_now().await;
            canceller.cancel();
        });

        let result = cancellable(&token, pending::<Result<(), DbErr>>()).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn drop_guard_cancels() {
        let token = CancellationToken::new();
        drop(token.clone().drop_guard());

        let result = cancellable(&token, async { Ok::<_, DbErr>(()) }).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
