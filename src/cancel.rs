//! Requests that can be cancelled independently of each other.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::client::{TaskId, TaskScope, run_in_scope};
use crate::{GhostClient, GhostError};

/// Handle to a resource call running on its own tokio task.
///
/// Awaiting the handle yields the call's result. [`cancel`](Self::cancel)
/// stops the call at its next suspension point (the HTTP exchange or a
/// backoff sleep) and makes it resolve to [`GhostError::Cancelled`]; no
/// further attempt is made. Dropping the handle does not cancel the call.
///
/// ```no_run
/// # use ghost_content_rs::{GhostClient, GhostError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), GhostError> {
/// let client = GhostClient::new("demo.ghost.io", "22444f78447824223cefc48062")?;
/// let request = client.spawn_cancellable(client.posts().limit(5).fetch());
/// println!("started {}", request.task_id());
/// request.cancel();
/// assert!(matches!(request.await, Err(GhostError::Cancelled)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CancellableRequest<T> {
    id: TaskId,
    token: CancellationToken,
    handle: JoinHandle<Result<T, GhostError>>,
}

impl<T: Send + 'static> CancellableRequest<T> {
    /// Registers a fresh task id with `client` and spawns `call` bound to it.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn start<F>(client: &GhostClient, call: F) -> Self
    where
        F: Future<Output = Result<T, GhostError>> + Send + 'static,
    {
        let id = TaskId::new();
        let token = CancellationToken::new();
        let registration = client.tasks().register(id, token.clone());
        let scope = TaskScope {
            id,
            token: token.clone(),
            registry: Arc::clone(client.tasks()),
        };

        let watch = token.clone();
        let handle = tokio::spawn(run_in_scope(scope, async move {
            let _registration = registration;
            tokio::select! {
                biased;
                () = watch.cancelled() => Err(GhostError::Cancelled),
                result = call => result,
            }
        }));

        Self { id, token, handle }
    }
}

impl<T> CancellableRequest<T> {
    pub fn task_id(&self) -> TaskId {
        self.id
    }

    /// Requests cancellation. Calling it more than once, or after the call
    /// finished, has no effect.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for CancellableRequest<T> {
    type Output = Result<T, GhostError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(join_err)) if join_err.is_panic() => {
                std::panic::resume_unwind(join_err.into_panic())
            }
            Poll::Ready(Err(_)) => Poll::Ready(Err(GhostError::Cancelled)),
        }
    }
}
