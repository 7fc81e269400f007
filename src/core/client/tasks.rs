//! In-flight request registry used for cancellation.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Opaque identifier of one logical in-flight request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The task a request runs under. Set by `CancellableRequest` for the
/// duration of the spawned call.
#[derive(Clone, Debug)]
pub(crate) struct TaskScope {
    pub(crate) id: TaskId,
    pub(crate) token: CancellationToken,
    pub(crate) registry: Arc<TaskRegistry>,
}

impl TaskScope {
    /// True if the scope's task is tracked by `registry`.
    pub(crate) fn belongs_to(&self, registry: &Arc<TaskRegistry>) -> bool {
        Arc::ptr_eq(&self.registry, registry)
    }
}

tokio::task_local! {
    static CURRENT_TASK: TaskScope;
}

pub(crate) fn current_scope() -> Option<TaskScope> {
    CURRENT_TASK.try_with(Clone::clone).ok()
}

pub(crate) async fn run_in_scope<F: Future>(scope: TaskScope, fut: F) -> F::Output {
    CURRENT_TASK.scope(scope, fut).await
}

#[derive(Debug, Default)]
pub(crate) struct TaskRegistry {
    tasks: Mutex<HashMap<TaskId, CancellationToken>>,
}

impl TaskRegistry {
    fn lock(&self) -> MutexGuard<'_, HashMap<TaskId, CancellationToken>> {
        // The map stays consistent even if a holder panicked.
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `id` and returns a guard that unregisters it when dropped.
    pub(crate) fn register(
        self: &Arc<Self>,
        id: TaskId,
        token: CancellationToken,
    ) -> RegistrationGuard {
        self.lock().insert(id, token);
        RegistrationGuard {
            registry: Arc::clone(self),
            id,
        }
    }

    pub(crate) fn cancel(&self, id: TaskId) -> bool {
        match self.lock().remove(&id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.lock().drain().collect();
        for (_, token) in &drained {
            token.cancel();
        }
        drained.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn contains(&self, id: TaskId) -> bool {
        self.lock().contains_key(&id)
    }
}

/// Removes a task from the registry on every exit path.
#[derive(Debug)]
pub(crate) struct RegistrationGuard {
    registry: Arc<TaskRegistry>,
    id: TaskId,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.id);
    }
}
