//! Request state for every remote resource the console shows.
//!
//! A resource only leaves `Loading` through the completion of the request
//! that put it there. Completions carrying another [`RequestId`] are stale
//! and ignored, so an old response can never overwrite a newer one.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ApiError;

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next() -> Self {
        RequestId(NEXT_REQUEST.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Idle,
    Loading {
        request: RequestId,
    },
    Success(T),
    Failure(String),
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::Idle
    }
}

impl<T> Resource<T> {
    /// Moves to `Loading` under a fresh request id and returns it.
    pub fn start(&mut self) -> RequestId {
        let request = RequestId::next();
        *self = Resource::Loading { request };
        request
    }

    pub fn is_pending(&self, request: RequestId) -> bool {
        matches!(self, Resource::Loading { request: current } if *current == request)
    }

    /// Applies a completion. Returns `false` when it was stale.
    pub fn complete(&mut self, request: RequestId, result: Result<T, ApiError>) -> bool {
        if !self.is_pending(request) {
            return false;
        }
        *self = match result {
            Ok(value) => Resource::Success(value),
            Err(err) => Resource::Failure(err.to_string()),
        };
        true
    }

    pub fn reset(&mut self) {
        *self = Resource::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Operations a connector page tracks independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    FetchAll,
    FetchOne,
    FetchByClient,
    FetchByInterface,
    Create,
    Update,
    Delete,
    Toggle,
    TestConnection,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::FetchAll => "load configurations",
            Operation::FetchOne => "load configuration",
            Operation::FetchByClient => "load client configurations",
            Operation::FetchByInterface => "load interface configurations",
            Operation::Create => "create configuration",
            Operation::Update => "update configuration",
            Operation::Delete => "delete configuration",
            Operation::Toggle => "toggle configuration",
            Operation::TestConnection => "test connection",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct OperationState {
    request: Option<RequestId>,
    error: Option<String>,
}

/// One loading flag and one error slot per [`Operation`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFlags {
    states: BTreeMap<Operation, OperationState>,
}

impl OperationFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, op: Operation) -> RequestId {
        let request = RequestId::next();
        self.states.insert(
            op,
            OperationState {
                request: Some(request),
                error: None,
            },
        );
        request
    }

    /// Clears the loading flag if `request` is still the current one for `op`.
    pub fn succeed(&mut self, op: Operation, request: RequestId) -> bool {
        self.finish(op, request, None)
    }

    pub fn fail(&mut self, op: Operation, request: RequestId, err: &ApiError) -> bool {
        self.finish(op, request, Some(err.to_string()))
    }

    fn finish(&mut self, op: Operation, request: RequestId, error: Option<String>) -> bool {
        match self.states.get_mut(&op) {
            Some(state) if state.request == Some(request) => {
                state.request = None;
                state.error = error;
                true
            }
            _ => false,
        }
    }

    pub fn is_loading(&self, op: Operation) -> bool {
        self.states.get(&op).is_some_and(|s| s.request.is_some())
    }

    pub fn any_loading(&self) -> bool {
        self.states.values().any(|s| s.request.is_some())
    }

    pub fn error(&self, op: Operation) -> Option<&str> {
        self.states.get(&op).and_then(|s| s.error.as_deref())
    }

    pub fn errors(&self) -> impl Iterator<Item = (Operation, &str)> {
        self.states
            .iter()
            .filter_map(|(op, s)| s.error.as_deref().map(|e| (*op, e)))
    }

    pub fn dismiss(&mut self, op: Operation) {
        if let Some(state) = self.states.get_mut(&op) {
            state.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_completion_is_rejected() {
        let mut resource: Resource<Vec<i32>> = Resource::Idle;
        let first = resource.start();
        let second = resource.start();

        assert!(!resource.complete(first, Ok(vec![1])));
        assert!(resource.is_loading());

        assert!(resource.complete(second, Ok(vec![2, 3])));
        assert_eq!(resource.data(), Some(&vec![2, 3]));

        assert!(!resource.complete(second, Ok(vec![9])));
        assert_eq!(resource.data(), Some(&vec![2, 3]));
    }

    #[test]
    fn failure_keeps_message() {
        let mut resource: Resource<()> = Resource::default();
        let request = resource.start();
        resource.complete(request, Err(ApiError::Network("connection refused".into())));
        assert_eq!(resource.error(), Some("Network error: connection refused"));
        assert!(resource.data().is_none());
    }

    #[test]
    fn operations_are_tracked_independently() {
        let mut flags = OperationFlags::new();
        let save = flags.begin(Operation::Update);
        let test = flags.begin(Operation::TestConnection);
        assert!(flags.is_loading(Operation::Update));

        flags.fail(Operation::TestConnection, test, &ApiError::Network("timeout".into()));
        assert!(flags.is_loading(Operation::Update));
        assert!(flags.error(Operation::TestConnection).is_some());
        assert!(flags.error(Operation::Update).is_none());

        flags.succeed(Operation::Update, save);
        assert!(!flags.any_loading());

        flags.dismiss(Operation::TestConnection);
        assert_eq!(flags.errors().count(), 0);
    }

    #[test]
    fn restarted_operation_ignores_first_completion() {
        let mut flags = OperationFlags::new();
        let first = flags.begin(Operation::FetchAll);
        let second = flags.begin(Operation::FetchAll);
        assert!(!flags.succeed(Operation::FetchAll, first));
        assert!(flags.is_loading(Operation::FetchAll));
        assert!(flags.succeed(Operation::FetchAll, second));
    }
}
