//! Loading state for anything fetched from the catalog.

use std::fmt::Display;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResource<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> RemoteResource<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// Await a fetch and settle into `Loaded` or `Failed`.
    pub async fn load<F, E>(fetch: F) -> Self
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let resource = Self::from_result(fetch.await);
        if let Self::Failed(reason) = &resource {
            tracing::warn!(reason = %reason, "Remote resource failed to load");
        }
        resource
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteResource<U> {
        match self {
            Self::Loading => RemoteResource::Loading,
            Self::Loaded(value) => RemoteResource::Loaded(f(value)),
            Self::Failed(reason) => RemoteResource::Failed(reason),
        }
    }
}
