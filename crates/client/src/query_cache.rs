//! Request cache for resource reads
//!
//! Each cache key (`hotels?page=2`, `bookings/12`...) holds either a loaded
//! value or the single in-flight request for it. Concurrent fetches of the
//! same key share that request. Mutations never write into the cache: on
//! success they invalidate key prefixes and readers refetch.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;

use crate::error::{ClientError, ClientResult};

/// Error shared by every waiter of a failed request
pub type QueryError = Arc<ClientError>;

/// Result of a cached read
pub type QueryResult<T> = Result<Arc<T>, QueryError>;

type AnyValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<AnyValue, QueryError>>>;

enum Entry {
    Ready(AnyValue),
    Loading { epoch: u64, fetch: SharedFetch },
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Entry>,
    next_epoch: u64,
}

/// Shared read cache
#[derive(Clone, Default)]
pub struct QueryCache {
    state: Arc<Mutex<CacheState>>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache").finish_non_exhaustive()
    }
}

impl QueryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a key, running `fetcher` only when nothing is cached or loading
    pub async fn fetch<T, F, Fut>(&self, key: impl Into<String>, fetcher: F) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let key = key.into();

        let (epoch, fetch) = {
            let mut state = self.state.lock().await;
            let in_flight = match state.entries.get(&key) {
                Some(Entry::Ready(value)) => match value.clone().downcast::<T>() {
                    Ok(typed) => return Ok(typed),
                    Err(_) => {
                        tracing::warn!(key = %key, "Cached value has another type, refetching");
                        None
                    }
                },
                Some(Entry::Loading { epoch, fetch }) => Some((*epoch, fetch.clone())),
                None => None,
            };

            // A request whose first caller went away may have finished
            // without being settled
            let in_flight = match in_flight {
                Some((epoch, fetch)) => match fetch.peek().cloned() {
                    Some(Ok(value)) => {
                        state.entries.insert(key.clone(), Entry::Ready(value.clone()));
                        return downcast(value);
                    }
                    Some(Err(e)) => {
                        tracing::debug!(key = %key, "Dropping unsettled failed request: {}", e);
                        state.entries.remove(&key);
                        None
                    }
                    None => Some((epoch, fetch)),
                },
                None => None,
            };

            match in_flight {
                Some(joined) => {
                    tracing::trace!(key = %key, "Joining in-flight request");
                    joined
                }
                None => {
                    let epoch = state.next_epoch;
                    state.next_epoch += 1;
                    let fetch = fetcher()
                        .map(|result| {
                            result
                                .map(|value| Arc::new(value) as AnyValue)
                                .map_err(Arc::new)
                        })
                        .boxed()
                        .shared();
                    state.entries.insert(
                        key.clone(),
                        Entry::Loading {
                            epoch,
                            fetch: fetch.clone(),
                        },
                    );
                    (epoch, fetch)
                }
            }
        };

        // Every waiter settles the entry, so it does not depend on the
        // caller that started the request staying alive
        let result = fetch.await;
        self.settle(&key, epoch, &result).await;
        downcast(result?)
    }

    /// Store or drop the outcome of request `epoch` if it still owns `key`
    async fn settle(&self, key: &str, epoch: u64, result: &Result<AnyValue, QueryError>) {
        let mut state = self.state.lock().await;
        // Invalidated while in flight: the result goes to the waiters only
        let still_current = matches!(
            state.entries.get(key),
            Some(Entry::Loading { epoch: current, .. }) if *current == epoch
        );
        if !still_current {
            return;
        }
        match result {
            Ok(value) => {
                state.entries.insert(key.to_string(), Entry::Ready(value.clone()));
            }
            Err(e) => {
                tracing::debug!(key = %key, "Request failed, not cached: {}", e);
                state.entries.remove(key);
            }
        }
    }

    /// Cached value of a key, if loaded
    pub async fn peek<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        match self.state.lock().await.entries.get(key) {
            Some(Entry::Ready(value)) => value.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Drop one key
    pub async fn invalidate(&self, key: &str) {
        self.state.lock().await.entries.remove(key);
    }

    /// Drop every key starting with `prefix` (a collection and its pages)
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(prefix));
        tracing::debug!(prefix, dropped = before - state.entries.len(), "Cache invalidated");
    }

    /// Drop everything (sign-out)
    pub async fn clear(&self) {
        self.state.lock().await.entries.clear();
    }

    /// Run a mutation, then invalidate `prefixes` if it succeeded
    pub async fn mutate<T, Fut>(&self, prefixes: &[&str], mutation: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let value = mutation.await?;
        for prefix in prefixes {
            self.invalidate_prefix(prefix).await;
        }
        Ok(value)
    }

    /// Number of keys held (loaded or loading)
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Whether no key is held
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn downcast<T: Send + Sync + 'static>(value: AnyValue) -> QueryResult<T> {
    value.downcast::<T>().map_err(|_| {
        Arc::new(ClientError::Parse(
            "cached request produced an unexpected type".to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_read_hits_cache() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let value = cache
                .fetch("hotels", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1u32, 2])
                })
                .await
                .unwrap();
            assert_eq!(*value, vec![1, 2]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        tokio_test::block_on(async {
            let cache = QueryCache::new();
            tokio_test::assert_ok!(cache.fetch("amenities", || async { Ok(1u8) }).await);
            assert!(!cache.is_empty().await);
            cache.clear().await;
            assert!(cache.is_empty().await);
        });
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_request() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let read = |cache: QueryCache, calls: Arc<AtomicUsize>| async move {
            cache
                .fetch("bookings?page=1", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(42u64)
                })
                .await
        };

        let (a, b, c) = tokio::join!(
            read(cache.clone(), calls.clone()),
            read(cache.clone(), calls.clone()),
            read(cache.clone(), calls.clone()),
        );
        assert_eq!((*a.unwrap(), *b.unwrap(), *c.unwrap()), (42, 42, 42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new();
        let err = cache
            .fetch("rooms", || async {
                Err::<u32, _>(ClientError::from_response(500, r#"{"message":"boom"}"#))
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "boom");
        assert!(cache.is_empty().await);

        let ok = cache.fetch("rooms", || async { Ok(1u32) }).await.unwrap();
        assert_eq!(*ok, 1);
    }

    #[tokio::test]
    async fn test_mutation_invalidates_prefix() {
        let cache = QueryCache::new();
        cache.fetch("hotels?page=1", || async { Ok(1u8) }).await.unwrap();
        cache.fetch("hotels?page=2", || async { Ok(2u8) }).await.unwrap();
        cache.fetch("rooms", || async { Ok(3u8) }).await.unwrap();

        cache
            .mutate(&["hotels"], async { Ok::<_, ClientError>(()) })
            .await
            .unwrap();

        assert!(cache.peek::<u8>("hotels?page=1").await.is_none());
        assert_eq!(cache.peek::<u8>("rooms").await.as_deref(), Some(&3));
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let cache = QueryCache::new();
        cache.fetch("hotels", || async { Ok(1u8) }).await.unwrap();

        let result = cache
            .mutate(&["hotels"], async {
                Err::<(), _>(ClientError::from_response(422, r#"{"errors":{"name":["taken"]}}"#))
            })
            .await;
        assert!(result.unwrap_err().is_validation());
        assert!(cache.peek::<u8>("hotels").await.is_some());
    }

    #[tokio::test]
    async fn test_invalidation_during_flight_is_not_overwritten() {
        let cache = QueryCache::new();
        let reader = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .fetch("bookings", || async {
                        tokio::time::sleep(Duration::from_millis(30)).await;
                        Ok(String::from("stale"))
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.invalidate_prefix("bookings").await;

        let stale = reader.await.unwrap().unwrap();
        assert_eq!(stale.as_str(), "stale");
        assert!(cache.peek::<String>("bookings").await.is_none());
    }

    #[tokio::test]
    async fn test_dropped_first_reader_does_not_pin_error() {
        let cache = QueryCache::new();
        let abandoned = tokio::time::timeout(
            Duration::from_millis(5),
            cache.fetch("hotels", || async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Err::<u32, _>(ClientError::from_response(500, r#"{"message":"boom"}"#))
            }),
        )
        .await;
        assert!(abandoned.is_err());

        let calls = Arc::new(AtomicUsize::new(0));
        let mut results = Vec::new();
        for _ in 0..3 {
            let calls = calls.clone();
            let result = cache
                .fetch("hotels", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7u32)
                })
                .await;
            results.push(result.map(|v| *v).map_err(|e| e.user_message()));
        }

        // The reader that joined the abandoned request sees its outcome once
        assert_eq!(results[0], Err("boom".to_string()));
        assert_eq!(results[1..], [Ok(7), Ok(7)]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_first_reader_result_is_cached_by_joiner() {
        let cache = QueryCache::new();
        let abandoned = tokio::time::timeout(
            Duration::from_millis(5),
            cache.fetch("rooms", || async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(String::from("suite"))
            }),
        )
        .await;
        assert!(abandoned.is_err());

        let joined = cache
            .fetch("rooms", || async { Ok(String::from("unused")) })
            .await
            .unwrap();
        assert_eq!(joined.as_str(), "suite");
        assert_eq!(cache.peek::<String>("rooms").await.as_deref().map(String::as_str), Some("suite"));
    }
}
