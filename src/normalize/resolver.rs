// URL resolver trait: the swap-ready seam for shortened-link expansion.
//
// Resolving a shortened link is the only step of feature extraction that
// touches the network. Keeping it behind this trait lets the extractors stay
// synchronous and deterministic: tests inject a fixed mapping, batch runs
// wrap the HTTP resolver in a cache, offline runs use IdentityResolver.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

/// Turns a (possibly shortened) URL into the URL it points at.
///
/// Implementations never fail: when the target cannot be reached they return
/// the best URL they managed to obtain, falling back to the input.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, url: &str) -> String;
}

/// Resolver that returns every URL unchanged. Used for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl UrlResolver for IdentityResolver {
    fn resolve(&self, url: &str) -> String {
        url.to_string()
    }
}

impl<R: UrlResolver + ?Sized> UrlResolver for &R {
    fn resolve(&self, url: &str) -> String {
        (**self).resolve(url)
    }
}

impl<R: UrlResolver + ?Sized> UrlResolver for Box<R> {
    fn resolve(&self, url: &str) -> String {
        (**self).resolve(url)
    }
}

impl<R: UrlResolver + ?Sized> UrlResolver for Arc<R> {
    fn resolve(&self, url: &str) -> String {
        (**self).resolve(url)
    }
}

/// Memoizes another resolver by input URL.
///
/// The same shortened links recur across many accounts in a batch, so one
/// CachingResolver should be shared for the whole run.
pub struct CachingResolver<R> {
    inner: R,
    cache: Mutex<HashMap<String, String>>,
}

impl<R: UrlResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct URLs resolved so far.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: UrlResolver> UrlResolver for CachingResolver<R> {
    fn resolve(&self, url: &str) -> String {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
        {
            return hit.clone();
        }

        // Resolve without holding the lock; a concurrent miss on the same URL
        // just resolves twice and stores the same answer.
        let resolved = self.inner.resolve(url);
        debug!(url = url, resolved = resolved.as_str(), "Cached URL resolution");
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.to_string(), resolved.clone());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        calls: AtomicUsize,
    }

    impl UrlResolver for CountingResolver {
        fn resolve(&self, url: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!("{url}/resolved")
        }
    }

    #[test]
    fn test_identity_resolver() {
        assert_eq!(IdentityResolver.resolve("https://bit.ly/x"), "https://bit.ly/x");
    }

    #[test]
    fn test_cache_calls_inner_once_per_url() {
        let cache = CachingResolver::new(CountingResolver {
            calls: AtomicUsize::new(0),
        });
        assert_eq!(cache.resolve("https://bit.ly/a"), "https://bit.ly/a/resolved");
        assert_eq!(cache.resolve("https://bit.ly/a"), "https://bit.ly/a/resolved");
        cache.resolve("https://bit.ly/b");
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }
}
