use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// FIFO of pending URLs, filled once up front and drained by the workers.
///
/// `try_pop` never blocks and never hands the same element to two callers.
/// An empty queue means the run is over for whoever observed it; nothing is
/// pushed once draining has begun.
#[derive(Debug, Default)]
pub struct WorkQueue {
    urls: Mutex<VecDeque<String>>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_all<I>(&self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        lock(&self.urls).extend(urls);
    }

    pub fn try_pop(&self) -> Option<String> {
        lock(&self.urls).pop_front()
    }

    pub fn len(&self) -> usize {
        lock(&self.urls).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.urls).is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for WorkQueue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            urls: Mutex::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

/// Append-only set of matched URLs, in the order they were appended.
///
/// A URL that is already present is not appended again, so duplicate input
/// entries show up once in the results.
#[derive(Debug, Default)]
pub struct ResultsCollection {
    urls: Mutex<Matched>,
}

#[derive(Debug, Default)]
struct Matched {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl ResultsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the URL was already recorded.
    pub fn append(&self, url: String) -> bool {
        let mut matched = lock(&self.urls);
        if !matched.seen.insert(url.clone()) {
            return false;
        }
        matched.ordered.push(url);
        true
    }

    pub fn len(&self) -> usize {
        lock(&self.urls).ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.urls).ordered.is_empty()
    }

    pub fn snapshot(&self) -> Vec<String> {
        lock(&self.urls).ordered.clone()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .ordered
    }
}

// Critical sections are single push/pop/clone calls, so a poisoned lock still
// guards consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
