//! Selectors: pure projections of the state.
//!
//! A selector is any `Fn(&S) -> T`. This module adds composition, an optional
//! memoizing wrapper, and [`Selection`], an async view that yields a selected
//! value whenever it changes.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

/// Compose two selectors with a projector.
pub fn combine<S, A, B, T>(
    first: impl Fn(&S) -> A,
    second: impl Fn(&S) -> B,
    projector: impl Fn(A, B) -> T,
) -> impl Fn(&S) -> T {
    move |state| projector(first(state), second(state))
}

/// Caches the last result, keyed by the identity of the snapshot.
///
/// Because unchanged state keeps the same `Arc`, repeated reads of an
/// unchanged snapshot skip the projection.
pub struct Memoized<S, T> {
    selector: Box<dyn Fn(&S) -> T + Send + Sync>,
    last: Mutex<Option<(Arc<S>, T)>>,
}

impl<S, T: Clone> Memoized<S, T> {
    pub fn new(selector: impl Fn(&S) -> T + Send + Sync + 'static) -> Self {
        Self {
            selector: Box::new(selector),
            last: Mutex::new(None),
        }
    }

    pub fn get(&self, state: &Arc<S>) -> T {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((snapshot, value)) = last.as_ref() {
            if Arc::ptr_eq(snapshot, state) {
                return value.clone();
            }
        }
        let value = (self.selector)(&**state);
        *last = Some((Arc::clone(state), value.clone()));
        value
    }
}

/// A selected value that tracks the store.
///
/// Created by [`Store::watch`](crate::Store::watch).
pub struct Selection<S, T> {
    snapshots: watch::Receiver<Arc<S>>,
    selector: Box<dyn Fn(&S) -> T + Send + Sync>,
    current: T,
}

impl<S, T> Selection<S, T>
where
    T: Clone + PartialEq,
{
    pub(crate) fn new(
        mut snapshots: watch::Receiver<Arc<S>>,
        selector: impl Fn(&S) -> T + Send + Sync + 'static,
    ) -> Self {
        let current = selector(&**snapshots.borrow_and_update());
        Self {
            snapshots,
            selector: Box::new(selector),
            current,
        }
    }

    /// The most recently observed value.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Wait until the selected value differs from [`current`](Self::current).
    ///
    /// Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            self.snapshots.changed().await.ok()?;
            let next = (self.selector)(&**self.snapshots.borrow_and_update());
            if next != self.current {
                self.current = next.clone();
                return Some(next);
            }
        }
    }

    /// Wait until `predicate` holds for the selected value.
    ///
    /// Returns immediately if it already holds.
    pub async fn wait_until(&mut self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        if predicate(&self.current) {
            return Some(self.current.clone());
        }
        loop {
            let next = self.changed().await?;
            if predicate(&next) {
                return Some(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct State {
        a: u32,
        b: u32,
    }

    #[test]
    fn combine_is_order_independent() {
        let sum = combine(|s: &State| s.a, |s: &State| s.b, |a, b| a + b);
        let sum_reversed = combine(|s: &State| s.b, |s: &State| s.a, |b, a| a + b);
        let state = State { a: 2, b: 5 };
        assert_eq!(sum(&state), 7);
        assert_eq!(sum(&state), sum_reversed(&state));
    }

    #[test]
    fn memoized_reuses_value_for_same_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Memoized::new(move |s: &State| {
            counter.fetch_add(1, Ordering::SeqCst);
            s.a * 10
        });

        let snapshot = Arc::new(State { a: 4, b: 0 });
        assert_eq!(memo.get(&snapshot), 40);
        assert_eq!(memo.get(&snapshot), 40);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let next = Arc::new(State { a: 5, b: 0 });
        assert_eq!(memo.get(&next), 50);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn selection_skips_unrelated_changes() {
        let (tx, rx) = watch::channel(Arc::new(State::default()));
        let mut selection = Selection::new(rx, |s: &State| s.a);
        assert_eq!(*selection.current(), 0);

        tx.send_replace(Arc::new(State { a: 0, b: 1 }));
        tx.send_replace(Arc::new(State { a: 3, b: 1 }));
        assert_eq!(selection.changed().await, Some(3));
        assert_eq!(*selection.current(), 3);
    }

    #[tokio::test]
    async fn selection_wait_until_returns_immediately_when_satisfied() {
        let (_tx, rx) = watch::channel(Arc::new(State { a: 1, b: 0 }));
        let mut selection = Selection::new(rx, |s: &State| s.a);
        assert_eq!(selection.wait_until(|a| *a == 1).await, Some(1));
    }

    #[tokio::test]
    async fn selection_ends_when_sender_is_gone() {
        let (tx, rx) = watch::channel(Arc::new(State::default()));
        let mut selection = Selection::new(rx, |s: &State| s.a);
        drop(tx);
        assert_eq!(selection.changed().await, None);
    }
}
