//! Feature slices and their reducers.

use std::fmt;
use std::sync::Arc;

/// A named partition of the application state owned by one reducer.
///
/// `A` is the application-wide action type. Reducers see every action that is
/// dispatched, so a slice may react to results produced by other features.
///
/// # Reducer contract
///
/// `reduce` must be pure: no I/O, no interior mutation, same output for the
/// same input. It returns `None` for actions the feature does not handle,
/// which lets [`apply`] keep the existing snapshot untouched.
pub trait Feature<A>: 'static {
    /// Globally unique key of the slice.
    const KEY: &'static str;

    /// The slice's state. `Default` is the bootstrap value.
    type State: fmt::Debug + Clone + Default + PartialEq + Send + Sync + 'static;

    /// Fold `action` into `state`, or `None` if the action is not handled.
    fn reduce(state: &Self::State, action: &A) -> Option<Self::State>;
}

/// Run a feature reducer over a shared snapshot.
///
/// Unhandled actions return the same `Arc`, so `Arc::ptr_eq` holds between
/// input and output.
pub fn apply<A, F: Feature<A>>(state: &Arc<F::State>, action: &A) -> Arc<F::State> {
    match F::reduce(state, action) {
        Some(next) => Arc::new(next),
        None => Arc::clone(state),
    }
}

/// Remove every element matching `key` from `items` and append `item`.
///
/// This is how result actions update a record: the stale copy goes, the
/// server's copy comes in. Position is not preserved.
pub fn replace_by<T, K, F>(items: &[T], item: T, key: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let wanted = key(&item);
    let mut result: Vec<T> = items.iter().filter(|i| key(*i) != wanted).cloned().collect();
    result.push(item);
    result
}

/// Helpers for checking reducer laws in feature tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod feature_test_suite {
    use super::*;

    /// Assert that `action` leaves the slice untouched, by reference.
    pub fn assert_identity<A, F: Feature<A>>(state: F::State, action: &A) {
        let before = Arc::new(state);
        let after = apply::<A, F>(&before, action);
        assert!(
            Arc::ptr_eq(&before, &after),
            "{} changed state for an unhandled action",
            F::KEY
        );
    }

    /// Apply a sequence of actions starting from `state`.
    pub fn reduce_all<A, F: Feature<A>>(state: F::State, actions: &[A]) -> F::State {
        let mut current = Arc::new(state);
        for action in actions {
            current = apply::<A, F>(&current, action);
        }
        (*current).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::feature_test_suite::*;
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum CounterAction {
        Increment,
        Reset,
        Unrelated,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        value: u32,
    }

    struct CounterFeature;

    impl Feature<CounterAction> for CounterFeature {
        const KEY: &'static str = "counter";
        type State = Counter;

        fn reduce(state: &Counter, action: &CounterAction) -> Option<Counter> {
            match action {
                CounterAction::Increment => Some(Counter {
                    value: state.value + 1,
                }),
                CounterAction::Reset => Some(Counter::default()),
                CounterAction::Unrelated => None,
            }
        }
    }

    #[test]
    fn unhandled_action_keeps_the_same_arc() {
        assert_identity::<_, CounterFeature>(Counter { value: 3 }, &CounterAction::Unrelated);
    }

    #[test]
    fn handled_action_produces_new_state() {
        let state = reduce_all::<_, CounterFeature>(
            Counter::default(),
            &[CounterAction::Increment, CounterAction::Increment],
        );
        assert_eq!(state.value, 2);

        let state = reduce_all::<_, CounterFeature>(state, &[CounterAction::Reset]);
        assert_eq!(state, Counter::default());
    }

    #[test]
    fn replace_by_drops_stale_copy() {
        let items = vec![(1, "a"), (2, "b"), (3, "c")];
        let result = replace_by(&items, (2, "B"), |i| i.0);
        assert_eq!(result, vec![(1, "a"), (3, "c"), (2, "B")]);
    }

    #[test]
    fn replace_by_inserts_missing_item() {
        let items = vec![(1, "a")];
        let result = replace_by(&items, (5, "e"), |i| i.0);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&(5, "e")));
    }
}
