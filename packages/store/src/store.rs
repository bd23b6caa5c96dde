//! The state container.
//!
//! A [`Store`] owns the current snapshot of the application state and a root
//! reducer. [`Store::dispatch`] is the only way to change the snapshot: it
//! reduces, publishes the new snapshot and broadcasts the action while
//! holding one lock, so dispatches never interleave and every listener sees
//! actions in the order they were reduced.
//!
//! Effects and [`Store::listen`] receivers get every action through their
//! own unbounded queue. [`Store::actions`] is a bounded broadcast for
//! observers that may skip actions when they fall behind.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::action::Action;
use crate::effect::{execute, RequestEffect};
use crate::notify::Notifier;
use crate::selector::Selection;

/// Default capacity of the action broadcast channel.
pub const DEFAULT_ACTION_CAPACITY: usize = 256;

type RootReducer<S, A> = Box<dyn Fn(&Arc<S>, &A) -> Arc<S> + Send + Sync>;

struct Inner<S, A> {
    current: Mutex<Arc<S>>,
    reducer: RootReducer<S, A>,
    snapshots: watch::Sender<Arc<S>>,
    actions: broadcast::Sender<A>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<A>>>,
}

/// Shared handle to the application state container.
///
/// Cloning the handle is cheap; every clone refers to the same state.
pub struct Store<S, A> {
    inner: Arc<Inner<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("observers", &self.inner.actions.receiver_count())
            .field("listeners", &self.inner.listeners().len())
            .finish_non_exhaustive()
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a store from its bootstrap state and root reducer.
    pub fn new<R>(initial: S, reducer: R) -> Self
    where
        R: Fn(&Arc<S>, &A) -> Arc<S> + Send + Sync + 'static,
    {
        Self::with_capacity(initial, reducer, DEFAULT_ACTION_CAPACITY)
    }

    /// Like [`Store::new`] with an explicit action channel capacity.
    ///
    /// [`actions`](Self::actions) receivers that fall more than `capacity`
    /// actions behind skip the oldest ones. Effects never skip.
    pub fn with_capacity<R>(initial: S, reducer: R, capacity: usize) -> Self
    where
        R: Fn(&Arc<S>, &A) -> Arc<S> + Send + Sync + 'static,
    {
        let initial = Arc::new(initial);
        let (snapshots, _) = watch::channel(Arc::clone(&initial));
        let (actions, _) = broadcast::channel(capacity.max(1));

        Self {
            inner: Arc::new(Inner {
                current: Mutex::new(initial),
                reducer: Box::new(reducer),
                snapshots,
                actions,
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Reduce `action` into the state and return the resulting snapshot.
    pub fn dispatch(&self, action: impl Into<A>) -> Arc<S> {
        let action = action.into();
        let mut current = self
            .inner
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let next = (self.inner.reducer)(&current, &action);
        let changed = !Arc::ptr_eq(&current, &next);
        tracing::trace!(action = action.action_type(), changed, "dispatch");

        *current = Arc::clone(&next);
        if changed {
            self.inner.snapshots.send_replace(Arc::clone(&next));
        }
        self.inner
            .listeners()
            .retain(|listener| listener.send(action.clone()).is_ok());
        // No observers is not an error.
        let _ = self.inner.actions.send(action);

        next
    }

    /// The current snapshot.
    pub fn state(&self) -> Arc<S> {
        Arc::clone(
            &self
                .inner
                .current
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Project the current snapshot through `selector`.
    pub fn select<T>(&self, selector: impl Fn(&S) -> T) -> T {
        selector(&*self.state())
    }

    /// Receive every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
        self.inner.snapshots.subscribe()
    }

    /// Observe a selected value, yielding only when it changes.
    pub fn watch<T, F>(&self, selector: F) -> Selection<S, T>
    where
        T: Clone + PartialEq,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        Selection::new(self.subscribe(), selector)
    }

    /// Receive dispatched actions, after they have been reduced.
    ///
    /// A receiver more than the channel capacity behind gets
    /// `RecvError::Lagged` and loses the oldest actions.
    pub fn actions(&self) -> broadcast::Receiver<A> {
        self.inner.actions.subscribe()
    }

    /// Receive every dispatched action, after it has been reduced.
    ///
    /// Nothing is dropped however far the receiver falls behind. The queue
    /// is released on the next dispatch after the receiver is dropped.
    pub fn listen(&self) -> mpsc::UnboundedReceiver<A> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.inner.listeners().push(sender);
        receiver
    }

    /// A handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakStore<S, A> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Attach an effect to this store.
    ///
    /// Each matching action spawns its own pipeline; in-flight calls are never
    /// cancelled by later triggers, so results may complete out of order. The
    /// result action is dispatched back into the store.
    ///
    /// Must be called from within a Tokio runtime. Dropping the returned
    /// handle stops the listener; pipelines already running still finish.
    pub fn register<E>(&self, effect: E, notifier: Arc<dyn Notifier>) -> EffectHandle
    where
        E: RequestEffect<Action = A>,
    {
        let effect = Arc::new(effect);
        let name = effect.name();
        let mut actions = self.listen();
        let store = self.downgrade();

        let task = tokio::spawn(async move {
            while let Some(action) = actions.recv().await {
                let Some(trigger) = effect.trigger(&action) else {
                    continue;
                };
                tracing::debug!(effect = name, trigger = action.action_type(), "effect triggered");

                let effect = Arc::clone(&effect);
                let notifier = Arc::clone(&notifier);
                let store = store.clone();
                tokio::spawn(async move {
                    let result = execute(effect, trigger, notifier).await;
                    if let Some(store) = store.upgrade() {
                        store.dispatch(result);
                    }
                });
            }
            tracing::debug!(effect = name, "effect listener stopped");
        });

        EffectHandle { name, task }
    }
}

impl<S, A> Inner<S, A> {
    fn listeners(&self) -> std::sync::MutexGuard<'_, Vec<mpsc::UnboundedSender<A>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Weak counterpart of [`Store`], used by long-lived tasks.
pub struct WeakStore<S, A> {
    inner: Weak<Inner<S, A>>,
}

impl<S, A> Clone for WeakStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A> WeakStore<S, A> {
    pub fn upgrade(&self) -> Option<Store<S, A>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

/// Owns a registered effect listener; dropping it stops the listener.
#[derive(Debug)]
pub struct EffectHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl EffectHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for EffectHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
