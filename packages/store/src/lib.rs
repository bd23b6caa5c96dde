//! # comicdesk-store
//!
//! A unidirectional state container:
//!
//! - [`Action`]: a named, immutable intent or event
//! - [`Feature`]: a state slice and the pure reducer that owns it
//! - [`Store`]: holds the current snapshot; `dispatch` is the only way to change it
//! - selectors: plain `Fn(&S) -> T`, plus [`combine`], [`Memoized`] and [`Selection`]
//! - [`RequestEffect`]: turns a command into a boundary call and a result action
//! - [`Notifier`]: where effects send user-facing messages
//!
//! ```text
//! caller ─► dispatch(action) ─► reducers ─► new snapshot ─► selectors
//!                  │
//!                  └─► effects ─► service call ─► dispatch(result)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use comicdesk_store::{Action, ActionCategory, Store};
//!
//! #[derive(Debug, Clone)]
//! enum Counter {
//!     Increment,
//! }
//!
//! impl Action for Counter {
//!     fn action_type(&self) -> &'static str {
//!         "[Counter] Increment"
//!     }
//!
//!     fn category(&self) -> ActionCategory {
//!         ActionCategory::Command
//!     }
//! }
//!
//! let store = Store::new(0u32, |state: &Arc<u32>, _action: &Counter| Arc::new(**state + 1));
//! store.dispatch(Counter::Increment);
//! assert_eq!(*store.state(), 1);
//! ```

pub mod action;
pub mod effect;
pub mod feature;
pub mod notify;
pub mod selector;
pub mod store;

pub use action::{Action, ActionCategory};
pub use effect::{execute, BoxError, EffectError, RequestEffect};
pub use feature::{apply, replace_by, Feature};
pub use notify::{Level, Notification, Notifier, TracingNotifier, GENERAL_FAILURE_KEY};
pub use selector::{combine, Memoized, Selection};
pub use store::{EffectHandle, Store, WeakStore, DEFAULT_ACTION_CAPACITY};

#[cfg(any(test, feature = "test-utils"))]
pub use feature::feature_test_suite;
#[cfg(any(test, feature = "test-utils"))]
pub use notify::RecordingNotifier;

// Re-exported for effect implementations.
pub use async_trait::async_trait;
