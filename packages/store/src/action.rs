//! Actions: named, immutable intents and events.

use std::fmt;

/// The role an action plays in a feature's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    /// A request initiated by the user or the system (`load`, `save`, `delete`).
    Command,
    /// The successful result of a command.
    Success,
    /// The failed result of a command.
    Failure,
    /// Something that happened outside of any request, such as a pushed
    /// message or a connection status change.
    Event,
}

/// A value flowing through a [`Store`](crate::Store).
///
/// The action type string identifies the variant within the whole catalog and
/// must be unique across every feature. Payloads are fixed per type and are
/// enforced by the enum variant that carries them.
pub trait Action: fmt::Debug + Clone + Send + Sync + 'static {
    /// The catalog-unique type string, e.g. `"[Blocked Pages] Load list"`.
    fn action_type(&self) -> &'static str;

    /// Which part of the command/result catalog this action belongs to.
    fn category(&self) -> ActionCategory;
}

/// Declare a module of action type constants plus an `ALL` slice.
///
/// ```rust
/// comicdesk_store::action_types! {
///     pub mod types {
///         LOAD = "[Widgets] Load";
///         LOADED = "[Widgets] Loaded";
///     }
/// }
///
/// assert_eq!(types::ALL, &["[Widgets] Load", "[Widgets] Loaded"]);
/// ```
#[macro_export]
macro_rules! action_types {
    ($vis:vis mod $name:ident { $($konst:ident = $value:literal;)* }) => {
        $vis mod $name {
            $(pub const $konst: &str = $value;)*

            /// Every type string declared in this catalog.
            pub const ALL: &[&str] = &[$($konst),*];
        }
    };
}
