//! Status of the push connection to the server.
//!
//! These are events only: [`Library::attach_broker`](crate::Library::attach_broker)
//! dispatches them as the broker starts, stops, connects and drops.

use comicdesk_store::{action_types, Action, ActionCategory, Feature};
use serde::Serialize;

use crate::state::{AppAction, AppState};

action_types! {
    pub mod types {
        STARTED = "[Messaging] Started";
        STOPPED = "[Messaging] Stopped";
        CONNECTED = "[Messaging] Connected";
        DISCONNECTED = "[Messaging] Disconnected";
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MessagingState {
    pub started: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagingAction {
    Started,
    Stopped,
    Connected,
    Disconnected,
}

impl Action for MessagingAction {
    fn action_type(&self) -> &'static str {
        match self {
            MessagingAction::Started => types::STARTED,
            MessagingAction::Stopped => types::STOPPED,
            MessagingAction::Connected => types::CONNECTED,
            MessagingAction::Disconnected => types::DISCONNECTED,
        }
    }

    fn category(&self) -> ActionCategory {
        ActionCategory::Event
    }
}

pub struct Messaging;

impl Feature<AppAction> for Messaging {
    const KEY: &'static str = "messaging";
    type State = MessagingState;

    fn reduce(state: &MessagingState, action: &AppAction) -> Option<MessagingState> {
        let AppAction::Messaging(action) = action else {
            return None;
        };
        let next = match action {
            MessagingAction::Started => MessagingState {
                started: true,
                ..*state
            },
            MessagingAction::Stopped => MessagingState::default(),
            MessagingAction::Connected => MessagingState {
                connected: true,
                ..*state
            },
            MessagingAction::Disconnected => MessagingState {
                connected: false,
                ..*state
            },
        };
        Some(next)
    }
}

pub fn select_connected(state: &AppState) -> bool {
    state.messaging.connected
}
