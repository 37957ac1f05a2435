//! In-crate test doubles

use crate::notify::NotificationHandler;
use mage_net_bridge::{ClientMessage, Transport};
use mage_net_core::{ChatId, ChatMessage, GameId, MageNetError, Result};
use std::sync::{Arc, Mutex};

type SubmitHook = Arc<dyn Fn(&ClientMessage) + Send + Sync>;

/// Transport that records every request and optionally runs a hook on submit
#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    sent: Arc<Mutex<Vec<ClientMessage>>>,
    hook: Option<SubmitHook>,
    reject: bool,
}

impl RecordingTransport {
    /// Run `hook` on the submitting thread after each request is recorded
    pub(crate) fn with_hook(hook: impl Fn(&ClientMessage) + Send + Sync + 'static) -> Self {
        Self {
            hook: Some(Arc::new(hook)),
            ..Self::default()
        }
    }

    /// Reject every request as if the writer were gone
    pub(crate) fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<ClientMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn submit(&self, request: ClientMessage) -> Result<()> {
        if self.reject {
            return Err(MageNetError::Send("Writer task not running".into()));
        }
        self.sent.lock().unwrap().push(request.clone());
        if let Some(hook) = &self.hook {
            hook(&request);
        }
        Ok(())
    }
}

/// Handler that records the pushes the tests care about
#[derive(Default)]
pub(crate) struct RecordingHandler {
    pub(crate) chats: Mutex<Vec<(ChatId, String)>>,
    pub(crate) game_overs: Mutex<Vec<GameId>>,
    pub(crate) disconnects: Mutex<usize>,
}

impl NotificationHandler for RecordingHandler {
    fn on_chat_message(&self, chat_id: ChatId, message: ChatMessage) {
        self.chats.lock().unwrap().push((chat_id, message.message));
    }

    fn on_game_over(&self, game_id: GameId, _message: String) {
        self.game_overs.lock().unwrap().push(game_id);
    }

    fn on_disconnected(&self, _reason: &MageNetError) {
        *self.disconnects.lock().unwrap() += 1;
    }
}
