//! Per-connection bridge state

use crate::notify::NotificationHandler;
use crate::slot::CorrelationSlot;
use mage_net_bridge::{ClientMessage, ResponseCategory, Transport};
use mage_net_core::{MageNetError, Result, RoomView, TableView};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::info;
use uuid::Uuid;

/// Lifecycle of a [`BridgeHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// No transport bound yet
    Inactive,
    Active,
    /// Transport gone; terminal
    Closed,
}

/// One correlation slot per response category
pub struct Slots {
    pub booleans: CorrelationSlot<bool>,
    pub ids: CorrelationSlot<Uuid>,
    pub rooms: CorrelationSlot<RoomView>,
    pub tables: CorrelationSlot<TableView>,
    pub string_lists: CorrelationSlot<Vec<String>>,
}

impl Slots {
    fn new() -> Self {
        Self {
            booleans: CorrelationSlot::new(ResponseCategory::Boolean),
            ids: CorrelationSlot::new(ResponseCategory::Id),
            rooms: CorrelationSlot::new(ResponseCategory::RoomView),
            tables: CorrelationSlot::new(ResponseCategory::TableView),
            string_lists: CorrelationSlot::new(ResponseCategory::StringList),
        }
    }

    /// Release the call waiting on `category`'s slot with `Interrupted`
    pub fn interrupt(&self, category: ResponseCategory) {
        match category {
            ResponseCategory::Boolean => self.booleans.interrupt(),
            ResponseCategory::Id => self.ids.interrupt(),
            ResponseCategory::RoomView => self.rooms.interrupt(),
            ResponseCategory::TableView => self.tables.interrupt(),
            ResponseCategory::StringList => self.string_lists.interrupt(),
        }
    }

    fn poison_all(&self) {
        self.booleans.poison();
        self.ids.poison();
        self.rooms.poison();
        self.tables.poison();
        self.string_lists.poison();
    }
}

/// Transport reference and reply slots for one connection
///
/// The transport is bound once, when the connection becomes active. Closing
/// poisons every slot so blocked callers return `ConnectionLost`.
pub struct BridgeHandle {
    transport: OnceLock<Box<dyn Transport>>,
    closed: AtomicBool,
    slots: Slots,
    handler: Arc<dyn NotificationHandler>,
}

impl BridgeHandle {
    pub fn new(handler: Arc<dyn NotificationHandler>) -> Self {
        Self {
            transport: OnceLock::new(),
            closed: AtomicBool::new(false),
            slots: Slots::new(),
            handler,
        }
    }

    /// Bind the transport; valid exactly once, and never after close
    pub fn activate(&self, transport: Box<dyn Transport>) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(MageNetError::ConnectionLost);
        }
        self.transport
            .set(transport)
            .map_err(|_| MageNetError::AlreadyActive)?;
        info!("Bridge active");
        Ok(())
    }

    /// Tear down: poison every slot and tell the handler. Idempotent.
    pub fn close(&self, reason: &MageNetError) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.slots.poison_all();
        info!("Bridge closed: {}", reason);
        self.handler.on_disconnected(reason);
    }

    pub fn state(&self) -> BridgeState {
        if self.closed.load(Ordering::Acquire) {
            BridgeState::Closed
        } else if self.transport.get().is_some() {
            BridgeState::Active
        } else {
            BridgeState::Inactive
        }
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub(crate) fn handler(&self) -> &dyn NotificationHandler {
        self.handler.as_ref()
    }

    /// Queue a request on the bound transport
    pub fn submit(&self, request: ClientMessage) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(MageNetError::ConnectionLost);
        }
        let transport = self.transport.get().ok_or(MageNetError::Inactive)?;
        transport.submit(request)
    }
}
