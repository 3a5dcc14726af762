//! Explicit view state
//!
//! Everything the screen shows lives in [`ViewState`]: the source document, one
//! panel per tab, the active tab, queued alerts, the example selection and the
//! per-action sequence counters. It is only changed through the named
//! transitions in [`controller`](crate::controller), the example loader and the
//! methods here, and it serializes so a test (or a debug dump) can capture it.

pub mod document;
pub mod panels;
pub mod sequence;
pub mod tabs;

pub use document::SourceDocument;
pub use panels::{Panel, Panels, Placeholders, Tone};
pub use sequence::{ActionKind, Sequences, Ticket};
pub use tabs::{TabController, TabId, UnknownTab};

use serde::Serialize;
use std::collections::VecDeque;

/// Why an alert was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    Validation,
    Network,
    Compile,
    Example,
}

/// A message the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub source: SourceDocument,
    pub panels: Panels,
    pub tabs: TabController,
    pub alerts: VecDeque<Alert>,
    pub selected_example: Option<String>,
    pub sequences: Sequences,
    placeholders: Placeholders,
}

impl ViewState {
    pub fn new(placeholders: Placeholders, initial_tab: TabId) -> Self {
        ViewState {
            source: SourceDocument::default(),
            panels: Panels::new(&placeholders),
            tabs: TabController::new(initial_tab),
            alerts: VecDeque::new(),
            selected_example: None,
            sequences: Sequences::default(),
            placeholders,
        }
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    pub fn active_tab(&self) -> TabId {
        self.tabs.active()
    }

    /// The panel matching the active tab
    pub fn active_panel(&self) -> &Panel {
        self.panels.get(self.tabs.active())
    }

    pub fn alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.alerts.push_back(Alert {
            kind,
            message: message.into(),
        });
    }

    /// Oldest unacknowledged alert
    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alerts.pop_front()
    }

    /// The clear action: empty source, placeholder panels, no example selected
    pub fn clear(&mut self) {
        self.source.clear();
        self.panels.reset(&self.placeholders);
        self.selected_example = None;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(Placeholders::default(), TabId::Tokens)
    }
}
