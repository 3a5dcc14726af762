//! Stage output panels and their placeholder text

use super::tabs::TabId;
use serde::{Deserialize, Serialize};

/// Visual state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tone {
    #[default]
    Normal,
    Error,
    Success,
}

/// Rendered text of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub text: String,
    pub tone: Tone,
}

impl Panel {
    fn placeholder(text: &str) -> Self {
        Panel {
            text: text.to_string(),
            tone: Tone::Normal,
        }
    }
}

/// Per-panel text shown before anything has been rendered.
///
/// Each panel keeps its own string; they are cosmetic and configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub tokens: String,
    pub ast: String,
    pub semantic: String,
    pub optimizer: String,
    pub bytecode: String,
    pub output: String,
    /// Written to the output panel by compile-and-run when there is no output
    pub no_output: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Placeholders {
            tokens: "Click \"Compile\" to see tokens...".to_string(),
            ast: "Click \"Compile\" to see AST...".to_string(),
            semantic: "Click \"Compile\" to see semantic analysis...".to_string(),
            optimizer: "Click \"Compile\" to see optimizations...".to_string(),
            bytecode: "Click \"Compile\" to see bytecode...".to_string(),
            output: "Click \"Compile & Run\" to see output...".to_string(),
            no_output: "(No output)".to_string(),
        }
    }
}

impl Placeholders {
    pub fn for_tab(&self, tab: TabId) -> &str {
        match tab {
            TabId::Tokens => &self.tokens,
            TabId::Ast => &self.ast,
            TabId::Semantic => &self.semantic,
            TabId::Optimizer => &self.optimizer,
            TabId::Bytecode => &self.bytecode,
            TabId::Output => &self.output,
        }
    }
}

/// One panel per tab, addressed by [`TabId`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panels {
    panels: [Panel; 6],
}

impl Panels {
    pub fn new(placeholders: &Placeholders) -> Self {
        Panels {
            panels: TabId::ALL.map(|tab| Panel::placeholder(placeholders.for_tab(tab))),
        }
    }

    pub fn get(&self, tab: TabId) -> &Panel {
        &self.panels[tab.index()]
    }

    pub fn text(&self, tab: TabId) -> &str {
        &self.get(tab).text
    }

    pub fn tone(&self, tab: TabId) -> Tone {
        self.get(tab).tone
    }

    /// Replace the text, keeping the current tone
    pub fn set_text(&mut self, tab: TabId, text: String) {
        self.panels[tab.index()].text = text;
    }

    pub fn set_tone(&mut self, tab: TabId, tone: Tone) {
        self.panels[tab.index()].tone = tone;
    }

    /// Back to placeholder text and normal tone everywhere
    pub fn reset(&mut self, placeholders: &Placeholders) {
        *self = Panels::new(placeholders);
    }
}
