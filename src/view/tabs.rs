//! Tab identifiers and the single-active-tab controller

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One tab per compiler stage plus the execution output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    Tokens,
    Ast,
    Semantic,
    Optimizer,
    Bytecode,
    Output,
}

impl TabId {
    /// Tabs in display order
    pub const ALL: [TabId; 6] = [
        TabId::Tokens,
        TabId::Ast,
        TabId::Semantic,
        TabId::Optimizer,
        TabId::Bytecode,
        TabId::Output,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Tokens => "tokens",
            TabId::Ast => "ast",
            TabId::Semantic => "semantic",
            TabId::Optimizer => "optimizer",
            TabId::Bytecode => "bytecode",
            TabId::Output => "output",
        }
    }

    /// Label shown in the tab bar
    pub fn title(self) -> &'static str {
        match self {
            TabId::Tokens => "Tokens",
            TabId::Ast => "Syntax Tree",
            TabId::Semantic => "Semantic",
            TabId::Optimizer => "Optimizer",
            TabId::Bytecode => "Bytecode",
            TabId::Output => "Output",
        }
    }

    /// Position in [`TabId::ALL`]
    pub fn index(self) -> usize {
        match self {
            TabId::Tokens => 0,
            TabId::Ast => 1,
            TabId::Semantic => 2,
            TabId::Optimizer => 3,
            TabId::Bytecode => 4,
            TabId::Output => 5,
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tab id that names no configured tab
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tab `{0}`")]
pub struct UnknownTab(pub String);

impl FromStr for TabId {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabId::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// Exactly one tab, and the panel of the same id, is active at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabController {
    active: TabId,
}

impl TabController {
    pub fn new(initial: TabId) -> Self {
        TabController { active: initial }
    }

    pub fn active(&self) -> TabId {
        self.active
    }

    pub fn is_active(&self, tab: TabId) -> bool {
        self.active == tab
    }

    /// Deactivate everything, then activate `tab`
    pub fn select(&mut self, tab: TabId) {
        self.active = tab;
    }

    pub fn select_by_id(&mut self, id: &str) -> Result<(), UnknownTab> {
        let tab = id.parse()?;
        self.select(tab);
        Ok(())
    }

    /// Move to the tab on the right, wrapping around
    pub fn next(&mut self) {
        let idx = (self.active.index() + 1) % TabId::ALL.len();
        self.select(TabId::ALL[idx]);
    }

    /// Move to the tab on the left, wrapping around
    pub fn prev(&mut self) {
        let len = TabId::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.select(TabId::ALL[idx]);
    }
}

impl Default for TabController {
    fn default() -> Self {
        TabController::new(TabId::Tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces_active() {
        let mut tabs = TabController::new(TabId::Tokens);
        tabs.select(TabId::Bytecode);
        assert_eq!(tabs.active(), TabId::Bytecode);
        assert!(!tabs.is_active(TabId::Tokens));
        assert_eq!(
            TabId::ALL.iter().filter(|t| tabs.is_active(**t)).count(),
            1
        );
    }

    #[test]
    fn test_select_by_id() {
        let mut tabs = TabController::default();
        tabs.select_by_id("output").unwrap();
        assert_eq!(tabs.active(), TabId::Output);

        let err = tabs.select_by_id("history").unwrap_err();
        assert_eq!(err, UnknownTab("history".to_string()));
        assert_eq!(tabs.active(), TabId::Output);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut tabs = TabController::new(TabId::Output);
        tabs.next();
        assert_eq!(tabs.active(), TabId::Tokens);
        tabs.prev();
        assert_eq!(tabs.active(), TabId::Output);
        tabs.prev();
        assert_eq!(tabs.active(), TabId::Bytecode);
    }

    #[test]
    fn test_ids_round_trip_through_strings() {
        for tab in TabId::ALL {
            assert_eq!(tab.as_str().parse::<TabId>(), Ok(tab));
            assert_eq!(TabId::ALL[tab.index()], tab);
        }
    }
}
