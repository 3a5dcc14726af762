//! Per-action sequence numbers for discarding superseded responses
//!
//! Every action kind counts independently. An outcome is applied only if its
//! ticket is the newest one handed out for that kind; ordering across kinds is
//! still whichever response lands last.

use serde::Serialize;
use std::fmt;

/// The two compile actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    CompileOnly,
    CompileAndRun,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::CompileOnly => f.write_str("compile"),
            ActionKind::CompileAndRun => f.write_str("compile & run"),
        }
    }
}

/// Identifies one initiated action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub kind: ActionKind,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Sequences {
    compile_only: u64,
    compile_and_run: u64,
}

impl Sequences {
    fn slot(&mut self, kind: ActionKind) -> &mut u64 {
        match kind {
            ActionKind::CompileOnly => &mut self.compile_only,
            ActionKind::CompileAndRun => &mut self.compile_and_run,
        }
    }

    /// Latest sequence number handed out for `kind` (0 before the first)
    pub fn latest(&self, kind: ActionKind) -> u64 {
        match kind {
            ActionKind::CompileOnly => self.compile_only,
            ActionKind::CompileAndRun => self.compile_and_run,
        }
    }

    pub fn issue(&mut self, kind: ActionKind) -> Ticket {
        let slot = self.slot(kind);
        *slot += 1;
        Ticket { kind, seq: *slot }
    }

    /// True if a newer action of the same kind has been started since `ticket`
    pub fn is_stale(&self, ticket: Ticket) -> bool {
        ticket.seq < self.latest(ticket.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_count_independently() {
        let mut seq = Sequences::default();
        let first = seq.issue(ActionKind::CompileOnly);
        let run = seq.issue(ActionKind::CompileAndRun);
        assert!(!seq.is_stale(first));
        assert!(!seq.is_stale(run));

        let second = seq.issue(ActionKind::CompileOnly);
        assert!(seq.is_stale(first));
        assert!(!seq.is_stale(second));
        assert!(!seq.is_stale(run));
    }
}
