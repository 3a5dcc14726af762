//! Compile and compile-and-run actions
//!
//! Both actions share one sequence: validate the source, send it, render every
//! stage the service reported, then apply the action's own finishing policy.
//!
//! | step                     | compile                  | compile & run                     |
//! |--------------------------|--------------------------|-----------------------------------|
//! | blank source             | validation alert         | validation alert                  |
//! | network/protocol failure | generic alert, no render | generic alert, no render          |
//! | present stages           | rendered                 | rendered                          |
//! | output panel             | only if reported         | always, `(No output)` if empty    |
//! | active tab               | untouched                | forced to output                  |
//! | `success: false`         | alert with `error`       | alert with `error`, after switch  |
//!
//! Each action can run in one call ([`compile_only`], [`compile_and_run`]) or be
//! split into [`begin`] and [`finish`] around a network call made elsewhere,
//! which is what the TUI does from a worker thread.

use crate::client::{ClientError, CompileClient, CompileRequest, CompileResult, Transport};
use crate::render::{render_bytecode, render_tokens, render_tree, semantic_tone};
use crate::view::{ActionKind, AlertKind, TabId, Ticket, Tone, ViewState};
use tracing::{debug, info, warn};

pub const EMPTY_SOURCE_MESSAGE: &str = "Please enter some code first!";

/// An action that passed validation and is waiting for its response
#[derive(Debug, Clone)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: CompileRequest,
}

/// What [`finish`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Stages were rendered (the compile itself may still have failed)
    Rendered,
    /// A structural failure was alerted; no panel changed
    Failed,
    /// A newer action of the same kind was started; the outcome was dropped
    Stale,
}

/// Validate the current source and take a ticket for `kind`.
///
/// Returns `None`, with a validation alert queued, if the source is blank.
pub fn begin(view: &mut ViewState, kind: ActionKind) -> Option<Pending> {
    match CompileRequest::new(view.source.text()) {
        Ok(request) => {
            let ticket = view.sequences.issue(kind);
            info!(action = %kind, seq = ticket.seq, "submitting source");
            Some(Pending { ticket, request })
        }
        Err(_) => {
            debug!(action = %kind, "blank source, nothing sent");
            view.alert(AlertKind::Validation, EMPTY_SOURCE_MESSAGE);
            None
        }
    }
}

/// Apply the outcome of the request started under `ticket`
pub fn finish(
    view: &mut ViewState,
    ticket: Ticket,
    outcome: Result<CompileResult, ClientError>,
) -> Applied {
    if view.sequences.is_stale(ticket) {
        debug!(
            action = %ticket.kind,
            seq = ticket.seq,
            latest = view.sequences.latest(ticket.kind),
            "dropping superseded response"
        );
        return Applied::Stale;
    }

    let result = match outcome {
        Ok(result) => result,
        Err(err) if err.is_structural() => {
            warn!(action = %ticket.kind, %err, "action aborted");
            view.alert(AlertKind::Network, unreachable_message(ticket.kind));
            return Applied::Failed;
        }
        Err(_) => {
            view.alert(AlertKind::Validation, EMPTY_SOURCE_MESSAGE);
            return Applied::Failed;
        }
    };

    render_stages(view, &result);

    if ticket.kind == ActionKind::CompileAndRun {
        let output = match result.output.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => view.placeholders().no_output.clone(),
        };
        view.panels.set_text(TabId::Output, output);
        view.panels.set_tone(TabId::Output, Tone::Success);
        view.tabs.select(TabId::Output);
    }

    if !result.success {
        let error = result.error.as_deref().unwrap_or("unknown error");
        info!(action = %ticket.kind, reason = error, "service reported failure");
        view.alert(AlertKind::Compile, failure_message(ticket.kind, error));
    }

    Applied::Rendered
}

/// Render every stage present in `result`; absent stages keep their panels
fn render_stages(view: &mut ViewState, result: &CompileResult) {
    if let Some(tokens) = &result.tokens {
        view.panels.set_text(TabId::Tokens, render_tokens(tokens));
    }
    if let Some(tree) = &result.ast {
        view.panels.set_text(TabId::Ast, render_tree(tree));
    }
    if let Some(semantic) = non_empty(&result.semantic) {
        view.panels.set_text(TabId::Semantic, semantic.to_string());
        view.panels
            .set_tone(TabId::Semantic, semantic_tone(result.success, semantic));
    }
    if let Some(optimization) = non_empty(&result.optimization) {
        view.panels
            .set_text(TabId::Optimizer, optimization.to_string());
    }
    if let Some(bytecode) = &result.bytecode {
        view.panels.set_text(TabId::Bytecode, render_bytecode(bytecode));
    }
    if let Some(output) = non_empty(&result.output) {
        view.panels.set_text(TabId::Output, output.to_string());
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}

fn unreachable_message(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::CompileOnly => "Failed to compile. Make sure the server is running.",
        ActionKind::CompileAndRun => "Failed to run. Make sure the server is running.",
    }
}

fn failure_message(kind: ActionKind, error: &str) -> String {
    match kind {
        ActionKind::CompileOnly => format!("Compilation failed:\n{}", error),
        ActionKind::CompileAndRun => format!("Execution failed:\n{}", error),
    }
}

/// Run one action to completion on the calling thread
pub fn run_action<T: Transport>(
    view: &mut ViewState,
    client: &CompileClient<T>,
    kind: ActionKind,
) -> Option<Applied> {
    let pending = begin(view, kind)?;
    let outcome = client.send(pending.request);
    Some(finish(view, pending.ticket, outcome))
}

/// Compile without running; never changes the active tab
pub fn compile_only<T: Transport>(
    view: &mut ViewState,
    client: &CompileClient<T>,
) -> Option<Applied> {
    run_action(view, client, ActionKind::CompileOnly)
}

/// Compile and run, then force the output tab
pub fn compile_and_run<T: Transport>(
    view: &mut ViewState,
    client: &CompileClient<T>,
) -> Option<Applied> {
    run_action(view, client, ActionKind::CompileAndRun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Token;

    fn view_with_source(source: &str) -> ViewState {
        let mut view = ViewState::default();
        view.source.replace(source);
        view
    }

    fn failed_result() -> CompileResult {
        CompileResult {
            success: false,
            error: Some("undefined variable x".to_string()),
            tokens: Some(vec![Token {
                kind: "IDENTIFIER".to_string(),
                lexeme: "x".to_string(),
                line: 1,
                column: 7,
            }]),
            semantic: Some("1 error found".to_string()),
            ..CompileResult::default()
        }
    }

    #[test]
    fn test_begin_rejects_blank_source() {
        let mut view = view_with_source("   \n");
        assert!(begin(&mut view, ActionKind::CompileOnly).is_none());
        assert_eq!(view.sequences.latest(ActionKind::CompileOnly), 0);
        assert_eq!(
            view.current_alert().map(|a| a.kind),
            Some(AlertKind::Validation)
        );
    }

    #[test]
    fn test_structural_failure_leaves_panels() {
        let mut view = view_with_source("print x;");
        view.panels.set_text(TabId::Tokens, "earlier tokens".to_string());
        let pending = begin(&mut view, ActionKind::CompileOnly).unwrap();

        let applied = finish(
            &mut view,
            pending.ticket,
            Err(ClientError::Network("connection refused".to_string())),
        );

        assert_eq!(applied, Applied::Failed);
        assert_eq!(view.panels.text(TabId::Tokens), "earlier tokens");
        let alert = view.current_alert().unwrap();
        assert_eq!(alert.kind, AlertKind::Network);
        assert!(!alert.message.contains("connection refused"));
    }

    #[test]
    fn test_compile_failure_still_renders() {
        let mut view = view_with_source("print x;");
        view.tabs.select(TabId::Bytecode);
        let pending = begin(&mut view, ActionKind::CompileOnly).unwrap();

        assert_eq!(
            finish(&mut view, pending.ticket, Ok(failed_result())),
            Applied::Rendered
        );
        assert!(view.panels.text(TabId::Tokens).starts_with("Token 1: IDENTIFIER"));
        assert_eq!(view.panels.tone(TabId::Semantic), Tone::Error);
        assert_eq!(view.active_tab(), TabId::Bytecode);
        assert_eq!(
            view.current_alert().map(|a| a.message.as_str()),
            Some("Compilation failed:\nundefined variable x")
        );
    }

    #[test]
    fn test_run_failure_forces_output_tab() {
        let mut view = view_with_source("print x;");
        let pending = begin(&mut view, ActionKind::CompileAndRun).unwrap();
        finish(&mut view, pending.ticket, Ok(failed_result()));

        assert_eq!(view.active_tab(), TabId::Output);
        assert_eq!(view.panels.text(TabId::Output), "(No output)");
        assert_eq!(view.panels.tone(TabId::Output), Tone::Success);
        assert_eq!(
            view.current_alert().map(|a| a.message.as_str()),
            Some("Execution failed:\nundefined variable x")
        );
    }

    #[test]
    fn test_run_with_empty_output_shows_fallback() {
        let mut view = view_with_source("let x = 1;");
        view.panels.set_text(TabId::Output, "stale".to_string());
        let pending = begin(&mut view, ActionKind::CompileAndRun).unwrap();
        let result = CompileResult {
            success: false,
            error: Some("runtime error".to_string()),
            output: Some(String::new()),
            ..CompileResult::default()
        };

        finish(&mut view, pending.ticket, Ok(result));

        assert_eq!(view.panels.text(TabId::Output), "(No output)");
        assert_eq!(view.panels.tone(TabId::Output), Tone::Success);
        assert_eq!(view.active_tab(), TabId::Output);
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let mut view = view_with_source("print 1;");
        let first = begin(&mut view, ActionKind::CompileAndRun).unwrap();
        let second = begin(&mut view, ActionKind::CompileAndRun).unwrap();

        let newer = CompileResult {
            success: true,
            output: Some("2".to_string()),
            ..CompileResult::default()
        };
        let older = CompileResult {
            success: true,
            output: Some("1".to_string()),
            ..CompileResult::default()
        };

        assert_eq!(finish(&mut view, second.ticket, Ok(newer)), Applied::Rendered);
        assert_eq!(finish(&mut view, first.ticket, Ok(older)), Applied::Stale);
        assert_eq!(view.panels.text(TabId::Output), "2");
    }

    #[test]
    fn test_late_compile_does_not_undo_run_switch() {
        let mut view = view_with_source("print 1;");
        let compile = begin(&mut view, ActionKind::CompileOnly).unwrap();
        let run = begin(&mut view, ActionKind::CompileAndRun).unwrap();

        let ok = CompileResult {
            success: true,
            output: Some("1".to_string()),
            ..CompileResult::default()
        };
        finish(&mut view, run.ticket, Ok(ok.clone()));
        // different kinds race freely; the late compile renders but never switches tabs
        assert_eq!(finish(&mut view, compile.ticket, Ok(ok)), Applied::Rendered);
        assert_eq!(view.active_tab(), TabId::Output);
    }
}
