//! Main TUI application state and logic

use crate::client::{apply_example, CompileClient, CompileResult, HttpTransport, Transport};
use crate::controller::{self, Applied};
use crate::view::{ActionKind, TabId, Ticket, ViewState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Editor,
    Stages,
}

impl FocusedPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPane::Editor => FocusedPane::Stages,
            FocusedPane::Stages => FocusedPane::Editor,
        }
    }
}

/// A finished network call, sent back from a worker thread
enum Completion {
    Compile {
        ticket: Ticket,
        outcome: crate::client::Result<CompileResult>,
    },
    Example {
        name: String,
        outcome: crate::client::Result<String>,
    },
}

/// The main application state
pub struct App<T: Transport + 'static = HttpTransport> {
    /// Everything the screen shows
    pub view: ViewState,

    client: Arc<CompileClient<T>>,

    /// Shown in the status bar
    server_url: String,

    /// Example names offered by the picker
    pub examples: Vec<String>,

    /// Highlighted picker entry; `None` while the picker is closed
    pub picker: Option<usize>,

    pub focused_pane: FocusedPane,

    pub editor_scroll: usize,

    /// Per-tab scroll offsets for the stage panels
    pub stage_scroll: FxHashMap<TabId, usize>,

    /// Requests still waiting for a response
    pub in_flight: usize,

    pub should_quit: bool,

    pub status_message: String,

    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl<T: Transport + 'static> App<T> {
    pub fn new(
        view: ViewState,
        client: CompileClient<T>,
        server_url: impl Into<String>,
        examples: Vec<String>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        App {
            view,
            client: Arc::new(client),
            server_url: server_url.into(),
            examples,
            picker: None,
            focused_pane: FocusedPane::Editor,
            editor_scroll: 0,
            stage_scroll: FxHashMap::default(),
            in_flight: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            tx,
            rx,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.apply_completions();

            // Poll with a timeout so responses are picked up without a keypress
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        super::panes::render_editor_pane(
            frame,
            columns[0],
            &self.view.source,
            self.focused_pane == FocusedPane::Editor
                && self.picker.is_none()
                && self.view.current_alert().is_none(),
            &mut self.editor_scroll,
        );

        let scroll = self.stage_scroll.entry(self.view.active_tab()).or_insert(0);
        super::panes::render_stage_pane(
            frame,
            columns[1],
            &self.view,
            self.focused_pane == FocusedPane::Stages,
            scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.in_flight,
            &self.server_url,
        );

        if let Some(selected) = self.picker {
            super::panes::render_example_picker(frame, size, &self.examples, selected);
        }

        if let Some(alert) = self.view.current_alert() {
            super::panes::render_alert(frame, size, alert, self.view.alerts.len());
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Alerts are modal
        if self.view.current_alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.view.dismiss_alert();
            }
            return;
        }

        if self.picker.is_some() {
            self.handle_picker_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('b') if ctrl => self.start_action(ActionKind::CompileOnly),
            KeyCode::F(5) => self.start_action(ActionKind::CompileOnly),
            KeyCode::Char('r') if ctrl => self.start_action(ActionKind::CompileAndRun),
            KeyCode::F(6) => self.start_action(ActionKind::CompileAndRun),
            KeyCode::Char('l') if ctrl => {
                self.view.clear();
                self.stage_scroll.clear();
                self.editor_scroll = 0;
                self.status_message = "Cleared".to_string();
            }
            KeyCode::Char('o') if ctrl => self.picker = Some(self.current_example_index()),
            KeyCode::Tab | KeyCode::BackTab => self.focused_pane = self.focused_pane.toggle(),
            _ => match self.focused_pane {
                FocusedPane::Editor => self.handle_editor_key(key),
                FocusedPane::Stages => self.handle_stage_key(key),
            },
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let doc = &mut self.view.source;
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                doc.insert_char(c)
            }
            KeyCode::Enter => doc.insert_char('\n'),
            KeyCode::Backspace => doc.backspace(),
            KeyCode::Delete => doc.delete(),
            KeyCode::Left => doc.move_left(),
            KeyCode::Right => doc.move_right(),
            KeyCode::Up => doc.move_up(),
            KeyCode::Down => doc.move_down(),
            KeyCode::Home => doc.move_home(),
            KeyCode::End => doc.move_end(),
            _ => {}
        }
    }

    fn handle_stage_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.view.tabs.prev(),
            KeyCode::Right => self.view.tabs.next(),
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(idx) = c.to_digit(10) {
                    self.view.tabs.select(TabId::ALL[idx as usize - 1]);
                }
            }
            KeyCode::Up => self.scroll_active(|offset| offset.saturating_sub(1)),
            KeyCode::Down => self.scroll_active(|offset| offset.saturating_add(1)),
            KeyCode::PageUp => self.scroll_active(|offset| offset.saturating_sub(10)),
            KeyCode::PageDown => self.scroll_active(|offset| offset.saturating_add(10)),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(selected) = self.picker else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.picker = None,
            KeyCode::Up => self.picker = Some(selected.saturating_sub(1)),
            KeyCode::Down => {
                let last = self.examples.len().saturating_sub(1);
                self.picker = Some((selected + 1).min(last));
            }
            KeyCode::Enter => {
                self.picker = None;
                if let Some(name) = self.examples.get(selected).cloned() {
                    self.start_example_load(name);
                }
            }
            _ => {}
        }
    }

    fn current_example_index(&self) -> usize {
        self.view
            .selected_example
            .as_ref()
            .and_then(|name| self.examples.iter().position(|e| e == name))
            .unwrap_or(0)
    }

    fn scroll_active(&mut self, f: impl Fn(usize) -> usize) {
        let offset = self.stage_scroll.entry(self.view.active_tab()).or_insert(0);
        *offset = f(*offset);
    }

    /// Validate on the UI thread, then send from a worker
    pub fn start_action(&mut self, kind: ActionKind) {
        let Some(pending) = controller::begin(&mut self.view, kind) else {
            return;
        };

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.status_message = format!("Waiting for {}...", kind);

        thread::spawn(move || {
            let outcome = client.send(pending.request);
            // The receiver is gone only if the app has shut down
            let _ = tx.send(Completion::Compile {
                ticket: pending.ticket,
                outcome,
            });
        });
    }

    /// Fetch an example from a worker; an empty name is a no-op
    pub fn start_example_load(&mut self, name: String) {
        if name.is_empty() {
            return;
        }
        self.view.selected_example = Some(name.clone());

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.status_message = format!("Loading {}...", name);

        thread::spawn(move || {
            let outcome = client.load_example(&name);
            let _ = tx.send(Completion::Example { name, outcome });
        });
    }

    /// Apply every completion that has arrived, without blocking
    pub fn apply_completions(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
        }
    }

    /// Block until every outstanding request has been applied
    pub fn wait_idle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv() {
                Ok(completion) => self.apply(completion),
                Err(_) => break,
            }
        }
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Compile { ticket, outcome } => {
                let applied = controller::finish(&mut self.view, ticket, outcome);
                debug!(action = %ticket.kind, seq = ticket.seq, ?applied, "completion applied");
                self.status_message = match applied {
                    Applied::Rendered => format!("Finished {}", ticket.kind),
                    Applied::Failed => format!("{} failed", ticket.kind),
                    Applied::Stale => format!("Ignored an older {} response", ticket.kind),
                };
            }
            Completion::Example { name, outcome } => {
                let loaded = outcome.is_ok();
                apply_example(&mut self.view, &name, outcome);
                if loaded {
                    self.editor_scroll = 0;
                    self.status_message = format!("Loaded {}", name);
                } else {
                    self.status_message = "Ready!".to_string();
                }
            }
        }
    }
}
