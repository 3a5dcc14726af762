//! TUI pane rendering modules
//!
//! - [`editor`]: the editable source with line numbers and highlighting
//! - [`stage`]: tab bar plus the active stage panel
//! - [`status`]: status bar with keybindings and request state
//! - [`popup`]: alerts and the example picker drawn over everything else
//!
//! Each pane exports a stateless `render_*` function; scroll offsets are owned
//! by [`App`](crate::ui::App) and passed in by reference.

pub mod editor;
pub mod popup;
pub mod stage;
pub mod status;

pub use editor::render_editor_pane;
pub use popup::{render_alert, render_example_picker};
pub use stage::render_stage_pane;
pub use status::render_status_bar;
