//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: event loop, key bindings, pane focus, worker threads for requests
//! - **[`panes`]**: stateless render functions for each visible pane (editor,
//!   stage tabs, status bar, popups)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`ViewState`] and
//! a [`CompileClient`], then call [`App::run`] to start the event loop.
//!
//! [`ViewState`]: crate::view::ViewState
//! [`CompileClient`]: crate::client::CompileClient
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
