//! # Introduction
//!
//! stagetty is a terminal front end for an external multi-stage compiler
//! service. It submits the editor's source to the service, receives one JSON
//! report covering every stage (tokens, syntax tree, semantic analysis,
//! optimization notes, bytecode, execution output) and renders each stage into
//! its own tab with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Key → controller::begin → CompileClient (worker thread) → envelope normalization
//!     → controller::finish → render → ViewState → TUI
//! ```
//!
//! 1. [`client`]: the HTTP contract, the dual-shape envelope normalization and
//!    example loading.
//! 2. [`render`]: pure, column-aligned formatting of each stage.
//! 3. [`controller`]: the compile and compile-and-run actions with their
//!    alerting and tab policies.
//! 4. [`view`]: the explicit, serializable view state (source document,
//!    panels, active tab, alerts, sequence counters).
//! 5. [`config`]: JSON configuration for the server, tabs, examples and
//!    placeholder text.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod client;
pub mod config;
pub mod controller;
pub mod render;
pub mod ui;
pub mod view;
