//! Screenwright turns a short scene description into a screenplay-formatted
//! scene using the Gemini `generateContent` API.
//!
//! The crate is organized around a small set of layers:
//! - [`core`] owns the controller state machine, the fixed screenwriter prompt,
//!   the [`core::generator::SceneGenerator`] seam and configuration.
//! - [`api`] defines the `generateContent` payloads and the reqwest-backed
//!   client.
//! - [`ui`] renders the terminal interface and runs the interactive loop.
//! - [`cli`] parses arguments and dispatches into the UI or the headless
//!   `generate` command.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
