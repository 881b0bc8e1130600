//! Terminal UI layer for the scene generator.
//!
//! - [`view`]: pure projection of controller state into the screen's layout
//!   contract (header, input section, trigger, result area).
//! - [`renderer`] and [`theme`]: ratatui drawing of that projection.
//! - [`scene_loop`]: terminal setup/teardown, input resolution and the event
//!   loop that drives [`crate::core::controller::SceneController`].

pub mod renderer;
pub mod scene_loop;
pub mod theme;
pub mod view;
