//! The interactive scene session.
//!
//! [`run_scene_ui`] sets up the terminal, runs the event loop until the user
//! quits, and restores the terminal even when the loop fails.

mod event_loop;
pub mod keybindings;
mod lifecycle;

use std::error::Error;

use crate::core::controller::SceneController;
use crate::ui::theme::Theme;

use lifecycle::{restore_terminal, setup_terminal};

pub async fn run_scene_ui(controller: SceneController) -> Result<(), Box<dyn Error>> {
    let theme = Theme::dark_default();
    let mut session = setup_terminal()?;
    let result = event_loop::drive(&mut session.terminal, controller, &theme).await;
    restore_terminal(&mut session)?;
    result
}
