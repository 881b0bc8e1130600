//! TUI-less "generate" command

use std::error::Error;

use crate::core::constants::NOT_INITIALIZED_MESSAGE;
use crate::core::controller::{GenerationResult, ResultEntry, SceneController, SubmitRejection};

/// Run one submit and return the trimmed scene, or the message the
/// interactive UI would have shown.
pub async fn generate_scene(
    controller: &mut SceneController,
    description: &str,
) -> Result<String, String> {
    if !controller.accepts_triggers() {
        return Err(first_error(controller).unwrap_or(NOT_INITIALIZED_MESSAGE.to_string()));
    }

    controller.set_input_text(description);
    match controller.submit().await {
        Ok(GenerationResult::Success { text }) => Ok(text.trim().to_string()),
        Ok(GenerationResult::Failure { message }) => Err(message),
        Err(SubmitRejection::EmptyPrompt) => Err(controller
            .notice()
            .unwrap_or_default()
            .to_string()),
        Err(SubmitRejection::NotInitialized) | Err(SubmitRejection::Busy) => {
            Err(first_error(controller).unwrap_or(NOT_INITIALIZED_MESSAGE.to_string()))
        }
    }
}

fn first_error(controller: &SceneController) -> Option<String> {
    controller.entries().iter().find_map(|entry| match entry {
        ResultEntry::Error(message) => Some(message.clone()),
        _ => None,
    })
}

pub async fn run_generate(
    description: Vec<String>,
    mut controller: SceneController,
) -> Result<(), Box<dyn Error>> {
    let description = description.join(" ");
    if description.trim().is_empty() {
        eprintln!("Usage: screenwright generate <scene description>");
        std::process::exit(1);
    }

    match generate_scene(&mut controller, &description).await {
        Ok(scene) => {
            println!("{scene}");
            Ok(())
        }
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }
}
