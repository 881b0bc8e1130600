//! Fixed copy and identifiers shared by the controller, renderer and client.

/// Model identifier sent with every generation request.
pub const SCENE_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Checked when the configured variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

pub const APP_TITLE: &str = "Screenplay Generator";
pub const APP_SUBTITLE: &str =
    "Describe your scene below and let AI bring it to life in screenplay format.";
pub const INPUT_LABEL: &str = "Scene Description";
pub const INPUT_PLACEHOLDER: &str =
    "e.g., A detective interrogates a nervous suspect in a dimly lit room.";

pub const BUTTON_LABEL: &str = "Generate Scene";
pub const BUTTON_LOADING_LABEL: &str = "Generating...";

pub const EMPTY_PROMPT_NOTICE: &str = "Please enter a scene description.";
pub const INIT_FAILED_MESSAGE: &str = "Could not initialize the AI. Please check your API key setup.";
pub const NOT_INITIALIZED_MESSAGE: &str = "AI is not initialized.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "An error occurred while generating the screenplay. Please try again.";
