//! The fixed screenwriter instruction and the request it wraps.

const SCREENWRITER_PREAMBLE: &str = "You are a professional screenwriter. Write the following scene in standard screenplay format. Do not include episode titles, act numbers, or page numbers. Only output the scene heading, action, character names, and dialogue for this single scene based on the user's prompt:";

/// A validated scene description, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest {
    prompt_text: String,
}

impl SceneRequest {
    /// Returns `None` when the description is empty after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            prompt_text: trimmed.to_string(),
        })
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn full_prompt(&self) -> String {
        build_scene_prompt(&self.prompt_text)
    }
}

pub fn build_scene_prompt(description: &str) -> String {
    format!("{SCREENWRITER_PREAMBLE}\n\n{description}")
}

pub fn screenwriter_preamble() -> &'static str {
    SCREENWRITER_PREAMBLE
}
