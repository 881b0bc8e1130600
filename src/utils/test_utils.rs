#[cfg(test)]
use crate::core::generator::{GenerateError, SceneGenerator};
#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::Mutex;

/// A generator that replays canned responses and records every prompt.
#[cfg(test)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerateError>>>,
    prompts: Mutex<Vec<String>>,
}

#[cfg(test)]
impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, GenerateError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl SceneGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerateError::EmptyResponse { finish_reason: None }))
    }
}

/// A real `reqwest` error, produced without touching the network.
#[cfg(test)]
pub fn transport_error() -> GenerateError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("invalid URL should fail to build");
    GenerateError::Transport(err)
}
