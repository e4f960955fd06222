//! Common test utilities: canned backend stubs and document helpers.
use formsmith::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// A backend stub that replays a fixed sequence of responses and records
/// every prompt it receives. The final response repeats once the sequence
/// runs out.
#[allow(dead_code)]
pub struct ScriptedBackend {
    responses: Mutex<Vec<std::result::Result<String, BackendError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicU32,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn new(responses: Vec<std::result::Result<String, BackendError>>) -> Arc<Self> {
        assert!(!responses.is_empty(), "stub needs at least one response");
        Arc::new(Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        })
    }

    pub fn always(response: std::result::Result<String, BackendError>) -> Arc<Self> {
        Self::new(vec![response])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

impl TextGenerationBackend for ScriptedBackend {
    fn complete(&self, prompt: &str) -> std::result::Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        let mut responses = self.responses.lock().expect("response queue poisoned");
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses[0].clone()
        }
    }
}

/// The canonical example as pretty-printed JSON text.
#[allow(dead_code)]
pub fn canonical_json() -> String {
    serde_json::to_string_pretty(&canonical_example()).expect("example serializes")
}

/// The canonical example as a generic JSON tree, for mutation in tests.
#[allow(dead_code)]
pub fn canonical_value() -> serde_json::Value {
    serde_json::to_value(canonical_example()).expect("example serializes")
}

/// Wraps text in a markdown code fence the way chat backends do.
#[allow(dead_code)]
pub fn fenced(text: &str) -> String {
    format!("```json\n{text}\n```")
}
