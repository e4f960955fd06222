//! The retry loop driving prompt → backend → extract → parse → validate.
//!
//! Each generation request runs its own strictly sequential attempt loop with
//! call-local state (feedback accumulator, attempt counter, last raw output),
//! so a single [`Generator`] can serve concurrent requests without
//! coordination.

use crate::backend::TextGenerationBackend;
use crate::error::{AttemptError, GenerateError};
use crate::extract::extract_json;
use crate::parse::parse_lenient;
use crate::prompt::build_instructions;
use crate::schema::FormDefinition;
use crate::validate::validate_form;
use log::{debug, warn};

mod feedback;

use feedback::corrective_line;

/// Attempt bound used when the builder does not override it.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// The payload of a successful generation run.
#[derive(Debug)]
pub struct Generated {
    pub form: FormDefinition,
    /// Attempts consumed, counting the successful one.
    pub attempts: u32,
}

/// Drives bounded, self-correcting generation attempts against a backend.
pub struct Generator {
    backend: Box<dyn TextGenerationBackend>,
    max_attempts: u32,
}

pub struct GeneratorBuilder {
    backend: Box<dyn TextGenerationBackend>,
    max_attempts: u32,
}

impl GeneratorBuilder {
    pub fn new(backend: Box<dyn TextGenerationBackend>) -> Self {
        Self {
            backend,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the attempt bound. Clamped to at least one attempt.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn build(self) -> Generator {
        Generator {
            backend: self.backend,
            max_attempts: self.max_attempts,
        }
    }
}

impl Generator {
    pub fn builder(backend: Box<dyn TextGenerationBackend>) -> GeneratorBuilder {
        GeneratorBuilder::new(backend)
    }

    /// Generates a validated form definition from a free-text prompt.
    ///
    /// An empty or whitespace-only prompt fails immediately without invoking
    /// the backend. Otherwise the attempt loop runs up to the configured
    /// bound; every failed attempt appends a corrective line to the next
    /// prompt. Exhaustion returns the last raw backend output and the last
    /// diagnostic for caller-visible reporting.
    pub fn generate(&self, user_prompt: &str) -> Result<Generated, GenerateError> {
        let user_prompt = user_prompt.trim();
        if user_prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        let mut feedback: Vec<String> = Vec::new();
        let mut last_raw: Option<String> = None;
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            debug!("generation attempt {}/{}", attempt, self.max_attempts);
            let instructions = build_instructions(user_prompt, &feedback);

            match self.run_attempt(&instructions, &mut last_raw) {
                Ok(form) => {
                    debug!("attempt {attempt} produced a valid form definition");
                    return Ok(Generated {
                        form,
                        attempts: attempt,
                    });
                }
                Err(err) => {
                    warn!("attempt {attempt} failed: {err}");
                    last_error = err.to_string();
                    feedback.push(corrective_line(&err));
                }
            }
        }

        Err(GenerateError::RetriesExhausted {
            attempts: self.max_attempts,
            last_raw_output: last_raw,
            last_error,
        })
    }

    /// One pass through the pipeline stages. The first failing stage
    /// short-circuits the rest of the attempt.
    fn run_attempt(
        &self,
        instructions: &str,
        last_raw: &mut Option<String>,
    ) -> Result<FormDefinition, AttemptError> {
        let raw = self.backend.complete(instructions)?;
        *last_raw = Some(raw.clone());

        let candidate = extract_json(&raw);
        if candidate.is_empty() {
            return Err(AttemptError::Extraction);
        }

        let tree = parse_lenient(&candidate)?;
        validate_form(&tree)
    }
}
