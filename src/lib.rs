//! # Formsmith - Self-Correcting Form Definition Generation
//!
//! **Formsmith** turns a free-text prompt into a validated, strictly
//! structured UI form definition by repeatedly invoking a pluggable
//! text-generation backend and coercing its output into a fixed schema.
//!
//! ## Core Workflow
//!
//! Each generation attempt runs the same pipeline:
//!
//! 1. **Prompt**: an instruction string embeds the schema rules, a worked
//!    example document, and any corrective feedback from earlier attempts.
//! 2. **Invoke**: the [`backend::TextGenerationBackend`] collaborator
//!    produces raw text. Backends are a trait seam, so anything from a local
//!    model CLI to a test stub plugs in.
//! 3. **Extract**: the first brace-balanced JSON object is isolated from
//!    surrounding prose, markdown fences, and escaping artifacts.
//! 4. **Parse**: the candidate is parsed leniently, repairing truncated
//!    closing braces when possible.
//! 5. **Validate**: the parsed tree is checked against every schema
//!    invariant, producing a typed [`schema::FormDefinition`] or a detailed
//!    violation report.
//!
//! Failures at any stage feed a corrective line back into the next attempt's
//! prompt; the loop is bounded and the terminal outcome carries the last raw
//! output for diagnosis.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formsmith::prelude::*;
//! use std::time::Duration;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let backend = CommandBackend::new("ollama")
//!         .with_args(["run", "deepseek-coder-v2:16b"])
//!         .with_timeout(Duration::from_secs(120));
//!
//!     let generator = Generator::builder(Box::new(backend))
//!         .with_max_attempts(5)
//!         .build();
//!
//!     let generated = generator.generate("a two-field login form")?;
//!     println!(
//!         "valid after {} attempt(s):\n{}",
//!         generated.attempts,
//!         serde_json::to_string_pretty(&generated.form)?
//!     );
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod extract;
pub mod generator;
pub mod parse;
pub mod prelude;
pub mod prompt;
pub mod schema;
pub mod validate;
