//! The seam to the external text-generation collaborator.

use crate::error::BackendError;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// A synchronous, single-shot, stateless text completion call.
///
/// Implementations may fail or time out; both surface as [`BackendError`] and
/// are treated by the retry loop like any other failed attempt. Closures with
/// the matching signature implement this trait, which keeps test stubs cheap.
pub trait TextGenerationBackend: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, BackendError>;
}

impl<F> TextGenerationBackend for F
where
    F: Fn(&str) -> Result<String, BackendError> + Send + Sync,
{
    fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        self(prompt)
    }
}

impl<T> TextGenerationBackend for std::sync::Arc<T>
where
    T: TextGenerationBackend + ?Sized,
{
    fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        (**self).complete(prompt)
    }
}

/// Runs a local model CLI (e.g. `ollama run <model>`) as a child process,
/// passing the prompt as the final argument and capturing stdout.
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Arguments placed before the prompt (e.g. `["run", "model-name"]`).
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn kill(child: &mut Child) {
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl TextGenerationBackend for CommandBackend {
    fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BackendError::Spawn(e.to_string()))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| BackendError::Spawn("stdout not captured".to_string()))?;

        // Drain stdout on a separate thread so a chatty child cannot fill the
        // pipe and deadlock against our wait.
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = stdout.read_to_end(&mut buf).map(|_| buf);
            let _ = tx.send(result);
        });

        let output = match rx.recv_timeout(self.timeout) {
            Ok(Ok(buf)) => buf,
            Ok(Err(e)) => {
                Self::kill(&mut child);
                return Err(BackendError::Process {
                    message: e.to_string(),
                });
            }
            Err(_) => {
                Self::kill(&mut child);
                return Err(BackendError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let status = child.wait().map_err(|e| BackendError::Process {
            message: e.to_string(),
        })?;
        if !status.success() {
            let mut stderr_text = String::new();
            if let Some(mut stderr) = child.stderr.take() {
                let _ = stderr.read_to_string(&mut stderr_text);
            }
            return Err(BackendError::Process {
                message: format!("{status}: {}", stderr_text.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output).trim().to_string())
    }
}
