use clap::Parser;
use formsmith::prelude::*;
use std::process::ExitCode;
use std::time::Duration;

/// Generate a validated UI form definition from a free-text prompt.
#[derive(Parser, Debug)]
#[command(name = "formsmith-cli", version, about)]
struct Args {
    /// Free-text description of the form to generate
    prompt: String,

    /// Program used to invoke the text-generation model
    #[arg(long, default_value = "ollama")]
    program: String,

    /// Arguments passed to the program before the prompt
    /// (e.g. --backend-arg run --backend-arg deepseek-coder-v2:16b)
    #[arg(long = "backend-arg")]
    backend_args: Vec<String>,

    /// Backend timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Maximum generation attempts before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let backend = CommandBackend::new(&args.program)
        .with_args(args.backend_args.iter().cloned())
        .with_timeout(Duration::from_secs(args.timeout));

    let generator = Generator::builder(Box::new(backend))
        .with_max_attempts(args.max_attempts)
        .build();

    match generator.generate(&args.prompt) {
        Ok(generated) => {
            eprintln!(
                "Generated a valid form definition in {} attempt(s)",
                generated.attempts
            );
            match serde_json::to_string_pretty(&generated.form) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to serialize form definition: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            let response = ErrorResponse::from(&err);
            let body = serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| response.error.clone());
            eprintln!("{body}");
            ExitCode::FAILURE
        }
    }
}
