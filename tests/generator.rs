//! Retry-loop tests against a scripted backend.
mod common;
use common::*;
use formsmith::prelude::*;

#[test]
fn succeeds_on_the_last_attempt_within_the_bound() {
    let backend = ScriptedBackend::new(vec![
        Ok("no json here".to_string()),
        Ok("still chatting, no object".to_string()),
        Ok("nope".to_string()),
        Ok("sorry".to_string()),
        Ok(fenced(&canonical_json())),
    ]);
    let generator = Generator::builder(Box::new(backend.clone()))
        .with_max_attempts(5)
        .build();

    let generated = generator.generate("a booking form").expect("fifth attempt succeeds");
    assert_eq!(generated.attempts, 5);
    assert_eq!(generated.form, canonical_example());
    assert_eq!(backend.calls(), 5);
}

#[test]
fn stops_exactly_at_the_attempt_bound() {
    let backend = ScriptedBackend::always(Ok("never valid".to_string()));
    let generator = Generator::builder(Box::new(backend.clone()))
        .with_max_attempts(3)
        .build();

    let err = generator.generate("a booking form").expect_err("must exhaust retries");
    match err {
        GenerateError::RetriesExhausted {
            attempts,
            last_raw_output,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert_eq!(last_raw_output.as_deref(), Some("never valid"));
            assert!(!last_error.is_empty());
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(backend.calls(), 3);
}

#[test]
fn empty_prompt_fails_without_calling_the_backend() {
    let backend = ScriptedBackend::always(Ok(canonical_json()));
    let generator = Generator::builder(Box::new(backend.clone())).build();

    let err = generator.generate("   \n ").expect_err("blank prompt must fail");
    assert!(matches!(err, GenerateError::EmptyPrompt));
    assert_eq!(backend.calls(), 0);
}

#[test]
fn backend_failures_leave_no_raw_output_behind() {
    let backend = ScriptedBackend::always(Err(BackendError::Timeout { seconds: 1 }));
    let generator = Generator::builder(Box::new(backend.clone()))
        .with_max_attempts(2)
        .build();

    let err = generator.generate("a booking form").expect_err("backend always times out");
    match err {
        GenerateError::RetriesExhausted {
            last_raw_output, ..
        } => assert!(last_raw_output.is_none()),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[test]
fn extraction_failure_feeds_a_corrective_line_into_the_next_prompt() {
    let backend = ScriptedBackend::new(vec![
        Ok("prose with no object".to_string()),
        Ok(fenced(&canonical_json())),
    ]);
    let generator = Generator::builder(Box::new(backend.clone())).build();

    generator.generate("a booking form").expect("second attempt succeeds");

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 2);
    let corrective = "Output ONLY a single JSON object.";
    assert!(!prompts[0].contains(corrective));
    assert!(prompts[1].contains(corrective));

    // Feedback sits between the rules and the user prompt.
    let feedback_at = prompts[1].find(corrective).expect("corrective line present");
    let user_prompt_at = prompts[1].find("User Prompt:").expect("user prompt present");
    assert!(feedback_at < user_prompt_at);
}

#[test]
fn validation_feedback_names_the_violated_constraint() {
    let mut short_grid = canonical_value();
    short_grid["controls"][1]["properties"]["rows"]
        .as_array_mut()
        .expect("rows array")
        .truncate(2);
    let backend = ScriptedBackend::new(vec![
        Ok(short_grid.to_string()),
        Ok(canonical_json()),
    ]);
    let generator = Generator::builder(Box::new(backend.clone())).build();

    let generated = generator.generate("a booking form").expect("second attempt succeeds");
    assert_eq!(generated.attempts, 2);

    let prompts = backend.prompts();
    assert!(prompts[1].contains("violated the schema"));
    assert!(prompts[1].contains("at least 5 rows"));
}

#[test]
fn feedback_accumulates_across_attempts() {
    let mut short_grid = canonical_value();
    short_grid["controls"][1]["properties"]["rows"]
        .as_array_mut()
        .expect("rows array")
        .truncate(2);
    let backend = ScriptedBackend::new(vec![
        Ok("no object at all".to_string()),
        Ok(short_grid.to_string()),
        Ok(canonical_json()),
    ]);
    let generator = Generator::builder(Box::new(backend.clone())).build();

    generator.generate("a booking form").expect("third attempt succeeds");

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 3);
    // The third prompt carries both earlier corrections.
    assert!(prompts[2].contains("Output ONLY a single JSON object."));
    assert!(prompts[2].contains("violated the schema"));
}

#[test]
fn truncated_output_is_repaired_rather_than_retried() {
    let json = canonical_json();
    let truncated = json.trim_end().trim_end_matches('}');
    let backend = ScriptedBackend::always(Ok(truncated.to_string()));
    let generator = Generator::builder(Box::new(backend.clone())).build();

    let generated = generator.generate("a booking form").expect("repair recovers the object");
    assert_eq!(generated.attempts, 1);
    assert_eq!(generated.form, canonical_example());
}

#[test]
fn max_attempts_clamps_to_at_least_one() {
    let backend = ScriptedBackend::always(Ok(canonical_json()));
    let generator = Generator::builder(Box::new(backend.clone()))
        .with_max_attempts(0)
        .build();

    let generated = generator.generate("a booking form").expect("one attempt still runs");
    assert_eq!(generated.attempts, 1);
    assert_eq!(backend.calls(), 1);
}
