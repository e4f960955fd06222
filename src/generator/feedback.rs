use crate::error::AttemptError;

/// Maps an attempt failure to the one-line corrective instruction appended to
/// the next prompt. Every failure kind contributes a line; none is dropped.
pub(super) fn corrective_line(err: &AttemptError) -> String {
    match err {
        AttemptError::Backend(_) => "The previous attempt produced no usable output. \
            Respond with exactly one JSON object matching the schema."
            .to_string(),
        AttemptError::Extraction => "Output ONLY a single JSON object. Do not include \
            explanations, markdown, or code fences."
            .to_string(),
        AttemptError::Parse(_) => "Ensure output is STRICTLY valid JSON according to the \
            provided schema, without any surrounding text."
            .to_string(),
        AttemptError::Validation(report) => format!(
            "The previous output violated the schema ({report}). \
            Correct these and output pure JSON only."
        ),
    }
}
