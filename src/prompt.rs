//! Builds the instruction prompt sent to the text-generation backend.

use crate::schema::{ControlType, canonical_example_json};
use itertools::Itertools;

/// Renders the full instruction string for one generation attempt.
///
/// The output contains, in order: a role statement, the numbered strict
/// rules with the worked example embedded as literal JSON, any corrective
/// feedback accumulated from prior failed attempts (verbatim, one line per
/// failure), and the user's prompt. Pure function of its inputs.
pub fn build_instructions(user_prompt: &str, feedback: &[String]) -> String {
    let control_list = ControlType::ALL.iter().map(ControlType::as_str).join(", ");

    let mut instructions = format!(
        "\
You are a JSON UI generator for a form design studio.

STRICT RULES:
0. Output ONLY valid pure JSON, no extra text or formatting.
1. The root control must be a Form or FormViewer.
2. Include a Grid container child with a layout of at least 5 rows and 1 column.
3. All other controls must be direct children of the Grid, with parentId set \
to the Grid's id and explicit parentProperties giving the column and row \
within the Grid's declared layout.
4. Use only these control types: {control_list}
5. Follow exactly this example schema and control layout:

{example}

6. Controls should have meaningfully filled properties and all must have \
'visible' set to 'Visible'.
7. Adapt control count and specific control types logically to the user \
prompt, but keep the structure.
8. DO NOT output any text besides pure JSON.
",
        example = canonical_example_json(),
    );

    for line in feedback {
        instructions.push('\n');
        instructions.push_str(line);
    }

    instructions.push_str("\n\nUser Prompt:\n");
    instructions.push_str(user_prompt);
    instructions
}
