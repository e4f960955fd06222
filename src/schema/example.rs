use super::control::ControlType;
use super::model::{Column, Control, Dimension, FormDefinition, ParentProperties, Row, Unit};
use super::properties::{
    ControlProperties, GridProperties, TextBlockProperties, TextBoxProperties,
};
use serde_json::Map;

const VISIBLE: &str = "Visible";

/// The canonical worked example embedded in every prompt: one Form, one Grid
/// with five rows and one column, and two labeled text inputs stacked in the
/// first four rows.
///
/// The validator accepts this document unmodified, so it doubles as a
/// structural reference in tests.
pub fn canonical_example() -> FormDefinition {
    FormDefinition {
        client_workflows: Vec::new(),
        server_workflows: Vec::new(),
        client_triggers: Vec::new(),
        server_triggers: Vec::new(),
        controls: vec![
            Control {
                id: "FORM001".to_string(),
                name: "BookingForm".to_string(),
                control_type: ControlType::Form,
                properties: ControlProperties::Other(Map::new()),
                template_id: "Form1".to_string(),
                parent_id: None,
                parent_properties: None,
            },
            Control {
                id: "GRID001".to_string(),
                name: "BookingGrid".to_string(),
                control_type: ControlType::Grid,
                properties: ControlProperties::Grid(grid_layout()),
                template_id: "Grid1".to_string(),
                parent_id: Some("FORM001".to_string()),
                parent_properties: None,
            },
            label("LBL001", "LabelFullName", "Full Name:", 1),
            textbox("TXT001", "TextBoxFullName", "Enter Full Name", "string", 2),
            label("LBL002", "LabelEmail", "Email:", 3),
            textbox("TXT002", "TextBoxEmail", "Enter Email", "email", 4),
        ],
    }
}

/// The canonical example rendered as pretty-printed JSON for prompt embedding.
pub fn canonical_example_json() -> String {
    serde_json::to_string_pretty(&canonical_example())
        .expect("canonical example serializes to JSON")
}

/// The five-row, one-column reference layout: four 50px rows, one 100px row,
/// a single fractional column, 20px gaps.
fn grid_layout() -> GridProperties {
    GridProperties {
        column_gap: Some(px(20)),
        row_gap: Some(px(20)),
        columns: vec![Column {
            id: 1,
            width: Dimension {
                size: 1,
                unit: Unit::Fr,
            },
        }],
        rows: (1..=5)
            .map(|id| Row {
                id,
                height: px(if id == 5 { 100 } else { 50 }),
            })
            .collect(),
    }
}

fn px(size: i64) -> Dimension {
    Dimension {
        size,
        unit: Unit::Px,
    }
}

fn label(id: &str, name: &str, text: &str, row: i64) -> Control {
    Control {
        id: id.to_string(),
        name: name.to_string(),
        control_type: ControlType::TextBlock,
        properties: ControlProperties::TextBlock(TextBlockProperties {
            text: text.to_string(),
            editable: false,
            visible: Some(VISIBLE.to_string()),
        }),
        template_id: "TextBlock1".to_string(),
        parent_id: Some("GRID001".to_string()),
        parent_properties: Some(ParentProperties { column: 1, row }),
    }
}

fn textbox(id: &str, name: &str, placeholder: &str, value_type: &str, row: i64) -> Control {
    Control {
        id: id.to_string(),
        name: name.to_string(),
        control_type: ControlType::TextBox,
        properties: ControlProperties::TextBox(TextBoxProperties {
            placeholder: Some(placeholder.to_string()),
            value: Some(String::new()),
            value_type: Some(value_type.to_string()),
            visible: Some(VISIBLE.to_string()),
        }),
        template_id: "TextBox1".to_string(),
        parent_id: Some("GRID001".to_string()),
        parent_properties: Some(ParentProperties { column: 1, row }),
    }
}
