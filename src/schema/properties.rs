use super::model::{Column, Dimension, Row};
use serde::Serialize;
use serde_json::{Map, Value};

/// The property bag of a control, keyed by the owning control's `type`.
///
/// A small set of control kinds have dedicated shapes; everything else falls
/// back to [`ControlProperties::Other`], an arbitrary string-keyed map. The
/// validator dispatches on the control's type to pick the variant, so this
/// enum is never deserialized blindly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ControlProperties {
    Grid(GridProperties),
    TextBox(TextBoxProperties),
    TextBlock(TextBlockProperties),
    Button(ButtonProperties),
    Dropdown(DropdownProperties),
    DatePicker(DatePickerProperties),
    /// Catch-all for control kinds without a dedicated shape.
    Other(Map<String, Value>),
}

impl ControlProperties {
    /// The `visible` field, if this property bag carries one.
    pub fn visible(&self) -> Option<&str> {
        match self {
            ControlProperties::Grid(_) => None,
            ControlProperties::TextBox(p) => p.visible.as_deref(),
            ControlProperties::TextBlock(p) => p.visible.as_deref(),
            ControlProperties::Button(p) => p.visible.as_deref(),
            ControlProperties::Dropdown(p) => p.visible.as_deref(),
            ControlProperties::DatePicker(p) => p.visible.as_deref(),
            ControlProperties::Other(map) => map.get("visible").and_then(Value::as_str),
        }
    }
}

/// Layout declaration of a Grid container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<Dimension>,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBoxProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlockProperties {
    pub text: String,
    pub editable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonProperties {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownProperties {
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatePickerProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<String>,
}
