use super::control::ControlType;
use super::properties::ControlProperties;
use serde::Serialize;

/// The root form document produced by a successful generation run.
///
/// The workflow and trigger collections are opaque to the engine; they are
/// carried through untouched. `controls` is order-significant for layout
/// rendering but not for validation. A `FormDefinition` is built fresh per
/// attempt by the validator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub client_workflows: Vec<serde_json::Value>,
    pub server_workflows: Vec<serde_json::Value>,
    pub client_triggers: Vec<serde_json::Value>,
    pub server_triggers: Vec<serde_json::Value>,
    pub controls: Vec<Control>,
}

/// A single UI element node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub control_type: ControlType,
    pub properties: ControlProperties,
    pub template_id: String,
    /// `None` only for the document root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Placement inside the parent Grid. Required for every non-root,
    /// non-Grid control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_properties: Option<ParentProperties>,
}

/// Grid cell placement of a child control. Row and column are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentProperties {
    pub column: i64,
    pub row: i64,
}

/// A sized length used by Grid rows, columns, and gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimension {
    pub size: i64,
    pub unit: Unit,
}

/// The unit of a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    /// Absolute pixels.
    #[serde(rename = "PX")]
    Px,
    /// A fractional share of the remaining space.
    #[serde(rename = "FR")]
    Fr,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Px => "PX",
            Unit::Fr => "FR",
        }
    }
}

/// A Grid column declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: i64,
    pub width: Dimension,
}

/// A Grid row declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub id: i64,
    pub height: Dimension,
}
