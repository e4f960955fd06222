//! Structural and semantic validation of parsed form documents.
//!
//! The validator walks a generic JSON tree, builds the typed
//! [`FormDefinition`], and checks every document invariant. It is total: it
//! inspects every control rather than stopping at the first problem, so the
//! retry loop can hand the model a complete list of what to fix.

use crate::error::AttemptError;
use crate::schema::{
    ButtonProperties, Column, Control, ControlProperties, ControlType, DatePickerProperties,
    Dimension, DropdownProperties, FormDefinition, GridProperties, ParentProperties, Row,
    TextBlockProperties, TextBoxProperties, Unit,
};
use ahash::{AHashMap, AHashSet};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

const MIN_GRID_ROWS: usize = 5;
const VISIBLE: &str = "Visible";

/// A single violated constraint with enough detail (path, expected vs.
/// actual) to steer the next generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Every constraint a document violated, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    fn push(
        &mut self,
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) {
        self.violations.push(Violation {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
            first = false;
        }
        Ok(())
    }
}

/// Validates a parsed JSON tree against the form schema.
///
/// Returns the typed document on success, or [`AttemptError::Validation`]
/// carrying the full violation report.
pub fn validate_form(value: &Value) -> Result<FormDefinition, AttemptError> {
    let mut report = ValidationReport::default();

    let Value::Object(root) = value else {
        report.push("$", "a JSON object", kind_of(value));
        return Err(AttemptError::Validation(report));
    };

    let client_workflows = opaque_records(root, "clientWorkflows", &mut report);
    let server_workflows = opaque_records(root, "serverWorkflows", &mut report);
    let client_triggers = opaque_records(root, "clientTriggers", &mut report);
    let server_triggers = opaque_records(root, "serverTriggers", &mut report);

    let mut controls = Vec::new();
    match root.get("controls") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                report.push("controls", "at least one control", "an empty array");
            }
            for (i, item) in items.iter().enumerate() {
                if let Some(control) = build_control(item, &format!("controls[{i}]"), &mut report)
                {
                    controls.push(control);
                }
            }
        }
        Some(other) => report.push("controls", "an array of controls", kind_of(other)),
        None => report.push("controls", "an array of controls", "nothing"),
    }

    check_semantics(&controls, &mut report);

    if report.is_empty() {
        Ok(FormDefinition {
            client_workflows,
            server_workflows,
            client_triggers,
            server_triggers,
            controls,
        })
    } else {
        Err(AttemptError::Validation(report))
    }
}

/// Document-level invariants over the structurally sound controls: root and
/// Grid cardinality, id uniqueness, parent references, placement bounds,
/// cycles, and visibility.
fn check_semantics(controls: &[Control], report: &mut ValidationReport) {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    for (i, control) in controls.iter().enumerate() {
        if index.insert(control.id.as_str(), i).is_some() {
            report.push(
                format!("controls[{i}].id"),
                "a unique control id",
                format!("duplicate '{}'", control.id),
            );
        }
    }

    let roots: Vec<usize> = (0..controls.len())
        .filter(|&i| controls[i].parent_id.is_none())
        .collect();
    if roots.len() != 1 {
        report.push(
            "controls",
            "exactly one root control without parentId",
            format!("{}", roots.len()),
        );
    }
    for &i in &roots {
        if !controls[i].control_type.is_root_kind() {
            report.push(
                format!("controls[{i}].type"),
                "Form or FormViewer for the root control",
                controls[i].control_type.as_str(),
            );
        }
    }

    let grids: Vec<usize> = (0..controls.len())
        .filter(|&i| controls[i].control_type == ControlType::Grid)
        .collect();
    if grids.len() != 1 {
        report.push(
            "controls",
            "exactly one Grid layout container",
            format!("{}", grids.len()),
        );
    }
    for &i in &grids {
        if let ControlProperties::Grid(props) = &controls[i].properties {
            if props.rows.len() < MIN_GRID_ROWS {
                report.push(
                    format!("controls[{i}].properties.rows"),
                    format!("at least {MIN_GRID_ROWS} rows"),
                    format!("{}", props.rows.len()),
                );
            }
            if props.columns.is_empty() {
                report.push(
                    format!("controls[{i}].properties.columns"),
                    "at least 1 column",
                    "0",
                );
            }
        }
    }

    for (i, control) in controls.iter().enumerate() {
        if let Some(visible) = control.properties.visible() {
            if visible != VISIBLE {
                report.push(
                    format!("controls[{i}].properties.visible"),
                    format!("the literal string '{VISIBLE}'"),
                    format!("'{visible}'"),
                );
            }
        }

        let Some(parent_id) = &control.parent_id else {
            continue;
        };
        let Some(&p) = index.get(parent_id.as_str()) else {
            report.push(
                format!("controls[{i}].parentId"),
                "the id of an existing control",
                format!("'{parent_id}'"),
            );
            continue;
        };

        if control.control_type == ControlType::Grid {
            continue;
        }
        match &control.parent_properties {
            None => report.push(
                format!("controls[{i}].parentProperties"),
                "a column/row placement for a non-Grid child",
                "nothing",
            ),
            Some(placement) => {
                let parent = &controls[p];
                if parent.control_type == ControlType::Grid {
                    if let ControlProperties::Grid(grid) = &parent.properties {
                        check_placement(i, placement, grid, report);
                    }
                }
            }
        }
    }

    check_cycles(controls, &index, report);
}

/// A child's declared cell must fall within the parent Grid's bounds.
fn check_placement(
    i: usize,
    placement: &ParentProperties,
    grid: &GridProperties,
    report: &mut ValidationReport,
) {
    let rows = grid.rows.len() as i64;
    let columns = grid.columns.len() as i64;
    if placement.row < 1 || placement.row > rows {
        report.push(
            format!("controls[{i}].parentProperties.row"),
            format!("a row between 1 and {rows}"),
            placement.row.to_string(),
        );
    }
    if placement.column < 1 || placement.column > columns {
        report.push(
            format!("controls[{i}].parentProperties.column"),
            format!("a column between 1 and {columns}"),
            placement.column.to_string(),
        );
    }
}

/// The parent graph is a tree by construction, but a hostile document can
/// still encode a cycle; reject it instead of looping.
fn check_cycles(
    controls: &[Control],
    index: &AHashMap<&str, usize>,
    report: &mut ValidationReport,
) {
    let mut acyclic: AHashSet<usize> = AHashSet::new();
    let mut in_cycle: AHashSet<usize> = AHashSet::new();

    for start in 0..controls.len() {
        if acyclic.contains(&start) || in_cycle.contains(&start) {
            continue;
        }
        let mut chain = vec![start];
        let mut seen: AHashSet<usize> = AHashSet::from_iter([start]);
        let mut current = start;
        loop {
            let next = controls[current]
                .parent_id
                .as_ref()
                .and_then(|id| index.get(id.as_str()).copied());
            match next {
                // Reached the root (or a dangling reference, reported
                // elsewhere): the whole chain is acyclic.
                None => {
                    acyclic.extend(chain.iter().copied());
                    break;
                }
                Some(p) if acyclic.contains(&p) => {
                    acyclic.extend(chain.iter().copied());
                    break;
                }
                Some(p) if in_cycle.contains(&p) => break,
                Some(p) if seen.contains(&p) => {
                    report.push(
                        format!("controls[{start}].parentId"),
                        "an acyclic parent chain",
                        format!("a cycle through '{}'", controls[p].id),
                    );
                    in_cycle.extend(chain.iter().copied());
                    break;
                }
                Some(p) => {
                    seen.insert(p);
                    chain.push(p);
                    current = p;
                }
            }
        }
    }
}

fn build_control(value: &Value, path: &str, report: &mut ValidationReport) -> Option<Control> {
    let Value::Object(obj) = value else {
        report.push(path, "an object", kind_of(value));
        return None;
    };

    let id = req_str(obj, "id", path, report);
    let name = req_str(obj, "name", path, report);
    let template_id = req_str(obj, "templateId", path, report);

    let control_type = match obj.get("type") {
        Some(Value::String(s)) => match ControlType::from_str(s) {
            Ok(t) => Some(t),
            Err(_) => {
                report.push(
                    format!("{path}.type"),
                    "one of the recognized control types",
                    format!("'{s}'"),
                );
                None
            }
        },
        Some(other) => {
            report.push(format!("{path}.type"), "a string", kind_of(other));
            None
        }
        None => {
            report.push(format!("{path}.type"), "a string", "nothing");
            None
        }
    };

    let parent_id = opt_str(obj, "parentId", path, report);
    let parent_properties = match obj.get("parentProperties") {
        None | Some(Value::Null) => None,
        Some(v) => build_parent_properties(v, &format!("{path}.parentProperties"), report),
    };

    let properties = control_type
        .and_then(|t| build_properties(t, obj.get("properties"), &format!("{path}.properties"), report));

    match (id, name, template_id, control_type, properties) {
        (Some(id), Some(name), Some(template_id), Some(control_type), Some(properties)) => {
            Some(Control {
                id,
                name,
                control_type,
                properties,
                template_id,
                parent_id,
                parent_properties,
            })
        }
        _ => None,
    }
}

/// Picks the property shape for the control's type, falling back to the
/// open map for kinds without a dedicated one.
fn build_properties(
    control_type: ControlType,
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<ControlProperties> {
    let Some(value) = value else {
        report.push(path, "an object", "nothing");
        return None;
    };
    let Value::Object(obj) = value else {
        report.push(path, "an object", kind_of(value));
        return None;
    };

    match control_type {
        ControlType::Grid => build_grid_properties(obj, path, report).map(ControlProperties::Grid),
        ControlType::TextBox => Some(ControlProperties::TextBox(TextBoxProperties {
            placeholder: opt_str(obj, "placeholder", path, report),
            value: opt_str(obj, "value", path, report),
            value_type: opt_str(obj, "valueType", path, report),
            visible: opt_str(obj, "visible", path, report),
        })),
        ControlType::TextBlock => {
            let text = req_str(obj, "text", path, report);
            let editable = req_bool(obj, "editable", path, report);
            let visible = opt_str(obj, "visible", path, report);
            match (text, editable) {
                (Some(text), Some(editable)) => {
                    Some(ControlProperties::TextBlock(TextBlockProperties {
                        text,
                        editable,
                        visible,
                    }))
                }
                _ => None,
            }
        }
        ControlType::Button => {
            let text = req_str(obj, "text", path, report);
            let visible = opt_str(obj, "visible", path, report);
            text.map(|text| ControlProperties::Button(ButtonProperties { text, visible }))
        }
        ControlType::Dropdown => {
            let options = req_string_array(obj, "options", path, report);
            let selected_option = opt_str(obj, "selectedOption", path, report);
            let visible = opt_str(obj, "visible", path, report);
            options.map(|options| {
                ControlProperties::Dropdown(DropdownProperties {
                    options,
                    selected_option,
                    visible,
                })
            })
        }
        ControlType::DatePicker => Some(ControlProperties::DatePicker(DatePickerProperties {
            value: opt_str(obj, "value", path, report),
            visible: opt_str(obj, "visible", path, report),
        })),
        _ => Some(ControlProperties::Other(obj.clone())),
    }
}

fn build_grid_properties(
    obj: &Map<String, Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<GridProperties> {
    let column_gap = opt_dimension(obj, "columnGap", path, report);
    let row_gap = opt_dimension(obj, "rowGap", path, report);
    let columns = build_tracks(obj, "columns", "width", path, report)
        .map(|tracks| {
            tracks
                .into_iter()
                .map(|(id, width)| Column { id, width })
                .collect::<Vec<_>>()
        });
    let rows = build_tracks(obj, "rows", "height", path, report).map(|tracks| {
        tracks
            .into_iter()
            .map(|(id, height)| Row { id, height })
            .collect::<Vec<_>>()
    });

    match (columns, rows) {
        (Some(columns), Some(rows)) => Some(GridProperties {
            column_gap,
            row_gap,
            columns,
            rows,
        }),
        _ => None,
    }
}

/// Reads a `columns`/`rows` array of `{id, width|height}` entries.
fn build_tracks(
    obj: &Map<String, Value>,
    key: &str,
    dimension_key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<Vec<(i64, Dimension)>> {
    let entries = match obj.get(key) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            report.push(format!("{path}.{key}"), "an array", kind_of(other));
            return None;
        }
        None => {
            report.push(format!("{path}.{key}"), "an array", "nothing");
            return None;
        }
    };

    let mut tracks = Vec::with_capacity(entries.len());
    let mut sound = true;
    for (i, entry) in entries.iter().enumerate() {
        let entry_path = format!("{path}.{key}[{i}]");
        let Value::Object(entry) = entry else {
            report.push(&entry_path, "an object", kind_of(entry));
            sound = false;
            continue;
        };
        let id = req_i64(entry, "id", &entry_path, report);
        let dimension = match entry.get(dimension_key) {
            Some(v) => build_dimension(v, &format!("{entry_path}.{dimension_key}"), report),
            None => {
                report.push(
                    format!("{entry_path}.{dimension_key}"),
                    "a dimension object",
                    "nothing",
                );
                None
            }
        };
        match (id, dimension) {
            (Some(id), Some(dimension)) => tracks.push((id, dimension)),
            _ => sound = false,
        }
    }
    sound.then_some(tracks)
}

fn opt_dimension(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<Dimension> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => build_dimension(v, &format!("{path}.{key}"), report),
    }
}

fn build_dimension(value: &Value, path: &str, report: &mut ValidationReport) -> Option<Dimension> {
    let Value::Object(obj) = value else {
        report.push(path, "an object with size and unit", kind_of(value));
        return None;
    };
    let size = req_i64(obj, "size", path, report);
    let unit = match obj.get("unit") {
        Some(Value::String(s)) => match s.as_str() {
            "PX" => Some(Unit::Px),
            "FR" => Some(Unit::Fr),
            other => {
                report.push(format!("{path}.unit"), "one of PX, FR", format!("'{other}'"));
                None
            }
        },
        Some(other) => {
            report.push(format!("{path}.unit"), "a string", kind_of(other));
            None
        }
        None => {
            report.push(format!("{path}.unit"), "a string", "nothing");
            None
        }
    };
    match (size, unit) {
        (Some(size), Some(unit)) => Some(Dimension { size, unit }),
        _ => None,
    }
}

fn build_parent_properties(
    value: &Value,
    path: &str,
    report: &mut ValidationReport,
) -> Option<ParentProperties> {
    let Value::Object(obj) = value else {
        report.push(path, "an object with column and row", kind_of(value));
        return None;
    };
    let column = req_i64(obj, "column", path, report);
    let row = req_i64(obj, "row", path, report);
    match (column, row) {
        (Some(column), Some(row)) => Some(ParentProperties { column, row }),
        _ => None,
    }
}

fn opaque_records(
    root: &Map<String, Value>,
    key: &str,
    report: &mut ValidationReport,
) -> Vec<Value> {
    match root.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => {
            report.push(key, "an array", kind_of(other));
            Vec::new()
        }
    }
}

fn req_str(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            report.push(format!("{path}.{key}"), "a string", kind_of(other));
            None
        }
        None => {
            report.push(format!("{path}.{key}"), "a string", "nothing");
            None
        }
    }
}

fn opt_str(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            report.push(format!("{path}.{key}"), "a string", kind_of(other));
            None
        }
    }
}

fn req_bool(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<bool> {
    match obj.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            report.push(format!("{path}.{key}"), "a boolean", kind_of(other));
            None
        }
        None => {
            report.push(format!("{path}.{key}"), "a boolean", "nothing");
            None
        }
    }
}

fn req_i64(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<i64> {
    match obj.get(key) {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => Some(v),
            None => {
                report.push(format!("{path}.{key}"), "an integer", format!("{n}"));
                None
            }
        },
        Some(other) => {
            report.push(format!("{path}.{key}"), "an integer", kind_of(other));
            None
        }
        None => {
            report.push(format!("{path}.{key}"), "an integer", "nothing");
            None
        }
    }
}

fn req_string_array(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<Vec<String>> {
    let entries = match obj.get(key) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            report.push(format!("{path}.{key}"), "an array of strings", kind_of(other));
            return None;
        }
        None => {
            report.push(format!("{path}.{key}"), "an array of strings", "nothing");
            return None;
        }
    };
    let mut out = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            Value::String(s) => out.push(s.clone()),
            other => {
                report.push(format!("{path}.{key}[{i}]"), "a string", kind_of(other));
                return None;
            }
        }
    }
    Some(out)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
