//! Diagram kinds: the enumerated strategy table behind the "insert
//! diagram" picker. Every kind renders through a mermaid fence; the JSON
//! flowchart kind converts its input first.

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    JsonFlowchart,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 4] = [
        DiagramKind::Flowchart,
        DiagramKind::Sequence,
        DiagramKind::Class,
        DiagramKind::JsonFlowchart,
    ];

    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "flowchart" => Some(Self::Flowchart),
            "sequence" => Some(Self::Sequence),
            "class" => Some(Self::Class),
            "json-flowchart" => Some(Self::JsonFlowchart),
            _ => None,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Sequence => "sequence",
            Self::Class => "class",
            Self::JsonFlowchart => "json-flowchart",
        }
    }

    /// Fence language the rendered form uses.
    pub fn fence(self) -> &'static str {
        "mermaid"
    }

    /// Starter snippet placed in the editor when the kind is picked.
    pub fn template(self) -> &'static str {
        match self {
            Self::Flowchart => {
                "graph TD\nA[Start] --> B{Decision?}\nB -->|Yes| C[Process A]\n\
                 B -->|No| D[Process B]\nC --> E[End]\nD --> E"
            }
            Self::Sequence => {
                "sequenceDiagram\nparticipant A as User\nparticipant B as System\n\
                 A->>B: Request\nB-->>A: Response"
            }
            Self::Class => {
                "classDiagram\nclass User {\n+String name\n+String email\n+login()\n+logout()\n}"
            }
            Self::JsonFlowchart => {
                "{\n\"id\": \"001\",\n\"position\": {\n\"x\": 20,\n\"y\": 1\n},\n\
                 \"items\": [\n\"Phone\",\n\"Apple\"\n]\n}"
            }
        }
    }
}

/// Convert a JSON document into a mermaid `graph TD`.
///
/// `serde_json::Value` is a tree, so unlike the browser original no
/// visited-set is needed.
pub fn json_to_mermaid(json: &Value) -> String {
    let mut out = String::from("graph TD\n");
    emit_object(json, "root", &mut out);
    out
}

fn node_label(obj_id: &str) -> &str {
    if obj_id == "root" {
        "Object"
    } else {
        obj_id
    }
}

fn emit_object(value: &Value, obj_id: &str, out: &mut String) {
    let Value::Object(map) = value else {
        return;
    };

    for (index, (key, child)) in map.iter().enumerate() {
        let node_id = format!("{obj_id}_{key}_{index}");
        match child {
            Value::Array(items) => {
                out.push_str(&format!(
                    "    {obj_id}[\"{}\"] --> {node_id}[\"{key}: Array\"]\n",
                    node_label(obj_id)
                ));
                for (i, item) in items.iter().enumerate() {
                    let item_id = format!("{node_id}_{i}");
                    if item.is_object() || item.is_array() {
                        let preview: String = item.to_string().chars().take(20).collect();
                        out.push_str(&format!(
                            "    {node_id} --> {item_id}[\"{preview}...\"]\n"
                        ));
                    } else {
                        out.push_str(&format!(
                            "    {node_id} --> {item_id}[\"{}\"]\n",
                            scalar_label(item)
                        ));
                    }
                }
            }
            Value::Object(_) => {
                out.push_str(&format!(
                    "    {obj_id}[\"{}\"] --> {node_id}[\"{key}\"]\n",
                    node_label(obj_id)
                ));
                emit_object(child, &node_id, out);
            }
            scalar => {
                out.push_str(&format!(
                    "    {obj_id}[\"{}\"] --> {node_id}[\"{key}: {}\"]\n",
                    node_label(obj_id),
                    scalar_label(scalar)
                ));
            }
        }
    }
}

fn scalar_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/diagram.rs"]
mod tests;
