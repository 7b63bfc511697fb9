//! Schema field declarations contributed by an adapter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field value type understood by the host schema system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain text.
    Text,
}

/// When the admin UI should show a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayCondition {
    /// Always visible.
    Always,
    /// Visible only when the field holds a value.
    WhenPresent,
}

/// Admin presentation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAdmin {
    pub read_only: bool,
    pub condition: DisplayCondition,
}

/// An extra attribute the host attaches to every managed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub admin: FieldAdmin,
}

impl FieldDescriptor {
    /// Editable, always-visible text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Text,
            admin: FieldAdmin {
                read_only: false,
                condition: DisplayCondition::Always,
            },
        }
    }

    /// Mark the field read-only in the admin UI.
    pub fn read_only(mut self) -> Self {
        self.admin.read_only = true;
        self
    }

    /// Set the display condition.
    pub fn with_condition(mut self, condition: DisplayCondition) -> Self {
        self.admin.condition = condition;
        self
    }

    /// Evaluate the display condition against document data.
    pub fn is_visible(&self, data: &Value) -> bool {
        match self.admin.condition {
            DisplayCondition::Always => true,
            DisplayCondition::WhenPresent => data.get(&self.name).is_some_and(is_truthy),
        }
    }
}

/// Loose truthiness of a JSON value, as the host evaluates conditions.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remote_id_field() -> FieldDescriptor {
        FieldDescriptor::text("cloudflareId", "Cloudflare Image ID")
            .read_only()
            .with_condition(DisplayCondition::WhenPresent)
    }

    #[test]
    fn test_when_present_condition() {
        let field = remote_id_field();
        assert!(field.is_visible(&json!({ "cloudflareId": "abc" })));
        assert!(!field.is_visible(&json!({ "cloudflareId": "" })));
        assert!(!field.is_visible(&json!({ "cloudflareId": null })));
        assert!(!field.is_visible(&json!({ "id": 1 })));
        assert!(!field.is_visible(&Value::Null));
    }

    #[test]
    fn test_always_condition() {
        let field = FieldDescriptor::text("alt", "Alt text");
        assert!(field.is_visible(&json!({})));
        assert!(!field.admin.read_only);
    }

    #[test]
    fn test_descriptor_json_shape() {
        let value = serde_json::to_value(remote_id_field()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "cloudflareId",
                "label": "Cloudflare Image ID",
                "type": "text",
                "admin": {
                    "readOnly": true,
                    "condition": { "kind": "when_present" }
                }
            })
        );
    }
}
