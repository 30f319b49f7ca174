//! Console rendering of fetched payloads and failures.
//!
//! Everything here returns a `String`; the harvester decides where it goes.

use serde_json::Value;

use crate::outcome::{FailureKind, FetchFailure, FetchOutcome};

/// Number of items previewed per endpoint during a harvest.
pub const DEFAULT_PREVIEW_LIMIT: usize = 3;

/// Trait for human-readable output.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for FetchFailure {
    fn pretty_print(&self) -> String {
        match self.kind {
            FailureKind::Unauthorized => format!(
                "❌ Authentication failed. Please check your API key.\nResponse: {}",
                self.detail
            ),
            FailureKind::NotFound => format!("❌ Endpoint not found: {}", self.detail),
            FailureKind::Status(code) => format!("❌ Error {}: {}", code, self.detail),
            FailureKind::Transport => format!("❌ Request error: {}", self.detail),
            FailureKind::Decode => format!("❌ Invalid JSON in response: {}", self.detail),
        }
    }
}

/// Pretty JSON with two-space indentation. Non-ASCII text is kept literal.
pub fn to_pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// The item collection a payload carries, if it follows one of the two list
/// conventions: `{"data": [...], "pagination": {...}}` or a bare array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collection<'a> {
    /// Object with a `data` array and optional `pagination` block.
    Paged {
        items: &'a [Value],
        pagination: Option<&'a Value>,
    },
    /// Bare top-level array.
    Bare(&'a [Value]),
}

impl<'a> Collection<'a> {
    /// Classify a payload. Returns `None` for anything that is not a list.
    pub fn of(payload: &'a Value) -> Option<Self> {
        match payload {
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(items)) => Some(Collection::Paged {
                    items,
                    pagination: map.get("pagination").filter(|p| is_present(p)),
                }),
                _ => None,
            },
            Value::Array(items) => Some(Collection::Bare(items)),
            _ => None,
        }
    }

    pub fn items(&self) -> &'a [Value] {
        match *self {
            Collection::Paged { items, .. } | Collection::Bare(items) => items,
        }
    }
}

/// An empty or null pagination block is not worth printing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Object(m) => !m.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Number(_) | Value::Bool(true) => true,
    }
}

/// Render a payload preview showing at most `limit` items.
pub fn render_preview(payload: &Value, limit: usize) -> String {
    let Some(collection) = Collection::of(payload) else {
        return to_pretty_json(payload);
    };

    let items = collection.items();
    let shown = limit.min(items.len());
    let mut lines = Vec::new();

    match collection {
        Collection::Paged { pagination, .. } => {
            lines.push(format!("\nFound {} items in response", items.len()));
            if let Some(p) = pagination {
                lines.push(format!("Pagination: {}", to_pretty_json(p)));
            }
            lines.push(format!("Showing first {}:\n", shown));
        }
        Collection::Bare(_) => {
            lines.push(format!(
                "\nFound {} items. Showing first {}:\n",
                items.len(),
                shown
            ));
        }
    }

    for (i, item) in items.iter().take(limit).enumerate() {
        lines.push(format!("--- Item {} ---", i + 1));
        lines.push(to_pretty_json(item));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// One summary line for an endpoint.
pub fn summary_line(endpoint: &str, outcome: &FetchOutcome) -> String {
    let Some(payload) = outcome.payload() else {
        return format!("❌ {}: Failed", endpoint);
    };

    match Collection::of(payload) {
        Some(collection) => format!("✅ {}: {} items", endpoint, collection.items().len()),
        // a single object under `data` counts as one item
        None if payload.get("data").is_some() => format!("✅ {}: 1 items", endpoint),
        None => format!("✅ {}: Retrieved", endpoint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paged_preview_truncates() {
        let payload = json!({
            "data": [{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}],
            "pagination": {"total": 4}
        });
        let output = render_preview(&payload, 3);

        assert!(output.contains("Found 4 items"));
        assert!(output.contains("Pagination: {\n  \"total\": 4\n}"));
        assert!(output.contains("Showing first 3:"));
        assert!(output.contains("--- Item 1 ---"));
        assert!(output.contains("--- Item 3 ---"));
        assert!(!output.contains("--- Item 4 ---"));
        assert_eq!(output.matches("--- Item").count(), 3);
    }

    #[test]
    fn test_empty_pagination_is_skipped() {
        let payload = json!({"data": [], "pagination": {}});
        let output = render_preview(&payload, 3);
        assert!(output.contains("Found 0 items in response"));
        assert!(!output.contains("Pagination"));
        assert!(output.contains("Showing first 0:"));
    }

    #[test]
    fn test_bare_array_preview() {
        let payload = json!(["a", "b"]);
        let output = render_preview(&payload, 5);
        assert!(output.contains("Found 2 items. Showing first 2:"));
        assert_eq!(output.matches("--- Item").count(), 2);
    }

    #[test]
    fn test_non_list_data_prints_whole_payload() {
        let payload = json!({"data": {"id": 7}});
        assert_eq!(render_preview(&payload, 3), to_pretty_json(&payload));
    }

    #[test]
    fn test_scalar_prints_as_is() {
        assert_eq!(render_preview(&json!("ok"), 3), "\"ok\"");
    }

    #[test]
    fn test_non_ascii_kept_literal() {
        let output = to_pretty_json(&json!({"name": "Théâtre Neuf"}));
        assert!(output.contains("Théâtre Neuf"));
    }

    #[test]
    fn test_summary_lines() {
        let paged = FetchOutcome::Fetched(json!({"data": [1, 2]}));
        assert_eq!(summary_line("events", &paged), "✅ events: 2 items");

        let single = FetchOutcome::Fetched(json!({"data": {"id": 1}}));
        assert_eq!(summary_line("labels", &single), "✅ labels: 1 items");

        let bare = FetchOutcome::Fetched(json!([1, 2, 3]));
        assert_eq!(summary_line("contacts", &bare), "✅ contacts: 3 items");

        let other = FetchOutcome::Fetched(json!({"name": "x"}));
        assert_eq!(summary_line("resources", &other), "✅ resources: Retrieved");

        let failed = FetchOutcome::Failed(FetchFailure {
            kind: FailureKind::Transport,
            detail: "connection refused".to_string(),
        });
        assert_eq!(summary_line("locations", &failed), "❌ locations: Failed");
    }

    #[test]
    fn test_failure_diagnostics() {
        let auth = FetchFailure {
            kind: FailureKind::Unauthorized,
            detail: "invalid key".to_string(),
        };
        let output = auth.pretty_print();
        assert!(output.starts_with("❌ Authentication failed"));
        assert!(output.contains("Response: invalid key"));

        let status = FetchFailure {
            kind: FailureKind::Status(503),
            detail: "down".to_string(),
        };
        assert_eq!(status.pretty_print(), "❌ Error 503: down");
    }
}
