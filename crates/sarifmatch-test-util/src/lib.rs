//! Shared test utilities for the sarifmatch workspace.
//!
//! `xtask` needs `normalize_nondeterministic` at runtime, so it cannot live
//! behind `#[cfg(test)]` in `sarifmatch-types`.

use serde_json::Value;

/// Normalize non-deterministic receipt fields for golden-file comparison.
///
/// Root-only: when the root object looks like a receipt (`schema`, `tool`,
/// `run`, `verdict`, `findings`), `tool.version` becomes `"__VERSION__"` and
/// `run.project_dir` becomes `"__PROJECT_DIR__"`. Nested look-alikes inside a
/// finding's `data` are left alone.
///
/// Recursive: `started_at`, `ended_at` and `duration_ms` are normalized at any
/// depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_receipt = ["schema", "tool", "run", "verdict", "findings"]
            .iter()
            .all(|key| obj.contains_key(*key));
        if is_receipt {
            if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
                && tool.contains_key("version")
            {
                tool.insert(
                    "version".to_string(),
                    Value::String("__VERSION__".to_string()),
                );
            }
            if let Some(run) = obj.get_mut("run").and_then(Value::as_object_mut)
                && run.contains_key("project_dir")
            {
                run.insert(
                    "project_dir".to_string(),
                    Value::String("__PROJECT_DIR__".to_string()),
                );
            }
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "ended_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
