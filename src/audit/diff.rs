//! Field diffs for audit entries

use serde_json::Value;

const MAX_TEXT_LEN: usize = 40;

/// Summarize the top-level fields that differ between two JSON values
///
/// Returns `None` when nothing changed. Changed and removed fields come
/// first in key order, then fields only present in `after`.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(old), Value::Object(new)) = (before, after) else {
        return (before != after).then(|| format!("{} -> {}", render(before), render(after)));
    };

    let changed = old.iter().filter_map(|(key, old_val)| match new.get(key) {
        Some(new_val) if new_val == old_val => None,
        Some(new_val) => Some(format!("{}: {} -> {}", key, render(old_val), render(new_val))),
        None => Some(format!("{}: {} -> (none)", key, render(old_val))),
    });
    let added = new
        .iter()
        .filter(|(key, _)| !old.contains_key(*key))
        .map(|(key, new_val)| format!("{}: (none) -> {}", key, render(new_val)));

    let changes: Vec<String> = changed.chain(added).collect();
    (!changes.is_empty()).then(|| changes.join(", "))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_TEXT_LEN => {
            let head: String = s.chars().take(MAX_TEXT_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
