use super::command::run_tool;
use super::r#trait::WindowBackend;
use crate::error::{Result, TimerError};
use crate::events::WindowInfo;
use serde_json::Value;

pub struct SwayBackend;

impl SwayBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Собрать окна из дерева `swaymsg -t get_tree`: листья с pid
fn collect_windows(node: &Value, out: &mut Vec<WindowInfo>) {
    if node.get("pid").and_then(Value::as_u64).is_some() {
        if let Some(id) = node.get("id").and_then(Value::as_u64) {
            let title = node.get("name").and_then(Value::as_str).unwrap_or_default();
            let class = node
                .get("app_id")
                .and_then(Value::as_str)
                .or_else(|| {
                    node.pointer("/window_properties/class")
                        .and_then(Value::as_str)
                })
                .unwrap_or_default();
            out.push(WindowInfo::new(id.to_string(), title).with_class(class));
        }
    }

    for key in ["nodes", "floating_nodes"] {
        if let Some(children) = node.get(key).and_then(Value::as_array) {
            for child in children {
                collect_windows(child, out);
            }
        }
    }
}

fn parse_tree(json: &str) -> Result<Vec<WindowInfo>> {
    let tree: Value = serde_json::from_str(json)?;
    let mut windows = Vec::new();
    collect_windows(&tree, &mut windows);
    Ok(windows)
}

impl WindowBackend for SwayBackend {
    fn name(&self) -> &'static str {
        "swaymsg"
    }

    fn probe(&self) -> Result<()> {
        if std::env::var_os("SWAYSOCK").is_none() {
            return Err(TimerError::WindowTool("SWAYSOCK не задан".to_string()));
        }
        run_tool("swaymsg", &["-t", "get_version"]).map(|_| ())
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        parse_tree(&run_tool("swaymsg", &["-t", "get_tree"])?)
    }

    fn focus(&self, window: &WindowInfo) -> Result<()> {
        let criteria = format!("[con_id={}]", window.id);
        run_tool("swaymsg", &[&criteria, "focus"]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sway_tree() {
        let json = r#"{
            "id": 1, "name": "root", "nodes": [
                {"id": 3, "name": "1", "type": "workspace", "nodes": [
                    {"id": 7, "name": "nvim - notes", "pid": 1234, "app_id": "foot", "nodes": []}
                ], "floating_nodes": [
                    {"id": 9, "name": "Firefox", "pid": 4321, "app_id": null,
                     "window_properties": {"class": "firefox"}, "nodes": []}
                ]}
            ]
        }"#;

        let windows = parse_tree(json).unwrap();
        assert_eq!(
            windows,
            vec![
                WindowInfo::new("7", "nvim - notes").with_class("foot"),
                WindowInfo::new("9", "Firefox").with_class("firefox"),
            ]
        );
    }

    #[test]
    fn test_invalid_tree_is_an_error() {
        assert!(parse_tree("not json").is_err());
    }
}
