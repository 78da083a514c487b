use super::r#trait::ActiveWindowSource;
use crate::error::{FileStatsError, Result};
use crate::model::WindowInfo;
use crate::utils::run_tool;
use serde_json::Value;
use std::time::Duration;

pub struct SwayDetector {
    timeout: Duration,
}

impl SwayDetector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Ищет в дереве sway узел с `"focused": true`
fn find_focused(node: &Value) -> Option<&Value> {
    if node.get("focused").and_then(Value::as_bool) == Some(true) {
        return Some(node);
    }

    ["nodes", "floating_nodes"]
        .iter()
        .filter_map(|key| node.get(*key).and_then(Value::as_array))
        .flatten()
        .find_map(find_focused)
}

fn parse_tree(tree: &str) -> Result<Option<WindowInfo>> {
    let root: Value = serde_json::from_str(tree)?;

    Ok(find_focused(&root).and_then(|node| {
        let title = node.get("name").and_then(Value::as_str)?.to_string();
        let class = node
            .get("app_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(WindowInfo::new(title, "swaymsg").with_class(class))
    }))
}

#[async_trait::async_trait]
impl ActiveWindowSource for SwayDetector {
    fn name(&self) -> &'static str {
        "swaymsg"
    }

    async fn active_window(&self) -> Result<WindowInfo> {
        let stdout = run_tool("swaymsg", &["-t", "get_tree"], self.timeout).await?;

        parse_tree(&stdout)?
            .ok_or_else(|| FileStatsError::Internal("Активное окно в Sway не найдено".to_string()))
    }
}
