use super::r#trait::ActiveWindowSource;
use crate::error::{FileStatsError, Result};
use crate::model::WindowInfo;
use crate::utils::run_tool;
use std::time::Duration;

pub struct HyprctlDetector {
    timeout: Duration,
}

impl HyprctlDetector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Разбирает вывод `hyprctl activewindow` (строки вида `key: value`)
fn parse_active_window(output: &str) -> Option<WindowInfo> {
    let mut title = None;
    let mut class = String::new();

    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "title" if title.is_none() => title = Some(value.trim().to_string()),
            "class" => class = value.trim().to_string(),
            _ => {}
        }
    }

    title
        .filter(|t| !t.is_empty())
        .map(|t| WindowInfo::new(t, "hyprctl").with_class(class))
}

#[async_trait::async_trait]
impl ActiveWindowSource for HyprctlDetector {
    fn name(&self) -> &'static str {
        "hyprctl"
    }

    async fn active_window(&self) -> Result<WindowInfo> {
        let stdout = run_tool("hyprctl", &["activewindow"], self.timeout).await?;

        parse_active_window(&stdout)
            .ok_or_else(|| FileStatsError::Internal("hyprctl не вернул заголовок окна".to_string()))
    }
}
