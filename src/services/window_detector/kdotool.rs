use super::r#trait::ActiveWindowSource;
use crate::error::{FileStatsError, Result};
use crate::model::WindowInfo;
use crate::utils::run_tool;
use std::time::Duration;
use tracing::debug;

pub struct KdotoolDetector {
    timeout: Duration,
}

impl KdotoolDetector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait::async_trait]
impl ActiveWindowSource for KdotoolDetector {
    fn name(&self) -> &'static str {
        "kdotool"
    }

    async fn active_window(&self) -> Result<WindowInfo> {
        // Получаем ID окна
        let window_id = run_tool("kdotool", &["getactivewindow"], self.timeout)
            .await?
            .trim()
            .to_string();
        debug!("kdotool получил window_id: '{}'", window_id);

        // Получаем название окна по ID
        let title = run_tool("kdotool", &["getwindowname", &window_id], self.timeout)
            .await?
            .trim()
            .to_string();

        if title.is_empty() {
            return Err(FileStatsError::Internal("kdotool вернул пустое название".to_string()));
        }

        Ok(WindowInfo::new(title, self.name()).with_class("KDE".to_string()))
    }
}
