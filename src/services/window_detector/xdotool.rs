use super::r#trait::ActiveWindowSource;
use crate::error::{FileStatsError, Result};
use crate::model::WindowInfo;
use crate::utils::run_tool;
use std::time::Duration;
use tracing::debug;

pub struct XdotoolDetector {
    timeout: Duration,
}

impl XdotoolDetector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait::async_trait]
impl ActiveWindowSource for XdotoolDetector {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    async fn active_window(&self) -> Result<WindowInfo> {
        debug!("Попытка получить активное окно через xdotool");
        let stdout = run_tool("xdotool", &["getactivewindow", "getwindowname"], self.timeout).await?;

        let title = stdout.trim().to_string();
        if title.is_empty() {
            return Err(FileStatsError::Internal("xdotool вернул пустое название".to_string()));
        }
        debug!("xdotool получил заголовок окна: '{}'", title);

        let class = run_tool("xdotool", &["getactivewindow", "getwindowclassname"], self.timeout)
            .await
            .map(|out| out.trim().to_string())
            .unwrap_or_else(|_| {
                debug!("Не удалось получить класс окна");
                String::new()
            });

        Ok(WindowInfo::new(title, self.name()).with_class(class))
    }
}
