use super::r#trait::SelectionStrategy;
use super::title_resolver::TitleResolver;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::services::window_detector::ActiveWindowDetector;
use std::path::PathBuf;

/// Путь по заголовку активного окна файлового менеджера
pub struct WindowTitleStrategy {
    windows: ActiveWindowDetector,
    resolver: TitleResolver,
}

impl WindowTitleStrategy {
    pub fn new(windows: ActiveWindowDetector, resolver: TitleResolver) -> Self {
        Self { windows, resolver }
    }
}

#[async_trait::async_trait]
impl SelectionStrategy for WindowTitleStrategy {
    fn name(&self) -> &'static str {
        "window-title"
    }

    async fn detect(&self) -> Result<Option<PathBuf>> {
        let window = self.windows.active_window().await?;
        debug_if_enabled!("Разбираем заголовок окна {}", window);
        Ok(self.resolver.resolve(&window.title))
    }
}
