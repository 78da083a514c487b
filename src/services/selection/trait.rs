use super::clipboard::ClipboardStrategy;
use super::dbus::DbusStrategy;
use super::detector::SelectionDetector;
use super::title_resolver::TitleResolver;
use super::window_title::WindowTitleStrategy;
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::services::window_detector::ActiveWindowDetector;
use std::path::PathBuf;

/// Одна независимая эвристика поиска выделенного файла
#[async_trait::async_trait]
pub trait SelectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` означает «ничего не найдено»; ошибки детектор только логирует
    async fn detect(&self) -> Result<Option<PathBuf>>;
}

/// Фабрика детектора с фиксированным порядком стратегий:
/// буфер обмена, D-Bus, заголовок активного окна
pub fn create_selection_detector(config: &DetectionConfig) -> SelectionDetector {
    let resolver = TitleResolver::new(config.resolved_search_dirs());

    SelectionDetector::new(vec![
        Box::new(ClipboardStrategy::new(config.clipboard_timeout())),
        Box::new(DbusStrategy::new(config.dbus_timeout())),
        Box::new(WindowTitleStrategy::new(
            ActiveWindowDetector::new(config),
            resolver,
        )),
    ])
}
