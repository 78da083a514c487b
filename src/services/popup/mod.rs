//! Всплывающее окно GTK с фиксированной раскладкой, закрывающееся само.

mod content;
mod lifecycle;
mod window;

use crate::config::PopupConfig;
use crate::model::MetadataRecord;
use gtk4::glib;
use tracing::info;

pub use content::PopupContent;

pub struct PopupPresenter {
    settings: PopupConfig,
}

impl PopupPresenter {
    pub fn new(settings: PopupConfig) -> Self {
        Self { settings }
    }

    /// Показывает запись и блокирует поток до закрытия окна
    pub fn present(&self, record: &MetadataRecord) -> glib::ExitCode {
        let content = PopupContent::from_record(record);
        info!(
            "Показываем окно для '{}' (автозакрытие через {} с)",
            content.heading, self.settings.auto_close_secs
        );
        window::run(content, self.settings.clone())
    }
}
