use crate::error::Result;
use crate::model::WindowInfo;

/// Источник информации об активном окне (одна утилита оконного менеджера)
#[async_trait::async_trait]
pub trait ActiveWindowSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Запросить активное окно
    async fn active_window(&self) -> Result<WindowInfo>;
}
