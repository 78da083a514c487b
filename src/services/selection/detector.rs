use super::r#trait::SelectionStrategy;
use std::path::PathBuf;
use tracing::{debug, info};

/// Перебирает стратегии по порядку и возвращает первый существующий путь
pub struct SelectionDetector {
    strategies: Vec<Box<dyn SelectionStrategy>>,
}

impl SelectionDetector {
    pub fn new(strategies: Vec<Box<dyn SelectionStrategy>>) -> Self {
        Self { strategies }
    }

    pub async fn selected_file(&self) -> Option<PathBuf> {
        for strategy in &self.strategies {
            match strategy.detect().await {
                Ok(Some(path)) if path.exists() => {
                    info!("Выделенный файл найден ({}): {}", strategy.name(), path.display());
                    return Some(path);
                }
                Ok(Some(path)) => {
                    debug!("{}: путь не существует: {}", strategy.name(), path.display());
                }
                Ok(None) => debug!("{}: ничего не найдено", strategy.name()),
                Err(e) => debug!("{}: пропущено: {}", strategy.name(), e),
            }
        }

        debug!("Ни одна стратегия не нашла выделенный файл");
        None
    }
}
