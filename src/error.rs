use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileStatsError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка D-Bus: {0}")]
    DBus(#[from] zbus::Error),

    #[error("Ошибка разбора JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ошибка чтения изображения: {0}")]
    Image(#[from] image::ImageError),

    #[error("Ошибка чтения EXIF: {0}")]
    Exif(#[from] exif::Error),

    #[error("Ошибка чтения аудио: {0}")]
    Audio(#[from] lofty::error::LoftyError),

    #[error("Ошибка чтения PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("{tool}: превышено время ожидания ({millis} мс)")]
    Timeout { tool: String, millis: u128 },

    #[error("{0}")]
    CommandFailed(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl FileStatsError {
    pub fn command_failed<T>(msg: impl Into<String>) -> Result<T> {
        Err(FileStatsError::CommandFailed(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, FileStatsError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! fs_error {
    (command_failed, $($arg:tt)*) => {
        $crate::error::FileStatsError::CommandFailed(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::FileStatsError::Internal(format!($($arg)*))
    };
}
