pub mod command;

pub use command::{run_tool, run_with_timeout};

// ✅ Макросы условного логирования
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}
