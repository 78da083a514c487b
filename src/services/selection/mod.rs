//! Поиск файла, выделенного в графическом файловом менеджере.
//!
//! Каждая эвристика это отдельная [`SelectionStrategy`]; [`SelectionDetector`]
//! берёт первый результат, существующий на диске. Сбои только логируются.

mod clipboard;
mod dbus;
mod detector;
mod title_resolver;
mod window_title;
mod r#trait;

pub use self::detector::SelectionDetector;
pub use self::r#trait::{create_selection_detector, SelectionStrategy};
