use std::fmt;

/// Информация об активном окне
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowInfo {
    pub title: String,
    pub class: String,
    /// Утилита, через которую получено окно
    pub source: &'static str,
}

impl WindowInfo {
    pub fn new(title: String, source: &'static str) -> Self {
        Self {
            title,
            class: String::new(),
            source,
        }
    }

    pub fn with_class(mut self, class: String) -> Self {
        self.class = class;
        self
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "\"{}\" [{}]", self.title, self.source)
        } else {
            write!(f, "\"{}\" ({}) [{}]", self.title, self.class, self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_info_creation() {
        let window = WindowInfo::new("report.pdf - Thunar".to_string(), "xdotool")
            .with_class("Thunar".to_string());

        assert_eq!(window.title, "report.pdf - Thunar");
        assert_eq!(window.class, "Thunar");
        assert_eq!(window.to_string(), "\"report.pdf - Thunar\" (Thunar) [xdotool]");
    }
}
