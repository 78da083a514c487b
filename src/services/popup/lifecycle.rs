use std::cell::Cell;
use std::fmt;
use tracing::{debug, info};

/// Причина закрытия окна
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    CloseButton,
    Escape,
    WindowClosed,
    Timeout,
}

impl fmt::Display for Dismissal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Dismissal::CloseButton => "кнопка Close",
            Dismissal::Escape => "клавиша Escape",
            Dismissal::WindowClosed => "запрос оконного менеджера",
            Dismissal::Timeout => "таймер автозакрытия",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Shown,
    Closed,
}

/// Shown → Closed, ровно один раз. Живёт в главном потоке GTK.
#[derive(Debug)]
pub struct PopupLifecycle {
    state: Cell<PopupState>,
}

impl PopupLifecycle {
    pub fn new() -> Self {
        Self {
            state: Cell::new(PopupState::Shown),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PopupState {
        self.state.get()
    }

    /// `true` только для первого закрытия; последующие игнорируются
    pub fn dismiss(&self, reason: Dismissal) -> bool {
        let first = self.state.replace(PopupState::Closed) == PopupState::Shown;
        if first {
            info!("Окно закрыто: {}", reason);
        } else {
            debug!("Повторное закрытие проигнорировано: {}", reason);
        }
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_first_dismissal_counts() {
        let lifecycle = PopupLifecycle::new();
        assert_eq!(lifecycle.state(), PopupState::Shown);

        assert!(lifecycle.dismiss(Dismissal::Escape));
        assert_eq!(lifecycle.state(), PopupState::Closed);

        // window.close() порождает close-request, таймер может сработать позже
        assert!(!lifecycle.dismiss(Dismissal::WindowClosed));
        assert!(!lifecycle.dismiss(Dismissal::Timeout));
        assert_eq!(lifecycle.state(), PopupState::Closed);
    }

    #[test]
    fn test_dismissal_display() {
        assert_eq!(Dismissal::Timeout.to_string(), "таймер автозакрытия");
    }
}
