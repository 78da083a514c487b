use super::hyprctl::HyprctlDetector;
use super::kdotool::KdotoolDetector;
use super::r#trait::ActiveWindowSource;
use super::sway::SwayDetector;
use super::xdotool::XdotoolDetector;
use crate::config::DetectionConfig;
use crate::error::{FileStatsError, Result};
use crate::model::WindowInfo;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEnvironment {
    Hyprland,
    Sway,
    Kde,
    X11Generic,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkingMethod {
    Hyprctl,
    Swaymsg,
    Kdotool,
    Xdotool,
}

impl DesktopEnvironment {
    pub fn detect() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        if var("HYPRLAND_INSTANCE_SIGNATURE").is_some() {
            return DesktopEnvironment::Hyprland;
        }
        if var("SWAYSOCK").is_some() {
            return DesktopEnvironment::Sway;
        }

        if let Some(desktop) = var("XDG_CURRENT_DESKTOP") {
            match desktop.to_lowercase() {
                d if d.contains("hyprland") => return DesktopEnvironment::Hyprland,
                d if d.contains("sway") => return DesktopEnvironment::Sway,
                d if d.contains("kde") => return DesktopEnvironment::Kde,
                _ => {}
            }
        }

        match var("XDG_SESSION_TYPE").as_deref() {
            Some("x11") => DesktopEnvironment::X11Generic,
            _ => DesktopEnvironment::Unknown,
        }
    }

    /// Порядок опроса утилит: подходящая среде первой, остальные следом
    fn method_order(self) -> Vec<WorkingMethod> {
        let preferred = match self {
            DesktopEnvironment::Hyprland => Some(WorkingMethod::Hyprctl),
            DesktopEnvironment::Sway => Some(WorkingMethod::Swaymsg),
            DesktopEnvironment::Kde => Some(WorkingMethod::Kdotool),
            DesktopEnvironment::X11Generic => Some(WorkingMethod::Xdotool),
            DesktopEnvironment::Unknown => None,
        };

        let mut order: Vec<WorkingMethod> = preferred.into_iter().collect();
        for method in [
            WorkingMethod::Hyprctl,
            WorkingMethod::Swaymsg,
            WorkingMethod::Kdotool,
            WorkingMethod::Xdotool,
        ] {
            if !order.contains(&method) {
                order.push(method);
            }
        }
        order
    }
}

/// Опрашивает утилиты оконных менеджеров по очереди до первого ответа.
///
/// Весь перебор укладывается в `deadline`, сколько бы утилит ни было.
pub struct ActiveWindowDetector {
    sources: Vec<Box<dyn ActiveWindowSource>>,
    deadline: Duration,
}

impl ActiveWindowDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        let desktop_env = DesktopEnvironment::detect();
        info!("Обнаружена среда рабочего стола: {:?}", desktop_env);

        let timeout = config.window_timeout();
        let sources = desktop_env
            .method_order()
            .into_iter()
            .map(|method| -> Box<dyn ActiveWindowSource> {
                match method {
                    WorkingMethod::Hyprctl => Box::new(HyprctlDetector::new(timeout)),
                    WorkingMethod::Swaymsg => Box::new(SwayDetector::new(timeout)),
                    WorkingMethod::Kdotool => Box::new(KdotoolDetector::new(timeout)),
                    WorkingMethod::Xdotool => Box::new(XdotoolDetector::new(timeout)),
                }
            })
            .collect();

        Self::with_sources(sources, timeout)
    }

    pub fn with_sources(sources: Vec<Box<dyn ActiveWindowSource>>, deadline: Duration) -> Self {
        Self { sources, deadline }
    }

    pub async fn active_window(&self) -> Result<WindowInfo> {
        tokio::time::timeout(self.deadline, self.first_answer())
            .await
            .map_err(|_| FileStatsError::Timeout {
                tool: "детекция активного окна".to_string(),
                millis: self.deadline.as_millis(),
            })?
    }

    async fn first_answer(&self) -> Result<WindowInfo> {
        for source in &self.sources {
            match source.active_window().await {
                Ok(window) => {
                    debug!("Активное окно: {}", window);
                    return Ok(window);
                }
                Err(e) => debug!("{} не сработал: {}", source.name(), e),
            }
        }

        Err(FileStatsError::ServiceUnavailable(
            "Ни один метод детекции окон не работает".to_string(),
        ))
    }
}
