use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub detection: DetectionConfig,
    pub probe: ProbeConfig,
    pub popup: PopupConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    pub clipboard_timeout_ms: u64,
    pub dbus_timeout_ms: u64,
    pub window_timeout_ms: u64,
    /// Каталоги, в которых ищется имя файла из заголовка окна (по порядку)
    pub search_dirs: Vec<String>,
    /// Последним проверять текущий рабочий каталог
    pub include_cwd: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    pub ffprobe: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PopupConfig {
    pub width: i32,
    pub height: i32,
    pub auto_close_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "compact".to_string(),
            },
            detection: DetectionConfig {
                clipboard_timeout_ms: 2000,
                dbus_timeout_ms: 3000,
                window_timeout_ms: 2000,
                search_dirs: ["Downloads", "Documents", "Pictures", "Videos", "Music", "Desktop"]
                    .iter()
                    .map(|dir| format!("~/{dir}"))
                    .collect(),
                include_cwd: true,
            },
            probe: ProbeConfig {
                ffprobe: "ffprobe".to_string(),
                timeout_secs: 10,
            },
            popup: PopupConfig {
                width: 400,
                height: 300,
                auto_close_secs: 30,
            },
        }
    }
}

impl Config {
    /// Путь к конфигурации по умолчанию: `$XDG_CONFIG_HOME/file-stats/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("file-stats").join("config.toml"))
    }

    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        let config_path = config_path.map(Path::to_path_buf).or_else(Self::default_path);
        if let Some(path) = &config_path {
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed("FILE_STATS_").split("__"))
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        let detection = &self.detection;
        if detection.clipboard_timeout_ms == 0
            || detection.dbus_timeout_ms == 0
            || detection.window_timeout_ms == 0
        {
            anyhow::bail!("Таймауты детекции должны быть больше 0");
        }

        if self.probe.ffprobe.trim().is_empty() {
            anyhow::bail!("probe.ffprobe не может быть пустым");
        }
        if self.probe.timeout_secs == 0 {
            anyhow::bail!("probe.timeout_secs должно быть больше 0");
        }

        if self.popup.width <= 0 || self.popup.height <= 0 {
            anyhow::bail!(
                "Неверный размер окна: {}x{}",
                self.popup.width,
                self.popup.height
            );
        }
        if self.popup.auto_close_secs == 0 {
            anyhow::bail!("popup.auto_close_secs должно быть больше 0");
        }

        Ok(())
    }
}

impl DetectionConfig {
    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_millis(self.clipboard_timeout_ms)
    }

    pub fn dbus_timeout(&self) -> Duration {
        Duration::from_millis(self.dbus_timeout_ms)
    }

    pub fn window_timeout(&self) -> Duration {
        Duration::from_millis(self.window_timeout_ms)
    }

    /// Раскрывает `~` и добавляет рабочий каталог, если он включён
    pub fn resolved_search_dirs(&self) -> Vec<PathBuf> {
        let home = dirs::home_dir();
        let mut dirs: Vec<PathBuf> = self
            .search_dirs
            .iter()
            .filter_map(|dir| expand_home(dir, home.as_deref()))
            .collect();

        if self.include_cwd {
            if let Ok(cwd) = std::env::current_dir() {
                dirs.push(cwd);
            }
        }

        dirs
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn expand_home(dir: &str, home: Option<&Path>) -> Option<PathBuf> {
    if dir == "~" {
        return home.map(Path::to_path_buf);
    }
    match dir.strip_prefix("~/") {
        // Без домашнего каталога такие пути не имеют смысла
        Some(rest) => home.map(|home| home.join(rest)),
        None => Some(PathBuf::from(dir)),
    }
}
