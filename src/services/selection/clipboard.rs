use super::r#trait::SelectionStrategy;
use crate::error::Result;
use crate::utils::run_tool;
use gtk4::glib;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const FILE_URI_PREFIX: &str = "file://";

/// Утилиты чтения буфера обмена: Wayland, затем X11
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-paste", &[]),
    ("xclip", &["-selection", "clipboard", "-o"]),
];

/// Утилита и её аргументы
type ClipboardTool = (String, Vec<String>);

pub struct ClipboardStrategy {
    tools: Vec<ClipboardTool>,
    timeout: Duration,
}

impl ClipboardStrategy {
    pub fn new(timeout: Duration) -> Self {
        let tools = CLIPBOARD_TOOLS
            .iter()
            .map(|(tool, args)| (tool.to_string(), args.iter().map(|a| a.to_string()).collect()))
            .collect();
        Self::with_tools(tools, timeout)
    }

    /// Утилиты опрашиваются в заданном порядке
    pub fn with_tools(tools: Vec<ClipboardTool>, timeout: Duration) -> Self {
        Self { tools, timeout }
    }
}

/// Ищет в содержимом буфера первую строку с `file://` URI или существующим путём.
///
/// Файловые менеджеры кладут при копировании несколько строк
/// (`x-special/gnome-copied-files`: `copy` и затем URI).
pub fn parse_clipboard(content: &str) -> Option<PathBuf> {
    content
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find_map(|line| {
            if line.starts_with(FILE_URI_PREFIX) {
                Some(uri_to_path(line))
            } else if Path::new(line).exists() {
                Some(PathBuf::from(line))
            } else {
                None
            }
        })
}

fn uri_to_path(uri: &str) -> PathBuf {
    match glib::filename_from_uri(uri) {
        Ok((path, _host)) => path,
        // Некорректные экранирования: просто отрезаем префикс
        Err(_) => PathBuf::from(&uri[FILE_URI_PREFIX.len()..]),
    }
}

#[async_trait::async_trait]
impl SelectionStrategy for ClipboardStrategy {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    async fn detect(&self) -> Result<Option<PathBuf>> {
        for (tool, args) in &self.tools {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let content = match run_tool(tool, &args, self.timeout).await {
                Ok(content) => content,
                Err(e) => {
                    debug!("Буфер обмена через {} недоступен: {}", tool, e);
                    continue;
                }
            };

            match parse_clipboard(&content) {
                Some(path) if path.exists() => return Ok(Some(path)),
                Some(path) => debug!("{}: файл из буфера не существует: {}", tool, path.display()),
                None => debug!("{}: в буфере нет пути к файлу", tool),
            }
        }

        Ok(None)
    }
}
