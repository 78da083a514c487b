use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

/// Шаблоны заголовков файловых менеджеров, по порядку.
/// Последний берёт заголовок целиком.
static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(.+) - Thunar",
        r"^(.+) - Files",
        r"^(.+) - Dolphin",
        r"^(.+) - PCManFM",
        r"^(.+) \[.*\]$",
        r"^(.+)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("шаблон заголовка должен компилироваться"))
    .collect()
});

/// Восстанавливает путь к файлу по заголовку окна файлового менеджера.
///
/// Голое имя ищется в каталогах по порядку; проверки уникальности нет, так что
/// одноимённый файл в более раннем каталоге выигрывает.
#[derive(Debug, Clone)]
pub struct TitleResolver {
    search_dirs: Vec<PathBuf>,
}

impl TitleResolver {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn resolve(&self, title: &str) -> Option<PathBuf> {
        for pattern in TITLE_PATTERNS.iter() {
            let Some(captures) = pattern.captures(title) else {
                continue;
            };
            let candidate = captures[1].trim();
            if candidate.is_empty() {
                continue;
            }

            // Абсолютный путь возвращаем как есть, существование проверит детектор
            if candidate.starts_with('/') {
                return Some(PathBuf::from(candidate));
            }

            if !candidate.contains('/') {
                if let Some(path) = self.find_in_search_dirs(candidate) {
                    return Some(path);
                }
            }
        }

        debug!("Заголовок '{}' не сопоставлен ни с одним файлом", title);
        None
    }

    fn find_in_search_dirs(&self, filename: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(filename))
            .find(|path| path.exists())
    }
}
