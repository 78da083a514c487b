use std::fmt;
use std::str::FromStr;

const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a"];
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp", ".svg"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt", ".odt", ".rtf"];

/// Категория файла, выбирающая обработчик метаданных и вариант отображения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Video,
    Audio,
    Image,
    Document,
    Unknown,
}

impl FileCategory {
    /// Классификация по расширению вида `.mp4` (регистр не важен)
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.to_lowercase();
        let ext = extension.as_str();

        if VIDEO_EXTENSIONS.contains(&ext) {
            FileCategory::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            FileCategory::Audio
        } else if IMAGE_EXTENSIONS.contains(&ext) {
            FileCategory::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext) {
            FileCategory::Document
        } else {
            FileCategory::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Video => "Video",
            FileCategory::Audio => "Audio",
            FileCategory::Image => "Image",
            FileCategory::Document => "Document",
            FileCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "video" => FileCategory::Video,
            "audio" => FileCategory::Audio,
            "image" => FileCategory::Image,
            "document" => FileCategory::Document,
            _ => FileCategory::Unknown,
        })
    }
}
