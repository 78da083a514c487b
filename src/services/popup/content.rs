use crate::model::{keys, FileCategory, MetadataRecord};

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// Строка «метка: значение» во всплывающем окне
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: String,
    pub value: String,
    pub monospace: bool,
}

impl InfoRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            monospace: false,
        }
    }

    fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }
}

/// Всё, что показывает окно, без привязки к GTK
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupContent {
    pub heading: String,
    pub error: Option<String>,
    pub rows: Vec<InfoRow>,
    pub exif: Vec<InfoRow>,
    pub path: Option<InfoRow>,
}

/// Поля по типу файла: (ключ записи, метка). Отсутствующие поля пропускаются.
fn type_specific_fields(category: FileCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        FileCategory::Video => &[
            ("resolution", "Resolution"),
            ("codec", "Codec"),
            ("fps", "FPS"),
            ("duration", "Duration"),
            ("bitrate", "Bitrate"),
            ("audio_codec", "Audio Codec"),
        ],
        FileCategory::Audio => &[
            ("duration", "Duration"),
            ("bitrate", "Bitrate"),
            ("sample_rate", "Sample Rate"),
            ("title", "Title"),
            ("artist", "Artist"),
            ("album", "Album"),
        ],
        FileCategory::Image => &[
            ("resolution", "Resolution"),
            ("format", "Format"),
            ("mode", "Mode"),
        ],
        FileCategory::Document => &[
            ("format", "Format"),
            ("pages", "Pages"),
            ("title", "Title"),
            ("author", "Author"),
            ("created", "Created"),
        ],
        FileCategory::Unknown => &[],
    }
}

impl PopupContent {
    pub fn from_record(record: &MetadataRecord) -> Self {
        let heading = record
            .get(keys::FILENAME)
            .unwrap_or("Unknown File")
            .to_string();
        let error = record.error().map(str::to_string);

        // Файла нет: показывать кроме ошибки нечего
        if error.is_some() && !record.contains(keys::FILENAME) {
            return Self {
                heading,
                error,
                ..Self::default()
            };
        }

        let field = |key: &str| record.get(key).unwrap_or(UNKNOWN).to_string();
        let mut rows = vec![
            InfoRow::new("Type", field(keys::TYPE)),
            InfoRow::new("Size", field(keys::SIZE)),
            InfoRow::new("Extension", field(keys::EXTENSION)),
        ];

        let category = record.category().unwrap_or(FileCategory::Unknown);
        rows.extend(
            type_specific_fields(category)
                .iter()
                .filter_map(|(key, label)| record.get(key).map(|value| InfoRow::new(*label, value)))
                .filter(|row| row.value != UNKNOWN && row.value != NOT_AVAILABLE),
        );

        let exif = match (category, record.exif()) {
            (FileCategory::Image, Some(exif)) => exif
                .iter()
                .map(|(tag, value)| InfoRow::new(tag.as_str(), value.as_str()))
                .collect(),
            _ => Vec::new(),
        };

        let path = record
            .get(keys::PATH)
            .map(|path| InfoRow::new("Path", path).monospace());

        Self {
            heading,
            error,
            rows,
            exif,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Все строки в порядке отображения (EXIF перед путём)
    fn all_rows(content: &PopupContent) -> impl Iterator<Item = &InfoRow> {
        content.rows.iter().chain(content.exif.iter()).chain(content.path.iter())
    }

    fn labels(content: &PopupContent) -> Vec<&str> {
        all_rows(content).map(|row| row.label.as_str()).collect()
    }

    fn base(filename: &str, category: &str) -> MetadataRecord {
        MetadataRecord::new()
            .with(keys::FILENAME, filename)
            .with(keys::EXTENSION, ".x")
            .with(keys::SIZE, "1.0 MB")
            .with(keys::PATH, format!("/home/user/{filename}"))
            .with(keys::TYPE, category)
    }

    #[test]
    fn test_video_rows_skip_unavailable_values() {
        let record = base("clip.mp4", "Video")
            .with("resolution", "1920x1080")
            .with("codec", "h264")
            .with("fps", "29.97 fps")
            .with("duration", "N/A")
            .with("bitrate", "N/A")
            .with("audio_codec", "aac");

        let content = PopupContent::from_record(&record);
        assert_eq!(content.heading, "clip.mp4");
        assert_eq!(
            labels(&content),
            vec!["Type", "Size", "Extension", "Resolution", "Codec", "FPS", "Audio Codec", "Path"]
        );
        assert!(content.path.as_ref().unwrap().monospace);
        assert!(content.rows.iter().all(|row| !row.monospace));
    }

    #[test]
    fn test_image_exif_section() {
        let mut record = base("photo.jpg", "image").with("resolution", "4x4").with("mode", "RGB");
        let mut exif = BTreeMap::new();
        exif.insert("Make".to_string(), "Canon".to_string());
        record.insert_map(keys::EXIF, exif);

        let content = PopupContent::from_record(&record);
        assert_eq!(
            labels(&content),
            vec!["Type", "Size", "Extension", "Resolution", "Mode", "Make", "Path"]
        );
        assert_eq!(content.exif[0].value, "Canon");
    }

    #[test]
    fn test_missing_basic_fields_default_to_unknown() {
        let record = MetadataRecord::new().with(keys::FILENAME, "mystery");
        let content = PopupContent::from_record(&record);

        let values: Vec<&str> = content.rows.iter().map(|row| row.value.as_str()).collect();
        assert_eq!(values, vec!["Unknown", "Unknown", "Unknown"]);
        assert!(content.path.is_none());
    }

    #[test]
    fn test_missing_file_shows_only_error() {
        let record = MetadataRecord::error_only("File not found");
        let content = PopupContent::from_record(&record);

        assert_eq!(content.heading, "Unknown File");
        assert_eq!(content.error.as_deref(), Some("File not found"));
        assert_eq!(all_rows(&content).count(), 0);
    }

    #[test]
    fn test_handler_error_keeps_base_rows() {
        let record = base("clip.mp4", "Video").with(keys::ERROR, "Could not analyze video");
        let content = PopupContent::from_record(&record);

        assert_eq!(content.error.as_deref(), Some("Could not analyze video"));
        assert_eq!(labels(&content), vec!["Type", "Size", "Extension", "Path"]);
    }

    #[test]
    fn test_document_rows() {
        let record = base("report.pdf", "Document")
            .with("format", "PDF")
            .with("pages", "12")
            .with("author", "Ops");
        let content = PopupContent::from_record(&record);

        assert_eq!(
            labels(&content),
            vec!["Type", "Size", "Extension", "Format", "Pages", "Author", "Path"]
        );
    }
}
