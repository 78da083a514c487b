//! Извлечение метаданных: базовые поля файла и частичная запись по категории.
//!
//! Извлечение не падает. Ошибка обработчика попадает в поле `error` рядом
//! с уже вычисленными базовыми полями.

mod audio;
mod document;
mod format;
mod image_info;
mod probe;
mod video;

use crate::config::ProbeConfig;
use crate::model::{keys, FileCategory, MetadataRecord};
use std::path::Path;
use tracing::{debug, warn};

use format::format_size;

pub struct MetadataExtractor {
    probe: ProbeConfig,
}

impl MetadataExtractor {
    pub fn new(probe: ProbeConfig) -> Self {
        Self { probe }
    }

    pub async fn extract(&self, path: &Path) -> MetadataRecord {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("Не удалось получить метаданные {}: {}", path.display(), e);
                return MetadataRecord::error_only("File not found");
            }
        };

        let extension = extension_of(path);
        let category = FileCategory::from_extension(&extension);
        debug!("{}: категория {}", path.display(), category);

        let base = MetadataRecord::new()
            .with(
                keys::FILENAME,
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
            .with(keys::EXTENSION, extension.clone())
            .with(keys::SIZE, format_size(metadata.len()))
            .with(keys::PATH, path.display().to_string());

        let partial = match category {
            FileCategory::Video => video::inspect(path, &self.probe).await,
            FileCategory::Audio => audio::inspect(path, &self.probe).await,
            FileCategory::Image => image_info::inspect(path),
            FileCategory::Document => document::inspect(path, &extension),
            FileCategory::Unknown => Ok(MetadataRecord::of_category(FileCategory::Unknown)
                .with(keys::INFO, "Unsupported file type")),
        };

        let partial = partial.unwrap_or_else(|e| {
            warn!("Ошибка разбора метаданных {}: {}", path.display(), e);
            MetadataRecord::failure(category, e)
        });

        base.merge(partial)
    }
}

/// Расширение в нижнем регистре с точкой, пустая строка если его нет
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn extractor() -> MetadataExtractor {
        MetadataExtractor::new(Config::default().probe)
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("/a/Photo.JPG")), ".jpg");
        assert_eq!(extension_of(Path::new("/a/archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("/a/Makefile")), "");
    }

    #[tokio::test]
    async fn test_missing_file_is_error_only() {
        let record = extractor()
            .extract(Path::new("/definitely/not/here.mp4"))
            .await;
        assert_eq!(record.len(), 1);
        assert_eq!(record.error(), Some("File not found"));
    }

    #[tokio::test]
    async fn test_unknown_extension_minimal_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.rs");
        std::fs::write(&path, vec![b'x'; 1536]).unwrap();

        let record = extractor().extract(&path).await;
        assert_eq!(record.get(keys::FILENAME), Some("main.rs"));
        assert_eq!(record.get(keys::EXTENSION), Some(".rs"));
        assert_eq!(record.get(keys::SIZE), Some("1.5 KB"));
        assert_eq!(record.get(keys::PATH), Some(path.to_str().unwrap()));
        assert_eq!(record.get(keys::TYPE), Some("Unknown"));
        assert_eq!(record.get(keys::INFO), Some("Unsupported file type"));
        assert!(record.error().is_none());
    }

    #[tokio::test]
    async fn test_handler_failure_keeps_base_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let record = extractor().extract(&path).await;
        assert_eq!(record.get(keys::TYPE), Some("Image"));
        assert_eq!(record.get(keys::FILENAME), Some("broken.png"));
        assert_eq!(record.get(keys::SIZE), Some("16.0 B"));
        assert!(record.error().is_some());
    }

    #[tokio::test]
    async fn test_jpeg_with_exif_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IMG_0001.JPG");
        std::fs::write(
            &path,
            image_info::tests::jpeg_with_exif(&[(0x010F, "Canon"), (0x0110, "EOS 5D")]),
        )
        .unwrap();

        let record = extractor().extract(&path).await;
        assert_eq!(record.get(keys::TYPE), Some("Image"));
        assert_eq!(record.get("resolution"), Some("4x4"));
        assert!(record.error().is_none());

        let exif = record.exif().unwrap();
        let tags: Vec<&str> = exif.keys().map(String::as_str).collect();
        assert_eq!(tags, vec!["Make", "Model"]);
        assert_eq!(exif["Model"], "EOS 5D");
    }

    #[tokio::test]
    async fn test_pdf_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        document::tests::write_pdf(&path, 2, "Report");

        let record = extractor().extract(&path).await;
        assert_eq!(record.get(keys::TYPE), Some("Document"));
        assert_eq!(record.get("pages"), Some("2"));
        assert_eq!(record.get("title"), Some("Report"));
    }

    #[tokio::test]
    async fn test_plain_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let record = extractor().extract(&path).await;
        assert_eq!(record.get(keys::TYPE), Some("Document"));
        assert_eq!(record.get("format"), Some("TXT"));
    }
}
