use crate::error::Result;
use crate::model::{keys, FileCategory, MetadataRecord};
use exif::{In, Tag, Value};
use image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Теги основного IFD, попадающие во всплывающее окно
const EXIF_TAGS: &[(Tag, &str)] = &[
    (Tag::Make, "Make"),
    (Tag::Model, "Model"),
    (Tag::DateTime, "DateTime"),
    (Tag::Software, "Software"),
];

/// Размеры, формат и цветовой режим без декодирования пикселей, плюс EXIF
pub fn inspect(path: &Path) -> Result<MetadataRecord> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();

    let mut record = MetadataRecord::of_category(FileCategory::Image);
    record.insert("resolution", format!("{width}x{height}"));
    // Декодер разворачивает палитру в RGB(A); режим берём из заголовка файла
    let paletted = format.is_some_and(|format| is_paletted(format, &read_head(path)));
    let mode = if paletted {
        "P".to_string()
    } else {
        color_mode(decoder.color_type())
    };
    record.insert("mode", mode);
    if let Some(format) = format {
        record.insert("format", format_name(format));
    }

    match read_exif(path) {
        Ok(exif) if !exif.is_empty() => record.insert_map(keys::EXIF, exif),
        Ok(_) => {}
        Err(e) => debug!("EXIF не прочитан для {}: {}", path.display(), e),
    }

    Ok(record)
}

/// Начало файла, достаточное для IHDR
fn read_head(path: &Path) -> Vec<u8> {
    let mut head = Vec::with_capacity(PNG_HEAD_LEN);
    if let Ok(file) = File::open(path) {
        let _ = file.take(PNG_HEAD_LEN as u64).read_to_end(&mut head);
    }
    head
}

const PNG_HEAD_LEN: usize = 26;
const PNG_INDEXED_COLOR: u8 = 3;

/// GIF всегда с палитрой; PNG с палитрой, если тип цвета в IHDR равен 3
fn is_paletted(format: ImageFormat, head: &[u8]) -> bool {
    match format {
        ImageFormat::Gif => true,
        ImageFormat::Png => {
            head.len() >= PNG_HEAD_LEN
                && &head[12..16] == b"IHDR"
                && head[PNG_HEAD_LEN - 1] == PNG_INDEXED_COLOR
        }
        _ => false,
    }
}

fn read_exif(path: &Path) -> Result<BTreeMap<String, String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let exif = exif::Reader::new().read_from_container(&mut reader)?;

    Ok(EXIF_TAGS
        .iter()
        .filter_map(|(tag, name)| {
            exif.get_field(*tag, In::PRIMARY)
                .map(|field| (name.to_string(), field_text(field)))
        })
        .collect())
}

fn field_text(field: &exif::Field) -> String {
    match &field.value {
        // display_value() оборачивает ASCII в кавычки
        Value::Ascii(parts) => parts
            .iter()
            .map(|part| String::from_utf8_lossy(part).trim_end_matches('\0').trim().to_string())
            .collect::<Vec<_>>()
            .join(", "),
        _ => field.display_value().to_string(),
    }
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        other => format!("{:?}", other).to_uppercase(),
    }
}

/// Обозначения режимов в стиле PIL
fn color_mode(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;F",
        ColorType::Rgba32F => "RGBA;F",
        other => return format!("{:?}", other),
    }
    .to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    /// APP1-сегмент с EXIF (little-endian TIFF, только ASCII-теги длиннее 4 байт)
    pub(crate) fn exif_app1(entries: &[(u16, &str)]) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II*\0");
        tiff.extend_from_slice(&8u32.to_le_bytes());
        tiff.extend_from_slice(&(entries.len() as u16).to_le_bytes());

        let mut data_offset = 8 + 2 + 12 * entries.len() as u32 + 4;
        let mut data = Vec::new();
        for (tag, text) in entries {
            let mut bytes = text.as_bytes().to_vec();
            bytes.push(0);
            tiff.extend_from_slice(&tag.to_le_bytes());
            tiff.extend_from_slice(&2u16.to_le_bytes());
            tiff.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            tiff.extend_from_slice(&data_offset.to_le_bytes());
            data_offset += bytes.len() as u32;
            data.extend(bytes);
        }
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend(data);

        let mut segment = vec![0xFF, 0xE1];
        segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        segment.extend_from_slice(b"Exif\0\0");
        segment.extend(tiff);
        segment
    }

    /// JPEG 4x4 с EXIF-сегментом сразу после SOI
    pub(crate) fn jpeg_with_exif(entries: &[(u16, &str)]) -> Vec<u8> {
        let mut jpeg = Vec::new();
        image::RgbImage::from_pixel(4, 4, image::Rgb([200, 30, 30]))
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let mut out = jpeg[..2].to_vec();
        out.extend(exif_app1(entries));
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_png_without_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::new(3, 2).save(&path).unwrap();

        let record = inspect(&path).unwrap();
        assert_eq!(record.get("resolution"), Some("3x2"));
        assert_eq!(record.get("format"), Some("PNG"));
        assert_eq!(record.get("mode"), Some("RGBA"));
        assert!(record.exif().is_none());
    }

    #[test]
    fn test_jpeg_exif_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(
            &path,
            jpeg_with_exif(&[(0x010F, "Canon"), (0x0131, "GIMP 2.10")]),
        )
        .unwrap();

        let record = inspect(&path).unwrap();
        assert_eq!(record.get("format"), Some("JPEG"));
        assert_eq!(record.get("mode"), Some("RGB"));

        let exif = record.exif().unwrap();
        assert_eq!(exif.get("Make").map(String::as_str), Some("Canon"));
        assert_eq!(exif.get("Software").map(String::as_str), Some("GIMP 2.10"));
        assert_eq!(exif.len(), 2);
    }

    #[test]
    fn test_indexed_png_header() {
        let mut png = Vec::new();
        image::RgbImage::new(2, 2)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        assert!(!is_paletted(ImageFormat::Png, &png));

        png[PNG_HEAD_LEN - 1] = PNG_INDEXED_COLOR;
        assert!(is_paletted(ImageFormat::Png, &png));
        assert!(!is_paletted(ImageFormat::Png, &png[..10]));
        assert!(!is_paletted(ImageFormat::Jpeg, &png));
    }

    #[test]
    fn test_gif_reports_palette_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let record = inspect(&path).unwrap();
        assert_eq!(record.get("format"), Some("GIF"));
        assert_eq!(record.get("mode"), Some("P"));
    }

    #[test]
    fn test_not_an_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"plain text").unwrap();

        assert!(inspect(&path).is_err());
    }
}
