use crate::error::Result;
use crate::model::{FileCategory, MetadataRecord};
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

/// Поля информационного словаря PDF и их ключи в записи
const INFO_FIELDS: &[(&[u8], &str)] = &[
    (b"Title", "title"),
    (b"Author", "author"),
    (b"CreationDate", "created"),
];

pub fn inspect(path: &Path, extension: &str) -> Result<MetadataRecord> {
    let mut record = MetadataRecord::of_category(FileCategory::Document);

    if extension != ".pdf" {
        record.insert("format", extension.trim_start_matches('.').to_uppercase());
        return Ok(record);
    }

    let document = Document::load(path)?;
    record.insert("format", "PDF");
    record.insert("pages", document.get_pages().len().to_string());

    if let Some(info) = info_dictionary(&document) {
        for (pdf_key, field) in INFO_FIELDS {
            if let Some(text) = info.get(pdf_key).ok().and_then(text_value) {
                if !text.is_empty() {
                    record.insert(field, text);
                }
            }
        }
    }

    Ok(record)
}

fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Текстовая строка PDF: UTF-16BE с BOM или однобайтовая
fn text_value(object: &Object) -> Option<String> {
    let Object::String(bytes, _) = object else {
        return None;
    };

    let text = if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    };

    Some(text.trim().to_string())
}
