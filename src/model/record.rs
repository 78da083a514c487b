//! Запись метаданных: плоское отображение «имя поля → отображаемое значение».
//!
//! Схема не навязывается. Зарезервированы два ключа: [`keys::TYPE`] выбирает
//! вариант окна, [`keys::ERROR`] отмечает сбой извлечения. Отсутствующие
//! поля отображаются как `"Unknown"`.

use crate::model::FileCategory;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

pub mod keys {
    pub const TYPE: &str = "type";
    pub const ERROR: &str = "error";
    pub const FILENAME: &str = "filename";
    pub const EXTENSION: &str = "extension";
    pub const SIZE: &str = "size";
    pub const PATH: &str = "path";
    pub const INFO: &str = "info";
    pub const EXIF: &str = "exif";
}

/// Значение поля: строка для отображения или вложенная таблица (EXIF)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Map(BTreeMap<String, String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Частичная запись обработчика: только поле `type`
    pub fn of_category(category: FileCategory) -> Self {
        Self::new().with(keys::TYPE, category.as_str())
    }

    /// Запись об ошибке обработчика категории
    pub fn failure(category: FileCategory, error: impl Display) -> Self {
        Self::of_category(category).with(keys::ERROR, error.to_string())
    }

    /// Запись, содержащая только индикатор ошибки
    pub fn error_only(error: impl Into<String>) -> Self {
        Self::new().with(keys::ERROR, error)
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .insert(key.to_string(), FieldValue::Text(value.into()));
    }

    pub fn insert_map(&mut self, key: &str, map: BTreeMap<String, String>) {
        self.fields.insert(key.to_string(), FieldValue::Map(map));
    }

    /// Поля `other` перекрывают существующие
    pub fn merge(mut self, other: MetadataRecord) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn get_map(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        match self.fields.get(key) {
            Some(FieldValue::Map(map)) => Some(map),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn error(&self) -> Option<&str> {
        self.get(keys::ERROR)
    }

    pub fn exif(&self) -> Option<&BTreeMap<String, String>> {
        self.get_map(keys::EXIF)
    }

    pub fn category(&self) -> Option<FileCategory> {
        self.get(keys::TYPE).and_then(|name| name.parse().ok())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
