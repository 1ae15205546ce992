//! Record normalization
//!
//! Turns one raw dataset item, whatever source it came from, into a
//! [`NormalizedRecord`]. Column lookups go through [`ColumnHints`], an ordered
//! list of candidate keys per field; the first key holding a usable value wins.

use marcbench_common::types::{DatasetDescriptor, NormalizedRecord};
use serde_json::{Map, Value};

/// A raw item as yielded by a source adapter
pub type RawItem = Map<String, Value>;

/// Conventional singular image key tried after the configured image column
pub const IMAGE_FALLBACK_KEY: &str = "image";

/// Raw items of one load plus the hints needed to normalize them
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub items: Vec<RawItem>,
    pub hints: ColumnHints,
}

/// Candidate keys per normalized field, tried in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHints {
    pub id: Vec<String>,
    pub images: Vec<String>,
    pub metadata: Vec<String>,
    pub unimarc: Vec<String>,
}

impl Default for ColumnHints {
    fn default() -> Self {
        Self {
            id: vec!["id".to_string()],
            images: vec!["images".to_string(), IMAGE_FALLBACK_KEY.to_string()],
            metadata: vec!["metadata".to_string()],
            unimarc: vec!["unimarc".to_string()],
        }
    }
}

impl ColumnHints {
    /// Default hints with the descriptor's column overrides applied.
    ///
    /// An override replaces the primary candidate. The image field keeps the
    /// singular fallback key behind the override.
    pub fn from_descriptor(descriptor: &DatasetDescriptor) -> Self {
        let mut hints = Self::default();

        if let Some(column) = non_empty(&descriptor.id_column) {
            hints.id = vec![column];
        }
        if let Some(column) = non_empty(&descriptor.image_column) {
            hints.images = vec![column.clone()];
            if column != IMAGE_FALLBACK_KEY {
                hints.images.push(IMAGE_FALLBACK_KEY.to_string());
            }
        }
        if let Some(column) = non_empty(&descriptor.metadata_column) {
            hints.metadata = vec![column];
        }
        if let Some(column) = non_empty(&descriptor.unimarc_column) {
            hints.unimarc = vec![column];
        }

        hints
    }
}

fn non_empty(column: &Option<String>) -> Option<String> {
    column
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Normalize one raw item. `position` is the item's index in the current load.
pub fn normalize_record(item: &RawItem, hints: &ColumnHints, position: usize) -> NormalizedRecord {
    let id = first_present(item, &hints.id)
        .map(value_to_text)
        .unwrap_or_else(|| position.to_string());

    let images = hints
        .images
        .iter()
        .filter_map(|key| item.get(key))
        .find(|value| !is_blank(value))
        .map(image_list)
        .unwrap_or_default();

    NormalizedRecord {
        id,
        images,
        metadata_text: first_present(item, &hints.metadata)
            .map(value_to_text)
            .unwrap_or_default(),
        unimarc_record: first_present(item, &hints.unimarc)
            .map(value_to_text)
            .unwrap_or_default(),
    }
}

/// Normalize a whole batch, preserving the adapter's order
pub fn normalize_batch(batch: &SourceBatch) -> Vec<NormalizedRecord> {
    batch
        .items
        .iter()
        .enumerate()
        .map(|(position, item)| normalize_record(item, &batch.hints, position))
        .collect()
}

fn first_present<'a>(item: &'a RawItem, keys: &[String]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(key))
        .find(|value| !value.is_null())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

fn image_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(image_handle)
            .collect(),
        single => vec![image_handle(single)],
    }
}

/// Image cells are plain paths, or objects such as `{"src": "https://..."}`
/// as served by the hub.
fn image_handle(value: &Value) -> String {
    if let Value::Object(fields) = value {
        if let Some(handle) = ["src", "path"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
        {
            return handle.to_string();
        }
    }
    value_to_text(value)
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> RawItem {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_columns_degrade_to_defaults() {
        let raw = item(json!({"title": "unrelated"}));

        let record = normalize_record(&raw, &ColumnHints::default(), 7);

        assert_eq!(record.id, "7");
        assert!(record.images.is_empty());
        assert_eq!(record.metadata_text, "");
        assert_eq!(record.unimarc_record, "");
    }

    #[test]
    fn test_null_id_falls_back_to_position() {
        let raw = item(json!({"id": null, "metadata": "Title: A"}));

        let record = normalize_record(&raw, &ColumnHints::default(), 2);

        assert_eq!(record.id, "2");
        assert_eq!(record.metadata_text, "Title: A");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let raw = item(json!({"id": 1042}));
        assert_eq!(normalize_record(&raw, &ColumnHints::default(), 0).id, "1042");
    }

    #[test]
    fn test_singular_image_fallback_is_wrapped() {
        let raw = item(json!({"image": "scans/page-1.png"}));

        let record = normalize_record(&raw, &ColumnHints::default(), 0);

        assert_eq!(record.images, vec!["scans/page-1.png".to_string()]);
    }

    #[test]
    fn test_empty_primary_images_fall_back_to_singular_key() {
        let raw = item(json!({"images": [], "image": "cover.jpg"}));

        let record = normalize_record(&raw, &ColumnHints::default(), 0);

        assert_eq!(record.images, vec!["cover.jpg".to_string()]);
    }

    #[test]
    fn test_image_sequence_kept_in_order() {
        let raw = item(json!({
            "images": ["p1.png", {"src": "https://hub.example/p2.png", "width": 600}, null, "p3.png"]
        }));

        let record = normalize_record(&raw, &ColumnHints::default(), 0);

        assert_eq!(record.images, vec!["p1.png", "https://hub.example/p2.png", "p3.png"]);
    }

    #[test]
    fn test_structured_text_is_compact_json() {
        let raw = item(json!({"metadata": {"title": "A"}, "unimarc": 200}));

        let record = normalize_record(&raw, &ColumnHints::default(), 0);

        assert_eq!(record.metadata_text, r#"{"title":"A"}"#);
        assert_eq!(record.unimarc_record, "200");
    }

    #[test]
    fn test_descriptor_overrides_replace_primary_candidates() {
        let mut descriptor = DatasetDescriptor::remote("acme/scans");
        descriptor.id_column = Some("record_id".to_string());
        descriptor.image_column = Some("scan".to_string());
        descriptor.metadata_column = Some("ocr_text".to_string());
        descriptor.unimarc_column = Some("  ".to_string());

        let hints = ColumnHints::from_descriptor(&descriptor);

        assert_eq!(hints.id, vec!["record_id"]);
        assert_eq!(hints.images, vec!["scan", "image"]);
        assert_eq!(hints.metadata, vec!["ocr_text"]);
        assert_eq!(hints.unimarc, vec!["unimarc"]);

        let raw = item(json!({"record_id": "r-9", "id": "ignored", "image": "fallback.png", "ocr_text": "OCR"}));
        let record = normalize_record(&raw, &hints, 0);

        assert_eq!(record.id, "r-9");
        assert_eq!(record.images, vec!["fallback.png"]);
        assert_eq!(record.metadata_text, "OCR");
    }

    #[test]
    fn test_singular_image_override_is_not_duplicated() {
        let mut descriptor = DatasetDescriptor::remote("acme/scans");
        descriptor.image_column = Some("image".to_string());

        assert_eq!(ColumnHints::from_descriptor(&descriptor).images, vec!["image"]);
    }

    #[test]
    fn test_normalize_batch_uses_positions() {
        let batch = SourceBatch {
            items: vec![item(json!({"metadata": "a"})), item(json!({"id": "x"})), item(json!({}))],
            hints: ColumnHints::default(),
        };

        let ids: Vec<String> = normalize_batch(&batch).into_iter().map(|r| r.id).collect();

        assert_eq!(ids, vec!["0", "x", "2"]);
    }
}
