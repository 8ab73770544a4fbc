//! Normalization of folder-listing entries.
//!
//! The listing endpoint returns `{ "folders": [...], "files": [...] }`
//! where each entry is either a bare name or an object whose field names
//! vary between deployments.

use serde_json::Value;

use docrepo_core::types::ItemType;
use docrepo_entity::document::DocumentItem;
use docrepo_entity::document::item::{display_name, join_key};

/// Fields tried, in order, for an entry's display name.
const NAME_FIELDS: &[&str] = &["name", "Name", "displayName", "folderName", "fileName", "title"];

/// Fields tried, in order, for an entry's storage key.
const KEY_FIELDS: &[&str] = &["key", "Key", "path", "fullPath", "Prefix", "prefix"];

fn first_str<'a>(obj: &'a serde_json::Map<String, Value>, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| obj.get(*f).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Normalize one entry.
///
/// A string entry is a name under `prefix`. For objects, a `type` field
/// overrides `hint`, a missing key is built from `prefix` and the name,
/// and a missing name is taken from the key's last segment. Entries
/// without a usable name and key yield `None`.
pub fn normalize_entry(raw: &Value, hint: ItemType, prefix: &str) -> Option<DocumentItem> {
    match raw {
        Value::String(name) => {
            let name = name.trim_end_matches('/');
            if name.is_empty() {
                return None;
            }
            let name = display_name(name).to_string();
            Some(DocumentItem::new(join_key(prefix, &name), name, hint))
        }
        Value::Object(obj) => {
            let item_type = obj
                .get("type")
                .and_then(Value::as_str)
                .and_then(ItemType::from_label)
                .unwrap_or(hint);
            let name = first_str(obj, NAME_FIELDS);
            let key = first_str(obj, KEY_FIELDS);

            let (name, key) = match (name, key) {
                (Some(name), Some(key)) => (name.to_string(), key.to_string()),
                (Some(name), None) => (name.to_string(), join_key(prefix, name)),
                (None, Some(key)) => (display_name(key).to_string(), key.to_string()),
                (None, None) => return None,
            };
            let key = key.trim_end_matches('/').to_string();
            if name.is_empty() || key.is_empty() {
                return None;
            }
            Some(DocumentItem::new(key, name, item_type))
        }
        _ => None,
    }
}

/// Normalize a whole listing response: folders first, then files, each
/// in response order.
pub fn normalize_listing(response: &Value, prefix: &str) -> Vec<DocumentItem> {
    let section = |field: &str, hint: ItemType| {
        response
            .get(field)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(move |raw| normalize_entry(raw, hint, prefix))
    };
    section("folders", ItemType::Folder)
        .chain(section("files", ItemType::File))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_entries() {
        let item = normalize_entry(&json!("reports"), ItemType::Folder, "hr").expect("item");
        assert_eq!(item.key, "hr/reports");
        assert_eq!(item.name, "reports");
        assert!(item.is_folder());

        let root = normalize_entry(&json!("a.pdf"), ItemType::File, "").expect("item");
        assert_eq!(root.key, "a.pdf");
    }

    #[test]
    fn test_object_name_candidates_in_order() {
        let raw = json!({"title": "ignored", "displayName": "Quarterly", "Key": "fin/q1"});
        let item = normalize_entry(&raw, ItemType::File, "fin").expect("item");
        assert_eq!(item.name, "Quarterly");
        assert_eq!(item.key, "fin/q1");
    }

    #[test]
    fn test_object_missing_name_or_key() {
        let item = normalize_entry(&json!({"Prefix": "fin/2024/"}), ItemType::Folder, "fin")
            .expect("item");
        assert_eq!(item.name, "2024");
        assert_eq!(item.key, "fin/2024");

        let item = normalize_entry(&json!({"fileName": "x.txt"}), ItemType::File, "fin/")
            .expect("item");
        assert_eq!(item.key, "fin/x.txt");
    }

    #[test]
    fn test_type_field_overrides_hint() {
        let raw = json!({"name": "nested", "type": "folder"});
        let item = normalize_entry(&raw, ItemType::File, "").expect("item");
        assert_eq!(item.item_type, ItemType::Folder);
    }

    #[test]
    fn test_unusable_entries_dropped() {
        assert!(normalize_entry(&json!({"size": 3}), ItemType::File, "").is_none());
        assert!(normalize_entry(&json!(""), ItemType::File, "").is_none());
        assert!(normalize_entry(&json!({"name": ""}), ItemType::File, "").is_none());
        assert!(normalize_entry(&json!(7), ItemType::File, "").is_none());
    }

    #[test]
    fn test_listing_orders_folders_first() {
        let response = json!({
            "files": ["b.txt", {"name": "a.txt"}],
            "folders": ["z", {"bogus": true}],
        });
        let items = normalize_listing(&response, "");
        let keys: Vec<_> = items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["z", "b.txt", "a.txt"]);
    }

    #[test]
    fn test_listing_tolerates_missing_sections() {
        assert!(normalize_listing(&json!({}), "x").is_empty());
    }
}
