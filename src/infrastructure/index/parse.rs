//! Shape-tolerant parsing of collection metadata documents.
//!
//! Published metadata comes in two shapes: an array of records, or an
//! object keyed by identifier whose values are records or bare URL strings.
//! Field names vary between collections, so identifier and image fields are
//! probed in a fixed priority order.

use std::collections::HashMap;

use serde_json::Value;

const ID_FIELDS: [&str; 4] = ["id", "tokenId", "token_id", "index"];
const IMAGE_FIELDS: [&str; 3] = ["image", "image_url", "imageUrl"];

/// Rewrites `ipfs://<hash>` and `ipfs://ipfs/<hash>` to an HTTPS gateway
/// URL. Anything else passes through unchanged.
#[must_use]
pub fn ipfs_to_https(url: &str, gateway: &str) -> String {
    match url.strip_prefix("ipfs://") {
        Some(rest) => {
            let hash = rest.strip_prefix("ipfs/").unwrap_or(rest);
            format!("https://{gateway}/ipfs/{hash}")
        }
        None => url.to_string(),
    }
}

fn value_as_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extracts the identifier from a record, probing fields in priority order.
#[must_use]
pub fn pick_id(record: &Value) -> Option<String> {
    ID_FIELDS
        .iter()
        .find_map(|field| record.get(field).and_then(value_as_key))
}

/// Extracts the image URL from a record, probing fields in priority order.
///
/// The first present string field wins; an empty string disqualifies the
/// record rather than falling through to later fields.
#[must_use]
pub fn pick_image(record: &Value) -> Option<String> {
    IMAGE_FIELDS
        .iter()
        .find_map(|field| record.get(field).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Builds an identifier→URL mapping from a parsed metadata document.
///
/// Entries missing either an identifier or an image are skipped; image URLs
/// go through the ipfs rewrite before storage. An unrecognized document
/// shape yields an empty mapping.
#[must_use]
pub fn parse_index_document(doc: &Value, gateway: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();

    match doc {
        Value::Array(records) => {
            for record in records {
                if let (Some(id), Some(image)) = (pick_id(record), pick_image(record)) {
                    map.insert(id, ipfs_to_https(&image, gateway));
                }
            }
        }
        Value::Object(entries) => {
            for (key, value) in entries {
                let id = pick_id(value).unwrap_or_else(|| key.clone());
                let image = match value {
                    Value::String(s) if !s.is_empty() => Some(s.clone()),
                    _ => pick_image(value),
                };
                if let Some(image) = image {
                    map.insert(id, ipfs_to_https(&image, gateway));
                }
            }
        }
        _ => {}
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GATEWAY: &str = "dweb.link";

    #[test]
    fn test_ipfs_rewrite() {
        assert_eq!(
            ipfs_to_https("ipfs://bafy123", GATEWAY),
            "https://dweb.link/ipfs/bafy123"
        );
        assert_eq!(
            ipfs_to_https("ipfs://ipfs/bafy123", GATEWAY),
            "https://dweb.link/ipfs/bafy123"
        );
        assert_eq!(
            ipfs_to_https("https://a.example/1.png", GATEWAY),
            "https://a.example/1.png"
        );
    }

    #[test]
    fn test_pick_id_priority() {
        assert_eq!(pick_id(&json!({"id": 7, "index": 9})), Some("7".to_string()));
        assert_eq!(pick_id(&json!({"tokenId": "12"})), Some("12".to_string()));
        assert_eq!(pick_id(&json!({"token_id": 3})), Some("3".to_string()));
        assert_eq!(pick_id(&json!({"index": 0})), Some("0".to_string()));
        assert_eq!(pick_id(&json!({"name": "x"})), None);
    }

    #[test]
    fn test_pick_image_priority() {
        let record = json!({"image_url": "b.png", "image": "a.png"});
        assert_eq!(pick_image(&record), Some("a.png".to_string()));

        let record = json!({"imageUrl": "c.png"});
        assert_eq!(pick_image(&record), Some("c.png".to_string()));
    }

    #[test]
    fn test_pick_image_empty_string_disqualifies() {
        // An empty first field does not fall through to later fields.
        let record = json!({"image": "", "image_url": "b.png"});
        assert_eq!(pick_image(&record), None);
    }

    #[test]
    fn test_array_document() {
        let doc = json!([
            {"id": 7, "image": "ipfs://bafy123"},
            {"tokenId": "8", "image_url": "https://a.example/8.png"},
            {"id": 9},
            {"image": "https://a.example/orphan.png"}
        ]);

        let map = parse_index_document(&doc, GATEWAY);
        assert_eq!(map.len(), 2);
        assert_eq!(map["7"], "https://dweb.link/ipfs/bafy123");
        assert_eq!(map["8"], "https://a.example/8.png");
    }

    #[test]
    fn test_map_document_with_records() {
        let doc = json!({
            "7": {"image": "https://a.example/7.png"},
            "8": {"id": 800, "image": "https://a.example/800.png"}
        });

        let map = parse_index_document(&doc, GATEWAY);
        assert_eq!(map["7"], "https://a.example/7.png");
        // A record-level id overrides the map key.
        assert_eq!(map["800"], "https://a.example/800.png");
        assert!(!map.contains_key("8"));
    }

    #[test]
    fn test_map_document_with_bare_urls() {
        let doc = json!({
            "1": "https://a.example/1.png",
            "2": "ipfs://bafy2",
            "3": ""
        });

        let map = parse_index_document(&doc, GATEWAY);
        assert_eq!(map.len(), 2);
        assert_eq!(map["2"], "https://dweb.link/ipfs/bafy2");
    }

    #[test]
    fn test_unrecognized_shapes_yield_empty() {
        assert!(parse_index_document(&json!("just a string"), GATEWAY).is_empty());
        assert!(parse_index_document(&json!(42), GATEWAY).is_empty());
        assert!(parse_index_document(&json!(null), GATEWAY).is_empty());
    }
}
