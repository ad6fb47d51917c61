//! Content type schemas
//!
//! Schemas are small and always fetched in full at the start of a pass;
//! the [`ContentTypeRegistry`] wraps them for lookup.

mod registry;

pub use registry::ContentTypeRegistry;

use serde::{Deserialize, Serialize};

use crate::model::SysId;

/// How a field's value is projected into the on-disk record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    EntryLink,
    AssetLink,
    ScalarArray,
    LinkArray,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldItems {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

/// One field of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<FieldItems>,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self.field_type.as_str() {
            "Link" if self.link_type.as_deref() == Some("Asset") => FieldKind::AssetLink,
            "Link" => FieldKind::EntryLink,
            "Array" => match &self.items {
                Some(items) if items.item_type == "Link" => FieldKind::LinkArray,
                _ => FieldKind::ScalarArray,
            },
            _ => FieldKind::Scalar,
        }
    }
}

/// A content type: its name, fields and display field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub sys: SysId,
    pub name: String,
    /// Field used as the title when an entry of this type is linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ContentType {
    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: serde_json::Value) -> Field {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn field_kinds_follow_type_and_link_type() {
        assert_eq!(field(json!({"id": "title", "type": "Symbol"})).kind(), FieldKind::Scalar);
        assert_eq!(
            field(json!({"id": "author", "type": "Link", "linkType": "Entry"})).kind(),
            FieldKind::EntryLink
        );
        assert_eq!(
            field(json!({"id": "image", "type": "Link", "linkType": "Asset"})).kind(),
            FieldKind::AssetLink
        );
        assert_eq!(
            field(json!({"id": "tags", "type": "Array", "items": {"type": "Symbol"}})).kind(),
            FieldKind::ScalarArray
        );
        assert_eq!(
            field(json!({"id": "related", "type": "Array", "items": {"type": "Link", "linkType": "Entry"}}))
                .kind(),
            FieldKind::LinkArray
        );
    }

    #[test]
    fn content_type_parses_delivery_shape() {
        let content_type: ContentType = serde_json::from_value(json!({
            "sys": {"id": "post"},
            "name": "Blog Post",
            "displayField": "title",
            "fields": [{"id": "title", "name": "Title", "type": "Symbol"}]
        }))
        .unwrap();

        assert_eq!(content_type.id(), "post");
        assert_eq!(content_type.display_field.as_deref(), Some("title"));
        assert_eq!(content_type.fields.len(), 1);
    }
}
