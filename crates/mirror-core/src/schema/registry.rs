//! Content type registry

use std::collections::{BTreeMap, HashMap};

use super::ContentType;
use crate::config::ContentTypeOverride;
use crate::naming::slug;
use crate::{Error, Result};

/// Field used as the file stem when no override is configured
pub const DEFAULT_IDENTIFIER_FIELD: &str = "id";

/// Lookup over the content types fetched for one pass, plus the
/// per-type configuration overlay.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use mirror_core::schema::{ContentType, ContentTypeRegistry};
///
/// let post: ContentType = serde_json::from_value(serde_json::json!({
///     "sys": {"id": "post"}, "name": "Blog Post", "fields": []
/// })).unwrap();
/// let registry = ContentTypeRegistry::new(vec![post], &BTreeMap::new()).unwrap();
///
/// let post = registry.find_by_id("post").unwrap();
/// assert_eq!(registry.directory_name_of(post), "blog-post");
/// assert_eq!(registry.identifier_field_of(post), "id");
/// assert_eq!(registry.body_field_of(post), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    types: Vec<ContentType>,
    by_id: HashMap<String, usize>,
    overrides: BTreeMap<String, ContentTypeOverride>,
}

impl ContentTypeRegistry {
    /// Build a registry, rejecting schema sets whose names would share a directory.
    pub fn new(
        types: Vec<ContentType>,
        overrides: &BTreeMap<String, ContentTypeOverride>,
    ) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(types.len());
        let mut by_slug: HashMap<String, &str> = HashMap::with_capacity(types.len());

        for (index, content_type) in types.iter().enumerate() {
            let directory = slug(&content_type.name);
            if directory.is_empty() {
                return Err(Error::EmptyTypeSlug {
                    id: content_type.id().to_string(),
                    name: content_type.name.clone(),
                });
            }
            if let Some(first) = by_slug.insert(directory.clone(), &content_type.name) {
                return Err(Error::SlugCollision {
                    first: first.to_string(),
                    second: content_type.name.clone(),
                    slug: directory,
                });
            }
            by_id.insert(content_type.id().to_string(), index);
        }

        Ok(Self {
            types,
            by_id,
            overrides: overrides.clone(),
        })
    }

    pub fn find_by_id(&self, type_id: &str) -> Result<&ContentType> {
        self.by_id
            .get(type_id)
            .map(|&index| &self.types[index])
            .ok_or_else(|| Error::UnknownContentType {
                id: type_id.to_string(),
            })
    }

    /// All content types, in the order the remote source listed them.
    pub fn content_types(&self) -> &[ContentType] {
        &self.types
    }

    pub fn directory_name_of(&self, content_type: &ContentType) -> String {
        slug(&content_type.name)
    }

    pub fn identifier_field_of(&self, content_type: &ContentType) -> &str {
        self.overrides
            .get(&content_type.name)
            .and_then(|o| o.id.as_deref())
            .unwrap_or(DEFAULT_IDENTIFIER_FIELD)
    }

    pub fn body_field_of(&self, content_type: &ContentType) -> Option<&str> {
        self.overrides
            .get(&content_type.name)
            .and_then(|o| o.contents.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SysId;

    fn content_type(id: &str, name: &str) -> ContentType {
        ContentType {
            sys: SysId { id: id.into() },
            name: name.into(),
            display_field: None,
            fields: Vec::new(),
        }
    }

    #[test]
    fn find_by_id_reports_unknown_type() {
        let registry =
            ContentTypeRegistry::new(vec![content_type("post", "Post")], &BTreeMap::new()).unwrap();

        assert_eq!(registry.find_by_id("post").unwrap().name, "Post");
        match registry.find_by_id("page") {
            Err(Error::UnknownContentType { id }) => assert_eq!(id, "page"),
            other => panic!("expected unknown content type, got {other:?}"),
        }
    }

    #[test]
    fn overrides_are_keyed_by_type_name() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "Post".to_string(),
            ContentTypeOverride {
                id: Some("slug".into()),
                contents: Some("body".into()),
            },
        );
        let registry = ContentTypeRegistry::new(
            vec![content_type("post", "Post"), content_type("author", "Author")],
            &overrides,
        )
        .unwrap();

        let post = registry.find_by_id("post").unwrap();
        let author = registry.find_by_id("author").unwrap();
        assert_eq!(registry.identifier_field_of(post), "slug");
        assert_eq!(registry.body_field_of(post), Some("body"));
        assert_eq!(registry.identifier_field_of(author), "id");
        assert_eq!(registry.body_field_of(author), None);
    }

    #[test]
    fn colliding_directory_names_are_rejected() {
        let result = ContentTypeRegistry::new(
            vec![content_type("a", "Blog Post"), content_type("b", "blog_post")],
            &BTreeMap::new(),
        );
        match result {
            Err(Error::SlugCollision { first, second, slug }) => {
                assert_eq!(first, "Blog Post");
                assert_eq!(second, "blog_post");
                assert_eq!(slug, "blog-post");
            }
            other => panic!("expected slug collision, got {other:?}"),
        }
    }

    #[test]
    fn name_without_word_characters_is_rejected() {
        let result = ContentTypeRegistry::new(vec![content_type("x", "!!!")], &BTreeMap::new());
        assert!(matches!(result, Err(Error::EmptyTypeSlug { .. })));
    }
}
