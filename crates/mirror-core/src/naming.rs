//! Directory and file naming for mirrored entries

use mirror_fs::NormalizedPath;
use serde_json::Value;

use crate::resolve::Record;
use crate::schema::{ContentType, ContentTypeRegistry};

/// Directory under the data root that holds one sub-directory per content type
pub const ENTRIES_DIR: &str = "entries";

/// Extension of every mirrored entry file
pub const ENTRY_EXTENSION: &str = "md";

/// Convert a human-facing name into a lowercase, hyphen-joined token.
///
/// Word boundaries are runs of non-alphanumeric characters and case
/// changes (`BlogPost` and `blog post` both become `blog-post`). The
/// result depends only on the input, never on the process locale.
pub fn slug(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // fooBar -> foo|Bar, XMLHttp -> XML|Http
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

/// Derives on-disk locations for content types and entries.
#[derive(Debug, Clone)]
pub struct PathNamer {
    entries_root: NormalizedPath,
}

impl Default for PathNamer {
    fn default() -> Self {
        Self::new(NormalizedPath::new(ENTRIES_DIR))
    }
}

impl PathNamer {
    pub fn new(entries_root: NormalizedPath) -> Self {
        Self { entries_root }
    }

    /// `entries/<slug(type name)>`
    pub fn type_directory(
        &self,
        registry: &ContentTypeRegistry,
        content_type: &ContentType,
    ) -> NormalizedPath {
        self.entries_root
            .join(&registry.directory_name_of(content_type))
    }

    /// `entries/<slug(type name)>/<identifier value>.md`
    ///
    /// The stem is the record's configured identifier field; when that field
    /// is missing or not a scalar, the entry id is used instead.
    pub fn file_name_for(
        &self,
        registry: &ContentTypeRegistry,
        content_type: &ContentType,
        record: &Record,
    ) -> NormalizedPath {
        let stem = stem_value(record.get(registry.identifier_field_of(content_type)))
            .or_else(|| stem_value(record.get("id")))
            .unwrap_or_default();

        self.type_directory(registry, content_type)
            .join(&format!("{stem}.{ENTRY_EXTENSION}"))
    }
}

fn stem_value(value: Option<&Value>) -> Option<String> {
    let stem = match value? {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(escape_stem(&stem))
}

/// Percent-escape path separators so the file stays inside its type
/// directory. `%` is escaped too, keeping distinct values distinct.
fn escape_stem(stem: &str) -> String {
    let mut escaped = String::with_capacity(stem.len());
    for c in stem.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '\\' => escaped.push_str("%5C"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentTypeOverride;
    use crate::model::SysId;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[rstest]
    #[case("Blog Post", "blog-post")]
    #[case("BlogPost", "blog-post")]
    #[case("blog_post", "blog-post")]
    #[case("  Trim -- me  ", "trim-me")]
    #[case("XMLHttpRequest", "xml-http-request")]
    #[case("version2 Update", "version2-update")]
    #[case("Post", "post")]
    #[case("Café Menü", "café-menü")]
    #[case("", "")]
    fn slug_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slug(input), expected);
    }

    #[test]
    fn slug_is_stable_across_calls() {
        assert_eq!(slug("Blog Post"), slug("Blog Post"));
    }

    #[test]
    fn near_miss_names_stay_distinct() {
        assert_ne!(slug("Blog Post"), slug("Blog Posts"));
        assert_ne!(slug("Post"), slug("Posts2"));
    }

    fn registry(overrides: BTreeMap<String, ContentTypeOverride>) -> ContentTypeRegistry {
        ContentTypeRegistry::new(
            vec![ContentType {
                sys: SysId { id: "post".into() },
                name: "Blog Post".into(),
                display_field: None,
                fields: Vec::new(),
            }],
            &overrides,
        )
        .unwrap()
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn file_name_defaults_to_entry_id() {
        let registry = registry(BTreeMap::new());
        let post = registry.find_by_id("post").unwrap();
        let path = PathNamer::default().file_name_for(&registry, post, &record(json!({"id": "e1"})));
        assert_eq!(path.as_str(), "entries/blog-post/e1.md");
    }

    #[test]
    fn file_name_uses_configured_identifier_field() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "Blog Post".to_string(),
            ContentTypeOverride { id: Some("slug".into()), contents: None },
        );
        let registry = registry(overrides);
        let post = registry.find_by_id("post").unwrap();
        let namer = PathNamer::default();

        let with_slug = record(json!({"id": "e1", "slug": "hello-world"}));
        assert_eq!(
            namer.file_name_for(&registry, post, &with_slug).as_str(),
            "entries/blog-post/hello-world.md"
        );

        let without_slug = record(json!({"id": "e1"}));
        assert_eq!(
            namer.file_name_for(&registry, post, &without_slug).as_str(),
            "entries/blog-post/e1.md"
        );

        let nested = record(json!({"id": "e1", "slug": "2024/hello"}));
        assert_eq!(
            namer.file_name_for(&registry, post, &nested).as_str(),
            "entries/blog-post/2024%2Fhello.md"
        );
    }

    #[rstest]
    #[case("hello", "hello")]
    #[case("a/b", "a%2Fb")]
    #[case("a\\b", "a%5Cb")]
    #[case("100%", "100%25")]
    #[case("a%2Fb", "a%252Fb")]
    fn stem_escapes_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_stem(input), expected);
    }

    #[test]
    fn separator_lookalikes_get_distinct_files() {
        let stems = ["a/b", "a-b", "a\\b", "a%2Fb"].map(escape_stem);
        for (i, left) in stems.iter().enumerate() {
            for right in &stems[i + 1..] {
                assert_ne!(left, right);
            }
        }
    }
}
