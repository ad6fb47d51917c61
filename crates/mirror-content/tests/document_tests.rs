use mirror_content::FrontMatterDocument;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Map, Value, json};

fn record(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_nested_link_summary_renders_as_mapping() {
    let doc = FrontMatterDocument::new(
        record(json!({
            "category": {"id": "c1", "title": "Cat"},
            "id": "e1",
            "title": "Hello",
        })),
        "World",
    );

    let rendered = doc.render().unwrap();
    assert_eq!(
        rendered,
        "---\ncategory:\n  id: c1\n  title: Cat\nid: e1\ntitle: Hello\n---\nWorld\n"
    );
}

#[test]
fn test_render_is_deterministic() {
    let doc = FrontMatterDocument::new(
        record(json!({"id": "e1", "tags": ["a", "b"], "views": 3})),
        "Body text",
    );
    assert_eq!(doc.render().unwrap(), doc.clone().render().unwrap());
}

/// Split rendered text into its YAML header and body.
fn split_rendered(rendered: &str) -> (&str, &str) {
    let rest = rendered.strip_prefix("---\n").unwrap();
    let end = rest.find("\n---\n").unwrap();
    (&rest[..end], &rest[end + "\n---\n".len()..])
}

#[rstest]
#[case(json!({"id": "e1", "title": "Hello"}), "World")]
#[case(json!({"id": "e2", "tags": ["x", "y"]}), "")]
#[case(json!({"author": {"id": "a1", "title": null}, "id": "e3"}), "# Heading\n\nParagraph")]
#[case(json!({"id": "e4"}), "a\n---\nb")]
fn test_rendered_header_is_yaml_of_metadata(#[case] metadata: Value, #[case] body: &str) {
    let rendered = FrontMatterDocument::new(record(metadata.clone()), body)
        .render()
        .unwrap();
    let (header, rendered_body) = split_rendered(&rendered);

    let parsed: Value = serde_yaml::from_str(header).unwrap();
    assert_eq!(parsed, metadata);
    assert_eq!(rendered_body, format!("{body}\n"));
}

#[test]
fn test_body_only_document_has_no_fence() {
    let rendered = FrontMatterDocument::new(Map::new(), "just text")
        .render()
        .unwrap();
    assert_eq!(rendered, "just text\n");
}
