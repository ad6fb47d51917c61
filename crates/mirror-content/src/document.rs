//! YAML front matter document

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Line that opens and closes the metadata block.
pub const FENCE: &str = "---";

/// A metadata record plus body, serialized together into one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatterDocument {
    pub metadata: Map<String, Value>,
    pub body: String,
}

impl FrontMatterDocument {
    pub fn new(metadata: Map<String, Value>, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    /// Render to the on-disk text form.
    ///
    /// The metadata block is omitted when there is no metadata. The output
    /// always ends with a newline, so rendering the same document twice
    /// yields identical bytes. An empty body and a body of `"\n"` render
    /// the same way; the file is written, never read back.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();

        if !self.metadata.is_empty() {
            let yaml = serde_yaml::to_string(&self.metadata)
                .map_err(|e| Error::render("YAML", e.to_string()))?;
            out.push_str(FENCE);
            out.push('\n');
            out.push_str(&yaml);
            if !yaml.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(FENCE);
            out.push('\n');
        }

        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn render_places_body_after_fence() {
        let doc = FrontMatterDocument::new(record(json!({"id": "e1"})), "World");
        assert_eq!(doc.render().unwrap(), "---\nid: e1\n---\nWorld\n");
    }

    #[test]
    fn render_empty_body_still_ends_with_newline() {
        let doc = FrontMatterDocument::new(record(json!({"id": "c1"})), "");
        assert_eq!(doc.render().unwrap(), "---\nid: c1\n---\n\n");
    }

    #[test]
    fn render_empty_and_newline_bodies_match() {
        let metadata = record(json!({"id": "c1"}));
        let empty = FrontMatterDocument::new(metadata.clone(), "");
        let newline = FrontMatterDocument::new(metadata, "\n");
        assert_eq!(empty.render().unwrap(), newline.render().unwrap());
    }

    #[test]
    fn render_without_metadata_is_body_only() {
        let doc = FrontMatterDocument::new(Map::new(), "plain\n");
        assert_eq!(doc.render().unwrap(), "plain\n");
    }
}
