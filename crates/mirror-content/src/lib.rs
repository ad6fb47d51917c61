//! Entry file format for the content mirror
//!
//! Each mirrored entry is one text file: a YAML metadata block fenced by
//! `---` lines, followed by the entry's long-form body.
//!
//! ```
//! use mirror_content::FrontMatterDocument;
//! use serde_json::json;
//!
//! let metadata = json!({"id": "e1", "title": "Hello"});
//! let doc = FrontMatterDocument::new(metadata.as_object().unwrap().clone(), "World");
//! assert_eq!(doc.render().unwrap(), "---\nid: e1\ntitle: Hello\n---\nWorld\n");
//! ```

pub mod document;
pub mod error;

pub use document::{FENCE, FrontMatterDocument};
pub use error::{Error, Result};
