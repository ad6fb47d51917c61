use serde_json::Value;

use super::{LinkResolver, Record};
use crate::model::{Entry, Reference};
use crate::schema::FieldKind;
use crate::{Error, Result};

impl LinkResolver<'_> {
    /// Project an entry's fields in the default locale.
    ///
    /// With `resolve_links` off, link fields hold the bare referenced id;
    /// this is what the resolver itself uses to read a linked entry's title.
    /// `id` is always the first key and shadows a schema field of the same name.
    pub fn project(&self, entry: &Entry, resolve_links: bool) -> Result<Record> {
        let content_type = self.registry.find_by_id(entry.content_type_id())?;

        let mut record = Record::new();
        record.insert("id".to_string(), Value::String(entry.id().to_string()));

        for field in &content_type.fields {
            if field.id == "id" {
                continue;
            }
            let Some(raw) = entry.localized(&field.id, self.locale) else {
                continue;
            };
            if raw.is_null() {
                continue;
            }

            let value = match field.kind() {
                FieldKind::Scalar | FieldKind::ScalarArray => raw.clone(),
                FieldKind::EntryLink | FieldKind::AssetLink => {
                    self.project_link(&field.id, raw, resolve_links)?
                }
                FieldKind::LinkArray => {
                    let items = raw.as_array().ok_or_else(|| {
                        Error::malformed_link(&field.id, "expected an array of links")
                    })?;
                    Value::Array(
                        items
                            .iter()
                            .map(|item| self.project_link(&field.id, item, resolve_links))
                            .collect::<Result<Vec<_>>>()?,
                    )
                }
            };

            record.insert(field.id.clone(), value);
        }

        Ok(record)
    }

    fn project_link(&self, field: &str, raw: &Value, resolve_links: bool) -> Result<Value> {
        let reference = Reference::from_value(field, raw)?;
        if resolve_links {
            self.resolve(&reference)
        } else {
            Ok(Value::String(reference.id().to_string()))
        }
    }
}
