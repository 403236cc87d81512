// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Moves reflected fields in and out of JSON objects.
//!
//! Both scene documents and material library files store a value as an object
//! of `field name -> field value`. These helpers are the only code that knows
//! that layout.

use serde_json::{Map, Value};
use strata_core::reflect::{field_names, Field, FieldMeta, FieldVisitor, FieldVisitorMut, Reflect};
use thiserror::Error;

/// A field that could not be written or read.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The object has no entry for a reflected field.
    #[error("missing field '{field}'")]
    Missing {
        /// The reflected field name.
        field: &'static str,
    },
    /// The entry exists but does not match the field's type.
    #[error("invalid value for field '{field}': {source}")]
    Invalid {
        /// The reflected field name.
        field: &'static str,
        /// The decoding error.
        source: serde_json::Error,
    },
    /// The field's current value could not be encoded.
    #[error("cannot encode field '{field}': {source}")]
    Encode {
        /// The reflected field name.
        field: &'static str,
        /// The encoding error.
        source: serde_json::Error,
    },
}

/// Writes every reflected field of `value` into a JSON object, in reflection order.
pub fn fields_to_json<R: Reflect>(value: &R) -> Result<Map<String, Value>, FieldError> {
    struct Writer {
        object: Map<String, Value>,
        error: Option<FieldError>,
    }
    impl FieldVisitor for Writer {
        fn visit_field<F: Field>(&mut self, name: &'static str, value: &F, _: &FieldMeta) {
            if self.error.is_some() {
                return;
            }
            match serde_json::to_value(value) {
                Ok(json) => {
                    self.object.insert(name.to_owned(), json);
                }
                Err(source) => self.error = Some(FieldError::Encode { field: name, source }),
            }
        }
    }

    let mut writer = Writer {
        object: Map::new(),
        error: None,
    };
    value.visit_fields(&mut writer);
    match writer.error {
        Some(err) => Err(err),
        None => Ok(writer.object),
    }
}

/// Reads every reflected field of `value` from `object`.
///
/// Every reflected field must be present. Entries that match no reflected
/// field are ignored and reported with a warning naming `context`.
pub fn fields_from_json<R: Reflect>(
    value: &mut R,
    object: &Map<String, Value>,
    context: &str,
) -> Result<(), FieldError> {
    struct Reader<'a> {
        object: &'a Map<String, Value>,
        error: Option<FieldError>,
    }
    impl FieldVisitorMut for Reader<'_> {
        fn visit_field<F: Field>(&mut self, name: &'static str, value: &mut F, _: &FieldMeta) {
            if self.error.is_some() {
                return;
            }
            let Some(json) = self.object.get(name) else {
                self.error = Some(FieldError::Missing { field: name });
                return;
            };
            match serde_json::from_value::<F>(json.clone()) {
                Ok(decoded) => *value = decoded,
                Err(source) => self.error = Some(FieldError::Invalid { field: name, source }),
            }
        }
    }

    let known = field_names(value);
    for key in object.keys() {
        if !known.contains(&key.as_str()) {
            log::warn!("[reflect] ignoring unknown field '{}' in {}", key, context);
        }
    }

    let mut reader = Reader {
        object,
        error: None,
    };
    value.visit_fields_mut(&mut reader);
    match reader.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
