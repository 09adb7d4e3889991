// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search criteria and the schemas that define them.
//!
//! A [`SearchSchema`] lists the criteria a search form may submit; a
//! [`ResultsSchema`] lists the fields each hit is rendered with. Both are
//! handed in by the host and read-only here. A [`Query`] stores submitted
//! criterion values and refuses names its schema does not define.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FindError, Result};
use crate::render::FieldKind;
use crate::types::FieldValue;

/// Name of the criterion carrying the full-text query string.
pub const FULLTEXT_FIELD: &str = "fulltext";

/// A criterion a search form can submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchField {
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Shown to visitors, not only to editors.
    #[serde(default = "default_public")]
    pub public: bool,
}

/// A field rendered for each hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultField {
    /// Attribute name, or `set:element` for metadata fields.
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub kind: FieldKind,
    #[serde(default = "default_public")]
    pub public: bool,
}

fn default_public() -> bool {
    true
}

/// Anything with a unique name inside a schema.
pub trait NamedField {
    fn name(&self) -> &str;
    fn is_public(&self) -> bool;
}

impl NamedField for SearchField {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_public(&self) -> bool {
        self.public
    }
}

impl NamedField for ResultField {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_public(&self) -> bool {
        self.public
    }
}

/// Ordered set of uniquely named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema<F> {
    fields: Vec<F>,
}

pub type SearchSchema = Schema<SearchField>;
pub type ResultsSchema = Schema<ResultField>;

impl<F: NamedField> Schema<F> {
    /// Build a schema, rejecting duplicate field names.
    pub fn new(fields: Vec<F>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(FindError::DuplicateField(field.name().to_string()));
            }
        }
        Ok(Schema { fields })
    }

    pub fn fields(&self) -> &[F] {
        &self.fields
    }

    pub fn public_fields(&self) -> impl Iterator<Item = &F> {
        self.fields.iter().filter(|field| field.is_public())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field(&self, name: &str) -> Option<&F> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de, F> Deserialize<'de> for Schema<F>
where
    F: NamedField + Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw<F> {
            fields: Vec<F>,
        }
        let raw = Raw::<F>::deserialize(deserializer)?;
        Schema::new(raw.fields).map_err(serde::de::Error::custom)
    }
}

/// Submitted search criteria, validated against a search schema.
#[derive(Debug, Clone)]
pub struct Query {
    schema: Arc<SearchSchema>,
    values: BTreeMap<String, FieldValue>,
}

impl Query {
    pub fn new(schema: Arc<SearchSchema>) -> Self {
        Query {
            schema,
            values: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &SearchSchema {
        &self.schema
    }

    /// Stored value for `name`, `None` if nothing was submitted.
    pub fn get_criterion_value(&self, name: &str) -> Result<Option<&FieldValue>> {
        self.check_field(name)?;
        Ok(self.values.get(name))
    }

    pub fn set_criterion_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.check_field(name)?;
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    /// The full-text query string, empty when absent or not text.
    pub fn fulltext(&self) -> &str {
        self.values
            .get(FULLTEXT_FIELD)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    fn check_field(&self, name: &str) -> Result<()> {
        if self.schema.has_field(name) {
            Ok(())
        } else {
            Err(FindError::UnknownField(name.to_string()))
        }
    }
}
