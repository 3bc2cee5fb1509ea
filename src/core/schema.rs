//! Purpose: Hold the caller-declared schema and the per-parse resolution state.
//! Exports: `Schema`, `SchemaField`, `ValueType`.
//! Role: Append-only field registry; the object parser writes resolved values here.
//! Invariants: Field names are unique; declaration order is preserved and indexable.
//! Invariants: A field's value slot is written at most once per parse pass.
use bstr::{BStr, BString};
use serde::Serialize;

use crate::core::error::{Error, ErrorKind};

/// Expected value type for a declared field. The accepted grammar only
/// produces strings; `Object` is declared metadata carried for callers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Object,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaField {
    name: BString,
    expected: ValueType,
    value: Option<BString>,
}

impl SchemaField {
    pub fn name(&self) -> &BStr {
        self.name.as_ref()
    }

    pub fn expected(&self) -> ValueType {
        self.expected
    }

    /// Resolved value, or `None` if the key was absent from the input.
    /// Absence after a successful parse is a valid outcome, not an error.
    pub fn value(&self) -> Option<&BStr> {
        self.value.as_deref().map(BStr::new)
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<SchemaField>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare an expected field. Declaration happens before parsing; names
    /// must be unique within one schema.
    pub fn declare(&mut self, name: impl Into<BString>, expected: ValueType) -> Result<(), Error> {
        let name = name.into();
        if self.find(&name).is_some() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("field {name:?} already declared")));
        }
        if self.fields.len() == self.fields.capacity() {
            let grow = self.fields.capacity().max(1);
            self.fields.try_reserve(grow).map_err(|err| {
                Error::new(ErrorKind::Allocation)
                    .with_message("failed to grow schema field storage")
                    .with_source(err)
            })?;
        }
        self.fields.push(SchemaField {
            name,
            expected,
            value: None,
        });
        Ok(())
    }

    /// Linear scan, length first then bytes. Schemas are small and declared
    /// once, so no index structure is kept.
    pub fn find(&self, name: &[u8]) -> Option<usize> {
        self.fields.iter().position(|field| {
            field.name.len() == name.len() && field.name.as_slice() == name
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field by declaration index.
    pub fn field(&self, index: usize) -> Option<&SchemaField> {
        self.fields.get(index)
    }

    pub fn fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter()
    }

    /// Resolved value by name.
    pub fn value(&self, name: &[u8]) -> Option<&BStr> {
        self.find(name)
            .and_then(|index| self.fields[index].value())
    }

    /// Bind a parsed value into the slot at `index`. `DuplicateField` if the
    /// slot was already resolved during this parse pass.
    pub(crate) fn resolve(&mut self, index: usize, value: BString) -> Result<(), Error> {
        let field = &mut self.fields[index];
        if field.value.is_some() {
            return Err(Error::new(ErrorKind::DuplicateField)
                .with_message(format!("duplicate field {:?}", field.name)));
        }
        field.value = Some(value);
        Ok(())
    }
}
