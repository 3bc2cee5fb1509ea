//! Purpose: Define the stable public Rust API boundary for flatform.
//! Exports: Schema declaration, parsing entry points, loading, and errors.
//! Role: Public, additive-only surface; callers should not reach into `core`.
//! Invariants: This module is the only supported path to the parser internals.
//! Invariants: A schema instance is parsed against one buffer per pass; reuse
//! without re-declaring yields `DuplicateField` for re-encountered keys.

use std::path::Path;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::object::{ParseOutcome, parse_object};
pub use crate::core::schema::{Schema, SchemaField, ValueType};
pub use crate::load::{LoadOptions, load, load_stdin};

/// Load `path` and parse its contents as one flat object against `schema`.
///
/// After `Ok`, each declared field either carries its resolved value or is
/// unresolved because the key was absent from the input; absence is for the
/// caller to check, not an error.
pub fn parse_file(
    schema: &mut Schema,
    path: &Path,
    options: &LoadOptions,
) -> Result<ParseOutcome, Error> {
    let content = load(path, options)?;
    parse_object(schema, &content, 0)
}
