//! Purpose: Shared core library crate used by the `flatform` CLI and tests.
//! Exports: `core` (scanner, field/object parsers, schema registry, errors),
//! `load` (file/stdin buffering), `api` (the stable caller-facing surface).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
pub mod load;
