// Core modules implementing scanning, field/object parsing, and error modeling.
pub mod error;
pub mod field;
pub mod object;
pub mod scan;
pub mod schema;
