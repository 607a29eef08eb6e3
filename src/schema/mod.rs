//! Schema system - document contracts and validation

pub mod registry;
pub mod validator;

pub use registry::SchemaRegistry;
pub use validator::{ValidationFailure, Validator};
