#![forbid(unsafe_code)]

//! Swagger 2.0 schema graph, type registry and operation model.
//!
//! A raw spec document is loaded once into a [`SpecDocument`]: every schema fragment becomes a
//! node in an immutable [`SchemaGraph`], every `path × method` pair becomes an [`Operation`].
//! Nodes convert values between their wire (JSON) form and [`NativeValue`] and validate native
//! values, collecting every failure into a [`ValidationError`] tree.

pub mod error;
pub mod naming;
pub mod operation;
pub mod schema;
pub mod spec;
pub mod types;
pub mod value;

pub use crate::error::{
    ConversionError, ErrorCode, ErrorCollector, ErrorLeaf, RefError, SpecError, ValidationError,
};
pub use crate::operation::{CallSignature, HttpMethod, Operation, Parameter, ParameterLocation};
pub use crate::schema::{Node, NodeChildren, NodeId, SchemaGraph, SchemaNode};
pub use crate::spec::{
    meta_spec_url, parse_spec_str, spec_url, DocumentFormat, LoadOptions, SpecDocument, SpecInfo,
    SPEC_PRESETS,
};
pub use crate::types::{NativeType, SchemaKind};
pub use crate::value::NativeValue;
