#![forbid(unsafe_code)]

//! Turns typed call arguments into transport-ready requests and raw responses back into
//! native values, for operations of a loaded [`esi_core::SpecDocument`].
//!
//! Nothing here performs I/O: the caller's transport sends a [`PreparedRequest`] and hands the
//! raw status, headers and body to [`process_response`].

pub mod call;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use crate::call::{check_scopes, marshal, CallArgs, RequestParts};
pub use crate::config::{CallOptions, ClientConfig, DEFAULT_HOST, DEFAULT_USER_AGENT};
pub use crate::error::{CallError, ResponseError, ScopeRequired};
pub use crate::request::{prepare_call, PreparedRequest};
pub use crate::response::{process_response, ApiResponse, HttpResponseParts, ResponseBody};
