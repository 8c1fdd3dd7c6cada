//! JSON-RPC Command Layer
//!
//! Exposes profile and config operations as JSON-RPC 2.0 methods.

pub mod handlers;
pub mod protocol;

pub use handlers::Dispatcher;
pub use protocol::{parse_request, Incoming, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
