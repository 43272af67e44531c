//! Transport boundary: JSON over HTTP/1.1

pub mod http;
pub mod wire;

pub use http::{
    handle_connection, read_request, route, DecisionServer, HttpRequest, HttpResponse,
    DEFAULT_IDLE_TIMEOUT,
};
pub use wire::{DecideResponse, SenseRequest};
