//! Core types shared across the crate.

pub mod error;
pub mod request;
pub mod response;

pub use error::{Error, Result};
pub use request::Request;
pub use response::{BufferedResponse, ResponseSink};
