pub mod http;
pub mod source;

pub use http::{ClientConfig, HttpMetadataClient};
pub use source::MetadataSource;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("not found")]
    NotFound,
}
