use std::io;
use thiserror::Error;

use crate::temperature::StoreError;

/// Failures that stop the service before or while serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("could not load temperatures: {source}")]
    Store {
        #[from]
        source: StoreError,
    },
    #[error("could not resolve listen address {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("listen address {host}:{port} did not resolve to any socket address")]
    InvalidAddress { host: String, port: u16 },
    #[error("a key file was given without a certificate file")]
    MissingCertificate,
    #[error("could not load tls certificate and key: {source}")]
    Tls {
        #[source]
        source: io::Error,
    },
    #[error("server stopped: {source}")]
    Serve {
        #[from]
        source: io::Error,
    },
}
