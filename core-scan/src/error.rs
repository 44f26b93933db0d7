use bridge_traits::error::BridgeError;
use core_catalog::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Not scanning {path}, it's not a subdirectory of a defined root folder")]
    UnmanagedLocation { path: String },

    #[error("Capability missing: {capability}")]
    CapabilityMissing { capability: String },

    #[error("Decision making failed: {0}")]
    Decision(String),

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
