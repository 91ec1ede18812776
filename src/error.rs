use std::io;

use thiserror::Error;

use crate::Address;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("address {address} is outside main memory (size {size})")]
    AddressOutOfRange { address: Address, size: usize },

    #[error("negative address {0} rejected")]
    NegativeAddress(i64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
