//! Error types for chef workers.

use thiserror::Error;

use crate::floor::FloorError;
use crate::model::ChefId;

/// Errors that stop a chef worker.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChefError {
    /// A coordinator handshake with a customer failed.
    #[error("Chef {chef}: {source}")]
    Floor {
        chef: ChefId,
        #[source]
        source: FloorError,
    },
}
