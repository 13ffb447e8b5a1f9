//! Domain model (bins, status values, history records, errors).

pub mod bin;
pub mod errors;
pub mod ids;
pub mod status;
pub mod status_update;
pub mod timestamp;

pub use bin::{Bin, BinId};
pub use errors::{
    BIN_ID_REQUIRED, BIN_NOT_FOUND, DomainError, DomainResult, ErrorKind, INVALID_STATUS,
};
pub use ids::{ParseIdError, StatusUpdateId};
pub use status::BinStatus;
pub use status_update::{StatusUpdate, StatusUpdateRequest, ValidatedStatusUpdate};
