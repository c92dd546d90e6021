//! Core module containing the building blocks shared by every collection

pub mod error;
pub mod extractors;
pub mod id;
pub mod pipeline;
pub mod store;

pub use error::{ApiError, ApiResult, EntityKind, ErrorResponse};
pub use extractors::{DataEnvelope, Payload};
pub use id::{IdentifierSource, RandomIdSource, SequentialIdSource};
pub use pipeline::{Pipeline, Stage, StageResult};
pub use store::{Record, RecordStore, SharedStore};
