mod jsonapi_payload;

pub use jsonapi_payload::{JsonApiPayload, ResourceAttributes};
