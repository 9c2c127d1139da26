pub mod envelope;
pub mod memory;
pub mod traits;

pub use envelope::ApiEnvelope;
pub use traits::{DocumentFetch, DocumentStore, ProductLookup, SequenceProvider, WarehouseDirectory};
