pub mod catalog;
pub mod document;

pub use catalog::{Product, Warehouse};
pub use document::{
    DocumentDraft, DocumentKind, DocumentMeta, DocumentStatus, DocumentTotals, ItemEdit, LineItem,
    SourceDocument, SourceRef,
};
