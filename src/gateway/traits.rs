// src/gateway/traits.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Product, Warehouse},
    models::document::{DocumentDraft, DocumentKind, SourceDocument},
};

// Contratos dos serviços externos que o núcleo consome. Tudo síncrono:
// o núcleo só opera sobre dados já resolvidos em memória; chamadas de
// rede (e seus timeouts/cancelamentos) ficam do lado de fora.

/// Catálogo de produtos.
pub trait ProductLookup {
    fn resolve(&self, product_id: Uuid) -> Result<Option<Product>, AppError>;
    fn list_all(&self) -> Result<Vec<Product>, AppError>;
}

/// Lista ordenada de depósitos; a ordem importa para a política do
/// "primeiro depósito disponível".
pub trait WarehouseDirectory {
    fn list_ordered(&self) -> Result<Vec<Warehouse>, AppError>;
}

/// Busca de documentos por espécie, já com o vínculo de origem de cada
/// um (para a resolução de preço em múltiplos saltos).
pub trait DocumentFetch {
    fn fetch(&self, kind: DocumentKind, id: Uuid) -> Result<SourceDocument, AppError>;
    fn list(&self, kind: DocumentKind) -> Result<Vec<SourceDocument>, AppError>;
}

/// Sequenciador de numeração por espécie de documento.
pub trait SequenceProvider {
    fn next_number(&self, kind: DocumentKind) -> Result<String, AppError>;
}

/// Persistência de documentos submetidos (endpoint de criação).
pub trait DocumentStore {
    fn create(&self, draft: &DocumentDraft) -> Result<Uuid, AppError>;
}
