// src/gateway/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Product, Warehouse},
    models::document::{DocumentDraft, DocumentKind, SourceDocument},
};

use super::traits::{DocumentFetch, DocumentStore, ProductLookup, SequenceProvider, WarehouseDirectory};

// Implementações em memória dos serviços externos, para testes e para o
// binário de demonstração. Fazem o papel do backend REST sem rede.

// --- Catálogo ---

pub struct InMemoryCatalog {
    products: Vec<Product>,
    warehouses: Vec<Warehouse>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>, warehouses: Vec<Warehouse>) -> Self {
        Self {
            products,
            warehouses,
        }
    }
}

impl ProductLookup for InMemoryCatalog {
    fn resolve(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.products.iter().find(|p| p.id == product_id).cloned())
    }

    fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.clone())
    }
}

impl WarehouseDirectory for InMemoryCatalog {
    fn list_ordered(&self) -> Result<Vec<Warehouse>, AppError> {
        Ok(self.warehouses.clone())
    }
}

// --- Sequenciador ---

/// Contador por espécie: REC-0001, REC-0002, ...
pub struct SequenceCounter {
    counters: Mutex<HashMap<&'static str, u32>>,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceProvider for SequenceCounter {
    fn next_number(&self, kind: DocumentKind) -> Result<String, AppError> {
        let mut counters = self
            .counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let counter = counters.entry(kind.number_prefix()).or_insert(0);
        *counter += 1;
        Ok(format!("{}-{:04}", kind.number_prefix(), counter))
    }
}

// --- Documentos ---

/// Guarda documentos submetidos e serve como origem de conversões.
/// Criar um documento com vínculo marca a origem como já convertida,
/// tirando-a da lista de origens disponíveis.
pub struct InMemoryDocuments {
    documents: Mutex<Vec<SourceDocument>>,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
        }
    }

    fn draft_to_document(draft: &DocumentDraft) -> SourceDocument {
        SourceDocument {
            id: draft.id,
            kind: draft.kind,
            number: draft.number.clone(),
            vendor_id: draft.vendor_id,
            notes: draft.notes.clone(),
            items: draft.items.clone(),
            source: draft.source,
            has_linked_downstream: false,
        }
    }
}

impl Default for InMemoryDocuments {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentFetch for InMemoryDocuments {
    fn fetch(&self, kind: DocumentKind, id: Uuid) -> Result<SourceDocument, AppError> {
        let documents = self
            .documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        documents
            .iter()
            .find(|d| d.kind == kind && d.id == id)
            .cloned()
            .ok_or(AppError::DocumentNotFound)
    }

    fn list(&self, kind: DocumentKind) -> Result<Vec<SourceDocument>, AppError> {
        let documents = self
            .documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(documents.iter().filter(|d| d.kind == kind).cloned().collect())
    }
}

impl DocumentStore for InMemoryDocuments {
    fn create(&self, draft: &DocumentDraft) -> Result<Uuid, AppError> {
        let mut documents = self
            .documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Registra a conversão na origem
        if let Some(source) = draft.source {
            if let Some(upstream) = documents
                .iter_mut()
                .find(|d| d.kind == source.kind && d.id == source.id)
            {
                upstream.has_linked_downstream = true;
            }
        }

        documents.push(Self::draft_to_document(draft));
        Ok(draft.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn sequence_counter_is_independent_per_kind() {
        let sequences = SequenceCounter::new();

        assert_eq!(
            sequences.next_number(DocumentKind::Quotation).unwrap(),
            "ORC-0001"
        );
        assert_eq!(
            sequences.next_number(DocumentKind::Quotation).unwrap(),
            "ORC-0002"
        );
        assert_eq!(
            sequences.next_number(DocumentKind::GoodsReceipt).unwrap(),
            "REC-0001"
        );
    }

    #[test]
    fn creating_linked_document_marks_source_as_converted() {
        let store = InMemoryDocuments::new();
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let mut order = DocumentDraft::empty(
            DocumentKind::PurchaseOrder,
            "PED-0001".to_string(),
            date,
        );
        order.vendor_id = Some(Uuid::new_v4());
        store.create(&order).unwrap();

        let mut receipt = DocumentDraft::empty(
            DocumentKind::GoodsReceipt,
            "REC-0001".to_string(),
            date,
        );
        receipt.source = Some(crate::models::document::SourceRef {
            kind: DocumentKind::PurchaseOrder,
            id: order.id,
        });
        store.create(&receipt).unwrap();

        let fetched = store.fetch(DocumentKind::PurchaseOrder, order.id).unwrap();
        assert!(fetched.has_linked_downstream);
    }

    #[test]
    fn catalog_resolves_product_by_id() {
        let cimento = Product {
            id: Uuid::new_v4(),
            sku: "CIM-001".to_string(),
            name: "Cimento CP-II 50kg".to_string(),
            description: None,
            purchase_price: Some("32.90".parse().unwrap()),
            created_at: None,
        };
        let catalog = InMemoryCatalog::new(vec![cimento.clone()], Vec::new());

        let found = catalog.resolve(cimento.id).unwrap();
        assert_eq!(found.map(|p| p.sku), Some("CIM-001".to_string()));

        let missing = catalog.resolve(Uuid::new_v4()).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn fetch_unknown_document_is_not_found() {
        let store = InMemoryDocuments::new();
        let result = store.fetch(DocumentKind::PurchaseBill, Uuid::new_v4());
        assert!(matches!(result, Err(AppError::DocumentNotFound)));
    }
}
