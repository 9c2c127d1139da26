// src/services/draft_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    gateway::traits::{DocumentStore, SequenceProvider},
    models::document::{DocumentDraft, DocumentKind, DocumentStatus, SourceDocument},
    services::propagation_service::{MappingContext, PropagationService},
    services::totals_service::TotalsService,
};

/// Ciclo de vida do rascunho: criação (direta ou por conversão),
/// submissão com validação e filtro de origens disponíveis.
///
/// Cada rascunho pertence exclusivamente à tela que o edita; a conversão
/// faz cópia única, nunca referência viva.
#[derive(Clone)]
pub struct DraftService {
    totals: TotalsService,
    propagation: PropagationService,
}

impl DraftService {
    pub fn new(totals: TotalsService, propagation: PropagationService) -> Self {
        Self {
            totals,
            propagation,
        }
    }

    /// Rascunho novo criado direto (sem origem), com o número reservado
    /// no sequenciador e uma linha inicial para as espécies com itens.
    pub fn new_draft(
        &self,
        kind: DocumentKind,
        sequences: &dyn SequenceProvider,
    ) -> Result<DocumentDraft, AppError> {
        let number = sequences.next_number(kind)?;
        let mut draft = DocumentDraft::empty(kind, number, Utc::now().date_naive());

        if kind.has_line_items() {
            self.totals.add_line(&mut draft.items);
        }

        Ok(draft)
    }

    /// Rascunho derivado de um documento de origem: metadados copiados,
    /// linhas mapeadas e totais recalculados, tudo em um passo.
    pub fn draft_from_source(
        &self,
        source: &SourceDocument,
        target_kind: DocumentKind,
        ctx: &MappingContext,
        sequences: &dyn SequenceProvider,
    ) -> Result<DocumentDraft, AppError> {
        let meta = self
            .propagation
            .derive_document_meta(source, target_kind, sequences)?;

        let mut draft = DocumentDraft::empty(target_kind, meta.number, Utc::now().date_naive());
        draft.vendor_id = meta.vendor_id;
        draft.notes = meta.notes;
        draft.source = meta.source;
        draft.amount = meta.seeded_amount;

        if target_kind.has_line_items() {
            draft.items = self.propagation.map_items_from_source(
                &source.items,
                source.kind,
                target_kind,
                ctx,
            );
        }

        tracing::info!(
            source_number = %source.number,
            target_number = %draft.number,
            "Documento derivado por conversão"
        );

        Ok(draft)
    }

    /// Submete o rascunho: validação derivada, validação de consistência
    /// por espécie e checagem de total positivo; só então entrega ao
    /// serviço de persistência e transiciona para `Submitted`.
    ///
    /// Em qualquer falha o rascunho fica intocado, pronto para correção
    /// e nova tentativa.
    pub fn submit(
        &self,
        draft: &mut DocumentDraft,
        store: &dyn DocumentStore,
    ) -> Result<Uuid, AppError> {
        if draft.status != DocumentStatus::Draft {
            return Err(AppError::InvalidStatusTransition(format!(
                "{:?} -> Submitted",
                draft.status
            )));
        }

        // Validação padrão do Validator
        draft.validate()?;

        // Nossa validação de consistência manual
        draft
            .validate_consistency()
            .map_err(|e| AppError::field_error("items", e))?;

        // Documento de itens não pode ser submetido com total não positivo
        if draft.kind.has_line_items() {
            let totals = self.totals.compute_totals(&draft.items);
            if totals.total <= Decimal::ZERO {
                let mut err = ValidationError::new("InvalidAmount");
                err.message = Some("O total do documento deve ser positivo.".into());
                return Err(AppError::field_error("total", err));
            }
        }

        let id = store.create(draft)?;
        draft.status = DocumentStatus::Submitted;

        tracing::info!(number = %draft.number, kind = ?draft.kind, "Documento submetido");

        Ok(id)
    }

    /// Origens disponíveis para conversão: documentos que ainda não têm
    /// derivado vinculado. Pré-condição calculada na listagem, não um
    /// status gravado.
    pub fn available_sources(&self, documents: Vec<SourceDocument>) -> Vec<SourceDocument> {
        documents
            .into_iter()
            .filter(|d| !d.has_linked_downstream)
            .collect()
    }
}
