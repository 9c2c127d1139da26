// src/services/propagation_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::{EngineSettings, WarehouseDefaultPolicy},
    gateway::traits::SequenceProvider,
    models::catalog::{Product, Warehouse},
    models::document::{DocumentKind, DocumentMeta, LineItem, SourceDocument, SourceRef},
    services::totals_service::TotalsService,
};

/// Listas já carregadas pelos serviços externos, entregues prontas ao
/// mapeamento. `order_items` traz as linhas do Pedido de Compra original
/// quando a conversão precisa resolver preço em dois saltos
/// (Recebimento → Fatura).
pub struct MappingContext<'a> {
    pub products: &'a [Product],
    pub warehouses: &'a [Warehouse],
    pub order_items: Option<&'a [LineItem]>,
}

/// Modelo de propagação: cópia única e determinística de campos da
/// origem para o rascunho derivado. Depois da criação não existe vínculo
/// vivo; editar a origem não altera o derivado.
#[derive(Clone)]
pub struct PropagationService {
    totals: TotalsService,
    settings: EngineSettings,
}

impl PropagationService {
    pub fn new(totals: TotalsService, settings: EngineSettings) -> Self {
        Self { totals, settings }
    }

    /// Mapeia as linhas da origem para linhas novas do documento alvo.
    ///
    /// Regras, na ordem:
    /// 1. `product_id` copiado; se o id não está no catálogo carregado,
    ///    tenta casar pela descrição/nome; sem correspondência a linha
    ///    fica sem produto (a submissão vai barrar).
    /// 2. Depósito copiado quando presente; para Recebimento, a política
    ///    do depósito padrão pode preencher com o primeiro da lista.
    /// 3. Recebimento: quantidade pedida e recebida iniciam iguais.
    /// 4. Preço/imposto/desconto vêm da origem imediata, EXCETO na
    ///    conversão Recebimento → Fatura: o Recebimento não carrega
    ///    preço, então o valor vem da linha correspondente do Pedido
    ///    original, com fallback para o que a linha do Recebimento tiver.
    /// 5. `total` sempre recalculado; nunca confiado da origem.
    pub fn map_items_from_source(
        &self,
        source_items: &[LineItem],
        source_kind: DocumentKind,
        target_kind: DocumentKind,
        ctx: &MappingContext,
    ) -> Vec<LineItem> {
        source_items
            .iter()
            .map(|src| self.map_item(src, source_kind, target_kind, ctx))
            .collect()
    }

    fn map_item(
        &self,
        src: &LineItem,
        source_kind: DocumentKind,
        target_kind: DocumentKind,
        ctx: &MappingContext,
    ) -> LineItem {
        let product_id = self.resolve_product(src, ctx.products);
        if product_id.is_none() {
            tracing::warn!(
                source_item = %src.id,
                description = %src.description,
                "Produto da linha de origem não resolvido; linha exigirá correção manual"
            );
        }

        let warehouse_id = match src.warehouse_id {
            Some(id) => Some(id),
            None if target_kind == DocumentKind::GoodsReceipt => self.default_warehouse(ctx),
            None => None,
        };

        let (rate, tax_rate, discount) = self.resolve_pricing(src, product_id, source_kind, target_kind, ctx);

        let quantity = src.quantity;
        // Recebimento: quantidade pedida fica de referência, a recebida
        // parte igual e pode ser editada depois.
        let ordered_quantity = if target_kind == DocumentKind::GoodsReceipt {
            Some(src.quantity)
        } else {
            None
        };

        LineItem {
            id: Uuid::new_v4(),
            product_id,
            warehouse_id,
            description: src.description.clone(),
            quantity,
            rate,
            discount,
            tax_rate,
            total: self.totals.line_total(quantity, rate, discount, tax_rate),
            ordered_quantity,
        }
    }

    /// Correspondência primária pelo id no catálogo carregado; secundária
    /// pela descrição da linha contra nome/descrição do produto.
    fn resolve_product(&self, src: &LineItem, products: &[Product]) -> Option<Uuid> {
        if let Some(id) = src.product_id {
            if products.iter().any(|p| p.id == id) {
                return Some(id);
            }
        }

        if src.description.is_empty() {
            return None;
        }

        products
            .iter()
            .find(|p| {
                p.name.eq_ignore_ascii_case(&src.description)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.eq_ignore_ascii_case(&src.description))
            })
            .map(|p| p.id)
    }

    fn default_warehouse(&self, ctx: &MappingContext) -> Option<Uuid> {
        match self.settings.default_warehouse {
            WarehouseDefaultPolicy::LeaveUnset => None,
            WarehouseDefaultPolicy::FirstAvailable => ctx.warehouses.first().map(|warehouse| {
                tracing::warn!(
                    warehouse = %warehouse.name,
                    "Depósito padrão aplicado na linha do Recebimento"
                );
                warehouse.id
            }),
        }
    }

    fn resolve_pricing(
        &self,
        src: &LineItem,
        product_id: Option<Uuid>,
        source_kind: DocumentKind,
        target_kind: DocumentKind,
        ctx: &MappingContext,
    ) -> (Decimal, Decimal, Decimal) {
        let grn_to_bill = source_kind == DocumentKind::GoodsReceipt
            && target_kind == DocumentKind::PurchaseBill;

        if grn_to_bill {
            let matched = ctx.order_items.and_then(|items| {
                items
                    .iter()
                    .find(|order_item| order_item.product_id.is_some() && order_item.product_id == product_id)
            });
            if let Some(order_item) = matched {
                return (order_item.rate, order_item.tax_rate, order_item.discount);
            }
        }

        (src.rate, src.tax_rate, src.discount)
    }

    /// Deriva os metadados do documento novo a partir da origem: vendor e
    /// notas copiados, número novo reservado no sequenciador (nunca o da
    /// origem) e o vínculo unidirecional registrado. Para Pagamento, o
    /// total geral da fatura vira o valor semeado.
    pub fn derive_document_meta(
        &self,
        source: &SourceDocument,
        target_kind: DocumentKind,
        sequences: &dyn SequenceProvider,
    ) -> Result<DocumentMeta, AppError> {
        let number = sequences.next_number(target_kind)?;

        let seeded_amount = if target_kind == DocumentKind::Payment {
            Some(self.totals.compute_totals(&source.items).total)
        } else {
            None
        };

        Ok(DocumentMeta {
            number,
            vendor_id: source.vendor_id,
            notes: source.notes.clone(),
            source: Some(SourceRef {
                kind: source.kind,
                id: source.id,
            }),
            seeded_amount,
        })
    }
}
