// src/models/document.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    Quotation,     // Orçamento / Cotação
    PurchaseOrder, // Pedido de Compra
    GoodsReceipt,  // Recebimento (GRN)
    PurchaseBill,  // Fatura de Compra
    PurchaseReturn, // Devolução
    Payment,       // Pagamento
}

impl DocumentKind {
    /// Pagamento é o único documento sem linhas de itens.
    pub fn has_line_items(&self) -> bool {
        !matches!(self, DocumentKind::Payment)
    }

    /// Cotação, Pedido e Fatura precisam manter ao menos uma linha;
    /// Recebimento e Devolução podem ficar vazios.
    pub fn enforces_line_floor(&self) -> bool {
        matches!(
            self,
            DocumentKind::Quotation | DocumentKind::PurchaseOrder | DocumentKind::PurchaseBill
        )
    }

    /// Prefixo usado na numeração sequencial de cada espécie.
    pub fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "ORC",
            DocumentKind::PurchaseOrder => "PED",
            DocumentKind::GoodsReceipt => "REC",
            DocumentKind::PurchaseBill => "FAT",
            DocumentKind::PurchaseReturn => "DEV",
            DocumentKind::Payment => "PAG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Editável; totais recalculados a cada edição.
    Draft,
    /// Criado no serviço de persistência; imutável por este núcleo.
    Submitted,
    /// Já serviu de origem para um documento seguinte. Estado conceitual:
    /// o núcleo nunca grava este valor, apenas filtra origens pelo
    /// vínculo (`has_linked_downstream`).
    Converted,
}

/// Vínculo unidirecional com o documento de origem. Cópia única na
/// criação; editar a origem depois NÃO altera o documento derivado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub kind: DocumentKind,
    pub id: Uuid,
}

// --- Linhas de item ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
    pub description: String,
    pub quantity: Decimal,
    /// Preço unitário; preenchido do preço de compra do produto quando
    /// o produto é selecionado.
    pub rate: Decimal,
    /// Desconto em valor monetário fixo (não percentual), abatido antes
    /// do imposto.
    pub discount: Decimal,
    /// Percentual de imposto (0-100 conceitualmente, sem trava).
    pub tax_rate: Decimal,
    /// Derivado: sempre recalculado, nunca editável diretamente.
    pub total: Decimal,
    /// Só em Recebimento: quantidade pedida, mantida como referência
    /// enquanto `quantity` guarda a quantidade efetivamente recebida.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_quantity: Option<Decimal>,
}

impl LineItem {
    /// Linha nova de um rascunho: quantidade 1, demais valores zerados.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: None,
            warehouse_id: None,
            description: String::new(),
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            total: Decimal::ZERO,
            ordered_quantity: None,
        }
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new()
    }
}

/// Edição de um campo de linha vinda da tela. Campos numéricos chegam
/// como texto bruto; valor não numérico degrada para zero no motor.
#[derive(Debug, Clone)]
pub enum ItemEdit {
    Product(Option<Uuid>),
    Warehouse(Option<Uuid>),
    Quantity(String),
    Rate(String),
    Discount(String),
    TaxRate(String),
    Description(String),
}

// --- Totais do documento ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Σ quantidade × preço, sem desconto nem imposto.
    pub sub_total: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    /// Invariante: total == subTotal - discount + tax.
    pub total: Decimal,
}

impl DocumentTotals {
    pub fn zero() -> Self {
        Self {
            sub_total: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

// --- Rascunho de documento ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub status: DocumentStatus,

    #[validate(length(min = 1, message = "O número do documento é obrigatório."))]
    pub number: String,

    #[validate(required(message = "O campo 'vendorId' é obrigatório."))]
    pub vendor_id: Option<Uuid>,

    pub date: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,

    /// Origem da conversão, quando o rascunho foi derivado de outro
    /// documento; `None` quando criado direto.
    pub source: Option<SourceRef>,

    // Campos estruturados de logística (apenas Recebimento). Antes
    // viviam serializados dentro de `notes` como "Vehicle: X / ...".
    pub vehicle_no: Option<String>,
    pub manual_ref: Option<String>,
    pub logistics_note: Option<String>,
    pub remarks: Option<String>,

    /// Apenas Pagamento: valor, semeado do total da fatura de origem.
    pub amount: Option<Decimal>,
}

impl DocumentDraft {
    /// Rascunho vazio de uma espécie, com o número já reservado.
    pub fn empty(kind: DocumentKind, number: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            status: DocumentStatus::Draft,
            number,
            vendor_id: None,
            date,
            notes: None,
            items: Vec::new(),
            source: None,
            vehicle_no: None,
            manual_ref: None,
            logistics_note: None,
            remarks: None,
            amount: None,
        }
    }

    /// Validação de consistência por espécie, complementando a validação
    /// derivada (que cobre campos obrigatórios comuns).
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        if self.kind.has_line_items() {
            // Regra: documento de itens precisa de ao menos uma linha.
            if self.items.is_empty() {
                return Err(ValidationError::new("AtLeastOneItemRequired"));
            }

            // Regra: toda linha precisa de produto resolvido. Linhas que
            // a conversão não conseguiu casar chegam aqui com `None` e
            // barram a submissão até correção manual.
            if self.items.iter().any(|item| item.product_id.is_none()) {
                let mut err = ValidationError::new("ProductRequired");
                err.message = Some("Produto é obrigatório em todos os itens.".into());
                return Err(err);
            }

            // Regra: Recebimento exige depósito em todas as linhas.
            if self.kind == DocumentKind::GoodsReceipt
                && self.items.iter().any(|item| item.warehouse_id.is_none())
            {
                let mut err = ValidationError::new("WarehouseRequired");
                err.message = Some("Depósito é obrigatório em todos os itens.".into());
                return Err(err);
            }
        } else {
            // Regra: Pagamento precisa de valor positivo.
            match self.amount {
                Some(amount) if amount > Decimal::ZERO => {}
                _ => {
                    let mut err = ValidationError::new("InvalidAmount");
                    err.message = Some("O valor do pagamento deve ser positivo.".into());
                    return Err(err);
                }
            }
        }

        Ok(())
    }
}

/// Metadados derivados da origem ao criar um documento por conversão.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub number: String,
    pub vendor_id: Option<Uuid>,
    pub notes: Option<String>,
    pub source: Option<SourceRef>,
    /// Só para Pagamento: total geral da fatura de origem.
    pub seeded_amount: Option<Decimal>,
}

/// Documento de origem já carregado pelo serviço de busca, incluindo o
/// vínculo com a origem dele (para resolução de preço em múltiplos
/// saltos) e o indicador de conversão já realizada.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub number: String,
    pub vendor_id: Option<Uuid>,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
    pub source: Option<SourceRef>,
    /// Já existe documento derivado deste? Quando sim, ele sai da lista
    /// de origens disponíveis para conversão.
    #[serde(default)]
    pub has_linked_downstream: bool,
}
