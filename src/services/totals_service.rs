// src/services/totals_service.rs

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    config::{EngineSettings, NegativeAmountPolicy},
    models::catalog::Product,
    models::document::{DocumentKind, DocumentTotals, ItemEdit, LineItem},
};

/// Motor de totais por linha e por documento. Computação pura: nenhuma
/// operação falha, bloqueia ou toca estado global.
#[derive(Clone)]
pub struct TotalsService {
    settings: EngineSettings,
}

impl TotalsService {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Converte a entrada bruta da tela em `Decimal`. Valor não numérico
    /// degrada silenciosamente para zero; nunca é erro nem vai para o log.
    fn parse_or_zero(&self, raw: &str) -> Decimal {
        let value = raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
        self.apply_negative_policy(value)
    }

    fn apply_negative_policy(&self, value: Decimal) -> Decimal {
        match self.settings.negative_amounts {
            NegativeAmountPolicy::Allow => value,
            NegativeAmountPolicy::ClampToZero => {
                if value < Decimal::ZERO {
                    Decimal::ZERO
                } else {
                    value
                }
            }
        }
    }

    /// Fórmula da linha: (quantidade × preço − desconto) + imposto sobre
    /// a base descontada.
    pub fn line_total(
        &self,
        quantity: Decimal,
        rate: Decimal,
        discount: Decimal,
        tax_rate: Decimal,
    ) -> Decimal {
        let taxable = quantity * rate - discount;
        taxable + (taxable * tax_rate / Decimal::ONE_HUNDRED)
    }

    /// Aplica uma edição de campo sobre uma cópia da linha e recalcula o
    /// `total` quando o campo alterado afeta o valor. Selecionar um
    /// produto preenche preço e descrição a partir do catálogo carregado.
    pub fn recompute_item(
        &self,
        item: &LineItem,
        edit: ItemEdit,
        products: &[Product],
    ) -> LineItem {
        let mut updated = item.clone();

        let affects_total = match edit {
            ItemEdit::Product(product_id) => {
                updated.product_id = product_id;
                if let Some(id) = product_id {
                    if let Some(product) = products.iter().find(|p| p.id == id) {
                        updated.rate = self
                            .apply_negative_policy(product.purchase_price.unwrap_or(Decimal::ZERO));
                        updated.description = product.description.clone().unwrap_or_default();
                    }
                }
                true
            }
            ItemEdit::Quantity(raw) => {
                updated.quantity = self.parse_or_zero(&raw);
                true
            }
            ItemEdit::Rate(raw) => {
                updated.rate = self.parse_or_zero(&raw);
                true
            }
            ItemEdit::Discount(raw) => {
                updated.discount = self.parse_or_zero(&raw);
                true
            }
            ItemEdit::TaxRate(raw) => {
                updated.tax_rate = self.parse_or_zero(&raw);
                true
            }
            ItemEdit::Warehouse(warehouse_id) => {
                updated.warehouse_id = warehouse_id;
                false
            }
            ItemEdit::Description(description) => {
                updated.description = description;
                false
            }
        };

        if affects_total {
            updated.total = self.line_total(
                updated.quantity,
                updated.rate,
                updated.discount,
                updated.tax_rate,
            );
        }

        updated
    }

    /// Agrega a lista de linhas do documento. A contribuição de imposto
    /// de cada linha é recalculada a partir dos componentes, então o
    /// resultado é consistente mesmo com `total` armazenado defasado.
    pub fn compute_totals(&self, items: &[LineItem]) -> DocumentTotals {
        let mut totals = DocumentTotals::zero();

        for item in items {
            let gross = item.quantity * item.rate;
            let taxable = gross - item.discount;
            let tax = taxable * item.tax_rate / Decimal::ONE_HUNDRED;

            totals.sub_total += gross;
            totals.discount += item.discount;
            totals.tax += tax;
            totals.total += taxable + tax;
        }

        totals
    }

    /// Acrescenta uma linha zerada (quantidade 1) e devolve o id dela.
    pub fn add_line(&self, items: &mut Vec<LineItem>) -> Uuid {
        let item = LineItem::new();
        let id = item.id;
        items.push(item);
        id
    }

    /// Remove a linha indicada. Para espécies com piso de uma linha a
    /// remoção da última é no-op, garantindo documento nunca vazio.
    pub fn remove_line(&self, kind: DocumentKind, items: &mut Vec<LineItem>, id: Uuid) {
        if kind.enforces_line_floor() && items.len() <= 1 {
            return;
        }
        items.retain(|item| item.id != id);
    }

    /// Arredondamento de exibição (o motor nunca arredonda internamente).
    pub fn round_money(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(
            self.settings.decimal_places,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}
