// src/config.rs

use std::env;

use crate::services::{DraftService, PropagationService, TotalsService};

/// Política para quantidade/preço/desconto/imposto negativos.
/// O comportamento herdado do produto é aceitar o valor e deixar a
/// aritmética propagar (linhas de correção); `ClampToZero` trava em zero
/// para implantações que preferem rejeitar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeAmountPolicy {
    Allow,
    ClampToZero,
}

/// Política do depósito padrão ao criar um Recebimento a partir de um
/// Pedido: usar o primeiro depósito carregado ou deixar em branco para
/// o usuário escolher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseDefaultPolicy {
    FirstAvailable,
    LeaveUnset,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Casas decimais para arredondamento de exibição (o motor calcula
    /// sempre com precisão exata de `Decimal`).
    pub decimal_places: u32,
    pub negative_amounts: NegativeAmountPolicy,
    pub default_warehouse: WarehouseDefaultPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            negative_amounts: NegativeAmountPolicy::Allow,
            default_warehouse: WarehouseDefaultPolicy::FirstAvailable,
        }
    }
}

impl EngineSettings {
    /// Carrega as políticas do ambiente (.env quando presente).
    /// Valor ausente ou irreconhecível cai no padrão.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let decimal_places = env::var("MONEY_DECIMAL_PLACES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let negative_amounts = match env::var("NEGATIVE_AMOUNTS").as_deref() {
            Ok("CLAMP") => NegativeAmountPolicy::ClampToZero,
            _ => NegativeAmountPolicy::Allow,
        };

        let default_warehouse = match env::var("DEFAULT_WAREHOUSE").as_deref() {
            Ok("NONE") => WarehouseDefaultPolicy::LeaveUnset,
            _ => WarehouseDefaultPolicy::FirstAvailable,
        };

        tracing::info!(
            decimal_places,
            "✅ Configurações do motor de compras carregadas"
        );

        Self {
            decimal_places,
            negative_amounts,
            default_warehouse,
        }
    }
}

#[derive(Clone)]
pub struct EngineState {
    pub settings: EngineSettings,
    pub totals_service: TotalsService,
    pub propagation_service: PropagationService,
    pub draft_service: DraftService,
}

impl EngineState {
    pub fn new(settings: EngineSettings) -> Self {
        // --- Monta o gráfico de dependências ---
        let totals_service = TotalsService::new(settings.clone());
        let propagation_service =
            PropagationService::new(totals_service.clone(), settings.clone());
        let draft_service =
            DraftService::new(totals_service.clone(), propagation_service.clone());

        Self {
            settings,
            totals_service,
            propagation_service,
            draft_service,
        }
    }

    pub fn from_env() -> Self {
        Self::new(EngineSettings::from_env())
    }
}
