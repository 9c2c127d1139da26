// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Sem variante fatal: falha de parse numérico NUNCA vira erro (o valor
// degrada para zero dentro do motor de totais).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Documento não encontrado")]
    DocumentNotFound,

    #[error("Transição de status inválida: {0}")]
    InvalidStatusTransition(String),

    // Falhas de rede/persistência chegam aqui já traduzidas pelo
    // serviço externo; o rascunho do chamador fica preservado.
    #[error("Falha no serviço externo: {0}")]
    GatewayError(String),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Monta um `ValidationErrors` manual com um único erro de campo,
    /// mantendo o padrão de resposta da validação derivada.
    pub fn field_error(field: &'static str, error: validator::ValidationError) -> Self {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, error);
        AppError::ValidationError(errors)
    }
}
