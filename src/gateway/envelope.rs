// src/gateway/envelope.rs

use serde::Deserialize;

/// Envelope canônico das respostas do backend.
///
/// O contrato real é inconsistente: às vezes `{ "success": true,
/// "data": [...] }`, às vezes o array puro. A normalização acontece UMA
/// vez aqui, na borda; nenhum chamador volta a farejar o formato.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Wrapped {
        success: bool,
        #[serde(default = "Vec::new")]
        data: Vec<T>,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(Vec<T>),
}

impl<T> ApiEnvelope<T> {
    /// Extrai a lista de registros; envelope com `success: false` vira
    /// lista vazia (a mensagem fica disponível em `message()`).
    pub fn into_items(self) -> Vec<T> {
        match self {
            ApiEnvelope::Wrapped { success: true, data, .. } => data,
            ApiEnvelope::Wrapped { .. } => Vec::new(),
            ApiEnvelope::Bare(items) => items,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiEnvelope::Wrapped { message, .. } => message.as_deref(),
            ApiEnvelope::Bare(_) => None,
        }
    }
}
