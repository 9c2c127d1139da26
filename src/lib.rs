// src/lib.rs

//! Núcleo de documentos de compras: cálculo de totais por item e
//! propagação de campos na cadeia Orçamento → Pedido → Recebimento →
//! Fatura → Pagamento (e Fatura → Devolução).
//!
//! Transporte HTTP, persistência e autenticação ficam fora deste crate:
//! o núcleo opera apenas sobre listas já carregadas, entregues pelos
//! serviços externos declarados em [`gateway`].

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod gateway;
pub mod models;
pub mod services;
