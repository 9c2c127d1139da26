// src/bin/demo_compras.rs

// Demonstração do fluxo completo de compras com os serviços em memória:
// Orçamento → Pedido → Recebimento → Fatura → Pagamento, e a Devolução
// criada a partir da Fatura.

use rust_decimal::Decimal;
use uuid::Uuid;

use compras_core::config::EngineState;
use compras_core::gateway::memory::{InMemoryCatalog, InMemoryDocuments, SequenceCounter};
use compras_core::gateway::traits::{DocumentFetch, ProductLookup, WarehouseDirectory};
use compras_core::models::catalog::{Product, Warehouse};
use compras_core::models::document::{DocumentKind, ItemEdit};
use compras_core::services::propagation_service::MappingContext;

fn main() {
    // Inicializa o logger, igual ao backend.
    tracing_subscriber::fmt().with_target(false).compact().init();

    let engine = EngineState::from_env();

    // --- Dados de exemplo (papel do backend REST) ---
    let cimento = Product {
        id: Uuid::new_v4(),
        sku: "CIM-001".to_string(),
        name: "Cimento CP-II 50kg".to_string(),
        description: Some("Saco de cimento CP-II 50kg".to_string()),
        purchase_price: Some("32.90".parse().unwrap()),
        created_at: None,
    };
    let deposito = Warehouse {
        id: Uuid::new_v4(),
        name: "Depósito Central".to_string(),
        is_active: Some(true),
        created_at: None,
    };

    let catalog = InMemoryCatalog::new(vec![cimento.clone()], vec![deposito]);
    let documents = InMemoryDocuments::new();
    let sequences = SequenceCounter::new();

    let products = catalog.list_all().expect("Falha ao carregar o catálogo");
    let warehouses = catalog
        .list_ordered()
        .expect("Falha ao carregar os depósitos");

    let vendor_id = Uuid::new_v4();

    // --- 1. Orçamento criado direto ---
    let mut quotation = engine
        .draft_service
        .new_draft(DocumentKind::Quotation, &sequences)
        .expect("Falha ao criar o orçamento");
    quotation.vendor_id = Some(vendor_id);

    // Seleção de produto passa pela consulta ao catálogo
    let produto = catalog
        .resolve(cimento.id)
        .expect("Falha ao consultar o catálogo")
        .expect("Produto não cadastrado no catálogo");

    let line = engine.totals_service.recompute_item(
        &quotation.items[0],
        ItemEdit::Product(Some(produto.id)),
        &products,
    );
    let line = engine
        .totals_service
        .recompute_item(&line, ItemEdit::Quantity("10".to_string()), &products);
    quotation.items[0] = line;

    let totals = engine.totals_service.compute_totals(&quotation.items);
    tracing::info!(number = %quotation.number, total = %totals.total, "Orçamento pronto");

    engine
        .draft_service
        .submit(&mut quotation, &documents)
        .expect("Falha ao submeter o orçamento");

    // --- 2. Cadeia de conversões ---
    let ctx = MappingContext {
        products: &products,
        warehouses: &warehouses,
        order_items: None,
    };

    let quotation_doc = documents
        .fetch(DocumentKind::Quotation, quotation.id)
        .expect("Orçamento não encontrado");
    let mut order = engine
        .draft_service
        .draft_from_source(&quotation_doc, DocumentKind::PurchaseOrder, &ctx, &sequences)
        .expect("Falha ao derivar o pedido");
    engine
        .draft_service
        .submit(&mut order, &documents)
        .expect("Falha ao submeter o pedido");

    let order_doc = documents
        .fetch(DocumentKind::PurchaseOrder, order.id)
        .expect("Pedido não encontrado");
    let mut receipt = engine
        .draft_service
        .draft_from_source(&order_doc, DocumentKind::GoodsReceipt, &ctx, &sequences)
        .expect("Falha ao derivar o recebimento");
    receipt.vehicle_no = Some("ABC-1D23".to_string());
    receipt.manual_ref = Some("NF 4411".to_string());
    engine
        .draft_service
        .submit(&mut receipt, &documents)
        .expect("Falha ao submeter o recebimento");

    // Fatura a partir do Recebimento: o preço vem do Pedido original
    let receipt_doc = documents
        .fetch(DocumentKind::GoodsReceipt, receipt.id)
        .expect("Recebimento não encontrado");
    let bill_ctx = MappingContext {
        products: &products,
        warehouses: &warehouses,
        order_items: Some(&order_doc.items),
    };
    let mut bill = engine
        .draft_service
        .draft_from_source(&receipt_doc, DocumentKind::PurchaseBill, &bill_ctx, &sequences)
        .expect("Falha ao derivar a fatura");
    engine
        .draft_service
        .submit(&mut bill, &documents)
        .expect("Falha ao submeter a fatura");

    let bill_doc = documents
        .fetch(DocumentKind::PurchaseBill, bill.id)
        .expect("Fatura não encontrada");
    let mut payment = engine
        .draft_service
        .draft_from_source(&bill_doc, DocumentKind::Payment, &ctx, &sequences)
        .expect("Falha ao derivar o pagamento");
    engine
        .draft_service
        .submit(&mut payment, &documents)
        .expect("Falha ao submeter o pagamento");

    tracing::info!(
        number = %payment.number,
        amount = %payment.amount.unwrap_or(Decimal::ZERO),
        "🚀 Fluxo completo: pagamento gerado a partir da fatura"
    );
}
