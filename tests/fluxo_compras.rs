// tests/fluxo_compras.rs

// Fluxo completo da cadeia de compras sobre os serviços em memória:
// Orçamento → Pedido → Recebimento → Fatura → Pagamento, e a Devolução
// derivada da Fatura.

use rust_decimal::Decimal;
use uuid::Uuid;

use compras_core::config::{EngineSettings, EngineState};
use compras_core::gateway::memory::{InMemoryCatalog, InMemoryDocuments, SequenceCounter};
use compras_core::gateway::traits::{DocumentFetch, ProductLookup, WarehouseDirectory};
use compras_core::models::catalog::{Product, Warehouse};
use compras_core::models::document::{DocumentKind, DocumentStatus, ItemEdit};
use compras_core::services::propagation_service::MappingContext;

fn dec(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

struct Cenario {
    engine: EngineState,
    catalog: InMemoryCatalog,
    documents: InMemoryDocuments,
    sequences: SequenceCounter,
    cimento: Product,
    vergalhao: Product,
    vendor_id: Uuid,
}

fn cenario() -> Cenario {
    let cimento = Product {
        id: Uuid::new_v4(),
        sku: "CIM-001".to_string(),
        name: "Cimento CP-II 50kg".to_string(),
        description: Some("Saco de cimento CP-II 50kg".to_string()),
        purchase_price: Some(dec("32.90")),
        created_at: None,
    };
    let vergalhao = Product {
        id: Uuid::new_v4(),
        sku: "VER-010".to_string(),
        name: "Vergalhão 10mm".to_string(),
        description: None,
        purchase_price: Some(dec("31.70")),
        created_at: None,
    };
    let deposito = Warehouse {
        id: Uuid::new_v4(),
        name: "Depósito Central".to_string(),
        is_active: Some(true),
        created_at: None,
    };

    Cenario {
        engine: EngineState::new(EngineSettings::default()),
        catalog: InMemoryCatalog::new(vec![cimento.clone(), vergalhao.clone()], vec![deposito]),
        documents: InMemoryDocuments::new(),
        sequences: SequenceCounter::new(),
        cimento,
        vergalhao,
        vendor_id: Uuid::new_v4(),
    }
}

#[test]
fn cadeia_completa_ate_o_pagamento() {
    let c = cenario();
    let products = c.catalog.list_all().unwrap();
    let warehouses = c.catalog.list_ordered().unwrap();
    let ctx = MappingContext {
        products: &products,
        warehouses: &warehouses,
        order_items: None,
    };

    // --- Orçamento: duas linhas editadas campo a campo ---
    let mut quotation = c
        .engine
        .draft_service
        .new_draft(DocumentKind::Quotation, &c.sequences)
        .unwrap();
    quotation.vendor_id = Some(c.vendor_id);

    let line = c.engine.totals_service.recompute_item(
        &quotation.items[0],
        ItemEdit::Product(Some(c.cimento.id)),
        &products,
    );
    let line = c.engine.totals_service.recompute_item(
        &line,
        ItemEdit::Quantity("10".to_string()),
        &products,
    );
    quotation.items[0] = line;

    let second = c.engine.totals_service.add_line(&mut quotation.items);
    let idx = quotation
        .items
        .iter()
        .position(|item| item.id == second)
        .unwrap();
    let line = c.engine.totals_service.recompute_item(
        &quotation.items[idx],
        ItemEdit::Product(Some(c.vergalhao.id)),
        &products,
    );
    let line = c.engine.totals_service.recompute_item(
        &line,
        ItemEdit::Quantity("4".to_string()),
        &products,
    );
    let line = c.engine.totals_service.recompute_item(
        &line,
        ItemEdit::TaxRate("5".to_string()),
        &products,
    );
    quotation.items[idx] = line;

    // 10×32.90 = 329; 4×31.70 = 126.80 + 5% = 133.14
    let totals = c.engine.totals_service.compute_totals(&quotation.items);
    assert_eq!(totals.total, dec("462.14"));
    assert_eq!(totals.total, totals.sub_total - totals.discount + totals.tax);

    c.engine
        .draft_service
        .submit(&mut quotation, &c.documents)
        .unwrap();
    assert_eq!(quotation.status, DocumentStatus::Submitted);

    // --- Pedido derivado do Orçamento ---
    let quotation_doc = c
        .documents
        .fetch(DocumentKind::Quotation, quotation.id)
        .unwrap();
    let mut order = c
        .engine
        .draft_service
        .draft_from_source(&quotation_doc, DocumentKind::PurchaseOrder, &ctx, &c.sequences)
        .unwrap();

    assert_eq!(order.vendor_id, Some(c.vendor_id));
    assert!(order.number.starts_with("PED-"));
    assert_eq!(order.items.len(), 2);
    c.engine
        .draft_service
        .submit(&mut order, &c.documents)
        .unwrap();

    // --- Recebimento derivado do Pedido ---
    let order_doc = c
        .documents
        .fetch(DocumentKind::PurchaseOrder, order.id)
        .unwrap();
    let mut receipt = c
        .engine
        .draft_service
        .draft_from_source(&order_doc, DocumentKind::GoodsReceipt, &ctx, &c.sequences)
        .unwrap();

    // Quantidade pedida semeia a recebida; depósito padrão preenchido
    assert_eq!(receipt.items[0].ordered_quantity, Some(dec("10")));
    assert_eq!(receipt.items[0].quantity, dec("10"));
    assert_eq!(receipt.items[0].warehouse_id, Some(warehouses[0].id));

    // Recebida pode ser editada para baixo sem mexer na pedida
    receipt.items[0] = c.engine.totals_service.recompute_item(
        &receipt.items[0],
        ItemEdit::Quantity("8".to_string()),
        &products,
    );
    assert_eq!(receipt.items[0].quantity, dec("8"));
    assert_eq!(receipt.items[0].ordered_quantity, Some(dec("10")));

    receipt.vehicle_no = Some("ABC-1D23".to_string());
    receipt.manual_ref = Some("NF 4411".to_string());
    c.engine
        .draft_service
        .submit(&mut receipt, &c.documents)
        .unwrap();

    // --- Fatura derivada do Recebimento, preço resolvido no Pedido ---
    let receipt_doc = c
        .documents
        .fetch(DocumentKind::GoodsReceipt, receipt.id)
        .unwrap();

    // O vínculo do Recebimento aponta para o Pedido; um único fetch
    // resolve os itens do documento original
    let order_ref = receipt_doc.source.unwrap();
    assert_eq!(order_ref.kind, DocumentKind::PurchaseOrder);
    let original_order = c.documents.fetch(order_ref.kind, order_ref.id).unwrap();

    let bill_ctx = MappingContext {
        products: &products,
        warehouses: &warehouses,
        order_items: Some(&original_order.items),
    };
    let mut bill = c
        .engine
        .draft_service
        .draft_from_source(&receipt_doc, DocumentKind::PurchaseBill, &bill_ctx, &c.sequences)
        .unwrap();

    // Preço/imposto vêm do Pedido, não do Recebimento
    assert_eq!(bill.items[0].rate, dec("32.90"));
    assert_eq!(bill.items[1].rate, dec("31.70"));
    assert_eq!(bill.items[1].tax_rate, dec("5"));

    // Quantidade faturada segue a recebida (8, não 10)
    assert_eq!(bill.items[0].quantity, dec("8"));

    c.engine
        .draft_service
        .submit(&mut bill, &c.documents)
        .unwrap();

    // --- Pagamento derivado da Fatura ---
    let bill_doc = c
        .documents
        .fetch(DocumentKind::PurchaseBill, bill.id)
        .unwrap();
    let mut payment = c
        .engine
        .draft_service
        .draft_from_source(&bill_doc, DocumentKind::Payment, &ctx, &c.sequences)
        .unwrap();

    let bill_totals = c.engine.totals_service.compute_totals(&bill.items);
    assert_eq!(payment.amount, Some(bill_totals.total));
    assert!(payment.items.is_empty());

    c.engine
        .draft_service
        .submit(&mut payment, &c.documents)
        .unwrap();
    assert_eq!(payment.status, DocumentStatus::Submitted);
}

#[test]
fn pedido_convertido_sai_da_lista_de_origens() {
    let c = cenario();
    let products = c.catalog.list_all().unwrap();
    let warehouses = c.catalog.list_ordered().unwrap();
    let ctx = MappingContext {
        products: &products,
        warehouses: &warehouses,
        order_items: None,
    };

    // Dois pedidos submetidos
    let mut first = c
        .engine
        .draft_service
        .new_draft(DocumentKind::PurchaseOrder, &c.sequences)
        .unwrap();
    first.vendor_id = Some(c.vendor_id);
    first.items[0] = c.engine.totals_service.recompute_item(
        &first.items[0],
        ItemEdit::Product(Some(c.cimento.id)),
        &products,
    );
    c.engine.draft_service.submit(&mut first, &c.documents).unwrap();

    let mut second = c
        .engine
        .draft_service
        .new_draft(DocumentKind::PurchaseOrder, &c.sequences)
        .unwrap();
    second.vendor_id = Some(c.vendor_id);
    second.items[0] = c.engine.totals_service.recompute_item(
        &second.items[0],
        ItemEdit::Product(Some(c.vergalhao.id)),
        &products,
    );
    c.engine.draft_service.submit(&mut second, &c.documents).unwrap();

    // Converte só o primeiro em Recebimento
    let first_doc = c.documents.fetch(DocumentKind::PurchaseOrder, first.id).unwrap();
    let mut receipt = c
        .engine
        .draft_service
        .draft_from_source(&first_doc, DocumentKind::GoodsReceipt, &ctx, &c.sequences)
        .unwrap();
    c.engine.draft_service.submit(&mut receipt, &c.documents).unwrap();

    // O seletor de origens para novo Recebimento só mostra o segundo
    let orders = c.documents.list(DocumentKind::PurchaseOrder).unwrap();
    let available = c.engine.draft_service.available_sources(orders);
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, second.id);
}

#[test]
fn devolucao_derivada_da_fatura_copia_valores() {
    let c = cenario();
    let products = c.catalog.list_all().unwrap();
    let warehouses = c.catalog.list_ordered().unwrap();
    let ctx = MappingContext {
        products: &products,
        warehouses: &warehouses,
        order_items: None,
    };

    let mut bill = c
        .engine
        .draft_service
        .new_draft(DocumentKind::PurchaseBill, &c.sequences)
        .unwrap();
    bill.vendor_id = Some(c.vendor_id);
    let line = c.engine.totals_service.recompute_item(
        &bill.items[0],
        ItemEdit::Product(Some(c.cimento.id)),
        &products,
    );
    let line = c.engine.totals_service.recompute_item(
        &line,
        ItemEdit::Quantity("6".to_string()),
        &products,
    );
    let line = c.engine.totals_service.recompute_item(
        &line,
        ItemEdit::Discount("20".to_string()),
        &products,
    );
    bill.items[0] = line;
    c.engine.draft_service.submit(&mut bill, &c.documents).unwrap();

    let bill_doc = c.documents.fetch(DocumentKind::PurchaseBill, bill.id).unwrap();
    let mut devolution = c
        .engine
        .draft_service
        .draft_from_source(&bill_doc, DocumentKind::PurchaseReturn, &ctx, &c.sequences)
        .unwrap();

    assert!(devolution.number.starts_with("DEV-"));
    assert_eq!(devolution.items[0].rate, dec("32.90"));
    assert_eq!(devolution.items[0].discount, dec("20"));
    // 6×32.90 − 20 = 177.40
    assert_eq!(devolution.items[0].total, dec("177.40"));

    // Devolução pode esvaziar a lista de linhas
    let id = devolution.items[0].id;
    c.engine
        .totals_service
        .remove_line(DocumentKind::PurchaseReturn, &mut devolution.items, id);
    assert!(devolution.items.is_empty());
}
