//! End-to-end runs of the counter commands, the way a billing screen drives
//! them.

use cellshop_core::stock::{StockCategory, StockItem};
use cellshop_core::{BillKind, Discount, DraftStatus, Money, PendingRow};
use cellshop_counter::bill_file::{load_bill, BillFile};
use cellshop_counter::commands::checkout::checkout;
use cellshop_counter::commands::draft::{
    add_to_bill, clear_draft, get_draft, remove_bill_item, remove_last_item, set_bill_discount,
    set_pending_row, start_bill,
};
use cellshop_counter::commands::stock::low_stock;
use cellshop_counter::{ConfigState, DraftState, ErrorCode};
use rust_decimal_macros::dec;

fn case_row() -> PendingRow {
    PendingRow {
        name: "Case".to_string(),
        identifier: "CASE-01".to_string(),
        quantity: "2".to_string(),
        unit_price: "100".to_string(),
        tax_rate: "18".to_string(),
        discount_kind: cellshop_core::draft::DiscountKind::Percent,
        discount_value: "10".to_string(),
    }
}

#[test]
fn sale_bill_from_keystrokes_to_checkout() {
    let config = ConfigState::default();
    let draft = DraftState::default();

    let response = start_bill(&draft, &config, BillKind::Sale, None, None);
    assert_eq!(response.status, DraftStatus::Empty);

    // Half-typed price: the row is not in the live totals yet.
    let response = set_pending_row(
        &draft,
        PendingRow {
            unit_price: "1".to_string(),
            quantity: String::new(),
            ..case_row()
        },
    );
    assert_eq!(response.status, DraftStatus::Editing);
    assert_eq!(response.preview.summary.grand_total, Money::zero());

    let response = set_pending_row(&draft, case_row());
    assert_eq!(
        response.preview.summary.grand_total,
        Money::from_decimal(dec!(212.4))
    );
    assert_eq!(response.committed.summary.grand_total, Money::zero());

    let response = add_to_bill(&draft);
    assert_eq!(response.status, DraftStatus::Finalizable);
    assert!(response.rejected.is_none());
    assert!(response.pending.is_none());
    assert_eq!(response.committed.summary.sub_total, Money::from_cents(18_000));
    assert_eq!(
        response.committed.summary.tax_split.central,
        Money::from_decimal(dec!(16.2))
    );

    let request = checkout(&draft).unwrap();
    assert_eq!(request.bill_kind, BillKind::Sale);
    assert_eq!(request.lines.len(), 1);
    assert_eq!(request.lines[0].identifier, "CASE-01");
    assert_eq!(request.lines[0].quantity, 2);

    // Checkout leaves the draft for the caller to clear.
    assert_eq!(get_draft(&draft).items.len(), 1);
    assert_eq!(clear_draft(&draft).status, DraftStatus::Empty);
}

#[test]
fn rejected_row_is_reported_and_kept() {
    let draft = DraftState::default();
    set_pending_row(
        &draft,
        PendingRow {
            name: "  ".to_string(),
            ..case_row()
        },
    );

    let response = add_to_bill(&draft);
    assert_eq!(response.rejected.as_deref(), Some("name is required"));
    assert!(response.pending.is_some());
    assert!(response.items.is_empty());
}

#[test]
fn checkout_of_empty_bill_is_validation_error() {
    let draft = DraftState::default();
    set_pending_row(&draft, case_row());

    let err = checkout(&draft).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[test]
fn removing_items() {
    let draft = DraftState::default();
    for id in ["A", "B"] {
        set_pending_row(
            &draft,
            PendingRow {
                identifier: id.to_string(),
                ..case_row()
            },
        );
        add_to_bill(&draft);
    }

    let response = remove_last_item(&draft);
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].identifier, "A");

    let err = remove_bill_item(&draft, "B").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let response = remove_bill_item(&draft, "A").unwrap();
    assert_eq!(response.status, DraftStatus::Empty);
}

#[test]
fn bill_discount_beyond_subtotal_keeps_tax() {
    let draft = DraftState::default();
    set_pending_row(&draft, case_row());
    add_to_bill(&draft);

    let response = set_bill_discount(&draft, Discount::Flat(Money::from_cents(100_000))).unwrap();
    let summary = response.committed.summary;
    assert_eq!(summary.bill_discount_amount, Money::from_cents(100_000));
    assert_eq!(summary.grand_total, summary.tax_total);

    let err = set_bill_discount(
        &draft,
        Discount::Percent(cellshop_core::Percent::new(dec!(110))),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[test]
fn service_bill_file_with_labour() {
    let bill: BillFile = serde_json::from_str(
        r#"{
            "kind": "service",
            "labour": "300",
            "items": [
                { "name": "Display", "identifier": "LCD-A15", "quantity": "1", "unitPrice": "1500" },
                { "name": "", "quantity": "1", "unitPrice": "99" },
                { "name": "Adhesive", "quantity": "1", "unitPrice": "50", "taxRatePercent": "0" }
            ]
        }"#,
    )
    .unwrap();

    let draft = DraftState::default();
    let report = load_bill(&draft, &ConfigState::default(), bill).unwrap();

    assert_eq!(report.rejected_rows.len(), 1);
    assert_eq!(report.rejected_rows[0].index, 1);
    assert!(report.draft.pending.is_none());
    assert_eq!(report.draft.items.len(), 2);

    // Display 1500 @ 18% (default), adhesive 50 @ 0%, labour 300 @ 18%.
    let statement = report.draft.committed;
    assert_eq!(statement.kind, BillKind::Service);
    assert_eq!(statement.summary.sub_total, Money::from_cents(185_000));
    assert_eq!(statement.summary.tax_total, Money::from_cents(32_400));
    assert_eq!(statement.summary.grand_total, Money::from_cents(217_400));
    assert_eq!(
        statement.labour.map(|l| l.line_total),
        Some(Money::from_cents(35_400))
    );
}

#[test]
fn advance_receipt_balance() {
    let draft = DraftState::default();
    let config = ConfigState::default();
    start_bill(
        &draft,
        &config,
        BillKind::AdvanceReceipt,
        None,
        Some(Money::from_cents(100_000)),
    );
    set_pending_row(
        &draft,
        PendingRow {
            name: "Galaxy A15 (booking)".to_string(),
            quantity: "1".to_string(),
            unit_price: "15000".to_string(),
            tax_rate: "18".to_string(),
            ..PendingRow::default()
        },
    );
    let response = add_to_bill(&draft);

    assert_eq!(response.committed.summary.grand_total, Money::from_cents(1_770_000));
    assert_eq!(response.committed.balance_due, Money::from_cents(1_670_000));
}

#[test]
fn low_stock_feed() {
    let config = ConfigState::default();
    let stock = vec![
        StockItem {
            identifier: "CHG-20W".to_string(),
            name: "20W charger".to_string(),
            category: StockCategory::Accessory,
            quantity: 1,
            threshold: None,
        },
        StockItem {
            identifier: "RN13".to_string(),
            name: "Redmi Note 13".to_string(),
            category: StockCategory::Mobile,
            quantity: 8,
            threshold: None,
        },
    ];

    let response = low_stock(&config, vec!["RN13".to_string()], &stock);
    assert_eq!(response.alerts.len(), 1);
    assert_eq!(response.alerts[0].identifier, "CHG-20W");
    assert_eq!(response.unseen_count, 1);
    // RN13 is no longer low, so it is forgotten.
    assert!(response.seen.is_empty());
}

#[test]
fn labour_only_lands_on_service_bills() {
    let draft = DraftState::default();
    let config = ConfigState::default();
    let labour = Some(Money::from_cents(30_000));

    for kind in [BillKind::Sale, BillKind::AdvanceReceipt] {
        let response = start_bill(&draft, &config, kind, labour, None);
        assert_eq!(response.kind, kind);
        assert!(response.committed.labour.is_none());
        assert_eq!(response.committed.summary.grand_total, Money::zero());
    }

    let response = start_bill(&draft, &config, BillKind::Service, labour, None);
    assert_eq!(
        response.committed.labour.map(|l| l.line_total),
        Some(Money::from_cents(35_400))
    );
}

#[test]
fn switching_screens_resets_the_profile() {
    let draft = DraftState::default();
    let config = ConfigState::default();

    start_bill(&draft, &config, BillKind::Service, Some(Money::from_cents(30_000)), None);
    set_pending_row(&draft, case_row());
    add_to_bill(&draft);

    // A new sale starts empty, without the service labour line.
    let response = start_bill(&draft, &config, BillKind::Sale, None, None);
    assert_eq!(response.status, DraftStatus::Empty);
    assert!(response.committed.labour.is_none());

    // Line discounts come back on the sale screen.
    set_pending_row(&draft, case_row());
    let response = add_to_bill(&draft);
    assert_eq!(response.committed.summary.item_discount_total, Money::from_cents(2_000));
    assert_eq!(
        response.committed.summary.grand_total,
        Money::from_decimal(dec!(212.4))
    );
}

#[test]
fn out_of_range_labour_gst_never_makes_the_bill_negative() {
    let draft = DraftState::default();

    // Lenient loading keeps the default rate.
    let config = ConfigState::from_lookup(
        |var| (var == "CELLSHOP_LABOUR_GST").then(|| "-500".to_string()),
        false,
    )
    .unwrap();
    let response = start_bill(
        &draft,
        &config,
        BillKind::Service,
        Some(Money::from_cents(10_000)),
        None,
    );
    assert_eq!(response.committed.summary.tax_total, Money::from_cents(1_800));

    // A rate set directly is clamped by the profile.
    let config = ConfigState {
        labour_gst: cellshop_core::Percent::new(dec!(-500)),
        ..ConfigState::default()
    };
    let response = start_bill(
        &draft,
        &config,
        BillKind::Service,
        Some(Money::from_cents(10_000)),
        None,
    );
    let summary = response.committed.summary;
    assert_eq!(summary.tax_total, Money::zero());
    assert_eq!(summary.grand_total, Money::from_cents(10_000));
    assert!(!summary.grand_total.is_negative());
}

#[test]
fn full_bill_refuses_another_row() {
    let draft = DraftState::default();
    for _ in 0..cellshop_core::MAX_BILL_ITEMS {
        set_pending_row(&draft, case_row());
        assert!(add_to_bill(&draft).rejected.is_none());
    }

    set_pending_row(&draft, case_row());
    let response = add_to_bill(&draft);
    assert_eq!(
        response.rejected.as_deref(),
        Some("bill items must be between 0 and 100")
    );
    assert_eq!(response.items.len(), cellshop_core::MAX_BILL_ITEMS);
}

#[test]
fn sub_paise_amounts_keep_the_tax_split_exact() {
    let bill: BillFile = serde_json::from_str(
        r#"{
            "kind": "service",
            "labour": "0.0000000000000000000000000001",
            "items": [
                { "name": "Tiny", "quantity": "1", "unitPrice": "0.0000000000000000000000000001", "taxRatePercent": "100" },
                { "name": "Sim ejector", "quantity": "1", "unitPrice": "0.03", "taxRatePercent": "18.00000001" }
            ]
        }"#,
    )
    .unwrap();

    let report = load_bill(&DraftState::default(), &ConfigState::default(), bill).unwrap();
    assert_eq!(report.rejected_rows.len(), 1);
    assert_eq!(report.rejected_rows[0].name, "Tiny");

    let statement = report.draft.committed;
    assert!(statement.labour.is_none());
    assert_eq!(statement.summary.tax_total, Money::from_decimal(dec!(0.0054)));
    assert_eq!(statement.summary.tax_split.total(), statement.summary.tax_total);
    assert_eq!(statement.summary.tax_split.central, statement.summary.tax_split.state);
}
