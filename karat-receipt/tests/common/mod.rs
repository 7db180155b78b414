#![allow(dead_code)]

use shared::Decimal;
use shared::models::{
    AdvanceItem, ChitItem, EstimationItem, MakingChargeType, PurchaseItem, ReceiptPayload,
    ShopDetails,
};

pub fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("karat_receipt=debug,karat_printer=debug")
        .with_test_writer()
        .try_init();
}

pub fn shop() -> ShopDetails {
    ShopDetails {
        name: Some("Sri Lakshmi Jewellers".to_string()),
        address: Some("12 Bazaar Street\nMadurai".to_string()),
        phone: Some("0452 2345678".to_string()),
        gst_number: Some("33ABCDE1234F1Z5".to_string()),
        device_label: Some("Counter 1".to_string()),
        footer_message: Some("Thank you! Visit again".to_string()),
    }
}

/// 5.000g @ 6000, 2% wastage, fixed MC 500
pub fn ring() -> EstimationItem {
    EstimationItem {
        name: "Ring".to_string(),
        pieces: 1,
        gross_weight: d("5.000"),
        metal: "GOLD".to_string(),
        purity: "22K".to_string(),
        rate: d("6000"),
        wastage: d("2"),
        making_charge: d("500"),
        making_charge_type: MakingChargeType::Fixed,
        ..Default::default()
    }
}

/// 2.000g @ 6000, no less: amount 12000
pub fn old_gold() -> PurchaseItem {
    PurchaseItem {
        category: "Old Gold".to_string(),
        purity: "22K".to_string(),
        pieces: 1,
        gross_weight: d("2"),
        rate: d("6000"),
        ..Default::default()
    }
}

pub fn chit(id: &str, amount: &str) -> ChitItem {
    ChitItem {
        id: id.to_string(),
        amount: d(amount),
    }
}

pub fn advance(id: &str, amount: &str) -> AdvanceItem {
    AdvanceItem {
        id: id.to_string(),
        amount: d(amount),
    }
}

pub fn payload_with_paper(paper_width: &str) -> ReceiptPayload {
    let mut payload = ReceiptPayload {
        shop: shop(),
        ..Default::default()
    };
    payload.config.paper_width = paper_width.to_string();
    payload
}

/// Value of a `data-*` attribute in rendered HTML
pub fn data_attr(html: &str, name: &str) -> Option<String> {
    let needle = format!("data-{}=\"", name);
    let start = html.find(&needle)? + needle.len();
    let end = html[start..].find('"')? + start;
    Some(html[start..end].to_string())
}

/// Right-hand value of a label/value line in preview text
pub fn line_value(preview: &str, label: &str) -> Option<String> {
    preview
        .lines()
        .find(|l| l.starts_with(label))
        .map(|l| l[label.len()..].trim().to_string())
}

/// `Rs.31,100` → `31100`
pub fn amount_digits(value: &str) -> String {
    value
        .trim_start_matches('-')
        .trim_start_matches("Rs.")
        .split_whitespace()
        .next()
        .unwrap_or("")
        .replace(',', "")
}
