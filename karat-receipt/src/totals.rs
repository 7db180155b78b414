//! Receipt arithmetic using rust_decimal for precision
//!
//! Everything here is pure: the same inputs always produce the same
//! `Totals`, so a payload can be rendered again for another sink without
//! recomputation drift. Nothing is rounded here; see `format`.
//!
//! Products and sums saturate at the `Decimal` limit instead of panicking.
//! Deserialized payloads never get near it (see `shared::util::bounded`).

use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::{
    AdvanceItem, ChitItem, EstimationItem, LessType, MakingChargeType, PurchaseItem,
    ReceiptConfig, WastageType,
};

/// Per-line breakdown of an estimation item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemValuation {
    pub net_weight: Decimal,
    pub gold_value: Decimal,
    pub wastage_value: Decimal,
    pub making_charge_value: Decimal,
    /// gold + wastage + making charge (pre-GST)
    pub taxable_value: Decimal,
    pub gst_value: Decimal,
    pub total_value: Decimal,
}

/// Per-line breakdown of an old-metal purchase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseValuation {
    pub net_weight: Decimal,
    pub amount: Decimal,
}

/// Aggregates shared by both renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_pieces: u32,
    pub total_gross_weight: Decimal,
    pub total_net_weight: Decimal,
    pub total_taxable_value: Decimal,
    /// Rate actually levied (zero when GST does not apply)
    pub gst_rate_percent: Decimal,
    pub total_gst: Decimal,
    pub estimation_amount: Decimal,
    pub purchase_gross_weight: Decimal,
    pub purchase_net_weight: Decimal,
    pub total_purchase_amount: Decimal,
    pub total_chit_amount: Decimal,
    pub total_advance_amount: Decimal,
    /// Negative means a credit owed to the customer
    pub net_payable: Decimal,
}

/// Sum that pins at the representable limit
fn total(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    value.saturating_mul(percent) / Decimal::ONE_HUNDRED
}

impl Totals {
    /// One of the two equal GST halves (CGST / SGST)
    pub fn half_gst(&self) -> Decimal {
        self.total_gst / Decimal::TWO
    }

    /// Rate of one GST half
    pub fn half_gst_rate(&self) -> Decimal {
        self.gst_rate_percent / Decimal::TWO
    }

    pub fn total_deductions(&self) -> Decimal {
        total([
            self.total_purchase_amount,
            self.total_chit_amount,
            self.total_advance_amount,
        ])
    }

    pub fn gst_levied(&self) -> bool {
        !self.gst_rate_percent.is_zero()
    }

    /// Net payable is a credit balance
    pub fn is_credit(&self) -> bool {
        self.net_payable.is_sign_negative() && !self.net_payable.is_zero()
    }
}

/// Pure estimation arithmetic
#[derive(Debug, Clone, Copy)]
pub struct TotalsCalculator {
    gst_rate_percent: Decimal,
}

impl TotalsCalculator {
    /// Calculator levying `gst_rate_percent` whenever estimation items exist
    pub fn new(gst_rate_percent: Decimal) -> Self {
        Self { gst_rate_percent }
    }

    /// GST rate from the display policy; switching GST off stops levying it
    pub fn from_config(config: &ReceiptConfig) -> Self {
        if config.show_gst {
            Self::new(config.gst_rate_percent)
        } else {
            Self::new(Decimal::ZERO)
        }
    }

    /// Value one estimation line
    ///
    /// - wastage: percentage → `net × wastage/100 × rate`, grams → `wastage × rate`
    /// - making charge: percentage → `net × rate × mc/100`, per gram → `net × mc`,
    ///   fixed → `mc`
    pub fn value_item(&self, item: &EstimationItem) -> ItemValuation {
        let net_weight = item.net_weight();
        let gold_value = net_weight.saturating_mul(item.rate);

        let wastage_value = match item.wastage_type {
            WastageType::Percentage => percent_of(net_weight, item.wastage).saturating_mul(item.rate),
            WastageType::Grams => item.wastage.saturating_mul(item.rate),
        };

        let making_charge_value = match item.making_charge_type {
            MakingChargeType::Percentage => percent_of(gold_value, item.making_charge),
            MakingChargeType::PerGram => net_weight.saturating_mul(item.making_charge),
            MakingChargeType::Fixed => item.making_charge,
        };

        let taxable_value = total([gold_value, wastage_value, making_charge_value]);
        let gst_value = percent_of(taxable_value, self.gst_rate_percent);

        ItemValuation {
            net_weight,
            gold_value,
            wastage_value,
            making_charge_value,
            taxable_value,
            gst_value,
            total_value: taxable_value.saturating_add(gst_value),
        }
    }

    /// Value one old-metal line
    ///
    /// - grams: `net = gross − less`
    /// - percentage: `net = gross × (1 − less/100)`
    /// - amount: `net = gross`, and `less` comes off the amount
    pub fn value_purchase(&self, item: &PurchaseItem) -> PurchaseValuation {
        let net_weight = match item.less_type {
            LessType::Grams => item.gross_weight.saturating_sub(item.less),
            LessType::Percentage => item
                .gross_weight
                .saturating_sub(percent_of(item.gross_weight, item.less)),
            LessType::Amount => item.gross_weight,
        }
        .max(Decimal::ZERO);

        let value = net_weight.saturating_mul(item.rate);
        let amount = match item.less_type {
            LessType::Amount => value.saturating_sub(item.less),
            LessType::Grams | LessType::Percentage => value,
        };

        PurchaseValuation { net_weight, amount }
    }

    /// Aggregate every collection into `Totals`
    ///
    /// GST is levied on the aggregate taxable value, and only when at least
    /// one estimation item is present.
    pub fn compute(
        &self,
        items: &[EstimationItem],
        purchases: &[PurchaseItem],
        chits: &[ChitItem],
        advances: &[AdvanceItem],
    ) -> Totals {
        let valuations: Vec<ItemValuation> = items.iter().map(|i| self.value_item(i)).collect();

        let total_pieces = items.iter().fold(0u32, |acc, i| acc.saturating_add(i.pieces));
        let total_gross_weight = total(items.iter().map(|i| i.gross_weight));
        let total_net_weight = total(valuations.iter().map(|v| v.net_weight));
        let total_taxable_value = total(valuations.iter().map(|v| v.taxable_value));

        let gst_rate_percent = if items.is_empty() {
            Decimal::ZERO
        } else {
            self.gst_rate_percent
        };
        let total_gst = percent_of(total_taxable_value, gst_rate_percent);
        let estimation_amount = total_taxable_value.saturating_add(total_gst);

        let purchase_valuations: Vec<PurchaseValuation> =
            purchases.iter().map(|p| self.value_purchase(p)).collect();
        let purchase_gross_weight = total(purchases.iter().map(|p| p.gross_weight));
        let purchase_net_weight = total(purchase_valuations.iter().map(|v| v.net_weight));
        let total_purchase_amount = total(purchase_valuations.iter().map(|v| v.amount));

        let total_chit_amount = total(chits.iter().map(|c| c.amount));
        let total_advance_amount = total(advances.iter().map(|a| a.amount));

        let net_payable = estimation_amount.saturating_sub(total([
            total_purchase_amount,
            total_chit_amount,
            total_advance_amount,
        ]));

        Totals {
            total_pieces,
            total_gross_weight,
            total_net_weight,
            total_taxable_value,
            gst_rate_percent,
            total_gst,
            estimation_amount,
            purchase_gross_weight,
            purchase_net_weight,
            total_purchase_amount,
            total_chit_amount,
            total_advance_amount,
            net_payable,
        }
    }
}

impl Default for TotalsCalculator {
    fn default() -> Self {
        Self::new(Decimal::from(3))
    }
}
