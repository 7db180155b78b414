//! Payload → `Document`
//!
//! All receipt content decisions live here: which sections exist, the
//! labels, and the formatted figures. Renderers only decide encoding.

use crate::document::{Align, Block, Document, Figures, Rule, Section, SectionKind, Table, TextStyle};
use crate::format::{
    format_amount, format_integer, format_net_payable, format_number, format_plain, format_weight,
    split_gst,
};
use crate::layout::{Column, ColumnSpec, Layout};
use crate::totals::{Totals, TotalsCalculator};
use shared::models::{
    ChargeDisplay, EstimationItem, LessType, MakingChargeType, PurchaseItem, ReceiptPayload,
    WastageType,
};
use shared::util::non_blank;

const DATE_FORMAT: &str = "%d-%m-%Y %I:%M %p";

/// Strip control characters from caller-supplied text
///
/// Keeps the thermal stream free of any control byte the receipt did not
/// emit itself.
pub(crate) fn clean_text(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == '\t' || c == '\r' || c == '\n' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

fn cleaned(value: Option<&str>) -> Option<String> {
    non_blank(value).map(clean_text).filter(|v| !v.is_empty())
}

fn item_heading(column: Column) -> &'static str {
    match column {
        Column::Name => "Item",
        Column::Pieces => "Pc",
        Column::Weight => "Wt",
        Column::Wastage => "VA",
        Column::MakingCharge => "MC",
        Column::Amount => "Amount",
    }
}

/// Less and net weight take the wastage / making-charge slots
fn purchase_heading(column: Column) -> &'static str {
    match column {
        Column::Name => "Old Metal",
        Column::Pieces => "Pc",
        Column::Weight => "Wt",
        Column::Wastage => "Less",
        Column::MakingCharge => "Net",
        Column::Amount => "Amount",
    }
}

pub(crate) struct ReceiptBuilder<'a> {
    payload: &'a ReceiptPayload,
    calculator: TotalsCalculator,
    totals: &'a Totals,
    layout: Layout,
}

impl<'a> ReceiptBuilder<'a> {
    pub(crate) fn new(
        payload: &'a ReceiptPayload,
        calculator: TotalsCalculator,
        totals: &'a Totals,
        layout: Layout,
    ) -> Self {
        Self {
            payload,
            calculator,
            totals,
            layout,
        }
    }

    pub(crate) fn build(&self, title: &str) -> Document {
        let figures = Figures {
            taxable: format_integer(self.totals.total_taxable_value),
            gst: format_integer(self.totals.total_gst),
            net_payable: format_integer(self.totals.net_payable),
        };

        let mut doc = Document::new(title, self.layout, figures);
        doc.push_section(self.header());
        doc.push_section(self.title(title));
        doc.push_section(self.meta());
        doc.push_section(self.parties());
        doc.push_section(self.items());
        doc.push_section(self.gst());
        doc.push_section(self.purchases());
        doc.push_section(self.chits());
        doc.push_section(self.advances());
        doc.push_section(self.net_amount());
        doc.push_section(self.footer());
        doc
    }

    fn header(&self) -> Section {
        let mut section = Section::new(SectionKind::Header);
        let config = &self.payload.config;
        if !config.show_header {
            return section;
        }
        let shop = &self.payload.shop;

        if let Some(name) = cleaned(shop.name.as_deref()) {
            section.push(Block::centered(name, TextStyle::BANNER));
        }
        if let Some(address) = shop.address.as_deref() {
            for line in address.lines().map(clean_text).filter(|l| !l.is_empty()) {
                section.push(Block::centered(line, TextStyle::PLAIN));
            }
        }
        if let Some(phone) = cleaned(shop.phone.as_deref()) {
            section.push(Block::centered(format!("Ph: {}", phone), TextStyle::PLAIN));
        }
        if let Some(gstin) = cleaned(shop.gst_number.as_deref()) {
            section.push(Block::centered(format!("GSTIN: {}", gstin), TextStyle::PLAIN));
        }
        if config.show_device_name
            && let Some(device) = cleaned(shop.device_label.as_deref())
        {
            section.push(Block::centered(format!("Device: {}", device), TextStyle::PLAIN));
        }
        section
    }

    fn title(&self, title: &str) -> Section {
        let mut section = Section::new(SectionKind::Title);
        section
            .push(Block::Rule(Rule::Double))
            .push(Block::centered(title, TextStyle::BOLD))
            .push(Block::Rule(Rule::Double));
        section
    }

    fn meta(&self) -> Section {
        let mut section = Section::new(SectionKind::Meta);

        if let Some(issued_at) = self.payload.issued_at {
            section.push(Block::pair("Date", issued_at.format(DATE_FORMAT).to_string()));
        }
        if let Some(number) = self.payload.estimation_number {
            section.push(Block::pair("Est. No", number.to_string()));
        }

        // Rates only make sense next to priced items
        let mut seen: Vec<(&str, &str, shared::Decimal)> = Vec::new();
        for item in &self.payload.items {
            let key = (item.metal.trim(), item.purity.trim(), item.rate);
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);

            let label = clean_text(&format!("{} {}", key.0, key.1));
            let label = if label.is_empty() { "Rate".to_string() } else { label };
            section.push(Block::pair(label, format!("{}/g", format_amount(item.rate))));
        }

        if !section.is_empty() {
            section.push(Block::Rule(Rule::Single));
        }
        section
    }

    fn parties(&self) -> Section {
        let mut section = Section::new(SectionKind::Parties);
        let config = &self.payload.config;

        if config.show_customer
            && let Some(customer) = &self.payload.customer
        {
            if let Some(name) = cleaned(customer.name.as_deref()) {
                section.push(Block::pair("Customer", name));
            }
            if let Some(phone) = cleaned(customer.phone.as_deref()) {
                section.push(Block::pair("Phone", phone));
            }
            if let Some(address) = cleaned(customer.address.as_deref()) {
                section.push(Block::text(address));
            }
        }
        if config.show_operator
            && let Some(operator) = cleaned(self.payload.operator.as_deref())
        {
            section.push(Block::pair("Operator", operator));
        }

        if !section.is_empty() {
            section.push(Block::Rule(Rule::Single));
        }
        section
    }

    fn item_columns(&self) -> Vec<ColumnSpec> {
        let config = &self.payload.config;
        self.layout
            .visible_columns(config.show_wastage, config.show_making_charge)
    }

    fn items(&self) -> Section {
        let mut section = Section::new(SectionKind::Items);
        let items = &self.payload.items;
        if items.is_empty() {
            return section;
        }

        let columns = self.item_columns();
        let header: Vec<String> = columns
            .iter()
            .map(|c| item_heading(c.column).to_string())
            .collect();
        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| columns.iter().map(|c| self.item_cell(item, c.column)).collect())
            .collect();

        section.push(Block::Table(Table {
            columns,
            header,
            rows,
            layout: self.layout.item_layout,
        }));

        let totals = self.totals;
        section
            .push(Block::Rule(Rule::Single))
            .push(Block::pair("Total Pcs", totals.total_pieces.to_string()))
            .push(Block::pair("Gross Wt", format!("{}g", format_weight(totals.total_gross_weight))))
            .push(Block::pair("Net Wt", format!("{}g", format_weight(totals.total_net_weight))))
            .push(Block::pair("Taxable Value", format_amount(totals.total_taxable_value)));

        if !totals.gst_levied() {
            section.push(Block::styled_pair(
                "Estimation Amount",
                format_amount(totals.estimation_amount),
                TextStyle::BOLD,
            ));
        }
        section
    }

    fn item_cell(&self, item: &EstimationItem, column: Column) -> String {
        let config = &self.payload.config;
        match column {
            Column::Name => clean_text(&item.display_name()),
            Column::Pieces => item.pieces.to_string(),
            Column::Weight => format_weight(item.net_weight()),
            Column::Wastage => match config.wastage_display {
                ChargeDisplay::Rate => match item.wastage_type {
                    WastageType::Percentage => format!("{}%", format_plain(item.wastage)),
                    WastageType::Grams => format!("{}g", format_weight(item.wastage)),
                },
                ChargeDisplay::Value => {
                    format_number(self.calculator.value_item(item).wastage_value)
                }
            },
            Column::MakingCharge => match config.making_charge_display {
                ChargeDisplay::Rate => match item.making_charge_type {
                    MakingChargeType::Percentage => {
                        format!("{}%", format_plain(item.making_charge))
                    }
                    MakingChargeType::PerGram => {
                        format!("{}/g", format_plain(item.making_charge))
                    }
                    MakingChargeType::Fixed => format_number(item.making_charge),
                },
                ChargeDisplay::Value => {
                    format_number(self.calculator.value_item(item).making_charge_value)
                }
            },
            Column::Amount => format_number(self.calculator.value_item(item).taxable_value),
        }
    }

    fn gst(&self) -> Section {
        let mut section = Section::new(SectionKind::Gst);
        let totals = self.totals;
        if self.payload.items.is_empty() || !totals.gst_levied() {
            return section;
        }

        let half_rate = format_plain(totals.half_gst_rate());
        let (cgst, sgst) = split_gst(totals.total_gst);
        section
            .push(Block::pair(format!("CGST @{}%", half_rate), format_amount(cgst)))
            .push(Block::pair(format!("SGST @{}%", half_rate), format_amount(sgst)))
            .push(Block::Rule(Rule::Single))
            .push(Block::styled_pair(
                "Estimation Amount",
                format_amount(totals.estimation_amount),
                TextStyle::BOLD,
            ));
        section
    }

    fn purchases(&self) -> Section {
        let mut section = Section::new(SectionKind::Purchase);
        let purchases = &self.payload.purchases;
        if purchases.is_empty() {
            return section;
        }

        let columns = self.layout.visible_columns(true, true);
        let header: Vec<String> = columns
            .iter()
            .map(|c| purchase_heading(c.column).to_string())
            .collect();
        let rows: Vec<Vec<String>> = purchases
            .iter()
            .map(|p| columns.iter().map(|c| self.purchase_cell(p, c.column)).collect())
            .collect();

        let totals = self.totals;
        section
            .push(Block::centered("OLD METAL PURCHASE", TextStyle::BOLD))
            .push(Block::Table(Table {
                columns,
                header,
                rows,
                layout: self.layout.item_layout,
            }))
            .push(Block::Rule(Rule::Single))
            .push(Block::pair(
                "Net Wt",
                format!("{}g", format_weight(totals.purchase_net_weight)),
            ))
            .push(Block::styled_pair(
                "Purchase Total",
                format_amount(totals.total_purchase_amount),
                TextStyle::BOLD,
            ));
        section
    }

    fn purchase_cell(&self, item: &PurchaseItem, column: Column) -> String {
        match column {
            Column::Name => {
                let name = clean_text(&item.display_name());
                match non_blank(Some(item.purity.as_str())) {
                    Some(purity) => format!("{} {}", name, clean_text(purity)),
                    None => name,
                }
            }
            Column::Pieces => item.pieces.to_string(),
            Column::Weight => format_weight(item.gross_weight),
            Column::Wastage => match item.less_type {
                LessType::Grams => format!("{}g", format_weight(item.less)),
                LessType::Percentage => format!("{}%", format_plain(item.less)),
                LessType::Amount => format_number(item.less),
            },
            Column::MakingCharge => format_weight(self.calculator.value_purchase(item).net_weight),
            Column::Amount => format_number(self.calculator.value_purchase(item).amount),
        }
    }

    fn chits(&self) -> Section {
        let mut section = Section::new(SectionKind::Chit);
        if self.payload.chits.is_empty() {
            return section;
        }

        section.push(Block::centered("CHIT DEDUCTIONS", TextStyle::BOLD));
        for chit in &self.payload.chits {
            section.push(Block::pair(
                format!("Chit {}", clean_text(&chit.id)).trim_end().to_string(),
                format_amount(chit.amount),
            ));
        }
        section
            .push(Block::Rule(Rule::Single))
            .push(Block::styled_pair(
                "Chit Total",
                format_amount(self.totals.total_chit_amount),
                TextStyle::BOLD,
            ));
        section
    }

    fn advances(&self) -> Section {
        let mut section = Section::new(SectionKind::Advance);
        if self.payload.advances.is_empty() {
            return section;
        }

        section.push(Block::centered("ADVANCE DEDUCTIONS", TextStyle::BOLD));
        for advance in &self.payload.advances {
            section.push(Block::pair(
                format!("Advance {}", clean_text(&advance.id)).trim_end().to_string(),
                format_amount(advance.amount),
            ));
        }
        section
            .push(Block::Rule(Rule::Single))
            .push(Block::styled_pair(
                "Advance Total",
                format_amount(self.totals.total_advance_amount),
                TextStyle::BOLD,
            ));
        section
    }

    fn net_amount(&self) -> Section {
        let mut section = Section::new(SectionKind::NetAmount);
        let totals = self.totals;
        let has_deductions = !self.payload.purchases.is_empty()
            || !self.payload.chits.is_empty()
            || !self.payload.advances.is_empty();

        section.push(Block::Rule(Rule::Double));
        if has_deductions && !self.payload.items.is_empty() {
            section
                .push(Block::pair("Estimation Amount", format_amount(totals.estimation_amount)))
                .push(Block::pair("Less Deductions", format_amount(totals.total_deductions())));
        }
        section
            .push(Block::styled_pair(
                "NET PAYABLE",
                format_net_payable(totals.net_payable),
                TextStyle::BANNER,
            ))
            .push(Block::Rule(Rule::Double));
        section
    }

    fn footer(&self) -> Section {
        let mut section = Section::new(SectionKind::Footer);
        if !self.payload.config.show_footer {
            return section;
        }

        if let Some(message) = self.payload.shop.footer_message.as_deref() {
            for line in message.lines().map(clean_text).filter(|l| !l.is_empty()) {
                section.push(Block::Text {
                    text: line,
                    align: Align::Center,
                    style: TextStyle::PLAIN,
                });
            }
        }
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutPolicy, WidthClass};
    use shared::Decimal;
    use shared::models::{AdvanceItem, ChitItem, CustomerDetails, ShopDetails};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ring() -> EstimationItem {
        EstimationItem {
            name: "Ring".to_string(),
            pieces: 1,
            gross_weight: d("5"),
            metal: "GOLD".to_string(),
            purity: "22K".to_string(),
            rate: d("6000"),
            wastage: d("2"),
            making_charge: d("500"),
            making_charge_type: MakingChargeType::Fixed,
            ..Default::default()
        }
    }

    fn build(payload: &ReceiptPayload, class: WidthClass) -> Document {
        let calculator = TotalsCalculator::from_config(&payload.config);
        let totals = calculator.compute(
            &payload.items,
            &payload.purchases,
            &payload.chits,
            &payload.advances,
        );
        ReceiptBuilder::new(payload, calculator, &totals, LayoutPolicy::for_class(class))
            .build("TEST")
    }

    fn pair_value<'d>(doc: &'d Document, kind: SectionKind, label: &str) -> Option<&'d str> {
        doc.section(kind)?.blocks.iter().find_map(|b| match b {
            Block::Pair { label: l, value, .. } if l == label => Some(value.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_clean_text_removes_control_characters() {
        assert_eq!(clean_text(" Ring\x1B@\x1D!x "), "Ring@!x");
        assert_eq!(clean_text("a\tb\nc"), "a b c");
    }

    #[test]
    fn test_item_receipt_sections_and_figures() {
        let payload = ReceiptPayload {
            items: vec![ring()],
            shop: ShopDetails {
                name: Some("Sri Lakshmi Jewellers".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let doc = build(&payload, WidthClass::Medium);

        assert_eq!(
            doc.section_kinds(),
            vec![
                SectionKind::Header,
                SectionKind::Title,
                SectionKind::Meta,
                SectionKind::Items,
                SectionKind::Gst,
                SectionKind::NetAmount,
            ]
        );
        assert_eq!(pair_value(&doc, SectionKind::Meta, "GOLD 22K"), Some("Rs.6,000/g"));
        assert_eq!(pair_value(&doc, SectionKind::Items, "Taxable Value"), Some("Rs.31,100"));
        assert_eq!(pair_value(&doc, SectionKind::Gst, "CGST @1.5%"), Some("Rs.467"));
        assert_eq!(pair_value(&doc, SectionKind::Gst, "SGST @1.5%"), Some("Rs.466"));
        assert_eq!(pair_value(&doc, SectionKind::Gst, "Estimation Amount"), Some("Rs.32,033"));
        assert_eq!(pair_value(&doc, SectionKind::NetAmount, "NET PAYABLE"), Some("Rs.32,033"));
        assert_eq!(doc.figures.taxable, "31100");
        assert_eq!(doc.figures.gst, "933");
    }

    #[test]
    fn test_item_row_cells_follow_display_style() {
        let mut payload = ReceiptPayload {
            items: vec![ring()],
            ..Default::default()
        };
        let doc = build(&payload, WidthClass::Medium);
        let Some(Block::Table(table)) = doc.section(SectionKind::Items).map(|s| &s.blocks[0]) else {
            panic!("items table missing");
        };
        assert_eq!(table.rows[0], vec!["Ring", "1", "5.000", "2%", "500", "31,100"]);

        payload.config.wastage_display = ChargeDisplay::Value;
        let doc = build(&payload, WidthClass::Medium);
        let Some(Block::Table(table)) = doc.section(SectionKind::Items).map(|s| &s.blocks[0]) else {
            panic!("items table missing");
        };
        assert_eq!(table.rows[0][3], "600");
    }

    #[test]
    fn test_chit_only_has_no_rates_or_gst() {
        let payload = ReceiptPayload {
            chits: vec![ChitItem {
                id: "CH-7".to_string(),
                amount: d("5000"),
            }],
            shop: ShopDetails {
                name: Some("Shop".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let doc = build(&payload, WidthClass::Narrow);

        assert_eq!(
            doc.section_kinds(),
            vec![
                SectionKind::Header,
                SectionKind::Title,
                SectionKind::Chit,
                SectionKind::NetAmount,
            ]
        );
        assert_eq!(
            pair_value(&doc, SectionKind::NetAmount, "NET PAYABLE"),
            Some("Rs.5,000 (CR)")
        );
    }

    #[test]
    fn test_gst_disabled_moves_estimation_amount_into_items() {
        let mut payload = ReceiptPayload {
            items: vec![ring()],
            advances: vec![AdvanceItem {
                id: "A1".to_string(),
                amount: d("100"),
            }],
            ..Default::default()
        };
        payload.config.show_gst = false;
        let doc = build(&payload, WidthClass::Wide);

        assert!(!doc.has_section(SectionKind::Gst));
        assert_eq!(
            pair_value(&doc, SectionKind::Items, "Estimation Amount"),
            Some("Rs.31,100")
        );
        assert_eq!(
            pair_value(&doc, SectionKind::NetAmount, "Less Deductions"),
            Some("Rs.100")
        );
        assert_eq!(pair_value(&doc, SectionKind::NetAmount, "NET PAYABLE"), Some("Rs.31,000"));
    }

    #[test]
    fn test_toggles_suppress_header_and_parties() {
        let mut payload = ReceiptPayload {
            items: vec![ring()],
            shop: ShopDetails {
                name: Some("Shop".to_string()),
                device_label: Some("Counter 2".to_string()),
                ..Default::default()
            },
            customer: Some(CustomerDetails {
                name: Some("Meena".to_string()),
                ..Default::default()
            }),
            operator: Some("Ravi".to_string()),
            ..Default::default()
        };
        let doc = build(&payload, WidthClass::Medium);
        assert_eq!(pair_value(&doc, SectionKind::Parties, "Customer"), Some("Meena"));
        assert_eq!(pair_value(&doc, SectionKind::Parties, "Operator"), Some("Ravi"));

        payload.config.show_header = false;
        payload.config.show_customer = false;
        payload.config.show_operator = false;
        let doc = build(&payload, WidthClass::Medium);
        assert!(!doc.has_section(SectionKind::Header));
        assert!(!doc.has_section(SectionKind::Parties));
    }

    #[test]
    fn test_distinct_rates_in_first_seen_order() {
        let silver = EstimationItem {
            metal: "SILVER".to_string(),
            purity: "925".to_string(),
            rate: d("95"),
            ..ring()
        };
        let payload = ReceiptPayload {
            items: vec![ring(), silver, ring()],
            ..Default::default()
        };
        let doc = build(&payload, WidthClass::Medium);
        let labels: Vec<&str> = doc
            .section(SectionKind::Meta)
            .map(|s| {
                s.blocks
                    .iter()
                    .filter_map(|b| match b {
                        Block::Pair { label, .. } => Some(label.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(labels, vec!["GOLD 22K", "SILVER 925"]);
    }
}
