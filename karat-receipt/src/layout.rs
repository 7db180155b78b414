//! Paper width tiers and column layout
//!
//! The raw paper-width string is mapped to a `WidthClass` exactly once, here.
//! Both renderers read character width and column widths from the resulting
//! `Layout` and never derive width-specific constants themselves.

use crate::error::{RenderError, RenderResult};
use serde::Serialize;

/// Physical thermal paper class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthClass {
    /// 58mm paper
    Narrow,
    /// 80mm paper
    Medium,
    /// 112mm paper
    Wide,
}

impl WidthClass {
    /// Map an externally configured paper width
    ///
    /// Accepts `58mm`/`80mm`/`112mm`, the bare numbers, and the inch names
    /// some printer settings screens use. Case and whitespace are ignored.
    pub fn from_paper_width(raw: &str) -> RenderResult<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "58mm" | "58" | "2inch" | "2in" => Ok(WidthClass::Narrow),
            "80mm" | "80" | "3inch" | "3in" => Ok(WidthClass::Medium),
            "112mm" | "112" | "4inch" | "4in" => Ok(WidthClass::Wide),
            _ => Err(RenderError::UnsupportedPaperWidth {
                requested: raw.to_string(),
            }),
        }
    }

    /// Normal-size characters per line
    pub fn char_width(self) -> usize {
        match self {
            WidthClass::Narrow => 32,
            WidthClass::Medium => 48,
            WidthClass::Wide => 64,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WidthClass::Narrow => "58mm",
            WidthClass::Medium => "80mm",
            WidthClass::Wide => "112mm",
        }
    }

    /// CSS class of the receipt container in the HTML output
    pub fn css_class(self) -> &'static str {
        match self {
            WidthClass::Narrow => "tier-narrow",
            WidthClass::Medium => "tier-medium",
            WidthClass::Wide => "tier-wide",
        }
    }

    /// Base font size of the HTML output in px
    pub fn css_font_px(self) -> u32 {
        match self {
            WidthClass::Narrow => 10,
            WidthClass::Medium => 12,
            WidthClass::Wide => 13,
        }
    }
}

/// How item rows are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLayout {
    /// One row per item with every column side by side
    Tabular,
    /// Name on its own line, figures on the line below
    MultiLine,
}

/// Horizontal alignment of a cell or line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Line-item table columns, in print order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Pieces,
    Weight,
    Wastage,
    MakingCharge,
    Amount,
}

/// Authoritative column widths for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnWidths {
    pub name: usize,
    pub pieces: usize,
    pub weight: usize,
    pub wastage: usize,
    pub making_charge: usize,
    pub amount: usize,
}

impl ColumnWidths {
    pub fn width_of(&self, column: Column) -> usize {
        match column {
            Column::Name => self.name,
            Column::Pieces => self.pieces,
            Column::Weight => self.weight,
            Column::Wastage => self.wastage,
            Column::MakingCharge => self.making_charge,
            Column::Amount => self.amount,
        }
    }
}

/// A visible column with its final width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub column: Column,
    pub width: usize,
    pub align: Align,
}

/// Resolved layout for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub class: WidthClass,
    pub char_width: usize,
    pub columns: ColumnWidths,
    pub item_layout: ItemLayout,
}

/// Cells are joined by a single space
pub const COLUMN_GAP: usize = 1;

/// Narrowest name cell kept beside figures before the row is split
pub const MIN_NAME_WIDTH: usize = 4;

impl Layout {
    /// Columns left after hiding wastage and/or making charge
    ///
    /// A hidden column's width, plus its separator, is handed to the name
    /// column so rows still span the full tabular width.
    pub fn visible_columns(&self, show_wastage: bool, show_making_charge: bool) -> Vec<ColumnSpec> {
        let mut name_width = self.columns.name;
        let mut specs = Vec::with_capacity(6);

        for column in [
            Column::Pieces,
            Column::Weight,
            Column::Wastage,
            Column::MakingCharge,
            Column::Amount,
        ] {
            let width = self.columns.width_of(column);
            let hidden = match column {
                Column::Wastage => !show_wastage,
                Column::MakingCharge => !show_making_charge,
                _ => false,
            };
            if hidden {
                name_width += width + COLUMN_GAP;
            } else {
                specs.push(ColumnSpec {
                    column,
                    width,
                    align: Align::Right,
                });
            }
        }

        specs.insert(
            0,
            ColumnSpec {
                column: Column::Name,
                width: name_width,
                align: Align::Left,
            },
        );
        specs
    }

    /// Width of the figures line in multi-line layout
    pub fn detail_width(columns: &[ColumnSpec]) -> usize {
        let figures: Vec<&ColumnSpec> = columns.iter().filter(|c| c.column != Column::Name).collect();
        let cells: usize = figures.iter().map(|c| c.width).sum();
        cells + figures.len().saturating_sub(1) * COLUMN_GAP
    }
}

/// Maps paper widths to layouts
pub struct LayoutPolicy;

impl LayoutPolicy {
    /// Resolve the configured paper width into a `Layout`
    pub fn width_class(paper_width: &str) -> RenderResult<Layout> {
        let class = WidthClass::from_paper_width(paper_width)?;
        Ok(Self::for_class(class))
    }

    pub fn for_class(class: WidthClass) -> Layout {
        let (columns, item_layout) = match class {
            // 58mm cannot fit a name column beside the figures
            WidthClass::Narrow => (
                ColumnWidths {
                    name: 10,
                    pieces: 2,
                    weight: 7,
                    wastage: 5,
                    making_charge: 5,
                    amount: 9,
                },
                ItemLayout::MultiLine,
            ),
            WidthClass::Medium => (
                ColumnWidths {
                    name: 10,
                    pieces: 2,
                    weight: 8,
                    wastage: 5,
                    making_charge: 6,
                    amount: 12,
                },
                ItemLayout::Tabular,
            ),
            WidthClass::Wide => (
                ColumnWidths {
                    name: 18,
                    pieces: 3,
                    weight: 9,
                    wastage: 8,
                    making_charge: 8,
                    amount: 13,
                },
                ItemLayout::Tabular,
            ),
        };

        Layout {
            class,
            char_width: class.char_width(),
            columns,
            item_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_width(specs: &[ColumnSpec]) -> usize {
        specs.iter().map(|c| c.width).sum::<usize>() + (specs.len() - 1) * COLUMN_GAP
    }

    #[test]
    fn test_width_class_mapping() {
        assert_eq!(LayoutPolicy::width_class("58mm").unwrap().char_width, 32);
        assert_eq!(LayoutPolicy::width_class("80mm").unwrap().char_width, 48);
        assert_eq!(LayoutPolicy::width_class("112mm").unwrap().char_width, 64);
        assert_eq!(
            WidthClass::from_paper_width(" 3 Inch ").unwrap(),
            WidthClass::Medium
        );
        assert_eq!(WidthClass::from_paper_width("58").unwrap(), WidthClass::Narrow);
    }

    #[test]
    fn test_unknown_width_reports_requested_tier() {
        let err = LayoutPolicy::width_class("76mm").unwrap_err();
        match err {
            RenderError::UnsupportedPaperWidth { requested } => assert_eq!(requested, "76mm"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_narrow_uses_multi_line_items() {
        let narrow = LayoutPolicy::for_class(WidthClass::Narrow);
        assert_eq!(narrow.item_layout, ItemLayout::MultiLine);
        let specs = narrow.visible_columns(true, true);
        assert_eq!(Layout::detail_width(&specs), narrow.char_width);

        for class in [WidthClass::Medium, WidthClass::Wide] {
            assert_eq!(LayoutPolicy::for_class(class).item_layout, ItemLayout::Tabular);
        }
    }

    #[test]
    fn test_tabular_rows_fill_char_width() {
        for class in [WidthClass::Medium, WidthClass::Wide] {
            let layout = LayoutPolicy::for_class(class);
            let specs = layout.visible_columns(true, true);
            assert_eq!(row_width(&specs), layout.char_width);
        }
    }

    #[test]
    fn test_columns_widen_monotonically() {
        let n = LayoutPolicy::for_class(WidthClass::Narrow).columns;
        let m = LayoutPolicy::for_class(WidthClass::Medium).columns;
        let w = LayoutPolicy::for_class(WidthClass::Wide).columns;
        for column in [
            Column::Name,
            Column::Pieces,
            Column::Weight,
            Column::Wastage,
            Column::MakingCharge,
            Column::Amount,
        ] {
            assert!(n.width_of(column) <= m.width_of(column));
            assert!(m.width_of(column) <= w.width_of(column));
        }
    }

    #[test]
    fn test_amount_column_holds_grouped_figures() {
        let width = |class| LayoutPolicy::for_class(class).columns.amount;
        assert!(width(WidthClass::Narrow) >= "99,99,999".len());
        assert!(width(WidthClass::Medium) >= "10,00,00,000".len());
        assert!(width(WidthClass::Wide) >= "1,00,00,00,000".len());
    }

    #[test]
    fn test_hidden_columns_widen_name() {
        let layout = LayoutPolicy::for_class(WidthClass::Medium);
        let specs = layout.visible_columns(false, false);

        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].column, Column::Name);
        assert_eq!(specs[0].width, 10 + 5 + 1 + 6 + 1);
        assert_eq!(row_width(&specs), layout.char_width);
        assert!(specs.iter().all(|c| c.column != Column::Wastage));
    }
}
