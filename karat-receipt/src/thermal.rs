//! ESC/POS renderer
//!
//! Walks a `Document` and writes it through `EscPosTextBuilder`. Output is a
//! UTF-8 string; conversion to the printer code page happens at the sink.

use crate::document::{Align, Block, Document, DocumentVisitor, Rule, SectionKind, Table, TextStyle};
use crate::layout::{Column, ColumnSpec, ItemLayout, Layout, MIN_NAME_WIDTH};
use karat_printer::{EscPosTextBuilder, pad_left, pad_right, text_width, truncate_to_width};

/// Blank lines fed after the last line to clear the cutter
pub const TRAILING_FEED_LINES: usize = 5;

/// Right-align within `width`, keeping every character of longer text
fn flush_right(text: &str, width: usize) -> String {
    pad_left(text, width.max(text_width(text)))
}

/// Pad one cell to its column width; only the name cell is ever cut short
fn cell(text: &str, spec: &ColumnSpec) -> String {
    match spec.align {
        Align::Right => flush_right(text, spec.width),
        Align::Left | Align::Center => pad_right(text, spec.width),
    }
}

fn join_cells<'a>(cells: impl Iterator<Item = (&'a String, &'a ColumnSpec)>) -> String {
    cells
        .map(|(text, spec)| cell(text, spec))
        .collect::<Vec<_>>()
        .join(" ")
}

fn figure_cells<'a>(
    row: &'a [String],
    columns: &'a [ColumnSpec],
) -> impl Iterator<Item = (&'a String, &'a ColumnSpec)> {
    row.iter()
        .zip(columns)
        .filter(|(_, spec)| spec.column != Column::Name)
}

/// Characters the figures of a row need beyond their column widths
fn overflow(row: &[String], columns: &[ColumnSpec]) -> usize {
    figure_cells(row, columns)
        .map(|(text, spec)| text_width(text).saturating_sub(spec.width))
        .sum()
}

pub struct ThermalRenderer {
    b: EscPosTextBuilder,
}

impl ThermalRenderer {
    pub fn new(layout: &Layout) -> Self {
        Self {
            b: EscPosTextBuilder::new(layout.char_width),
        }
    }

    /// Render a document into an ESC/POS text stream
    pub fn render(document: &Document) -> String {
        document.accept(Self::new(&document.layout))
    }

    fn style_on(&mut self, style: TextStyle) {
        if style.bold {
            self.b.bold_on();
        }
        if style.double {
            self.b.size_double();
        }
    }

    fn style_off(&mut self, style: TextStyle) {
        if style.double {
            self.b.size_reset();
        }
        if style.bold {
            self.b.bold_off();
        }
    }

    fn text(&mut self, text: &str, align: Align, style: TextStyle) {
        match align {
            Align::Left => {}
            Align::Center => {
                self.b.align_center();
            }
            Align::Right => {
                self.b.align_right();
            }
        }
        self.style_on(style);
        self.b.write_line(text);
        self.style_off(style);
        if align != Align::Left {
            self.b.align_left();
        }
    }

    fn pair(&mut self, label: &str, value: &str, style: TextStyle) {
        self.style_on(style);
        if style.double {
            self.b.line_lr_double(label, value);
        } else {
            self.b.line_lr(label, value);
        }
        self.style_off(style);
    }

    fn table(&mut self, table: &Table) {
        self.b.bold_on();
        match table.layout {
            ItemLayout::Tabular => {
                self.b
                    .write_line(join_cells(table.header.iter().zip(&table.columns)).trim_end());
            }
            ItemLayout::MultiLine => {
                if let Some(name) = table.header.first() {
                    self.b.write_line(name);
                }
                self.b
                    .write_line(join_cells(figure_cells(&table.header, &table.columns)).trim_end());
            }
        }
        self.b.bold_off();
        self.b.dash_sep();

        let name_width = table.columns.first().map_or(0, |c| c.width);
        for row in &table.rows {
            let excess = overflow(row, &table.columns);
            if table.layout == ItemLayout::Tabular && name_width >= excess + MIN_NAME_WIDTH {
                // wide figures borrow from the name cell
                let line = row
                    .iter()
                    .zip(&table.columns)
                    .map(|(text, spec)| match spec.column {
                        Column::Name => pad_right(text, name_width - excess),
                        _ => cell(text, spec),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                self.b.write_line(line.trim_end());
            } else {
                self.split_row(row, &table.columns);
            }
        }
    }

    /// Name on its own line, figures flush right beneath it
    ///
    /// When the figures still do not fit, the amount drops to a line of
    /// its own.
    fn split_row(&mut self, row: &[String], columns: &[ColumnSpec]) {
        let width = self.b.width();
        if let Some(name) = row.first() {
            self.b.write_line(&truncate_to_width(name, width));
        }

        let figures = join_cells(figure_cells(row, columns));
        if text_width(&figures) <= width {
            self.b.write_line(&pad_left(&figures, width));
            return;
        }

        let (amounts, others): (Vec<_>, Vec<_>) = figure_cells(row, columns)
            .partition(|(_, spec)| spec.column == Column::Amount);
        self.b
            .write_line(&flush_right(&join_cells(others.into_iter()), width));
        for (amount, _) in amounts {
            self.b.write_line(&flush_right(amount, width));
        }
    }
}

impl DocumentVisitor for ThermalRenderer {
    type Output = String;

    fn begin(&mut self, _document: &Document) {
        self.b.reset();
    }

    fn visit_block(&mut self, _kind: SectionKind, block: &Block) {
        match block {
            Block::Text { text, align, style } => self.text(text, *align, *style),
            Block::Pair {
                label,
                value,
                style,
            } => self.pair(label, value, *style),
            Block::Table(table) => self.table(table),
            Block::Rule(Rule::Single) => {
                self.b.dash_sep();
            }
            Block::Rule(Rule::Double) => {
                self.b.eq_sep();
            }
        }
    }

    fn finish(mut self, _document: &Document) -> String {
        self.b.feed(TRAILING_FEED_LINES);
        self.b.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Figures, Section};
    use crate::layout::{LayoutPolicy, WidthClass};
    use karat_printer::{commands, strip_control_sequences, text_width};

    fn doc(class: WidthClass) -> Document {
        doc_with_row(class, ["Ring", "1", "5.000", "2%", "500", "31,100"])
    }

    fn doc_with_row(class: WidthClass, row: [&str; 6]) -> Document {
        let layout = LayoutPolicy::for_class(class);
        let columns = layout.visible_columns(true, true);
        let mut d = Document::new(
            "ESTIMATION SLIP",
            layout,
            Figures {
                taxable: "31100".to_string(),
                gst: "933".to_string(),
                net_payable: "32033".to_string(),
            },
        );
        let mut title = Section::new(SectionKind::Title);
        title.push(Block::centered("ESTIMATION SLIP", TextStyle::BOLD));
        d.push_section(title);

        let mut items = Section::new(SectionKind::Items);
        items.push(Block::Table(Table {
            header: vec!["Item", "Pc", "Wt", "VA", "MC", "Amount"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows: vec![row.into_iter().map(String::from).collect()],
            columns,
            layout: layout.item_layout,
        }));
        d.push_section(items);

        let mut net = Section::new(SectionKind::NetAmount);
        net.push(Block::styled_pair("NET PAYABLE", "Rs.32,033", TextStyle::BANNER));
        d.push_section(net);
        d
    }

    #[test]
    fn test_stream_framing() {
        let out = ThermalRenderer::render(&doc(WidthClass::Medium));
        assert!(out.starts_with(commands::RESET));
        assert!(out.ends_with(&"\n".repeat(TRAILING_FEED_LINES)));
        assert!(out.contains(&format!(
            "{}{}ESTIMATION SLIP\n{}{}",
            commands::ALIGN_CENTER,
            commands::BOLD_ON,
            commands::BOLD_OFF,
            commands::ALIGN_LEFT
        )));
    }

    #[test]
    fn test_tabular_row_alignment() {
        let out = ThermalRenderer::render(&doc(WidthClass::Medium));
        let plain = strip_control_sequences(&out);
        let row = plain
            .lines()
            .find(|l| l.starts_with("Ring"))
            .unwrap();
        assert_eq!(row, "Ring        1    5.000    2%    500       31,100");
        assert_eq!(text_width(row), 48);
    }

    #[test]
    fn test_multi_line_items_on_narrow_paper() {
        let out = ThermalRenderer::render(&doc(WidthClass::Narrow));
        let plain = strip_control_sequences(&out);
        let lines: Vec<&str> = plain.lines().collect();
        let idx = lines.iter().position(|l| *l == "Ring").unwrap();
        assert_eq!(lines[idx + 1], " 1   5.000    2%   500    31,100");
        assert!(lines.iter().all(|l| text_width(l) <= 32));
    }

    fn plain_lines(document: &Document) -> Vec<String> {
        strip_control_sequences(&ThermalRenderer::render(document))
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_crore_amount_keeps_every_digit_in_each_tier() {
        let crore = "10,00,00,000";
        for class in [WidthClass::Narrow, WidthClass::Medium, WidthClass::Wide] {
            let document = doc_with_row(class, ["Necklace", "1", "170.000", "2%", "500", crore]);
            let lines = plain_lines(&document);
            let width = document.layout.char_width;

            assert!(lines.iter().any(|l| l.ends_with(&format!(" {crore}"))), "{class:?}");
            assert!(lines.iter().all(|l| text_width(l) <= width), "{class:?}");
        }
    }

    #[test]
    fn test_narrow_amount_moves_to_own_line_when_figures_overflow() {
        let document = doc_with_row(
            WidthClass::Narrow,
            ["Necklace", "1", "170.000", "2%", "500", "10,00,00,000"],
        );
        let lines = plain_lines(&document);
        let idx = lines.iter().position(|l| l == "Necklace").unwrap();

        assert_eq!(lines[idx + 1], format!("{:>32}", "1 170.000    2%   500"));
        assert_eq!(lines[idx + 2], format!("{:>32}", "10,00,00,000"));
    }

    #[test]
    fn test_wide_figure_borrows_from_name_cell() {
        let amount = "1,00,00,00,00,000";
        let document = doc_with_row(WidthClass::Medium, ["Necklace", "1", "5.000", "2%", "500", amount]);
        let lines = plain_lines(&document);
        let row = lines.iter().find(|l| l.starts_with("Neckl")).unwrap();

        assert!(row.ends_with(&format!(" {amount}")));
        assert_eq!(text_width(row), 48);
    }

    #[test]
    fn test_overlong_tabular_figures_split_below_name() {
        let amount = "10,00,00,00,00,00,000";
        let document = doc_with_row(WidthClass::Medium, ["Necklace", "1", "5.000", "2%", "500", amount]);
        let lines = plain_lines(&document);
        let idx = lines.iter().position(|l| l == "Necklace").unwrap();

        assert!(lines[idx + 1].ends_with(amount));
        assert_eq!(text_width(&lines[idx + 1]), 48);
    }

    #[test]
    fn test_banner_pair_uses_double_size_half_width() {
        let out = ThermalRenderer::render(&doc(WidthClass::Narrow));
        let expected = format!(
            "{}{}NET PAYABLE Rs.32,033\n{}{}",
            commands::BOLD_ON,
            commands::DOUBLE_ON,
            commands::DOUBLE_OFF,
            commands::BOLD_OFF
        );
        assert!(out.contains(&expected));
    }
}
