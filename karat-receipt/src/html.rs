//! HTML renderer for the system print pipeline
//!
//! Produces one standalone document with an embedded stylesheet sized to
//! the paper tier. No external resources are referenced.

use crate::document::{Block, Document, DocumentVisitor, Rule, Section, SectionKind, Table, TextStyle};
use crate::layout::{Column, ItemLayout, Layout};
use std::fmt::Write as _;

/// Escape text for element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn stylesheet(layout: &Layout) -> String {
    format!(
        r#"*{{box-sizing:border-box;margin:0;padding:0}}
body{{background:#fff;color:#000}}
.receipt{{max-width:{width}ch;margin:0 auto;padding:4px;font-family:'Courier New',Courier,monospace;font-size:{font}px;line-height:1.3}}
.line{{white-space:pre-wrap;word-break:break-word}}
.line.center{{text-align:center}}
.line.right{{text-align:right}}
.bold{{font-weight:bold}}
.double{{font-size:2em}}
.pair{{display:flex;justify-content:space-between;gap:1ch}}
.pair .value{{text-align:right;white-space:nowrap}}
hr{{border:0;margin:2px 0}}
hr.single{{border-top:1px dashed #000}}
hr.double{{border-top:3px double #000}}
table.items{{width:100%;border-collapse:collapse;table-layout:fixed}}
table.items th,table.items td{{padding:1px 0;overflow:hidden;white-space:nowrap}}
table.items th{{border-bottom:1px dashed #000}}
table.items .left{{text-align:left}}
table.items .right{{text-align:right}}
table.items tr.name-row td{{white-space:normal;padding-top:3px}}
@media print{{@page{{margin:0}}}}"#,
        width = layout.char_width,
        font = layout.class.css_font_px(),
    )
}

fn style_classes(style: TextStyle) -> &'static str {
    match (style.bold, style.double) {
        (true, true) => " bold double",
        (true, false) => " bold",
        (false, true) => " double",
        (false, false) => "",
    }
}

pub struct HtmlRenderer {
    out: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
        }
    }

    /// Render a document into a standalone HTML page
    pub fn render(document: &Document) -> String {
        document.accept(Self::new())
    }

    fn table(&mut self, table: &Table) {
        let _ = write!(self.out, r#"<table class="items {}">"#, match table.layout {
            ItemLayout::Tabular => "tabular",
            ItemLayout::MultiLine => "multi-line",
        });

        let figure_columns: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| table.layout == ItemLayout::Tabular || c.column != Column::Name)
            .map(|(i, _)| i)
            .collect();

        self.out.push_str("<colgroup>");
        for &i in &figure_columns {
            let _ = write!(self.out, r#"<col style="width:{}ch">"#, table.columns[i].width);
        }
        self.out.push_str("</colgroup><thead>");

        if table.layout == ItemLayout::MultiLine
            && let Some(name) = table.header.first()
        {
            let _ = write!(
                self.out,
                r#"<tr class="name-row"><th class="left" colspan="{}">{}</th></tr>"#,
                figure_columns.len(),
                escape_html(name)
            );
        }
        self.out.push_str("<tr>");
        for &i in &figure_columns {
            let heading = table.header.get(i).map(String::as_str).unwrap_or("");
            let _ = write!(
                self.out,
                r#"<th class="{}">{}</th>"#,
                table.columns[i].align.as_css(),
                escape_html(heading)
            );
        }
        self.out.push_str("</tr></thead><tbody>");

        for row in &table.rows {
            if table.layout == ItemLayout::MultiLine
                && let Some(name) = row.first()
            {
                let _ = write!(
                    self.out,
                    r#"<tr class="name-row"><td class="left" colspan="{}">{}</td></tr>"#,
                    figure_columns.len(),
                    escape_html(name)
                );
            }
            self.out.push_str("<tr>");
            for &i in &figure_columns {
                let value = row.get(i).map(String::as_str).unwrap_or("");
                let _ = write!(
                    self.out,
                    r#"<td class="{}">{}</td>"#,
                    table.columns[i].align.as_css(),
                    escape_html(value)
                );
            }
            self.out.push_str("</tr>");
        }
        self.out.push_str("</tbody></table>");
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for HtmlRenderer {
    type Output = String;

    fn begin(&mut self, document: &Document) {
        let layout = &document.layout;
        let _ = write!(
            self.out,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
            escape_html(&document.title),
            stylesheet(layout)
        );
        let figures = &document.figures;
        let _ = writeln!(
            self.out,
            r#"<div class="receipt {}" data-paper="{}" data-taxable="{}" data-gst="{}" data-net-payable="{}">"#,
            layout.class.css_class(),
            layout.class.label(),
            escape_html(&figures.taxable),
            escape_html(&figures.gst),
            escape_html(&figures.net_payable),
        );
    }

    fn enter_section(&mut self, section: &Section) {
        let _ = write!(self.out, r#"<section class="sec-{}">"#, section.kind.as_str());
    }

    fn visit_block(&mut self, _kind: SectionKind, block: &Block) {
        match block {
            Block::Text { text, align, style } => {
                let _ = write!(
                    self.out,
                    r#"<div class="line {}{}">{}</div>"#,
                    align.as_css(),
                    style_classes(*style),
                    escape_html(text)
                );
            }
            Block::Pair {
                label,
                value,
                style,
            } => {
                let _ = write!(
                    self.out,
                    r#"<div class="pair{}"><span class="label">{}</span><span class="value">{}</span></div>"#,
                    style_classes(*style),
                    escape_html(label),
                    escape_html(value)
                );
            }
            Block::Table(table) => self.table(table),
            Block::Rule(Rule::Single) => self.out.push_str(r#"<hr class="single">"#),
            Block::Rule(Rule::Double) => self.out.push_str(r#"<hr class="double">"#),
        }
    }

    fn leave_section(&mut self, _section: &Section) {
        self.out.push_str("</section>\n");
    }

    fn finish(mut self, _document: &Document) -> String {
        self.out.push_str("</div>\n</body>\n</html>\n");
        self.out
    }
}
