//! Shared receipt representation
//!
//! A receipt is built once as `Document` → `Section` → `Block` and then
//! walked by a `DocumentVisitor`. The thermal and HTML renderers are both
//! visitors, so section presence, titles and every figure come from the
//! same tree.

use crate::layout::{ColumnSpec, ItemLayout, Layout};
use serde::Serialize;

pub use crate::layout::Align;

/// Fixed print order of receipt sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Title,
    /// Date, estimation number and metal rates
    Meta,
    /// Customer and operator
    Parties,
    Items,
    Gst,
    Purchase,
    Chit,
    Advance,
    NetAmount,
    Footer,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Title => "title",
            SectionKind::Meta => "meta",
            SectionKind::Parties => "parties",
            SectionKind::Items => "items",
            SectionKind::Gst => "gst",
            SectionKind::Purchase => "purchase",
            SectionKind::Chit => "chit",
            SectionKind::Advance => "advance",
            SectionKind::NetAmount => "net-amount",
            SectionKind::Footer => "footer",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    /// Double width and height
    pub double: bool,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        double: false,
    };
    pub const BOLD: TextStyle = TextStyle {
        bold: true,
        double: false,
    };
    pub const BANNER: TextStyle = TextStyle {
        bold: true,
        double: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// `-----`
    Single,
    /// `=====`
    Double,
}

/// Line-item table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<ColumnSpec>,
    /// One heading per column
    pub header: Vec<String>,
    /// One cell per column; the first cell is the item name
    pub rows: Vec<Vec<String>>,
    pub layout: ItemLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Block {
    Text {
        text: String,
        align: Align,
        style: TextStyle,
    },
    /// Label on the left, value on the right
    Pair {
        label: String,
        value: String,
        style: TextStyle,
    },
    Table(Table),
    Rule(Rule),
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Text {
            text: text.into(),
            align: Align::Left,
            style: TextStyle::PLAIN,
        }
    }

    pub fn centered(text: impl Into<String>, style: TextStyle) -> Self {
        Block::Text {
            text: text.into(),
            align: Align::Center,
            style,
        }
    }

    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        Block::Pair {
            label: label.into(),
            value: value.into(),
            style: TextStyle::PLAIN,
        }
    }

    pub fn styled_pair(label: impl Into<String>, value: impl Into<String>, style: TextStyle) -> Self {
        Block::Pair {
            label: label.into(),
            value: value.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Rounded figures both renderers expose, as plain integers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Figures {
    pub taxable: String,
    pub gst: String,
    pub net_payable: String,
}

/// A fully computed receipt, ready for any renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub layout: Layout,
    pub sections: Vec<Section>,
    pub figures: Figures,
}

impl Document {
    pub fn new(title: impl Into<String>, layout: Layout, figures: Figures) -> Self {
        Self {
            title: title.into(),
            layout,
            sections: Vec::new(),
            figures,
        }
    }

    /// Append a section; sections without blocks are dropped
    pub fn push_section(&mut self, section: Section) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.section(kind).is_some()
    }

    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }

    /// Walk the tree in print order
    pub fn accept<V: DocumentVisitor>(&self, mut visitor: V) -> V::Output {
        visitor.begin(self);
        for section in &self.sections {
            visitor.enter_section(section);
            for block in &section.blocks {
                visitor.visit_block(section.kind, block);
            }
            visitor.leave_section(section);
        }
        visitor.finish(self)
    }
}

/// A renderer over `Document`
pub trait DocumentVisitor {
    type Output;

    fn begin(&mut self, _document: &Document) {}

    fn enter_section(&mut self, _section: &Section) {}

    fn visit_block(&mut self, kind: SectionKind, block: &Block);

    fn leave_section(&mut self, _section: &Section) {}

    fn finish(self, document: &Document) -> Self::Output;
}
