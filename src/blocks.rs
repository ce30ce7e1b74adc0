//! Embedded JSON block selection.
//!
//! Pages carry their data as many `<script type="application/json">` elements
//! flagged with `data-content-len` and `data-sjs`. Each extractor picks one of
//! them by fingerprint, so the order blocks are scanned in matters: most
//! lookups scan largest-first, a few need document order because the largest
//! block is the wrong one for them.

use dom_query::{Document, Selection};
use serde_json::Value;
use tendril::StrTendril;
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::Fingerprint;

const BLOCK_SELECTOR: &str = r#"script[type="application/json"][data-content-len][data-sjs]"#;

/// One embedded JSON payload, still unparsed.
#[derive(Debug, Clone)]
pub struct JsonBlock {
    /// Raw script text.
    pub text: StrTendril,
    /// Value of `data-content-len`; unparsable declarations count as 0.
    pub declared_len: usize,
}

impl JsonBlock {
    /// Parse the raw text.
    pub fn parse(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.text)?)
    }
}

/// Scan order for fingerprint lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockOrder {
    /// Descending by declared length, ties in document order.
    #[default]
    Sorted,
    /// Document order.
    Document,
}

/// Collect the data-carrier script blocks of `doc`.
///
/// With `sort`, blocks are ordered by declared length, largest first.
#[must_use]
pub fn json_blocks(doc: &Document, sort: bool) -> Vec<JsonBlock> {
    let mut blocks: Vec<JsonBlock> = doc
        .select(BLOCK_SELECTOR)
        .nodes()
        .iter()
        .map(|node| {
            let sel = Selection::from(*node);
            let declared_len = sel
                .attr("data-content-len")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            JsonBlock { text: sel.text(), declared_len }
        })
        .collect();

    if sort {
        blocks.sort_by(|a, b| b.declared_len.cmp(&a.declared_len));
    }
    blocks
}

/// The data blocks of one page, kept in both scan orders.
#[derive(Debug, Clone, Default)]
pub struct BlockSet {
    document: Vec<JsonBlock>,
    sorted: Vec<JsonBlock>,
}

impl BlockSet {
    /// Parse `html` and collect its data blocks.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self::from_document(&Document::from(html))
    }

    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let document = json_blocks(doc, false);
        let mut sorted = document.clone();
        sorted.sort_by(|a, b| b.declared_len.cmp(&a.declared_len));
        debug!(blocks = document.len(), "collected json blocks");
        Self { document, sorted }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.document.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Blocks in the requested order.
    #[must_use]
    pub fn blocks(&self, order: BlockOrder) -> &[JsonBlock] {
        match order {
            BlockOrder::Sorted => &self.sorted,
            BlockOrder::Document => &self.document,
        }
    }

    /// Blocks whose raw text matches `fingerprint`, in the requested order.
    pub fn matching<'a>(
        &'a self,
        fingerprint: &'a Fingerprint,
        order: BlockOrder,
    ) -> impl Iterator<Item = &'a JsonBlock> {
        self.blocks(order)
            .iter()
            .filter(move |block| fingerprint.matches(&block.text))
    }

    /// Parse the first block matching `fingerprint`.
    ///
    /// `what` names the wanted shape in the [`Error::BlockNotFound`] diagnostic.
    pub fn find(&self, fingerprint: &Fingerprint, order: BlockOrder, what: &'static str) -> Result<Value> {
        let block = self
            .matching(fingerprint, order)
            .next()
            .ok_or(Error::BlockNotFound(what))?;
        debug!(block = what, declared_len = block.declared_len, "selected json block");
        block.parse()
    }
}
