//! Document persistence.
//!
//! Documents are stored as a raw block record (one entry per block with its
//! text and inline style ranges) serialized to JSON under a single key of a
//! [`KeyValueStore`]. Style names only exist at this boundary.

mod store;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::document::{Block, BlockId, Document, InlineStyle, StyleRange};
use crate::editor::{PendingMarker, sanitize};
use crate::error::{Error, Result};

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Store key used when none is configured.
pub const DEFAULT_KEY: &str = "draftEditorContent";

const BLOCK_TYPE: &str = "unstyled";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    #[serde(default)]
    pub key: String,
    pub text: String,
    #[serde(rename = "type", default = "default_block_type")]
    pub block_type: String,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

fn default_block_type() -> String {
    BLOCK_TYPE.to_string()
}

/// Convert a document to its raw record, blocks in order.
pub fn serialize(document: &Document) -> RawDocument {
    let blocks = document
        .blocks()
        .iter()
        .map(|block| RawBlock {
            key: block.id().to_string(),
            text: block.text().to_string(),
            block_type: default_block_type(),
            depth: 0,
            inline_style_ranges: block
                .style_ranges()
                .iter()
                .map(|range| RawStyleRange {
                    offset: range.offset,
                    length: range.length,
                    style: range.style.name().to_string(),
                })
                .collect(),
            entity_ranges: Vec::new(),
            data: Map::new(),
        })
        .collect();
    RawDocument {
        blocks,
        entity_map: Map::new(),
    }
}

/// Rebuild a document from a raw record.
///
/// Block ids are minted fresh and the caret lands at the start of the first
/// block. Unknown style names are skipped.
///
/// # Errors
///
/// Returns [`Error::CorruptDocument`] when a range is empty, out of bounds,
/// or overlaps another range of the same style.
pub fn deserialize(raw: RawDocument) -> Result<Document> {
    let blocks = raw
        .blocks
        .into_iter()
        .map(|raw_block| {
            let ranges = raw_block
                .inline_style_ranges
                .iter()
                .filter_map(|range| match InlineStyle::from_name(&range.style) {
                    Some(style) => Some(StyleRange::new(style, range.offset, range.length)),
                    None => {
                        warn!(style = %range.style, block = %raw_block.key, "skipping unknown inline style");
                        None
                    }
                })
                .collect();
            Block::from_parts(BlockId::new(0), raw_block.text, ranges)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Document::from_blocks(blocks))
}

/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn to_json(raw: &RawDocument) -> Result<String> {
    Ok(serde_json::to_string(raw)?)
}

/// # Errors
///
/// Returns [`Error::Json`] when the string is not a valid record.
pub fn from_json(json: &str) -> Result<RawDocument> {
    Ok(serde_json::from_str(json)?)
}

/// Sanitize, serialize and write the document under `key`.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, document: &Document) -> Result<()> {
    let clean = sanitize(document.clone(), PendingMarker::None);
    let json = to_json(&serialize(&clean))?;
    store.set(key, json)?;
    info!(key, blocks = clean.blocks().len(), "document saved");
    Ok(())
}

/// Read the record under `key`, `None` when the key is absent.
///
/// # Errors
///
/// Returns an error when the store fails or the record is malformed or
/// corrupt.
pub fn try_load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<Document>> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let document = deserialize(from_json(&json)?)?;
    Ok(Some(document))
}

/// Load the document under `key`, falling back to an empty document.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Document {
    match try_load(store, key) {
        Ok(Some(document)) => {
            info!(key, blocks = document.blocks().len(), "document loaded");
            document
        }
        Ok(None) => {
            warn!(key, "no stored document, starting empty");
            Document::empty()
        }
        Err(err @ Error::CorruptDocument(_)) => {
            warn!(key, %err, "discarding corrupt stored document");
            Document::empty()
        }
        Err(err) => {
            warn!(key, %err, "failed to load stored document, starting empty");
            Document::empty()
        }
    }
}
