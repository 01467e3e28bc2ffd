// src/models/page.rs

//! Page, block, and identifier data structures.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Separator characters that carry no meaning inside an identifier.
const COSMETIC_SEPARATORS: &[char] = &['-'];

/// Characters that would turn an id into more than one path component.
const PATH_SEPARATORS: &[char] = &['/', '\\', '\0'];

/// Free stack below which nested (de)serialization moves to a new segment.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Canonicalize a raw identifier.
///
/// Converts `2131b10c-ebf6-4938-a127-7089ff02dbe4` to
/// `2131b10cebf64938a1277089ff02dbe4`. Case is preserved.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !COSMETIC_SEPARATORS.contains(c))
        .collect()
}

/// A normalized page identifier.
///
/// The only way to build one is through [`PageId::new`], so every id that is
/// stored, compared, or turned into a file name is already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PageId(String);

impl PageId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id can name exactly one file inside a directory.
    pub fn is_safe_key(&self) -> bool {
        !matches!(self.0.as_str(), "" | "." | "..") && !self.0.contains(PATH_SEPARATORS)
    }

    /// The id as a file name stem, rejecting ids that would leave the
    /// directory they are joined to.
    pub fn file_key(&self) -> crate::error::Result<&str> {
        if self.is_safe_key() {
            Ok(&self.0)
        } else {
            Err(AppError::InvalidId(self.0.clone()))
        }
    }
}

impl From<String> for PageId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for PageId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<PageId> for String {
    fn from(id: PageId) -> Self {
        id.0
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block type tag. Only page references matter to the crawler; every other
/// tag is kept verbatim for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Page,
    Other(String),
}

const PAGE_KIND: &str = "page";

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        if tag == PAGE_KIND {
            BlockKind::Page
        } else {
            BlockKind::Other(tag)
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Page => PAGE_KIND.to_string(),
            BlockKind::Other(tag) => tag,
        }
    }
}

/// A node in a page's content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Raw identifier as issued by the remote service
    pub id: String,

    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Renderer-facing attributes, passed through untouched
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,

    /// Child blocks. Both the list and its entries may be null.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_children"
    )]
    pub content: Option<Vec<Option<Block>>>,
}

fn serialize_children<S: Serializer>(
    content: &Option<Vec<Option<Block>>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || content.serialize(serializer))
}

impl Drop for Block {
    // Tear the tree down iteratively; the derived drop recurses once per level.
    fn drop(&mut self) {
        let Some(children) = self.content.take() else {
            return;
        };
        let mut pending: Vec<Block> = children.into_iter().flatten().collect();
        while let Some(mut block) = pending.pop() {
            if let Some(children) = block.content.take() {
                pending.extend(children.into_iter().flatten());
            }
        }
    }
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
            properties: Map::new(),
            content: None,
        }
    }

    /// A block referencing another page.
    pub fn page(id: impl Into<String>, title: impl Into<String>) -> Self {
        let mut block = Self::new(id, BlockKind::Page);
        block.title = Some(title.into());
        block
    }

    /// A non-page block of the given type.
    pub fn other(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Other(tag.into()))
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.content = Some(children.into_iter().map(Some).collect());
        self
    }

    pub fn is_page_reference(&self) -> bool {
        self.kind == BlockKind::Page
    }

    /// Non-null children in document order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Block> {
        self.content.iter().flatten().flatten()
    }
}

/// A fetched page: its root block plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Raw identifier as issued by the remote service
    pub id: String,

    pub root: Block,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Page {
    /// Parse a page from JSON of any nesting depth.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        let mut json = serde_json::Deserializer::from_slice(bytes);
        json.disable_recursion_limit();
        let mut stacked = serde_stacker::Deserializer::new(&mut json);
        stacked.red_zone = STACK_RED_ZONE;
        stacked.stack_size = STACK_SEGMENT;
        let page = Page::deserialize(stacked)?;
        json.end()?;
        Ok(page)
    }

    pub fn new(root: Block) -> Self {
        Self {
            id: root.id.clone(),
            root,
            metadata: Map::new(),
        }
    }

    /// Normalized identifier of this page.
    pub fn page_id(&self) -> PageId {
        PageId::new(&self.id)
    }

    pub fn title(&self) -> &str {
        self.root.title.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_hyphens() {
        assert_eq!(
            normalize("2131b10c-ebf6-4938-a127-7089ff02dbe4"),
            "2131b10cebf64938a1277089ff02dbe4"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["2131b10c-ebf6-4938-a127-7089ff02dbe4", "--a-B-", "plain", ""] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_preserves_case() {
        assert_eq!(normalize("AbC-dEf"), "AbCdEf");
    }

    #[test]
    fn test_page_id_equality_ignores_separators() {
        assert_eq!(PageId::new("ab-cd"), PageId::new("abcd"));
        assert_ne!(PageId::new("abcd"), PageId::new("ABCD"));
    }

    #[test]
    fn test_page_id_deserializes_normalized() {
        let id: PageId = serde_json::from_str("\"ab-cd-ef\"").unwrap();
        assert_eq!(id.as_str(), "abcdef");
    }

    #[test]
    fn test_block_kind_keeps_unknown_tags() {
        let json = r#"{"id":"x","type":"callout"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind, BlockKind::Other("callout".into()));
        assert_eq!(serde_json::to_string(&block).unwrap(), json);
    }

    #[test]
    fn test_null_children_are_skipped() {
        let json = r#"{"id":"r","type":"page","content":[null,{"id":"c","type":"text"},null]}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = block.children().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);

        let json = r#"{"id":"r","type":"page","content":null}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.children().count(), 0);
    }

    #[test]
    fn test_file_key_rejects_path_components() {
        assert_eq!(PageId::new("ab-cd").file_key().unwrap(), "abcd");
        for raw in ["../escaped", "a/b", "a\\b", "", "-", ".", ".-.", "nul\0byte"] {
            let id = PageId::new(raw);
            assert!(!id.is_safe_key(), "{raw:?} accepted");
            assert!(matches!(id.file_key(), Err(AppError::InvalidId(_))));
        }
    }

    fn nested_json(depth: usize) -> String {
        let mut json = String::from(r#"{"id":"root","root":"#);
        for level in 0..depth {
            json.push_str(&format!(r#"{{"id":"n{level}","type":"toggle","content":["#));
        }
        json.push_str(r#"{"id":"leaf","type":"page","title":"Leaf"}"#);
        for _ in 0..depth {
            json.push_str("]}");
        }
        json.push('}');
        json
    }

    #[test]
    fn test_from_json_accepts_deep_nesting() {
        let page = Page::from_json(nested_json(20_000).as_bytes()).unwrap();

        let mut depth = 0;
        let mut block = &page.root;
        while let Some(child) = block.children().next() {
            block = child;
            depth += 1;
        }
        assert_eq!(depth, 20_000);
        assert_eq!(block.id, "leaf");
    }

    #[test]
    fn test_deep_page_serializes_and_drops() {
        let page = Page::from_json(nested_json(20_000).as_bytes()).unwrap();
        let bytes = serde_json::to_vec(&page).unwrap();

        let reparsed = Page::from_json(&bytes).unwrap();
        assert_eq!(reparsed.id, "root");
        drop(page);
        drop(reparsed);
    }

    #[test]
    fn test_from_json_rejects_trailing_data() {
        let json = r#"{"id":"r","root":{"id":"r","type":"page"}} extra"#;
        assert!(Page::from_json(json.as_bytes()).is_err());
    }

    #[test]
    fn test_page_title_and_id() {
        let page = Page::new(Block::page("ab-cd", "Index"));
        assert_eq!(page.title(), "Index");
        assert_eq!(page.page_id().as_str(), "abcd");
    }
}
