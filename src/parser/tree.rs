//! Generic nested tree produced by both block scanners.
//!
//! A scanned dump is a `Block`: keyed values in document order plus an
//! ordered list of named items (`edit "<name>"` in the edit-set dialect,
//! `<type-path> <name> { ... }` objects in the braced dialect).

/// A value stored under a key inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Explicit null (`unset key`, or the literal `none`).
    Null,

    /// A single token. Bare keywords with no value are stored as an
    /// empty scalar.
    Scalar(String),

    /// Several tokens on one statement, or a one-line `{ a b c }` list.
    List(Vec<String>),

    /// A nested block.
    Block(Block),
}

impl Value {
    /// Get the block inside this value, if it is one.
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Value::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Get the scalar text, if this value is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A repeated named item inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Declared name, unquoted but otherwise verbatim (may be
    /// partition-qualified).
    pub name: String,

    /// 1-based line of the opening statement.
    pub line: usize,

    pub body: Block,
}

/// A block of keyed values and named items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    entries: Vec<(String, Value)>,
    items: Vec<Item>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from a flat `key value key value` word list.
    ///
    /// Used for one-line bodies such as `{ address 10.0.0.1 }`. A trailing
    /// key without a value becomes a bare keyword.
    pub fn from_pairs(words: &[String]) -> Self {
        let mut block = Self::new();
        for pair in words.chunks(2) {
            let value = pair.get(1).cloned().unwrap_or_default();
            block.insert(pair[0].clone(), Value::Scalar(value));
        }
        block
    }

    /// Insert a value. A repeated key overwrites the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert a nested block, folding it into an existing block under the
    /// same key.
    ///
    /// Keyed values in `block` overwrite earlier ones; its items are
    /// appended after the existing items. Nested blocks merge the same way.
    pub fn merge_block(&mut self, key: impl Into<String>, block: Block) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, Value::Block(existing))) => {
                for (k, v) in block.entries {
                    match v {
                        Value::Block(nested) => existing.merge_block(k, nested),
                        other => existing.insert(k, other),
                    }
                }
                existing.items.extend(block.items);
            }
            Some(entry) => entry.1 = Value::Block(block),
            None => self.entries.push((key, Value::Block(block))),
        }
    }

    /// Append a named item.
    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_block(&self, key: &str) -> Option<&Block> {
        self.get(key).and_then(Value::as_block)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, value)` pairs in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Named items in document order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.items.is_empty()
    }
}
