//! Phase 2: Indentation Decoder
//!
//! Builds a tree from scan lines using a stack of open frames. Each frame
//! pairs an indent column with the container that deeper lines attach to.
//! The bottom frame is the root at indent -1 and is never popped.
//!
//! A `key:` line with no value opens an empty map. If the first line below
//! it turns out to be a list item, that placeholder is rewritten into a list
//! in place. Containers live in an arena so the rewrite only touches one
//! slot and every parent that refers to it by id sees the list.
//!
//! Lines the stack cannot place are skipped and logged at debug level. A
//! skipped list item takes every deeper line after it along with it.

use crate::scalar::normalize;
use crate::scanner::{scan_line, split_lines, ScanLine};
use crate::value::Node;
use tracing::debug;

type SlotId = usize;

/// The root container is always the first slot.
const ROOT: SlotId = 0;

/// Indent of the root frame.
const ROOT_INDENT: isize = -1;

#[derive(Debug)]
enum Slot {
    Scalar(Node),
    List(Vec<SlotId>),
    Map(Vec<(String, SlotId)>),
}

#[derive(Debug, Clone, Copy)]
struct IndentFrame {
    indent: isize,
    slot: SlotId,
}

#[derive(Debug)]
struct Arena {
    slots: Vec<Slot>,
}

impl Arena {
    fn new() -> Self {
        Self {
            slots: vec![Slot::Map(Vec::new())],
        }
    }

    fn alloc(&mut self, slot: Slot) -> SlotId {
        self.slots.push(slot);
        self.slots.len() - 1
    }

    fn is_list(&self, id: SlotId) -> bool {
        matches!(self.slots[id], Slot::List(_))
    }

    fn is_map(&self, id: SlotId) -> bool {
        matches!(self.slots[id], Slot::Map(_))
    }

    fn is_empty_map(&self, id: SlotId) -> bool {
        matches!(&self.slots[id], Slot::Map(entries) if entries.is_empty())
    }

    fn push(&mut self, list: SlotId, item: SlotId) {
        if let Slot::List(items) = &mut self.slots[list] {
            items.push(item);
        }
    }

    /// Map insertion; an existing key keeps its position.
    fn insert(&mut self, map: SlotId, key: &str, value: SlotId) {
        if let Slot::Map(entries) = &mut self.slots[map] {
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((key.to_string(), value)),
            }
        }
    }

    fn into_node(mut self, id: SlotId) -> Node {
        self.take(id)
    }

    fn take(&mut self, id: SlotId) -> Node {
        match std::mem::replace(&mut self.slots[id], Slot::Scalar(Node::Null)) {
            Slot::Scalar(node) => node,
            Slot::List(items) => Node::List(items.into_iter().map(|i| self.take(i)).collect()),
            Slot::Map(entries) => Node::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, self.take(v)))
                    .collect(),
            ),
        }
    }
}

struct Decoder {
    arena: Arena,
    stack: Vec<IndentFrame>,
    /// Indent of the last list item that could not be attached. Lines
    /// deeper than this belong to it and are dropped with it.
    orphan_indent: Option<isize>,
}

impl Decoder {
    fn new() -> Self {
        Self {
            arena: Arena::new(),
            stack: vec![IndentFrame {
                indent: ROOT_INDENT,
                slot: ROOT,
            }],
            orphan_indent: None,
        }
    }

    fn feed(&mut self, sl: &ScanLine) {
        let indent = sl.indent as isize;

        if let Some(orphan) = self.orphan_indent {
            if indent > orphan {
                debug!(line = sl.line_num, "skipping line inside a dropped list item");
                return;
            }
            self.orphan_indent = None;
        }

        // Close every frame at or right of this line's indent. Line indents
        // are never negative, so the root frame survives.
        while self.stack.len() > 1 && self.top().indent >= indent {
            self.stack.pop();
        }

        if sl.is_list_item() {
            self.list_item(sl, indent);
        } else if let Some((key, value)) = sl.line.split_once(':') {
            self.key_value(sl, indent, key, value);
        } else {
            debug!(line = sl.line_num, "skipping line with no key or list marker");
        }
    }

    fn top(&self) -> IndentFrame {
        self.stack[self.stack.len() - 1]
    }

    fn list_item(&mut self, sl: &ScanLine, indent: isize) {
        let top = self.stack.len() - 1;

        if !self.arena.is_list(self.stack[top].slot) {
            match self.rebind_as_list(top) {
                Some(list) => self.stack[top].slot = list,
                None => {
                    debug!(line = sl.line_num, "skipping list item with nothing to attach to");
                    self.orphan_indent = Some(indent);
                    return;
                }
            }
        }
        let list = self.stack[top].slot;

        let text = sl.line.trim();
        match text.split_once(':') {
            Some((key, value)) => {
                let item = self.arena.alloc(Slot::Map(Vec::new()));
                self.arena.push(list, item);
                let value = self.arena.alloc(Slot::Scalar(normalize(value)));
                self.arena.insert(item, key.trim(), value);
                self.stack.push(IndentFrame { indent, slot: item });
            }
            None => {
                let value = self.arena.alloc(Slot::Scalar(normalize(text)));
                self.arena.push(list, value);
            }
        }
    }

    /// Turn the container a list item landed in into a list.
    ///
    /// Under the root frame this only works while the document is still
    /// empty. Elsewhere the grandparent's most recent empty-map entry is
    /// rewritten, which is the placeholder the enclosing `key:` line made.
    fn rebind_as_list(&mut self, top: usize) -> Option<SlotId> {
        if top == 0 {
            if !self.arena.is_empty_map(ROOT) {
                return None;
            }
            self.arena.slots[ROOT] = Slot::List(Vec::new());
            return Some(ROOT);
        }

        let grandparent = self.stack[top - 1].slot;
        let Slot::Map(entries) = &self.arena.slots[grandparent] else {
            return None;
        };
        let placeholder = entries
            .iter()
            .rev()
            .map(|(_, id)| *id)
            .find(|&id| self.arena.is_empty_map(id))?;

        self.arena.slots[placeholder] = Slot::List(Vec::new());
        Some(placeholder)
    }

    fn key_value(&mut self, sl: &ScanLine, indent: isize, key: &str, value: &str) {
        // Keys cannot go into a list; use the closest enclosing map instead.
        let Some(parent) = self.nearest_map() else {
            debug!(line = sl.line_num, "skipping key with no enclosing map");
            return;
        };

        let key = key.trim();
        let value = value.trim();

        if value.is_empty() {
            let placeholder = self.arena.alloc(Slot::Map(Vec::new()));
            self.arena.insert(parent, key, placeholder);
            self.stack.push(IndentFrame {
                indent,
                slot: placeholder,
            });
        } else {
            let value = self.arena.alloc(Slot::Scalar(normalize(value)));
            self.arena.insert(parent, key, value);
        }
    }

    fn nearest_map(&self) -> Option<SlotId> {
        self.stack
            .iter()
            .rev()
            .map(|frame| frame.slot)
            .find(|&slot| self.arena.is_map(slot))
    }

    fn finish(self) -> Node {
        self.arena.into_node(ROOT)
    }
}

/// Decode an ordered sequence of lines into a tree.
///
/// The result is a map, a list (when the document starts with list items),
/// or an empty map for input with no content.
pub fn decode<I, S>(lines: I) -> Node
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoder = Decoder::new();
    for (i, raw) in lines.into_iter().enumerate() {
        if let Some(sl) = scan_line(raw.as_ref(), i + 1) {
            decoder.feed(&sl);
        }
    }
    decoder.finish()
}

/// Decode a whole document held in memory.
pub fn decode_str(source: &str) -> Node {
    decode(split_lines(source))
}
