//! Stylesheet classname indexer.
//!
//! Walks a parsed [`Stylesheet`] with a work queue and builds the mapping
//! from transformed class selector (`.name`) to its defining rule.
//!
//! Traversal order:
//! - nodes are taken from the front of the queue, seeded with the root's
//!   children
//! - `@media` children are pushed to the front, so they are handled before
//!   the remaining siblings
//! - other at-rules are skipped entirely
//! - a rule's children are appended to the back once the rule is handled
//!
//! Comments accumulate in a pending buffer that any at-rule clears. The
//! first class name created while handling a rule takes the whole buffer.

use std::collections::VecDeque;
use std::mem;

use cssm_common::SourcePosition;
use cssm_stylesheet::{NodeData, NodeIndex, NodeKind, RuleData, Stylesheet};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::trace;

use crate::selectors::{class_tokens, split_selectors, substitute_nesting, token_position};

/// What the index knows about one class selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassnameEntry {
    /// Direct declarations of the defining rule, formatted `prop: value;`.
    pub declarations: Vec<String>,
    /// Comments immediately preceding the defining rule.
    pub comments: Vec<String>,
    /// 1-based position of the class token (top-level rules) or of the rule
    /// start (nested rules).
    pub position: SourcePosition,
}

/// Transformed class selector (with its leading `.`) to entry, in order of
/// first definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassnameIndex {
    entries: IndexMap<String, ClassnameEntry>,
}

impl ClassnameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ClassnameEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassnameEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert unless the key is already present. Returns whether the entry
    /// was inserted.
    fn insert_first(&mut self, key: String, entry: ClassnameEntry) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, entry);
        true
    }
}

/// Build the classname index of `sheet`, passing every class token through
/// `transform` before it becomes a key.
pub fn index_stylesheet<F>(sheet: &Stylesheet, transform: F) -> ClassnameIndex
where
    F: Fn(&str) -> String,
{
    ClassnameIndexer::new(sheet, transform).run()
}

struct ClassnameIndexer<'a, F> {
    sheet: &'a Stylesheet,
    transform: F,
    queue: VecDeque<NodeIndex>,
    pending_comments: Vec<String>,
    /// Resolved selectors of every rule handled so far.
    resolved: FxHashMap<NodeIndex, Vec<String>>,
    index: ClassnameIndex,
}

impl<'a, F> ClassnameIndexer<'a, F>
where
    F: Fn(&str) -> String,
{
    fn new(sheet: &'a Stylesheet, transform: F) -> Self {
        ClassnameIndexer {
            sheet,
            transform,
            queue: sheet.children(sheet.root()).iter().copied().collect(),
            pending_comments: Vec::new(),
            resolved: FxHashMap::default(),
            index: ClassnameIndex::new(),
        }
    }

    fn run(mut self) -> ClassnameIndex {
        let sheet = self.sheet;
        while let Some(idx) = self.queue.pop_front() {
            let Some(node) = sheet.get(idx) else {
                continue;
            };
            match &node.data {
                NodeData::Comment(comment) => {
                    self.pending_comments.push(comment.text.clone());
                }
                NodeData::AtRule(at_rule) => {
                    if at_rule.name == "media" {
                        for &child in sheet.children(idx).iter().rev() {
                            self.queue.push_front(child);
                        }
                    }
                    self.pending_comments.clear();
                }
                NodeData::Rule(rule) => {
                    self.visit_rule(idx, rule, node.parent, node.source);
                    self.queue.extend(sheet.children(idx).iter().copied());
                }
                NodeData::Root | NodeData::Declaration(_) => {}
            }
        }

        trace!(classes = self.index.len(), "indexed stylesheet");
        self.index
    }

    fn visit_rule(
        &mut self,
        idx: NodeIndex,
        rule: &RuleData,
        parent: NodeIndex,
        source: Option<SourcePosition>,
    ) {
        let pieces = split_selectors(&rule.selector);

        if parent == self.sheet.root() {
            if let Some(start) = source {
                for piece in &pieces {
                    for token in class_tokens(piece) {
                        let position = token_position(&rule.selector, token, start);
                        self.insert_class(idx, token, position);
                    }
                }
            }
            self.resolved.insert(idx, pieces);
            return;
        }

        let inherited = self
            .nearest_ancestor_rule(idx)
            .and_then(|ancestor| self.resolved.get(&ancestor))
            .map(|selectors| substitute_nesting(selectors, &pieces));
        let combined = inherited.unwrap_or(pieces);

        if let Some(start) = source {
            for selector in &combined {
                for token in class_tokens(selector) {
                    self.insert_class(idx, token, start);
                }
            }
        }
        self.resolved.insert(idx, combined);
    }

    fn nearest_ancestor_rule(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.sheet.ancestors(idx).find(|&ancestor| {
            self.sheet
                .get(ancestor)
                .is_some_and(|node| node.kind() == NodeKind::Rule)
        })
    }

    fn insert_class(&mut self, rule: NodeIndex, token: &str, position: SourcePosition) {
        let key = (self.transform)(token);
        if self.index.contains(&key) {
            return;
        }
        // Only the first class created after a comment run receives it.
        let entry = ClassnameEntry {
            declarations: self
                .sheet
                .declarations(rule)
                .map(|decl| format!("{}: {};", decl.prop, decl.value))
                .collect(),
            comments: mem::take(&mut self.pending_comments),
            position,
        };
        self.index.insert_first(key, entry);
    }
}

#[cfg(test)]
#[path = "../tests/indexer_tests.rs"]
mod indexer_tests;
