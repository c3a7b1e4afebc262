//! Arena-based stylesheet node tree.
//!
//! Nodes are stored contiguously and referenced by [`NodeIndex`]. Every node
//! except the root records its parent, so ancestor walks are plain loops over
//! indices.

use cssm_common::SourcePosition;

use crate::syntax::StylesheetSyntax;

/// Index of a node inside a [`Stylesheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Discriminant of [`NodeData`], handy for matching without borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Rule,
    AtRule,
    Declaration,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleData {
    /// Selector text as written, comments removed and outer whitespace trimmed.
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRuleData {
    /// Lower-cased at-rule name without the `@`.
    pub name: String,
    pub params: String,
    /// Whether the at-rule has a `{ ... }` block (or an indented block in SASS).
    pub has_block: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationData {
    pub prop: String,
    /// Value without a trailing `!important`.
    pub value: String,
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentData {
    /// Comment body without delimiters, trimmed.
    pub text: String,
    /// `//` comment (LESS, SCSS, SASS).
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Root,
    Rule(RuleData),
    AtRule(AtRuleData),
    Declaration(DeclarationData),
    Comment(CommentData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Root => NodeKind::Root,
            NodeData::Rule(_) => NodeKind::Rule,
            NodeData::AtRule(_) => NodeKind::AtRule,
            NodeData::Declaration(_) => NodeKind::Declaration,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub data: NodeData,
    /// `NodeIndex::NONE` for the root.
    pub parent: NodeIndex,
    pub children: Vec<NodeIndex>,
    /// Start of the node; `None` only for the root.
    pub source: Option<SourcePosition>,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn as_rule(&self) -> Option<&RuleData> {
        match &self.data {
            NodeData::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRuleData> {
        match &self.data {
            NodeData::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&DeclarationData> {
        match &self.data {
            NodeData::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&CommentData> {
        match &self.data {
            NodeData::Comment(comment) => Some(comment),
            _ => None,
        }
    }
}

/// A parsed stylesheet: the node arena plus the dialect it was parsed with.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    nodes: Vec<Node>,
    syntax: StylesheetSyntax,
}

impl Stylesheet {
    /// Create a stylesheet holding only the root node.
    pub fn new(syntax: StylesheetSyntax) -> Stylesheet {
        Stylesheet {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: NodeIndex::NONE,
                children: Vec::new(),
                source: None,
            }],
            syntax,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    pub fn syntax(&self) -> StylesheetSyntax {
        self.syntax
    }

    /// Append a node as the last child of `parent` and return its index.
    pub fn add_child(
        &mut self,
        parent: NodeIndex,
        data: NodeData,
        source: SourcePosition,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
            source: Some(source),
        });
        if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
            parent_node.children.push(index);
        }
        index
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get(index)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.get(index)
            .map(|node| node.parent)
            .filter(|parent| parent.is_some())
    }

    /// Iterate over the ancestors of `index`, nearest first, ending with the
    /// root.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            sheet: self,
            next: self.parent(index),
        }
    }

    /// Direct declaration children of `index`, in source order.
    pub fn declarations(&self, index: NodeIndex) -> impl Iterator<Item = &DeclarationData> + '_ {
        self.children(index)
            .iter()
            .filter_map(|&child| self.get(child)?.as_declaration())
    }

    /// Get the number of nodes (including the root)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A stylesheet always holds its root, so this only reports whether the
    /// root has any children.
    pub fn is_empty(&self) -> bool {
        self.children(self.root()).is_empty()
    }
}

/// Iterator returned by [`Stylesheet::ancestors`].
pub struct Ancestors<'a> {
    sheet: &'a Stylesheet,
    next: Option<NodeIndex>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.next?;
        self.next = self.sheet.parent(current);
        Some(current)
    }
}
