//! A normalized, strongly-typed, in-memory representation of Solidity
//! programs, populated from raw `solc` JSON output.
//!
//! The compiler has emitted its AST in two schema families over the years
//! (a legacy one below 0.4.12 and the modern one from 0.4.12 on), with
//! per-version drift in both. This crate hides that drift behind a single
//! typed tree: the [`read`] module consumes compiler output in either
//! schema, materializes [`ast::Node`]s into an [`AstContext`], links
//! numeric cross-references, and verifies the result with the
//! [`sanity`] checker. Trees can then be traversed, mutated through a
//! [`factory::NodeFactory`], and rendered with [`dump`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod ast;
pub mod dump;
pub mod error;
pub mod factory;
pub mod loc;
pub mod read;
pub mod sanity;

pub use crate::error::{AstError, Result};
pub use crate::loc::SourceLocation;

use crate::ast::Node;

/// The identity of a node within its owning [`AstContext`].
///
/// Ids are positive and unique per context. Nodes read from compiler
/// output keep the ids the compiler assigned (cross-references in the
/// JSON resolve by those numbers); factory-made nodes get fresh ids above
/// everything registered so far.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The arena owning every node of one compilation.
///
/// All structural and referential attributes in the tree are [`NodeId`]s;
/// the context is the only place they can be resolved. A context, the
/// factory bound to it, and the nodes it owns form one single-threaded
/// ownership island.
#[derive(Debug, Default, Clone)]
pub struct AstContext {
    next_id: u32,
    nodes: BTreeMap<NodeId, Node>,
}

impl AstContext {
    /// Creates an empty context whose id counter starts at 1.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            nodes: BTreeMap::new(),
        }
    }

    /// Creates an empty context whose id counter starts at `first_id`.
    pub fn starting_at(first_id: u32) -> Self {
        Self {
            next_id: first_id.max(1),
            nodes: BTreeMap::new(),
        }
    }

    /// Takes the next unused id. Monotonically increasing; never collides
    /// with a registered node.
    pub fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        id
    }

    /// Registers `node` under its id.
    ///
    /// Fails with [`AstError::DuplicateId`] if the id is taken; the
    /// context is unchanged in that case. The id counter is bumped past
    /// the registered id so later [`fresh_id`](Self::fresh_id) calls stay
    /// unique.
    pub fn register(&mut self, node: Node) -> Result<NodeId> {
        let id = node.id;

        if self.nodes.contains_key(&id) {
            return Err(AstError::DuplicateId { id });
        }

        self.next_id = self.next_id.max(id.0 + 1);
        self.nodes.insert(id, node);

        Ok(id)
    }

    /// Removes the node with the given id, returning it if it was
    /// registered. Does not touch the node's descendants; the factory's
    /// recursive removal is built on top of this.
    pub fn unregister(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub fn lookup(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn lookup_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Like [`lookup`](Self::lookup), but a missing id is an error.
    pub fn require(&self, id: NodeId) -> Result<&Node> {
        self.lookup(id).ok_or(AstError::MissingNode { id })
    }

    pub fn require_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(AstError::MissingNode { id })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All registered nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Moves every node of `other` into this context.
    ///
    /// The id ranges must be disjoint: on any collision the merge fails
    /// with [`AstError::DuplicateId`] and neither context is mutated.
    pub fn merge(&mut self, other: AstContext) -> Result<()> {
        if let Some(id) = other.nodes.keys().find(|id| self.contains(**id)) {
            return Err(AstError::DuplicateId { id: *id });
        }

        self.next_id = self.next_id.max(other.next_id);
        self.nodes.extend(other.nodes);

        Ok(())
    }

    /// Ordered direct structural children of `id`.
    pub fn children_of(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.require(id)?.children())
    }

    /// Pre-order enumeration of the subtree rooted at `id`.
    pub fn descendants(&self, id: NodeId, include_self: bool) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();

        self.walk(id, &mut |node| out.push(node.id))?;

        if !include_self {
            out.remove(0);
        }

        Ok(out)
    }

    /// Pre-order traversal of the subtree rooted at `id`, calling
    /// `visitor` on every node.
    pub fn walk(&self, id: NodeId, visitor: &mut dyn FnMut(&Node)) -> Result<()> {
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            let node = self.require(id)?;
            visitor(node);

            let mut children = node.children();
            children.reverse();
            stack.extend(children);
        }

        Ok(())
    }

    /// The descendants of `root` (itself included) whose variant carries
    /// the given schema tag, in pre-order. A linear scan; nothing is
    /// cached.
    pub fn nodes_of_kind(&self, root: NodeId, tag: &str) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();

        self.walk(root, &mut |node| {
            if node.tag() == tag {
                out.push(node.id);
            }
        })?;

        Ok(out)
    }
}
