//! Node creation and tree surgery.
//!
//! All construction and mutation goes through a [`NodeFactory`] bound to
//! the owning context. Constructors assign fresh ids and wire parent
//! pointers; mutations validate their inputs before touching any state,
//! so a failed call leaves the tree exactly as it was.

use std::collections::BTreeMap;

use crate::ast::{
    Block, EnumDefinition, EnumValue, Identifier, Node, NodeKind, ParameterList,
};
use crate::error::{AstError, Result};
use crate::loc::SourceLocation;
use crate::{AstContext, NodeId};

/// Builds and rearranges nodes inside one [`AstContext`].
#[derive(Debug)]
pub struct NodeFactory<'a> {
    ctx: &'a mut AstContext,
}

impl<'a> NodeFactory<'a> {
    pub fn new(ctx: &'a mut AstContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AstContext {
        self.ctx
    }

    /// Creates a node from its payload: allocates a fresh id, registers
    /// the node, and rebinds every structural child's parent pointer to
    /// it.
    ///
    /// All child ids named by the payload must already be registered;
    /// otherwise the call fails with [`AstError::MissingNode`] and
    /// nothing is created.
    pub fn make(&mut self, src: SourceLocation, kind: impl Into<NodeKind>) -> Result<NodeId> {
        let kind = kind.into();

        for child in kind.children() {
            if !self.ctx.contains(child) {
                return Err(AstError::MissingNode { id: child });
            }
        }

        let id = self.ctx.fresh_id();
        self.ctx.register(Node {
            id,
            src,
            parent: None,
            raw: None,
            kind,
        })?;
        self.accept_children(id)?;

        Ok(id)
    }

    /// Rebinds the parent pointer of every structural child of `id` to
    /// `id`. Idempotent; [`make`](Self::make) and
    /// [`update`](Self::update) call it for you.
    pub fn accept_children(&mut self, id: NodeId) -> Result<()> {
        for child in self.ctx.require(id)?.children() {
            self.ctx.require_mut(child)?.parent = Some(id);
        }

        Ok(())
    }

    /// Edits the typed attributes of a node in place.
    ///
    /// This is how child slots that are not a private ordered list (an
    /// if-statement's branches, a binary operation's operands) are
    /// reassigned: the closure rewrites the payload, and the factory
    /// re-derives the child list, clears the parent pointer of children
    /// that dropped out, and adopts the ones that appeared. If the edit
    /// introduces an unregistered child id, the payload is restored and
    /// the call fails with [`AstError::MissingNode`].
    pub fn update<F>(&mut self, id: NodeId, f: F) -> Result<()>
    where
        F: FnOnce(&mut NodeKind),
    {
        let before = self.ctx.require(id)?.children();
        let saved = self.ctx.require(id)?.kind.clone();

        f(&mut self.ctx.require_mut(id)?.kind);

        let after = self.ctx.require(id)?.children();

        if let Some(missing) = after.iter().find(|c| !self.ctx.contains(**c)) {
            let missing = *missing;
            self.ctx.require_mut(id)?.kind = saved;

            return Err(AstError::MissingNode { id: missing });
        }

        for dropped in before.iter().filter(|c| !after.contains(c)) {
            let node = self.ctx.require_mut(*dropped)?;

            if node.parent == Some(id) {
                node.parent = None;
            }
        }

        self.accept_children(id)
    }

    /// Deep-copies the subtree rooted at `root`.
    ///
    /// Every node in the copy gets a fresh id; structural shape is
    /// preserved exactly; referential attributes pointing inside the
    /// copied subtree are remapped to the new ids, external ones are kept
    /// verbatim. The copy's root is detached (no parent) and `raw`
    /// fragments are not carried over.
    pub fn copy(&mut self, root: NodeId) -> Result<NodeId> {
        let subtree = self.ctx.descendants(root, true)?;

        let mut remap = BTreeMap::new();
        for old in &subtree {
            remap.insert(*old, self.ctx.fresh_id());
        }

        for old in &subtree {
            let original = self.ctx.require(*old)?;

            let mut node = Node {
                id: remap[old],
                src: original.src,
                parent: original.parent.and_then(|p| remap.get(&p).copied()),
                raw: None,
                kind: original.kind.clone(),
            };
            node.kind
                .map_ids(&mut |id| remap.get(&id).copied().unwrap_or(id));

            self.ctx.register(node)?;
        }

        Ok(remap[&root])
    }

    /// Appends `child` to `parent`'s ordered child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.splice(parent, child, Anchor::End)
    }

    /// Inserts `child` at the front of `parent`'s ordered child list.
    pub fn insert_at_beginning(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.splice(parent, child, Anchor::Start)
    }

    /// Inserts `child` immediately before `anchor` in `parent`'s ordered
    /// child list.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, anchor: NodeId) -> Result<()> {
        self.splice(parent, child, Anchor::Before(anchor))
    }

    /// Inserts `child` immediately after `anchor` in `parent`'s ordered
    /// child list.
    pub fn insert_after(&mut self, parent: NodeId, child: NodeId, anchor: NodeId) -> Result<()> {
        self.splice(parent, child, Anchor::After(anchor))
    }

    /// Replaces `old` with `new` in `parent`'s ordered child list,
    /// keeping the position. `old` stays registered but is detached.
    pub fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<()> {
        if !self.ctx.contains(new) {
            return Err(AstError::MissingNode { id: new });
        }

        let pos = self.anchor_position(parent, old)?;

        container_of(self.ctx, parent)?[pos] = new;
        self.ctx.require_mut(old)?.parent = None;
        self.ctx.require_mut(new)?.parent = Some(parent);

        Ok(())
    }

    /// Removes `child` from `parent`'s ordered child list and destroys
    /// it: the child and all its descendants are unregistered from the
    /// context.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let doomed = self.ctx.descendants(child, true)?;
        let pos = self.anchor_position(parent, child)?;

        container_of(self.ctx, parent)?.remove(pos);

        for id in doomed {
            self.ctx.unregister(id);
        }

        Ok(())
    }

    fn splice(&mut self, parent: NodeId, child: NodeId, anchor: Anchor) -> Result<()> {
        if !self.ctx.contains(child) {
            return Err(AstError::MissingNode { id: child });
        }

        let pos = match anchor {
            Anchor::Start => 0,
            Anchor::End => container_of(self.ctx, parent)?.len(),
            Anchor::Before(a) => self.anchor_position(parent, a)?,
            Anchor::After(a) => self.anchor_position(parent, a)? + 1,
        };

        container_of(self.ctx, parent)?.insert(pos, child);
        self.ctx.require_mut(child)?.parent = Some(parent);

        Ok(())
    }

    fn anchor_position(&mut self, parent: NodeId, anchor: NodeId) -> Result<usize> {
        let pos = container_of(self.ctx, parent)?
            .iter()
            .position(|c| *c == anchor);

        pos.ok_or_else(|| parentage_error(self.ctx, parent, anchor))
    }

    /// A synthesized enum value.
    pub fn enum_value(&mut self, name: impl Into<String>) -> Result<NodeId> {
        self.make(
            SourceLocation::default(),
            EnumValue { name: name.into() },
        )
    }

    /// A synthesized enum definition over already-made values.
    pub fn enum_definition(
        &mut self,
        name: impl Into<String>,
        members: Vec<NodeId>,
    ) -> Result<NodeId> {
        self.make(
            SourceLocation::default(),
            EnumDefinition {
                name: name.into(),
                documentation: None,
                members,
            },
        )
    }

    /// A synthesized identifier expression.
    pub fn identifier(
        &mut self,
        name: impl Into<String>,
        referenced_declaration: Option<NodeId>,
    ) -> Result<NodeId> {
        self.make(
            SourceLocation::default(),
            Identifier {
                name: name.into(),
                referenced_declaration,
                type_string: None,
            },
        )
    }

    /// A synthesized block over already-made statements.
    pub fn block(&mut self, statements: Vec<NodeId>) -> Result<NodeId> {
        self.make(SourceLocation::default(), Block { statements })
    }

    /// A synthesized parameter list.
    pub fn parameter_list(&mut self, parameters: Vec<NodeId>) -> Result<NodeId> {
        self.make(SourceLocation::default(), ParameterList { parameters })
    }
}

enum Anchor {
    Start,
    End,
    Before(NodeId),
    After(NodeId),
}

fn container_of(ctx: &mut AstContext, parent: NodeId) -> Result<&mut Vec<NodeId>> {
    ctx.require_mut(parent)?
        .kind
        .container_mut()
        .ok_or(AstError::NotAContainer { node: parent })
}

fn parentage_error(ctx: &AstContext, parent: NodeId, child: NodeId) -> AstError {
    AstError::ParentageInconsistent {
        child,
        expected_parent: parent,
        actual_parent: ctx.lookup(child).and_then(|n| n.parent),
    }
}
