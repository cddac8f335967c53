//! Post-construction validation of a tree's structural invariants.
//!
//! The checker proves, for the whole subtree reachable from a source
//! unit: context membership, parent/child agreement in both directions,
//! resolvability of required references, ownership acyclicity, and
//! exported-symbols coherence. A failure here means a reader or a caller
//! corrupted the tree; it is reported, never repaired.

use std::collections::BTreeSet;

use crate::ast::NodeKind;
use crate::error::{AstError, Result};
use crate::{AstContext, NodeId};

/// Verifies every structural invariant of the subtree rooted at `unit`.
///
/// The errors it produces name the offending node, the attribute, and
/// the violated condition:
///
/// - [`AstError::WrongContext`]: a reachable node is not registered in
///   `ctx`.
/// - [`AstError::ParentageInconsistent`]: a child's parent pointer does
///   not point at the node listing it (also raised when the walk meets a
///   node twice, which is how ownership cycles and double listings
///   surface).
/// - [`AstError::DanglingReference`]: a required reference attribute
///   does not resolve.
/// - [`AstError::CoverageViolation`]: a registered node claims a
///   reachable parent that does not list it as a child.
/// - [`AstError::ExportedSymbolsMismatch`]: a source unit exports a
///   symbol whose id does not resolve.
///
/// Leaf variants (pragmas, literals, enum values, ...) have no children
/// and no required references, so they pass with no further checks.
pub fn check_sanity(unit: NodeId, ctx: &AstContext) -> Result<()> {
    if !ctx.contains(unit) {
        return Err(AstError::WrongContext { node: unit });
    }

    let mut visited = BTreeSet::new();
    let mut stack = vec![unit];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            // reached twice: an ownership cycle or a doubly-listed child
            let actual_parent = ctx.lookup(id).and_then(|n| n.parent);

            return Err(AstError::ParentageInconsistent {
                child: id,
                expected_parent: id,
                actual_parent,
            });
        }

        let node = ctx.require(id)?;

        for child in node.children() {
            let Some(child_node) = ctx.lookup(child) else {
                return Err(AstError::WrongContext { node: child });
            };

            if child_node.parent != Some(id) {
                return Err(AstError::ParentageInconsistent {
                    child,
                    expected_parent: id,
                    actual_parent: child_node.parent,
                });
            }

            stack.push(child);
        }

        for reference in node.references() {
            if reference.required && !ctx.contains(reference.target) {
                return Err(AstError::DanglingReference {
                    owner: id,
                    attribute: reference.attribute,
                    target: reference.target,
                });
            }
        }

        if let NodeKind::SourceUnit(n) = &node.kind {
            for (symbol, target) in &n.exported_symbols {
                if !ctx.contains(*target) {
                    return Err(AstError::ExportedSymbolsMismatch {
                        unit: id,
                        symbol: symbol.clone(),
                    });
                }
            }
        }
    }

    // the reverse direction of parentage: anything claiming a reachable
    // parent must be reachable through that parent's named relations
    for node in ctx.nodes() {
        let Some(parent) = node.parent else {
            continue;
        };

        if !visited.contains(&parent) {
            continue;
        }

        let listed = ctx
            .lookup(parent)
            .is_some_and(|p| p.children().contains(&node.id));

        if !listed {
            return Err(AstError::CoverageViolation {
                node: parent,
                missing_child: node.id,
            });
        }
    }

    Ok(())
}

/// [`check_sanity`] as a predicate: sanity violations become `false`,
/// anything else is re-raised.
pub fn is_sane(unit: NodeId, ctx: &AstContext) -> Result<bool> {
    match check_sanity(unit, ctx) {
        Ok(()) => Ok(true),
        Err(e) if e.is_sanity_violation() => Ok(false),
        Err(e) => Err(e),
    }
}
