//! Renders a subtree as plain indented text.
//!
//! One line per node (the schema tag and the value attributes worth
//! seeing at a glance) with children indented underneath. Node ids never
//! appear in the render: two structurally equal trees print the same, so
//! a deep copy prints byte-equal to its original. The output is meant for
//! humans and tests, not for parsing back.

use std::fmt::{self, Write as _};

use crate::ast::{Node, NodeKind, SymbolOrigin, TypeNameRef};
use crate::error::Result;
use crate::{AstContext, NodeId};

const INDENT: &str = "  ";

/// Renders the subtree rooted at `root`, descending at most `depth`
/// levels below it (`0` prints the root line alone).
///
/// Fails with [`MissingNode`](crate::AstError::MissingNode) if the
/// subtree names an id the context cannot resolve.
pub fn print(ctx: &AstContext, root: NodeId, depth: usize) -> Result<String> {
    // Resolve the whole subtree up front so rendering itself cannot fail.
    ctx.descendants(root, true)?;

    let mut out = String::new();
    render(ctx, root, depth, &mut out);

    Ok(out)
}

fn render(ctx: &AstContext, id: NodeId, depth: usize, w: &mut dyn fmt::Write) {
    let Some(node) = ctx.lookup(id) else {
        return;
    };

    let _ = writeln!(w, "{}", describe(node));

    if depth == 0 {
        return;
    }

    let mut w = IndentedWriter::new(INDENT, w);

    for child in node.children() {
        render(ctx, child, depth - 1, &mut w);
    }
}

/// A wrapper [writer](fmt::Write) that indents all lines written to the
/// inner writer. Recognizes `\n` and `\r\n` as line terminators and does
/// not indent empty lines.
#[derive(Debug)]
pub struct IndentedWriter<'a, W: ?Sized> {
    indent: &'a str,
    w: &'a mut W,
    at_line_start: bool,
}

impl<'a, W: fmt::Write + ?Sized> IndentedWriter<'a, W> {
    /// Creates a new writer that indents every line written to `w`,
    /// including the very first one.
    pub fn new(indent: &'a str, w: &'a mut W) -> Self {
        Self {
            indent,
            w,
            at_line_start: true,
        }
    }
}

impl<W: fmt::Write + ?Sized> fmt::Write for IndentedWriter<'_, W> {
    fn write_str(&mut self, mut s: &str) -> fmt::Result {
        while !s.is_empty() {
            let nl_pos = s.find('\n');
            let (line, rest) = s.split_at(nl_pos.map(|n| n + 1).unwrap_or(s.len()));

            if line == "\r\n" || line == "\n" {
                self.w.write_str(line)?;
                self.at_line_start = true;
            } else {
                if self.at_line_start {
                    self.w.write_str(self.indent)?;
                }

                self.w.write_str(line)?;
                self.at_line_start = line.ends_with('\n');
            }

            s = rest;
        }

        Ok(())
    }
}

/// The single line printed for `node`: the tag plus salient value
/// attributes. Ids and id-valued attributes stay out so that copies
/// print identically to their originals.
fn describe(node: &Node) -> String {
    let mut line = node.tag().to_owned();

    match &node.kind {
        NodeKind::SourceUnit(n) => {
            let _ = write!(line, " path={:?}", n.absolute_path);
        }

        NodeKind::PragmaDirective(n) => {
            let _ = write!(line, " {:?}", n.literals.join(" "));
        }

        NodeKind::ImportDirective(n) => {
            let _ = write!(line, " file={:?}", n.file);

            if !n.unit_alias.is_empty() {
                let _ = write!(line, " as={:?}", n.unit_alias);
            }

            for alias in &n.symbol_aliases {
                if let SymbolOrigin::Name(name) = &alias.foreign {
                    let _ = write!(line, " symbol={name:?}");
                }
            }
        }

        NodeKind::ContractDefinition(n) => {
            let _ = write!(line, " name={:?} kind={:?}", n.name, n.kind);
        }

        NodeKind::FunctionDefinition(n) => {
            let _ = write!(
                line,
                " name={:?} kind={:?} visibility={:?}",
                n.name, n.kind, n.visibility
            );
        }

        NodeKind::ModifierDefinition(n) => {
            let _ = write!(line, " name={:?}", n.name);
        }

        NodeKind::EventDefinition(n) => {
            let _ = write!(line, " name={:?}", n.name);
        }

        NodeKind::ErrorDefinition(n) => {
            let _ = write!(line, " name={:?}", n.name);
        }

        NodeKind::StructDefinition(n) => {
            let _ = write!(line, " name={:?}", n.name);
        }

        NodeKind::EnumDefinition(n) => {
            let _ = write!(line, " name={:?}", n.name);
        }

        NodeKind::EnumValue(n) => {
            let _ = write!(line, " name={:?}", n.name);
        }

        NodeKind::UserDefinedValueTypeDefinition(n) => {
            let _ = write!(line, " name={:?}", n.name);
        }

        NodeKind::VariableDeclaration(n) => {
            let _ = write!(line, " name={:?}", n.name);

            if let Some(ty) = &n.type_string {
                let _ = write!(line, " type={ty:?}");
            }
        }

        NodeKind::ElementaryTypeName(n) => {
            let _ = write!(line, " {:?}", n.name);
        }

        NodeKind::UserDefinedTypeName(n) => {
            if let Some(name) = &n.name {
                let _ = write!(line, " {name:?}");
            }
        }

        NodeKind::IdentifierPath(n) => {
            let _ = write!(line, " {:?}", n.name);
        }

        NodeKind::TryCatchClause(n) => {
            if !n.error_name.is_empty() {
                let _ = write!(line, " error={:?}", n.error_name);
            }
        }

        NodeKind::Literal(n) => {
            let _ = write!(line, " kind={:?}", n.kind);

            if let Some(value) = &n.value {
                let _ = write!(line, " value={value:?}");
            }
        }

        NodeKind::Identifier(n) => {
            let _ = write!(line, " {:?}", n.name);
        }

        NodeKind::MemberAccess(n) => {
            let _ = write!(line, " member={:?}", n.member_name);
        }

        NodeKind::UnaryOperation(n) => {
            let _ = write!(
                line,
                " {:?} {}",
                n.operator,
                if n.prefix { "prefix" } else { "postfix" }
            );
        }

        NodeKind::BinaryOperation(n) => {
            let _ = write!(line, " {:?}", n.operator);
        }

        NodeKind::Assignment(n) => {
            let _ = write!(line, " {:?}", n.operator);
        }

        NodeKind::FunctionCall(n) => {
            let _ = write!(line, " kind={:?}", n.kind);
        }

        NodeKind::TupleExpression(n) if n.is_inline_array => {
            line.push_str(" inline-array");
        }

        NodeKind::ElementaryTypeNameExpression(n) => {
            if let TypeNameRef::Raw(name) = &n.type_name {
                let _ = write!(line, " {name:?}");
            }
        }

        _ => {}
    }

    line
}
