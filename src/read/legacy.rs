//! The reader for legacy compiler output (versions below 0.4.12, and the
//! `legacyAST` section later compilers can still emit).
//!
//! Legacy nodes are objects tagged with `name`, carrying value fields in
//! an `attributes` object and structural children in a positional
//! `children` array. Builders read their attributes and then distribute
//! the already-built children by kind and position. Quirks preserved from
//! that era: documentation is a plain string, `assignments` encodes
//! omitted tuple positions as nulls, and import symbol aliases are only
//! trustworthy in the foreign symbol's name.

use std::collections::HashMap;

use serde_json::Value;

use crate::ast::{self, Docstring, Node, NodeKind, SymbolAlias, SymbolOrigin, TypeNameRef};
use crate::error::{AstError, Result};
use crate::loc::SourceLocation;
use crate::read::{
    flag, id_value, object, opt_enum_field, opt_flag, opt_id, opt_str, parse_src, require_id,
    require_str, string_list, JsonObject,
};
use crate::{AstContext, NodeId};

/// Builds one [`NodeKind`] out of a legacy node object. Receives the
/// whole node object and its `attributes` map (empty if absent).
pub type LegacyBuilder =
    fn(&mut LegacyReader<'_>, &JsonObject, &JsonObject, SourceLocation) -> Result<NodeKind>;

/// The legacy `name` dispatch table. [`Default`] covers every node kind
/// the legacy schema can produce.
pub struct LegacyRegistry {
    builders: HashMap<String, LegacyBuilder>,
}

impl LegacyRegistry {
    pub fn register(&mut self, tag: impl Into<String>, builder: LegacyBuilder) {
        self.builders.insert(tag.into(), builder);
    }

    pub fn get(&self, tag: &str) -> Option<LegacyBuilder> {
        self.builders.get(tag).copied()
    }
}

impl Default for LegacyRegistry {
    fn default() -> Self {
        let mut registry = Self {
            builders: HashMap::new(),
        };

        registry.register("SourceUnit", source_unit);
        registry.register("PragmaDirective", pragma_directive);
        registry.register("ImportDirective", import_directive);
        registry.register("InheritanceSpecifier", inheritance_specifier);
        registry.register("ModifierInvocation", modifier_invocation);
        registry.register("ParameterList", parameter_list);
        registry.register("UsingForDirective", using_for_directive);
        registry.register("ContractDefinition", contract_definition);
        registry.register("FunctionDefinition", function_definition);
        registry.register("ModifierDefinition", modifier_definition);
        registry.register("EventDefinition", event_definition);
        registry.register("StructDefinition", struct_definition);
        registry.register("EnumDefinition", enum_definition);
        registry.register("EnumValue", enum_value);
        registry.register("VariableDeclaration", variable_declaration);
        registry.register("ElementaryTypeName", elementary_type_name);
        registry.register("UserDefinedTypeName", user_defined_type_name);
        registry.register("ArrayTypeName", array_type_name);
        registry.register("Mapping", mapping);
        registry.register("FunctionTypeName", function_type_name);
        registry.register("Block", block);
        registry.register("IfStatement", if_statement);
        registry.register("ForStatement", for_statement);
        registry.register("WhileStatement", while_statement);
        registry.register("DoWhileStatement", do_while_statement);
        registry.register("Return", return_statement);
        registry.register("Break", break_statement);
        registry.register("Continue", continue_statement);
        registry.register("Throw", throw_statement);
        registry.register("EmitStatement", emit_statement);
        registry.register("ExpressionStatement", expression_statement);
        registry.register(
            "VariableDeclarationStatement",
            variable_declaration_statement,
        );
        registry.register("InlineAssembly", inline_assembly);
        registry.register("PlaceholderStatement", placeholder_statement);
        registry.register("Literal", literal);
        registry.register("Identifier", identifier);
        registry.register("MemberAccess", member_access);
        registry.register("IndexAccess", index_access);
        registry.register("UnaryOperation", unary_operation);
        registry.register("BinaryOperation", binary_operation);
        registry.register("Assignment", assignment);
        registry.register("Conditional", conditional);
        registry.register("FunctionCall", function_call);
        registry.register("NewExpression", new_expression);
        registry.register("TupleExpression", tuple_expression);
        registry.register(
            "ElementaryTypeNameExpression",
            elementary_type_name_expression,
        );

        registry
    }
}

/// Pass 1 of the legacy schema.
pub struct LegacyReader<'a> {
    ctx: &'a mut AstContext,
    registry: &'a LegacyRegistry,
    path: &'a str,
    built: Vec<NodeId>,
}

impl<'a> LegacyReader<'a> {
    pub fn new(ctx: &'a mut AstContext, registry: &'a LegacyRegistry, path: &'a str) -> Self {
        Self {
            ctx,
            registry,
            path,
            built: Vec::new(),
        }
    }

    /// The ids of every node built so far, in construction (post-) order.
    pub fn into_built(self) -> Vec<NodeId> {
        self.built
    }

    /// Reads one node object: dispatches on `name`, registers the node
    /// under the id the compiler assigned, and wires the parent pointers
    /// of its structural children.
    pub fn read_node(&mut self, v: &Value) -> Result<NodeId> {
        let obj = object(v, SourceLocation::default())?;
        let src = parse_src(obj)?;
        let tag = require_str(obj, "name", src)?;

        let Some(builder) = self.registry.get(tag) else {
            return Err(AstError::UnknownNodeKind {
                tag: tag.to_owned(),
                src,
            });
        };

        let empty = JsonObject::new();
        let attrs = obj
            .get("attributes")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let kind = builder(self, obj, attrs, src)?;
        let id = require_id(obj, "id", src)?;

        self.ctx.register(Node {
            id,
            src,
            parent: None,
            raw: Some(v.clone()),
            kind,
        })?;

        let children = self.ctx.require(id)?.children();
        for child in children {
            self.ctx.require_mut(child)?.parent = Some(id);
        }

        self.built.push(id);

        Ok(id)
    }

    /// Builds the positional `children` array, skipping nulls.
    fn read_children(&mut self, obj: &JsonObject) -> Result<Vec<NodeId>> {
        Ok(self
            .read_children_with_holes(obj)?
            .into_iter()
            .flatten()
            .collect())
    }

    /// Builds the positional `children` array, keeping nulls as holes.
    fn read_children_with_holes(&mut self, obj: &JsonObject) -> Result<Vec<Option<NodeId>>> {
        let Some(items) = obj.get("children").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        items
            .iter()
            .map(|item| match item {
                Value::Null => Ok(None),
                _ => self.read_node(item).map(Some),
            })
            .collect()
    }

    fn tag_of(&self, id: NodeId) -> &str {
        self.ctx.lookup(id).map(Node::tag).unwrap_or("")
    }

    /// Drains the children whose tag satisfies `pred`, preserving order.
    fn take_where(&self, kids: &mut Vec<NodeId>, pred: impl Fn(&str) -> bool) -> Vec<NodeId> {
        let mut taken = Vec::new();
        let mut rest = Vec::new();

        for id in kids.drain(..) {
            if pred(self.tag_of(id)) {
                taken.push(id);
            } else {
                rest.push(id);
            }
        }

        *kids = rest;

        taken
    }

    fn take_first_where(
        &self,
        kids: &mut Vec<NodeId>,
        pred: impl Fn(&str) -> bool,
    ) -> Option<NodeId> {
        let pos = kids.iter().position(|id| pred(self.tag_of(*id)))?;

        Some(kids.remove(pos))
    }
}

const TYPE_NAME_TAGS: [&str; 5] = [
    "ElementaryTypeName",
    "UserDefinedTypeName",
    "ArrayTypeName",
    "Mapping",
    "FunctionTypeName",
];

fn is_type_name(tag: &str) -> bool {
    TYPE_NAME_TAGS.contains(&tag)
}

fn kid(kids: &[NodeId], idx: usize, src: SourceLocation, what: &str) -> Result<NodeId> {
    kids.get(idx)
        .copied()
        .ok_or_else(|| AstError::SchemaMismatch {
            src,
            reason: format!("missing child #{idx} ({what})"),
        })
}

/// Legacy declarations document themselves with a plain string attribute.
fn docstring(attrs: &JsonObject) -> Option<Docstring> {
    opt_str(attrs, "documentation").map(Docstring::Text)
}

fn legacy_type_string(attrs: &JsonObject) -> Option<String> {
    opt_str(attrs, "type")
}

fn id_list(attrs: &JsonObject, key: &str) -> Vec<NodeId> {
    attrs
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(id_value).collect())
        .unwrap_or_default()
}

fn source_unit(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    let absolute_path = opt_str(attrs, "absolutePath").unwrap_or_else(|| r.path.to_owned());

    let mut exported_symbols = std::collections::BTreeMap::new();
    if let Some(map) = attrs.get("exportedSymbols").and_then(Value::as_object) {
        for (name, v) in map {
            let id = match v {
                Value::Array(items) => items.first().and_then(id_value),
                other => id_value(other),
            };

            if let Some(id) = id {
                exported_symbols.insert(name.clone(), id);
            }
        }
    }

    Ok(ast::SourceUnit {
        absolute_path,
        license: opt_str(attrs, "license"),
        exported_symbols,
        nodes: r.read_children(obj)?,
    }
    .into())
}

fn pragma_directive(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::PragmaDirective {
        literals: string_list(attrs, "literals"),
    }
    .into())
}

fn import_directive(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    let mut symbol_aliases = Vec::new();

    if let Some(items) = attrs.get("symbolAliases").and_then(Value::as_array) {
        for item in items {
            let Some(entry) = item.as_object() else {
                continue;
            };

            let local = opt_str(entry, "local");

            // Legacy alias records are only partially populated; the
            // foreign symbol's name is the one field that can be trusted.
            let name = match entry.get("foreign") {
                Some(Value::String(name)) => Some(name.clone()),

                Some(Value::Object(foreign)) => opt_str(foreign, "name").or_else(|| {
                    foreign
                        .get("attributes")
                        .and_then(Value::as_object)
                        .and_then(|a| opt_str(a, "value").or_else(|| opt_str(a, "name")))
                }),

                _ => local.clone(),
            };

            let Some(name) = name else {
                continue;
            };

            symbol_aliases.push(SymbolAlias {
                foreign: SymbolOrigin::Name(name),
                local,
            });
        }
    }

    Ok(ast::ImportDirective {
        file: opt_str(attrs, "file").unwrap_or_default(),
        absolute_path: opt_str(attrs, "absolutePath").unwrap_or_default(),
        unit_alias: opt_str(attrs, "unitAlias").unwrap_or_default(),
        symbol_aliases,
        scope: opt_id(attrs, "scope"),
        source_unit: opt_id(attrs, "SourceUnit"),
    }
    .into())
}

fn inheritance_specifier(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;
    let base_name = kid(&kids, 0, src, "base name")?;
    kids.remove(0);

    Ok(ast::InheritanceSpecifier {
        base_name,
        arguments: if kids.is_empty() { None } else { Some(kids) },
    }
    .into())
}

fn modifier_invocation(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;
    let modifier_name = kid(&kids, 0, src, "modifier name")?;
    kids.remove(0);

    Ok(ast::ModifierInvocation {
        modifier_name,
        arguments: if kids.is_empty() { None } else { Some(kids) },
        kind: None,
    }
    .into())
}

fn parameter_list(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ParameterList {
        parameters: r.read_children(obj)?,
    }
    .into())
}

fn using_for_directive(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::UsingForDirective {
        library_name: Some(kid(&kids, 0, src, "library")?),
        function_list: Vec::new(),
        type_name: kids.get(1).copied(),
        is_global: false,
    }
    .into())
}

fn contract_definition(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;
    let base_contracts = r.take_where(&mut kids, |t| t == "InheritanceSpecifier");

    let kind = match opt_enum_field(attrs, "contractKind", src)? {
        Some(kind) => kind,
        None if flag(attrs, "isLibrary") => ast::ContractKind::Library,
        None => ast::ContractKind::Contract,
    };

    Ok(ast::ContractDefinition {
        name: require_str(attrs, "name", src)?.to_owned(),
        kind,
        is_abstract: false,
        fully_implemented: opt_flag(attrs, "fullyImplemented").unwrap_or(true),
        linearized_base_contracts: id_list(attrs, "linearizedBaseContracts"),
        used_errors: Vec::new(),
        scope: opt_id(attrs, "scope"),
        documentation: docstring(attrs),
        base_contracts,
        nodes: kids,
    }
    .into())
}

fn function_definition(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;

    let mut param_lists = r.take_where(&mut kids, |t| t == "ParameterList");
    if param_lists.len() < 2 {
        return Err(AstError::SchemaMismatch {
            src,
            reason: "function with fewer than two parameter lists".into(),
        });
    }

    let parameters = param_lists.remove(0);
    let return_parameters = param_lists.remove(0);
    let modifiers = r.take_where(&mut kids, |t| t == "ModifierInvocation");
    let body = r.take_first_where(&mut kids, |t| t == "Block");

    let name = require_str(attrs, "name", src)?.to_owned();

    let kind = if flag(attrs, "isConstructor") {
        ast::FunctionKind::Constructor
    } else if name.is_empty() {
        ast::FunctionKind::Fallback
    } else {
        ast::FunctionKind::Function
    };

    let state_mutability = if flag(attrs, "payable") {
        ast::StateMutability::Payable
    } else if flag(attrs, "constant") {
        ast::StateMutability::View
    } else {
        ast::StateMutability::Nonpayable
    };

    // the oldest outputs carry a bare `public` flag instead of
    // `visibility`
    let visibility = match opt_enum_field(attrs, "visibility", src)? {
        Some(v) => v,
        None => match opt_flag(attrs, "public") {
            Some(true) | None => ast::Visibility::Public,
            Some(false) => ast::Visibility::Internal,
        },
    };

    Ok(ast::FunctionDefinition {
        name,
        kind,
        visibility,
        state_mutability,
        is_virtual: false,
        implemented: opt_flag(attrs, "implemented").unwrap_or(body.is_some()),
        scope: opt_id(attrs, "scope"),
        documentation: docstring(attrs),
        override_specifier: None,
        parameters,
        return_parameters,
        modifiers,
        body,
    }
    .into())
}

fn modifier_definition(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;

    let parameters = r
        .take_first_where(&mut kids, |t| t == "ParameterList")
        .ok_or_else(|| AstError::SchemaMismatch {
            src,
            reason: "modifier without a parameter list".into(),
        })?;

    Ok(ast::ModifierDefinition {
        name: require_str(attrs, "name", src)?.to_owned(),
        visibility: opt_enum_field(attrs, "visibility", src)?.unwrap_or(ast::Visibility::Internal),
        is_virtual: false,
        documentation: docstring(attrs),
        override_specifier: None,
        parameters,
        body: r.take_first_where(&mut kids, |t| t == "Block"),
    }
    .into())
}

fn event_definition(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::EventDefinition {
        name: require_str(attrs, "name", src)?.to_owned(),
        anonymous: flag(attrs, "anonymous"),
        documentation: docstring(attrs),
        parameters: kid(&kids, 0, src, "parameter list")?,
    }
    .into())
}

fn struct_definition(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::StructDefinition {
        name: require_str(attrs, "name", src)?.to_owned(),
        visibility: opt_enum_field(attrs, "visibility", src)?.unwrap_or(ast::Visibility::Public),
        scope: opt_id(attrs, "scope"),
        documentation: docstring(attrs),
        members: r.read_children(obj)?,
    }
    .into())
}

fn enum_definition(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::EnumDefinition {
        name: require_str(attrs, "name", src)?.to_owned(),
        documentation: docstring(attrs),
        members: r.read_children(obj)?,
    }
    .into())
}

fn enum_value(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::EnumValue {
        name: require_str(attrs, "name", src)?.to_owned(),
    }
    .into())
}

fn variable_declaration(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;
    let type_name = r.take_first_where(&mut kids, is_type_name);
    let value = kids.first().copied();

    let constant = flag(attrs, "constant");

    Ok(ast::VariableDeclaration {
        name: require_str(attrs, "name", src)?.to_owned(),
        constant,
        indexed: flag(attrs, "indexed"),
        state_variable: flag(attrs, "stateVariable"),
        mutability: if constant {
            ast::Mutability::Constant
        } else {
            ast::Mutability::Mutable
        },
        storage_location: opt_enum_field(attrs, "storageLocation", src)?
            .unwrap_or(ast::StorageLocation::Default),
        visibility: opt_enum_field(attrs, "visibility", src)?.unwrap_or(ast::Visibility::Internal),
        scope: opt_id(attrs, "scope"),
        type_string: legacy_type_string(attrs),
        documentation: docstring(attrs),
        type_name,
        override_specifier: None,
        value,
    }
    .into())
}

fn elementary_type_name(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ElementaryTypeName {
        name: require_str(attrs, "name", src)?.to_owned(),
        state_mutability: None,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn user_defined_type_name(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::UserDefinedTypeName {
        name: opt_str(attrs, "name"),
        referenced_declaration: opt_id(attrs, "referencedDeclaration"),
        path_node: None,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn array_type_name(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::ArrayTypeName {
        base_type: kid(&kids, 0, src, "base type")?,
        length: kids.get(1).copied(),
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn mapping(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::Mapping {
        key_type: kid(&kids, 0, src, "key type")?,
        value_type: kid(&kids, 1, src, "value type")?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn function_type_name(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    let state_mutability = if flag(attrs, "payable") {
        ast::StateMutability::Payable
    } else if flag(attrs, "constant") {
        ast::StateMutability::View
    } else {
        ast::StateMutability::Nonpayable
    };

    Ok(ast::FunctionTypeName {
        visibility: opt_enum_field(attrs, "visibility", src)?.unwrap_or(ast::Visibility::Internal),
        state_mutability,
        parameter_types: kid(&kids, 0, src, "parameter types")?,
        return_parameter_types: kid(&kids, 1, src, "return parameter types")?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn block(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Block {
        statements: r.read_children(obj)?,
    }
    .into())
}

fn if_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::IfStatement {
        condition: kid(&kids, 0, src, "condition")?,
        true_body: kid(&kids, 1, src, "true body")?,
        false_body: kids.get(2).copied(),
    }
    .into())
}

fn for_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;

    let body = kids.pop().ok_or_else(|| AstError::SchemaMismatch {
        src,
        reason: "for statement without a body".into(),
    })?;

    // The legacy schema drops omitted loop parts without a placeholder.
    // Kinds disambiguate: a declaration is the initializer, a bare
    // expression is the condition, and an expression statement is the
    // initializer when it comes before the condition slot, the loop
    // expression otherwise.
    let mut initialization_expression = None;
    let mut condition = None;
    let mut loop_expression = None;

    for id in kids {
        match r.tag_of(id) {
            "VariableDeclarationStatement" => initialization_expression = Some(id),

            "ExpressionStatement" => {
                if condition.is_none() && initialization_expression.is_none() {
                    initialization_expression = Some(id);
                } else {
                    loop_expression = Some(id);
                }
            }

            _ => condition = Some(id),
        }
    }

    Ok(ast::ForStatement {
        initialization_expression,
        condition,
        loop_expression,
        body,
    }
    .into())
}

fn while_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::WhileStatement {
        condition: kid(&kids, 0, src, "condition")?,
        body: kid(&kids, 1, src, "body")?,
    }
    .into())
}

fn do_while_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::DoWhileStatement {
        condition: kid(&kids, 0, src, "condition")?,
        body: kid(&kids, 1, src, "body")?,
    }
    .into())
}

fn return_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::Return {
        function_return_parameters: opt_id(attrs, "functionReturnParameters"),
        expression: kids.first().copied(),
    }
    .into())
}

fn break_statement(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    _attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Break {}.into())
}

fn continue_statement(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    _attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Continue {}.into())
}

fn throw_statement(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    _attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Throw {}.into())
}

fn emit_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::EmitStatement {
        event_call: kid(&kids, 0, src, "event call")?,
    }
    .into())
}

fn expression_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    _attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::ExpressionStatement {
        expression: kid(&kids, 0, src, "expression")?,
    }
    .into())
}

fn variable_declaration_statement(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;
    let declarations = r.take_where(&mut kids, |t| t == "VariableDeclaration");
    let initial_value = kids.first().copied();

    // `assignments` keeps omitted tuple positions as explicit nulls.
    // Where the attribute predates the schema, every declaration is its
    // own assignment target.
    let assignments = match attrs.get("assignments").and_then(Value::as_array) {
        Some(items) => items.iter().map(id_value).collect(),
        None => declarations.iter().copied().map(Some).collect(),
    };

    Ok(ast::VariableDeclarationStatement {
        assignments,
        declarations,
        initial_value,
    }
    .into())
}

fn inline_assembly(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::InlineAssembly {
        ast: None,
        operations: opt_str(attrs, "operations"),
    }
    .into())
}

fn placeholder_statement(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    _attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::PlaceholderStatement {}.into())
}

fn literal(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Literal {
        kind: opt_enum_field(attrs, "token", src)?.unwrap_or(ast::LiteralKind::Number),
        value: opt_str(attrs, "value"),
        hex_value: opt_str(attrs, "hexvalue"),
        subdenomination: opt_str(attrs, "subdenomination"),
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn identifier(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    // the identifier's name lives in the `value` attribute here
    Ok(ast::Identifier {
        name: require_str(attrs, "value", src)?.to_owned(),
        referenced_declaration: opt_id(attrs, "referencedDeclaration"),
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn member_access(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::MemberAccess {
        expression: kid(&kids, 0, src, "expression")?,
        member_name: require_str(attrs, "member_name", src)?.to_owned(),
        referenced_declaration: opt_id(attrs, "referencedDeclaration"),
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn index_access(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::IndexAccess {
        base_expression: kid(&kids, 0, src, "base expression")?,
        index_expression: kids.get(1).copied(),
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn unary_operation(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::UnaryOperation {
        prefix: flag(attrs, "prefix"),
        operator: require_str(attrs, "operator", src)?.to_owned(),
        sub_expression: kid(&kids, 0, src, "operand")?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn binary_operation(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::BinaryOperation {
        operator: require_str(attrs, "operator", src)?.to_owned(),
        left_expression: kid(&kids, 0, src, "left operand")?,
        right_expression: kid(&kids, 1, src, "right operand")?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn assignment(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::Assignment {
        operator: require_str(attrs, "operator", src)?.to_owned(),
        left_hand_side: kid(&kids, 0, src, "left-hand side")?,
        right_hand_side: kid(&kids, 1, src, "right-hand side")?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn conditional(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::Conditional {
        condition: kid(&kids, 0, src, "condition")?,
        true_expression: kid(&kids, 1, src, "true branch")?,
        false_expression: kid(&kids, 2, src, "false branch")?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn function_call(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut kids = r.read_children(obj)?;
    let expression = kid(&kids, 0, src, "callee")?;
    kids.remove(0);

    let kind = if flag(attrs, "type_conversion") {
        ast::FunctionCallKind::TypeConversion
    } else if flag(attrs, "isStructConstructorCall") {
        ast::FunctionCallKind::StructConstructorCall
    } else {
        ast::FunctionCallKind::FunctionCall
    };

    Ok(ast::FunctionCall {
        kind,
        expression,
        arguments: kids,
        names: string_list(attrs, "names"),
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn new_expression(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let kids = r.read_children(obj)?;

    Ok(ast::NewExpression {
        type_name: kid(&kids, 0, src, "type name")?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn tuple_expression(
    r: &mut LegacyReader<'_>,
    obj: &JsonObject,
    attrs: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::TupleExpression {
        is_inline_array: flag(attrs, "isInlineArray"),
        components: r.read_children_with_holes(obj)?,
        type_string: legacy_type_string(attrs),
    }
    .into())
}

fn elementary_type_name_expression(
    _r: &mut LegacyReader<'_>,
    _obj: &JsonObject,
    attrs: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ElementaryTypeNameExpression {
        type_name: TypeNameRef::Raw(require_str(attrs, "value", src)?.to_owned()),
        type_string: legacy_type_string(attrs),
    }
    .into())
}
