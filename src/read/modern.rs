//! The reader for modern compiler output (0.4.12 and later).
//!
//! Modern nodes are objects tagged with `nodeType`, carrying value fields
//! and named child fields directly. Builders follow the JSON shape
//! one-to-one, with fallbacks for fields that only appeared in later
//! compiler versions (`kind` on functions and calls, `mutability`,
//! structured documentation).

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde_json::Value;

use crate::ast::{self, Docstring, Node, NodeKind, SymbolAlias, SymbolOrigin, TypeNameRef};
use crate::error::{AstError, Result};
use crate::loc::SourceLocation;
use crate::read::{
    enum_field, flag, id_value, object, opt_enum_field, opt_flag, opt_id, opt_str, parse_src,
    require_id, require_str, string_list, JsonObject,
};
use crate::{AstContext, NodeId};

/// Builds one [`NodeKind`] out of a modern node object. The reader has
/// already parsed the tag and the source location; the builder reads the
/// variant's fields and recurses into children via the reader.
pub type ModernBuilder =
    fn(&mut ModernReader<'_>, &JsonObject, SourceLocation) -> Result<NodeKind>;

/// The `nodeType` dispatch table. [`Default`] covers the whole catalog;
/// [`register`](Self::register) adds or overrides tags.
pub struct ModernRegistry {
    builders: HashMap<String, ModernBuilder>,
}

impl ModernRegistry {
    pub fn register(&mut self, tag: impl Into<String>, builder: ModernBuilder) {
        self.builders.insert(tag.into(), builder);
    }

    pub fn get(&self, tag: &str) -> Option<ModernBuilder> {
        self.builders.get(tag).copied()
    }
}

impl Default for ModernRegistry {
    fn default() -> Self {
        let mut registry = Self {
            builders: HashMap::new(),
        };

        registry.register("SourceUnit", source_unit);
        registry.register("PragmaDirective", pragma_directive);
        registry.register("ImportDirective", import_directive);
        registry.register("InheritanceSpecifier", inheritance_specifier);
        registry.register("ModifierInvocation", modifier_invocation);
        registry.register("OverrideSpecifier", override_specifier);
        registry.register("ParameterList", parameter_list);
        registry.register("UsingForDirective", using_for_directive);
        registry.register("StructuredDocumentation", structured_documentation);
        registry.register("IdentifierPath", identifier_path);
        registry.register("ContractDefinition", contract_definition);
        registry.register("FunctionDefinition", function_definition);
        registry.register("ModifierDefinition", modifier_definition);
        registry.register("EventDefinition", event_definition);
        registry.register("ErrorDefinition", error_definition);
        registry.register("StructDefinition", struct_definition);
        registry.register("EnumDefinition", enum_definition);
        registry.register("EnumValue", enum_value);
        registry.register(
            "UserDefinedValueTypeDefinition",
            user_defined_value_type_definition,
        );
        registry.register("VariableDeclaration", variable_declaration);
        registry.register("ElementaryTypeName", elementary_type_name);
        registry.register("UserDefinedTypeName", user_defined_type_name);
        registry.register("ArrayTypeName", array_type_name);
        registry.register("Mapping", mapping);
        registry.register("FunctionTypeName", function_type_name);
        registry.register("Block", block);
        registry.register("UncheckedBlock", unchecked_block);
        registry.register("IfStatement", if_statement);
        registry.register("ForStatement", for_statement);
        registry.register("WhileStatement", while_statement);
        registry.register("DoWhileStatement", do_while_statement);
        registry.register("Return", return_statement);
        registry.register("Break", break_statement);
        registry.register("Continue", continue_statement);
        registry.register("Throw", throw_statement);
        registry.register("EmitStatement", emit_statement);
        registry.register("RevertStatement", revert_statement);
        registry.register("ExpressionStatement", expression_statement);
        registry.register(
            "VariableDeclarationStatement",
            variable_declaration_statement,
        );
        registry.register("TryStatement", try_statement);
        registry.register("TryCatchClause", try_catch_clause);
        registry.register("InlineAssembly", inline_assembly);
        registry.register("PlaceholderStatement", placeholder_statement);
        registry.register("Literal", literal);
        registry.register("Identifier", identifier);
        registry.register("MemberAccess", member_access);
        registry.register("IndexAccess", index_access);
        registry.register("IndexRangeAccess", index_range_access);
        registry.register("UnaryOperation", unary_operation);
        registry.register("BinaryOperation", binary_operation);
        registry.register("Assignment", assignment);
        registry.register("Conditional", conditional);
        registry.register("FunctionCall", function_call);
        registry.register("FunctionCallOptions", function_call_options);
        registry.register("NewExpression", new_expression);
        registry.register("TupleExpression", tuple_expression);
        registry.register(
            "ElementaryTypeNameExpression",
            elementary_type_name_expression,
        );

        registry
    }
}

/// Pass 1 of the modern schema: materializes node objects into the
/// context, depth-first.
pub struct ModernReader<'a> {
    ctx: &'a mut AstContext,
    registry: &'a ModernRegistry,
    path: &'a str,
    built: Vec<NodeId>,
}

impl<'a> ModernReader<'a> {
    pub fn new(ctx: &'a mut AstContext, registry: &'a ModernRegistry, path: &'a str) -> Self {
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

    /// Reads one node object: dispatches on `nodeType`, registers the
    /// node under the id the compiler assigned, and wires the parent
    /// pointers of its structural children.
    pub fn read_node(&mut self, v: &Value) -> Result<NodeId> {
        let obj = object(v, SourceLocation::default())?;
        let src = parse_src(obj)?;
        let tag = require_str(obj, "nodeType", src)?;

        let Some(builder) = self.registry.get(tag) else {
            return Err(AstError::UnknownNodeKind {
                tag: tag.to_owned(),
                src,
            });
        };

        let kind = builder(self, obj, src)?;
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

    fn read_child(&mut self, obj: &JsonObject, key: &str, src: SourceLocation) -> Result<NodeId> {
        match obj.get(key) {
            Some(v) if !v.is_null() => self.read_node(v),

            _ => Err(AstError::SchemaMismatch {
                src,
                reason: format!("missing required child `{key}`"),
            }),
        }
    }

    fn read_opt_child(&mut self, obj: &JsonObject, key: &str) -> Result<Option<NodeId>> {
        match obj.get(key) {
            Some(v) if !v.is_null() => self.read_node(v).map(Some),
            _ => Ok(None),
        }
    }

    fn read_children(&mut self, obj: &JsonObject, key: &str) -> Result<Vec<NodeId>> {
        Ok(self.read_opt_children(obj, key)?.unwrap_or_default())
    }

    fn read_opt_children(&mut self, obj: &JsonObject, key: &str) -> Result<Option<Vec<NodeId>>> {
        let Some(items) = obj.get(key).and_then(Value::as_array) else {
            return Ok(None);
        };

        items
            .iter()
            .map(|item| self.read_node(item))
            .collect::<Result<_>>()
            .map(Some)
    }

    /// Child arrays that keep omitted positions as explicit nulls
    /// (tuple components).
    fn read_children_with_holes(
        &mut self,
        obj: &JsonObject,
        key: &str,
    ) -> Result<Vec<Option<NodeId>>> {
        let Some(items) = obj.get(key).and_then(Value::as_array) else {
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

    /// `documentation` drifted from a plain string (before 0.6) to a
    /// `StructuredDocumentation` node.
    fn docstring(&mut self, obj: &JsonObject) -> Result<Option<Docstring>> {
        match obj.get("documentation") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(Docstring::Text(text.clone()))),
            Some(v) => self.read_node(v).map(|id| Some(Docstring::Node(id))),
        }
    }

    fn tag_of(&self, id: NodeId) -> &str {
        self.ctx.lookup(id).map(Node::tag).unwrap_or("")
    }
}

/// The `typeDescriptions.typeString` of an expression or type name.
fn type_string(obj: &JsonObject) -> Option<String> {
    obj.get("typeDescriptions")?
        .as_object()?
        .get("typeString")?
        .as_str()
        .map(str::to_owned)
}

fn exported_symbols(obj: &JsonObject) -> BTreeMap<String, NodeId> {
    let mut out = BTreeMap::new();

    let Some(map) = obj.get("exportedSymbols").and_then(Value::as_object) else {
        return out;
    };

    for (name, v) in map {
        let id = match v {
            Value::Array(items) => items.first().and_then(id_value),
            other => id_value(other),
        };

        if let Some(id) = id {
            out.insert(name.clone(), id);
        }
    }

    out
}

fn id_list(obj: &JsonObject, key: &str) -> Vec<NodeId> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(id_value).collect())
        .unwrap_or_default()
}

fn source_unit(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    let absolute_path = opt_str(obj, "absolutePath").unwrap_or_else(|| r.path.to_owned());
    let license = opt_str(obj, "license");
    let exported_symbols = exported_symbols(obj);
    let nodes = r.read_children(obj, "nodes")?;

    Ok(ast::SourceUnit {
        absolute_path,
        license,
        exported_symbols,
        nodes,
    }
    .into())
}

fn pragma_directive(
    _r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::PragmaDirective {
        literals: string_list(obj, "literals"),
    }
    .into())
}

fn import_directive(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let mut symbol_aliases = Vec::new();

    if let Some(items) = obj.get("symbolAliases").and_then(Value::as_array) {
        for item in items {
            let entry = object(item, src)?;
            let local = opt_str(entry, "local");

            let foreign = match entry.get("foreign") {
                Some(v @ Value::Object(_)) => SymbolOrigin::Node(r.read_node(v)?),
                Some(Value::String(name)) => SymbolOrigin::Name(name.clone()),
                _ => continue,
            };

            symbol_aliases.push(SymbolAlias { foreign, local });
        }
    }

    Ok(ast::ImportDirective {
        file: require_str(obj, "file", src)?.to_owned(),
        absolute_path: opt_str(obj, "absolutePath").unwrap_or_default(),
        unit_alias: opt_str(obj, "unitAlias").unwrap_or_default(),
        symbol_aliases,
        scope: opt_id(obj, "scope"),
        source_unit: opt_id(obj, "sourceUnit"),
    }
    .into())
}

fn inheritance_specifier(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::InheritanceSpecifier {
        base_name: r.read_child(obj, "baseName", src)?,
        arguments: r.read_opt_children(obj, "arguments")?,
    }
    .into())
}

fn modifier_invocation(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ModifierInvocation {
        modifier_name: r.read_child(obj, "modifierName", src)?,
        arguments: r.read_opt_children(obj, "arguments")?,
        kind: opt_str(obj, "kind"),
    }
    .into())
}

fn override_specifier(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::OverrideSpecifier {
        overrides: r.read_children(obj, "overrides")?,
    }
    .into())
}

fn parameter_list(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ParameterList {
        parameters: r.read_children(obj, "parameters")?,
    }
    .into())
}

fn using_for_directive(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let library_name = r.read_opt_child(obj, "libraryName")?;

    let mut function_list = Vec::new();
    if let Some(items) = obj.get("functionList").and_then(Value::as_array) {
        for item in items {
            let entry = object(item, src)?;

            // `using {f as +} for T` entries carry `operator`/`definition`
            // pairs; only the plain attached functions are modelled.
            if let Some(function) = entry.get("function").filter(|v| !v.is_null()) {
                function_list.push(r.read_node(function)?);
            }
        }
    }

    Ok(ast::UsingForDirective {
        library_name,
        function_list,
        type_name: r.read_opt_child(obj, "typeName")?,
        is_global: flag(obj, "global"),
    }
    .into())
}

fn structured_documentation(
    _r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::StructuredDocumentation {
        text: require_str(obj, "text", src)?.to_owned(),
    }
    .into())
}

fn identifier_path(
    _r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::IdentifierPath {
        name: require_str(obj, "name", src)?.to_owned(),
        referenced_declaration: opt_id(obj, "referencedDeclaration"),
    }
    .into())
}

fn contract_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let documentation = r.docstring(obj)?;
    let base_contracts = r.read_children(obj, "baseContracts")?;
    let nodes = r.read_children(obj, "nodes")?;

    Ok(ast::ContractDefinition {
        name: require_str(obj, "name", src)?.to_owned(),
        kind: opt_enum_field(obj, "contractKind", src)?.unwrap_or(ast::ContractKind::Contract),
        is_abstract: flag(obj, "abstract"),
        fully_implemented: opt_flag(obj, "fullyImplemented").unwrap_or(true),
        linearized_base_contracts: id_list(obj, "linearizedBaseContracts"),
        used_errors: id_list(obj, "usedErrors"),
        scope: opt_id(obj, "scope"),
        documentation,
        base_contracts,
        nodes,
    }
    .into())
}

fn function_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let documentation = r.docstring(obj)?;
    let override_specifier = r.read_opt_child(obj, "overrides")?;
    let parameters = r.read_child(obj, "parameters", src)?;
    let return_parameters = r.read_child(obj, "returnParameters", src)?;
    let modifiers = r.read_children(obj, "modifiers")?;
    let body = r.read_opt_child(obj, "body")?;

    let name = require_str(obj, "name", src)?.to_owned();

    // `kind` only exists from 0.5.0 on; before that the constructor and
    // fallback are recognizable by flag and name.
    let kind = match opt_enum_field(obj, "kind", src)? {
        Some(kind) => kind,
        None if flag(obj, "isConstructor") => ast::FunctionKind::Constructor,
        None if name.is_empty() => ast::FunctionKind::Fallback,
        None => ast::FunctionKind::Function,
    };

    let state_mutability = match opt_enum_field(obj, "stateMutability", src)? {
        Some(sm) => sm,
        None if flag(obj, "payable") => ast::StateMutability::Payable,
        None if flag(obj, "constant") => ast::StateMutability::View,
        None => ast::StateMutability::Nonpayable,
    };

    Ok(ast::FunctionDefinition {
        name,
        kind,
        visibility: enum_field(obj, "visibility", src)?,
        state_mutability,
        is_virtual: flag(obj, "virtual"),
        implemented: opt_flag(obj, "implemented").unwrap_or(body.is_some()),
        scope: opt_id(obj, "scope"),
        documentation,
        override_specifier,
        parameters,
        return_parameters,
        modifiers,
        body,
    }
    .into())
}

fn modifier_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ModifierDefinition {
        name: require_str(obj, "name", src)?.to_owned(),
        visibility: opt_enum_field(obj, "visibility", src)?.unwrap_or(ast::Visibility::Internal),
        is_virtual: flag(obj, "virtual"),
        documentation: r.docstring(obj)?,
        override_specifier: r.read_opt_child(obj, "overrides")?,
        parameters: r.read_child(obj, "parameters", src)?,
        body: r.read_opt_child(obj, "body")?,
    }
    .into())
}

fn event_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::EventDefinition {
        name: require_str(obj, "name", src)?.to_owned(),
        anonymous: flag(obj, "anonymous"),
        documentation: r.docstring(obj)?,
        parameters: r.read_child(obj, "parameters", src)?,
    }
    .into())
}

fn error_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ErrorDefinition {
        name: require_str(obj, "name", src)?.to_owned(),
        documentation: r.docstring(obj)?,
        parameters: r.read_child(obj, "parameters", src)?,
    }
    .into())
}

fn struct_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::StructDefinition {
        name: require_str(obj, "name", src)?.to_owned(),
        visibility: opt_enum_field(obj, "visibility", src)?.unwrap_or(ast::Visibility::Public),
        scope: opt_id(obj, "scope"),
        documentation: r.docstring(obj)?,
        members: r.read_children(obj, "members")?,
    }
    .into())
}

fn enum_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::EnumDefinition {
        name: require_str(obj, "name", src)?.to_owned(),
        documentation: r.docstring(obj)?,
        members: r.read_children(obj, "members")?,
    }
    .into())
}

fn enum_value(
    _r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::EnumValue {
        name: require_str(obj, "name", src)?.to_owned(),
    }
    .into())
}

fn user_defined_value_type_definition(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::UserDefinedValueTypeDefinition {
        name: require_str(obj, "name", src)?.to_owned(),
        underlying_type: r.read_child(obj, "underlyingType", src)?,
    }
    .into())
}

fn variable_declaration(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let constant = flag(obj, "constant");

    let mutability = match opt_enum_field(obj, "mutability", src)? {
        Some(m) => m,
        None if constant => ast::Mutability::Constant,
        None => ast::Mutability::Mutable,
    };

    Ok(ast::VariableDeclaration {
        name: require_str(obj, "name", src)?.to_owned(),
        constant,
        indexed: flag(obj, "indexed"),
        state_variable: flag(obj, "stateVariable"),
        mutability,
        storage_location: opt_enum_field(obj, "storageLocation", src)?
            .unwrap_or(ast::StorageLocation::Default),
        visibility: opt_enum_field(obj, "visibility", src)?.unwrap_or(ast::Visibility::Internal),
        scope: opt_id(obj, "scope"),
        type_string: type_string(obj),
        documentation: r.docstring(obj)?,
        type_name: r.read_opt_child(obj, "typeName")?,
        override_specifier: r.read_opt_child(obj, "overrides")?,
        value: r.read_opt_child(obj, "value")?,
    }
    .into())
}

fn elementary_type_name(
    _r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ElementaryTypeName {
        name: require_str(obj, "name", src)?.to_owned(),
        state_mutability: opt_enum_field(obj, "stateMutability", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn user_defined_type_name(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::UserDefinedTypeName {
        name: opt_str(obj, "name"),
        referenced_declaration: opt_id(obj, "referencedDeclaration"),
        path_node: r.read_opt_child(obj, "pathNode")?,
        type_string: type_string(obj),
    }
    .into())
}

fn array_type_name(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ArrayTypeName {
        base_type: r.read_child(obj, "baseType", src)?,
        length: r.read_opt_child(obj, "length")?,
        type_string: type_string(obj),
    }
    .into())
}

fn mapping(r: &mut ModernReader<'_>, obj: &JsonObject, src: SourceLocation) -> Result<NodeKind> {
    Ok(ast::Mapping {
        key_type: r.read_child(obj, "keyType", src)?,
        value_type: r.read_child(obj, "valueType", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn function_type_name(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let state_mutability = match opt_enum_field(obj, "stateMutability", src)? {
        Some(sm) => sm,
        None if flag(obj, "payable") => ast::StateMutability::Payable,
        None if flag(obj, "constant") => ast::StateMutability::View,
        None => ast::StateMutability::Nonpayable,
    };

    Ok(ast::FunctionTypeName {
        visibility: opt_enum_field(obj, "visibility", src)?.unwrap_or(ast::Visibility::Internal),
        state_mutability,
        parameter_types: r.read_child(obj, "parameterTypes", src)?,
        return_parameter_types: r.read_child(obj, "returnParameterTypes", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn block(r: &mut ModernReader<'_>, obj: &JsonObject, _src: SourceLocation) -> Result<NodeKind> {
    Ok(ast::Block {
        statements: r.read_children(obj, "statements")?,
    }
    .into())
}

fn unchecked_block(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::UncheckedBlock {
        statements: r.read_children(obj, "statements")?,
    }
    .into())
}

fn if_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::IfStatement {
        condition: r.read_child(obj, "condition", src)?,
        true_body: r.read_child(obj, "trueBody", src)?,
        false_body: r.read_opt_child(obj, "falseBody")?,
    }
    .into())
}

fn for_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ForStatement {
        initialization_expression: r.read_opt_child(obj, "initializationExpression")?,
        condition: r.read_opt_child(obj, "condition")?,
        loop_expression: r.read_opt_child(obj, "loopExpression")?,
        body: r.read_child(obj, "body", src)?,
    }
    .into())
}

fn while_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::WhileStatement {
        condition: r.read_child(obj, "condition", src)?,
        body: r.read_child(obj, "body", src)?,
    }
    .into())
}

fn do_while_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::DoWhileStatement {
        condition: r.read_child(obj, "condition", src)?,
        body: r.read_child(obj, "body", src)?,
    }
    .into())
}

fn return_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Return {
        function_return_parameters: opt_id(obj, "functionReturnParameters"),
        expression: r.read_opt_child(obj, "expression")?,
    }
    .into())
}

fn break_statement(
    _r: &mut ModernReader<'_>,
    _obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Break {}.into())
}

fn continue_statement(
    _r: &mut ModernReader<'_>,
    _obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Continue {}.into())
}

fn throw_statement(
    _r: &mut ModernReader<'_>,
    _obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Throw {}.into())
}

fn emit_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::EmitStatement {
        event_call: r.read_child(obj, "eventCall", src)?,
    }
    .into())
}

fn revert_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::RevertStatement {
        error_call: r.read_child(obj, "errorCall", src)?,
    }
    .into())
}

fn expression_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::ExpressionStatement {
        expression: r.read_child(obj, "expression", src)?,
    }
    .into())
}

fn variable_declaration_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    let assignments = obj
        .get("assignments")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(id_value).collect())
        .unwrap_or_default();

    Ok(ast::VariableDeclarationStatement {
        assignments,
        declarations: r
            .read_children_with_holes(obj, "declarations")?
            .into_iter()
            .flatten()
            .collect(),
        initial_value: r.read_opt_child(obj, "initialValue")?,
    }
    .into())
}

fn try_statement(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::TryStatement {
        external_call: r.read_child(obj, "externalCall", src)?,
        clauses: r.read_children(obj, "clauses")?,
    }
    .into())
}

fn try_catch_clause(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::TryCatchClause {
        error_name: opt_str(obj, "errorName").unwrap_or_default(),
        parameters: r.read_opt_child(obj, "parameters")?,
        block: r.read_child(obj, "block", src)?,
    }
    .into())
}

fn inline_assembly(
    _r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::InlineAssembly {
        ast: obj.get("AST").filter(|v| !v.is_null()).cloned(),
        operations: opt_str(obj, "operations"),
    }
    .into())
}

fn placeholder_statement(
    _r: &mut ModernReader<'_>,
    _obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::PlaceholderStatement {}.into())
}

fn literal(_r: &mut ModernReader<'_>, obj: &JsonObject, src: SourceLocation) -> Result<NodeKind> {
    // named `token` up to 0.4.x, `kind` from 0.5.0 on
    let kind = match opt_enum_field(obj, "kind", src)? {
        Some(kind) => kind,
        None => opt_enum_field(obj, "token", src)?.unwrap_or(ast::LiteralKind::Number),
    };

    Ok(ast::Literal {
        kind,
        value: opt_str(obj, "value"),
        hex_value: opt_str(obj, "hexValue"),
        subdenomination: opt_str(obj, "subdenomination"),
        type_string: type_string(obj),
    }
    .into())
}

fn identifier(
    _r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Identifier {
        name: require_str(obj, "name", src)?.to_owned(),
        referenced_declaration: opt_id(obj, "referencedDeclaration"),
        type_string: type_string(obj),
    }
    .into())
}

fn member_access(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::MemberAccess {
        expression: r.read_child(obj, "expression", src)?,
        member_name: require_str(obj, "memberName", src)?.to_owned(),
        referenced_declaration: opt_id(obj, "referencedDeclaration"),
        type_string: type_string(obj),
    }
    .into())
}

fn index_access(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::IndexAccess {
        base_expression: r.read_child(obj, "baseExpression", src)?,
        index_expression: r.read_opt_child(obj, "indexExpression")?,
        type_string: type_string(obj),
    }
    .into())
}

fn index_range_access(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::IndexRangeAccess {
        base_expression: r.read_child(obj, "baseExpression", src)?,
        start_expression: r.read_opt_child(obj, "startExpression")?,
        end_expression: r.read_opt_child(obj, "endExpression")?,
        type_string: type_string(obj),
    }
    .into())
}

fn unary_operation(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::UnaryOperation {
        prefix: flag(obj, "prefix"),
        operator: require_str(obj, "operator", src)?.to_owned(),
        sub_expression: r.read_child(obj, "subExpression", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn binary_operation(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::BinaryOperation {
        operator: require_str(obj, "operator", src)?.to_owned(),
        left_expression: r.read_child(obj, "leftExpression", src)?,
        right_expression: r.read_child(obj, "rightExpression", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn assignment(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Assignment {
        operator: require_str(obj, "operator", src)?.to_owned(),
        left_hand_side: r.read_child(obj, "leftHandSide", src)?,
        right_hand_side: r.read_child(obj, "rightHandSide", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn conditional(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::Conditional {
        condition: r.read_child(obj, "condition", src)?,
        true_expression: r.read_child(obj, "trueExpression", src)?,
        false_expression: r.read_child(obj, "falseExpression", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn function_call(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let expression = r.read_child(obj, "expression", src)?;
    let arguments = r.read_children(obj, "arguments")?;

    // `kind` appeared in 0.5.0. Before that, struct construction has its
    // own flag and type conversions are calls whose callee is a type.
    let kind = match opt_enum_field(obj, "kind", src)? {
        Some(kind) => kind,
        None if flag(obj, "isStructConstructorCall") => {
            ast::FunctionCallKind::StructConstructorCall
        }
        None if r.tag_of(expression) == "ElementaryTypeNameExpression" => {
            ast::FunctionCallKind::TypeConversion
        }
        None => ast::FunctionCallKind::FunctionCall,
    };

    Ok(ast::FunctionCall {
        kind,
        expression,
        arguments,
        names: string_list(obj, "names"),
        type_string: type_string(obj),
    }
    .into())
}

fn function_call_options(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::FunctionCallOptions {
        expression: r.read_child(obj, "expression", src)?,
        names: string_list(obj, "names"),
        options: r.read_children(obj, "options")?,
        type_string: type_string(obj),
    }
    .into())
}

fn new_expression(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::NewExpression {
        type_name: r.read_child(obj, "typeName", src)?,
        type_string: type_string(obj),
    }
    .into())
}

fn tuple_expression(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    _src: SourceLocation,
) -> Result<NodeKind> {
    Ok(ast::TupleExpression {
        is_inline_array: flag(obj, "isInlineArray"),
        components: r.read_children_with_holes(obj, "components")?,
        type_string: type_string(obj),
    }
    .into())
}

fn elementary_type_name_expression(
    r: &mut ModernReader<'_>,
    obj: &JsonObject,
    src: SourceLocation,
) -> Result<NodeKind> {
    let type_name = match obj.get("typeName") {
        Some(Value::String(name)) => TypeNameRef::Raw(name.clone()),
        Some(v @ Value::Object(_)) => TypeNameRef::Node(r.read_node(v)?),

        _ => {
            return Err(AstError::SchemaMismatch {
                src,
                reason: "missing `typeName`".into(),
            })
        }
    };

    Ok(ast::ElementaryTypeNameExpression {
        type_name,
        type_string: type_string(obj),
    }
    .into())
}
