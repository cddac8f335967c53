//! The node catalog: every AST variant the compiler can produce, in either
//! schema family, as one closed sum type.
//!
//! A [`Node`] pairs the four universal attributes (id, source location,
//! parent pointer, retained raw JSON) with a [`NodeKind`] payload. Payload
//! structs store structural children and cross-references as [`NodeId`]s;
//! the owning [`AstContext`](crate::AstContext) resolves them to live nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::loc::SourceLocation;
use crate::NodeId;

/// A reference-typed attribute slot, as reported by
/// [`NodeKind::references`].
///
/// `required` slots must resolve through the context; dangling ids in
/// non-required slots are tolerated and their views yield nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// The attribute the id was found in, e.g. `"scope"`.
    pub attribute: &'static str,

    /// The id the attribute names.
    pub target: NodeId,

    /// Whether the link pass and the sanity checker must be able to
    /// resolve `target`.
    pub required: bool,
}

/// An AST node registered in a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Context-unique, positive, stable for the node's lifetime.
    pub id: NodeId,

    /// The `offset:length:fileIndex` triple.
    pub src: SourceLocation,

    /// The containing node, or `None` at a tree root. Non-owning: the
    /// context owns every node.
    pub parent: Option<NodeId>,

    /// The JSON fragment this node was read from, if any. Factory-made
    /// nodes and copies have none.
    #[serde(skip)]
    pub raw: Option<Value>,

    /// The variant payload.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// The schema tag of this node's variant, e.g. `"ContractDefinition"`.
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Ordered direct structural children.
    pub fn children(&self) -> Vec<NodeId> {
        self.kind.children()
    }

    /// Every reference-typed attribute slot currently holding an id.
    pub fn references(&self) -> Vec<Reference> {
        self.kind.references()
    }
}

macro_rules! node_kinds {
    ($($variant:ident,)+) => {
        /// The closed sum of all catalog variants. Variant names equal the
        /// modern schema's `nodeType` tags.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "nodeType")]
        pub enum NodeKind {
            $($variant($variant),)+
        }

        $(
            impl From<$variant> for NodeKind {
                fn from(payload: $variant) -> Self {
                    Self::$variant(payload)
                }
            }
        )+

        impl NodeKind {
            /// The schema tag naming this variant.
            pub fn tag(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }
        }
    };
}

node_kinds! {
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    InheritanceSpecifier,
    ModifierInvocation,
    OverrideSpecifier,
    ParameterList,
    UsingForDirective,
    StructuredDocumentation,
    IdentifierPath,
    ContractDefinition,
    FunctionDefinition,
    ModifierDefinition,
    EventDefinition,
    ErrorDefinition,
    StructDefinition,
    EnumDefinition,
    EnumValue,
    UserDefinedValueTypeDefinition,
    VariableDeclaration,
    ElementaryTypeName,
    UserDefinedTypeName,
    ArrayTypeName,
    Mapping,
    FunctionTypeName,
    Block,
    UncheckedBlock,
    IfStatement,
    ForStatement,
    WhileStatement,
    DoWhileStatement,
    Return,
    Break,
    Continue,
    Throw,
    EmitStatement,
    RevertStatement,
    ExpressionStatement,
    VariableDeclarationStatement,
    TryStatement,
    TryCatchClause,
    InlineAssembly,
    PlaceholderStatement,
    Literal,
    Identifier,
    MemberAccess,
    IndexAccess,
    IndexRangeAccess,
    UnaryOperation,
    BinaryOperation,
    Assignment,
    Conditional,
    FunctionCall,
    FunctionCallOptions,
    NewExpression,
    TupleExpression,
    ElementaryTypeNameExpression,
}

/// The kind of a contract-like definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractKind {
    Contract,
    Interface,
    Library,
}

/// The kind of a function definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionKind {
    Constructor,
    Function,
    Fallback,
    Receive,
    FreeFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    External,
    Public,
    Internal,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

/// Mutability of a variable declaration. Pre-0.6 output has no
/// `mutability` field; the readers derive it from the `constant` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    Mutable,
    Immutable,
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageLocation {
    Default,
    Storage,
    Memory,
    Calldata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiteralKind {
    Number,
    String,
    Bool,
    HexString,
    UnicodeString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionCallKind {
    FunctionCall,
    TypeConversion,
    StructConstructorCall,
}

/// One entry of an import's `symbolAliases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolAlias {
    /// Where the imported symbol comes from.
    pub foreign: SymbolOrigin,

    /// The name the symbol is bound to locally, if renamed.
    pub local: Option<String>,
}

/// The foreign half of a symbol alias.
///
/// Modern output ships a full `Identifier` node, which becomes a
/// structural child of the import. The legacy schema exposes partially
/// valid alias records of which only the name is trustworthy, so those
/// keep just the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolOrigin {
    Node(NodeId),
    Name(String),
}

/// The type operand of an [`ElementaryTypeNameExpression`]: a real
/// `ElementaryTypeName` child from 0.6 onwards, a bare string before that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeNameRef {
    Node(NodeId),
    Raw(String),
}

/// A declaration's documentation: a [`StructuredDocumentation`] child in
/// modern output, a plain string in legacy output (and modern output
/// before 0.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Docstring {
    Node(NodeId),
    Text(String),
}

/// The root node of one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUnit {
    pub absolute_path: String,
    pub license: Option<String>,

    /// Top-level symbol name to declaration id. Invariant: every value
    /// resolves in the owning context.
    pub exported_symbols: BTreeMap<String, NodeId>,

    /// Top-level declarations and directives, in source order.
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PragmaDirective {
    /// The pragma's tokens as the compiler splits them, e.g.
    /// `["solidity", "^", "0.4.13"]`.
    pub literals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDirective {
    /// The path as written in the source.
    pub file: String,

    /// The resolved path of the imported unit.
    pub absolute_path: String,

    /// The name of a `import "..." as alias` binding, empty otherwise.
    pub unit_alias: String,

    pub symbol_aliases: Vec<SymbolAlias>,

    /// The source unit the import appears in.
    pub scope: Option<NodeId>,

    /// The imported source unit.
    pub source_unit: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritanceSpecifier {
    /// A `UserDefinedTypeName` or `IdentifierPath` naming the base.
    pub base_name: NodeId,

    /// Base constructor arguments; absent when the specifier carries no
    /// argument list at all.
    pub arguments: Option<Vec<NodeId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierInvocation {
    /// An `Identifier` or `IdentifierPath` naming the modifier or base.
    pub modifier_name: NodeId,

    pub arguments: Option<Vec<NodeId>>,

    /// `"modifierInvocation"` or `"baseConstructorSpecifier"` where the
    /// compiler distinguishes them.
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideSpecifier {
    /// The `UserDefinedTypeName`s or `IdentifierPath`s listed in
    /// `override(...)`; empty for a bare `override`.
    pub overrides: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterList {
    pub parameters: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsingForDirective {
    /// The library, for the `using L for T` form.
    pub library_name: Option<NodeId>,

    /// Attached functions, for the `using {f, g} for T` form.
    pub function_list: Vec<NodeId>,

    /// The target type; absent for `using L for *`.
    pub type_name: Option<NodeId>,

    pub is_global: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocumentation {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierPath {
    pub name: String,
    pub referenced_declaration: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDefinition {
    pub name: String,

    #[serde(rename = "contractKind")]
    pub kind: ContractKind,

    #[serde(rename = "abstract")]
    pub is_abstract: bool,

    pub fully_implemented: bool,

    /// The C3 linearization of the inheritance chain, this contract first.
    pub linearized_base_contracts: Vec<NodeId>,

    /// Errors usable in `revert` inside this contract.
    pub used_errors: Vec<NodeId>,

    /// The enclosing source unit.
    pub scope: Option<NodeId>,

    pub documentation: Option<Docstring>,
    pub base_contracts: Vec<NodeId>,

    /// Member declarations, in source order.
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub name: String,
    pub kind: FunctionKind,
    pub visibility: Visibility,
    pub state_mutability: StateMutability,

    #[serde(rename = "virtual")]
    pub is_virtual: bool,

    pub implemented: bool,

    /// The enclosing contract or source unit.
    pub scope: Option<NodeId>,

    pub documentation: Option<Docstring>,
    pub override_specifier: Option<NodeId>,
    pub parameters: NodeId,
    pub return_parameters: NodeId,
    pub modifiers: Vec<NodeId>,
    pub body: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierDefinition {
    pub name: String,
    pub visibility: Visibility,

    #[serde(rename = "virtual")]
    pub is_virtual: bool,

    pub documentation: Option<Docstring>,
    pub override_specifier: Option<NodeId>,
    pub parameters: NodeId,
    pub body: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    pub name: String,
    pub anonymous: bool,
    pub documentation: Option<Docstring>,
    pub parameters: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDefinition {
    pub name: String,
    pub documentation: Option<Docstring>,
    pub parameters: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDefinition {
    pub name: String,
    pub visibility: Visibility,

    /// The enclosing contract or source unit.
    pub scope: Option<NodeId>,

    pub documentation: Option<Docstring>,

    /// The fields, as `VariableDeclaration`s in source order.
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDefinition {
    pub name: String,
    pub documentation: Option<Docstring>,
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDefinedValueTypeDefinition {
    pub name: String,

    /// The wrapped `ElementaryTypeName`.
    pub underlying_type: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub name: String,
    pub constant: bool,

    /// Whether an event parameter is indexed.
    pub indexed: bool,

    pub state_variable: bool,
    pub mutability: Mutability,
    pub storage_location: StorageLocation,
    pub visibility: Visibility,

    /// The enclosing contract, function, or source unit.
    pub scope: Option<NodeId>,

    /// The compiler's `typeString` for the declared type.
    pub type_string: Option<String>,

    pub documentation: Option<Docstring>,

    /// Absent only in `var`-style declarations of old compilers.
    pub type_name: Option<NodeId>,

    pub override_specifier: Option<NodeId>,

    /// The initializer of a state variable.
    pub value: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementaryTypeName {
    pub name: String,

    /// `payable` on `address payable`.
    pub state_mutability: Option<StateMutability>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDefinedTypeName {
    /// The dotted name; newer compilers put it in `path_node` instead.
    pub name: Option<String>,

    pub referenced_declaration: Option<NodeId>,

    /// The `IdentifierPath` child emitted from 0.8 onwards.
    pub path_node: Option<NodeId>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayTypeName {
    pub base_type: NodeId,

    /// The fixed length expression of `T[n]`.
    pub length: Option<NodeId>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub key_type: NodeId,
    pub value_type: NodeId,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionTypeName {
    pub visibility: Visibility,
    pub state_mutability: StateMutability,
    pub parameter_types: NodeId,
    pub return_parameter_types: NodeId,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub statements: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncheckedBlock {
    pub statements: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfStatement {
    pub condition: NodeId,
    pub true_body: NodeId,
    pub false_body: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForStatement {
    /// A `VariableDeclarationStatement` or `ExpressionStatement`.
    pub initialization_expression: Option<NodeId>,

    pub condition: Option<NodeId>,

    /// The post-iteration `ExpressionStatement`.
    pub loop_expression: Option<NodeId>,

    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhileStatement {
    pub condition: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoWhileStatement {
    pub condition: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Return {
    /// The `ParameterList` holding the enclosing function's return
    /// parameters. Absent for a bare `return;` inside a modifier and in
    /// some legacy builds.
    pub function_return_parameters: Option<NodeId>,

    pub expression: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Break {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continue {}

/// Pre-0.5 `throw;`. Only the legacy reader produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Throw {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitStatement {
    /// The `FunctionCall` invoking the event.
    pub event_call: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevertStatement {
    /// The `FunctionCall` invoking the error.
    pub error_call: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionStatement {
    pub expression: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclarationStatement {
    /// For each tuple position, the id of the declaration it assigns to,
    /// or `None` for an omitted position. Positions line up with the
    /// initializer tuple, not with `declarations`.
    pub assignments: Vec<Option<NodeId>>,

    /// The declared variables, omitted tuple positions excluded.
    pub declarations: Vec<NodeId>,

    pub initial_value: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryStatement {
    /// The guarded external call or contract creation.
    pub external_call: NodeId,

    /// The success clause followed by the catch clauses.
    pub clauses: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryCatchClause {
    /// `"Error"`, `"Panic"`, or empty for the success and catch-all
    /// clauses.
    pub error_name: String,

    pub parameters: Option<NodeId>,
    pub block: NodeId,
}

/// An `assembly { ... }` block. The embedded Yul tree (modern output) or
/// the legacy operations text is retained verbatim; the catalog does not
/// model Yul nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineAssembly {
    #[serde(rename = "AST")]
    pub ast: Option<Value>,

    pub operations: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderStatement {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Literal {
    pub kind: LiteralKind,

    /// `None` when the value does not fit the compiler's decimal
    /// rendering (very large hex literals).
    pub value: Option<String>,

    pub hex_value: Option<String>,

    /// `wei`, `ether`, `days`, ...
    pub subdenomination: Option<String>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub name: String,

    /// Absent in some builds; the view is nullable.
    pub referenced_declaration: Option<NodeId>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAccess {
    pub expression: NodeId,
    pub member_name: String,

    /// Absent for built-in members; the view is nullable.
    pub referenced_declaration: Option<NodeId>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexAccess {
    pub base_expression: NodeId,

    /// Absent in abi.decode-style type arguments like `uint[]`.
    pub index_expression: Option<NodeId>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRangeAccess {
    pub base_expression: NodeId,
    pub start_expression: Option<NodeId>,
    pub end_expression: Option<NodeId>,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnaryOperation {
    pub prefix: bool,
    pub operator: String,
    pub sub_expression: NodeId,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryOperation {
    pub operator: String,
    pub left_expression: NodeId,
    pub right_expression: NodeId,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub operator: String,
    pub left_hand_side: NodeId,
    pub right_hand_side: NodeId,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub condition: NodeId,
    pub true_expression: NodeId,
    pub false_expression: NodeId,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    pub kind: FunctionCallKind,
    pub expression: NodeId,
    pub arguments: Vec<NodeId>,

    /// Argument names of the `{name: value}` call form, empty otherwise.
    pub names: Vec<String>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallOptions {
    pub expression: NodeId,

    /// The option names, parallel to `options`.
    pub names: Vec<String>,

    pub options: Vec<NodeId>,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpression {
    pub type_name: NodeId,
    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleExpression {
    pub is_inline_array: bool,

    /// Tuple components with omitted positions preserved as `None`.
    pub components: Vec<Option<NodeId>>,

    pub type_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementaryTypeNameExpression {
    pub type_name: TypeNameRef,
    pub type_string: Option<String>,
}

fn push_opt(ids: &mut Vec<NodeId>, id: &Option<NodeId>) {
    if let Some(id) = id {
        ids.push(*id);
    }
}

fn push_doc(ids: &mut Vec<NodeId>, doc: &Option<Docstring>) {
    if let Some(Docstring::Node(id)) = doc {
        ids.push(*id);
    }
}

fn doc(doc: &mut Option<Docstring>, f: &mut dyn FnMut(NodeId) -> NodeId) {
    if let Some(Docstring::Node(id)) = doc {
        *id = f(*id);
    }
}

impl NodeKind {
    /// Ordered direct structural children.
    ///
    /// The derivation is variant-specific but always follows the field
    /// order of the payload struct. Omitted optional children and holes
    /// in tuple components contribute nothing.
    pub fn children(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();

        match self {
            Self::SourceUnit(n) => ids.extend(&n.nodes),

            Self::PragmaDirective(_) | Self::StructuredDocumentation(_) => {}

            Self::ImportDirective(n) => {
                for alias in &n.symbol_aliases {
                    if let SymbolOrigin::Node(id) = alias.foreign {
                        ids.push(id);
                    }
                }
            }

            Self::InheritanceSpecifier(n) => {
                ids.push(n.base_name);
                ids.extend(n.arguments.iter().flatten());
            }

            Self::ModifierInvocation(n) => {
                ids.push(n.modifier_name);
                ids.extend(n.arguments.iter().flatten());
            }

            Self::OverrideSpecifier(n) => ids.extend(&n.overrides),
            Self::ParameterList(n) => ids.extend(&n.parameters),

            Self::UsingForDirective(n) => {
                push_opt(&mut ids, &n.library_name);
                ids.extend(&n.function_list);
                push_opt(&mut ids, &n.type_name);
            }

            Self::IdentifierPath(_) => {}

            Self::ContractDefinition(n) => {
                push_doc(&mut ids, &n.documentation);
                ids.extend(&n.base_contracts);
                ids.extend(&n.nodes);
            }

            Self::FunctionDefinition(n) => {
                push_doc(&mut ids, &n.documentation);
                push_opt(&mut ids, &n.override_specifier);
                ids.push(n.parameters);
                ids.push(n.return_parameters);
                ids.extend(&n.modifiers);
                push_opt(&mut ids, &n.body);
            }

            Self::ModifierDefinition(n) => {
                push_doc(&mut ids, &n.documentation);
                push_opt(&mut ids, &n.override_specifier);
                ids.push(n.parameters);
                push_opt(&mut ids, &n.body);
            }

            Self::EventDefinition(n) => {
                push_doc(&mut ids, &n.documentation);
                ids.push(n.parameters);
            }

            Self::ErrorDefinition(n) => {
                push_doc(&mut ids, &n.documentation);
                ids.push(n.parameters);
            }

            Self::StructDefinition(n) => {
                push_doc(&mut ids, &n.documentation);
                ids.extend(&n.members);
            }

            Self::EnumDefinition(n) => {
                push_doc(&mut ids, &n.documentation);
                ids.extend(&n.members);
            }

            Self::EnumValue(_) => {}

            Self::UserDefinedValueTypeDefinition(n) => ids.push(n.underlying_type),

            Self::VariableDeclaration(n) => {
                push_doc(&mut ids, &n.documentation);
                push_opt(&mut ids, &n.type_name);
                push_opt(&mut ids, &n.override_specifier);
                push_opt(&mut ids, &n.value);
            }

            Self::ElementaryTypeName(_) => {}

            Self::UserDefinedTypeName(n) => push_opt(&mut ids, &n.path_node),

            Self::ArrayTypeName(n) => {
                ids.push(n.base_type);
                push_opt(&mut ids, &n.length);
            }

            Self::Mapping(n) => {
                ids.push(n.key_type);
                ids.push(n.value_type);
            }

            Self::FunctionTypeName(n) => {
                ids.push(n.parameter_types);
                ids.push(n.return_parameter_types);
            }

            Self::Block(n) => ids.extend(&n.statements),
            Self::UncheckedBlock(n) => ids.extend(&n.statements),

            Self::IfStatement(n) => {
                ids.push(n.condition);
                ids.push(n.true_body);
                push_opt(&mut ids, &n.false_body);
            }

            Self::ForStatement(n) => {
                push_opt(&mut ids, &n.initialization_expression);
                push_opt(&mut ids, &n.condition);
                push_opt(&mut ids, &n.loop_expression);
                ids.push(n.body);
            }

            Self::WhileStatement(n) => {
                ids.push(n.condition);
                ids.push(n.body);
            }

            Self::DoWhileStatement(n) => {
                ids.push(n.condition);
                ids.push(n.body);
            }

            Self::Return(n) => push_opt(&mut ids, &n.expression),

            Self::Break(_) | Self::Continue(_) | Self::Throw(_) => {}

            Self::EmitStatement(n) => ids.push(n.event_call),
            Self::RevertStatement(n) => ids.push(n.error_call),
            Self::ExpressionStatement(n) => ids.push(n.expression),

            Self::VariableDeclarationStatement(n) => {
                ids.extend(&n.declarations);
                push_opt(&mut ids, &n.initial_value);
            }

            Self::TryStatement(n) => {
                ids.push(n.external_call);
                ids.extend(&n.clauses);
            }

            Self::TryCatchClause(n) => {
                push_opt(&mut ids, &n.parameters);
                ids.push(n.block);
            }

            Self::InlineAssembly(_) | Self::PlaceholderStatement(_) => {}

            Self::Literal(_) | Self::Identifier(_) => {}

            Self::MemberAccess(n) => ids.push(n.expression),

            Self::IndexAccess(n) => {
                ids.push(n.base_expression);
                push_opt(&mut ids, &n.index_expression);
            }

            Self::IndexRangeAccess(n) => {
                ids.push(n.base_expression);
                push_opt(&mut ids, &n.start_expression);
                push_opt(&mut ids, &n.end_expression);
            }

            Self::UnaryOperation(n) => ids.push(n.sub_expression),

            Self::BinaryOperation(n) => {
                ids.push(n.left_expression);
                ids.push(n.right_expression);
            }

            Self::Assignment(n) => {
                ids.push(n.left_hand_side);
                ids.push(n.right_hand_side);
            }

            Self::Conditional(n) => {
                ids.push(n.condition);
                ids.push(n.true_expression);
                ids.push(n.false_expression);
            }

            Self::FunctionCall(n) => {
                ids.push(n.expression);
                ids.extend(&n.arguments);
            }

            Self::FunctionCallOptions(n) => {
                ids.push(n.expression);
                ids.extend(&n.options);
            }

            Self::NewExpression(n) => ids.push(n.type_name),

            Self::TupleExpression(n) => ids.extend(n.components.iter().flatten()),

            Self::ElementaryTypeNameExpression(n) => {
                if let TypeNameRef::Node(id) = n.type_name {
                    ids.push(id);
                }
            }
        }

        ids
    }

    /// Every reference-typed attribute slot currently holding an id.
    ///
    /// Nullable-view slots (`referencedDeclaration` on identifiers and
    /// member accesses) are reported with `required: false`; everything
    /// else must resolve.
    pub fn references(&self) -> Vec<Reference> {
        fn slot(attribute: &'static str, target: NodeId, required: bool) -> Reference {
            Reference {
                attribute,
                target,
                required,
            }
        }

        let mut refs = Vec::new();

        match self {
            Self::SourceUnit(n) => {
                for id in n.exported_symbols.values() {
                    refs.push(slot("exportedSymbols", *id, true));
                }
            }

            Self::ImportDirective(n) => {
                if let Some(id) = n.scope {
                    refs.push(slot("scope", id, true));
                }
                if let Some(id) = n.source_unit {
                    refs.push(slot("sourceUnit", id, true));
                }
            }

            Self::IdentifierPath(n) => {
                if let Some(id) = n.referenced_declaration {
                    refs.push(slot("referencedDeclaration", id, false));
                }
            }

            Self::ContractDefinition(n) => {
                if let Some(id) = n.scope {
                    refs.push(slot("scope", id, true));
                }
                for id in &n.linearized_base_contracts {
                    refs.push(slot("linearizedBaseContracts", *id, true));
                }
                for id in &n.used_errors {
                    refs.push(slot("usedErrors", *id, true));
                }
            }

            Self::FunctionDefinition(n) => {
                if let Some(id) = n.scope {
                    refs.push(slot("scope", id, true));
                }
            }

            Self::StructDefinition(n) => {
                if let Some(id) = n.scope {
                    refs.push(slot("scope", id, true));
                }
            }

            Self::VariableDeclaration(n) => {
                if let Some(id) = n.scope {
                    refs.push(slot("scope", id, true));
                }
            }

            Self::UserDefinedTypeName(n) => {
                if let Some(id) = n.referenced_declaration {
                    refs.push(slot("referencedDeclaration", id, true));
                }
            }

            Self::Return(n) => {
                if let Some(id) = n.function_return_parameters {
                    refs.push(slot("functionReturnParameters", id, true));
                }
            }

            Self::VariableDeclarationStatement(n) => {
                for id in n.assignments.iter().flatten() {
                    refs.push(slot("assignments", *id, true));
                }
            }

            Self::Identifier(n) => {
                if let Some(id) = n.referenced_declaration {
                    refs.push(slot("referencedDeclaration", id, false));
                }
            }

            Self::MemberAccess(n) => {
                if let Some(id) = n.referenced_declaration {
                    refs.push(slot("referencedDeclaration", id, false));
                }
            }

            _ => {}
        }

        refs
    }

    /// Applies `f` to every [`NodeId`] stored in the payload, children and
    /// references alike. Deep copy is built on this; any id not covered
    /// here would silently keep pointing into the original subtree.
    pub fn map_ids(&mut self, f: &mut dyn FnMut(NodeId) -> NodeId) {
        fn each(ids: &mut [NodeId], f: &mut dyn FnMut(NodeId) -> NodeId) {
            for id in ids {
                *id = f(*id);
            }
        }

        fn opt(id: &mut Option<NodeId>, f: &mut dyn FnMut(NodeId) -> NodeId) {
            if let Some(id) = id {
                *id = f(*id);
            }
        }

        match self {
            Self::SourceUnit(n) => {
                for id in n.exported_symbols.values_mut() {
                    *id = f(*id);
                }
                each(&mut n.nodes, f);
            }

            Self::PragmaDirective(_) | Self::StructuredDocumentation(_) => {}

            Self::ImportDirective(n) => {
                for alias in &mut n.symbol_aliases {
                    if let SymbolOrigin::Node(id) = &mut alias.foreign {
                        *id = f(*id);
                    }
                }
                opt(&mut n.scope, f);
                opt(&mut n.source_unit, f);
            }

            Self::InheritanceSpecifier(n) => {
                n.base_name = f(n.base_name);
                if let Some(args) = &mut n.arguments {
                    each(args, f);
                }
            }

            Self::ModifierInvocation(n) => {
                n.modifier_name = f(n.modifier_name);
                if let Some(args) = &mut n.arguments {
                    each(args, f);
                }
            }

            Self::OverrideSpecifier(n) => each(&mut n.overrides, f),
            Self::ParameterList(n) => each(&mut n.parameters, f),

            Self::UsingForDirective(n) => {
                opt(&mut n.library_name, f);
                each(&mut n.function_list, f);
                opt(&mut n.type_name, f);
            }

            Self::IdentifierPath(n) => opt(&mut n.referenced_declaration, f),

            Self::ContractDefinition(n) => {
                each(&mut n.linearized_base_contracts, f);
                each(&mut n.used_errors, f);
                opt(&mut n.scope, f);
                doc(&mut n.documentation, f);
                each(&mut n.base_contracts, f);
                each(&mut n.nodes, f);
            }

            Self::FunctionDefinition(n) => {
                opt(&mut n.scope, f);
                doc(&mut n.documentation, f);
                opt(&mut n.override_specifier, f);
                n.parameters = f(n.parameters);
                n.return_parameters = f(n.return_parameters);
                each(&mut n.modifiers, f);
                opt(&mut n.body, f);
            }

            Self::ModifierDefinition(n) => {
                doc(&mut n.documentation, f);
                opt(&mut n.override_specifier, f);
                n.parameters = f(n.parameters);
                opt(&mut n.body, f);
            }

            Self::EventDefinition(n) => {
                doc(&mut n.documentation, f);
                n.parameters = f(n.parameters);
            }

            Self::ErrorDefinition(n) => {
                doc(&mut n.documentation, f);
                n.parameters = f(n.parameters);
            }

            Self::StructDefinition(n) => {
                opt(&mut n.scope, f);
                doc(&mut n.documentation, f);
                each(&mut n.members, f);
            }

            Self::EnumDefinition(n) => {
                doc(&mut n.documentation, f);
                each(&mut n.members, f);
            }

            Self::EnumValue(_) => {}

            Self::UserDefinedValueTypeDefinition(n) => {
                n.underlying_type = f(n.underlying_type);
            }

            Self::VariableDeclaration(n) => {
                opt(&mut n.scope, f);
                doc(&mut n.documentation, f);
                opt(&mut n.type_name, f);
                opt(&mut n.override_specifier, f);
                opt(&mut n.value, f);
            }

            Self::ElementaryTypeName(_) => {}

            Self::UserDefinedTypeName(n) => {
                opt(&mut n.referenced_declaration, f);
                opt(&mut n.path_node, f);
            }

            Self::ArrayTypeName(n) => {
                n.base_type = f(n.base_type);
                opt(&mut n.length, f);
            }

            Self::Mapping(n) => {
                n.key_type = f(n.key_type);
                n.value_type = f(n.value_type);
            }

            Self::FunctionTypeName(n) => {
                n.parameter_types = f(n.parameter_types);
                n.return_parameter_types = f(n.return_parameter_types);
            }

            Self::Block(n) => each(&mut n.statements, f),
            Self::UncheckedBlock(n) => each(&mut n.statements, f),

            Self::IfStatement(n) => {
                n.condition = f(n.condition);
                n.true_body = f(n.true_body);
                opt(&mut n.false_body, f);
            }

            Self::ForStatement(n) => {
                opt(&mut n.initialization_expression, f);
                opt(&mut n.condition, f);
                opt(&mut n.loop_expression, f);
                n.body = f(n.body);
            }

            Self::WhileStatement(n) => {
                n.condition = f(n.condition);
                n.body = f(n.body);
            }

            Self::DoWhileStatement(n) => {
                n.condition = f(n.condition);
                n.body = f(n.body);
            }

            Self::Return(n) => {
                opt(&mut n.function_return_parameters, f);
                opt(&mut n.expression, f);
            }

            Self::Break(_) | Self::Continue(_) | Self::Throw(_) => {}

            Self::EmitStatement(n) => n.event_call = f(n.event_call),
            Self::RevertStatement(n) => n.error_call = f(n.error_call),
            Self::ExpressionStatement(n) => n.expression = f(n.expression),

            Self::VariableDeclarationStatement(n) => {
                for slot in &mut n.assignments {
                    if let Some(id) = slot {
                        *id = f(*id);
                    }
                }
                each(&mut n.declarations, f);
                opt(&mut n.initial_value, f);
            }

            Self::TryStatement(n) => {
                n.external_call = f(n.external_call);
                each(&mut n.clauses, f);
            }

            Self::TryCatchClause(n) => {
                opt(&mut n.parameters, f);
                n.block = f(n.block);
            }

            Self::InlineAssembly(_) | Self::PlaceholderStatement(_) => {}

            Self::Literal(_) => {}

            Self::Identifier(n) => opt(&mut n.referenced_declaration, f),

            Self::MemberAccess(n) => {
                n.expression = f(n.expression);
                opt(&mut n.referenced_declaration, f);
            }

            Self::IndexAccess(n) => {
                n.base_expression = f(n.base_expression);
                opt(&mut n.index_expression, f);
            }

            Self::IndexRangeAccess(n) => {
                n.base_expression = f(n.base_expression);
                opt(&mut n.start_expression, f);
                opt(&mut n.end_expression, f);
            }

            Self::UnaryOperation(n) => n.sub_expression = f(n.sub_expression),

            Self::BinaryOperation(n) => {
                n.left_expression = f(n.left_expression);
                n.right_expression = f(n.right_expression);
            }

            Self::Assignment(n) => {
                n.left_hand_side = f(n.left_hand_side);
                n.right_hand_side = f(n.right_hand_side);
            }

            Self::Conditional(n) => {
                n.condition = f(n.condition);
                n.true_expression = f(n.true_expression);
                n.false_expression = f(n.false_expression);
            }

            Self::FunctionCall(n) => {
                n.expression = f(n.expression);
                each(&mut n.arguments, f);
            }

            Self::FunctionCallOptions(n) => {
                n.expression = f(n.expression);
                each(&mut n.options, f);
            }

            Self::NewExpression(n) => n.type_name = f(n.type_name),

            Self::TupleExpression(n) => {
                for slot in &mut n.components {
                    if let Some(id) = slot {
                        *id = f(*id);
                    }
                }
            }

            Self::ElementaryTypeNameExpression(n) => {
                if let TypeNameRef::Node(id) = &mut n.type_name {
                    *id = f(*id);
                }
            }
        }
    }

    /// The private ordered child list of a container variant, or `None`
    /// for nodes whose child set is computed from typed attributes.
    pub fn container_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Self::SourceUnit(n) => Some(&mut n.nodes),
            Self::ContractDefinition(n) => Some(&mut n.nodes),
            Self::ParameterList(n) => Some(&mut n.parameters),
            Self::OverrideSpecifier(n) => Some(&mut n.overrides),
            Self::StructDefinition(n) => Some(&mut n.members),
            Self::EnumDefinition(n) => Some(&mut n.members),
            Self::Block(n) => Some(&mut n.statements),
            Self::UncheckedBlock(n) => Some(&mut n.statements),
            Self::TryStatement(n) => Some(&mut n.clauses),
            _ => None,
        }
    }
}
