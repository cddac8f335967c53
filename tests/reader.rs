#![recursion_limit = "512"]

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{json, Value};
use solast::ast::{self, NodeKind};
use solast::read::{self, ReadOptions};
use solast::{AstContext, AstError, NodeId};

/// `contract C { function f() public { uint c = 1; } }` as solc 0.4.13
/// emits it with `--ast-compact-json`.
fn single_declaration_output() -> Value {
    json!({
        "sources": {
            "main.sol": {
                "ast": {
                    "id": 10,
                    "src": "0:52:0",
                    "nodeType": "SourceUnit",
                    "absolutePath": "main.sol",
                    "exportedSymbols": { "C": [9] },
                    "nodes": [
                        {
                            "id": 9,
                            "src": "0:51:0",
                            "nodeType": "ContractDefinition",
                            "name": "C",
                            "contractKind": "contract",
                            "fullyImplemented": true,
                            "linearizedBaseContracts": [9],
                            "scope": 10,
                            "baseContracts": [],
                            "nodes": [
                                {
                                    "id": 8,
                                    "src": "13:36:0",
                                    "nodeType": "FunctionDefinition",
                                    "name": "f",
                                    "isConstructor": false,
                                    "constant": false,
                                    "payable": false,
                                    "visibility": "public",
                                    "implemented": true,
                                    "scope": 9,
                                    "modifiers": [],
                                    "parameters": {
                                        "id": 1,
                                        "src": "23:2:0",
                                        "nodeType": "ParameterList",
                                        "parameters": []
                                    },
                                    "returnParameters": {
                                        "id": 2,
                                        "src": "33:0:0",
                                        "nodeType": "ParameterList",
                                        "parameters": []
                                    },
                                    "body": {
                                        "id": 7,
                                        "src": "33:16:0",
                                        "nodeType": "Block",
                                        "statements": [
                                            {
                                                "id": 6,
                                                "src": "35:10:0",
                                                "nodeType": "VariableDeclarationStatement",
                                                "assignments": [4],
                                                "declarations": [
                                                    {
                                                        "id": 4,
                                                        "src": "35:6:0",
                                                        "nodeType": "VariableDeclaration",
                                                        "name": "c",
                                                        "constant": false,
                                                        "stateVariable": false,
                                                        "storageLocation": "default",
                                                        "visibility": "internal",
                                                        "scope": 8,
                                                        "typeDescriptions": {
                                                            "typeIdentifier": "t_uint256",
                                                            "typeString": "uint256"
                                                        },
                                                        "typeName": {
                                                            "id": 3,
                                                            "src": "35:4:0",
                                                            "nodeType": "ElementaryTypeName",
                                                            "name": "uint",
                                                            "typeDescriptions": {
                                                                "typeString": "uint256"
                                                            }
                                                        }
                                                    }
                                                ],
                                                "initialValue": {
                                                    "id": 5,
                                                    "src": "44:1:0",
                                                    "nodeType": "Literal",
                                                    "token": "number",
                                                    "value": "1",
                                                    "hexValue": "31",
                                                    "typeDescriptions": {
                                                        "typeString": "int_const 1"
                                                    }
                                                }
                                            }
                                        ]
                                    }
                                }
                            ]
                        }
                    ]
                }
            }
        }
    })
}

#[test]
fn reads_a_single_variable_declaration_statement() {
    let mut ctx = AstContext::new();
    let units = ctx.read_compiler_output(&single_declaration_output()).unwrap();

    assert_eq!(units, vec![NodeId::new(10)]);

    let statements = ctx
        .nodes_of_kind(units[0], "VariableDeclarationStatement")
        .unwrap();
    assert_eq!(statements.len(), 1);

    let statement = ctx.require(statements[0]).unwrap();
    assert_eq!(statement.id, NodeId::new(6));
    assert_eq!(statement.parent, Some(NodeId::new(7)));

    let NodeKind::VariableDeclarationStatement(vds) = &statement.kind else {
        panic!("expected a variable declaration statement");
    };
    assert_eq!(vds.assignments, vec![Some(NodeId::new(4))]);

    assert_eq!(
        statement.children(),
        vec![NodeId::new(4), NodeId::new(5)],
        "children are the declaration followed by the initial value"
    );
    assert_eq!(ctx.require(NodeId::new(4)).unwrap().tag(), "VariableDeclaration");
    assert_eq!(ctx.require(NodeId::new(5)).unwrap().tag(), "Literal");

    // the retained raw fragment survives
    assert!(statement.raw.is_some());
}

#[test]
fn printed_form_of_a_read_is_stable() {
    let data = single_declaration_output();

    let mut first_ctx = AstContext::new();
    let first = first_ctx.read_compiler_output(&data).unwrap()[0];

    let mut second_ctx = AstContext::new();
    let second = second_ctx.read_compiler_output(&data).unwrap()[0];

    let first_print = solast::dump::print(&first_ctx, first, usize::MAX).unwrap();
    let second_print = solast::dump::print(&second_ctx, second, usize::MAX).unwrap();

    assert_eq!(first_print, second_print);

    insta::assert_snapshot!(first_print.trim_end(), @r#"
SourceUnit path="main.sol"
  ContractDefinition name="C" kind=Contract
    FunctionDefinition name="f" kind=Function visibility=Public
      ParameterList
      ParameterList
      Block
        VariableDeclarationStatement
          VariableDeclaration name="c" type="uint256"
            ElementaryTypeName "uint"
          Literal kind=Number value="1"
"#);
}

/// The three declaration statements of
/// `function multiple() { uint x; (uint y, , uint z) = (1,2,3);
/// function() external f = g; }` under 0.4.13.
fn tuple_declarations_output() -> Value {
    json!({
        "sources": {
            "multi.sol": {
                "ast": {
                    "id": 30,
                    "src": "0:130:0",
                    "nodeType": "SourceUnit",
                    "absolutePath": "multi.sol",
                    "exportedSymbols": { "M": [29] },
                    "nodes": [
                        {
                            "id": 29,
                            "src": "0:129:0",
                            "nodeType": "ContractDefinition",
                            "name": "M",
                            "contractKind": "contract",
                            "fullyImplemented": true,
                            "linearizedBaseContracts": [29],
                            "scope": 30,
                            "baseContracts": [],
                            "nodes": [
                                {
                                    "id": 28,
                                    "src": "13:114:0",
                                    "nodeType": "FunctionDefinition",
                                    "name": "multiple",
                                    "isConstructor": false,
                                    "constant": false,
                                    "payable": false,
                                    "visibility": "public",
                                    "implemented": true,
                                    "scope": 29,
                                    "modifiers": [],
                                    "parameters": {
                                        "id": 11,
                                        "src": "30:2:0",
                                        "nodeType": "ParameterList",
                                        "parameters": []
                                    },
                                    "returnParameters": {
                                        "id": 12,
                                        "src": "40:0:0",
                                        "nodeType": "ParameterList",
                                        "parameters": []
                                    },
                                    "body": {
                                        "id": 27,
                                        "src": "40:87:0",
                                        "nodeType": "Block",
                                        "statements": [
                                            {
                                                "id": 15,
                                                "src": "42:6:0",
                                                "nodeType": "VariableDeclarationStatement",
                                                "assignments": [14],
                                                "declarations": [
                                                    {
                                                        "id": 14,
                                                        "src": "42:6:0",
                                                        "nodeType": "VariableDeclaration",
                                                        "name": "x",
                                                        "constant": false,
                                                        "stateVariable": false,
                                                        "storageLocation": "default",
                                                        "visibility": "internal",
                                                        "scope": 28,
                                                        "typeDescriptions": { "typeString": "uint256" },
                                                        "typeName": {
                                                            "id": 13,
                                                            "src": "42:4:0",
                                                            "nodeType": "ElementaryTypeName",
                                                            "name": "uint",
                                                            "typeDescriptions": { "typeString": "uint256" }
                                                        }
                                                    }
                                                ]
                                            },
                                            {
                                                "id": 25,
                                                "src": "50:26:0",
                                                "nodeType": "VariableDeclarationStatement",
                                                "assignments": [17, null, 19],
                                                "declarations": [
                                                    {
                                                        "id": 17,
                                                        "src": "51:6:0",
                                                        "nodeType": "VariableDeclaration",
                                                        "name": "y",
                                                        "constant": false,
                                                        "stateVariable": false,
                                                        "storageLocation": "default",
                                                        "visibility": "internal",
                                                        "scope": 28,
                                                        "typeDescriptions": { "typeString": "uint256" },
                                                        "typeName": {
                                                            "id": 16,
                                                            "src": "51:4:0",
                                                            "nodeType": "ElementaryTypeName",
                                                            "name": "uint",
                                                            "typeDescriptions": { "typeString": "uint256" }
                                                        }
                                                    },
                                                    null,
                                                    {
                                                        "id": 19,
                                                        "src": "61:6:0",
                                                        "nodeType": "VariableDeclaration",
                                                        "name": "z",
                                                        "constant": false,
                                                        "stateVariable": false,
                                                        "storageLocation": "default",
                                                        "visibility": "internal",
                                                        "scope": 28,
                                                        "typeDescriptions": { "typeString": "uint256" },
                                                        "typeName": {
                                                            "id": 18,
                                                            "src": "61:4:0",
                                                            "nodeType": "ElementaryTypeName",
                                                            "name": "uint",
                                                            "typeDescriptions": { "typeString": "uint256" }
                                                        }
                                                    }
                                                ],
                                                "initialValue": {
                                                    "id": 24,
                                                    "src": "71:7:0",
                                                    "nodeType": "TupleExpression",
                                                    "isInlineArray": false,
                                                    "typeDescriptions": { "typeString": "tuple(int_const 1,int_const 2,int_const 3)" },
                                                    "components": [
                                                        {
                                                            "id": 20,
                                                            "src": "72:1:0",
                                                            "nodeType": "Literal",
                                                            "token": "number",
                                                            "value": "1",
                                                            "hexValue": "31",
                                                            "typeDescriptions": { "typeString": "int_const 1" }
                                                        },
                                                        {
                                                            "id": 21,
                                                            "src": "74:1:0",
                                                            "nodeType": "Literal",
                                                            "token": "number",
                                                            "value": "2",
                                                            "hexValue": "32",
                                                            "typeDescriptions": { "typeString": "int_const 2" }
                                                        },
                                                        {
                                                            "id": 23,
                                                            "src": "76:1:0",
                                                            "nodeType": "Literal",
                                                            "token": "number",
                                                            "value": "3",
                                                            "hexValue": "33",
                                                            "typeDescriptions": { "typeString": "int_const 3" }
                                                        }
                                                    ]
                                                }
                                            },
                                            {
                                                "id": 36,
                                                "src": "84:30:0",
                                                "nodeType": "VariableDeclarationStatement",
                                                "assignments": [34],
                                                "declarations": [
                                                    {
                                                        "id": 34,
                                                        "src": "84:23:0",
                                                        "nodeType": "VariableDeclaration",
                                                        "name": "f",
                                                        "constant": false,
                                                        "stateVariable": false,
                                                        "storageLocation": "default",
                                                        "visibility": "internal",
                                                        "scope": 28,
                                                        "typeDescriptions": { "typeString": "function () external" },
                                                        "typeName": {
                                                            "id": 33,
                                                            "src": "84:19:0",
                                                            "nodeType": "FunctionTypeName",
                                                            "visibility": "external",
                                                            "constant": false,
                                                            "payable": false,
                                                            "typeDescriptions": { "typeString": "function () external" },
                                                            "parameterTypes": {
                                                                "id": 31,
                                                                "src": "92:2:0",
                                                                "nodeType": "ParameterList",
                                                                "parameters": []
                                                            },
                                                            "returnParameterTypes": {
                                                                "id": 32,
                                                                "src": "103:0:0",
                                                                "nodeType": "ParameterList",
                                                                "parameters": []
                                                            }
                                                        }
                                                    }
                                                ],
                                                "initialValue": {
                                                    "id": 35,
                                                    "src": "110:1:0",
                                                    "nodeType": "Identifier",
                                                    "name": "g",
                                                    "referencedDeclaration": 999,
                                                    "typeDescriptions": { "typeString": "function () external" }
                                                }
                                            }
                                        ]
                                    }
                                }
                            ]
                        }
                    ]
                }
            }
        }
    })
}

#[test]
fn tuple_declarations_keep_their_holes() {
    let mut ctx = AstContext::new();
    let unit = ctx.read_compiler_output(&tuple_declarations_output()).unwrap()[0];

    let statements = ctx
        .nodes_of_kind(unit, "VariableDeclarationStatement")
        .unwrap();
    assert_eq!(
        statements,
        vec![NodeId::new(15), NodeId::new(25), NodeId::new(36)]
    );

    // `uint x;` has no initial value, so the child list is one shorter
    let first = ctx.require(statements[0]).unwrap();
    let NodeKind::VariableDeclarationStatement(vds) = &first.kind else {
        panic!("expected a variable declaration statement");
    };
    assert_eq!(vds.initial_value, None);
    assert_eq!(first.children(), vec![NodeId::new(14)]);

    // `(uint y, , uint z) = (1,2,3);` keeps the omission as an explicit null
    let second = ctx.require(statements[1]).unwrap();
    let NodeKind::VariableDeclarationStatement(vds) = &second.kind else {
        panic!("expected a variable declaration statement");
    };
    assert_eq!(
        vds.assignments,
        vec![Some(NodeId::new(17)), None, Some(NodeId::new(19))]
    );
    assert_eq!(
        second.children(),
        vec![NodeId::new(17), NodeId::new(19), NodeId::new(24)],
        "two declarations plus the tuple"
    );

    // `function() external f = g;` has one declaration and the initializer
    let third = ctx.require(statements[2]).unwrap();
    assert_eq!(third.children(), vec![NodeId::new(34), NodeId::new(35)]);

    // `g` resolves to nothing in this build; the view is nullable, so the
    // dangling id is tolerated
    let NodeKind::Identifier(g) = &ctx.require(NodeId::new(35)).unwrap().kind else {
        panic!("expected an identifier");
    };
    assert_eq!(g.referenced_declaration, Some(NodeId::new(999)));
    assert!(ctx.lookup(NodeId::new(999)).is_none());
}

/// `while (a > 0) a--;` and `while (a > 0) { a--; b++; }` in one function.
fn while_statements_output() -> Value {
    let ident = |id: u32, name: &str, target: u32| {
        json!({
            "id": id,
            "src": "0:1:0",
            "nodeType": "Identifier",
            "name": name,
            "referencedDeclaration": target,
            "typeDescriptions": { "typeString": "uint256" }
        })
    };

    let decrement = |unary: u32, operand: Value| {
        json!({
            "id": unary,
            "src": "0:3:0",
            "nodeType": "UnaryOperation",
            "operator": "--",
            "prefix": false,
            "subExpression": operand,
            "typeDescriptions": { "typeString": "uint256" }
        })
    };

    let condition = |binary: u32, left: Value, literal: u32| {
        json!({
            "id": binary,
            "src": "0:5:0",
            "nodeType": "BinaryOperation",
            "operator": ">",
            "leftExpression": left,
            "rightExpression": {
                "id": literal,
                "src": "0:1:0",
                "nodeType": "Literal",
                "token": "number",
                "value": "0",
                "hexValue": "30",
                "typeDescriptions": { "typeString": "int_const 0" }
            },
            "typeDescriptions": { "typeString": "bool" }
        })
    };

    let state_variable = |id: u32, type_name: u32, name: &str| {
        json!({
            "id": id,
            "src": "13:6:0",
            "nodeType": "VariableDeclaration",
            "name": name,
            "constant": false,
            "stateVariable": true,
            "storageLocation": "default",
            "visibility": "internal",
            "scope": 90,
            "typeDescriptions": { "typeString": "uint256" },
            "typeName": {
                "id": type_name,
                "src": "13:4:0",
                "nodeType": "ElementaryTypeName",
                "name": "uint",
                "typeDescriptions": { "typeString": "uint256" }
            }
        })
    };

    json!({
        "sources": {
            "loops.sol": {
                "ast": {
                    "id": 91,
                    "src": "0:150:0",
                    "nodeType": "SourceUnit",
                    "absolutePath": "loops.sol",
                    "exportedSymbols": { "W": [90] },
                    "nodes": [
                        {
                            "id": 90,
                            "src": "0:149:0",
                            "nodeType": "ContractDefinition",
                            "name": "W",
                            "contractKind": "contract",
                            "fullyImplemented": true,
                            "linearizedBaseContracts": [90],
                            "scope": 91,
                            "baseContracts": [],
                            "nodes": [
                                state_variable(40, 39, "a"),
                                state_variable(42, 41, "b"),
                                {
                                    "id": 89,
                                    "src": "30:118:0",
                                    "nodeType": "FunctionDefinition",
                                    "name": "w",
                                    "isConstructor": false,
                                    "constant": false,
                                    "payable": false,
                                    "visibility": "public",
                                    "implemented": true,
                                    "scope": 90,
                                    "modifiers": [],
                                    "parameters": {
                                        "id": 72,
                                        "src": "40:2:0",
                                        "nodeType": "ParameterList",
                                        "parameters": []
                                    },
                                    "returnParameters": {
                                        "id": 73,
                                        "src": "50:0:0",
                                        "nodeType": "ParameterList",
                                        "parameters": []
                                    },
                                    "body": {
                                        "id": 88,
                                        "src": "50:98:0",
                                        "nodeType": "Block",
                                        "statements": [
                                            {
                                                "id": 51,
                                                "src": "52:18:0",
                                                "nodeType": "WhileStatement",
                                                "condition": condition(47, ident(45, "a", 40), 46),
                                                "body": {
                                                    "id": 50,
                                                    "src": "66:4:0",
                                                    "nodeType": "ExpressionStatement",
                                                    "expression": decrement(49, ident(48, "a", 40))
                                                }
                                            },
                                            {
                                                "id": 71,
                                                "src": "72:40:0",
                                                "nodeType": "WhileStatement",
                                                "condition": condition(54, ident(52, "a", 40), 53),
                                                "body": {
                                                    "id": 70,
                                                    "src": "86:26:0",
                                                    "nodeType": "Block",
                                                    "statements": [
                                                        {
                                                            "id": 57,
                                                            "src": "88:4:0",
                                                            "nodeType": "ExpressionStatement",
                                                            "expression": decrement(56, ident(55, "a", 40))
                                                        },
                                                        {
                                                            "id": 61,
                                                            "src": "94:4:0",
                                                            "nodeType": "ExpressionStatement",
                                                            "expression": {
                                                                "id": 60,
                                                                "src": "94:3:0",
                                                                "nodeType": "UnaryOperation",
                                                                "operator": "++",
                                                                "prefix": false,
                                                                "subExpression": ident(58, "b", 42),
                                                                "typeDescriptions": { "typeString": "uint256" }
                                                            }
                                                        }
                                                    ]
                                                }
                                            }
                                        ]
                                    }
                                }
                            ]
                        }
                    ]
                }
            }
        }
    })
}

#[test]
fn while_bodies_keep_their_statement_shape() {
    let mut ctx = AstContext::new();
    let unit = ctx.read_compiler_output(&while_statements_output()).unwrap()[0];

    let loops = ctx.nodes_of_kind(unit, "WhileStatement").unwrap();
    assert_eq!(loops, vec![NodeId::new(51), NodeId::new(71)]);

    let body_of = |id: NodeId| {
        let NodeKind::WhileStatement(w) = &ctx.require(id).unwrap().kind else {
            panic!("expected a while statement");
        };
        w.body
    };

    assert_eq!(ctx.require(body_of(loops[0])).unwrap().tag(), "ExpressionStatement");
    assert_eq!(ctx.require(body_of(loops[1])).unwrap().tag(), "Block");
}

/// A legacy-schema unit: `contract L { function g() { uint h = 1; throw; } }`.
fn legacy_output() -> Value {
    json!({
        "sources": {
            "old.sol": {
                "AST": {
                    "id": 7,
                    "name": "SourceUnit",
                    "src": "0:60:0",
                    "attributes": { "absolutePath": "old.sol", "exportedSymbols": { "L": [6] } },
                    "children": [
                        {
                            "id": 6,
                            "name": "ContractDefinition",
                            "src": "0:59:0",
                            "attributes": {
                                "name": "L",
                                "fullyImplemented": true,
                                "linearizedBaseContracts": [6],
                                "scope": 7
                            },
                            "children": [
                                {
                                    "id": 5,
                                    "name": "FunctionDefinition",
                                    "src": "13:44:0",
                                    "attributes": {
                                        "name": "g",
                                        "public": true,
                                        "constant": false,
                                        "isConstructor": false
                                    },
                                    "children": [
                                        { "id": 1, "name": "ParameterList", "src": "23:2:0", "children": [] },
                                        { "id": 2, "name": "ParameterList", "src": "28:0:0", "children": [] },
                                        {
                                            "id": 4,
                                            "name": "Block",
                                            "src": "28:29:0",
                                            "children": [
                                                {
                                                    "id": 10,
                                                    "name": "VariableDeclarationStatement",
                                                    "src": "30:11:0",
                                                    "attributes": { "assignments": [9] },
                                                    "children": [
                                                        {
                                                            "id": 9,
                                                            "name": "VariableDeclaration",
                                                            "src": "30:6:0",
                                                            "attributes": {
                                                                "name": "h",
                                                                "type": "uint256",
                                                                "scope": 5
                                                            },
                                                            "children": [
                                                                {
                                                                    "id": 8,
                                                                    "name": "ElementaryTypeName",
                                                                    "src": "30:4:0",
                                                                    "attributes": { "name": "uint", "type": "uint256" }
                                                                }
                                                            ]
                                                        },
                                                        {
                                                            "id": 11,
                                                            "name": "Literal",
                                                            "src": "39:1:0",
                                                            "attributes": {
                                                                "token": "number",
                                                                "value": "1",
                                                                "hexvalue": "31",
                                                                "type": "int_const 1"
                                                            }
                                                        }
                                                    ]
                                                },
                                                { "id": 3, "name": "Throw", "src": "43:6:0" }
                                            ]
                                        }
                                    ]
                                }
                            ]
                        }
                    ]
                }
            }
        }
    })
}

#[test]
fn reads_the_legacy_schema() {
    let mut ctx = AstContext::new();
    let unit = ctx.read_compiler_output(&legacy_output()).unwrap()[0];

    let unit_node = ctx.require(unit).unwrap();
    let NodeKind::SourceUnit(su) = &unit_node.kind else {
        panic!("expected a source unit");
    };
    assert_eq!(su.absolute_path, "old.sol");
    assert_eq!(su.exported_symbols.get("L"), Some(&NodeId::new(6)));

    let function = ctx.require(NodeId::new(5)).unwrap();
    let NodeKind::FunctionDefinition(f) = &function.kind else {
        panic!("expected a function definition");
    };
    assert_eq!(f.kind, ast::FunctionKind::Function);
    assert_eq!(f.visibility, ast::Visibility::Public);
    assert_eq!(f.parameters, NodeId::new(1));
    assert_eq!(f.return_parameters, NodeId::new(2));
    assert_eq!(f.body, Some(NodeId::new(4)));

    let NodeKind::VariableDeclarationStatement(vds) = &ctx.require(NodeId::new(10)).unwrap().kind
    else {
        panic!("expected a variable declaration statement");
    };
    assert_eq!(vds.assignments, vec![Some(NodeId::new(9))]);
    assert_eq!(vds.initial_value, Some(NodeId::new(11)));

    insta::assert_snapshot!(
        solast::dump::print(&ctx, unit, usize::MAX).unwrap().trim_end(),
        @r#"
SourceUnit path="old.sol"
  ContractDefinition name="L" kind=Contract
    FunctionDefinition name="g" kind=Function visibility=Public
      ParameterList
      ParameterList
      Block
        VariableDeclarationStatement
          VariableDeclaration name="h" type="uint256"
            ElementaryTypeName "uint"
          Literal kind=Number value="1"
        Throw
"#
    );
}

#[test]
fn mixed_schemas_across_sources_are_allowed() {
    let data = json!({
        "sources": {
            "new.sol": {
                "ast": {
                    "id": 2,
                    "src": "0:24:0",
                    "nodeType": "SourceUnit",
                    "absolutePath": "new.sol",
                    "nodes": [
                        {
                            "id": 1,
                            "src": "0:23:0",
                            "nodeType": "PragmaDirective",
                            "literals": ["solidity", "^", "0.4.13"]
                        }
                    ]
                }
            },
            "old.sol": {
                "legacyAST": {
                    "id": 12,
                    "name": "SourceUnit",
                    "src": "0:24:1",
                    "children": [
                        {
                            "id": 11,
                            "name": "PragmaDirective",
                            "src": "0:23:1",
                            "attributes": { "literals": ["solidity", "^", "0.4.11"] }
                        }
                    ]
                }
            }
        }
    });

    let mut ctx = AstContext::new();
    let units = ctx.read_compiler_output(&data).unwrap();

    assert_eq!(units, vec![NodeId::new(2), NodeId::new(12)]);

    for unit in units {
        assert_eq!(ctx.require(unit).unwrap().tag(), "SourceUnit");
        assert_eq!(ctx.children_of(unit).unwrap().len(), 1);
    }
}

#[test]
fn sections_with_raw_source_only_are_skipped() {
    let data = json!({
        "sources": {
            "pending.sol": { "source": "contract P {}" }
        }
    });

    let mut ctx = AstContext::new();
    let units = ctx.read_compiler_output(&data).unwrap();

    assert!(units.is_empty());
    assert!(ctx.is_empty());
}

#[test]
fn unknown_node_kinds_abort_the_read() {
    let data = json!({
        "sources": {
            "a.sol": {
                "ast": { "id": 1, "src": "4:9:0", "nodeType": "FancyNode" }
            }
        }
    });

    let mut ctx = AstContext::new();
    let err = ctx.read_compiler_output(&data).unwrap_err();

    match err {
        AstError::UnknownNodeKind { tag, src } => {
            assert_eq!(tag, "FancyNode");
            assert_eq!(src.to_string(), "4:9:0");
        }
        other => panic!("expected an unknown-node-kind error, got {other}"),
    }
}

#[test]
fn fatal_compiler_errors_surface_before_anything_is_built() {
    let data = json!({
        "errors": [
            { "severity": "warning", "message": "unused variable" },
            { "severity": "error", "formattedMessage": "a.sol:1: expected `;`" }
        ],
        "sources": {}
    });

    let mut ctx = AstContext::new();
    let err = ctx.read_compiler_output(&data).unwrap_err();

    match err {
        AstError::CompileErrorsPresent { messages } => {
            assert_eq!(messages, vec!["a.sol:1: expected `;`".to_owned()]);
        }
        other => panic!("expected compile errors, got {other}"),
    }
    assert!(ctx.is_empty());
}

#[test]
fn legacy_warning_strings_are_tolerated() {
    let data = json!({
        "errors": ["a.sol:3: Warning: unused local variable"],
        "sources": {}
    });

    let mut ctx = AstContext::new();
    assert!(ctx.read_compiler_output(&data).unwrap().is_empty());

    let fatal = json!({
        "errors": ["a.sol:3: Error: expected `;`"],
        "sources": {}
    });

    assert!(matches!(
        ctx.read_compiler_output(&fatal),
        Err(AstError::CompileErrorsPresent { .. })
    ));
}

fn experimental_node(
    _reader: &mut read::ModernReader<'_>,
    _obj: &read::JsonObject,
    _src: solast::SourceLocation,
) -> solast::Result<NodeKind> {
    Ok(ast::PlaceholderStatement {}.into())
}

static POST_PROCESSED: AtomicUsize = AtomicUsize::new(0);

fn count_node(_ctx: &mut AstContext, _id: NodeId) -> solast::Result<()> {
    POST_PROCESSED.fetch_add(1, Ordering::SeqCst);

    Ok(())
}

#[test]
fn custom_tags_and_post_process_hooks() {
    let data = json!({
        "sources": {
            "x.sol": {
                "ast": {
                    "id": 3,
                    "src": "0:10:0",
                    "nodeType": "SourceUnit",
                    "absolutePath": "x.sol",
                    "nodes": [
                        { "id": 2, "src": "0:9:0", "nodeType": "ExperimentalNode" }
                    ]
                }
            }
        }
    });

    let mut opts = ReadOptions::default();
    opts.modern.register("ExperimentalNode", experimental_node);
    opts.post_process.push(count_node);

    let mut ctx = AstContext::new();
    let units = read::read_compiler_output(&data, &mut ctx, &opts).unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(ctx.require(NodeId::new(2)).unwrap().tag(), "PlaceholderStatement");
    assert_eq!(POST_PROCESSED.load(Ordering::SeqCst), 2);
}
