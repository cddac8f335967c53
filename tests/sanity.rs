use std::collections::BTreeMap;

use solast::ast::{self, NodeKind};
use solast::factory::NodeFactory;
use solast::sanity::{check_sanity, is_sane};
use solast::{AstContext, AstError, NodeId, SourceLocation};

fn statement(factory: &mut NodeFactory<'_>, name: &str) -> NodeId {
    let expr = factory.identifier(name, None).unwrap();

    factory
        .make(
            SourceLocation::default(),
            ast::ExpressionStatement { expression: expr },
        )
        .unwrap()
}

#[test]
fn factory_built_trees_are_sane() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let first = statement(&mut factory, "a");
    let second = statement(&mut factory, "b");
    let block = factory.block(vec![first, second]).unwrap();

    assert!(check_sanity(block, &ctx).is_ok());
    assert!(is_sane(block, &ctx).unwrap());
}

#[test]
fn corrupted_parent_pointers_are_reported() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let child = statement(&mut factory, "a");
    let block = factory.block(vec![child]).unwrap();

    ctx.lookup_mut(child).unwrap().parent = None;

    let err = check_sanity(block, &ctx).unwrap_err();
    assert_eq!(
        err,
        AstError::ParentageInconsistent {
            child,
            expected_parent: block,
            actual_parent: None,
        }
    );
    assert!(!is_sane(block, &ctx).unwrap());
}

#[test]
fn orphans_claiming_a_reachable_parent_are_reported() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let listed = statement(&mut factory, "a");
    let block = factory.block(vec![listed]).unwrap();
    let orphan = statement(&mut factory, "b");

    // claims the block as parent without being in its statement list
    ctx.lookup_mut(orphan).unwrap().parent = Some(block);

    let err = check_sanity(block, &ctx).unwrap_err();
    assert_eq!(
        err,
        AstError::CoverageViolation {
            node: block,
            missing_child: orphan,
        }
    );
}

#[test]
fn missing_reachable_nodes_are_reported_as_wrong_context() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let child = statement(&mut factory, "a");
    let block = factory.block(vec![child]).unwrap();

    ctx.unregister(child);

    let err = check_sanity(block, &ctx).unwrap_err();
    assert_eq!(err, AstError::WrongContext { node: child });
}

#[test]
fn dangling_required_references_are_reported() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let bogus = NodeId::new(777);
    let contract = factory
        .make(
            SourceLocation::default(),
            ast::ContractDefinition {
                name: "C".into(),
                kind: ast::ContractKind::Contract,
                is_abstract: false,
                fully_implemented: true,
                linearized_base_contracts: vec![bogus],
                used_errors: vec![],
                scope: None,
                documentation: None,
                base_contracts: vec![],
                nodes: vec![],
            },
        )
        .unwrap();

    let err = check_sanity(contract, &ctx).unwrap_err();
    assert_eq!(
        err,
        AstError::DanglingReference {
            owner: contract,
            attribute: "linearizedBaseContracts",
            target: bogus,
        }
    );
    assert!(!is_sane(contract, &ctx).unwrap());
}

#[test]
fn nullable_reference_views_tolerate_dangling_ids() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let ghost = NodeId::new(888);
    let identifier = factory.identifier("free", Some(ghost)).unwrap();

    assert!(check_sanity(identifier, &ctx).is_ok());
}

#[test]
fn unresolvable_exported_symbols_are_reported() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let mut exported_symbols = BTreeMap::new();
    exported_symbols.insert("Ghost".to_owned(), NodeId::new(555));

    let unit = factory
        .make(
            SourceLocation::default(),
            ast::SourceUnit {
                absolute_path: "ghost.sol".into(),
                license: None,
                exported_symbols,
                nodes: vec![],
            },
        )
        .unwrap();

    let err = check_sanity(unit, &ctx).unwrap_err();
    assert_eq!(
        err,
        AstError::ExportedSymbolsMismatch {
            unit,
            symbol: "Ghost".into(),
        }
    );
}

#[test]
fn doubly_listed_children_are_reported() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let child = statement(&mut factory, "a");
    let block = factory.block(vec![child]).unwrap();

    let NodeKind::Block(b) = &mut ctx.lookup_mut(block).unwrap().kind else {
        panic!("expected a block");
    };
    b.statements.push(child);

    assert!(check_sanity(block, &ctx).is_err());
    assert!(!is_sane(block, &ctx).unwrap());
}

#[test]
fn a_missing_root_is_not_swallowed_by_is_sane() {
    let ctx = AstContext::new();

    // WrongContext is a sanity violation, so the predicate reports false
    // rather than erroring
    assert!(!is_sane(NodeId::new(1), &ctx).unwrap());
}

#[test]
fn leaves_need_no_further_checks() {
    let mut ctx = AstContext::new();
    let mut factory = NodeFactory::new(&mut ctx);

    let pragma = factory
        .make(
            SourceLocation::default(),
            ast::PragmaDirective {
                literals: vec!["solidity".into(), "^".into(), "0.8.0".into()],
            },
        )
        .unwrap();

    assert!(check_sanity(pragma, &ctx).is_ok());
}
