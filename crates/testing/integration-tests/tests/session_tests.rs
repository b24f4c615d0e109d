//! Driving the resolver through a session the way the parser does

use cx_resolve::{LangOptions, ResolveError, ResolveSession, ScopeKind};
use expect_test::expect;
use integration_tests::Unit;

#[test]
fn test_block_scopes_shadow_and_unwind() {
    let mut unit = Unit::new();
    let tu = unit.tu();
    let (_, func) = unit.function("main");
    let global = unit.var("x", tu);
    let param = unit.var("x", func);
    let block_local = unit.var("x", func);
    let x = unit.name("x");

    let mut session = ResolveSession::new(&unit.tree, LangOptions::c());
    session.declare(global).unwrap();
    session.push_scope(ScopeKind::Function, Some(func));
    session.declare(param).unwrap();
    session.push_scope(ScopeKind::Block, None);
    session.declare(block_local).unwrap();

    assert_eq!(session.resolve(x), Some(block_local));
    expect![[r#"
        #3 x @ main
        #2 x @ main
        #1 x @ <tu>
    "#]]
    .assert_eq(&unit.render(session.resolver().lookup(x)));

    session.pop_scope().unwrap();
    assert_eq!(session.resolve(x), Some(param));

    session.pop_scope().unwrap();
    assert_eq!(session.resolve(x), Some(global));
    assert_eq!(session.pop_scope(), Err(ResolveError::PopRootScope));

    let stats = session.finish();
    assert_eq!(stats.names, 1);
    assert_eq!(stats.entries, 1);
}

#[test]
fn test_sibling_blocks_do_not_see_each_other() {
    let mut unit = Unit::new();
    let (_, func) = unit.function("f");
    let first = unit.var("tmp", func);
    let tmp = unit.name("tmp");

    let mut session = ResolveSession::new(&unit.tree, LangOptions::c());
    session.push_scope(ScopeKind::Function, Some(func));
    session.push_scope(ScopeKind::Block, None);
    session.declare(first).unwrap();
    session.push_scope(ScopeKind::Block, None);
    assert_eq!(session.resolve(tmp), Some(first));
    session.pop_scope().unwrap();
    session.pop_scope().unwrap();

    session.push_scope(ScopeKind::Block, None);
    assert_eq!(session.resolve(tmp), None);
}

#[test]
fn test_visibility_does_not_cross_functions() {
    let mut unit = Unit::new();
    let (_, func_a) = unit.function("a");
    let (_, func_b) = unit.function("b");
    let local = unit.var("v", func_a);

    let mut session = ResolveSession::new(&unit.tree, LangOptions::c());
    session.push_scope(ScopeKind::Function, Some(func_a));
    session.declare(local).unwrap();

    let resolver = session.resolver();
    let scope = session.scopes().handle(session.current_scope());
    assert!(resolver.is_decl_in_scope(&unit.tree, local, func_a, Some(scope)));
    assert!(!resolver.is_decl_in_scope(&unit.tree, local, func_b, None));
}

#[test]
fn test_redeclaration_is_found_in_same_scope_only() {
    let mut unit = Unit::new();
    let (_, func) = unit.function("f");
    let outer = unit.var("i", func);
    let i = unit.name("i");

    let mut session = ResolveSession::new(&unit.tree, LangOptions::c());
    session.push_scope(ScopeKind::Function, Some(func));
    session.declare(outer).unwrap();
    assert_eq!(session.find_redeclaration(i), Some(outer));

    session.push_scope(ScopeKind::Block, None);
    assert_eq!(session.find_redeclaration(i), None);
    assert_eq!(session.resolve(i), Some(outer));
}

#[test]
fn test_for_init_conflicts_with_body_in_cplusplus() {
    let mut unit = Unit::new();
    let (_, func) = unit.function("loop");
    let induction = unit.var("i", func);
    let i = unit.name("i");

    for (options, expected) in [
        (LangOptions::c(), None),
        (LangOptions::cplusplus(), Some(induction)),
    ] {
        let mut session = ResolveSession::new(&unit.tree, options);
        session.push_scope(ScopeKind::Function, Some(func));
        session.push_scope(ScopeKind::Control, None);
        session.declare(induction).unwrap();
        session.push_scope(ScopeKind::Block, None);

        assert_eq!(session.find_redeclaration(i), expected);
        assert_eq!(session.resolve(i), Some(induction));
    }
}

#[test]
fn test_file_scope_redeclaration_uses_contexts() {
    let mut unit = Unit::new();
    let tu = unit.tu();
    let first = unit.var("g", tu);
    let g = unit.name("g");

    let mut session = ResolveSession::new(&unit.tree, LangOptions::c());
    session.declare(first).unwrap();
    assert_eq!(session.find_redeclaration(g), Some(first));
}

#[test]
fn test_options_load_from_toml() {
    let options = LangOptions::from_toml_str("cplusplus = true").unwrap();
    assert!(options.cplusplus);
}

#[test]
fn test_redeclaring_open_decl_in_inner_block_is_rejected() {
    let mut unit = Unit::new();
    let (_, func) = unit.function("f");
    let local = unit.var("x", func);
    let x = unit.name("x");

    let mut session = ResolveSession::new(&unit.tree, LangOptions::c());
    session.push_scope(ScopeKind::Function, Some(func));
    session.declare(local).unwrap();
    session.push_scope(ScopeKind::Block, None);
    assert_eq!(
        session.declare(local),
        Err(ResolveError::AlreadyTracked { decl: local })
    );

    // Closing the block must not unlink the function's declaration.
    session.pop_scope().unwrap();
    assert_eq!(session.resolve(x), Some(local));
    session.pop_scope().unwrap();
    assert_eq!(session.resolve(x), None);
}
