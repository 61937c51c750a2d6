use docsite_config::RedirectRule;
use docsite_ops::{RedirectError, RedirectTable};
use pretty_assertions::assert_eq;

#[test]
fn duplicate_source_fails() {
    let rules = vec![RedirectRule::new("/a", "/b"), RedirectRule::new("/a", "/c")];

    let err = RedirectTable::build(&rules).expect_err("duplicate source");
    assert_eq!(
        err,
        RedirectError::DuplicateRedirectSource {
            from: "/a".into(),
            first: "/b".into(),
            second: "/c".into(),
        }
    );
}

#[test]
fn trailing_slash_variants_collide() {
    let rules = vec![
        RedirectRule::new("/Intro/first", "/tutorials/"),
        RedirectRule::new("/Intro/first/", "/examples/"),
    ];

    let err = RedirectTable::build(&rules).expect_err("same source modulo slash");
    assert!(matches!(err, RedirectError::DuplicateRedirectSource { .. }));
}

#[test]
fn lookup_returns_target_for_every_rule() {
    let rules = vec![
        RedirectRule::new("/Intro/first", "/tutorials/getting-started/"),
        RedirectRule::new("/old/reference", "/reference/"),
        RedirectRule::new("/chat", "https://discord.gg/GHNN9CNAZe"),
    ];

    let index = RedirectTable::build(&rules).expect("valid rules");
    assert_eq!(index.len(), 3);
    for rule in &rules {
        assert_eq!(index.lookup(&rule.from), Some(rule.to.as_str()));
    }
    assert_eq!(
        index.lookup("/Intro/first/"),
        Some("/tutorials/getting-started/")
    );
    assert_eq!(index.lookup("/intro/first"), None);
    assert_eq!(index.rules(), rules.as_slice());
}

#[test]
fn empty_rule_list_builds_empty_index() {
    let index = RedirectTable::build(&[]).expect("empty");
    assert!(index.is_empty());
    assert_eq!(index.lookup("/anything"), None);
}
