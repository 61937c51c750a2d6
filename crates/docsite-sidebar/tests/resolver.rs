use std::fs;

use docsite_sidebar::{
    resolve, CategoryLink, CategoryNode, DocNode, LinkNode, SidebarDeclaration, SidebarError,
    SidebarItem, SidebarNode,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn doc(id: &str) -> SidebarNode {
    SidebarNode::Doc(DocNode {
        id: id.into(),
        label: None,
    })
}

#[test]
fn duplicate_doc_id_at_top_level_fails() {
    let declaration = SidebarDeclaration::new().with_sidebar(
        "main",
        vec![SidebarItem::doc("index"), SidebarItem::doc("index")],
    );

    let err = resolve(&declaration).expect_err("duplicate id");
    match err {
        SidebarError::DuplicateDocId {
            id,
            sidebar,
            first,
            second,
        } => {
            assert_eq!(id, "index");
            assert_eq!(sidebar, "main");
            assert_eq!(first, "main[0]");
            assert_eq!(second, "main[1]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_doc_id_inside_nested_category_fails() {
    let declaration = SidebarDeclaration::new().with_sidebar(
        "main",
        vec![
            SidebarItem::doc("intro"),
            SidebarItem::category(
                "Guides",
                vec![SidebarItem::category(
                    "Advanced",
                    vec![SidebarItem::doc("intro")],
                )],
            ),
        ],
    );

    let err = resolve(&declaration).expect_err("nested duplicate");
    assert!(matches!(err, SidebarError::DuplicateDocId { ref id, .. } if id == "intro"));
    assert!(err.to_string().contains("main[1].items[0].items[0]"));
}

#[test]
fn category_link_doc_counts_towards_uniqueness() {
    let declaration = SidebarDeclaration::new().with_sidebar(
        "tutorials",
        vec![SidebarItem::Category {
            label: "Getting started".into(),
            link: Some(CategoryLink::Doc {
                id: "getting-started/index".into(),
            }),
            collapsed: true,
            collapsible: true,
            items: vec![SidebarItem::doc("getting-started/index")],
        }],
    );

    let err = resolve(&declaration).expect_err("link doc duplicated in items");
    assert!(matches!(err, SidebarError::DuplicateDocId { .. }));
}

#[test]
fn same_doc_in_different_sidebars_is_allowed() {
    let declaration = SidebarDeclaration::new()
        .with_sidebar("a", vec![SidebarItem::doc("shared")])
        .with_sidebar("b", vec![SidebarItem::doc("shared")]);

    let sidebars = resolve(&declaration).expect("independent trees");
    assert_eq!(sidebars.len(), 2);
    assert_eq!(sidebars.doc_ids(), vec!["shared"]);
}

#[test]
fn self_reference_through_category_is_cyclic() {
    let declaration = SidebarDeclaration::new().with_sidebar(
        "main",
        vec![
            SidebarItem::doc("index"),
            SidebarItem::category("Loop", vec![SidebarItem::reference("main")]),
        ],
    );

    let err = resolve(&declaration).expect_err("self cycle");
    match err {
        SidebarError::CyclicCategory { chain } => assert_eq!(chain, vec!["main", "main"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ancestor_reference_is_cyclic() {
    let declaration = SidebarDeclaration::new()
        .with_sidebar(
            "guides",
            vec![SidebarItem::category(
                "Deeper",
                vec![SidebarItem::reference("advanced")],
            )],
        )
        .with_sidebar(
            "advanced",
            vec![SidebarItem::category(
                "Back up",
                vec![SidebarItem::reference("guides")],
            )],
        );

    let err = resolve(&declaration).expect_err("ancestor cycle");
    assert_eq!(
        err.to_string(),
        "cyclic sidebar reference: advanced -> guides -> advanced"
    );
}

#[test]
fn refs_splice_in_place_and_keep_order() {
    let declaration = SidebarDeclaration::new()
        .with_sidebar("shared", vec![SidebarItem::doc("faq"), SidebarItem::doc("support")])
        .with_sidebar(
            "main",
            vec![
                SidebarItem::doc("index"),
                SidebarItem::reference("shared"),
                SidebarItem::doc("changelog"),
            ],
        );

    let sidebars = resolve(&declaration).expect("resolve refs");
    let main = sidebars.get("main").expect("main sidebar");
    assert_eq!(
        main.nodes,
        vec![doc("index"), doc("faq"), doc("support"), doc("changelog")]
    );
}

#[test]
fn unknown_ref_target_is_reported() {
    let declaration = SidebarDeclaration::new()
        .with_sidebar("main", vec![SidebarItem::reference("missing")]);

    let err = resolve(&declaration).expect_err("unknown ref");
    assert_eq!(
        err.to_string(),
        "sidebar 'main' references unknown sidebar 'missing' at main[0]"
    );
}

#[test]
fn empty_link_label_is_rejected() {
    let declaration = SidebarDeclaration::new()
        .with_sidebar("main", vec![SidebarItem::link(" ", "/tutorials/")]);

    let err = resolve(&declaration).expect_err("empty label");
    assert!(matches!(err, SidebarError::EmptyLabel { .. }));
}

#[test]
fn resolves_declaration_file_preserving_sibling_order() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("sidebars.toml");
    fs::write(
        &path,
        r#"
aboutSidebar = [
    { type = "doc", label = "Welcome", id = "index" },
    { type = "link", label = "Tutorials", href = "/tutorials/" },
    { type = "link", label = "Examples", href = "/examples/" },
    "ongoing-work",
    "community",
]
"#,
    )
    .expect("write sidebar");

    let declaration = SidebarDeclaration::load_file(&path).expect("load sidebar file");
    let sidebars = resolve(&declaration).expect("resolve");
    let tree = sidebars.get("aboutSidebar").expect("about sidebar");

    assert_eq!(
        tree.nodes,
        vec![
            SidebarNode::Doc(DocNode {
                id: "index".into(),
                label: Some("Welcome".into()),
            }),
            SidebarNode::Link(LinkNode {
                label: "Tutorials".into(),
                href: "/tutorials/".into(),
            }),
            SidebarNode::Link(LinkNode {
                label: "Examples".into(),
                href: "/examples/".into(),
            }),
            doc("ongoing-work"),
            doc("community"),
        ]
    );
    assert_eq!(tree.doc_ids(), vec!["index", "ongoing-work", "community"]);
    assert_eq!(tree.links().len(), 2);
}

#[test]
fn category_children_keep_declared_order() {
    let declaration = SidebarDeclaration::from_toml_str(
        r#"
tutorialsSidebar = [
    { type = "doc", label = "Tutorials", id = "index" },
    { type = "category", label = "Getting started", link = { type = "doc", id = "getting-started/index" }, items = [
        "getting-started/step-02",
        "getting-started/step-01",
    ] },
]
"#,
    )
    .expect("parse");

    let sidebars = resolve(&declaration).expect("resolve");
    let tree = sidebars.get("tutorialsSidebar").expect("tree");
    let SidebarNode::Category(CategoryNode { items, .. }) = &tree.nodes[1] else {
        panic!("expected category node");
    };
    assert_eq!(
        items,
        &vec![doc("getting-started/step-02"), doc("getting-started/step-01")]
    );
    assert_eq!(
        tree.doc_ids(),
        vec![
            "index",
            "getting-started/index",
            "getting-started/step-02",
            "getting-started/step-01"
        ]
    );
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("sidebars.js");
    fs::write(&path, "module.exports = {}").expect("write");

    let err = SidebarDeclaration::load_file(&path).expect_err("js is not supported");
    assert!(matches!(err, SidebarError::UnsupportedFormat { .. }));
}

#[test]
fn blank_doc_ids_are_rejected() {
    let declaration =
        SidebarDeclaration::from_toml_str(r#"main = ["", { type = "doc", id = "  " }, "index"]"#)
            .expect("parse");

    let err = resolve(&declaration).expect_err("empty shorthand id");
    assert_eq!(err.to_string(), "main[0]: doc id cannot be empty");

    let declaration = SidebarDeclaration::new().with_sidebar(
        "main",
        vec![SidebarItem::doc("index"), SidebarItem::doc(" ")],
    );
    let err = resolve(&declaration).expect_err("whitespace id");
    assert!(matches!(err, SidebarError::EmptyDocId { ref position } if position == "main[1]"));
}

#[test]
fn blank_category_link_id_is_rejected() {
    let declaration = SidebarDeclaration::new().with_sidebar(
        "tutorials",
        vec![SidebarItem::Category {
            label: "Getting started".into(),
            link: Some(CategoryLink::Doc { id: String::new() }),
            collapsed: true,
            collapsible: true,
            items: vec![SidebarItem::doc("getting-started/step-01")],
        }],
    );

    let err = resolve(&declaration).expect_err("empty link id");
    assert_eq!(err.to_string(), "tutorials[0].link: doc id cannot be empty");
}
