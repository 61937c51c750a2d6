//! Navigation-tree declarations and their validation.
//!
//! A [`SidebarDeclaration`] holds the named sidebars of one docs section as
//! written by authors. [`resolve`] walks every sidebar depth-first, splices
//! `ref` items, and produces [`ValidatedSidebars`] whose trees only contain
//! doc, link and category nodes. Sibling order is the on-page order and is
//! never changed.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

mod declaration;

pub use declaration::{SidebarDeclaration, SidebarItem};

/// Validated navigation node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SidebarNode {
    Doc(DocNode),
    Link(LinkNode),
    Category(CategoryNode),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocNode {
    pub id: String,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkNode {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryNode {
    pub label: String,
    pub link: Option<CategoryLink>,
    pub collapsed: bool,
    pub collapsible: bool,
    pub items: Vec<SidebarNode>,
}

/// Landing page attached to a category.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    Doc {
        id: String,
    },
    GeneratedIndex {
        slug: Option<String>,
        title: Option<String>,
    },
}

/// One validated sidebar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SidebarTree {
    pub name: String,
    pub nodes: Vec<SidebarNode>,
}

impl SidebarTree {
    /// Visit every node depth-first in declaration order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a SidebarNode, usize)) {
        fn walk_nodes<'a>(
            nodes: &'a [SidebarNode],
            depth: usize,
            visit: &mut dyn FnMut(&'a SidebarNode, usize),
        ) {
            for node in nodes {
                visit(node, depth);
                if let SidebarNode::Category(category) = node {
                    walk_nodes(&category.items, depth + 1, visit);
                }
            }
        }
        walk_nodes(&self.nodes, 0, visit);
    }

    /// Doc ids in depth-first order, category landing docs included.
    pub fn doc_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |node, _| match node {
            SidebarNode::Doc(doc) => ids.push(doc.id.as_str()),
            SidebarNode::Category(CategoryNode {
                link: Some(CategoryLink::Doc { id }),
                ..
            }) => ids.push(id.as_str()),
            _ => {}
        });
        ids
    }

    pub fn links(&self) -> Vec<&LinkNode> {
        let mut links = Vec::new();
        self.walk(&mut |node, _| {
            if let SidebarNode::Link(link) = node {
                links.push(link);
            }
        });
        links
    }
}

/// All sidebars of one declaration after validation, ordered by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidatedSidebars {
    trees: Vec<SidebarTree>,
}

impl ValidatedSidebars {
    pub fn iter(&self) -> impl Iterator<Item = &SidebarTree> {
        self.trees.iter()
    }

    pub fn get(&self, name: &str) -> Option<&SidebarTree> {
        self.trees.iter().find(|tree| tree.name == name)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn contains_doc(&self, id: &str) -> bool {
        self.trees.iter().any(|tree| tree.doc_ids().contains(&id))
    }

    /// Doc ids across all sidebars, first occurrence wins.
    pub fn doc_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for tree in &self.trees {
            for id in tree.doc_ids() {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }
}

/// Errors surfaced while loading or validating sidebar declarations.
#[derive(Debug, Error)]
pub enum SidebarError {
    #[error("failed to read sidebar declaration {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse sidebar declaration {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unsupported sidebar declaration format {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },
    #[error("{position}: {message}")]
    InvalidItem { position: String, message: String },
    #[error("{position}: label cannot be empty")]
    EmptyLabel { position: String },
    #[error("{position}: doc id cannot be empty")]
    EmptyDocId { position: String },
    #[error("duplicate doc id '{id}' in sidebar '{sidebar}' at {second} (first declared at {first})")]
    DuplicateDocId {
        id: String,
        sidebar: String,
        first: String,
        second: String,
    },
    #[error("cyclic sidebar reference: {}", chain.join(" -> "))]
    CyclicCategory { chain: Vec<String> },
    #[error("sidebar '{sidebar}' references unknown sidebar '{target}' at {position}")]
    UnknownSidebar {
        sidebar: String,
        target: String,
        position: String,
    },
}

/// Validate every sidebar of `declaration`.
pub fn resolve(declaration: &SidebarDeclaration) -> Result<ValidatedSidebars, SidebarError> {
    let mut trees = Vec::new();
    for (name, items) in &declaration.sidebars {
        let mut resolver = SidebarResolver::new(declaration, name);
        let nodes = resolver.resolve_items(items, name)?;
        debug!(
            sidebar = %name,
            docs = resolver.seen.len(),
            "sidebar resolved"
        );
        trees.push(SidebarTree {
            name: name.clone(),
            nodes,
        });
    }
    Ok(ValidatedSidebars { trees })
}

/// Depth-first walker for a single sidebar. `stack` holds the chain of
/// sidebars currently being expanded; `seen` maps doc ids to the position
/// where they first appeared.
struct SidebarResolver<'a> {
    declaration: &'a SidebarDeclaration,
    root: &'a str,
    stack: Vec<&'a str>,
    seen: HashMap<String, String>,
}

impl<'a> SidebarResolver<'a> {
    fn new(declaration: &'a SidebarDeclaration, root: &'a str) -> Self {
        SidebarResolver {
            declaration,
            root,
            stack: vec![root],
            seen: HashMap::new(),
        }
    }

    fn resolve_items(
        &mut self,
        items: &'a [SidebarItem],
        position: &str,
    ) -> Result<Vec<SidebarNode>, SidebarError> {
        let mut nodes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let position = format!("{position}[{index}]");
            match item {
                SidebarItem::Doc { id, label } => {
                    self.record_doc(id, &position)?;
                    nodes.push(SidebarNode::Doc(DocNode {
                        id: id.clone(),
                        label: label.clone(),
                    }));
                }
                SidebarItem::Link { label, href } => {
                    require_label(label, &position)?;
                    nodes.push(SidebarNode::Link(LinkNode {
                        label: label.clone(),
                        href: href.clone(),
                    }));
                }
                SidebarItem::Category {
                    label,
                    link,
                    collapsed,
                    collapsible,
                    items,
                } => {
                    require_label(label, &position)?;
                    if let Some(CategoryLink::Doc { id }) = link {
                        self.record_doc(id, &format!("{position}.link"))?;
                    }
                    let children = self.resolve_items(items, &format!("{position}.items"))?;
                    nodes.push(SidebarNode::Category(CategoryNode {
                        label: label.clone(),
                        link: link.clone(),
                        collapsed: *collapsed,
                        collapsible: *collapsible,
                        items: children,
                    }));
                }
                SidebarItem::Ref { sidebar } => {
                    if self.stack.contains(&sidebar.as_str()) {
                        let mut chain: Vec<String> =
                            self.stack.iter().map(|name| name.to_string()).collect();
                        chain.push(sidebar.clone());
                        return Err(SidebarError::CyclicCategory { chain });
                    }
                    let Some((target, target_items)) =
                        self.declaration.sidebars.get_key_value(sidebar.as_str())
                    else {
                        return Err(SidebarError::UnknownSidebar {
                            sidebar: self.root.to_string(),
                            target: sidebar.clone(),
                            position,
                        });
                    };
                    self.stack.push(target.as_str());
                    let spliced = self.resolve_items(target_items, target)?;
                    self.stack.pop();
                    nodes.extend(spliced);
                }
            }
        }
        Ok(nodes)
    }

    fn record_doc(&mut self, id: &str, position: &str) -> Result<(), SidebarError> {
        if id.trim().is_empty() {
            return Err(SidebarError::EmptyDocId {
                position: position.to_string(),
            });
        }
        if let Some(first) = self.seen.get(id) {
            return Err(SidebarError::DuplicateDocId {
                id: id.to_string(),
                sidebar: self.root.to_string(),
                first: first.clone(),
                second: position.to_string(),
            });
        }
        self.seen.insert(id.to_string(), position.to_string());
        Ok(())
    }
}

fn require_label(label: &str, position: &str) -> Result<(), SidebarError> {
    if label.trim().is_empty() {
        return Err(SidebarError::EmptyLabel {
            position: position.to_string(),
        });
    }
    Ok(())
}
