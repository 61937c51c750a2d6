//! Parsing of sidebar declaration files into [`SidebarDeclaration`] values.
//!
//! A declaration file maps sidebar names to item lists. Items are either a
//! bare string (a doc id) or a record tagged by `type`:
//!
//! ```toml
//! tutorialsSidebar = [
//!     { type = "doc", id = "index", label = "Tutorials" },
//!     { type = "category", label = "Getting started", link = { type = "doc", id = "getting-started/index" }, items = [
//!         "getting-started/step-01",
//!     ] },
//! ]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{CategoryLink, SidebarError};

/// Unvalidated sidebar declarations keyed by sidebar name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SidebarDeclaration {
    pub(crate) sidebars: BTreeMap<String, Vec<SidebarItem>>,
}

/// Declared sidebar item. `Ref` splices another named sidebar in place.
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarItem {
    Doc {
        id: String,
        label: Option<String>,
    },
    Link {
        label: String,
        href: String,
    },
    Category {
        label: String,
        link: Option<CategoryLink>,
        collapsed: bool,
        collapsible: bool,
        items: Vec<SidebarItem>,
    },
    Ref {
        sidebar: String,
    },
}

impl SidebarItem {
    pub fn doc(id: impl Into<String>) -> Self {
        SidebarItem::Doc {
            id: id.into(),
            label: None,
        }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        SidebarItem::Link {
            label: label.into(),
            href: href.into(),
        }
    }

    pub fn category(label: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        SidebarItem::Category {
            label: label.into(),
            link: None,
            collapsed: true,
            collapsible: true,
            items,
        }
    }

    pub fn reference(sidebar: impl Into<String>) -> Self {
        SidebarItem::Ref {
            sidebar: sidebar.into(),
        }
    }
}

impl SidebarDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the sidebar `name`.
    pub fn with_sidebar(mut self, name: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        self.sidebars.insert(name.into(), items);
        self
    }

    pub fn items(&self, name: &str) -> Option<&[SidebarItem]> {
        self.sidebars.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Reads a `.toml` or `.json` declaration file.
    pub fn load_file(path: &Path) -> Result<Self, SidebarError> {
        debug!(path = %path.display(), "reading sidebar declaration");
        let contents = fs::read_to_string(path).map_err(|source| SidebarError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let raw: RawDeclaration = match extension.as_deref() {
            Some("toml") => toml::from_str(&contents).map_err(|err| SidebarError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?,
            Some("json") => serde_json::from_str(&contents).map_err(|err| SidebarError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?,
            _ => {
                return Err(SidebarError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        raw_to_declaration(raw)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SidebarError> {
        let raw: RawDeclaration = toml::from_str(contents).map_err(|err| SidebarError::Parse {
            path: "<inline>".into(),
            message: err.to_string(),
        })?;
        raw_to_declaration(raw)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, SidebarError> {
        let raw: RawDeclaration =
            serde_json::from_str(contents).map_err(|err| SidebarError::Parse {
                path: "<inline>".into(),
                message: err.to_string(),
            })?;
        raw_to_declaration(raw)
    }
}

type RawDeclaration = BTreeMap<String, Vec<RawItem>>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawItem {
    Shorthand(String),
    Entry(RawEntry),
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    link: Option<RawCategoryLink>,
    #[serde(default)]
    collapsed: Option<bool>,
    #[serde(default)]
    collapsible: Option<bool>,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawCategoryLink {
    r#type: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

fn raw_to_declaration(raw: RawDeclaration) -> Result<SidebarDeclaration, SidebarError> {
    let mut sidebars = BTreeMap::new();
    for (name, items) in raw {
        let converted = convert_items(items, &name)?;
        sidebars.insert(name, converted);
    }
    Ok(SidebarDeclaration { sidebars })
}

fn convert_items(items: Vec<RawItem>, position: &str) -> Result<Vec<SidebarItem>, SidebarError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| convert_item(item, &format!("{position}[{index}]")))
        .collect()
}

fn convert_item(item: RawItem, position: &str) -> Result<SidebarItem, SidebarError> {
    let entry = match item {
        RawItem::Shorthand(id) => return Ok(SidebarItem::doc(id)),
        RawItem::Entry(entry) => entry,
    };

    let invalid = |message: &str| SidebarError::InvalidItem {
        position: position.to_string(),
        message: message.to_string(),
    };

    let Some(kind) = entry.r#type.as_deref() else {
        return Err(invalid("item requires a type"));
    };
    match kind {
        "doc" => {
            let id = entry.id.ok_or_else(|| invalid("doc item requires an id"))?;
            Ok(SidebarItem::Doc {
                id,
                label: entry.label,
            })
        }
        "link" => {
            let href = entry.href.ok_or_else(|| invalid("link item requires an href"))?;
            let label = entry.label.ok_or_else(|| invalid("link item requires a label"))?;
            Ok(SidebarItem::Link { label, href })
        }
        "category" => {
            let label = entry
                .label
                .ok_or_else(|| invalid("category item requires a label"))?;
            let link = entry
                .link
                .map(|link| convert_category_link(link, position))
                .transpose()?;
            let items = convert_items(entry.items, &format!("{position}.items"))?;
            Ok(SidebarItem::Category {
                label,
                link,
                collapsed: entry.collapsed.unwrap_or(true),
                collapsible: entry.collapsible.unwrap_or(true),
                items,
            })
        }
        "ref" => {
            let sidebar = entry
                .id
                .ok_or_else(|| invalid("ref item requires the id of a sidebar"))?;
            Ok(SidebarItem::Ref { sidebar })
        }
        other => Err(invalid(&format!("unknown sidebar item type '{other}'"))),
    }
}

fn convert_category_link(
    link: RawCategoryLink,
    position: &str,
) -> Result<CategoryLink, SidebarError> {
    match link.r#type.as_str() {
        "doc" => match link.id {
            Some(id) => Ok(CategoryLink::Doc { id }),
            None => Err(SidebarError::InvalidItem {
                position: format!("{position}.link"),
                message: "doc link requires an id".into(),
            }),
        },
        "generated-index" => Ok(CategoryLink::GeneratedIndex {
            slug: link.slug,
            title: link.title,
        }),
        other => Err(SidebarError::InvalidItem {
            position: format!("{position}.link"),
            message: format!("unknown category link type '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shorthand_strings_become_docs() {
        let declaration = SidebarDeclaration::from_toml_str(
            r#"referenceSidebar = [{ type = "doc", id = "index", label = "Introduction" }, "endpoints", "data-access"]"#,
        )
        .expect("parse declaration");

        assert_eq!(
            declaration.items("referenceSidebar").expect("sidebar"),
            &[
                SidebarItem::Doc {
                    id: "index".into(),
                    label: Some("Introduction".into())
                },
                SidebarItem::doc("endpoints"),
                SidebarItem::doc("data-access"),
            ]
        );
    }

    #[test]
    fn json_declarations_parse_categories() {
        let declaration = SidebarDeclaration::from_json_str(
            r#"{
                "tutorialsSidebar": [
                    {"type": "category", "label": "Getting started",
                     "link": {"type": "doc", "id": "getting-started/index"},
                     "collapsed": false,
                     "items": ["getting-started/step-01"]}
                ]
            }"#,
        )
        .expect("parse json");

        assert_eq!(
            declaration.items("tutorialsSidebar").expect("sidebar"),
            &[SidebarItem::Category {
                label: "Getting started".into(),
                link: Some(CategoryLink::Doc {
                    id: "getting-started/index".into()
                }),
                collapsed: false,
                collapsible: true,
                items: vec![SidebarItem::doc("getting-started/step-01")],
            }]
        );
    }

    #[test]
    fn unknown_item_type_reports_position() {
        let err = SidebarDeclaration::from_toml_str(
            r#"main = ["intro", { type = "category", label = "More", items = [{ type = "html", id = "x" }] }]"#,
        )
        .expect_err("unknown type");

        assert_eq!(
            err.to_string(),
            "main[1].items[0]: unknown sidebar item type 'html'"
        );
    }

    #[test]
    fn record_without_type_reports_position() {
        let err = SidebarDeclaration::from_toml_str(
            r#"main = ["intro", { id = "setup", label = "Setup" }]"#,
        )
        .expect_err("missing type");

        assert_eq!(err.to_string(), "main[1]: item requires a type");
    }

    #[test]
    fn link_without_href_is_invalid() {
        let err = SidebarDeclaration::from_toml_str(r#"main = [{ type = "link", label = "Home" }]"#)
            .expect_err("missing href");
        assert!(matches!(err, SidebarError::InvalidItem { .. }));
    }
}
