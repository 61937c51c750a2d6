//! Plugin declarations and their resolution into typed records.
//!
//! Each `[[plugins]]` entry names a `kind`. Docs plugins become [`PluginSpec`]
//! mounts in declaration order; theme and redirect plugins are lifted into
//! site-wide settings.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    compile_patterns, resolve_path, ConfigSource, ConfigValidationError, Located, PatternList,
    ValidationKind,
};

/// Identifier assigned to a docs plugin that does not declare one.
pub const DEFAULT_PLUGIN_ID: &str = "default";

const DEFAULT_CONTENT_PATH: &str = "docs";
const DEFAULT_ROUTE_BASE_PATH: &str = "docs";
const DEFAULT_INCLUDE: &[&str] = &["**/*.md", "**/*.mdx"];
const DEFAULT_EXCLUDE: &[&str] = &[
    "**/_*.{md,mdx}",
    "**/_*/**",
    "**/*.test.{js,jsx,ts,tsx}",
    "**/__tests__/**",
];

/// Supported plugin kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PluginKind {
    ContentDocs,
    ThemeClassic,
    ClientRedirects,
}

impl PluginKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PluginKind::ContentDocs => "content-docs",
            PluginKind::ThemeClassic => "theme-classic",
            PluginKind::ClientRedirects => "client-redirects",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PluginKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "content-docs" => Ok(PluginKind::ContentDocs),
            "theme-classic" => Ok(PluginKind::ThemeClassic),
            "client-redirects" => Ok(PluginKind::ClientRedirects),
            _ => Err(()),
        }
    }
}

/// A docs section mount: content directory, route prefix and navigation tree.
#[derive(Clone, Debug)]
pub struct PluginSpec {
    pub id: String,
    pub content_path: PathBuf,
    /// Normalised prefix, either `/` or `/segment` without a trailing slash.
    pub route_base_path: String,
    pub sidebar_path: Option<PathBuf>,
    pub include: PatternList,
    pub exclude: PatternList,
}

impl PluginSpec {
    /// Route of `doc_id` relative to the site base URL. A trailing `index`
    /// segment maps to the enclosing directory route.
    pub fn route_for(&self, doc_id: &str) -> String {
        let trimmed = doc_id.trim_matches('/');
        let (stem, directory) = if trimmed == "index" {
            ("", true)
        } else if let Some(parent) = trimmed.strip_suffix("/index") {
            (parent, true)
        } else {
            (trimmed, false)
        };

        let mut route = self.route_base_path.trim_end_matches('/').to_string();
        if !stem.is_empty() {
            route.push('/');
            route.push_str(stem);
        }
        if directory || route.is_empty() {
            route.push('/');
        }
        route
    }
}

/// Options of the classic theme plugin.
#[derive(Clone, Debug, Default)]
pub struct ThemeOptions {
    pub custom_css: Vec<PathBuf>,
}

/// One old-path to new-path mapping.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
}

impl RedirectRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        RedirectRule {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Plugin declarations after validation, split by concern.
#[derive(Debug, Default)]
pub(crate) struct PluginRegistry {
    pub plugins: Vec<PluginSpec>,
    pub theme: ThemeOptions,
    pub redirects: Vec<RedirectRule>,
}

impl PluginRegistry {
    pub(crate) fn resolve(
        declarations: Option<Located<Vec<RawPlugin>>>,
        errors: &mut Vec<ConfigValidationError>,
    ) -> Self {
        let mut registry = PluginRegistry::default();
        let Some(Located { value, source }) = declarations else {
            return registry;
        };

        let mut seen_ids = HashSet::new();
        let mut theme_declared = false;

        for (index, raw) in value.into_iter().enumerate() {
            let context = format!("plugins[{index}]");
            let kind = match raw.kind.parse::<PluginKind>() {
                Ok(kind) => kind,
                Err(_) => {
                    errors.push(
                        ConfigValidationError::new(
                            ValidationKind::UnknownPluginKind {
                                kind: raw.kind.clone(),
                            },
                            Some(source.clone()),
                            format!("unknown plugin kind '{}'", raw.kind),
                        )
                        .with_context(context),
                    );
                    continue;
                }
            };

            match kind {
                PluginKind::ContentDocs => {
                    let Some(spec) = resolve_docs_plugin(raw, &source, &context, errors) else {
                        continue;
                    };
                    if !seen_ids.insert(spec.id.clone()) {
                        errors.push(
                            ConfigValidationError::new(
                                ValidationKind::DuplicatePluginId {
                                    id: spec.id.clone(),
                                },
                                Some(source.clone()),
                                format!("duplicate docs plugin id '{}'", spec.id),
                            )
                            .with_context(context),
                        );
                        continue;
                    }
                    registry.plugins.push(spec);
                }
                PluginKind::ThemeClassic => {
                    if theme_declared {
                        errors.push(
                            ConfigValidationError::new(
                                ValidationKind::DuplicatePlugin { kind },
                                Some(source.clone()),
                                format!("plugin '{kind}' may only be declared once"),
                            )
                            .with_context(context),
                        );
                        continue;
                    }
                    theme_declared = true;
                    registry.theme = ThemeOptions {
                        custom_css: raw
                            .custom_css
                            .unwrap_or_default()
                            .iter()
                            .map(|path| resolve_path(path, &source))
                            .collect(),
                    };
                }
                PluginKind::ClientRedirects => {
                    registry.redirects.extend(
                        raw.redirects
                            .unwrap_or_default()
                            .into_iter()
                            .map(|rule| RedirectRule::new(rule.from, rule.to)),
                    );
                }
            }
        }

        registry
    }
}

fn resolve_docs_plugin(
    raw: RawPlugin,
    source: &ConfigSource,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> Option<PluginSpec> {
    let id = raw.id.unwrap_or_else(|| DEFAULT_PLUGIN_ID.to_string());
    if id.trim().is_empty() {
        errors.push(
            ConfigValidationError::new(
                ValidationKind::InvalidValue,
                Some(source.clone()),
                "docs plugin id cannot be empty".into(),
            )
            .with_context(context),
        );
        return None;
    }

    let content_path = raw
        .path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_PATH));
    let route_base_path = normalize_route_base_path(
        raw.route_base_path
            .as_deref()
            .unwrap_or(DEFAULT_ROUTE_BASE_PATH),
    );

    let include = compile_patterns(
        raw.include
            .unwrap_or_else(|| DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect()),
        source,
        &format!("{context}.include"),
        errors,
    );
    let exclude = compile_patterns(
        raw.exclude
            .unwrap_or_else(|| DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect()),
        source,
        &format!("{context}.exclude"),
        errors,
    );

    Some(PluginSpec {
        id,
        content_path: resolve_path(&content_path, source),
        route_base_path,
        sidebar_path: raw.sidebar_path.map(|path| resolve_path(&path, source)),
        include,
        exclude,
    })
}

fn normalize_route_base_path(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RawPlugin {
    kind: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    route_base_path: Option<String>,
    #[serde(default)]
    sidebar_path: Option<PathBuf>,
    #[serde(default)]
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
    #[serde(default)]
    custom_css: Option<Vec<PathBuf>>,
    #[serde(default)]
    redirects: Option<Vec<RawRedirect>>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawRedirect {
    from: String,
    to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(prefix: &str) -> PluginSpec {
        PluginSpec {
            id: "docs".into(),
            content_path: PathBuf::from("docs"),
            route_base_path: normalize_route_base_path(prefix),
            sidebar_path: None,
            include: PatternList::default(),
            exclude: PatternList::default(),
        }
    }

    #[test]
    fn route_base_path_is_normalised() {
        assert_eq!(normalize_route_base_path("/"), "/");
        assert_eq!(normalize_route_base_path(""), "/");
        assert_eq!(normalize_route_base_path("tutorials"), "/tutorials");
        assert_eq!(normalize_route_base_path("/reference/"), "/reference");
    }

    #[test]
    fn index_docs_map_to_directory_routes() {
        let root = spec("/");
        assert_eq!(root.route_for("index"), "/");
        assert_eq!(root.route_for("community"), "/community");

        let tutorials = spec("tutorials");
        assert_eq!(tutorials.route_for("index"), "/tutorials/");
        assert_eq!(
            tutorials.route_for("getting-started/index"),
            "/tutorials/getting-started/"
        );
        assert_eq!(
            tutorials.route_for("getting-started/step-01"),
            "/tutorials/getting-started/step-01"
        );
    }

    #[test]
    fn plugin_kind_parses_known_names_only() {
        assert_eq!("content-docs".parse::<PluginKind>(), Ok(PluginKind::ContentDocs));
        assert_eq!("client-redirects".parse::<PluginKind>(), Ok(PluginKind::ClientRedirects));
        assert!("content-blog".parse::<PluginKind>().is_err());
    }
}
