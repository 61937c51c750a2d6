//! Site configuration primitives and loader for the docsite toolkit.
//!
//! The loader resolves configuration using a precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Each layer is parsed from TOML into a partial record, merged field by field,
//! and finally normalised into a typed [`SiteConfig`]. Validation problems are
//! collected across the whole document and reported together so a single run
//! surfaces every offending field.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

mod plugins;
mod theme;

pub use plugins::{PluginKind, PluginSpec, RedirectRule, ThemeOptions, DEFAULT_PLUGIN_ID};
pub use theme::{
    FooterItem, FooterLinkGroup, FooterSettings, Logo, NavbarItem, NavbarPosition,
    NavbarSettings, ThemeConfig,
};

use plugins::RawPlugin;
use theme::RawThemeConfig;

const CONFIG_FILE_NAME: &str = "docsite.toml";

/// Complete site configuration resolved from defaults and on-disk layers.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: Option<String>,
    pub url: Option<String>,
    pub base_url: String,
    pub favicon: Option<String>,
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
    pub on_broken_links: BrokenLinkPolicy,
    pub on_broken_markdown_links: BrokenLinkPolicy,
    /// Docs plugins in declaration order.
    pub plugins: Vec<PluginSpec>,
    pub theme: ThemeOptions,
    pub redirects: Vec<RedirectRule>,
    pub theme_config: ThemeConfig,
    pub sources: ConfigSources,
}

impl SiteConfig {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::default(working_dir.clone());
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_root = find_git_root(&working_dir);
        let git_config_path = git_root.as_ref().map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        debug!(
            plugins = resolved.plugins.len(),
            redirects = resolved.redirects.len(),
            layers = source_layers.len(),
            "site configuration resolved"
        );
        Ok(resolved.into_config(ConfigSources {
            working_directory: working_dir,
            layers: source_layers,
        }))
    }

    /// Builds configuration from an in-memory TOML document layered over the
    /// built-in defaults. Relative paths resolve against `base_dir`.
    pub fn from_toml_str(contents: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_dir = base_dir.into();
        let default_source = ConfigSource::default(base_dir.clone());
        let inline_source = ConfigSource {
            kind: ConfigSourceKind::Inline,
            path: None,
            base_dir: base_dir.clone(),
        };

        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));
        let layer = parse_layer(contents, inline_source.clone()).map_err(|err| match err {
            LayerParseError::Parse { source } => ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            },
        })?;
        merged.merge(layer);

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(resolved.into_config(ConfigSources {
            working_directory: base_dir,
            layers: vec![default_source, inline_source],
        }))
    }

    /// Returns the docs plugin registered under `id`.
    pub fn plugin(&self, id: &str) -> Option<&PluginSpec> {
        self.plugins.iter().find(|plugin| plugin.id == id)
    }
}

/// Policy applied to soft link problems (dangling redirect targets, broken
/// navigation links, missing doc sources).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BrokenLinkPolicy {
    Ignore,
    Log,
    Warn,
    Throw,
}

impl BrokenLinkPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            BrokenLinkPolicy::Ignore => "ignore",
            BrokenLinkPolicy::Log => "log",
            BrokenLinkPolicy::Warn => "warn",
            BrokenLinkPolicy::Throw => "throw",
        }
    }
}

impl fmt::Display for BrokenLinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BrokenLinkPolicy {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ignore" => Ok(BrokenLinkPolicy::Ignore),
            "log" => Ok(BrokenLinkPolicy::Log),
            "warn" => Ok(BrokenLinkPolicy::Warn),
            "throw" => Ok(BrokenLinkPolicy::Throw),
            _ => Err(()),
        }
    }
}

/// Glob pattern plus compiled matcher.
#[derive(Clone, Debug)]
pub struct Pattern {
    original: String,
    matcher: GlobMatcher,
}

impl Pattern {
    fn new(source: ConfigSource, value: String) -> Result<Self, ConfigValidationError> {
        match Glob::new(&value) {
            Ok(glob) => Ok(Pattern {
                matcher: glob.compile_matcher(),
                original: value,
            }),
            Err(err) => Err(ConfigValidationError::new(
                ValidationKind::InvalidValue,
                Some(source),
                format!("invalid glob pattern '{value}': {err}"),
            )),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

/// Ordered list of glob patterns.
#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    fn new(patterns: Vec<Pattern>) -> Self {
        PatternList { patterns }
    }

    /// True when any pattern matches `path`.
    pub fn is_match(&self, path: &Path) -> bool {
        self.first_match(path).is_some()
    }

    /// First pattern, in declaration order, that matches `path`.
    pub fn first_match(&self, path: &Path) -> Option<&Pattern> {
        self.patterns.iter().find(|pattern| pattern.is_match(path))
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override/inline).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

impl ConfigSource {
    fn default(base_dir: PathBuf) -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
            base_dir,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ConfigSource {
            kind,
            path: Some(path),
            base_dir,
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
    Inline,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
            ConfigSourceKind::Inline => "inline config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    debug!(path = %path.display(), kind = %source.kind, "reading config layer");
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    parse_layer(&contents, source).map_err(|err| match err {
        LayerParseError::Parse { source } => ConfigError::Parse {
            path: path.into(),
            source,
        },
    })
}

fn parse_layer(contents: &str, source: ConfigSource) -> Result<PartialConfig, LayerParseError> {
    let raw: RawConfig =
        toml::from_str(contents).map_err(|source| LayerParseError::Parse { source })?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    PartialConfig {
        on_broken_links: Some(Located::new("warn".into(), source.clone())),
        on_broken_markdown_links: Some(Located::new("warn".into(), source.clone())),
        plugins: Some(Located::new(Vec::new(), source)),
        ..PartialConfig::default()
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Debug)]
enum LayerParseError {
    Parse { source: toml::de::Error },
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    title: Option<Located<String>>,
    tagline: Option<Located<String>>,
    url: Option<Located<String>>,
    base_url: Option<Located<String>>,
    favicon: Option<Located<String>>,
    organization_name: Option<Located<String>>,
    project_name: Option<Located<String>>,
    on_broken_links: Option<Located<String>>,
    on_broken_markdown_links: Option<Located<String>>,
    plugins: Option<Located<Vec<RawPlugin>>>,
    theme_config: Option<Located<RawThemeConfig>>,
}

fn replace<T>(slot: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *slot = other;
    }
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        replace(&mut self.title, other.title);
        replace(&mut self.tagline, other.tagline);
        replace(&mut self.url, other.url);
        replace(&mut self.base_url, other.base_url);
        replace(&mut self.favicon, other.favicon);
        replace(&mut self.organization_name, other.organization_name);
        replace(&mut self.project_name, other.project_name);
        replace(&mut self.on_broken_links, other.on_broken_links);
        replace(
            &mut self.on_broken_markdown_links,
            other.on_broken_markdown_links,
        );
        replace(&mut self.plugins, other.plugins);
        replace(&mut self.theme_config, other.theme_config);
    }

    fn finalize(self) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();

        let title = required_field(self.title, "title", &mut errors);
        let base_url = required_field(self.base_url, "base_url", &mut errors);
        if let Some(located) = &base_url {
            if !located.value.starts_with('/') || !located.value.ends_with('/') {
                errors.push(
                    ConfigValidationError::new(
                        ValidationKind::InvalidValue,
                        Some(located.source.clone()),
                        format!(
                            "base_url must start and end with '/' (received '{}')",
                            located.value
                        ),
                    )
                    .with_context("base_url"),
                );
            }
        }

        let on_broken_links = parse_policy(self.on_broken_links, "on_broken_links", &mut errors);
        let on_broken_markdown_links = parse_policy(
            self.on_broken_markdown_links,
            "on_broken_markdown_links",
            &mut errors,
        );

        let registry = plugins::PluginRegistry::resolve(self.plugins, &mut errors);
        let theme_config = theme::finalize(self.theme_config, &registry.plugins, &mut errors);

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(ResolvedConfig {
            title: title.map(|located| located.value).unwrap_or_default(),
            tagline: self.tagline.map(|located| located.value),
            url: self.url.map(|located| located.value),
            base_url: base_url.map(|located| located.value).unwrap_or_default(),
            favicon: self.favicon.map(|located| located.value),
            organization_name: self.organization_name.map(|located| located.value),
            project_name: self.project_name.map(|located| located.value),
            on_broken_links,
            on_broken_markdown_links,
            plugins: registry.plugins,
            theme: registry.theme,
            redirects: registry.redirects,
            theme_config,
        })
    }
}

fn required_field(
    located: Option<Located<String>>,
    field: &'static str,
    errors: &mut Vec<ConfigValidationError>,
) -> Option<Located<String>> {
    match located {
        Some(located) if !located.value.trim().is_empty() => Some(located),
        Some(located) => {
            errors.push(ConfigValidationError::new(
                ValidationKind::MissingField { field },
                Some(located.source),
                format!("{field} cannot be empty"),
            ));
            None
        }
        None => {
            errors.push(ConfigValidationError::new(
                ValidationKind::MissingField { field },
                None,
                format!("missing required field '{field}'"),
            ));
            None
        }
    }
}

fn parse_policy(
    located: Option<Located<String>>,
    context: &'static str,
    errors: &mut Vec<ConfigValidationError>,
) -> BrokenLinkPolicy {
    let Some(located) = located else {
        return BrokenLinkPolicy::Warn;
    };
    match located.value.parse::<BrokenLinkPolicy>() {
        Ok(policy) => policy,
        Err(_) => {
            errors.push(
                ConfigValidationError::new(
                    ValidationKind::InvalidValue,
                    Some(located.source),
                    format!(
                        "unknown broken-link policy '{}' (expected ignore, log, warn or throw)",
                        located.value
                    ),
                )
                .with_context(context),
            );
            BrokenLinkPolicy::Warn
        }
    }
}

#[derive(Clone, Debug)]
struct ResolvedConfig {
    title: String,
    tagline: Option<String>,
    url: Option<String>,
    base_url: String,
    favicon: Option<String>,
    organization_name: Option<String>,
    project_name: Option<String>,
    on_broken_links: BrokenLinkPolicy,
    on_broken_markdown_links: BrokenLinkPolicy,
    plugins: Vec<PluginSpec>,
    theme: ThemeOptions,
    redirects: Vec<RedirectRule>,
    theme_config: ThemeConfig,
}

impl ResolvedConfig {
    fn into_config(self, sources: ConfigSources) -> SiteConfig {
        SiteConfig {
            title: self.title,
            tagline: self.tagline,
            url: self.url,
            base_url: self.base_url,
            favicon: self.favicon,
            organization_name: self.organization_name,
            project_name: self.project_name,
            on_broken_links: self.on_broken_links,
            on_broken_markdown_links: self.on_broken_markdown_links,
            plugins: self.plugins,
            theme: self.theme,
            redirects: self.redirects,
            theme_config: self.theme_config,
            sources,
        }
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

fn resolve_path(path: &Path, source: &ConfigSource) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        source.base_dir.join(path)
    }
}

fn compile_patterns(
    values: Vec<String>,
    source: &ConfigSource,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> PatternList {
    let mut patterns = Vec::new();
    for value in values {
        match Pattern::new(source.clone(), value) {
            Ok(compiled) => patterns.push(compiled),
            Err(err) => errors.push(err.with_context(context)),
        }
    }
    PatternList::new(patterns)
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }

    /// True when any collected failure has the given kind.
    pub fn contains(&self, kind: &ValidationKind) -> bool {
        self.0.iter().any(|err| &err.kind == kind)
    }
}

/// Classification of a validation failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationKind {
    MissingField { field: &'static str },
    DuplicatePluginId { id: String },
    DuplicatePlugin { kind: PluginKind },
    UnknownPluginKind { kind: String },
    UnknownPluginReference { id: String },
    InvalidValue,
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub kind: ValidationKind,
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(kind: ValidationKind, source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            kind,
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    favicon: Option<String>,
    #[serde(default)]
    organization_name: Option<String>,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    on_broken_links: Option<String>,
    #[serde(default)]
    on_broken_markdown_links: Option<String>,
    #[serde(default)]
    plugins: Option<Vec<RawPlugin>>,
    #[serde(default)]
    theme_config: Option<RawThemeConfig>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        let locate = |value: Option<String>| value.map(|value| Located::new(value, source.clone()));
        PartialConfig {
            title: locate(self.title),
            tagline: locate(self.tagline),
            url: locate(self.url),
            base_url: locate(self.base_url),
            favicon: locate(self.favicon),
            organization_name: locate(self.organization_name),
            project_name: locate(self.project_name),
            on_broken_links: locate(self.on_broken_links),
            on_broken_markdown_links: locate(self.on_broken_markdown_links),
            plugins: self
                .plugins
                .map(|plugins| Located::new(plugins, source.clone())),
            theme_config: self
                .theme_config
                .map(|theme| Located::new(theme, source.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(contents: &str) -> Result<SiteConfig, ConfigError> {
        SiteConfig::from_toml_str(contents, "/site")
    }

    #[test]
    fn policy_round_trips_through_display() {
        for policy in [
            BrokenLinkPolicy::Ignore,
            BrokenLinkPolicy::Log,
            BrokenLinkPolicy::Warn,
            BrokenLinkPolicy::Throw,
        ] {
            assert_eq!(policy.to_string().parse::<BrokenLinkPolicy>(), Ok(policy));
        }
        assert!("fail".parse::<BrokenLinkPolicy>().is_err());
    }

    #[test]
    fn defaults_keep_broken_links_permissive() {
        let config = inline("title = \"Docs\"\nbase_url = \"/\"\n").expect("load inline");
        assert_eq!(config.on_broken_links, BrokenLinkPolicy::Warn);
        assert_eq!(config.on_broken_markdown_links, BrokenLinkPolicy::Warn);
        assert!(config.plugins.is_empty());
        assert!(config.redirects.is_empty());
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let err = inline("title = \"  \"\nbase_url = \"/\"\n").expect_err("empty title");
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.contains(&ValidationKind::MissingField { field: "title" }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn base_url_must_be_slash_delimited() {
        let err = inline("title = \"Docs\"\nbase_url = \"docs\"\n").expect_err("bad base url");
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.to_string().contains("base_url must start and end with '/'"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = inline("title = \"Docs\"\nbase_url = \"/\"\non_broken_links = \"explode\"\n")
            .expect_err("bad policy");
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors
            .to_string()
            .contains("on_broken_links: unknown broken-link policy 'explode'"));
    }

    #[test]
    fn syntax_errors_surface_as_parse_errors() {
        let err = inline("title = ").expect_err("syntax error");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
