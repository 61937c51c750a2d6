//! High-level operations shared by docsite commands.

mod check;
mod paths;
mod redirects;
mod routes;

use docsite_config::{PluginSpec, SiteConfig};
use docsite_format::{render_check, render_sidebars, CheckFormat, CheckReport, SidebarFormat};
use docsite_sidebar::{resolve, SidebarDeclaration, SidebarError, ValidatedSidebars};
use strsim::normalized_levenshtein;
use thiserror::Error;
use tracing::debug;

pub use paths::is_external;
pub use redirects::{RedirectEntry, RedirectError, RedirectIndex, RedirectTable};
pub use routes::{Route, RouteCollision, RouteTable};

/// Errors surfaced by operations that cannot be reported as findings.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("unknown docs plugin '{id}'{}", did_you_mean(.suggestion))]
    UnknownPlugin {
        id: String,
        suggestion: Option<String>,
    },
    #[error("sidebars of plugin '{plugin_id}': {source}")]
    Sidebar {
        plugin_id: String,
        #[source]
        source: SidebarError,
    },
    #[error(transparent)]
    Redirect(#[from] RedirectError),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(candidate) => format!(" (did you mean '{candidate}'?)"),
        None => String::new(),
    }
}

/// Options for [`Operations::check`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckOptions {
    pub format: CheckFormat,
}

/// Result of a site check: the report, its rendering, and the exit code.
#[derive(Debug)]
pub struct CheckOutcome {
    pub report: CheckReport,
    pub rendered: String,
    pub exit_code: i32,
}

/// Options for [`Operations::sidebars`].
#[derive(Clone, Debug)]
pub struct SidebarOptions {
    pub plugin_id: String,
    pub format: SidebarFormat,
}

#[derive(Debug)]
pub struct SidebarOutcome {
    pub sidebars: ValidatedSidebars,
    pub rendered: String,
}

/// Operation bundle over one immutable site configuration.
pub struct Operations {
    config: SiteConfig,
}

impl Operations {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Load and validate the sidebar declaration of `plugin`. Plugins without
    /// a declaration file have no sidebars.
    pub fn load_sidebars(&self, plugin: &PluginSpec) -> Result<ValidatedSidebars, SidebarError> {
        let Some(path) = &plugin.sidebar_path else {
            debug!(plugin = %plugin.id, "plugin declares no sidebars");
            return Ok(ValidatedSidebars::default());
        };
        let declaration = SidebarDeclaration::load_file(path)?;
        resolve(&declaration)
    }

    /// Resolve and render the sidebars of one docs plugin.
    pub fn sidebars(&self, options: SidebarOptions) -> Result<SidebarOutcome, OperationError> {
        let plugin = self.find_plugin(&options.plugin_id)?;
        let sidebars = self
            .load_sidebars(plugin)
            .map_err(|source| OperationError::Sidebar {
                plugin_id: plugin.id.clone(),
                source,
            })?;
        let rendered = render_sidebars(&plugin.id, &sidebars, options.format)?;
        Ok(SidebarOutcome { sidebars, rendered })
    }

    /// Every route produced by the docs plugins. Fails on the first plugin
    /// whose sidebars do not validate.
    pub fn routes(&self) -> Result<RouteTable, OperationError> {
        let mut table = RouteTable::default();
        for plugin in &self.config.plugins {
            let sidebars = self
                .load_sidebars(plugin)
                .map_err(|source| OperationError::Sidebar {
                    plugin_id: plugin.id.clone(),
                    source,
                })?;
            for collision in table.add_plugin(&self.config.base_url, plugin, &sidebars) {
                debug!(
                    path = %collision.path,
                    plugin = %collision.plugin_id,
                    doc = %collision.doc_id,
                    "route already served, skipping"
                );
            }
        }
        Ok(table)
    }

    pub fn redirects(&self) -> Result<RedirectIndex, RedirectError> {
        RedirectTable::build(&self.config.redirects)
    }

    /// Run every validation. Hard failures and soft findings both end up in
    /// the report; the exit code is 1 when it holds any error.
    pub fn check(&self, options: CheckOptions) -> Result<CheckOutcome, OperationError> {
        let report = check::run(self);
        let rendered = render_check(&report, options.format)?;
        let exit_code = if report.has_errors() { 1 } else { 0 };
        Ok(CheckOutcome {
            report,
            rendered,
            exit_code,
        })
    }

    fn find_plugin(&self, id: &str) -> Result<&PluginSpec, OperationError> {
        if let Some(plugin) = self.config.plugin(id) {
            return Ok(plugin);
        }
        let suggestion = self
            .config
            .plugins
            .iter()
            .map(|plugin| (plugin.id.as_str(), normalized_levenshtein(id, &plugin.id)))
            .filter(|(_, score)| *score > 0.6)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(candidate, _)| candidate.to_string());
        Err(OperationError::UnknownPlugin {
            id: id.to_string(),
            suggestion,
        })
    }
}
