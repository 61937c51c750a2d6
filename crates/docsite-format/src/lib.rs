//! Output formatters for docsite commands.
//!
//! Operations produce plain data ([`CheckReport`], validated sidebars); this
//! crate turns it into human-readable text or JSON.

use std::fmt::{self, Write as _};

use docsite_sidebar::{CategoryLink, SidebarNode, ValidatedSidebars};
use serde::Serialize;

/// Severity attached to a finding.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        f.write_str(label)
    }
}

/// Check that produced a finding.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingRule {
    Sidebar,
    Redirects,
    BrokenRedirectTarget,
    BrokenSidebarLink,
    BrokenNavbarDoc,
    BrokenFooterLink,
    MissingDocSource,
    DuplicateRoute,
}

impl FindingRule {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingRule::Sidebar => "sidebar",
            FindingRule::Redirects => "redirects",
            FindingRule::BrokenRedirectTarget => "broken-redirect-target",
            FindingRule::BrokenSidebarLink => "broken-sidebar-link",
            FindingRule::BrokenNavbarDoc => "broken-navbar-doc",
            FindingRule::BrokenFooterLink => "broken-footer-link",
            FindingRule::MissingDocSource => "missing-doc-source",
            FindingRule::DuplicateRoute => "duplicate-route",
        }
    }
}

impl fmt::Display for FindingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported problem.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Finding {
    pub rule: FindingRule,
    pub severity: Severity,
    /// What the finding is about, e.g. `plugin 'tutorials'` or `redirects`.
    pub subject: String,
    pub message: String,
}

/// Aggregated result of a site check.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
    pub plugins_checked: usize,
    pub sidebars_checked: usize,
    pub redirects_checked: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CheckReport {
    /// Append a finding and keep the counters in sync.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.findings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Output format for `check`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CheckFormat {
    #[default]
    Plain,
    Json,
}

/// Output format for `sidebar`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SidebarFormat {
    #[default]
    Plain,
    Json,
}

pub fn render_check(report: &CheckReport, format: CheckFormat) -> Result<String, serde_json::Error> {
    match format {
        CheckFormat::Plain => Ok(render_check_plain(report)),
        CheckFormat::Json => serde_json::to_string_pretty(report),
    }
}

fn render_check_plain(report: &CheckReport) -> String {
    let mut out = String::new();
    for finding in &report.findings {
        let _ = writeln!(
            out,
            "{}[{}] {}: {}",
            finding.severity, finding.rule, finding.subject, finding.message
        );
    }
    let _ = write!(
        out,
        "checked {} plugin(s), {} sidebar(s), {} redirect(s): {} error(s), {} warning(s)",
        report.plugins_checked,
        report.sidebars_checked,
        report.redirects_checked,
        report.error_count,
        report.warning_count
    );
    out
}

pub fn render_sidebars(
    plugin_id: &str,
    sidebars: &ValidatedSidebars,
    format: SidebarFormat,
) -> Result<String, serde_json::Error> {
    match format {
        SidebarFormat::Plain => Ok(render_sidebars_plain(plugin_id, sidebars)),
        SidebarFormat::Json => {
            let trees: Vec<_> = sidebars.iter().collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "plugin": plugin_id,
                "sidebars": trees,
            }))
        }
    }
}

fn render_sidebars_plain(plugin_id: &str, sidebars: &ValidatedSidebars) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "plugin '{plugin_id}'");
    for tree in sidebars.iter() {
        let _ = writeln!(out, "{}", tree.name);
        tree.walk(&mut |node, depth| {
            let indent = "  ".repeat(depth + 1);
            let line = match node {
                SidebarNode::Doc(doc) => match &doc.label {
                    Some(label) => format!("- {} ({label})", doc.id),
                    None => format!("- {}", doc.id),
                },
                SidebarNode::Link(link) => format!("- {} -> {}", link.label, link.href),
                SidebarNode::Category(category) => match &category.link {
                    Some(CategoryLink::Doc { id }) => format!("+ {} [{id}]", category.label),
                    Some(CategoryLink::GeneratedIndex { .. }) => {
                        format!("+ {} [generated index]", category.label)
                    }
                    None => format!("+ {}", category.label),
                },
            };
            let _ = writeln!(out, "{indent}{line}");
        });
    }
    out
}
