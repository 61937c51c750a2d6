use std::path::PathBuf;

use docsite_config::{BrokenLinkPolicy, FooterItem, NavbarItem, PluginSpec, SiteConfig};
use docsite_format::{CheckReport, Finding, FindingRule, Severity};
use docsite_sidebar::ValidatedSidebars;
use strsim::normalized_levenshtein;
use tracing::{debug, info, warn};

use crate::paths::{is_external, join_base, strip_suffixes};
use crate::redirects::{RedirectIndex, RedirectTable};
use crate::routes::RouteTable;
use crate::Operations;

const SOURCE_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Execute every site check and collect the findings.
pub(crate) fn run(ops: &Operations) -> CheckReport {
    let config = ops.config();
    let mut checker = LinkChecker {
        config,
        report: CheckReport {
            plugins_checked: config.plugins.len(),
            redirects_checked: config.redirects.len(),
            ..CheckReport::default()
        },
        routes: RouteTable::default(),
        redirects: None,
        loaded: Vec::new(),
    };

    for plugin in &config.plugins {
        match ops.load_sidebars(plugin) {
            Ok(sidebars) => {
                checker.report.sidebars_checked += sidebars.len();
                let collisions = checker
                    .routes
                    .add_plugin(&config.base_url, plugin, &sidebars);
                for collision in collisions {
                    checker.soft(
                        FindingRule::DuplicateRoute,
                        format!("plugin '{}'", collision.plugin_id),
                        format!(
                            "doc '{}' maps to route '{}', already served by doc '{}' of plugin '{}'",
                            collision.doc_id,
                            collision.path,
                            collision.existing.doc_id,
                            collision.existing.plugin_id
                        ),
                    );
                }
                checker.loaded.push((plugin, sidebars));
            }
            Err(err) => checker.error(
                FindingRule::Sidebar,
                format!("plugin '{}'", plugin.id),
                err.to_string(),
            ),
        }
    }

    match RedirectTable::build(&config.redirects) {
        Ok(index) => checker.redirects = Some(index),
        Err(err) => checker.error(FindingRule::Redirects, "redirects".into(), err.to_string()),
    }

    checker.check_redirect_targets();
    checker.check_sidebar_links();
    checker.check_navbar();
    checker.check_footer();
    checker.check_doc_sources();

    debug!(
        errors = checker.report.error_count,
        warnings = checker.report.warning_count,
        routes = checker.routes.len(),
        "site check finished"
    );
    checker.report
}

struct LinkChecker<'a> {
    config: &'a SiteConfig,
    report: CheckReport,
    routes: RouteTable,
    redirects: Option<RedirectIndex>,
    loaded: Vec<(&'a PluginSpec, ValidatedSidebars)>,
}

impl<'a> LinkChecker<'a> {
    fn check_redirect_targets(&mut self) {
        let Some(index) = &self.redirects else {
            return;
        };
        let mut broken = Vec::new();
        for rule in index.rules() {
            if is_external(&rule.to) || self.resolves(&rule.to) {
                continue;
            }
            let message = with_suggestion(
                format!("'{}' redirects to unknown route '{}'", rule.from, rule.to),
                self.routes.suggest(strip_suffixes(&rule.to)),
            );
            broken.push(message);
        }
        for message in broken {
            self.soft(FindingRule::BrokenRedirectTarget, "redirects".into(), message);
        }
    }

    fn check_sidebar_links(&mut self) {
        let mut broken = Vec::new();
        for (plugin, sidebars) in &self.loaded {
            for tree in sidebars.iter() {
                for link in tree.links() {
                    if is_external(&link.href) || self.resolves(&link.href) {
                        continue;
                    }
                    broken.push((
                        format!("sidebar '{}' of plugin '{}'", tree.name, plugin.id),
                        with_suggestion(
                            format!("link '{}' points to unknown route '{}'", link.label, link.href),
                            self.routes.suggest(strip_suffixes(&link.href)),
                        ),
                    ));
                }
            }
        }
        for (subject, message) in broken {
            self.soft(FindingRule::BrokenSidebarLink, subject, message);
        }
    }

    fn check_navbar(&mut self) {
        let Some(navbar) = &self.config.theme_config.navbar else {
            return;
        };
        let mut broken = Vec::new();
        for item in &navbar.items {
            let NavbarItem::Doc {
                docs_plugin_id,
                doc_id,
                label,
                ..
            } = item
            else {
                continue;
            };
            // Plugins whose sidebars failed to load already carry an error.
            let Some((_, sidebars)) = self
                .loaded
                .iter()
                .find(|(plugin, _)| &plugin.id == docs_plugin_id)
            else {
                continue;
            };
            if sidebars.contains_doc(doc_id) {
                continue;
            }
            let suggestion = closest(doc_id, sidebars.doc_ids());
            broken.push(with_suggestion(
                format!(
                    "item '{}' references doc '{doc_id}' which is not in the sidebars of plugin '{docs_plugin_id}'",
                    label.as_deref().unwrap_or(doc_id)
                ),
                suggestion,
            ));
        }
        for message in broken {
            self.soft(FindingRule::BrokenNavbarDoc, "navbar".into(), message);
        }
    }

    fn check_footer(&mut self) {
        let Some(footer) = &self.config.theme_config.footer else {
            return;
        };
        let mut broken = Vec::new();
        for group in &footer.links {
            for item in &group.items {
                let FooterItem::To { label, to } = item else {
                    continue;
                };
                if is_external(to) || self.resolves(to) {
                    continue;
                }
                broken.push(with_suggestion(
                    format!("link '{label}' points to unknown route '{to}'"),
                    self.routes.suggest(strip_suffixes(to)),
                ));
            }
        }
        for message in broken {
            self.soft(FindingRule::BrokenFooterLink, "footer".into(), message);
        }
    }

    fn check_doc_sources(&mut self) {
        let mut missing = Vec::new();
        for (plugin, sidebars) in &self.loaded {
            for doc_id in sidebars.doc_ids() {
                let message = match find_source(plugin, doc_id) {
                    SourceLookup::Found => continue,
                    SourceLookup::Excluded { file, pattern } => format!(
                        "doc '{doc_id}' source {file} is excluded by pattern '{pattern}'"
                    ),
                    SourceLookup::Missing => format!(
                        "doc '{doc_id}' has no source file under {}",
                        plugin.content_path.display()
                    ),
                };
                missing.push((format!("plugin '{}'", plugin.id), message));
            }
        }
        let policy = self.config.on_broken_markdown_links;
        for (subject, message) in missing {
            self.apply(policy, FindingRule::MissingDocSource, subject, message);
        }
    }

    /// True when an internal link lands on a doc route or a redirect source.
    fn resolves(&self, link: &str) -> bool {
        let path = strip_suffixes(link);
        if self.routes.contains(path) || self.routes.contains(&join_base(&self.config.base_url, path))
        {
            return true;
        }
        self.redirects
            .as_ref()
            .is_some_and(|index| index.lookup(path).is_some())
    }

    fn error(&mut self, rule: FindingRule, subject: String, message: String) {
        self.report.push(Finding {
            rule,
            severity: Severity::Error,
            subject,
            message,
        });
    }

    fn soft(&mut self, rule: FindingRule, subject: String, message: String) {
        let policy = self.config.on_broken_links;
        self.apply(policy, rule, subject, message);
    }

    fn apply(&mut self, policy: BrokenLinkPolicy, rule: FindingRule, subject: String, message: String) {
        match policy {
            BrokenLinkPolicy::Ignore => {
                debug!(rule = %rule, subject = %subject, "ignored: {message}");
            }
            BrokenLinkPolicy::Log => {
                info!(rule = %rule, subject = %subject, "{message}");
            }
            BrokenLinkPolicy::Warn => {
                warn!(rule = %rule, subject = %subject, "{message}");
                self.report.push(Finding {
                    rule,
                    severity: Severity::Warning,
                    subject,
                    message,
                });
            }
            BrokenLinkPolicy::Throw => self.error(rule, subject, message),
        }
    }
}

enum SourceLookup<'p> {
    Found,
    /// A file exists but an exclude pattern hides it.
    Excluded { file: String, pattern: &'p str },
    Missing,
}

fn find_source<'p>(plugin: &'p PluginSpec, doc_id: &str) -> SourceLookup<'p> {
    let mut excluded = None;
    for extension in SOURCE_EXTENSIONS {
        let relative = PathBuf::from(format!("{doc_id}.{extension}"));
        if !plugin.content_path.join(&relative).is_file() || !plugin.include.is_match(&relative) {
            continue;
        }
        match plugin.exclude.first_match(&relative) {
            None => return SourceLookup::Found,
            Some(pattern) => {
                excluded.get_or_insert(SourceLookup::Excluded {
                    file: relative.display().to_string(),
                    pattern: pattern.original(),
                });
            }
        }
    }
    excluded.unwrap_or(SourceLookup::Missing)
}

fn closest(wanted: &str, candidates: Vec<&str>) -> Option<String> {
    candidates
        .into_iter()
        .map(|candidate| (candidate, normalized_levenshtein(wanted, candidate)))
        .filter(|(_, score)| *score > 0.6)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(candidate, _)| candidate.to_string())
}

fn with_suggestion(mut message: String, suggestion: Option<impl AsRef<str>>) -> String {
    if let Some(suggestion) = suggestion {
        message.push_str(&format!(". Did you mean '{}'?", suggestion.as_ref()));
    }
    message
}
