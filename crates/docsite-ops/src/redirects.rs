use std::collections::HashMap;

use docsite_config::RedirectRule;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::paths::{is_external, normalize_route};

/// Errors raised while building the redirect index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RedirectError {
    #[error("duplicate redirect source '{from}' (redirects to '{first}' and '{second}')")]
    DuplicateRedirectSource {
        from: String,
        first: String,
        second: String,
    },
    #[error("invalid redirect path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

/// Builder for [`RedirectIndex`].
pub struct RedirectTable;

impl RedirectTable {
    /// Validates `rules` and indexes them by source path. Sources are compared
    /// without their trailing slash, so `/a` and `/a/` collide.
    pub fn build(rules: &[RedirectRule]) -> Result<RedirectIndex, RedirectError> {
        let mut by_source: HashMap<String, usize> = HashMap::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            validate_source(&rule.from)?;
            validate_target(&rule.to)?;

            let key = normalize_route(&rule.from);
            if let Some(&existing) = by_source.get(&key) {
                return Err(RedirectError::DuplicateRedirectSource {
                    from: rule.from.clone(),
                    first: rules[existing].to.clone(),
                    second: rule.to.clone(),
                });
            }
            by_source.insert(key, index);
        }

        debug!(redirects = rules.len(), "redirect index built");
        Ok(RedirectIndex {
            rules: rules.to_vec(),
            by_source,
        })
    }
}

fn validate_source(from: &str) -> Result<(), RedirectError> {
    if !from.starts_with('/') {
        return Err(RedirectError::InvalidPath {
            path: from.to_string(),
            reason: "redirect sources must start with '/'",
        });
    }
    Ok(())
}

fn validate_target(to: &str) -> Result<(), RedirectError> {
    if to.starts_with('/') || is_external(to) {
        return Ok(());
    }
    Err(RedirectError::InvalidPath {
        path: to.to_string(),
        reason: "redirect targets must be absolute paths or external URLs",
    })
}

/// Validated redirect rules, in declaration order, with constant-time lookup.
#[derive(Clone, Debug, Default)]
pub struct RedirectIndex {
    rules: Vec<RedirectRule>,
    by_source: HashMap<String, usize>,
}

impl RedirectIndex {
    /// Target for `from`, ignoring a trailing slash on either side.
    pub fn lookup(&self, from: &str) -> Option<&str> {
        self.by_source
            .get(&normalize_route(from))
            .map(|&index| self.rules[index].to.as_str())
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn entries(&self) -> Vec<RedirectEntry<'_>> {
        self.rules
            .iter()
            .map(|rule| RedirectEntry {
                from: &rule.from,
                to: &rule.to,
            })
            .collect()
    }
}

/// Serializable view of one redirect.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RedirectEntry<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_source() {
        let err = RedirectTable::build(&[RedirectRule::new("Intro/first", "/tutorials/")])
            .expect_err("relative source");
        assert!(matches!(err, RedirectError::InvalidPath { ref path, .. } if path == "Intro/first"));
    }

    #[test]
    fn accepts_external_target() {
        let index = RedirectTable::build(&[RedirectRule::new("/discord", "https://discord.gg/x")])
            .expect("external target");
        assert_eq!(index.lookup("/discord"), Some("https://discord.gg/x"));
    }

    #[test]
    fn rejects_relative_target() {
        let err = RedirectTable::build(&[RedirectRule::new("/a", "b")]).expect_err("relative target");
        assert_eq!(
            err.to_string(),
            "invalid redirect path 'b': redirect targets must be absolute paths or external URLs"
        );
    }
}
