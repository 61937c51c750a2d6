//! Core orchestration layer for docsite.

use docsite_config::{ConfigError, LoadOptions, SiteConfig};
use docsite_ops::Operations;

/// Entry point for higher-level consumers (CLI, build tooling).
pub struct DocSite {
    ops: Operations,
}

impl DocSite {
    /// Bootstrap the engine from an already resolved configuration.
    pub fn bootstrap(config: SiteConfig) -> Self {
        Self {
            ops: Operations::new(config),
        }
    }

    /// Load configuration with `options` and bootstrap from it.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        SiteConfig::load(options).map(Self::bootstrap)
    }

    /// Access the operation bundle.
    pub fn operations(&self) -> &Operations {
        &self.ops
    }

    pub fn config(&self) -> &SiteConfig {
        self.ops.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsite_test_support::SampleSite;

    #[test]
    fn loads_sample_site() {
        let site = SampleSite::new();
        let docsite = DocSite::load(LoadOptions::default().with_working_dir(site.path()))
            .expect("load site");
        assert_eq!(docsite.config().title, "ChiselStrike documentation");
        let ids: Vec<&str> = docsite
            .config()
            .plugins
            .iter()
            .map(|plugin| plugin.id.as_str())
            .collect();
        assert_eq!(ids, ["home", "tutorials", "examples", "reference"]);
        assert_eq!(docsite.operations().routes().expect("routes").len(), 17);
    }
}
