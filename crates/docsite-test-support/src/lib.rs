//! Shared test harness utilities for docsite crates.
//!
//! [`SampleSite`] writes a four-section documentation site (home, tutorials,
//! examples, reference) into a temporary directory. It checks clean as
//! written; tests break it on purpose through [`SampleSite::write`].

use std::fs;
use std::path::Path;

use docsite_config::{LoadOptions, SiteConfig};
use tempfile::TempDir;

pub const SITE_CONFIG: &str = r#"
title = "ChiselStrike documentation"
tagline = "Automated Serverless Backends"
url = "https://docs.chiselstrike.com"
base_url = "/"
on_broken_links = "warn"
on_broken_markdown_links = "warn"
favicon = "img/favicon.ico"
organization_name = "ChiselStrike"
project_name = "chiselstrike"

[[plugins]]
kind = "content-docs"
id = "home"
path = "home"
route_base_path = "/"
sidebar_path = "home/sidebars.toml"

[[plugins]]
kind = "content-docs"
id = "tutorials"
path = "tutorials"
route_base_path = "tutorials"
sidebar_path = "tutorials/sidebars.toml"

[[plugins]]
kind = "content-docs"
id = "examples"
path = "examples"
route_base_path = "examples"
sidebar_path = "examples/sidebars.json"

[[plugins]]
kind = "content-docs"
id = "reference"
path = "reference"
route_base_path = "reference"
sidebar_path = "reference/sidebars.toml"

[[plugins]]
kind = "theme-classic"
custom_css = ["src/css/custom.css"]

[[plugins]]
kind = "client-redirects"
redirects = [{ from = "/Intro/first", to = "/tutorials/getting-started/" }]

[theme_config.navbar]
title = "ChiselStrike"
logo = { alt = "ChiselStrike documentation", src = "img/logo.svg" }
items = [
    { type = "doc", docs_plugin_id = "home", doc_id = "index", label = "Home", position = "left" },
    { type = "doc", docs_plugin_id = "tutorials", doc_id = "index", label = "Tutorials", position = "left" },
    { type = "doc", docs_plugin_id = "examples", doc_id = "index", label = "Examples", position = "left" },
    { type = "doc", docs_plugin_id = "reference", doc_id = "index", label = "Reference", position = "left" },
    { href = "https://chiselstrike.com", label = "Website", position = "right" },
    { href = "https://github.com/chiselstrike", label = "GitHub", position = "right" },
]

[theme_config.footer]
style = "dark"
copyright = "Copyright ChiselStrike, Inc."

[[theme_config.footer.links]]
title = "Links"
items = [
    { label = "Website", to = "https://chiselstrike.com" },
    { label = "Documentation", to = "/" },
]

[[theme_config.footer.links]]
title = "Community"
items = [
    { label = "Discord", href = "https://discord.gg/GHNN9CNAZe" },
    { label = "LinkedIn", href = "https://www.linkedin.com/company/chiselstrike/" },
]

[theme_config.prism]
theme = "github"
dark_theme = "dracula"
"#;

pub const HOME_SIDEBARS: &str = r#"
aboutSidebar = [
    { type = "doc", label = "Welcome", id = "index" },
    { type = "link", label = "Tutorials", href = "/tutorials/" },
    { type = "link", label = "Examples", href = "/examples/" },
    { type = "link", label = "Reference", href = "/reference/" },
    "ongoing-work",
    "community",
]
"#;

pub const TUTORIALS_SIDEBARS: &str = r#"
tutorialsSidebar = [
    { type = "doc", label = "Tutorials", id = "index" },
    { type = "category", label = "Getting started", link = { type = "doc", id = "getting-started/index" }, items = [
        "getting-started/step-01",
        "getting-started/step-02",
        "getting-started/step-03",
        "getting-started/next-steps",
    ] },
]
"#;

pub const EXAMPLES_SIDEBARS: &str = r#"{
    "examplesSidebar": [
        {"type": "doc", "id": "index", "label": "Introduction"},
        {"type": "doc", "id": "ex-nextjs"},
        {"type": "doc", "id": "ex-gatsby"}
    ]
}"#;

pub const REFERENCE_SIDEBARS: &str = r#"
referenceSidebar = [
    { type = "doc", id = "index", label = "Introduction" },
    "endpoints",
    "data-access",
    "cursors",
    "secrets",
]
"#;

const DOC_SOURCES: &[&str] = &[
    "home/index.md",
    "home/ongoing-work.md",
    "home/community.md",
    "tutorials/index.md",
    "tutorials/getting-started/index.md",
    "tutorials/getting-started/step-01.md",
    "tutorials/getting-started/step-02.md",
    "tutorials/getting-started/step-03.mdx",
    "tutorials/getting-started/next-steps.md",
    "examples/index.md",
    "examples/ex-nextjs.md",
    "examples/ex-gatsby.md",
    "reference/index.md",
    "reference/endpoints.md",
    "reference/data-access.md",
    "reference/cursors.md",
    "reference/secrets.md",
];

/// Sample documentation site rooted in a temporary directory.
pub struct SampleSite {
    dir: TempDir,
}

impl SampleSite {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path();
        write_file(root, "docsite.toml", SITE_CONFIG);
        write_file(root, "home/sidebars.toml", HOME_SIDEBARS);
        write_file(root, "tutorials/sidebars.toml", TUTORIALS_SIDEBARS);
        write_file(root, "examples/sidebars.json", EXAMPLES_SIDEBARS);
        write_file(root, "reference/sidebars.toml", REFERENCE_SIDEBARS);
        write_file(root, "src/css/custom.css", ":root {}\n");
        for source in DOC_SOURCES {
            write_file(root, source, "# Page\n");
        }
        SampleSite { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Overwrite (or create) a file inside the site.
    pub fn write(&self, relative: &str, contents: &str) {
        write_file(self.path(), relative, contents);
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.path().join(relative)).expect("remove file");
    }

    /// Replace the first occurrence of `from` in the site configuration.
    pub fn edit_config(&self, from: &str, to: &str) {
        let path = self.path().join("docsite.toml");
        let contents = fs::read_to_string(&path).expect("read config");
        assert!(contents.contains(from), "config does not contain {from:?}");
        fs::write(&path, contents.replacen(from, to, 1)).expect("write config");
    }

    pub fn config(&self) -> SiteConfig {
        SiteConfig::load(LoadOptions::default().with_working_dir(self.path()))
            .expect("load sample config")
    }
}

impl Default for SampleSite {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(&path, contents).expect("write file");
}
