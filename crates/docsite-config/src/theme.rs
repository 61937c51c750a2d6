//! Theme metadata: navbar, footer and an opaque remainder.

use serde::Deserialize;

use crate::plugins::{PluginSpec, DEFAULT_PLUGIN_ID};
use crate::{ConfigSource, ConfigValidationError, Located, ValidationKind};

/// Theme metadata consumed by the site renderer.
#[derive(Clone, Debug, Default)]
pub struct ThemeConfig {
    pub navbar: Option<NavbarSettings>,
    pub footer: Option<FooterSettings>,
    /// Keys the loader does not interpret (code themes, analytics ids, ...).
    pub extra: toml::Table,
}

#[derive(Clone, Debug, Default)]
pub struct NavbarSettings {
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

#[derive(Clone, Debug)]
pub struct Logo {
    pub alt: Option<String>,
    pub src: String,
}

/// Navbar entry pointing either at a doc of a docs plugin or at a URL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NavbarItem {
    Doc {
        docs_plugin_id: String,
        doc_id: String,
        label: Option<String>,
        position: NavbarPosition,
    },
    Href {
        href: String,
        label: String,
        position: NavbarPosition,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavbarPosition {
    Left,
    Right,
}

#[derive(Clone, Debug, Default)]
pub struct FooterSettings {
    pub style: Option<String>,
    pub links: Vec<FooterLinkGroup>,
    pub copyright: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FooterLinkGroup {
    pub title: Option<String>,
    pub items: Vec<FooterItem>,
}

/// Footer entry: `to` targets an internal route, `href` any URL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FooterItem {
    To { label: String, to: String },
    Href { label: String, href: String },
}

pub(crate) fn finalize(
    located: Option<Located<RawThemeConfig>>,
    plugins: &[PluginSpec],
    errors: &mut Vec<ConfigValidationError>,
) -> ThemeConfig {
    let Some(Located { value, source }) = located else {
        return ThemeConfig::default();
    };

    let navbar = value
        .navbar
        .map(|navbar| finalize_navbar(navbar, plugins, &source, errors));
    let footer = value
        .footer
        .map(|footer| finalize_footer(footer, &source, errors));

    ThemeConfig {
        navbar,
        footer,
        extra: value.extra,
    }
}

fn finalize_navbar(
    raw: RawNavbar,
    plugins: &[PluginSpec],
    source: &ConfigSource,
    errors: &mut Vec<ConfigValidationError>,
) -> NavbarSettings {
    let mut items = Vec::new();
    for (index, item) in raw.items.into_iter().enumerate() {
        let context = format!("theme_config.navbar.items[{index}]");
        let position = match item.position.as_deref() {
            None | Some("left") => NavbarPosition::Left,
            Some("right") => NavbarPosition::Right,
            Some(other) => {
                errors.push(
                    invalid(source, format!("unknown navbar position '{other}'"))
                        .with_context(&context),
                );
                continue;
            }
        };

        let is_doc = item.doc_id.is_some() || item.r#type.as_deref() == Some("doc");
        if is_doc {
            let Some(doc_id) = item.doc_id else {
                errors.push(invalid(source, "doc item requires doc_id".into()).with_context(&context));
                continue;
            };
            let docs_plugin_id = item
                .docs_plugin_id
                .unwrap_or_else(|| DEFAULT_PLUGIN_ID.to_string());
            if !plugins.iter().any(|plugin| plugin.id == docs_plugin_id) {
                errors.push(
                    ConfigValidationError::new(
                        ValidationKind::UnknownPluginReference {
                            id: docs_plugin_id.clone(),
                        },
                        Some(source.clone()),
                        format!("navbar item references unknown docs plugin '{docs_plugin_id}'"),
                    )
                    .with_context(&context),
                );
                continue;
            }
            items.push(NavbarItem::Doc {
                docs_plugin_id,
                doc_id,
                label: item.label,
                position,
            });
            continue;
        }

        match (item.href, item.label) {
            (Some(href), Some(label)) => items.push(NavbarItem::Href {
                href,
                label,
                position,
            }),
            _ => errors.push(
                invalid(source, "link item requires both href and label".into())
                    .with_context(&context),
            ),
        }
    }

    NavbarSettings {
        title: raw.title,
        logo: raw.logo.map(|logo| Logo {
            alt: logo.alt,
            src: logo.src,
        }),
        items,
    }
}

fn finalize_footer(
    raw: RawFooter,
    source: &ConfigSource,
    errors: &mut Vec<ConfigValidationError>,
) -> FooterSettings {
    let mut links = Vec::new();
    for (group_index, group) in raw.links.into_iter().enumerate() {
        let mut items = Vec::new();
        for (index, item) in group.items.into_iter().enumerate() {
            let context = format!("theme_config.footer.links[{group_index}].items[{index}]");
            match (item.to, item.href) {
                (Some(to), None) => items.push(FooterItem::To {
                    label: item.label,
                    to,
                }),
                (None, Some(href)) => items.push(FooterItem::Href {
                    label: item.label,
                    href,
                }),
                _ => errors.push(
                    invalid(source, "footer item requires exactly one of to or href".into())
                        .with_context(context),
                ),
            }
        }
        links.push(FooterLinkGroup {
            title: group.title,
            items,
        });
    }

    FooterSettings {
        style: raw.style,
        links,
        copyright: raw.copyright,
    }
}

fn invalid(source: &ConfigSource, message: String) -> ConfigValidationError {
    ConfigValidationError::new(ValidationKind::InvalidValue, Some(source.clone()), message)
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawThemeConfig {
    #[serde(default)]
    navbar: Option<RawNavbar>,
    #[serde(default)]
    footer: Option<RawFooter>,
    #[serde(flatten)]
    extra: toml::Table,
}

#[derive(Clone, Debug, Deserialize)]
struct RawNavbar {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    logo: Option<RawLogo>,
    #[serde(default)]
    items: Vec<RawNavbarItem>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawLogo {
    #[serde(default)]
    alt: Option<String>,
    src: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawNavbarItem {
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    docs_plugin_id: Option<String>,
    #[serde(default)]
    doc_id: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    position: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawFooter {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    links: Vec<RawFooterGroup>,
    #[serde(default)]
    copyright: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawFooterGroup {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    items: Vec<RawFooterItem>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawFooterItem {
    label: String,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    href: Option<String>,
}
