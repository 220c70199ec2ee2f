use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::assets::color::ColorDef;
use crate::assets::resolve::{AssetResolver, MediaRef};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BookError, BookResult};
use crate::manifest::lenient;
use crate::manifest::page::Page;

/// Page geometry from `Property.PageSize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageSize {
    #[serde(rename = "PageWidth", deserialize_with = "lenient::f64_or_zero")]
    pub width: f64,
    #[serde(rename = "PageHeight", deserialize_with = "lenient::f64_or_zero")]
    pub height: f64,
    /// Content area used by `feed` pages.
    #[serde(rename = "FeedPageWidth", deserialize_with = "lenient::f64_or_zero")]
    pub feed_width: f64,
    #[serde(rename = "FeedPageHeight", deserialize_with = "lenient::f64_or_zero")]
    pub feed_height: f64,
    /// Text column width on `subject` pages.
    #[serde(rename = "SubjectPageWidth", deserialize_with = "lenient::f64_or_zero")]
    pub subject_width: f64,
}

/// Vertical rule drawn on subject pages (`Property.DividingLine`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DividingLineStyle {
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub x: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub width: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub height: f64,
    pub(crate) color: ColorDef,
}

impl DividingLineStyle {
    /// Configured rule colour, if it parsed.
    pub fn color(&self) -> Option<Rgba8> {
        self.color.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FooterDistance {
    /// Margin from the anchored page edge.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub side_distance: f64,
    /// Distance of the footer baseline from the page bottom.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub bottom_distance: f64,
    /// Gap between footer elements.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub interval_distance: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FooterFont {
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub font_size: f64,
    /// Line box height. The box ends on the footer bottom and the glyphs are centred in it.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RuleSize {
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub width: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub height: f64,
}

/// Running footer geometry (`Property.Pagination`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PaginationStyle {
    #[serde(deserialize_with = "lenient::node_or_default")]
    pub distance: FooterDistance,
    #[serde(deserialize_with = "lenient::node_or_default")]
    pub number: FooterFont,
    #[serde(deserialize_with = "lenient::node_or_default")]
    pub text: FooterFont,
    #[serde(deserialize_with = "lenient::node_or_default")]
    pub line: RuleSize,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct PropertyNode {
    #[serde(deserialize_with = "lenient::node_or_default")]
    page_size: PageSize,
    #[serde(deserialize_with = "lenient::node_or_default")]
    dividing_line: DividingLineStyle,
    #[serde(deserialize_with = "lenient::node_or_default")]
    pagination: PaginationStyle,
}

/// Book-level media from `data.Profile`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProfileRefs {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub avatar: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub cover: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub backcover: Option<String>,
}

impl ProfileRefs {
    fn uris(&self) -> impl Iterator<Item = &str> {
        [&self.avatar, &self.cover, &self.backcover]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .filter(|u| !u.trim().is_empty())
    }
}

/// Parsed and validated book manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    pub page_size: PageSize,
    pub dividing_line: DividingLineStyle,
    pub pagination: PaginationStyle,
    pub profile: ProfileRefs,
    /// Cached profile avatar; `None` when not referenced or not on disk.
    pub profile_avatar: Option<PathBuf>,
    /// Pages in display order.
    pub pages: Vec<Page>,
}

impl Manifest {
    /// Parse manifest bytes.
    ///
    /// Requires `data`, a non-empty `data.Property` and a non-empty `data.Pages`. Missing
    /// property sub-nodes leave zeroed defaults.
    pub fn from_slice(bytes: &[u8], resolver: &AssetResolver) -> BookResult<Self> {
        let root: Value = serde_json::from_slice(bytes).map_err(|e| BookError::syntax(e.to_string()))?;

        let data = root
            .get("data")
            .and_then(Value::as_object)
            .filter(|o| !o.is_empty())
            .ok_or_else(|| BookError::missing_field("data"))?;

        let property = data
            .get("Property")
            .and_then(Value::as_object)
            .filter(|o| !o.is_empty())
            .ok_or_else(|| BookError::missing_field("data.Property"))?;

        let pages = data
            .get("Pages")
            .and_then(Value::as_array)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| BookError::missing_field("data.Pages"))?;

        let PropertyNode {
            page_size,
            dividing_line,
            pagination,
        } = serde_json::from_value(Value::Object(property.clone()))
            .map_err(|e| BookError::syntax(format!("data.Property: {e}")))?;

        let profile: ProfileRefs = data
            .get("Profile")
            .cloned()
            .and_then(lenient::node_from_value)
            .unwrap_or_default();

        let profile_avatar = profile
            .avatar
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .and_then(|uri| {
                let path = resolver.resolve_profile(uri);
                if path.is_file() {
                    Some(path)
                } else {
                    tracing::warn!(uri, path = %path.display(), "profile avatar not in media cache");
                    None
                }
            });

        let pages = pages
            .iter()
            .enumerate()
            .map(|(i, v)| Page::from_value(i, v))
            .collect::<Vec<_>>();

        tracing::debug!(
            pages = pages.len(),
            width = page_size.width,
            height = page_size.height,
            "parsed manifest"
        );

        Ok(Self {
            page_size,
            dividing_line,
            pagination,
            profile,
            profile_avatar,
            pages,
        })
    }

    /// Every media reference the book needs, profile assets first, then pages in order
    /// (background before content).
    pub fn media_refs(&self, resolver: &AssetResolver) -> Vec<MediaRef> {
        let mut out = self
            .profile
            .uris()
            .map(|uri| MediaRef::profile(resolver, uri))
            .collect::<Vec<_>>();
        for page in &self.pages {
            out.extend(
                page.background
                    .as_deref()
                    .into_iter()
                    .chain(page.kind.media_uris())
                    .map(|uri| MediaRef::page(resolver, uri, page.id)),
            );
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/document.rs"]
mod tests;
