use md5::{Digest, Md5};
use std::path::{Path, PathBuf};

/// Hex MD5 of the URI string itself (not of the referenced bytes).
///
/// This is the file stem the download collaborator uses when populating the media cache.
pub fn uri_digest(uri: &str) -> String {
    format!("{:x}", Md5::digest(uri.as_bytes()))
}

/// Substring after the final `.` of the URI, or `""` when there is none.
pub fn uri_extension(uri: &str) -> &str {
    match uri.rfind('.') {
        Some(idx) => &uri[idx + 1..],
        None => "",
    }
}

/// Cache file name for `uri`: `{digest}.{ext}`.
pub fn cache_file_name(uri: &str) -> String {
    format!("{}.{}", uri_digest(uri), uri_extension(uri))
}

/// Deterministic mapping from remote media URIs to local cache paths.
///
/// Resolution performs no IO; a resolved path is a candidate that callers check before use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetResolver {
    media_root: PathBuf,
}

impl AssetResolver {
    /// Create a resolver rooted at the media cache directory.
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    /// Media cache root.
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Page-scoped asset: `{media_root}/{page_id}/{digest}.{ext}`.
    pub fn resolve(&self, uri: &str, page_id: i64) -> PathBuf {
        self.media_root
            .join(page_id.to_string())
            .join(cache_file_name(uri))
    }

    /// Profile-level asset: `{media_root}/{digest}.{ext}`.
    pub fn resolve_profile(&self, uri: &str) -> PathBuf {
        self.media_root.join(cache_file_name(uri))
    }

    /// Resolve to an existing file, or `None` when the cache has no such entry.
    pub fn existing(&self, uri: &str, page_id: i64) -> Option<PathBuf> {
        let path = self.resolve(uri, page_id);
        path.is_file().then_some(path)
    }
}

/// Remote media reference paired with its resolved cache location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaRef {
    /// Remote URI as written in the manifest.
    pub uri: String,
    /// Owning page id; `None` for profile-level assets.
    pub page_id: Option<i64>,
    /// Resolved cache path.
    pub path: PathBuf,
}

impl MediaRef {
    /// Resolve a page-scoped reference.
    pub fn page(resolver: &AssetResolver, uri: &str, page_id: i64) -> Self {
        Self {
            uri: uri.to_owned(),
            page_id: Some(page_id),
            path: resolver.resolve(uri, page_id),
        }
    }

    /// Resolve a profile-level reference.
    pub fn profile(resolver: &AssetResolver, uri: &str) -> Self {
        Self {
            uri: uri.to_owned(),
            page_id: None,
            path: resolver.resolve_profile(uri),
        }
    }

    /// Whether the download collaborator has populated this entry.
    pub fn is_cached(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
