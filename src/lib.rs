//! Yearbook renders manifest-driven photo yearbooks into fixed-size page rasters.
//!
//! A yearbook is described by a JSON manifest (page geometry, pagination style, profile assets
//! and an ordered list of typed pages) plus a media cache the download collaborator has already
//! populated. This crate turns one page at a time into pixels.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `manifest bytes + media root -> Manifest` (lenient parse, malformed pages kept)
//! 2. **Compose**: `Manifest + page index -> PagePlan` (page renderer records draw commands)
//! 3. **Execute**: `PagePlan -> Canvas` (CPU rasterization, composited over existing paint)
//! 4. **Save** (optional): write the canvas as PNG, one file per page
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never fail a page**: missing media, malformed optional nodes and text/offset mismatches
//!   are logged and skipped; only load-time problems surface as [`BookError`].
//! - **No network**: remote URIs only resolve to cache paths via [`AssetResolver`].
//! - **Persistent canvas**: pages paint over the previous contents unless cleared.
#![forbid(unsafe_code)]

mod assets;
mod barcode;
mod book;
mod canvas;
mod foundation;
mod manifest;
mod pages;
mod text;

pub use assets::color::parse_hex;
pub use assets::decode::{RasterImage, SourceImage, decode_image, load_image};
pub use assets::resolve::{AssetResolver, MediaRef, cache_file_name, uri_digest, uri_extension};
pub use barcode::{BitMatrix, QUIET_ZONE, encode as encode_qr, qr_payload, rasterize as rasterize_qr};
pub use book::{Book, BookOptions, PageOutcome};
pub use canvas::painter::{Painter, PainterScope};
pub use canvas::plan::{Clip, DrawCmd, DrawOp, PagePlan, PlacedText};
pub use canvas::surface::Canvas;
pub use foundation::core::{Affine, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{BookError, BookResult};
pub use manifest::document::{
    DividingLineStyle, FooterDistance, FooterFont, Manifest, PageSize, PaginationStyle,
    ProfileRefs, RuleSize,
};
pub use manifest::model::{
    Anchor, AudioCard, DirectoryEntry, FontDef, LabelValue, MediaBox, Measurement, SquareBox,
    TextField, TextLine, Vision,
};
pub use manifest::page::{
    AudiosPage, DirectoryFonts, DirectoryPage, DreamPage, FeedFonts, FeedPage, FooterSide,
    IntroPage, MoviePage, Page, PageFooter, PageKind, PageType, PhotoPage, PhysicalPage,
    ProfilePage, SubjectFonts, SubjectPage, VersionPage, WishFonts, WishPage,
};
pub use pages::audios::{cell_origin, gender_badge};
pub use pages::directory::{
    CHILD_INDENT, FIRST_ENTRY_Y, HEAD_ROW_H, NUMBER_X, SUB_ROW_H, TEXT_X, TITLE_Y, VIDEO_MARK,
    entry_label, entry_number,
};
pub use pages::graduation::{QR_DEFAULT_SIZE, QR_MARGIN};
pub use pages::media::fit_within;
pub use text::engine::TextEngine;
pub use text::fonts::{FontConfig, FontRole, FontSpec};
