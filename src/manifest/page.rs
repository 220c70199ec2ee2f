use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::manifest::lenient;
use crate::manifest::model::{
    Anchor, AudioCard, DirectoryEntry, FontDef, LabelValue, MediaBox, Measurement, SquareBox,
    TextField, TextLine, Vision,
};

/// Page type selected by `Property.Type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageType {
    Intro,
    Version,
    Directory,
    Profile,
    GraduationPhoto,
    GraduationMovie,
    GraduationDream,
    HybridSubject,
    Subject,
    Feed,
    PhysicalExamination,
    EWish,
    GraduationAudios,
    /// Absent or unrecognised tag; only the background is drawn.
    Unknown,
    /// Recognised tag whose payload could not be decoded.
    Malformed,
}

impl PageType {
    /// Map a manifest tag to a known page type.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag.trim() {
            "intro" => Self::Intro,
            "version" => Self::Version,
            "directory" => Self::Directory,
            "profile" => Self::Profile,
            "graduation-photo" => Self::GraduationPhoto,
            "graduation-movie" => Self::GraduationMovie,
            "graduation-dream" => Self::GraduationDream,
            "hybrid-subject" => Self::HybridSubject,
            "subject" => Self::Subject,
            "feed" => Self::Feed,
            "physical-examination" => Self::PhysicalExamination,
            "e-wish" => Self::EWish,
            "graduation-audios" => Self::GraduationAudios,
            _ => return None,
        })
    }

    /// Manifest tag, or a placeholder for the two fallback variants.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Version => "version",
            Self::Directory => "directory",
            Self::Profile => "profile",
            Self::GraduationPhoto => "graduation-photo",
            Self::GraduationMovie => "graduation-movie",
            Self::GraduationDream => "graduation-dream",
            Self::HybridSubject => "hybrid-subject",
            Self::Subject => "subject",
            Self::Feed => "feed",
            Self::PhysicalExamination => "physical-examination",
            Self::EWish => "e-wish",
            Self::GraduationAudios => "graduation-audios",
            Self::Unknown => "<unknown>",
            Self::Malformed => "<malformed>",
        }
    }

    /// Key that a bare `Elements` array is stored under for this type.
    fn list_key(self) -> Option<&'static str> {
        match self {
            Self::Directory => Some("Entries"),
            Self::GraduationPhoto => Some("Photos"),
            Self::GraduationAudios => Some("Cards"),
            Self::Subject
            | Self::HybridSubject
            | Self::EWish
            | Self::GraduationDream
            | Self::Feed => Some("Lines"),
            _ => None,
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IntroPage {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub subtitle: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub author: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub date: Option<TextField>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VersionPage {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub edition: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub date: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub page_count: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub photo_count: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub video_count: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub word_count: Option<TextField>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub credits: Vec<LabelValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectoryFonts {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub head_entry_font: Option<FontDef>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub sub_entry_font: Option<FontDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectoryPage {
    #[serde(skip)]
    pub fonts: DirectoryFonts,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub entries: Vec<DirectoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProfilePage {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub name: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub nickname: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub class: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub birthday: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub motto: Option<TextField>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub fields: Vec<LabelValue>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub avatar_box: Option<SquareBox>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PhysicalPage {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub date: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub height: Option<Measurement>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub weight: Option<Measurement>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub vision: Option<Vision>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub items: Vec<LabelValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WishFonts {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title_font: Option<FontDef>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub signature_font: Option<FontDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WishPage {
    #[serde(skip)]
    pub fonts: WishFonts,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub lines: Vec<TextLine>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub signature: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub date: Option<TextField>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PhotoPage {
    #[serde(deserialize_with = "lenient::node_vec")]
    pub photos: Vec<MediaBox>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub caption: Option<TextField>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MoviePage {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub cover: Option<MediaBox>,
    /// Source video URI the QR code points at (the key is spelled this way in manifests).
    #[serde(rename = "OrginURL", deserialize_with = "lenient::opt_string")]
    pub origin_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub qr_code: Option<SquareBox>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DreamPage {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub photo: Option<MediaBox>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub lines: Vec<TextLine>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub dream: Option<TextField>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubjectFonts {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title_font: Option<FontDef>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub content_font: Option<FontDef>,
}

/// Shared payload of `subject` and `hybrid-subject`; `media` is only drawn for the latter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubjectPage {
    #[serde(skip)]
    pub fonts: SubjectFonts,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextLine>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub lines: Vec<TextLine>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub media: Vec<MediaBox>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedFonts {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub mark_font: Option<FontDef>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title_font: Option<FontDef>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub content_font: Option<FontDef>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub quote_font: Option<FontDef>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub tag_font: Option<FontDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeedPage {
    #[serde(skip)]
    pub fonts: FeedFonts,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub mark: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub lines: Vec<TextLine>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub quote: Option<TextField>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub images: Vec<MediaBox>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AudiosPage {
    #[serde(deserialize_with = "lenient::opt_node")]
    pub title: Option<TextField>,
    #[serde(deserialize_with = "lenient::opt_node")]
    pub origin: Option<Anchor>,
    #[serde(deserialize_with = "lenient::node_vec")]
    pub cards: Vec<AudioCard>,
}

/// Type-specific payload, one variant per page type.
#[derive(Debug, Clone, PartialEq)]
pub enum PageKind {
    Intro(IntroPage),
    Version(VersionPage),
    Directory(DirectoryPage),
    Profile(ProfilePage),
    GraduationPhoto(PhotoPage),
    GraduationMovie(MoviePage),
    GraduationDream(DreamPage),
    HybridSubject(SubjectPage),
    Subject(SubjectPage),
    Feed(FeedPage),
    PhysicalExamination(PhysicalPage),
    EWish(WishPage),
    GraduationAudios(AudiosPage),
    /// Absent or unrecognised `Property.Type`.
    Unknown(Option<String>),
    /// Known type whose `Elements` did not fit its schema.
    Malformed { page_type: PageType, reason: String },
}

impl PageKind {
    pub fn page_type(&self) -> PageType {
        match self {
            Self::Intro(_) => PageType::Intro,
            Self::Version(_) => PageType::Version,
            Self::Directory(_) => PageType::Directory,
            Self::Profile(_) => PageType::Profile,
            Self::GraduationPhoto(_) => PageType::GraduationPhoto,
            Self::GraduationMovie(_) => PageType::GraduationMovie,
            Self::GraduationDream(_) => PageType::GraduationDream,
            Self::HybridSubject(_) => PageType::HybridSubject,
            Self::Subject(_) => PageType::Subject,
            Self::Feed(_) => PageType::Feed,
            Self::PhysicalExamination(_) => PageType::PhysicalExamination,
            Self::EWish(_) => PageType::EWish,
            Self::GraduationAudios(_) => PageType::GraduationAudios,
            Self::Unknown(_) => PageType::Unknown,
            Self::Malformed { .. } => PageType::Malformed,
        }
    }

    /// Every media URI the payload references, in drawing order.
    pub fn media_uris(&self) -> Vec<&str> {
        let boxes: Vec<&MediaBox> = match self {
            Self::GraduationPhoto(p) => p.photos.iter().collect(),
            Self::GraduationMovie(p) => p.cover.iter().collect(),
            Self::GraduationDream(p) => p.photo.iter().collect(),
            Self::HybridSubject(p) => p.media.iter().collect(),
            Self::Feed(p) => p.images.iter().collect(),
            Self::GraduationAudios(p) => {
                return p
                    .cards
                    .iter()
                    .map(|c| c.avatar.as_str())
                    .filter(|u| !u.trim().is_empty())
                    .collect();
            }
            _ => Vec::new(),
        };
        boxes
            .into_iter()
            .map(|m| m.url.as_str())
            .filter(|u| !u.trim().is_empty())
            .collect()
    }
}

/// Side the running footer is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FooterSide {
    #[default]
    Left,
    Right,
}

/// Per-page footer block (`Pagination` on a page).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageFooter {
    pub side: FooterSide,
    pub number: String,
    pub text: String,
}

/// One page of the manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// Cache directory id; `-1` when absent. Not unique.
    pub id: i64,
    /// Raw `Property.Type`.
    pub tag: Option<String>,
    /// `Property.Background.ImageUrl`.
    pub background: Option<String>,
    pub kind: PageKind,
    pub footer: Option<PageFooter>,
}

impl Page {
    /// Build a page from its raw JSON node. Never fails; unusable content degrades to
    /// [`PageKind::Unknown`] or [`PageKind::Malformed`].
    pub(crate) fn from_value(index: usize, value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        let id = obj
            .get("ID")
            .and_then(lenient::value_to_f64)
            .map(|x| x.trunc() as i64)
            .unwrap_or(-1);

        let property = obj.get("Property").and_then(Value::as_object).unwrap_or(&empty);
        let tag = property
            .get("Type")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let background = property
            .get("Background")
            .and_then(|b| b.get("ImageUrl"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned);

        let kind = match tag.as_deref().and_then(PageType::from_tag) {
            Some(ty) => match decode_kind(ty, property, obj.get("Elements")) {
                Ok(kind) => kind,
                Err(reason) => {
                    tracing::warn!(index, id, page_type = %ty, %reason, "malformed page payload");
                    PageKind::Malformed {
                        page_type: ty,
                        reason,
                    }
                }
            },
            None => PageKind::Unknown(tag.clone()),
        };

        Self {
            id,
            tag,
            background,
            kind,
            footer: obj.get("Pagination").and_then(parse_footer),
        }
    }
}

/// Bring `Elements` into object form. A bare array is stored under the type's list key, or
/// merged key-wise when the type has none.
fn normalize_elements(ty: PageType, elements: Option<&Value>) -> Result<Value, String> {
    match elements {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::Object(m)) => Ok(Value::Object(m.clone())),
        Some(Value::Array(items)) => match ty.list_key() {
            Some(key) => {
                let mut m = Map::new();
                m.insert(key.to_owned(), Value::Array(items.clone()));
                Ok(Value::Object(m))
            }
            None => {
                let mut m = Map::new();
                for item in items {
                    if let Value::Object(o) = item {
                        m.extend(o.iter().map(|(k, v)| (k.clone(), v.clone())));
                    }
                }
                Ok(Value::Object(m))
            }
        },
        Some(other) => Err(format!("Elements must be an object or array, got {other}")),
    }
}

fn decode<T: DeserializeOwned>(v: Value) -> Result<T, String> {
    serde_json::from_value(v).map_err(|e| e.to_string())
}

fn decode_kind(
    ty: PageType,
    property: &Map<String, Value>,
    elements: Option<&Value>,
) -> Result<PageKind, String> {
    let el = normalize_elements(ty, elements)?;
    let prop = Value::Object(property.clone());
    Ok(match ty {
        PageType::Intro => PageKind::Intro(decode(el)?),
        PageType::Version => PageKind::Version(decode(el)?),
        PageType::Directory => {
            let mut page: DirectoryPage = decode(el)?;
            page.fonts = decode(prop)?;
            PageKind::Directory(page)
        }
        PageType::Profile => PageKind::Profile(decode(el)?),
        PageType::GraduationPhoto => PageKind::GraduationPhoto(decode(el)?),
        PageType::GraduationMovie => PageKind::GraduationMovie(decode(el)?),
        PageType::GraduationDream => PageKind::GraduationDream(decode(el)?),
        PageType::HybridSubject | PageType::Subject => {
            let mut page: SubjectPage = decode(el)?;
            page.fonts = decode(prop)?;
            if ty == PageType::Subject {
                PageKind::Subject(page)
            } else {
                PageKind::HybridSubject(page)
            }
        }
        PageType::Feed => {
            let mut page: FeedPage = decode(el)?;
            page.fonts = decode(prop)?;
            PageKind::Feed(page)
        }
        PageType::PhysicalExamination => PageKind::PhysicalExamination(decode(el)?),
        PageType::EWish => {
            let mut page: WishPage = decode(el)?;
            page.fonts = decode(prop)?;
            PageKind::EWish(page)
        }
        PageType::GraduationAudios => PageKind::GraduationAudios(decode(el)?),
        PageType::Unknown | PageType::Malformed => PageKind::Unknown(None),
    })
}

fn parse_footer(v: &Value) -> Option<PageFooter> {
    let obj = v.as_object().filter(|o| !o.is_empty())?;
    let side = match obj.get("Location") {
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("right") => FooterSide::Right,
        Some(Value::Number(n)) if n.as_i64() == Some(1) => FooterSide::Right,
        _ => FooterSide::Left,
    };
    let text_of = |key: &str| match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    Some(PageFooter {
        side,
        number: text_of("Number"),
        text: text_of("Text"),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/page.rs"]
mod tests;
