use crate::foundation::core::Rgba8;
use serde::Deserialize;

/// Colour as written in the manifest.
///
/// Accepts `#RGB`, `#RRGGBB` and `#RRGGBBAA` strings (leading `#` optional) and `[r, g, b]` /
/// `[r, g, b, a]` byte arrays. Unparseable values deserialize to `None` rather than failing the
/// surrounding node, so a bad colour only costs the element its custom colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ColorDef(pub(crate) Option<Rgba8>);

impl ColorDef {
    pub(crate) fn or(self, fallback: Rgba8) -> Rgba8 {
        self.0.unwrap_or(fallback)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
            Other(serde_json::Value),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self(parse_hex(&s).ok()),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Self(Some(Rgba8::rgb(*r, *g, *b))),
                [r, g, b, a] => Self(Some(Rgba8::rgba(*r, *g, *b, *a))),
                _ => Self(None),
            },
            Repr::Other(_) => Self(None),
        })
    }
}

/// Parse a hex colour string.
pub fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex colour \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in s.chars().enumerate() {
                let nibble = hex_byte(&ch.to_string())?;
                out[i] = nibble * 17;
            }
            Ok(Rgba8::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex colour must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}
