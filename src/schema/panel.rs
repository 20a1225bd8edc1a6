use serde::{Deserialize, Serialize};

/// Newtype wrapper for panel IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub u32);

/// Effect triggers authored on a panel.
///
/// Every field is off unless the content sets it. Nothing stops several
/// scene flags from being on at once; the projection shows all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelFlags {
    pub has_burning: bool,
    pub has_road: bool,
    pub has_door: bool,
    pub has_insignia: bool,
    /// Only meaningful together with `has_insignia`.
    pub large_insignia: bool,
    pub neon_title: bool,
    /// CSS color for the neon title and its light rays.
    pub neon_color: Option<String>,
    pub split_screen: bool,
    pub epilogue: bool,
    pub has_mirrors: bool,
    pub has_rain: bool,
    pub heavy_rain: bool,
    pub has_smoke: bool,
    pub has_embers: bool,
    pub has_static: bool,
    pub has_stars: bool,
}

/// The smallest narrative unit: one screen of text plus its effect triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub text_after: Option<String>,
    #[serde(default)]
    pub flags: PanelFlags,
}

impl Panel {
    /// A panel with narrative text and no effects.
    pub fn new(id: u32, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: PanelId(id),
            title: title.into(),
            text: text.into(),
            quote: None,
            text_after: None,
            flags: PanelFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: PanelFlags) -> Self {
        self.flags = flags;
        self
    }
}
