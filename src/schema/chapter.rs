use serde::{Deserialize, Serialize};

use super::panel::Panel;

/// Newtype wrapper for chapter IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(pub u32);

/// An ordered group of panels sharing one audio track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub panels: Vec<Panel>,
}

impl Chapter {
    pub fn new(id: u32, number: u32, title: impl Into<String>, panels: Vec<Panel>) -> Self {
        Self {
            id: ChapterId(id),
            number,
            title: title.into(),
            subtitle: None,
            audio_url: None,
            color: None,
            icon: None,
            panels,
        }
    }

    pub fn with_audio(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    /// Index of the final panel, or `None` for a chapter with no panels.
    pub fn last_panel_index(&self) -> Option<usize> {
        self.panels.len().checked_sub(1)
    }
}
