/// Content table — the authored, immutable list of chapters and panels.

use log::info;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::core::effects::{Effect, EffectConfig};
use crate::schema::chapter::{Chapter, ChapterId};
use crate::schema::panel::{Panel, PanelId};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("chapter {0:?} has no panels")]
    EmptyChapter(ChapterId),
    #[error("duplicate chapter id: {0:?}")]
    DuplicateChapterId(ChapterId),
    #[error("duplicate panel id {panel:?} in chapter {chapter:?}")]
    DuplicatePanelId { chapter: ChapterId, panel: PanelId },
}

/// The ordered set of chapters an album is made of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTable {
    pub chapters: Vec<Chapter>,
}

/// Authoring issue found by [`ContentTable::lint`]. Never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentWarning {
    /// More than one scene backdrop is active on a single panel.
    OverlappingScenes {
        chapter: ChapterId,
        panel: PanelId,
        scenes: Vec<Effect>,
    },
    /// A modifier flag is set without the flag it modifies.
    OrphanModifier {
        chapter: ChapterId,
        panel: PanelId,
        modifier: &'static str,
        requires: &'static str,
    },
    MissingAudio(ChapterId),
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlappingScenes {
                chapter,
                panel,
                scenes,
            } => {
                let names: Vec<&str> = scenes.iter().map(|e| e.name()).collect();
                write!(
                    f,
                    "chapter {} panel {} layers {} scene backdrops: {}",
                    chapter.0,
                    panel.0,
                    scenes.len(),
                    names.join(", ")
                )
            }
            Self::OrphanModifier {
                chapter,
                panel,
                modifier,
                requires,
            } => write!(
                f,
                "chapter {} panel {} sets '{}' without '{}'",
                chapter.0, panel.0, modifier, requires
            ),
            Self::MissingAudio(chapter) => {
                write!(f, "chapter {} has no audio track", chapter.0)
            }
        }
    }
}

impl ContentTable {
    /// Build a table from chapters, validating their shape.
    pub fn new(chapters: Vec<Chapter>) -> Result<ContentTable, ContentError> {
        let table = ContentTable { chapters };
        table.validate()?;
        Ok(table)
    }

    /// Load a content table from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ContentTable, ContentError> {
        let contents = std::fs::read_to_string(path)?;
        let table = Self::parse_ron(&contents)?;
        info!(
            "loaded {} chapters ({} panels) from {}",
            table.chapters.len(),
            table.panel_count(),
            path.display()
        );
        Ok(table)
    }

    /// Parse and validate a content table from a RON string.
    pub fn parse_ron(input: &str) -> Result<ContentTable, ContentError> {
        let table: ContentTable = ron::from_str(input)?;
        table.validate()?;
        Ok(table)
    }

    /// Every chapter needs at least one panel; chapter ids are unique, and
    /// panel ids are unique across the whole album.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut chapter_ids = FxHashSet::default();
        let mut panel_ids = FxHashSet::default();

        for chapter in &self.chapters {
            if !chapter_ids.insert(chapter.id) {
                return Err(ContentError::DuplicateChapterId(chapter.id));
            }
            if chapter.panels.is_empty() {
                return Err(ContentError::EmptyChapter(chapter.id));
            }
            for panel in &chapter.panels {
                if !panel_ids.insert(panel.id) {
                    return Err(ContentError::DuplicatePanelId {
                        chapter: chapter.id,
                        panel: panel.id,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn panel(&self, chapter_index: usize, panel_index: usize) -> Option<&Panel> {
        self.chapter(chapter_index)?.panel(panel_index)
    }

    /// Number of panels in the given chapter, zero when it does not exist.
    pub fn panel_len(&self, chapter_index: usize) -> usize {
        self.chapter(chapter_index).map_or(0, |c| c.panels.len())
    }

    pub fn panel_count(&self) -> usize {
        self.chapters.iter().map(|c| c.panels.len()).sum()
    }

    /// Position of a panel in reading order across all chapters.
    pub fn ordinal(&self, chapter_index: usize, panel_index: usize) -> Option<usize> {
        if panel_index >= self.panel_len(chapter_index) {
            return None;
        }
        let before: usize = self.chapters[..chapter_index]
            .iter()
            .map(|c| c.panels.len())
            .sum();
        Some(before + panel_index)
    }

    /// Report authoring issues. Content is never altered.
    pub fn lint(&self) -> Vec<ContentWarning> {
        let mut warnings = Vec::new();

        for chapter in &self.chapters {
            if chapter.audio_url.is_none() {
                warnings.push(ContentWarning::MissingAudio(chapter.id));
            }

            for panel in &chapter.panels {
                let config = EffectConfig::project(Some(panel));
                let scenes: Vec<Effect> = config
                    .visible_effects()
                    .filter(|effect| effect.is_scene())
                    .collect();
                if scenes.len() > 1 {
                    warnings.push(ContentWarning::OverlappingScenes {
                        chapter: chapter.id,
                        panel: panel.id,
                        scenes,
                    });
                }

                let flags = &panel.flags;
                let modifiers = [
                    (flags.large_insignia && !flags.has_insignia, "large_insignia", "has_insignia"),
                    (flags.neon_color.is_some() && !flags.neon_title, "neon_color", "neon_title"),
                    (flags.heavy_rain && !flags.has_rain, "heavy_rain", "has_rain"),
                ];
                for (orphaned, modifier, requires) in modifiers {
                    if orphaned {
                        warnings.push(ContentWarning::OrphanModifier {
                            chapter: chapter.id,
                            panel: panel.id,
                            modifier,
                            requires,
                        });
                    }
                }
            }
        }

        warnings
    }
}
