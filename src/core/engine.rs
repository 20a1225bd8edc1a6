/// The album engine: content, navigation state and effect projection.
///
/// Wires navigation transitions to effect recomputation and exposes the
/// read-only view the presentation layer renders from.

use log::debug;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::core::config::{ConfigError, EngineConfig};
use crate::core::content::{ContentError, ContentTable};
use crate::core::effects::EffectConfig;
use crate::core::navigation::{self, NavAction, NavigationState, Transition};
use crate::schema::chapter::Chapter;
use crate::schema::panel::Panel;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("content error: {0}")]
    Content(#[from] ContentError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// What the audio element should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioCue<'a> {
    pub src: Option<&'a str>,
    pub playing: bool,
    pub volume: f32,
}

/// Reading-order position across the whole album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Zero-based ordinal of the current panel.
    pub index: usize,
    pub total: usize,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub chapter: Option<&'a Chapter>,
    pub panel: Option<&'a Panel>,
    pub navigation: &'a NavigationState,
    pub effects: &'a EffectConfig,
    pub audio: AudioCue<'a>,
    pub progress: Progress,
    pub is_first: bool,
    pub is_last: bool,
}

/// An album session. Built via `AlbumEngine::builder()`.
#[derive(Debug, Clone)]
pub struct AlbumEngine {
    content: ContentTable,
    state: NavigationState,
    effects: EffectConfig,
}

/// Builder for constructing an `AlbumEngine`.
#[derive(Debug, Default)]
pub struct AlbumEngineBuilder {
    content_path: Option<String>,
    config_path: Option<String>,
    /// Directly provided content (for testing without files).
    content: Option<ContentTable>,
    /// Directly provided config (for testing without files).
    config: Option<EngineConfig>,
    debug_mode: Option<bool>,
    volume: Option<f32>,
}

impl AlbumEngine {
    pub fn builder() -> AlbumEngineBuilder {
        AlbumEngineBuilder::default()
    }

    /// An engine over `content` with default configuration.
    pub fn new(content: ContentTable) -> AlbumEngine {
        Self::with_config(content, &EngineConfig::default())
    }

    fn with_config(content: ContentTable, config: &EngineConfig) -> AlbumEngine {
        let mut state = NavigationState::new(config.debug_mode, config.initial_volume);
        if config.start_chapter != 0 {
            navigation::reduce(&mut state, NavAction::SetChapter(config.start_chapter), &content);
        }
        let effects = EffectConfig::project(content.panel(state.chapter_index(), state.panel_index()));
        AlbumEngine {
            content,
            state,
            effects,
        }
    }

    /// Apply an action. Effects are rebuilt whenever the active panel changed.
    pub fn dispatch(&mut self, action: NavAction) -> Transition {
        let transition = navigation::reduce(&mut self.state, action, &self.content);
        if transition.moved() {
            self.effects = EffectConfig::project(self.current_panel());
            debug!(
                "effects: {:?}",
                self.effects.visible_effects().map(|e| e.name()).collect::<Vec<_>>()
            );
        }
        transition
    }

    pub fn set_chapter(&mut self, index: usize) -> Transition {
        self.dispatch(NavAction::SetChapter(index))
    }

    pub fn set_panel(&mut self, index: usize) -> Transition {
        self.dispatch(NavAction::SetPanel(index))
    }

    pub fn advance(&mut self) -> Transition {
        self.dispatch(NavAction::Advance)
    }

    pub fn retreat(&mut self) -> Transition {
        self.dispatch(NavAction::Retreat)
    }

    pub fn toggle_play(&mut self) {
        self.dispatch(NavAction::TogglePlay);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.dispatch(NavAction::SetVolume(volume));
    }

    pub fn toggle_debug(&mut self) {
        self.dispatch(NavAction::ToggleDebug);
    }

    /// The chapter's track reached its natural end. Stops playback; never
    /// moves to another panel.
    pub fn track_ended(&mut self) {
        if self.state.is_playing() {
            self.dispatch(NavAction::TogglePlay);
        }
    }

    pub fn content(&self) -> &ContentTable {
        &self.content
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn effects(&self) -> &EffectConfig {
        &self.effects
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.content.chapter(self.state.chapter_index())
    }

    pub fn current_panel(&self) -> Option<&Panel> {
        self.content
            .panel(self.state.chapter_index(), self.state.panel_index())
    }

    pub fn audio_cue(&self) -> AudioCue<'_> {
        AudioCue {
            src: self.current_chapter().and_then(|c| c.audio_url.as_deref()),
            playing: self.state.is_playing(),
            volume: self.state.volume(),
        }
    }

    pub fn is_first(&self) -> bool {
        self.state.position() == (0, 0)
    }

    /// True at the last panel of the last chapter, and for an empty album.
    pub fn is_last(&self) -> bool {
        let (chapter, panel) = self.state.position();
        chapter + 1 >= self.content.chapters.len()
            && panel + 1 >= self.content.panel_len(chapter)
    }

    pub fn progress(&self) -> Progress {
        let (chapter, panel) = self.state.position();
        Progress {
            index: self.content.ordinal(chapter, panel).unwrap_or(0),
            total: self.content.panel_count(),
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            chapter: self.current_chapter(),
            panel: self.current_panel(),
            navigation: &self.state,
            effects: &self.effects,
            audio: self.audio_cue(),
            progress: self.progress(),
            is_first: self.is_first(),
            is_last: self.is_last(),
        }
    }
}

impl AlbumEngineBuilder {
    pub fn content_path(mut self, path: &str) -> Self {
        self.content_path = Some(path.to_string());
        self
    }

    pub fn config_path(mut self, path: &str) -> Self {
        self.config_path = Some(path.to_string());
        self
    }

    /// Provide content directly (for testing without files).
    pub fn with_content(mut self, content: ContentTable) -> Self {
        self.content = Some(content);
        self
    }

    /// Provide config directly (for testing without files).
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the config's `debug_mode`.
    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = Some(enabled);
        self
    }

    /// Overrides the config's `initial_volume`.
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn build(self) -> Result<AlbumEngine, EngineError> {
        // A content file takes precedence over directly provided content.
        let content = match self.content_path {
            Some(ref path) => ContentTable::load_from_ron(Path::new(path))?,
            None => self.content.unwrap_or_default(),
        };

        let mut config = match self.config_path {
            Some(ref path) => EngineConfig::load_from_ron(Path::new(path))?,
            None => self.config.unwrap_or_default(),
        };
        if let Some(enabled) = self.debug_mode {
            config.debug_mode = enabled;
        }
        if let Some(volume) = self.volume {
            config.initial_volume = volume;
        }

        Ok(AlbumEngine::with_config(content, &config))
    }
}
