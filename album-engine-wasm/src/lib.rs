//! WASM bindings for album-engine — drives the album web page.

use wasm_bindgen::prelude::*;

use album_engine::core::config::EngineConfig;
use album_engine::core::content::ContentTable;
use album_engine::core::effects::EFFECT_TABLE;
use album_engine::core::engine::AlbumEngine;

// ---------------------------------------------------------------------------
// Embedded album data — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const ALBUM: &str = include_str!("../../album_data/album.ron");
    pub const CONFIG: &str = include_str!("../../album_data/config.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct ChapterInfo<'a> {
    number: u32,
    title: &'a str,
    subtitle: Option<&'a str>,
    color: Option<&'a str>,
    icon: Option<&'a str>,
    panel_count: usize,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// AlbumPlayer — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct AlbumPlayer {
    engine: AlbumEngine,
}

#[wasm_bindgen]
impl AlbumPlayer {
    /// Create a player over the embedded album.
    ///
    /// `debug` comes from the page (e.g. a `?debug` query parameter) and
    /// overrides the embedded config.
    #[wasm_bindgen(constructor)]
    pub fn new(debug: bool) -> Result<AlbumPlayer, JsError> {
        Self::build(data::ALBUM, debug)
    }

    /// Create a player over album content supplied by the page as RON.
    pub fn from_ron(album_ron: &str, debug: bool) -> Result<AlbumPlayer, JsError> {
        Self::build(album_ron, debug)
    }

    /// Return the current view as JSON:
    /// `{ chapter, panel, navigation, effects, audio, progress, is_first, is_last }`.
    pub fn snapshot(&self) -> Result<String, JsError> {
        to_json(&self.engine.snapshot())
    }

    /// Advance one panel. Returns whether the active panel changed.
    pub fn next(&mut self) -> bool {
        self.engine.advance().moved()
    }

    /// Retreat one panel. Returns whether the active panel changed.
    pub fn prev(&mut self) -> bool {
        self.engine.retreat().moved()
    }

    pub fn set_chapter(&mut self, index: usize) -> bool {
        self.engine.set_chapter(index).moved()
    }

    pub fn set_panel(&mut self, index: usize) -> bool {
        self.engine.set_panel(index).moved()
    }

    pub fn toggle_play(&mut self) {
        self.engine.toggle_play();
    }

    /// Call from the audio element's `ended` event.
    pub fn track_ended(&mut self) {
        self.engine.track_ended();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.engine.set_volume(volume);
    }

    pub fn toggle_debug(&mut self) {
        self.engine.toggle_debug();
    }

    pub fn is_playing(&self) -> bool {
        self.engine.state().is_playing()
    }

    pub fn volume(&self) -> f32 {
        self.engine.state().volume()
    }

    /// Return JSON array of chapters for the table of contents.
    pub fn chapters(&self) -> Result<String, JsError> {
        let chapters: Vec<ChapterInfo<'_>> = self
            .engine
            .content()
            .chapters
            .iter()
            .map(|c| ChapterInfo {
                number: c.number,
                title: &c.title,
                subtitle: c.subtitle.as_deref(),
                color: c.color.as_deref(),
                icon: c.icon.as_deref(),
                panel_count: c.panels.len(),
            })
            .collect();
        to_json(&chapters)
    }

    /// Return JSON array of every effect name, in layering order.
    pub fn effect_names() -> String {
        let names: Vec<&str> = EFFECT_TABLE.iter().map(|rule| rule.effect.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }
}

// Private helpers
impl AlbumPlayer {
    fn build(album_ron: &str, debug: bool) -> Result<AlbumPlayer, JsError> {
        let content = ContentTable::parse_ron(album_ron)
            .map_err(|e| JsError::new(&format!("Album parse error: {e}")))?;
        let config = EngineConfig::parse_ron(data::CONFIG)
            .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?;

        let engine = AlbumEngine::builder()
            .with_content(content)
            .with_config(config)
            .debug_mode(debug)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;

        Ok(AlbumPlayer { engine })
    }
}
