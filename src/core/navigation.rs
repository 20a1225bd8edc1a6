/// Navigation state and the transitions that move through an album.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::content::ContentTable;
use crate::schema::chapter::Chapter;

/// A single navigation operation. Each variant carries only what it needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NavAction {
    /// Jump to a chapter's first panel. Always stops playback.
    SetChapter(usize),
    /// Jump to a panel of the current chapter.
    SetPanel(usize),
    Advance,
    Retreat,
    TogglePlay,
    SetVolume(f32),
    ToggleDebug,
}

/// What a dispatched action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub chapter_changed: bool,
    pub panel_changed: bool,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    /// True when the active panel is a different one than before.
    pub fn moved(&self) -> bool {
        self.chapter_changed || self.panel_changed
    }

    fn merge(self, other: Transition) -> Transition {
        Transition {
            chapter_changed: self.chapter_changed || other.chapter_changed,
            panel_changed: self.panel_changed || other.panel_changed,
        }
    }
}

/// The visitor's position and player controls.
///
/// Fields are private: the only way to change them is [`reduce`], which
/// keeps both indices inside the content table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    chapter_index: usize,
    panel_index: usize,
    is_playing: bool,
    volume: f32,
    is_debug_mode: bool,
    is_debug_visible: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(false, 1.0)
    }
}

impl NavigationState {
    /// Fresh state at the first panel of the first chapter, paused.
    pub fn new(debug_mode: bool, volume: f32) -> Self {
        Self {
            chapter_index: 0,
            panel_index: 0,
            is_playing: false,
            volume: clamp_volume(volume),
            is_debug_mode: debug_mode,
            is_debug_visible: false,
        }
    }

    pub fn chapter_index(&self) -> usize {
        self.chapter_index
    }

    pub fn panel_index(&self) -> usize {
        self.panel_index
    }

    /// `(chapter_index, panel_index)`.
    pub fn position(&self) -> (usize, usize) {
        (self.chapter_index, self.panel_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_debug_mode(&self) -> bool {
        self.is_debug_mode
    }

    pub fn is_debug_visible(&self) -> bool {
        self.is_debug_visible
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Apply one action. Out-of-range jumps are ignored, so the state never
/// points outside `content`.
pub fn reduce(state: &mut NavigationState, action: NavAction, content: &ContentTable) -> Transition {
    let transition = match action {
        NavAction::SetChapter(index) => set_chapter(state, index, content),
        NavAction::SetPanel(index) => set_panel(state, index, content),
        NavAction::Advance => advance(state, content),
        NavAction::Retreat => retreat(state, content),
        NavAction::TogglePlay => {
            state.is_playing = !state.is_playing;
            Transition::none()
        }
        NavAction::SetVolume(volume) => {
            state.volume = clamp_volume(volume);
            Transition::none()
        }
        NavAction::ToggleDebug => {
            state.is_debug_visible = !state.is_debug_visible;
            Transition::none()
        }
    };

    debug!(
        "nav: {:?} -> chapter={} panel={} playing={} volume={:.2}",
        action, state.chapter_index, state.panel_index, state.is_playing, state.volume
    );
    transition
}

fn set_chapter(state: &mut NavigationState, index: usize, content: &ContentTable) -> Transition {
    if index >= content.chapters.len() {
        warn!(
            "ignoring chapter {} (album has {} chapters)",
            index,
            content.chapters.len()
        );
        return Transition::none();
    }

    let transition = Transition {
        chapter_changed: index != state.chapter_index,
        panel_changed: state.panel_index != 0,
    };
    state.chapter_index = index;
    state.panel_index = 0;
    // Audio never carries over into another chapter.
    state.is_playing = false;
    transition
}

fn set_panel(state: &mut NavigationState, index: usize, content: &ContentTable) -> Transition {
    let len = content.panel_len(state.chapter_index);
    if index >= len {
        warn!(
            "ignoring panel {} (chapter {} has {} panels)",
            index, state.chapter_index, len
        );
        return Transition::none();
    }

    let transition = Transition {
        chapter_changed: false,
        panel_changed: index != state.panel_index,
    };
    state.panel_index = index;
    transition
}

fn advance(state: &mut NavigationState, content: &ContentTable) -> Transition {
    if state.panel_index + 1 < content.panel_len(state.chapter_index) {
        set_panel(state, state.panel_index + 1, content)
    } else if state.chapter_index + 1 < content.chapters.len() {
        set_chapter(state, state.chapter_index + 1, content)
    } else {
        debug!("nav: already at the last panel");
        Transition::none()
    }
}

fn retreat(state: &mut NavigationState, content: &ContentTable) -> Transition {
    if state.panel_index > 0 {
        set_panel(state, state.panel_index - 1, content)
    } else if state.chapter_index > 0 {
        let previous = state.chapter_index - 1;
        let entered = set_chapter(state, previous, content);
        let last = content
            .chapter(previous)
            .and_then(Chapter::last_panel_index)
            .unwrap_or(0);
        entered.merge(set_panel(state, last, content))
    } else {
        debug!("nav: already at the first panel");
        Transition::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::panel::Panel;

    /// Chapter 0 has 3 panels, chapter 1 has 2.
    fn table() -> ContentTable {
        ContentTable::new(vec![
            Chapter::new(
                1,
                1,
                "One",
                vec![
                    Panel::new(1, "a", "a"),
                    Panel::new(2, "b", "b"),
                    Panel::new(3, "c", "c"),
                ],
            ),
            Chapter::new(2, 2, "Two", vec![Panel::new(4, "d", "d"), Panel::new(5, "e", "e")]),
        ])
        .unwrap()
    }

    fn all_positions(content: &ContentTable) -> Vec<(usize, usize)> {
        content
            .chapters
            .iter()
            .enumerate()
            .flat_map(|(c, chapter)| (0..chapter.panels.len()).map(move |p| (c, p)))
            .collect()
    }

    fn state_at(content: &ContentTable, chapter: usize, panel: usize) -> NavigationState {
        let mut state = NavigationState::default();
        reduce(&mut state, NavAction::SetChapter(chapter), content);
        reduce(&mut state, NavAction::SetPanel(panel), content);
        state
    }

    #[test]
    fn starts_at_origin_paused() {
        let state = NavigationState::new(true, 0.4);
        assert_eq!(state.position(), (0, 0));
        assert!(!state.is_playing());
        assert!(state.is_debug_mode());
        assert!(!state.is_debug_visible());
        assert!((state.volume() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn set_chapter_resets_panel_and_stops_playback() {
        let content = table();
        for chapter in 0..content.chapters.len() {
            let mut state = state_at(&content, 1, 1);
            reduce(&mut state, NavAction::TogglePlay, &content);
            assert!(state.is_playing());

            reduce(&mut state, NavAction::SetChapter(chapter), &content);
            assert_eq!(state.position(), (chapter, 0));
            assert!(!state.is_playing());
        }
    }

    #[test]
    fn set_chapter_to_current_chapter_still_stops_playback() {
        let content = table();
        let mut state = NavigationState::default();
        reduce(&mut state, NavAction::TogglePlay, &content);
        assert!(state.is_playing());

        let transition = reduce(&mut state, NavAction::SetChapter(0), &content);
        assert!(!transition.moved());
        assert_eq!(state.position(), (0, 0));
        assert!(!state.is_playing());
    }

    #[test]
    fn set_chapter_out_of_range_ignored() {
        let content = table();
        let mut state = state_at(&content, 0, 2);
        reduce(&mut state, NavAction::TogglePlay, &content);

        let transition = reduce(&mut state, NavAction::SetChapter(2), &content);
        assert!(!transition.moved());
        assert_eq!(state.position(), (0, 2));
        assert!(state.is_playing());
    }

    #[test]
    fn set_panel_keeps_playback() {
        let content = table();
        let mut state = NavigationState::default();
        reduce(&mut state, NavAction::TogglePlay, &content);
        reduce(&mut state, NavAction::SetPanel(2), &content);
        assert_eq!(state.position(), (0, 2));
        assert!(state.is_playing());
    }

    #[test]
    fn set_panel_out_of_range_ignored() {
        let content = table();
        let mut state = state_at(&content, 1, 0);
        let transition = reduce(&mut state, NavAction::SetPanel(2), &content);
        assert!(!transition.moved());
        assert_eq!(state.position(), (1, 0));
    }

    #[test]
    fn set_panel_same_index_is_noop() {
        let content = table();
        let mut state = state_at(&content, 0, 1);
        let before = state.clone();
        let transition = reduce(&mut state, NavAction::SetPanel(1), &content);
        assert!(!transition.moved());
        assert_eq!(state, before);
    }

    #[test]
    fn advance_walks_the_album() {
        let content = table();
        let mut state = NavigationState::default();

        reduce(&mut state, NavAction::Advance, &content);
        assert_eq!(state.position(), (0, 1));
        reduce(&mut state, NavAction::Advance, &content);
        assert_eq!(state.position(), (0, 2));

        reduce(&mut state, NavAction::TogglePlay, &content);
        let transition = reduce(&mut state, NavAction::Advance, &content);
        assert_eq!(state.position(), (1, 0));
        assert!(transition.chapter_changed);
        assert!(!state.is_playing());

        reduce(&mut state, NavAction::Advance, &content);
        assert_eq!(state.position(), (1, 1));

        let transition = reduce(&mut state, NavAction::Advance, &content);
        assert!(!transition.moved());
        assert_eq!(state.position(), (1, 1));
    }

    #[test]
    fn retreat_enters_previous_chapter_at_its_last_panel() {
        let content = table();
        let mut state = state_at(&content, 1, 0);
        reduce(&mut state, NavAction::TogglePlay, &content);

        let transition = reduce(&mut state, NavAction::Retreat, &content);
        assert_eq!(state.position(), (0, 2));
        assert!(transition.chapter_changed);
        assert!(transition.panel_changed);
        assert!(!state.is_playing());
    }

    #[test]
    fn retreat_at_origin_is_noop() {
        let content = table();
        let mut state = NavigationState::default();
        let transition = reduce(&mut state, NavAction::Retreat, &content);
        assert!(!transition.moved());
        assert_eq!(state.position(), (0, 0));
    }

    #[test]
    fn advance_then_retreat_returns_except_at_end() {
        let content = table();
        let positions = all_positions(&content);
        let last = *positions.last().unwrap();

        for &(chapter, panel) in &positions {
            let mut state = state_at(&content, chapter, panel);
            reduce(&mut state, NavAction::Advance, &content);
            reduce(&mut state, NavAction::Retreat, &content);
            if (chapter, panel) == last {
                // Advance was a no-op, so retreat stepped back once.
                assert_eq!(state.position(), (1, 0));
            } else {
                assert_eq!(state.position(), (chapter, panel));
            }
        }
    }

    #[test]
    fn retreat_then_advance_returns_except_at_start() {
        let content = table();
        for &(chapter, panel) in &all_positions(&content) {
            let mut state = state_at(&content, chapter, panel);
            reduce(&mut state, NavAction::Retreat, &content);
            reduce(&mut state, NavAction::Advance, &content);
            if (chapter, panel) == (0, 0) {
                assert_eq!(state.position(), (0, 1));
            } else {
                assert_eq!(state.position(), (chapter, panel));
            }
        }
    }

    #[test]
    fn volume_is_clamped() {
        let content = table();
        let mut state = NavigationState::default();
        for v in [-3.0_f32, -0.0, 0.0, 0.25, 0.5, 1.0, 1.0001, 7.5, f32::INFINITY, f32::NEG_INFINITY] {
            reduce(&mut state, NavAction::SetVolume(v), &content);
            assert_eq!(state.volume(), v.max(0.0).min(1.0));
        }
        reduce(&mut state, NavAction::SetVolume(f32::NAN), &content);
        assert_eq!(state.volume(), 0.0);
    }

    #[test]
    fn toggles_do_not_move() {
        let content = table();
        let mut state = state_at(&content, 0, 1);
        for action in [NavAction::TogglePlay, NavAction::ToggleDebug, NavAction::SetVolume(0.2)] {
            let transition = reduce(&mut state, action, &content);
            assert!(!transition.moved());
            assert_eq!(state.position(), (0, 1));
        }
        assert!(state.is_playing());
        assert!(state.is_debug_visible());
    }

    #[test]
    fn empty_album_navigation_is_noop() {
        let content = ContentTable::default();
        let mut state = NavigationState::default();
        for action in [
            NavAction::Advance,
            NavAction::Retreat,
            NavAction::SetChapter(0),
            NavAction::SetPanel(0),
        ] {
            let transition = reduce(&mut state, action, &content);
            assert!(!transition.moved());
            assert_eq!(state.position(), (0, 0));
        }
    }
}
