/// Navigation integration tests — walking an album loaded from RON.

use album_engine::core::effects::{Effect, EffectConfig};
use album_engine::core::engine::AlbumEngine;
use album_engine::core::navigation::NavAction;

fn fixture_engine() -> AlbumEngine {
    AlbumEngine::builder()
        .content_path("tests/fixtures/test_album.ron")
        .build()
        .unwrap()
}

#[test]
fn advance_through_two_chapters() {
    let mut engine = fixture_engine();
    assert_eq!(engine.state().position(), (0, 0));

    engine.advance();
    assert_eq!(engine.state().position(), (0, 1));
    engine.advance();
    assert_eq!(engine.state().position(), (0, 2));

    engine.toggle_play();
    engine.advance();
    assert_eq!(engine.state().position(), (1, 0));
    assert!(!engine.state().is_playing(), "chapter change must stop playback");

    engine.advance();
    assert_eq!(engine.state().position(), (1, 1));

    let transition = engine.advance();
    assert!(!transition.moved());
    assert_eq!(engine.state().position(), (1, 1));
}

#[test]
fn retreat_into_previous_chapter() {
    let mut engine = fixture_engine();
    engine.set_chapter(1);
    engine.toggle_play();

    engine.retreat();
    assert_eq!(engine.state().position(), (0, 2));
    assert!(!engine.state().is_playing());
    assert_eq!(
        engine.current_panel().map(|p| p.title.as_str()),
        Some("Last light")
    );
}

#[test]
fn set_panel_to_current_index_changes_nothing() {
    let mut engine = fixture_engine();
    engine.set_panel(1);
    let state = engine.state().clone();
    let effects = engine.effects().clone();

    let transition = engine.dispatch(NavAction::SetPanel(1));
    assert!(!transition.moved());
    assert_eq!(engine.state(), &state);
    assert_eq!(engine.effects(), &effects);
}

#[test]
fn out_of_range_requests_are_ignored() {
    let mut engine = fixture_engine();
    engine.set_panel(2);
    engine.set_chapter(7);
    engine.set_panel(3);
    assert_eq!(engine.state().position(), (0, 2));
}

#[test]
fn burning_and_door_panel_shows_exactly_those() {
    let engine = fixture_engine();
    let visible: Vec<Effect> = engine.effects().visible_effects().collect();
    assert_eq!(visible.len(), 2);
    assert!(engine.effects().is_visible(Effect::Burning));
    assert!(engine.effects().is_visible(Effect::Door));
}

#[test]
fn effects_return_unchanged_after_a_detour() {
    let mut engine = fixture_engine();
    engine.set_chapter(1);
    let road = engine.effects().clone();
    assert!(road.is_visible(Effect::Road));

    engine.advance();
    assert!(engine.effects().is_visible(Effect::NeonTitle));
    assert!(!engine.effects().is_visible(Effect::Road));

    engine.retreat();
    assert_eq!(engine.effects(), &road);
    assert!(!engine.effects().is_visible(Effect::NeonTitle));
}

#[test]
fn effects_match_fresh_projection_everywhere() {
    let mut engine = fixture_engine();
    loop {
        assert_eq!(
            engine.effects(),
            &EffectConfig::project(engine.current_panel())
        );
        if !engine.advance().moved() {
            break;
        }
    }
}

#[test]
fn volume_clamps_through_engine() {
    let mut engine = fixture_engine();
    engine.set_volume(-0.5);
    assert_eq!(engine.state().volume(), 0.0);
    engine.set_volume(0.65);
    assert_eq!(engine.state().volume(), 0.65);
    engine.set_volume(3.0);
    assert_eq!(engine.state().volume(), 1.0);
}

#[test]
fn config_file_sets_start_state() {
    let engine = AlbumEngine::builder()
        .content_path("tests/fixtures/test_album.ron")
        .config_path("tests/fixtures/test_config.ron")
        .build()
        .unwrap();
    assert_eq!(engine.state().position(), (1, 0));
    assert!(engine.state().is_debug_mode());
    assert!(!engine.state().is_debug_visible());
    assert_eq!(engine.state().volume(), 0.5);
}
