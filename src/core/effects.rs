/// Effect projection — derives the decorative effect set from a panel.
///
/// Each effect is one row of [`EFFECT_TABLE`]: a trigger predicate over the
/// panel's flags and a function shaping the effect's parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::panel::{Panel, PanelFlags};

/// Named decorative presentation behaviors, declared back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Burning,
    Road,
    Mirrors,
    SplitScreen,
    Epilogue,
    Door,
    Insignia,
    LightRays,
    NeonTitle,
    Rain,
    Smoke,
    Embers,
    Static,
    Stars,
}

impl Effect {
    /// Returns the effect's name as the presentation layer keys it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Burning => "burning",
            Self::Road => "road",
            Self::Door => "door",
            Self::Insignia => "insignia",
            Self::LightRays => "light_rays",
            Self::NeonTitle => "neon_title",
            Self::SplitScreen => "split_screen",
            Self::Epilogue => "epilogue",
            Self::Mirrors => "mirrors",
            Self::Rain => "rain",
            Self::Smoke => "smoke",
            Self::Embers => "embers",
            Self::Static => "static",
            Self::Stars => "stars",
        }
    }

    /// Full-screen backdrops. Authors normally intend one per panel.
    pub fn is_scene(&self) -> bool {
        matches!(
            self,
            Self::Burning | Self::Road | Self::Mirrors | Self::SplitScreen | Self::Epilogue
        )
    }

    pub fn from_name(name: &str) -> Option<Effect> {
        EFFECT_TABLE
            .iter()
            .map(|rule| rule.effect)
            .find(|effect| effect.name() == name)
    }
}

/// Anchor point for positioned effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectPosition {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Visibility and parameters of one effect for the current panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    pub visible: bool,
    /// 0.0..1.0
    pub intensity: f32,
    pub color: String,
    pub position: EffectPosition,
    pub rotate: bool,
    pub pulse: bool,
    /// 0.0..1.0
    pub opacity: f32,
}

impl Default for EffectState {
    fn default() -> Self {
        Self {
            visible: false,
            intensity: 1.0,
            color: DEFAULT_COLOR.to_string(),
            position: EffectPosition::Center,
            rotate: false,
            pulse: false,
            opacity: 1.0,
        }
    }
}

const DEFAULT_COLOR: &str = "white";

impl EffectState {
    fn shown() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }
}

/// One row of the effect table.
pub struct EffectRule {
    pub effect: Effect,
    pub trigger: fn(&PanelFlags) -> bool,
    pub shape: fn(&PanelFlags) -> EffectState,
}

/// Every effect, in presentation layering order. Adding an effect is one
/// `Effect` variant plus one row here.
#[rustfmt::skip]
pub static EFFECT_TABLE: &[EffectRule] = &[
    EffectRule { effect: Effect::Burning, trigger: |f| f.has_burning, shape: |_| EffectState { intensity: 0.8, color: "orange".to_string(), ..EffectState::shown() } },
    EffectRule { effect: Effect::Road, trigger: |f| f.has_road, shape: |_| EffectState::shown() },
    EffectRule { effect: Effect::Mirrors, trigger: |f| f.has_mirrors, shape: |_| EffectState { opacity: 0.85, ..EffectState::shown() } },
    EffectRule { effect: Effect::SplitScreen, trigger: |f| f.split_screen, shape: |_| EffectState::shown() },
    EffectRule { effect: Effect::Epilogue, trigger: |f| f.epilogue, shape: |_| EffectState { opacity: 0.9, ..EffectState::shown() } },
    EffectRule { effect: Effect::Door, trigger: |f| f.has_door, shape: |_| EffectState::shown() },
    EffectRule { effect: Effect::Insignia, trigger: |f| f.has_insignia, shape: shape_insignia },
    EffectRule { effect: Effect::LightRays, trigger: |f| f.neon_title, shape: |f| EffectState { intensity: 0.6, color: neon_color(f), rotate: true, ..EffectState::shown() } },
    EffectRule { effect: Effect::NeonTitle, trigger: |f| f.neon_title, shape: |f| EffectState { color: neon_color(f), pulse: true, ..EffectState::shown() } },
    EffectRule { effect: Effect::Rain, trigger: |f| f.has_rain, shape: |f| EffectState { intensity: if f.heavy_rain { 1.0 } else { 0.5 }, ..EffectState::shown() } },
    EffectRule { effect: Effect::Smoke, trigger: |f| f.has_smoke, shape: |_| EffectState { opacity: 0.4, color: "gray".to_string(), ..EffectState::shown() } },
    EffectRule { effect: Effect::Embers, trigger: |f| f.has_embers, shape: |_| EffectState { intensity: 0.7, color: "orange".to_string(), ..EffectState::shown() } },
    EffectRule { effect: Effect::Static, trigger: |f| f.has_static, shape: |_| EffectState { opacity: 0.3, ..EffectState::shown() } },
    EffectRule { effect: Effect::Stars, trigger: |f| f.has_stars, shape: |_| EffectState { intensity: 0.5, pulse: true, ..EffectState::shown() } },
];

fn neon_color(flags: &PanelFlags) -> String {
    flags
        .neon_color
        .clone()
        .unwrap_or_else(|| DEFAULT_COLOR.to_string())
}

fn shape_insignia(flags: &PanelFlags) -> EffectState {
    let large = flags.has_insignia && flags.large_insignia;
    EffectState {
        position: if large {
            EffectPosition::Center
        } else {
            EffectPosition::TopRight
        },
        rotate: large,
        pulse: large,
        opacity: if large { 1.0 } else { 0.6 },
        ..EffectState::shown()
    }
}

/// The full effect set for one panel. Always holds an entry per effect;
/// iteration runs in layering order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectConfig {
    effects: BTreeMap<Effect, EffectState>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::hidden()
    }
}

impl EffectConfig {
    /// Every effect hidden with default parameters.
    pub fn hidden() -> Self {
        Self {
            effects: EFFECT_TABLE
                .iter()
                .map(|rule| (rule.effect, EffectState::default()))
                .collect(),
        }
    }

    /// Derive a fresh configuration from a panel. Nothing carries over from
    /// any earlier projection; a missing panel projects to all hidden.
    pub fn project(panel: Option<&Panel>) -> Self {
        let Some(panel) = panel else {
            return Self::hidden();
        };

        let effects = EFFECT_TABLE
            .iter()
            .map(|rule| {
                let state = if (rule.trigger)(&panel.flags) {
                    (rule.shape)(&panel.flags)
                } else {
                    EffectState::default()
                };
                (rule.effect, state)
            })
            .collect();

        Self { effects }
    }

    pub fn get(&self, effect: Effect) -> &EffectState {
        // Built from EFFECT_TABLE, so every effect has an entry.
        &self.effects[&effect]
    }

    pub fn is_visible(&self, effect: Effect) -> bool {
        self.get(effect).visible
    }

    pub fn visible_effects(&self) -> impl Iterator<Item = Effect> + '_ {
        self.effects
            .iter()
            .filter(|(_, state)| state.visible)
            .map(|(effect, _)| *effect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Effect, &EffectState)> {
        self.effects.iter().map(|(effect, state)| (*effect, state))
    }
}
