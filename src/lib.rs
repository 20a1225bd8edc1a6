//! Album Engine — navigation and effect derivation for interactive albums.
//!
//! Steps a visitor through an authored sequence of chapters and panels,
//! tracks playback and volume, and projects each panel's flags into the
//! set of decorative effects the presentation layer should show.

pub mod core;
#[cfg(feature = "logging")]
pub mod logging;
pub mod schema;
