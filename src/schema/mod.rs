pub mod chapter;
pub mod panel;
