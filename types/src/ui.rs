//! UI configuration shared by the engine (ownership) and the tui (rendering).

/// UI configuration options derived from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Freeze decorative animation (star twinkle).
    pub reduced_motion: bool,
}
