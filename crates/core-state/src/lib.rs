//! Session state that would otherwise be global mutable state: screen
//! dimensions, play/pause, and consensus-highlight toggles.
//!
//! The reference implementation keeps `scrw`, `scrh`, `paused`, and
//! `highlight` as module-level globals mutated from inside nested functions
//! via `global`. REDESIGN FLAGS calls this out explicitly; here it is a
//! single [`AppState`] value the main loop owns and passes by `&mut`
//! reference to whatever needs to read or change it — no statics, no
//! singletons.

/// Whether the viewer is auto-scrolling on its own 100ms tick or sitting
/// still waiting for manual `Up`/`Down`/`Resize` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

impl PlayState {
    pub fn toggle(&mut self) {
        *self = match self {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
        };
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlayState::Playing)
    }
}

/// Which consensus-sequence highlighters are currently active. Grounded on
/// the reference implementation's `highlight = {'cpg': False, 'tata': False}`
/// dict and the `hl=NAME[,NAME...]` CLI option that flips entries in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightToggles {
    pub cpg: bool,
    pub tata: bool,
}

impl HighlightToggles {
    /// Enable the named highlighter (case-insensitive). Unknown names are
    /// silently ignored, matching `parse_options`'s `if hl in highlight`.
    pub fn enable(&mut self, name: &str) {
        match name.to_ascii_lowercase().as_str() {
            "cpg" => self.cpg = true,
            "tata" => self.tata = true,
            _ => tracing::debug!(target: "state", name, "unrecognized highlighter name, ignoring"),
        }
    }
}

/// Top-level mutable session state: terminal dimensions plus the two
/// toggles above. Owned by `ox-bin`'s main loop and threaded through
/// `core-render::fill` and the event handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub scrw: u16,
    pub scrh: u16,
    pub play_state: PlayState,
    pub highlights: HighlightToggles,
}

impl AppState {
    pub fn new(scrw: u16, scrh: u16, play_state: PlayState, highlights: HighlightToggles) -> Self {
        AppState { scrw, scrh, play_state, highlights }
    }

    /// Terminal dimensions are below the usable minimum (spec.md §7, exit
    /// code 3): width `< 20` or height `< 10`.
    pub fn too_small(&self) -> bool {
        self.scrw < 20 || self.scrh < 10
    }

    pub fn resize(&mut self, scrw: u16, scrh: u16) {
        self.scrw = scrw;
        self.scrh = scrh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_state_toggles() {
        let mut state = PlayState::Playing;
        state.toggle();
        assert_eq!(state, PlayState::Paused);
        state.toggle();
        assert_eq!(state, PlayState::Playing);
    }

    #[test]
    fn highlight_toggle_is_case_insensitive() {
        let mut h = HighlightToggles::default();
        h.enable("CpG");
        h.enable("TATA");
        assert!(h.cpg);
        assert!(h.tata);
    }

    #[test]
    fn unknown_highlighter_name_is_ignored() {
        let mut h = HighlightToggles::default();
        h.enable("bogus");
        assert_eq!(h, HighlightToggles::default());
    }

    #[test]
    fn too_small_thresholds() {
        let mut state = AppState::new(19, 10, PlayState::Paused, HighlightToggles::default());
        assert!(state.too_small());
        state.resize(20, 9);
        assert!(state.too_small());
        state.resize(20, 10);
        assert!(!state.too_small());
    }
}
