use constellation::Animator;
use std::cell::Cell;
use web_sys::Document;

/// Top-level page panels. Only one is visible at a time.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Landing,
    Analyzing,
    Results,
}

impl ViewState {
    pub const ALL: [ViewState; 3] = [ViewState::Landing, ViewState::Analyzing, ViewState::Results];

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyzing" | "analysing" | "loading" => ViewState::Analyzing,
            "results" | "result" | "report" => ViewState::Results,
            _ => ViewState::Landing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewState::Landing => "landing",
            ViewState::Analyzing => "analyzing",
            ViewState::Results => "results",
        }
    }

    pub fn panel_id(self) -> String {
        format!("{}-view", self.as_str())
    }

    /// Overlay anchors live in the landing panel; styling them while another
    /// panel is up is wasted layout work.
    pub fn owns_overlays(self) -> bool {
        self == ViewState::Landing
    }
}

thread_local! {
    // Outlives any one animation run so a restart keeps the visible panel.
    static CURRENT: Cell<ViewState> = const { Cell::new(ViewState::Landing) };
}

pub fn remember(view: ViewState) {
    CURRENT.with(|c| c.set(view));
}

pub fn remembered() -> ViewState {
    CURRENT.with(Cell::get)
}

/// Turns overlay styling on or off for `view`.
pub fn gate_overlays<H>(animator: &mut Animator<H>, view: ViewState) {
    animator.set_overlays_active(view.owns_overlays());
}

/// Shows `view`'s panel and hides the others. Missing panels are ignored.
pub fn show_view(document: &Document, view: ViewState) {
    for v in ViewState::ALL {
        if let Some(panel) = document.get_element_by_id(&v.panel_id()) {
            let _ = if v == view {
                panel.remove_attribute("hidden")
            } else {
                panel.set_attribute("hidden", "")
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewState, gate_overlays, remember, remembered};
    use constellation::{
        Animator, ConstellationConfig, OverlayAnchor, OverlayStyle, StyleSink, Viewport,
    };
    use runtime::Frame;

    #[derive(Default)]
    struct CountingSink {
        applied: usize,
    }

    impl StyleSink<u8> for CountingSink {
        fn apply(&mut self, _handle: &u8, _style: &OverlayStyle) {
            self.applied += 1;
        }
    }

    /// What `start_constellation` does with the view once the DOM is read.
    fn start() -> Animator<u8> {
        let mut animator = Animator::new(
            ConstellationConfig::default(),
            Viewport::new(1280.0, 720.0),
            vec![OverlayAnchor::from_degrees(7, 10.0, 30.0)],
        )
        .unwrap();
        gate_overlays(&mut animator, remembered());
        animator
    }

    fn styled_after_tick(animator: &mut Animator<u8>) -> usize {
        let mut sink = CountingSink::default();
        animator.tick::<crate::canvas::CanvasSurface, _>(Frame::first(), None, &mut sink);
        sink.applied
    }

    #[test]
    fn parses_view_names_leniently() {
        assert_eq!(ViewState::from_str(" Results "), ViewState::Results);
        assert_eq!(ViewState::from_str("analyzing"), ViewState::Analyzing);
        assert_eq!(ViewState::from_str("anything"), ViewState::Landing);
    }

    #[test]
    fn only_landing_owns_overlays() {
        assert!(ViewState::Landing.owns_overlays());
        assert!(!ViewState::Analyzing.owns_overlays());
        assert!(!ViewState::Results.owns_overlays());
    }

    #[test]
    fn remembered_view_defaults_to_landing() {
        assert_eq!(remembered(), ViewState::Landing);
        assert_eq!(styled_after_tick(&mut start()), 1);
    }

    #[test]
    fn view_chosen_before_start_gates_the_new_animator() {
        remember(ViewState::Results);
        let mut animator = start();
        assert!(!animator.overlays().is_active());
        assert_eq!(styled_after_tick(&mut animator), 0);
    }

    #[test]
    fn restart_keeps_overlays_hidden_outside_landing() {
        remember(ViewState::Analyzing);
        let mut first = start();
        assert_eq!(styled_after_tick(&mut first), 0);
        drop(first);

        let mut second = start();
        assert_eq!(remembered(), ViewState::Analyzing);
        assert_eq!(styled_after_tick(&mut second), 0);

        remember(ViewState::Landing);
        gate_overlays(&mut second, remembered());
        assert_eq!(styled_after_tick(&mut second), 1);
    }

    #[test]
    fn panel_ids_follow_view_names() {
        assert_eq!(ViewState::Results.panel_id(), "results-view");
    }
}
