//! Side-panel layout state machine.
//!
//! ```text
//!            Open(kind)                PointerDown
//!   Closed ─────────────▶ Open(kind) ─────────────▶ Resizing(kind)
//!     ▲                    │    ▲                        │
//!     └──────── Close ─────┘    └─────── PointerUp ──────┘
//!     ▲                                                  │
//!     └───────────────────────── Close ──────────────────┘
//! ```
//!
//! The panel width is a percentage of the viewport width and is always kept
//! inside [`ResizeBounds`].  While [`PanelState::Resizing`] the view layer
//! must forward document-wide pointer moves and releases; outside of it no
//! global listener should be installed ([`PanelLayout::wants_pointer_capture`]).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

/// Fixed width of the navigation sidebar, in CSS pixels.
pub const SIDEBAR_WIDTH_PX: f64 = 256.0;
pub const DEFAULT_WIDTH_PERCENT: f64 = 25.0;
/// Viewport assumed until the first resize event arrives.
pub const DEFAULT_VIEWPORT_PX: f64 = 1000.0;

/// The two mutually exclusive side panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum PanelKind {
    #[strum(serialize = "Legal Q&A")]
    #[serde(rename = "Legal Q&A")]
    LegalQa,
    #[strum(serialize = "Contract Drafting")]
    #[serde(rename = "Contract Drafting")]
    ContractDrafting,
}

impl PanelKind {
    /// Panel header.
    pub fn title(self) -> &'static str {
        match self {
            PanelKind::LegalQa => "Legal Assistant Bot",
            PanelKind::ContractDrafting => "Contract Drafting Studio",
        }
    }

    /// Badge text in the recent-chats list.
    pub fn short_label(self) -> &'static str {
        match self {
            PanelKind::LegalQa => "Q&A",
            PanelKind::ContractDrafting => "Drafting",
        }
    }
}

/// Inclusive width limits, in percent of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeBounds {
    min_percent: f64,
    max_percent: f64,
}

impl ResizeBounds {
    /// `None` unless `0 <= min <= max <= 100`.
    pub fn new(min_percent: f64, max_percent: f64) -> Option<Self> {
        let valid = min_percent.is_finite()
            && max_percent.is_finite()
            && (0.0..=100.0).contains(&min_percent)
            && (0.0..=100.0).contains(&max_percent)
            && min_percent <= max_percent;
        valid.then_some(Self {
            min_percent,
            max_percent,
        })
    }

    pub fn min_percent(&self) -> f64 {
        self.min_percent
    }

    pub fn max_percent(&self) -> f64 {
        self.max_percent
    }

    pub fn clamp(&self, percent: f64) -> f64 {
        percent.clamp(self.min_percent, self.max_percent)
    }
}

impl Default for ResizeBounds {
    fn default() -> Self {
        Self {
            min_percent: 20.0,
            max_percent: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open(PanelKind),
    Resizing(PanelKind),
}

/// Input events, already decoded from the DOM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    /// One of the two launcher buttons was pressed.
    Open(PanelKind),
    Close,
    /// Pointer pressed on the resize handle.
    PointerDown,
    /// Document-wide pointer move; `client_x` in CSS pixels.
    PointerMove { client_x: f64 },
    /// Document-wide pointer release.
    PointerUp,
    ViewportResized { width: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    state: PanelState,
    width_percent: f64,
    viewport_width: f64,
    sidebar_width: f64,
    bounds: ResizeBounds,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(ResizeBounds::default())
    }
}

impl PanelLayout {
    pub fn new(bounds: ResizeBounds) -> Self {
        Self {
            state: PanelState::Closed,
            width_percent: bounds.clamp(DEFAULT_WIDTH_PERCENT),
            viewport_width: DEFAULT_VIEWPORT_PX,
            sidebar_width: SIDEBAR_WIDTH_PX,
            bounds,
        }
    }

    pub fn with_viewport(mut self, width: f64) -> Self {
        if width.is_finite() && width > 0.0 {
            self.viewport_width = width;
        }
        self
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn width_percent(&self) -> f64 {
        self.width_percent
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn bounds(&self) -> ResizeBounds {
        self.bounds
    }

    pub fn active_panel(&self) -> Option<PanelKind> {
        match self.state {
            PanelState::Closed => None,
            PanelState::Open(kind) | PanelState::Resizing(kind) => Some(kind),
        }
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, PanelState::Resizing(_))
    }

    /// Both launcher buttons are disabled while any panel is shown.
    pub fn can_open(&self, _kind: PanelKind) -> bool {
        self.state == PanelState::Closed
    }

    /// `true` exactly while document-wide pointer listeners are needed.
    pub fn wants_pointer_capture(&self) -> bool {
        self.is_resizing()
    }

    /// CSS width of the main content column.
    pub fn content_width_css(&self) -> String {
        match self.state {
            PanelState::Closed => "100%".to_owned(),
            _ => format!("calc(100% - {}vw)", self.width_percent),
        }
    }

    /// Feed one event.  Returns `true` when the state or width changed;
    /// events that do not apply in the current state are ignored.
    pub fn apply(&mut self, event: PanelEvent) -> bool {
        let before = (self.state, self.width_percent, self.viewport_width);

        match (self.state, event) {
            (PanelState::Closed, PanelEvent::Open(kind)) => {
                self.state = PanelState::Open(kind);
            }
            (PanelState::Open(_) | PanelState::Resizing(_), PanelEvent::Close) => {
                self.state = PanelState::Closed;
            }
            (PanelState::Open(kind), PanelEvent::PointerDown) => {
                self.state = PanelState::Resizing(kind);
            }
            (PanelState::Resizing(_), PanelEvent::PointerMove { client_x }) => {
                if let Some(width) = self.width_for_pointer(client_x) {
                    self.width_percent = width;
                }
            }
            (PanelState::Resizing(kind), PanelEvent::PointerUp) => {
                self.state = PanelState::Open(kind);
            }
            (state, PanelEvent::ViewportResized { width }) => {
                if width.is_finite() && width > 0.0 {
                    self.viewport_width = width;
                }
                if state != PanelState::Closed {
                    self.width_percent = self.bounds.clamp(self.width_percent);
                }
            }
            (state, ignored) => {
                debug!(?state, event = ?ignored, "panel event ignored");
            }
        }

        let changed = before != (self.state, self.width_percent, self.viewport_width);
        if changed && before.0 != self.state {
            debug!(from = ?before.0, to = ?self.state, "panel state changed");
        }
        changed
    }

    /// Panel width for a pointer at `client_x`: the part of the content area
    /// right of the pointer, rescaled from content width to viewport width.
    fn width_for_pointer(&self, client_x: f64) -> Option<f64> {
        let content_width = self.viewport_width - self.sidebar_width;
        if !client_x.is_finite() || content_width <= 0.0 {
            return None;
        }
        let dashboard_px = client_x - self.sidebar_width;
        let share_of_content = 100.0 - (dashboard_px / content_width) * 100.0;
        let share_of_viewport = share_of_content / 100.0 * (content_width / self.viewport_width) * 100.0;
        Some(self.bounds.clamp(share_of_viewport))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    fn open_layout(kind: PanelKind) -> PanelLayout {
        let mut layout = PanelLayout::default();
        assert!(layout.apply(PanelEvent::Open(kind)));
        layout
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn starts_closed_with_default_width() {
        let layout = PanelLayout::default();
        assert_eq!(layout.state(), PanelState::Closed);
        assert_eq!(layout.width_percent(), DEFAULT_WIDTH_PERCENT);
        assert_eq!(layout.content_width_css(), "100%");
        assert!(!layout.wants_pointer_capture());
    }

    #[test]
    fn panels_are_mutually_exclusive() {
        let mut layout = open_layout(PanelKind::LegalQa);
        assert!(!layout.can_open(PanelKind::ContractDrafting));
        assert!(!layout.apply(PanelEvent::Open(PanelKind::ContractDrafting)));
        assert_eq!(layout.active_panel(), Some(PanelKind::LegalQa));

        assert!(layout.apply(PanelEvent::Close));
        assert_eq!(layout.active_panel(), None);
        assert!(layout.can_open(PanelKind::ContractDrafting));
        assert!(layout.apply(PanelEvent::Open(PanelKind::ContractDrafting)));
        assert_eq!(layout.content_width_css(), "calc(100% - 25vw)");
    }

    #[test]
    fn drag_follows_pointer() {
        let mut layout = open_layout(PanelKind::LegalQa);
        assert!(layout.apply(PanelEvent::PointerDown));
        assert!(layout.wants_pointer_capture());

        layout.apply(PanelEvent::PointerMove { client_x: 600.0 });
        assert_close(layout.width_percent(), 40.0);
        layout.apply(PanelEvent::PointerMove { client_x: 450.0 });
        assert_close(layout.width_percent(), 55.0);

        assert!(layout.apply(PanelEvent::PointerUp));
        assert_eq!(layout.state(), PanelState::Open(PanelKind::LegalQa));
        assert!(!layout.wants_pointer_capture());
    }

    #[test]
    fn drag_saturates_at_bounds() {
        let mut layout = open_layout(PanelKind::ContractDrafting);
        layout.apply(PanelEvent::PointerDown);

        for x in [-10_000.0, 0.0, 100.0, 199.0] {
            layout.apply(PanelEvent::PointerMove { client_x: x });
            assert_eq!(layout.width_percent(), 80.0, "x = {x}");
        }
        for x in [801.0, 1000.0, 5000.0, f64::MAX] {
            layout.apply(PanelEvent::PointerMove { client_x: x });
            assert_eq!(layout.width_percent(), 20.0, "x = {x}");
        }
    }

    #[test]
    fn every_pointer_position_yields_width_in_bounds() {
        let mut layout = open_layout(PanelKind::LegalQa).with_viewport(1440.0);
        layout.apply(PanelEvent::PointerDown);
        let mut x = -2000.0;
        while x <= 4000.0 {
            layout.apply(PanelEvent::PointerMove { client_x: x });
            let w = layout.width_percent();
            assert!((20.0..=80.0).contains(&w), "x = {x}, w = {w}");
            x += 7.5;
        }
    }

    #[test]
    fn moves_outside_a_drag_are_ignored() {
        let mut layout = PanelLayout::default();
        assert!(!layout.apply(PanelEvent::PointerMove { client_x: 300.0 }));
        assert!(!layout.apply(PanelEvent::PointerDown));
        assert_eq!(layout.state(), PanelState::Closed);

        layout.apply(PanelEvent::Open(PanelKind::LegalQa));
        assert!(!layout.apply(PanelEvent::PointerMove { client_x: 300.0 }));
        assert!(!layout.apply(PanelEvent::PointerUp));
        assert_eq!(layout.width_percent(), DEFAULT_WIDTH_PERCENT);
    }

    #[test]
    fn non_finite_pointer_and_degenerate_viewport_are_ignored() {
        let mut layout = open_layout(PanelKind::LegalQa);
        layout.apply(PanelEvent::PointerDown);
        assert!(!layout.apply(PanelEvent::PointerMove { client_x: f64::NAN }));

        assert!(layout.apply(PanelEvent::ViewportResized { width: 200.0 }));
        assert!(!layout.apply(PanelEvent::PointerMove { client_x: 100.0 }));
        assert!(!layout.apply(PanelEvent::ViewportResized { width: 0.0 }));
        assert_eq!(layout.viewport_width(), 200.0);
        assert_eq!(layout.width_percent(), DEFAULT_WIDTH_PERCENT);
    }

    #[test]
    fn viewport_resize_reclamps_and_drag_uses_new_viewport() {
        let mut layout = open_layout(PanelKind::LegalQa);
        layout.apply(PanelEvent::ViewportResized { width: 2000.0 });
        assert!((20.0..=80.0).contains(&layout.width_percent()));

        layout.apply(PanelEvent::PointerDown);
        layout.apply(PanelEvent::PointerMove { client_x: 1500.0 });
        assert_close(layout.width_percent(), 25.0);
    }

    #[test]
    fn closing_mid_drag_releases_capture_and_width_persists() {
        let mut layout = open_layout(PanelKind::LegalQa);
        layout.apply(PanelEvent::PointerDown);
        layout.apply(PanelEvent::PointerMove { client_x: 500.0 });
        assert!(layout.apply(PanelEvent::Close));
        assert!(!layout.wants_pointer_capture());

        layout.apply(PanelEvent::Open(PanelKind::ContractDrafting));
        assert_close(layout.width_percent(), 50.0);
    }

    #[test]
    fn custom_bounds_clamp_initial_width() {
        assert!(ResizeBounds::new(60.0, 40.0).is_none());
        assert!(ResizeBounds::new(-1.0, 40.0).is_none());
        assert!(ResizeBounds::new(10.0, f64::NAN).is_none());

        let bounds = ResizeBounds::new(30.0, 70.0).unwrap();
        let mut layout = PanelLayout::new(bounds);
        assert_eq!(layout.width_percent(), 30.0);
        layout.apply(PanelEvent::Open(PanelKind::LegalQa));
        layout.apply(PanelEvent::PointerDown);
        layout.apply(PanelEvent::PointerMove { client_x: 0.0 });
        assert_eq!(layout.width_percent(), 70.0);
    }

    #[test]
    fn panel_kind_labels() {
        assert_eq!(PanelKind::LegalQa.to_string(), "Legal Q&A");
        assert_eq!("Contract Drafting".parse::<PanelKind>().unwrap(), PanelKind::ContractDrafting);
        assert_eq!(PanelKind::ContractDrafting.short_label(), "Drafting");
        assert_eq!(PanelKind::LegalQa.title(), "Legal Assistant Bot");
    }
}
