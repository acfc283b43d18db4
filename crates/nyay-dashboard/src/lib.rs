//! nyay-dashboard – client-side state of the legal-assistant dashboard.
//!
//! Nothing in here renders.  The crate owns the state a view layer binds to:
//! the side-panel layout machine ([`panel`]), the two mocked chat panels
//! ([`chat`]) and the static overview data ([`mock`]).

pub mod chat;
pub mod mock;
pub mod panel;

pub use chat::{sample_answer, ChatPanel, PanelMessage, PanelRole, Source, StructuredAnswer};
pub use mock::{DataTab, Overview, OverviewRows};
pub use panel::{PanelEvent, PanelKind, PanelLayout, PanelState, ResizeBounds};
