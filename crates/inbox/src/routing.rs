//! List/thread view routing for narrow viewports
//!
//! The mode is global (not per thread). Wide layouts render both panes
//! regardless, but the mode is still tracked so a viewport change mid-session
//! resumes where the user left off.

use serde::{Deserialize, Serialize};

/// Which pane a narrow viewport shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileView {
    #[default]
    List,
    Thread,
}

/// Events that drive the view router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEvent {
    /// A thread was selected from the list
    SelectThread,
    /// Explicit back navigation
    GoBack,
    /// Direct override from a toggle
    Set(MobileView),
}

impl MobileView {
    /// Next mode after `event`. Every state accepts every event.
    pub fn apply(self, event: RouteEvent) -> MobileView {
        match event {
            RouteEvent::SelectThread => MobileView::Thread,
            RouteEvent::GoBack => MobileView::List,
            RouteEvent::Set(view) => view,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MobileView::List => "list",
            MobileView::Thread => "thread",
        }
    }
}
