//! Actions that modules return to communicate with the app

use crate::domain::Page;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Advance the page's cyclable chart to its next visual type
    CycleChart,

    /// Show a specific page
    SwitchPage(Page),

    /// Show the other page
    NextPage,

    /// Re-issue every endpoint fetch
    Reload,

    /// Write the active page's data to the export directory
    Export,

    /// Toggle the key binding overlay
    ToggleHelp,

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
