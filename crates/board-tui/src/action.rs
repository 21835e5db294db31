//! Action enum: all user-initiated intents and internal events.

use board_core::FileSelection;

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Board,
    PathPrompt,
    EventLog,
    HelpOverlay,
}

/// What the line prompt is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    OpenFile,
    Notice,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Schedule ─────────────────────────────────────────────────────────────
    OpenPrompt(PromptKind),
    /// Picker confirmed (path) or dismissed (none).
    SelectFile(FileSelection),
    /// Re-run the last selection.
    Reload,

    // ── Notice ───────────────────────────────────────────────────────────────
    SetNotice(Option<String>),
    /// Prompt closed without changing the notice.
    CancelPrompt,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLog,
    ToggleHelp,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
