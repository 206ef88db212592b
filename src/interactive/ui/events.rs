use crate::interactive::domain::models::SearchResponse;
use crate::schemas::SearchResultKind;

#[derive(Clone, Debug)]
pub enum Message {
    // Overlay lifecycle
    OpenOverlay,
    CloseOverlay,
    BackdropClicked,

    // Search events
    QueryChanged(String),
    DebounceElapsed(String),
    SearchCompleted(SearchResponse),
    Retry,

    // Result selection
    SelectNext,
    SelectPrevious,
    HoverResult(usize), // flat index under the pointer
    ActivateSelected,
    ActivateResult(usize),

    // Kind filter
    ToggleKind(SearchResultKind),
    ClearKinds,
    BadgeCursorNext,
    BadgeCursorPrevious,
    ToggleBadgeAtCursor,

    // Shell
    ToggleSidebar,
    SectionUp,
    SectionDown,
    OpenSection(usize),

    // UI events
    SetStatus(String),
    ClearMessage,
}
