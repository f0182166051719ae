//! Navigation history: back and forward stacks of visited pages.

/// A visited page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
}

/// Back/forward history controller.
///
/// `navigate` pushes the current page onto the back stack and clears
/// the forward stack, the usual browser discipline.
#[derive(Debug, Default)]
pub struct NavigationController {
    back_stack: Vec<HistoryEntry>,
    forward_stack: Vec<HistoryEntry>,
    current: Option<HistoryEntry>,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a newly loaded page current.
    pub fn navigate(&mut self, url: &str, title: &str) {
        if let Some(entry) = self.current.take() {
            self.back_stack.push(entry);
        }
        self.forward_stack.clear();
        self.current = Some(HistoryEntry {
            url: url.to_string(),
            title: title.to_string(),
        });
    }

    /// Step back in history. Returns the entry to re-present, or
    /// `None` at the far end.
    pub fn go_back(&mut self) -> Option<HistoryEntry> {
        let prev = self.back_stack.pop()?;
        if let Some(current) = self.current.take() {
            self.forward_stack.push(current);
        }
        self.current = Some(prev.clone());
        Some(prev)
    }

    /// Step forward in history.
    pub fn go_forward(&mut self) -> Option<HistoryEntry> {
        let next = self.forward_stack.pop()?;
        if let Some(current) = self.current.take() {
            self.back_stack.push(current);
        }
        self.current = Some(next.clone());
        Some(next)
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.url.as_str())
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.title.as_str())
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
