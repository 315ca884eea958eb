//! Viewer-side state driven by the external rendering component.

/// Callbacks the rendering component issues while it displays a document.
///
/// Page numbers are 1-based.
pub trait ViewerEvents {
    fn page_changed(&mut self, current_page: u32, total_pages: u32);

    fn document_loaded(&mut self, total_pages: u32);

    fn document_load_failed(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Loading,
    Ready { current_page: u32, total_pages: u32 },
    Failed(String),
}

/// Page navigation state for one open document.
///
/// Navigation methods return the page to ask the renderer for; the session itself only moves
/// when the renderer reports back through [`ViewerEvents::page_changed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSession {
    title: String,
    state: ViewerState,
}

impl ViewerSession {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), state: ViewerState::Loading }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn current_page(&self) -> Option<u32> {
        match self.state {
            ViewerState::Ready { current_page, .. } => Some(current_page),
            _ => None,
        }
    }

    pub fn total_pages(&self) -> Option<u32> {
        match self.state {
            ViewerState::Ready { total_pages, .. } => Some(total_pages),
            _ => None,
        }
    }

    pub fn next_page(&self) -> Option<u32> {
        let current = self.current_page()?;
        self.go_to_page(current.saturating_add(1))
    }

    pub fn previous_page(&self) -> Option<u32> {
        let current = self.current_page()?;
        self.go_to_page(current.saturating_sub(1))
    }

    /// Clamps `page` into the document and returns it unless it is already shown.
    pub fn go_to_page(&self, page: u32) -> Option<u32> {
        let ViewerState::Ready { current_page, total_pages } = self.state else {
            return None;
        };

        let target = page.clamp(1, total_pages.max(1));
        (target != current_page).then_some(target)
    }

    /// "current / total", or a status word while loading or after a failure.
    pub fn page_label(&self) -> String {
        match &self.state {
            ViewerState::Loading => "loading".to_owned(),
            ViewerState::Ready { current_page, total_pages } => {
                format!("{current_page} / {total_pages}")
            }
            ViewerState::Failed(_) => "failed".to_owned(),
        }
    }
}

impl ViewerEvents for ViewerSession {
    fn page_changed(&mut self, current_page: u32, total_pages: u32) {
        let total_pages = total_pages.max(1);
        self.state =
            ViewerState::Ready { current_page: current_page.clamp(1, total_pages), total_pages };
    }

    fn document_loaded(&mut self, total_pages: u32) {
        log::debug!("{} loaded with {total_pages} page(s)", self.title);
        self.state = ViewerState::Ready { current_page: 1, total_pages: total_pages.max(1) };
    }

    fn document_load_failed(&mut self, message: &str) {
        log::warn!("failed to load {}: {message}", self.title);
        self.state = ViewerState::Failed(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_without_navigation() {
        let session = ViewerSession::new("a.pdf");
        assert_eq!(session.state(), &ViewerState::Loading);
        assert_eq!(session.next_page(), None);
        assert_eq!(session.page_label(), "loading");
    }

    #[test]
    fn navigation_is_clamped_to_document() {
        let mut session = ViewerSession::new("a.pdf");
        session.document_loaded(3);

        assert_eq!(session.page_label(), "1 / 3");
        assert_eq!(session.previous_page(), None);
        assert_eq!(session.next_page(), Some(2));
        assert_eq!(session.go_to_page(99), Some(3));

        session.page_changed(3, 3);
        assert_eq!(session.next_page(), None);
        assert_eq!(session.previous_page(), Some(2));
        assert_eq!(session.go_to_page(0), Some(1));
    }

    #[test]
    fn load_failure_keeps_message() {
        let mut session = ViewerSession::new("a.pdf");
        session.document_load_failed("corrupt xref table");

        assert_eq!(session.state(), &ViewerState::Failed("corrupt xref table".to_owned()));
        assert_eq!(session.current_page(), None);
        assert_eq!(session.page_label(), "failed");
    }

    #[test]
    fn page_changed_clamps_reported_page() {
        let mut session = ViewerSession::new("a.pdf");
        session.page_changed(7, 5);

        assert_eq!(session.current_page(), Some(5));
        assert_eq!(session.total_pages(), Some(5));
    }
}
