//! State tied to one run of the storefront: what the user is looking at and
//! the order message waiting for the redirect confirmation.

use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    current_product: Option<String>,
    selected_package: Option<usize>,
    salary_product: Option<String>,
    pending_message: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_product(&self) -> Option<&str> {
        self.current_product.as_deref()
    }

    pub fn set_current_product(&mut self, id: Option<String>) {
        self.current_product = id;
        self.selected_package = None;
    }

    pub fn selected_package(&self) -> Option<usize> {
        self.selected_package
    }

    pub fn select_package(&mut self, index: usize) {
        self.selected_package = Some(index);
    }

    pub fn clear_selection(&mut self) {
        self.selected_package = None;
    }

    pub fn salary_product(&self) -> Option<&str> {
        self.salary_product.as_deref()
    }

    pub fn set_salary_product(&mut self, id: Option<String>) {
        self.salary_product = id;
    }

    pub fn has_pending_message(&self) -> bool {
        self.pending_message.is_some()
    }

    /// Replaces any message still waiting from an earlier order.
    pub fn set_pending_message(&mut self, message: String) {
        if self.pending_message.is_some() {
            debug!("replacing stale pending message");
        }
        self.pending_message = Some(message);
    }

    /// Consume the pending message; a second call returns `None`.
    pub fn take_pending_message(&mut self) -> Option<String> {
        self.pending_message.take()
    }

    pub fn clear_pending_message(&mut self) {
        self.pending_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_message_is_consumed_once() {
        let mut s = Session::new();
        s.set_pending_message("hello".into());
        assert_eq!(s.take_pending_message().as_deref(), Some("hello"));
        assert!(s.take_pending_message().is_none());
    }

    #[test]
    fn changing_product_drops_selection() {
        let mut s = Session::new();
        s.set_current_product(Some("a".into()));
        s.select_package(2);
        s.set_current_product(Some("b".into()));
        assert_eq!(s.selected_package(), None);
        assert_eq!(s.current_product(), Some("b"));
    }
}
