//! # Routing
//!
//! The navigation bar hands a path to a [`Router`] and trusts it to get
//! there. [`HistoryRouter`] is the in-process implementation the app uses: a
//! stack of visited paths.

use log::info;

pub trait Router {
    fn navigate(&mut self, path: &str);
    fn current(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct HistoryRouter {
    history: Vec<String>,
}

impl HistoryRouter {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: vec![initial.into()],
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Pop back to the previous path. The first entry is never popped.
    pub fn back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        info!("Navigated back to {}", self.current());
        true
    }
}

impl Router for HistoryRouter {
    fn navigate(&mut self, path: &str) {
        if self.current() == path {
            return;
        }
        info!("Navigating to {path}");
        self.history.push(path.to_string());
    }

    fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_and_back() {
        let mut router = HistoryRouter::new("/");
        router.navigate("/services");
        router.navigate("/blog");
        assert_eq!(router.current(), "/blog");
        assert!(router.back());
        assert_eq!(router.current(), "/services");
        assert!(router.back());
        assert!(!router.back());
        assert_eq!(router.current(), "/");
    }

    #[test]
    fn test_same_path_is_not_duplicated() {
        let mut router = HistoryRouter::new("/");
        router.navigate("/about");
        router.navigate("/about");
        assert_eq!(router.history().len(), 2);
    }
}
