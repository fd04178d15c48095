//! Top navigation bar with a Login/Logout link driven by auth state.

use std::sync::Arc;

use crate::auth::AuthContext;
use crate::view::{Component, Node, Route};

const BRAND_HREF: &str = "https://www.tmt.org/";
const BRAND_LABEL: &str = "TMT";

/// Navigation bar. Rendering is a pure function of the injected auth state.
#[derive(Clone)]
pub struct NavigationBar {
    auth: Arc<dyn AuthContext>,
}

impl NavigationBar {
    pub fn new(auth: Arc<dyn AuthContext>) -> Self {
        Self { auth }
    }

    /// The three router links, left to right. The last one flips between
    /// Login and Logout.
    pub fn links(&self) -> [(Route, &'static str); 3] {
        let session = if self.auth.is_authenticated() {
            (Route::Logout, "Logout")
        } else {
            (Route::Login, "Login")
        };
        [(Route::Public, "Public"), (Route::Secured, "Secured"), session]
    }
}

impl Component for NavigationBar {
    fn render(&self) -> Node {
        let items = self
            .links()
            .into_iter()
            .map(|(route, label)| Node::element("li", None, vec![Node::link(route, label)]))
            .collect();

        Node::element(
            "nav",
            Some("indigo"),
            vec![Node::element(
                "div",
                Some("nav-wrapper"),
                vec![
                    Node::Anchor { href: BRAND_HREF.into(), class: Some("brand-logo"), label: BRAND_LABEL.into() },
                    Node::element("ul", Some("hide-on-med-and-down right"), items),
                ],
            )],
        )
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
