//! Framework-neutral view tree.
//!
//! DESIGN
//! ======
//! A component is any type that can render itself into a [`Node`] tree.
//! The tree is plain data: tests walk it directly, and the CLI serializes
//! it to HTML. Router links carry a typed [`Route`]; resolving the route is
//! left to whatever router hosts the tree.

use std::fmt::{self, Write};

// =============================================================================
// ROUTES
// =============================================================================

/// Navigation targets understood by the host router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Public,
    Secured,
    Login,
    Logout,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Public => "/public",
            Self::Secured => "/secured",
            Self::Login => "/login",
            Self::Logout => "/logout",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// NODE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element { tag: &'static str, class: Option<&'static str>, children: Vec<Node> },
    Text(String),
    /// Plain hyperlink leaving the application.
    Anchor { href: String, class: Option<&'static str>, label: String },
    /// In-app link resolved by the router.
    Link { to: Route, label: String },
    /// Clickable control identified by `action`.
    Button { action: &'static str, label: String },
}

/// Anything that renders into a view tree.
pub trait Component {
    fn render(&self) -> Node;
}

impl Node {
    pub fn element(tag: &'static str, class: Option<&'static str>, children: Vec<Node>) -> Self {
        Self::Element { tag, class, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn link(to: Route, label: impl Into<String>) -> Self {
        Self::Link { to, label: label.into() }
    }

    /// Router links in document order.
    pub fn links(&self) -> Vec<(Route, &str)> {
        let mut out = Vec::new();
        self.collect_links(&mut out);
        out
    }

    fn collect_links<'a>(&'a self, out: &mut Vec<(Route, &'a str)>) {
        match self {
            Self::Link { to, label } => out.push((*to, label.as_str())),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_links(out);
                }
            }
            Self::Text(_) | Self::Anchor { .. } | Self::Button { .. } => {}
        }
    }

    /// Serialize the tree to an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Element { tag: "br", .. } => out.push_str("<br/>"),
            Self::Element { tag, class, children } => {
                let _ = write!(out, "<{tag}");
                write_class(out, *class);
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{tag}>");
            }
            Self::Text(text) => push_escaped(out, text),
            Self::Anchor { href, class, label } => {
                out.push_str("<a href=\"");
                push_escaped(out, href);
                out.push('"');
                write_class(out, *class);
                out.push('>');
                push_escaped(out, label);
                out.push_str("</a>");
            }
            Self::Link { to, label } => {
                let _ = write!(out, "<a href=\"{}\">", to.path());
                push_escaped(out, label);
                out.push_str("</a>");
            }
            Self::Button { action, label } => {
                let _ = write!(out, "<button data-action=\"{action}\">");
                push_escaped(out, label);
                out.push_str("</button>");
            }
        }
    }
}

fn write_class(out: &mut String, class: Option<&str>) {
    if let Some(class) = class {
        out.push_str(" class=\"");
        push_escaped(out, class);
        out.push('"');
    }
}

fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
