use super::*;

#[test]
fn route_paths() {
    assert_eq!(Route::Public.path(), "/public");
    assert_eq!(Route::Secured.path(), "/secured");
    assert_eq!(Route::Login.path(), "/login");
    assert_eq!(Route::Logout.path(), "/logout");
    assert_eq!(Route::Login.to_string(), "/login");
}

#[test]
fn links_are_collected_in_document_order() {
    let tree = Node::element(
        "div",
        None,
        vec![
            Node::link(Route::Secured, "Secured"),
            Node::element("span", None, vec![Node::link(Route::Login, "Login")]),
            Node::Anchor { href: "https://example.org".into(), class: None, label: "out".into() },
        ],
    );

    assert_eq!(tree.links(), vec![(Route::Secured, "Secured"), (Route::Login, "Login")]);
}

#[test]
fn html_escapes_text_and_attributes() {
    let tree = Node::element(
        "p",
        Some("a\"b"),
        vec![Node::text("<b>&</b>")],
    );
    assert_eq!(tree.to_html(), "<p class=\"a&quot;b\">&lt;b&gt;&amp;&lt;/b&gt;</p>");
}

#[test]
fn html_renders_links_buttons_and_breaks() {
    let tree = Node::element(
        "div",
        None,
        vec![
            Node::link(Route::Public, "Public"),
            Node::element("br", None, Vec::new()),
            Node::Button { action: "create", label: "Go".into() },
        ],
    );
    assert_eq!(
        tree.to_html(),
        "<div><a href=\"/public\">Public</a><br/><button data-action=\"create\">Go</button></div>"
    );
}
