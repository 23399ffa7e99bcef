//! Integration tests for rendering designs built in an editing session.

use builder_core::{
    DesignDocument, Element, ElementPatch, ElementType, JsonFilePersistence, Session,
    ViewportClass,
};
use builder_renderer::{render, render_canvas, HtmlExporter, RenderRegistry, VNode};
use proptest::prelude::*;

/// Link, source and style values a saved design could carry to smuggle
/// script into the page.
const HOSTILE: [&str; 12] = [
    "javascript:alert(1)",
    "JaVaScRiPt:alert(1)",
    " java\tscript:alert(1)",
    "java\nscript:alert(1)",
    "\u{1}javascript:alert(1)",
    "javascript:alert(1)//youtube.com/embed/x",
    "vbscript:msgbox(1)",
    "data:text/html,<script>alert(1)</script>",
    "red; position: fixed; inset: 0",
    "x\"><script>alert(1)</script>",
    "URL( JavaScript:alert(1))",
    "}</style><script>alert(1)</script>",
];

/// Lowercased with whitespace and control characters removed, the way
/// browsers read a URL scheme.
fn folded(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Every attribute and style declaration in a rendered tree.
fn collect(node: &VNode, attrs: &mut Vec<(String, String)>, styles: &mut Vec<(String, String)>) {
    if let VNode::Element(element) = node {
        attrs.extend(element.attrs.iter().cloned());
        styles.extend(element.style.iter().cloned());
        for child in &element.children {
            collect(child, attrs, styles);
        }
    }
}

/// Element of type `ty` with `value` in every user-controlled field.
fn hostile_element(ty: ElementType, value: &str) -> Element {
    let composite = serde_json::json!({
        "buttonLink": value,
        "backgroundImage": value,
        "backgroundColor": value,
        "textColor": value,
        "image": value,
        "avatar": value,
        "links": [{"label": "Home", "href": value}],
        "images": [{"src": value, "caption": "Slide"}],
    });
    let content = if ty.is_composite() {
        composite.to_string()
    } else {
        value.to_string()
    };
    let mut element = Element::new(ty)
        .with_content(content)
        .with_style("color", value)
        .with_style("backgroundImage", value)
        .with_style("borderColor", value)
        .with_style("borderWidth", value);
    element.link = Some(value.to_string());
    element.alt = Some(value.to_string());
    element
}

fn assert_nothing_executable(ty: &ElementType, value: &str, node: &VNode) {
    let mut attrs = Vec::new();
    let mut styles = Vec::new();
    collect(node, &mut attrs, &mut styles);
    for (name, attr) in &attrs {
        if matches!(name.as_str(), "href" | "src") {
            let attr = folded(attr);
            assert!(
                !["javascript:", "vbscript:", "data:"]
                    .iter()
                    .any(|scheme| attr.starts_with(scheme)),
                "{ty} {name}={attr:?} from {value:?}"
            );
        }
    }
    for (property, declaration) in &styles {
        assert!(
            !declaration.contains([';', '{', '}', '<', '>', '"']),
            "{ty} {property}: {declaration:?} from {value:?}"
        );
        assert!(
            !folded(declaration).contains("javascript:"),
            "{ty} {property}: {declaration:?} from {value:?}"
        );
    }
    assert!(!node.to_html().contains("<script"), "{ty} from {value:?}");
}

/// Session holding one of every built-in type.
fn full_session() -> Session {
    let mut session = Session::new();
    for ty in ElementType::BUILTIN {
        session.add_element(ty);
    }
    session
}

// ==========================================================================
// Defaults
// ==========================================================================

#[test]
fn test_fresh_card_renders_default_title_and_body() {
    let mut session = Session::new();
    let id = session.add_element(ElementType::Card);
    session.update_element(id, &ElementPatch::new().content(""));

    let card = session.element(id).expect("card");
    let text = render(card).text_content();
    assert!(text.contains("Card Title"));
    assert!(text.contains("This is a description of the card content"));
}

#[test]
fn test_every_fresh_block_renders_non_empty() {
    let session = full_session();
    for element in session.elements() {
        let node = render(element);
        if matches!(
            element.element_type,
            ElementType::Divider
                | ElementType::Spacer
                | ElementType::Image
                | ElementType::Video
                | ElementType::Container
        ) {
            continue;
        }
        assert!(
            !node.text_content().is_empty(),
            "{} rendered without text",
            element.element_type
        );
    }
}

#[test]
fn test_malformed_composite_config_uses_defaults() {
    for content in ["{", "null", "42", r#"{"title": 7}"#] {
        let hero = Element::new(ElementType::Hero).with_content(content);
        let node = render(&hero);
        assert!(
            node.text_content().contains("Welcome to Our Website"),
            "{content:?}"
        );
    }
}

#[test]
fn test_unknown_type_from_document_renders_placeholder() {
    let json = r#"{
        "version": "1.0",
        "elements": [{
            "id": "6f1c2b0e-8a0d-4c3b-9a55-2d1e0f3a4b5c",
            "type": "countdown-timer",
            "content": "",
            "position": {"x": 10, "y": 10},
            "size": {"width": 200, "height": 100},
            "styles": {}
        }],
        "viewportClass": "mobile"
    }"#;
    let document = DesignDocument::from_json(json).expect("document");
    let html = HtmlExporter::with_defaults().export(&document);
    assert!(html.contains("pb-placeholder"));
    assert!(html.contains("countdown-timer"));
    assert!(html.contains("width: 375px"));
}

// ==========================================================================
// Safety
// ==========================================================================

#[test]
fn test_user_text_is_escaped_in_page() {
    let mut session = Session::new();
    let id = session.add_element(ElementType::Text);
    let styles = session.element(id).expect("text").styles.clone();
    session.update_element(
        id,
        &ElementPatch::new()
            .content("<img src=x onerror=alert(1)>")
            .merge_style(&styles, "color", "red\" onmouseover=\"alert(1)"),
    );
    let html = HtmlExporter::with_defaults().export(&session.document());
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(!html.contains("onmouseover"));
}

#[test]
fn test_hostile_values_never_reach_the_page_for_any_type() {
    for ty in ElementType::BUILTIN {
        for value in HOSTILE {
            let node = render(&hostile_element(ty.clone(), value));
            assert_nothing_executable(&ty, value, &node);
        }
    }
}

#[test]
fn test_hostile_design_exports_a_clean_page() {
    let elements = ElementType::BUILTIN
        .iter()
        .flat_map(|ty| HOSTILE.iter().map(move |value| hostile_element(ty.clone(), value)))
        .collect();
    let document = DesignDocument::new(elements, ViewportClass::Desktop);
    let html = HtmlExporter::with_defaults().export(&document);
    let lowered = html.to_lowercase();
    assert!(!lowered.contains("href=\"javascript"));
    assert!(!lowered.contains("src=\"javascript"));
    assert!(!lowered.contains("src=\"data:"));
    assert!(!lowered.contains("<script"));
}

#[test]
fn test_rendering_does_not_touch_the_session() {
    let session = full_session();
    let before = session.elements().to_vec();
    let _ = render_canvas(session.elements(), ViewportClass::Desktop);
    let _ = HtmlExporter::with_defaults().export(&session.document());
    assert_eq!(session.elements(), before.as_slice());
    assert!(session.can_undo());
}

// ==========================================================================
// Viewer path
// ==========================================================================

#[test]
fn test_saved_design_round_trips_to_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFilePersistence::new(dir.path().join("design.json"));

    let mut session = full_session();
    session.set_viewport(ViewportClass::Tablet);
    session.save_to(&store);

    let mut viewer = Session::new();
    assert!(viewer.load_from(&store).expect("load"));
    assert_eq!(viewer.elements(), session.elements());

    let page = HtmlExporter::with_defaults().export(&viewer.document());
    assert!(page.contains("width: 768px"));
    assert_eq!(
        page.matches("data-element-id=").count(),
        ElementType::BUILTIN.len()
    );
}

#[test]
fn test_custom_renderer_is_used_for_new_type() {
    fn countdown(element: &Element) -> builder_renderer::VNode {
        builder_renderer::VNode::el("time").with_text(element.content.as_str())
    }
    let mut registry = RenderRegistry::builtin();
    registry.register(ElementType::from("countdown"), countdown);
    let node = registry.render(&Element::new(ElementType::from("countdown")).with_content("10:00"));
    assert_eq!(node.tag(), Some("time"));
    assert_eq!(node.text_content(), "10:00");
}

// ==========================================================================
// Properties
// ==========================================================================

proptest! {
    #[test]
    fn prop_rendered_text_never_contains_raw_markup(content in ".{0,40}") {
        for ty in [ElementType::Text, ElementType::Heading, ElementType::Button, ElementType::Quote] {
            let html = render(&Element::new(ty).with_content(content.clone())).to_html();
            let inner = html
                .split_once('>')
                .and_then(|(_, rest)| rest.rsplit_once("</"))
                .map_or("", |(inner, _)| inner);
            prop_assert!(!inner.replace("<br>", "").contains('<'));
        }
    }

    #[test]
    fn prop_obfuscated_script_links_become_anchors(
        prefix in r"[\x01-\x20]{0,3}",
        head in "[jJ][aA][vV][aA]",
        gap in r"[\t\n\r]{0,2}",
        tail in "[sS][cC][rR][iI][pP][tT]",
        rest in "[:a-z0-9()/]{0,20}",
    ) {
        let href = format!("{prefix}{head}{gap}{tail}:{rest}");
        for ty in [ElementType::Link, ElementType::Button, ElementType::Icon] {
            let mut element = Element::new(ty).with_content("Go");
            element.link = Some(href.clone());
            let node = render(&element);
            let anchor = if node.tag() == Some("a") { Some(&node) } else { node.find("a") };
            prop_assert_eq!(anchor.and_then(|a| a.get_attr("href")), Some("#"));
        }
    }

    #[test]
    fn prop_composite_render_never_panics(content in ".{0,60}") {
        for ty in [
            ElementType::Hero,
            ElementType::Navigation,
            ElementType::Footer,
            ElementType::Card,
            ElementType::CallToAction,
            ElementType::Testimonial,
            ElementType::PricingCard,
            ElementType::ImageSlider,
        ] {
            let node = render(&Element::new(ty).with_content(content.clone()));
            prop_assert!(node.tag().is_some());
        }
    }
}
