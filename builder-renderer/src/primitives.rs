//! Renderers for primitive element types.
//!
//! Primitives show their `content`, `styles`, `listItems`, `link` and `alt`
//! directly.

use builder_core::{Element, ElementType};
use url::Url;

use crate::output::VNode;
use crate::style::{css_declarations, is_safe_value, safe_href, safe_src};

/// Root node for an element: tag, type class and the style bag.
pub(crate) fn base(tag: &str, element: &Element) -> VNode {
    VNode::el(tag)
        .class("pb-element")
        .class(&format!("pb-{}", type_class(&element.element_type)))
        .styles(css_declarations(&element.styles))
}

/// Class-safe form of a type tag.
pub(crate) fn type_class(element_type: &ElementType) -> String {
    element_type
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}

/// Text content with line breaks preserved.
fn multiline(node: VNode, text: &str) -> VNode {
    let mut lines = text.split('\n');
    let mut node = match lines.next() {
        Some(first) => node.with_text(first),
        None => node,
    };
    for line in lines {
        node = node.child(VNode::el("br")).with_text(line);
    }
    node
}

/// Paragraph text.
#[must_use]
pub fn render_text(element: &Element) -> VNode {
    multiline(base("p", element), &element.content)
}

/// Section heading.
#[must_use]
pub fn render_heading(element: &Element) -> VNode {
    base("h2", element).with_text(&element.content)
}

/// Button; an anchor when it has a link target.
#[must_use]
pub fn render_button(element: &Element) -> VNode {
    match element.link.as_deref() {
        Some(link) if !link.trim().is_empty() => base("a", element)
            .class("pb-button")
            .attr("href", safe_href(link))
            .attr("role", "button")
            .with_text(&element.content),
        _ => base("button", element)
            .attr("type", "button")
            .with_text(&element.content),
    }
}

/// Inline hyperlink.
#[must_use]
pub fn render_link(element: &Element) -> VNode {
    base("a", element)
        .attr("href", safe_href(element.link.as_deref().unwrap_or("#")))
        .with_text(&element.content)
}

/// Static image; `content` is the source URL.
#[must_use]
pub fn render_image(element: &Element) -> VNode {
    let mut node = base("img", element);
    if let Some(src) = safe_src(&element.content) {
        node = node.attr("src", src);
    }
    node.attr("alt", element.alt.clone().unwrap_or_default())
        .style("width", "100%")
        .style("height", "100%")
}

/// Embedded video. YouTube and Vimeo links become iframes, other http(s)
/// sources a native `<video>`.
#[must_use]
pub fn render_video(element: &Element) -> VNode {
    if let Some(embed) = embed_url(&element.content) {
        return base("iframe", element)
            .attr("src", embed)
            .attr("frameborder", "0")
            .attr("allowfullscreen", "true")
            .style("width", "100%")
            .style("height", "100%");
    }
    match safe_src(&element.content) {
        Some(src) => base("video", element)
            .attr("src", src)
            .attr("controls", "true")
            .style("width", "100%")
            .style("height", "100%"),
        None => base("div", element)
            .class("pb-media-placeholder")
            .with_text("Video"),
    }
}

/// Player URL for a YouTube or Vimeo link, rebuilt from the video id.
fn embed_url(src: &str) -> Option<String> {
    let url = Url::parse(src.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    match host {
        "youtube.com" | "m.youtube.com" | "youtube-nocookie.com" => {
            let id = match segments.next()? {
                "watch" => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())?,
                "embed" | "shorts" => segments.next()?.to_string(),
                _ => return None,
            };
            youtube_embed(&id)
        }
        "youtu.be" => youtube_embed(segments.next()?),
        "vimeo.com" => vimeo_embed(segments.next()?),
        "player.vimeo.com" => match segments.next()? {
            "video" => vimeo_embed(segments.next()?),
            _ => None,
        },
        _ => None,
    }
}

fn youtube_embed(id: &str) -> Option<String> {
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| format!("https://www.youtube.com/embed/{id}"))
}

fn vimeo_embed(id: &str) -> Option<String> {
    let valid = !id.is_empty() && id.len() <= 20 && id.chars().all(|c| c.is_ascii_digit());
    valid.then(|| format!("https://player.vimeo.com/video/{id}"))
}

/// Bulleted list.
#[must_use]
pub fn render_list(element: &Element) -> VNode {
    let items = element.list_items.as_deref().unwrap_or_default();
    base("ul", element).children(
        items
            .iter()
            .map(|item| VNode::el("li").with_text(item.as_str())),
    )
}

/// Block quote.
#[must_use]
pub fn render_quote(element: &Element) -> VNode {
    multiline(base("blockquote", element), &element.content)
}

/// Horizontal rule.
#[must_use]
pub fn render_divider(element: &Element) -> VNode {
    let style = |key: &str, fallback: &'static str| {
        element
            .styles
            .get(key)
            .map(|value| value.trim())
            .filter(|value| is_safe_value(value))
            .unwrap_or(fallback)
    };
    let color = style("borderColor", "#e5e7eb");
    let width = style("borderWidth", "1px");
    base("hr", element)
        .style("border", "none")
        .style("border-top", format!("{width} solid {color}"))
}

/// Empty space.
#[must_use]
pub fn render_spacer(element: &Element) -> VNode {
    base("div", element).attr("aria-hidden", "true")
}

/// Single glyph, optionally linked.
#[must_use]
pub fn render_icon(element: &Element) -> VNode {
    let glyph = base("span", element).with_text(&element.content);
    match element.link.as_deref() {
        Some(link) if !link.trim().is_empty() => {
            VNode::el("a").attr("href", safe_href(link)).child(glyph)
        }
        _ => glyph,
    }
}

/// Styled box.
#[must_use]
pub fn render_container(element: &Element) -> VNode {
    base("div", element)
        .style("width", "100%")
        .style("height", "100%")
}
