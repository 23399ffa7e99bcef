//! Renderers for composite blocks.
//!
//! Each block reads its configuration with
//! [`parse_config`](builder_core::blocks::parse_config), so empty or broken
//! content renders the block's full default preview.

use builder_core::blocks::{
    parse_config, CallToActionConfig, CardConfig, FooterConfig, HeroConfig, ImageSliderConfig,
    NavLink, NavigationConfig, PricingCardConfig, TestimonialConfig,
};
use builder_core::Element;

use crate::output::VNode;
use crate::primitives::base;
use crate::style::{css_url, is_safe_value, safe_href, safe_src};

/// Highest star rating shown by testimonials.
const MAX_RATING: u8 = 5;

fn color(node: VNode, property: &str, value: &str) -> VNode {
    if is_safe_value(value) {
        node.style(property, value.trim())
    } else {
        node
    }
}

fn button(text: &str, link: &str) -> Option<VNode> {
    (!text.trim().is_empty()).then(|| {
        VNode::el("a")
            .class("pb-button")
            .attr("href", safe_href(link))
            .with_text(text)
    })
}

fn links(items: &[NavLink]) -> VNode {
    VNode::el("ul").class("pb-links").children(items.iter().map(|link| {
        VNode::el("li").child(
            VNode::el("a")
                .attr("href", safe_href(&link.href))
                .with_text(link.label.as_str()),
        )
    }))
}

fn image(src: &str, alt: &str, class: &str) -> Option<VNode> {
    safe_src(src).map(|src| {
        VNode::el("img")
            .class(class)
            .attr("src", src)
            .attr("alt", alt)
    })
}

/// Hero section: headline, subtitle and call-to-action button.
#[must_use]
pub fn render_hero(element: &Element) -> VNode {
    let config: HeroConfig = parse_config(&element.content);
    let mut node = base("section", element)
        .style("text-align", config.alignment.as_css())
        .style("width", "100%")
        .style("height", "100%");
    node = color(node, "background-color", &config.background_color);
    node = color(node, "color", &config.text_color);
    if let Some(url) = css_url(&config.background_image) {
        node = node
            .style("background-image", url)
            .style("background-size", "cover")
            .style("background-position", "center");
    }
    node.child(VNode::el("h1").with_text(config.title))
        .child(VNode::el("p").class("pb-subtitle").with_text(config.subtitle))
        .children(button(&config.button_text, &config.button_link))
}

/// Navigation bar: brand and links.
#[must_use]
pub fn render_navigation(element: &Element) -> VNode {
    let config: NavigationConfig = parse_config(&element.content);
    let mut node = base("nav", element)
        .style("display", "flex")
        .style("align-items", "center")
        .style("justify-content", "space-between");
    node = color(node, "background-color", &config.background_color);
    node = color(node, "color", &config.text_color);
    node.child(VNode::el("span").class("pb-brand").with_text(config.brand))
        .child(links(&config.links))
}

/// Page footer: company, tagline, links and copyright line.
#[must_use]
pub fn render_footer(element: &Element) -> VNode {
    let config: FooterConfig = parse_config(&element.content);
    let mut node = base("footer", element);
    node = color(node, "background-color", &config.background_color);
    node = color(node, "color", &config.text_color);
    node.child(VNode::el("strong").with_text(config.company_name))
        .child(VNode::el("p").with_text(config.tagline))
        .child(links(&config.links))
        .child(VNode::el("small").with_text(config.copyright))
}

/// Content card: optional image, title, description and button.
#[must_use]
pub fn render_card(element: &Element) -> VNode {
    let config: CardConfig = parse_config(&element.content);
    base("article", element)
        .children(image(&config.image, &config.title, "pb-card-image"))
        .child(VNode::el("h3").with_text(config.title.as_str()))
        .child(VNode::el("p").with_text(config.description))
        .children(button(&config.button_text, &config.button_link))
}

/// Call-to-action banner.
#[must_use]
pub fn render_call_to_action(element: &Element) -> VNode {
    let config: CallToActionConfig = parse_config(&element.content);
    let mut node = base("section", element).style("text-align", "center");
    node = color(node, "background-color", &config.background_color);
    node = color(node, "color", &config.text_color);
    node.child(VNode::el("h2").with_text(config.heading))
        .child(VNode::el("p").with_text(config.description))
        .children(button(&config.button_text, &config.button_link))
}

/// Customer testimonial with star rating.
#[must_use]
pub fn render_testimonial(element: &Element) -> VNode {
    let config: TestimonialConfig = parse_config(&element.content);
    let rating = config.rating.min(MAX_RATING);
    let stars = format!(
        "{}{}",
        "★".repeat(usize::from(rating)),
        "☆".repeat(usize::from(MAX_RATING - rating))
    );
    let caption = VNode::el("figcaption")
        .children(image(&config.avatar, &config.author, "pb-avatar"))
        .child(VNode::el("strong").with_text(config.author))
        .child(VNode::el("span").class("pb-role").with_text(config.role));
    base("figure", element)
        .child(
            VNode::el("div")
                .class("pb-rating")
                .attr("aria-label", format!("{rating} out of {MAX_RATING}"))
                .with_text(stars),
        )
        .child(VNode::el("blockquote").with_text(config.quote))
        .child(caption)
}

/// Pricing plan card.
#[must_use]
pub fn render_pricing_card(element: &Element) -> VNode {
    let config: PricingCardConfig = parse_config(&element.content);
    let mut node = base("div", element);
    if config.highlighted {
        node = node
            .class("pb-highlighted")
            .style("border", "2px solid #3b82f6");
    }
    let mut price = VNode::el("div")
        .class("pb-price")
        .child(VNode::el("strong").with_text(config.price));
    if !config.period.trim().is_empty() {
        price = price.child(VNode::el("span").with_text(format!("/{}", config.period)));
    }
    node.child(VNode::el("h3").with_text(config.plan_name))
        .child(price)
        .child(
            VNode::el("ul").children(
                config
                    .features
                    .iter()
                    .map(|feature| VNode::el("li").with_text(feature.as_str())),
            ),
        )
        .children(button(&config.button_text, &config.button_link))
}

/// Image carousel. The first slide is visible; hosts animate the rest.
#[must_use]
pub fn render_image_slider(element: &Element) -> VNode {
    let config: ImageSliderConfig = parse_config(&element.content);
    let slides = config.images.iter().enumerate().map(|(index, slide)| {
        let mut figure = VNode::el("figure")
            .class("pb-slide")
            .attr("data-index", index.to_string());
        if index > 0 {
            figure = figure.attr("hidden", "hidden");
        }
        figure = figure.children(image(&slide.src, &slide.caption, "pb-slide-image"));
        if !slide.caption.trim().is_empty() {
            figure = figure.child(VNode::el("figcaption").with_text(slide.caption.as_str()));
        }
        figure
    });
    let mut node = base("div", element)
        .attr("data-autoplay", config.autoplay.to_string())
        .attr("data-interval", config.interval_ms.to_string())
        .child(VNode::el("div").class("pb-slides").children(slides));
    if config.images.is_empty() {
        node = node.child(
            VNode::el("div")
                .class("pb-media-placeholder")
                .with_text("No slides"),
        );
    }
    if config.show_arrows && config.images.len() > 1 {
        node = node
            .child(
                VNode::el("button")
                    .class("pb-prev")
                    .attr("aria-label", "Previous slide")
                    .with_text("‹"),
            )
            .child(
                VNode::el("button")
                    .class("pb-next")
                    .attr("aria-label", "Next slide")
                    .with_text("›"),
            );
    }
    node
}
