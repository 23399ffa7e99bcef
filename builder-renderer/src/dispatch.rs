//! Type tag to renderer dispatch.

use std::collections::HashMap;
use std::sync::OnceLock;

use builder_core::{Element, ElementType, ViewportClass};

use crate::blocks;
use crate::output::VNode;
use crate::primitives::{self, type_class};

/// A presentation routine. Pure: the same element always yields the same tree.
pub type RenderFn = fn(&Element) -> VNode;

/// Dispatch table from element type to renderer.
#[derive(Debug, Clone)]
pub struct RenderRegistry {
    renderers: HashMap<ElementType, RenderFn>,
}

impl Default for RenderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RenderRegistry {
    /// A table with no renderers; every element renders as a placeholder.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// A table covering every built-in element type.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(ElementType::Text, primitives::render_text);
        registry.register(ElementType::Heading, primitives::render_heading);
        registry.register(ElementType::Button, primitives::render_button);
        registry.register(ElementType::Link, primitives::render_link);
        registry.register(ElementType::Image, primitives::render_image);
        registry.register(ElementType::Video, primitives::render_video);
        registry.register(ElementType::List, primitives::render_list);
        registry.register(ElementType::Quote, primitives::render_quote);
        registry.register(ElementType::Divider, primitives::render_divider);
        registry.register(ElementType::Spacer, primitives::render_spacer);
        registry.register(ElementType::Icon, primitives::render_icon);
        registry.register(ElementType::Container, primitives::render_container);
        registry.register(ElementType::Hero, blocks::render_hero);
        registry.register(ElementType::Navigation, blocks::render_navigation);
        registry.register(ElementType::Footer, blocks::render_footer);
        registry.register(ElementType::Card, blocks::render_card);
        registry.register(ElementType::CallToAction, blocks::render_call_to_action);
        registry.register(ElementType::Testimonial, blocks::render_testimonial);
        registry.register(ElementType::PricingCard, blocks::render_pricing_card);
        registry.register(ElementType::ImageSlider, blocks::render_image_slider);
        registry
    }

    /// Add or replace the renderer for a type.
    pub fn register(&mut self, element_type: ElementType, renderer: RenderFn) {
        self.renderers.insert(element_type, renderer);
    }

    /// Whether a type has a renderer.
    #[must_use]
    pub fn contains(&self, element_type: &ElementType) -> bool {
        self.renderers.contains_key(element_type)
    }

    /// Render one element. Types without a renderer get a placeholder.
    #[must_use]
    pub fn render(&self, element: &Element) -> VNode {
        match self.renderers.get(&element.element_type) {
            Some(renderer) => renderer(element),
            None => {
                tracing::debug!(
                    element_type = %element.element_type,
                    "No renderer registered, using placeholder"
                );
                placeholder(element)
            }
        }
    }

    /// Render an element inside an absolutely positioned box at its canvas
    /// geometry. Nested children are placed relative to the box.
    #[must_use]
    pub fn render_positioned(&self, element: &Element) -> VNode {
        VNode::el("div")
            .class("pb-box")
            .attr("data-element-id", element.id.to_string())
            .attr("data-type", element.element_type.as_str())
            .style("position", "absolute")
            .style("left", px(element.position.x))
            .style("top", px(element.position.y))
            .style("width", px(element.size.width))
            .style("height", px(element.size.height))
            .child(self.render(element))
            .children(
                element
                    .children
                    .iter()
                    .map(|child| self.render_positioned(child)),
            )
    }

    /// Render a whole collection onto a canvas at the viewport's display
    /// width. Later elements paint on top.
    #[must_use]
    pub fn render_canvas(&self, elements: &[Element], viewport: ViewportClass) -> VNode {
        let height = elements
            .iter()
            .map(|e| e.position.y + e.size.height)
            .fold(0.0_f32, f32::max);
        VNode::el("div")
            .class("pb-canvas")
            .attr("data-viewport", viewport.as_str())
            .style("position", "relative")
            .style("width", px(viewport.width()))
            .style("min-height", px(height))
            .style("overflow-x", "hidden")
            .children(elements.iter().map(|e| self.render_positioned(e)))
    }
}

/// Neutral box for types with no renderer, labelled with the tag.
#[must_use]
pub fn placeholder(element: &Element) -> VNode {
    VNode::el("div")
        .class("pb-element")
        .class("pb-placeholder")
        .class(&format!("pb-{}", type_class(&element.element_type)))
        .attr("data-type", element.element_type.as_str())
        .style("border", "1px dashed #94a3b8")
        .style("color", "#64748b")
        .style("width", "100%")
        .style("height", "100%")
        .with_text(element.element_type.as_str())
}

fn px(value: f32) -> String {
    format!("{}px", value.round())
}

fn default_registry() -> &'static RenderRegistry {
    static REGISTRY: OnceLock<RenderRegistry> = OnceLock::new();
    REGISTRY.get_or_init(RenderRegistry::builtin)
}

/// Render one element with the built-in table.
#[must_use]
pub fn render(element: &Element) -> VNode {
    default_registry().render(element)
}

/// Render one element in its positioned box with the built-in table.
#[must_use]
pub fn render_positioned(element: &Element) -> VNode {
    default_registry().render_positioned(element)
}

/// Render a collection with the built-in table.
#[must_use]
pub fn render_canvas(elements: &[Element], viewport: ViewportClass) -> VNode {
    default_registry().render_canvas(elements, viewport)
}
