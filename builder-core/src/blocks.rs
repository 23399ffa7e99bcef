//! Configuration of composite blocks.
//!
//! A composite element stores its configuration as JSON in
//! [`Element::content`](crate::Element::content). Every field of every
//! configuration has a default so that a block with empty, partial or
//! malformed content still describes a complete section.
//!
//! | Element type     | Configuration            |
//! |------------------|--------------------------|
//! | `hero`           | [`HeroConfig`]           |
//! | `navigation`     | [`NavigationConfig`]     |
//! | `footer`         | [`FooterConfig`]         |
//! | `card`           | [`CardConfig`]           |
//! | `call-to-action` | [`CallToActionConfig`]   |
//! | `testimonial`    | [`TestimonialConfig`]    |
//! | `pricing-card`   | [`PricingCardConfig`]    |
//! | `image-slider`   | [`ImageSliderConfig`]    |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ElementType;

/// Parse a block configuration, falling back to defaults.
///
/// Empty content, invalid JSON and JSON of the wrong shape all yield
/// `T::default()`. Missing fields are filled from the default individually.
#[must_use]
pub fn parse_config<T>(content: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return T::default();
    }
    match serde_json::from_str(trimmed) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!("Block configuration unreadable, using defaults: {e}");
            T::default()
        }
    }
}

/// Full default configuration of a composite type as JSON.
///
/// Returns `None` for primitive and unknown types.
#[must_use]
pub fn default_config(element_type: &ElementType) -> Option<serde_json::Value> {
    let value = match element_type {
        ElementType::Hero => serde_json::to_value(HeroConfig::default()),
        ElementType::Navigation => serde_json::to_value(NavigationConfig::default()),
        ElementType::Footer => serde_json::to_value(FooterConfig::default()),
        ElementType::Card => serde_json::to_value(CardConfig::default()),
        ElementType::CallToAction => serde_json::to_value(CallToActionConfig::default()),
        ElementType::Testimonial => serde_json::to_value(TestimonialConfig::default()),
        ElementType::PricingCard => serde_json::to_value(PricingCardConfig::default()),
        ElementType::ImageSlider => serde_json::to_value(ImageSliderConfig::default()),
        _ => return None,
    };
    value.ok()
}

/// A labelled hyperlink inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavLink {
    /// Visible label.
    pub label: String,
    /// Target URL.
    pub href: String,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

impl Default for NavLink {
    fn default() -> Self {
        Self::new("Link", "#")
    }
}

/// Horizontal alignment of block text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left aligned.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Right aligned.
    Right,
}

impl Alignment {
    /// CSS `text-align` value.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Hero section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroConfig {
    /// Headline.
    pub title: String,
    /// Supporting line under the headline.
    pub subtitle: String,
    /// Call-to-action label.
    pub button_text: String,
    /// Call-to-action target.
    pub button_link: String,
    /// Optional background image URL.
    pub background_image: String,
    /// Background color.
    pub background_color: String,
    /// Text color.
    pub text_color: String,
    /// Text alignment.
    pub alignment: Alignment,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "Welcome to Our Website".to_string(),
            subtitle: "Build something amazing with our powerful platform".to_string(),
            button_text: "Get Started".to_string(),
            button_link: "#".to_string(),
            background_image: String::new(),
            background_color: "#1e293b".to_string(),
            text_color: "#ffffff".to_string(),
            alignment: Alignment::Center,
        }
    }
}

/// Navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    /// Brand name on the left.
    pub brand: String,
    /// Menu entries.
    pub links: Vec<NavLink>,
    /// Background color.
    pub background_color: String,
    /// Text color.
    pub text_color: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            brand: "Brand".to_string(),
            links: vec![
                NavLink::new("Home", "#"),
                NavLink::new("About", "#about"),
                NavLink::new("Services", "#services"),
                NavLink::new("Contact", "#contact"),
            ],
            background_color: "#ffffff".to_string(),
            text_color: "#1f2937".to_string(),
        }
    }
}

/// Page footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterConfig {
    /// Company name.
    pub company_name: String,
    /// Short description under the name.
    pub tagline: String,
    /// Footer links.
    pub links: Vec<NavLink>,
    /// Copyright line.
    pub copyright: String,
    /// Background color.
    pub background_color: String,
    /// Text color.
    pub text_color: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            company_name: "Company Name".to_string(),
            tagline: "Making the web a better place.".to_string(),
            links: vec![
                NavLink::new("Privacy", "#privacy"),
                NavLink::new("Terms", "#terms"),
                NavLink::new("Contact", "#contact"),
            ],
            copyright: "© 2024 Company Name. All rights reserved.".to_string(),
            background_color: "#111827".to_string(),
            text_color: "#d1d5db".to_string(),
        }
    }
}

/// Content card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    /// Card title.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Optional image URL at the top.
    pub image: String,
    /// Button label (empty hides the button).
    pub button_text: String,
    /// Button target.
    pub button_link: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: "Card Title".to_string(),
            description: "This is a description of the card content. Edit it to tell your story."
                .to_string(),
            image: String::new(),
            button_text: "Learn More".to_string(),
            button_link: "#".to_string(),
        }
    }
}

/// Call-to-action banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallToActionConfig {
    /// Banner heading.
    pub heading: String,
    /// Supporting text.
    pub description: String,
    /// Button label.
    pub button_text: String,
    /// Button target.
    pub button_link: String,
    /// Background color.
    pub background_color: String,
    /// Text color.
    pub text_color: String,
}

impl Default for CallToActionConfig {
    fn default() -> Self {
        Self {
            heading: "Ready to get started?".to_string(),
            description: "Join thousands of satisfied customers today.".to_string(),
            button_text: "Sign Up Now".to_string(),
            button_link: "#".to_string(),
            background_color: "#3b82f6".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

/// Customer testimonial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialConfig {
    /// Quoted text.
    pub quote: String,
    /// Person quoted.
    pub author: String,
    /// Role or company of the author.
    pub role: String,
    /// Optional avatar URL.
    pub avatar: String,
    /// Star rating, 0 to 5.
    pub rating: u8,
}

impl Default for TestimonialConfig {
    fn default() -> Self {
        Self {
            quote: "This product has completely transformed how we work. Highly recommended!"
                .to_string(),
            author: "Jane Doe".to_string(),
            role: "CEO, Company".to_string(),
            avatar: String::new(),
            rating: 5,
        }
    }
}

/// Pricing plan card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingCardConfig {
    /// Plan name.
    pub plan_name: String,
    /// Price including currency symbol.
    pub price: String,
    /// Billing period, e.g. `month`.
    pub period: String,
    /// Included features.
    pub features: Vec<String>,
    /// Button label.
    pub button_text: String,
    /// Button target.
    pub button_link: String,
    /// Visually emphasise this plan.
    pub highlighted: bool,
}

impl Default for PricingCardConfig {
    fn default() -> Self {
        Self {
            plan_name: "Pro Plan".to_string(),
            price: "$29".to_string(),
            period: "month".to_string(),
            features: vec![
                "Unlimited projects".to_string(),
                "Priority support".to_string(),
                "Advanced analytics".to_string(),
                "Custom domain".to_string(),
            ],
            button_text: "Choose Plan".to_string(),
            button_link: "#".to_string(),
            highlighted: false,
        }
    }
}

/// One slide of an image slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Slide {
    /// Image URL.
    pub src: String,
    /// Caption under the image.
    pub caption: String,
}

impl Default for Slide {
    fn default() -> Self {
        Self {
            src: "https://via.placeholder.com/800x400".to_string(),
            caption: String::new(),
        }
    }
}

/// Image carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSliderConfig {
    /// Slides in display order.
    pub images: Vec<Slide>,
    /// Advance automatically.
    pub autoplay: bool,
    /// Autoplay interval in milliseconds.
    pub interval_ms: u32,
    /// Show previous/next arrows.
    pub show_arrows: bool,
}

impl Default for ImageSliderConfig {
    fn default() -> Self {
        Self {
            images: vec![
                Slide {
                    src: "https://via.placeholder.com/800x400?text=Slide+1".to_string(),
                    caption: "First slide".to_string(),
                },
                Slide {
                    src: "https://via.placeholder.com/800x400?text=Slide+2".to_string(),
                    caption: "Second slide".to_string(),
                },
                Slide {
                    src: "https://via.placeholder.com/800x400?text=Slide+3".to_string(),
                    caption: "Third slide".to_string(),
                },
            ],
            autoplay: true,
            interval_ms: 5000,
            show_arrows: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_yields_defaults() {
        let config: CardConfig = parse_config("");
        assert_eq!(config, CardConfig::default());
    }

    #[test]
    fn malformed_json_yields_defaults() {
        let config: HeroConfig = parse_config("{ title: not json");
        assert_eq!(config, HeroConfig::default());

        // Valid JSON of the wrong shape.
        let config: PricingCardConfig = parse_config("[1, 2, 3]");
        assert_eq!(config, PricingCardConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: CardConfig = parse_config(r#"{"title":"Our Team"}"#);
        assert_eq!(config.title, "Our Team");
        assert_eq!(config.button_text, CardConfig::default().button_text);
    }

    #[test]
    fn camel_case_keys_are_read() {
        let config: PricingCardConfig =
            parse_config(r#"{"planName":"Starter","features":["One seat"],"highlighted":true}"#);
        assert_eq!(config.plan_name, "Starter");
        assert_eq!(config.features, vec!["One seat".to_string()]);
        assert!(config.highlighted);
    }

    #[test]
    fn default_config_exists_for_every_composite() {
        for ty in ElementType::BUILTIN {
            assert_eq!(default_config(&ty).is_some(), ty.is_composite(), "{ty}");
        }
        assert!(default_config(&ElementType::from("mystery")).is_none());
    }
}
