//! Era records
//!
//! Each era is one period of UI design: display text, the style class the
//! modal wears, and the markup injected into the modal's demo slots.

use serde::{Deserialize, Serialize};

/// Modal styles with dedicated demo behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraStyle {
    Retro,
    Glossy,
    Flat,
    Material,
    Glass,
    Hybrid,
}

impl EraStyle {
    pub const ALL: [EraStyle; 6] = [
        EraStyle::Retro,
        EraStyle::Glossy,
        EraStyle::Flat,
        EraStyle::Material,
        EraStyle::Glass,
        EraStyle::Hybrid,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            EraStyle::Retro => "modal-retro",
            EraStyle::Glossy => "modal-glossy",
            EraStyle::Flat => "modal-flat",
            EraStyle::Material => "modal-material",
            EraStyle::Glass => "modal-glass",
            EraStyle::Hybrid => "modal-hybrid",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.class_name() == class)
    }
}

/// Named containers inside the modal that receive demo markup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DemoSlot {
    Nav,
    Button,
    Badge,
    Input,
    Carousel,
}

impl DemoSlot {
    /// Reveal order
    pub const ALL: [DemoSlot; 5] = [
        DemoSlot::Nav,
        DemoSlot::Button,
        DemoSlot::Badge,
        DemoSlot::Input,
        DemoSlot::Carousel,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            DemoSlot::Nav => "demo-nav",
            DemoSlot::Button => "demo-button",
            DemoSlot::Badge => "demo-badge",
            DemoSlot::Input => "demo-input",
            DemoSlot::Carousel => "demo-carousel",
        }
    }
}

/// Markup for each demo slot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoMarkup {
    pub nav: String,
    pub button: String,
    pub badge: String,
    pub input: String,
    pub carousel: String,
}

impl DemoMarkup {
    pub fn get(&self, slot: DemoSlot) -> &str {
        match slot {
            DemoSlot::Nav => &self.nav,
            DemoSlot::Button => &self.button,
            DemoSlot::Badge => &self.badge,
            DemoSlot::Input => &self.input,
            DemoSlot::Carousel => &self.carousel,
        }
    }
}

/// One era of the timeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraRecord {
    pub year: String,
    pub title: String,
    pub description: String,
    /// Style selector applied to the modal content
    pub style_class: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub demos: DemoMarkup,
}

impl EraRecord {
    /// Demo behavior style, `None` for classes without a dedicated entry
    pub fn style(&self) -> Option<EraStyle> {
        EraStyle::from_class(&self.style_class)
    }

    /// Label shown on the era's timeline card
    pub fn card_label(&self) -> String {
        format!("{} {}", self.year, self.title)
    }
}

fn era(
    year: &str,
    title: &str,
    description: &str,
    style: EraStyle,
    button_text: &str,
    demos: [&str; 5],
) -> EraRecord {
    let [nav, button, badge, input, carousel] = demos.map(str::to_string);
    EraRecord {
        year: year.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        style_class: style.class_name().to_string(),
        button_text: button_text.to_string(),
        demos: DemoMarkup {
            nav,
            button,
            badge,
            input,
            carousel,
        },
    }
}

/// The six eras shown on the timeline, oldest first
pub fn builtin_eras() -> Vec<EraRecord> {
    vec![
        era(
            "1995",
            "The Hyperlink",
            "Raw HTML structure. Interaction was binary: clicked or unclicked.",
            EraStyle::Retro,
            "VISIT",
            [
                r##"<a href="#" style="color: #0f0;">HOME</a> <a href="#" style="color: #0f0;">ABOUT</a>"##,
                r#"<button style="background: #0f0; color: #000;">SUBMIT</button>"#,
                r#"<span style="background: #0f0; color: #000;">NEW!</span>"#,
                r#"<input type="text" placeholder="&gt; enter text">"#,
                r#"<span>[&lt; PREV]</span> <span>Page 1 of 3</span> <span>[NEXT &gt;]</span>"#,
            ],
        ),
        era(
            "2005",
            "Web 2.0 Gloss",
            "Plastic, gel buttons, and reflections. The interface mimicked physical objects.",
            EraStyle::Glossy,
            "SUBMIT",
            [
                r#"<span style="background: linear-gradient(to bottom, #666, #333);">Home</span> <span style="background: linear-gradient(to bottom, #666, #333);">Gallery</span>"#,
                r#"<button style="background: linear-gradient(to bottom, #5a5, #383);">Download</button>"#,
                r#"<span style="background: linear-gradient(to bottom, #f80, #c60);">★ Featured</span>"#,
                r#"<input type="text" placeholder="Search...">"#,
                r#"<span>◀</span> <span>●</span><span>●</span><span>●</span> <span>▶</span>"#,
            ],
        ),
        era(
            "2010",
            "Flat Design",
            "Minimalism rebellion. No shadows, no gradients. Pure digital utility.",
            EraStyle::Flat,
            "EXPLORE",
            [
                r#"<span style="color: #3498db; border-bottom: 2px solid #3498db;">Dashboard</span> <span style="color: #bdc3c7;">Settings</span>"#,
                r#"<button style="background: #1abc9c; color: white;">Get Started</button>"#,
                r#"<span style="background: #9b59b6; color: white;">Premium</span>"#,
                r#"<input type="text" placeholder="Enter email">"#,
                r#"<span>◀</span> <span class="dot"></span> <span class="dot"></span> <span>▶</span>"#,
            ],
        ),
        era(
            "2014",
            "Material Design",
            "Paper physics. Surfaces respond to touch with ripples and shadow depth.",
            EraStyle::Material,
            "TOUCH",
            [
                r#"<span style="background: #6750A4; color: white;">Home</span> <span style="color: #6750A4;">Explore</span>"#,
                r#"<button style="background: #6750A4; color: white;">Continue</button>"#,
                r#"<span style="background: #E8DEF8; color: #21005D;">Updated</span>"#,
                r#"<div><input type="text" placeholder=" "></div>"#,
                r#"<span>←</span> <span class="bar"></span> <span class="bar"></span> <span>→</span>"#,
            ],
        ),
        era(
            "2020",
            "Glassmorphism",
            "Frosted aesthetics. Layers of blur created hierarchy and modern depth.",
            EraStyle::Glass,
            "VIEW",
            [
                r#"<span style="background: rgba(255,255,255,0.15);">Home</span> <span style="color: rgba(255,255,255,0.7);">About</span>"#,
                r#"<button style="background: rgba(6,182,212,0.3);">Explore</button>"#,
                r#"<span style="background: rgba(255,255,255,0.1);">Online</span>"#,
                r#"<input type="text" placeholder="Search...">"#,
                r#"<span>◀</span> <span class="dot"></span> <span class="dot"></span> <span>▶</span>"#,
            ],
        ),
        era(
            "2025",
            "Hybrid Fluid",
            "Living interfaces. Solid structure mixed with organic motion and light.",
            EraStyle::Hybrid,
            "INITIALIZE",
            [
                r#"<span style="background: linear-gradient(135deg, rgba(139,92,246,0.3), rgba(6,182,212,0.3));">Dashboard</span> <span style="color: rgba(255,255,255,0.6);">Settings</span>"#,
                r#"<button style="background: linear-gradient(135deg, #8b5cf6, #06b6d4);">Start</button>"#,
                r#"<span style="background: linear-gradient(135deg, rgba(139,92,246,0.5), rgba(6,182,212,0.5));">● Live</span>"#,
                r#"<input type="text" placeholder="Type here...">"#,
                r#"<span>◀</span> <span class="bar"></span> <span class="bar"></span> <span>▶</span>"#,
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_covers_every_style_once() {
        let eras = builtin_eras();
        assert_eq!(eras.len(), 6);
        for (record, style) in eras.iter().zip(EraStyle::ALL) {
            assert_eq!(record.style(), Some(style));
        }
        assert_eq!(eras[1].title, "Web 2.0 Gloss");
    }

    #[test]
    fn test_unknown_class_has_no_style() {
        assert_eq!(EraStyle::from_class("modal-brutalist"), None);
        assert_eq!(EraStyle::from_class("modal-glass"), Some(EraStyle::Glass));
    }

    #[test]
    fn test_demo_slots_scan_to_elements() {
        let eras = builtin_eras();
        let nav = epoch_core::scan_fragment(eras[0].demos.get(DemoSlot::Nav));
        assert_eq!(nav.len(), 2);
        assert_eq!(nav[1].text, "ABOUT");
        let carousel = epoch_core::scan_fragment(eras[0].demos.get(DemoSlot::Carousel));
        assert_eq!(carousel[0].text, "[< PREV]");
    }
}
