//! Template registry.
//!
//! Every template is a `TemplateDescriptor`: static metadata plus the layout,
//! heading and font choices it composes the shared components with. Section
//! order always comes from the document (normalized, then split by the
//! template's sidebar set); no template orders sections itself.

use serde::Serialize;
use thiserror::Error;

use crate::models::resume::{ResumeDocument, StyleSettings};
use crate::render::components::{self, HeadingStyle};
use crate::render::node::Node;
use crate::render::theme::Theme;
use crate::sections::{split, SectionKey};

use SectionKey::*;

// ────────────────────────────────────────────────────────────────────────────
// Descriptor types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    SingleColumn,
    /// Single column under an accent header band.
    Banner,
    SidebarLeft,
    SidebarRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStack {
    Sans,
    Serif,
    Mono,
}

impl FontStack {
    pub fn css(self) -> &'static str {
        match self {
            FontStack::Sans => "'Inter', 'Helvetica Neue', Arial, sans-serif",
            FontStack::Serif => "'EB Garamond', Georgia, 'Times New Roman', serif",
            FontStack::Mono => "'JetBrains Mono', 'Fira Code', Menlo, monospace",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub key: &'static str,
    pub name: &'static str,
    /// Keys rendered in the secondary region; empty for single-region templates.
    pub sidebar_sections: &'static [SectionKey],
    pub layout: Layout,
    #[serde(skip)]
    pub heading: HeadingStyle,
    pub font: FontStack,
    pub show_photo: bool,
}

/// Everything a template reads. Nothing in it is mutated.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub document: &'a ResumeDocument,
    pub style: &'a StyleSettings,
    /// Resolved by the caller; `None` renders the initials placeholder.
    pub photo_url: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
}

const PHOTO_PX: u32 = 96;
const SIDEBAR_PHOTO_PX: u32 = 120;

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

const fn single(
    key: &'static str,
    name: &'static str,
    heading: HeadingStyle,
    font: FontStack,
    show_photo: bool,
) -> TemplateDescriptor {
    TemplateDescriptor {
        key,
        name,
        sidebar_sections: &[],
        layout: Layout::SingleColumn,
        heading,
        font,
        show_photo,
    }
}

const fn banner(
    key: &'static str,
    name: &'static str,
    heading: HeadingStyle,
    font: FontStack,
    show_photo: bool,
) -> TemplateDescriptor {
    TemplateDescriptor {
        key,
        name,
        sidebar_sections: &[],
        layout: Layout::Banner,
        heading,
        font,
        show_photo,
    }
}

const fn sidebar(
    key: &'static str,
    name: &'static str,
    layout: Layout,
    sidebar_sections: &'static [SectionKey],
    heading: HeadingStyle,
    font: FontStack,
    show_photo: bool,
) -> TemplateDescriptor {
    TemplateDescriptor {
        key,
        name,
        sidebar_sections,
        layout,
        heading,
        font,
        show_photo,
    }
}

const SKILLS_CERTS: &[SectionKey] = &[Skills, Certifications];
const SKILLS_EDU_CERTS: &[SectionKey] = &[Skills, Education, Certifications];
const SKILLS_EDU: &[SectionKey] = &[Skills, Education];
const SUMMARY_SKILLS: &[SectionKey] = &[Summary, Skills];
const SUMMARY_SKILLS_CERTS: &[SectionKey] = &[Summary, Skills, Certifications];
const SKILLS_ONLY: &[SectionKey] = &[Skills];

use FontStack::{Mono, Sans, Serif};
use HeadingStyle::{Bar, Caps, Pill, Rule, Underline};
use Layout::{SidebarLeft, SidebarRight};

static TEMPLATES: [TemplateDescriptor; 30] = [
    single("classic", "Classic", Rule, Serif, false),
    single("minimal", "Minimal", Caps, Sans, false),
    single("professional", "Professional", Underline, Sans, false),
    single("executive", "Executive", Rule, Serif, false),
    single("academic", "Academic", Underline, Serif, false),
    single("compact", "Compact", Caps, Sans, false),
    single("technical", "Technical", Bar, Mono, false),
    single("elegant", "Elegant", Caps, Serif, true),
    single("clean", "Clean", Underline, Sans, true),
    single("ats", "ATS Friendly", Rule, Sans, false),
    banner("bold", "Bold", Bar, Sans, true),
    banner("corporate", "Corporate", Rule, Sans, false),
    banner("aurora", "Aurora", Pill, Sans, true),
    banner("summit", "Summit", Caps, Serif, false),
    banner("horizon", "Horizon", Underline, Sans, true),
    sidebar("modern", "Modern", SidebarLeft, SKILLS_CERTS, Underline, Sans, true),
    sidebar("creative", "Creative", SidebarLeft, SKILLS_EDU_CERTS, Pill, Sans, true),
    sidebar("designer", "Designer", SidebarRight, SKILLS_EDU, Pill, Sans, true),
    sidebar("developer", "Developer", SidebarRight, SKILLS_CERTS, Bar, Mono, false),
    sidebar("nordic", "Nordic", SidebarLeft, SKILLS_EDU, Caps, Sans, true),
    sidebar("metro", "Metro", SidebarRight, SKILLS_EDU_CERTS, Rule, Sans, false),
    sidebar("slate", "Slate", SidebarLeft, SUMMARY_SKILLS, Caps, Sans, true),
    sidebar("harbor", "Harbor", SidebarRight, SKILLS_ONLY, Underline, Serif, false),
    sidebar("atlas", "Atlas", SidebarLeft, SKILLS_CERTS, Rule, Serif, true),
    sidebar("meridian", "Meridian", SidebarRight, SUMMARY_SKILLS_CERTS, Bar, Sans, true),
    sidebar("cascade", "Cascade", SidebarLeft, SKILLS_EDU_CERTS, Underline, Sans, false),
    sidebar("ember", "Ember", SidebarRight, SKILLS_CERTS, Pill, Sans, true),
    sidebar("quartz", "Quartz", SidebarLeft, SKILLS_ONLY, Caps, Mono, false),
    sidebar("sterling", "Sterling", SidebarRight, SKILLS_EDU, Rule, Serif, true),
    sidebar("vertex", "Vertex", SidebarLeft, SUMMARY_SKILLS, Bar, Sans, true),
];

/// All registered templates, in picker order.
pub fn templates() -> &'static [TemplateDescriptor] {
    &TEMPLATES
}

/// Looks up a template by key. `None` means the key is not registered.
pub fn lookup(key: &str) -> Option<&'static TemplateDescriptor> {
    TEMPLATES.iter().find(|t| t.key == key)
}

/// Renders `ctx` with the template registered under `key`.
pub fn render(key: &str, ctx: &RenderContext<'_>) -> Result<Node, RenderError> {
    lookup(key)
        .map(|template| template.render(ctx))
        .ok_or_else(|| RenderError::UnknownTemplate(key.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Layouts
// ────────────────────────────────────────────────────────────────────────────

impl TemplateDescriptor {
    pub fn has_sidebar(&self) -> bool {
        !self.sidebar_sections.is_empty()
    }

    /// Pure: reads the context, returns a fresh tree.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Node {
        let theme = Theme::from_style(ctx.style);
        let doc = ctx.document;
        let regions = split(&doc.section_order(), self.sidebar_sections);

        let root = Node::el("div")
            .class("resume")
            .attr("data-template", self.key)
            .style("font-family", self.font.css())
            .style("font-size", theme.body_size())
            .style("line-height", theme.line_height());

        match self.layout {
            Layout::SingleColumn => root
                .class("layout-single")
                .child(self.header(ctx, &theme, false))
                .children(components::sections(&regions.main, doc, &theme, self.heading)),
            Layout::Banner => root
                .class("layout-banner")
                .child(self.header(ctx, &theme, true))
                .child(
                    Node::el("main")
                        .class("main-region")
                        .style("padding", "0 24pt")
                        .children(components::sections(&regions.main, doc, &theme, self.heading)),
                ),
            Layout::SidebarLeft | Layout::SidebarRight => {
                let aside = self.sidebar_column(ctx, &theme, &regions.sidebar);
                let main = Node::el("main")
                    .class("main-region")
                    .style("flex", "1")
                    .child(components::name_block(&doc.personal_info, &theme, false))
                    .children(components::sections(&regions.main, doc, &theme, self.heading));
                let row = Node::el("div")
                    .class("columns")
                    .style("display", "flex")
                    .style("gap", "18pt");
                let row = if self.layout == Layout::SidebarLeft {
                    row.child(aside).child(main)
                } else {
                    row.child(main).child(aside)
                };
                root.class("layout-sidebar").child(row)
            }
        }
    }

    fn header(&self, ctx: &RenderContext<'_>, theme: &Theme, on_accent: bool) -> Node {
        let info = &ctx.document.personal_info;
        let mut header = Node::el("header").class("resume-header");
        if on_accent {
            header = header
                .style("background", theme.accent.clone())
                .style("color", "#ffffff")
                .style("padding", "18pt 24pt");
        }
        if self.show_photo {
            header = header
                .style("display", "flex")
                .style("gap", "14pt")
                .child(components::photo(info, ctx.photo_url, PHOTO_PX, theme));
        }
        let mut text = Node::el("div")
            .class("header-text")
            .child(components::name_block(info, theme, on_accent));
        if let Some(contact) = components::contact_block(info, theme, false) {
            text = text.child(contact);
        }
        header.child(text)
    }

    fn sidebar_column(&self, ctx: &RenderContext<'_>, theme: &Theme, keys: &[SectionKey]) -> Node {
        let info = &ctx.document.personal_info;
        let mut aside = Node::el("aside")
            .class("sidebar-region")
            .style("width", "32%")
            .style("background", theme.accent_soft())
            .style("padding", "14pt");
        if self.show_photo {
            aside = aside.child(components::photo(info, ctx.photo_url, SIDEBAR_PHOTO_PX, theme));
        }
        if let Some(contact) = components::contact_block(info, theme, true) {
            aside = aside.child(contact);
        }
        aside.children(components::sections(keys, ctx.document, theme, self.heading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ExperienceEntry, SkillGroup};
    use crate::sections::SectionOrder;
    use std::collections::HashSet;

    fn headings(node: &Node) -> Vec<String> {
        node.descendants()
            .into_iter()
            .filter(|n| n.has_class("section-title"))
            .filter_map(|n| n.attr_value("data-section").map(str::to_string))
            .collect()
    }

    fn skills_only_doc() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.personal_info.email = "ada@example.com".to_string();
        doc.skills.push(SkillGroup {
            category: "Languages".to_string(),
            items: vec!["Rust".to_string(), " ".to_string()],
        });
        // Present but blank entries must not produce headings.
        doc.experience.push(ExperienceEntry::default());
        doc
    }

    #[test]
    fn test_registry_has_thirty_unique_keys() {
        let keys: HashSet<&str> = templates().iter().map(|t| t.key).collect();
        assert_eq!(templates().len(), 30);
        assert_eq!(keys.len(), 30);
    }

    #[test]
    fn test_sidebar_layouts_declare_sidebar_sections() {
        for t in templates() {
            let is_sidebar = matches!(t.layout, Layout::SidebarLeft | Layout::SidebarRight);
            assert_eq!(is_sidebar, t.has_sidebar(), "template {}", t.key);
        }
    }

    #[test]
    fn test_lookup_distinguishes_unknown_key() {
        assert!(lookup("classic").is_some());
        assert!(lookup("does-not-exist").is_none());

        let doc = ResumeDocument::default();
        let style = StyleSettings::default();
        let ctx = RenderContext {
            document: &doc,
            style: &style,
            photo_url: None,
        };
        assert_eq!(
            render("does-not-exist", &ctx),
            Err(RenderError::UnknownTemplate("does-not-exist".to_string()))
        );
        // Found-but-empty renders a tree with no sections.
        let tree = render("classic", &ctx).unwrap();
        assert!(headings(&tree).is_empty());
    }

    #[test]
    fn test_every_template_renders_exactly_the_non_empty_section() {
        let doc = skills_only_doc();
        let style = StyleSettings::default();
        let ctx = RenderContext {
            document: &doc,
            style: &style,
            photo_url: None,
        };
        for t in templates() {
            let tree = t.render(&ctx);
            assert_eq!(headings(&tree), vec!["skills".to_string()], "template {}", t.key);
        }
    }

    #[test]
    fn test_rendering_does_not_mutate_document() {
        let doc = skills_only_doc();
        let before = doc.clone();
        let style = StyleSettings::default();
        let ctx = RenderContext {
            document: &doc,
            style: &style,
            photo_url: None,
        };
        for t in templates() {
            let _ = t.render(&ctx);
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn test_sections_follow_document_order_within_regions() {
        let mut doc = skills_only_doc();
        doc.personal_info.summary = "Engineer.".to_string();
        doc.experience[0].company = "Acme".to_string();
        doc.certifications.push(crate::models::resume::CertificationEntry {
            name: "CKA".to_string(),
            ..Default::default()
        });
        doc.set_section_order(SectionOrder::from_keys([Certifications, Experience, Skills, Summary]));
        let style = StyleSettings::default();
        let ctx = RenderContext {
            document: &doc,
            style: &style,
            photo_url: None,
        };

        let single = lookup("classic").unwrap().render(&ctx);
        assert_eq!(headings(&single), vec!["certifications", "experience", "skills", "summary"]);

        // modern: skills + certifications in a left sidebar, rendered before main.
        let modern = lookup("modern").unwrap().render(&ctx);
        assert_eq!(headings(&modern), vec!["certifications", "skills", "experience", "summary"]);
    }

    #[test]
    fn test_accent_is_applied_consistently_across_templates() {
        let doc = skills_only_doc();
        let style = StyleSettings {
            accent_color: "#AA3300".to_string(),
            ..Default::default()
        };
        let ctx = RenderContext {
            document: &doc,
            style: &style,
            photo_url: None,
        };
        for t in templates() {
            let tree = t.render(&ctx);
            let heading = tree
                .descendants()
                .into_iter()
                .find(|n| n.has_class("section-title"))
                .cloned()
                .unwrap();
            let html = heading.to_html();
            assert!(html.contains("color:#aa3300"), "template {} heading {html}", t.key);
            let pill = tree
                .descendants()
                .into_iter()
                .find(|n| n.has_class("pill"))
                .cloned()
                .unwrap();
            assert!(pill.to_html().contains("background:#aa33001f"), "template {}", t.key);
        }
    }

    #[test]
    fn test_photo_templates_use_url_or_placeholder() {
        let doc = skills_only_doc();
        let style = StyleSettings::default();
        let template = lookup("modern").unwrap();

        let with_url = template.render(&RenderContext {
            document: &doc,
            style: &style,
            photo_url: Some("https://cdn.example/ada.png"),
        });
        assert!(with_url.to_html().contains("src=\"https://cdn.example/ada.png\""));

        let without = template.render(&RenderContext {
            document: &doc,
            style: &style,
            photo_url: None,
        });
        assert!(without.to_html().contains("photo-placeholder"));
        assert!(!lookup("classic")
            .unwrap()
            .render(&RenderContext {
                document: &doc,
                style: &style,
                photo_url: None,
            })
            .to_html()
            .contains("photo"));
    }
}
