//! Shared sub-renderers. Templates compose these; none of them formats
//! entities on its own.

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument, SkillGroup,
};
use crate::render::format::{format_month_year, format_range, join_present, non_blank};
use crate::render::node::Node;
use crate::render::theme::Theme;
use crate::sections::{has_content, SectionKey};

/// How a template decorates its section headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// Accent text with a thin accent underline.
    Underline,
    /// Accent text followed by a full-width accent divider.
    Rule,
    /// Small letter-spaced capitals in the accent colour.
    Caps,
    /// Accent bar on the left edge.
    Bar,
    /// Heading set inside a soft accent pill.
    Pill,
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Renders one section, or `None` when it has no content (no heading, no divider).
pub fn section(
    key: SectionKey,
    doc: &ResumeDocument,
    theme: &Theme,
    heading: HeadingStyle,
) -> Option<Node> {
    if !has_content(doc, key) {
        return None;
    }
    let mut node = Node::el("section")
        .class("resume-section")
        .attr("data-section", key.as_str())
        .child(section_heading(key, theme, heading));
    if heading == HeadingStyle::Rule {
        node = node.child(divider(theme));
    }
    Some(node.child(section_body(key, doc, theme)))
}

/// Renders every non-empty section of `keys`, in the given order.
pub fn sections(
    keys: &[SectionKey],
    doc: &ResumeDocument,
    theme: &Theme,
    heading: HeadingStyle,
) -> Vec<Node> {
    keys.iter()
        .filter_map(|key| section(*key, doc, theme, heading))
        .collect()
}

pub fn section_heading(key: SectionKey, theme: &Theme, heading: HeadingStyle) -> Node {
    let node = Node::el("h2")
        .class("section-title")
        .attr("data-section", key.as_str())
        .style("color", theme.accent.clone())
        .style("font-size", theme.pt(12.5));
    let node = match heading {
        HeadingStyle::Underline => node
            .style("border-bottom", format!("1px solid {}", theme.accent))
            .style("padding-bottom", "2pt"),
        HeadingStyle::Rule => node.style("margin-bottom", "2pt"),
        HeadingStyle::Caps => node
            .style("text-transform", "uppercase")
            .style("letter-spacing", "0.12em")
            .style("font-size", theme.pt(10.0)),
        HeadingStyle::Bar => node
            .style("border-left", format!("3pt solid {}", theme.accent))
            .style("padding-left", "6pt"),
        HeadingStyle::Pill => node
            .style("background", theme.accent_soft())
            .style("border-radius", "999px")
            .style("padding", "2pt 10pt")
            .style("display", "inline-block"),
    };
    node.with_text(key.title())
}

pub fn divider(theme: &Theme) -> Node {
    Node::el("hr")
        .class("section-divider")
        .style("border", "none")
        .style("border-top", format!("1px solid {}", theme.accent))
}

fn pill(label: &str, theme: &Theme) -> Node {
    Node::el("span")
        .class("pill")
        .style("background", theme.accent_soft())
        .style("color", theme.accent.clone())
        .style("border-radius", "999px")
        .style("padding", "1pt 6pt")
        .style("font-size", theme.pt(9.0))
        .with_text(label)
}

/// Exhaustive over `SectionKey`: adding a key must add its body here.
pub fn section_body(key: SectionKey, doc: &ResumeDocument, theme: &Theme) -> Node {
    let body = Node::el("div").class("section-body");
    match key {
        SectionKey::Summary => body.child(summary(&doc.personal_info)),
        SectionKey::Experience => body.children(
            doc.experience
                .iter()
                .filter(|e| filled(&e.job_title) || filled(&e.company))
                .map(|e| experience_entry(e, theme)),
        ),
        SectionKey::Projects => body.children(
            doc.projects
                .iter()
                .filter(|p| filled(&p.title) || filled(&p.description))
                .map(|p| project_entry(p, theme)),
        ),
        SectionKey::Education => body.children(
            doc.education
                .iter()
                .filter(|e| filled(&e.degree) || filled(&e.institution))
                .map(|e| education_entry(e, theme)),
        ),
        SectionKey::Skills => body.children(
            doc.skills
                .iter()
                .filter_map(|g| skill_group(g, theme)),
        ),
        SectionKey::Certifications => body.children(
            doc.certifications
                .iter()
                .filter(|c| filled(&c.name) || filled(&c.issuer))
                .map(|c| certification_entry(c, theme)),
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entity renderers
// ────────────────────────────────────────────────────────────────────────────

pub fn summary(info: &PersonalInfo) -> Node {
    Node::el("p").class("summary").with_text(info.summary.trim())
}

/// Title on the left, dates on the right.
fn entry_header(title: Node, dates: String, theme: &Theme) -> Node {
    let mut row = Node::el("div")
        .class("entry-header")
        .style("display", "flex")
        .style("justify-content", "space-between")
        .child(title);
    if !dates.is_empty() {
        row = row.child(
            Node::el("span")
                .class("entry-dates")
                .style("font-size", theme.pt(9.5))
                .with_text(dates),
        );
    }
    row
}

fn subtitle(parts: &[&str]) -> Option<Node> {
    let line = join_present(parts, " · ");
    (!line.is_empty()).then(|| Node::el("div").class("entry-subtitle").with_text(line))
}

fn paragraph(text: &str) -> Option<Node> {
    filled(text).then(|| Node::el("p").class("entry-description").with_text(text.trim()))
}

fn bullet_list(items: &[String]) -> Option<Node> {
    let items = non_blank(items);
    if items.is_empty() {
        return None;
    }
    Some(
        Node::el("ul")
            .class("entry-bullets")
            .children(items.into_iter().map(|i| Node::el("li").with_text(i))),
    )
}

const LINK_SCHEMES: [&str; 3] = ["http:", "https:", "mailto:"];

/// The trimmed `href` when it uses a scheme that cannot run script.
fn safe_href(href: &str) -> Option<&str> {
    let href = href.trim();
    let allowed = LINK_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    allowed.then_some(href)
}

/// A link for web and mail addresses; anything else renders as plain text.
fn link_or_text(label: &str, href: &str) -> Node {
    match safe_href(href) {
        Some(href) => Node::el("a").attr("href", href).with_text(label),
        None => Node::text(label),
    }
}

pub fn experience_entry(entry: &ExperienceEntry, theme: &Theme) -> Node {
    let title = Node::el("strong")
        .class("entry-title")
        .with_text(entry.job_title.trim());
    let dates = format_range(&entry.start_date, &entry.end_date, entry.current);
    Node::el("div")
        .class("entry")
        .class("experience-entry")
        .child(entry_header(title, dates, theme))
        .children(subtitle(&[entry.company.as_str(), entry.location.as_str()]))
        .children(paragraph(&entry.description))
        .children(bullet_list(&entry.responsibilities))
}

pub fn education_entry(entry: &EducationEntry, theme: &Theme) -> Node {
    let title = Node::el("strong")
        .class("entry-title")
        .with_text(entry.degree.trim());
    let dates = format_range(&entry.start_date, &entry.end_date, entry.current);
    let gpa = if filled(&entry.gpa) {
        format!("GPA: {}", entry.gpa.trim())
    } else {
        String::new()
    };
    Node::el("div")
        .class("entry")
        .class("education-entry")
        .child(entry_header(title, dates, theme))
        .children(subtitle(&[entry.institution.as_str(), entry.location.as_str(), gpa.as_str()]))
        .children(paragraph(&entry.description))
}

pub fn project_entry(entry: &ProjectEntry, theme: &Theme) -> Node {
    let title = Node::el("strong")
        .class("entry-title")
        .child(link_or_text(entry.title.trim(), &entry.link));
    let dates = format_range(&entry.start_date, &entry.end_date, entry.current);
    let technologies = non_blank(&entry.technologies);
    let mut node = Node::el("div")
        .class("entry")
        .class("project-entry")
        .child(entry_header(title, dates, theme))
        .children(paragraph(&entry.description));
    if !technologies.is_empty() {
        node = node.child(
            Node::el("div")
                .class("pill-row")
                .children(technologies.into_iter().map(|t| pill(t, theme))),
        );
    }
    node
}

/// `None` when the group has neither a category nor a non-blank item.
pub fn skill_group(group: &SkillGroup, theme: &Theme) -> Option<Node> {
    let items = non_blank(&group.items);
    if !filled(&group.category) && items.is_empty() {
        return None;
    }
    let mut node = Node::el("div").class("skill-group");
    if filled(&group.category) {
        node = node.child(
            Node::el("span")
                .class("skill-category")
                .with_text(group.category.trim()),
        );
    }
    Some(
        node.child(
            Node::el("div")
                .class("pill-row")
                .children(items.into_iter().map(|i| pill(i, theme))),
        ),
    )
}

pub fn certification_entry(entry: &CertificationEntry, theme: &Theme) -> Node {
    let title = Node::el("strong")
        .class("entry-title")
        .child(link_or_text(entry.name.trim(), &entry.link));
    let credential = if filled(&entry.credential_id) {
        format!("Credential ID {}", entry.credential_id.trim())
    } else {
        String::new()
    };
    Node::el("div")
        .class("entry")
        .class("certification-entry")
        .child(entry_header(title, format_month_year(&entry.date), theme))
        .children(subtitle(&[entry.issuer.as_str(), credential.as_str()]))
}

// ────────────────────────────────────────────────────────────────────────────
// Header blocks
// ────────────────────────────────────────────────────────────────────────────

/// Contact lines; `stacked` puts one item per line (sidebars), otherwise inline.
pub fn contact_block(info: &PersonalInfo, theme: &Theme, stacked: bool) -> Option<Node> {
    let mut items = Vec::new();
    if filled(&info.email) {
        let email = info.email.trim();
        items.push(link_or_text(email, &format!("mailto:{email}")));
    }
    for plain in [&info.phone, &info.location] {
        if filled(plain) {
            items.push(Node::text(plain.trim()));
        }
    }
    for url in [&info.website, &info.linkedin, &info.github] {
        if filled(url) {
            items.push(link_or_text(display_url(url), url));
        }
    }
    if items.is_empty() {
        return None;
    }

    let node = Node::el("div")
        .class("contact")
        .style("font-size", theme.pt(9.5));
    let node = if stacked {
        node.style("display", "flex").style("flex-direction", "column")
    } else {
        node.style("display", "flex")
            .style("flex-wrap", "wrap")
            .style("gap", "0 10pt")
    };
    Some(node.children(
        items
            .into_iter()
            .map(|item| Node::el("span").class("contact-item").child(item)),
    ))
}

fn display_url(url: &str) -> &str {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let url = url.strip_prefix("www.").unwrap_or(url);
    url.trim_end_matches('/')
}

/// Up to two initials from the name; `?` when the name is blank.
pub fn initials(full_name: &str) -> String {
    let letters: String = full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Profile photo, degrading to an initials placeholder when no URL is available.
pub fn photo(info: &PersonalInfo, photo_url: Option<&str>, size_px: u32, theme: &Theme) -> Node {
    let size = format!("{size_px}px");
    match photo_url.filter(|u| filled(u)) {
        Some(url) => Node::el("img")
            .class("photo")
            .attr("src", url)
            .attr("alt", info.full_name.trim())
            .attr("width", size_px.to_string())
            .attr("height", size_px.to_string())
            .style("border-radius", "50%")
            .style("object-fit", "cover"),
        None => Node::el("div")
            .class("photo")
            .class("photo-placeholder")
            .style("width", size.clone())
            .style("height", size)
            .style("border-radius", "50%")
            .style("background", theme.accent_soft())
            .style("color", theme.accent.clone())
            .style("display", "flex")
            .style("align-items", "center")
            .style("justify-content", "center")
            .style("font-weight", "700")
            .with_text(initials(&info.full_name)),
    }
}

/// Name and job title.
pub fn name_block(info: &PersonalInfo, theme: &Theme, on_accent: bool) -> Node {
    let color = if on_accent {
        "#ffffff".to_string()
    } else {
        theme.accent.clone()
    };
    let mut node = Node::el("div").class("name-block").child(
        Node::el("h1")
            .class("name")
            .style("color", color)
            .style("font-size", theme.pt(22.0))
            .style("margin", "0")
            .with_text(info.full_name.trim()),
    );
    if filled(&info.job_title) {
        node = node.child(
            Node::el("div")
                .class("job-title")
                .style("font-size", theme.pt(12.0))
                .with_text(info.job_title.trim()),
        );
    }
    node
}
