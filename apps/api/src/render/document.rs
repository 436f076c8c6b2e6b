use crate::render::node::{escape, Node};
use crate::render::templates::{RenderContext, TemplateDescriptor};

/// Print rules shared by every template. Per-role colours and sizes are
/// inline on the elements, so this only covers resets and pagination.
const BASE_CSS: &str = "\
*{box-sizing:border-box}\
body{margin:0;color:#1f2933;-webkit-print-color-adjust:exact;print-color-adjust:exact}\
h1,h2,p,ul{margin:0}\
.resume{max-width:210mm;margin:0 auto;padding:16pt}\
.resume-section{margin-top:10pt;break-inside:avoid}\
.entry{margin-top:6pt;break-inside:avoid}\
.entry-bullets{padding-left:14pt;margin-top:2pt}\
.pill-row{display:flex;flex-wrap:wrap;gap:4pt;margin-top:3pt}\
.skill-category{font-weight:600}\
a{color:inherit;text-decoration:none}\
@page{size:A4}";

/// Renders `ctx` with `template` and wraps it in a complete static HTML page,
/// suitable for preview and for the PDF service.
pub fn html_document(template: &TemplateDescriptor, ctx: &RenderContext<'_>) -> String {
    let tree: Node = template.render(ctx);
    let name = ctx.document.personal_info.full_name.trim();
    let title = if name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} — Resume")
    };
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{}</title><style>{BASE_CSS}</style></head><body>{}</body></html>",
        escape(&title),
        tree.to_html()
    )
}
