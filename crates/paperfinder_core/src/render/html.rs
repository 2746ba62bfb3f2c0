//! Page layout and yearly results rendering.

use crate::model::session::Session;
use crate::model::subject::SubjectCatalog;
use crate::render::topical::render_topics;
use crate::repo::catalog_repo::TopicCatalog;
use crate::service::yearly_service::{SubjectAvailability, YearlyQuery, ALL_VARIANTS};

/// External host for examiner reports and grade thresholds.
pub const EXTERNAL_BASE_URL: &str = "https://dynamicpapers.com/wp-content/uploads/2015/09/";

const PAGE_TITLE: &str = "Past Paper Finder";

/// Which browsing mode a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Yearly,
    Topical,
}

/// Whether the page is served live or written as a static file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Server routes, filter and add-subject forms.
    Interactive,
    /// Relative links between exported files, no forms.
    Static,
}

impl PageMode {
    fn yearly_href(self) -> &'static str {
        match self {
            Self::Interactive => "/",
            Self::Static => "index.html",
        }
    }

    fn topical_href(self) -> &'static str {
        match self {
            Self::Interactive => "/topical",
            Self::Static => "topical.html",
        }
    }

    fn stylesheet_href(self) -> &'static str {
        match self {
            Self::Interactive => "/static/style.css",
            Self::Static => "static/style.css",
        }
    }
}

/// Everything one page render needs.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub view: View,
    pub mode: PageMode,
    pub subjects: &'a SubjectCatalog,
    pub topics: &'a TopicCatalog,
    /// `None` until the yearly form has been submitted.
    pub results: Option<&'a [SubjectAvailability]>,
    /// Filters used to prefill the yearly form.
    pub query: Option<&'a YearlyQuery>,
}

/// Renders a complete HTML document.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{PAGE_TITLE}</title>\n"));
    out.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        ctx.mode.stylesheet_href()
    ));
    out.push_str("</head>\n<body>\n");
    render_nav(&mut out, ctx);
    out.push_str("<main>\n");
    match ctx.view {
        View::Yearly => {
            if ctx.mode == PageMode::Interactive {
                render_filter_form(&mut out, ctx.query);
            }
            if let Some(results) = ctx.results {
                render_results(&mut out, results);
            }
            if ctx.mode == PageMode::Interactive {
                render_add_subject_form(&mut out, ctx.subjects);
            }
        }
        View::Topical => render_topics(&mut out, ctx.topics),
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn render_nav(out: &mut String, ctx: &PageContext<'_>) {
    let class = |view: View| if ctx.view == view { " class=\"active\"" } else { "" };
    out.push_str(&format!(
        "<nav>\n<a href=\"{}\"{}>Yearly Papers</a>\n<a href=\"{}\"{}>Topical Papers</a>\n</nav>\n",
        ctx.mode.yearly_href(),
        class(View::Yearly),
        ctx.mode.topical_href(),
        class(View::Topical)
    ));
}

fn render_filter_form(out: &mut String, query: Option<&YearlyQuery>) {
    let year_range = query
        .map(|q| format!("{}-{}", q.start_year, q.end_year))
        .unwrap_or_default();
    let session_selected = |code: &str| query.is_some_and(|q| q.sessions.iter().any(|s| s == code));
    let variant_selected = |code: &str| query.is_some_and(|q| q.variants.iter().any(|v| v == code));

    out.push_str("<form class=\"filters\" method=\"post\" action=\"/\">\n");
    out.push_str(&format!(
        "<label>Years <input name=\"year_range\" placeholder=\"2020-2025\" value=\"{}\"></label>\n",
        escape_html(&year_range)
    ));

    out.push_str("<fieldset><legend>Sessions</legend>\n");
    out.push_str("<label><input type=\"checkbox\" name=\"sessions_all\" value=\"on\"> All</label>\n");
    for session in Session::ALL {
        out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"sessions\" value=\"{}\"{}> {}</label>\n",
            session.code(),
            checked(session_selected(session.code())),
            session.name()
        ));
    }
    out.push_str("</fieldset>\n");

    out.push_str("<fieldset><legend>Variants</legend>\n");
    out.push_str("<label><input type=\"checkbox\" name=\"variants_all\" value=\"on\"> All</label>\n");
    for variant in ALL_VARIANTS {
        out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"variants\" value=\"{variant}\"{}> {variant}</label>\n",
            checked(variant_selected(variant))
        ));
    }
    out.push_str("</fieldset>\n");
    out.push_str("<button type=\"submit\">Find papers</button>\n</form>\n");
}

fn render_results(out: &mut String, results: &[SubjectAvailability]) {
    out.push_str("<section class=\"results\">\n");
    if results.is_empty() {
        out.push_str("<p class=\"empty\">No subjects in the catalog.</p>\n");
    }
    for subject in results {
        out.push_str(&format!(
            "<article class=\"subject\" id=\"subject-{}\">\n<h2>{} ({})</h2>\n",
            escape_html(&subject.code),
            escape_html(&subject.name),
            escape_html(&subject.code)
        ));
        let mut rendered_any = false;
        for year in &subject.links.years {
            let sessions: Vec<_> = year.sessions.iter().filter(|s| s.has_files()).collect();
            if sessions.is_empty() {
                continue;
            }
            rendered_any = true;
            out.push_str(&format!(
                "<details class=\"year\" open>\n<summary>{}</summary>\n",
                escape_html(&year.year)
            ));
            for session in sessions {
                out.push_str(&format!(
                    "<div class=\"session\">\n<h3>{}</h3>\n",
                    escape_html(&session.label)
                ));
                out.push_str(&format!(
                    "<p class=\"extras\"><a href=\"{base}{code}_{short}_er.pdf\">ER</a> <a href=\"{base}{code}_{short}_gt.pdf\">GT</a></p>\n",
                    base = EXTERNAL_BASE_URL,
                    code = escape_html(&subject.code),
                    short = escape_html(&session.short_code)
                ));
                out.push_str("<ul class=\"papers\">\n");
                for paper in session.papers.iter().filter(|p| !p.is_empty()) {
                    out.push_str(&format!("<li><span class=\"paper\">{}</span>", escape_html(&paper.label)));
                    render_links(out, "QP", &paper.question_papers);
                    render_links(out, "MS", &paper.mark_schemes);
                    out.push_str("</li>\n");
                }
                out.push_str("</ul>\n</div>\n");
            }
            out.push_str("</details>\n");
        }
        if !rendered_any {
            out.push_str("<p class=\"empty\">No papers found for the selected filters.</p>\n");
        }
        out.push_str("</article>\n");
    }
    out.push_str("</section>\n");
}

fn render_links(out: &mut String, kind: &str, paths: &[String]) {
    for path in paths {
        out.push_str(&format!(
            " <a class=\"{}\" href=\"{}\" target=\"_blank\">{} {}</a>",
            kind.to_ascii_lowercase(),
            escape_html(path),
            kind,
            escape_html(variant_tag(path))
        ));
    }
}

fn render_add_subject_form(out: &mut String, subjects: &SubjectCatalog) {
    out.push_str("<section class=\"catalog\">\n<h2>Subjects</h2>\n<ul>\n");
    for (code, subject) in subjects {
        out.push_str(&format!(
            "<li>{} ({}): {} papers</li>\n",
            escape_html(&subject.name),
            escape_html(code),
            subject.papers.len()
        ));
    }
    out.push_str("</ul>\n");
    out.push_str("<form class=\"add-subject\" method=\"post\" action=\"/add_subject\">\n");
    out.push_str("<label>Code <input name=\"code\" required></label>\n");
    out.push_str("<label>Name <input name=\"name\" required></label>\n");
    out.push_str(
        "<label>Papers <input name=\"papers\" placeholder=\"1:Multiple Choice, 2:Structured\" required></label>\n",
    );
    out.push_str("<button type=\"submit\">Add subject</button>\n</form>\n</section>\n");
}

/// Paper-variant tag of an asset path, e.g. `12` for `..._qp_12.pdf`.
fn variant_tag(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file.strip_suffix(".pdf").unwrap_or(file);
    stem.rsplit('_').next().unwrap_or(stem)
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

/// Escapes text for HTML element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_html, variant_tag};

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn variant_tag_reads_last_file_segment() {
        assert_eq!(variant_tag("/static/yearly_papers/PHY/PHY_w23_qp_12.pdf"), "12");
        assert_eq!(variant_tag("odd"), "odd");
    }
}
