//! Rendering of processed papers
//!
//! Both surfaces share one layout per paper: numbered title heading, link,
//! summary block, critique block, then a separator.

use crate::models::ProcessedPaper;

pub const APP_TITLE: &str = "Virtual Research Assistant";
pub const NO_PAPERS_MESSAGE: &str = "Failed to fetch papers. Try again!";

/// Markdown rendering used by the CLI.
pub fn render_markdown(papers: &[ProcessedPaper]) -> String {
    if papers.is_empty() {
        return format!("{}\n", NO_PAPERS_MESSAGE);
    }

    let mut output = String::from("## Top Research Papers:\n\n");
    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&format!("### {}. {}\n", i + 1, paper.title));
        output.push_str(&format!("🔗 [Read Paper]({})\n\n", paper.link));
        output.push_str(&format!("**Summary:** {}\n\n", paper.summary));
        output.push_str(&format!("{}\n\n", paper.critique));
        output.push_str("---\n\n");
    }
    output
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Only http(s) links become anchors; anything else is shown as text.
fn render_link(link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        format!(
            r#"<p>🔗 <a href="{}" target="_blank" rel="noopener">Read Paper</a></p>"#,
            escape_html(link)
        )
    } else {
        format!("<p>🔗 {}</p>", escape_html(link))
    }
}

/// HTML fragment for the results section of the web page.
pub fn render_html(papers: &[ProcessedPaper]) -> String {
    if papers.is_empty() {
        return format!(r#"<div class="error">{}</div>"#, NO_PAPERS_MESSAGE);
    }

    let mut html = String::from("<h2>Top Research Papers:</h2>\n");
    for (i, paper) in papers.iter().enumerate() {
        html.push_str(r#"<article class="paper">"#);
        html.push_str(&format!("<h3>{}. {}</h3>", i + 1, escape_html(&paper.title)));
        html.push_str(&render_link(&paper.link));
        html.push_str(&format!(
            r#"<div class="summary"><strong>Summary:</strong> {}</div>"#,
            escape_html(&paper.summary)
        ));
        html.push_str(&format!(r#"<div class="critique">{}</div>"#, escape_html(&paper.critique)));
        html.push_str("</article>\n<hr />\n");
    }
    html
}
