//! HTML rendering. Every page is a pure function of its inputs; nothing
//! here touches storage or the network.

use roadmap_core::form::{RoadmapForm, ValidationError};
use roadmap_core::model::{Goal, Maturity, OrgSize, RoadmapResult, RoadmapSummary};

/// Escape text for inclusion in an HTML document.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline feedback shown at the top of the submission form.
pub enum FormBanner<'a> {
    /// A field failed validation.
    Invalid(&'a ValidationError),
    /// Generation failed after a valid submission.
    Failed { message: String, retryable: bool },
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:60rem;margin:0 auto;padding:1rem 2rem;color:#1a1a1a}\
nav a{margin-right:1rem}\
fieldset{border:1px solid #ccc;margin:1rem 0;padding:1rem}\
label{display:block;margin:.4rem 0}\
.banner{padding:.8rem 1rem;border:1px solid;margin:1rem 0}\
.banner.error{border-color:#b3261e;background:#fdeded}\
.banner.retry{border-color:#8a6d00;background:#fff8e1}\
.priority{font-size:.8rem;padding:.1rem .5rem;border-radius:.6rem;border:1px solid #999}\
.priority.high{background:#fdeded}\
.priority.medium{background:#fff8e1}\
.priority.low{background:#edf7ed}\
.window{color:#555;font-size:.9rem;font-weight:normal}\
table{border-collapse:collapse;width:100%}\
td,th{border-bottom:1px solid #ddd;padding:.5rem;text-align:left}\
.mermaid{margin:1rem 0}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
<title>{} - AI Roadmap Planner</title><style>{STYLE}</style></head><body>\
<nav><a href=\"/\">New roadmap</a><a href=\"/roadmaps\">History</a></nav>\
{body}\
</body></html>",
        escape(title)
    )
}

/// Format an epoch-ms timestamp for display.
pub(crate) fn fmt_date(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// The submission form. `prior` re-fills the fields after a failed attempt.
pub fn form_page(
    form_token: &str,
    banner: Option<&FormBanner<'_>>,
    prior: Option<&RoadmapForm>,
) -> String {
    let banner_html = match banner {
        None => String::new(),
        Some(FormBanner::Invalid(err)) => format!(
            "<div class=\"banner error\" data-field=\"{}\">{}</div>",
            err.field(),
            escape(&err.to_string())
        ),
        Some(FormBanner::Failed { message, retryable }) => {
            let class = if *retryable { "banner retry" } else { "banner error" };
            let hint = if *retryable {
                " The provider looks temporarily unavailable; submitting again may succeed."
            } else {
                ""
            };
            format!("<div class=\"{class}\">Roadmap generation failed: {}.{hint}</div>", escape(message))
        }
    };

    let organization = prior.map(|f| f.organization.as_str()).unwrap_or("");
    let industry = prior.map(|f| f.industry.as_str()).unwrap_or("");
    let size_value = prior.map(|f| f.size.as_str()).unwrap_or("");
    let maturity_value = prior.map(|f| f.maturity.as_str()).unwrap_or("");

    let mut size_options = String::new();
    for size in OrgSize::ALL {
        let selected = if size.as_str() == size_value { " selected" } else { "" };
        size_options.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>",
            size.as_str(),
            escape(size.label())
        ));
    }

    let mut maturity_options = String::new();
    for maturity in Maturity::ALL {
        let selected = if maturity.as_str() == maturity_value { " selected" } else { "" };
        maturity_options.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>",
            maturity.as_str(),
            escape(maturity.label())
        ));
    }

    let mut goal_boxes = String::new();
    for goal in Goal::ALL {
        let checked = prior
            .map(|f| f.goals.iter().any(|g| g == goal.as_str()))
            .unwrap_or(false);
        let checked = if checked { " checked" } else { "" };
        goal_boxes.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"goals\" value=\"{}\"{checked}> {}</label>",
            goal.as_str(),
            escape(goal.label())
        ));
    }

    let body = format!(
        "<h1>Generate an AI adoption roadmap</h1>\
{banner_html}\
<form method=\"post\" action=\"/generate\">\
<input type=\"hidden\" name=\"form_token\" value=\"{}\">\
<fieldset><legend>Organization</legend>\
<label>Name <input name=\"organization\" value=\"{}\" required></label>\
<label>Size <select name=\"size\">{size_options}</select></label>\
<label>Industry <input name=\"industry\" value=\"{}\" required></label>\
<label>AI maturity <select name=\"maturity\">{maturity_options}</select></label>\
</fieldset>\
<fieldset><legend>Goals (pick at least one)</legend>{goal_boxes}</fieldset>\
<button type=\"submit\">Generate roadmap</button>\
</form>",
        escape(form_token),
        escape(organization),
        escape(industry),
    );

    page("New roadmap", &body)
}

/// A stored roadmap as a full HTML document. Phase and initiative order is
/// exactly the stored order.
pub fn roadmap_page(result: &RoadmapResult) -> String {
    let goals = result
        .goals
        .iter()
        .map(|g| escape(g.label()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sections = String::new();
    for phase in &result.phases {
        let mut items = String::new();
        for initiative in &phase.initiatives {
            items.push_str(&format!(
                "<li><strong>{}</strong> <span class=\"priority {}\">{}</span><p>{}</p></li>",
                escape(&initiative.title),
                initiative.priority.as_str(),
                initiative.priority.label(),
                escape(&initiative.description),
            ));
        }
        sections.push_str(&format!(
            "<section><h2>{} <span class=\"window\">({})</span></h2><ol>{items}</ol></section>",
            escape(&phase.label),
            escape(&phase.window),
        ));
    }

    // The chart source is opaque to the server; Mermaid renders it in the
    // browser.
    let chart_html = if result.chart.is_empty() {
        String::new()
    } else {
        format!(
            "<h2>Timeline</h2><div class=\"mermaid\">{}</div>\
<script type=\"module\">import mermaid from \"https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs\";mermaid.initialize({{startOnLoad:true}});</script>",
            escape(&result.chart)
        )
    };

    let body = format!(
        "<h1>AI roadmap for {}</h1>\
<p>{} &middot; {} &middot; {} &middot; generated {}</p>\
<p>Goals: {goals}</p>\
<p><a href=\"/roadmaps/{}/pdf\">Download as PDF</a></p>\
{sections}\
{chart_html}",
        escape(&result.organization),
        escape(result.size.label()),
        escape(&result.industry),
        escape(result.maturity.label()),
        fmt_date(result.created_at_ms),
        escape(&result.id),
    );

    page(&format!("Roadmap for {}", result.organization), &body)
}

/// The history listing, newest first (ordering is the store's contract).
pub fn list_page(rows: &[RoadmapSummary]) -> String {
    let body = if rows.is_empty() {
        "<h1>Generated roadmaps</h1><p>No roadmaps generated yet.</p>".to_string()
    } else {
        let mut table = String::from(
            "<h1>Generated roadmaps</h1><table>\
<tr><th>Organization</th><th>Industry</th><th>Size</th><th>Generated</th></tr>",
        );
        for row in rows {
            table.push_str(&format!(
                "<tr><td><a href=\"/roadmaps/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&row.id),
                escape(&row.organization),
                escape(&row.industry),
                escape(row.size.label()),
                fmt_date(row.created_at_ms),
            ));
        }
        table.push_str("</table>");
        table
    };
    page("History", &body)
}

/// A plain message page for 404s and generic failures.
pub fn message_page(title: &str, text: &str) -> String {
    let body = format!("<h1>{}</h1><p>{}</p>", escape(title), escape(text));
    page(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::model::{Initiative, Phase, Priority};

    fn staged_result() -> RoadmapResult {
        let phase = |label: &str, title: &str| Phase {
            label: label.to_string(),
            window: "w".to_string(),
            initiatives: vec![Initiative {
                title: title.to_string(),
                description: "desc".to_string(),
                priority: Priority::High,
            }],
        };
        RoadmapResult {
            id: "01AAAAAAAAAAAAAAAAAAAAAAAA".into(),
            organization: "Acme".into(),
            size: OrgSize::Medium,
            industry: "Retail".into(),
            maturity: Maturity::Piloting,
            goals: vec![Goal::Automation, Goal::Efficiency],
            phases: vec![
                phase("Short-term", "short initiative"),
                phase("Medium-term", "medium initiative"),
                phase("Long-term", "long initiative"),
            ],
            chart: "gantt\n    title AI Roadmap Timeline".into(),
            created_at_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>"a"&'b'</script>"#),
            "&lt;script&gt;&quot;a&quot;&amp;&#39;b&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn roadmap_page_preserves_initiative_order() {
        let html = roadmap_page(&staged_result());
        let short = html.find("short initiative").unwrap();
        let medium = html.find("medium initiative").unwrap();
        let long = html.find("long initiative").unwrap();
        assert!(short < medium && medium < long);
    }

    #[test]
    fn roadmap_page_embeds_the_chart_block() {
        let html = roadmap_page(&staged_result());
        assert!(html.contains("class=\"mermaid\""));
        assert!(html.contains("title AI Roadmap Timeline"));
    }

    #[test]
    fn roadmap_page_escapes_organization_input() {
        let mut result = staged_result();
        result.organization = "<Acme & Co>".into();
        let html = roadmap_page(&result);
        assert!(!html.contains("<Acme & Co>"));
        assert!(html.contains("&lt;Acme &amp; Co&gt;"));
    }

    #[test]
    fn form_page_refills_prior_input() {
        let prior = RoadmapForm {
            organization: "Acme".into(),
            size: "large".into(),
            industry: "Retail".into(),
            maturity: "scaling".into(),
            goals: vec!["automation".into()],
            form_token: String::new(),
        };
        let html = form_page("tok", None, Some(&prior));
        assert!(html.contains("value=\"Acme\""));
        assert!(html.contains("value=\"large\" selected"));
        assert!(html.contains("value=\"scaling\" selected"));
        assert!(html.contains("value=\"automation\" checked"));
    }

    #[test]
    fn form_page_reports_the_offending_field() {
        let err = ValidationError::NoGoals;
        let html = form_page("tok", Some(&FormBanner::Invalid(&err)), None);
        assert!(html.contains("data-field=\"goals\""));
        assert!(html.contains("select at least one goal"));
    }

    #[test]
    fn list_page_has_an_empty_state() {
        let html = list_page(&[]);
        assert!(html.contains("No roadmaps generated yet."));
    }
}
