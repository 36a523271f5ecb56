//! Print-stable PDF export.
//!
//! The layout is computed first as an ordered line list, then drawn onto
//! fixed A4 pages with built-in Helvetica faces. No viewport, no reflow:
//! what the layout produces is what every reader sees.

use anyhow::Result;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use roadmap_core::model::RoadmapResult;

use crate::render::fmt_date;

/// Wrap width for body text, in characters.
const WRAP_CHARS: usize = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineStyle {
    Title,
    Heading,
    Body,
    Chart,
}

/// One positioned text run of the document, in draw order.
#[derive(Debug, Clone)]
pub(crate) struct Line {
    pub text: String,
    pub style: LineStyle,
}

impl Line {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Flatten a roadmap into draw-ordered lines. Phase and initiative order is
/// exactly the stored order.
pub(crate) fn layout(result: &RoadmapResult) -> Vec<Line> {
    let mut lines = vec![Line::new(
        format!("AI Adoption Roadmap: {}", result.organization),
        LineStyle::Title,
    )];

    let goals = result
        .goals
        .iter()
        .map(|g| g.label())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(Line::new(
        format!(
            "{} | {} | {}",
            result.size.label(),
            result.industry,
            result.maturity.label()
        ),
        LineStyle::Body,
    ));
    lines.push(Line::new(format!("Goals: {goals}"), LineStyle::Body));
    lines.push(Line::new(
        format!("Generated: {}", fmt_date(result.created_at_ms)),
        LineStyle::Body,
    ));

    for phase in &result.phases {
        lines.push(Line::new(
            format!("{} ({})", phase.label, phase.window),
            LineStyle::Heading,
        ));
        for (idx, initiative) in phase.initiatives.iter().enumerate() {
            lines.push(Line::new(
                format!(
                    "{}. {} [{}]",
                    idx + 1,
                    initiative.title,
                    initiative.priority.label()
                ),
                LineStyle::Body,
            ));
            for wrapped in wrap(&initiative.description, WRAP_CHARS) {
                lines.push(Line::new(format!("   {wrapped}"), LineStyle::Body));
            }
        }
    }

    if !result.chart.is_empty() {
        lines.push(Line::new("Timeline source", LineStyle::Heading));
        for chart_line in result.chart.lines() {
            lines.push(Line::new(chart_line, LineStyle::Chart));
        }
    }

    lines
}

/// Render a roadmap as a binary PDF document.
pub fn roadmap_pdf(result: &RoadmapResult) -> Result<Vec<u8>> {
    let lines = layout(result);

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("AI Adoption Roadmap: {}", result.organization),
        Mm(210.0),
        Mm(297.0),
        "page 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = 279.0;
    let mut page_count = 1;

    for line in &lines {
        let (size, height, use_bold) = match line.style {
            LineStyle::Title => (16.0, 10.0, true),
            LineStyle::Heading => (13.0, 9.0, true),
            LineStyle::Body => (10.0, 5.5, false),
            LineStyle::Chart => (9.0, 5.0, false),
        };

        if y - height < 18.0 {
            page_count += 1;
            let (page, page_layer) =
                doc.add_page(Mm(210.0), Mm(297.0), format!("page {page_count}"));
            layer = doc.get_page(page).get_layer(page_layer);
            y = 279.0;
        }
        y -= height;

        let font = if use_bold { &bold } else { &regular };
        layer.use_text(line.text.clone(), size, Mm(18.0), Mm(y), font);
    }

    Ok(doc.save_to_bytes()?)
}

/// Greedy word wrap; words longer than `max` get a line of their own.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = vec![];
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::model::{Goal, Initiative, Maturity, OrgSize, Phase, Priority};

    fn staged_result() -> RoadmapResult {
        let phase = |label: &str, title: &str| Phase {
            label: label.to_string(),
            window: "w".to_string(),
            initiatives: vec![Initiative {
                title: title.to_string(),
                description: "A description that explains the initiative.".to_string(),
                priority: Priority::Medium,
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

    fn position(lines: &[Line], needle: &str) -> usize {
        lines
            .iter()
            .position(|l| l.text.contains(needle))
            .unwrap_or_else(|| panic!("no line contains {needle:?}"))
    }

    #[test]
    fn layout_preserves_initiative_order() {
        let lines = layout(&staged_result());
        let short = position(&lines, "short initiative");
        let medium = position(&lines, "medium initiative");
        let long = position(&lines, "long initiative");
        assert!(short < medium && medium < long);
    }

    #[test]
    fn layout_appends_the_chart_source() {
        let lines = layout(&staged_result());
        let heading = position(&lines, "Timeline source");
        assert!(lines[heading + 1].text.starts_with("gantt"));
        assert_eq!(lines[heading + 1].style, LineStyle::Chart);
    }

    #[test]
    fn layout_skips_the_chart_section_when_empty() {
        let mut result = staged_result();
        result.chart.clear();
        let lines = layout(&result);
        assert!(!lines.iter().any(|l| l.text.contains("Timeline source")));
    }

    #[test]
    fn pdf_bytes_have_the_magic_header() {
        let bytes = roadmap_pdf(&staged_result()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn wrap_respects_the_width() {
        let text = "one two three four five six seven eight nine ten";
        for line in wrap(text, 12) {
            assert!(line.chars().count() <= 12, "line too long: {line:?}");
        }
        assert_eq!(wrap("", 12), Vec::<String>::new());
    }
}
