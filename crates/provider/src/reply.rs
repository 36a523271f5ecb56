//! Decoding and validation of the structured provider reply.

use serde::Deserialize;

use roadmap_core::model::{Initiative, Phase, Priority, PHASE_COUNT};

use crate::error::GenerationError;
use crate::prompt::PHASE_PLAN;

#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    phases: Vec<RawPhase>,
    #[serde(default)]
    chart: String,
}

#[derive(Debug, Deserialize)]
struct RawPhase {
    #[serde(default)]
    label: String,
    #[serde(default)]
    window: String,
    #[serde(default)]
    initiatives: Vec<RawInitiative>,
}

#[derive(Debug, Deserialize)]
struct RawInitiative {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: String,
}

/// Decode a provider reply into typed phases plus the chart text.
///
/// Enforces the roadmap invariants: exactly three phases, at least one
/// initiative per phase, non-empty initiative titles, priorities within the
/// enumeration. Any violation is a [`GenerationError::MalformedResponse`];
/// nothing partial escapes.
pub fn parse_reply(content: &str) -> Result<(Vec<Phase>, String), GenerationError> {
    let body = strip_fence(content);
    let raw: RawReply = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("reply is not valid JSON: {e}")))?;

    if raw.phases.len() != PHASE_COUNT {
        return Err(GenerationError::MalformedResponse(format!(
            "expected {PHASE_COUNT} phases, got {}",
            raw.phases.len()
        )));
    }

    let mut phases = Vec::with_capacity(PHASE_COUNT);
    for (idx, phase) in raw.phases.into_iter().enumerate() {
        if phase.initiatives.is_empty() {
            return Err(GenerationError::MalformedResponse(format!(
                "phase {} has no initiatives",
                idx + 1
            )));
        }

        let mut initiatives = Vec::with_capacity(phase.initiatives.len());
        for initiative in phase.initiatives {
            let title = initiative.title.trim();
            if title.is_empty() {
                return Err(GenerationError::MalformedResponse(format!(
                    "phase {} contains an initiative without a title",
                    idx + 1
                )));
            }
            let priority = Priority::parse(&initiative.priority).ok_or_else(|| {
                GenerationError::MalformedResponse(format!(
                    "unknown priority {:?} in phase {}",
                    initiative.priority,
                    idx + 1
                ))
            })?;
            initiatives.push(Initiative {
                title: title.to_string(),
                description: initiative.description.trim().to_string(),
                priority,
            });
        }

        // Replies occasionally drop the label or window; fall back to the
        // fixed plan rather than rejecting the whole roadmap.
        let (plan_label, plan_window) = PHASE_PLAN[idx];
        let label = non_empty_or(phase.label, plan_label);
        let window = non_empty_or(phase.window, plan_window);

        phases.push(Phase {
            label,
            window,
            initiatives,
        });
    }

    Ok((phases, raw.chart.trim().to_string()))
}

fn non_empty_or(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Strip a markdown code fence if the model wrapped its JSON in one.
fn strip_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline, then the
    // closing fence.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_json(phase_count: usize) -> String {
        let phase = |n: usize| {
            format!(
                r#"{{"label":"Phase {n}","window":"{n} months","initiatives":[
                    {{"title":"Initiative {n}","description":"Do the thing.","priority":"high"}}
                ]}}"#
            )
        };
        let phases = (1..=phase_count).map(phase).collect::<Vec<_>>().join(",");
        format!(r#"{{"phases":[{phases}],"chart":"gantt\n    title AI Roadmap Timeline"}}"#)
    }

    #[test]
    fn parses_a_three_phase_reply() {
        let (phases, chart) = parse_reply(&reply_json(3)).unwrap();
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].label, "Phase 1");
        assert_eq!(phases[2].initiatives[0].title, "Initiative 3");
        assert_eq!(phases[0].initiatives[0].priority, Priority::High);
        assert!(chart.starts_with("gantt"));
    }

    #[test]
    fn rejects_two_phases() {
        let err = parse_reply(&reply_json(2)).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
        assert!(err.to_string().contains("expected 3 phases"));
    }

    #[test]
    fn rejects_four_phases() {
        let err = parse_reply(&reply_json(4)).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_empty_phase() {
        let json = r#"{"phases":[
            {"label":"a","window":"w","initiatives":[{"title":"t","description":"","priority":"low"}]},
            {"label":"b","window":"w","initiatives":[]},
            {"label":"c","window":"w","initiatives":[{"title":"t","description":"","priority":"low"}]}
        ],"chart":""}"#;
        let err = parse_reply(json).unwrap_err();
        assert!(err.to_string().contains("phase 2 has no initiatives"));
    }

    #[test]
    fn rejects_untitled_initiative() {
        let json = r#"{"phases":[
            {"label":"a","window":"w","initiatives":[{"title":"  ","description":"","priority":"low"}]},
            {"label":"b","window":"w","initiatives":[{"title":"t","description":"","priority":"low"}]},
            {"label":"c","window":"w","initiatives":[{"title":"t","description":"","priority":"low"}]}
        ],"chart":""}"#;
        let err = parse_reply(json).unwrap_err();
        assert!(err.to_string().contains("without a title"));
    }

    #[test]
    fn rejects_unknown_priority() {
        let json = r#"{"phases":[
            {"label":"a","window":"w","initiatives":[{"title":"t","description":"","priority":"urgent"}]},
            {"label":"b","window":"w","initiatives":[{"title":"t","description":"","priority":"low"}]},
            {"label":"c","window":"w","initiatives":[{"title":"t","description":"","priority":"low"}]}
        ],"chart":""}"#;
        let err = parse_reply(json).unwrap_err();
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn accepts_capitalized_priorities() {
        let json = r#"{"phases":[
            {"label":"a","window":"w","initiatives":[{"title":"t","description":"","priority":"High"}]},
            {"label":"b","window":"w","initiatives":[{"title":"t","description":"","priority":"MEDIUM"}]},
            {"label":"c","window":"w","initiatives":[{"title":"t","description":"","priority":"Low"}]}
        ],"chart":""}"#;
        let (phases, _) = parse_reply(json).unwrap();
        assert_eq!(phases[0].initiatives[0].priority, Priority::High);
        assert_eq!(phases[1].initiatives[0].priority, Priority::Medium);
    }

    #[test]
    fn accepts_a_fenced_reply() {
        let fenced = format!("```json\n{}\n```", reply_json(3));
        let (phases, _) = parse_reply(&fenced).unwrap();
        assert_eq!(phases.len(), 3);
    }

    #[test]
    fn fills_missing_labels_from_the_phase_plan() {
        let json = r#"{"phases":[
            {"initiatives":[{"title":"t","description":"","priority":"low"}]},
            {"initiatives":[{"title":"t","description":"","priority":"low"}]},
            {"initiatives":[{"title":"t","description":"","priority":"low"}]}
        ],"chart":""}"#;
        let (phases, _) = parse_reply(json).unwrap();
        assert_eq!(phases[0].label, "Short-term");
        assert_eq!(phases[1].window, "6-12 months");
        assert_eq!(phases[2].label, "Long-term");
    }

    #[test]
    fn rejects_non_json_garbage() {
        let err = parse_reply("here is your roadmap!").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }
}
