//! Directive construction for the completion API.

use roadmap_core::model::GenerationRequest;

/// Fixed phase plan: label plus time window, in roadmap order.
pub const PHASE_PLAN: [(&str, &str); 3] = [
    ("Short-term", "0-6 months"),
    ("Medium-term", "6-12 months"),
    ("Long-term", "12-24 months"),
];

/// System directive pinning the three-phase shape and the JSON reply format.
pub const SYSTEM_PROMPT: &str = r#"You are an enterprise AI transformation consultant. Based on the user's inputs, produce an AI implementation roadmap with exactly three phases:
Phase 1: Short-term (0-6 months)
Phase 2: Medium-term (6-12 months)
Phase 3: Long-term (12-24 months)

Each phase contains one or more initiatives. Every initiative has a name, a description, and a priority of "high", "medium" or "low".

Also produce a Mermaid.js gantt chart describing the timeline. Use this shape:

gantt
    title AI Roadmap Timeline
    dateFormat  YYYY-MM-DD
    section Short-term
    <Initiative 1> :done, des1, 2025-01-01, 90d
    section Medium-term
    <Initiative 2> :active, des2, 2025-04-01, 120d
    section Long-term
    <Initiative 3> :des3, 2025-08-01, 180d

The chart must reflect the initiatives you described, with realistic names and durations.

Reply with a single JSON object and nothing else, in exactly this shape:

{
  "phases": [
    {
      "label": "Short-term",
      "window": "0-6 months",
      "initiatives": [
        {"title": "...", "description": "...", "priority": "high"}
      ]
    },
    {"label": "Medium-term", "window": "6-12 months", "initiatives": [...]},
    {"label": "Long-term", "window": "12-24 months", "initiatives": [...]}
  ],
  "chart": "gantt\n    title AI Roadmap Timeline\n..."
}"#;

/// User message carrying the organization intake.
pub fn user_prompt(request: &GenerationRequest) -> String {
    let goals = request
        .goals
        .iter()
        .map(|g| g.label())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Generate an AI implementation roadmap for the following organization:\n\
         \n\
         - Organization: {}\n\
         - Organization size: {}\n\
         - Industry: {}\n\
         - Current AI maturity level: {}\n\
         - Key goals: {}\n\
         \n\
         Tailor every initiative to this organization's context and goals.",
        request.organization,
        request.size.label(),
        request.industry,
        request.maturity.label(),
        goals,
    )
}
