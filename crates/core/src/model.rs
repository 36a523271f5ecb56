use serde::{Deserialize, Serialize};

/// Number of phases in every roadmap.
pub const PHASE_COUNT: usize = 3;

/// Organization size band collected on the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrgSize {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl OrgSize {
    /// All bands, in form display order.
    pub const ALL: [OrgSize; 4] = [
        OrgSize::Small,
        OrgSize::Medium,
        OrgSize::Large,
        OrgSize::Enterprise,
    ];

    /// Parse a wire value (snake_case, as submitted by the form).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small (1-50)",
            Self::Medium => "Medium (51-500)",
            Self::Large => "Large (501-5000)",
            Self::Enterprise => "Enterprise (5000+)",
        }
    }
}

/// Current AI maturity level of the organization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Maturity {
    None,
    Exploring,
    Piloting,
    Scaling,
}

impl Maturity {
    /// All levels, in form display order.
    pub const ALL: [Maturity; 4] = [
        Maturity::None,
        Maturity::Exploring,
        Maturity::Piloting,
        Maturity::Scaling,
    ];

    /// Parse a wire value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "none" => Some(Self::None),
            "exploring" => Some(Self::Exploring),
            "piloting" => Some(Self::Piloting),
            "scaling" => Some(Self::Scaling),
            _ => None,
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Exploring => "exploring",
            Self::Piloting => "piloting",
            Self::Scaling => "scaling",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No AI usage yet",
            Self::Exploring => "Exploring",
            Self::Piloting => "Piloting",
            Self::Scaling => "Scaling",
        }
    }
}

/// Adoption goal tags selectable on the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Automation,
    Efficiency,
    CustomerExperience,
    DataInsights,
    CostReduction,
    Innovation,
}

impl Goal {
    /// All goals, in form display order.
    pub const ALL: [Goal; 6] = [
        Goal::Automation,
        Goal::Efficiency,
        Goal::CustomerExperience,
        Goal::DataInsights,
        Goal::CostReduction,
        Goal::Innovation,
    ];

    /// Parse a wire value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "automation" => Some(Self::Automation),
            "efficiency" => Some(Self::Efficiency),
            "customer_experience" => Some(Self::CustomerExperience),
            "data_insights" => Some(Self::DataInsights),
            "cost_reduction" => Some(Self::CostReduction),
            "innovation" => Some(Self::Innovation),
            _ => None,
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automation => "automation",
            Self::Efficiency => "efficiency",
            Self::CustomerExperience => "customer_experience",
            Self::DataInsights => "data_insights",
            Self::CostReduction => "cost_reduction",
            Self::Innovation => "innovation",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Automation => "Process automation",
            Self::Efficiency => "Operational efficiency",
            Self::CustomerExperience => "Customer experience",
            Self::DataInsights => "Data insights",
            Self::CostReduction => "Cost reduction",
            Self::Innovation => "Product innovation",
        }
    }
}

/// Priority assigned to a roadmap initiative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a provider value. Case-insensitive; replies are not always
    /// disciplined about casing.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("high") {
            Some(Self::High)
        } else if s.eq_ignore_ascii_case("medium") {
            Some(Self::Medium)
        } else if s.eq_ignore_ascii_case("low") {
            Some(Self::Low)
        } else {
            None
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Validated intake describing the organization a roadmap is generated for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// Organization name, non-empty.
    pub organization: String,
    pub size: OrgSize,
    /// Free-text industry, non-empty.
    pub industry: String,
    pub maturity: Maturity,
    /// At least one goal; submission order preserved, duplicates removed.
    pub goals: Vec<Goal>,
}

/// A single actionable item within a phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Initiative {
    /// Non-empty title.
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// One of the three roadmap phases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Phase label, e.g. "Short-term".
    pub label: String,
    /// Time-window description, e.g. "0-6 months".
    pub window: String,
    /// Ordered initiatives; never empty.
    pub initiatives: Vec<Initiative>,
}

/// Persisted outcome of one successful generation.
///
/// Immutable once saved; the id is assigned exactly once at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapResult {
    /// ULID string assigned at creation.
    pub id: String,
    pub organization: String,
    pub size: OrgSize,
    pub industry: String,
    pub maturity: Maturity,
    pub goals: Vec<Goal>,
    /// Exactly [`PHASE_COUNT`] phases, each non-empty, in plan order.
    pub phases: Vec<Phase>,
    /// Opaque Mermaid gantt source rendered client-side; never parsed here.
    pub chart: String,
    pub created_at_ms: i64,
}

/// Listing row for the history page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapSummary {
    pub id: String,
    pub organization: String,
    pub industry: String,
    pub size: OrgSize,
    pub created_at_ms: i64,
}
