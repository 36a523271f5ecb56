use serde::Deserialize;
use thiserror::Error;

use crate::model::{GenerationRequest, Goal, Maturity, OrgSize};

/// Raw submission as it arrives from the HTML form.
///
/// Everything is a string (or a list of strings) at this point; `validate`
/// turns it into a [`GenerationRequest`] or rejects it with a field-level
/// reason.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoadmapForm {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub maturity: String,
    /// Repeated `goals` keys from the checkbox group.
    #[serde(default)]
    pub goals: Vec<String>,
    /// Signed anti-forgery token issued with the form page.
    #[serde(default)]
    pub form_token: String,
}

/// Field-level validation failure, reported inline on the form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("organization name must not be empty")]
    EmptyOrganization,
    #[error("industry must not be empty")]
    EmptyIndustry,
    #[error("unknown organization size: {0:?}")]
    UnknownSize(String),
    #[error("unknown AI maturity level: {0:?}")]
    UnknownMaturity(String),
    #[error("select at least one goal")]
    NoGoals,
    #[error("unknown goal: {0:?}")]
    UnknownGoal(String),
    #[error("the form token is missing or expired; please resubmit")]
    BadFormToken,
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyOrganization => "organization",
            Self::EmptyIndustry => "industry",
            Self::UnknownSize(_) => "size",
            Self::UnknownMaturity(_) => "maturity",
            Self::NoGoals | Self::UnknownGoal(_) => "goals",
            Self::BadFormToken => "form_token",
        }
    }
}

/// Validate a raw form into a [`GenerationRequest`].
///
/// Checks fields in display order and reports the first violation. The
/// anti-forgery token is the HTTP layer's concern and is not checked here.
pub fn validate(form: &RoadmapForm) -> Result<GenerationRequest, ValidationError> {
    let organization = form.organization.trim();
    if organization.is_empty() {
        return Err(ValidationError::EmptyOrganization);
    }

    let size = OrgSize::parse(&form.size)
        .ok_or_else(|| ValidationError::UnknownSize(form.size.clone()))?;

    let industry = form.industry.trim();
    if industry.is_empty() {
        return Err(ValidationError::EmptyIndustry);
    }

    let maturity = Maturity::parse(&form.maturity)
        .ok_or_else(|| ValidationError::UnknownMaturity(form.maturity.clone()))?;

    if form.goals.is_empty() {
        return Err(ValidationError::NoGoals);
    }
    let mut goals = Vec::with_capacity(form.goals.len());
    for raw in &form.goals {
        let goal = Goal::parse(raw).ok_or_else(|| ValidationError::UnknownGoal(raw.clone()))?;
        if !goals.contains(&goal) {
            goals.push(goal);
        }
    }

    Ok(GenerationRequest {
        organization: organization.to_string(),
        size,
        industry: industry.to_string(),
        maturity,
        goals,
    })
}
