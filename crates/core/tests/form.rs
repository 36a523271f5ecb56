use roadmap_core::form::{validate, RoadmapForm, ValidationError};
use roadmap_core::model::{Goal, Maturity, OrgSize};

fn filled_form() -> RoadmapForm {
    RoadmapForm {
        organization: "Acme".into(),
        size: "medium".into(),
        industry: "Retail".into(),
        maturity: "piloting".into(),
        goals: vec!["automation".into(), "efficiency".into()],
        form_token: String::new(),
    }
}

#[test]
fn accepts_complete_form() {
    let req = validate(&filled_form()).unwrap();
    assert_eq!(req.organization, "Acme");
    assert_eq!(req.size, OrgSize::Medium);
    assert_eq!(req.industry, "Retail");
    assert_eq!(req.maturity, Maturity::Piloting);
    assert_eq!(req.goals, vec![Goal::Automation, Goal::Efficiency]);
}

#[test]
fn trims_free_text_fields() {
    let mut form = filled_form();
    form.organization = "  Acme  ".into();
    form.industry = " Retail ".into();
    let req = validate(&form).unwrap();
    assert_eq!(req.organization, "Acme");
    assert_eq!(req.industry, "Retail");
}

#[test]
fn rejects_empty_organization() {
    let mut form = filled_form();
    form.organization = "   ".into();
    let err = validate(&form).unwrap_err();
    assert_eq!(err, ValidationError::EmptyOrganization);
    assert_eq!(err.field(), "organization");
}

#[test]
fn rejects_empty_industry() {
    let mut form = filled_form();
    form.industry = String::new();
    assert_eq!(validate(&form).unwrap_err(), ValidationError::EmptyIndustry);
}

#[test]
fn rejects_unknown_size() {
    let mut form = filled_form();
    form.size = "gigantic".into();
    assert_eq!(
        validate(&form).unwrap_err(),
        ValidationError::UnknownSize("gigantic".into())
    );
}

#[test]
fn rejects_unknown_maturity() {
    let mut form = filled_form();
    form.maturity = "wizard".into();
    assert_eq!(
        validate(&form).unwrap_err(),
        ValidationError::UnknownMaturity("wizard".into())
    );
}

#[test]
fn rejects_zero_goals() {
    let mut form = filled_form();
    form.goals.clear();
    let err = validate(&form).unwrap_err();
    assert_eq!(err, ValidationError::NoGoals);
    assert_eq!(err.field(), "goals");
}

#[test]
fn rejects_unknown_goal() {
    let mut form = filled_form();
    form.goals.push("world_domination".into());
    assert_eq!(
        validate(&form).unwrap_err(),
        ValidationError::UnknownGoal("world_domination".into())
    );
}

#[test]
fn deduplicates_goals_preserving_order() {
    let mut form = filled_form();
    form.goals = vec![
        "efficiency".into(),
        "automation".into(),
        "efficiency".into(),
    ];
    let req = validate(&form).unwrap();
    assert_eq!(req.goals, vec![Goal::Efficiency, Goal::Automation]);
}
