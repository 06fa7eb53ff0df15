use paedsrx_extract::sections::capture;

#[test]
fn heading_with_colon_and_inline_text() {
    let sections = capture("Assessment: Moderate croup\nPlan: Oral dexamethasone");
    assert_eq!(sections.assessment.as_deref(), Some("Moderate croup"));
    assert_eq!(sections.plan.as_deref(), Some("Oral dexamethasone"));
}

#[test]
fn heading_alone_on_its_line() {
    let sections = capture("Impression\nViral croup\n\nManagement\nDischarge home");
    assert_eq!(sections.assessment.as_deref(), Some("Viral croup"));
    assert_eq!(sections.plan.as_deref(), Some("Discharge home"));
}

#[test]
fn capture_stops_at_blank_line() {
    let sections = capture("History:\nTwo days of cough\nWorse at night\n\nUnrelated text");
    assert_eq!(
        sections.history.as_deref(),
        Some("Two days of cough\nWorse at night")
    );
}

#[test]
fn capture_stops_at_next_heading() {
    let sections = capture("CC: barky cough\nExamination: stridor at rest");
    assert_eq!(sections.presenting_complaint.as_deref(), Some("barky cough"));
    assert_eq!(sections.examination.as_deref(), Some("stridor at rest"));
}

#[test]
fn heading_word_mid_sentence_is_not_a_heading() {
    let sections = capture("The plan is to review tomorrow.");
    assert!(sections.plan.is_none());
}

#[test]
fn empty_section_is_absent() {
    let sections = capture("Assessment:\nPlan: observe");
    assert!(sections.assessment.is_none());
    assert_eq!(sections.plan.as_deref(), Some("observe"));
}

#[test]
fn physical_examination_variant() {
    let sections = capture("Physical examination:\nMild subcostal recession");
    assert_eq!(
        sections.examination.as_deref(),
        Some("Mild subcostal recession")
    );
}

#[test]
fn heading_without_colon_before_inline_text() {
    let sections = capture("Assessment moderate croup\nPlan oral dexamethasone");
    assert_eq!(sections.assessment.as_deref(), Some("moderate croup"));
    assert_eq!(sections.plan.as_deref(), Some("oral dexamethasone"));
}

#[test]
fn longer_history_heading_is_not_split() {
    let sections = capture("History of present illness: two days of cough");
    assert_eq!(sections.history.as_deref(), Some("two days of cough"));
}

#[test]
fn heading_followed_by_blank_line_is_absent() {
    let sections = capture("Assessment:\n\nUnrelated paragraph");
    assert!(sections.assessment.is_none());

    let sections = capture("Impression\n   \nViral croup");
    assert!(sections.assessment.is_none());
}
