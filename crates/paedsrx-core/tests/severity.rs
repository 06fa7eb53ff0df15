use paedsrx_core::{ErrorKind, Severity};

#[test]
fn canonical_levels_parse() {
    assert_eq!("mild".parse::<Severity>().unwrap(), Severity::Mild);
    assert_eq!("Moderate".parse::<Severity>().unwrap(), Severity::Moderate);
    assert_eq!(" SEVERE ".parse::<Severity>().unwrap(), Severity::Severe);
}

#[test]
fn legacy_levels_map_to_severe() {
    for raw in ["critical", "life-threatening", "Life Threatening", "life_threatening"] {
        assert_eq!(raw.parse::<Severity>().unwrap(), Severity::Severe, "{raw}");
    }
}

#[test]
fn unknown_level_is_invalid_severity() {
    let err = "extreme".parse::<Severity>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSeverity);
    assert!(err.is_recoverable());
}

#[test]
fn default_is_moderate() {
    assert_eq!(Severity::default(), Severity::Moderate);
}

#[test]
fn serde_uses_lowercase_and_accepts_aliases() {
    assert_eq!(serde_json::to_string(&Severity::Severe).unwrap(), "\"severe\"");
    let parsed: Severity = serde_json::from_str("\"critical\"").unwrap();
    assert_eq!(parsed, Severity::Severe);
}

#[test]
fn ordering_follows_acuity() {
    assert!(Severity::Mild < Severity::Moderate);
    assert!(Severity::Moderate < Severity::Severe);
}
