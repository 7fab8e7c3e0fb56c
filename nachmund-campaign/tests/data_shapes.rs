use nachmund_campaign::{
    Alliance, GameRecord, Location, Phase, Scale, Tag, Victor, Violation, validate_game,
};

#[test]
fn record_fields_follow_the_campaign_schema() {
    let yaml = r"
date: 2024-06-01
phase: 2
scale: strike_force
mission: Data Recovery
players: [Alice, Bob]
alliances: [despoilers, marauders]
victor: DRAW
sap_gain: {despoilers: 2}
bp_allocation: {despoilers: battery, marauders: spaceport}
sap_allocation: {despoilers: tower}
";
    let record: GameRecord = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(record.date, "2024-06-01");
    assert_eq!(record.phase, Phase::TWO);
    assert_eq!(record.scale.known(), Some(Scale::StrikeForce));
    assert_eq!(record.victor.known(), Some(Victor::Draw));
    assert_eq!(
        record.bp_allocation.get(&Tag::Known(Alliance::Marauders)),
        Some(&Tag::Known(Location::Spaceport))
    );
    assert_eq!(record.sap_gain.get(&Tag::Known(Alliance::Despoilers)), Some(&2));
    assert!(validate_game(&record).is_none());
}

#[test]
fn missing_fields_surface_as_violations() {
    let record: GameRecord = serde_yaml::from_str("mission: Empty Table").unwrap();
    let error = validate_game(&record).expect("empty record is invalid");
    let violations = error.violations();
    assert_eq!(
        violations[0],
        Violation::InvalidScale { raw: String::new() }
    );
    assert!(violations.contains(&Violation::PlayerCount));
    assert!(violations.contains(&Violation::AllianceCount));
    assert!(violations.contains(&Violation::MissingVictor));
    assert!(violations.contains(&Violation::BpAllocationCount));
}

#[test]
fn misspelled_keywords_are_kept_verbatim() {
    let yaml = r"
phase: 1
scale: onslaugth
players: [Alice, Bob]
alliances: [guardians, despoilers]
victor: guardians
bp_allocation: {guardians: towers, despoilers: bastion}
";
    let record: GameRecord = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(record.scale.as_str(), "onslaugth");
    let error = validate_game(&record).unwrap();
    let messages: Vec<String> = error.violations().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "incorrect scale \"onslaugth\"",
            "invalid location for bp_allocation for alliance guardians: \"towers\"",
        ]
    );
}

#[test]
fn negative_sap_is_a_decode_failure() {
    let yaml = "sap_gain: {guardians: -1}";
    assert!(serde_yaml::from_str::<GameRecord>(yaml).is_err());
}

#[test]
fn records_serialize_with_canonical_keywords() {
    let record = GameRecord {
        scale: Scale::Incursion.into(),
        victor: Victor::Draw.into(),
        alliances: vec![Alliance::Guardians.into()],
        ..GameRecord::default()
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["scale"], "incursion");
    assert_eq!(json["victor"], "DRAW");
    assert_eq!(json["alliances"][0], "guardians");
    assert_eq!(json["phase"], 0);
}
