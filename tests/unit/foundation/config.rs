use super::*;

#[test]
fn default_config_is_valid() {
    let cfg = Config::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.tracked_team.marker, "NHB");
    assert_eq!(cfg.dedicated_levels[0].prefix, "H1");
    assert_eq!(cfg.generic_templates[&3].match_day, "match_day_3");
    assert_eq!(cfg.generic_templates[&3].results, "results_3");
}

#[test]
fn partial_json_keeps_defaults_for_omitted_fields() {
    let json = r##"{
        "tracked_team": { "marker": "LVC" },
        "generic_templates": { "2": { "match_day": "md_two", "results": "res_two" } }
    }"##;
    let cfg = Config::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.tracked_team.marker, "LVC");
    assert_eq!(cfg.tracked_team.feed_name, "Nyon HandBall La Côte");
    assert_eq!(cfg.generic_templates.len(), 1);
    assert_eq!(cfg.generic_templates[&2].match_day, "md_two");
    assert_eq!(cfg.levels["H1-03"], "1ière Ligue Hommes");
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = Config::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, PostError::Config(_)));
}

#[test]
fn validate_rejects_bad_tables() {
    let mut cfg = Config::default();
    cfg.tracked_team.marker.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.months.pop();
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.generic_templates.insert(
        0,
        GenericTemplates {
            match_day: "x".to_string(),
            results: "y".to_string(),
        },
    );
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_chained_team_names() {
    let mut cfg = Config::default();
    cfg.team_names
        .insert("NHB La Côte".to_string(), "Nyon".to_string());
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("NHB La Côte"));
}

#[test]
fn missing_config_file_is_reported() {
    let err = Config::from_path("target/does/not/exist.json").unwrap_err();
    assert!(matches!(err, PostError::Config(_)));
}
