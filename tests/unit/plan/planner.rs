use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixture(time: &str, level: &str, team1: &str, team2: &str) -> Match {
    Match {
        time: time.to_string(),
        place: format!("Salle {time}"),
        level: level.to_string(),
        team1: team1.to_string(),
        team2: team2.to_string(),
    }
}

#[test]
fn post_date_uses_french_uppercase_names() {
    let cfg = Config::default();
    assert_eq!(format_post_date(date(2025, 3, 1), &cfg), "SAMEDI 1 MARS");
    assert_eq!(format_post_date(date(2025, 12, 15), &cfg), "LUNDI 15 DECEMBRE");
    assert_eq!(format_post_date(date(2026, 2, 22), &cfg), "DIMANCHE 22 FEVRIER");
}

#[test]
fn dedicated_match_produces_story_match_day_and_results() {
    let cfg = Config::default();
    let planner = Planner::new(&cfg);
    let m = Match {
        time: "14:00".to_string(),
        place: "Salle X".to_string(),
        level: "H1-03".to_string(),
        team1: "NHB La Côte".to_string(),
        team2: "LVC Handball".to_string(),
    };

    let plan = planner.plan_date(date(2025, 3, 1), &[m]).unwrap();
    assert!(plan.skipped.is_empty());

    let names: Vec<(&str, bool)> = plan
        .jobs
        .iter()
        .map(|j| (j.template.as_str(), j.rasterize))
        .collect();
    assert_eq!(
        names,
        vec![
            ("story_match_day", true),
            ("match_day_h1", true),
            ("results_h1", false),
        ]
    );

    let expected: ReplacementSet = [
        ("match1-team1", "NHB La Côte"),
        ("match1-team2", "LVC Handball"),
        ("match1-time", "14:00"),
        ("match1-place", "Salle X"),
        ("date", "SAMEDI 1 MARS"),
    ]
    .into_iter()
    .collect();
    for job in &plan.jobs {
        assert_eq!(job.replacements, expected);
    }
}

#[test]
fn dedicated_levels_do_not_need_a_level_label() {
    let mut cfg = Config::default();
    cfg.levels.clear();
    let planner = Planner::new(&cfg);
    let plan = planner
        .plan_date(
            date(2025, 3, 8),
            &[fixture("20:00", "D3-99", "Team A", "NHB La Côte")],
        )
        .unwrap();
    let names: Vec<&str> = plan.jobs.iter().map(|j| j.template.as_str()).collect();
    assert_eq!(
        names,
        vec!["story_match_day_dames", "match_day_d3", "results_d3"]
    );
}

#[test]
fn no_other_matches_means_no_generic_job() {
    let cfg = Config::default();
    let planner = Planner::new(&cfg);
    let plan = planner.plan_date(date(2025, 3, 1), &[]).unwrap();
    assert!(plan.jobs.is_empty());
    assert!(plan.skipped.is_empty());
}

#[test]
fn generic_slots_follow_time_order() {
    let cfg = Config::default();
    let planner = Planner::new(&cfg);
    let matches = [
        fixture("13:00", "M15G-P S1-06", "NHB La Côte", "HC Morges"),
        fixture("09:00", "M13G-P S1-06", "HC Morges", "NHB La Côte"),
        fixture("11:00", "H4-09", "NHB La Côte", "Lancy PLO"),
    ];

    let plan = planner.plan_date(date(2025, 3, 1), &matches).unwrap();
    assert_eq!(plan.jobs.len(), 2);
    assert_eq!(plan.jobs[0].template, "match_day_3");
    assert!(plan.jobs[0].rasterize);
    assert_eq!(plan.jobs[1].template, "results_3");
    assert!(!plan.jobs[1].rasterize);

    let rs = &plan.jobs[0].replacements;
    assert_eq!(rs.get("date"), Some("SAMEDI 1 MARS"));
    assert_eq!(rs.get("match1-time"), Some("09:00 - Salle 09:00"));
    assert_eq!(rs.get("match2-time"), Some("11:00 - Salle 11:00"));
    assert_eq!(rs.get("match3-time"), Some("13:00 - Salle 13:00"));

    // The level label goes on the tracked side.
    assert_eq!(rs.get("match1-team1"), Some("HC Morges"));
    assert_eq!(rs.get("match1-team2"), Some("NHB La Côte-M13P"));
    assert_eq!(rs.get("match2-team1"), Some("NHB La Côte-H4"));
    assert_eq!(rs.get("match2-team2"), Some("Lancy PLO"));
    assert_eq!(rs.get("match3-team1"), Some("NHB La Côte-M15P"));
    assert!(!rs.contains("match1-place"));
    assert_eq!(rs.len(), 10);
    assert_eq!(plan.jobs[0].replacements, plan.jobs[1].replacements);
}

#[test]
fn dedicated_and_generic_matches_share_a_date() {
    let cfg = Config::default();
    let planner = Planner::new(&cfg);
    let matches = [
        fixture("18:00", "H4-09", "NHB La Côte", "HC Morges"),
        fixture("20:30", "H1-03", "NHB La Côte", "LVC Handball"),
    ];
    let plan = planner.plan_date(date(2025, 3, 1), &matches).unwrap();
    let names: Vec<&str> = plan.jobs.iter().map(|j| j.template.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "story_match_day",
            "match_day_h1",
            "results_h1",
            "match_day_1",
            "results_1"
        ]
    );
    assert_eq!(
        plan.jobs[3].replacements.get("match1-team1"),
        Some("NHB La Côte-H4")
    );
}

#[test]
fn unknown_level_aborts_the_date() {
    let cfg = Config::default();
    let planner = Planner::new(&cfg);
    let matches = [
        fixture("18:00", "H1-03", "NHB La Côte", "LVC Handball"),
        fixture("10:00", "ZZ-00", "NHB La Côte", "HC Morges"),
    ];
    let err = planner.plan_date(date(2025, 3, 1), &matches).unwrap_err();
    assert!(matches!(err, PostError::UnknownLevel(ref code) if code == "ZZ-00"));
}

#[test]
fn unsupported_count_drops_only_the_generic_pair() {
    let mut cfg = Config::default();
    cfg.generic_templates.remove(&2);
    let planner = Planner::new(&cfg);
    let matches = [
        fixture("18:00", "H1-03", "NHB La Côte", "LVC Handball"),
        fixture("10:00", "H4-09", "NHB La Côte", "HC Morges"),
        fixture("12:00", "M14F-P-06", "HC Morges", "NHB La Côte"),
    ];
    let plan = planner.plan_date(date(2025, 3, 1), &matches).unwrap();
    assert_eq!(plan.jobs.len(), 3);
    assert_eq!(plan.skipped.len(), 1);
    assert!(matches!(plan.skipped[0], PostError::UnsupportedMatchCount(2)));
}

#[test]
fn five_other_matches_are_unsupported_by_default() {
    let cfg = Config::default();
    let planner = Planner::new(&cfg);
    let matches: Vec<Match> = (0..5)
        .map(|i| fixture(&format!("1{i}:00"), "H4-09", "NHB La Côte", "HC Morges"))
        .collect();
    let plan = planner.plan_date(date(2025, 3, 1), &matches).unwrap();
    assert!(plan.jobs.is_empty());
    assert!(matches!(plan.skipped[0], PostError::UnsupportedMatchCount(5)));
}
