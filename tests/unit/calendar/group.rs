use super::*;
use crate::foundation::{config::Config, error::PostError};

fn event(title: &str, day: u32, hh: u32) -> CalendarEvent {
    CalendarEvent {
        title: title.to_string(),
        start: NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hh, 0, 0)
            .unwrap(),
        location: "Salle".to_string(),
    }
}

#[test]
fn groups_by_date_in_feed_order_and_filters_other_teams() {
    let cfg = Config::default();
    let n = Normalizer::new(&cfg);
    let tracked = cfg.tracked_team.feed_name.as_str();

    let events = vec![
        event("H4-09 - HC Morges - Nyon HandBall La Côte", 1, 16),
        event("H1-03 - HC Morges - LVC Handball", 1, 12),
        event("H1-03 - Nyon HandBall La Côte - LVC Handball", 1, 14),
        event("D3-08 - Nyon HandBall La Côte - HC Morges", 8, 10),
        event("D3-08 - nyon handball la côte - HC Morges", 8, 11),
    ];

    let grouped = group_by_date(&events, tracked, &n);
    assert_eq!(grouped.len(), 2);

    let first = &grouped[&NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()];
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].time, "16:00");
    assert_eq!(first[0].level, "H4-09");
    assert_eq!(first[1].time, "14:00");
    assert_eq!(first[1].team1, "NHB La Côte");

    let second = &grouped[&NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()];
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].level, "D3-08");
}

#[test]
fn dates_iterate_in_ascending_order() {
    let cfg = Config::default();
    let n = Normalizer::new(&cfg);
    let events = vec![
        event("H1-03 - Nyon HandBall La Côte - A", 20, 14),
        event("H1-03 - Nyon HandBall La Côte - B", 2, 14),
    ];
    let grouped = group_by_date(&events, &cfg.tracked_team.feed_name, &n);
    let days: Vec<u32> = grouped.keys().map(chrono::Datelike::day).collect();
    assert_eq!(days, vec![2, 20]);
}

#[test]
fn feed_errors_propagate() {
    let cfg = Config::default();
    let n = Normalizer::new(&cfg);
    let err = group_feed("garbage", &cfg.tracked_team.feed_name, &n).unwrap_err();
    assert!(matches!(err, PostError::CalendarParse(_)));
}
