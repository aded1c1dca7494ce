//! Unit tests for identity reconciliation

use super::*;
use crate::config::PointsSystem;

fn entry(category: Category, name: &str, team: Option<&str>) -> RaceEntry {
    RaceEntry {
        category,
        name: name.to_string(),
        time: "10:00".to_string(),
        gap: String::new(),
        total_seconds: 600.0,
        position: 1,
        points: 50,
        team: team.map(str::to_string),
    }
}

fn config(team_race: bool) -> SeriesConfig {
    let mut config = SeriesConfig::new("Winter Series", 4, PointsSystem::Fixed100);
    config.team_race = team_race;
    config
}

fn history() -> Vec<Option<Race>> {
    vec![
        Some(vec![
            entry(Category::A, "John Smith", Some("Vortex")),
            entry(Category::A, "Maria Lopez", None),
            entry(Category::B, "Peter Olsen", Some("Grit")),
        ]),
        None,
    ]
}

#[cfg(test)]
mod matching_tests {
    use super::*;

    #[test]
    fn test_known_riders_keep_first_seen() {
        let races = vec![
            Some(vec![entry(Category::A, "John Smith", None)]),
            Some(vec![entry(Category::B, "JOHN SMITH [ZWB]", None)]),
        ];
        let known = KnownRiders::from_races(&races);
        assert_eq!(known.len(), 1);
        let (rider, score) = known.best_match("jon smith", 0.5).unwrap();
        assert_eq!(rider.name, "John Smith");
        assert_eq!(rider.category, Category::A);
        assert!((score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_suggestion_for_near_match() {
        let known = KnownRiders::from_races(&history());
        let entries = vec![
            entry(Category::A, "Jon Smith", None),
            entry(Category::A, "Completely Different", None),
        ];
        let suggestions = suggest_matches(&entries, &known, DEFAULT_MATCH_THRESHOLD);

        assert_eq!(suggestions.len(), 1);
        let s = &suggestions[0];
        assert_eq!(s.original_name, "Jon Smith");
        assert_eq!(s.suggested_name, "John Smith");
        assert_eq!(s.entry_index, 0);
        assert_eq!(s.category, Category::A);
        assert_eq!(s.score_percent(), 90);
    }

    #[test]
    fn test_exact_match_is_not_a_suggestion() {
        let known = KnownRiders::from_races(&history());
        let entries = vec![entry(Category::A, "john smith (aged 30)", None)];
        assert!(suggest_matches(&entries, &known, 0.1).is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let known = KnownRiders::from_races(&history());
        let entries = vec![entry(Category::A, "Jon Smith", None)];
        assert!(suggest_matches(&entries, &known, 0.9).is_empty());
        assert_eq!(suggest_matches(&entries, &known, 0.89).len(), 1);
    }

    #[test]
    fn test_no_history_no_suggestions() {
        let known = KnownRiders::from_races(&[]);
        assert!(known.is_empty());
        let entries = vec![entry(Category::A, "Jon Smith", None)];
        assert!(suggest_matches(&entries, &known, DEFAULT_MATCH_THRESHOLD).is_empty());
    }

    #[test]
    fn test_team_history_uses_last_team() {
        let races = vec![
            Some(vec![entry(Category::A, "John Smith", Some("Vortex"))]),
            Some(vec![entry(Category::A, "John Smith", Some("Apex"))]),
            Some(vec![entry(Category::A, "John Smith", Some("  "))]),
        ];
        let teams = TeamHistory::from_races(&races);
        assert_eq!(teams.team_for("john smith", Category::A), Some("Apex"));
        assert_eq!(teams.team_for("John Smith", Category::B), None);
        assert_eq!(teams.known_teams(), vec!["Apex".to_string()]);
    }

    #[test]
    fn test_known_teams_sorted_unique() {
        let teams = TeamHistory::from_races(&[Some(vec![
            entry(Category::A, "Rider Zulu", Some("Zeta")),
            entry(Category::A, "Rider Alpha", Some("Alpha")),
            entry(Category::B, "Rider Beta", Some("Zeta")),
        ])]);
        assert_eq!(teams.known_teams(), vec!["Alpha", "Zeta"]);
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_out_of_range() {
        let err = ImportSession::new(&config(false), RaceNumber::new(1), vec![], &[], 0.82)
            .unwrap_err();
        assert!(matches!(err, GcError::ParseEmpty));

        let entries = vec![entry(Category::A, "John Smith", None)];
        let err = ImportSession::new(&config(false), RaceNumber::new(5), entries, &[], 0.82)
            .unwrap_err();
        assert!(matches!(
            err,
            GcError::InvalidRaceNumber {
                race: 5,
                num_races: 4
            }
        ));
    }

    #[test]
    fn test_rejects_threshold_outside_unit_range() {
        for threshold in [-0.1, 1.0, 1.5, f64::NAN] {
            let entries = vec![entry(Category::A, "Jon Smith", None)];
            let err = ImportSession::new(
                &config(false),
                RaceNumber::new(2),
                entries,
                &history(),
                threshold,
            )
            .unwrap_err();
            assert!(
                matches!(err, GcError::InvalidConfig { .. }),
                "threshold {} gave {:?}",
                threshold,
                err
            );
        }

        let entries = vec![entry(Category::A, "Jon Smith", None)];
        assert!(
            ImportSession::new(&config(false), RaceNumber::new(2), entries, &history(), 0.0)
                .is_ok()
        );
    }

    #[test]
    fn test_unapproved_suggestions_change_nothing() {
        let entries = vec![entry(Category::A, "Jon Smith", None)];
        let session = ImportSession::new(
            &config(false),
            RaceNumber::new(2),
            entries,
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();
        assert_eq!(session.suggestions().len(), 1);
        assert!(!session.is_approved(0));

        let committed = session.commit().unwrap();
        assert_eq!(committed.race, RaceNumber::new(2));
        assert_eq!(committed.entries[0].name, "Jon Smith");
        assert_eq!(committed.renamed, 0);
    }

    #[test]
    fn test_approved_suggestion_renames() {
        let entries = vec![
            entry(Category::A, "Jon Smith", None),
            entry(Category::A, "Maria Lopes", None),
        ];
        let mut session = ImportSession::new(
            &config(false),
            RaceNumber::new(2),
            entries,
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();
        assert_eq!(session.suggestions().len(), 2);
        session.approve(1).unwrap();
        assert!(matches!(
            session.approve(7),
            Err(GcError::UnknownSuggestion { index: 7 })
        ));

        let committed = session.commit().unwrap();
        assert_eq!(committed.entries[0].name, "Jon Smith");
        assert_eq!(committed.entries[1].name, "Maria Lopez");
        assert_eq!(committed.renamed, 1);
    }

    #[test]
    fn test_approve_all() {
        let entries = vec![
            entry(Category::A, "Jon Smith", None),
            entry(Category::A, "Maria Lopes", None),
        ];
        let mut session = ImportSession::new(
            &config(false),
            RaceNumber::new(2),
            entries,
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();
        session.approve_all();
        let committed = session.commit().unwrap();
        assert_eq!(committed.renamed, 2);
    }

    #[test]
    fn test_individual_series_needs_no_teams() {
        let entries = vec![entry(Category::C, "New Rider Name", None)];
        let session =
            ImportSession::new(&config(false), RaceNumber::new(1), entries, &[], 0.82).unwrap();
        assert!(session.missing_teams().is_empty());
        assert!(session.commit().is_ok());
    }

    #[test]
    fn test_team_mode_prefills_and_locks() {
        let entries = vec![
            entry(Category::A, "John Smith", None),
            entry(Category::A, "Brand New Rider", None),
        ];
        let mut session = ImportSession::new(
            &config(true),
            RaceNumber::new(2),
            entries,
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();

        assert_eq!(session.entries()[0].team.as_deref(), Some("Vortex"));
        assert_eq!(session.locked_team(0), Some("Vortex"));
        assert_eq!(session.locked_team(1), None);
        assert_eq!(session.missing_teams(), vec!["Brand New Rider".to_string()]);

        let err = session.set_team(0, "Apex").unwrap_err();
        assert!(matches!(err, GcError::TeamLocked { .. }));
        assert!(session.set_team(0, "vortex").is_ok());
        assert!(matches!(
            session.set_team(9, "Apex"),
            Err(GcError::UnknownEntry { index: 9 })
        ));
    }

    #[test]
    fn test_team_mode_blocks_commit_until_filled() {
        let entries = vec![
            entry(Category::A, "John Smith", None),
            entry(Category::A, "Brand New Rider", None),
        ];
        let session = ImportSession::new(
            &config(true),
            RaceNumber::new(2),
            entries.clone(),
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();
        match session.commit() {
            Err(GcError::IncompleteTeamAssignment { riders }) => {
                assert_eq!(riders, vec!["Brand New Rider".to_string()]);
            }
            other => panic!("Expected IncompleteTeamAssignment, got {:?}", other),
        }

        let mut session = ImportSession::new(
            &config(true),
            RaceNumber::new(2),
            entries,
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();
        assert_eq!(session.set_team_by_name("brand new rider", " Apex ").unwrap(), 1);
        assert!(matches!(
            session.set_team_by_name("Nobody Here", "Apex"),
            Err(GcError::UnknownRider { .. })
        ));

        let committed = session.commit().unwrap();
        assert_eq!(committed.entries[1].team.as_deref(), Some("Apex"));
        assert_eq!(committed.entries[0].team.as_deref(), Some("Vortex"));
    }

    #[test]
    fn test_blank_team_clears() {
        let entries = vec![entry(Category::A, "Brand New Rider", Some("Apex"))];
        let mut session =
            ImportSession::new(&config(true), RaceNumber::new(1), entries, &[], 0.82).unwrap();
        session.set_team(0, "   ").unwrap();
        assert_eq!(session.missing_teams().len(), 1);
    }

    #[test]
    fn test_renamed_rider_inherits_locked_team() {
        let entries = vec![entry(Category::A, "Jon Smith", None)];
        let mut session = ImportSession::new(
            &config(true),
            RaceNumber::new(2),
            entries,
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();
        assert_eq!(session.missing_teams(), vec!["Jon Smith".to_string()]);
        session.approve(0).unwrap();

        let committed = session.commit().unwrap();
        assert_eq!(committed.entries[0].name, "John Smith");
        assert_eq!(committed.entries[0].team.as_deref(), Some("Vortex"));
    }

    #[test]
    fn test_later_race_team_not_locked() {
        let races = vec![
            Some(vec![entry(Category::A, "John Smith", Some("Vortex"))]),
            None,
            Some(vec![
                entry(Category::A, "Anna Berg", Some("Apex")),
                entry(Category::A, "John Smith", Some("Grit")),
            ]),
        ];
        let entries = vec![
            entry(Category::A, "Anna Berg", None),
            entry(Category::A, "John Smith", None),
        ];
        let session = ImportSession::new(
            &config(true),
            RaceNumber::new(2),
            entries,
            &races,
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();

        assert_eq!(session.locked_team(0), None);
        assert_eq!(session.entries()[0].team, None);
        assert_eq!(session.locked_team(1), Some("Vortex"));
        assert_eq!(session.entries()[1].team.as_deref(), Some("Vortex"));
        assert_eq!(session.missing_teams(), vec!["Anna Berg".to_string()]);
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn test_known_teams_offered() {
        let entries = vec![entry(Category::A, "Brand New Rider", None)];
        let session = ImportSession::new(
            &config(true),
            RaceNumber::new(2),
            entries,
            &history(),
            DEFAULT_MATCH_THRESHOLD,
        )
        .unwrap();
        assert_eq!(session.known_teams(), vec!["Grit", "Vortex"]);
    }
}
