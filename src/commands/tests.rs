//! Tests for command handlers

use super::*;
use crate::cli::types::{category::Category, race::RaceNumber, team::TeamAssignment};
use crate::config::{GcBasis, PointsSystemKind};
use crate::error::GcError;
use crate::gc::CategoryStandings;
use crate::reconcile::DEFAULT_MATCH_THRESHOLD;
use super::common::CommandContext;
use super::config::{build_series_config, render_config_text, ConfigParams};
use super::race::{import_race, render_import_outcome, render_preview, render_race_list, RaceImportParams};
use super::standings::{load_standings, render_standings_text};

const RACE_ONE: &str = "A
John Smith
30:00
250w
3.4w/kg
88rpm
Maria Lopez
30:00 +0:12
240w
3.3w/kg
90rpm
B
Peter Olsen
35:00
200w
2.9w/kg
85rpm
";

const RACE_TWO: &str = "A
Maria Lopez
29:50
250w
3.4w/kg
88rpm
Jon Smith
29:50 +5
240w
3.3w/kg
90rpm
";

fn config_params(races: u32) -> ConfigParams {
    ConfigParams {
        name: "Winter Crit Series".to_string(),
        races,
        ..ConfigParams::default()
    }
}

fn context_with_series(params: &ConfigParams) -> CommandContext {
    let mut ctx = CommandContext::from_store(SeriesStore::new_in_memory().unwrap());
    let config = build_series_config(params).unwrap();
    ctx.store.save_series_config(&config).unwrap();
    ctx
}

fn import_params(race: Option<u32>) -> RaceImportParams {
    RaceImportParams {
        race: race.map(RaceNumber::new),
        file: PathBuf::from("-"),
        approve: Vec::new(),
        approve_all: false,
        teams: Vec::new(),
        threshold: DEFAULT_MATCH_THRESHOLD,
        dry_run: false,
    }
}

#[cfg(test)]
mod db_path_tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/series-test.db");
        assert_eq!(resolve_db_path(Some(path.clone())).unwrap(), path);
    }

    #[test]
    fn test_path_from_env() {
        std::env::set_var(DB_PATH_ENV_VAR, "/tmp/from-env.db");
        let resolved = resolve_db_path(None);
        std::env::remove_var(DB_PATH_ENV_VAR);
        assert_eq!(resolved.unwrap(), PathBuf::from("/tmp/from-env.db"));
    }
}

#[cfg(test)]
mod config_command_tests {
    use super::*;

    #[test]
    fn test_build_full_config() {
        let params = ConfigParams {
            description: Some("  Tuesday nights ".to_string()),
            points: PointsSystemKind::Custom,
            custom_points: Some("30,20,10".to_string()),
            bonus: Some("5,3,1".to_string()),
            team_race: true,
            top_x: Some(3),
            race_descriptions: vec!["Flat".to_string(), "Hilly ".to_string()],
            ..config_params(4)
        };
        let config = build_series_config(&params).unwrap();
        assert_eq!(config.description, "Tuesday nights");
        assert_eq!(config.bonus_points, Some([5, 3, 1]));
        assert_eq!(config.race_description(2), Some("Hilly"));

        let text = render_config_text(&config);
        assert!(text.contains("Series: Winter Crit Series"));
        assert!(text.contains("Points: custom (30, 20, 10)"));
        assert!(text.contains("Podium bonus: 5/3/1"));
        assert!(text.contains("Top 3 riders/team"));
        assert!(text.contains("Race 1: Flat"));
    }

    #[test]
    fn test_build_rejects_invalid() {
        let bad_bonus = ConfigParams {
            bonus: Some("5,3".to_string()),
            ..config_params(4)
        };
        assert!(matches!(
            build_series_config(&bad_bonus),
            Err(GcError::InvalidConfig { .. })
        ));

        let team_time = ConfigParams {
            team_race: true,
            gc_basis: GcBasis::Time,
            ..config_params(4)
        };
        assert!(matches!(
            build_series_config(&team_time),
            Err(GcError::InvalidConfig { .. })
        ));

        assert!(build_series_config(&config_params(0)).is_err());
        assert!(build_series_config(&config_params(21)).is_err());
    }

    #[test]
    fn test_missing_config_reported() {
        let ctx = CommandContext::from_store(SeriesStore::new_in_memory().unwrap());
        assert!(matches!(
            ctx.require_config(),
            Err(GcError::NoSeriesConfigured)
        ));
    }
}

#[cfg(test)]
mod race_command_tests {
    use super::*;
    use crate::parse::parse_results;

    #[test]
    fn test_preview_shows_bonus() {
        let mut config = build_series_config(&config_params(3)).unwrap();
        let entries = parse_results(RACE_ONE);

        let plain = render_preview(&entries, Some(&config));
        assert!(plain.contains("Category A"));
        assert!(plain.contains("John Smith"));
        assert!(plain.contains("50 pts"));
        assert!(!plain.contains("bonus"));

        config.bonus_points = Some([10, 5, 3]);
        let with_bonus = render_preview(&entries, Some(&config));
        assert!(with_bonus.contains("50 pts (+10 bonus)"));
        assert!(with_bonus.contains("45 pts (+5 bonus)"));
        assert!(with_bonus.contains("3 rider(s) parsed"));
    }

    #[test]
    fn test_import_defaults_to_next_race() {
        let mut ctx = context_with_series(&config_params(3));
        let first = import_race(&mut ctx, RACE_ONE, &import_params(None)).unwrap();
        assert_eq!(first.race, RaceNumber::new(1));
        assert!(first.saved);
        assert_eq!(first.entries.len(), 3);

        let second = import_race(&mut ctx, RACE_TWO, &import_params(None)).unwrap();
        assert_eq!(second.race, RaceNumber::new(2));

        let races = ctx.store.load_all_races().unwrap();
        assert_eq!(races.len(), 2);
        let listing = render_race_list(&ctx.require_config().unwrap(), &races);
        assert!(listing.contains("Race  1: saved, 3 rider(s)"));
        assert!(listing.contains("Race  3: not entered"));
        assert!(listing.contains("Next race: 3"));
    }

    #[test]
    fn test_import_needs_approval_to_rename() {
        let mut ctx = context_with_series(&config_params(3));
        import_race(&mut ctx, RACE_ONE, &import_params(Some(1))).unwrap();

        let unapproved = import_race(&mut ctx, RACE_TWO, &import_params(Some(2))).unwrap();
        assert_eq!(unapproved.suggestions.len(), 1);
        assert_eq!(unapproved.suggestions[0].suggested_name, "John Smith");
        assert_eq!(unapproved.renamed, 0);
        assert!(unapproved.entries.iter().any(|e| e.name == "Jon Smith"));

        let params = RaceImportParams {
            approve: vec![0],
            ..import_params(Some(2))
        };
        let approved = import_race(&mut ctx, RACE_TWO, &params).unwrap();
        assert_eq!(approved.renamed, 1);
        let text = render_import_outcome(&approved);
        assert!(text.contains("[x]  0: Jon Smith -> John Smith (90%, category A)"));
        assert!(text.contains("✓ Race 2 saved: 2 rider(s), 1 renamed"));

        let races = ctx.store.load_all_races().unwrap();
        assert!(races[1]
            .as_ref()
            .unwrap()
            .iter()
            .any(|e| e.name == "John Smith"));
    }

    #[test]
    fn test_unknown_approval_index_saves_nothing() {
        let mut ctx = context_with_series(&config_params(3));
        import_race(&mut ctx, RACE_ONE, &import_params(Some(1))).unwrap();
        let params = RaceImportParams {
            approve: vec![4],
            ..import_params(Some(2))
        };
        assert!(matches!(
            import_race(&mut ctx, RACE_TWO, &params),
            Err(GcError::UnknownSuggestion { index: 4 })
        ));
        assert_eq!(ctx.store.load_all_races().unwrap().len(), 1);
    }

    #[test]
    fn test_threshold_out_of_range_saves_nothing() {
        let mut ctx = context_with_series(&config_params(3));
        let params = RaceImportParams {
            threshold: -0.5,
            ..import_params(Some(1))
        };
        assert!(matches!(
            import_race(&mut ctx, RACE_ONE, &params),
            Err(GcError::InvalidConfig { .. })
        ));
        assert!(ctx.store.load_all_races().unwrap().is_empty());
    }

    #[test]
    fn test_dry_run_saves_nothing() {
        let mut ctx = context_with_series(&config_params(3));
        let params = RaceImportParams {
            dry_run: true,
            ..import_params(Some(1))
        };
        let outcome = import_race(&mut ctx, RACE_ONE, &params).unwrap();
        assert!(!outcome.saved);
        assert!(render_import_outcome(&outcome).contains("Dry run: race 1 would save 3 rider(s)"));
        assert!(ctx.store.load_all_races().unwrap().is_empty());
    }

    #[test]
    fn test_empty_paste_rejected() {
        let mut ctx = context_with_series(&config_params(3));
        assert!(matches!(
            import_race(&mut ctx, "nothing to see", &import_params(Some(1))),
            Err(GcError::ParseEmpty)
        ));
    }

    #[test]
    fn test_race_outside_series_rejected() {
        let mut ctx = context_with_series(&config_params(3));
        assert!(matches!(
            import_race(&mut ctx, RACE_ONE, &import_params(Some(4))),
            Err(GcError::InvalidRaceNumber { race: 4, num_races: 3 })
        ));
    }

    #[test]
    fn test_team_import_requires_teams() {
        let params = ConfigParams {
            team_race: true,
            ..config_params(3)
        };
        let mut ctx = context_with_series(&params);

        match import_race(&mut ctx, RACE_ONE, &import_params(Some(1))) {
            Err(GcError::IncompleteTeamAssignment { riders }) => assert_eq!(riders.len(), 3),
            other => panic!("Expected IncompleteTeamAssignment, got {:?}", other),
        }
        assert!(ctx.store.load_all_races().unwrap().is_empty());

        let with_teams = RaceImportParams {
            teams: vec![
                "John Smith=Vortex".parse::<TeamAssignment>().unwrap(),
                "Maria Lopez=Vortex".parse().unwrap(),
                "Peter Olsen=Grit".parse().unwrap(),
            ],
            ..import_params(Some(1))
        };
        assert!(import_race(&mut ctx, RACE_ONE, &with_teams).unwrap().saved);

        // Teams from race 1 are sticky, so only the approved rename is needed
        let second = RaceImportParams {
            approve_all: true,
            ..import_params(Some(2))
        };
        let outcome = import_race(&mut ctx, RACE_TWO, &second).unwrap();
        assert!(outcome
            .entries
            .iter()
            .all(|e| e.team.as_deref() == Some("Vortex")));
    }
}

#[cfg(test)]
mod standings_command_tests {
    use super::*;

    #[test]
    fn test_standings_after_two_races() {
        let mut ctx = context_with_series(&config_params(2));
        import_race(&mut ctx, RACE_ONE, &import_params(Some(1))).unwrap();
        let approve = RaceImportParams {
            approve_all: true,
            ..import_params(Some(2))
        };
        import_race(&mut ctx, RACE_TWO, &approve).unwrap();

        let (config, standings) = load_standings(&ctx, None).unwrap();
        match standings.get(&Category::A) {
            Some(CategoryStandings::Individual { ranked, .. }) => {
                assert_eq!(ranked.len(), 2);
                assert_eq!(ranked[0].total_points, 199);
                assert_eq!(ranked[1].total_points, 199);
            }
            other => panic!("Expected individual standings, got {:?}", other),
        }

        let text = render_standings_text(&config, &standings);
        assert!(text.contains("Winter Crit Series"));
        assert!(text.contains("Category A"));
        assert!(text.contains("Category B"));
        assert!(text.contains("199 pts"));
    }

    #[test]
    fn test_category_filter_and_aliases() {
        let mut ctx = context_with_series(&config_params(2));
        import_race(&mut ctx, RACE_ONE, &import_params(Some(1))).unwrap();
        import_race(&mut ctx, RACE_TWO, &import_params(Some(2))).unwrap();
        ctx.store.save_rider_alias("Jon Smith", "John Smith").unwrap();

        let (_, standings) = load_standings(&ctx, Some(Category::A)).unwrap();
        assert_eq!(standings.len(), 1);
        match standings.get(&Category::A) {
            Some(CategoryStandings::Individual { ranked, .. }) => {
                let john = ranked.iter().find(|r| r.name == "John Smith").unwrap();
                assert_eq!(john.races_completed, 2);
            }
            other => panic!("Expected individual standings, got {:?}", other),
        }
    }

    #[test]
    fn test_time_standings_text() {
        let params = ConfigParams {
            gc_basis: GcBasis::Time,
            ..config_params(2)
        };
        let mut ctx = context_with_series(&params);
        import_race(&mut ctx, RACE_ONE, &import_params(Some(1))).unwrap();

        let (config, standings) = load_standings(&ctx, None).unwrap();
        let text = render_standings_text(&config, &standings);
        assert!(text.contains("Total Time"));
        assert!(text.contains("Incomplete (not ranked):"));
        assert!(text.contains("30:00"));
    }

    #[test]
    fn test_empty_standings_text() {
        let ctx = context_with_series(&config_params(2));
        let (config, standings) = load_standings(&ctx, None).unwrap();
        assert!(render_standings_text(&config, &standings).contains("No results yet"));
    }
}
