//! Entry point: set up logging, parse CLI and dispatch to command handlers.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zwift_gc::{
    cli::{AliasCmd, Commands, ConfigCmd, RaceCmd, ZwiftGc},
    commands::{
        alias::{handle_alias_add, handle_alias_list},
        clear::handle_clear,
        config::{handle_config_set, handle_config_show, ConfigParams},
        race::{
            handle_race_import, handle_race_list, handle_race_parse, RaceImportParams,
            RaceParseParams,
        },
        standings::{handle_standings, StandingsParams},
    },
    Result,
};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
fn main() -> Result<()> {
    let app = ZwiftGc::parse();
    init_tracing(app.verbose);
    let db = app.db;

    match app.command {
        Commands::Config { cmd } => match cmd {
            ConfigCmd::Set(args) => handle_config_set(
                db,
                ConfigParams {
                    name: args.name,
                    description: args.description,
                    races: args.races,
                    points: args.points,
                    custom_points: args.custom_points,
                    bonus: args.bonus,
                    gc_basis: args.gc_basis,
                    team_race: args.team_race,
                    top_x: args.top_x,
                    race_descriptions: args.race_descriptions,
                },
            )?,
            ConfigCmd::Show { json } => handle_config_show(db, json)?,
        },

        Commands::Race { cmd } => match cmd {
            RaceCmd::Parse { file, json } => handle_race_parse(
                db,
                RaceParseParams {
                    file,
                    as_json: json,
                },
            )?,
            RaceCmd::Import(args) => handle_race_import(
                db,
                RaceImportParams {
                    race: args.race,
                    file: args.file,
                    approve: args.approve,
                    approve_all: args.approve_all,
                    teams: args.teams,
                    threshold: args.threshold,
                    dry_run: args.dry_run,
                },
            )?,
            RaceCmd::List => handle_race_list(db)?,
        },

        Commands::Standings { category, json } => handle_standings(
            db,
            StandingsParams {
                category,
                as_json: json,
            },
        )?,

        Commands::Alias { cmd } => match cmd {
            AliasCmd::Add { alias, canonical } => handle_alias_add(db, &alias, &canonical)?,
            AliasCmd::List => handle_alias_list(db)?,
        },

        Commands::Clear { yes } => handle_clear(db, yes)?,
    }

    Ok(())
}
