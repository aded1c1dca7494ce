//! `config set` and `config show`.

use crate::{
    config::{parse_bonus_points, GcBasis, PointsSystem, PointsSystemKind, SeriesConfig},
    Result,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use super::common::CommandContext;

/// Parameters for `config set`
#[derive(Debug, Clone, Default)]
pub struct ConfigParams {
    pub name: String,
    pub description: Option<String>,
    pub races: u32,
    pub points: PointsSystemKind,
    pub custom_points: Option<String>,
    pub bonus: Option<String>,
    pub gc_basis: GcBasis,
    pub team_race: bool,
    pub top_x: Option<u32>,
    pub race_descriptions: Vec<String>,
}

/// Turn command-line values into a validated configuration
pub fn build_series_config(params: &ConfigParams) -> Result<SeriesConfig> {
    let points_system = params.points.with_points(params.custom_points.as_deref())?;
    let bonus_points = params
        .bonus
        .as_deref()
        .map(parse_bonus_points)
        .transpose()?;

    let config = SeriesConfig {
        name: params.name.trim().to_string(),
        description: params
            .description
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        num_races: params.races,
        points_system,
        bonus_points,
        gc_basis: params.gc_basis,
        team_race: params.team_race,
        top_x_riders_count: params.top_x,
        race_descriptions: params
            .race_descriptions
            .iter()
            .map(|d| d.trim().to_string())
            .collect(),
    };
    config.validate()?;
    Ok(config)
}

/// Human-readable configuration listing
pub fn render_config_text(config: &SeriesConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Series: {}", config.name);
    if !config.description.is_empty() {
        let _ = writeln!(out, "{}", config.description);
    }
    let _ = writeln!(out, "Races: {}", config.num_races);

    let points = match &config.points_system {
        PointsSystem::Custom(values) => format!(
            "custom ({})",
            values
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        other => other.label().to_string(),
    };
    let _ = writeln!(out, "Points: {}", points);
    if let Some([first, second, third]) = config.bonus_points {
        let _ = writeln!(out, "Podium bonus: {}/{}/{}", first, second, third);
    }
    let _ = writeln!(out, "{}", config.summary());

    for race in 1..=config.num_races {
        if let Some(description) = config.race_description(race) {
            let _ = writeln!(out, "  Race {}: {}", race, description);
        }
    }
    out
}

/// Handle `config set`
pub fn handle_config_set(db: Option<PathBuf>, params: ConfigParams) -> Result<()> {
    let config = build_series_config(&params)?;
    let mut ctx = CommandContext::open(db)?;
    ctx.store.save_series_config(&config)?;
    info!(name = %config.name, races = config.num_races, "series configuration saved");

    println!("✓ Series configuration saved");
    print!("{}", render_config_text(&config));
    Ok(())
}

/// Handle `config show`
pub fn handle_config_show(db: Option<PathBuf>, as_json: bool) -> Result<()> {
    let ctx = CommandContext::open(db)?;
    let config = ctx.require_config()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", render_config_text(&config));
    }
    Ok(())
}
