use crate::analysis::breakdown::{PairScore, Relation};
use crate::analysis::positions::Assignment;
use crate::analysis::score::ScoreRecord;
use crate::analysis::synergy::{FullDraft, Suggestions, TeamBreakdown};
use crate::catalog::{Attribute, HeroCatalog, HeroId, Role};
use colored::*;
use std::collections::BTreeMap;
use tabled::{settings::Style, Table, Tabled};

/// Rows shown from the in-pool bucket.
pub const POOL_SUGGESTION_LIMIT: usize = 3;
/// Rows shown from the out-of-pool bucket.
pub const GLOBAL_SUGGESTION_LIMIT: usize = 10;

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    synergy: String,
    counter: String,
    total: String,
    bonuses: String,
}

#[derive(Tabled)]
struct TeamRow {
    pick: String,
    hero: String,
    synergy: String,
    counter: String,
    total: String,
}

#[derive(Tabled)]
struct PairRow {
    hero: String,
    relation: String,
    value: String,
}

#[derive(Tabled)]
struct PositionRow {
    hero: String,
    position: String,
}

#[derive(Tabled)]
struct HeroRow {
    id: String,
    hero: String,
    roles: String,
    aliases: String,
}

fn signed(value: f64) -> String {
    let text = format!("{:+.2}", value);
    if value > 0.0 {
        text.green().to_string()
    } else if value < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

fn suggestion_rows(records: &[ScoreRecord], limit: usize) -> Vec<SuggestionRow> {
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, rec)| SuggestionRow {
            rank: format!("#{}", idx + 1),
            hero: rec.name.clone(),
            synergy: signed(rec.synergy_score),
            counter: signed(rec.counter_score),
            total: format!("{:.2}", rec.total_score).bold().to_string(),
            bonuses: rec
                .bonuses
                .iter()
                .map(|b| format!("{} (+{:.2})", b.label, b.amount))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

pub fn display_suggestions(
    suggestions: &Suggestions,
    role_filter: Option<Role>,
    pool_limit: usize,
    global_limit: usize,
) {
    let heading = match role_filter {
        Some(role) => format!("🎯 Suggested Picks ({})", role),
        None => "🎯 Suggested Picks".to_string(),
    };
    println!("\n{}", heading.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if suggestions.is_empty() {
        println!("{}", "No heroes left that match this draft".yellow());
        return;
    }

    if !suggestions.needs.is_empty() {
        let missing: Vec<&str> = suggestions.needs.iter().map(|n| n.label()).collect();
        println!("{} {}\n", "⚠️ Draft needs:".yellow().bold(), missing.join(" · "));
    }

    if !suggestions.in_pool.is_empty() {
        println!("{}", "From Your Hero Pool".bold().magenta());
        let mut table = Table::new(suggestion_rows(&suggestions.in_pool, pool_limit));
        table.with(Style::rounded());
        println!("{}\n", table);
    }

    let mut table = Table::new(suggestion_rows(&suggestions.out_pool, global_limit));
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Synergy: Sum of pairing values with your picks, plus draft-need bonuses");
    println!("• Counter: Sum of matchup values against the enemy picks");
    println!("• Total: Synergy + Counter (higher = better pick)\n");
}

fn team_table(team: &TeamBreakdown) -> Table {
    let rows: Vec<TeamRow> = team
        .heroes
        .iter()
        .enumerate()
        .map(|(idx, rec)| TeamRow {
            pick: format!("{}", idx + 1),
            hero: rec.name.clone(),
            synergy: signed(rec.synergy_score),
            counter: signed(rec.counter_score),
            total: format!("{:.2}", rec.total_score),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

pub fn display_full_draft(draft: &FullDraft) {
    let win = draft.win_probability();

    println!("\n{}", "⚔️ FULL DRAFT BREAKDOWN".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    println!(
        "{} total {:.1}",
        "Your Team".bold().green(),
        draft.ally.display_total()
    );
    println!("{}\n", team_table(&draft.ally));

    println!(
        "{} total {:.1}",
        "Enemy Team".bold().red(),
        draft.enemy.display_total()
    );
    println!("{}\n", team_table(&draft.enemy));

    println!("{}", "Predicted Win Rate".bold().yellow());
    println!(
        "  {} {:.2}%   {} {:.2}%",
        "Your Team:".green(),
        win.ally,
        "Enemy Team:".red(),
        win.enemy
    );
    println!("  {}\n", "Capped at 20–80%: matchup data alone never decides a game".dimmed());
}

pub fn display_pool(records: &[ScoreRecord]) {
    println!("\n{}", "💜 YOUR HERO POOL".bold().magenta());
    println!("{}\n", "=".repeat(60).magenta());

    if records.is_empty() {
        println!("{}", "No pool heroes available in this draft".yellow());
        return;
    }

    let mut table = Table::new(suggestion_rows(records, records.len()));
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_pair_breakdown(hero_name: &str, pairs: &[PairScore]) {
    println!("\n{}", format!("Synergy breakdown: {}", hero_name).bold());

    let rows: Vec<PairRow> = pairs
        .iter()
        .map(|pair| PairRow {
            hero: pair.name.clone(),
            relation: match pair.relation {
                Relation::Teammate => "with".green().to_string(),
                Relation::Opponent => "vs".red().to_string(),
            },
            value: signed(pair.value),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_positions(assignments: &BTreeMap<HeroId, Assignment>, catalog: &HeroCatalog) {
    if assignments.is_empty() {
        return;
    }

    println!("\n{}", "🗺️ PREDICTED ENEMY POSITIONS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<PositionRow> = assignments
        .iter()
        .map(|(id, assignment)| PositionRow {
            hero: catalog
                .get(*id)
                .map(|h| h.name.clone())
                .unwrap_or_else(|| format!("#{}", id)),
            position: match assignment {
                Assignment::Assigned(_) => assignment.to_string(),
                Assignment::Unassigned => assignment.to_string().yellow().to_string(),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_heroes(catalog: &HeroCatalog, query: &str) {
    for attribute in Attribute::ALL {
        let rows: Vec<HeroRow> = catalog
            .group(attribute)
            .iter()
            .filter(|hero| hero.matches_query(query))
            .map(|hero| HeroRow {
                id: hero.id.to_string(),
                hero: hero.name.clone(),
                roles: hero
                    .roles
                    .iter()
                    .map(Role::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                aliases: hero.aliases.join(", "),
            })
            .collect();

        if rows.is_empty() {
            continue;
        }

        println!("\n{}", attribute.label().bold().cyan());
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
