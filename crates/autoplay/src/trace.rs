use crate::{AutoplayError, WeightVector};
use fireside_core::PlayerId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    Decided,
    Draw,
    TurnLimit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    pub game: u32,
    pub seed: u64,
    pub status: MatchStatus,
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub actions: [usize; 2],
    pub updates: [usize; 2],
    pub mulligans: [usize; 2],
    pub final_health: [i32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesReport {
    pub policies: [String; 2],
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Share of games won by the first player.
    pub win_rate: f64,
    pub matches: Vec<MatchRecord>,
    #[serde(default)]
    pub weights: Option<WeightVector>,
}

impl SeriesReport {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("players: {} vs {}", self.policies[0], self.policies[1]),
            format!(
                "games: {} wins: {} losses: {} draws: {}",
                self.games, self.wins, self.losses, self.draws
            ),
            format!("win rate: {:.3}", self.win_rate),
            String::new(),
            "matches:".to_string(),
        ];
        if self.matches.is_empty() {
            lines.push("  (none)".to_string());
        }
        for record in &self.matches {
            lines.push(format!(
                "  game {:>4} | {:<10} | turns {:>3} | health {:>3} / {:>3} | actions {} / {}",
                record.game,
                match_label(record),
                record.turns,
                record.final_health[0],
                record.final_health[1],
                record.actions[0],
                record.actions[1]
            ));
        }
        if let Some(weights) = self.weights.as_ref() {
            lines.push(String::new());
            lines.push("weights:".to_string());
            for (key, value) in weights.iter() {
                lines.push(format!("  {key:<24} {value:>10.4}"));
            }
        }
        lines.join("\n")
    }
}

fn match_label(record: &MatchRecord) -> String {
    match (record.status, record.winner) {
        (MatchStatus::Decided, Some(winner)) => format!("P{} wins", winner + 1),
        (MatchStatus::TurnLimit, _) => "turn limit".to_string(),
        _ => "draw".to_string(),
    }
}

fn ensure_parent(path: &Path) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn write_json(path: &Path, report: &SeriesReport) -> Result<(), AutoplayError> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, report: &SeriesReport) -> Result<(), AutoplayError> {
    ensure_parent(path)?;
    fs::write(path, report.to_text_report())?;
    Ok(())
}

pub fn save_weights(path: &Path, weights: &WeightVector) -> Result<(), AutoplayError> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(weights)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn load_weights(path: &Path) -> Result<WeightVector, AutoplayError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
