use anyhow::{bail, Context};
use fireside_core::{Content, ContentPack, DeckList, GameConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const DECKS_DIR: &str = "decks";
const GAME_CONFIG_FILE: &str = "game.json";

pub fn load_content_pack(path: &Path) -> anyhow::Result<ContentPack> {
    load_json(path)
}

/// Loads and validates a card pack: ids must be unique and every referenced
/// card must exist.
pub fn load_content(path: &Path) -> anyhow::Result<Content> {
    let pack = load_content_pack(path)?;
    let content =
        Content::from_pack(pack).with_context(|| format!("validate {}", path.display()))?;
    Ok(content)
}

pub fn save_content_pack(path: &Path, pack: &ContentPack) -> anyhow::Result<()> {
    save_json(path, pack)
}

pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    load_json(path)
}

/// Reads `game.json` from an assets directory, falling back to defaults
/// when the file is absent.
pub fn load_game_config_or_default(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(GAME_CONFIG_FILE);
    if path.exists() {
        load_game_config(&path)
    } else {
        Ok(GameConfig::default())
    }
}

/// Loads a decklist and checks it against the catalog and deck rules.
pub fn load_deck(path: &Path, content: &Content, config: &GameConfig) -> anyhow::Result<DeckList> {
    let deck: DeckList = load_json(path)?;
    if deck.cards.is_empty() {
        bail!("deck {} in {} has no cards", deck.name, path.display());
    }
    deck.validate(content, config)
        .with_context(|| format!("validate deck {}", path.display()))?;
    Ok(deck)
}

/// Every `*.json` decklist under `dir/decks`, sorted by file name.
pub fn load_decks(
    dir: &Path,
    content: &Content,
    config: &GameConfig,
) -> anyhow::Result<Vec<DeckList>> {
    let decks_dir = dir.join(DECKS_DIR);
    let mut paths: Vec<PathBuf> = fs::read_dir(&decks_dir)
        .with_context(|| format!("read {}", decks_dir.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    paths.sort();
    paths
        .iter()
        .map(|path| load_deck(path, content, config))
        .collect()
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
