use anyhow::Context;
use fireside_autoplay::{
    load_weights, run_series, save_weights, write_json, write_text, ArenaConfig, FaceFirstPolicy,
    GreedyPolicy, LearningConfig, LookaheadPolicy, MatchSetup, RandomPolicy, SearchConfig,
    SeriesReport, TurnPolicy, WeightVector, ATTACK_ADVANTAGE, BIAS, BOARD_ADVANTAGE,
    BOARD_MANA_ADVANTAGE, HAND_ADVANTAGE, HERO_HEALTH_ADVANTAGE, MANA_SPENT_ADVANTAGE,
};
use fireside_core::{builtin_deck, random_draft, CardClass, Content, DeckList, GameConfig, RngState};
use fireside_data::{load_content, load_deck, load_game_config_or_default};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyKind {
    Greedy,
    Lookahead,
    Face,
    Random,
}

impl PolicyKind {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "greedy" => Some(Self::Greedy),
            "lookahead" | "search" => Some(Self::Lookahead),
            "face" => Some(Self::Face),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    fn learns(self) -> bool {
        matches!(self, Self::Greedy | Self::Lookahead)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DeckSource {
    Builtin(CardClass),
    Draft(CardClass),
    File(PathBuf),
}

impl DeckSource {
    /// `mage`, `draft:mage` or a path to a decklist file.
    fn parse(value: &str) -> Self {
        if let Some(class) = value.strip_prefix("draft:").and_then(parse_class) {
            return Self::Draft(class);
        }
        match parse_class(value) {
            Some(class) => Self::Builtin(class),
            None => Self::File(PathBuf::from(value)),
        }
    }
}

fn parse_class(value: &str) -> Option<CardClass> {
    match value.to_ascii_lowercase().as_str() {
        "druid" => Some(CardClass::Druid),
        "mage" => Some(CardClass::Mage),
        "warlock" => Some(CardClass::Warlock),
        "warrior" => Some(CardClass::Warrior),
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    help: bool,
    games: u32,
    seed: u64,
    players: [PolicyKind; 2],
    epsilon: f64,
    alpha: f64,
    depth: u32,
    beam_width: usize,
    chain_cap: Option<usize>,
    max_turns: u32,
    weights: Option<PathBuf>,
    save_weights: Option<PathBuf>,
    assets: PathBuf,
    cards: Option<PathBuf>,
    decks: [DeckSource; 2],
    report: Option<PathBuf>,
    text: bool,
    log_level: String,
}

impl Default for CliOptions {
    fn default() -> Self {
        let arena = ArenaConfig::default();
        let search = SearchConfig::default();
        let learning = LearningConfig::default();
        Self {
            help: false,
            games: arena.games,
            seed: arena.seed,
            players: [PolicyKind::Lookahead, PolicyKind::Random],
            epsilon: learning.epsilon,
            alpha: learning.alpha,
            depth: search.depth,
            beam_width: search.beam_width,
            chain_cap: Some(200),
            max_turns: arena.max_turns,
            weights: None,
            save_weights: None,
            assets: PathBuf::from(DEFAULT_ASSETS_DIR),
            cards: None,
            decks: [
                DeckSource::Builtin(CardClass::Warlock),
                DeckSource::Builtin(CardClass::Warrior),
            ],
            report: None,
            text: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn flag_value<'a>(args: &'a [String], idx: usize, flag: &str) -> Result<&'a str, String> {
    args.get(idx + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("{flag}: invalid number {value:?}"))
}

fn parse_policy(value: &str, flag: &str) -> Result<PolicyKind, String> {
    PolicyKind::parse(value).ok_or_else(|| {
        format!("{flag}: unknown player {value:?} (greedy, lookahead, face, random)")
    })
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        let mut takes_value = true;
        match flag {
            "--help" | "-h" => {
                options.help = true;
                takes_value = false;
            }
            "--text" => {
                options.text = true;
                takes_value = false;
            }
            "--games" | "-n" => options.games = parse_number(flag_value(args, idx, flag)?, flag)?,
            "--seed" => options.seed = parse_number(flag_value(args, idx, flag)?, flag)?,
            "--p1" => options.players[0] = parse_policy(flag_value(args, idx, flag)?, flag)?,
            "--p2" => options.players[1] = parse_policy(flag_value(args, idx, flag)?, flag)?,
            "--epsilon" => options.epsilon = parse_number(flag_value(args, idx, flag)?, flag)?,
            "--alpha" => options.alpha = parse_number(flag_value(args, idx, flag)?, flag)?,
            "--depth" => options.depth = parse_number(flag_value(args, idx, flag)?, flag)?,
            "--beam" => options.beam_width = parse_number(flag_value(args, idx, flag)?, flag)?,
            "--chain-cap" => {
                let cap: usize = parse_number(flag_value(args, idx, flag)?, flag)?;
                options.chain_cap = (cap > 0).then_some(cap);
            }
            "--max-turns" => options.max_turns = parse_number(flag_value(args, idx, flag)?, flag)?,
            "--weights" => options.weights = Some(PathBuf::from(flag_value(args, idx, flag)?)),
            "--save-weights" => {
                options.save_weights = Some(PathBuf::from(flag_value(args, idx, flag)?))
            }
            "--assets" => options.assets = PathBuf::from(flag_value(args, idx, flag)?),
            "--cards" => options.cards = Some(PathBuf::from(flag_value(args, idx, flag)?)),
            "--deck1" => options.decks[0] = DeckSource::parse(flag_value(args, idx, flag)?),
            "--deck2" => options.decks[1] = DeckSource::parse(flag_value(args, idx, flag)?),
            "--report" => options.report = Some(PathBuf::from(flag_value(args, idx, flag)?)),
            "--log" => options.log_level = flag_value(args, idx, flag)?.to_string(),
            other => return Err(format!("unknown argument {other:?}")),
        }
        idx += if takes_value { 2 } else { 1 };
    }
    if !(0.0..=1.0).contains(&options.epsilon) {
        return Err(format!("--epsilon must be within 0..=1, got {}", options.epsilon));
    }
    if options.beam_width == 0 {
        return Err("--beam must be at least 1".to_string());
    }
    Ok(options)
}

fn print_help() {
    println!("fireside: play series of automated card game matches");
    println!();
    println!("usage: fireside [flags]");
    println!("  --games N           matches to play (default 100)");
    println!("  --seed S            series seed");
    println!("  --p1/--p2 KIND      greedy | lookahead | face | random");
    println!("  --epsilon E         exploration rate for learning players");
    println!("  --alpha A           learning rate (0 disables learning)");
    println!("  --depth D           lookahead depth in turns");
    println!("  --beam W            chains kept per search node");
    println!("  --chain-cap C       max chains per turn expansion (0 = unbounded)");
    println!("  --max-turns T       turn limit before a match is a draw");
    println!("  --weights PATH      initial weights for learning players");
    println!("  --save-weights PATH write player one's weights after the series");
    println!("  --assets DIR        directory holding game.json (default assets)");
    println!("  --cards PATH        card pack JSON instead of the built-in catalog");
    println!("  --deck1/--deck2 D   class name, draft:CLASS or decklist path");
    println!("  --report PATH       write the series report (JSON, or text with --text)");
    println!("  --text              print or write the report as text");
    println!("  --log LEVEL         log filter when RUST_LOG is unset (default info)");
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Hand-tuned starting point for learning players with no weight file.
fn starter_weights() -> WeightVector {
    [
        (HERO_HEALTH_ADVANTAGE, 1.0),
        (HAND_ADVANTAGE, 0.5),
        (ATTACK_ADVANTAGE, 0.75),
        (BOARD_ADVANTAGE, 1.0),
        (MANA_SPENT_ADVANTAGE, 0.25),
        (BOARD_MANA_ADVANTAGE, 0.5),
        (BIAS, 0.0),
    ]
    .into_iter()
    .collect()
}

fn build_policy(
    kind: PolicyKind,
    options: &CliOptions,
    weights: &WeightVector,
    seed: u64,
) -> Box<dyn TurnPolicy> {
    let learning = LearningConfig {
        alpha: options.alpha,
        epsilon: options.epsilon,
        ..LearningConfig::default()
    };
    match kind {
        PolicyKind::Greedy => Box::new(GreedyPolicy::new(weights.clone(), learning, seed)),
        PolicyKind::Lookahead => {
            let search = SearchConfig {
                depth: options.depth,
                beam_width: options.beam_width,
                max_chains: options.chain_cap,
            };
            Box::new(LookaheadPolicy::new(weights.clone(), search, learning))
        }
        PolicyKind::Face => Box::new(FaceFirstPolicy::new(seed)),
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
    }
}

fn resolve_deck(
    source: &DeckSource,
    content: &Content,
    config: &GameConfig,
    rng: &mut RngState,
) -> anyhow::Result<DeckList> {
    match source {
        DeckSource::Builtin(class) => {
            let deck = builtin_deck(*class);
            deck.validate(content, config)
                .with_context(|| format!("built-in {} deck", deck.name))?;
            Ok(deck)
        }
        DeckSource::Draft(class) => {
            let deck = random_draft(content, *class, config, &[], rng)
                .with_context(|| format!("draft a {class:?} deck"))?;
            Ok(deck)
        }
        DeckSource::File(path) => load_deck(path, content, config),
    }
}

fn load_catalog(cards: Option<&Path>) -> anyhow::Result<Content> {
    match cards {
        Some(path) => load_content(path),
        None => Ok(Content::builtin()),
    }
}

fn run(options: &CliOptions) -> anyhow::Result<SeriesReport> {
    let content = Arc::new(load_catalog(options.cards.as_deref())?);
    let config = load_game_config_or_default(&options.assets)?;
    let mut draft_rng = RngState::from_seed(options.seed);
    let decks = [
        resolve_deck(&options.decks[0], &content, &config, &mut draft_rng)?,
        resolve_deck(&options.decks[1], &content, &config, &mut draft_rng)?,
    ];

    let weights = match options.weights.as_deref() {
        Some(path) => load_weights(path)
            .with_context(|| format!("load weights {}", path.display()))?,
        None => starter_weights(),
    };
    if options.save_weights.is_some() && !options.players[0].learns() {
        warn!("--save-weights given but player one does not learn; nothing will be saved");
    }

    let arena = ArenaConfig {
        games: options.games,
        seed: options.seed,
        max_turns: options.max_turns,
        ..ArenaConfig::default()
    };
    let mut setup = MatchSetup::new(Arc::clone(&content), decks, arena);
    setup.game = config;
    info!(
        games = options.games,
        seed = options.seed,
        deck1 = %setup.decks[0].name,
        deck2 = %setup.decks[1].name,
        "starting series"
    );

    let mut policies = [
        build_policy(options.players[0], options, &weights, options.seed ^ 1),
        build_policy(options.players[1], options, &weights, options.seed ^ 2),
    ];
    let report = run_series(&setup, options.games, &mut policies, options.seed)?;

    if let Some(path) = options.report.as_deref() {
        if options.text {
            write_text(path, &report)?;
        } else {
            write_json(path, &report)?;
        }
        info!(path = %path.display(), "report written");
    }
    if let (Some(path), Some(learned)) = (options.save_weights.as_deref(), report.weights.as_ref()) {
        save_weights(path, learned)?;
        info!(path = %path.display(), "weights written");
    }
    Ok(report)
}

fn print_summary(report: &SeriesReport, text: bool) -> anyhow::Result<()> {
    if text {
        println!("{}", report.to_text_report());
        return Ok(());
    }
    let summary = serde_json::json!({
        "players": report.policies,
        "games": report.games,
        "wins": report.wins,
        "losses": report.losses,
        "draws": report.draws,
        "win_rate": report.win_rate,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("run with --help for usage");
            std::process::exit(2);
        }
    };
    if options.help {
        print_help();
        return;
    }
    init_tracing(&options.log_level);
    let outcome = run(&options).and_then(|report| print_summary(&report, options.text));
    if let Err(err) = outcome {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
