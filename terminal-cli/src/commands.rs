use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{anyhow, Context, Result};
use fakecoin_types::{CoinId, Label, Pan};
use lazy_static::lazy_static;

#[derive(Clone)]
pub struct CommandDef {
    pub name: &'static str,
    pub usage: &'static str,
    pub desc: &'static str,
    pub group: &'static str,
}

const fn cmd(
    name: &'static str,
    usage: &'static str,
    desc: &'static str,
    group: &'static str,
) -> CommandDef {
    CommandDef {
        name,
        usage,
        desc,
        group,
    }
}

lazy_static! {
    pub static ref COMMANDS: Vec<CommandDef> = vec![
        // Session
        cmd("help", "/help", "Show grouped palette", "Session"),
        cmd("rules", "/rules", "Show the active rules", "Session"),
        cmd("new", "/new", "Start a new game (Ctrl-N)", "Session"),
        cmd("quit", "/quit", "Exit", "Session"),
        // Scale
        cmd("left", "/left <coins>", "Put coins on the left pan", "Scale"),
        cmd("right", "/right <coins>", "Put coins on the right pan", "Scale"),
        cmd("remove", "/remove <coins>", "Return coins to the pool", "Scale"),
        cmd("clear", "/clear", "Return every coin to the pool (Ctrl-R)", "Scale"),
        cmd("weigh", "/weigh", "Weigh the pans (Ctrl-W)", "Scale"),
        // Labels
        cmd("fake", "/fake <coin>", "Toggle the fake label", "Labels"),
        cmd("real", "/real <coins>", "Toggle the real label", "Labels"),
        cmd("cand", "/cand <coins>", "Toggle the candidate label", "Labels"),
        cmd("hint", "/hint", "List coins consistent with the weighs so far", "Labels"),
        // Answer
        cmd("submit", "/submit", "Submit the coin labeled fake", "Answer"),
        cmd("guess", "/guess <coin>", "Label a coin fake and submit it", "Answer"),
    ];
    pub static ref COMPLETIONS: HashSet<String> =
        COMMANDS.iter().map(|c| format!("/{}", c.name)).collect();
    pub static ref HINTS: HashMap<String, String> = COMMANDS
        .iter()
        .map(|c| (format!("/{}", c.name), format!("{} - {}", c.usage, c.desc)))
        .collect();
    pub static ref TEMPLATES: HashMap<&'static str, &'static str> = HashMap::from([
        ("left", "/left 1 2 3   | /left 1,2,3"),
        ("right", "/right 4 5 6"),
        ("remove", "/remove 3"),
        ("real", "/real 1,2,3"),
        ("cand", "/cand 7 8"),
        ("fake", "/fake 5"),
        ("guess", "/guess 5"),
    ]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    Local(String),
    Rules,
    NewGame,
    Quit,
    Place(Pan, Vec<CoinId>),
    Remove(Vec<CoinId>),
    ClearScale,
    Weigh,
    Toggle(Label, Vec<CoinId>),
    Hint,
    Submit,
    Guess(CoinId),
}

pub fn handle_line(line: &str) -> Result<CommandAction> {
    let Some(body) = line.strip_prefix('/') else {
        return Err(anyhow!("Commands start with '/'"));
    };
    let mut parts = body.split_whitespace().map(str::to_string).collect::<Vec<_>>();
    if parts.is_empty() {
        return Ok(CommandAction::Local(String::new()));
    }
    let cmd = parts.remove(0).to_lowercase();
    match cmd.as_str() {
        "quit" | "exit" => Ok(CommandAction::Quit),
        "help" => Ok(CommandAction::Local(render_help())),
        "rules" => Ok(CommandAction::Rules),
        "new" | "reset" => Ok(CommandAction::NewGame),
        "left" | "l" => Ok(CommandAction::Place(Pan::Left, parse_coins(&parts)?)),
        "right" | "r" => Ok(CommandAction::Place(Pan::Right, parse_coins(&parts)?)),
        "remove" | "rm" => Ok(CommandAction::Remove(parse_coins(&parts)?)),
        "clear" => Ok(CommandAction::ClearScale),
        "weigh" | "w" => Ok(CommandAction::Weigh),
        "fake" => Ok(CommandAction::Toggle(
            Label::Fake,
            vec![parse_single(&parts, "/fake <coin>")?],
        )),
        "real" => Ok(CommandAction::Toggle(Label::Real, parse_coins(&parts)?)),
        "cand" | "candidate" => Ok(CommandAction::Toggle(Label::Candidate, parse_coins(&parts)?)),
        "hint" => Ok(CommandAction::Hint),
        "submit" => Ok(CommandAction::Submit),
        "guess" => Ok(CommandAction::Guess(parse_single(&parts, "/guess <coin>")?)),
        _ => Err(anyhow!("Unknown command /{cmd}")),
    }
}

/// Coin ids separated by spaces and/or commas. Duplicates are dropped.
pub fn parse_coins(args: &[String]) -> Result<Vec<CoinId>> {
    let mut coins = Vec::new();
    for token in args
        .iter()
        .flat_map(|arg| arg.split(','))
        .filter(|token| !token.is_empty())
    {
        let coin: CoinId = token.parse().with_context(|| format!("bad coin {token:?}"))?;
        if !coins.contains(&coin) {
            coins.push(coin);
        }
    }
    if coins.is_empty() {
        return Err(anyhow!("Provide at least one coin (1-9)"));
    }
    Ok(coins)
}

fn parse_single(args: &[String], usage: &str) -> Result<CoinId> {
    match parse_coins(args) {
        Ok(coins) if coins.len() == 1 => Ok(coins[0]),
        Ok(_) => Err(anyhow!("Usage: {usage} (exactly one coin)")),
        Err(err) => Err(err.context(format!("Usage: {usage}"))),
    }
}

pub fn render_help() -> String {
    let mut by_group: BTreeMap<&str, Vec<&CommandDef>> = BTreeMap::new();
    for c in COMMANDS.iter() {
        by_group.entry(c.group).or_default().push(c);
    }
    let mut out = String::new();
    for (group, cmds) in by_group {
        out.push_str(&format!("\n[{group}]\n"));
        for c in cmds {
            out.push_str(&format!("  {:<18} {}\n", c.usage, c.desc));
        }
    }
    out
}
