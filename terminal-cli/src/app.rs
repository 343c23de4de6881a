use chrono::Local;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fakecoin_execution::logging::{describe, event_log_line, format_history};
use fakecoin_execution::{possible_fakes, Game, GameEvent, Variant};
use fakecoin_types::{CoinId, Label, MoveError};
use rand_chacha::ChaCha20Rng;

use crate::commands::{handle_line, CommandAction, COMMANDS, COMPLETIONS, HINTS, TEMPLATES};
use crate::config::Settings;

const MAX_LOG_LINES: usize = 300;
const IDLE_HINT: &str = "Type /help or Tab for completions";

#[derive(Default)]
pub struct CompletionState {
    pub filtered: Vec<usize>,
    pub selected: usize,
}

pub struct AppState {
    pub game: Game,
    pub variant: Variant,
    pub rng: ChaCha20Rng,
    pub input: String,
    pub logs: Vec<String>,
    pub hint: String,
    pub completion: CompletionState,
    /// Result overlay is open.
    pub show_result: bool,
    pub verbose: bool,
}

impl AppState {
    pub fn new(settings: &Settings, mut rng: ChaCha20Rng) -> Self {
        let game = Game::new(settings.rules, &mut rng);
        let mut app = Self {
            game,
            variant: settings.variant,
            rng,
            input: String::new(),
            logs: Vec::new(),
            hint: IDLE_HINT.to_string(),
            completion: CompletionState::default(),
            show_result: false,
            verbose: settings.verbose,
        };
        let started = app.game.started_event();
        app.record(Ok(started));
        app
    }

    /// Log the outcome of a game transition.
    pub fn record(&mut self, result: Result<GameEvent, MoveError>) {
        match result {
            Ok(event) => {
                push_log(self, describe(&event));
                if self.verbose {
                    push_log(self, event_log_line(&event));
                }
                if matches!(event, GameEvent::Finished { .. }) {
                    self.show_result = true;
                }
            }
            Err(err) => push_log(self, format!("⚠ {err}")),
        }
    }

    pub fn new_game(&mut self) {
        let event = self.game.reset(&mut self.rng);
        self.show_result = false;
        self.record(Ok(event));
    }

    /// Apply a parsed command. Returns `true` when the app should exit.
    pub fn apply(&mut self, action: CommandAction) -> bool {
        match action {
            CommandAction::Local(msg) => {
                if !msg.is_empty() {
                    push_log(self, msg);
                }
            }
            CommandAction::Rules => {
                let line = format!("Rules ({}): {}", self.variant, self.game.rules().describe());
                push_log(self, line);
            }
            CommandAction::NewGame => self.new_game(),
            CommandAction::Quit => return true,
            CommandAction::Place(pan, coins) => {
                for coin in coins {
                    let result = self.game.place(coin, pan);
                    self.record(result);
                }
            }
            CommandAction::Remove(coins) => {
                for coin in coins {
                    let result = self.game.remove(coin);
                    self.record(result);
                }
            }
            CommandAction::ClearScale => {
                let result = self.game.clear_scale();
                self.record(result);
            }
            CommandAction::Weigh => {
                let result = self.game.weigh();
                self.record(result);
            }
            CommandAction::Toggle(label, coins) => {
                for coin in coins {
                    let result = self.game.toggle_label(coin, label);
                    self.record(result);
                }
            }
            CommandAction::Hint => self.show_hint(),
            CommandAction::Submit => {
                let result = self.game.submit_guess();
                self.record(result);
            }
            CommandAction::Guess(coin) => self.guess(coin),
        }
        false
    }

    fn guess(&mut self, coin: CoinId) {
        if self.game.labels().fake() != Some(coin) {
            let result = self.game.toggle_label(coin, Label::Fake);
            let failed = result.is_err();
            self.record(result);
            if failed {
                return;
            }
        }
        let result = self.game.submit_guess();
        self.record(result);
    }

    fn show_hint(&mut self) {
        let history = self.game.history();
        if history.is_empty() {
            push_log(self, "No weighs yet: every coin could be the fake".into());
            return;
        }
        let weighs = format_history(history);
        let suspects = possible_fakes(history);
        let summary = match suspects.len() {
            0 => "No coin fits every weigh".to_string(),
            1 => format!("Only coin {suspects} fits every weigh"),
            _ => format!("Coins {suspects} fit every weigh"),
        };
        for line in weighs.lines() {
            push_log(self, line.to_string());
        }
        push_log(self, summary);
    }
}

pub fn push_log(app: &mut AppState, line: String) {
    let ts = Local::now().format("%H:%M:%S");
    app.logs.push(format!("{ts} {line}"));
    if app.logs.len() > MAX_LOG_LINES {
        let excess = app.logs.len() - MAX_LOG_LINES;
        app.logs.drain(0..excess);
    }
}

/// Returns `true` when the app should exit.
pub fn handle_key_event(ev: CEvent, app: &mut AppState) -> bool {
    let CEvent::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = ev
    else {
        return false;
    };
    if kind != KeyEventKind::Press {
        return false;
    }
    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => return true,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => app.new_game(),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
            app.apply(CommandAction::Weigh);
        }
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
            app.apply(CommandAction::ClearScale);
        }
        (KeyCode::Up, _) => {
            let len = app.completion.filtered.len();
            if len > 0 {
                app.completion.selected = app.completion.selected.saturating_add(len - 1) % len;
            }
        }
        (KeyCode::Down, _) => {
            let len = app.completion.filtered.len();
            if len > 0 {
                app.completion.selected = (app.completion.selected + 1) % len;
            }
        }
        (KeyCode::Tab, _) => {
            let selected = app
                .completion
                .filtered
                .get(app.completion.selected)
                .copied();
            match selected {
                Some(idx) => app.input = format!("/{} ", COMMANDS[idx].name),
                None => autocomplete(app),
            }
            update_hint(app);
        }
        (KeyCode::Enter, _) => {
            let line = app.input.trim().to_string();
            app.input.clear();
            if !line.is_empty() {
                let quit = match handle_line(&line) {
                    Ok(action) => app.apply(action),
                    Err(e) => {
                        push_log(app, format!("⚠ {e:#}"));
                        false
                    }
                };
                if quit {
                    return true;
                }
            }
            update_hint(app);
        }
        (KeyCode::Esc, _) => {
            if app.show_result {
                app.show_result = false;
            } else {
                app.input.clear();
                update_hint(app);
            }
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            app.input.push(c);
            update_hint(app);
        }
        (KeyCode::Backspace, _) => {
            app.input.pop();
            update_hint(app);
        }
        _ => {}
    }
    false
}

fn autocomplete(app: &mut AppState) {
    let trimmed = app.input.trim_start();
    let (head, tail) = match trimmed.split_once(' ') {
        Some((head, tail)) => (head, Some(tail)),
        None => (trimmed, None),
    };
    let mut matches: Vec<&String> = COMPLETIONS.iter().filter(|c| c.starts_with(head)).collect();
    matches.sort();
    if let Some(first) = matches.first() {
        app.input = match tail {
            Some(rest) => format!("{first} {rest}"),
            None => first.to_string(),
        };
    }
}

pub fn update_hint(app: &mut AppState) {
    let trimmed = app.input.trim().to_string();
    update_completions(app, &trimmed);
    if trimmed.is_empty() {
        app.hint = IDLE_HINT.into();
        return;
    }
    let first = trimmed.split_whitespace().next().unwrap_or("").to_lowercase();
    app.hint = match HINTS.get(&first) {
        Some(h) => match TEMPLATES.get(first.trim_start_matches('/')) {
            Some(tpl) => format!("{h} | {tpl}"),
            None => h.clone(),
        },
        None => String::new(),
    };
}

fn update_completions(app: &mut AppState, trimmed: &str) {
    app.completion.filtered.clear();
    app.completion.selected = 0;
    // Only complete the command word itself.
    if !trimmed.starts_with('/') || trimmed.contains(' ') {
        return;
    }
    let needle = trimmed.trim_start_matches('/').to_lowercase();
    for (idx, cmd) in COMMANDS.iter().enumerate() {
        if cmd.name.starts_with(&needle) {
            app.completion.filtered.push(idx);
        }
    }
}
