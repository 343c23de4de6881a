use fakecoin_execution::{Game, Phase};
use fakecoin_types::{CoinSet, CoinView, Pan, Verdict};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::AppState;
use crate::commands::COMMANDS;

const MAX_COMPLETIONS: usize = 6;

pub fn draw_ui(f: &mut ratatui::Frame, app: &AppState) {
    let completions = app.completion.filtered.len().min(MAX_COMPLETIONS) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(if completions == 0 { 0 } else { completions + 2 }),
        ])
        .split(f.area());

    let status = Paragraph::new(status_line(app)).style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let board = List::new(render_board(&app.game))
        .block(Block::default().borders(Borders::ALL).title("Scale"));
    f.render_widget(board, main_chunks[0]);

    let log_area = main_chunks[1];
    let log_lines = tail_rows(
        &app.logs,
        log_area.width.saturating_sub(2) as usize,
        log_area.height.saturating_sub(2) as usize,
    );
    let log =
        Paragraph::new(log_lines).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(log, log_area);

    let input = Paragraph::new(format!("fakecoin $ {}", app.input))
        .block(Block::default().borders(Borders::ALL).title("Input"));
    f.render_widget(input, chunks[2]);

    let hint = Paragraph::new(app.hint.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(hint, chunks[3]);

    if completions > 0 {
        let items: Vec<ListItem> = app
            .completion
            .filtered
            .iter()
            .map(|&idx| {
                let cmd = &COMMANDS[idx];
                ListItem::new(Line::from(vec![
                    Span::styled(format!("/{}", cmd.name), Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::styled(cmd.desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(
            app.completion.selected.min(items.len().saturating_sub(1)),
        ));
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Commands"))
            .highlight_style(Style::default().fg(Color::Yellow));
        f.render_stateful_widget(list, chunks[4], &mut state);
    }

    if app.show_result {
        if let Some(verdict) = app.game.verdict() {
            render_result(f, verdict);
        }
    }
}

/// The last `visible` rows of `logs` hard-wrapped at `width`, so the newest entry
/// always ends on the bottom row.
fn tail_rows(logs: &[String], width: usize, visible: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows: Vec<Line<'static>> = Vec::with_capacity(visible);
    for entry in logs.iter().rev() {
        if rows.len() >= visible {
            break;
        }
        let chars: Vec<char> = entry.chars().collect();
        let mut wrapped: Vec<String> = chars
            .chunks(width)
            .map(|chunk| chunk.iter().collect())
            .collect();
        if wrapped.is_empty() {
            wrapped.push(String::new());
        }
        for row in wrapped.into_iter().rev() {
            if rows.len() >= visible {
                break;
            }
            rows.push(Line::raw(row));
        }
    }
    rows.reverse();
    rows
}

fn status_line(app: &AppState) -> String {
    let game = &app.game;
    let weighs = match game.rules().weigh_limit {
        Some(limit) => format!("{}/{limit}", game.weigh_count()),
        None => game.weigh_count().to_string(),
    };
    let phase = match game.phase() {
        Phase::InProgress => "in progress",
        Phase::Complete => "complete",
    };
    format!(
        "Fake Coin | Variant {} | Weighs {weighs} | {phase}",
        app.variant
    )
}

pub fn render_board(game: &Game) -> Vec<ListItem<'static>> {
    let views = game.coins();
    let mut lines: Vec<ListItem> = Vec::new();
    let add = |lines: &mut Vec<ListItem>, label: &str, mut spans: Vec<Span<'static>>| {
        let mut row = vec![Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::Yellow),
        )];
        row.append(&mut spans);
        lines.push(ListItem::new(Line::from(row)));
    };

    add(&mut lines, "Left pan", coin_spans(&views, game.pan(Pan::Left)));
    add(&mut lines, "Right pan", coin_spans(&views, game.pan(Pan::Right)));
    let tilt = match game.last_tilt() {
        Some(tilt) => Span::styled(tilt.describe(), Style::default().add_modifier(Modifier::BOLD)),
        None => Span::styled("not weighed", Style::default().fg(Color::DarkGray)),
    };
    add(&mut lines, "Scale", vec![tilt]);
    add(&mut lines, "Pool", coin_spans(&views, game.pool()));

    let labels = game.labels();
    let fake = labels
        .fake()
        .map(|coin| coin.to_string())
        .unwrap_or_else(|| "-".into());
    add(
        &mut lines,
        "Labels",
        vec![Span::raw(format!(
            "fake {fake} | real {} | candidates {}",
            or_dash(labels.real()),
            or_dash(labels.candidates())
        ))],
    );

    if game.history().is_empty() {
        add(&mut lines, "History", vec![Span::raw("no weighs yet")]);
    } else {
        add(&mut lines, "History", Vec::new());
        for (idx, record) in game.history().iter().enumerate() {
            lines.push(ListItem::new(Line::raw(format!(
                "  {}. {} vs {}: {}",
                idx + 1,
                record.left,
                record.right,
                record.tilt
            ))));
        }
    }
    lines
}

fn or_dash(set: CoinSet) -> String {
    if set.is_empty() {
        "-".into()
    } else {
        set.to_string()
    }
}

/// One span per coin in `set`, marked with its labels: `F` fake, `R` real, `?`
/// candidate, `*` the revealed fake.
fn coin_spans(views: &[CoinView], set: CoinSet) -> Vec<Span<'static>> {
    if set.is_empty() {
        return vec![Span::styled("empty", Style::default().fg(Color::DarkGray))];
    }
    set.iter()
        .map(|coin| views[coin.index()])
        .map(|view| {
            let mut text = view.id.to_string();
            let mut style = Style::default();
            if view.labeled_fake {
                text.push('F');
                style = style.fg(Color::Magenta);
            } else if view.labeled_real {
                text.push('R');
                style = style.fg(Color::Green);
            }
            if view.candidate {
                text.push('?');
                if !view.labeled_fake && !view.labeled_real {
                    style = style.fg(Color::Yellow);
                }
            }
            if view.is_fake {
                text.push('*');
                style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
            }
            text.push(' ');
            Span::styled(text, style)
        })
        .collect()
}

fn render_result(f: &mut ratatui::Frame, verdict: Verdict) {
    let area = centered_rect(60, 7, f.area());
    let (title, color) = if verdict.correct {
        ("Solved", Color::Green)
    } else {
        ("Not quite", Color::Red)
    };
    let body = vec![
        Line::styled(verdict.summary(), Style::default().fg(color)),
        Line::raw(""),
        Line::raw("Esc to close, Ctrl-N for a new game"),
    ];
    let popup = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// A `width` x `height` rect centered in `r`, clipped to it.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::push_log;
    use crate::commands::CommandAction;
    use crate::config::Settings;
    use fakecoin_execution::{Rules, Variant};
    use fakecoin_types::{CoinId, Label};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tracing::Level;

    fn coin(id: u8) -> CoinId {
        CoinId::new(id).unwrap()
    }

    fn app_with_fake(variant: Variant, fake: u8) -> AppState {
        let settings = Settings {
            variant,
            rules: variant.rules(),
            verbose: false,
            log_level: Level::INFO,
            seed: None,
        };
        let mut app = AppState::new(&settings, ChaCha20Rng::seed_from_u64(0));
        app.game = Game::with_fake(variant.rules(), coin(fake));
        app
    }

    fn render(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_fresh_board() {
        let app = app_with_fake(Variant::Classic, 5);
        let screen = render(&app);
        assert!(screen.contains("Variant classic | Weighs 0/2 | in progress"));
        assert!(screen.contains("Left pan: empty"));
        assert!(screen.contains("Scale: not weighed"));
        assert!(screen.contains("Pool: 1 2 3 4 5 6 7 8 9"));
        assert!(screen.contains("fakecoin $"));
    }

    #[test]
    fn renders_pans_labels_and_history() {
        let mut app = app_with_fake(Variant::Open, 5);
        app.game.place(coin(1), Pan::Left).unwrap();
        app.game.place(coin(2), Pan::Right).unwrap();
        app.game.weigh().unwrap();
        app.game.toggle_label(coin(1), Label::Real).unwrap();
        app.game.toggle_label(coin(7), Label::Candidate).unwrap();

        let screen = render(&app);
        assert!(screen.contains("Left pan: 1R"));
        assert!(screen.contains("Right pan: 2"));
        assert!(screen.contains("Scale: balanced"));
        assert!(screen.contains("7?"));
        assert!(screen.contains("fake - | real 1 | candidates 7"));
        assert!(screen.contains("1. 1 vs 2: balanced"));
    }

    #[test]
    fn shows_result_overlay() {
        let mut app = app_with_fake(Variant::Open, 5);
        app.game.toggle_label(coin(5), Label::Fake).unwrap();
        let result = app.game.submit_guess();
        app.record(result);

        let screen = render(&app);
        assert!(screen.contains("Solved"));
        assert!(screen.contains("Congratulations! Coin 5 is the fake"));
        assert!(screen.contains("5F*"));

        app.show_result = false;
        let screen = render(&app);
        assert!(!screen.contains("Esc to close"));
        assert!(screen.contains("complete"));
    }

    #[test]
    fn verbose_log_keeps_newest_entry_visible() {
        let mut app = app_with_fake(Variant::Open, 5);
        app.verbose = true;
        app.apply(CommandAction::Place(Pan::Left, CoinId::all().collect()));
        push_log(&mut app, "latest entry".into());

        let screen = render(&app);
        assert!(screen.contains("latest entry"));
        assert!(screen.contains("Coin 9: pool -> left pan"));
    }

    #[test]
    fn tail_rows_wraps_and_keeps_the_end() {
        let logs = vec!["abcdefgh".to_string(), "".to_string(), "xyz".to_string()];
        let rows: Vec<String> = tail_rows(&logs, 3, 4)
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert_eq!(rows, ["def", "gh", "", "xyz"]);
        assert!(tail_rows(&logs, 3, 0).is_empty());
    }

    #[test]
    fn centered_rect_is_clipped() {
        let outer = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 4, outer), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(80, 20, outer), outer);
    }

    #[test]
    fn default_rules_show_unbounded_counter() {
        let mut app = app_with_fake(Variant::Open, 5);
        app.game = Game::with_fake(Rules::default(), coin(3));
        assert!(render(&app).contains("Weighs 0 | in progress"));
    }
}
