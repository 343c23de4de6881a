use std::fmt::Write;

use fakecoin_types::WeighRecord;

use crate::game::GameEvent;

/// Compact JSON for an event, one per log line.
pub fn event_log_line(event: &GameEvent) -> String {
    serde_json::to_string(event)
        .unwrap_or_else(|err| format!(r#"{{"type":"unencodable","error":"{err}"}}"#))
}

/// Human-readable summary of an event.
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Started {
            weigh_limit,
            allow_candidates,
        } => {
            let mut out = String::from("New game started");
            match weigh_limit {
                Some(limit) => {
                    let _ = write!(out, " ({limit} weigh{}", plural(*limit));
                }
                None => out.push_str(" (unlimited weighs"),
            }
            if *allow_candidates {
                out.push_str(", candidates on");
            }
            out.push(')');
            out
        }
        GameEvent::Moved { coin, from, to } => format!("Coin {coin}: {from} -> {to}"),
        GameEvent::ScaleCleared { returned } => format!("Returned {returned} to the pool"),
        GameEvent::Weighed {
            record,
            weigh_count,
        } => format!("Weigh {weigh_count}: {}", format_weigh(record)),
        GameEvent::Labeled {
            coin,
            label,
            applied: true,
        } => format!("Coin {coin} labeled {label}"),
        GameEvent::Labeled {
            coin,
            label,
            applied: false,
        } => format!("Coin {coin} no longer labeled {label}"),
        GameEvent::Finished { verdict } => verdict.summary(),
    }
}

/// `1,2,3 vs 4,5,6: balanced`
pub fn format_weigh(record: &WeighRecord) -> String {
    format!("{} vs {}: {}", record.left, record.right, record.tilt)
}

/// One weigh per line, numbered from 1.
pub fn format_history(history: &[WeighRecord]) -> String {
    let mut out = String::with_capacity(history.len().saturating_mul(32));
    for (idx, record) in history.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}. {}", idx + 1, format_weigh(record));
    }
    out
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
