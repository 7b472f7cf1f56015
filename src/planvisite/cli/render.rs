//! Terminal output for the CLI.
//!
//! Layout math (column widths, truncation) is Unicode-aware so accented names
//! line up. Each `render_*` returns the text; the handlers print it.

use colored::Colorize;
use planvisite::api::{CmdMessage, MessageLevel};
use planvisite::codec::format_amount;
use planvisite::config::{PlanConfig, CONFIG_KEYS};
use planvisite::index::DisplayVisit;
use planvisite::model::{format_date_european, Client};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const ADDRESS_WIDTH: usize = 32;
const CITY_WIDTH: usize = 18;
const CLIENTS_WIDTH: usize = 40;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_clients(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "No clients found.\n".to_string();
    }

    let id_width = clients
        .iter()
        .map(|c| format!("#{}", c.id).width())
        .max()
        .unwrap_or(2);

    let mut out = String::new();
    for client in clients {
        let id = format!("#{}", client.id);
        let mut line = format!(
            "{}{}  {}  {}  {}",
            id.yellow(),
            " ".repeat(id_width - id.width()),
            pad_to_width(&client.name, NAME_WIDTH),
            pad_to_width(&client.address, ADDRESS_WIDTH),
            pad_to_width(&client.city, CITY_WIDTH),
        );
        let extra: Vec<&str> = [client.region.as_str(), client.phone.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !extra.is_empty() {
            line.push_str(&format!("  {}", extra.join(" · ").dimmed()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub(super) fn render_visits(visits: &[DisplayVisit], currency_symbol: &str) -> String {
    if visits.is_empty() {
        return "No visits planned.\n".to_string();
    }

    let mut out = String::new();
    for dv in visits {
        let idx = format!("{:>4}", format!("{}.", dv.position));
        let total = if dv.visit.total != 0.0 {
            format_amount(dv.visit.total, currency_symbol)
        } else {
            String::new()
        };
        let mut line = format!(
            "{} {}  {}  {:>14}",
            idx.yellow(),
            format_date_european(&dv.visit.date),
            pad_to_width(&dv.visit.client_names(), CLIENTS_WIDTH),
            total,
        );
        if !dv.visit.quote_number.is_empty() {
            let quote = if dv.visit.quote_validity.is_empty() {
                format!("  [{}]", dv.visit.quote_number)
            } else {
                format!(
                    "  [{} until {}]",
                    dv.visit.quote_number, dv.visit.quote_validity
                )
            };
            line.push_str(&quote);
        }
        if !dv.visit.note.is_empty() {
            line.push_str(&format!("  {}", dv.visit.note.dimmed()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub(super) fn render_config(config: &PlanConfig) -> String {
    CONFIG_KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}\n", key, value)))
        .collect()
}

/// Truncates or pads `s` so it occupies exactly `width` columns.
fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
