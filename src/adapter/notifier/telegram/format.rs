//! Message formatting for Telegram notifications.

use crate::port::{Alert, StatsReport};
use crate::domain::TradeRecord;

/// Format an alert as message text.
///
/// With `markdown` set the text is `MarkdownV2` and every interpolated value
/// is escaped; otherwise it is plain text.
pub fn format_alert_message(alert: &Alert, markdown: bool) -> String {
    match alert {
        Alert::Trade(record) => format_trade(record, markdown),
        Alert::Idle { cycles, minutes } => {
            if markdown {
                format!(
                    "💤 *Solver Idle*\n\
                    \n\
                    ⏱️ No activity for `{minutes}` min\n\
                    🔁 Cycles: `{cycles}`"
                )
            } else {
                format!("💤 Solver Idle\n\nNo activity for {minutes} min\nCycles: {cycles}")
            }
        }
        Alert::Stats(report) => format_stats(report, markdown),
    }
}

fn format_trade(record: &TradeRecord, markdown: bool) -> String {
    if !markdown {
        return format!(
            "🏆 Trade Won\n\n\
            Order: {}\n\
            Sell: {} of {}\n\
            Buy: {} of {}\n\
            Time: {}",
            record.order_id,
            record.sell_amount,
            record.sell_token,
            record.buy_amount,
            record.buy_token,
            record.timestamp
        );
    }

    format!(
        "🏆 *Trade Won*\n\
        \n\
        📋 Order: `{}`\n\
        📤 Sell: `{}` of `{}`\n\
        📥 Buy: `{}` of `{}`\n\
        🕒 {}",
        escape_code(&record.order_id),
        escape_code(&record.sell_amount),
        escape_code(&record.sell_token),
        escape_code(&record.buy_amount),
        escape_code(&record.buy_token),
        escape_markdown(&record.timestamp)
    )
}

fn format_stats(report: &StatsReport, markdown: bool) -> String {
    let minutes = report.interval_secs / 60;
    let c = &report.cycle;
    let t = &report.totals;

    if !markdown {
        return format!(
            "📊 Solver Stats (last {minutes} min)\n\n\
            Auctions: {} (total {})\n\
            Orders: {} (total {})\n\
            Solutions: {} (total {})\n\
            Errors: {} (total {})",
            c.auctions, t.auctions, c.orders, t.orders, c.solutions, t.solutions, c.errors, t.errors
        );
    }

    format!(
        "📊 *Solver Stats* \\(last {minutes} min\\)\n\
        \n\
        🏁 Auctions: `{}` \\(total `{}`\\)\n\
        📦 Orders: `{}` \\(total `{}`\\)\n\
        ✅ Solutions: `{}` \\(total `{}`\\)\n\
        ❌ Errors: `{}` \\(total `{}`\\)",
        c.auctions, t.auctions, c.orders, t.orders, c.solutions, t.solutions, c.errors, t.errors
    )
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape text placed inside an inline code span.
pub fn escape_code(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '`' || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
