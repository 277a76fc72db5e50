//! Plain-text renderings for the terminal.

use dashboard_views::{AdvancedGrid, QuickStats};
use finanalyse_client::{ChatMessage, CompanySnapshot, Sender};
use finanalyse_core::format::{self, na_or};
use finanalyse_core::{FinancialProfile, MarketMover, NewsArticle, ScreenerHit, SymbolMatch};
use financial_score::{ComparisonSummary, FinancialComment, FinancialScore, Side};

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn stat_lines(stats: &[(&'static str, String)]) -> String {
    stats
        .iter()
        .map(|(label, value)| format!("  {:<18} {}\n", label, value))
        .collect()
}

pub fn analysis(snapshot: &CompanySnapshot, score: &FinancialScore, comment: &FinancialComment) -> String {
    let fin = &snapshot.financials;
    let profile = snapshot.profile();
    let mut out = format!(
        "{} ({})\n{} | {} | {}\n\n",
        profile.display_name(),
        fin.symbol,
        fin.sector,
        fin.country,
        na_or(fin.price, format::price)
    );
    out.push_str(&format!(
        "Financial score: {:.1}/10 ({}/{} points, {} of 6 metrics available)\n\n",
        score.value,
        score.points,
        score.max_points,
        score.rules_evaluated()
    ));
    out.push_str("Key indicators\n");
    out.push_str(&stat_lines(&QuickStats::new(&profile).stats));
    out.push_str("\nAdvanced metrics\n");
    out.push_str(&stat_lines(&AdvancedGrid::new(&snapshot.advanced).stats));

    let history = &snapshot.history;
    if let (Some(first), Some(last)) = (history.prices.first(), history.prices.last()) {
        out.push_str(&format!(
            "\nPrice over {} sessions: {} -> {}\n",
            history.prices.len(),
            format::price(*first),
            format::price(*last)
        ));
    }
    let dividends = &snapshot.dividends.dividend_history;
    if !dividends.years.is_empty() {
        let years: Vec<String> = dividends
            .years
            .iter()
            .zip(&dividends.amounts)
            .map(|(year, amount)| format!("{} {}", year, format::price(*amount)))
            .collect();
        out.push_str(&format!("Dividends: {}\n", years.join(", ")));
    }

    out.push_str(&format!("\n{}\n", comment.to_text()));
    out
}

pub fn comparison(left: &FinancialProfile, right: &FinancialProfile) -> String {
    let rows = financial_score::comparison_rows(left, right);
    let mark = |row: &financial_score::ComparisonRow, side: Side| {
        if row.winner == Some(side) {
            "*"
        } else {
            " "
        }
    };

    let mut out = format!("{:<16} {:>12}  {:>12}\n", "Metric", left.symbol, right.symbol);
    for row in &rows {
        out.push_str(&format!(
            "{:<16} {:>11}{}  {:>11}{}\n",
            row.label,
            row.left_display,
            mark(row, Side::Left),
            row.right_display,
            mark(row, Side::Right)
        ));
    }
    out.push_str("(* better value)\n\n");
    out.push_str(&ComparisonSummary::build(left, right).to_text());
    out.push('\n');
    out
}

pub fn screener(hits: &[ScreenerHit]) -> String {
    if hits.is_empty() {
        return "No company matches these criteria.\n".to_string();
    }
    let mut out = format!("{:<10} {:<32} {:>8} {:>9}\n", "Symbol", "Name", "P/E", "Dividend");
    for hit in hits {
        out.push_str(&format!(
            "{:<10} {:<32} {:>8} {:>9}\n",
            hit.symbol,
            truncate(&hit.name, 32),
            na_or(hit.pe, format::fixed(1)),
            na_or(hit.dividend_yield, format::percentage)
        ));
    }
    out
}

pub fn symbols(matches: &[SymbolMatch]) -> String {
    if matches.is_empty() {
        return "No results.\n".to_string();
    }
    matches
        .iter()
        .map(|m| match m.exchange.as_deref() {
            Some(exchange) => format!("{:<10} {} ({})\n", m.symbol, m.name, exchange),
            None => format!("{:<10} {}\n", m.symbol, m.name),
        })
        .collect()
}

fn movers_block(title: &str, movers: &[MarketMover]) -> String {
    let mut out = format!("{}\n", title);
    if movers.is_empty() {
        out.push_str("  No data available.\n");
    }
    for m in movers {
        out.push_str(&format!(
            "  {:<8} {:<28} {:>10} {:>9}\n",
            m.symbol,
            truncate(m.name.as_deref().unwrap_or(""), 28),
            na_or(m.price, format::price),
            na_or(m.change_percent, format::signed_percent)
        ));
    }
    out
}

pub fn movers(gainers: &[MarketMover], losers: &[MarketMover]) -> String {
    format!("{}\n{}", movers_block("Top gainers", gainers), movers_block("Top losers", losers))
}

pub fn news(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return "No news found for this source.\n".to_string();
    }
    articles
        .iter()
        .map(|a| {
            let summary = a.summary();
            if summary.is_empty() {
                format!("* {}\n  {}\n", a.title, a.url)
            } else {
                format!("* {}\n  {}\n  {}\n", a.title, truncate(summary, 160), a.url)
            }
        })
        .collect()
}

pub fn chat_message(message: &ChatMessage) -> String {
    match message.sender {
        Sender::User => format!("you> {}", message.text),
        Sender::Assistant => format!("ai> {}", message.text),
    }
}
