use finanalyse_client::{ChatMessage, Sender};
use finanalyse_core::format::{self, na_or};
use finanalyse_core::{MarketMover, NewsArticle, ScreenerHit, SymbolMatch};

use crate::html::{analysis_href, escape_html};

fn symbol_link(symbol: &str) -> String {
    format!(
        r#"<a href="{}" class="text-blue-600 hover:underline">{}</a>"#,
        escape_html(&analysis_href(symbol)),
        escape_html(symbol)
    )
}

fn empty_state(message: &str) -> String {
    format!(r#"<p class="text-sm text-gray-500">{}</p>"#, escape_html(message))
}

pub fn screener_table(hits: &[ScreenerHit]) -> String {
    if hits.is_empty() {
        return empty_state("No company matches these criteria.");
    }
    let rows: String = hits
        .iter()
        .map(|hit| {
            format!(
                r#"<tr><td class="px-4 py-2">{}</td><td class="px-4 py-2">{}</td><td class="px-4 py-2">{}</td><td class="px-4 py-2">{}</td></tr>"#,
                symbol_link(&hit.symbol),
                escape_html(&hit.name),
                na_or(hit.pe, format::fixed(1)),
                na_or(hit.dividend_yield, format::percentage),
            )
        })
        .collect();
    format!(
        r#"<table class="min-w-full text-sm text-left"><thead><tr class="bg-gray-50"><th class="px-4 py-2">Sym.</th><th class="px-4 py-2">Name</th><th class="px-4 py-2">P/E</th><th class="px-4 py-2">Dividend</th></tr></thead><tbody>{}</tbody></table>"#,
        rows
    )
}

/// Dropdown under the search box.
pub fn suggestion_list(matches: &[SymbolMatch]) -> String {
    if matches.is_empty() {
        return empty_state("No results.");
    }
    let items: String = matches
        .iter()
        .map(|m| {
            let exchange = m
                .exchange
                .as_deref()
                .map(|e| format!(r#" <span class="text-xs text-gray-400">{}</span>"#, escape_html(e)))
                .unwrap_or_default();
            format!(
                r#"<li class="px-3 py-2 hover:bg-gray-100"><a href="{}"><span class="font-semibold">{}</span> {}{}</a></li>"#,
                escape_html(&analysis_href(&m.symbol)),
                escape_html(&m.symbol),
                escape_html(&m.name),
                exchange
            )
        })
        .collect();
    format!(r#"<ul id="suggestions" class="bg-white border rounded shadow divide-y">{}</ul>"#, items)
}

pub fn country_listing(country_code: &str, companies: &[SymbolMatch]) -> String {
    let body = if companies.is_empty() {
        empty_state("No companies found for this country.")
    } else {
        let items: String = companies
            .iter()
            .map(|c| {
                format!(
                    r#"<li class="py-1">{} <span class="text-gray-600">{}</span></li>"#,
                    symbol_link(&c.symbol),
                    escape_html(&c.name)
                )
            })
            .collect();
        format!(r#"<ul class="text-sm">{}</ul>"#, items)
    };
    format!(
        r#"<section class="bg-white p-6 rounded-xl shadow"><h2 class="text-lg font-semibold mb-4">Companies in {}</h2>{}</section>"#,
        escape_html(country_code),
        body
    )
}

fn movers_table(title: &str, movers: &[MarketMover]) -> String {
    let body = if movers.is_empty() {
        empty_state("No data available.")
    } else {
        let rows: String = movers
            .iter()
            .map(|m| {
                let change_class = match m.change_percent {
                    Some(c) if c < 0.0 => "text-red-600",
                    Some(_) => "text-green-600",
                    None => "",
                };
                format!(
                    r#"<tr><td class="px-2 py-1">{}</td><td class="px-2 py-1">{}</td><td class="px-2 py-1">{}</td><td class="px-2 py-1 {}">{}</td></tr>"#,
                    symbol_link(&m.symbol),
                    escape_html(m.name.as_deref().unwrap_or("")),
                    na_or(m.price, format::price),
                    change_class,
                    na_or(m.change_percent, format::signed_percent),
                )
            })
            .collect();
        format!(r#"<table class="min-w-full text-sm"><tbody>{}</tbody></table>"#, rows)
    };
    format!(
        r#"<div class="bg-white p-4 rounded-xl shadow"><h3 class="font-semibold mb-2">{}</h3>{}</div>"#,
        escape_html(title),
        body
    )
}

pub fn movers_tables(gainers: &[MarketMover], losers: &[MarketMover]) -> String {
    format!(
        r#"<section class="grid md:grid-cols-2 gap-4">{}{}</section>"#,
        movers_table("Top gainers", gainers),
        movers_table("Top losers", losers)
    )
}

/// Only http(s) links are rendered as anchors.
fn safe_url(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")).then_some(trimmed)
}

pub fn news_card(article: &NewsArticle) -> String {
    let inner = format!(
        r#"<h3 class="font-semibold text-gray-800 hover:text-blue-600">{}</h3><p class="text-sm text-gray-600 mt-2">{}</p>"#,
        escape_html(&article.title),
        escape_html(article.summary())
    );
    let content = match safe_url(&article.url) {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="block">{}</a>"#,
            escape_html(url),
            inner
        ),
        None => inner,
    };
    format!(
        r#"<div class="bg-white p-4 rounded-lg shadow hover:shadow-md transition-shadow duration-200">{}</div>"#,
        content
    )
}

pub fn news_section(heading: &str, articles: &[NewsArticle]) -> String {
    let body = if articles.is_empty() {
        empty_state("No news found for this source.")
    } else {
        articles.iter().map(news_card).collect()
    };
    format!(
        r#"<section><h2 class="text-lg font-semibold mb-3">{}</h2><div class="space-y-3">{}</div></section>"#,
        escape_html(heading),
        body
    )
}

pub fn chat_messages(messages: &[ChatMessage]) -> String {
    let items: String = messages
        .iter()
        .map(|message| {
            let class = match (message.sender, message.is_error) {
                (Sender::User, _) => "bg-blue-600 text-white self-end",
                (Sender::Assistant, true) => "bg-red-50 text-red-700 self-start",
                (Sender::Assistant, false) => "bg-gray-100 text-gray-800 self-start",
            };
            format!(
                r#"<div class="max-w-prose rounded-lg px-3 py-2 {}">{}</div>"#,
                class,
                escape_html(&message.text)
            )
        })
        .collect();
    format!(r#"<div id="chat-box" class="flex flex-col gap-2">{}</div>"#, items)
}
