//! Full pages served by the dashboard.

use finanalyse_client::{ChatMessage, CompanySnapshot};
use finanalyse_core::{
    DashboardError, FinancialProfile, MarketMover, NewsArticle, ScreenerHit, ScreenerQuery,
    SymbolMatch, NEWS_SOURCES,
};
use financial_score::{ComparisonSummary, FinancialComment, FinancialScore, ScoreCalculator};

use crate::cards::{AdvancedGrid, CompanyCard, ErrorPanel, QuickStats, ScoreCard};
use crate::charts::ChartSpec;
use crate::comparison::{render_summary, ComparisonTable};
use crate::html::{escape_html, layout, SITE_NAME};
use crate::listings;

pub const ERROR_TITLE: &str = "Error - FinAnalyse";

fn titled(section: &str) -> String {
    format!("{} - {}", section, SITE_NAME)
}

/// Analysis of one company: cards, charts and a comparison form.
#[derive(Debug, Clone)]
pub struct AnalysisPage {
    pub profile: FinancialProfile,
    pub score: FinancialScore,
    pub comment: FinancialComment,
    company: CompanyCard,
    quick_stats: QuickStats,
    advanced: AdvancedGrid,
    price_chart: ChartSpec,
    dividend_chart: ChartSpec,
}

impl AnalysisPage {
    pub fn new(snapshot: &CompanySnapshot, calculator: &ScoreCalculator) -> Self {
        let profile = snapshot.profile();
        let score = calculator.score(&profile);
        let comment = FinancialComment::generate(&profile, &score);
        Self {
            company: CompanyCard::new(&snapshot.financials),
            quick_stats: QuickStats::new(&profile),
            advanced: AdvancedGrid::new(&snapshot.advanced),
            price_chart: ChartSpec::price(&snapshot.history),
            dividend_chart: ChartSpec::dividends(&snapshot.dividends),
            profile,
            score,
            comment,
        }
    }

    pub fn title(&self) -> String {
        format!("{} ({}) - {}", self.profile.display_name(), self.profile.symbol, SITE_NAME)
    }

    pub fn render(&self) -> String {
        let body = format!(
            r#"<h1 id="analysis-title" class="text-2xl font-bold">Analysis of {name}</h1>
<div class="grid md:grid-cols-3 gap-4">{company}{score}{stats}</div>
<div class="bg-white p-6 rounded-xl shadow"><h3 class="text-lg font-semibold text-gray-800 mb-2">Commentary</h3><p class="text-sm text-gray-700">{comment}</p></div>
{advanced}
<div class="grid md:grid-cols-2 gap-4">{price_chart}{dividend_chart}</div>
<form action="/compare" method="get" class="bg-white p-6 rounded-xl shadow flex gap-2">
  <input type="hidden" name="base" value="{symbol}">
  <input name="other" placeholder="Compare with (e.g. MSFT)" class="border rounded px-2 py-1 text-sm">
  <button class="bg-blue-600 text-white rounded px-3 py-1 text-sm">Compare</button>
</form>"#,
            name = escape_html(self.profile.display_name()),
            company = self.company.render(),
            score = ScoreCard::new(&self.score, &self.comment).render(),
            stats = self.quick_stats.render(),
            comment = escape_html(&self.comment.to_text()),
            advanced = self.advanced.render(),
            price_chart = self.price_chart.render("stock-chart", "Price history (1 year)"),
            dividend_chart = self.dividend_chart.render("dividend-chart", "Dividend history"),
            symbol = escape_html(&self.profile.symbol),
        );
        layout(&self.title(), &body)
    }
}

pub struct ComparePage {
    pub left: FinancialProfile,
    pub right: FinancialProfile,
}

impl ComparePage {
    pub fn new(left: FinancialProfile, right: FinancialProfile) -> Self {
        Self { left, right }
    }

    pub fn title(&self) -> String {
        titled(&format!("{} vs {}", self.left.symbol, self.right.symbol))
    }

    pub fn render(&self) -> String {
        let table = ComparisonTable::new(&self.left, &self.right);
        let summary = ComparisonSummary::build(&self.left, &self.right);
        let body = format!(
            r#"<h1 class="text-2xl font-bold">Comparison</h1>
<div class="bg-white p-6 rounded-xl shadow" id="comparison-table-container">{}</div>
<div class="bg-white p-6 rounded-xl shadow text-sm text-gray-700" id="comparison-summary">{}</div>"#,
            table.render(),
            render_summary(&summary)
        );
        layout(&self.title(), &body)
    }
}

pub fn error_page(err: &DashboardError) -> String {
    layout(ERROR_TITLE, &ErrorPanel::from_error(err).render())
}

pub fn missing_ticker_page() -> String {
    let body = r#"<div id="error-state" class="bg-red-50 border border-red-200 text-red-700 p-4 rounded-xl"><p id="error-message">No ticker symbol provided. <a href="/" class="font-bold underline">Back to home</a>.</p></div>"#;
    layout(&titled("No company"), body)
}

/// Landing page: search, screener form, movers and news from every source.
pub fn home_page(
    gainers: &[MarketMover],
    losers: &[MarketMover],
    news: &[(&str, Vec<NewsArticle>)],
) -> String {
    let news_html: String = news
        .iter()
        .map(|(heading, articles)| listings::news_section(heading, articles))
        .collect();
    let sources: String = NEWS_SOURCES
        .iter()
        .map(|(key, heading)| {
            format!(r#"<a href="/news?source={}" class="underline">{}</a>"#, key, heading)
        })
        .collect::<Vec<_>>()
        .join(" · ");
    let body = format!(
        r#"<section class="bg-white p-6 rounded-xl shadow">
  <h1 class="text-2xl font-bold mb-2">Analyze a company</h1>
  <form action="/search" method="get" class="flex gap-2"><input name="query" placeholder="Company name or symbol" class="border rounded px-2 py-1 flex-1"><button class="bg-blue-600 text-white rounded px-3 py-1">Search</button></form>
</section>
<section class="bg-white p-6 rounded-xl shadow">
  <h2 class="text-lg font-semibold mb-2">Stock screener</h2>
  <form action="/screener" method="get" class="flex flex-wrap gap-2 text-sm">
    <input name="sector" placeholder="Sector" class="border rounded px-2 py-1">
    <input name="pe_max" placeholder="Max P/E" class="border rounded px-2 py-1">
    <input name="dividend_min" placeholder="Min dividend (%)" class="border rounded px-2 py-1">
    <button class="bg-blue-600 text-white rounded px-3 py-1">Filter</button>
  </form>
</section>
{movers}
<p class="text-sm text-gray-600">News sources: {sources}</p>
{news}"#,
        movers = listings::movers_tables(gainers, losers),
        sources = sources,
        news = news_html,
    );
    layout(SITE_NAME, &body)
}

pub fn screener_page(query: &ScreenerQuery, hits: &[ScreenerHit]) -> String {
    let mut filters = Vec::new();
    if let Some(sector) = &query.sector {
        filters.push(format!("sector {}", sector));
    }
    if let Some(pe_max) = query.pe_max {
        filters.push(format!("P/E at most {}", pe_max));
    }
    if let Some(dividend_min) = query.dividend_min {
        filters.push(format!("dividend at least {}%", dividend_min));
    }
    let filters = if filters.is_empty() {
        "no filters".to_string()
    } else {
        filters.join(", ")
    };
    let body = format!(
        r#"<section class="bg-white p-6 rounded-xl shadow"><h1 class="text-xl font-bold mb-1">Screener results</h1><p class="text-sm text-gray-500 mb-4">{}</p>{}</section>"#,
        escape_html(&filters),
        listings::screener_table(hits)
    );
    layout(&titled("Screener"), &body)
}

pub fn search_page(query: &str, matches: &[SymbolMatch]) -> String {
    let body = format!(
        r#"<section class="bg-white p-6 rounded-xl shadow"><h1 class="text-xl font-bold mb-4">Results for "{}"</h1>{}</section>"#,
        escape_html(query),
        listings::suggestion_list(matches)
    );
    layout(&titled("Search"), &body)
}

pub fn country_page(country_code: &str, companies: &[SymbolMatch]) -> String {
    layout(
        &titled(country_code),
        &listings::country_listing(country_code, companies),
    )
}

pub fn movers_page(gainers: &[MarketMover], losers: &[MarketMover]) -> String {
    layout(&titled("Market movers"), &listings::movers_tables(gainers, losers))
}

pub fn news_page(heading: &str, articles: &[NewsArticle]) -> String {
    layout(&titled("News"), &listings::news_section(heading, articles))
}

/// Transcript plus a form that posts the next message with the session id.
pub fn chat_page(session_id: &str, messages: &[ChatMessage]) -> String {
    let body = format!(
        r#"<section class="bg-white p-6 rounded-xl shadow space-y-4">
<h1 class="text-xl font-bold">FinAnalyse AI</h1>
{transcript}
<form action="/chat" method="post" class="flex gap-2">
  <input type="hidden" name="session_id" value="{session}">
  <input name="message" placeholder="Ask a question about finance" class="border rounded px-2 py-1 flex-1">
  <button class="bg-blue-600 text-white rounded px-3 py-1">Send</button>
</form>
</section>"#,
        transcript = listings::chat_messages(messages),
        session = escape_html(session_id),
    );
    layout(&titled("Chat"), &body)
}
