use anyhow::{Context, Result};
use clap::Parser;
use finanalyse_client::{
    load_company, load_comparison, load_movers, ChatSession, FinAnalyseClient, SessionStore,
    SuggestionDebouncer, Suggestions,
};
use finanalyse_core::{DashboardApi, ScreenerQuery, Ticker};
use financial_score::{FinancialComment, ScoreCalculator};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

mod cli;
mod render;

use cli::{Cli, Commands};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "finanalyse=warn,finanalyse_client=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    tracing::debug!("Command line input recorded: {cli:?}");

    let client = FinAnalyseClient::from_env();
    tracing::debug!(api_base = %client.base_url(), "Using dashboard API");
    let api: Arc<dyn DashboardApi> = Arc::new(client);
    let calculator = ScoreCalculator::new(cli.missing_data.into());

    match cli.command {
        Commands::Analyze { ticker, html } => {
            let ticker = Ticker::parse(&ticker)?;
            let snapshot = load_company(api.as_ref(), &ticker).await?;
            let profile = snapshot.profile();
            let score = calculator.score(&profile);
            let comment = FinancialComment::generate(&profile, &score);
            print!("{}", render::analysis(&snapshot, &score, &comment));

            if let Some(path) = html {
                let page = dashboard_views::AnalysisPage::new(&snapshot, &calculator);
                std::fs::write(&path, page.render())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("\nHTML report written to {}", path.display());
            }
        }

        Commands::Compare { base, other } => {
            print!("{}", compare_report(api.as_ref(), &base, &other).await?);
        }

        Commands::Screener { sector, pe_max, dividend_min } => {
            let query = ScreenerQuery { sector, pe_max, dividend_min }.normalized();
            let hits = api.screener(&query).await?;
            print!("{}", render::screener(&hits));
        }

        Commands::Search { query } => {
            let matches = api.search(query.trim()).await?;
            print!("{}", render::symbols(&matches));
        }

        Commands::Suggest { delay_ms } => {
            suggest_loop(api, Duration::from_millis(delay_ms)).await?;
        }

        Commands::Country { code } => {
            let companies = api.companies_by_country(&code).await?;
            print!("{}", render::symbols(&companies));
        }

        Commands::Movers => {
            let (gainers, losers) = load_movers(api.as_ref()).await?;
            print!("{}", render::movers(&gainers, &losers));
        }

        Commands::News { source } => {
            let articles = api.news(source.as_deref()).await?;
            print!("{}", render::news(&articles));
        }

        Commands::Chat { message } => {
            let session_id = SessionStore::open_default()
                .session_id()
                .context("Failed to load the chat session id")?;
            let mut chat = ChatSession::new(api, session_id);
            match message {
                Some(message) => {
                    let reply = chat.send(&message).await?;
                    println!("{}", reply.text);
                }
                None => chat_loop(&mut chat).await?,
            }
        }
    }

    Ok(())
}

/// Both profiles load together; a second failure or the same ticker twice yields no report.
async fn compare_report(api: &dyn DashboardApi, base: &str, other: &str) -> finanalyse_core::Result<String> {
    let base = Ticker::parse(base)?;
    let other = Ticker::parse(other)?;
    let (left, right) = load_comparison(api, &base, &other).await?;
    Ok(render::comparison(&left, &right))
}

/// Each line is treated as the current content of the search box.
async fn suggest_loop(api: Arc<dyn DashboardApi>, delay: Duration) -> Result<()> {
    let debouncer = Arc::new(SuggestionDebouncer::with_delay(api, delay));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let debouncer = debouncer.clone();
        pending.push(tokio::spawn(async move {
            match debouncer.suggest(&line).await {
                Ok(Suggestions::Ready(matches)) => print!("{}", render::symbols(&matches)),
                Ok(Suggestions::Cleared) | Ok(Suggestions::Superseded) => {}
                Err(e) => eprintln!("Suggestions failed: {}", e.user_message()),
            }
        }));
    }

    for task in pending {
        task.await?;
    }
    Ok(())
}

async fn chat_loop(chat: &mut ChatSession) -> Result<()> {
    if let Some(greeting) = chat.history().first() {
        println!("{}", render::chat_message(greeting));
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }
        let reply = chat.send(line).await?;
        println!("{}", render::chat_message(&reply));
    }
    Ok(())
}
