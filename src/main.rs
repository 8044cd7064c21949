//! campus-scout is a CLI assistant that answers questions about Lafayette College
//! from the college's own web pages.
//!
//! The tool has four commands:
//! 1. `route` - Shows which pages a question would be answered from
//! 2. `scrape` - Scrapes one page and shows its text and statistic guesses
//! 3. `gather` - Scrapes the routed pages for a question and prints the merged payload
//! 4. `ask` - Gathers pages for each question and answers it with an LLM model

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatProvider;
use log::{LevelFilter, error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use campus_scout::{
    ExtractBy, HttpFetcher, PageCache, Settings, answer, constants::MODEL_API_KEY_ENV_NAME,
    fetch_page, route, synthesize,
};

/// Answer questions about Lafayette College from lafayette.edu
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

#[derive(Args)]
struct PipelineArgs {
    /// Domain searched and scraped
    #[arg(long, global = true, default_value = campus_scout::constants::DEFAULT_SITE)]
    site: String,
    /// Search engine result page endpoint
    #[arg(long, global = true, default_value = campus_scout::constants::DEFAULT_SEARCH_ENDPOINT)]
    search_endpoint: String,
    /// Maximum number of search results added to the routed pages
    #[arg(long, global = true, default_value_t = campus_scout::constants::DEFAULT_SEARCH_LIMIT)]
    search_limit: usize,
    /// Maximum number of pages scraped per question
    #[arg(long, global = true, default_value_t = campus_scout::constants::DEFAULT_MAX_PAGES)]
    max_pages: usize,
    /// Delay before every page request in milliseconds (rate limiting)
    #[arg(long, short, global = true, default_value_t = campus_scout::constants::DEFAULT_DELAY_MS)]
    delay: u64,
    /// Text extraction method: "selectors" (default) or "dom_smoothie"
    #[arg(long, global = true, default_value = "selectors")]
    extract_by: ExtractBy,
}

impl From<PipelineArgs> for Settings {
    fn from(args: PipelineArgs) -> Self {
        Settings {
            site: args.site,
            search_endpoint: args.search_endpoint,
            search_limit: args.search_limit,
            max_pages: args.max_pages,
            delay: Duration::from_millis(args.delay),
            extract_by: args.extract_by,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the pages a question would be answered from
    Route {
        /// The question to route
        query: String,
    },
    /// Scrape a single page and print its statistic guesses and text
    Scrape {
        /// The page URL
        url: String,
    },
    /// Scrape the routed pages for a question and print the merged payload as JSON
    Gather {
        /// The question to gather pages for
        query: String,
    },
    /// Answer questions with an LLM model; reads one question per line from stdin when none are given
    Ask {
        /// URL of the LLM model to use, e.g. openai://gpt-4o-mini
        model: String,
        /// Questions to answer in order
        questions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let settings = Settings::from(cli.pipeline);
    let fetcher = HttpFetcher::new()?;

    match cli.command {
        Command::Route { query } => {
            for url in route(&fetcher, &settings, &query).await {
                println!("{url}");
            }
            Ok(())
        }
        Command::Scrape { url } => {
            Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid page url: {}", e))?;
            let mut cache = PageCache::new();
            let page = fetch_page(&fetcher, &mut cache, &settings, &url).await;
            if let Some(error) = page.error {
                anyhow::bail!("Unable to scrape {url}: {error}");
            }
            for (stat, value) in &page.stats {
                println!("{stat}: {value}");
            }
            println!("{}", page.text);
            Ok(())
        }
        Command::Gather { query } => {
            let mut cache = PageCache::new();
            let payload = answer(&fetcher, &mut cache, &settings, &query).await;
            println!("{}", serde_json::to_string_pretty(&payload.to_json())?);
            Ok(())
        }
        Command::Ask { model, questions } => {
            handle_ask_command(&fetcher, &settings, &model, questions).await
        }
    }
}

fn build_llm(model: &str) -> Result<LLMBuilder> {
    let model_url = Url::parse(model).map_err(|e| anyhow::anyhow!("Invalid model URL: {}", e))?;
    let llm_builder = LLMBuilder::new()
        .backend(
            LLMBackend::from_str(model_url.scheme())
                .map_err(|e| anyhow::anyhow!("Invalid LLM backend: {}", e))?,
        )
        .model(
            [
                model_url
                    .host_str()
                    .context("Specify model name as host URL.")?,
                model_url.username(),
            ]
            .iter()
            .filter(|x| !x.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(":"),
        );

    Ok(match std::env::var(MODEL_API_KEY_ENV_NAME) {
        Ok(model_key) => {
            info!("API key is provided through {MODEL_API_KEY_ENV_NAME}");
            llm_builder.api_key(model_key)
        }
        Err(err) => {
            info!("{err} while providing api key");
            llm_builder
        }
    })
}

async fn handle_ask_command(
    fetcher: &HttpFetcher,
    settings: &Settings,
    model: &str,
    questions: Vec<String>,
) -> Result<()> {
    let model = build_llm(model)?
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))?;
    let mut cache = PageCache::new();

    if !questions.is_empty() {
        for question in &questions {
            answer_question(fetcher, &mut cache, settings, model.as_ref(), question).await;
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        answer_question(fetcher, &mut cache, settings, model.as_ref(), question).await;
    }

    Ok(())
}

/// Prints the answer to one question. An LLM failure is printed as an apology
/// so the next question can still be asked.
async fn answer_question(
    fetcher: &HttpFetcher,
    cache: &mut PageCache,
    settings: &Settings,
    model: &dyn ChatProvider,
    question: &str,
) {
    let payload = answer(fetcher, cache, settings, question).await;

    match synthesize(model, question, &payload).await {
        Ok(reply) => println!("{reply}\n"),
        Err(err) => {
            error!("Answer synthesis failed: {err:#}");
            println!(
                "Sorry, I encountered an error while searching Lafayette College information: {err}\n"
            );
        }
    }
}
