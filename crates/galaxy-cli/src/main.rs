use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand};
use console::Term;
use galaxy_bus::{EventBus, Topic};
use galaxy_core::*;
use galaxy_schema::{
    ActivityCategory, AlertSeverity, AlertSource, AlertStatus, BusMessage, Dataset, ReportSource,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod render;

#[derive(Parser)]
#[command(name = "galaxy", version, about = "Ask Galaxy AI laboratory assistant")]
struct Cli {
    #[arg(
        long,
        default_value = "~/.galaxy",
        help = "Config root directory (contains config/ and logs/)"
    )]
    config_root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Interactive Ask Galaxy AI session")]
    Chat {
        #[arg(long, short = 'd', help = "Dataset to start with (label or slug)")]
        dataset: Option<Dataset>,
    },
    #[command(about = "Ask a single question and print the response")]
    Ask {
        #[arg(required = true, help = "Query text")]
        query: Vec<String>,
        #[arg(long, short = 'd', help = "Dataset (label or slug)")]
        dataset: Option<Dataset>,
        #[arg(long, help = "Print the turn as JSON")]
        json: bool,
        #[arg(long, help = "Skip the simulated thinking delay")]
        instant: bool,
    },
    #[command(about = "List selectable datasets")]
    Datasets,
    #[command(about = "List use cases, or one use case's suggested prompts")]
    UseCases {
        #[arg(help = "Use case ID")]
        id: Option<String>,
    },
    #[command(about = "List alerts with status tab counts")]
    Alerts {
        #[arg(long, help = "New, Unresolved or Resolved")]
        status: Option<AlertStatus>,
        #[arg(long, help = "Critical, Medium or Info")]
        severity: Option<AlertSeverity>,
        #[arg(long, help = "System, Integration or User")]
        source: Option<AlertSource>,
        #[arg(long, default_value = "", help = "Search title, description and category")]
        search: String,
    },
    #[command(about = "Page through the activity log")]
    Activity {
        #[arg(long, default_value = "", help = "Search action and description")]
        search: String,
        #[arg(long, help = "Data, Analysis, Report, Document or Security")]
        category: Option<ActivityCategory>,
        #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
        page: usize,
    },
    #[command(about = "List reports")]
    Reports {
        #[arg(long, default_value = "", help = "Search report titles")]
        search: String,
        #[arg(long, help = "Only reports carrying this tag")]
        tag: Option<String>,
        #[arg(long, help = "ai or manual")]
        creator: Option<ReportSource>,
    },
    #[command(about = "Validate config files")]
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Expand ~ to home directory
    if cli.config_root.starts_with("~") {
        if let Some(home) = std::env::var_os("HOME") {
            cli.config_root = PathBuf::from(home).join(
                cli.config_root
                    .strip_prefix("~")
                    .unwrap_or(&cli.config_root),
            );
        }
    }

    let log_dir = cli.config_root.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "galaxy.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(LevelFilter::WARN),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config_dir = cli.config_root.join("config");
    let term = Term::stdout();

    match command {
        Commands::Validate => {
            let config = load_config(&config_dir)?;
            println!(
                "Config valid. delay={}ms, submit_while_pending={}, fallback_dataset={:?}, default_dataset={}.",
                config.response_delay_ms,
                config.submit_while_pending,
                config.fallback_dataset,
                config.default_dataset,
            );
        }
        Commands::Datasets => {
            let config = load_config(&config_dir)?;
            render::print_datasets(&term, config.default_dataset);
        }
        Commands::UseCases { id } => match id {
            Some(id) => {
                let use_case =
                    find_use_case(&id).ok_or_else(|| anyhow!("use case not found: {id}"))?;
                render::print_use_case(&term, use_case);
            }
            None => render::print_use_cases(&term, USE_CASES),
        },
        Commands::Ask {
            query,
            dataset,
            json,
            instant,
        } => {
            let mut config = load_config(&config_dir)?;
            if instant {
                config.response_delay_ms = 0;
            }
            run_ask(&term, config, &query.join(" "), dataset, json).await?;
        }
        Commands::Alerts {
            status,
            severity,
            source,
            search,
        } => {
            let alerts = sample_alerts();
            let filter = AlertFilter {
                status,
                severity,
                source,
                search,
            };
            render::print_alerts(
                &term,
                &StatusCounts::tally(&alerts),
                status,
                &filter_alerts(&alerts, &filter),
            );
        }
        Commands::Activity {
            search,
            category,
            page,
        } => {
            let activities = sample_activities();
            let filtered = filter_activities(&activities, &ActivityFilter { search, category });
            render::print_activity_page(&term, &paginate(&filtered, page, ITEMS_PER_PAGE));
        }
        Commands::Reports {
            search,
            tag,
            creator,
        } => {
            let reports = sample_reports();
            let filter = ReportFilter {
                search,
                tag,
                creator,
            };
            render::print_reports(&term, &filter_reports(&reports, &filter));
        }
        Commands::Chat { dataset } => {
            run_repl(&term, &config_dir, dataset).await?;
        }
    }

    Ok(())
}

fn bootstrap(config: AssistantConfig) -> (Assistant, EventBus) {
    let bus = EventBus::new(config.bus_capacity);
    let assistant = Assistant::new(config, QueryResponder::new(), bus.publisher());
    (assistant, bus)
}

async fn run_ask(
    term: &Term,
    config: AssistantConfig,
    query: &str,
    dataset: Option<Dataset>,
    json: bool,
) -> Result<()> {
    let (assistant, _bus) = bootstrap(config);
    if let Some(dataset) = dataset {
        assistant.select_dataset(dataset).await?;
    }

    let turn = assistant.ask(query).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&turn)?);
        return Ok(());
    }

    render::print_turn(term, 1, &turn);
    if let Ok(view) = assistant.open_canvas(turn.id).await {
        render::print_canvas(term, &view);
    }
    Ok(())
}

async fn run_repl(term: &Term, config_dir: &Path, dataset: Option<Dataset>) -> Result<()> {
    let config = load_config(config_dir)?;
    let (assistant, bus) = bootstrap(config);
    if let Some(dataset) = dataset {
        assistant.select_dataset(dataset).await?;
    }

    // Responses land whenever their delay elapses, so print them from the bus.
    let mut ready = bus.subscribe(Topic::ResponseReady).await;
    let printer = assistant.clone();
    let printer_term = term.clone();
    tokio::spawn(async move {
        while let Some(msg) = ready.recv().await {
            let BusMessage::ResponseReady { turn_id, .. } = msg else {
                continue;
            };
            let transcript = printer.transcript().await;
            if let Some(pos) = transcript.iter().position(|t| t.id == turn_id) {
                render::print_turn(&printer_term, pos + 1, &transcript[pos]);
            }
        }
    });

    render::print_banner(term, assistant.selected_dataset().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input == "quit" || input == "exit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            if let Err(err) = handle_slash_command(term, &assistant, command).await {
                eprintln!("Error: {err}");
            }
            continue;
        }

        match assistant.submit(input).await {
            Ok(_) => println!("Galaxy AI is thinking..."),
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    Ok(())
}

async fn handle_slash_command(term: &Term, assistant: &Assistant, command: &str) -> Result<()> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match name {
        "help" => render::print_help(term),
        "datasets" => render::print_datasets(term, assistant.selected_dataset().await),
        "dataset" => {
            if rest.is_empty() {
                println!("Dataset: {}", assistant.selected_dataset().await);
            } else {
                let dataset: Dataset = rest.join(" ").parse()?;
                assistant.select_dataset(dataset).await?;
                println!("Dataset set to {dataset}.");
            }
        }
        "usecases" => match rest.first() {
            Some(id) => {
                let use_case =
                    find_use_case(id).ok_or_else(|| anyhow!("use case not found: {id}"))?;
                render::print_use_case(term, use_case);
            }
            None => render::print_use_cases(term, USE_CASES),
        },
        "prompt" => {
            let [id, number] = rest.as_slice() else {
                return Err(anyhow!("usage: /prompt <use case id> <n>"));
            };
            let number: usize = number.parse()?;
            let prompt = suggested_prompt(id, number)
                .ok_or_else(|| anyhow!("no prompt {number} for use case {id}"))?;
            println!("> {prompt}");
            assistant.submit(prompt).await?;
            println!("Galaxy AI is thinking...");
        }
        "history" => render::print_history(term, &assistant.transcript().await),
        "open" => {
            let number: usize = rest
                .first()
                .ok_or_else(|| anyhow!("usage: /open <n>"))?
                .parse()?;
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow!("turn numbers start at 1"))?;
            let turn = assistant
                .turn_at(index)
                .await
                .ok_or_else(|| anyhow!("no turn {number}"))?;
            let view = assistant.open_canvas(turn.id).await?;
            render::print_canvas(term, &view);
        }
        "close" => match assistant.close_canvas().await? {
            Some(_) => println!("Canvas closed."),
            None => println!("Canvas was not open."),
        },
        other => return Err(anyhow!("unknown command: /{other} (try /help)")),
    }
    Ok(())
}
