use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

use agents::{Agent, AgentOutput};
use domain::{LearningPathStep, PathRequest, TelegramUserId, TranslationRequest, UserOnboardingInput};
use server::{AppContext, PathRun, Settings, StageOutcome};

/// Madrasa - learning paths for recruiters
#[derive(Parser)]
#[command(name = "madrasa")]
#[command(about = "Learning-path generation and translation for the Madrasa mini-app", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP backend
    Serve,

    /// Generate a learning path for one user
    GeneratePath {
        /// Telegram user id the path is generated for
        #[arg(long, default_value = "1")]
        user_id: TelegramUserId,

        /// Persona, e.g. "recruiter"
        #[arg(long, default_value = "")]
        persona: String,

        /// Learning goal (repeatable)
        #[arg(long = "goal", required = true)]
        goals: Vec<String>,

        /// JSON file with parsed LinkedIn profile data
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Show what each pipeline stage did
        #[arg(long)]
        explain: bool,
    },

    /// Translate a piece of text
    Translate {
        /// Text to translate
        #[arg(long)]
        text: String,

        /// Target language code
        #[arg(long, default_value = "en")]
        target: String,

        /// Source language code (auto-detected when omitted)
        #[arg(long)]
        source: Option<String>,
    },

    /// Run benchmark to test pipeline latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "20")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "4")]
        concurrent: usize,
    },
}

/// Goals the benchmark draws from
const BENCHMARK_GOALS: [&str; 6] = [
    "sourcing",
    "boolean search",
    "employer branding",
    "candidate outreach",
    "interviewing",
    "talent mapping",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve => "info",
        _ => "warn",
    };
    server::init_tracing(default_filter);

    debug!("Settings: {:?}", cli.settings);
    let context = AppContext::from_settings(&cli.settings)?;

    match cli.command {
        Commands::Serve => server::serve(&cli.settings, context).await?,
        Commands::GeneratePath {
            user_id,
            persona,
            goals,
            profile,
            explain,
        } => {
            let request = build_request(user_id, persona, goals, profile.as_deref())?;
            handle_generate_path(&context, &request, explain).await?
        }
        Commands::Translate {
            text,
            target,
            source,
        } => handle_translate(&context, text, target, source).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(context, requests, concurrent).await?,
    }

    Ok(())
}

/// Validate CLI input exactly as the HTTP boundary would
fn build_request(
    user_id: TelegramUserId,
    persona: String,
    goals: Vec<String>,
    profile: Option<&Path>,
) -> Result<PathRequest> {
    let linkedin_profile_data = profile
        .map(|path| -> Result<serde_json::Value> {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Profile file {} is not valid JSON", path.display()))
        })
        .transpose()?;

    let request = PathRequest::try_from(UserOnboardingInput {
        telegram_user_info: None,
        telegram_user_id: Some(user_id),
        persona,
        goals,
        linkedin_profile_data,
    })?;
    Ok(request)
}

/// Handle the 'generate-path' command
async fn handle_generate_path(context: &AppContext, request: &PathRequest, explain: bool) -> Result<()> {
    let start = Instant::now();
    let run = context
        .orchestrator
        .generate_learning_path_with_report(request)
        .await;

    if explain {
        print_stages(&run);
    }

    let path = run.outcome?;
    print_learning_path(&path);
    println!(
        "{} Generated {} steps in {:?}",
        "✓".green(),
        path.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'translate' command
async fn handle_translate(
    context: &AppContext,
    text: String,
    target: String,
    source: Option<String>,
) -> Result<()> {
    let mut request = TranslationRequest::new(text.clone(), target);
    if let Some(source) = source {
        request = request.with_source(source);
    }

    let result = context.translator.process(request).await;
    if let Some(err) = result.error() {
        println!("{} {}", "Translation failed:".red(), err);
        println!("{}", text);
        return Ok(());
    }

    println!("{}", result.translated_text);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(context: AppContext, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    // Random single-goal requests drawn from the benchmark pool
    let request_set = (0..requests)
        .map(|i| {
            let goal = BENCHMARK_GOALS[rand::random::<u32>() as usize % BENCHMARK_GOALS.len()];
            PathRequest::new(i as TelegramUserId + 1, "recruiter", vec![goal.to_string()])
        })
        .collect::<Result<Vec<_>, _>>()?;

    println!(
        "Running {} requests with concurrency {}...",
        requests,
        concurrent.max(1)
    );
    let wall_clock = Instant::now();

    let mut handles = Vec::with_capacity(requests);
    for request in request_set {
        let orchestrator = context.orchestrator.clone();
        let permits = permits.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            let outcome = orchestrator.generate_learning_path(&request).await;
            Ok::<_, anyhow::Error>((start.elapsed(), outcome.is_ok()))
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    let mut failures = 0usize;
    for handle in handles {
        let (elapsed, ok) = handle.await??;
        if !ok {
            failures += 1;
        }
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let sum: Duration = timings.iter().sum();
    let avg_latency = sum / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Failures: {}", failures);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_stages(run: &PathRun) {
    println!("{}", "Pipeline stages:".bold().blue());
    for report in &run.stages {
        let outcome = match report.outcome {
            StageOutcome::Ok => report.outcome.as_str().green(),
            StageOutcome::Skipped => report.outcome.as_str().dimmed(),
            StageOutcome::Degraded => report.outcome.as_str().yellow(),
            StageOutcome::Failed => report.outcome.as_str().red(),
        };
        println!(
            "  {:<18} {:<9} {:>8.1}ms  {}",
            report.stage.as_str(),
            outcome,
            report.elapsed.as_secs_f64() * 1000.0,
            report.detail.as_deref().unwrap_or("")
        );
    }
}

fn print_learning_path(path: &[LearningPathStep]) {
    println!("{}", "Learning Path:".bold().blue());
    if path.is_empty() {
        println!("  (no videos found for these goals)");
        return;
    }
    for step in path {
        println!(
            "{}. {} [module {}]",
            step.step.to_string().green(),
            step.title,
            step.module
        );
        println!("   https://www.youtube.com/watch?v={}", step.video_id);
    }
}
