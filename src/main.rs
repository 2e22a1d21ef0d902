use std::io::{self, Write};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use abaco::auth::KeyLoader;
use abaco::banner::{BannerInfo, print_banner, print_farewell};
use abaco::commands::{CommandRegistry, CommandResult, SessionInfo};
use abaco::config::Settings;
use abaco::engine::Calculator;
use abaco::error::EvalError;
use abaco::sanitize::Evaluation;
use abaco::spinner::Spinner;
use abaco::thinker::openai::OpenAiThinker;
use abaco::typeset::CommandTypesetter;

#[derive(Parser)]
#[command(name = "abaco", version, about = "Arithmetic, answered in words.")]
struct Cli {
    /// Key-storage endpoint that returns the completion API key
    #[arg(long)]
    key_url: Option<String>,

    /// Completion endpoint (OpenAI Responses API)
    #[arg(long)]
    completion_url: Option<String>,

    /// Model name
    #[arg(short, long)]
    model: Option<String>,

    /// Program that renders the returned LaTeX, read from its stdin
    #[arg(long)]
    render_with: Option<String>,

    /// Evaluate a single operation and exit (non-interactive)
    #[arg(short, long)]
    run: Option<String>,

    /// Write developer diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::from_overrides(cli.key_url, cli.completion_url, cli.model);

    let loader = KeyLoader::new(settings.key_url.clone());
    let thinker = Box::new(OpenAiThinker::new(
        settings.completion_url.clone(),
        settings.model.clone(),
    ));
    let mut calc = Calculator::new(loader, thinker);
    if let Some(program) = cli.render_with {
        calc = calc.with_typesetter(Box::new(CommandTypesetter::new(program)));
    }

    // Single operation mode
    if let Some(operation) = cli.run {
        let result = evaluate(&mut calc, &operation).await;
        print!("{}", calc.display().render());
        if result.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    print_banner(&BannerInfo {
        model: &settings.model,
        key_url: &settings.key_url,
        completion_url: &settings.completion_url,
        typesetter: calc.typesetter_name(),
    });

    let registry = CommandRegistry::new();
    let mut evaluations = 0;

    // REPL: async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nabaco> ");
        io::stdout().flush()?;

        // Read next line, interruptible by Ctrl+C
        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let info = SessionInfo::from_calculator(&calc);
        match registry.dispatch(&line, &info).await {
            CommandResult::NotACommand => {}
            CommandResult::Handled => continue,
            CommandResult::Clear => {
                calc.reset();
                print!("{}", calc.display().render());
                continue;
            }
            CommandResult::Quit => break,
        }

        // Ctrl+C during an evaluation cancels it, not the REPL
        let outcome = tokio::select! {
            result = evaluate(&mut calc, &line) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };

        match outcome {
            Some(Ok(_)) => evaluations += 1,
            Some(Err(_)) => {}
            None => {
                println!("\n\ninterrupted");
                calc.interrupt();
            }
        }
        print!("{}", calc.display().render());
    }

    print_farewell(evaluations);
    Ok(())
}

/// One evaluation with a spinner following its stages.
async fn evaluate(calc: &mut Calculator, line: &str) -> Result<Evaluation, EvalError> {
    let spinner = Spinner::start("evaluating", calc.subscribe());
    let result = calc.evaluate(line).await;
    spinner.stop().await;
    result
}

/// Diagnostics go to stderr and stay silent unless asked for.
fn init_tracing(verbose: bool) {
    let default = if verbose { "abaco=debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
