//! CLI entry point - the composition root.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use toolbridge_cli::handlers::browser::ScreenshotArgs;
use toolbridge_cli::{Cli, Commands, bootstrap, exit_code, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = bootstrap(&cli)?;

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Servers => handlers::servers::execute(&ctx)?,
        Commands::Invoke {
            server,
            capability,
            args,
        } => handlers::invoke::execute(&ctx, &server, &capability, &args).await?,
        Commands::Navigate { url, wait_until } => {
            handlers::browser::navigate(&ctx, url, wait_until).await?;
        }
        Commands::Click {
            selector,
            wait_for_navigation,
            delay_ms,
        } => handlers::browser::click(&ctx, selector, wait_for_navigation, delay_ms).await?,
        Commands::Fill { selector, text } => handlers::browser::fill(&ctx, selector, text).await?,
        Commands::Screenshot {
            path,
            full_page,
            format,
            quality,
        } => {
            let args = ScreenshotArgs {
                path,
                full_page,
                format,
                quality,
            };
            handlers::browser::screenshot(&ctx, args).await?;
        }
        Commands::Docs {
            query,
            framework,
            max_results,
        } => handlers::docs::execute(&ctx, query, framework, max_results).await?,
        Commands::Route { requests, batch } => handlers::route::execute(requests, batch).await?,
        Commands::Demo {
            screenshot_path,
            url,
        } => handlers::demo::execute(&ctx, url, screenshot_path).await?,
    }

    Ok(())
}
