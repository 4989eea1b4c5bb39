use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use mazecarve::{
    app::{App, RunStatus, render_ascii},
    config::Config,
    generators::Outcome,
};

/// Logs go to a file since the terminal is taken by the animation.
fn init_tracing(config: &Config) -> anyhow::Result<WorkerGuard> {
    let dir = match config.log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => std::path::Path::new("."),
    };
    let file_name = config
        .log_file
        .file_name()
        .context("log file path has no file name")?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let _guard = init_tracing(&config)?;

    // Bad dimensions fail here, before the terminal switches to raw mode.
    let mut grid = config.build_grid().context("failed to build grid")?;
    tracing::info!(?config, "Starting");

    if config.headless {
        let report = App::run_headless(&mut grid, &config)?;
        if let Some(picture) = render_ascii(&grid) {
            println!("{picture}");
        }
        println!(
            "{} on {} {}x{}: {} tree walls and {} loop walls removed",
            config.generator,
            config.shape,
            config.width,
            config.height,
            report.tree_walls_removed,
            report.loop_walls_removed
        );
        if let Outcome::Disconnected { reached, total } = report.outcome {
            println!("Warning: grid is disconnected, the tree reaches {reached} of {total} cells");
        }
        return Ok(());
    }

    let app = App::new(config.step_delay());
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let status = app.run(&mut stdout, &mut grid, &config);
    App::restore_terminal(&mut stdout)?;

    match status? {
        RunStatus::Finished(outcome) => tracing::info!(?outcome, "Finished"),
        RunStatus::Cancelled => println!("Cancelled."),
    }
    Ok(())
}
