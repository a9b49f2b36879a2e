//! Watertight - command line host for the mesh topology checker
//!
//! Loads a JSON scene, runs a check over every object, and optionally
//! selects and steps through one category of problems on one object.
//!
//! # Examples
//!
//! - `watertight scene.json` - print the report
//! - `watertight scene.json --select boundary --object tri --step next --times 2`
//! - `watertight scene.json --json` - one protocol message per line

mod config;
mod convert;
mod selection;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use watertight_ipc::{CheckerToUi, ProblemKind, StepDirection, UiToChecker};

use session::Session;

/// Check polygon meshes for watertightness
#[derive(Parser)]
#[command(name = "watertight")]
#[command(about = "Report why meshes are not closed manifold surfaces", long_about = None)]
#[command(version)]
struct Cli {
    /// Scene file (JSON)
    #[arg(name = "SCENE")]
    scene: PathBuf,

    /// Checker configuration (JSON); environment overrides still apply
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not select problem elements after the check
    #[arg(long)]
    no_select: bool,

    /// Select all problems of a category (boundary, loose, non_manifold, normals)
    #[arg(long, requires = "object")]
    select: Option<ProblemKind>,

    /// Object the selection and steps apply to
    #[arg(long)]
    object: Option<String>,

    /// Step through the selected category
    #[arg(long, requires = "select")]
    step: Option<StepDirection>,

    /// Number of steps
    #[arg(long, default_value_t = 1, requires = "step")]
    times: usize,

    /// Print protocol messages as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if cli.no_select {
        config.select_problems = false;
    }

    let text = std::fs::read_to_string(&cli.scene)
        .with_context(|| format!("reading scene {}", cli.scene.display()))?;
    let scene = watertight_ipc::parse_scene(&text)
        .with_context(|| format!("parsing scene {}", cli.scene.display()))?;
    info!(
        "Loaded {} objects from {}",
        scene.objects.len(),
        cli.scene.display()
    );

    let mut session = Session::new(scene, config);
    session.handle(UiToChecker::CheckWatertight { object_ids: vec![] });

    if let (Some(category), Some(object_id)) = (cli.select, cli.object.clone()) {
        session.handle(UiToChecker::SelectProblems {
            object_id: object_id.clone(),
            category,
        });
        if let Some(direction) = cli.step {
            for _ in 0..cli.times {
                session.handle(UiToChecker::StepProblem {
                    object_id: object_id.clone(),
                    direction,
                });
            }
        }
    }

    for message in session.drain() {
        if cli.json {
            println!("{}", watertight_ipc::encode(&message)?);
        } else {
            print_message(&message);
        }
    }

    Ok(())
}

fn print_message(message: &CheckerToUi) {
    match message {
        CheckerToUi::ReportUpdated { lines, .. } => {
            for line in lines {
                println!("{}", line);
            }
        }
        CheckerToUi::ProblemsSelected {
            object_id,
            category,
            count,
        } => println!("Selected {} {} problems on {}", count, category, object_id),
        CheckerToUi::ProblemFocused {
            object_id,
            category,
            element,
            position,
            total,
        } => println!(
            "{} {}/{} on {}: {}",
            category, position, total, object_id, element
        ),
        CheckerToUi::Info { message } => println!("info: {}", message),
    }
}
