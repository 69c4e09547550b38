//! sleeve CLI - plan and place wall openings from the command line.
//!
//! Projects are JSON snapshots of the open documents; placement runs
//! against an in-memory host whose result is written back as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use sleeve::{MemoryHost, PlanSettings, Project, RunKind};

#[derive(Parser)]
#[command(name = "sleeve")]
#[command(about = "Wall opening placement for duct and pipe runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan openings without placing anything
    Plan {
        /// Project file with the open documents
        project: PathBuf,
        /// Placement settings file (JSON), defaults when omitted
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Write the planned instructions as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Title substring of the document to treat as active (default: first)
        #[arg(long)]
        arch: Option<String>,
    },
    /// Place openings and write the resulting instances
    Place {
        /// Project file with the open documents
        project: PathBuf,
        /// Output file for the placed instances (JSON)
        output: PathBuf,
        /// Placement settings file (JSON), defaults when omitted
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Title substring of the document to treat as active (default: first)
        #[arg(long)]
        arch: Option<String>,
    },
    /// Display information about a project file
    Info {
        /// Path to the project file
        project: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            project,
            settings,
            output,
            arch,
        } => plan(&project, settings.as_ref(), output.as_ref(), arch.as_deref()),
        Commands::Place {
            project,
            output,
            settings,
            arch,
        } => place(&project, &output, settings.as_ref(), arch.as_deref()),
        Commands::Info { project } => show_info(&project),
    }
}

fn load_project(path: &PathBuf, arch: Option<&str>) -> Result<Project> {
    let json = fs::read_to_string(path)?;
    let mut project = Project::from_json(&json)?;

    // The pipeline treats the first document as the active one; --arch
    // moves the matching document to the front.
    if let Some(marker) = arch {
        let index = project
            .documents
            .iter()
            .position(|d| d.title.contains(marker))
            .ok_or_else(|| anyhow::anyhow!("no open document titled with '{marker}'"))?;
        project.documents.swap(0, index);
    }

    Ok(project)
}

fn load_settings(path: Option<&PathBuf>) -> Result<PlanSettings> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        }
        None => Ok(PlanSettings::default()),
    }
}

fn plan(
    project: &PathBuf,
    settings: Option<&PathBuf>,
    output: Option<&PathBuf>,
    arch: Option<&str>,
) -> Result<()> {
    let project = load_project(project, arch)?;
    let settings = load_settings(settings)?;

    let outcome = sleeve::plan_openings(&project, &settings)?;

    println!(
        "Planned {} opening(s) across {} run(s), {} skipped",
        outcome.instructions.len(),
        outcome.planned_runs,
        outcome.skipped_runs
    );
    for instruction in &outcome.instructions {
        println!(
            "  run {} -> wall {} at ({:.3}, {:.3}, {:.3}), size {:.3}",
            instruction.run,
            instruction.wall,
            instruction.location.x,
            instruction.location.y,
            instruction.location.z,
            instruction.width
        );
    }

    if let Some(output) = output {
        let json = serde_json::to_string_pretty(&outcome.instructions)?;
        fs::write(output, json)?;
        println!("Wrote instructions to {}", output.display());
    }

    Ok(())
}

fn place(
    project: &PathBuf,
    output: &PathBuf,
    settings: Option<&PathBuf>,
    arch: Option<&str>,
) -> Result<()> {
    let project = load_project(project, arch)?;
    let settings = load_settings(settings)?;

    let Some(active) = project.documents.first() else {
        anyhow::bail!("project has no open documents");
    };
    let mut host = MemoryHost::from_document(active);

    let report = sleeve::place_openings(&project, &settings, &mut host)?;

    println!(
        "Placed {} opening(s): {} for ducts, {} for pipes",
        report.placed, report.ducts, report.pipes
    );
    println!(
        "Runs planned: {}, skipped: {}",
        report.planned_runs, report.skipped_runs
    );

    let json = serde_json::to_string_pretty(host.instances())?;
    fs::write(output, json)?;
    println!("Wrote placed instances to {}", output.display());

    Ok(())
}

fn show_info(path: &PathBuf) -> Result<()> {
    let project = load_project(path, None)?;

    println!("sleeve project: {}", path.display());
    println!("  Documents: {}", project.documents.len());

    for doc in &project.documents {
        let ducts = doc.runs.iter().filter(|r| r.kind == RunKind::Duct).count();
        let pipes = doc.runs.iter().filter(|r| r.kind == RunKind::Pipe).count();
        let linked_walls: usize = doc.links.iter().map(|l| l.walls.len()).sum();

        println!("\n  {}", doc.title);
        println!("    Levels: {}", doc.levels.len());
        println!("    Walls: {} (+{} linked)", doc.walls.len(), linked_walls);
        println!("    Runs: {} ({} ducts, {} pipes)", doc.runs.len(), ducts, pipes);
        println!("    Templates: {}", doc.templates.len());
        println!("    Views: {}", doc.views.len());
    }

    Ok(())
}
