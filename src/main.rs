use clap::{Parser, ValueEnum};
use color_eyre::Result;
use std::path::PathBuf;

use rab_estimator::catalog::load_project_file;
use rab_estimator::engine::{derive, prune, rab};
use rab_estimator::export::{export_csv, export_json, RabDocument};
use rab_estimator::ui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Ballpark,
    Estimates,
    Detail,
}

#[derive(Parser, Debug)]
#[command(name = "rab-estimator")]
#[command(about = "RAB Estimator - browse WBS cost trees and RAB projections")]
#[command(version)]
struct Args {
    /// Path to project file (JSON)
    #[arg(required = true)]
    file: PathBuf,

    /// Pricing mode used for exports
    #[arg(long, value_enum, default_value_t = Mode::Ballpark)]
    mode: Mode,

    /// Truncate exported trees to this depth (roots at 0)
    #[arg(long, value_name = "DEPTH")]
    depth: Option<usize>,

    /// Export to CSV (optional output path)
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export to JSON (optional output path)
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let project = load_project_file(&args.file)?;

    if args.csv.is_some() || args.json.is_some() {
        let ballpark = project.ballpark_tree();
        let context = project.pricing_context();

        let (priced, grand_total) = match args.mode {
            Mode::Ballpark => {
                let priced = rab::project_ballpark(&ballpark, &context, &project.overrides);
                let total = rab::total_project_cost_ballpark(&priced, context.area);
                (priced, total)
            }
            Mode::Estimates | Mode::Detail => {
                let estimates = project.estimates_tree(&ballpark);
                let tree = if args.mode == Mode::Detail {
                    derive::derive_detail(&estimates)
                } else {
                    estimates
                };
                let priced = rab::project_estimate(
                    &tree,
                    &context,
                    &project.estimate_values,
                    &project.assignments,
                    &project.ahsp,
                    &project.resources,
                );
                let total = rab::total_project_cost_estimate(&priced);
                (priced, total)
            }
        };

        let exported = match args.depth {
            Some(depth) => prune::prune(&priced, depth),
            None => priced,
        };

        if let Some(csv_path) = &args.csv {
            export_csv(&exported, csv_path)?;
            println!("Exported to CSV: {}", csv_path.display());
        }

        if let Some(json_path) = &args.json {
            let document = RabDocument::new(&project.name, &context, grand_total, &exported);
            export_json(&document, json_path)?;
            println!("Exported to JSON: {}", json_path.display());
        }

        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(project).run(terminal);
    ratatui::restore();
    result
}
