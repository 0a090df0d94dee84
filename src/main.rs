use clap::Parser;
use color_eyre::eyre::bail;
use color_eyre::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

use bim_diff::diff::{compare_snapshots, Analysis};
use bim_diff::export::{
    export_diff_csv, export_json, export_sources_csv, export_summary_csv, DiffReport,
};
use bim_diff::model::Snapshot;
use bim_diff::summary::{render_report, tally, tally_by_category};
use bim_diff::ui::multi_select;

const RESULTS_FILENAME: &str = "model_comparison_results.csv";
const SUMMARY_FILENAME: &str = "model_comparison_summary_by_category.csv";

const ANALYSIS_ITEMS: [(&str, &str); 3] = [
    ("xyz", "XYZ deviation"),
    ("params", "Parameter value change"),
    ("elements", "Newly/deleted elements"),
];

#[derive(Parser, Debug)]
#[command(name = "bim-diff")]
#[command(about = "BIM Diff - compare two model snapshots and export change reports")]
#[command(version)]
struct Args {
    /// Path to the PREVIOUS snapshot (JSON)
    previous: PathBuf,

    /// Path to the CURRENT snapshot (JSON)
    current: PathBuf,

    /// Restrict the comparison to these categories (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "CATEGORY")]
    categories: Vec<String>,

    /// Compare every category present in either snapshot
    #[arg(long, conflicts_with = "categories")]
    all_categories: bool,

    /// Analysis items to run: xyz, params, elements (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "ITEM")]
    analysis: Vec<String>,

    /// Directory the CSV reports are written to
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    out_dir: PathBuf,

    /// Export the full report to JSON (optional output path)
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Export a part-to-source-element CSV for the current snapshot
    #[arg(long, value_name = "FILE")]
    sources: Option<PathBuf>,

    /// Suppress the terminal summary printout
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut previous = Snapshot::load(&args.previous)?;
    let mut current = Snapshot::load(&args.current)?;

    let Some(categories) = select_categories(&args, &previous, &current)? else {
        println!("No categories selected.");
        return Ok(());
    };
    previous.retain_categories(&categories);
    current.retain_categories(&categories);

    let Some(analysis) = select_analysis(&args)? else {
        println!("No analysis items selected.");
        return Ok(());
    };

    let compare_date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let entries = compare_snapshots(&previous, &current, analysis, &compare_date);

    if let Some(sources_path) = &args.sources {
        export_sources_csv(&current, sources_path)?;
        println!("Source resolution exported to: {}", sources_path.display());
    }

    if entries.is_empty() {
        println!("No model comparison results to export.");
        return Ok(());
    }

    std::fs::create_dir_all(&args.out_dir)?;
    let results_path = args.out_dir.join(RESULTS_FILENAME);
    export_diff_csv(&entries, &results_path)?;
    println!("Comparison results exported to: {}", results_path.display());

    let total = tally(&entries);
    let categories_summary = tally_by_category(&entries);
    let summary_path = args.out_dir.join(SUMMARY_FILENAME);
    export_summary_csv(&categories_summary, &summary_path)?;
    println!("Summary by category exported to: {}", summary_path.display());

    if let Some(json_path) = &args.json {
        let report = DiffReport {
            previous_document: &previous.document,
            current_document: &current.document,
            compare_date: &compare_date,
            entries: &entries,
            summary: &total,
            categories: &categories_summary,
        };
        export_json(&report, json_path)?;
        println!("Report exported to JSON: {}", json_path.display());
    }

    if !args.quiet {
        println!("\n{}", render_report(&total, &categories_summary));
    }

    Ok(())
}

/// Resolves the category filter: explicit flags first, interactive
/// checklist otherwise. `None` means the user cancelled.
fn select_categories(
    args: &Args,
    previous: &Snapshot,
    current: &Snapshot,
) -> Result<Option<BTreeSet<String>>> {
    let mut universe = previous.categories();
    universe.extend(current.categories());

    if !args.categories.is_empty() {
        return Ok(Some(args.categories.iter().cloned().collect()));
    }
    if args.all_categories {
        return Ok(Some(universe));
    }

    let picked = multi_select(
        "Select Categories",
        universe.into_iter().collect(),
        false,
    )?;
    match picked {
        Some(names) if !names.is_empty() => Ok(Some(names.into_iter().collect())),
        _ => Ok(None),
    }
}

/// Resolves the analysis items the same way. `None` means cancelled.
fn select_analysis(args: &Args) -> Result<Option<Analysis>> {
    let picked: Vec<String> = if args.analysis.is_empty() {
        let labels = ANALYSIS_ITEMS.map(|(_, label)| label.to_string());
        match multi_select("Select Analysis Items", labels.to_vec(), true)? {
            Some(labels) if !labels.is_empty() => labels,
            _ => return Ok(None),
        }
    } else {
        args.analysis.clone()
    };

    let mut analysis = Analysis {
        position: false,
        parameters: false,
        existence: false,
    };
    for item in &picked {
        match item.as_str() {
            "xyz" | "XYZ deviation" => analysis.position = true,
            "params" | "Parameter value change" => analysis.parameters = true,
            "elements" | "Newly/deleted elements" => analysis.existence = true,
            other => bail!("unknown analysis item '{other}' (expected xyz, params or elements)"),
        }
    }
    Ok(Some(analysis))
}
