//! `taskweaver plan`: Generate a plan for one task.

use std::path::PathBuf;
use taskweaver_core::plan::PlanResult;
use taskweaver_planner::AssemblyReport;

use super::CliResult;

pub async fn run(
    task: String,
    select: Vec<String>,
    root: Option<PathBuf>,
    json: bool,
) -> CliResult<()> {
    let config = super::load_config()?;
    let root = super::project_root(&config, root.as_deref())?;
    let session = super::build_session(&config, root)?;

    eprint!("  Planning...");
    let run = match session.submit(&task, &select).await {
        Ok(run) => run,
        Err(e) => {
            eprint!("\r             \r");
            return Err(format!("Failed to generate plan: {e}").into());
        }
    };
    eprint!("\r             \r");

    print_report(&run.report);
    if json {
        println!("{}", serde_json::to_string_pretty(&run.plan)?);
    } else {
        print!("{}", render(&run.plan));
    }

    Ok(())
}

fn print_report(report: &AssemblyReport) {
    eprintln!("  Keywords:   {}", report.keywords.join(", "));
    eprintln!(
        "  Files:      {} candidates, {} loaded, {} unreadable",
        report.candidates, report.loaded_files, report.skipped_files
    );
    if report.failed_searches > 0 {
        eprintln!("  Searches:   {} failed", report.failed_searches);
    }
    if !report.dropped_selected_files.is_empty() {
        eprintln!("  Outside:    {}", report.dropped_selected_files.join(", "));
    }
    if !report.dropped_missing_files.is_empty() {
        eprintln!("  Ignored:    {}", report.dropped_missing_files.join(", "));
    }
    eprintln!();
}

/// Plain-text rendering of a plan.
fn render(plan: &PlanResult) -> String {
    let mut out = String::new();

    out.push_str("Implementation Plan\n===================\n\n");
    for step in &plan.steps {
        out.push_str(&format!("{}. {}\n", step.step_number, step.description));
        if let Some(snippet) = step.code_snippet.as_deref().filter(|s| !s.trim().is_empty()) {
            out.push_str("\n```\n");
            out.push_str(snippet.trim_end());
            out.push_str("\n```\n");
        }
        out.push('\n');
    }

    if !plan.dependencies.is_empty() {
        out.push_str("Dependencies\n------------\n");
        for dep in &plan.dependencies {
            out.push_str(&format!("- {dep}\n"));
        }
        out.push('\n');
    }

    if !plan.final_checklist.is_empty() {
        out.push_str("Final Checklist\n---------------\n");
        for item in &plan.final_checklist {
            out.push_str(&format!("[ ] {item}\n"));
        }
        out.push('\n');
    }

    if plan.show_missing_information || plan.has_missing_information() {
        out.push_str("Missing Information\n-------------------\n");
        if plan.has_missing_information() {
            out.push_str(plan.missing_information.trim());
            out.push('\n');
        } else {
            out.push_str("No project files were found, so the plan is not grounded in your code.\n");
        }
        if !plan.suggested_files.is_empty() {
            out.push_str("\nSuggested files:\n");
            for file in &plan.suggested_files {
                out.push_str(&format!("- {file}\n"));
            }
        }
        out.push('\n');
    }

    out
}
