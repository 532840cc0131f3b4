//! Verify command implementation.

use crate::artifact::{ArtifactPaths, ArtifactSet};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the verify command.
pub fn run_verify(output_dir: Option<String>, mut settings: Settings) -> Result<()> {
    if let Some(dir) = output_dir {
        settings.output.output_dir = dir;
    }

    let paths = ArtifactPaths::new(settings.boolean_index_path(), settings.vector_data_path());
    Output::info(&format!("Verifying artifacts in {}", settings.output_dir().display()));

    let spinner = Output::spinner("Loading artifacts...");
    let set = ArtifactSet::load(&paths);
    spinner.finish_and_clear();
    let set = match set {
        Ok(set) => set,
        Err(e) => {
            Output::error(&format!("Failed to load artifacts: {}", e));
            return Err(e.into());
        }
    };

    let report = set.verify();

    Output::kv("Records", &report.records.to_string());
    Output::kv("Tokens", &report.tokens.to_string());
    Output::kv("Postings", &report.postings.to_string());
    Output::kv(
        "Dimensions",
        &report
            .dimensions
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );

    if report.is_ok() {
        Output::success("Artifacts are consistent");
        return Ok(());
    }

    Output::header(&format!("Problems ({})", report.problem_count));
    for problem in &report.problems {
        Output::list_item(problem);
    }
    if report.problem_count > report.problems.len() {
        Output::list_item(&format!(
            "... and {} more",
            report.problem_count - report.problems.len()
        ));
    }

    Err(anyhow::anyhow!(
        "artifact verification found {} problem(s)",
        report.problem_count
    ))
}
