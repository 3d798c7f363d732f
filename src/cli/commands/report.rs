//! Report command handler
//!
//! Generates grade reports in Markdown or HTML.

use super::{load_store, resolve_today};
use std::path::{Path, PathBuf};
use studyflow::config::Config;
use studyflow::core::report::{generator_for, ReportContext, ReportFormat};
use studyflow::{error, info};

/// Base name for generated report files
const REPORT_STEM: &str = "grade_report";

/// Run the report command
///
/// The format comes from `--format`, then the configured default. Without
/// `--output`, the file lands in the configured reports directory.
pub fn run(
    output_file: Option<&Path>,
    format_str: Option<&str>,
    today: Option<&str>,
    config: &Config,
) {
    match generate_report(output_file, format_str, today, config) {
        Ok(path) => println!("✓ Report generated: {}", path.display()),
        Err(err) => {
            error!("Report generation failed: {err}");
            eprintln!("✗ {err}");
        }
    }
}

fn generate_report(
    output_file: Option<&Path>,
    format_str: Option<&str>,
    today: Option<&str>,
    config: &Config,
) -> Result<PathBuf, String> {
    let format = match format_str {
        Some(value) => value.parse::<ReportFormat>()?,
        None => config.report_format(),
    };
    let today = resolve_today(today)?;
    let store = load_store(config).ok_or_else(|| "No data to report on".to_string())?;

    let output_path = output_file.map_or_else(
        || default_output_path(config, format),
        Path::to_path_buf,
    );
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create reports directory {}: {e}", parent.display())
            })?;
        }
    }

    let ctx = ReportContext::new(store.courses.records(), store.assignments.records(), today);
    generator_for(format)
        .generate(&ctx, &output_path)
        .map_err(|e| format!("Failed to write {}: {e}", output_path.display()))?;

    info!("Wrote {format} report to {}", output_path.display());
    Ok(output_path)
}

/// `<reports_dir>/grade_report.<ext>`
fn default_output_path(config: &Config, format: ReportFormat) -> PathBuf {
    PathBuf::from(&config.paths.reports_dir).join(format!("{REPORT_STEM}.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let mut config = Config::default();
        config.paths.reports_dir = "/tmp/reports".to_string();

        assert_eq!(
            default_output_path(&config, ReportFormat::Html),
            PathBuf::from("/tmp/reports/grade_report.html")
        );
    }

    #[test]
    fn test_generate_report_from_data_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let data = dir.path().join("data.json");
        std::fs::write(
            &data,
            r#"{"courses":[{"Id":1,"name":"Biology","code":"BIO 1","credits":3,
                "gradeCategories":[{"name":"Exams","weight":100,"grades":[{"score":91}]}]}]}"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.paths.data_file = data.to_string_lossy().to_string();
        config.paths.reports_dir = dir.path().join("out").to_string_lossy().to_string();

        let path = generate_report(None, Some("md"), Some("2024-09-01"), &config).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(path.ends_with("out/grade_report.md"));
        assert!(content.contains("BIO 1 - Biology"));
        assert!(content.contains("91.0%"));
    }

    #[test]
    fn test_generate_report_rejects_unknown_format() {
        let config = Config::default();
        assert!(generate_report(None, Some("pdf"), None, &config).is_err());
    }
}
