//! `payverify run` / `payverify validate`.

use std::path::{Path, PathBuf};

use payverify_io::IoError;
use payverify_recon::amount::format_cents;
use payverify_recon::model::ProviderSummary;
use payverify_recon::{ReconError, VerifyConfig};

use crate::exit_codes::EXIT_STRICT_MISMATCH;
use crate::CliError;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "payverify.toml";

/// A config plus the directory its relative paths resolve against.
struct LoadedConfig {
    config: VerifyConfig,
    base_dir: PathBuf,
    source: Option<PathBuf>,
}

impl LoadedConfig {
    fn path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    fn describe(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".into(),
        }
    }
}

fn load_config(explicit: Option<PathBuf>) -> Result<LoadedConfig, CliError> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::usage(format!("config file not found: {}", path.display())));
            }
            path
        }
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                tracing::debug!("no {DEFAULT_CONFIG_FILE} in working directory, using defaults");
                return Ok(LoadedConfig {
                    config: VerifyConfig::default(),
                    base_dir: PathBuf::from("."),
                    source: None,
                });
            }
            candidate
        }
    };

    let config_str = payverify_io::read_file_as_utf8(&path).map_err(io_err)?;
    let config = VerifyConfig::from_toml(&config_str).map_err(recon_err)?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    tracing::debug!(config = %path.display(), name = %config.name, "loaded config");
    Ok(LoadedConfig {
        config,
        base_dir,
        source: Some(path),
    })
}

fn recon_err(e: ReconError) -> CliError {
    let hint = match &e {
        ReconError::MissingPaymentColumn { .. } | ReconError::AmbiguousPaymentColumn { .. } => {
            Some("set [form] payment_column_prefix to the start of the payment question")
        }
        ReconError::MissingColumn { sheet, .. } if sheet == "statement" => {
            Some("check [statement] skip_rows and the column names")
        }
        ReconError::MissingColumn { .. } => Some("set [form] name_column / email_column"),
        ReconError::UnpricedTier { .. } => Some("add the sheet name to the [pricing] table"),
        _ => None,
    };

    let err = if e.is_configuration() {
        CliError::config(e.to_string())
    } else {
        CliError::runtime(e.to_string())
    };
    match hint {
        Some(hint) => err.with_hint(hint),
        None => err,
    }
}

fn io_err(e: IoError) -> CliError {
    let err = CliError::runtime(e.to_string());
    match &e {
        IoError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            err.with_hint(format!("set [inputs] in {DEFAULT_CONFIG_FILE} or run from the inputs' directory"))
        }
        _ => err,
    }
}

/// Reports are written beside their final paths, then renamed into place once
/// every one of them has been written. Staged files left behind by a failure
/// are removed on drop.
#[derive(Default)]
struct StagedReports {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedReports {
    fn staging_path(path: &Path) -> PathBuf {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        path.with_file_name(format!(".{name}.partial"))
    }

    fn stage(
        &mut self,
        path: PathBuf,
        write: impl FnOnce(&Path) -> Result<(), IoError>,
    ) -> Result<(), CliError> {
        let staging = Self::staging_path(&path);
        self.staged.push((staging.clone(), path));
        write(&staging).map_err(io_err)
    }

    fn commit(mut self) -> Result<Vec<PathBuf>, CliError> {
        let staged = std::mem::take(&mut self.staged);
        let mut written = Vec::with_capacity(staged.len());
        for (i, (staging, path)) in staged.iter().enumerate() {
            if let Err(e) = std::fs::rename(staging, path) {
                self.staged = staged[i..].to_vec();
                return Err(CliError::runtime(format!("cannot write {}: {e}", path.display())));
            }
            written.push(path.clone());
        }
        Ok(written)
    }
}

impl Drop for StagedReports {
    fn drop(&mut self) {
        for (staging, _) in &self.staged {
            if staging.exists() {
                if let Err(e) = std::fs::remove_file(staging) {
                    tracing::warn!(path = %staging.display(), error = %e, "cannot remove staged report");
                }
            }
        }
    }
}

pub fn cmd_run(
    config_path: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
    strict: bool,
) -> Result<(), CliError> {
    let loaded = load_config(config_path)?;
    let config = &loaded.config;

    // Read every input before anything is written
    let notifications = payverify_io::read_file_as_utf8(&loaded.path(&config.inputs.notifications)).map_err(io_err)?;
    let sheets = payverify_io::read_form_workbook(&loaded.path(&config.inputs.workbook)).map_err(io_err)?;
    let statement = payverify_io::read_file_as_utf8(&loaded.path(&config.inputs.statement)).map_err(io_err)?;

    let input = payverify_recon::prepare_input(config, &notifications, &sheets, &statement).map_err(recon_err)?;
    let result = payverify_recon::run(&input);

    // Reports
    let mut reports = StagedReports::default();
    reports.stage(loaded.path(&config.outputs.venmo), |path| {
        payverify_io::write_verdicts(path, "Venmo", &result.venmo)
    })?;
    reports.stage(loaded.path(&config.outputs.zelle), |path| {
        payverify_io::write_verdicts(path, "Zelle", &result.zelle)
    })?;
    if let Some(unresolved) = config.outputs.unresolved_path() {
        reports.stage(loaded.path(unresolved), |path| {
            payverify_io::write_unresolved(path, "Unresolved", &result.unresolved)
        })?;
    }
    for path in reports.commit()? {
        eprintln!("wrote {}", path.display());
    }

    // JSON
    if json_output || output_file.is_some() {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::runtime(format!("cannot write {}: {e}", path.display())))?;
            eprintln!("wrote {}", path.display());
        }

        if json_output {
            println!("{json_str}");
        }
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!("{}", provider_line("venmo", &s.venmo));
    eprintln!("{}", provider_line("zelle", &s.zelle));
    if s.unresolved > 0 {
        eprintln!("unresolved: {} registration(s) name neither payment method", s.unresolved);
    }

    if strict && !s.all_clear() {
        return Err(CliError {
            code: EXIT_STRICT_MISMATCH,
            message: format!(
                "{} unpaid, {} unresolved",
                s.venmo.not_paid() + s.zelle.not_paid(),
                s.unresolved,
            ),
            hint: None,
        });
    }

    Ok(())
}

fn provider_line(label: &str, p: &ProviderSummary) -> String {
    format!(
        "{label}: {} registrations, {} paid, {} underpaid, {} overpaid, {} no payment found",
        p.total, p.paid, p.underpaid, p.overpaid, p.missing,
    )
}

pub fn cmd_validate(config_path: Option<PathBuf>) -> Result<(), CliError> {
    let loaded = load_config(config_path)?;
    let config = &loaded.config;
    eprintln!(
        "valid: '{}' from {} with {} priced tier(s)",
        config.name,
        loaded.describe(),
        config.pricing.len(),
    );
    for (tier, cents) in config.pricing.iter() {
        eprintln!("  {tier} = {}", format_cents(cents));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::{EXIT_CONFIG, EXIT_RUNTIME, EXIT_USAGE};

    #[test]
    fn missing_explicit_config_is_usage_error() {
        let err = load_config(Some(PathBuf::from("/nonexistent/payverify.toml"))).err().unwrap();
        assert_eq!(err.code, EXIT_USAGE);
    }

    #[test]
    fn config_paths_resolve_against_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.toml");
        std::fs::write(&path, "[inputs]\nnotifications = \"sms.txt\"\n").unwrap();

        let loaded = load_config(Some(path)).unwrap();
        assert_eq!(loaded.path(&loaded.config.inputs.notifications), dir.path().join("sms.txt"));
    }

    #[test]
    fn invalid_config_maps_to_config_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[methods]\nzelle_token = \"pay\"\nvenmo_token = \"PAY\"\n").unwrap();

        let err = load_config(Some(path)).err().unwrap();
        assert_eq!(err.code, EXIT_CONFIG);
    }

    #[test]
    fn error_codes_by_kind() {
        let unpriced = recon_err(ReconError::UnpricedTier {
            sheet: "VIP".into(),
            tier: "VIP".into(),
        });
        assert_eq!(unpriced.code, EXIT_CONFIG);
        assert!(unpriced.hint.is_some());

        let statement = recon_err(ReconError::Statement("bad row".into()));
        assert_eq!(statement.code, EXIT_RUNTIME);

        let missing = io_err(IoError::Read {
            path: PathBuf::from("zelle_sms.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(missing.code, EXIT_RUNTIME);
        assert!(missing.hint.is_some());
    }

    #[test]
    fn staged_reports_commit_together() {
        let dir = tempfile::tempdir().unwrap();
        let venmo = dir.path().join("venmo_verification.xlsx");
        let zelle = dir.path().join("zelle_verification.xlsx");

        let mut reports = StagedReports::default();
        reports.stage(venmo.clone(), |p| payverify_io::write_verdicts(p, "Venmo", &[])).unwrap();
        reports.stage(zelle.clone(), |p| payverify_io::write_verdicts(p, "Zelle", &[])).unwrap();
        assert!(!venmo.exists());

        let written = reports.commit().unwrap();
        assert_eq!(written, [venmo.clone(), zelle.clone()]);
        assert!(venmo.is_file() && zelle.is_file());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn failed_stage_keeps_previous_reports() {
        let dir = tempfile::tempdir().unwrap();
        let venmo = dir.path().join("venmo_verification.xlsx");
        std::fs::write(&venmo, "previous run").unwrap();

        let mut reports = StagedReports::default();
        reports.stage(venmo.clone(), |p| payverify_io::write_verdicts(p, "Venmo", &[])).unwrap();
        let err = reports
            .stage(dir.path().join("missing/zelle.xlsx"), |p| payverify_io::write_verdicts(p, "Zelle", &[]))
            .err()
            .unwrap();
        assert_eq!(err.code, EXIT_RUNTIME);
        drop(reports);

        assert_eq!(std::fs::read_to_string(&venmo).unwrap(), "previous run");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
