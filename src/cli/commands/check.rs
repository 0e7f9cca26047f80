//! Check command implementation.
//!
//! The `reqlint check` command visits each project directory as one unit
//! and prints the diagnostics of both consistency checks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::CheckArgs;
use crate::config::ReqlintConfig;
use crate::error::{ReqlintError, Result};
use crate::index::StdlibNames;
use crate::inventory::{Inventory, PipInventory};
use crate::lint::{
    AnalysisContext, ConsistencyDriver, Diagnostic, DiagnosticFormatter, HumanFormatter,
    InventoryStatus, JsonFormatter, OutputFormat, VisitOutcome,
};
use crate::project::{load_unit, ProjectUnit};
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Driver configured from the `ignore` and `extra_stdlib` settings.
pub fn build_driver(config: &ReqlintConfig) -> ConsistencyDriver {
    let stdlib = StdlibNames::python3().with_extra(config.extra_stdlib.iter().cloned());
    ConsistencyDriver::new(stdlib).with_ignored(config.ignore.iter().cloned())
}

/// Load one unit per root, all sharing `inventory`.
pub fn load_units(
    roots: &[PathBuf],
    config: &ReqlintConfig,
    inventory: &Arc<dyn Inventory>,
) -> Result<Vec<ProjectUnit>> {
    roots
        .iter()
        .map(|root| load_unit(root, config, Some(Arc::clone(inventory))))
        .collect()
}

/// Directories to check: the given paths resolved against the project
/// root, or the project root alone.
pub fn unit_roots(project_root: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.is_empty() {
        return vec![project_root.to_path_buf()];
    }
    paths.iter().map(|p| project_root.join(p)).collect()
}

/// Flatten outcomes, warning once per unit whose environment could not be
/// listed.
pub fn collect_diagnostics(
    units: &[ProjectUnit],
    outcomes: Vec<VisitOutcome>,
    ui: &mut dyn UserInterface,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (unit, outcome) in units.iter().zip(outcomes) {
        if ui.output_mode().shows_details() {
            ui.message(&format!(
                "{}: {} declared, {} import(s), {}",
                unit.id(),
                unit.declared().len(),
                unit.imports().len(),
                describe_inventory(outcome.inventory)
            ));
        }
        if outcome.inventory == InventoryStatus::Indeterminate {
            ui.warning(&format!(
                "Could not list installed packages for {}; requirement check skipped",
                unit.id()
            ));
        }
        diagnostics.extend(outcome.diagnostics);
    }
    diagnostics
}

fn describe_inventory(status: InventoryStatus) -> String {
    match status {
        InventoryStatus::Available(count) => format!("{} installed package(s)", count),
        InventoryStatus::Indeterminate => "installed packages unknown".to_string(),
        InventoryStatus::NoEnvironment => "no environment".to_string(),
        InventoryStatus::NotQueried => "environment not queried".to_string(),
    }
}

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config: ReqlintConfig,
    args: CheckArgs,
    inventory: Option<Arc<dyn Inventory>>,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config: ReqlintConfig, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
            inventory: None,
        }
    }

    /// Use `inventory` instead of asking the configured interpreter.
    pub fn with_inventory(mut self, inventory: Arc<dyn Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn format(&self) -> OutputFormat {
        self.args.format.unwrap_or(self.config.output)
    }

    fn format_output(&self, diagnostics: &[Diagnostic]) -> String {
        let mut output = Vec::new();
        let written = match self.format() {
            OutputFormat::Json => JsonFormatter::new().format(diagnostics, &mut output),
            OutputFormat::Human => {
                HumanFormatter::new(should_use_colors()).format(diagnostics, &mut output)
            }
        };
        if let Err(e) = written {
            tracing::warn!("Failed to format diagnostics: {}", e);
        }
        String::from_utf8(output).unwrap_or_default()
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let inventory = self
            .inventory
            .clone()
            .unwrap_or_else(|| Arc::new(PipInventory::new(&self.config.python)));

        let roots = unit_roots(&self.project_root, &self.args.paths);
        let units = match load_units(&roots, &self.config, &inventory) {
            Ok(units) => units,
            Err(ReqlintError::ProjectNotFound { path }) => {
                ui.error(&format!("Project directory not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let driver = build_driver(&self.config);
        let outcomes = driver.visit_all(&AnalysisContext::new(), &units);
        let diagnostics = collect_diagnostics(&units, outcomes, ui);

        let should_fail = self.args.strict && !diagnostics.is_empty();

        if diagnostics.is_empty() && self.format() == OutputFormat::Human {
            ui.success("No problems found");
            return Ok(CommandResult::success());
        }

        let output = self.format_output(&diagnostics);
        ui.message(output.trim_end());
        if self.format() == OutputFormat::Human && diagnostics.iter().any(|d| d.fix.is_some()) {
            ui.show_hint("Run 'reqlint fix' to apply the suggested fixes");
        }

        if should_fail {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{InstalledPackage, InventoryError, StaticInventory};
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = temp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp
    }

    fn flask_installed() -> Arc<dyn Inventory> {
        Arc::new(StaticInventory::new(vec![InstalledPackage::new("Flask", "2.3.0")]))
    }

    fn run(
        temp: &TempDir,
        args: CheckArgs,
        inventory: Arc<dyn Inventory>,
    ) -> (CommandResult, MockUI) {
        let cmd = CheckCommand::new(temp.path(), ReqlintConfig::default(), args)
            .with_inventory(inventory);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn clean_project_reports_no_problems() {
        let temp = setup_project(&[
            ("requirements.txt", "flask>=2.0\n"),
            ("app.py", "import os\nimport flask\n"),
        ]);
        let (result, ui) = run(&temp, CheckArgs::default(), flask_installed());

        assert!(result.success);
        assert!(ui.has_success("No problems found"));
    }

    #[test]
    fn reports_unsatisfied_and_undeclared() {
        let temp = setup_project(&[
            ("requirements.txt", "flask>=3.0\n"),
            ("app.py", "import flask\nimport requests\n"),
        ]);
        let (result, ui) = run(&temp, CheckArgs::default(), flask_installed());

        assert!(result.success);
        let out = ui.all_output();
        assert!(out.contains("Package requirement 'flask>=3.0' is not satisfied"));
        assert!(out.contains("Package 'requests' is not listed in project requirements"));
        assert!(out.contains("app.py:2:8"));
        assert!(out.contains("Found 2 warning(s)"));
        assert_eq!(ui.hints(), ["Run 'reqlint fix' to apply the suggested fixes"]);
    }

    #[test]
    fn strict_fails_on_warnings() {
        let temp = setup_project(&[("app.py", "import requests\n")]);
        let args = CheckArgs {
            strict: true,
            ..CheckArgs::default()
        };
        let (result, _ui) = run(&temp, args, flask_installed());

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn json_format_outputs_summary_even_when_clean() {
        let temp = setup_project(&[("app.py", "import os\n")]);
        let args = CheckArgs {
            format: Some(OutputFormat::Json),
            ..CheckArgs::default()
        };
        let (result, ui) = run(&temp, args, flask_installed());

        assert!(result.success);
        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["summary"]["total"], 0);
    }

    #[test]
    fn indeterminate_inventory_warns_and_still_checks_imports() {
        let temp = setup_project(&[
            ("requirements.txt", "flask\n"),
            ("app.py", "import yaml\n"),
        ]);
        let (result, ui) = run(
            &temp,
            CheckArgs::default(),
            Arc::new(StaticInventory::failing(InventoryError::Unavailable {
                program: "python3".to_string(),
                message: "not found".to_string(),
            })),
        );

        assert!(result.success);
        assert!(ui.has_warning("Could not list installed packages"));
        let out = ui.all_output();
        assert!(!out.contains("is not satisfied"));
        assert!(out.contains("Package 'yaml' is not listed"));
    }

    #[test]
    fn each_path_is_a_unit() {
        let temp = setup_project(&[
            ("svc-a/app.py", "import requests\n"),
            ("svc-b/requirements.txt", "requests\n"),
            ("svc-b/app.py", "import requests\n"),
        ]);
        let args = CheckArgs {
            paths: vec!["svc-a".into(), "svc-b".into()],
            ..CheckArgs::default()
        };
        let (_result, ui) = run(&temp, args, flask_installed());

        let out = ui.all_output();
        assert_eq!(out.matches("Package 'requests' is not listed").count(), 1);
        assert!(out.contains("is not satisfied"));
    }

    #[test]
    fn missing_path_fails_with_exit_code_2() {
        let temp = setup_project(&[]);
        let args = CheckArgs {
            paths: vec!["nope".into()],
            ..CheckArgs::default()
        };
        let (result, ui) = run(&temp, args, flask_installed());

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Project directory not found"));
    }

    #[test]
    fn driver_honors_config_lists() {
        let config = ReqlintConfig {
            ignore: vec!["yaml".into()],
            extra_stdlib: vec!["_corp".into()],
            ..ReqlintConfig::default()
        };
        let temp = setup_project(&[("app.py", "import yaml\nimport _corp\nimport toml\n")]);
        let cmd = CheckCommand::new(temp.path(), config, CheckArgs::default())
            .with_inventory(flask_installed());
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        let out = ui.all_output();
        assert!(out.contains("Package 'toml'"));
        assert!(!out.contains("Package 'yaml'"));
        assert!(!out.contains("Package '_corp'"));
    }

    #[test]
    fn verbose_mode_describes_each_unit() {
        let temp = setup_project(&[
            ("requirements.txt", "flask\n"),
            ("app.py", "import flask\nimport os\n"),
        ]);
        let cmd = CheckCommand::new(temp.path(), ReqlintConfig::default(), CheckArgs::default())
            .with_inventory(flask_installed());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("1 declared, 2 import(s), 1 installed package(s)"));
    }

    #[test]
    fn unit_roots_default_to_project_root() {
        let root = Path::new("/work");
        assert_eq!(unit_roots(root, &[]), vec![PathBuf::from("/work")]);
        assert_eq!(
            unit_roots(root, &[PathBuf::from("a")]),
            vec![PathBuf::from("/work/a")]
        );
    }
}
