//! Fix command implementation.
//!
//! The `reqlint fix` command runs a check pass and executes the fixes it
//! offers: installs for unsatisfied requirements, additions to the
//! requirements artifact for undeclared packages.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::FixArgs;
use crate::config::ReqlintConfig;
use crate::error::{ReqlintError, Result};
use crate::installer::{Installer, PipInstaller};
use crate::inventory::{Inventory, PipInventory};
use crate::lint::{
    AnalysisContext, Diagnostic, FixContext, FixDescriptor, FixEngine, FixOutcome, FixPlan,
    InstallTask,
};
use crate::project::{discover_artifact, ProjectUnit};
use crate::ui::UserInterface;

use super::check::{build_driver, collect_diagnostics, load_units, unit_roots};
use super::dispatcher::{Command, CommandResult};

/// The fix command implementation.
pub struct FixCommand {
    project_root: PathBuf,
    config: ReqlintConfig,
    args: FixArgs,
    inventory: Option<Arc<dyn Inventory>>,
    installer: Option<Arc<dyn Installer>>,
}

impl FixCommand {
    /// Create a new fix command.
    pub fn new(project_root: &Path, config: ReqlintConfig, args: FixArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
            inventory: None,
            installer: None,
        }
    }

    /// Use `inventory` instead of asking the configured interpreter.
    pub fn with_inventory(mut self, inventory: Arc<dyn Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Use `installer` instead of pip.
    pub fn with_installer(mut self, installer: Arc<dyn Installer>) -> Self {
        self.installer = Some(installer);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &FixArgs {
        &self.args
    }

    fn inventory(&self) -> Arc<dyn Inventory> {
        self.inventory
            .clone()
            .unwrap_or_else(|| Arc::new(PipInventory::new(&self.config.python)))
    }

    fn installer(&self) -> Arc<dyn Installer> {
        self.installer
            .clone()
            .unwrap_or_else(|| Arc::new(PipInstaller::new(&self.config.python)))
    }

    fn preview(
        &self,
        engine: &FixEngine,
        diagnostics: &[Diagnostic],
        ui: &mut dyn UserInterface,
    ) {
        for fix in diagnostics.iter().filter_map(|d| d.fix.as_ref()) {
            if !self.selected(fix) {
                continue;
            }
            match fix.plan() {
                FixPlan::Install(requirements) => {
                    ui.message(&format!("Would install {}", join(&requirements)));
                }
                FixPlan::Edit(edit) => {
                    for line in engine.preview_edits(&[edit]) {
                        ui.message(&format!("Would edit {}", line));
                    }
                }
                FixPlan::Inert { reason } => {
                    ui.message(&format!("Cannot {}: {}", fix.name(), reason));
                }
            }
        }
    }

    fn selected(&self, fix: &FixDescriptor) -> bool {
        match fix {
            FixDescriptor::InstallRequirements { .. } => self.args.wants_install(),
            FixDescriptor::AddRequirement { .. } => self.args.wants_add(),
        }
    }

    /// Add each undeclared package of one unit. The artifact is looked up
    /// again before every addition so offsets reflect earlier edits.
    fn add_requirements(
        &self,
        root: &Path,
        packages: &[String],
        ctx: &FixContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<usize> {
        let mut failures = 0;
        for package in packages {
            let target = discover_artifact(root, &self.config)?.artifact;
            let fix = FixDescriptor::add_requirement(package.as_str(), target);
            match fix.execute(ctx) {
                Ok(FixOutcome::Applied(edit)) => {
                    ui.success(&format!("Added '{}' to {}", package, edit.file.display()));
                }
                Ok(FixOutcome::Inert { reason }) => {
                    ui.warning(&format!("Cannot {}: {}", fix.name(), reason));
                }
                Ok(FixOutcome::Started(_)) => {}
                Err(e) => {
                    ui.error(&format!("Failed to {}: {}", fix.name(), e));
                    failures += 1;
                }
            }
        }
        Ok(failures)
    }
}

impl Command for FixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let inventory = self.inventory();
        let roots = unit_roots(&self.project_root, &[]);
        let units = match load_units(&roots, &self.config, &inventory) {
            Ok(units) => units,
            Err(ReqlintError::ProjectNotFound { path }) => {
                ui.error(&format!("Project directory not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let driver = build_driver(&self.config);
        let analysis = AnalysisContext::new();
        let engine = FixEngine::new();
        let outcomes = driver.visit_all(&analysis, &units);
        let diagnostics = collect_diagnostics(&units, outcomes, ui);

        if diagnostics.is_empty() {
            ui.success("No problems found");
            return Ok(CommandResult::success());
        }

        if self.args.dry_run {
            self.preview(&engine, &diagnostics, ui);
            return Ok(CommandResult::success());
        }

        let ctx = FixContext {
            analysis: &analysis,
            installer: self.installer(),
            engine: &engine,
        };
        let mut failures = 0;

        let mut tasks: Vec<(InstallTask, String)> = Vec::new();
        if self.args.wants_install() {
            for fix in diagnostics.iter().filter_map(|d| d.fix.as_ref()) {
                let FixDescriptor::InstallRequirements { requirements, .. } = fix else {
                    continue;
                };
                ui.message(&format!("Installing {}", join(requirements)));
                match fix.execute(&ctx) {
                    Ok(FixOutcome::Started(task)) => tasks.push((task, join(requirements))),
                    Ok(_) => {}
                    Err(e) => {
                        ui.error(&format!("Failed to start install: {}", e));
                        failures += 1;
                    }
                }
            }
        }

        if self.args.wants_add() {
            for (root, unit) in roots.iter().zip(&units) {
                let packages = undeclared_packages(&diagnostics, unit);
                failures += self.add_requirements(root, &packages, &ctx, ui)?;
            }
        }

        for (task, requirements) in tasks {
            match task.wait() {
                Ok(()) => ui.success(&format!("Installed {}", requirements)),
                Err(e) => {
                    ui.error(&e.to_string());
                    failures += 1;
                }
            }
        }

        let units = load_units(&roots, &self.config, &inventory)?;
        let outcomes = driver.visit_all(&analysis, &units);
        let remaining: usize = outcomes.iter().map(|o| o.diagnostics.len()).sum();
        if remaining == 0 {
            ui.success("All problems fixed");
        } else {
            ui.warning(&format!("{} problem(s) remain", remaining));
        }

        if failures > 0 {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Packages to add for `unit`, first occurrence first.
fn undeclared_packages(diagnostics: &[Diagnostic], unit: &ProjectUnit) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    for diag in diagnostics.iter().filter(|d| &d.unit == unit.id()) {
        if let Some(FixDescriptor::AddRequirement { package, .. }) = &diag.fix {
            if !packages.contains(package) {
                packages.push(package.clone());
            }
        }
    }
    packages
}
