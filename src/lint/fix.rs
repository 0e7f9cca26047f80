//! Fix descriptors and their execution.
//!
//! Diagnostics carry inert [`FixDescriptor`]s. Nothing is mutated until
//! the surrounding tool calls [`FixDescriptor::execute`]:
//!
//! - `InstallRequirements` raises the unit's suppression flag, hands the
//!   requirement list to an [`Installer`] on a background thread and
//!   returns immediately. The flag drops when the thread finishes,
//!   whatever the outcome.
//! - `AddRequirement` becomes a single [`TextEdit`] on the declared
//!   requirements artifact, applied by the [`FixEngine`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::Result;
use crate::installer::{InstallError, Installer};
use crate::lint::context::{AnalysisContext, UnitId};
use crate::lint::Diagnostic;
use crate::project::setup_call::SetupCallSite;
use crate::requirements::Requirement;

/// A text replacement in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// File to modify.
    pub file: PathBuf,
    /// Start byte offset.
    pub start: usize,
    /// End byte offset.
    pub end: usize,
    /// Replacement text.
    pub replacement: String,
}

impl TextEdit {
    /// Insert `text` at `offset` without removing anything.
    pub fn insert(file: impl Into<PathBuf>, offset: usize, text: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            start: offset,
            end: offset,
            replacement: text.into(),
        }
    }
}

/// The declared-requirements artifact an `AddRequirement` fix edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetArtifact {
    /// A line-oriented requirements file.
    RequirementsFile { path: PathBuf },
    /// The `install_requires` keyword of a `setup(...)` call.
    SetupCallKeyword { path: PathBuf, site: SetupCallSite },
    /// No artifact exists; the fix is inert.
    None,
}

impl TargetArtifact {
    /// File the artifact lives in.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::RequirementsFile { path } | Self::SetupCallKeyword { path, .. } => Some(path),
            Self::None => None,
        }
    }

    fn label(&self) -> String {
        match self.path().and_then(Path::file_name) {
            Some(name) => name.to_string_lossy().into_owned(),
            None => "project requirements".to_string(),
        }
    }
}

/// A remedial action attached to a diagnostic.
#[derive(Debug, Clone)]
pub enum FixDescriptor {
    /// Install every listed requirement into the unit's environment.
    InstallRequirements {
        unit: UnitId,
        requirements: Vec<Requirement>,
    },
    /// Declare `package` in the unit's requirements artifact.
    AddRequirement {
        package: String,
        target: TargetArtifact,
    },
}

impl FixDescriptor {
    pub fn install_requirements(unit: UnitId, requirements: Vec<Requirement>) -> Self {
        Self::InstallRequirements { unit, requirements }
    }

    pub fn add_requirement(package: impl Into<String>, target: TargetArtifact) -> Self {
        Self::AddRequirement {
            package: package.into(),
            target,
        }
    }

    /// Label shown to the user.
    pub fn name(&self) -> String {
        match self {
            Self::InstallRequirements { .. } => "Install requirements".to_string(),
            Self::AddRequirement { package, target } => {
                format!("Add requirement '{}' to {}", package, target.label())
            }
        }
    }

    /// Work the fix would do, without doing it.
    pub fn plan(&self) -> FixPlan {
        match self {
            Self::InstallRequirements { requirements, .. } => {
                FixPlan::Install(requirements.clone())
            }
            Self::AddRequirement { package, target } => plan_addition(package, target),
        }
    }

    /// Run the fix.
    ///
    /// Installs return as soon as the worker thread starts; the unit stays
    /// suppressed until [`InstallTask`] completes.
    pub fn execute(&self, ctx: &FixContext<'_>) -> Result<FixOutcome> {
        match (self, self.plan()) {
            (Self::InstallRequirements { unit, .. }, FixPlan::Install(requirements)) => {
                let task = InstallTask::spawn(
                    ctx.analysis,
                    unit,
                    Arc::clone(&ctx.installer),
                    requirements,
                )?;
                Ok(FixOutcome::Started(task))
            }
            (_, FixPlan::Edit(edit)) => {
                ctx.engine.apply_edit(&edit)?;
                Ok(FixOutcome::Applied(edit))
            }
            (_, FixPlan::Inert { reason }) => {
                tracing::debug!("Fix '{}' is inert: {}", self.name(), reason);
                Ok(FixOutcome::Inert { reason })
            }
            (_, FixPlan::Install(_)) => Ok(FixOutcome::Inert {
                reason: "nothing to install".to_string(),
            }),
        }
    }
}

fn plan_addition(package: &str, target: &TargetArtifact) -> FixPlan {
    let (path, offset, text) = match target {
        TargetArtifact::RequirementsFile { path } => (path, 0, format!("{}\n", package)),
        TargetArtifact::SetupCallKeyword { path, site } => match site.install_requires {
            Some(list) => (path, list.offset, list.insertion(&quoted(package))),
            None => {
                let keyword = format!("install_requires=[{}]", quoted(package));
                (path, site.arguments.offset, site.arguments.insertion(&keyword))
            }
        },
        TargetArtifact::None => {
            return FixPlan::Inert {
                reason: "no requirements artifact".to_string(),
            }
        }
    };

    if is_read_only(path) {
        return FixPlan::Inert {
            reason: format!("{} is read-only", path.display()),
        };
    }
    FixPlan::Edit(TextEdit::insert(path, offset, text))
}

fn quoted(package: &str) -> String {
    format!("\"{}\"", package)
}

fn is_read_only(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.permissions().readonly())
        .unwrap_or(false)
}

/// What executing a fix would do.
#[derive(Debug, Clone)]
pub enum FixPlan {
    Install(Vec<Requirement>),
    Edit(TextEdit),
    Inert { reason: String },
}

/// Collaborators a fix needs to run.
pub struct FixContext<'a> {
    pub analysis: &'a AnalysisContext,
    pub installer: Arc<dyn Installer>,
    pub engine: &'a FixEngine,
}

/// Result of executing a fix.
#[derive(Debug)]
pub enum FixOutcome {
    /// An install is running in the background.
    Started(InstallTask),
    /// The edit was written.
    Applied(TextEdit),
    /// Nothing was changed.
    Inert { reason: String },
}

/// A background install holding its unit's suppression flag.
#[derive(Debug)]
pub struct InstallTask {
    unit: UnitId,
    handle: JoinHandle<std::result::Result<(), InstallError>>,
}

impl InstallTask {
    fn spawn(
        analysis: &AnalysisContext,
        unit: &UnitId,
        installer: Arc<dyn Installer>,
        requirements: Vec<Requirement>,
    ) -> Result<Self> {
        let guard = analysis.suppress(unit);
        let handle = thread::Builder::new()
            .name(format!("install-{}", unit))
            .spawn(move || {
                let _guard = guard;
                installer.install(&requirements)
            })?;
        Ok(Self {
            unit: unit.clone(),
            handle,
        })
    }

    /// The unit being installed into.
    pub fn unit(&self) -> &UnitId {
        &self.unit
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the installer reports.
    pub fn wait(self) -> std::result::Result<(), InstallError> {
        self.handle.join().unwrap_or_else(|_| {
            Err(InstallError::Interrupted {
                message: format!("install worker for {} panicked", self.unit),
            })
        })
    }
}

/// Result of applying a batch of edits.
#[derive(Debug)]
pub struct FixResult {
    /// Number of edits applied.
    pub applied: usize,
    /// Diagnostics with no applicable edit.
    pub unfixable: Vec<Diagnostic>,
    /// Errors that occurred during fixing.
    pub errors: Vec<String>,
}

/// Writes text edits to disk.
pub struct FixEngine;

impl FixEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply the edits of every `AddRequirement` fix in `diagnostics`.
    pub fn apply_fixes(&self, diagnostics: &[Diagnostic]) -> FixResult {
        let mut edits = Vec::new();
        let mut unfixable = Vec::new();
        for diagnostic in diagnostics {
            match diagnostic.fix.as_ref().map(FixDescriptor::plan) {
                Some(FixPlan::Edit(edit)) => edits.push(edit),
                _ => unfixable.push(diagnostic.clone()),
            }
        }

        let (applied, errors) = self.apply_edits(&edits);
        FixResult {
            applied,
            unfixable,
            errors,
        }
    }

    /// Apply edits grouped by file. Returns the applied count and any
    /// per-file errors.
    pub fn apply_edits(&self, edits: &[TextEdit]) -> (usize, Vec<String>) {
        let mut applied = 0;
        let mut errors = Vec::new();

        let mut by_file: HashMap<&Path, Vec<&TextEdit>> = HashMap::new();
        for edit in edits {
            by_file.entry(edit.file.as_path()).or_default().push(edit);
        }

        for (file, file_edits) in by_file {
            match self.apply_to_file(file, &file_edits) {
                Ok(count) => applied += count,
                Err(e) => errors.push(format!("{}: {}", file.display(), e)),
            }
        }

        (applied, errors)
    }

    /// Apply a single edit.
    pub fn apply_edit(&self, edit: &TextEdit) -> Result<()> {
        self.apply_to_file(&edit.file, &[edit])?;
        Ok(())
    }

    /// Describe edits without applying them.
    pub fn preview_edits(&self, edits: &[TextEdit]) -> Vec<String> {
        edits
            .iter()
            .map(|e| {
                format!(
                    "{}:{}: insert {:?}",
                    e.file.display(),
                    e.start,
                    e.replacement
                )
            })
            .collect()
    }

    fn apply_to_file(&self, file: &Path, edits: &[&TextEdit]) -> std::io::Result<usize> {
        let mut content = fs::read_to_string(file)?;

        // Apply back to front so earlier offsets stay valid. Edits at the
        // same offset keep their given order.
        let mut sorted = edits.to_vec();
        sorted.reverse();
        sorted.sort_by(|a, b| b.start.cmp(&a.start));

        let mut count = 0;
        for edit in sorted {
            if edit.start > edit.end
                || edit.end > content.len()
                || !content.is_char_boundary(edit.start)
                || !content.is_char_boundary(edit.end)
            {
                tracing::warn!(
                    "Skipping out-of-range edit {}..{} in {}",
                    edit.start,
                    edit.end,
                    file.display()
                );
                continue;
            }
            content.replace_range(edit.start..edit.end, &edit.replacement);
            count += 1;
        }

        if count == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "no applicable edits",
            ));
        }
        fs::write(file, content)?;
        Ok(count)
    }
}

impl Default for FixEngine {
    fn default() -> Self {
        Self::new()
    }
}
