//! Project units and their on-disk inputs.
//!
//! A [`ProjectUnit`] bundles what one visit of the consistency driver
//! needs: the environment to query, the declared requirement strings, the
//! artifact they came from, the project's own package names and the
//! imports found in its sources.
//!
//! # Modules
//!
//! - [`discovery`] - Source files and first-party package names
//! - [`imports`] - `import` / `from ... import` scanning
//! - [`requirements_file`] - `requirements.txt` reading
//! - [`setup_call`] - `setup(...)` call scanning

pub mod discovery;
pub mod imports;
pub mod requirements_file;
pub mod setup_call;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::ReqlintConfig;
use crate::error::{ReqlintError, Result};
use crate::inventory::Inventory;
use crate::lint::{TargetArtifact, UnitId};
use crate::requirements::Requirement;
use crate::resolver::ImportReference;

/// One unit of analysis.
#[derive(Clone)]
pub struct ProjectUnit {
    id: UnitId,
    environment: Option<Arc<dyn Inventory>>,
    declared: Vec<String>,
    artifact: TargetArtifact,
    local_packages: Vec<String>,
    imports: Vec<ImportReference>,
}

impl ProjectUnit {
    /// An empty unit with no environment and no artifact.
    pub fn new(id: UnitId) -> Self {
        Self {
            id,
            environment: None,
            declared: Vec::new(),
            artifact: TargetArtifact::None,
            local_packages: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn with_environment(mut self, environment: Arc<dyn Inventory>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_declared<I, S>(mut self, declared: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared = declared.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_artifact(mut self, artifact: TargetArtifact) -> Self {
        self.artifact = artifact;
        self
    }

    pub fn with_local_packages<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.local_packages = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_imports<I>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = ImportReference>,
    {
        self.imports = imports.into_iter().collect();
        self
    }

    pub fn id(&self) -> &UnitId {
        &self.id
    }

    pub fn environment(&self) -> Option<&Arc<dyn Inventory>> {
        self.environment.as_ref()
    }

    /// Requirement strings as declared.
    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    pub fn artifact(&self) -> &TargetArtifact {
        &self.artifact
    }

    pub fn local_packages(&self) -> &[String] {
        &self.local_packages
    }

    pub fn imports(&self) -> &[ImportReference] {
        &self.imports
    }

    /// Parsed requirements. Declarations that do not parse are skipped.
    pub fn requirements(&self) -> Vec<Requirement> {
        self.declared
            .iter()
            .filter_map(|line| match Requirement::parse(line) {
                Ok(req) => Some(req),
                Err(e) => {
                    tracing::debug!("{}: skipping declaration '{}': {}", self.id, line, e);
                    None
                }
            })
            .collect()
    }
}

/// The declared-requirements artifact of a project and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarations {
    pub artifact: TargetArtifact,
    pub requirements: Vec<String>,
}

/// Find the requirements artifact under `root`.
///
/// A requirements file takes priority over a `setup(...)` call. A
/// `setup.py` without a recognizable call yields no artifact.
pub fn discover_artifact(root: &Path, config: &ReqlintConfig) -> Result<Declarations> {
    let requirements_path = root.join(&config.requirements_file);
    if requirements_path.is_file() {
        let text = fs::read_to_string(&requirements_path)?;
        return Ok(Declarations {
            requirements: requirements_file::read_requirement_lines(&text),
            artifact: TargetArtifact::RequirementsFile {
                path: requirements_path,
            },
        });
    }

    let setup_path = root.join(&config.setup_file);
    if setup_path.is_file() {
        let text = fs::read_to_string(&setup_path)?;
        match setup_call::scan_setup(&text) {
            Some(scan) => {
                return Ok(Declarations {
                    requirements: scan.requirements,
                    artifact: TargetArtifact::SetupCallKeyword {
                        path: setup_path,
                        site: scan.site,
                    },
                })
            }
            None => tracing::warn!("No setup() call found in {}", setup_path.display()),
        }
    }

    Ok(Declarations {
        artifact: TargetArtifact::None,
        requirements: Vec::new(),
    })
}

/// Load the project at `root` as a single unit.
pub fn load_unit(
    root: &Path,
    config: &ReqlintConfig,
    environment: Option<Arc<dyn Inventory>>,
) -> Result<ProjectUnit> {
    if !root.is_dir() {
        return Err(ReqlintError::ProjectNotFound {
            path: root.to_path_buf(),
        });
    }

    let declarations = discover_artifact(root, config)?;

    let mut local = discovery::local_packages(root)?;
    local.extend(config.local_packages.iter().cloned());

    let setup_path = root.join(&config.setup_file);
    let mut references = Vec::new();
    for source in discovery::python_sources(root, &config.exclude)? {
        if source == setup_path {
            continue;
        }
        match fs::read_to_string(&source) {
            Ok(text) => references.extend(imports::scan_imports(&source, &text)),
            Err(e) => tracing::warn!("Skipping unreadable {}: {}", source.display(), e),
        }
    }
    tracing::debug!(
        "Loaded {}: {} declared, {} local, {} imports",
        root.display(),
        declarations.requirements.len(),
        local.len(),
        references.len()
    );

    let mut unit = ProjectUnit::new(unit_id(root))
        .with_declared(declarations.requirements)
        .with_artifact(declarations.artifact)
        .with_local_packages(local)
        .with_imports(references);
    if let Some(environment) = environment {
        unit = unit.with_environment(environment);
    }
    Ok(unit)
}

/// Identity of the unit rooted at `root`.
pub fn unit_id(root: &Path) -> UnitId {
    let canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    UnitId::new(canonical.display().to_string())
}
