//! Read-only view of the project's `package.json`.
//!
//! `kite init` refuses to run outside an npm project and afterwards tells the
//! user whether `kite-framework` still has to be installed.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use kite_core::{application::ApplicationError, error::KiteResult};

pub const PACKAGE_JSON: &str = "package.json";

/// npm package providing the runtime the generated code imports.
pub const FRAMEWORK_PACKAGE: &str = "kite-framework";

/// The parts of `package.json` Kite cares about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parse `<project_dir>/package.json`; `Ok(None)` when there is none.
    pub fn read(project_dir: &Path) -> KiteResult<Option<Self>> {
        let path = project_dir.join(PACKAGE_JSON);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to read file: {e}"),
                }
                .into());
            }
        };

        serde_json::from_str(&text).map(Some).map_err(|e| {
            ApplicationError::ValidationFailed(format!("{} is not valid JSON: {e}", path.display()))
                .into()
        })
    }

    /// Whether `package` is a runtime dependency.
    pub fn depends_on(&self, package: &str) -> bool {
        self.dependencies.contains_key(package)
    }

    /// Version of `kite-framework` found in `node_modules`, if installed.
    pub fn installed_framework_version(project_dir: &Path) -> Option<String> {
        let path = project_dir
            .join("node_modules")
            .join(FRAMEWORK_PACKAGE)
            .join(PACKAGE_JSON);
        let text = fs::read_to_string(path).ok()?;
        serde_json::from_str::<PackageManifest>(&text).ok()?.version
    }
}
