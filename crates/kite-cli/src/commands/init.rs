//! `kite init`: lay out a Kite project inside an existing npm package.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use kite_adapters::{FRAMEWORK_PACKAGE, LocalFilesystem, PackageManifest};
use kite_core::application::{InitReport, ModuleService, ProjectService};

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::{project_dir, templates},
    config::AppSettings,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Whether the runtime package is already wired up.
#[derive(Debug, Serialize)]
struct FrameworkStatus {
    listed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_version: Option<String>,
}

#[derive(Debug, Serialize)]
struct InitSummary<'a> {
    #[serde(flatten)]
    report: &'a InitReport,
    framework: FrameworkStatus,
}

/// Execute `kite init`.
///
/// 1. Require `package.json` in the project directory
/// 2. Merge flags over the configured init defaults
/// 3. Write the project skeleton and the greeting controller
/// 4. Report whether `kite-framework` still needs installing
#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    global: &GlobalArgs,
    settings: &AppSettings,
    output: &OutputManager,
) -> CliResult<()> {
    let project_dir = project_dir(global)?;

    let manifest = PackageManifest::read(&project_dir)?.ok_or_else(|| {
        CliError::PackageJsonMissing {
            dir: project_dir.clone(),
        }
    })?;

    let options = settings.init_options(&args);
    let templates = templates(settings);
    let modules = ModuleService::new(Box::new(LocalFilesystem::new()), Box::new(templates.clone()));
    let service = ProjectService::new(Box::new(LocalFilesystem::new()), Box::new(templates), modules);

    if !output.is_json() {
        output.header(&format!(
            "Initialising Kite project in {}",
            project_dir.display()
        ))?;
    }

    let report = service.init(&project_dir, &options)?;
    info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        "init finished"
    );

    let framework = FrameworkStatus {
        listed: manifest.depends_on(FRAMEWORK_PACKAGE),
        installed_version: PackageManifest::installed_framework_version(&project_dir),
    };

    if output.is_json() {
        output.json(&InitSummary {
            report: &report,
            framework,
        })?;
        return Ok(());
    }

    for path in &report.created {
        output.success(&format!("create {}", relative(path, &project_dir)))?;
    }
    for path in &report.skipped {
        output.warning(&format!("exists {}", relative(path, &project_dir)))?;
    }

    output.print("")?;
    match (framework.listed, framework.installed_version) {
        (true, Some(version)) => {
            output.info(&format!("{FRAMEWORK_PACKAGE} {version} is installed"))?;
        }
        (true, None) => {
            output.info(&format!(
                "{FRAMEWORK_PACKAGE} is listed in package.json; run 'npm install'"
            ))?;
        }
        (false, _) => {
            output.info(&format!("{FRAMEWORK_PACKAGE} is not installed yet, run:"))?;
            output.print(&format!("  npm install {FRAMEWORK_PACKAGE} --save"))?;
        }
    }
    output.success("Kite project initialization finished")?;

    Ok(())
}

fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}
