//! Project Service - lays out a fresh Kite project.
//!
//! `init` is flag-driven: every value in [`InitOptions`] has a default, and
//! files that already exist are reported and left alone. The last step
//! creates the `greeting` controller through [`ModuleService`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{Filesystem, TemplateProvider},
        services::module_service::{GenerateOptions, GeneratedModule, ModuleService},
    },
    domain::{
        Boilerplate, DomainValidator as validator, FsEntry, ModuleKind, ModuleRequest,
        NameGrammar, PROJECT_FILE_JSON, ProjectConfig, ProjectFile, ProjectStructure,
        RenderContext, TSCONFIG_FILE,
    },
    error::{Context, KiteResult},
};

/// Name of the controller every new project starts with.
pub const GREETING: &str = "greeting";

const KITE_CONFIG_FILE: &str = "kite.config.ts";

/// Values `init` writes into the boilerplate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// Source root, relative to the project directory.
    pub src_dir: PathBuf,
    /// Compiler output folder, relative to the project directory.
    pub out_dir: PathBuf,
    pub source_map: bool,
    pub hostname: String,
    pub port: u16,
    /// Entry file name inside `src_dir`.
    pub entry_point: String,
    /// Error table file name inside `src_dir`.
    pub errors_file: String,
    pub grammar: NameGrammar,
    /// Recorded as `cliVersion` in `kite-cli.json`.
    pub cli_version: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("dist"),
            source_map: true,
            hostname: "127.0.0.1".into(),
            port: 4000,
            entry_point: "app.server.ts".into(),
            errors_file: "errors.ts".into(),
            grammar: NameGrammar::default(),
            cli_version: crate::VERSION.into(),
        }
    }
}

/// Outcome of `init`.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub project_dir: PathBuf,
    /// Absolute paths written or created, in order.
    pub created: Vec<PathBuf>,
    /// Absolute paths that were already present.
    pub skipped: Vec<PathBuf>,
    pub greeting: GeneratedModule,
}

/// Initializes projects.
pub struct ProjectService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateProvider>,
    modules: ModuleService,
}

impl ProjectService {
    /// `modules` must see the same filesystem as `filesystem`, or the
    /// greeting controller is resolved against a different tree.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateProvider>,
        modules: ModuleService,
    ) -> Self {
        Self {
            filesystem,
            templates,
            modules,
        }
    }

    /// Layout `init` would produce, with the built-in templates filled in.
    pub fn layout(&self, project_dir: &Path, options: &InitOptions) -> KiteResult<ProjectConfig> {
        let mut config =
            ProjectConfig::new(project_dir, &options.src_dir).with_grammar(options.grammar);

        for kind in ModuleKind::ALL {
            let template = self.templates.module_template(kind)?;
            let kind_config = config.kind(kind)?.clone().with_template(template);
            config = config.with_kind(kind, kind_config);
        }

        validator::validate_project_config(&config)?;
        Ok(config)
    }

    /// Everything `init` writes, without touching the filesystem.
    pub fn plan(&self, config: &ProjectConfig, options: &InitOptions) -> KiteResult<ProjectStructure> {
        let src = &options.src_dir;

        let errors_stem = Path::new(&options.errors_file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "errors".into());

        let (controllers, controller_ending) = router_target(config)?;
        let kite_config = RenderContext::new()
            .with_variable("errors", format!("./{errors_stem}"))
            .with_variable("hostname", options.hostname.as_str())
            .with_variable("port", options.port.to_string())
            .with_variable("controllers", controllers)
            .with_variable("controllerEnding", controller_ending)
            .render(&self.templates.boilerplate(Boilerplate::KiteConfig)?);

        let project_file = ProjectFile::from_config(config, src, &options.cli_version);

        let mut structure = ProjectStructure::new(config.project_dir());
        for (_, kind_config) in config.kinds() {
            structure.add_directory(&kind_config.folder);
        }
        structure.add_file(TSCONFIG_FILE, tsconfig(options)?);
        structure.add_file(
            src.join(&options.errors_file),
            self.templates.boilerplate(Boilerplate::Errors)?,
        );
        structure.add_file(src.join(KITE_CONFIG_FILE), kite_config);
        structure.add_file(
            src.join(&options.entry_point),
            self.templates.boilerplate(Boilerplate::App)?,
        );
        structure.add_file(PROJECT_FILE_JSON, to_pretty_json(&project_file)?);

        validator::validate_project_structure(&structure)?;
        Ok(structure)
    }

    /// Lay out a project in `project_dir` and create the greeting controller.
    #[instrument(skip_all, fields(project_dir = %project_dir.display()))]
    pub fn init(&self, project_dir: &Path, options: &InitOptions) -> KiteResult<InitReport> {
        info!("Initializing Kite project");

        let config = self.layout(project_dir, options)?;
        let structure = self.plan(&config, options)?;

        let mut created = Vec::new();
        let mut skipped = Vec::new();
        self.materialize(&structure, &mut created, &mut skipped)?;

        let greeting = self.modules.generate(
            &ModuleRequest::new(GREETING, ModuleKind::Controller),
            &config,
            &GenerateOptions::default(),
        )?;
        if greeting.written {
            created.push(greeting.module.path.clone());
        } else {
            skipped.push(greeting.module.path.clone());
        }

        info!(
            created = created.len(),
            skipped = skipped.len(),
            "Project initialized"
        );

        Ok(InitReport {
            project_dir: config.project_dir().to_path_buf(),
            created,
            skipped,
            greeting,
        })
    }

    /// Write every entry that is not already present.
    fn materialize(
        &self,
        structure: &ProjectStructure,
        created: &mut Vec<PathBuf>,
        skipped: &mut Vec<PathBuf>,
    ) -> KiteResult<()> {
        for entry in structure.entries() {
            let path = structure.root().join(entry.path());

            match entry {
                FsEntry::Directory(_) => {
                    if self.filesystem.dir_exists(&path)? {
                        skipped.push(path);
                        continue;
                    }
                    self.filesystem.create_dir_all(&path)?;
                }
                FsEntry::File(file) => {
                    if self.filesystem.file_exists(&path)? {
                        debug!(path = %path.display(), "Exists, skipping");
                        skipped.push(path);
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_new(&path, &file.content)?;
                }
            }

            debug!(path = %path.display(), "Created");
            created.push(path);
        }

        Ok(())
    }
}

/// Folder the router scans, relative to the source root, and the compiled
/// controller file ending it matches (`.controller.js`).
fn router_target(config: &ProjectConfig) -> KiteResult<(String, String)> {
    let folder = config.kind_folder(ModuleKind::Controller)?;
    let relative = folder
        .strip_prefix(config.root_dir())
        .unwrap_or_else(|_| Path::new(ModuleKind::Controller.default_folder()));
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let suffix = &config.kind(ModuleKind::Controller)?.file_suffix;
    let ending = if suffix.is_empty() {
        ".js".to_string()
    } else {
        format!(".{suffix}.js")
    };

    Ok((relative, ending))
}

fn tsconfig(options: &InitOptions) -> KiteResult<String> {
    let out_dir = slash_path(&options.out_dir);

    let value = json!({
        "compilerOptions": {
            "module": "commonjs",
            "target": "es2017",
            "moduleResolution": "node",
            "experimentalDecorators": true,
            "emitDecoratorMetadata": true,
            "sourceMap": options.source_map,
            "rootDir": slash_path(&options.src_dir),
            "outDir": out_dir.clone(),
        },
        "exclude": ["node_modules", out_dir],
    });

    to_pretty_json(&value)
}

/// JSON with four-space indentation, as `tsc --init` and npm write it.
fn to_pretty_json<T: Serialize>(value: &T) -> KiteResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;

    let mut text = String::from_utf8(buf).context("Serialized JSON is not UTF-8")?;
    text.push('\n');
    Ok(text)
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{DomainError, naming};
    use crate::error::KiteError;

    struct StubTemplates;

    impl TemplateProvider for StubTemplates {
        fn module_template(&self, kind: ModuleKind) -> KiteResult<String> {
            Ok(format!("export class $NAME${} {{}}\n", naming::to_pascal_case(kind.as_str())))
        }

        fn boilerplate(&self, file: Boilerplate) -> KiteResult<String> {
            Ok(match file {
                Boilerplate::KiteConfig => {
                    "import { errors } from '$errors$';\nhost '$hostname$' port $port$\n\
                     router '$controllers$' '$controllerEnding$'\n"
                        .into()
                }
                other => format!("// {other}\n"),
            })
        }
    }

    /// Filesystem where nothing exists and every write succeeds.
    fn empty_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_dir_exists().returning(|_| Ok(false));
        fs.expect_file_exists().returning(|_| Ok(false));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_new().returning(|_, _| Ok(()));
        fs
    }

    fn service(fs: MockFilesystem, module_fs: MockFilesystem) -> ProjectService {
        ProjectService::new(
            Box::new(fs),
            Box::new(StubTemplates),
            ModuleService::new(Box::new(module_fs), Box::new(StubTemplates)),
        )
    }

    fn file_content<'a>(structure: &'a ProjectStructure, path: &str) -> &'a str {
        structure
            .files()
            .find(|f| f.path == Path::new(path))
            .map(|f| f.content.as_str())
            .unwrap()
    }

    #[test]
    fn layout_embeds_builtin_templates() {
        let svc = service(MockFilesystem::new(), MockFilesystem::new());
        let config = svc.layout(Path::new("/p"), &InitOptions::default()).unwrap();

        for kind in ModuleKind::ALL {
            assert!(config.kind(kind).unwrap().has_template());
        }
        assert_eq!(config.root_dir(), Path::new("/p/src"));
    }

    #[test]
    fn plan_lists_boilerplate_in_order() {
        let svc = service(MockFilesystem::new(), MockFilesystem::new());
        let options = InitOptions::default();
        let config = svc.layout(Path::new("/p"), &options).unwrap();
        let structure = svc.plan(&config, &options).unwrap();

        let dirs: Vec<_> = structure.directories().map(|d| d.path.clone()).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("src/controllers"),
                PathBuf::from("src/models"),
                PathBuf::from("src/services"),
            ]
        );

        let files: Vec<_> = structure.files().map(|f| f.path.clone()).collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("tsconfig.json"),
                PathBuf::from("src/errors.ts"),
                PathBuf::from("src/kite.config.ts"),
                PathBuf::from("src/app.server.ts"),
                PathBuf::from("kite-cli.json"),
            ]
        );
    }

    #[test]
    fn plan_substitutes_kite_config_placeholders() {
        let svc = service(MockFilesystem::new(), MockFilesystem::new());
        let options = InitOptions {
            hostname: "0.0.0.0".into(),
            port: 8080,
            errors_file: "failures.ts".into(),
            ..InitOptions::default()
        };
        let config = svc.layout(Path::new("/p"), &options).unwrap();
        let structure = svc.plan(&config, &options).unwrap();

        assert_eq!(
            file_content(&structure, "src/kite.config.ts"),
            "import { errors } from './failures';\nhost '0.0.0.0' port 8080\n\
             router 'controllers' '.controller.js'\n"
        );
    }

    #[test]
    fn router_follows_controller_layout() {
        let config = ProjectConfig::new("/p", "src").with_kind(
            ModuleKind::Controller,
            crate::domain::KindConfig::builtin(ModuleKind::Controller, "src/http").with_suffix(""),
        );
        assert_eq!(
            router_target(&config).unwrap(),
            ("http/controllers".to_string(), ".js".to_string())
        );
    }

    #[test]
    fn tsconfig_is_four_space_json() {
        let options = InitOptions {
            source_map: false,
            out_dir: "build".into(),
            ..InitOptions::default()
        };
        let text = tsconfig(&options).unwrap();

        assert!(text.contains("\n    \"compilerOptions\": {\n        "));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["compilerOptions"]["rootDir"], "src");
        assert_eq!(value["compilerOptions"]["outDir"], "build");
        assert_eq!(value["compilerOptions"]["sourceMap"], false);
    }

    #[test]
    fn project_file_records_version_and_templates() {
        let svc = service(MockFilesystem::new(), MockFilesystem::new());
        let options = InitOptions {
            cli_version: "9.9.9".into(),
            ..InitOptions::default()
        };
        let config = svc.layout(Path::new("/p"), &options).unwrap();
        let structure = svc.plan(&config, &options).unwrap();

        let file: ProjectFile =
            serde_json::from_str(file_content(&structure, "kite-cli.json")).unwrap();
        assert_eq!(file.cli_version, "9.9.9");
        assert_eq!(
            file.entry(ModuleKind::Model).unwrap().template.as_deref(),
            Some("export class $NAME$Model {}\n")
        );
    }

    #[test]
    fn entry_point_colliding_with_config_is_rejected() {
        let svc = service(MockFilesystem::new(), MockFilesystem::new());
        let options = InitOptions {
            entry_point: "kite.config.ts".into(),
            ..InitOptions::default()
        };
        let config = svc.layout(Path::new("/p"), &options).unwrap();

        let err = svc.plan(&config, &options).unwrap_err();
        assert!(matches!(
            err,
            KiteError::Domain(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn init_writes_everything_on_empty_project() {
        let report = service(empty_fs(), empty_fs())
            .init(Path::new("/p"), &InitOptions::default())
            .unwrap();

        // three folders, five files, one greeting controller
        assert_eq!(report.created.len(), 9);
        assert!(report.skipped.is_empty());
        assert!(report.greeting.written);
        assert_eq!(report.greeting.module.identifier, "Greeting");
    }

    #[test]
    fn init_skips_existing_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_dir_exists().returning(|_| Ok(true));
        fs.expect_file_exists()
            .returning(|p| Ok(p.ends_with("tsconfig.json")));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_new()
            .withf(|p, _| !p.ends_with("tsconfig.json"))
            .times(4)
            .returning(|_, _| Ok(()));

        let report = service(fs, empty_fs())
            .init(Path::new("/p"), &InitOptions::default())
            .unwrap();

        assert!(report.skipped.contains(&PathBuf::from("/p/tsconfig.json")));
        assert!(report.skipped.contains(&PathBuf::from("/p/src/controllers")));
        assert!(report.created.contains(&PathBuf::from("/p/src/errors.ts")));
    }
}
