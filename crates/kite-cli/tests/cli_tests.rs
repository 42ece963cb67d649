//! End-to-end tests for the `kite` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kite(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kite").unwrap();
    cmd.current_dir(dir)
        .env_remove("KITE_TEMPLATES_DIR")
        .env_remove("KITE_PROJECT_DIR")
        .env_remove("KITE_PROJECT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn npm_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("package.json"),
        r#"{ "name": "app", "version": "1.0.0", "dependencies": {} }"#,
    )
    .unwrap();
    tmp
}

fn initialised_project() -> TempDir {
    let tmp = npm_project();
    kite(tmp.path()).arg("init").assert().success();
    tmp
}

fn read(dir: &TempDir, rel: &str) -> String {
    fs::read_to_string(dir.path().join(rel)).unwrap()
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    kite(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("controller"))
        .stdout(predicate::str::contains("model"))
        .stdout(predicate::str::contains("service"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    kite(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    kite(tmp.path()).arg("view").assert().code(2);
}

// ── init ──────────────────────────────────────────────────────────────────────

#[test]
fn init_requires_package_json() {
    let tmp = TempDir::new().unwrap();
    kite(tmp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("package.json"))
        .stderr(predicate::str::contains("npm init"));

    assert!(!tmp.path().join("kite-cli.json").exists());
}

#[test]
fn init_lays_out_project() {
    let tmp = npm_project();
    kite(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("create src/controllers/greeting.controller.ts"))
        .stdout(predicate::str::contains("npm install kite-framework --save"));

    for dir in ["src/controllers", "src/models", "src/services"] {
        assert!(tmp.path().join(dir).is_dir(), "{dir} missing");
    }

    let tsconfig: serde_json::Value = serde_json::from_str(&read(&tmp, "tsconfig.json")).unwrap();
    assert_eq!(tsconfig["compilerOptions"]["rootDir"], "src");
    assert_eq!(tsconfig["compilerOptions"]["outDir"], "dist");
    assert_eq!(tsconfig["compilerOptions"]["sourceMap"], true);

    let config = read(&tmp, "src/kite.config.ts");
    assert!(config.contains("from './errors'"));
    assert!(config.contains("hostname: '127.0.0.1'"));
    assert!(config.contains("port: 4000"));

    assert!(read(&tmp, "src/app.server.ts").contains("new Kite("));
    assert!(read(&tmp, "src/controllers/greeting.controller.ts")
        .contains("export class GreetingController"));

    let project: serde_json::Value = serde_json::from_str(&read(&tmp, "kite-cli.json")).unwrap();
    assert_eq!(project["srcDir"], "src");
}

#[test]
fn init_flags_shape_the_project() {
    let tmp = npm_project();
    kite(tmp.path())
        .args([
            "init",
            "--src",
            "app",
            "--out",
            "build",
            "--no-source-map",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--entry",
            "main.ts",
        ])
        .assert()
        .success();

    assert!(tmp.path().join("app/controllers/greeting.controller.ts").is_file());
    assert!(tmp.path().join("app/main.ts").is_file());

    let tsconfig: serde_json::Value = serde_json::from_str(&read(&tmp, "tsconfig.json")).unwrap();
    assert_eq!(tsconfig["compilerOptions"]["outDir"], "build");
    assert_eq!(tsconfig["compilerOptions"]["sourceMap"], false);

    let config = read(&tmp, "app/kite.config.ts");
    assert!(config.contains("hostname: '0.0.0.0'"));
    assert!(config.contains("port: 8080"));
    assert!(config.contains("path.join(__dirname, 'controllers'), '.controller.js'"));
}

#[test]
fn host_value_is_written_literally() {
    let tmp = npm_project();
    kite(tmp.path())
        .args(["init", "--host", "$port$", "--port", "9000"])
        .assert()
        .success();

    let config = read(&tmp, "src/kite.config.ts");
    assert!(config.contains("hostname: '$port$'"));
    assert!(config.contains("port: 9000"));
}

#[test]
fn init_twice_keeps_existing_files() {
    let tmp = initialised_project();
    fs::write(tmp.path().join("src/errors.ts"), "// mine\n").unwrap();

    kite(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists src/errors.ts"));

    assert_eq!(read(&tmp, "src/errors.ts"), "// mine\n");
}

#[test]
fn init_reports_listed_framework() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("package.json"),
        r#"{ "name": "app", "dependencies": { "kite-framework": "^1.0.0" } }"#,
    )
    .unwrap();

    kite(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("npm install kite-framework --save").not());
}

#[test]
fn init_json_output() {
    let tmp = npm_project();
    let out = kite(tmp.path())
        .args(["--output-format", "json", "init"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(report["created"].as_array().unwrap().len() > 5);
    assert_eq!(report["greeting"]["identifier"], "Greeting");
    assert_eq!(report["framework"]["listed"], false);
}

// ── controller / model / service ──────────────────────────────────────────────

#[test]
fn controller_is_created() {
    let tmp = initialised_project();
    kite(tmp.path())
        .args(["controller", "user"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create src/controllers/user.controller.ts"));

    let text = read(&tmp, "src/controllers/user.controller.ts");
    assert!(text.contains("export class UserController"));
    assert!(!text.contains("$NAME$"));
}

#[test]
fn api_alias_generates_controller() {
    let tmp = initialised_project();
    kite(tmp.path()).args(["api", "orders"]).assert().success();
    assert!(tmp.path().join("src/controllers/orders.controller.ts").is_file());
}

#[test]
fn repeated_module_is_not_an_error() {
    let tmp = initialised_project();
    kite(tmp.path())
        .args(["controller", "greeting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert!(read(&tmp, "src/controllers/greeting.controller.ts").contains("GreetingController"));
}

#[test]
fn model_name_is_pascal_cased() {
    let tmp = initialised_project();
    kite(tmp.path()).args(["model", "user-profile"]).assert().success();

    let text = read(&tmp, "src/models/user-profile.model.ts");
    assert!(text.contains("export class UserProfileModel"));
}

#[test]
fn nested_names_create_sub_folders() {
    let tmp = initialised_project();
    kite(tmp.path()).args(["s", "billing/invoice"]).assert().success();
    assert!(tmp.path().join("src/services/billing/invoice.service.ts").is_file());
}

#[test]
fn invalid_name_exits_with_user_error() {
    let tmp = initialised_project();
    kite(tmp.path())
        .args(["model", "9lives"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid model name '9lives'"))
        .stderr(predicate::str::contains("--grammar extended").not());

    assert!(!tmp.path().join("src/models/9lives.model.ts").exists());
}

#[test]
fn simple_grammar_rejects_hyphens() {
    let tmp = initialised_project();
    kite(tmp.path())
        .args(["model", "user-profile", "--grammar", "simple"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--grammar extended"));
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = initialised_project();
    kite(tmp.path())
        .args(["service", "mailer", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would create src/services/mailer.service.ts"))
        .stdout(predicate::str::contains("export class MailerService"));

    assert!(!tmp.path().join("src/services/mailer.service.ts").exists());
}

#[test]
fn json_output_describes_resolved_module() {
    let tmp = initialised_project();
    let out = kite(tmp.path())
        .args(["--output-format", "json", "controller", "user"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let module: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(module["kind"], "controller");
    assert_eq!(module["identifier"], "User");
    assert_eq!(module["outcome"]["status"], "would-create");
    assert_eq!(module["written"], true);
    assert!(
        module["path"]
            .as_str()
            .unwrap()
            .ends_with("user.controller.ts")
    );
}

#[test]
fn template_override_rewrites_root_imports() {
    let tmp = initialised_project();
    let stub = tmp.path().join("stub.ts");
    fs::write(
        &stub,
        "import { errors } from '~/errors';\n\nexport class $NAME$Api {}\n",
    )
    .unwrap();

    kite(tmp.path())
        .args(["controller", "admin/user", "--template"])
        .arg(&stub)
        .assert()
        .success();

    let text = read(&tmp, "src/controllers/admin/user.controller.ts");
    assert!(text.contains("from '../../errors'"));
    assert!(text.contains("export class UserApi {}"));
}

#[test]
fn missing_template_file_is_not_found() {
    let tmp = initialised_project();
    kite(tmp.path())
        .args(["model", "user", "--template", "absent.ts"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template file not found"));
}

#[test]
fn module_outside_project_is_configuration_error() {
    let tmp = npm_project();
    kite(tmp.path())
        .args(["controller", "user"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("kite init"));
}

#[test]
fn project_dir_flag_targets_other_directory() {
    let project = initialised_project();
    let elsewhere = TempDir::new().unwrap();

    kite(elsewhere.path())
        .arg("-C")
        .arg(project.path())
        .args(["model", "order"])
        .assert()
        .success();

    assert!(project.path().join("src/models/order.model.ts").is_file());
}

#[test]
fn project_config_flag_reads_named_file() {
    let project = initialised_project();
    fs::create_dir_all(project.path().join("src/api")).unwrap();
    let layout = project.path().join("layout.json");
    fs::write(
        &layout,
        r#"{ "srcDir": "src", "controller": { "folder": "src/api" } }"#,
    )
    .unwrap();
    let elsewhere = TempDir::new().unwrap();

    kite(elsewhere.path())
        .arg("--project-config")
        .arg(&layout)
        .args(["controller", "user"])
        .assert()
        .success();

    assert!(project.path().join("src/api/user.controller.ts").is_file());
    assert!(!project.path().join("src/controllers/user.controller.ts").exists());
}

#[test]
fn missing_project_config_file_is_configuration_error() {
    let project = initialised_project();
    kite(project.path())
        .args(["--project-config", "absent.json", "model", "order"])
        .assert()
        .code(4);
}

#[test]
fn folder_outside_project_is_rejected() {
    let project = initialised_project();
    fs::write(
        project.path().join("kite-cli.json"),
        r#"{ "srcDir": "src", "service": { "folder": "../outside" } }"#,
    )
    .unwrap();

    kite(project.path())
        .args(["service", "mailer"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("outside the project directory"));
}

// ── config / completions ──────────────────────────────────────────────────────

#[test]
fn config_show_prints_layout() {
    let tmp = initialised_project();
    let out = kite(tmp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(config.is_object());
}

#[test]
fn config_path_points_at_project_file() {
    let tmp = initialised_project();
    kite(tmp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kite-cli.json"));
}

#[test]
fn settings_file_supplies_init_defaults() {
    let tmp = npm_project();
    let settings = tmp.path().join("settings.toml");
    fs::write(&settings, "[init]\nport = 9000\n").unwrap();

    kite(tmp.path())
        .arg("--config")
        .arg(&settings)
        .arg("init")
        .assert()
        .success();

    assert!(read(&tmp, "src/kite.config.ts").contains("port: 9000"));
}

#[test]
fn environment_overrides_settings() {
    let tmp = npm_project();
    kite(tmp.path())
        .env("KITE__INIT__HOSTNAME", "10.0.0.1")
        .arg("init")
        .assert()
        .success();

    assert!(read(&tmp, "src/kite.config.ts").contains("hostname: '10.0.0.1'"));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    kite(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kite"));
}
