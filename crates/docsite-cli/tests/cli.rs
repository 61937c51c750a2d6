use assert_cmd::Command;
use docsite_test_support::{write_file, SampleSite};
use predicates::prelude::*;
use tempfile::TempDir;

fn docsite() -> Command {
    Command::cargo_bin("docsite").expect("binary")
}

#[test]
fn check_sample_site_succeeds() {
    let site = SampleSite::new();

    docsite()
        .current_dir(site.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "checked 4 plugin(s), 4 sidebar(s), 1 redirect(s): 0 error(s), 0 warning(s)",
        ));
}

#[test]
fn check_reports_errors_with_exit_code_one() {
    let site = SampleSite::new();
    site.write(
        "tutorials/sidebars.toml",
        r#"tutorialsSidebar = ["index", { type = "category", label = "Loop", items = [{ type = "ref", id = "tutorialsSidebar" }] }]"#,
    );

    docsite()
        .current_dir(site.path())
        .args(["check", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"rule\": \"sidebar\""))
        .stdout(predicate::str::contains("cyclic sidebar reference"));
}

#[test]
fn cwd_flag_selects_site() {
    let site = SampleSite::new();
    let elsewhere = TempDir::new().expect("tempdir");

    docsite()
        .current_dir(elsewhere.path())
        .arg("--cwd")
        .arg(site.path())
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/tutorials/getting-started/\ttutorials:getting-started/index"));
}

#[test]
fn config_override_takes_precedence() {
    let site = SampleSite::new();
    site.write("strict.toml", "on_broken_links = \"throw\"\n");
    site.edit_config("to = \"/\" }", "to = \"/blog\" }");

    docsite()
        .current_dir(site.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("warning[broken-footer-link]"));

    docsite()
        .current_dir(site.path())
        .args(["--config", "strict.toml", "check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[broken-footer-link] footer:"));
}

#[test]
fn log_policy_findings_follow_docsite_log() {
    let site = SampleSite::new();
    site.edit_config("on_broken_links = \"warn\"", "on_broken_links = \"log\"");
    site.edit_config("to = \"/\" }", "to = \"/blog\" }");

    docsite()
        .current_dir(site.path())
        .env("DOCSITE_LOG", "info")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 error(s), 0 warning(s)"))
        .stderr(predicate::str::contains(
            "link 'Documentation' points to unknown route '/blog'",
        ));

    docsite()
        .current_dir(site.path())
        .env_remove("DOCSITE_LOG")
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown route '/blog'").not());
}

#[test]
fn sidebar_prints_tree() {
    let site = SampleSite::new();

    docsite()
        .current_dir(site.path())
        .args(["sidebar", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aboutSidebar\n  - index (Welcome)\n  - Tutorials -> /tutorials/\n"));
}

#[test]
fn sidebar_unknown_plugin_exits_two() {
    let site = SampleSite::new();

    docsite()
        .current_dir(site.path())
        .args(["sidebar", "refrence"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "unknown docs plugin 'refrence' (did you mean 'reference'?)",
        ));
}

#[test]
fn redirects_lookup_tolerates_trailing_slash() {
    let site = SampleSite::new();

    docsite()
        .current_dir(site.path())
        .args(["redirects", "--lookup", "/Intro/first/"])
        .assert()
        .success()
        .stdout("/tutorials/getting-started/\n");

    docsite()
        .current_dir(site.path())
        .args(["redirects", "--lookup", "/missing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no redirect for '/missing'"));
}

#[test]
fn invalid_configuration_lists_every_problem() {
    let temp = TempDir::new().expect("tempdir");
    write_file(
        temp.path(),
        "docsite.toml",
        r#"
[[plugins]]
kind = "content-docs"
id = "docs"

[[plugins]]
kind = "content-docs"
id = "docs"
"#,
    );

    docsite()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("title"))
        .stderr(predicate::str::contains("base_url"))
        .stderr(predicate::str::contains("duplicate docs plugin id 'docs'"));
}
