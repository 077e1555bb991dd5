use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

fn coverletter(root: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("coverletter"));
    cmd.current_dir(root);
    cmd.env("XDG_CONFIG_HOME", root.join("xdg-config"));
    cmd.env("XDG_DATA_HOME", root.join("xdg-data"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn prompts_once_per_distinct_variable() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("letter.txt"),
        "Dear ${who},\nI want to join ${company}.\nThanks ${who}",
    )
    .unwrap();

    coverletter(tmp.path())
        .args(["--path", "letter.txt"])
        .write_stdin("Jane\nAcme\n")
        .assert()
        .success()
        .stdout(contains("Text for who: Text for company: "));
}

#[test]
fn exports_pdf_with_given_name() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("letter.txt"), "Hello ${name}\n\nBye").unwrap();

    coverletter(tmp.path())
        .args(["--pdf", "--path", "letter.txt"])
        .write_stdin("World\nfinal\n")
        .assert()
        .success()
        .stdout(contains("PDF saved: final.pdf"));

    let bytes = fs::read(tmp.path().join("final.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn exports_pdf_with_dated_default_name() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("acme.txt"), "Hi ${x}").unwrap();

    coverletter(tmp.path())
        .args(["-p", "--path", "acme.txt"])
        .write_stdin("there\n\n")
        .assert()
        .success()
        .stdout(contains("PDF saved: acme_"));

    let pdfs: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".pdf"))
        .collect();
    assert_eq!(pdfs.len(), 1);
    // acme_MM_DD_YYYY.pdf
    assert!(pdfs[0].starts_with("acme_"));
    assert_eq!(pdfs[0].len(), "acme_00_00_0000.pdf".len());
}

#[test]
fn missing_template_file_exits_1() {
    let tmp = tempdir().unwrap();

    coverletter(tmp.path())
        .args(["--path", "missing.txt"])
        .assert()
        .code(1)
        .stderr(contains("invalid path to template"));
}

#[test]
fn end_of_input_while_prompting_exits_0() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("letter.txt"), "${a} ${b}").unwrap();

    coverletter(tmp.path())
        .args(["--path", "letter.txt"])
        .write_stdin("only one\n")
        .assert()
        .success();
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn missing_display_warns_and_succeeds() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("letter.txt"), "Hi ${who}").unwrap();

    coverletter(tmp.path())
        .env_remove("DISPLAY")
        .env_remove("WAYLAND_DISPLAY")
        .args(["--path", "letter.txt"])
        .write_stdin("Jane\n")
        .assert()
        .success()
        .stderr(contains(
            "Warning: could not save content to clipboard: clipboard integration is not supported",
        ))
        .stdout(contains("Content saved to clipboard.").not());
}
