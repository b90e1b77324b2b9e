//! End-to-end tests for the nfsx binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const SAMPLE: &str = "\
Número da Nota: 42
Série: A
Data Emissão: 01/03/2024
CNPJ: 12.345.678/0001-99

Descrição dos Serviços:
Consultoria em TI

Valor dos Serviços: R$ 150,00
";

fn nfsx() -> Command {
    Command::cargo_bin("nfsx").unwrap()
}

#[test]
fn process_reports_empty_input_folder() {
    let dir = tempfile::tempdir().unwrap();

    nfsx()
        .current_dir(dir.path())
        .args(["process", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No document files found"));

    // The layout is bootstrapped but stays empty.
    assert!(dir.path().join("pdf_input").is_dir());
    assert_eq!(fs::read_dir(dir.path().join("xml_output")).unwrap().count(), 0);
    assert_eq!(fs::read_dir(dir.path().join("processed_pdf")).unwrap().count(), 0);
    assert_eq!(fs::read_dir(dir.path().join("failed")).unwrap().count(), 0);
}

#[test]
fn process_converts_and_archives() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("pdf_input")).unwrap();
    fs::write(dir.path().join("pdf_input/nota.txt"), SAMPLE).unwrap();

    nfsx()
        .current_dir(dir.path())
        .args(["process", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 0 failed"));

    let xml = fs::read_to_string(dir.path().join("xml_output/nota.xml")).unwrap();
    assert!(xml.contains("<Numero>42</Numero>"));
    assert!(dir.path().join("processed_pdf/nota.txt").exists());
    assert!(!dir.path().join("pdf_input/nota.txt").exists());
}

#[test]
fn process_quarantines_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("pdf_input")).unwrap();
    fs::write(dir.path().join("pdf_input/ruim.pdf"), b"not a pdf").unwrap();

    nfsx()
        .current_dir(dir.path())
        .args(["process", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful, 1 failed"));

    assert!(dir.path().join("failed/ruim.pdf").exists());
    assert_eq!(fs::read_dir(dir.path().join("xml_output")).unwrap().count(), 0);
}

#[test]
fn config_show_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();

    nfsx()
        .current_dir(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pdf_input"))
        .stdout(predicate::str::contains("uniquify"));
}

#[test]
fn config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();

    nfsx()
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    assert!(dir.path().join("nfsx.json").exists());

    // Second init without --force refuses to clobber.
    nfsx()
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .failure();
}
