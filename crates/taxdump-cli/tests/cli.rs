//! End-to-end tests for the `taxids-to-pplacer` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NODES: &str = "\
1\t|\t1\t|\tno rank\t|\t\t|\t8\t|\t0\t|\t1\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t\t|
8\t|\t1\t|\tsuperkingdom\t|\t\t|\t0\t|\t0\t|\t11\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t\t|
9\t|\t8\t|\tgenus\t|\t\t|\t0\t|\t1\t|\t11\t|\t1\t|\t0\t|\t1\t|\t0\t|\t0\t|\t\t|
10\t|\t9\t|\tspecies\t|\tTE\t|\t0\t|\t1\t|\t11\t|\t1\t|\t0\t|\t1\t|\t1\t|\t0\t|\t\t|
";

const NAMES: &str = "\
1\t|\troot\t|\t\t|\tscientific name\t|
8\t|\tBacteria\t|\tBacteria <prokaryotes>\t|\tscientific name\t|
9\t|\tTestus\t|\t\t|\tscientific name\t|
10\t|\tTestus exampleus\t|\t\t|\tscientific name\t|
10\t|\tTestus example\t|\t\t|\tsynonym\t|
";

const DIVISIONS: &str = "0\t|\tBCT\t|\tBacteria\t|\t\t|\n";

const HEADER: &str =
    "tax_id,parent_id,rank,tax_name,root,domain,phylum,class,order,family,genus,species";

const SPECIES_ROW: &str = "10,9,species,Testus exampleus,1,8,,,,,9,10";

fn taxonomy_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("nodes.dmp"), NODES).unwrap();
    fs::write(dir.path().join("names.dmp"), NAMES).unwrap();
    fs::write(dir.path().join("division.dmp"), DIVISIONS).unwrap();
    dir
}

fn id_file(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("ids.txt");
    fs::write(&path, contents).unwrap();
    path
}

fn command() -> Command {
    let mut cmd = Command::cargo_bin("taxids-to-pplacer").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("NCBI_TAXONOMY_DIR");
    cmd
}

#[test]
fn test_writes_pplacer_rows() {
    let taxonomy = taxonomy_dir();
    let ids = id_file(taxonomy.path(), "10\n9\n");

    command()
        .arg("-f")
        .arg(&ids)
        .arg("-d")
        .arg(taxonomy.path())
        .assert()
        .success()
        .stdout(format!("{SPECIES_ROW}\n9,8,genus,Testus,1,8,,,,,9,\n"));
}

#[test]
fn test_header_row() {
    let taxonomy = taxonomy_dir();
    let ids = id_file(taxonomy.path(), "# comment\n10\n\n10\n");

    command()
        .arg("--file")
        .arg(&ids)
        .arg("--data-dir")
        .arg(taxonomy.path())
        .arg("--header")
        .assert()
        .success()
        .stdout(format!("{HEADER}\n{SPECIES_ROW}\n"));
}

#[test]
fn test_unknown_ids_are_skipped() {
    let taxonomy = taxonomy_dir();
    let ids = id_file(taxonomy.path(), "404\n10\n");

    command()
        .arg("-f")
        .arg(&ids)
        .arg("-d")
        .arg(taxonomy.path())
        .assert()
        .success()
        .stdout(format!("{SPECIES_ROW}\n"))
        .stderr(predicate::str::contains("404"));
}

#[test]
fn test_data_dir_from_env() {
    let taxonomy = taxonomy_dir();
    let ids = id_file(taxonomy.path(), "10\n");

    command()
        .env("NCBI_TAXONOMY_DIR", taxonomy.path())
        .arg("-f")
        .arg(&ids)
        .assert()
        .success()
        .stdout(format!("{SPECIES_ROW}\n"));
}

#[test]
fn test_missing_names_file_fails() {
    let taxonomy = taxonomy_dir();
    fs::remove_file(taxonomy.path().join("names.dmp")).unwrap();
    let ids = id_file(taxonomy.path(), "10\n");

    command()
        .arg("-f")
        .arg(&ids)
        .arg("-d")
        .arg(taxonomy.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("names.dmp"));
}

#[test]
fn test_missing_id_file_fails() {
    let taxonomy = taxonomy_dir();

    command()
        .arg("-f")
        .arg(taxonomy.path().join("absent.txt"))
        .arg("-d")
        .arg(taxonomy.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn test_unresolved_id_reported_under_quiet_log_filter() {
    let taxonomy = taxonomy_dir();
    let ids = id_file(taxonomy.path(), "404\n10\n");

    command()
        .env("RUST_LOG", "error")
        .arg("-f")
        .arg(&ids)
        .arg("-d")
        .arg(taxonomy.path())
        .assert()
        .success()
        .stdout(format!("{SPECIES_ROW}\n"))
        .stderr("TaxID 404 not found in taxonomy nodes\n");
}

#[test]
fn test_missing_data_dir_fails() {
    let taxonomy = taxonomy_dir();
    let ids = id_file(taxonomy.path(), "10\n");

    command()
        .arg("-f")
        .arg(&ids)
        .arg("-d")
        .arg(taxonomy.path().join("nowhere"))
        .assert()
        .failure()
        .stdout("")
        .stderr(
            predicate::str::contains("Directory not found")
                .and(predicate::str::contains("nowhere")),
        );
}
