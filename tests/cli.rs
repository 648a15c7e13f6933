use std::path::{Path, PathBuf};

use assert_cmd::Command;
use calamine::{open_workbook_auto, Data, Reader};
use predicates::prelude::*;

fn kolek(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kolek").unwrap();
    cmd.env("KOLEK_CONFIG_DIR", config_dir);
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_xlsx(dir: &Path, name: &str, headers: &[&str], rows: &[Vec<Data>]) -> PathBuf {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (c, h) in headers.iter().enumerate() {
        sheet.write_string(0, c as u16, *h).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32 + 1, c as u16);
            match cell {
                Data::String(s) => {
                    sheet.write_string(r, c, s).unwrap();
                }
                Data::Float(f) => {
                    sheet.write_number(r, c, *f).unwrap();
                }
                _ => {}
            }
        }
    }
    let path = dir.join(name);
    workbook.save(&path).unwrap();
    path
}

fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Sheet1".to_string()]);
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

const PREVIOUS_CSV: &str = "\
NOREKENING,_PRODUK,NAMA,_KOLEK,PLAFOND,BAKIDEBET,PETUGAS,ALAMAT
1001,KUR,ANI,1,10000000,8000000,RIA,Jl. Mawar
1002,KUR,BUDI,3,5000000,4500000,RIA,Jl. Melati
1003,UMUM,CICI,2,2000000,1000000,DONI,Jl. Kenanga
";

const CURRENT_CSV: &str = "\
NOREKENING,_PRODUK,NAMA,_KOLEK,PLAFOND,BAKIDEBET,PETUGAS
1001,KUR,ANI,2,10000000,7500000,RIA
1002,KUR,BUDI,1,5000000,4000000,RIA
1003,UMUM,CICI,2,2000000,900000,DONI
1004,UMUM,DEDI,,3000000,3000000,DONI
";

#[test]
fn test_compare_writes_classified_export() {
    let dir = tempfile::tempdir().unwrap();
    let prev = write_file(dir.path(), "bulan_lalu.csv", PREVIOUS_CSV);
    let curr = write_file(dir.path(), "saat_ini.csv", CURRENT_CSV);
    let out = dir.path().join("hasil.xlsx");

    kolek(dir.path())
        .args(["compare", prev.to_str().unwrap(), curr.to_str().unwrap(), "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tidak Berubah"))
        .stdout(predicate::str::contains("Wrote"));

    let rows = read_sheet(&out);
    assert_eq!(rows.len(), 5);
    assert_eq!(
        rows[0],
        vec![
            "NOREKENING",
            "_PRODUK",
            "NAMA",
            "_KOLEK_SAAT_INI",
            "PLAFOND",
            "BAKIDEBET",
            "PETUGAS",
            "_KOLEK_BULAN_LALU",
            "Status"
        ]
    );
    let statuses: Vec<&str> = rows[1..].iter().map(|r| r[8].as_str()).collect();
    assert_eq!(statuses, vec!["Naik", "Turun", "Tidak Berubah", "Baru"]);
    assert_eq!(rows[1][4], "Rp 10,000,000");
    assert_eq!(rows[1][5], "Rp 7,500,000");
    assert_eq!(rows[4][7], "0");
}

#[test]
fn test_compare_reads_xlsx_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let headers = ["NOREKENING", "NAMA", "_KOLEK"];
    let prev = write_xlsx(
        dir.path(),
        "lalu.xlsx",
        &headers,
        &[vec![Data::String("A-01".into()), Data::String("ANI".into()), Data::Float(1.0)]],
    );
    let curr = write_xlsx(
        dir.path(),
        "kini.xlsx",
        &headers,
        &[
            vec![Data::String("A-01".into()), Data::String("ANI".into()), Data::Float(4.0)],
            vec![Data::String("A-02".into()), Data::String("BUDI".into()), Data::String("-".into())],
        ],
    );
    let out = dir.path().join("hasil.xlsx");

    kolek(dir.path())
        .args(["compare", prev.to_str().unwrap(), curr.to_str().unwrap(), "--no-view", "--output"])
        .arg(&out)
        .assert()
        .success();

    let rows = read_sheet(&out);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["NOREKENING", "NAMA", "_KOLEK_SAAT_INI", "_KOLEK_BULAN_LALU", "Status"]);
    assert_eq!(rows[1][4], "Naik");
    assert_eq!(rows[2][4], "Baru");
}

#[test]
fn test_compare_missing_column_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let prev = write_file(dir.path(), "bulan_lalu.csv", "NOREKENING,NAMA\n1001,ANI\n");
    let curr = write_file(dir.path(), "saat_ini.csv", CURRENT_CSV);
    let out = dir.path().join("hasil.xlsx");

    kolek(dir.path())
        .args(["compare", prev.to_str().unwrap(), curr.to_str().unwrap(), "--output"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bulan Lalu"))
        .stderr(predicate::str::contains("_KOLEK"));
    assert!(!out.exists());
}

#[test]
fn test_compare_corrupt_file_reports_cause() {
    let dir = tempfile::tempdir().unwrap();
    let prev = write_file(dir.path(), "bulan_lalu.xlsx", "definitely not a workbook");
    let curr = write_file(dir.path(), "saat_ini.csv", CURRENT_CSV);
    let out = dir.path().join("hasil.xlsx");

    kolek(dir.path())
        .args(["compare", prev.to_str().unwrap(), curr.to_str().unwrap(), "--output"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to process data"));
    assert!(!out.exists());
}

#[test]
fn test_compare_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let prev = write_file(dir.path(), "bulan_lalu.txt", PREVIOUS_CSV);
    let curr = write_file(dir.path(), "saat_ini.csv", CURRENT_CSV);

    kolek(dir.path())
        .args(["compare", prev.to_str().unwrap(), curr.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_compare_defaults_to_configured_export_dir() {
    let dir = tempfile::tempdir().unwrap();
    let prev = write_file(dir.path(), "bulan_lalu.csv", PREVIOUS_CSV);
    let curr = write_file(dir.path(), "saat_ini.csv", CURRENT_CSV);
    let exports = dir.path().join("exports");

    kolek(dir.path())
        .args(["config", "--export-dir"])
        .arg(&exports)
        .assert()
        .success();

    kolek(dir.path())
        .args(["compare", prev.to_str().unwrap(), curr.to_str().unwrap(), "--no-view"])
        .assert()
        .success();

    assert!(exports.join("gabungan_data_perubahan_kolektabilitas.xlsx").exists());
}

#[test]
fn test_filter_keeps_known_columns() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_file(
        dir.path(),
        "data.csv",
        "NOREKENING,ALAMAT,NAMA,_KOLEK\n\"12,5\",Jl. Mawar,ANI,2\n00077,Jl. Melati,BUDI,1\n",
    );
    let out = dir.path().join("filtered.xlsx");

    kolek(dir.path())
        .args(["filter", src.to_str().unwrap(), "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows, 3 columns kept"));

    let rows = read_sheet(&out);
    assert_eq!(rows[0], vec!["NOREKENING", "NAMA", "_KOLEK"]);
    assert_eq!(rows[1][0], "12.5");
    assert_eq!(rows[2][0], "00077");
}

#[test]
fn test_config_shows_settings() {
    let dir = tempfile::tempdir().unwrap();
    kolek(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Export dir:"));
}
