use boltslot::cli::{describe_grouping, resolve_config, run};
use boltslot::{Adjustment, Cli, Command};
use boltslot_batch::{group_by_thickness, scan_input_dir};
use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn nc1_file(thickness: &str) -> String {
    let mut text = String::new();
    for i in 1..=12 {
        text.push_str(&format!("  header {}\n", i));
    }
    for _ in 0..3 {
        text.push_str(&format!("  {}\n", thickness));
    }
    text.push_str("BO\n  v  10.00s  0.00  26.00\nEN\n");
    text
}

fn args<'a>(input: &'a Path, output: &'a Path, rest: &[&'a str]) -> Vec<String> {
    let mut v = vec![
        "boltslot".to_string(),
        "--input".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ];
    v.extend(rest.iter().map(|s| s.to_string()));
    v
}

#[test]
fn test_parse_direct_negative_adjustment() {
    let cli = Cli::try_parse_from(["boltslot", "direct", "--adjust", "-0.5"]).unwrap();
    match cli.command {
        Command::Direct { adjust } => assert_eq!(adjust, "-0.5"),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_parse_thickness_requires_values() {
    assert!(Cli::try_parse_from(["boltslot", "thickness"]).is_err());
    assert!(Cli::try_parse_from(["boltslot", "thickness", "--set", "6=1"]).is_ok());
    assert!(Cli::try_parse_from([
        "boltslot",
        "thickness",
        "--set",
        "6=1",
        "--adjustments-file",
        "adj.txt"
    ])
    .is_err());
}

#[test]
fn test_overrides_applied_to_config() {
    let cli = Cli::try_parse_from([
        "boltslot",
        "--input",
        "parts",
        "--output",
        "adjusted",
        "--no-overwrite",
        "scan",
    ])
    .unwrap();
    let config = resolve_config(&cli).unwrap();
    assert_eq!(config.paths.input_dir, Path::new("parts"));
    assert_eq!(config.paths.output_dir, Path::new("adjusted"));
    assert!(!config.output.overwrite);
}

#[test]
fn test_direct_run_end_to_end() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let report = output.path().join("report.json");
    fs::write(input.path().join("p.nc1"), "BO\n v a b 26.00\nEN\n").unwrap();

    let mut argv = args(input.path(), output.path(), &["direct", "--adjust", "1.5"]);
    argv.push("--report".to_string());
    argv.push(report.display().to_string());

    let ok = run(Cli::try_parse_from(argv).unwrap()).unwrap();
    assert!(ok);

    let adjusted = fs::read_to_string(output.path().join("p_adjust_1.5mm.nc1")).unwrap();
    assert_eq!(adjusted, "BO\nv a b 27.50\nEN\n");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(json["mode"], "direct");
    assert_eq!(json["files"][0]["report"]["adjusted"], 1);
}

#[test]
fn test_direct_run_rejects_out_of_range_adjustment() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("p.nc1"), "BO\n v a b 26.00\nEN\n").unwrap();

    let argv = args(input.path(), output.path(), &["direct", "--adjust", "150"]);
    let err = run(Cli::try_parse_from(argv).unwrap()).unwrap_err();
    assert!(err.to_string().contains("Invalid adjustment value"));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_input_folder_is_an_error() {
    let root = TempDir::new().unwrap();
    let argv = args(
        &root.path().join("missing"),
        &root.path().join("out"),
        &["direct", "--adjust", "1"],
    );
    assert!(run(Cli::try_parse_from(argv).unwrap()).is_err());
}

#[test]
fn test_thickness_run_from_adjustments_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let table = TempDir::new().unwrap();
    fs::write(input.path().join("a.nc1"), nc1_file("6.00")).unwrap();
    fs::write(input.path().join("b.nc1"), nc1_file("10.00")).unwrap();
    let table_path = table.path().join("adjust.txt");
    fs::write(&table_path, "6.00=1.5\n\n10.00=-2.0\n").unwrap();

    let argv = args(
        input.path(),
        output.path(),
        &[
            "thickness",
            "--adjustments-file",
            table_path.to_str().unwrap(),
        ],
    );
    assert!(run(Cli::try_parse_from(argv).unwrap()).unwrap());

    let a = fs::read_to_string(output.path().join("thk_6.00mm/a_adjust_1.5mm.nc1")).unwrap();
    assert!(a.contains("v 10.00s 0.00 27.50"));
    let b = fs::read_to_string(output.path().join("thk_10.00mm/b_adjust_-2.0mm.nc1")).unwrap();
    assert!(b.contains("v 10.00s 0.00 24.00"));
}

#[test]
fn test_thickness_run_with_missing_group_fails() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.nc1"), nc1_file("6.00")).unwrap();
    fs::write(input.path().join("b.nc1"), nc1_file("10.00")).unwrap();

    let argv = args(input.path(), output.path(), &["thickness", "--set", "6=1"]);
    let err = run(Cli::try_parse_from(argv).unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("10.00"));
}

#[test]
fn test_describe_grouping_template() {
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("a.nc1"), nc1_file("6.00")).unwrap();
    fs::write(input.path().join("b.nc1"), nc1_file("6.00")).unwrap();
    fs::write(input.path().join("c.nc1"), "too short\n").unwrap();

    let files = scan_input_dir(input.path()).unwrap();
    let text = describe_grouping(&group_by_thickness(&files), Adjustment::new(1.0));
    assert!(text.contains("thk_6.00mm: 2 files"));
    assert!(text.contains("Skipped:"));
    assert!(text.ends_with("6.00=1.0\n"));
}
