use boltslot_core::{adjust_parameter_line, transform, transform_with_report};
use proptest::prelude::*;

fn nc1_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("BO".to_string()),
        Just("EN".to_string()),
        Just("  BO  ".to_string()),
        "[ \t]{0,3}v[ \t]{1,4}[a-z0-9.]{1,6}[ \t]{1,4}[a-z0-9.]{1,6}[ \t]{1,4}-?[0-9]{1,3}\\.[0-9]{1,3}",
        "[ \t]{0,3}v[ \t]{1,4}[a-z]{1,4}[ \t]{1,4}[a-z]{1,4}[ \t]{1,4}[a-z]{1,5}",
        "[A-Za-z0-9 .]{0,20}",
    ]
}

fn field4(line: &str) -> Option<f64> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() == 4 && fields[0] == "v" {
        fields[3].parse().ok()
    } else {
        None
    }
}

proptest! {
    #[test]
    fn prop_one_output_line_per_input(
        lines in prop::collection::vec(nc1_line(), 0..40),
        adjustment in -100.0f64..100.0,
    ) {
        prop_assert_eq!(transform(&lines, adjustment).len(), lines.len());
    }

    #[test]
    fn prop_zero_adjustment_keeps_values(lines in prop::collection::vec(nc1_line(), 0..40)) {
        let out = transform(&lines, 0.0);
        for (before, after) in lines.iter().zip(out.iter()) {
            if before == after {
                continue;
            }
            // Only reformatted parameter lines may differ.
            let old = field4(before).expect("changed line must be a parameter line");
            let new = field4(after).expect("rewritten line must be a parameter line");
            prop_assert!((old - new).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn prop_zero_adjustment_stabilises(lines in prop::collection::vec(nc1_line(), 0..40)) {
        let once = transform(&lines, 0.0);
        let twice = transform(&once, 0.0);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_lines_outside_blocks_untouched(
        lines in prop::collection::vec(nc1_line(), 0..40),
        adjustment in -100.0f64..100.0,
    ) {
        let body: Vec<String> = lines
            .into_iter()
            .filter(|l| l.trim() != "BO")
            .collect();
        prop_assert_eq!(transform(&body, adjustment), body);
    }
}

#[test]
fn test_two_blocks_both_transformed() {
    let lines = [
        "ST",
        "BO",
        "  v  10.00  20.00  5.00",
        "EN",
        "SI",
        "BO",
        "  v  30.00  40.00  6.00",
        "EN",
    ];
    let (out, report) = transform_with_report(&lines, 1.0);
    assert_eq!(out[2], "v 10.00 20.00 6.00");
    assert_eq!(out[6], "v 30.00 40.00 7.00");
    assert_eq!(report.blocks, 2);
    assert_eq!(report.adjusted, 2);
}

#[test]
fn test_non_numeric_value_passes_through() {
    let lines = ["BO", "v 1 2 abc", "EN"];
    assert_eq!(transform(&lines, 3.0), lines);
}

#[test]
fn test_parameter_line_outside_block() {
    let lines = ["v 1 2 3.00", "BO", "EN", "v 1 2 3.00"];
    assert_eq!(transform(&lines, 3.0), lines);
}

#[test]
fn test_rounding_to_two_places() {
    assert_eq!(
        adjust_parameter_line("v a b 1.234", 0.0).as_deref(),
        Some("v a b 1.23")
    );
    assert_eq!(
        adjust_parameter_line("v a b 26", 0.5).as_deref(),
        Some("v a b 26.50")
    );
    assert_eq!(
        adjust_parameter_line("v a b -0.001", 0.0).as_deref(),
        Some("v a b -0.00")
    );
}

#[test]
fn test_nc1_like_document() {
    let doc = "ST\n** part.nc1\nBO\n  v     40.00s     40.00      26.00\n  v     80.00s     40.00      26.00\nEN\nAK\n  v      0.00u      0.00       0.00\nEN\n";
    let lines: Vec<&str> = doc.lines().collect();
    let out = transform(&lines, -2.0);
    assert_eq!(
        out,
        vec![
            "ST",
            "** part.nc1",
            "BO",
            "v 40.00s 40.00 24.00",
            "v 80.00s 40.00 24.00",
            "EN",
            "AK",
            "  v      0.00u      0.00       0.00",
            "EN",
        ]
    );
}
