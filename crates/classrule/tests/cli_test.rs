mod common;

use common::TestFixture;
use std::process::Command;

const RECORDS: &str = "R1: speed=120, wheels=4\nR2: weight=15\n";
const RULES: &str = "Car: speed > 60; wheels == 4\nLight: weight range 0, 10\n";

fn classrule() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_classrule"));
    cmd.env_remove("CLASSRULE_CONFIG").env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

#[test]
fn test_classify_prints_text() {
    let fixture = TestFixture::new();
    let records = fixture.write("records.txt", RECORDS);
    let rules = fixture.write("rules.txt", RULES);

    let output = classrule()
        .arg("classify")
        .arg("--records")
        .arg(&records)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "R1: Car\nR2: -\n");
}

#[test]
fn test_classify_writes_json_file() {
    let fixture = TestFixture::new();
    let input = fixture.write("input.txt", &format!("{}\n{}", RECORDS, RULES));
    let out = fixture.path("out.json");

    let status = classrule()
        .args(["classify", "--format", "json", "--quiet", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["records"]["R1"][0], "Car");
}

#[test]
fn test_invalid_input_aborts_unless_skipped() {
    let fixture = TestFixture::new();
    let records = fixture.write("records.txt", "R1: speed=120\nbroken line\n");
    let rules = fixture.write("rules.txt", "Fast: speed > 100\n");

    let aborted = classrule()
        .arg("classify")
        .arg("--records")
        .arg(&records)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(!aborted.status.success());
    assert!(String::from_utf8_lossy(&aborted.stderr).contains("records:2"));

    let skipped = classrule()
        .arg("classify")
        .arg("--skip-invalid")
        .arg("--records")
        .arg(&records)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(skipped.status.success());
    assert_eq!(String::from_utf8_lossy(&skipped.stdout), "R1: Fast\n");
}

#[test]
fn test_check_reports_problems() {
    let fixture = TestFixture::new();
    let records = fixture.write("records.txt", RECORDS);
    let rules = fixture.write("rules.txt", "Car: speed ~ 60\nCar: wheels == 4\nCar:\n");

    let output = classrule()
        .arg("check")
        .arg("--records")
        .arg(&records)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("classes:1: parse error"));
    assert!(stderr.contains("classes:3: validate error"));
}

#[test]
fn test_check_warns_on_empty_records() {
    let fixture = TestFixture::new();
    let records = fixture.write("records.txt", "# none yet\n");
    let rules = fixture.write("rules.txt", RULES);

    let output = classrule()
        .arg("check")
        .arg("--records")
        .arg(&records)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no records found in input"));
}

#[test]
fn test_config_file_sets_marker() {
    let fixture = TestFixture::new();
    let records = fixture.write("records.txt", RECORDS);
    let rules = fixture.write("rules.txt", RULES);
    let config = fixture.write("classrule.toml", "no_match_marker = \"(none)\"\n");

    let output = classrule()
        .arg("--config")
        .arg(&config)
        .arg("classify")
        .arg("--records")
        .arg(&records)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "R1: Car\nR2: (none)\n");
}
