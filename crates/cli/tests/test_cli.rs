use clap::Parser;
use plait_cli::{CliConfig, run};
use std::fs;
use tempfile::TempDir;

const PATIENT_JSON: &str = r#"{"resourceType":"Patient","id":"pat1","active":true,"name":[{"family":"Chalmers","given":["Peter","James"],"_given":[null,{"id":"g2"}]}],"_birthDate":{"extension":[{"url":"http://hl7.org/fhir/StructureDefinition/data-absent-reason","valueCode":"unknown"}]}}"#;

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let config = CliConfig::try_parse_from(std::iter::once("plait").chain(args.iter().copied()))?;
    config
        .validate()
        .map_err(|errors| anyhow::anyhow!(errors.join("; ")))?;
    let mut out = Vec::new();
    run(&config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_convert_json_to_xml_and_back() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "patient.json", PATIENT_JSON);
    let xml_path = dir.path().join("patient.xml");
    let xml = xml_path.to_string_lossy().into_owned();

    run_args(&["convert", "--input", &input, "--output", &xml]).unwrap();
    let written = fs::read_to_string(&xml_path).unwrap();
    assert!(written.contains(r#"<given id="g2" value="James"/>"#), "{written}");

    let back = run_args(&["convert", "--input", &xml, "--to", "json"]).unwrap();
    assert_eq!(back.trim_end(), PATIENT_JSON);
}

#[test]
fn test_convert_pretty_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "patient.json", PATIENT_JSON);

    let pretty = run_args(&["convert", "-i", &input, "--pretty"]).unwrap();
    assert!(pretty.starts_with("{\n  \"resourceType\": \"Patient\""), "{pretty}");
}

#[test]
fn test_convert_reports_decode_errors() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "broken.json",
        r#"{"resourceType":"Patient","deceasedBoolean":true,"deceasedDateTime":"2020"}"#,
    );
    let err = run_args(&["convert", "-i", &input, "--to", "xml"]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to decode"), "{message}");
    assert!(message.contains("deceased[x]"), "{message}");
}

#[test]
fn test_inspect_lists_children_in_order() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "patient.json", PATIENT_JSON);

    let report = run_args(&["inspect", "-i", &input]).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines[0], "resourceType: Patient");
    assert_eq!(lines[1], "id: pat1");
    assert!(lines[2].starts_with("memSize: "));
    assert_eq!(lines[3], "children:");

    let children: Vec<_> = lines[4..]
        .iter()
        .map(|line| line.trim().split(':').next().unwrap())
        .collect();
    assert_eq!(children, ["id", "active", "name", "birthDate"]);
}

#[test]
fn test_inspect_filters_by_name() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "patient.xml", "");
    fs::write(
        &input,
        r#"<Patient xmlns="http://hl7.org/fhir"><name><family value="A"/></name><name><family value="B"/></name><gender value="male"/></Patient>"#,
    )
    .unwrap();

    let report = run_args(&["inspect", "-i", &input, "--names", "name"]).unwrap();
    let children: Vec<_> = report.lines().skip_while(|line| *line != "children:").skip(1).collect();
    assert_eq!(children, ["  name: HumanName", "  name: HumanName"]);
}

#[test]
fn test_unknown_extension_needs_format() {
    let err = run_args(&["inspect", "-i", "patient.txt"]).unwrap_err();
    assert!(err.to_string().contains("--format"), "{err}");
}
