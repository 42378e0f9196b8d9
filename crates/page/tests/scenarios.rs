use autosize::{HeightOverrides, WidthOverrides};
use page::{EngineProfile, Page};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

const SCENARIOS_FORMAT_V1: &str = "fieldfit-scenarios-v1";

// Fixed-advance metrics of the 13.333px form controls.
const INPUT_ADVANCE: f32 = 0.45 * 13.333;
const AREA_ADVANCE: f32 = 0.6 * 13.333;
const LINE: f32 = 1.2 * 13.333;

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ScenarioManifest {
    format: String,
    cases: Vec<Scenario>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct Scenario {
    id: String,
    profile: String,
    control: Control,
    mode: Mode,
    #[serde(default)]
    value: String,
    #[serde(default)]
    typed: String,
    style: Option<String>,
    stylesheet: Option<String>,
    padding: Option<i64>,
    double_read: Option<bool>,
    expect: Expectation,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Control {
    Input,
    Textarea,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Mode {
    Width,
    Height,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
struct Expectation {
    width_chars: Option<f32>,
    width_px: Option<f32>,
    lines: Option<u32>,
    quirk: Option<bool>,
}

fn manifest_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("scenarios.toml")
}

fn load_scenarios() -> Vec<Scenario> {
    let path = manifest_path();
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read scenario TOML {path:?}: {err}"));
    let manifest: ScenarioManifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse scenario TOML {path:?}: {err}"));
    assert_eq!(
        manifest.format, SCENARIOS_FORMAT_V1,
        "unsupported scenario manifest format in {path:?}"
    );

    let mut seen = BTreeSet::new();
    for case in &manifest.cases {
        assert!(seen.insert(case.id.clone()), "duplicate scenario id in {path:?}: {}", case.id);
        let e = &case.expect;
        assert!(
            e.width_chars.is_some() || e.width_px.is_some() || e.lines.is_some(),
            "scenario {} expects nothing",
            case.id
        );
    }
    manifest.cases
}

fn run(case: &Scenario) -> Vec<String> {
    let profile = EngineProfile::by_name(&case.profile)
        .unwrap_or_else(|| panic!("scenario {}: unknown profile {:?}", case.id, case.profile));
    let mut page = Page::new(profile);
    if let Some(sheet) = &case.stylesheet {
        page.add_stylesheet(sheet);
    }
    let id = match case.control {
        Control::Input => page.add_input(&case.value),
        Control::Textarea => page.add_textarea(&case.value),
    }
    .unwrap_or_else(|err| panic!("scenario {}: {err}", case.id));
    if let Some(style) = &case.style {
        page.host_mut()
            .document_mut()
            .set_attribute(id, "style", style)
            .unwrap_or_else(|err| panic!("scenario {}: {err}", case.id));
    }

    match case.mode {
        Mode::Width => {
            page.apply_auto_width(
                &[id],
                WidthOverrides {
                    padding_chars: case.padding,
                },
            );
        }
        Mode::Height => {
            page.apply_auto_height(
                &[id],
                HeightOverrides {
                    padding_lines: case.padding,
                    double_read: case.double_read,
                },
            );
        }
    }
    page.type_text(id, &case.typed)
        .unwrap_or_else(|err| panic!("scenario {}: {err}", case.id));
    page.run_until_idle();

    let mut failures = Vec::new();
    let mut check = |what: &str, got: f32, want: f32| {
        if (got - want).abs() > 0.05 {
            failures.push(format!("{}: {what} {got}, want {want}", case.id));
        }
    };
    let advance = match case.control {
        Control::Input => INPUT_ADVANCE,
        Control::Textarea => AREA_ADVANCE,
    };
    if let Some(chars) = case.expect.width_chars {
        check("width", page.width(id), chars * advance);
    }
    if let Some(px) = case.expect.width_px {
        check("width", page.width(id), px);
    }
    if let Some(lines) = case.expect.lines {
        check("height", page.height(id), lines as f32 * LINE);
    }
    if let Some(quirk) = case.expect.quirk {
        let got = page.quirks().map(|q| q.scrollbar_allowance_bug);
        if got != Some(quirk) {
            failures.push(format!("{}: quirk {got:?}, want {quirk}", case.id));
        }
    }
    if page.host().live_probes() != 0 {
        failures.push(format!("{}: probes leaked", case.id));
    }
    failures
}

#[test]
fn scenario_manifest_passes() {
    let cases = load_scenarios();
    assert!(!cases.is_empty());
    let failures: Vec<String> = cases.iter().flat_map(run).collect();
    assert!(failures.is_empty(), "scenario failures:\n{}", failures.join("\n"));
}
