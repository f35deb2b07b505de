//! Loader round trips through real files.

use std::fs;
use std::path::PathBuf;

use tanzo_content::{
    ConfigLoader, ExportFormat, ProfileLoader, ValidationErrors, profile_shorthand, write_result,
};
use tanzo_core::{AggregateStat, Scalar, simulate};
use tempfile::TempDir;

const PROFILE_YAML: &str = r#"
version: "1.0.0"
profile:
  name: Kai
  archetypes:
    - type: creator
      name: Maker
      weight: 0.6
      environments: [work]
      attributes:
        - name: power
          value: { distribution: normal, mean: 5, std_dev: 1 }
        - name: mood
          value: { distribution: discrete, values: [low, high], weights: [0.3, 0.7] }
        - name: focus
          value: { base: 7, range: [5, 9], distribution: triangular }
        - name: energy
          value: { base: 6, variance: 1.5 }
        - name: label
          value: X
          unit: tag
    - type: explorer
      weight: 0.4
      environments: [travel]
      attributes:
        - name: curiosity
          value: 8
  simulation:
    iterations: 500
    seed: 42
    variation_factor: 0.2
    environments: [work]
"#;

const PROFILE_JSON: &str = r#"{
  "version": "1.0.0",
  "profile": {
    "name": "Kai",
    "archetypes": [
      {
        "type": "creator",
        "name": "Maker",
        "weight": 0.6,
        "environments": ["work"],
        "attributes": [
          { "name": "power", "value": { "distribution": "normal", "mean": 5, "std_dev": 1 } },
          { "name": "mood", "value": { "distribution": "discrete", "values": ["low", "high"], "weights": [0.3, 0.7] } },
          { "name": "focus", "value": { "base": 7, "range": [5, 9], "distribution": "triangular" } },
          { "name": "energy", "value": { "base": 6, "variance": 1.5 } },
          { "name": "label", "value": "X", "unit": "tag" }
        ]
      },
      {
        "type": "explorer",
        "weight": 0.4,
        "environments": ["travel"],
        "attributes": [ { "name": "curiosity", "value": 8 } ]
      }
    ],
    "simulation": { "iterations": 500, "seed": 42, "variation_factor": 0.2, "environments": ["work"] }
  }
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn yaml_and_json_load_to_the_same_profile() {
    let dir = TempDir::new().unwrap();
    let yaml = ProfileLoader::load(&write(&dir, "kai.yaml", PROFILE_YAML)).unwrap();
    let json = ProfileLoader::load(&write(&dir, "kai.json", PROFILE_JSON)).unwrap();

    assert_eq!(yaml, json);
    assert_eq!(yaml.profile.archetypes.len(), 2);
}

#[test]
fn extensionless_files_are_sniffed() {
    let dir = TempDir::new().unwrap();
    let loaded = ProfileLoader::load(&write(&dir, "kai", PROFILE_JSON)).unwrap();
    assert_eq!(loaded.profile.name, "Kai");
}

#[test]
fn loaded_profile_simulates_with_its_own_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = ProfileLoader::load(&write(&dir, "kai.yml", PROFILE_YAML)).unwrap();

    let config = loaded.simulation_defaults();
    assert_eq!(config.iterations, 500);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.environment.as_deref(), Some("work"));

    let result = simulate(&loaded.profile, &config).unwrap();
    assert_eq!(result.archetypes.len(), 1, "explorer is outside 'work'");
    assert_eq!(
        result.stat("Maker", "label"),
        Some(&AggregateStat::Fixed {
            value: Scalar::from("X")
        })
    );

    let focus = result
        .stat("Maker", "focus")
        .and_then(AggregateStat::as_numeric)
        .unwrap();
    assert!(focus.min >= 5.0 && focus.max <= 9.0);

    let mood = result.stat("Maker", "mood").unwrap();
    let high = mood.frequency("high").unwrap();
    assert!((high - 0.7).abs() < 0.08, "high at {}", high);
}

#[test]
fn structural_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "bad.yaml",
        r#"
version: "one"
profile:
  name: Bad
  archetypes:
    - type: sage
      weight: 2
      attributes:
        - name: mood
          value: { distribution: discrete, values: [a, b], weights: [0, 0] }
"#,
    );

    let err = ProfileLoader::load(&path).unwrap_err();
    let errors = err
        .downcast_ref::<ValidationErrors>()
        .expect("validation errors");
    assert_eq!(errors.len(), 3);
    assert!(err.to_string().contains("sage.mood"));
}

#[test]
fn unparseable_documents_name_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "{ \"version\": ");

    let err = ProfileLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(ProfileLoader::load(&dir.path().join("nope.yaml")).is_err());
}

#[test]
fn toml_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "sim.toml",
        "iterations = 1000\nseed = 7\ndomain = [0.0, 100.0]\nparallel = true\n",
    );

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.iterations, 1000);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.domain.max(), 100.0);
    assert!(config.parallel);
    assert_eq!(config.variation_factor, 0.2);

    let settings = ConfigLoader::load_settings(&path).unwrap();
    assert!(settings.variation_factor.is_none());
}

#[test]
fn invalid_toml_domain_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sim.toml", "domain = [5.0, 1.0]\n");
    assert!(ConfigLoader::load(&path).is_err());
}

#[test]
fn results_are_written_in_each_format() {
    let dir = TempDir::new().unwrap();
    let loaded = ProfileLoader::load(&write(&dir, "kai.yaml", PROFILE_YAML)).unwrap();
    let result = simulate(&loaded.profile, &loaded.simulation_defaults()).unwrap();

    for (name, format) in [
        ("out.json", ExportFormat::Json),
        ("out.yaml", ExportFormat::Yaml),
        ("out.txt", ExportFormat::Text),
    ] {
        let path = dir.path().join(name);
        write_result(&path, &result, format).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Kai"), "{} lacks the profile name", name);
    }

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
    assert_eq!(json["iterations"], 500);
}

#[test]
fn shorthand_of_a_loaded_profile() {
    let dir = TempDir::new().unwrap();
    let loaded = ProfileLoader::load(&write(&dir, "kai.yaml", PROFILE_YAML)).unwrap();

    assert_eq!(
        profile_shorthand(&loaded.profile),
        "Kai:{Maker@60%[power:N(5,1),mood:D(low|high),focus:T(5,9,7)];explorer@40%[curiosity:8]}"
    );
}
