//! Runs driven by a `duet.toml` project file.

use duet_checker::{create_checker, CheckerOptions, FailureKind};
use duet_config::{load_config, CompareMode};
use duet_conformance::{python, Project, APLUSB_PY};
use duet_maker::{create_maker, MakerOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const CONFIG: &str = r#"
[maker]
solution = "solutions/std.py"
output_dir = "cases"
start = 10

[checker]
std = "solutions/std.py"
target = "solutions/target.py"
compare = "normalized"
timeout_ms = 5000
iterations = 50
"#;

#[test]
fn checker_follows_project_config() {
    let Some(py) = python() else { return };
    let project = Project::new();
    project.write("duet.toml", &format!("{CONFIG}compiler = \"{py}\"\n"));
    project.write("solutions/std.py", APLUSB_PY);
    // Same answers, padded with blank lines and trailing spaces.
    project.write(
        "solutions/target.py",
        "a, b = map(int, input().split())\nprint()\nprint(str(a + b) + '   ')\n",
    );

    let config = load_config(project.root()).unwrap();
    assert_eq!(config.checker.compare, CompareMode::Normalized);
    let options = CheckerOptions {
        quiet: true,
        ..CheckerOptions::from_config(&config, project.root())
    };

    let mut rng = StdRng::seed_from_u64(1);
    let report = create_checker()
        .configure(options.clone())
        .unwrap()
        .run(config.checker.iterations, || {
            json!([[rng.gen_range(0..1000), rng.gen_range(0..1000)]])
        })
        .unwrap();
    assert!(report.passed());
    assert_eq!(report.executed, 50);

    let strict = create_checker()
        .configure(CheckerOptions {
            compare: CompareMode::Exact,
            ..options
        })
        .unwrap()
        .run(1, || json!([[1, 1]]))
        .unwrap();
    assert_eq!(strict.failure().unwrap().kind, FailureKind::WrongAnswer);
}

#[test]
fn maker_follows_project_config() {
    let Some(_) = python() else { return };
    let project = Project::new();
    project.write("duet.toml", CONFIG);
    project.write("solutions/std.py", APLUSB_PY);

    let config = load_config(project.root()).unwrap();
    let report = create_maker()
        .configure(MakerOptions {
            quiet: true,
            ..MakerOptions::from_config(&config, project.root())
        })
        .case(|| json!([[2, 3]]))
        .case(|| json!([[4, 5]]))
        .generate()
        .unwrap();

    assert!(report.all_succeeded());
    assert_eq!(project.read("cases/10.in"), "2 3");
    assert_eq!(project.read("cases/11.out").trim(), "9");
}
