#![cfg(unix)]

mod common;

use common::{output_text, FakeDocker};

const BIN: &str = env!("CARGO_BIN_EXE_cloud-manus-run");

const RUN_ABC: &str = "run -d --name openmanus -p 8000:8000 -e LLM_MODEL=A -e LLM_BASE_URL=B -e LLM_API_KEY=C cloud-manus:latest python app.py --host 0.0.0.0 --port 8000";

fn run_call(calls: &[String]) -> Option<&String> {
    calls.iter().find(|c| c.starts_with("run "))
}

#[test]
fn test_run_with_named_flags() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["-m", "A", "-u", "B", "-k", "C"])
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    let (stdout, stderr) = output_text(&out);
    assert!(out.status.success(), "stderr:\n{stderr}");
    let calls = fake.calls();
    assert_eq!(run_call(&calls).map(String::as_str), Some(RUN_ABC), "{calls:?}");
    assert_eq!(stdout.trim(), "http://localhost:8000");
    assert!(stderr.contains("docker logs -f openmanus"), "stderr:\n{stderr}");
}

#[test]
fn test_run_legacy_positional_is_equivalent() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["A", "B", "C"])
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    assert!(out.status.success(), "{:?}", output_text(&out));
    assert_eq!(run_call(&fake.calls()).map(String::as_str), Some(RUN_ABC));
}

#[test]
fn test_run_flag_beats_positional() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["X", "B", "C", "-m", "A"])
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    assert!(out.status.success(), "{:?}", output_text(&out));
    assert_eq!(run_call(&fake.calls()).map(String::as_str), Some(RUN_ABC));
}

#[test]
fn test_run_missing_fields_exit_before_docker() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["-m", "A", "-k", "C"])
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    let (_, stderr) = output_text(&out);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr.contains("missing required arguments: base URL"), "stderr:\n{stderr}");
    assert!(stderr.contains("model (-m/--model): provided"), "stderr:\n{stderr}");
    assert!(stderr.contains("base URL (-u/--url): missing"), "stderr:\n{stderr}");
    assert!(stderr.contains("Usage:"), "usage help expected:\n{stderr}");
    assert!(fake.calls().is_empty(), "no container check may happen");
}

#[test]
fn test_run_repeated_flag_last_value_wins() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["-m", "Z", "-u", "B", "-k", "C", "-m", "A"])
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    assert!(out.status.success(), "{:?}", output_text(&out));
    assert_eq!(run_call(&fake.calls()).map(String::as_str), Some(RUN_ABC));
}

#[test]
fn test_run_existing_container_without_restart() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["A", "B", "C"])
        .env("FAKE_DOCKER_CONTAINERS", "openmanus")
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    let (_, stderr) = output_text(&out);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr.contains("--restart"), "stderr:\n{stderr}");
    let calls = fake.calls();
    assert_eq!(calls.len(), 1, "only the existence check: {calls:?}");
    assert!(calls[0].starts_with("ps -a"));
}

#[test]
fn test_run_restart_removes_then_runs() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["-r", "A", "B", "C"])
        .env("FAKE_DOCKER_CONTAINERS", "openmanus")
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    assert!(out.status.success(), "{:?}", output_text(&out));
    let calls = fake.calls();
    let rm = calls.iter().position(|c| c == "rm -f openmanus").expect("rm issued");
    let run = calls.iter().position(|c| c.starts_with("run ")).expect("run issued");
    assert!(rm < run, "{calls:?}");
}

#[test]
fn test_run_failed_removal_is_fatal() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["--restart", "A", "B", "C"])
        .env("FAKE_DOCKER_CONTAINERS", "openmanus")
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .env("FAKE_DOCKER_RM_EXIT", "1")
        .output()
        .expect("run cloud-manus-run");
    assert_eq!(out.status.code(), Some(1));
    assert!(run_call(&fake.calls()).is_none());
}

#[test]
fn test_run_missing_image_suggests_build() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["-t", "v9", "A", "B", "C"])
        .output()
        .expect("run cloud-manus-run");
    let (_, stderr) = output_text(&out);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr.contains("cloud-manus-build --tag v9"), "stderr:\n{stderr}");
    assert!(run_call(&fake.calls()).is_none());
}

#[test]
fn test_run_custom_port_tag_name() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["-p", "9000", "-t", "v1", "-n", "manus-dev", "-m", "A", "-u", "B", "-k", "C"])
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:v1")
        .output()
        .expect("run cloud-manus-run");
    let (stdout, _) = output_text(&out);
    assert!(out.status.success(), "{:?}", output_text(&out));
    let calls = fake.calls();
    let run = run_call(&calls).expect("run issued");
    assert!(run.starts_with("run -d --name manus-dev -p 9000:8000 "), "{run}");
    assert!(run.contains(" cloud-manus:v1 python app.py"), "{run}");
    assert_eq!(stdout.trim(), "http://localhost:9000");
}

#[test]
fn test_run_failure_exits_one() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["A", "B", "C"])
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .env("FAKE_DOCKER_RUN_EXIT", "125")
        .output()
        .expect("run cloud-manus-run");
    let (stdout, stderr) = output_text(&out);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr.contains("failed to start container 'openmanus'"), "stderr:\n{stderr}");
    assert!(stdout.is_empty());
}

#[test]
fn test_run_without_docker_exits_one() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["A", "B", "C"])
        .env("CLOUD_MANUS_SKIP_DOCKER", "1")
        .env("FAKE_DOCKER_IMAGES", "cloud-manus:latest")
        .output()
        .expect("run cloud-manus-run");
    assert_eq!(out.status.code(), Some(1));
    assert!(fake.calls().is_empty());
}

#[test]
fn test_run_unknown_option() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["--detach", "A", "B", "C"])
        .output()
        .expect("run cloud-manus-run");
    let (_, stderr) = output_text(&out);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr.contains("unknown option: --detach"), "stderr:\n{stderr}");
    assert!(fake.calls().is_empty());
}

#[test]
fn test_run_dry_run_masks_key_and_skips_docker() {
    let fake = FakeDocker::new();
    let out = fake
        .command(BIN)
        .args(["--dry-run", "-r", "A", "B", "sk-very-secret"])
        .output()
        .expect("run cloud-manus-run");
    let (_, stderr) = output_text(&out);
    assert!(out.status.success(), "stderr:\n{stderr}");
    assert!(!stderr.contains("sk-very-secret"), "stderr:\n{stderr}");
    assert!(stderr.contains("docker rm -f openmanus"), "stderr:\n{stderr}");
    assert!(stderr.contains("docker run -d --name openmanus"), "stderr:\n{stderr}");
    assert!(fake.calls().is_empty());
}
