//! End-to-end conversions with fake external tools.

use crate::helpers::{TestEnv, arg};

#[test]
fn test_pial_conversion_prints_instructions() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    let lh = std::fs::read_to_string(dest.join("TestBrain_lh.stl")).expect("lh stl");
    let rh = std::fs::read_to_string(dest.join("TestBrain_rh.stl")).expect("rh stl");
    assert!(lh.contains("lh.pial"));
    assert!(rh.contains("rh.pial"));

    assert!(out.stdout.contains("MeshLab"));
    assert!(out.stdout.contains("TestBrain_lh.stl"));
    assert!(!env.mail_log().exists());
}

#[test]
fn test_pial_conversion_without_optional_tools() {
    let env = TestEnv::new();
    env.install_tool("mris_convert", crate::helpers::FAKE_MRIS_CONVERT);
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(dest.join("TestBrain_lh.stl").is_file());
    assert!(dest.join("TestBrain_rh.stl").is_file());
}

#[test]
fn test_missing_mesh_converter_writes_nothing() {
    let env = TestEnv::new();
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("mris_convert"), "stderr: {}", out.stderr);
    assert!(out.stderr.contains("FreeSurfer"));
    assert!(!dest.exists());
}

#[test]
fn test_missing_mail_tool_fails_before_conversion() {
    let env = TestEnv::new();
    env.install_tool("mris_convert", crate::helpers::FAKE_MRIS_CONVERT);
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain", "user@kumc.edu"]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("mail"));
    assert!(!dest.exists());
}

#[test]
fn test_missing_hemisphere_fails_before_conversion() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("pial", &["lh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("rh.pial"), "stderr: {}", out.stderr);
    assert!(!dest.exists());
}

#[test]
fn test_institutional_email_is_not_copied() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain", "user@kumc.edu"]);

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    let mail = std::fs::read_to_string(env.mail_log()).expect("mail log");
    assert!(mail.contains("user@kumc.edu"));
    assert!(!mail.contains("-c "));
    assert!(mail.contains("TestBrain_rh.stl"));
    assert!(!out.stdout.contains("MeshLab"));
}

#[test]
fn test_external_email_copies_admin() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env
        .command()
        .env("MAKE3DBRAIN__NOTIFICATION__ADMIN_EMAIL", "ops@kumc.edu")
        .args([arg(&input), arg(&dest), "TestBrain", "user@other.org"])
        .output()
        .expect("run");

    assert_eq!(out.status.code(), Some(0));
    let mail = std::fs::read_to_string(env.mail_log()).expect("mail log");
    assert!(mail.contains("-c ops@kumc.edu -- user@other.org"), "mail: {mail}");
}

#[test]
fn test_nifti_conversion_runs_every_stage() {
    let env = TestEnv::with_all_tools();
    let input = env.root().join("T1.nii");
    std::fs::write(&input, b"volume").expect("write");
    let dest = env.dest();

    let out = env.run(&["--format", "json", arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(dest.join("TestBrain.nii").is_file());
    assert!(dest.join("TestBrain_lh.pial").is_file());
    assert!(dest.join("TestBrain_rh.pial").is_file());
    assert!(dest.join("TestBrain_lh.stl").is_file());
    assert!(env.scratch().join("TestBrain/TestBrain/surf/lh.pial").is_file());

    let summary: serde_json::Value = serde_json::from_str(&out.stdout).expect("json summary");
    assert_eq!(summary["input_kind"], "nifti");
    let stages: Vec<&str> = summary["stages"]
        .as_array()
        .expect("stages")
        .iter()
        .filter_map(|s| s["stage"].as_str())
        .collect();
    assert_eq!(
        stages,
        vec!["stage-nifti", "reconstruct", "copy-surfaces", "mesh-lh", "mesh-rh"]
    );
    assert!(summary["instructions"].as_str().is_some());
}

#[test]
fn test_dicom_conversion_runs_every_stage() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("dicom", &["IM0001.dcm", "IM0002.dcm"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(dest.join("TestBrain.nii").is_file());
    assert!(dest.join("TestBrain_lh.stl").is_file());
    assert!(dest.join("TestBrain_rh.stl").is_file());
    assert!(env.scratch().join("TestBrain/logs/reconstruct.log").is_file());
}

#[test]
fn test_env_recon_flags_reach_recon_all() {
    let env = TestEnv::with_all_tools();
    let recorded = env.root().join("recon-args.txt");
    env.install_tool(
        "recon-all",
        &format!(
            "echo \"$*\" > {}\n{}",
            arg(&recorded),
            crate::helpers::FAKE_RECON_ALL
        ),
    );
    let input = env.root().join("T1.nii");
    std::fs::write(&input, b"volume").expect("write");
    let dest = env.dest();

    let out = env
        .command()
        .env("MAKE3DBRAIN__TOOLS__RECON_ALL_FLAGS", "-all -parallel")
        .args([arg(&input), arg(&dest), "TestBrain"])
        .output()
        .expect("run");

    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let args = std::fs::read_to_string(&recorded).expect("recorded args");
    assert!(args.contains("-all -parallel"), "args: {args}");
}

#[test]
fn test_failing_reconstruction_halts_run() {
    let env = TestEnv::with_all_tools();
    env.install_tool("recon-all", "echo 'ERROR: talairach failed' >&2\nexit 1");
    let input = env.input_dir("dicom", &["IM0001.dcm"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain", "user@kumc.edu"]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("reconstruct"), "stderr: {}", out.stderr);
    assert!(out.stderr.contains("talairach failed"));
    assert!(dest.join("TestBrain.nii").is_file());
    assert!(!dest.join("TestBrain_lh.stl").exists());
    assert!(!env.mail_log().exists());
}

#[test]
fn test_empty_mesh_output_is_failure() {
    let env = TestEnv::with_all_tools();
    env.install_tool("mris_convert", r#": > "$2""#);
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("mesh-lh"), "stderr: {}", out.stderr);
    assert!(!dest.join("TestBrain_rh.stl").exists());
}

#[test]
fn test_config_file_overrides_defaults() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();
    let config = env.root().join("make3dbrain.toml");
    std::fs::write(
        &config,
        "[notification]\ninstitutional_domain = \"other.org\"\n",
    )
    .expect("write config");

    let out = env.run(&[
        "--config",
        arg(&config),
        arg(&input),
        arg(&dest),
        "TestBrain",
        "user@other.org",
    ]);

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    let mail = std::fs::read_to_string(env.mail_log()).expect("mail log");
    assert!(!mail.contains("-c "));
}
