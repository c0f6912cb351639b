//! Argument validation and input classification failures.

use crate::helpers::{TestEnv, arg};

#[test]
fn test_help_exits_zero_without_touching_filesystem() {
    let env = TestEnv::new();
    let dest = env.dest();

    let out = env.run(&["/no/such/input", arg(&dest), "TestBrain", "bad-email", "--help"]);

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Usage"));
    assert!(out.stdout.contains("lh.pial"));
    assert!(!dest.exists());
    assert!(!env.scratch().exists());
}

#[test]
fn test_version_exits_zero() {
    let env = TestEnv::new();
    let out = env.run(&["--version"]);
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_arguments_exit_one() {
    let env = TestEnv::new();
    let out = env.run(&["/some/input"]);
    assert_eq!(out.code, Some(1));
}

#[test]
fn test_invalid_email_exits_one_without_side_effects() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    for email in ["user", "user@kumc", "user@@kumc.edu", "us er@kumc.edu"] {
        let out = env.run(&[arg(&input), arg(&dest), "TestBrain", email]);
        assert_eq!(out.code, Some(1), "email {email:?} should be rejected");
        assert!(out.stderr.contains("VALIDATION"), "stderr: {}", out.stderr);
    }

    assert!(!dest.exists());
    assert!(!env.mail_log().exists());
}

#[test]
fn test_filename_with_separator_rejected() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("pial", &["lh.pial", "rh.pial"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "../escape"]);

    assert_eq!(out.code, Some(1));
    assert!(!dest.exists());
}

#[test]
fn test_unrecognized_directory_exits_one() {
    let env = TestEnv::with_all_tools();
    let input = env.input_dir("notes", &["readme.txt", "scan.mgz"]);
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("UNSUPPORTED_INPUT"), "stderr: {}", out.stderr);
    assert!(out.stderr.contains(arg(&input)));
    assert!(!dest.exists());
}

#[test]
fn test_compressed_nifti_rejected() {
    let env = TestEnv::with_all_tools();
    let input = env.root().join("T1.nii.gz");
    std::fs::write(&input, b"volume").expect("write");
    let dest = env.dest();

    let out = env.run(&[arg(&input), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(1));
    assert!(!dest.exists());
}

#[test]
fn test_nonexistent_input_exits_one() {
    let env = TestEnv::with_all_tools();
    let dest = env.dest();
    let missing = env.root().join("missing");

    let out = env.run(&[arg(&missing), arg(&dest), "TestBrain"]);

    assert_eq!(out.code, Some(1));
    assert!(!dest.exists());
}
