//! Output validation shared by the backends.

use std::path::Path;

use brainmesh_core::error::AppError;
use brainmesh_core::result::AppResult;

/// Check that a tool left `path` behind with at least `min_bytes` bytes.
///
/// Returns the file size.
pub async fn verify_output(path: &Path, min_bytes: u64) -> AppResult<u64> {
    let metadata = tokio::fs::metadata(path).await.map_err(|_| {
        AppError::output_missing(format!("Output file not created: {}", path.display()))
    })?;

    let size = metadata.len();
    if size < min_bytes {
        return Err(AppError::output_missing(format!(
            "Output file is too small ({size} bytes, expected at least {min_bytes}): {}",
            path.display()
        )));
    }

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainmesh_core::ErrorKind;

    #[tokio::test]
    async fn test_missing_output() {
        let err = verify_output(Path::new("/nonexistent/out.stl"), 1)
            .await
            .expect_err("missing");
        assert_eq!(err.kind, ErrorKind::OutputMissing);
    }

    #[tokio::test]
    async fn test_empty_output() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("empty.stl");
        std::fs::write(&path, b"").expect("write");

        let err = verify_output(&path, 1).await.expect_err("empty");
        assert!(err.message.contains("0 bytes"));
    }

    #[tokio::test]
    async fn test_valid_output() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("lh.stl");
        std::fs::write(&path, b"solid lh\nendsolid lh\n").expect("write");

        assert_eq!(verify_output(&path, 1).await.expect("valid"), 21);
    }
}
