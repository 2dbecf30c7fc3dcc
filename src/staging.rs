//! Publish output files through a temporary sibling so a failed write never
//! leaves a truncated file under its final name.
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_text(dest: &Path, text: &str) -> Result<()> {
    let tmp_path = staging_path(dest);
    publish(&tmp_path, dest, || {
        fs::write(&tmp_path, text.as_bytes())
            .with_context(|| format!("write {}", tmp_path.display()))
    })
}

pub fn copy_file(source: &Path, dest: &Path) -> Result<u64> {
    let tmp_path = staging_path(dest);
    publish(&tmp_path, dest, || {
        fs::copy(source, &tmp_path)
            .with_context(|| format!("copy {} to {}", source.display(), tmp_path.display()))
    })
}

/// Run `stage` to fill `tmp_path`, then rename it over `dest`. The temp file
/// is removed on every failure path.
fn publish<T>(tmp_path: &Path, dest: &Path, stage: impl FnOnce() -> Result<T>) -> Result<T> {
    let staged = stage().and_then(|value| {
        fs::rename(tmp_path, dest)
            .with_context(|| format!("publish {}", dest.display()))
            .map(|()| value)
    });
    if staged.is_err() && tmp_path.exists() {
        let _ = fs::remove_file(tmp_path);
    }
    staged
}

fn staging_path(dest: &Path) -> PathBuf {
    let file_name = dest
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("staged");
    dest.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_text_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let dest = dir.path().join("program.txt");
        fs::write(&dest, "old").expect("seed file");

        write_text(&dest, "new\n").expect("write");

        assert_eq!(fs::read_to_string(&dest).expect("read"), "new\n");
        assert!(!dir.path().join(".program.txt.tmp").exists());
    }

    #[test]
    fn copy_file_reports_missing_source_without_leaving_temp() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let dest = dir.path().join("00_a.bmp");

        let err = copy_file(&dir.path().join("missing.bmp"), &dest).expect_err("missing");

        assert!(err.to_string().starts_with("copy "));
        assert!(!dest.exists());
        assert!(!dir.path().join(".00_a.bmp.tmp").exists());
    }

    #[test]
    fn failed_write_removes_partial_temp_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let dest = dir.path().join("program.txt");
        fs::create_dir(&dest).expect("occupy destination with a directory");

        let err = write_text(&dest, "a - 1\n").expect_err("cannot rename over a directory");

        assert!(err.to_string().starts_with("publish "));
        assert!(!dir.path().join(".program.txt.tmp").exists());
    }

    #[test]
    fn failed_stage_removes_temp_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let dest = dir.path().join("00_a.bmp");
        let tmp_path = staging_path(&dest);

        let err = publish(&tmp_path, &dest, || -> Result<()> {
            fs::write(&tmp_path, b"partial").expect("write partial temp");
            Err(anyhow::anyhow!("device full"))
        })
        .expect_err("stage fails");

        assert_eq!(err.to_string(), "device full");
        assert!(!tmp_path.exists());
        assert!(!dest.exists());
    }
}
