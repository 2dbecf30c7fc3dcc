//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const SAMPLE_PROGRAM: &str = "sunset - 5 fade\nocean - 3\n02_dunes - 4 zoom\nFinish - 18:00\nRepeat after finish - yes\nLock buttons - no\n";

/// Input and output directories for one converter run.
pub struct TestFixture {
    _temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestFixture {
    /// Create an input directory with `program` and one asset per name.
    pub fn new(program: &str, assets: &[&str]) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let input_dir = temp_dir.path().join("source");
        let output_dir = temp_dir.path().join("converted");
        std::fs::create_dir_all(&input_dir).expect("create input dir");
        std::fs::write(input_dir.join("program.txt"), program).expect("write program");
        for name in assets {
            std::fs::write(input_dir.join(format!("{name}.bmp")), format!("BM:{name}"))
                .expect("write asset");
        }
        Self {
            _temp_dir: temp_dir,
            input_dir,
            output_dir,
        }
    }

    /// Run the converter on this fixture with extra flags.
    pub fn run(&self, extra: &[&str]) -> Output {
        Command::new(bin())
            .arg(&self.input_dir)
            .arg(&self.output_dir)
            .args(extra)
            .env_remove("RUST_LOG")
            .output()
            .expect("run epoi-convert")
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

pub fn bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_epoi-convert"))
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
