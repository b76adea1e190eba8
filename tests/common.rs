#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rtimeline::models::image::ImageData;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Small PNG-signed payload; only the magic bytes matter.
pub const PNG_BYTES: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];

pub fn png() -> ImageData {
    ImageData::new(PNG_BYTES.to_vec())
}

/// JPEG header with a 3x2 RGB baseline frame; enough for the PDF writer.
pub fn jpeg() -> ImageData {
    let mut b = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00];
    b.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x02, 0x00, 0x03, 0x03]);
    b.extend_from_slice(&[0; 9]);
    b.extend_from_slice(&[0xFF, 0xD9]);
    ImageData::new(b)
}

/// Isolated home for one CLI test: config dir, database and save points
/// all live inside a temp dir that is removed on drop.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn db(&self) -> String {
        self.path("rtimeline.sqlite").to_string_lossy().to_string()
    }

    pub fn save_dir(&self) -> String {
        self.path("savepoints").to_string_lossy().to_string()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// `rtimeline --db <db> --save-dir <dir> --test`, with the config dir
    /// pointed into the sandbox.
    pub fn rti(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rtimeline");
        cmd.env("RTIMELINE_HOME", self.dir.path().join("home"))
            .args(["--db", &self.db(), "--save-dir", &self.save_dir(), "--test"]);
        cmd
    }

    pub fn add(&self, title: &str, date: &str) {
        self.rti().args(["add", title, date]).assert().success();
    }

    pub fn write(&self, name: &str, content: &[u8]) -> PathBuf {
        let p = self.path(name);
        std::fs::write(&p, content).expect("write fixture");
        p
    }
}

pub fn path_str(p: &Path) -> String {
    p.to_string_lossy().to_string()
}
