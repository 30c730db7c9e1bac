//! Frame sources.
//!
//! [`BuiltinFrames`] synthesizes handles from the stock frame counts, so
//! the pet runs without any asset folder.  [`DirectoryFrames`] reads one
//! sub-directory per animation (`<root>/<name>/`), taking the files in
//! name order as the frames.

use std::path::{Path, PathBuf};

use log::debug;

use crate::animation::FrameHandle;
use crate::app::ports::FrameSource;
use crate::error::Error;

/// Stock animations and their frame counts.
pub const BUILTIN_ANIMATIONS: &[(&str, u32)] = &[
    ("idle", 5),
    ("idle_to_sleep", 5),
    ("sleep", 24),
    ("sleep_to_idle", 5),
    ("walk_left", 5),
    ("walk_right", 5),
    ("heart", 15),
];

/// Hands out unique handles for the stock frame counts.
#[derive(Debug, Default)]
pub struct BuiltinFrames {
    next_id: u32,
}

impl BuiltinFrames {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSource for BuiltinFrames {
    fn load_animation(&mut self, name: &'static str) -> Result<Vec<FrameHandle>, Error> {
        let &(_, count) = BUILTIN_ANIMATIONS
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or(Error::AssetMissing(name))?;
        let first = self.next_id;
        self.next_id += count;
        Ok((first..first + count).map(FrameHandle).collect())
    }
}

/// Loads frames from an asset folder.
#[derive(Debug)]
pub struct DirectoryFrames {
    root: PathBuf,
    paths: Vec<PathBuf>,
}

impl DirectoryFrames {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            paths: Vec::new(),
        }
    }

    /// File backing a handle returned by this source.
    pub fn frame_path(&self, frame: FrameHandle) -> Option<&Path> {
        self.paths.get(frame.0 as usize).map(PathBuf::as_path)
    }
}

impl FrameSource for DirectoryFrames {
    fn load_animation(&mut self, name: &'static str) -> Result<Vec<FrameHandle>, Error> {
        let dir = self.root.join(name);
        let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
            .map_err(|_| Error::AssetMissing(name))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        if files.is_empty() {
            return Err(Error::AssetMissing(name));
        }
        files.sort();
        debug!("{}: {} frames", dir.display(), files.len());

        let first = self.paths.len() as u32;
        let count = files.len() as u32;
        self.paths.extend(files);
        Ok((first..first + count).map(FrameHandle).collect())
    }
}
