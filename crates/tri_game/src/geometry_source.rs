//! File-backed geometry: the vertex file is re-read every frame, so edits
//! show up on the next frame without a restart.

use std::fs;
use std::path::PathBuf;

use tri_core::geometry::parse_triangles;
use tri_core::{GeometrySource, Triangle};

pub struct FileGeometrySource {
    path: PathBuf,
    triangles_per_frame: usize,
    last_error: Option<String>,
}

impl FileGeometrySource {
    pub fn new(path: PathBuf, triangles_per_frame: usize) -> Self {
        Self {
            path,
            triangles_per_frame,
            last_error: None,
        }
    }

    fn load(&self) -> Result<Vec<Triangle>, String> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| format!("can't open file: {} ({e})", self.path.display()))?;
        parse_triangles(&text, self.triangles_per_frame)
            .map_err(|e| format!("bad geometry in {}: {e}", self.path.display()))
    }

    // Failures repeat every frame; only log when the message changes.
    fn report(&mut self, err: String) {
        if self.last_error.as_deref() != Some(err.as_str()) {
            log::error!("{err}");
            self.last_error = Some(err);
        }
    }
}

impl GeometrySource for FileGeometrySource {
    fn acquire(&mut self) -> Option<Vec<Triangle>> {
        match self.load() {
            Ok(triangles) => {
                if self.last_error.take().is_some() {
                    log::info!("Geometry file '{}' readable again", self.path.display());
                }
                Some(triangles)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }
}
