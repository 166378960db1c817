use std::{
    io::Read,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::{Duration, Instant},
};

use crate::foundation::error::{PostError, PostResult};

/// Target raster width for social-media posts.
pub const DEFAULT_WIDTH_PX: u32 = 1080;
/// Upper bound on one rasterizer invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Clone, Debug, PartialEq, Eq)]
/// External SVG -> PNG converter (Inkscape command line).
pub struct Rasterizer {
    /// Executable, looked up on PATH when not absolute.
    pub program: PathBuf,
    /// Output width in pixels; height follows the document's aspect ratio.
    pub width_px: u32,
    /// The child is killed once this elapses.
    pub timeout: Duration,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            program: PathBuf::from("inkscape"),
            width_px: DEFAULT_WIDTH_PX,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Rasterizer {
    /// Rasterizer running `program` with the default width and timeout.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Render `svg` into `png`.
    ///
    /// Spawn failures, a non-zero exit and timeouts all map to [`PostError::Rasterize`];
    /// the SVG is never touched.
    pub fn rasterize(&self, svg: &Path, png: &Path) -> PostResult<()> {
        if self.width_px == 0 {
            return Err(PostError::rasterize("raster width must be non-zero"));
        }
        ensure_parent_dir(png)?;

        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg("-w")
            .arg(self.width_px.to_string())
            .arg("-o")
            .arg(png)
            .arg(svg);

        let mut child = cmd.spawn().map_err(|e| {
            PostError::rasterize(format!(
                "failed to spawn '{}' (is it installed and on PATH?): {e}",
                self.program.display()
            ))
        })?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| PostError::rasterize("failed to open rasterizer stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok::<_, std::io::Error>(bytes)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(PostError::rasterize(format!(
                        "'{}' timed out after {:?} on '{}'",
                        self.program.display(),
                        self.timeout,
                        svg.display()
                    )));
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(PostError::rasterize(format!(
                        "failed to wait for '{}': {e}",
                        self.program.display()
                    )));
                }
            }
        };

        if !status.success() {
            let stderr = stderr_drain
                .join()
                .ok()
                .and_then(Result::ok)
                .unwrap_or_default();
            return Err(PostError::rasterize(format!(
                "'{}' exited with status {}: {}",
                self.program.display(),
                status,
                String::from_utf8_lossy(&stderr).trim()
            )));
        }

        tracing::debug!(png = %png.display(), "rasterized");
        Ok(())
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> PostResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterize.rs"]
mod tests;
