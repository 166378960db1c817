use std::{
    collections::BTreeMap,
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::{
    document::tree::{Element, NodeRole, QName, XLINK_NS},
    foundation::{
        config::Config,
        error::{PostError, PostResult},
    },
    plan::replacements::{ReplacementSet, SlotField, slot_key},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Team display name -> logo file, resolved against one directory.
pub struct LogoCatalog {
    dir: PathBuf,
    files: BTreeMap<String, String>,
}

impl LogoCatalog {
    /// Catalog over `files`, relative to `dir`.
    pub fn new(dir: impl Into<PathBuf>, files: BTreeMap<String, String>) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// Catalog of the configured logos inside `dir`.
    pub fn from_config(config: &Config, dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, config.logos.clone())
    }

    /// Directory logo files are resolved against.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `team`'s logo. Fails when the team has no entry or the file is missing.
    pub fn resolve(&self, team: &str) -> PostResult<PathBuf> {
        let file = self
            .files
            .get(team)
            .ok_or_else(|| PostError::logo(format!("no logo entry for team '{team}'")))?;
        let path = self.dir.join(file);
        if !path.is_file() {
            return Err(PostError::logo(format!(
                "logo file '{}' for team '{team}' does not exist",
                path.display()
            )));
        }
        Ok(path)
    }
}

#[derive(Clone, Debug)]
/// Logo bytes with their intrinsic size.
pub struct Logo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// MIME type of the detected format.
    pub mime: &'static str,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl Logo {
    /// Read a logo file. Only the image header is decoded.
    pub fn load(path: impl AsRef<Path>) -> PostResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read logo '{}'", path.display()))?;
        Self::from_bytes(bytes)
            .map_err(|e| PostError::logo(format!("'{}': {e}", path.display())))
    }

    /// Inspect in-memory image bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> PostResult<Self> {
        let reader = image::ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .context("sniff logo format")?;
        let format = reader
            .format()
            .ok_or_else(|| PostError::logo("unrecognized logo image format"))?;
        let (width, height) = reader
            .into_dimensions()
            .context("read logo dimensions")?;
        if width == 0 || height == 0 {
            return Err(PostError::logo("logo has zero width or height"));
        }
        Ok(Self {
            width,
            height,
            mime: format.to_mime_type(),
            bytes,
        })
    }

    /// `data:<mime>;base64,<bytes>` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Logo slots and the text slot naming the team that occupies each.
pub fn logo_slots() -> [(String, String); 2] {
    [
        (
            slot_key(1, SlotField::LogoTeam1),
            slot_key(1, SlotField::Team1),
        ),
        (
            slot_key(1, SlotField::LogoTeam2),
            slot_key(1, SlotField::Team2),
        ),
    ]
}

/// Embed the logo of each slot's team into `root`.
///
/// `replacements` must be the full set as planned, not the one a substitution pass
/// already consumed. Templates without a logo slot are fine; a slot whose team has no
/// logo is not.
pub fn embed_logos(
    root: &mut Element,
    replacements: &ReplacementSet,
    catalog: &LogoCatalog,
) -> PostResult<()> {
    for (logo_label, team_label) in logo_slots() {
        let Some(slot) = root.find_labelled_mut(&logo_label) else {
            continue;
        };
        if slot.role() != NodeRole::Image {
            return Err(PostError::template(format!(
                "slot '{logo_label}' is not an image"
            )));
        }
        let team = replacements.get(&team_label).ok_or_else(|| {
            PostError::template(format!(
                "slot '{logo_label}' present but no '{team_label}' value"
            ))
        })?;

        let path = catalog.resolve(team)?;
        let logo = Logo::load(&path)?;
        fit_logo(slot, &logo)?;
        tracing::debug!(slot = %logo_label, team, logo = %path.display(), "embedded logo");
    }
    Ok(())
}

/// Fit `logo` into an image slot: keep `x` and `width`, derive the height from the
/// logo's aspect ratio, keep the vertical center and inline the bytes.
pub fn fit_logo(slot: &mut Element, logo: &Logo) -> PostResult<()> {
    let width = number_attr(slot, "width")?
        .ok_or_else(|| PostError::template("image slot has no width"))?;
    let height = number_attr(slot, "height")?
        .ok_or_else(|| PostError::template("image slot has no height"))?;
    let y = number_attr(slot, "y")?.unwrap_or(0.0);

    let new_height = width * f64::from(logo.height) / f64::from(logo.width);
    let new_y = y + 0.5 * (height - new_height);

    slot.put_attr(QName::local("y"), new_y.to_string());
    slot.put_attr(QName::local("height"), new_height.to_string());

    let uri = logo.data_uri();
    if !slot.set_attr(Some(XLINK_NS), "href", uri.clone())
        && !slot.set_attr(None, "href", uri.clone())
    {
        slot.put_attr(QName::local("href"), uri);
    }
    Ok(())
}

fn number_attr(el: &Element, name: &str) -> PostResult<Option<f64>> {
    let Some(raw) = el.attr(None, name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
    digits
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| PostError::template(format!("image slot {name}='{raw}' is not a number")))
}

#[cfg(test)]
#[path = "../../tests/unit/document/logo.rs"]
mod tests;
