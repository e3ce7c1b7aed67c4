//! Loads `config.ini` and resolves it into a [`Palette`] of 256-color
//! terminal colors, falling back to built-in defaults whenever the file is
//! absent, unparsable, or missing a section.
//!
//! Grounded on `parse_config`/`get_config_color` in the reference
//! implementation, which reads `configparser.ConfigParser` sections
//! `Nucleobase Colors`, `Region Colors`, `Other Colors`. Unlike the
//! reference, the `Other Colors` lookup here reads its own section rather
//! than reusing whichever `section` variable the previous `if` block left
//! behind — see DESIGN.md.

mod color;
mod palette;

pub use palette::{NucleotideColors, Palette, RegionColors};

use std::path::PathBuf;

use ini::Ini;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read (permissions, a
    /// directory in place of a file, etc). A missing file is not an error —
    /// [`load`] treats it the same as an empty config.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Best-effort config path: `./config.ini` in the working directory, else
/// the platform config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("config.ini");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("genome-viewer").join("config.ini");
    }
    local
}

/// Load and resolve the palette. A missing file or a file that fails to
/// parse as INI falls back to [`Palette::built_in`] with a logged warning,
/// per the "configuration parse error is non-fatal" error policy; only an
/// I/O failure on a file that does exist is surfaced as [`ConfigError`].
pub fn load(path: Option<PathBuf>) -> Result<Palette, ConfigError> {
    let path = path.unwrap_or_else(discover);
    if !path.exists() {
        return Ok(Palette::built_in());
    }
    let ini = match Ini::load_from_file(&path) {
        Ok(ini) => ini,
        Err(ini::Error::Io(source)) => return Err(ConfigError::Io { path, source }),
        Err(parse_err) => {
            tracing::warn!(target: "config", path = %path.display(), error = %parse_err, "malformed config.ini, using built-in colors");
            return Ok(Palette::built_in());
        }
    };
    Ok(resolve(&ini))
}

fn resolve(ini: &Ini) -> Palette {
    let mut palette = Palette::built_in();

    if let Some(section) = ini.section(Some("Nucleobase Colors")) {
        apply(section, "A", &mut palette.nucleotide.a);
        apply(section, "C", &mut palette.nucleotide.c);
        apply(section, "G", &mut palette.nucleotide.g);
        apply(section, "T", &mut palette.nucleotide.t);
        apply(section, "?", &mut palette.nucleotide.other);
    }
    if let Some(section) = ini.section(Some("Region Colors")) {
        apply(section, "pseudogene exon", &mut palette.region.exon_pseudo);
        apply(section, "gene UTR", &mut palette.region.utr_gene);
        apply(section, "CDS", &mut palette.region.cds);
        apply(section, "CDS 2", &mut palette.region.cds2);
        apply(section, "intron", &mut palette.region.intron);
        apply(section, "tRNA", &mut palette.region.trna);
        apply(section, "rRNA", &mut palette.region.rrna);
        apply(section, "miRNA", &mut palette.region.mirna);
    }
    if let Some(section) = ini.section(Some("Other Colors")) {
        apply(section, "highlight", &mut palette.highlight);
    }

    palette
}

fn apply(section: &ini::Properties, key: &str, slot: &mut i16) {
    let Some(raw) = section.get(key) else {
        return;
    };
    match color::parse_color(raw) {
        Some(value) => *slot = value as i16,
        None => {
            tracing::debug!(target: "config", key, raw, "unrecognized color value, keeping default")
        }
    }
}
