pub mod csv;
pub mod render;
pub mod table;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

pub use render::render_table;
pub use table::ResultSet;

/// Turn a label into a safe file stem: whitespace runs become `_`, anything
/// other than ASCII alphanumerics, `-` and `_` is dropped.
pub fn file_stem(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_us = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
            last_us = false;
        } else if (ch.is_whitespace() || ch == '_') && !last_us {
            out.push('_');
            last_us = true;
        }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() {
        "export".to_string()
    } else {
        out
    }
}

/// Write `result` as `<dir>/<file_stem(stem)>.csv` and return the path.
pub fn save_csv(dir: &Path, stem: &str, result: &ResultSet) -> Result<PathBuf> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {:?}", dir))?;
    }

    let path = dir.join(format!("{}.csv", file_stem(stem)));
    let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    csv::write_csv(&mut writer, result).with_context(|| format!("Failed to write {:?}", path))?;
    writer.flush().with_context(|| format!("Failed to write {:?}", path))?;

    info!("Wrote {} rows to {:?}", result.len(), path);
    Ok(path)
}
