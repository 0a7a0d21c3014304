use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::annotate::Annotations;
use crate::error::Result;


/// Suffix appended to the domain file stem for the written annotations.
pub const OUTPUT_SUFFIX: &str = "annotations.json";

/// Returns `<output_dir>/<domain stem>.annotations.json`.
pub fn output_path(output_dir: &Path, domain_file: &Path) -> PathBuf {
    let stem = domain_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "domain".to_string());
    output_dir.join(format!("{}.{}", stem, OUTPUT_SUFFIX))
}

/// Write the annotations of one domain to a JSON file, creating parent
/// directories as needed.
pub fn write_annotations(path: &Path, annotations: &Annotations, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, annotations)?;
        writeln!(writer)?;
    } else {
        serde_json::to_writer(&mut writer, annotations)?;
    }
    writer.flush()?;

    Ok(())
}
