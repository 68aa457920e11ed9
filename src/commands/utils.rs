use crate::output::{read_table_document, render_table, write_table, WriteOptions};
use crate::parser::schema::ColumnKind;
use crate::parser::{parse_profile, InputFormat, ProfileTable};
use crate::utils::config::{CANONICAL_COLUMNS, GZIP_MAGIC, SCHEMA_VERSION};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::models::OutputArgs;

/// Open an input file, transparently decompressing gzip
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let is_gzip = reader
        .fill_buf()
        .with_context(|| format!("Cannot read {}", path.display()))?
        .starts_with(&GZIP_MAGIC);

    if is_gzip {
        debug!("{} is gzip-compressed", path.display());
        Ok(Box::new(BufReader::new(GzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Open and parse one report
pub fn read_profile_file(path: &Path, format: InputFormat) -> Result<ProfileTable> {
    let reader = open_input(path)?;
    parse_profile(reader, format)
        .with_context(|| format!("Failed to parse {} as {}", path.display(), format))
}

/// Render the table to the requested destination
///
/// `-` writes to stdout; no path writes to `default_path`.
pub fn write_output(
    table: &ProfileTable,
    output: &OutputArgs,
    options: &WriteOptions,
    default_path: PathBuf,
) -> Result<()> {
    let format = output.format();
    let path = output.output_file.clone().unwrap_or(default_path);

    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        render_table(table, format, options, &mut lock).context("Failed to write to stdout")?;
        lock.flush()?;
    } else {
        write_table(table, format, options, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("✓ Table written to: {}", path.display());
    }

    Ok(())
}

/// Validate a table document written with `-t json`
pub fn validate_table_file(file_path: PathBuf) -> Result<()> {
    println!("Validating table document: {}", file_path.display());

    let document = read_table_document(&file_path)?;

    println!("✓ Valid table document");
    println!("  Version: {}", document.version);
    println!("  Generated: {}", document.generated_at);
    if let Some(source) = &document.source {
        println!("  Source: {}", source);
    }
    println!("  Columns: {}", document.table.columns.len());
    println!("  Rows: {}", document.table.len());
    if document.table.totals_are_self_time {
        println!("  Note: total times are self-time proxies");
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Proflog Studio Table Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Canonical columns:");
        for column in CANONICAL_COLUMNS {
            let kind = match ColumnKind::for_column(column) {
                ColumnKind::Integer => "integer  - count",
                ColumnKind::Percent => "float    - percent",
                ColumnKind::Duration => "float    - milliseconds",
                ColumnKind::Text => "string   - operation name (join key)",
            };
            println!("  {:<14} {}", column, kind);
        }
        println!();
        println!("Compared tables suffix shared columns with _<label1> and _<label2>.");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Proflog Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Table Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Normalizes and compares compute-kernel profiler reports.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Read;

    #[test]
    fn test_open_input_plain_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let payload = b"{\"traceEvents\":[]}";

        let plain = dir.path().join("trace.json");
        std::fs::write(&plain, payload).unwrap();

        let gz = dir.path().join("trace.json.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        std::fs::write(&gz, encoder.finish().unwrap()).unwrap();

        for path in [plain, gz] {
            let mut contents = Vec::new();
            open_input(&path).unwrap().read_to_end(&mut contents).unwrap();
            assert_eq!(contents, payload);
        }
    }

    #[test]
    fn test_open_input_missing_file() {
        assert!(open_input(Path::new("/nonexistent/report.log")).is_err());
    }
}
