use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::config::Columns;
use crate::error::{CleanError, Result};
use crate::pipeline::{CleanedRecord, FieldPipeline, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Tsv,
    JsonLines,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(DatasetFormat::Csv),
            "tsv" => Some(DatasetFormat::Tsv),
            "jsonl" | "ndjson" => Some(DatasetFormat::JsonLines),
            _ => None,
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            DatasetFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// Totals for one `clean_dataset` run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub files: usize,
    pub records: usize,
    pub links: usize,
    pub hashtags: usize,
    pub mentions: usize,
    /// Fields with raw text whose cleaned text came out empty.
    pub emptied: usize,
}

impl Default for RunReport {
    fn default() -> Self {
        RunReport {
            started_at: Utc::now(),
            finished_at: None,
            files: 0,
            records: 0,
            links: 0,
            hashtags: 0,
            mentions: 0,
            emptied: 0,
        }
    }
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, primary: &TextField, reply: &TextField, cleaned: &CleanedRecord) {
        self.records += 1;
        for (raw, field) in [(primary, &cleaned.primary), (reply, &cleaned.reply)] {
            self.links += field.entities.link_count();
            self.hashtags += field.entities.hashtag_count();
            self.mentions += field.entities.mention_count();
            if !raw.is_blank() && field.text.is_empty() {
                self.emptied += 1;
            }
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let f = File::create(path)?;
        let mut bw = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut bw, self)?;
        bw.flush()?;
        Ok(())
    }
}

/// Cleans one dataset file, or every supported file under a directory.
///
/// Directory input mirrors the relative layout under `out`.
pub fn clean_dataset(
    input: &Path,
    out: &Path,
    pipeline: &FieldPipeline,
    columns: &Columns,
    limit: Option<usize>,
) -> Result<RunReport> {
    let mut report = RunReport::new();

    if input.is_dir() {
        let files: Vec<PathBuf> = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    log::warn!("skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| DatasetFormat::from_path(p).is_some())
            .collect();

        log::debug!("found {} dataset files under {:?}", files.len(), input);
        for path in files {
            let rel = path.strip_prefix(input).unwrap_or(&path);
            clean_file(&path, &out.join(rel), pipeline, columns, limit, &mut report)?;
        }
    } else {
        clean_file(input, out, pipeline, columns, limit, &mut report)?;
    }

    report.finish();
    Ok(report)
}

/// Cleans a single file, writing the same format to `out`. Returns the number
/// of records written.
pub fn clean_file(
    input: &Path,
    out: &Path,
    pipeline: &FieldPipeline,
    columns: &Columns,
    limit: Option<usize>,
    report: &mut RunReport,
) -> Result<usize> {
    let format =
        DatasetFormat::from_path(input).ok_or_else(|| CleanError::UnsupportedFormat(input.into()))?;
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }

    let max = limit.unwrap_or(usize::MAX);
    let written = match format {
        DatasetFormat::Csv | DatasetFormat::Tsv => {
            clean_delimited(input, out, format.delimiter(), pipeline, columns, max, report)?
        }
        DatasetFormat::JsonLines => clean_json_lines(input, out, pipeline, columns, max, report)?,
    };

    report.files += 1;
    log::info!("cleaned {} records: {:?} -> {:?}", written, input, out);
    Ok(written)
}

fn csv_field(value: Option<&str>) -> TextField {
    match value {
        Some(v) if !v.is_empty() => TextField::from(v),
        _ => TextField::missing(),
    }
}

fn entity_values(rec: &CleanedRecord) -> [&str; 6] {
    [
        rec.primary.entities.links.as_str(),
        rec.primary.entities.hashtags.as_str(),
        rec.primary.entities.mentions.as_str(),
        rec.reply.entities.links.as_str(),
        rec.reply.entities.hashtags.as_str(),
        rec.reply.entities.mentions.as_str(),
    ]
}

fn clean_delimited(
    input: &Path,
    out: &Path,
    delimiter: u8,
    pipeline: &FieldPipeline,
    columns: &Columns,
    max: usize,
    report: &mut RunReport,
) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(input)?;

    let mut headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let position = |headers: &[String], name: &str| headers.iter().position(|h| h == name);
    let missing = |name: &str| CleanError::MissingColumn {
        column: name.to_string(),
        path: input.to_path_buf(),
    };
    let primary_idx = position(&headers, &columns.primary).ok_or_else(|| missing(&columns.primary))?;
    let reply_idx = position(&headers, &columns.reply).ok_or_else(|| missing(&columns.reply))?;

    // Entity columns already present (e.g. a re-run) are overwritten in place.
    let entity_idx: Vec<usize> = columns
        .entity_columns()
        .into_iter()
        .map(|name| match position(&headers, &name) {
            Some(i) => i,
            None => {
                headers.push(name);
                headers.len() - 1
            }
        })
        .collect();

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .take(max)
        .collect::<std::result::Result<_, _>>()?;

    let cleaned: Vec<CleanedRecord> = rows
        .par_iter()
        .map(|row| {
            let primary = csv_field(row.get(primary_idx));
            let reply = csv_field(row.get(reply_idx));
            pipeline.process_record(&primary, &reply)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(out)?;
    writer.write_record(&headers)?;

    for (row, rec) in rows.iter().zip(&cleaned) {
        report.record(
            &csv_field(row.get(primary_idx)),
            &csv_field(row.get(reply_idx)),
            rec,
        );

        let mut fields: Vec<&str> = row.iter().collect();
        fields.resize(headers.len(), "");
        fields[primary_idx] = rec.primary.text.as_str();
        fields[reply_idx] = rec.reply.text.as_str();
        for (&i, value) in entity_idx.iter().zip(entity_values(rec)) {
            fields[i] = value;
        }
        writer.write_record(&fields)?;
    }
    writer.flush()?;

    Ok(rows.len())
}

fn clean_json_lines(
    input: &Path,
    out: &Path,
    pipeline: &FieldPipeline,
    columns: &Columns,
    max: usize,
    report: &mut RunReport,
) -> Result<usize> {
    let reader = BufReader::new(File::open(input)?);
    let mut rows: Vec<Map<String, Value>> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        if rows.len() >= max {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let invalid = |reason: String| CleanError::InvalidRecord {
            path: input.to_path_buf(),
            line: i + 1,
            reason,
        };
        match serde_json::from_str::<Value>(&line).map_err(|e| invalid(e.to_string()))? {
            Value::Object(map) => rows.push(map),
            _ => return Err(invalid("expected a JSON object".into())),
        }
    }

    let field = |row: &Map<String, Value>, name: &str| {
        row.get(name).map(TextField::from_json).unwrap_or_default()
    };

    let cleaned: Vec<CleanedRecord> = rows
        .par_iter()
        .map(|row| {
            pipeline.process_record(&field(row, &columns.primary), &field(row, &columns.reply))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut bw = BufWriter::new(File::create(out)?);
    let entity_names = columns.entity_columns();
    let written = rows.len();

    for (mut row, rec) in rows.into_iter().zip(cleaned) {
        report.record(
            &field(&row, &columns.primary),
            &field(&row, &columns.reply),
            &rec,
        );

        for (name, value) in entity_names.iter().zip(entity_values(&rec)) {
            row.insert(name.clone(), Value::String(value.to_string()));
        }
        row.insert(columns.primary.clone(), Value::String(rec.primary.text));
        row.insert(columns.reply.clone(), Value::String(rec.reply.text));

        serde_json::to_writer(&mut bw, &row)?;
        bw.write_all(b"\n")?;
    }
    bw.flush()?;

    Ok(written)
}
