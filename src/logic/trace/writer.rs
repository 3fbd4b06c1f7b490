use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::record::TraceRecord;

const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// Files in a trace directory
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStats {
    pub total_files: usize,
    pub total_size_mb: f32,
    pub current_file: String,
}

pub struct TraceWriter {
    file: Option<File>,
    base_dir: PathBuf,
    max_file_size: u64,
    records: u64,
}

impl TraceWriter {
    /// Writer over the default directory
    pub fn new() -> io::Result<Self> {
        Self::from_path(super::default_trace_dir())
    }

    pub fn from_path(base_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;

        Ok(Self {
            file: None,
            base_dir,
            max_file_size: MAX_FILE_SIZE,
            records: 0,
        })
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Records appended through this writer
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Append record to the trace log
    /// Handles file rotation automatically
    pub fn append(&mut self, record: &TraceRecord) -> io::Result<()> {
        // Reuse the latest file across runs while it has room
        if self.file.is_none() {
            let file = match self.find_latest_trace_file()? {
                Some(path) => {
                    let f = OpenOptions::new().create(true).append(true).open(&path)?;
                    if f.metadata()?.len() < self.max_file_size {
                        f
                    } else {
                        self.create_new_file()?
                    }
                }
                None => self.create_new_file()?,
            };
            self.file = Some(file);
        }

        let should_rotate = match self.file.as_ref() {
            Some(f) => f.metadata()?.len() >= self.max_file_size,
            None => false,
        };
        if should_rotate {
            self.file = Some(self.create_new_file()?);
            log::debug!("Trace file rotated in {}", self.base_dir.display());
        }

        if let Some(file) = self.file.as_mut() {
            let json = serde_json::to_string(record)?;
            writeln!(file, "{}", json)?;
            self.records += 1;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    pub fn get_stats(&self) -> io::Result<TraceStats> {
        let paths = self.trace_files()?;

        let mut size = 0u64;
        for path in &paths {
            size += fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        }

        let current_file = paths
            .last()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("None")
            .to_string();

        Ok(TraceStats {
            total_files: paths.len(),
            total_size_mb: size as f32 / 1024.0 / 1024.0,
            current_file,
        })
    }

    fn create_new_file(&self) -> io::Result<File> {
        // timestamp format: YYYY-MM-DD-HHMMSS, then a sequence for same-second rotations
        let stamp = Utc::now().format("%Y-%m-%d-%H%M%S").to_string();
        let mut seq = 0u32;
        let path = loop {
            let candidate = self.base_dir.join(format!("trace-{}-{:04}.jsonl", stamp, seq));
            if !candidate.exists() {
                break candidate;
            }
            seq += 1;
        };

        OpenOptions::new().create(true).append(true).open(path)
    }

    fn find_latest_trace_file(&self) -> io::Result<Option<PathBuf>> {
        Ok(self.trace_files()?.pop())
    }

    /// Trace files sorted by name (timestamp ensures order)
    fn trace_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.base_dir)?
            .filter_map(|res| res.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "jsonl"))
            .collect::<Vec<_>>();

        entries.sort();
        Ok(entries)
    }
}
