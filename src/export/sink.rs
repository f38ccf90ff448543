use crate::config::ExportConfig;
use crate::error::Result;
use crate::scraper::ReviewRecord;
use crate::utils;
use crate::{log_info, log_warn};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "reviews_";

/// Writes finished exports into one output directory.
pub struct ExportSink {
    output_dir: PathBuf,
    write_json: bool,
}

impl ExportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            write_json: false,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.output_dir).with_json(config.write_json)
    }

    pub fn with_json(mut self, enabled: bool) -> Self {
        self.write_json = enabled;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Saves `text` as `reviews_<subject>.csv`. `subject` must already be
    /// sanitized for use in a file name.
    pub fn export_table(&self, subject: &str, text: &str) -> Result<PathBuf> {
        let path = utils::save_text(&self.output_dir, &file_name(subject, "csv"), text)?;
        log_info!("[export] Saved table to {}", path.display());
        Ok(path)
    }

    /// Saves the table and, when enabled, its JSON mirror. The mirror is
    /// rendered before anything is written; if saving it fails the table is
    /// removed again, so a failed export leaves no file behind.
    pub fn export(
        &self,
        subject: &str,
        table: &str,
        records: &[ReviewRecord],
    ) -> Result<(PathBuf, Option<PathBuf>)> {
        let json = if self.write_json {
            Some(serde_json::to_string_pretty(records)?)
        } else {
            None
        };

        let table_path = self.export_table(subject, table)?;
        let Some(json) = json else {
            return Ok((table_path, None));
        };

        match utils::save_text(&self.output_dir, &file_name(subject, "json"), &json) {
            Ok(path) => {
                log_info!("[export] Saved JSON to {}", path.display());
                Ok((table_path, Some(path)))
            }
            Err(e) => {
                if let Err(remove) = fs::remove_file(&table_path) {
                    log_warn!(
                        "[export] Could not remove {} after failed JSON write: {}",
                        table_path.display(),
                        remove
                    );
                }
                Err(e)
            }
        }
    }
}

fn file_name(subject: &str, extension: &str) -> String {
    format!("{}{}.{}", FILE_PREFIX, subject, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn table_is_named_after_subject() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path().join("exports"));

        let path = sink.export_table("Hotel_Las_Palmas", "a,b\n").unwrap();

        assert_eq!(path.file_name().unwrap(), "reviews_Hotel_Las_Palmas.csv");
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");
    }

    #[test]
    fn json_is_skipped_unless_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());

        let (table, json) = sink.export("x", "a\n", &[]).unwrap();

        assert!(json.is_none());
        assert_eq!(table.file_name().unwrap(), "reviews_x.csv");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn json_mirror_uses_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::from_config(&ExportConfig {
            output_dir: dir.path().to_string_lossy().into_owned(),
            write_json: true,
        });
        let records = vec![ReviewRecord {
            title: "Quiet".into(),
            average_rating: "8.8".into(),
            ..Default::default()
        }];

        let (_, json) = sink.export("Inn", "t\n", &records).unwrap();
        let path = json.unwrap();
        assert_eq!(path.file_name().unwrap(), "reviews_Inn.json");

        let written: Vec<ReviewRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, records);
        assert!(fs::read_to_string(&path).unwrap().contains("\"average_rating\": \"8.8\""));
    }

    #[test]
    fn failed_json_write_leaves_no_table() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the mirror's place makes the JSON write fail.
        fs::create_dir(dir.path().join("reviews_Inn.json")).unwrap();
        let sink = ExportSink::new(dir.path()).with_json(true);

        assert!(sink.export("Inn", "t\n", &[]).is_err());
        assert!(!dir.path().join("reviews_Inn.csv").exists());
    }
}
