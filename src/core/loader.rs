// File: src/core/loader.rs
use crate::core::index::TranslationIndex;
use crate::core::types::SynonymRow;
use crate::error::LoadError;
use crate::persistence;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_CHAKMA_COLUMN: &str = "chakma";
pub const DEFAULT_BANGLA_COLUMN: &str = "bangla";

/// The two direction indexes built from one source table.
/// Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    pub chakma_to_bangla: TranslationIndex,
    pub bangla_to_chakma: TranslationIndex,
}

/// What a bangla term maps to in the reverse index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReversePolicy {
    /// Bangla term -> its own bangla synonym group. Matches the published
    /// service, whose bangla->chakma answers are bangla words.
    #[default]
    SelfGroup,
    /// Bangla term -> the chakma terms of the same row.
    Counterpart,
}

impl FromStr for ReversePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self-group" | "self_group" | "self" => Ok(ReversePolicy::SelfGroup),
            "counterpart" => Ok(ReversePolicy::Counterpart),
            other => Err(format!(
                "unknown reverse policy '{}', expected 'self-group' or 'counterpart'",
                other
            )),
        }
    }
}

impl fmt::Display for ReversePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReversePolicy::SelfGroup => f.write_str("self-group"),
            ReversePolicy::Counterpart => f.write_str("counterpart"),
        }
    }
}

/// Where the dictionary comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Remote(String),
    CsvFile(PathBuf),
    Snapshot(PathBuf),
}

impl DictionarySource {
    /// `http(s)://` locations are fetched, `.bin` files are snapshots,
    /// anything else is read as a local CSV file.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DictionarySource::Remote(location.to_string())
        } else if lower.ends_with(".bin") {
            DictionarySource::Snapshot(PathBuf::from(location))
        } else {
            DictionarySource::CsvFile(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::Remote(url) => write!(f, "{}", url),
            DictionarySource::CsvFile(path) => write!(f, "csv file {}", path.display()),
            DictionarySource::Snapshot(path) => write!(f, "snapshot {}", path.display()),
        }
    }
}

/// Splits a cell on ',' and trims each piece. Empty pieces are dropped,
/// so a blank cell yields an empty list.
pub fn parse_cell(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds a [`Dictionary`] from a two-column synonym table.
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    chakma_column: String,
    bangla_column: String,
    reverse_policy: ReversePolicy,
}

impl Default for DictionaryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryLoader {
    pub fn new() -> Self {
        Self {
            chakma_column: DEFAULT_CHAKMA_COLUMN.to_string(),
            bangla_column: DEFAULT_BANGLA_COLUMN.to_string(),
            reverse_policy: ReversePolicy::default(),
        }
    }

    pub fn with_columns(mut self, chakma: &str, bangla: &str) -> Self {
        self.chakma_column = chakma.to_string();
        self.bangla_column = bangla.to_string();
        self
    }

    pub fn with_reverse_policy(mut self, policy: ReversePolicy) -> Self {
        self.reverse_policy = policy;
        self
    }

    pub fn reverse_policy(&self) -> ReversePolicy {
        self.reverse_policy
    }

    /// Loads from any supported source. Remote fetches are bounded by `fetch_timeout`.
    pub async fn load_source(
        &self,
        source: &DictionarySource,
        fetch_timeout: Duration,
    ) -> Result<Dictionary, LoadError> {
        info!("Loading dictionary from {}", source);
        match source {
            DictionarySource::Remote(url) => {
                let body = fetch(url, fetch_timeout).await?;
                self.load_from_str(&body)
            }
            DictionarySource::CsvFile(path) => self.load_from_path(path),
            DictionarySource::Snapshot(path) => {
                persistence::load_snapshot(path, self.reverse_policy)
            }
        }
    }

    pub fn load_from_path(&self, path: &Path) -> Result<Dictionary, LoadError> {
        let file = std::fs::File::open(path)?;
        self.load_from_reader(file)
    }

    pub fn load_from_str(&self, csv_text: &str) -> Result<Dictionary, LoadError> {
        self.load_from_reader(csv_text.as_bytes())
    }

    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Dictionary, LoadError> {
        let rows = self.read_rows(reader)?;
        Ok(self.build(&rows))
    }

    /// Reads every record into a [`SynonymRow`]. Missing cells count as empty.
    pub fn read_rows<R: Read>(&self, reader: R) -> Result<Vec<SynonymRow>, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let chakma_idx = column_position(&headers, &self.chakma_column)?;
        let bangla_idx = column_position(&headers, &self.bangla_column)?;

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(SynonymRow {
                chakma: parse_cell(record.get(chakma_idx).unwrap_or("")),
                bangla: parse_cell(record.get(bangla_idx).unwrap_or("")),
            });
        }
        Ok(rows)
    }

    /// Fills both indexes. Later rows overwrite earlier ones for the same key.
    /// A row with nothing on the target side contributes no keys for that
    /// direction, so every stored synonym list is non-empty.
    pub fn build(&self, rows: &[SynonymRow]) -> Dictionary {
        let mut dictionary = Dictionary::default();
        let mut skipped_forward = 0usize;
        let mut skipped_reverse = 0usize;

        for row in rows {
            if row.bangla.is_empty() {
                if !row.chakma.is_empty() {
                    skipped_forward += 1;
                }
            } else {
                for chakma in &row.chakma {
                    dictionary.chakma_to_bangla.insert(chakma, row.bangla.clone());
                }
            }

            let reverse_target = match self.reverse_policy {
                ReversePolicy::SelfGroup => &row.bangla,
                ReversePolicy::Counterpart => &row.chakma,
            };
            if reverse_target.is_empty() {
                if !row.bangla.is_empty() {
                    skipped_reverse += 1;
                }
                continue;
            }
            for bangla in &row.bangla {
                dictionary
                    .bangla_to_chakma
                    .insert(bangla, reverse_target.clone());
            }
        }

        if skipped_forward > 0 || skipped_reverse > 0 {
            warn!(
                "Skipped {} chakma-only and {} bangla-only rows with no counterpart",
                skipped_forward, skipped_reverse
            );
        }
        info!(
            "Dictionary built from {} rows: {} chakma keys, {} bangla keys (reverse policy: {})",
            rows.len(),
            dictionary.chakma_to_bangla.len(),
            dictionary.bangla_to_chakma.len(),
            self.reverse_policy
        );
        dictionary
    }
}

fn column_position(headers: &csv::StringRecord, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|header| {
            header
                .trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case(name)
        })
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

/// Downloads the source table. Non-2xx answers, transport errors and
/// timeouts are all load failures.
pub async fn fetch(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let fetch_error = |reason: String| LoadError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;

    debug!("GET {} (timeout {:?})", url, timeout);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(format!("server answered {}", status)));
    }

    response.text().await.map_err(|e| fetch_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn parse_cell_splits_trims_and_drops_empties() {
        assert_eq!(parse_cell(" a , b,,c , "), strings(&["a", "b", "c"]));
        assert!(parse_cell("").is_empty());
        assert!(parse_cell(" , ,").is_empty());
    }

    #[test]
    fn builds_forward_and_self_group_reverse() {
        let csv = "chakma,bangla\n\"cha1, cha2\",ban1\n";
        let dict = DictionaryLoader::new().load_from_str(csv).unwrap();

        assert_eq!(dict.chakma_to_bangla.get("cha1"), Some(&strings(&["ban1"])[..]));
        assert_eq!(dict.chakma_to_bangla.get("cha2"), Some(&strings(&["ban1"])[..]));
        assert_eq!(dict.bangla_to_chakma.get("ban1"), Some(&strings(&["ban1"])[..]));
    }

    #[test]
    fn counterpart_policy_maps_back_to_chakma() {
        let csv = "chakma,bangla\n\"cha1, cha2\",\"ban1, ban2\"\n";
        let dict = DictionaryLoader::new()
            .with_reverse_policy(ReversePolicy::Counterpart)
            .load_from_str(csv)
            .unwrap();

        assert_eq!(dict.bangla_to_chakma.get("ban2"), Some(&strings(&["cha1", "cha2"])[..]));
    }

    #[test]
    fn keys_lowercased_values_keep_case() {
        let csv = "chakma,bangla\nHello,\"World, Earth\"\n";
        let dict = DictionaryLoader::new().load_from_str(csv).unwrap();

        assert_eq!(dict.chakma_to_bangla.get("hello"), Some(&strings(&["World", "Earth"])[..]));
        assert!(dict.bangla_to_chakma.contains("earth"));
    }

    #[test]
    fn rows_with_empty_target_are_skipped() {
        let csv = "chakma,bangla\nlonely,\n,orphan\nok,fine\n";
        let dict = DictionaryLoader::new()
            .with_reverse_policy(ReversePolicy::Counterpart)
            .load_from_str(csv)
            .unwrap();

        assert!(!dict.chakma_to_bangla.contains("lonely"));
        assert!(!dict.bangla_to_chakma.contains("orphan"));
        assert_eq!(dict.chakma_to_bangla.len(), 1);
        assert_eq!(dict.bangla_to_chakma.len(), 1);
    }

    #[test]
    fn short_records_count_as_empty_cells() {
        let csv = "chakma,bangla\nonly\nx,y\n";
        let dict = DictionaryLoader::new().load_from_str(csv).unwrap();
        assert_eq!(dict.chakma_to_bangla.len(), 1);
        assert!(dict.chakma_to_bangla.contains("x"));
    }

    #[test]
    fn later_rows_overwrite_earlier_ones() {
        let csv = "chakma,bangla\ndup,first\ndup,second\n";
        let dict = DictionaryLoader::new().load_from_str(csv).unwrap();
        assert_eq!(dict.chakma_to_bangla.get("dup"), Some(&strings(&["second"])[..]));
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let err = DictionaryLoader::new()
            .load_from_str("chakma,english\na,b\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "bangla"));
    }

    #[test]
    fn headers_are_matched_case_insensitively_and_columns_can_be_renamed() {
        let csv = "\u{feff} Src ,Dst\na,b\n";
        let dict = DictionaryLoader::new()
            .with_columns("src", "dst")
            .load_from_str(csv)
            .unwrap();
        assert!(dict.chakma_to_bangla.contains("a"));
    }

    #[test]
    fn source_location_parsing() {
        assert_eq!(
            DictionarySource::parse("https://example.org/dict.csv"),
            DictionarySource::Remote("https://example.org/dict.csv".to_string())
        );
        assert_eq!(
            DictionarySource::parse("data/dict.bin"),
            DictionarySource::Snapshot(PathBuf::from("data/dict.bin"))
        );
        assert_eq!(
            DictionarySource::parse("data/dict.csv"),
            DictionarySource::CsvFile(PathBuf::from("data/dict.csv"))
        );
    }

    #[test]
    fn reverse_policy_from_str() {
        assert_eq!("self-group".parse::<ReversePolicy>(), Ok(ReversePolicy::SelfGroup));
        assert_eq!("Counterpart".parse::<ReversePolicy>(), Ok(ReversePolicy::Counterpart));
        assert!("sideways".parse::<ReversePolicy>().is_err());
    }

    #[tokio::test]
    async fn unreachable_remote_is_a_fetch_error() {
        let source = DictionarySource::parse("http://127.0.0.1:9/dict.csv");
        let err = DictionaryLoader::new()
            .load_source(&source, Duration::from_millis(500))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }

    #[tokio::test]
    async fn silent_remote_hits_the_fetch_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let holder = tokio::spawn(async move {
            // Accept and keep the socket open without ever answering.
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let started = std::time::Instant::now();
        let err = fetch(&format!("http://{}/dict.csv", addr), Duration::from_millis(300))
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Fetch { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
        holder.abort();
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response: &[u8] =
                b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
            let _ = socket.write_all(response).await;
            let _ = socket.shutdown().await;
        });

        let err = fetch(&format!("http://{}/dict.csv", addr), Duration::from_secs(5))
            .await
            .unwrap_err();

        match err {
            LoadError::Fetch { reason, .. } => assert!(reason.contains("server answered 404")),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_local_file_is_an_io_error() {
        let source = DictionarySource::parse("definitely/not/here.csv");
        let err = DictionaryLoader::new()
            .load_source(&source, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
