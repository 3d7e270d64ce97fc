// file: src/corpus/store.rs
// description: plain-text corpus files and JSON manifest on disk
// reference: one DOI/Title/Abstract text file per document

use crate::corpus::Corpus;
use crate::error::{Result, RetrievalError};
use crate::models::DocumentRecord;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusManifest {
    pub written_at: String,
    pub total_documents: usize,
    pub dois: Vec<String>,
}

/// On-disk corpus: a directory of plain text files, one document each, in the
/// format
///
/// ```text
/// DOI: 10.1234/example
/// Title: Some Work
/// Abstract: The abstract text...
/// ```
///
/// The abstract runs to the end of the file and may span multiple lines.
pub struct CorpusStore {
    dir: PathBuf,
    manifest_name: String,
}

impl CorpusStore {
    pub fn new(dir: impl Into<PathBuf>, manifest_name: &str) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            manifest_name: manifest_name.to_string(),
        })
    }

    fn file_path(&self, doi: &str) -> PathBuf {
        // DOIs contain '/', which cannot appear in a file name
        self.dir.join(format!("{}.txt", doi.replace('/', "_")))
    }

    pub fn document_exists(&self, doi: &str) -> bool {
        self.file_path(doi).is_file()
    }

    pub fn write_document(&self, record: &DocumentRecord) -> Result<PathBuf> {
        let path = self.file_path(&record.doi);
        let content = format!(
            "DOI: {}\nTitle: {}\nAbstract: {}\n",
            record.doi, record.title, record.abstract_text
        );
        fs::write(&path, content)?;
        debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn write_manifest(&self, corpus: &Corpus) -> Result<PathBuf> {
        let manifest = CorpusManifest {
            written_at: Utc::now().to_rfc3339(),
            total_documents: corpus.len(),
            dois: corpus.iter().map(|d| d.doi.clone()).collect(),
        };

        let path = self.dir.join(&self.manifest_name);
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(path)
    }

    /// Load every document file in the directory into a corpus.
    ///
    /// Files are visited in path order so the corpus order, and with it every
    /// retriever's internal indexing, is stable across runs.
    pub fn load_corpus(&self) -> Result<Corpus> {
        let mut paths: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("txt"))
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path)?;
            documents.push(Self::parse_document(&path, &content)?);
        }

        info!("loaded {} documents from {}", documents.len(), self.dir.display());
        Corpus::from_documents(documents)
    }

    fn parse_document(path: &Path, content: &str) -> Result<DocumentRecord> {
        let malformed = |message: &str| RetrievalError::CorpusFormat {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        let mut lines = content.lines();

        let doi = lines
            .next()
            .and_then(|line| line.strip_prefix("DOI: "))
            .ok_or_else(|| malformed("first line must be 'DOI: ...'"))?
            .trim()
            .to_string();
        if doi.is_empty() {
            return Err(malformed("DOI is empty"));
        }

        let title = lines
            .next()
            .and_then(|line| line.strip_prefix("Title: "))
            .ok_or_else(|| malformed("second line must be 'Title: ...'"))?
            .trim()
            .to_string();

        let rest: Vec<&str> = lines.collect();
        let abstract_text = rest
            .first()
            .and_then(|line| line.strip_prefix("Abstract: "))
            .map(|first| {
                let mut text = first.to_string();
                for line in &rest[1..] {
                    text.push(' ');
                    text.push_str(line);
                }
                text.trim().to_string()
            })
            .ok_or_else(|| malformed("third line must be 'Abstract: ...'"))?;

        Ok(DocumentRecord::new(doi, title, abstract_text))
    }
}
