/*! Session manifest.

Index of the finished sinks of a corpus folder, stored as `manifest.json` next to them.
The assembler gets corpus and language identity from here rather than from file names.

```json
{
  "entries": {
    "en-ar": {
      "corpus": "WikiMatrix",
      "source_lang": "en",
      "target_lang": "ar",
      "file": "WikiMatrix-en-ar.tsv.gz",
      "count": 500
    }
  }
}
```
!*/
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{error::Error, lang::LangPair, sources::Corpus};

pub const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub corpus: Corpus,
    pub source_lang: String,
    pub target_lang: String,
    /// Sink file name, relative to the manifest folder.
    pub file: String,
    pub count: usize,
}

impl ManifestEntry {
    pub fn new(corpus: Corpus, pair: &LangPair, file: String, count: usize) -> Self {
        Self {
            corpus,
            source_lang: pair.source().to_string(),
            target_lang: pair.target().to_string(),
            file,
            count,
        }
    }

    pub fn pair(&self) -> LangPair {
        LangPair::new(&self.source_lang, &self.target_lang)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(skip)]
    dir: PathBuf,
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILENAME)
    }

    /// Load the manifest of `dir`, or start an empty one if there is none.
    pub fn load_or_new(dir: &Path) -> Result<Self, Error> {
        let path = Self::path_in(dir);
        if !path.exists() {
            debug!("no manifest in {:?}", dir);
            return Ok(Self {
                dir: dir.to_path_buf(),
                entries: BTreeMap::new(),
            });
        }

        Self::load(dir)
    }

    /// Load an existing manifest. A missing or invalid manifest is an [Error::Assembly].
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = Self::path_in(dir);
        let f = File::open(&path)
            .map_err(|e| Error::Assembly(format!("could not open manifest {:?}: {}", path, e)))?;
        let mut manifest: Manifest = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| Error::Assembly(format!("invalid manifest {:?}: {}", path, e)))?;
        manifest.dir = dir.to_path_buf();
        Ok(manifest)
    }

    /// Write the manifest through a temporary file.
    pub fn save(&self) -> Result<(), Error> {
        let path = Self::path_in(&self.dir);
        let tmp = path.with_extension("json.tmp");
        {
            let mut w = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut w, self)?;
            w.flush()?;
        }
        std::fs::rename(tmp, &path)?;
        debug!("saved manifest {:?}", path);
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn insert(&mut self, entry: ManifestEntry) {
        self.entries.insert(entry.pair().key(), entry);
    }

    pub fn get(&self, pair: &LangPair) -> Option<&ManifestEntry> {
        self.entries.get(&pair.key())
    }

    pub fn remove(&mut self, pair: &LangPair) -> Option<ManifestEntry> {
        self.entries.remove(&pair.key())
    }

    /// Entries, sorted by pair key.
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute location of the sink of an entry.
    pub fn sink_path(&self, entry: &ManifestEntry) -> PathBuf {
        self.dir.join(&entry.file)
    }
}
