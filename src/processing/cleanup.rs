//! Removal of intermediate artifacts.
//!
//! Only to be called once the unified table is safely persisted:
//! sinks are what makes a failed run resumable.
use log::{info, warn};

use crate::{error::Error, io::Manifest, lang::LangPair};

/// Delete the sinks of `pairs` and drop them from the manifest.
///
/// The manifest file itself is removed once it has no entry left, and saved otherwise.
/// Returns the number of deleted sinks.
pub fn cleanup(manifest: &mut Manifest, pairs: &[LangPair]) -> Result<usize, Error> {
    let mut nb_removed = 0;
    for pair in pairs {
        let Some(entry) = manifest.remove(pair) else {
            continue;
        };

        let path = manifest.sink_path(&entry);
        match std::fs::remove_file(&path) {
            Ok(()) => nb_removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("[{}] sink {:?} already removed", pair, path)
            }
            Err(e) => return Err(e.into()),
        }
    }

    if manifest.is_empty() {
        let path = Manifest::path_in(manifest.dir());
        if path.exists() {
            std::fs::remove_file(path)?;
        }
    } else {
        manifest.save()?;
    }

    info!("removed {} intermediate files", nb_removed);
    Ok(nb_removed)
}

#[cfg(test)]
mod tests {
    use crate::{
        io::{ManifestEntry, Sink},
        sources::Corpus,
    };

    use super::*;

    fn add(manifest: &mut Manifest, pair: &LangPair) {
        let sink = Sink::create(manifest.dir(), Corpus::Ted2020, pair).unwrap();
        let finished = sink.finish().unwrap();
        manifest.insert(ManifestEntry::new(
            Corpus::Ted2020,
            pair,
            Sink::filename(Corpus::Ted2020, pair),
            finished.count,
        ));
    }

    #[test]
    fn removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = Manifest::load_or_new(dir.path()).unwrap();
        let pairs = vec![LangPair::new("en", "ar"), LangPair::new("en", "it")];
        for p in &pairs {
            add(&mut m, p);
        }
        m.save().unwrap();

        assert_eq!(cleanup(&mut m, &pairs).unwrap(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn keeps_other_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = Manifest::load_or_new(dir.path()).unwrap();
        let it = LangPair::new("en", "it");
        let de = LangPair::new("en", "de");
        add(&mut m, &it);
        add(&mut m, &de);
        m.save().unwrap();

        assert_eq!(cleanup(&mut m, &[it]).unwrap(), 1);
        assert!(dir.path().join("TED2020-en-de.tsv.gz").exists());
        assert!(!dir.path().join("TED2020-en-it.tsv.gz").exists());

        let reloaded = Manifest::load(dir.path()).unwrap();
        assert!(reloaded.get(&de).is_some());
        assert!(reloaded.get(&LangPair::new("en", "it")).is_none());
    }
}
