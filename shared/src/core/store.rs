//! Generic persistence driver for record collections.
//!
//! A [`TextStore`] is configured once with a codec and drives
//! init/load/save over one backing file: UTF-8 text, one record per
//! line. Saving always copies the previous contents to a `.bak` sibling
//! before the destructive write, and every record is encoded before the
//! destination is touched, so a failed save never clobbers the original.
//!
//! The store owns the identity sequence for its record type: identities
//! observed while decoding and identities allocated by the factories go
//! through the same watermark, so records created after a load cannot
//! collide with stored ones.

use std::fs;
use std::io::Read;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::codec::Codec;
use crate::core::errors::{CoreError, CoreResult};
use crate::models::{IdSequence, Record};

/// Path value meaning "read from standard input" for [`TextStore::load`]
pub const STDIN_SENTINEL: &str = "-";

/// Suffix of the backup file written before every save
pub const BACKUP_SUFFIX: &str = ".bak";

/// Generic record store over one backing file
#[derive(Debug)]
pub struct TextStore<R: Record> {
    codec: Codec,
    ids: IdSequence,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> TextStore<R> {
    /// Create a store with the given codec
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            ids: IdSequence::new(),
            _record: PhantomData,
        }
    }

    /// Delimited-text store with the given separator
    pub fn delimited(separator: char) -> CoreResult<Self> {
        Ok(Self::new(Codec::delimited(separator)?))
    }

    /// JSON-lines store
    pub fn json() -> Self {
        Self::new(Codec::json())
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// The identity sequence shared by decoding and the record factories
    pub fn ids(&self) -> &IdSequence {
        &self.ids
    }

    pub fn ids_mut(&mut self) -> &mut IdSequence {
        &mut self.ids
    }

    /// Create an empty backing file.
    ///
    /// An existing file is deleted first when `overwrite` is set;
    /// otherwise it is left untouched and the call fails, so destroying
    /// data always takes an explicit request.
    pub fn init(&self, path: &Path, overwrite: bool) -> CoreResult<()> {
        if is_stdin(path) {
            return Err(CoreError::precondition(
                "standard input is not a valid init target",
            ));
        }

        if path.exists() {
            if !overwrite {
                return Err(CoreError::precondition(format!(
                    "the file '{}' already exists; request overwrite to replace it",
                    path.display()
                )));
            }
            fs::remove_file(path)?;
            debug!(path = %path.display(), "removed existing store file");
        }

        fs::write(path, "")?;
        info!(path = %path.display(), record_type = R::TYPE_NAME, "initialized empty store");
        Ok(())
    }

    /// Load every record, in file order.
    ///
    /// The sentinel path `-` reads standard input; any other path must
    /// exist. The load is all-or-nothing: the first undecodable line
    /// aborts it, no partial collection is returned, and the identity
    /// watermark is only raised once every line has decoded.
    pub fn load(&mut self, path: &Path) -> CoreResult<Vec<R>> {
        let contents = if is_stdin(path) {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            if !path.exists() {
                return Err(CoreError::precondition(format!(
                    "the file '{}' does not exist",
                    path.display()
                )));
            }
            fs::read_to_string(path)?
        };

        let mut records = Vec::new();
        for line in contents.lines() {
            records.push(self.codec.decode::<R>(line)?);
        }
        for record in &records {
            self.ids.observe(record.id());
        }

        debug!(
            count = records.len(),
            record_type = R::TYPE_NAME,
            "loaded records"
        );
        Ok(records)
    }

    /// Save the collection, one encoded line per record, in order.
    ///
    /// The previous contents are first copied to the `.bak` sibling
    /// (overwritten, never rotated), and all records are encoded into a
    /// buffer before the destination file is rewritten.
    pub fn save(&self, path: &Path, records: &[R]) -> CoreResult<()> {
        if is_stdin(path) {
            return Err(CoreError::precondition(
                "standard input is not a valid save target",
            ));
        }
        if !path.exists() {
            return Err(CoreError::precondition(format!(
                "cannot save to '{}': the file does not exist",
                path.display()
            )));
        }

        let mut buffer = String::new();
        for record in records {
            buffer.push_str(&self.codec.encode(record)?);
            buffer.push('\n');
        }

        let backup = backup_path(path);
        fs::copy(path, &backup)?;
        debug!(backup = %backup.display(), "wrote backup copy");

        fs::write(path, buffer)?;
        info!(
            count = records.len(),
            path = %path.display(),
            record_type = R::TYPE_NAME,
            "saved records"
        );
        Ok(())
    }
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new(STDIN_SENTINEL)
}

/// The backup sibling of a store path
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Wine;
    use assert_matches::assert_matches;

    #[test]
    fn test_backup_path_appends_the_suffix() {
        assert_eq!(
            backup_path(Path::new("cellar.txt")),
            PathBuf::from("cellar.txt.bak")
        );
    }

    #[test]
    fn test_stdin_sentinel_is_read_only() {
        let store = TextStore::<Wine>::delimited(':').unwrap();
        assert_matches!(
            store.init(Path::new(STDIN_SENTINEL), false),
            Err(CoreError::Precondition { .. })
        );
        assert_matches!(
            store.save(Path::new(STDIN_SENTINEL), &[]),
            Err(CoreError::Precondition { .. })
        );
    }

    #[test]
    fn test_loading_a_missing_file_fails() {
        let mut store = TextStore::<Wine>::delimited(':').unwrap();
        assert_matches!(
            store.load(Path::new("no-such-cellar.txt")),
            Err(CoreError::Precondition { .. })
        );
    }
}
