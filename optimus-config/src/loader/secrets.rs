use std::{fs, path::Path};

use super::error::ConfigLoadError;

/// Read a secret from disk, trimming the trailing newline most secret
/// stores add. An empty file counts as no secret.
pub(crate) fn read_secret_file(
    path: &Path,
) -> Result<Option<String>, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::SecretFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trims_and_treats_empty_as_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  s3cret  ").unwrap();
        assert_eq!(
            read_secret_file(file.path()).unwrap().as_deref(),
            Some("s3cret")
        );

        let empty = tempfile::NamedTempFile::new().unwrap();
        assert!(read_secret_file(empty.path()).unwrap().is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_secret_file(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::SecretFileIo { .. }));
    }
}
