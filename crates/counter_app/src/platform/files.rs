use std::fs;
use std::io;
use std::path::Path;

use counter_core::file_source_label;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileLoadError {
    #[error("Arquivo não encontrado: {0}")]
    NotFound(String),
    #[error("Não foi possível abrir o arquivo: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Arquivo não está codificado em UTF-8: {0}")]
    NotUtf8(String),
    #[error("Arquivo está vazio!")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub text: String,
    pub source_label: String,
}

/// Reads a UTF-8 text file for processing; the label shows the file name only.
pub fn load_text_file(path: &Path) -> Result<LoadedFile, FileLoadError> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FileLoadError::NotFound(display.clone()),
        _ => FileLoadError::Io {
            path: display.clone(),
            source: err,
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|_| FileLoadError::NotUtf8(display))?;
    if text.trim().is_empty() {
        return Err(FileLoadError::Empty);
    }
    Ok(LoadedFile {
        text,
        source_label: file_source_label(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_text_and_labels_with_file_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entrada.txt");
        fs::write(&path, "abc 123\n").unwrap();

        let loaded = load_text_file(&path).unwrap();
        assert_eq!(loaded.text, "abc 123\n");
        assert_eq!(loaded.source_label, "Arquivo: entrada.txt");
    }

    #[test]
    fn missing_empty_and_binary_files_are_errors() {
        let temp = TempDir::new().unwrap();

        let missing = load_text_file(&temp.path().join("nope.txt")).unwrap_err();
        assert!(matches!(missing, FileLoadError::NotFound(_)));

        let empty = temp.path().join("empty.txt");
        fs::write(&empty, " \n\t").unwrap();
        assert!(matches!(load_text_file(&empty), Err(FileLoadError::Empty)));

        let binary = temp.path().join("blob.bin");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x81]).unwrap();
        assert!(matches!(
            load_text_file(&binary),
            Err(FileLoadError::NotUtf8(_))
        ));
    }

    #[test]
    fn directory_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let err = load_text_file(temp.path()).unwrap_err();
        assert!(matches!(err, FileLoadError::Io { .. }));
    }
}
