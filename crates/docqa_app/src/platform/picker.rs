use std::fs;
use std::path::PathBuf;

use docqa_core::{CandidateFile, Msg};

/// Turns the typed path into a `FileChosen` or `FileUnavailable` message.
///
/// Only file metadata is read here; the content is streamed by the engine at
/// submission time.
pub fn choose_file(input: &str) -> Msg {
    let trimmed = input.trim();
    let path = PathBuf::from(trimmed);
    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| trimmed.to_string());
            Msg::FileChosen(CandidateFile::new(name, path, meta.len()))
        }
        Ok(_) => Msg::FileUnavailable {
            path: trimmed.to_string(),
            reason: "not a regular file".to_string(),
        },
        Err(err) => Msg::FileUnavailable {
            path: trimmed.to_string(),
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use docqa_core::Msg;
    use tempfile::TempDir;

    use super::choose_file;

    #[test]
    fn existing_file_reports_name_and_size() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "hello world").unwrap();

        let input = format!("  {}  ", path.display());
        match choose_file(&input) {
            Msg::FileChosen(file) => {
                assert_eq!(file.name, "notes.txt");
                assert_eq!(file.size, 11);
                assert_eq!(file.path, path);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn directory_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let msg = choose_file(&temp.path().display().to_string());
        assert!(matches!(msg, Msg::FileUnavailable { .. }));
    }

    #[test]
    fn missing_path_is_unavailable() {
        let msg = choose_file("/no/such/dir/notes.txt");
        assert!(
            matches!(msg, Msg::FileUnavailable { ref path, .. } if path == "/no/such/dir/notes.txt")
        );
    }
}
