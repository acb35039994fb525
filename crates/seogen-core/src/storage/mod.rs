//! Artifact persistence.
//!
//! One `.html` file per successful task, written to a `.part` temp file and
//! renamed into place so an interrupted write never leaves a truncated post
//! under its final name. Reruns overwrite.

mod writer;

pub use writer::{Artifact, ArtifactError, ArtifactWriter};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// First line of every generated file.
pub const HEADER_MARKER: &str = "<!-- Auto-generated blog -->";

/// Path for the temp file: appends `.part` to the final path (e.g. `post.html` → `post.html.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("post.html"));
        assert_eq!(p.to_string_lossy(), "post.html.part");
        let p2 = temp_path(Path::new("/tmp/generated/a.html"));
        assert_eq!(p2.to_string_lossy(), "/tmp/generated/a.html.part");
    }

    #[test]
    fn write_creates_dir_and_prefixes_marker() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated");
        let writer = ArtifactWriter::new(&out);

        let artifact = writer
            .write("Top 5 tips to improve hotel WiFi speeds!", "<h1>Tips</h1>")
            .unwrap();

        assert_eq!(artifact.filename, "top-5-tips-to-improve-hotel-wifi-speeds.html");
        assert_eq!(artifact.path, out.join(&artifact.filename));
        let text = std::fs::read_to_string(&artifact.path).unwrap();
        assert_eq!(text, "<!-- Auto-generated blog -->\n<h1>Tips</h1>");
        assert!(!temp_path(&artifact.path).exists());
    }

    #[test]
    fn rewrite_overwrites_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        writer.write("Same topic", "first version, quite long").unwrap();
        let second = writer.write("Same topic", "second").unwrap();

        let text = std::fs::read_to_string(&second.path).unwrap();
        assert_eq!(text, format!("{}\nsecond", HEADER_MARKER));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn content_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());
        let raw = "<script>alert('x')</script> & <b>unescaped</b>";
        let a = writer.write("raw", raw).unwrap();
        let text = std::fs::read_to_string(&a.path).unwrap();
        assert!(text.ends_with(raw));
    }

    #[test]
    fn topic_without_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());
        let err = writer.write("???", "body").unwrap_err();
        assert!(matches!(err, ArtifactError::NoFilename { .. }));
    }

    #[test]
    fn unwritable_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let writer = ArtifactWriter::new(blocker.join("sub"));
        let err = writer.write("topic", "body").unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }
}
