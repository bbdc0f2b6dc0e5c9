use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::path::Path;

const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

/// HTML index of a directory. Dotfiles are skipped; directories sort first.
pub(crate) fn directory_index(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_dir() {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }
    dirs.sort();
    files.sort();

    let title = escape(request_path);
    let mut page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Index of {title}</title>\n</head>\n<body>\n\
         <h1>Index of {title}</h1>\n<ul>\n"
    );

    if request_path != "/" {
        page.push_str("<li><a href=\"../\">../</a></li>\n");
    }
    for name in &dirs {
        page.push_str(&row(name, true));
    }
    for name in &files {
        page.push_str(&row(name, false));
    }

    page.push_str("</ul>\n</body>\n</html>\n");
    Ok(page)
}

fn row(name: &str, is_dir: bool) -> String {
    let slash = if is_dir { "/" } else { "" };
    format!(
        "<li><a href=\"{href}{slash}\">{label}{slash}</a></li>\n",
        href = utf8_percent_encode(name, HREF),
        label = escape(name),
    )
}

/// Minimal HTML escaping, enough for filenames.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn listing_escapes_names_and_hides_dotfiles() {
        // Arrange
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a<b>.txt"), "").unwrap();
        fs::write(dir.path().join(".secret"), "").unwrap();

        // Act
        let html = directory_index(dir.path(), "/files").unwrap();

        // Assert
        assert!(html.contains("a&lt;b&gt;.txt"));
        assert!(!html.contains(".secret"));
        assert!(html.contains("<a href=\"../\">"));
    }

    #[test]
    fn root_listing_has_no_parent_link() {
        // Arrange
        let dir = tempdir().unwrap();

        // Act
        let html = directory_index(dir.path(), "/").unwrap();

        // Assert
        assert!(!html.contains("../"));
    }

    #[test]
    fn directories_are_listed_before_files() {
        // Arrange
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("aaa.txt"), "").unwrap();
        fs::create_dir(dir.path().join("zzz")).unwrap();

        // Act
        let html = directory_index(dir.path(), "/").unwrap();

        // Assert
        let dir_pos = html.find("zzz/").unwrap();
        let file_pos = html.find("aaa.txt").unwrap();
        assert!(dir_pos < file_pos);
    }
}
