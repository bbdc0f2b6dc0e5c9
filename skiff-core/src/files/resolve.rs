use crate::conf::types::SiteConfig;
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ResolveError {
    /// The request escapes the site root or its mounted base.
    Outside,
    NotFound,
    BadRequest,
}

#[derive(Debug)]
pub(crate) enum Target {
    File(PathBuf),
    Directory(PathBuf),
}

/// Map a request path onto the site directory.
///
/// The path must sit at or under the configured base, decode cleanly as
/// UTF-8 (exactly one percent-decode pass), and stay inside the site root
/// after canonicalization. Directory hits fall through to the configured
/// index file when one exists.
pub(crate) fn resolve(site: &SiteConfig, request_path: &str) -> Result<Target, ResolveError> {
    if !request_path.starts_with('/') {
        return Err(ResolveError::BadRequest);
    }

    let rel = strip_base(request_path, &site.base).ok_or(ResolveError::NotFound)?;

    let decoded = percent_encoding::percent_decode_str(rel)
        .decode_utf8()
        .map_err(|_| ResolveError::BadRequest)?;

    let mut target = site.root.clone();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(ResolveError::Outside),
            s if s.contains('\\') || s.contains('\0') => return Err(ResolveError::BadRequest),
            s => target.push(s),
        }
    }

    // Canonicalize both ends and insist the target stays inside the root,
    // which also catches symlinks pointing out of the site.
    let root = site
        .root
        .canonicalize()
        .map_err(|_| ResolveError::Outside)?;
    let target = match target.canonicalize() {
        Ok(p) => p,
        Err(_) => return Err(ResolveError::NotFound),
    };
    if !target.starts_with(&root) {
        return Err(ResolveError::Outside);
    }

    if target.is_dir() {
        let index = target.join(&site.index);
        if index.is_file() {
            return Ok(Target::File(index));
        }
        return Ok(Target::Directory(target));
    }

    if target.is_file() {
        Ok(Target::File(target))
    } else {
        Err(ResolveError::NotFound)
    }
}

/// Strip the mounted base from the request path.
///
/// The boundary matters: with base "/app", the paths "/app" and "/app/x"
/// are inside, but "/appx" is a different resource entirely.
fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    if base == "/" {
        return Some(path);
    }

    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
