use crate::conf::types::{CachePolicy, SiteConfig};
use crate::files::listing::directory_index;
use crate::files::resolve::{ResolveError, Target, resolve};
use crate::files::revalidate::{Validators, last_modified, weak_etag};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use std::path::Path;
use tokio::fs;

/// A fully materialized response.
///
/// Dev bundles are small, so bodies are buffered in memory; `max_file_size`
/// bounds the read.
pub struct ServedFile {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ServedFile {
    fn status_only(status: StatusCode) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        Self {
            status,
            headers,
            body: Bytes::new(),
        }
    }
}

/// Serve one request path from the site directory.
pub async fn serve_path(
    site: &SiteConfig,
    request_path: &str,
    validators: &Validators,
) -> ServedFile {
    let target = match resolve(site, request_path) {
        Ok(t) => t,
        Err(ResolveError::NotFound) => return ServedFile::status_only(StatusCode::NOT_FOUND),
        Err(ResolveError::Outside) => return ServedFile::status_only(StatusCode::FORBIDDEN),
        Err(ResolveError::BadRequest) => return ServedFile::status_only(StatusCode::BAD_REQUEST),
    };

    match target {
        Target::File(path) => serve_file(site, &path, validators).await,
        Target::Directory(dir) => {
            if !site.directory_listing {
                return ServedFile::status_only(StatusCode::FORBIDDEN);
            }
            match directory_index(&dir, request_path) {
                Ok(page) => listing_page(page),
                Err(_) => ServedFile::status_only(StatusCode::FORBIDDEN),
            }
        }
    }
}

async fn serve_file(site: &SiteConfig, path: &Path, validators: &Validators) -> ServedFile {
    let meta = match fs::metadata(path).await {
        Ok(m) if m.is_file() => m,
        _ => return ServedFile::status_only(StatusCode::NOT_FOUND),
    };

    if meta.len() > site.max_file_size {
        return ServedFile::status_only(StatusCode::FORBIDDEN);
    }

    let modified = meta.modified().ok();
    let etag = weak_etag(modified, meta.len());

    let mut headers = HeaderMap::new();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    set(&mut headers, header::CONTENT_TYPE, mime.as_ref());
    set(&mut headers, header::ETAG, &etag);
    if let Some(lm) = last_modified(modified) {
        set(&mut headers, header::LAST_MODIFIED, &lm);
    }
    set(&mut headers, header::CACHE_CONTROL, &cache_control(&site.cache));

    if validators.still_fresh(&etag, modified) {
        set(&mut headers, header::CONTENT_LENGTH, "0");
        return ServedFile {
            status: StatusCode::NOT_MODIFIED,
            headers,
            body: Bytes::new(),
        };
    }

    let body = match fs::read(path).await {
        Ok(b) => Bytes::from(b),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return ServedFile::status_only(StatusCode::FORBIDDEN);
        }
        Err(_) => return ServedFile::status_only(StatusCode::INTERNAL_SERVER_ERROR),
    };

    set(&mut headers, header::CONTENT_LENGTH, &body.len().to_string());
    ServedFile {
        status: StatusCode::OK,
        headers,
        body,
    }
}

/// Development default (max-age 0): the browser revalidates every request,
/// so edits show up on reload. A nonzero max-age opts into ordinary caching.
fn cache_control(policy: &CachePolicy) -> String {
    if policy.max_age == 0 {
        return "no-cache".to_string();
    }

    let scope = if policy.public { "public" } else { "private" };
    let mut value = format!("{scope}, max-age={}", policy.max_age);
    if policy.immutable {
        value.push_str(", immutable");
    }
    value
}

fn listing_page(page: String) -> ServedFile {
    let body = Bytes::from(page);
    let mut headers = HeaderMap::new();
    set(
        &mut headers,
        header::CONTENT_TYPE,
        "text/html; charset=utf-8",
    );
    set(&mut headers, header::CACHE_CONTROL, "no-store");
    set(&mut headers, header::CONTENT_LENGTH, &body.len().to_string());

    ServedFile {
        status: StatusCode::OK,
        headers,
        body,
    }
}

fn set(headers: &mut HeaderMap, name: header::HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::tempdir;

    fn site_at(root: &Path) -> SiteConfig {
        SiteConfig {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn serves_a_file_with_revalidation_headers() {
        // Arrange
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("index.html"), "<html>hello</html>").unwrap();
        let site = site_at(dir.path());

        // Act
        let resp = serve_path(&site, "/", &Validators::default()).await;

        // Assert
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.headers[header::CONTENT_TYPE], "text/html");
        assert_eq!(resp.headers[header::CONTENT_LENGTH], "18");
        assert_eq!(resp.headers[header::CACHE_CONTROL], "no-cache");
        assert!(resp.headers.contains_key(header::ETAG));
        assert_eq!(&resp.body[..], b"<html>hello</html>");
    }

    #[tokio::test]
    async fn matching_etag_yields_304_with_empty_body() {
        // Arrange
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();
        let site = site_at(dir.path());

        let first = serve_path(&site, "/app.js", &Validators::default()).await;
        let etag = first.headers[header::ETAG].to_str().unwrap().to_string();

        let validators = Validators {
            if_none_match: Some(etag),
            ..Default::default()
        };

        // Act
        let resp = serve_path(&site, "/app.js", &validators).await;

        // Assert
        assert_eq!(resp.status, StatusCode::NOT_MODIFIED);
        assert!(resp.body.is_empty());
    }

    #[tokio::test]
    async fn unknown_paths_are_404() {
        // Arrange
        let dir = tempdir().unwrap();
        let site = site_at(dir.path());

        // Act
        let resp = serve_path(&site, "/missing.js", &Validators::default()).await;

        // Assert
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_files_are_forbidden() {
        // Arrange
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("huge.bin"), vec![0u8; 32]).unwrap();
        let mut site = site_at(dir.path());
        site.max_file_size = 16;

        // Act
        let resp = serve_path(&site, "/huge.bin", &Validators::default()).await;

        // Assert
        assert_eq!(resp.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn directories_are_forbidden_unless_listing_is_enabled() {
        // Arrange
        let dir = tempdir().unwrap();
        std_fs::create_dir(dir.path().join("assets")).unwrap();
        let mut site = site_at(dir.path());

        // Act
        let forbidden = serve_path(&site, "/assets", &Validators::default()).await;

        site.directory_listing = true;
        let listed = serve_path(&site, "/assets", &Validators::default()).await;

        // Assert
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
        assert_eq!(listed.status, StatusCode::OK);
        assert_eq!(listed.headers[header::CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn nonzero_max_age_produces_a_caching_policy() {
        // Arrange
        let dir = tempdir().unwrap();
        std_fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        let mut site = site_at(dir.path());
        site.cache = CachePolicy {
            max_age: 3600,
            public: true,
            immutable: true,
        };

        // Act
        let resp = serve_path(&site, "/logo.svg", &Validators::default()).await;

        // Assert
        assert_eq!(
            resp.headers[header::CACHE_CONTROL],
            "public, max-age=3600, immutable"
        );
    }
}
