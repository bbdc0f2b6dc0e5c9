use httpdate::{fmt_http_date, parse_http_date};
use std::time::SystemTime;

/// Weak validator derived from the file's mtime and size.
pub(crate) fn weak_etag(modified: Option<SystemTime>, len: u64) -> String {
    let secs = modified
        .and_then(|m| m.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("W/\"{secs:x}.{len:x}\"")
}

pub(crate) fn last_modified(modified: Option<SystemTime>) -> Option<String> {
    modified.map(fmt_http_date)
}

/// Cache validators sent by the client. If-None-Match wins over
/// If-Modified-Since when both are present.
#[derive(Debug, Default)]
pub struct Validators {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

impl Validators {
    /// True when the client's cached copy is still current and a 304 is in
    /// order.
    pub(crate) fn still_fresh(&self, etag: &str, modified: Option<SystemTime>) -> bool {
        if let Some(inm) = &self.if_none_match {
            return inm.trim() == "*"
                || inm.split(',').any(|c| bare(c.trim()) == bare(etag));
        }

        if let (Some(ims), Some(modified)) = (&self.if_modified_since, modified) {
            if let Ok(since) = parse_http_date(ims) {
                // HTTP dates carry whole seconds; sub-second drift counts
                // as unchanged.
                return match modified.duration_since(since) {
                    Ok(delta) => delta.as_secs() < 1,
                    Err(_) => true,
                };
            }
        }

        false
    }
}

fn bare(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn etag_is_stable_for_same_inputs() {
        assert_eq!(
            weak_etag(Some(at(1_700_000_000)), 42),
            weak_etag(Some(at(1_700_000_000)), 42)
        );
    }

    #[test]
    fn weak_comparison_ignores_the_weak_prefix() {
        // Arrange
        let etag = weak_etag(None, 42);
        let validators = Validators {
            if_none_match: Some(etag.strip_prefix("W/").unwrap().to_string()),
            ..Default::default()
        };

        // Act / Assert
        assert!(validators.still_fresh(&etag, None));
    }

    #[test]
    fn star_matches_any_etag() {
        let validators = Validators {
            if_none_match: Some("*".to_string()),
            ..Default::default()
        };
        assert!(validators.still_fresh("W/\"2a.0\"", None));
    }

    #[test]
    fn etag_list_is_searched() {
        // Arrange
        let etag = weak_etag(Some(at(1)), 42);
        let hit = Validators {
            if_none_match: Some(format!("W/\"ff.0\", {etag}")),
            ..Default::default()
        };
        let miss = Validators {
            if_none_match: Some("W/\"ff.0\", W/\"2b.1\"".to_string()),
            ..Default::default()
        };

        // Act / Assert
        assert!(hit.still_fresh(&etag, None));
        assert!(!miss.still_fresh(&etag, None));
    }

    #[test]
    fn invalid_if_modified_since_counts_as_modified() {
        let validators = Validators {
            if_modified_since: Some("not a date".to_string()),
            ..Default::default()
        };
        assert!(!validators.still_fresh("W/\"1.1\"", Some(SystemTime::now())));
    }

    #[test]
    fn sub_second_drift_counts_as_unchanged() {
        // Arrange
        let modified = at(1_700_000_000) + Duration::from_millis(500);
        let validators = Validators {
            if_modified_since: Some(fmt_http_date(at(1_700_000_000))),
            ..Default::default()
        };

        // Act / Assert
        assert!(validators.still_fresh("W/\"1.1\"", Some(modified)));
    }
}
