use url::Url;

pub const DEFAULT_TITLE: &str = "YouTube Video";

/// What the user is asking the queue server to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionItem {
    pub source_url: String,
    pub display_title: String,
}

/// What the queue server reported back for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub title: String,
    /// The profile after the run; its address changes on a protocol upgrade.
    pub profile: crate::ServerProfile,
}

/// The active browser page as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub url: String,
    pub title: Option<String>,
}

impl PageInfo {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title,
        }
    }
}

/// Returns the submission item for a recognized media page.
///
/// Recognized pages are `youtube.com/watch?v=<id>` (optionally with `www.`)
/// and `youtu.be/<id>` over `http` or `https`.
pub fn recognize_media_page(page: &PageInfo) -> Option<SubmissionItem> {
    media_id(&page.url)?;
    let display_title = page
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();
    Some(SubmissionItem {
        source_url: page.url.clone(),
        display_title,
    })
}

/// Extracts the video id from a recognized media page URL.
pub fn media_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    let candidate = match host {
        "youtube.com" | "www.youtube.com" => {
            if parsed.path() != "/watch" {
                return None;
            }
            // The id must be the first query parameter.
            let query = parsed.query()?;
            query.strip_prefix("v=")?.to_string()
        }
        "youtu.be" | "www.youtu.be" => parsed.path().trim_start_matches('/').to_string(),
        _ => return None,
    };
    let id: String = candidate
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_and_short_links_are_recognized() {
        assert_eq!(
            media_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(media_id("http://youtube.com/watch?v=a_b-c").as_deref(), Some("a_b-c"));
        assert_eq!(media_id("https://youtu.be/abc").as_deref(), Some("abc"));
    }

    #[test]
    fn other_pages_are_rejected() {
        assert_eq!(media_id("https://www.youtube.com/feed/subscriptions"), None);
        assert_eq!(media_id("https://www.youtube.com/watch?list=x&v=abc"), None);
        assert_eq!(media_id("https://example.com/watch?v=abc"), None);
        assert_eq!(media_id("https://youtu.be/"), None);
        assert_eq!(media_id("chrome://extensions"), None);
        assert_eq!(media_id("not a url"), None);
    }

    #[test]
    fn missing_title_falls_back_to_default() {
        let item = recognize_media_page(&PageInfo::new("https://youtu.be/abc", None))
            .expect("media page");
        assert_eq!(item.display_title, DEFAULT_TITLE);
        assert_eq!(item.source_url, "https://youtu.be/abc");

        let item = recognize_media_page(&PageInfo::new(
            "https://youtu.be/abc",
            Some("Song - YouTube".to_string()),
        ))
        .expect("media page");
        assert_eq!(item.display_title, "Song - YouTube");
    }
}
