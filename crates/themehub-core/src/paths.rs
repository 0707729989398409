//! Slash-separated resource path utilities.
//!
//! Resource stores address entries with `/`-separated paths regardless of
//! backend, so path arithmetic lives here rather than on `std::path`, whose
//! separator is platform-dependent. Publish state is derived from these
//! paths alone: a video directly under a resource root is unpublished, a
//! video under the root's archive subfolder is published.

/// Join a directory path and an entry name with a single slash.
pub fn join(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if base.is_empty() {
        format!("/{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// The parent directory of a path, without a trailing slash.
///
/// Returns `/` for entries directly under the root and an empty string for
/// bare names.
pub fn parent(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}

/// The final component of a path.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// The file name with its extension stripped.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Whether an entry name is hidden (dotfile).
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Whether a file name carries a recognized video extension.
pub fn is_video(name: &str) -> bool {
    let ext = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return false,
    };
    matches!(
        ext.as_str(),
        "mp4" | "mov" | "mkv" | "avi" | "webm" | "flv" | "wmv" | "m4v" | "ts" | "mpg" | "mpeg"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("/videos/food", "a.mp4"), "/videos/food/a.mp4");
        assert_eq!(join("/videos/food/", "a.mp4"), "/videos/food/a.mp4");
        assert_eq!(join("", "a.mp4"), "/a.mp4");
        assert_eq!(join("/videos", "published"), "/videos/published");
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent("/videos/food/a.mp4"), "/videos/food");
        assert_eq!(parent("/videos/food/published/"), "/videos/food");
        assert_eq!(parent("/a.mp4"), "/");
        assert_eq!(parent("a.mp4"), "");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("/videos/food/a.mp4"), "a.mp4");
        assert_eq!(base_name("/videos/food/published/"), "published");
        assert_eq!(base_name("a.mp4"), "a.mp4");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("a.mp4"), "a");
        assert_eq!(file_stem("my.video.mp4"), "my.video");
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }

    #[test]
    fn test_is_video() {
        assert!(is_video("a.mp4"));
        assert!(is_video("A.MOV"));
        assert!(!is_video("notes.txt"));
        assert!(!is_video("noext"));
        assert!(!is_video(".mp4"));
    }
}
