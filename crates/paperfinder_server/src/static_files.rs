//! Static file lookup confined to the static root.

use std::path::{Component, Path, PathBuf};

/// Maps a request path under `/static/` to a file under `root`.
///
/// Returns `None` for empty paths and for any path that is absolute or
/// contains `.` / `..` components.
pub fn resolve(root: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::{content_type, resolve};
    use std::path::Path;

    #[test]
    fn traversal_and_empty_paths_are_rejected() {
        let root = Path::new("/srv/static");
        assert_eq!(resolve(root, "../subjects.json"), None);
        assert_eq!(resolve(root, "yearly_papers/../../x"), None);
        assert_eq!(resolve(root, ""), None);
        assert_eq!(
            resolve(root, "yearly_papers/PHY/PHY_w23_qp_12.pdf"),
            Some(Path::new("/srv/static/yearly_papers/PHY/PHY_w23_qp_12.pdf").to_path_buf())
        );
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type(Path::new("a/B.PDF")), "application/pdf");
        assert_eq!(content_type(Path::new("style.css")), "text/css; charset=utf-8");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}
