//! Resource inlining stage.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Replaces `url(...)` references to local files with base64 data URIs so
//! the bundle is self-contained. References that already embed data or
//! point at remote hosts are left untouched.

use std::fs;
use std::path::Path;

use base64::prelude::*;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sassbundle_pipeline::{FileItem, PipelineError, PipelineStage};

/// Matches `url(...)` references, double-quoted, single-quoted, or bare.
///
/// Captures the reference in group 1, 2, or 3 depending on the quoting
/// style. The regex crate has no backreferences, hence the alternation.
static URL_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^"')][^)]*))\)"#).unwrap()
});

/// Inline `url(...)` resource references as base64 data URIs.
///
/// Referenced files are read relative to the item base. A reference to an
/// unreadable file fails the stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStage;

impl PipelineStage for InlineStage {
    fn name(&self) -> &str {
        "inline"
    }

    fn run(&self, mut item: FileItem) -> Result<FileItem, PipelineError> {
        let css = item.contents_str().ok_or_else(|| {
            PipelineError::stage(
                "inline",
                format!("{} is not valid UTF-8", item.path().display()),
            )
        })?;

        // replace_all takes an infallible closure; park the first failure
        // and surface it after the scan.
        let mut failure: Option<PipelineError> = None;
        let inlined = URL_REF
            .replace_all(css, |caps: &Captures<'_>| {
                let reference = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map_or("", |m| m.as_str().trim());

                if reference.is_empty() || !should_inline(reference) {
                    return caps[0].to_string();
                }

                match encode(item.base(), reference) {
                    Ok(uri) => format!("url({uri})"),
                    Err(e) => {
                        if failure.is_none() {
                            failure = Some(e);
                        }
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        if let Some(e) = failure {
            return Err(e);
        }

        item.set_contents(inlined.into_bytes());
        Ok(item)
    }
}

/// Whether `reference` points at a local file we can embed.
fn should_inline(reference: &str) -> bool {
    !(reference.starts_with("data:")
        || reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("//")
        || reference.starts_with('#'))
}

/// Read the referenced file relative to `base` and build a data URI.
fn encode(base: &Path, reference: &str) -> Result<String, PipelineError> {
    // Query/fragment suffixes are common on font references; the file on
    // disk has neither.
    let trimmed = reference.split(['?', '#']).next().unwrap_or(reference);
    let path = base.join(trimmed);

    let bytes = fs::read(&path).map_err(|e| {
        PipelineError::stage("inline", format!("cannot read {}: {e}", path.display()))
    })?;

    Ok(format!(
        "data:{};base64,{}",
        mime_for(&path),
        BASE64_STANDARD.encode(bytes)
    ))
}

/// Extension to MIME mapping for the resource types a stylesheet typically
/// references.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("eot") => "application/vnd.ms-fontobject",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn run_inline(base: &Path, css: &str) -> Result<String, PipelineError> {
        let item = FileItem::new(base, "bundle.css", css.as_bytes().to_vec());
        InlineStage
            .run(item)
            .map(|out| out.contents_str().unwrap_or_default().to_string())
    }

    #[test]
    fn test_should_inline() {
        assert!(should_inline("images/logo.png"));
        assert!(should_inline("../fonts/icons.woff2"));
        assert!(!should_inline("data:image/png;base64,AAAA"));
        assert!(!should_inline("http://example.com/a.png"));
        assert!(!should_inline("https://example.com/a.png"));
        assert!(!should_inline("//example.com/a.png"));
        assert!(!should_inline("#gradient"));
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.woff2")), "font/woff2");
        assert_eq!(mime_for(Path::new("a.unknown")), "application/octet-stream");
    }

    #[test]
    fn test_inlines_local_file() {
        let dir = TempDir::new().unwrap();
        let bytes = [0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x01];
        fs::write(dir.path().join("logo.png"), bytes).unwrap();

        let out = run_inline(dir.path(), r#".logo { background: url("logo.png"); }"#).unwrap();
        assert!(out.contains("url(data:image/png;base64,"));
        assert!(!out.contains("logo.png"));

        // Round-trip: the embedded payload decodes to the source bytes.
        let payload = out
            .split("base64,")
            .nth(1)
            .and_then(|rest| rest.split(')').next())
            .unwrap();
        assert_eq!(BASE64_STANDARD.decode(payload).unwrap(), bytes);
    }

    #[test]
    fn test_quoting_styles() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.gif"), b"GIF89a").unwrap();

        for css in [
            r#".a { background: url("a.gif"); }"#,
            r".a { background: url('a.gif'); }",
            r".a { background: url(a.gif); }",
        ] {
            let out = run_inline(dir.path(), css).unwrap();
            assert!(out.contains("data:image/gif;base64,"), "failed for {css}");
        }
    }

    #[test]
    fn test_query_and_fragment_stripped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("icons.woff2"), b"wOF2").unwrap();

        let out = run_inline(
            dir.path(),
            r#"@font-face { src: url("icons.woff2?v=4.7.0#iefix"); }"#,
        )
        .unwrap();
        assert!(out.contains("data:font/woff2;base64,"));
    }

    #[test]
    fn test_remote_and_data_refs_untouched() {
        let dir = TempDir::new().unwrap();
        let css = ".a { background: url(https://example.com/a.png); } \
                   .b { background: url(data:image/png;base64,AAAA); }";

        let out = run_inline(dir.path(), css).unwrap();
        assert_eq!(out, css);
    }

    #[test]
    fn test_missing_resource_fails() {
        let dir = TempDir::new().unwrap();
        let err = run_inline(dir.path(), r#".a { background: url("missing.png"); }"#).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_absolute_reference_resolves_outside_base() {
        let dir = TempDir::new().unwrap();
        let resource = dir.path().join("abs.png");
        fs::write(&resource, b"bytes").unwrap();

        // Joining an absolute reference ignores the base entirely.
        let other_base = PathBuf::from("/nonexistent-base");
        let css = format!(r#".a {{ background: url("{}"); }}"#, resource.display());
        let out = run_inline(&other_base, &css).unwrap();
        assert!(out.contains("data:image/png;base64,"));
    }
}
