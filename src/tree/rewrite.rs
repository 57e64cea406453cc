//! Text rewrite step applied to documents while a version tree is cloned.

use std::path::Path;

use crate::error::Result;
use crate::version::VersionId;

/// Injectable per-document transformation.
///
/// `rewrite` gets the path relative to the version root and the UTF-8 text;
/// Ok(None) means "copy unchanged".
pub trait TextRewrite {
    fn rewrite(&self, rel_path: &Path, text: &str) -> Result<Option<String>>;
}

/// Copies documents verbatim.
pub struct NoRewrite;

impl TextRewrite for NoRewrite {
    fn rewrite(&self, _rel_path: &Path, _text: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Replaces references to the source version with the new one.
///
/// A match only counts when it is not followed by another digit, `.<digit>` or
/// `-<suffix>`, so `v1.0` is not rewritten inside `v1.0.3` or `v1.0-rc1`.
pub struct VersionRefRewriter {
    from: String,
    to: String,
}

impl VersionRefRewriter {
    pub fn new(from: &VersionId, to: &VersionId) -> Self {
        Self {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }

    pub fn replace(&self, text: &str) -> Option<String> {
        if self.from.is_empty() || self.from == self.to || !text.contains(&self.from) {
            return None;
        }
        let mut out = String::with_capacity(text.len() + 16);
        let mut rest = text;
        let mut changed = false;
        while let Some(pos) = rest.find(&self.from) {
            let (head, tail) = rest.split_at(pos);
            out.push_str(head);
            let after = &tail[self.from.len()..];
            let preceded_by_word = head
                .chars()
                .next_back()
                .map(|c| c.is_ascii_alphanumeric())
                .unwrap_or(false);
            if preceded_by_word || continues_version(after) {
                out.push_str(&self.from);
            } else {
                out.push_str(&self.to);
                changed = true;
            }
            rest = after;
        }
        out.push_str(rest);
        if changed {
            Some(out)
        } else {
            None
        }
    }
}

fn continues_version(after: &str) -> bool {
    let mut it = after.chars();
    match it.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => it.next().map(|c| c.is_ascii_digit()).unwrap_or(false),
        // v1.0.0-rc1 - другая версия
        Some('-') => it.next().map(|c| c.is_ascii_alphanumeric()).unwrap_or(false),
        _ => false,
    }
}

impl TextRewrite for VersionRefRewriter {
    fn rewrite(&self, _rel_path: &Path, text: &str) -> Result<Option<String>> {
        Ok(self.replace(text))
    }
}
