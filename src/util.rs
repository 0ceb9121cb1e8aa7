//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// First `max` characters of `s` (not bytes), plus whether anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> (&str, bool) {
  match s.char_indices().nth(max) {
    Some((byte_idx, _)) => (&s[..byte_idx], true),
    None => (s, false),
  }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with learner drafts and model replies.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match truncate_chars(s, max) {
    (head, true) => format!("{}… ({} chars total)", head, s.chars().count()),
    (all, false) => all.to_string(),
  }
}
