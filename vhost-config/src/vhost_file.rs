//! Reader and writer for `*.vhost.conf` files.
//!
//! A file looks like:
//!
//! ```text
//! <VirtualHost *:80>
//!   ServerName blog.local
//!   DocumentRoot "/Users/me/src/blog/public"
//!   RailsEnv development
//!   RailsAllowModRewrite off
//!   <directory "/Users/me/src/blog/public">
//!     Order allow,deny
//!     Allow from all
//!   </directory>
//! </VirtualHost>
//! ```
//!
//! The recognised directives may appear in any order. Every other line is
//! kept verbatim as the user-defined block.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::environment::RailsEnv;

/// Bind address used when a file has no `<VirtualHost ...>` tag.
pub const DEFAULT_VHOSTNAME: &str = "*:80";

static OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(?i:VirtualHost)\s+([^>]+?)\s*>$").expect("valid regex"));
static CLOSE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^</(?i:VirtualHost)\s*>$").expect("valid regex"));
static SERVER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:ServerName)\s+(.+)$").expect("valid regex"));
static DOCUMENT_ROOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(?i:DocumentRoot)\s+"(.+)/public/?"$"#).expect("valid regex"));
static RAILS_ENV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:RailsEnv)\s+(development|production)$").expect("valid regex")
});
static ALLOW_MOD_REWRITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:RailsAllowModRewrite)\s+(on|off)$").expect("valid regex"));

/// Structured contents of a vhost file. Absent directives stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VhostFile {
    pub vhostname: Option<String>,
    pub host: Option<String>,
    /// Application root, i.e. `DocumentRoot` without the trailing `/public`.
    pub path: Option<String>,
    pub environment: Option<RailsEnv>,
    pub allow_mod_rewrite: Option<bool>,
    pub user_defined_data: String,
}

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Stores `value` into `slot` when the slot is still empty. Returns whether it did.
fn claim<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) if slot.is_none() => {
            *slot = Some(v);
            true
        }
        _ => false,
    }
}

/// Where the scan is relative to the first `<VirtualHost>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Before,
    /// Inside the first block, with the number of nested blocks currently open.
    Inside(usize),
    After,
}

impl VhostFile {
    /// Scan `text` line by line. Never fails; unmatched directives are left unset.
    ///
    /// Only the tags of the first block are consumed. Any further block stays
    /// in the user-defined data with both of its tags.
    pub fn parse(text: &str) -> Self {
        let mut parsed = VhostFile::default();
        let mut remaining: Vec<&str> = Vec::new();
        let mut block = Block::Before;

        for line in text.lines() {
            let trimmed = line.trim();

            let consumed = if CLOSE_TAG.is_match(trimmed) {
                match block {
                    Block::Before | Block::Inside(0) => {
                        block = Block::After;
                        true
                    }
                    Block::Inside(depth) => {
                        block = Block::Inside(depth - 1);
                        false
                    }
                    Block::After => false,
                }
            } else if OPEN_TAG.is_match(trimmed) {
                match block {
                    Block::Before => {
                        block = Block::Inside(0);
                        claim(&mut parsed.vhostname, capture(&OPEN_TAG, trimmed))
                    }
                    Block::Inside(depth) => {
                        block = Block::Inside(depth + 1);
                        false
                    }
                    Block::After => false,
                }
            } else if SERVER_NAME.is_match(trimmed) {
                claim(&mut parsed.host, capture(&SERVER_NAME, trimmed))
            } else if DOCUMENT_ROOT.is_match(trimmed) {
                claim(&mut parsed.path, capture(&DOCUMENT_ROOT, trimmed))
            } else if RAILS_ENV.is_match(trimmed) {
                let env = capture(&RAILS_ENV, trimmed).and_then(|v| v.parse().ok());
                claim(&mut parsed.environment, env)
            } else if ALLOW_MOD_REWRITE.is_match(trimmed) {
                let flag = capture(&ALLOW_MOD_REWRITE, trimmed).map(|v| v == "on");
                claim(&mut parsed.allow_mod_rewrite, flag)
            } else {
                false
            };

            if !consumed {
                remaining.push(line.trim_end());
            }
        }

        // Only interior blank lines belong to the user block.
        let start = remaining
            .iter()
            .position(|l| !l.trim().is_empty())
            .unwrap_or(remaining.len());
        let end = remaining
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(start, |i| i + 1);
        parsed.user_defined_data = remaining[start..end].join("\n");

        debug!(
            host = ?parsed.host,
            path = ?parsed.path,
            user_lines = end - start,
            "parsed vhost file"
        );
        parsed
    }

    /// Write the canonical text form. Unset directives are omitted.
    pub fn render(&self) -> String {
        let mut out = format!(
            "<VirtualHost {}>\n",
            self.vhostname.as_deref().unwrap_or(DEFAULT_VHOSTNAME)
        );
        if let Some(host) = &self.host {
            out.push_str(&format!("  ServerName {}\n", host));
        }
        if let Some(path) = &self.path {
            out.push_str(&format!("  DocumentRoot \"{}/public\"\n", path));
        }
        if let Some(env) = self.environment {
            out.push_str(&format!("  RailsEnv {}\n", env));
        }
        if let Some(rewrite) = self.allow_mod_rewrite {
            out.push_str(&format!(
                "  RailsAllowModRewrite {}\n",
                if rewrite { "on" } else { "off" }
            ));
        }
        if !self.user_defined_data.is_empty() {
            out.push_str(&self.user_defined_data);
            out.push('\n');
        }
        out.push_str("</VirtualHost>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<VirtualHost *:80>
  ServerName blog.local
  DocumentRoot "/Users/me/src/blog/public"
  RailsEnv development
  RailsAllowModRewrite off
  <directory "/Users/me/src/blog/public">
    Order allow,deny
    Allow from all
  </directory>
</VirtualHost>
"#;

    #[test]
    fn test_parse_well_formed_file() {
        let parsed = VhostFile::parse(SAMPLE);
        assert_eq!(parsed.vhostname.as_deref(), Some("*:80"));
        assert_eq!(parsed.host.as_deref(), Some("blog.local"));
        assert_eq!(parsed.path.as_deref(), Some("/Users/me/src/blog"));
        assert_eq!(parsed.environment, Some(RailsEnv::Development));
        assert_eq!(parsed.allow_mod_rewrite, Some(false));
        assert_eq!(
            parsed.user_defined_data,
            "  <directory \"/Users/me/src/blog/public\">\n    Order allow,deny\n    Allow from all\n  </directory>"
        );
    }

    #[test]
    fn test_directive_order_does_not_matter() {
        let text = "<VirtualHost 127.0.0.1:8080>\n  RailsAllowModRewrite on\n  RailsEnv production\n  DocumentRoot \"/srv/shop/public\"\n  ServerName shop.local\n</VirtualHost>";
        let parsed = VhostFile::parse(text);
        assert_eq!(parsed.vhostname.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(parsed.host.as_deref(), Some("shop.local"));
        assert_eq!(parsed.path.as_deref(), Some("/srv/shop"));
        assert_eq!(parsed.environment, Some(RailsEnv::Production));
        assert_eq!(parsed.allow_mod_rewrite, Some(true));
        assert_eq!(parsed.user_defined_data, "");
    }

    #[test]
    fn test_missing_directives_stay_unset() {
        let parsed = VhostFile::parse("<VirtualHost *:80>\n  ServerName only.local\n</VirtualHost>");
        assert_eq!(parsed.host.as_deref(), Some("only.local"));
        assert_eq!(parsed.path, None);
        assert_eq!(parsed.environment, None);
        assert_eq!(parsed.allow_mod_rewrite, None);
    }

    #[test]
    fn test_document_root_without_public_is_user_content() {
        let text = "<VirtualHost *:80>\n  ServerName static.local\n  DocumentRoot \"/srv/static\"\n</VirtualHost>";
        let parsed = VhostFile::parse(text);
        assert_eq!(parsed.path, None);
        assert_eq!(parsed.user_defined_data, "  DocumentRoot \"/srv/static\"");
    }

    #[test]
    fn test_duplicate_directives_are_preserved() {
        let text = "<VirtualHost *:80>\n  ServerName a.local\n  ServerName b.local\n</VirtualHost>";
        let parsed = VhostFile::parse(text);
        assert_eq!(parsed.host.as_deref(), Some("a.local"));
        assert_eq!(parsed.user_defined_data, "  ServerName b.local");
    }

    #[test]
    fn test_unknown_environment_value_is_kept() {
        let text = "<VirtualHost *:80>\n  RailsEnv staging\n</VirtualHost>";
        let parsed = VhostFile::parse(text);
        assert_eq!(parsed.environment, None);
        assert_eq!(parsed.user_defined_data, "  RailsEnv staging");
    }

    #[test]
    fn test_interior_blank_lines_survive() {
        let text = "<VirtualHost *:80>\n\n  Alias /a /b\n\n  Alias /c /d\n\n</VirtualHost>\n\n";
        let parsed = VhostFile::parse(text);
        assert_eq!(parsed.user_defined_data, "  Alias /a /b\n\n  Alias /c /d");
    }

    #[test]
    fn test_second_block_keeps_both_tags() {
        let text = "<VirtualHost *:80>\n  ServerName shop.local\n</VirtualHost>\n<VirtualHost *:443>\n  SSLEngine on\n</VirtualHost>\n";
        let parsed = VhostFile::parse(text);
        assert_eq!(parsed.vhostname.as_deref(), Some("*:80"));
        assert_eq!(parsed.host.as_deref(), Some("shop.local"));
        assert_eq!(
            parsed.user_defined_data,
            "<VirtualHost *:443>\n  SSLEngine on\n</VirtualHost>"
        );

        let rendered = parsed.render();
        assert_eq!(
            rendered.matches("<VirtualHost ").count(),
            rendered.matches("</VirtualHost>").count()
        );
        assert!(rendered.contains("SSLEngine on"));
        assert_eq!(VhostFile::parse(&rendered), parsed);
    }

    #[test]
    fn test_stray_close_tag_without_open_is_consumed() {
        let parsed = VhostFile::parse("  ServerName bare.local\n</VirtualHost>\n");
        assert_eq!(parsed.host.as_deref(), Some("bare.local"));
        assert_eq!(parsed.vhostname, None);
        assert_eq!(parsed.user_defined_data, "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(VhostFile::parse(""), VhostFile::default());
    }

    #[test]
    fn test_render_then_parse_keeps_fields() {
        let original = VhostFile::parse(SAMPLE);
        let reparsed = VhostFile::parse(&original.render());
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_render_defaults_vhostname_and_skips_unset() {
        let file = VhostFile {
            host: Some("x.local".to_string()),
            ..Default::default()
        };
        assert_eq!(
            file.render(),
            "<VirtualHost *:80>\n  ServerName x.local\n</VirtualHost>\n"
        );
    }
}
