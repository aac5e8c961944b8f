//! Security header manifest generation.

use super::{Artifact, ArtifactGenerator, GeneratorError};
use crate::config::Config;
use crate::models::SiteIndex;

/// Renders the configured pattern -> headers policy table into a `_headers`
/// manifest (the format Netlify-style hosts apply at serving time). Purely a
/// function of configuration; content never feeds into it.
pub struct HeadersGenerator;

impl ArtifactGenerator for HeadersGenerator {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn generate(&self, _site: &SiteIndex, config: &Config) -> Result<Artifact, GeneratorError> {
        let mut out = String::new();

        for rule in &config.headers {
            out.push_str(&rule.pattern);
            out.push('\n');
            for value in &rule.values {
                out.push_str("  ");
                out.push_str(value);
                out.push('\n');
            }
            out.push('\n');
        }

        Ok(Artifact {
            path: "_headers".to_string(),
            content: out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderRule;

    fn config() -> Config {
        serde_yaml::from_str(
            r#"
site:
  title: "T"
  description: "D"
  url: "https://example.com"
paths:
  content: content
  output: dist
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_default_policy_rendered() {
        let artifact = HeadersGenerator
            .generate(&SiteIndex::new(), &config())
            .unwrap();
        assert_eq!(artifact.path, "_headers");
        assert!(artifact.content.starts_with("/*\n"));
        assert!(artifact.content.contains("  X-Frame-Options: DENY\n"));
        assert!(artifact
            .content
            .contains("  X-Content-Type-Options: nosniff\n"));
    }

    #[test]
    fn test_multiple_rules() {
        let mut cfg = config();
        cfg.headers = vec![
            HeaderRule {
                pattern: "/*".to_string(),
                values: vec!["X-Frame-Options: DENY".to_string()],
            },
            HeaderRule {
                pattern: "/assets/*".to_string(),
                values: vec!["Cache-Control: public, max-age=31536000".to_string()],
            },
        ];

        let artifact = HeadersGenerator.generate(&SiteIndex::new(), &cfg).unwrap();
        assert_eq!(
            artifact.content,
            "/*\n  X-Frame-Options: DENY\n\n/assets/*\n  Cache-Control: public, max-age=31536000\n\n"
        );
    }
}
