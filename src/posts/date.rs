//! Publication date parsing and display formatting

use chrono::{DateTime, FixedOffset, Locale};
use chrono_tz::Tz;

use crate::config::SiteConfig;
use crate::error::{ContentError, Result};
use crate::i18n::I18n;

/// Formats API timestamps for display under a fixed locale and timezone
#[derive(Debug, Clone)]
pub struct DateFormatter {
    /// chrono format string
    format: String,
    locale: Locale,
    timezone: Tz,
    /// Shown when a document has no publication date
    unpublished: String,
}

impl DateFormatter {
    /// Create a formatter from a date-fns style pattern such as `dd MMM yyyy`
    pub fn new(pattern: &str, locale: Locale, timezone: Tz, unpublished: impl Into<String>) -> Self {
        Self {
            format: date_fns_to_chrono_format(pattern),
            locale,
            timezone,
            unpublished: unpublished.into(),
        }
    }

    /// Build the formatter described by the site configuration
    pub fn from_config(config: &SiteConfig, i18n: &I18n) -> anyhow::Result<Self> {
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", config.timezone, e))?;
        let unpublished = config
            .unpublished_label
            .clone()
            .unwrap_or_else(|| i18n.get("unpublished"));

        Ok(Self::new(
            &config.date_format,
            config.language.locale(),
            timezone,
            unpublished,
        ))
    }

    /// Format an optional raw timestamp
    ///
    /// A missing date yields the unpublished label; a malformed one is an error.
    pub fn format(&self, raw: Option<&str>) -> Result<String> {
        match raw {
            None => Ok(self.unpublished.clone()),
            Some(raw) => {
                let date = parse_publication_date(raw)?.with_timezone(&self.timezone);
                Ok(date.format_localized(&self.format, self.locale).to_string())
            }
        }
    }
}

/// Parse an API timestamp
///
/// Accepts RFC 3339 (`2021-03-15T10:00:00Z`) as well as the colon-less
/// offsets the API emits (`2021-03-15T10:00:00+0000`).
pub fn parse_publication_date(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|_| ContentError::InvalidDate(raw.to_string()))
}

/// Convert a date-fns format pattern to a chrono format string
fn date_fns_to_chrono_format(pattern: &str) -> String {
    // Longest tokens first so `MMM` wins over `MM`
    const TOKENS: &[(&str, &str)] = &[
        ("yyyy", "%Y"),
        ("yy", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("dd", "%d"),
        ("d", "%-d"),
        ("EEEE", "%A"),
        ("EEE", "%a"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("a", "%p"),
    ];

    let mut result = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(ch) = rest.chars().next() {
        // Quoted literal text: 'de'
        if ch == '\'' {
            let body = &rest[1..];
            let end = body.find('\'').unwrap_or(body.len());
            result.push_str(&body[..end].replace('%', "%%"));
            rest = body.get(end + 1..).unwrap_or("");
            continue;
        }

        for (token, chrono) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                result.push_str(chrono);
                rest = after;
                continue 'outer;
            }
        }

        if ch == '%' {
            result.push_str("%%");
        } else {
            result.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn formatter(locale: Locale) -> DateFormatter {
        DateFormatter::new("dd MMM yyyy", locale, Tz::UTC, "Unpublished")
    }

    #[test]
    fn test_format_en_us() {
        let f = formatter(Locale::en_US);
        assert_eq!(
            f.format(Some("2021-03-15T10:00:00Z")).unwrap(),
            "15 Mar 2021"
        );
    }

    #[test]
    fn test_format_pt_br() {
        let f = formatter(Locale::pt_BR);
        assert_eq!(
            f.format(Some("2021-03-15T10:00:00Z")).unwrap(),
            "15 mar 2021"
        );
    }

    #[test]
    fn test_api_offset_without_colon() {
        let f = formatter(Locale::en_US);
        assert_eq!(
            f.format(Some("2021-03-25T19:27:35+0000")).unwrap(),
            "25 Mar 2021"
        );
    }

    #[test]
    fn test_timezone_shifts_day() {
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let f = DateFormatter::new("dd MMM yyyy", Locale::en_US, tz, "");
        assert_eq!(
            f.format(Some("2021-03-16T01:00:00Z")).unwrap(),
            "15 Mar 2021"
        );
    }

    #[test]
    fn test_null_date_uses_label() {
        let f = formatter(Locale::en_US);
        assert_eq!(f.format(None).unwrap(), "Unpublished");
    }

    #[test]
    fn test_invalid_date_is_error() {
        let f = formatter(Locale::en_US);
        assert!(matches!(
            f.format(Some("yesterday")),
            Err(ContentError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let mut config = SiteConfig::default();
        config.language = Language::EnUs;
        let i18n = I18n::new(Language::EnUs);
        let f = DateFormatter::from_config(&config, &i18n).unwrap();
        assert_eq!(f.format(None).unwrap(), "Unpublished");

        config.timezone = "Mars/Olympus".to_string();
        assert!(DateFormatter::from_config(&config, &i18n).is_err());
    }

    #[test]
    fn test_date_fns_to_chrono() {
        assert_eq!(date_fns_to_chrono_format("dd MMM yyyy"), "%d %b %Y");
        assert_eq!(date_fns_to_chrono_format("d 'de' MMMM"), "%-d de %B");
        assert_eq!(date_fns_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(date_fns_to_chrono_format("100%"), "100%%");
    }
}
