//! Per-document metadata parsed from a YAML front matter block.
//!
//! Only `title`, `theme`, `template` and `css` are recognised; any other key
//! is ignored. Scalar values of any YAML type (numbers, booleans) are read as
//! their string form so `title: 2024` is a valid title.

use serde::{Deserialize, Deserializer};

/// Presentation overrides declared by a document.
///
/// All fields are optional. An empty string is treated the same as an
/// absent field by every accessor and by [`RunConfig::apply_front_matter`].
///
/// [`RunConfig::apply_front_matter`]: crate::RunConfig::apply_front_matter
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Display title for the rendered document.
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    /// Theme stylesheet name.
    #[serde(deserialize_with = "scalar_string")]
    pub theme: Option<String>,
    /// Template name.
    #[serde(deserialize_with = "scalar_string")]
    pub template: Option<String>,
    /// Path to a custom stylesheet.
    #[serde(deserialize_with = "scalar_string")]
    pub css: Option<String>,
}

impl FrontMatter {
    /// Parse front matter from the YAML text between the delimiters.
    ///
    /// Blank content yields an empty instance.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        // A block holding only comments deserializes as YAML null.
        let parsed: Option<Self> = serde_yaml::from_str(content)?;
        Ok(parsed.unwrap_or_default())
    }

    /// Title, if present and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_ref())
    }

    /// Theme name, if present and non-empty.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        non_empty(self.theme.as_ref())
    }

    /// Template name, if present and non-empty.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        non_empty(self.template.as_ref())
    }

    /// Custom stylesheet path, if present and non-empty.
    #[must_use]
    pub fn css(&self) -> Option<&str> {
        non_empty(self.css.as_ref())
    }

    /// Check if no field carries a usable value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title().is_none()
            && self.theme().is_none()
            && self.template().is_none()
            && self.css().is_none()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
            Err(D::Error::custom("expected a scalar value"))
        }
    }
}
