use std::fmt::Display;
use std::str::FromStr;

/// Represents the version selector of a dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DatasetVersion {
    /// The latest version of the dataset.
    #[default]
    Latest,
    /// The latest published version of the dataset.
    LatestPublished,
    /// The draft version of the dataset.
    Draft,
    /// A specific published version, `major.minor`.
    Version { major: u32, minor: u32 },
}

impl FromStr for DatasetVersion {
    type Err = String;

    /// Parses a version selector.
    ///
    /// Accepts the symbolic names with or without the leading colon
    /// (`latest`, `:latest`, `latest-published`, `:draft`, ...) and
    /// numbered versions in `major.minor` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(':') {
            "latest" => Ok(DatasetVersion::Latest),
            "draft" => Ok(DatasetVersion::Draft),
            "latest-published" => Ok(DatasetVersion::LatestPublished),
            other => parse_numbered(other)
                .ok_or_else(|| format!("Invalid dataset version '{s}': expected major.minor, :latest, :latest-published or :draft")),
        }
    }
}

fn parse_numbered(s: &str) -> Option<DatasetVersion> {
    let (major, minor) = s.split_once('.')?;
    Some(DatasetVersion::Version {
        major: major.parse().ok()?,
        minor: minor.parse().ok()?,
    })
}

impl Display for DatasetVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetVersion::Latest => write!(f, ":latest"),
            DatasetVersion::Draft => write!(f, ":draft"),
            DatasetVersion::LatestPublished => write!(f, ":latest-published"),
            DatasetVersion::Version { major, minor } => write!(f, "{major}.{minor}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn from_str_converts_latest() {
        assert_eq!(
            DatasetVersion::from_str("latest").unwrap(),
            DatasetVersion::Latest
        );
        assert_eq!(
            DatasetVersion::from_str(":latest").unwrap(),
            DatasetVersion::Latest
        );
    }

    #[test]
    fn from_str_converts_draft() {
        let version = DatasetVersion::from_str(":draft").unwrap();
        assert_eq!(version, DatasetVersion::Draft);
    }

    #[test]
    fn from_str_converts_latest_published() {
        let version = DatasetVersion::from_str("latest-published").unwrap();
        assert_eq!(version, DatasetVersion::LatestPublished);
    }

    #[test]
    fn from_str_converts_specific_version() {
        let version = DatasetVersion::from_str("2.1").unwrap();
        assert_eq!(version, DatasetVersion::Version { major: 2, minor: 1 });
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!(DatasetVersion::from_str("v1.0").is_err());
        assert!(DatasetVersion::from_str("1").is_err());
        assert!(DatasetVersion::from_str(":newest").is_err());
    }

    #[test]
    fn display_formats_symbolic_versions() {
        assert_eq!(DatasetVersion::Latest.to_string(), ":latest");
        assert_eq!(DatasetVersion::Draft.to_string(), ":draft");
        assert_eq!(
            DatasetVersion::LatestPublished.to_string(),
            ":latest-published"
        );
    }

    #[test]
    fn display_formats_specific_version() {
        let version = DatasetVersion::Version { major: 1, minor: 0 };
        assert_eq!(version.to_string(), "1.0");
    }

    #[test]
    fn default_is_latest() {
        assert_eq!(DatasetVersion::default(), DatasetVersion::Latest);
    }
}
