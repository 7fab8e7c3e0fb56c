use std::fs;
use std::path::PathBuf;

use nachmund_campaign::{CampaignSource, GameRecord};
use thiserror::Error;

/// Failures reading or parsing a campaign file.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decoding yaml in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Campaign records stored as a YAML sequence on disk.
#[derive(Debug, Clone)]
pub struct YamlCampaign {
    path: PathBuf,
}

impl YamlCampaign {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CampaignSource for YamlCampaign {
    type Error = DecodeError;

    fn load_records(&self) -> Result<Vec<GameRecord>, Self::Error> {
        let data = fs::read_to_string(&self.path).map_err(|source| DecodeError::Read {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("read {} bytes from {}", data.len(), self.path.display());
        parse_records(&data).map_err(|source| DecodeError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

fn parse_records(data: &str) -> Result<Vec<GameRecord>, serde_yaml::Error> {
    // An empty file is an empty campaign, not a parse error.
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nachmund_campaign::Phase;

    fn temp_file(label: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "nachmund-decode-{label}-{}.yaml",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_records_from_disk() {
        let path = temp_file(
            "ok",
            "- phase: 2\n  mission: Hold\n- phase: 3\n  mission: Raid\n",
        );
        let records = YamlCampaign::new(&path).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].phase, Phase::THREE);
        assert_eq!(records[0].mission, "Hold");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let source = YamlCampaign::new("/definitely/not/here.yaml");
        let err = source.load_records().unwrap_err();
        assert!(matches!(err, DecodeError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let path = temp_file("bad", "phase: [unterminated");
        let err = YamlCampaign::new(&path).load_records().unwrap_err();
        assert!(matches!(err, DecodeError::Parse { .. }));
    }

    #[test]
    fn empty_file_is_an_empty_campaign() {
        assert!(parse_records("\n  \n").unwrap().is_empty());
    }
}
