use crate::config::ProbeConfig;
use crate::error::{FileStatsError, Result};
use crate::utils::run_with_timeout;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Разобранный вывод `ffprobe -print_format json`
#[derive(Debug, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
    pub format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
pub struct ProbeStream {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<String>,
    pub bit_rate: Option<String>,
    pub sample_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProbeFormat {
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl ProbeOutput {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn first_stream(&self, codec_type: &str) -> Option<&ProbeStream> {
        self.streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some(codec_type))
    }

    /// Длительность в секундах; 0 если ffprobe её не сообщил
    pub fn duration_secs(&self) -> Result<f64> {
        match self.format.as_ref().and_then(|f| f.duration.as_deref()) {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| crate::fs_error!(internal, "Некорректная длительность '{}': {}", raw, e)),
            None => Ok(0.0),
        }
    }

    /// Тег контейнера без учёта регистра ключа (ASF пишет `Title`, MP4 `title`)
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.format.as_ref()?.tags.iter().find_map(|(key, value)| {
            key.eq_ignore_ascii_case(name).then_some(value.as_str())
        })
    }
}

/// Запускает ffprobe; сбой утилиты превращается в `failure`
pub async fn run(path: &Path, probe: &ProbeConfig, failure: &str) -> Result<ProbeOutput> {
    let mut cmd = Command::new(&probe.ffprobe);
    cmd.args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(path);

    let stdout = run_with_timeout(cmd, &probe.ffprobe, probe.timeout())
        .await
        .map_err(|e| match e {
            FileStatsError::CommandFailed(reason) => {
                debug!("ffprobe: {}", reason);
                FileStatsError::CommandFailed(failure.to_string())
            }
            other => other,
        })?;

    ProbeOutput::parse(&stdout)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Исполняемый скрипт, который печатает `json` вместо настоящего ffprobe
    pub(crate) fn fake_ffprobe(dir: &Path, json: &str) -> ProbeConfig {
        let script = dir.join("fake-ffprobe");
        std::fs::write(&script, format!("#!/bin/sh\ncat <<'JSON'\n{json}\nJSON\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        ProbeConfig {
            ffprobe: script.display().to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_tag_lookup_ignores_case() {
        let output = ProbeOutput::parse(r#"{"format": {"tags": {"Title": "Intro"}}}"#).unwrap();
        assert_eq!(output.tag("title"), Some("Intro"));
        assert_eq!(output.tag("album"), None);
    }

    #[test]
    fn test_bad_duration_is_error() {
        let output = ProbeOutput::parse(r#"{"format": {"duration": "soon"}}"#).unwrap();
        assert!(output.duration_secs().is_err());
    }

    #[tokio::test]
    async fn test_missing_prober_uses_failure_message() {
        let probe = ProbeConfig {
            ffprobe: "definitely-not-ffprobe-x9".to_string(),
            timeout_secs: 2,
        };
        let err = run(Path::new("/tmp/clip.mp4"), &probe, "Could not analyze video")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not analyze video");
    }
}
