use super::format::{format_bitrate, format_duration};
use super::probe::{self, ProbeOutput};
use crate::config::ProbeConfig;
use crate::error::{FileStatsError, Result};
use crate::model::{FileCategory, MetadataRecord};
use lofty::error::ErrorKind;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use std::path::Path;
use tracing::debug;

/// Свойства потока и основные теги аудиофайла.
///
/// Форматы, которых lofty не знает (WMA/ASF), читаются через ffprobe.
pub async fn inspect(path: &Path, config: &ProbeConfig) -> Result<MetadataRecord> {
    match read_tags(path) {
        Err(FileStatsError::Audio(e)) if matches!(e.kind(), ErrorKind::UnknownFormat) => {
            debug!("lofty не поддерживает {}, пробуем ffprobe", path.display());
            let output = probe::run(path, config, "Could not analyze audio").await?;
            audio_record(&output)
        }
        other => other,
    }
}

fn read_tags(path: &Path) -> Result<MetadataRecord> {
    let tagged = lofty::read_from_path(path)?;
    let properties = tagged.properties();

    let mut record = MetadataRecord::of_category(FileCategory::Audio);
    record.insert("duration", format_duration(properties.duration().as_secs_f64()));
    record.insert(
        "bitrate",
        with_unit(properties.audio_bitrate().or(properties.overall_bitrate()), "kbps"),
    );
    record.insert("sample_rate", with_unit(properties.sample_rate(), "Hz"));

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(title) = tag.title() {
            record.insert("title", title.into_owned());
        }
        if let Some(artist) = tag.artist() {
            record.insert("artist", artist.into_owned());
        }
        if let Some(album) = tag.album() {
            record.insert("album", album.into_owned());
        }
    }

    Ok(record)
}

fn audio_record(output: &ProbeOutput) -> Result<MetadataRecord> {
    let stream = output.first_stream("audio");
    let bitrate = stream
        .and_then(|s| s.bit_rate.as_deref())
        .or_else(|| output.format.as_ref().and_then(|f| f.bit_rate.as_deref()));
    let sample_rate = stream
        .and_then(|s| s.sample_rate.as_deref())
        .and_then(|raw| raw.trim().parse::<u32>().ok());

    let mut record = MetadataRecord::of_category(FileCategory::Audio);
    record.insert("duration", format_duration(output.duration_secs()?));
    record.insert("bitrate", format_bitrate(bitrate));
    record.insert("sample_rate", with_unit(sample_rate, "Hz"));

    for key in ["title", "artist", "album"] {
        if let Some(value) = output.tag(key) {
            record.insert(key, value);
        }
    }

    Ok(record)
}

fn with_unit(value: Option<u32>, unit: &str) -> String {
    value
        .map(|v| format!("{v} {unit}"))
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Минимальный PCM WAV: моно, 16 бит
    fn write_wav(path: &Path, sample_rate: u32, seconds: u32) {
        let data_len = sample_rate * 2 * seconds;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // каналы
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(bytes.len() + data_len as usize, 0);
        std::fs::write(path, bytes).unwrap();
    }

    const WMA_PROBE: &str = r#"{
        "streams": [{"codec_type": "audio", "codec_name": "wmav2", "sample_rate": "44100", "bit_rate": "128000"}],
        "format": {"duration": "185.2", "tags": {"Title": "Intro", "Author": "Band", "album": "Demo"}}
    }"#;

    fn no_prober() -> ProbeConfig {
        ProbeConfig {
            ffprobe: "definitely-not-ffprobe-x9".to_string(),
            timeout_secs: 2,
        }
    }

    #[tokio::test]
    async fn test_wav_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, 2);

        let record = inspect(&path, &no_prober()).await.unwrap();
        assert_eq!(record.get("type"), Some("Audio"));
        assert_eq!(record.get("duration"), Some("00:02"));
        assert_eq!(record.get("sample_rate"), Some("8000 Hz"));
        assert!(!record.contains("title"));
    }

    #[tokio::test]
    async fn test_garbage_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.flac");
        std::fs::write(&path, b"definitely not audio").unwrap();

        assert!(inspect(&path, &no_prober()).await.is_err());
    }

    #[tokio::test]
    async fn test_wma_falls_back_to_prober() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.wma");
        std::fs::write(&path, b"asf payload lofty cannot read").unwrap();
        let config = probe::tests::fake_ffprobe(dir.path(), WMA_PROBE);

        let record = inspect(&path, &config).await.unwrap();
        assert_eq!(record.get("type"), Some("Audio"));
        assert_eq!(record.get("duration"), Some("03:05"));
        assert_eq!(record.get("bitrate"), Some("128 kbps"));
        assert_eq!(record.get("sample_rate"), Some("44100 Hz"));
        assert_eq!(record.get("title"), Some("Intro"));
        assert_eq!(record.get("album"), Some("Demo"));
    }

    #[tokio::test]
    async fn test_wma_without_prober_reports_audio_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.wma");
        std::fs::write(&path, b"asf payload lofty cannot read").unwrap();

        let err = inspect(&path, &no_prober()).await.unwrap_err();
        assert_eq!(err.to_string(), "Could not analyze audio");
    }

    #[test]
    fn test_with_unit() {
        assert_eq!(with_unit(Some(320), "kbps"), "320 kbps");
        assert_eq!(with_unit(None, "Hz"), "N/A");
    }
}
