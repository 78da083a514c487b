use super::format::{format_bitrate, format_duration, format_fps};
use super::probe::{self, ProbeOutput};
use crate::config::ProbeConfig;
use crate::error::Result;
use crate::model::{FileCategory, MetadataRecord};
use std::path::Path;

/// Запускает ffprobe и собирает поля видео
pub async fn inspect(path: &Path, config: &ProbeConfig) -> Result<MetadataRecord> {
    let output = probe::run(path, config, "Could not analyze video").await?;
    video_record(&output)
}

fn video_record(output: &ProbeOutput) -> Result<MetadataRecord> {
    let mut record = MetadataRecord::of_category(FileCategory::Video);

    if let Some(video) = output.first_stream("video") {
        let side = |v: Option<u32>| v.map_or_else(|| "N/A".to_string(), |v| v.to_string());
        record.insert("resolution", format!("{}x{}", side(video.width), side(video.height)));
        record.insert("codec", video.codec_name.as_deref().unwrap_or("N/A"));
        record.insert("fps", format_fps(video.r_frame_rate.as_deref().unwrap_or("0/1")));
        record.insert("bitrate", format_bitrate(video.bit_rate.as_deref()));
    }

    if let Some(audio) = output.first_stream("audio") {
        record.insert("audio_codec", audio.codec_name.as_deref().unwrap_or("N/A"));
    }

    if output.format.is_some() {
        record.insert("duration", format_duration(output.duration_secs()?));
    }

    Ok(record)
}
