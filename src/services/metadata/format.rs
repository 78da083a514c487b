//! Форматирование значений метаданных для отображения.

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

/// Размер с двоичным масштабированием и одним знаком после запятой
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} PB")
}

/// `MM:SS` до часа, `HH:MM:SS` дальше; ноль означает «нет данных»
pub fn format_duration(seconds: f64) -> String {
    if seconds == 0.0 || !seconds.is_finite() || seconds < 0.0 {
        return "N/A".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Частота кадров из `"30000/1001"` или `"25"`
pub fn format_fps(rate: &str) -> String {
    match parse_rate(rate) {
        Some(fps) => format!("{fps:.2} fps"),
        None => "N/A fps".to_string(),
    }
}

fn parse_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Битрейт в бит/с (строкой, как отдаёт ffprobe) в килобиты
pub fn format_bitrate(bitrate: Option<&str>) -> String {
    bitrate
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(|bps| format!("{} kbps", bps.div_euclid(1000)))
        .unwrap_or_else(|| "N/A".to_string())
}
