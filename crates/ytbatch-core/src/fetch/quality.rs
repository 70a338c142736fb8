//! Quality-string resolution against the fixed per-mode ladders.

/// Audio bitrates offered by the presentation layer, in kbps.
const AUDIO_BITRATES: &[(&str, u32)] = &[
    ("320kbps", 320),
    ("256kbps", 256),
    ("192kbps", 192),
    ("128kbps", 128),
    ("64kbps", 64),
];

/// Video height caps offered by the presentation layer, in pixels.
const VIDEO_HEIGHTS: &[(&str, u32)] = &[
    ("1080p", 1080),
    ("720p", 720),
    ("480p", 480),
    ("360p", 360),
    ("240p", 240),
];

pub const DEFAULT_AUDIO_KBPS: u32 = 192;
pub const DEFAULT_VIDEO_HEIGHT: u32 = 1080;

/// Resolves an audio quality label; unrecognized labels fall back to 192 kbps.
pub fn resolve_audio_bitrate(quality: &str) -> u32 {
    AUDIO_BITRATES
        .iter()
        .find(|(label, _)| *label == quality)
        .map(|(_, kbps)| *kbps)
        .unwrap_or(DEFAULT_AUDIO_KBPS)
}

/// Resolves a video quality label; unrecognized labels fall back to a 1080p cap.
pub fn resolve_video_height(quality: &str) -> u32 {
    VIDEO_HEIGHTS
        .iter()
        .find(|(label, _)| *label == quality)
        .map(|(_, height)| *height)
        .unwrap_or(DEFAULT_VIDEO_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_audio_labels_resolve() {
        assert_eq!(resolve_audio_bitrate("320kbps"), 320);
        assert_eq!(resolve_audio_bitrate("64kbps"), 64);
    }

    #[test]
    fn unknown_audio_label_defaults_to_192() {
        assert_eq!(resolve_audio_bitrate("best"), 192);
        assert_eq!(resolve_audio_bitrate(""), 192);
        assert_eq!(resolve_audio_bitrate("1080p"), 192);
    }

    #[test]
    fn known_video_labels_resolve() {
        assert_eq!(resolve_video_height("720p"), 720);
        assert_eq!(resolve_video_height("240p"), 240);
    }

    #[test]
    fn unknown_video_label_defaults_to_1080() {
        assert_eq!(resolve_video_height("best"), 1080);
        assert_eq!(resolve_video_height(""), 1080);
        assert_eq!(resolve_video_height("192kbps"), 1080);
    }
}
