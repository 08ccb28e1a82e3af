//! Background media selection and playback behaviour.
//!
//! The landing page always prefers a looping video over a static image. The
//! browser side of playback is driven by `static/js/video-background.js`,
//! which applies the same transition table as [`PlaybackController`]; the
//! controller here is the authoritative, testable version of those rules.

use serde::{Deserialize, Serialize};

use crate::store::{BUILTIN_VIDEO_SENTINEL, StoreData};

/// A video source element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSource {
    pub url: String,
    pub mime: &'static str,
}

impl VideoSource {
    fn new(url: String) -> Self {
        let mime = if url.to_ascii_lowercase().ends_with(".webm") {
            "video/webm"
        } else {
            "video/mp4"
        };
        Self { url, mime }
    }
}

/// What to draw behind the page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundMedia {
    pub video: Option<VideoSource>,
    /// Poster frame for the video.
    pub poster: Option<String>,
    /// Static background, only when there is no video.
    pub image: Option<String>,
}

impl BackgroundMedia {
    /// Decide the background for `data`.
    ///
    /// An empty `background_video` or the built-in sentinel selects
    /// `builtin_video_url`. When a video is available `background_image`
    /// becomes its poster instead of a separate background.
    #[must_use]
    pub fn resolve(data: &StoreData, builtin_video_url: &str) -> Self {
        let url = if data.background_video.is_empty()
            || data.background_video == BUILTIN_VIDEO_SENTINEL
        {
            builtin_video_url
        } else {
            data.background_video.as_str()
        };

        let image = non_empty(&data.background_image);

        if url.is_empty() {
            return Self {
                video: None,
                poster: None,
                image,
            };
        }

        Self {
            video: Some(VideoSource::new(url.to_owned())),
            poster: image,
            image: None,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

/// Playback options for the background video.
///
/// All flags default to off, giving an always-muted infinite loop.
/// `resist_pause` restarts playback whenever the browser pauses the video,
/// which also overrides a visitor's own pause; enable it deliberately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackPolicy {
    pub start_with_audio: bool,
    pub allow_audio_toggle: bool,
    pub resist_pause: bool,
}

impl PlaybackPolicy {
    /// JSON for the `data-policy` attribute read by the page script.
    #[must_use]
    pub fn to_data_attribute(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned())
    }
}

/// Something the video element reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Mounted,
    AutoplayRejected,
    Ended,
    Paused,
    Suspended,
    Stalled,
    ToggleMute,
    Playing,
}

/// Something to do to the video element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    SetMuted(bool),
    Play,
    SeekToStart,
}

/// Tracks player state and maps events to commands.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    policy: PlaybackPolicy,
    muted: bool,
    playing: bool,
}

impl PlaybackController {
    #[must_use]
    pub const fn new(policy: PlaybackPolicy) -> Self {
        Self {
            policy,
            muted: true,
            playing: false,
        }
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Apply an event and return the commands to issue, in order.
    pub fn handle(&mut self, event: PlaybackEvent) -> Vec<PlaybackCommand> {
        use PlaybackCommand::{Play, SeekToStart, SetMuted};

        match event {
            PlaybackEvent::Mounted => {
                self.muted = !self.policy.start_with_audio;
                vec![SetMuted(self.muted), Play]
            }
            PlaybackEvent::AutoplayRejected => {
                self.playing = false;
                if self.muted {
                    Vec::new()
                } else {
                    self.muted = true;
                    vec![SetMuted(true), Play]
                }
            }
            PlaybackEvent::Ended => vec![SeekToStart, Play],
            PlaybackEvent::Paused | PlaybackEvent::Suspended | PlaybackEvent::Stalled => {
                if self.policy.resist_pause {
                    vec![Play]
                } else {
                    self.playing = false;
                    Vec::new()
                }
            }
            PlaybackEvent::ToggleMute => {
                if !self.policy.allow_audio_toggle {
                    return Vec::new();
                }
                self.muted = !self.muted;
                let mut commands = vec![SetMuted(self.muted)];
                if !self.playing {
                    commands.push(Play);
                }
                commands
            }
            PlaybackEvent::Playing => {
                self.playing = true;
                Vec::new()
            }
        }
    }
}
