//! Embedded web panels placed around the room.
//!
//! Sizes are in CSS pixels and map 1:1 onto world units.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Site the stream panels are embedded under (Twitch requires a `parent`).
pub const DEFAULT_EMBED_PARENT: &str = "evanmelon.dev";

/// What a panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelSource {
    TwitchChannel { channel: String, parent: String },
    DiscordWidget { server_id: String },
    SpotifyPlaylist { playlist_id: String },
    Url { url: String },
}

impl PanelSource {
    pub fn embed_url(&self) -> String {
        match self {
            PanelSource::TwitchChannel { channel, parent } => {
                format!("https://player.twitch.tv/?channel={channel}&parent={parent}")
            }
            PanelSource::DiscordWidget { server_id } => {
                format!("https://discord.com/widget?id={server_id}&theme=dark")
            }
            PanelSource::SpotifyPlaylist { playlist_id } => {
                format!("https://open.spotify.com/embed/playlist/{playlist_id}?utm_source=generator")
            }
            PanelSource::Url { url } => url.clone(),
        }
    }

    /// Short human-readable name for the HUD.
    pub fn title(&self) -> String {
        match self {
            PanelSource::TwitchChannel { channel, .. } => format!("Twitch: {channel}"),
            PanelSource::DiscordWidget { .. } => "Discord".to_string(),
            PanelSource::SpotifyPlaylist { .. } => "Spotify".to_string(),
            PanelSource::Url { url } if url.is_empty() => "Blank page".to_string(),
            PanelSource::Url { url } => url.clone(),
        }
    }

    /// Frame colour as 0xRRGGBB.
    pub fn accent(&self) -> u32 {
        match self {
            PanelSource::TwitchChannel { .. } => 0x9146ff,
            PanelSource::DiscordWidget { .. } => 0x5865f2,
            PanelSource::SpotifyPlaylist { .. } => 0x1db954,
            PanelSource::Url { .. } => 0x808080,
        }
    }
}

/// One panel in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub source: PanelSource,
    /// Width and height in CSS pixels.
    pub size: [f32; 2],
    pub position: [f32; 3],
    /// Rotation about +Y in radians.
    #[serde(default)]
    pub rotation_y: f32,
}

impl PanelSpec {
    pub fn new(source: PanelSource, size: [f32; 2], position: [f32; 3], rotation_y: f32) -> Self {
        Self {
            source,
            size,
            position,
            rotation_y,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.position))
            .with_rotation(Quat::from_rotation_y(self.rotation_y))
    }

    fn twitch(channel: &str, position: [f32; 3], rotation_y: f32) -> Self {
        Self::new(
            PanelSource::TwitchChannel {
                channel: channel.to_string(),
                parent: DEFAULT_EMBED_PARENT.to_string(),
            },
            [620.0, 378.0],
            position,
            rotation_y,
        )
    }
}

/// The stock room: three stream players facing the centre, a playlist and a chat widget.
pub fn default_gallery() -> Vec<PanelSpec> {
    use std::f32::consts::{FRAC_PI_2, PI};

    vec![
        PanelSpec::twitch("pipluptiny", [0.0, 0.0, 310.0], 0.0),
        PanelSpec::twitch("tenshi", [310.0, 0.0, 0.0], FRAC_PI_2),
        PanelSpec::twitch("mande", [0.0, 0.0, -310.0], PI),
        PanelSpec::new(
            PanelSource::SpotifyPlaylist {
                playlist_id: "1JrCsBfaEELzsy5MoOQTU0".to_string(),
            },
            [480.0, 360.0],
            [500.0, 0.0, 500.0],
            0.0,
        ),
        PanelSpec::new(
            PanelSource::DiscordWidget {
                server_id: "1092208681157939332".to_string(),
            },
            [350.0, 500.0],
            [0.0, 0.0, 500.0],
            0.0,
        ),
    ]
}
