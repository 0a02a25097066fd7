//! Scene manifest: everything needed to mount a scrubber, stored as JSON

use crate::timeline::{default_captions, DEFAULT_FADE};
use crate::{CaptionEntry, CaptionTimeline, Error, FrameSequence, Result, SmoothScrollConfig};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Complete scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    /// Frame sequence and its naming convention
    pub frames: FrameSequence,
    /// Height of the scroll region in viewport heights (`100` = one screen)
    pub scroll_height_vh: f64,
    /// Caption table
    pub captions: Vec<CaptionEntry>,
    /// Caption enter/exit window width as a fraction of the scroll region
    pub caption_fade: f64,
    /// Smooth scrolling tuning
    pub smooth: SmoothScrollConfig,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            frames: FrameSequence::default(),
            scroll_height_vh: 1400.0,
            captions: default_captions(),
            caption_fade: DEFAULT_FADE,
            smooth: SmoothScrollConfig::default(),
        }
    }
}

impl SceneManifest {
    /// Reads and validates a manifest from a reader
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let manifest: Self = serde_json::from_reader(reader)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Writes the manifest as pretty-printed JSON
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Checks that the scene can be mounted
    pub fn validate(&self) -> Result<()> {
        if self.frames.count == 0 {
            return Err(Error::EmptySequence);
        }
        if !self.scroll_height_vh.is_finite() || self.scroll_height_vh <= 0.0 {
            return Err(Error::InvalidScrollHeight(self.scroll_height_vh));
        }
        self.smooth.validate()?;
        self.timeline().validate()
    }

    /// Caption timeline bound to this manifest's frame count
    pub fn timeline(&self) -> CaptionTimeline {
        CaptionTimeline {
            entries: self.captions.clone(),
            frame_count: self.frames.count,
            fade: self.caption_fade,
        }
    }
}
