use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
    timeline::composer::Timeline,
};

/// Frame rate of legacy image-sequence videos.
pub const LEGACY_FPS: u32 = 30;

/// Square canvas side of legacy image-sequence videos.
pub const LEGACY_SIDE: u32 = 1080;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Legacy input: a plain list of images shown in sequence with crossfades.
pub struct SpinProps {
    /// Image sources, in play order.
    pub images: Vec<String>,
    /// Product display name.
    #[serde(default)]
    pub product_name: String,
    /// Brand display name.
    #[serde(default)]
    pub brand_name: String,
    /// Dimensions line shown bottom-right.
    #[serde(default)]
    pub dimensions: String,
    /// Background color (styling only).
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Text color (styling only).
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Crossfade length between consecutive images, in frames.
    #[serde(default = "default_transition_duration")]
    pub transition_duration: u64,
    /// Time each image is on screen, in frames.
    #[serde(default = "default_hold_duration")]
    pub hold_duration: u64,
}

fn default_background_color() -> String {
    "#f5f5f5".to_owned()
}

fn default_text_color() -> String {
    "#1a1a1a".to_owned()
}

fn default_transition_duration() -> u64 {
    20
}

fn default_hold_duration() -> u64 {
    40
}

impl SpinProps {
    /// Props for `images` with every other field at its default.
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            product_name: String::new(),
            brand_name: String::new(),
            dimensions: String::new(),
            background_color: default_background_color(),
            text_color: default_text_color(),
            transition_duration: default_transition_duration(),
            hold_duration: default_hold_duration(),
        }
    }

    /// Parse props from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse spin props JSON: {e}")))
    }

    /// Parse props from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse spin props JSON: {e}")))
    }

    /// Parse props from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open spin props '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Frame rate used for legacy videos.
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(LEGACY_FPS)
    }

    /// Canvas used for legacy videos.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: LEGACY_SIDE,
            height: LEGACY_SIDE,
        }
    }

    /// `"brand — product"`, or whichever of the two is set. Empty when neither is.
    pub fn title_text(&self) -> String {
        [self.brand_name.as_str(), self.product_name.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" — ")
    }

    /// `n * hold - (n - 1) * transition`.
    pub fn computed_duration_frames(&self) -> i64 {
        let n = self.images.len() as i64;
        if n == 0 {
            return 0;
        }
        n * self.hold_duration as i64 - (n - 1) * self.transition_duration as i64
    }

    /// Reject props the legacy timeline cannot lay out.
    ///
    /// An empty image list is a validation error here rather than a placeholder frame.
    pub fn validate(&self) -> ReelResult<()> {
        self.checked_timeline().map(|_| ())
    }

    // `validate`, keeping the composed timeline.
    pub(crate) fn checked_timeline(&self) -> ReelResult<Timeline> {
        if self.images.is_empty() {
            return Err(ReelError::validation("legacy props need at least one image"));
        }
        if self.hold_duration == 0 {
            return Err(ReelError::validation("holdDuration must be > 0"));
        }
        Timeline::legacy(
            self.images.len(),
            self.hold_duration,
            self.transition_duration,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/legacy.rs"]
mod tests;
