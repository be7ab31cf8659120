use clap::ValueEnum;
use serde::Deserialize;

/// Media the backend can export a replay range to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// Animated GIF
    Gif,
    /// ZIP archive of PNG stills
    #[value(name = "pngzip")]
    #[serde(rename = "pngzip")]
    PngArchive,
}

impl ExportKind {
    /// Fixed name the delivered file is saved under.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Gif => "wildfire_replay.gif",
            Self::PngArchive => "wildfire_frames.zip",
        }
    }

    /// Short tag used in staged file names.
    #[must_use]
    pub const fn stage_tag(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::PngArchive => "pngzip",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gif => "GIF",
            Self::PngArchive => "PNG archive",
        }
    }
}
