/// Data structures for images held in the collection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Stable identifier of an entry, independent of its list position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// Quarter-turn rotation applied by the merge service
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Quarter,
        Rotation::Half,
        Rotation::ThreeQuarter,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Quarter),
            180 => Ok(Rotation::Half),
            270 => Ok(Rotation::ThreeQuarter),
            other => Err(format!("unsupported rotation: {other}")),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A file that finished reading and is ready to join the collection
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub source: PathBuf,
    pub name: String,
    pub mime: String,
    pub size: u64,
    /// Unix millis, when the filesystem reports it
    pub last_modified: Option<i64>,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
    /// Raw file bytes, handed to the preview widget
    pub bytes: Vec<u8>,
}

/// One image in the ordered collection
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub id: ImageId,
    pub source: PathBuf,
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub last_modified: Option<i64>,
    pub data_url: String,
    pub rotation: Rotation,
    pub selected: bool,
}

impl ImageEntry {
    pub fn new(id: ImageId, decoded: DecodedImage) -> Self {
        Self {
            id,
            source: decoded.source,
            name: decoded.name,
            mime: decoded.mime,
            size: decoded.size,
            last_modified: decoded.last_modified,
            data_url: decoded.data_url,
            rotation: Rotation::None,
            selected: false,
        }
    }

    /// The base64 payload, i.e. everything after the data URL's comma
    pub fn base64(&self) -> &str {
        self.data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or_default()
    }
}
