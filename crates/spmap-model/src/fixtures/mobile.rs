//! Mobile creatures: animals and immortals.

use std::str::FromStr;

use crate::ParseValueError;

/// An animal or population of animals.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub id: i32,
    pub kind: String,
    /// Talking animals are a distinct encounter.
    pub talking: bool,
    /// Domestication status, e.g. "wild", "semi-domesticated", "tame".
    pub status: String,
    /// Turn the animal was born; -1 when unrecorded.
    pub born: i32,
    /// Population count; at least 1.
    pub count: i32,
    pub image: Option<String>,
}

impl Animal {
    pub const DEFAULT_STATUS: &'static str = "wild";
}

/// Immortal families whose tag carries a descriptive `kind` attribute,
/// e.g. `<dragon kind="green" .../>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmortalFamily {
    Centaur,
    Dragon,
    Fairy,
    Giant,
}

impl ImmortalFamily {
    pub fn tag(self) -> &'static str {
        match self {
            ImmortalFamily::Centaur => "centaur",
            ImmortalFamily::Dragon => "dragon",
            ImmortalFamily::Fairy => "fairy",
            ImmortalFamily::Giant => "giant",
        }
    }
}

/// An immortal with a free-form kind, e.g. a green dragon.
#[derive(Debug, Clone, PartialEq)]
pub struct KindedImmortal {
    pub family: ImmortalFamily,
    pub kind: String,
    pub id: i32,
    pub image: Option<String>,
}

/// Immortals whose tag says everything, e.g. `<sphinx id="8"/>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmortalKind {
    Sphinx,
    Djinn,
    Griffin,
    Minotaur,
    Ogre,
    Phoenix,
    Simurgh,
    Troll,
}

const IMMORTAL_KINDS: &str =
    "sphinx, djinn, griffin, minotaur, ogre, phoenix, simurgh, troll";

impl ImmortalKind {
    pub fn tag(self) -> &'static str {
        match self {
            ImmortalKind::Sphinx => "sphinx",
            ImmortalKind::Djinn => "djinn",
            ImmortalKind::Griffin => "griffin",
            ImmortalKind::Minotaur => "minotaur",
            ImmortalKind::Ogre => "ogre",
            ImmortalKind::Phoenix => "phoenix",
            ImmortalKind::Simurgh => "simurgh",
            ImmortalKind::Troll => "troll",
        }
    }
}

impl FromStr for ImmortalKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sphinx" => Ok(ImmortalKind::Sphinx),
            "djinn" => Ok(ImmortalKind::Djinn),
            "griffin" => Ok(ImmortalKind::Griffin),
            "minotaur" => Ok(ImmortalKind::Minotaur),
            "ogre" => Ok(ImmortalKind::Ogre),
            "phoenix" => Ok(ImmortalKind::Phoenix),
            "simurgh" => Ok(ImmortalKind::Simurgh),
            "troll" => Ok(ImmortalKind::Troll),
            _ => Err(ParseValueError::new("immortal kind", s, IMMORTAL_KINDS)),
        }
    }
}

/// A tagged simple immortal.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleImmortal {
    pub kind: ImmortalKind,
    pub id: i32,
    pub image: Option<String>,
}
