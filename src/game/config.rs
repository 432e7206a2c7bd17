use std::collections::HashMap;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::info;
use serde::Deserialize;

use crate::game::suspects::SuspectIndex;
use crate::game::tree::{RoomTree, RoomTreeBuilder, Side};

/// Everything a game round needs, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct Mansion {
    pub rooms: RoomTree,
    pub suspects: SuspectIndex,
    /// Clues needed against the accused for the accusation to stand.
    pub evidence_threshold: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    #[serde(default)]
    pub clue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PassageConfig {
    pub from: String,
    pub side: Side,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuspectConfig {
    pub clue: String,
    pub suspect: String,
}

/// Static description of a mansion: its rooms, how they connect, and which
/// suspect each clue points to. Rooms are referred to by name, so names must
/// be unique here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MansionConfig {
    pub entrance: String,
    pub rooms: Vec<RoomConfig>,
    #[serde(default)]
    pub passages: Vec<PassageConfig>,
    #[serde(default)]
    pub suspects: Vec<SuspectConfig>,
    #[serde(default = "default_evidence_threshold")]
    pub evidence_threshold: usize,
}

fn default_evidence_threshold() -> usize {
    2
}

impl MansionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse mansion description")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading mansion from {}", path.display());
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("invalid mansion file {}", path.display()))
    }

    /// Validate the description and assemble the room tree and suspect index.
    pub fn build(&self) -> Result<Mansion> {
        ensure!(
            self.evidence_threshold >= 1,
            "evidence_threshold must be at least 1"
        );

        let mut builder = RoomTreeBuilder::new();
        let mut ids = HashMap::new();
        for room in &self.rooms {
            ensure!(!room.name.trim().is_empty(), "room names cannot be empty");
            let id = builder.build_room(room.name.as_str(), room.clue.as_deref());
            ensure!(
                ids.insert(room.name.as_str(), id).is_none(),
                "room '{}' is listed twice",
                room.name
            );
        }

        let lookup = |name: &str| {
            ids.get(name)
                .copied()
                .with_context(|| format!("passage refers to unknown room '{name}'"))
        };
        for passage in &self.passages {
            builder.connect(lookup(&passage.from)?, passage.side, lookup(&passage.to)?)?;
        }

        let entrance = ids
            .get(self.entrance.as_str())
            .copied()
            .with_context(|| format!("entrance '{}' is not one of the rooms", self.entrance))?;
        let rooms = builder.finish(entrance)?;
        let suspects = self.suspect_index();

        info!(
            "Mansion ready: {} rooms, {} clue associations, {} clues to convict",
            rooms.len(),
            suspects.len(),
            self.evidence_threshold
        );

        Ok(Mansion {
            rooms,
            suspects,
            evidence_threshold: self.evidence_threshold,
        })
    }

    pub fn suspect_index(&self) -> SuspectIndex {
        SuspectIndex::build(
            self.suspects
                .iter()
                .map(|s| (s.clue.as_str(), s.suspect.as_str())),
        )
    }

    /// The classic six-room mansion.
    pub fn reference() -> Self {
        let room = |name: &str, clue: &str| RoomConfig {
            name: name.into(),
            clue: Some(clue.into()),
        };
        let passage = |from: &str, side, to: &str| PassageConfig {
            from: from.into(),
            side,
            to: to.into(),
        };
        let suspect = |clue: &str, suspect: &str| SuspectConfig {
            clue: clue.into(),
            suspect: suspect.into(),
        };

        MansionConfig {
            entrance: "Hall de Entrada".into(),
            rooms: vec![
                room("Hall de Entrada", "Chave antiga"),
                room("Biblioteca", "Livro aberto"),
                room("Cozinha", "Faca com resíduo"),
                room("Sótão", "Caixa trancada"),
                room("Jardim", "Pegadas misteriosas"),
                room("Sala Secreta", "Carta cifrada"),
            ],
            passages: vec![
                passage("Hall de Entrada", Side::Left, "Biblioteca"),
                passage("Hall de Entrada", Side::Right, "Cozinha"),
                passage("Biblioteca", Side::Left, "Sótão"),
                passage("Biblioteca", Side::Right, "Jardim"),
                passage("Cozinha", Side::Right, "Sala Secreta"),
            ],
            suspects: vec![
                suspect("Chave antiga", "Sr. Preto"),
                suspect("Livro aberto", "Sra. Branca"),
                suspect("Faca com resíduo", "Sr. Verde"),
                suspect("Caixa trancada", "Sra. Branca"),
                suspect("Pegadas misteriosas", "Sr. Preto"),
                suspect("Carta cifrada", "Sr. Verde"),
            ],
            evidence_threshold: default_evidence_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_mansion_layout() {
        let mansion = MansionConfig::reference().build().unwrap();
        let rooms = &mansion.rooms;
        assert_eq!(rooms.len(), 6);

        let hall = rooms.root();
        assert_eq!(rooms.room(hall).name, "Hall de Entrada");
        let library = rooms.child(hall, Side::Left).unwrap();
        let kitchen = rooms.child(hall, Side::Right).unwrap();
        assert_eq!(rooms.room(library).name, "Biblioteca");
        assert_eq!(rooms.room(kitchen).name, "Cozinha");
        assert_eq!(rooms.child(kitchen, Side::Left), None);
        let secret = rooms.child(kitchen, Side::Right).unwrap();
        assert_eq!(rooms.room(secret).clue.as_deref(), Some("Carta cifrada"));
        assert!(rooms.is_leaf(secret));

        assert_eq!(mansion.suspects.len(), 6);
        assert_eq!(mansion.evidence_threshold, 2);
    }

    #[test]
    fn test_bundled_json_matches_reference() {
        let bundled = MansionConfig::from_json_str(include_str!("../../data/mansion.json")).unwrap();
        assert_eq!(bundled, MansionConfig::reference());
    }

    #[test]
    fn test_json_defaults() {
        let config = MansionConfig::from_json_str(
            r#"{"entrance": "Porão", "rooms": [{"name": "Porão", "clue": ""}]}"#,
        )
        .unwrap();
        assert_eq!(config.evidence_threshold, 2);
        assert!(config.passages.is_empty());

        let mansion = config.build().unwrap();
        assert_eq!(mansion.rooms.room(mansion.rooms.root()).clue, None);
        assert_eq!(mansion.suspects.len(), 0);
    }

    #[test]
    fn test_rejects_bad_side() {
        let err = MansionConfig::from_json_str(
            r#"{"entrance": "A", "rooms": [{"name": "A"}, {"name": "B"}],
                "passages": [{"from": "A", "side": "up", "to": "B"}]}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_build_errors() {
        let mut config = MansionConfig::reference();
        config.passages.push(PassageConfig {
            from: "Jardim".into(),
            side: Side::Left,
            to: "Porão".into(),
        });
        let err = config.build().unwrap_err();
        assert!(err.to_string().contains("unknown room 'Porão'"));

        let mut config = MansionConfig::reference();
        config.rooms.push(RoomConfig {
            name: "Cozinha".into(),
            clue: None,
        });
        assert!(config.build().unwrap_err().to_string().contains("listed twice"));

        let mut config = MansionConfig::reference();
        config.entrance = "Garagem".into();
        assert!(config.build().is_err());

        let mut config = MansionConfig::reference();
        config.passages.pop();
        assert!(config.build().unwrap_err().to_string().contains("cannot be reached"));

        let mut config = MansionConfig::reference();
        config.evidence_threshold = 0;
        assert!(config.build().unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn test_zero_threshold_from_json_is_rejected() {
        let config = MansionConfig::from_json_str(
            r#"{"entrance": "A", "rooms": [{"name": "A"}], "evidence_threshold": 0}"#,
        )
        .unwrap();
        assert!(config.build().is_err());
    }

    #[test]
    fn test_load_malformed_file_reports_parse_error() {
        let path = std::env::temp_dir().join("detective-quest-malformed.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = MansionConfig::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        let chain = format!("{err:#}");
        assert!(chain.starts_with("invalid mansion file"));
        assert!(chain.contains("failed to parse mansion description"));
        assert!(!chain.contains("Usage"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MansionConfig::load("does/not/exist.json").unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
