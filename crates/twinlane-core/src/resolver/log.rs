//! Combat log records.
//!
//! The log is the audit trail of a combat batch: one entry per attack that
//! connected with a unit or tower, in processing order. Given identical
//! inputs the serialized log is byte-for-byte identical.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{CardId, Lane, PlayerId};

/// Kind of thing an attack hit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetKind {
    /// An enemy unit.
    Unit,
    /// The enemy tower.
    Tower,
}

/// One resolved attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatLogEntry {
    /// Attacker id.
    pub attacker_id: CardId,
    /// Attacker name.
    pub attacker_name: String,
    /// Unit or tower.
    pub target_type: TargetKind,
    /// Target id, for unit hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<CardId>,
    /// Target name, for unit hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// Damage removed from the target.
    pub damage: u32,
    /// Whether the unit died, for unit hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killed: Option<bool>,
}

impl fmt::Display for CombatLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target_type {
            TargetKind::Unit => {
                let target = self.target_name.as_deref().unwrap_or("Unknown");
                write!(f, "{} hits {} for {}", self.attacker_name, target, self.damage)?;
                if self.killed == Some(true) {
                    write!(f, " (killed)")?;
                }
                Ok(())
            }
            TargetKind::Tower => {
                write!(f, "{} hits the tower for {}", self.attacker_name, self.damage)
            }
        }
    }
}

/// Summary of one lane's combat, handed back with the phase advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatReport {
    /// Lane that was resolved.
    pub lane: Lane,
    /// Player whose units attacked.
    pub attacker: PlayerId,
    /// Attacks in processing order.
    pub log: Vec<CombatLogEntry>,
    /// Damage that went through the destroyed tower to the defender's nexus.
    pub overflow_damage: u32,
    /// Defender's tower HP after the batch.
    pub tower_hp: u32,
    /// Defender's nexus HP after the batch.
    pub nexus_hp: u32,
    /// Ids of cards that died, in order of death.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub casualties: Vec<CardId>,
}

impl CombatReport {
    /// Total damage dealt by the batch, overflow excluded.
    #[must_use]
    pub fn total_damage(&self) -> u32 {
        self.log.iter().map(|entry| entry.damage).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_entry(killed: bool) -> CombatLogEntry {
        CombatLogEntry {
            attacker_id: CardId::new("a"),
            attacker_name: "Grunt".into(),
            target_type: TargetKind::Unit,
            target_id: Some(CardId::new("d")),
            target_name: Some("Ogre".into()),
            damage: 2,
            killed: Some(killed),
        }
    }

    #[test]
    fn entries_read_naturally() {
        assert_eq!(unit_entry(true).to_string(), "Grunt hits Ogre for 2 (killed)");
        assert_eq!(unit_entry(false).to_string(), "Grunt hits Ogre for 2");
    }

    #[test]
    fn tower_entries_omit_target_fields() {
        let entry = CombatLogEntry {
            attacker_id: CardId::new("a"),
            attacker_name: "Grunt".into(),
            target_type: TargetKind::Tower,
            target_id: None,
            target_name: None,
            damage: 4,
            killed: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"attackerId":"a","attackerName":"Grunt","targetType":"tower","damage":4}"#
        );
        assert_eq!(entry.to_string(), "Grunt hits the tower for 4");
    }
}
