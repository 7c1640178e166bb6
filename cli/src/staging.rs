//! The staging slot, stretched across CLI invocations.
//!
//! One command stages an import and a later one saves it, so the slot
//! lives in a scratch JSON file in the data directory between commands.
//! The semantics stay single-slot last-write-wins: storing overwrites the
//! file, consuming deletes it, and it is never written into the ledger
//! until an explicit save.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

use diario_core::StagingSlot;

/// Read the slot from disk. A missing file is an empty slot; an unreadable
/// one is discarded with a warning rather than blocking the save flow.
pub(crate) fn load_slot(path: &Path) -> Result<StagingSlot> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StagingSlot::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    match serde_json::from_str(&data) {
        Ok(staged) => Ok(StagingSlot::new(Some(staged))),
        Err(e) => {
            eprintln!("Warning: discarding unreadable staged import: {e}");
            Ok(StagingSlot::default())
        }
    }
}

/// Mirror the slot back to disk: write-through on stage, delete on consume.
pub(crate) fn store_slot(path: &Path, slot: &StagingSlot) -> Result<()> {
    match slot.peek() {
        Some(staged) => {
            let data = serde_json::to_string_pretty(staged)?;
            std::fs::write(path, data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", path.display()));
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diario_core::StagedImport;

    fn staged(name: &str) -> StagedImport {
        StagedImport {
            name: name.to_string(),
            calories: 140.0,
            protein_g: 12.0,
            carbs_g: 0.0,
            fat_g: 10.0,
        }
    }

    #[test]
    fn test_missing_file_is_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        let slot = load_slot(&dir.path().join("staged.json")).unwrap();
        assert!(slot.is_empty());
    }

    #[test]
    fn test_store_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staged.json");

        let mut slot = StagingSlot::default();
        slot.stage(staged("Egg (Large) (x2)"));
        store_slot(&path, &slot).unwrap();

        let reloaded = load_slot(&path).unwrap();
        assert_eq!(reloaded.peek().unwrap().name, "Egg (Large) (x2)");
    }

    #[test]
    fn test_consume_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staged.json");

        let mut slot = StagingSlot::default();
        slot.stage(staged("Banana (Medium) (x1)"));
        store_slot(&path, &slot).unwrap();
        assert!(path.exists());

        slot.take().unwrap();
        store_slot(&path, &slot).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_restage_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staged.json");

        let mut slot = StagingSlot::default();
        slot.stage(staged("first"));
        store_slot(&path, &slot).unwrap();
        slot.stage(staged("second"));
        store_slot(&path, &slot).unwrap();

        let reloaded = load_slot(&path).unwrap();
        assert_eq!(reloaded.peek().unwrap().name, "second");
    }

    #[test]
    fn test_garbage_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staged.json");
        std::fs::write(&path, "{not json").unwrap();
        let slot = load_slot(&path).unwrap();
        assert!(slot.is_empty());
    }
}
