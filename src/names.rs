//! Two-digit slot assignment for asset names.
//!
//! The device firmware only loads assets named `NN_name` where `name` uses a
//! restricted character set. Names already in that shape keep their slot so
//! repeated conversions are stable; everything else gets the lowest free slot
//! in first-occurrence order.
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// Characters the firmware accepts in an asset name.
pub const VALID_NAME_CHARS: &str = "qwertyuiopasdfghjklzxcvbnm1234567890_";

/// Number of distinct slots (`00` through `99`).
pub const SLOT_COUNT: u8 = 100;

/// Maximum filtered characters kept after the slot prefix.
pub const MAX_SUFFIX_LEN: usize = 13;

/// Every slot is taken and another asset still needs one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no free slot for image {image:?}: {distinct} distinct images exceed 100 slots")]
pub struct CapacityError {
    pub image: String,
    pub distinct: usize,
}

/// Original asset name to normalized asset name, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameMapping {
    entries: IndexMap<String, String>,
}

impl NameMapping {
    pub fn get(&self, image: &str) -> Option<&str> {
        self.entries.get(image).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of entries whose normalized name differs from the original.
    pub fn renamed_count(&self) -> usize {
        self.iter().filter(|(from, to)| from != to).count()
    }
}

pub fn is_valid_name_char(ch: char) -> bool {
    VALID_NAME_CHARS.contains(ch)
}

/// Drop every character outside [`VALID_NAME_CHARS`]. No case folding.
pub fn filter_valid_chars(name: &str) -> String {
    name.chars().filter(|ch| is_valid_name_char(*ch)).collect()
}

/// True when `name` is already `NN_` followed by valid characters only.
pub fn is_already_numbered(name: &str) -> bool {
    let mut chars = name.chars();
    let prefix_ok = matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some(b), Some('_')) if a.is_ascii_digit() && b.is_ascii_digit()
    );
    prefix_ok && name.chars().all(is_valid_name_char)
}

/// Build the mapping for `images`, which may repeat.
pub fn normalize_names<S: AsRef<str>>(images: &[S]) -> Result<NameMapping, CapacityError> {
    let mut slots: IndexMap<&str, Option<String>> =
        images.iter().map(|image| (image.as_ref(), None)).collect();
    let distinct = slots.len();
    let mut used: BTreeSet<u8> = BTreeSet::new();

    for (image, target) in slots.iter_mut() {
        if let Some(slot) = numbered_slot(image) {
            used.insert(slot);
            *target = Some(image.to_string());
        }
    }

    for (image, target) in slots.iter_mut().filter(|(_, target)| target.is_none()) {
        let slot = first_free_slot(&used).ok_or_else(|| CapacityError {
            image: image.to_string(),
            distinct,
        })?;
        used.insert(slot);
        let normalized = format!("{slot:02}_{}", truncated_suffix(image));
        tracing::debug!(image = *image, slot, normalized = %normalized, "assigned slot");
        *target = Some(normalized);
    }

    let entries = slots
        .into_iter()
        .filter_map(|(image, target)| target.map(|target| (image.to_string(), target)))
        .collect();
    Ok(NameMapping { entries })
}

fn numbered_slot(name: &str) -> Option<u8> {
    if !is_already_numbered(name) {
        return None;
    }
    name.get(..2).and_then(|prefix| prefix.parse().ok())
}

fn first_free_slot(used: &BTreeSet<u8>) -> Option<u8> {
    (0..SLOT_COUNT).find(|slot| !used.contains(slot))
}

fn truncated_suffix(name: &str) -> String {
    filter_valid_chars(name).chars().take(MAX_SUFFIX_LEN).collect()
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
