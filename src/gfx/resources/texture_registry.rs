//! Fixed-capacity tag registry for loaded textures
//!
//! Slots are assigned in registration order and never reused. The slot index
//! doubles as the texture unit a draw command refers to.

use std::collections::HashSet;

use crate::error::{Result, SceneError};

/// Number of texture slots available to a scene
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// One registered texture
#[derive(Debug, Clone)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

/// Ordered (tag, handle) pairs, looked up by linear scan
#[derive(Debug, Clone)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_TEXTURE_SLOTS),
        }
    }
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle` under `tag` and returns its slot
    ///
    /// Duplicate tags are accepted; lookups keep resolving to the first one.
    pub fn register(&mut self, tag: &str, handle: H) -> Result<usize> {
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            return Err(SceneError::RegistryFull {
                tag: tag.to_string(),
                capacity: MAX_TEXTURE_SLOTS,
            });
        }

        if self.find_slot(tag).is_some() {
            log::warn!(
                "Texture tag '{}' registered twice; lookups use the first entry",
                tag
            );
        }

        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        log::debug!("Registered texture '{}' in slot {}", tag, slot);
        Ok(slot)
    }

    /// Slot of the first entry tagged `tag`
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    pub fn find(&self, tag: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    pub fn get(&self, slot: usize) -> Option<&TextureEntry<H>> {
        self.entries.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry<H>> {
        self.entries.iter()
    }

    /// Tags in slot order, with duplicates
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tag.as_str())
    }

    /// Number of distinct tags
    pub fn unique_tag_count(&self) -> usize {
        self.tags().collect::<HashSet<_>>().len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_TEXTURE_SLOTS
    }
}
