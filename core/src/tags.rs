//! Cell tags packed into a single byte
//!
//! Each cell owns its own [`Tags`] value (a `Copy` bitmask), so no two cells
//! can ever share a tag collection.

use core::fmt;

/// A single cell tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tag {
    Wall,
    Door,
    Entrance,
    Exit,
    Key,
    Hero,
}

impl Tag {
    /// All tags in bit order
    pub const ALL: [Tag; 6] = [Tag::Wall, Tag::Door, Tag::Entrance, Tag::Exit, Tag::Key, Tag::Hero];

    const fn bit(self) -> u8 {
        match self {
            Tag::Wall => 1 << 0,
            Tag::Door => 1 << 1,
            Tag::Entrance => 1 << 2,
            Tag::Exit => 1 << 3,
            Tag::Key => 1 << 4,
            Tag::Hero => 1 << 5,
        }
    }

    /// Lowercase name, as used by renderers and JSON snapshots
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Wall => "wall",
            Tag::Door => "door",
            Tag::Entrance => "entrance",
            Tag::Exit => "exit",
            Tag::Key => "key",
            Tag::Hero => "hero",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of tags carried by one cell
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Tags(u8);

impl Tags {
    pub const EMPTY: Tags = Tags(0);
    pub const WALL: Tags = Tags(Tag::Wall.bit());
    pub const KEY: Tags = Tags(Tag::Key.bit());
    pub const EXIT_DOOR: Tags = Tags(Tag::Door.bit() | Tag::Exit.bit());
    pub const ENTRANCE_DOOR: Tags = Tags(Tag::Door.bit() | Tag::Entrance.bit());

    pub const fn only(tag: Tag) -> Self {
        Tags(tag.bit())
    }

    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, tag: Tag) {
        self.0 |= tag.bit();
    }

    pub fn remove(&mut self, tag: Tag) {
        self.0 &= !tag.bit();
    }

    pub const fn with(self, tag: Tag) -> Self {
        Tags(self.0 | tag.bit())
    }

    pub const fn without(self, tag: Tag) -> Self {
        Tags(self.0 & !tag.bit())
    }

    /// Doors never block traversal, even if something marked them as walls.
    pub const fn is_passable(self) -> bool {
        !self.contains(Tag::Wall) || self.contains(Tag::Door)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Tags present in this set, in [`Tag::ALL`] order
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |&tag| self.contains(tag))
    }
}

impl From<Tag> for Tags {
    fn from(tag: Tag) -> Self {
        Tags::only(tag)
    }
}

impl FromIterator<Tag> for Tags {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        iter.into_iter().fold(Tags::EMPTY, Tags::with)
    }
}

// Same shape as the space-separated class list a renderer would emit.
impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(tag.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_insert_remove() {
        let mut tags = Tags::EMPTY;
        assert!(tags.is_empty());

        tags.insert(Tag::Hero);
        tags.insert(Tag::Key);
        assert!(tags.contains(Tag::Hero));
        assert!(tags.contains(Tag::Key));
        assert_eq!(tags.len(), 2);

        tags.remove(Tag::Key);
        assert!(!tags.contains(Tag::Key));
        assert_eq!(tags, Tags::only(Tag::Hero));
    }

    #[test]
    fn test_passability() {
        assert!(Tags::EMPTY.is_passable());
        assert!(!Tags::WALL.is_passable());
        assert!(Tags::EXIT_DOOR.is_passable());
        assert!(Tags::ENTRANCE_DOOR.is_passable());
        assert!(Tags::WALL.with(Tag::Door).is_passable());
        assert!(Tags::KEY.is_passable());
    }

    #[test]
    fn test_display_lists_names_in_order() {
        let tags: Tags = [Tag::Exit, Tag::Door, Tag::Hero].into_iter().collect();
        assert_eq!(tags.to_string(), "door exit hero");
        assert_eq!(Tags::EMPTY.to_string(), "");
    }
}
