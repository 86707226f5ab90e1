use camino::{Utf8Path, Utf8PathBuf};

/// A candidate game path found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredItem {
    path: Utf8PathBuf,
    is_dir: bool,
}

impl DiscoveredItem {
    pub fn file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }

    /// Absolute path of the candidate itself
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Base file name (last path segment)
    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or_default()
    }

    /// Absolute path of the containing directory
    pub fn parent(&self) -> &Utf8Path {
        self.path.parent().unwrap_or(Utf8Path::new(""))
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// Ordered work queue of candidates that still need metadata.
///
/// Owned by the caller; the reconciler only ever removes items from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryQueue {
    items: Vec<DiscoveredItem>,
}

impl DiscoveryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: DiscoveredItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiscoveredItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[DiscoveredItem] {
        &self.items
    }

    /// Drop every item whose index is flagged in `removed`, keeping the order of the rest.
    pub(crate) fn compact(&mut self, removed: &[bool]) {
        debug_assert_eq!(removed.len(), self.items.len());
        let items = std::mem::take(&mut self.items);
        self.items = items
            .into_iter()
            .zip(removed)
            .filter_map(|(item, &gone)| (!gone).then_some(item))
            .collect();
    }
}

impl FromIterator<DiscoveredItem> for DiscoveryQueue {
    fn from_iter<I: IntoIterator<Item = DiscoveredItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DiscoveryQueue {
    type Item = DiscoveredItem;
    type IntoIter = std::vec::IntoIter<DiscoveredItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiscoveryQueue {
    type Item = &'a DiscoveredItem;
    type IntoIter = std::slice::Iter<'a, DiscoveredItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_accessors() {
        let item = DiscoveredItem::file("/roms/nes/Mario.nes");
        assert_eq!(item.file_name(), "Mario.nes");
        assert_eq!(item.parent(), Utf8Path::new("/roms/nes"));
        assert!(!item.is_dir());

        let dir = DiscoveredItem::dir("/roms/psx/Final Fantasy VII");
        assert_eq!(dir.file_name(), "Final Fantasy VII");
        assert!(dir.is_dir());
    }

    #[test]
    fn test_compact_preserves_order() {
        let mut queue: DiscoveryQueue = ["a.nes", "b.nes", "c.nes", "d.nes"]
            .iter()
            .map(|name| DiscoveredItem::file(format!("/roms/nes/{}", name)))
            .collect();

        queue.compact(&[false, true, false, true]);

        let names: Vec<_> = queue.iter().map(|i| i.file_name()).collect();
        assert_eq!(names, vec!["a.nes", "c.nes"]);
    }
}
