//! Ordered, bounds-checked lists of explorer handles.

use std::slice;

use crate::error::ExplorerError;

use super::AstExplorer;

/// An ordered list of handles returned by list-producing queries such as
/// [`AstExplorer::find_ifs`] and [`AstExplorer::find_conditions`].
///
/// Entries may themselves be absent: the trailing `else` entry of
/// [`AstExplorer::find_conditions`] is an absent handle at a valid index,
/// which is different from an index past the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Explorers<'t> {
    items: Vec<AstExplorer<'t>>,
}

impl<'t> Explorers<'t> {
    /// Returns the number of handles in the list.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list holds no handles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the handle at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::OutOfRange`] when `index` is not below
    /// [`Explorers::len`].
    pub fn get(&self, index: usize) -> Result<AstExplorer<'t>, ExplorerError> {
        self.items
            .get(index)
            .copied()
            .ok_or_else(|| ExplorerError::out_of_range(index, self.items.len()))
    }

    /// Returns an iterator over the handles in order.
    #[must_use]
    pub fn iter(&self) -> slice::Iter<'_, AstExplorer<'t>> {
        self.items.iter()
    }

    /// Returns the handles as a slice.
    #[must_use]
    pub const fn as_slice(&self) -> &[AstExplorer<'t>] {
        self.items.as_slice()
    }
}

impl<'t> FromIterator<AstExplorer<'t>> for Explorers<'t> {
    fn from_iter<I: IntoIterator<Item = AstExplorer<'t>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'t> IntoIterator for Explorers<'t> {
    type Item = AstExplorer<'t>;
    type IntoIter = std::vec::IntoIter<AstExplorer<'t>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, 't> IntoIterator for &'a Explorers<'t> {
    type Item = &'a AstExplorer<'t>;
    type IntoIter = slice::Iter<'a, AstExplorer<'t>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
