use super::NewsItem;

/// Ordered, title-sorted set of items with cyclic navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsCollection {
    items: Vec<NewsItem>,
}

impl NewsCollection {
    /// Sorts by title ascending. The sort is stable, so items with equal
    /// titles keep the order in which their sources were listed.
    pub fn new(mut items: Vec<NewsItem>) -> Self {
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NewsItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NewsItem> {
        self.items.iter()
    }

    /// Index after `index`, wrapping to the first item. `None` when empty.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some((index + 1) % self.items.len())
        }
    }
}

impl<'a> IntoIterator for &'a NewsCollection {
    type Item = &'a NewsItem;
    type IntoIter = std::slice::Iter<'a, NewsItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
