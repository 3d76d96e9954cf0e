//! Carousel entries, built once from static page data.

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItem {
    index: usize,
    title: String,
    category: String,
    image: Option<String>,
}

impl CarouselItem {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Wire shape of one entry in the page's JSON data block.
#[derive(Debug, Deserialize)]
struct RawItem {
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: Option<String>,
}

/// The immutable item list. Indices are positions in the source data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselItems {
    items: Vec<CarouselItem>,
}

impl CarouselItems {
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: Vec<RawItem> = serde_json::from_str(raw)?;
        Ok(raw
            .into_iter()
            .map(|item| (item.title, item.category, item.image))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CarouselItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CarouselItem> {
        self.items.iter()
    }

    /// First index whose category matches `label` exactly.
    pub fn first_in_category(&self, label: &str) -> Option<usize> {
        self.items
            .iter()
            .find(|item| item.category == label)
            .map(|item| item.index)
    }
}

impl<T, C> FromIterator<(T, C, Option<String>)> for CarouselItems
where
    T: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, C, Option<String>)>>(iter: I) -> Self {
        let items = iter
            .into_iter()
            .enumerate()
            .map(|(index, (title, category, image))| CarouselItem {
                index,
                title: title.into(),
                category: category.into(),
                image,
            })
            .collect();
        Self { items }
    }
}

impl<'a> IntoIterator for &'a CarouselItems {
    type Item = &'a CarouselItem;
    type IntoIter = std::slice::Iter<'a, CarouselItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
