use crate::{Build, Resource};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use std::marker::PhantomData;

/// List of resources, as returned by collection endpoints and embedded
/// in other resources (for example the machine pools of a cluster).
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    href: Option<String>,
    link: bool,
    items: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            href: None,
            link: false,
            items: Vec::new(),
        }
    }
}

impl<T: Resource> List<T> {
    /// Name of the type of the list, which is the list link kind if the list is a link.
    pub fn kind(&self) -> &'static str {
        if self.link {
            T::LIST_LINK_KIND
        } else {
            T::LIST_KIND
        }
    }
}

impl<T> List<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            href: None,
            link: false,
            items,
        }
    }

    /// True if this is a link to the list rather than the list itself.
    pub fn link(&self) -> bool {
        self.link
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Resource + serde::Serialize> serde::Serialize for List<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if let Some(href) = &self.href {
            map.serialize_entry("href", href)?;
        }
        map.serialize_entry("items", &self.items)?;
        map.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for List<T>
where
    T: Resource + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ListVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for ListVisitor<T>
        where
            T: Resource + serde::Deserialize<'de>,
        {
            type Value = List<T>;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "a {} object", T::LIST_KIND)
            }

            fn visit_map<A>(self, mut map: A) -> Result<List<T>, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut list = List::default();

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "kind" => {
                            let kind: Option<String> = map.next_value()?;
                            list.link = kind.as_deref() == Some(T::LIST_LINK_KIND);
                        }
                        "href" => list.href = map.next_value()?,
                        "items" => list.items = map.next_value::<Option<Vec<T>>>()?.unwrap_or_default(),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ListVisitor(PhantomData))
    }
}

/// Builder of [`List`] values, holding builders of its items.
#[derive(Debug, Clone)]
pub struct ListBuilder<B> {
    href: Option<String>,
    link: bool,
    items: Vec<B>,
}

impl<B> Default for ListBuilder<B> {
    fn default() -> Self {
        Self {
            href: None,
            link: false,
            items: Vec::new(),
        }
    }
}

impl<B> ListBuilder<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the items of the list.
    pub fn items(mut self, items: impl IntoIterator<Item = B>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub fn push(mut self, item: B) -> Self {
        self.items.push(item);
        self
    }

    pub fn link(mut self, value: bool) -> Self {
        self.link = value;
        self
    }

    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = Some(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<B: Build> ListBuilder<B> {
    pub fn build(&self) -> List<B::Output> {
        List {
            href: self.href.clone(),
            link: self.link,
            items: self.items.iter().map(Build::build).collect(),
        }
    }
}

impl<B: Build> Build for ListBuilder<B> {
    type Output = List<B::Output>;

    fn build(&self) -> Self::Output {
        ListBuilder::build(self)
    }
    fn copy(value: &Self::Output) -> Self {
        Self {
            href: value.href.clone(),
            link: value.link,
            items: value.items.iter().map(B::copy).collect(),
        }
    }
}

impl<B> From<Vec<B>> for ListBuilder<B> {
    fn from(items: Vec<B>) -> Self {
        Self::new().items(items)
    }
}

impl<B> FromIterator<B> for ListBuilder<B> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self::new().items(iter)
    }
}
