use std::collections::BTreeMap;

/// Build converts a builder into the immutable value it describes.
///
/// Attribute slots of generated builders are themselves `Build`: scalars build
/// into a copy of themselves, while nested builders, vectors and maps build
/// their contents recursively.
pub trait Build {
    type Output;

    fn build(&self) -> Self::Output;
    /// Returns a builder holding every attribute of `value`.
    fn copy(value: &Self::Output) -> Self;
}

/// Resource is implemented by identified objects, which carry a kind,
/// an identifier and a link to themselves.
pub trait Resource {
    const KIND: &'static str;
    const LINK_KIND: &'static str;
    const LIST_KIND: &'static str;
    const LIST_LINK_KIND: &'static str;
}

macro_rules! identity_build {
    ($($rust_type:ty,)*) => {
        $(
        impl Build for $rust_type {
            type Output = $rust_type;

            fn build(&self) -> $rust_type {
                self.clone()
            }
            fn copy(value: &$rust_type) -> Self {
                value.clone()
            }
        }
        )*
    };
}

identity_build!(
    String,
    bool,
    i64,
    f64,
    chrono::DateTime<chrono::Utc>,
    serde_json::Value,
);

impl<B: Build> Build for Vec<B> {
    type Output = Vec<B::Output>;

    fn build(&self) -> Self::Output {
        self.iter().map(Build::build).collect()
    }
    fn copy(value: &Self::Output) -> Self {
        value.iter().map(B::copy).collect()
    }
}

impl<B: Build> Build for BTreeMap<String, B> {
    type Output = BTreeMap<String, B::Output>;

    fn build(&self) -> Self::Output {
        self.iter().map(|(k, v)| (k.clone(), v.build())).collect()
    }
    fn copy(value: &Self::Output) -> Self {
        value.iter().map(|(k, v)| (k.clone(), B::copy(v))).collect()
    }
}

// Helper for swapping a token tree with another expression.
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Define value types of the API model along with their builders and
/// JSON codecs.
///
/// A `resource` is an identified object having a kind, an id and an href,
/// and which may be a link. A `struct` is a plain value. Every attribute
/// declares the bit of the presence bitmap which tracks it, its JSON name,
/// its value type, the builder type which builds that value, and how the
/// accessor hands it out:
///
/// * `copy`: returns `Option<T>` of a `Copy` type.
/// * `str`: returns `Option<&str>` of a `String`.
/// * `ref`: returns `Option<&T>`.
///
/// Bits 0, 1 and 2 of a resource are its link flag, id and href.
macro_rules! types {
    (@accessor copy, $(#[$fmeta:meta])* $field:ident, $bit:literal, $vty:ty) => {
        $(#[$fmeta])*
        pub fn $field(&self) -> Option<$vty> {
            if self.bitmap & (1u64 << $bit) != 0 {
                Some(self.$field)
            } else {
                None
            }
        }
    };
    (@accessor str, $(#[$fmeta:meta])* $field:ident, $bit:literal, $vty:ty) => {
        $(#[$fmeta])*
        pub fn $field(&self) -> Option<&str> {
            if self.bitmap & (1u64 << $bit) != 0 {
                Some(self.$field.as_str())
            } else {
                None
            }
        }
    };
    (@accessor ref, $(#[$fmeta:meta])* $field:ident, $bit:literal, $vty:ty) => {
        $(#[$fmeta])*
        pub fn $field(&self) -> Option<&$vty> {
            if self.bitmap & (1u64 << $bit) != 0 {
                Some(&self.$field)
            } else {
                None
            }
        }
    };

    (@setters $builder:ident { $( $(#[$fmeta:meta])* $bit:literal => $field:ident: $bty:ty; )* }) => {
        impl $builder {
            $(
            $(#[$fmeta])*
            pub fn $field(mut self, value: impl Into<$bty>) -> Self {
                self.$field = value.into();
                self.field_set |= 1u64 << $bit;
                self
            }
            )*
        }
    };

    (
        $(#[$meta:meta])*
        resource $name:ident (builder $builder:ident, list $list:ident, kind $kind:literal) {
            $(
                $(#[$fmeta:meta])*
                $bit:literal => $field:ident ($json:literal): $vty:ty = $bty:ty, $mode:ident;
            )*
        }

        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            bitmap: u64,
            id: String,
            href: String,
            $($field: $vty,)*
        }

        #[doc = concat!("List of [`", stringify!($name), "`] values.")]
        pub type $list = $crate::List<$name>;

        const _: () = {
            let mask: u64 = 0b111 $(| (1u64 << $bit))*;
            assert!(
                mask.count_ones() == 3 $(+ replace_expr!($bit 1))*,
                concat!("attribute bits of ", stringify!($name), " overlap"),
            );
        };

        impl $crate::Resource for $name {
            const KIND: &'static str = $kind;
            const LINK_KIND: &'static str = concat!($kind, "Link");
            const LIST_KIND: &'static str = concat!($kind, "List");
            const LIST_LINK_KIND: &'static str = concat!($kind, "ListLink");
        }

        impl $name {
            #[doc = concat!("Returns a new, empty [`", stringify!($builder), "`].")]
            pub fn builder() -> $builder {
                $builder::new()
            }

            /// Name of the type of the object, which is the link kind if the object is a link.
            pub fn kind(&self) -> &'static str {
                if self.link() {
                    <Self as $crate::Resource>::LINK_KIND
                } else {
                    <Self as $crate::Resource>::KIND
                }
            }

            /// True if this is a link to the object rather than the object itself.
            pub fn link(&self) -> bool {
                self.bitmap & 1 != 0
            }

            /// Identifier of the object.
            pub fn id(&self) -> Option<&str> {
                if self.bitmap & 2 != 0 {
                    Some(self.id.as_str())
                } else {
                    None
                }
            }

            /// Link to the object.
            pub fn href(&self) -> Option<&str> {
                if self.bitmap & 4 != 0 {
                    Some(self.href.as_str())
                } else {
                    None
                }
            }

            /// True if no attribute has a value.
            pub fn empty(&self) -> bool {
                self.bitmap & !1 == 0
            }

            $( types!(@accessor $mode, $(#[$fmeta])* $field, $bit, $vty); )*
        }

        #[doc = concat!("Builder of [`", stringify!($name), "`] values.")]
        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            field_set: u64,
            id: String,
            href: String,
            $($field: $bty,)*
        }

        impl $builder {
            pub fn new() -> Self {
                <Self as Default>::default()
            }

            /// Sets the flag that indicates if this is a link.
            pub fn link(mut self, value: bool) -> Self {
                if value {
                    self.field_set |= 1;
                } else {
                    self.field_set &= !1;
                }
                self
            }

            /// Sets the identifier of the object.
            pub fn id(mut self, value: impl Into<String>) -> Self {
                self.id = value.into();
                self.field_set |= 2;
                self
            }

            /// Sets the link to the object.
            pub fn href(mut self, value: impl Into<String>) -> Self {
                self.href = value.into();
                self.field_set |= 4;
                self
            }

            /// True if no attribute has a value.
            pub fn empty(&self) -> bool {
                self.field_set & !1 == 0
            }

            /// Returns a builder holding every attribute of `object`.
            pub fn copy(object: &$name) -> Self {
                Self {
                    field_set: object.bitmap,
                    id: object.id.clone(),
                    href: object.href.clone(),
                    $($field: <$bty as $crate::Build>::copy(&object.$field),)*
                }
            }

            pub fn build(&self) -> $name {
                $name {
                    bitmap: self.field_set,
                    id: self.id.clone(),
                    href: self.href.clone(),
                    $($field: $crate::Build::build(&self.$field),)*
                }
            }
        }

        types!(@setters $builder { $( $(#[$fmeta])* $bit => $field: $bty; )* });

        impl $crate::Build for $builder {
            type Output = $name;

            fn build(&self) -> $name {
                $builder::build(self)
            }
            fn copy(value: &$name) -> Self {
                $builder::copy(value)
            }
        }

        impl From<&$name> for $builder {
            fn from(object: &$name) -> Self {
                $builder::copy(object)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                use serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("kind", self.kind())?;
                if let Some(id) = self.id() {
                    map.serialize_entry("id", id)?;
                }
                if let Some(href) = self.href() {
                    map.serialize_entry("href", href)?;
                }
                $(
                if self.bitmap & (1u64 << $bit) != 0 {
                    map.serialize_entry($json, &self.$field)?;
                }
                )*
                map.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct Visitor;

                impl<'de> serde::de::Visitor<'de> for Visitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                        f.write_str(concat!("a ", $kind, " object"))
                    }

                    fn visit_map<A>(self, mut map: A) -> Result<$name, A::Error>
                    where
                        A: serde::de::MapAccess<'de>,
                    {
                        let mut object = $name::default();

                        while let Some(key) = map.next_key::<String>()? {
                            match key.as_str() {
                                "kind" => {
                                    let kind: Option<String> = map.next_value()?;
                                    if kind.as_deref() == Some(<$name as $crate::Resource>::LINK_KIND) {
                                        object.bitmap |= 1;
                                    }
                                }
                                "id" => {
                                    if let Some(value) = map.next_value::<Option<String>>()? {
                                        object.id = value;
                                        object.bitmap |= 2;
                                    }
                                }
                                "href" => {
                                    if let Some(value) = map.next_value::<Option<String>>()? {
                                        object.href = value;
                                        object.bitmap |= 4;
                                    }
                                }
                                $(
                                $json => {
                                    if let Some(value) = map.next_value::<Option<$vty>>()? {
                                        object.$field = value;
                                        object.bitmap |= 1u64 << $bit;
                                    }
                                }
                                )*
                                _ => {
                                    map.next_value::<serde::de::IgnoredAny>()?;
                                }
                            }
                        }
                        Ok(object)
                    }
                }

                deserializer.deserialize_map(Visitor)
            }
        }

        types! { $($rest)* }
    };

    (
        $(#[$meta:meta])*
        struct $name:ident (builder $builder:ident) {
            $(
                $(#[$fmeta:meta])*
                $bit:literal => $field:ident ($json:literal): $vty:ty = $bty:ty, $mode:ident;
            )*
        }

        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            bitmap: u64,
            $($field: $vty,)*
        }

        const _: () = {
            let mask: u64 = 0 $(| (1u64 << $bit))*;
            assert!(
                mask.count_ones() == 0 $(+ replace_expr!($bit 1))*,
                concat!("attribute bits of ", stringify!($name), " overlap"),
            );
        };

        impl $name {
            #[doc = concat!("Returns a new, empty [`", stringify!($builder), "`].")]
            pub fn builder() -> $builder {
                $builder::new()
            }

            /// True if no attribute has a value.
            pub fn empty(&self) -> bool {
                self.bitmap == 0
            }

            $( types!(@accessor $mode, $(#[$fmeta])* $field, $bit, $vty); )*
        }

        #[doc = concat!("Builder of [`", stringify!($name), "`] values.")]
        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            field_set: u64,
            $($field: $bty,)*
        }

        impl $builder {
            pub fn new() -> Self {
                <Self as Default>::default()
            }

            /// True if no attribute has a value.
            pub fn empty(&self) -> bool {
                self.field_set == 0
            }

            /// Returns a builder holding every attribute of `object`.
            pub fn copy(object: &$name) -> Self {
                Self {
                    field_set: object.bitmap,
                    $($field: <$bty as $crate::Build>::copy(&object.$field),)*
                }
            }

            pub fn build(&self) -> $name {
                $name {
                    bitmap: self.field_set,
                    $($field: $crate::Build::build(&self.$field),)*
                }
            }
        }

        types!(@setters $builder { $( $(#[$fmeta])* $bit => $field: $bty; )* });

        impl $crate::Build for $builder {
            type Output = $name;

            fn build(&self) -> $name {
                $builder::build(self)
            }
            fn copy(value: &$name) -> Self {
                $builder::copy(value)
            }
        }

        impl From<&$name> for $builder {
            fn from(object: &$name) -> Self {
                $builder::copy(object)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                use serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(None)?;
                $(
                if self.bitmap & (1u64 << $bit) != 0 {
                    map.serialize_entry($json, &self.$field)?;
                }
                )*
                map.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct Visitor;

                impl<'de> serde::de::Visitor<'de> for Visitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                        f.write_str(concat!("a ", stringify!($name), " object"))
                    }

                    fn visit_map<A>(self, mut map: A) -> Result<$name, A::Error>
                    where
                        A: serde::de::MapAccess<'de>,
                    {
                        let mut object = $name::default();

                        while let Some(key) = map.next_key::<String>()? {
                            match key.as_str() {
                                $(
                                $json => {
                                    if let Some(value) = map.next_value::<Option<$vty>>()? {
                                        object.$field = value;
                                        object.bitmap |= 1u64 << $bit;
                                    }
                                }
                                )*
                                _ => {
                                    map.next_value::<serde::de::IgnoredAny>()?;
                                }
                            }
                        }
                        Ok(object)
                    }
                }

                deserializer.deserialize_map(Visitor)
            }
        }

        types! { $($rest)* }
    };

    () => {};
}

/// Define enumerations which are represented on the wire as strings.
/// Values this client doesn't know about are kept as `Other`.
macro_rules! string_enums {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal, )*
        }

        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// A value which isn't known to this client.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )*
                    Self::Other(other) => other.as_str(),
                }
            }
        }

        // Matches the zero value of the wire representation: an empty string.
        impl Default for $name {
            fn default() -> Self {
                Self::Other(String::new())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )*
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Ok(Self::from(value.as_str()))
            }
        }

        impl $crate::Build for $name {
            type Output = $name;

            fn build(&self) -> $name {
                self.clone()
            }
            fn copy(value: &$name) -> Self {
                value.clone()
            }
        }

        string_enums! { $($rest)* }
    };

    () => {};
}
