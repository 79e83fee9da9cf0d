//! Closed string vocabularies of the Jellyfin API.
//!
//! Every enum declared through [`wire_enum!`] serializes to the exact string
//! the server uses, so the Rust variant names are free to follow Rust casing.

/// Declares a string-valued wire enum.
///
/// Generates the enum with serde renames, `as_str`, `Display`, `FromStr`,
/// an `ALL` list in declaration order, and a query-string value impl.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The exact string used on the wire.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::UnknownVariant;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err($crate::error::UnknownVariant::new(stringify!($name), s)),
                }
            }
        }

        impl $crate::query::QueryValue for $name {
            fn to_query_value(&self) -> String {
                self.as_str().to_string()
            }
        }
    };
}

pub(crate) use wire_enum;
