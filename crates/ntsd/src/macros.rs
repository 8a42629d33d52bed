/// Declares a fieldless enum of named wire values.
///
/// For each value, a `$repr` constant is also generated (for example
/// [`AceType::U8_ACCESS_ALLOWED`][crate::security::AceType::U8_ACCESS_ALLOWED]),
/// along with name lookup helpers and a [`Display`][std::fmt::Display] impl
/// that prints the name.
macro_rules! named_values {
    (
        $(#[$meta:meta])*
        $vis:vis enum $enum_name:ident: $repr:ident {
            $($name:ident = $value:literal: $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr($repr)]
        $vis enum $enum_name {
            $(
                #[doc = concat!("`", $text, "` (", stringify!($value), ")")]
                $name = $value,
            )+
        }

        impl $enum_name {
            /// All values, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$name,)+];

            pastey::paste! {
                $(
                    #[doc = concat!("[`", stringify!($name), "`][Self::", stringify!($name), "] as ", stringify!($repr))]
                    pub const [<$repr:upper _ $name:snake:upper>]: $repr = $value;
                )+
            }

            pub const fn value(self) -> $repr {
                self as $repr
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        $enum_name::$name => $text,
                    )+
                }
            }

            pub fn from_value(value: $repr) -> Option<Self> {
                match value {
                    $(
                        $value => Some($enum_name::$name),
                    )+
                    _ => None,
                }
            }

            /// Case-insensitive lookup by name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(name))
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Exposes the storage of a `modular_bitfield` struct as a little-endian integer.
macro_rules! bitfield_raw {
    ($name:ident: $repr:ident) => {
        impl $name {
            /// The flags as a little-endian integer.
            pub fn raw(&self) -> $repr {
                $repr::from_le_bytes(self.into_bytes())
            }

            pub fn from_raw(value: $repr) -> Self {
                Self::from_bytes(value.to_le_bytes())
            }
        }
    };
}
