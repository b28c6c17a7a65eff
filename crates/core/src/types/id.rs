//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `generate()` for fresh v4 IDs assigned at create time
/// - Conversion methods: `from_uuid()`, `as_uuid()`
/// - `Display` and `FromStr` in canonical hyphenated form
///
/// # Example
///
/// ```rust
/// # use dispatch_core::define_id;
/// define_id!(ClientId);
/// define_id!(DeliveryId);
///
/// let client_id = ClientId::generate();
/// let delivery_id = DeliveryId::generate();
///
/// // These are different types, so this won't compile:
/// // let _: ClientId = delivery_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID value.
            #[must_use]
            pub const fn from_uuid(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID value.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ClientId);
define_id!(DeliveryId);
define_id!(PrincipalId);
