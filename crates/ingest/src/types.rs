//! Row types for the catalog and rating tables.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

id_newtype!(
    /// Catalog product identifier.
    ProductId
);

id_newtype!(
    /// Customer identifier from the rating tables.
    UserId
);

/// One catalog row.
///
/// Deserialized by header name; the CSV may carry extra columns. The
/// processed description column is `product_name_description_processed` in
/// the catalog file and serializes as `processed_description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(alias = "product_name_description_processed", default)]
    pub processed_description: String,
}

/// One row of a rating table.
///
/// Recommendation tables carry `user_id, product_id, rating` in either
/// column order; the rating history adds the customer's display name in
/// `user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl RatingRecord {
    pub fn new(user_id: impl Into<UserId>, product_id: impl Into<ProductId>, rating: f32) -> Self {
        Self {
            user_id: user_id.into(),
            product_id: product_id.into(),
            rating,
            user: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}
