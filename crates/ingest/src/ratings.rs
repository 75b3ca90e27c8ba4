use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::info;

use crate::error::IngestError;
use crate::table::read_table;
use crate::types::{ProductId, RatingRecord, UserId};

const RATING_COLUMNS: [&str; 3] = ["user_id", "product_id", "rating"];
const HISTORY_COLUMNS: [&str; 4] = ["user_id", "product_id", "rating", "user"];

/// A table of `(user, product, rating)` rows in file order, indexed by user
/// and by product.
///
/// The per-key row lists keep file order, so a stable sort over them breaks
/// rating ties by position in the file.
#[derive(Debug, Clone, Default)]
pub struct RatingTable {
    records: Vec<RatingRecord>,
    by_user: HashMap<UserId, Vec<usize>>,
    by_product: HashMap<ProductId, Vec<usize>>,
}

impl RatingTable {
    pub fn from_records(records: Vec<RatingRecord>) -> Self {
        let mut by_user: HashMap<UserId, Vec<usize>> = HashMap::new();
        let mut by_product: HashMap<ProductId, Vec<usize>> = HashMap::new();
        for (row, record) in records.iter().enumerate() {
            by_user.entry(record.user_id).or_default().push(row);
            by_product.entry(record.product_id).or_default().push(row);
        }
        Self {
            records,
            by_user,
            by_product,
        }
    }

    /// Loads a recommendation table (`user_id, product_id, rating`, any
    /// column order).
    pub fn from_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, IngestError> {
        Self::load(path.as_ref(), delimiter, &RATING_COLUMNS)
    }

    /// Loads the rating history, which also carries each customer's name in
    /// a `user` column.
    pub fn history_from_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, IngestError> {
        Self::load(path.as_ref(), delimiter, &HISTORY_COLUMNS)
    }

    fn load(path: &Path, delimiter: u8, required: &[&str]) -> Result<Self, IngestError> {
        let table = Self::from_records(read_table(path, delimiter, required)?);
        info!(
            path = %path.display(),
            rows = table.len(),
            users = table.by_user.len(),
            products = table.by_product.len(),
            "rating_table_loaded"
        );
        Ok(table)
    }

    /// Rows for one user, in file order.
    pub fn for_user(&self, user: UserId) -> impl Iterator<Item = &RatingRecord> {
        self.rows(self.by_user.get(&user))
    }

    /// Rows for one product, in file order.
    pub fn for_product(&self, product: ProductId) -> impl Iterator<Item = &RatingRecord> {
        self.rows(self.by_product.get(&product))
    }

    fn rows<'a>(
        &'a self,
        rows: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a RatingRecord> {
        rows.into_iter().flatten().map(move |&row| &self.records[row])
    }

    pub fn contains_user(&self, user: UserId) -> bool {
        self.by_user.contains_key(&user)
    }

    pub fn contains_product(&self, product: ProductId) -> bool {
        self.by_product.contains_key(&product)
    }

    /// Distinct users, ascending.
    pub fn user_ids(&self) -> Vec<UserId> {
        self.by_user
            .keys()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct products, ascending.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.by_product
            .keys()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Display name of a user: the first non-empty `user` value among the
    /// user's rows.
    pub fn user_name(&self, user: UserId) -> Option<&str> {
        self.for_user(user)
            .find_map(|r| r.user.as_deref().filter(|name| !name.is_empty()))
    }

    /// Number of rows per user.
    pub fn rating_counts(&self) -> impl Iterator<Item = (UserId, usize)> + '_ {
        self.by_user.iter().map(|(user, rows)| (*user, rows.len()))
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
