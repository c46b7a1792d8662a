use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::Id;

/// Row storage used by the in-memory repositories.
///
/// Ids are assigned in increasing order starting after the highest seeded id,
/// mirroring an autoincrement primary key.
#[derive(Debug)]
pub struct MemoryTable<R> {
    inner: RwLock<Rows<R>>,
}

#[derive(Debug)]
struct Rows<R> {
    last_id: Id,
    rows: BTreeMap<Id, R>,
}

impl<R: Clone> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> MemoryTable<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }

    pub fn with_rows(rows: impl IntoIterator<Item = (Id, R)>) -> Self {
        let rows: BTreeMap<Id, R> = rows.into_iter().collect();
        let last_id = rows.keys().next_back().copied().unwrap_or(0);

        Self {
            inner: RwLock::new(Rows { last_id, rows }),
        }
    }

    pub async fn all(&self) -> Vec<R> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    pub async fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.inner
            .read()
            .await
            .rows
            .values()
            .filter(|row| predicate(*row))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: Id) -> Option<R> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    /// Stores the row built for the next free id and returns it.
    pub async fn insert(&self, build: impl FnOnce(Id) -> R) -> R {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        let row = build(id);
        inner.rows.insert(id, row.clone());

        row
    }

    /// Replaces an existing row. Returns `false` when the id is unknown.
    pub async fn replace(&self, id: Id, row: R) -> bool {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(current) => {
                *current = row;
                true
            }
            None => false,
        }
    }

    /// Applies `update` to every row matching `predicate`, returning how many changed.
    pub async fn update_where(
        &self,
        predicate: impl Fn(&R) -> bool,
        update: impl Fn(&mut R),
    ) -> usize {
        let mut inner = self.inner.write().await;
        let mut count = 0;
        for row in inner.rows.values_mut().filter(|row| predicate(&**row)) {
            update(row);
            count += 1;
        }

        count
    }

    pub async fn remove(&self, id: Id) -> Option<R> {
        self.inner.write().await.rows.remove(&id)
    }

    pub async fn remove_where(&self, predicate: impl Fn(&R) -> bool) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.rows.len();
        inner.rows.retain(|_, row| !predicate(&*row));

        before - inner.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_continue_after_seeded_rows() {
        let table = MemoryTable::with_rows([(3, "c".to_owned()), (7, "g".to_owned())]);
        let row = table.insert(|id| format!("row {id}")).await;

        assert_eq!(row, "row 8");
        assert_eq!(table.all().await.len(), 3);
    }

    #[tokio::test]
    async fn replace_unknown_id_is_rejected() {
        let table: MemoryTable<String> = MemoryTable::new();

        assert!(!table.replace(1, "a".to_owned()).await);
        assert!(table.get(1).await.is_none());
    }

    #[tokio::test]
    async fn remove_where_counts_rows() {
        let table = MemoryTable::with_rows((1..=5).map(|id| (id, id)));
        let removed = table.remove_where(|v| v % 2 == 0).await;

        assert_eq!(removed, 2);
        assert_eq!(table.all().await, vec![1, 3, 5]);
    }
}
