use hyperbean_common::{CoffeeBean, Supplier};

/// In-memory catalog standing in for the relational store. Immutable after
/// seeding; handlers only ever take read locks.
pub struct Catalog {
    suppliers: Vec<Supplier>,
    beans: Vec<CoffeeBean>,
}

impl Catalog {
    pub fn new(suppliers: Vec<Supplier>, beans: Vec<CoffeeBean>) -> Self {
        Self { suppliers, beans }
    }

    pub fn bean_count(&self) -> usize {
        self.beans.len()
    }

    pub fn supplier_count(&self) -> usize {
        self.suppliers.len()
    }

    /// One page of beans, `offset` into the collection, at most `limit`.
    /// An offset past the end yields an empty page rather than an error.
    pub fn page(&self, offset: usize, limit: usize) -> Vec<CoffeeBean> {
        self.beans.iter().skip(offset).take(limit).cloned().collect()
    }

    /// A bean joined with its supplier, if it has one.
    pub fn bean_with_supplier(&self, id: u32) -> Option<(CoffeeBean, Option<Supplier>)> {
        let bean = self.beans.iter().find(|b| b.id == id)?.clone();
        let supplier = bean
            .supplier_id
            .and_then(|sid| self.suppliers.iter().find(|s| s.id == sid).cloned());
        Some((bean, supplier))
    }
}
