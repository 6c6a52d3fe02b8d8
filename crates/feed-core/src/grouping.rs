//! Partition catalog rows into product groups.

use std::collections::HashMap;

use feed_model::{ProductGroup, RawRow};

/// Group primary rows by trimmed product code, in first-seen order.
///
/// Each group is paired with the first secondary row carrying the same
/// code; later secondary duplicates are ignored. No row is dropped here,
/// including rows with an empty product code.
pub fn group_rows(primary: &[RawRow], secondary: &[RawRow]) -> Vec<ProductGroup> {
    let lookup = index_secondary(secondary);
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ProductGroup> = Vec::new();

    for row in primary {
        let code = row.product_code();
        match positions.get(code) {
            Some(&idx) => groups[idx].primary.push(row.clone()),
            None => {
                positions.insert(code, groups.len());
                groups.push(ProductGroup {
                    product_code: code.to_string(),
                    primary: vec![row.clone()],
                    secondary: lookup.get(code).map(|row| (*row).clone()),
                });
            }
        }
    }
    groups
}

/// First secondary row per trimmed product code.
pub fn index_secondary(rows: &[RawRow]) -> HashMap<&str, &RawRow> {
    let mut lookup = HashMap::new();
    for row in rows {
        lookup.entry(row.product_code()).or_insert(row);
    }
    lookup
}
