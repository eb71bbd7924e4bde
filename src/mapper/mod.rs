//! Entity mapping from the generic tree to typed entities.
//!
//! Each dialect has its own mapper: it walks the scanned tree per object
//! kind, builds every entity from its declared defaults, overwrites the
//! fields present in the source and appends the result to the
//! configuration in document order. Links between entities are left to
//! the resolution pass.

mod braced;
mod edit_set;

use crate::graph::Configuration;
use crate::parser::{Dialect, Scan};

/// Map a scanned tree into the configuration's collections.
pub fn map_scan(scan: &Scan, config: &mut Configuration) {
    let unmodelled = match scan.dialect {
        Dialect::EditSet => edit_set::map(&scan.root, config),
        Dialect::Braced => braced::map(&scan.root, config),
    };
    config.add_skipped(scan.skipped + unmodelled);
}
