//! Integration smoke tests for `ects_tracker`

use ects_tracker::core::catalog::Catalog;
use ects_tracker::core::models::MathCredits;
use ects_tracker::get_version;

#[test]
fn version_is_not_empty() {
    assert!(!get_version().trim().is_empty());
}

#[test]
fn standard_catalog_totals() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.total_credits(MathCredits::Nine), 75);
    assert_eq!(catalog.total_credits(MathCredits::Six), 72);
}
