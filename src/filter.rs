//! Vendor selection.
//!
//! Reduces the descriptors of an index to those published by the monitored
//! vendors. Matching is case-insensitive; the `*` token selects everything.

use crate::index::{IndexSnapshot, PackageDescriptor};

/// Token that selects every vendor.
pub const WILDCARD: &str = "*";

/// Vendor monitored when none is configured.
pub const DEFAULT_VENDOR: &str = "Keil";

/// The set of vendors whose packs are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSet {
    vendors: Vec<String>,
    all: bool,
}

impl VendorSet {
    /// Build a set from vendor names.
    ///
    /// Names are trimmed and compared case-insensitively. Blank names are
    /// ignored. Any `*` entry turns the set into a wildcard.
    pub fn new<I, S>(vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            vendors: Vec::new(),
            all: false,
        };

        for vendor in vendors {
            let vendor = vendor.as_ref().trim();
            if vendor == WILDCARD {
                set.all = true;
            } else if !vendor.is_empty() {
                let folded = vendor.to_lowercase();
                if !set.vendors.contains(&folded) {
                    set.vendors.push(folded);
                }
            }
        }

        set
    }

    /// A set that selects every vendor.
    pub fn all() -> Self {
        Self::new([WILDCARD])
    }

    /// Whether the wildcard was given.
    pub fn is_all(&self) -> bool {
        self.all
    }

    /// Whether no vendor at all would be selected.
    pub fn is_empty(&self) -> bool {
        !self.all && self.vendors.is_empty()
    }

    /// Folded vendor names, in the order first given.
    pub fn vendors(&self) -> &[String] {
        &self.vendors
    }

    /// Whether a vendor name is selected.
    pub fn matches(&self, vendor: &str) -> bool {
        self.all || self.vendors.contains(&vendor.trim().to_lowercase())
    }

    /// Keep the descriptors of selected vendors, in their original order.
    pub fn filter(&self, descriptors: &[PackageDescriptor]) -> Vec<PackageDescriptor> {
        descriptors
            .iter()
            .filter(|d| self.matches(d.vendor()))
            .cloned()
            .collect()
    }
}

impl Default for VendorSet {
    fn default() -> Self {
        Self::new([DEFAULT_VENDOR])
    }
}

/// Reduce a snapshot to the descriptors of the selected vendors.
pub fn apply(snapshot: IndexSnapshot, vendors: &VendorSet) -> Vec<PackageDescriptor> {
    if vendors.is_all() {
        return snapshot.into_descriptors();
    }
    snapshot
        .into_descriptors()
        .into_iter()
        .filter(|d| vendors.matches(d.vendor()))
        .collect()
}
