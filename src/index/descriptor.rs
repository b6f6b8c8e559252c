//! Pack descriptor entries listed in the index.

use std::fmt;

/// One `pdsc` entry of the pack index.
///
/// Descriptors are immutable once parsed. The resolvable descriptor URL is
/// derived from `url`, `vendor` and `name` on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageDescriptor {
    url: String,
    vendor: String,
    name: String,
    version: String,
}

impl PackageDescriptor {
    /// Create a descriptor from its index attributes.
    pub fn new(
        url: impl Into<String>,
        vendor: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            vendor: vendor.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Base URL the pack is published under.
    pub fn source_url(&self) -> &str {
        &self.url
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// File name of the descriptor, `{vendor}.{name}.pdsc`.
    pub fn file_name(&self) -> String {
        format!("{}.{}.pdsc", self.vendor, self.name)
    }

    /// URL of the `.pdsc` file this entry points at.
    ///
    /// The source URL is treated as a directory: a trailing `/` is added
    /// when missing and never doubled.
    pub fn resolved_url(&self) -> String {
        let mut resolved = String::with_capacity(self.url.len() + self.file_name().len() + 1);
        resolved.push_str(&self.url);
        if !self.url.ends_with('/') {
            resolved.push('/');
        }
        resolved.push_str(&self.file_name());
        resolved
    }
}

impl fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.vendor, self.name, self.version)
    }
}
