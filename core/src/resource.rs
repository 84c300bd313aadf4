//! Object types addressable under the CRM objects root.

/// Supplies the path segment an object type appends to the objects root.
///
/// `ObjectClient` is parameterized by one of these, so adding an object type
/// means adding a resource rather than a new client.
pub trait ObjectResource {
    /// Segment appended to the objects root, including its trailing slash.
    /// Empty for the root itself.
    fn path_segment(&self) -> &str;
}

/// The bare objects root.
#[derive(Debug, Clone, Copy, Default)]
pub struct Objects;

impl ObjectResource for Objects {
    fn path_segment(&self) -> &str {
        ""
    }
}

/// `/crm/v3/objects/companies/`
#[derive(Debug, Clone, Copy, Default)]
pub struct Companies;

impl ObjectResource for Companies {
    fn path_segment(&self) -> &str {
        "companies/"
    }
}
