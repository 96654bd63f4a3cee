/// A release as reported by the release repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    /// Forge-assigned identifier used for updates.
    pub id: u64,
    pub tag: String,
    pub title: String,
    pub body: String,
    pub is_draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a new release.
pub struct CreateReleaseRequest {
    pub tag: String,
    pub title: String,
    pub body: String,
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to update an existing release in place.
pub struct UpdateReleaseRequest {
    pub id: u64,
    /// Tag of the release being updated, kept for logging and dry runs.
    pub tag: String,
    pub title: String,
    pub body: String,
    pub draft: bool,
}

impl UpdateReleaseRequest {
    /// Replace the body of `record`, keeping its title and tag.
    pub fn replace_body(record: &ReleaseRecord, body: String) -> Self {
        Self {
            id: record.id,
            tag: record.tag.clone(),
            title: record.title.clone(),
            body,
            draft: true,
        }
    }
}
