/// Result of a downstream call: the HTTP status plus the decoded payload, if
/// the call succeeded and carried one.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub content: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, content: Option<T>) -> Self {
        Self { status, content }
    }

    pub fn ok(content: T) -> Self {
        Self::new(200, Some(content))
    }

    /// A response with no payload, e.g. a 404 or a 204.
    pub fn status_only(status: u16) -> Self {
        Self::new(status, None)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}
