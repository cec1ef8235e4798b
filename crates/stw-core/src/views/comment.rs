/// Controlled comment editor.
///
/// The comment text is owned by the caller; the editor only reports whether
/// its action button may be pressed.
#[derive(Debug, Clone, Copy)]
pub struct CommentEditor<'a> {
    comment: &'a str,
}

impl<'a> CommentEditor<'a> {
    #[must_use]
    pub const fn new(comment: &'a str) -> Self {
        Self { comment }
    }

    #[must_use]
    pub const fn comment(&self) -> &'a str {
        self.comment
    }

    /// The action is disabled exactly when the comment is empty.
    ///
    /// Whitespace counts as content.
    #[must_use]
    pub const fn action_disabled(&self) -> bool {
        self.comment.is_empty()
    }
}
