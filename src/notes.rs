use uuid::Uuid;

/// A note embedded in its owner's user record
///
/// Notes have no life of their own, there is no global note namespace
#[derive(Clone, Debug)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}
