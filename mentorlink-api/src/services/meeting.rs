//! Meeting link boundary
//!
//! The video service itself is external; appointments only need an opaque
//! URL at creation time.

use uuid::Uuid;

/// Generate an opaque meeting URL for a new appointment
pub fn generate_meeting_url() -> String {
    format!("https://meet.mentorlink.example/{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_unique() {
        assert_ne!(generate_meeting_url(), generate_meeting_url());
    }
}
