use crate::models::Member;

/// Case-insensitive substring match over name or email. The query is matched
/// as typed, whitespace included; an empty one keeps the list as-is, in order.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return members.iter().collect();
    }

    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle) || m.email_id.to_lowercase().contains(&needle)
        })
        .collect()
}
