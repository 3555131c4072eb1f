//! Fixed user-facing answers.
//!
//! Every non-summary outcome of a question resolves to one of these strings.

use crate::types::Intent;

pub const NO_NAME: &str = "Sorry, I couldn't identify the team member's name.";

pub const FETCH_FAILED: &str =
    "Something went wrong while fetching data, Please give a try again...";

pub fn unknown_member(name: &str) -> String {
    format!("I don't have records for {}.", name)
}

pub fn unrecognized_intent(name: &str) -> String {
    format!(
        "I couldn't tell what you want to know about {}. Ask about their Jira issues, \
         GitHub commits and pull requests, or overall activity.",
        name
    )
}

pub fn no_activity(intent: Intent, name: &str) -> String {
    match intent {
        Intent::Jira => format!("There are no active Jira issues assigned to {}.", name),
        Intent::Github => format!(
            "There are no recent GitHub commits or pull requests by {}.",
            name
        ),
        Intent::Both => format!("{} has no recent activity on Jira or GitHub.", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_activity_messages() {
        assert_eq!(
            no_activity(Intent::Jira, "marvan"),
            "There are no active Jira issues assigned to marvan."
        );
        assert_eq!(
            no_activity(Intent::Github, "marvan"),
            "There are no recent GitHub commits or pull requests by marvan."
        );
        assert_eq!(
            no_activity(Intent::Both, "marvan"),
            "marvan has no recent activity on Jira or GitHub."
        );
    }

    #[test]
    fn test_unknown_member() {
        assert_eq!(unknown_member("unknown"), "I don't have records for unknown.");
    }
}
