use regex::Regex;
use std::sync::OnceLock;

/// Parameters extracted from a guided "create a pull request" prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrArgs {
    pub branch_name: String,
    pub title: String,
    pub body: String,
}

static CREATE_PR: OnceLock<Regex> = OnceLock::new();

fn create_pr_pattern() -> &'static Regex {
    CREATE_PR.get_or_init(|| {
        Regex::new(
            r#"(?i)create a pr in (\S+) with branch "([^"]+)", title "([^"]+)", and body "([^"]+)""#,
        )
        .expect("create-pr pattern is a valid regex")
    })
}

/// Extracts create-PR parameters when the prompt uses the guided phrasing
/// shown in the Help tab. Matching is case-insensitive; any other prompt
/// passes through to the backend untouched.
///
/// This is one named parser; further guided intents get their own parser
/// beside it rather than growing this pattern.
pub fn parse_create_pr(prompt: &str) -> Option<CreatePrArgs> {
    let captures = create_pr_pattern().captures(prompt)?;
    Some(CreatePrArgs {
        branch_name: captures[2].to_string(),
        title: captures[3].to_string(),
        body: captures[4].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::parse_create_pr;

    #[test]
    fn extracts_branch_title_and_body() {
        let args = parse_create_pr(
            r#"create a pr in acme/repo with branch "feat-x", title "Add X", and body "desc""#,
        )
        .expect("guided phrasing should match");
        assert_eq!(args.branch_name, "feat-x");
        assert_eq!(args.title, "Add X");
        assert_eq!(args.body, "desc");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let args = parse_create_pr(
            r#"Create a PR in acme/repo with branch "main", title "T", and body "B""#,
        )
        .expect("uppercase phrasing should match");
        assert_eq!(args.branch_name, "main");
    }

    #[test]
    fn returns_none_for_ordinary_prompts() {
        assert!(parse_create_pr("show open pull requests for acme/repo").is_none());
        assert!(parse_create_pr("create a pr in acme/repo").is_none());
    }
}
