use anyhow::Result;

use crate::error::Error;
use crate::prompt::Prompter;

/// Anything with a display name that can be matched against.
pub trait Named {
    fn name(&self) -> &str;
}

/// Resolve a user-typed fragment to one item by case-insensitive substring
/// match, preserving haystack order. One hit is returned directly; several
/// hits go through a 1-indexed menu on the prompter; none is a `NoMatch`
/// error carrying every available name for the caller to print.
pub fn fuzzy_match<'a, T: Named>(
    needle: &str,
    haystack: &'a [T],
    prompter: &mut dyn Prompter,
) -> Result<&'a T> {
    let lowered = needle.to_lowercase();
    let matches: Vec<&T> = haystack
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&lowered))
        .collect();

    match matches.len() {
        0 => Err(Error::NoMatch {
            needle: needle.to_string(),
            available: haystack.iter().map(|item| item.name().to_string()).collect(),
        }
        .into()),
        1 => Ok(matches[0]),
        _ => {
            println!("\nMultiple matches found for '{needle}':");
            for (i, item) in matches.iter().enumerate() {
                println!("{}. {}", i + 1, item.name());
            }
            let index = prompter.select("Select number", matches.len())?;
            Ok(matches[index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    #[derive(Debug)]
    struct Item(&'static str);

    impl Named for Item {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let items = [Item("fcas-service")];
        let mut prompter = ScriptedPrompter::new(&[]);
        let found = fuzzy_match("FCAS", &items, &mut prompter).unwrap();
        assert_eq!(found.name(), "fcas-service");
    }

    #[test]
    fn single_hit_returns_without_prompting() {
        let items = [Item("todo"), Item("testing"), Item("done")];
        // No scripted answers: any prompt would fail the test.
        let mut prompter = ScriptedPrompter::new(&[]);
        let found = fuzzy_match("don", &items, &mut prompter).unwrap();
        assert_eq!(found.name(), "done");
    }

    #[test]
    fn zero_hits_lists_every_available_name() {
        let items = [Item("a"), Item("b")];
        let mut prompter = ScriptedPrompter::new(&[]);
        let err = fuzzy_match("zzz", &items, &mut prompter).unwrap_err();
        match err.downcast::<Error>().unwrap() {
            Error::NoMatch { needle, available } => {
                assert_eq!(needle, "zzz");
                assert_eq!(available, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("expected no-match error, got {other:?}"),
        }
    }

    #[test]
    fn multiple_hits_honor_the_selection() {
        let items = [Item("testing"), Item("test2")];
        let mut prompter = ScriptedPrompter::new(&["2"]);
        let found = fuzzy_match("test", &items, &mut prompter).unwrap();
        assert_eq!(found.name(), "test2");
    }

    #[test]
    fn multiple_hits_preserve_haystack_order() {
        let items = [Item("retest"), Item("testing"), Item("untested")];
        let mut prompter = ScriptedPrompter::new(&["1"]);
        let found = fuzzy_match("test", &items, &mut prompter).unwrap();
        assert_eq!(found.name(), "retest");
    }

    #[test]
    fn out_of_range_selection_is_a_user_input_error() {
        let items = [Item("testing"), Item("test2")];
        let mut prompter = ScriptedPrompter::new(&["5"]);
        let err = fuzzy_match("test", &items, &mut prompter).unwrap_err();
        let err = err.downcast::<Error>().unwrap();
        assert!(matches!(err, Error::UserInput { max: 2, .. }));
    }

    #[test]
    fn non_numeric_selection_is_a_user_input_error() {
        let items = [Item("testing"), Item("test2")];
        let mut prompter = ScriptedPrompter::new(&["first"]);
        let err = fuzzy_match("test", &items, &mut prompter).unwrap_err();
        assert!(err.to_string().contains("invalid selection"));
    }
}
