//! The compiler pipeline.
//!
//! Stages run in a fixed order:
//! remove comments → compress → remove modifiers → validate → deduplicate,
//! followed by wildcard exclusions when any are configured.

use ahash::AHashSet;
use std::hash::Hash;

use crate::error::Result;
use crate::rule::Grammar;
use crate::source::{split_lines, SourceFetcher};
use crate::transform::{
    Compress, Deduplicate, Exclude, RemoveComments, RemoveModifiers, Transformation, Validate,
};
use crate::wildcard::Wildcard;

/// An ordered list of transformations.
pub struct Pipeline<'g> {
    stages: Vec<Box<dyn Transformation + 'g>>,
}

impl Pipeline<'static> {
    /// The standard pipeline using the shared grammar.
    pub fn new() -> Self {
        Self::with_grammar(Grammar::shared())
    }

    /// The standard pipeline plus an exclusion stage.
    pub fn with_exclusions(exclusions: Vec<Wildcard>) -> Self {
        let mut pipeline = Self::new();
        let exclude = Exclude::new(exclusions);
        if !exclude.is_empty() {
            pipeline.stages.push(Box::new(exclude));
        }
        pipeline
    }
}

impl Default for Pipeline<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g> Pipeline<'g> {
    /// The standard pipeline using the given grammar.
    pub fn with_grammar(grammar: &'g Grammar) -> Self {
        Self {
            stages: vec![
                Box::new(RemoveComments),
                Box::new(Compress::new(grammar)),
                Box::new(RemoveModifiers::new(grammar)),
                Box::new(Validate::new(grammar)),
                Box::new(Deduplicate),
            ],
        }
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage. Never fails: bad lines are dropped or kept verbatim.
    pub fn run(&self, rules: Vec<String>) -> Vec<String> {
        self.stages.iter().fold(rules, |rules, stage| {
            let start = rules.len();
            let out = stage.apply(rules);
            log::info!("{} - start: {}\tend: {}", stage.name(), start, out.len());
            out
        })
    }
}

/// Run the standard pipeline over raw lines.
pub fn run_pipeline(rules: Vec<String>) -> Vec<String> {
    Pipeline::new().run(rules)
}

/// Remove duplicates, keeping the first occurrence of each item.
pub fn dedupe_sources<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = AHashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Fetch every source in order, concatenate their lines and run the pipeline.
///
/// Any fetch failure aborts the whole run.
pub fn compile_sources<F: SourceFetcher + ?Sized>(
    sources: &[String],
    fetcher: &F,
    pipeline: &Pipeline<'_>,
) -> Result<Vec<String>> {
    let mut rules = Vec::new();

    for source in sources {
        let content = fetcher.fetch(source)?;
        let before = rules.len();
        rules.extend(split_lines(&content));
        log::info!("Loaded {} lines from {}", rules.len() - before, source);
    }

    Ok(pipeline.run(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(
            Pipeline::new().stage_names(),
            vec!["removecomments", "compress", "removemodifiers", "validate", "deduplicate"]
        );
    }

    #[test]
    fn test_exclusions_stage_is_optional() {
        assert_eq!(Pipeline::with_exclusions(Vec::new()).stage_names().len(), 5);
        let pipeline = Pipeline::with_exclusions(vec![Wildcard::new("ads").unwrap()]);
        assert_eq!(pipeline.stage_names().last(), Some(&"exclude"));
    }

    #[test]
    fn test_run_pipeline() {
        let input = lines(&[
            "! Title: test",
            "0.0.0.0 ads.example.com tracker.example.net",
            "||example.com^$third-party",
            "||example.com^",
            "||a^",
            "||example.org^$script",
            "example.net",
            "@@||good.example.com^$important",
        ]);
        assert_eq!(
            run_pipeline(input),
            lines(&["||example.com^", "||example.net^", "@@||good.example.com^$important"])
        );
    }

    #[test]
    fn test_custom_grammar() {
        let grammar = Grammar::new();
        let pipeline = Pipeline::with_grammar(&grammar);
        assert_eq!(pipeline.run(lines(&["a.com", "b.a.com"])), lines(&["||a.com^"]));
    }

    #[test]
    fn test_dedupe_sources() {
        assert_eq!(
            dedupe_sources(lines(&["a.txt", "b.txt", "a.txt", "c.txt", "b.txt"])),
            lines(&["a.txt", "b.txt", "c.txt"])
        );
    }
}
