//! Matching runtime contexts against section contexts
//!
//! A section context matches a runtime context when every dimension it
//! constrains is present in the runtime context with an equal value.
//! Dimensions the section does not mention are unconstrained, so the empty
//! context matches everything. Values are compared for equality only; there
//! is no notion of one value being a refinement of another.
//!
//! [`Matcher`] lets the resolver precompute per-section work at
//! construction time. Two strategies are provided and always agree:
//! [`SimpleMatcher`] checks each section directly, [`TokenMatcher`]
//! precomputes fixed-width section tokens and turns matching into a set
//! lookup.

use crate::section::Section;
use ctxfig_predicate::Context;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Whether `section` is satisfied by `run`.
///
/// ```
/// use ctxfig_core::context_matches;
/// use ctxfig_predicate::Context;
///
/// let run = Context::from([("env", "dev"), ("colo", "east")]);
/// assert!(context_matches(&Context::new(), &run));
/// assert!(context_matches(&Context::from([("env", "dev")]), &run));
/// assert!(!context_matches(&Context::from([("env", "prod")]), &run));
/// assert!(!context_matches(&Context::from([("runtime", "server")]), &run));
/// ```
pub fn context_matches(section: &Context, run: &Context) -> bool {
    section
        .iter()
        .all(|(dimension, value)| run.get(dimension) == Some(value))
}

/// Sections whose context is satisfied by `run`, in their original order.
pub fn filter<'a>(sections: &'a [Section], run: &'a Context) -> impl Iterator<Item = &'a Section> {
    sections
        .iter()
        .filter(move |section| context_matches(section.context(), run))
}

/// A matching strategy.
///
/// The resolver builds one matcher from its section list, tokenizes every
/// section once, then tokenizes each runtime context once per request.
pub trait Matcher: Send + Sync + Sized {
    /// Precomputed form of a section context.
    type SectionToken: Send + Sync;

    /// Precomputed form of a runtime context, alive for one request.
    type RunToken<'a>
    where
        Self: 'a;

    /// Build the matcher for a fixed set of sections.
    fn from_sections(sections: &[Section]) -> Self;

    fn tokenize_section(&self, context: &Context) -> Self::SectionToken;

    fn tokenize_run<'a>(&'a self, context: &'a Context) -> Self::RunToken<'a>;

    fn matches(&self, section: &Self::SectionToken, run: &Self::RunToken<'_>) -> bool;
}

/// Direct subset check per section.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMatcher;

impl Matcher for SimpleMatcher {
    type SectionToken = Context;
    type RunToken<'a> = &'a Context;

    fn from_sections(_sections: &[Section]) -> Self {
        SimpleMatcher
    }

    fn tokenize_section(&self, context: &Context) -> Context {
        context.clone()
    }

    fn tokenize_run<'a>(&'a self, context: &'a Context) -> &'a Context {
        context
    }

    fn matches(&self, section: &Context, run: &&Context) -> bool {
        context_matches(section, run)
    }
}

/// Value id meaning "dimension not constrained".
const UNCONSTRAINED: u32 = 0;

/// Set-lookup matching over interned dimension values.
///
/// Every dimension used by any section gets a fixed slot. A section token
/// holds, per slot, the id of the required value or [`UNCONSTRAINED`]. A run
/// token is the set of every slot vector the runtime context satisfies:
/// each slot is either the runtime value's id or unconstrained.
///
/// Constraints the matcher was not built from (a dimension or value no
/// section mentions) have no id. They are kept beside the slots and checked
/// against the runtime context directly, so any context tokenizes to the
/// same answer [`context_matches`] gives.
///
/// # Performance
///
/// A run token holds `2^k` vectors, where `k` is the number of runtime
/// dimensions whose values appear somewhere in the document. Each request
/// pays that cost up front, so this matcher only pays off for documents
/// with few dimensions and many sections. Past a dozen or so dimensions
/// [`SimpleMatcher`] is faster.
#[derive(Debug, Clone, Default)]
pub struct TokenMatcher {
    dimensions: Vec<String>,
    /// Per slot, value string to id. Ids start at 1.
    values: Vec<HashMap<String, u32>>,
}

/// Section token of a [`TokenMatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSlots {
    slots: Vec<u32>,
    unindexed: Vec<(String, String)>,
}

impl SectionSlots {
    /// Required value id per slot.
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    /// Constraints with no interned id.
    pub fn unindexed(&self) -> &[(String, String)] {
        &self.unindexed
    }
}

/// Run token of a [`TokenMatcher`].
#[derive(Debug, Clone)]
pub struct RunSlots<'a> {
    tokens: HashSet<Vec<u32>>,
    context: &'a Context,
}

impl RunSlots<'_> {
    /// Number of slot vectors the runtime context satisfies.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenMatcher {
    /// Dimension names in slot order.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Slot and id of an interned `dimension=value` pair.
    fn lookup(&self, dimension: &str, value: &str) -> Option<(usize, u32)> {
        let slot = self
            .dimensions
            .binary_search_by(|known| known.as_str().cmp(dimension))
            .ok()?;
        let id = self.values[slot].get(value)?;
        Some((slot, *id))
    }
}

impl Matcher for TokenMatcher {
    type SectionToken = SectionSlots;
    type RunToken<'a> = RunSlots<'a>;

    fn from_sections(sections: &[Section]) -> Self {
        let dimensions: Vec<String> = sections
            .iter()
            .flat_map(|section| section.context().dimensions())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut values = vec![HashMap::new(); dimensions.len()];
        for section in sections {
            for (slot, dimension) in dimensions.iter().enumerate() {
                if let Some(value) = section.context().get(dimension) {
                    let ids = &mut values[slot];
                    let next_id = ids.len() as u32 + 1;
                    ids.entry(value.to_string()).or_insert(next_id);
                }
            }
        }

        Self { dimensions, values }
    }

    fn tokenize_section(&self, context: &Context) -> SectionSlots {
        let mut slots = vec![UNCONSTRAINED; self.dimensions.len()];
        let mut unindexed = Vec::new();
        for (dimension, value) in context.iter() {
            match self.lookup(dimension, value) {
                Some((slot, id)) => slots[slot] = id,
                None => unindexed.push((dimension.to_string(), value.to_string())),
            }
        }
        SectionSlots { slots, unindexed }
    }

    fn tokenize_run<'a>(&'a self, context: &'a Context) -> RunSlots<'a> {
        let mut tokens = vec![Vec::with_capacity(self.dimensions.len())];
        for (dimension, ids) in self.dimensions.iter().zip(&self.values) {
            // A value no section mentions can only meet unconstrained slots.
            match context.get(dimension).and_then(|value| ids.get(value)) {
                Some(&id) => {
                    let mut with_value = tokens.clone();
                    for token in &mut with_value {
                        token.push(id);
                    }
                    for token in &mut tokens {
                        token.push(UNCONSTRAINED);
                    }
                    tokens.extend(with_value);
                }
                None => {
                    for token in &mut tokens {
                        token.push(UNCONSTRAINED);
                    }
                }
            }
        }
        RunSlots {
            tokens: tokens.into_iter().collect(),
            context,
        }
    }

    fn matches(&self, section: &SectionSlots, run: &RunSlots<'_>) -> bool {
        run.tokens.contains(&section.slots)
            && section
                .unindexed
                .iter()
                .all(|(dimension, value)| run.context.get(dimension) == Some(value.as_str()))
    }
}
