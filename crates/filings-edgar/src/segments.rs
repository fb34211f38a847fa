//! Segment revenue: joining facts to contexts, period selection and dedup.

use crate::classify::classify_segment_type;
use chrono::NaiveDate;
use filings_core::{Dimension, RevenueFact, Segment, SegmentSet, XbrlContext};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Axis used by filers for operating (business-line) segments.
pub const BUSINESS_SEGMENT_AXIS: &str = "StatementBusinessSegmentsAxis";

/// Member name suffixes stripped during cleaning, longest first.
const MEMBER_SUFFIXES: &[&str] = &["SegmentMember", "Member", "Segment"];

/// Turn a member QName into a human-readable segment name.
///
/// `aapl:GreaterChinaSegmentMember` → `Greater China`. Idempotent.
#[must_use]
pub fn clean_segment_name(member: &str) -> String {
    let mut name = member.rsplit_once(':').map_or(member, |(_, local)| local).trim();

    'strip: loop {
        for suffix in MEMBER_SUFFIXES {
            if let Some(stripped) = name.strip_suffix(suffix).map(str::trim_end)
                && !stripped.is_empty()
            {
                name = stripped;
                continue 'strip;
            }
        }
        break;
    }

    let mut cleaned = String::with_capacity(name.len() + 8);
    let mut previous: Option<char> = None;
    for c in name.chars() {
        if previous.is_some_and(char::is_lowercase) && c.is_uppercase() {
            cleaned.push(' ');
        }
        cleaned.push(c);
        previous = Some(c);
    }
    cleaned
}

/// A fact that survived the context join.
#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    revenue: f64,
    end: NaiveDate,
    business_axis: bool,
    /// Index of the concept in the priority list.
    priority: usize,
    dimension_count: usize,
}

/// Choose the dimension a fact is attributed to.
///
/// The business-segment axis wins; otherwise only single-dimension contexts are
/// unambiguous.
fn segment_dimension(context: &XbrlContext) -> Option<(&Dimension, bool)> {
    if let Some(dimension) = context
        .dimensions
        .iter()
        .find(|d| d.axis.contains(BUSINESS_SEGMENT_AXIS))
    {
        return Some((dimension, true));
    }
    match context.dimensions.as_slice() {
        [only] => Some((only, false)),
        _ => None,
    }
}

/// Most frequent end date; ties go to the latest date.
fn most_common_end(candidates: &[Candidate]) -> Option<NaiveDate> {
    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for candidate in candidates {
        *counts.entry(candidate.end).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(end, _)| end)
}

/// Keep the annual column: facts ending on `target` if any do, else the modal end date.
fn select_period(candidates: Vec<Candidate>, target: Option<NaiveDate>) -> Vec<Candidate> {
    let period = target
        .filter(|target| candidates.iter().any(|c| c.end == *target))
        .or_else(|| most_common_end(&candidates));

    match period {
        Some(period) => {
            debug!(period = %period, "Selected segment reporting period");
            candidates.into_iter().filter(|c| c.end == period).collect()
        }
        None => candidates,
    }
}

/// Keep one candidate per cleaned name: highest-priority concept, then fewest dimensions,
/// then first in document order.
fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        match positions.get(&candidate.name) {
            Some(&index) => {
                let existing = &kept[index];
                if (candidate.priority, candidate.dimension_count)
                    < (existing.priority, existing.dimension_count)
                {
                    trace!(segment = %candidate.name, "Replacing lower-priority segment value");
                    kept[index] = candidate;
                }
            }
            None => {
                positions.insert(candidate.name.clone(), kept.len());
                kept.push(candidate);
            }
        }
    }
    kept
}

/// Join revenue facts to their contexts and aggregate a segment breakdown.
///
/// 1. Facts without a matching context, or on an instant context, are dropped.
/// 2. Each fact is attributed to its business-segment dimension, or to its only dimension.
///    Facts on multi-dimension contexts without a business-segment axis are dropped.
/// 3. If any fact used the business-segment axis, only those facts are kept.
/// 4. One reporting period is kept (see `target_end`).
/// 5. Duplicates by cleaned name keep the value from the highest-priority concept in
///    `concepts`.
/// 6. Segments are sorted by revenue, largest first, then classified.
///
/// `target_end` is the filing's fiscal-year-end; when absent or unmatched the most frequent
/// end date in the working set is used.
#[must_use]
pub fn aggregate_segments(
    facts: &[RevenueFact],
    contexts: &[XbrlContext],
    concepts: &[&str],
    target_end: Option<NaiveDate>,
) -> SegmentSet {
    let by_id: HashMap<&str, &XbrlContext> = contexts
        .iter()
        .map(|context| (context.context_id.as_str(), context))
        .collect();

    let mut candidates: Vec<Candidate> = facts
        .iter()
        .filter_map(|fact| {
            let context = by_id.get(fact.context_ref.as_str())?;
            if context.is_instant() {
                return None;
            }
            let (dimension, business_axis) = segment_dimension(context)?;
            Some(Candidate {
                name: clean_segment_name(&dimension.member),
                revenue: fact.value,
                end: context.end_date(),
                business_axis,
                priority: concepts
                    .iter()
                    .position(|c| *c == fact.concept)
                    .unwrap_or(usize::MAX),
                dimension_count: context.dimensions.len(),
            })
        })
        .collect();

    if candidates.iter().any(|c| c.business_axis) {
        candidates.retain(|c| c.business_axis);
    }

    let candidates = dedup(select_period(candidates, target_end));

    let mut segments: Vec<Segment> = candidates
        .into_iter()
        .filter(|c| !c.name.is_empty())
        .map(|c| Segment::new(c.name, c.revenue))
        .collect();
    segments.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));

    let segment_type = classify_segment_type(&segments);
    debug!(count = segments.len(), %segment_type, "Aggregated segments");
    SegmentSet {
        segments,
        segment_type,
    }
}
