//! RemappingOptimizer - Search attribute allocations for the fastest plan

use super::result::{RemapStage, RemappingResult};
use crate::attributes::{AttributeScratchpad, RemapError};
use crate::character::CharacterState;
use crate::config::{RemapRules, TrainingConstants};
use crate::plan::ResolvedPlan;
use crate::skill::SkillCatalog;
use crate::training::{hours_to_duration, TrainingTimeCalculator};
use crate::types::ATTRIBUTE_COUNT;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::time::Duration;

/// 365 days, the usual optimization horizon
pub const ONE_YEAR: Duration = Duration::from_secs(365 * 24 * 3600);

/// Finds the base attribute allocation that trains a plan fastest
///
/// The search enumerates every allocation that spends the whole pool within
/// floor and ceiling. Adding a point never slows training, so nothing
/// cheaper can win outright. Among equally fast allocations the one closest
/// to the current bases (Manhattan distance) wins, then the lowest bases in
/// attribute order.
#[derive(Debug, Clone)]
pub struct RemappingOptimizer<'a> {
    calculator: TrainingTimeCalculator<'a>,
    character: &'a CharacterState,
    plan: ResolvedPlan,
}

impl<'a> RemappingOptimizer<'a> {
    pub fn new(
        catalog: &'a SkillCatalog,
        constants: &'a TrainingConstants,
        character: &'a CharacterState,
        plan: ResolvedPlan,
    ) -> Self {
        RemappingOptimizer {
            calculator: TrainingTimeCalculator::new(catalog, constants),
            character,
            plan,
        }
    }

    /// Only optimize for goals that start within `horizon` under current attributes
    pub fn with_horizon(mut self, horizon: Duration) -> Self {
        let limit = horizon.as_secs_f64() / 3600.0;
        let base = self.base_scratchpad();
        let starts = self
            .calculator
            .goal_start_hours(self.character, &self.plan, &base);
        let keep = starts.iter().take_while(|&&start| start < limit).count();
        tracing::debug!(
            "Horizon of {:.0}h keeps {} of {} goals",
            limit,
            keep,
            self.plan.len()
        );
        self.plan = self.plan.truncated(keep);
        self
    }

    pub fn plan(&self) -> &ResolvedPlan {
        &self.plan
    }

    pub fn rules(&self) -> RemapRules {
        self.calculator.constants().remap
    }

    /// The character's live attributes, in remap mode
    pub fn base_scratchpad(&self) -> AttributeScratchpad {
        self.character
            .scratchpad(self.calculator.catalog())
            .in_remap_mode(self.rules())
    }

    /// Current attributes with their plan duration; nothing searched
    pub fn initial(&self) -> RemappingResult {
        let base = self.base_scratchpad();
        let duration = if self.plan.is_empty() {
            Duration::ZERO
        } else {
            hours_to_duration(self.hours(&base))
        };
        RemappingResult::unchanged(RemapStage::Initial, base, duration)
    }

    /// Search every allocation and keep the fastest
    ///
    /// Never returns a result slower than valid current attributes: if no
    /// candidate is strictly faster, the current attributes are returned.
    /// Current attributes outside the remap rules cannot be kept, so the
    /// fastest in-bounds allocation is returned even when it is slower.
    ///
    /// Remap points stored in the plan take effect during evaluation;
    /// placeholder points keep the bases in force.
    pub fn optimize(&self) -> RemappingResult {
        let base = self.base_scratchpad();
        if self.plan.is_empty() && base.validate(&self.rules()).is_ok() {
            return RemappingResult::unchanged(RemapStage::Initial, base, Duration::ZERO);
        }
        self.solve(base, |pad| self.hours(pad))
    }

    /// Solve every remap point of the plan, in order
    ///
    /// Each point is optimized for the goals up to the next point, starting
    /// from the bases in force when it is reached. Returns the plan with the
    /// chosen bases stored on its points, and one result per point.
    pub fn optimize_remap_points(&self) -> (ResolvedPlan, Vec<RemapPointResult>) {
        let start = self.base_scratchpad();
        let mut plan = self.plan.clone();
        let points = plan.remap_points();
        let mut results = Vec::with_capacity(points.len());

        for (n, &goal) in points.iter().enumerate() {
            let end = points.get(n + 1).copied().unwrap_or(plan.len());
            let section = plan.truncated(end);
            let (start_hours, current) =
                self.calculator
                    .state_before(self.character, &section, &start, goal);
            let current = current.in_remap_mode(self.rules());

            let result = self.solve(current, |pad| {
                let mut trial = section.clone();
                trial.set_remap_bases(goal, pad.bases());
                let total = self.calculator.plan_hours(self.character, &trial, &start);
                (total - start_hours).max(0.0)
            });
            tracing::debug!(
                "Remap point before goal {} set to {:?}",
                goal,
                result.best_scratchpad.bases()
            );
            plan.set_remap_bases(goal, result.best_scratchpad.bases());
            results.push(RemapPointResult { goal, result });
        }
        (plan, results)
    }

    /// Evaluate one user supplied allocation, without searching
    ///
    /// The allocation must respect the remap rules. It may be slower than the
    /// current attributes.
    pub fn evaluate(&self, bases: [i32; ATTRIBUTE_COUNT]) -> Result<RemappingResult, RemapError> {
        let base = self.base_scratchpad();
        let proposed = base.with_bases(bases);
        proposed.validate(&self.rules())?;

        let mut result = RemappingResult {
            stage: RemapStage::Manual,
            best_scratchpad: proposed,
            base_scratchpad: base,
            base_duration: Duration::ZERO,
            best_duration: Duration::ZERO,
        };
        self.update(&mut result)?;
        Ok(result)
    }

    /// Recompute both durations of `result` for its current scratchpads
    ///
    /// Used after the proposed bases were edited in place.
    pub fn update(&self, result: &mut RemappingResult) -> Result<(), RemapError> {
        result.best_scratchpad.validate(&self.rules())?;
        if self.plan.is_empty() {
            result.base_duration = Duration::ZERO;
            result.best_duration = Duration::ZERO;
            return Ok(());
        }
        result.base_duration = hours_to_duration(self.hours(&result.base_scratchpad));
        result.best_duration = hours_to_duration(self.hours(&result.best_scratchpad));
        Ok(())
    }

    fn hours(&self, attributes: &AttributeScratchpad) -> f64 {
        self.calculator
            .plan_hours(self.character, &self.plan, attributes)
    }

    /// Search the candidate allocations for the fastest under `evaluate`
    fn solve<F>(&self, current: AttributeScratchpad, evaluate: F) -> RemappingResult
    where
        F: Fn(&AttributeScratchpad) -> f64 + Sync,
    {
        let rules = self.rules();
        let valid = match current.validate(&rules) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Current attributes are outside the remap rules: {}", e);
                false
            }
        };

        let base_hours = evaluate(&current);
        if valid && rules.pool <= 0 {
            return RemappingResult::unchanged(
                RemapStage::Optimized { candidates: 0 },
                current,
                hours_to_duration(base_hours),
            );
        }

        let limit = self.calculator.constants().search.max_candidates;
        let mut candidates = candidate_allocations(&rules, limit);
        if candidates.len() == limit {
            tracing::warn!("Remap search capped at {} candidates", limit);
        }
        if candidates.is_empty() {
            candidates.push([rules.floor; ATTRIBUTE_COUNT]);
        }

        let best = candidates
            .par_iter()
            .map(|bases| {
                let pad = current.with_bases(*bases);
                Candidate {
                    hours: evaluate(&pad),
                    distance: pad.base_distance(&current),
                    bases: *bases,
                }
            })
            .min_by(Candidate::compare);

        let stage = RemapStage::Optimized {
            candidates: candidates.len(),
        };
        match best {
            Some(best) if !valid || best.hours < base_hours => {
                tracing::debug!(
                    "Remap search over {} candidates: {:?} trains in {:.1}h instead of {:.1}h",
                    candidates.len(),
                    best.bases,
                    best.hours,
                    base_hours
                );
                RemappingResult {
                    stage,
                    best_scratchpad: current.with_bases(best.bases),
                    base_scratchpad: current,
                    base_duration: hours_to_duration(base_hours),
                    best_duration: hours_to_duration(best.hours),
                }
            }
            _ => {
                tracing::debug!(
                    "Remap search over {} candidates found nothing faster than current attributes",
                    candidates.len()
                );
                RemappingResult::unchanged(stage, current, hours_to_duration(base_hours))
            }
        }
    }
}

/// The allocation chosen for one remap point
#[derive(Debug, Clone, PartialEq)]
pub struct RemapPointResult {
    /// Index of the goal the point precedes
    pub goal: usize,
    pub result: RemappingResult,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    hours: f64,
    distance: i32,
    bases: [i32; ATTRIBUTE_COUNT],
}

impl Candidate {
    fn compare(a: &Candidate, b: &Candidate) -> Ordering {
        a.hours
            .total_cmp(&b.hours)
            .then(a.distance.cmp(&b.distance))
            .then(a.bases.cmp(&b.bases))
    }
}

/// Every allocation spending the full pool within floor and ceiling
///
/// When the pool exceeds what five attributes can hold, every attribute sits
/// at the ceiling. At most `limit` allocations are returned.
pub fn candidate_allocations(rules: &RemapRules, limit: usize) -> Vec<[i32; ATTRIBUTE_COUNT]> {
    let span = rules.per_attribute_span();
    let spend = rules.pool.min(span * ATTRIBUTE_COUNT as i32);
    let mut out = Vec::new();
    if spend < 0 || limit == 0 {
        return out;
    }
    let mut current = [rules.floor; ATTRIBUTE_COUNT];
    fill_allocations(0, spend, span, rules.floor, &mut current, &mut out, limit);
    out
}

fn fill_allocations(
    slot: usize,
    remaining: i32,
    span: i32,
    floor: i32,
    current: &mut [i32; ATTRIBUTE_COUNT],
    out: &mut Vec<[i32; ATTRIBUTE_COUNT]>,
    limit: usize,
) {
    if out.len() >= limit {
        return;
    }
    if slot == ATTRIBUTE_COUNT - 1 {
        if remaining <= span {
            current[slot] = floor + remaining;
            out.push(*current);
        }
        return;
    }
    // Later slots can absorb at most this many points
    let capacity_after = span * (ATTRIBUTE_COUNT - slot - 1) as i32;
    let low = (remaining - capacity_after).max(0);
    let high = remaining.min(span);
    for extra in low..=high {
        current[slot] = floor + extra;
        fill_allocations(slot + 1, remaining - extra, span, floor, current, out, limit);
    }
}
