//! Greedy policy extraction.

use std::fmt::Debug;
use std::hash::Hash;

use crate::model::CompiledModel;
use crate::policy::Policy;
use crate::utilities::Utilities;

/// Pick, for every state, the action with the highest one-step lookahead
/// value under `utilities`.
///
/// Actions are scanned in declared order and only a strictly greater
/// Q-value replaces the incumbent, so ties resolve to the earliest action
/// and repeated extractions give the same policy.
pub fn extract_policy<S, A>(
    model: &CompiledModel<S, A>,
    utilities: &Utilities<S>,
    discount: f64,
) -> Policy<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
{
    let values = utilities.values();
    let choices = (0..model.num_states())
        .map(|s| model.greedy(s, values, discount).0)
        .collect();
    Policy::new(model.index().clone(), model.actions().to_vec(), choices)
}
