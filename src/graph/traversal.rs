use crate::core::execution_context::ExecutionContext;
use crate::dsl::schema::Edge;
use crate::evaluator::evaluate_all;

/// Pick the next action from an ordered edge list.
///
/// Conditioned edges are tried first, in declaration order; the first whose
/// conditions all hold wins. Otherwise the first unconditioned edge is the
/// fallback. `None` means the run ends here.
pub fn select_next_node<'a>(edges: &'a [Edge], ctx: &ExecutionContext) -> Option<&'a str> {
    edges
        .iter()
        .filter(|e| !e.is_unconditional())
        .find(|e| evaluate_all(&e.conditions, ctx))
        .or_else(|| edges.iter().find(|e| e.is_unconditional()))
        .map(|e| e.target_node_id.as_str())
}
