use std::cmp::Ordering;

use crate::core::execution_context::ExecutionContext;
use crate::dsl::schema::{ComparisonOperator, Condition};
use crate::template::substitute;

use super::operators::{compare, contains, equal};

/// Evaluate a single condition against the context.
///
/// String comparison values are template-substituted first. A field path
/// that does not resolve fails the condition for every operator.
pub fn evaluate_condition(cond: &Condition, ctx: &ExecutionContext) -> bool {
    let Some(actual) = ctx.resolve(&cond.field) else {
        return false;
    };
    let expected = substitute(&cond.value, ctx);

    match cond.operator {
        ComparisonOperator::Eq => equal(actual, &expected),
        ComparisonOperator::Ne => !equal(actual, &expected),
        ComparisonOperator::Gt => compare(actual, &expected) == Some(Ordering::Greater),
        ComparisonOperator::Lt => compare(actual, &expected) == Some(Ordering::Less),
        ComparisonOperator::Gte => matches!(
            compare(actual, &expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        ComparisonOperator::Lte => matches!(
            compare(actual, &expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        ComparisonOperator::Contains => contains(actual, &expected),
    }
}

/// Conjunction of all conditions; an empty list holds.
pub fn evaluate_all(conditions: &[Condition], ctx: &ExecutionContext) -> bool {
    conditions.iter().all(|c| evaluate_condition(c, ctx))
}
