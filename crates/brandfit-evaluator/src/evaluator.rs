use std::future::Future;

use crate::types::{BrandFitEvaluation, EvaluationRequest};

/// Scores one influencer against one brand.
///
/// Implementations must not fail: any internal error is reported as an
/// evaluation with `score: None` and a descriptor in `reason`.
pub trait BrandFitEvaluator {
    fn evaluate(
        &self,
        request: &EvaluationRequest<'_>,
    ) -> impl Future<Output = BrandFitEvaluation> + Send;
}
