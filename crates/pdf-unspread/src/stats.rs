use crate::geometry::{DocumentPlan, PlanReason};
use crate::options::UnspreadOptions;
use crate::types::*;
use crate::unspread::plan_document;
use lopdf::Document;

/// Calculate statistics for unspreading, from the plans alone
pub fn calculate_statistics(
    document: &Document,
    options: &UnspreadOptions,
) -> Result<UnspreadStatistics> {
    options.validate()?;
    let plan = plan_document(document, options)?;
    Ok(statistics_from_plan(&plan))
}

fn statistics_from_plan(plan: &DocumentPlan) -> UnspreadStatistics {
    let count = |is: fn(PlanReason) -> bool| {
        plan.pages.iter().filter(|p| is(p.reason)).count()
    };

    UnspreadStatistics {
        source_pages: plan.pages.len(),
        output_pages: plan.output_count(),
        split_pages: count(|r| r == PlanReason::Spread),
        centered_pages: count(|r| {
            matches!(
                r,
                PlanReason::CenteredTop | PlanReason::CenteredLast | PlanReason::Singleton
            )
        }),
        passed_through: count(|r| r == PlanReason::MinimalSize),
        distinct_sizes: plan.variation.count(),
        effective_axis: plan.axis.axis,
        axis_flipped: plan.axis.flipped,
    }
}
