/// How a classifier lays out its raw output relative to the 1000 ImageNet classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassConvention {
    #[default]
    Plain,
    /// Index 0 is a "background" class that the other source does not have.
    LeadingBackground,
}

impl ClassConvention {
    pub fn apply(
        self,
        scores: Vec<f32>,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            ClassConvention::Plain => Ok(scores),
            ClassConvention::LeadingBackground => strip_background(&scores),
        }
    }
}

/// Drops index 0 and rescales the rest so it sums to one.
pub fn strip_background(
    scores: &[f32],
) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
    let rest = scores
        .get(1..)
        .filter(|rest| !rest.is_empty())
        .ok_or("score vector has no classes besides background")?;

    let total: f32 = rest.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(format!("cannot renormalize scores summing to {}", total).into());
    }

    Ok(rest.iter().map(|score| score / total).collect())
}

/// Index of the first maximum. NaNs never win.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
