use crate::config::ComparisonConfig;
use crate::image_classifier::postprocess::argmax;
use crate::labels::interface::LabelMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ComparisonError {
    #[error("score vectors differ in length: layered {layered}, frozen graph {frozen}")]
    LengthMismatch { layered: usize, frozen: usize },

    #[error("score vector is empty or all NaN")]
    EmptyScores,

    #[error("class index {index} is outside the label map ({len} labels)")]
    UnknownLabel { index: usize, len: usize },

    #[error(
        "top-1 predictions disagree: layered {layered_index} ({layered_label}) \
         vs frozen graph {frozen_index} ({frozen_label})"
    )]
    PredictionMismatch {
        layered_index: usize,
        layered_label: String,
        frozen_index: usize,
        frozen_label: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopPrediction {
    /// Label-map index, i.e. arg-max shifted by the label offset.
    pub index: usize,
    pub label: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub layered: TopPrediction,
    pub frozen: TopPrediction,
    pub all_close: bool,
    pub max_vector_difference: f32,
}

impl Comparison {
    pub fn preds_agree(&self) -> bool {
        self.layered.index == self.frozen.index
    }

    pub fn assert_agreement(&self) -> Result<(), ComparisonError> {
        if self.preds_agree() {
            return Ok(());
        }
        Err(ComparisonError::PredictionMismatch {
            layered_index: self.layered.index,
            layered_label: self.layered.label.clone(),
            frozen_index: self.frozen.index,
            frozen_label: self.frozen.label.clone(),
        })
    }
}

/// `|a - b| <= atol + rtol * |b|` for every element.
pub fn all_close(a: &[f32], b: &[f32], rtol: f32, atol: f32) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= atol + rtol * y.abs())
}

/// NaN anywhere makes the result NaN.
pub fn max_abs_difference(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, |acc, d| if d.is_nan() || d > acc { d } else { acc })
}

fn top_prediction(
    scores: &[f32],
    labels: &dyn LabelMap,
    label_offset: usize,
) -> Result<TopPrediction, ComparisonError> {
    let best = argmax(scores).ok_or(ComparisonError::EmptyScores)?;
    let index = best + label_offset;
    let label = labels
        .label(index)
        .ok_or(ComparisonError::UnknownLabel {
            index,
            len: labels.len(),
        })?;

    Ok(TopPrediction {
        index,
        label: label.to_string(),
        score: scores[best],
    })
}

pub fn compare(
    layered: &[f32],
    frozen: &[f32],
    labels: &dyn LabelMap,
    settings: &ComparisonConfig,
) -> Result<Comparison, ComparisonError> {
    if layered.len() != frozen.len() {
        return Err(ComparisonError::LengthMismatch {
            layered: layered.len(),
            frozen: frozen.len(),
        });
    }

    Ok(Comparison {
        layered: top_prediction(layered, labels, settings.label_offset)?,
        frozen: top_prediction(frozen, labels, settings.label_offset)?,
        all_close: all_close(layered, frozen, settings.rtol, settings.atol),
        max_vector_difference: max_abs_difference(layered, frozen),
    })
}
