//! Interface to the external contamination classifier.
//!
//! The statistical model itself (scaling, PCA, SVM fit and search) lives
//! outside this crate; here we fix only its surface: training labels, the
//! [`Classifier`] trait consuming an assembled feature matrix, and the
//! threshold rule that turns class probabilities into calls. A sample whose
//! most likely class is not confident enough is called `unknown` rather than
//! forced into either bin.

use std::fmt;

use ndarray::Array2;
use serde::Serialize;

use crate::core::errors::{Result, ScreenError};

/// Most-likely-class probabilities below this yield an `unknown` call.
pub const DEFAULT_UNKNOWN_THRESHOLD: f64 = 0.75;

/// Training label for a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    /// Contaminated sample.
    #[serde(rename = "pos")]
    Pos,
    /// Clean sample.
    #[serde(rename = "neg")]
    Neg,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Pos => write!(f, "pos"),
            Label::Neg => write!(f, "neg"),
        }
    }
}

/// Classification outcome for a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Call {
    Pos,
    Neg,
    Unknown,
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Pos => write!(f, "pos"),
            Call::Neg => write!(f, "neg"),
            Call::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<Label> for Call {
    fn from(label: Label) -> Call {
        match label {
            Label::Pos => Call::Pos,
            Label::Neg => Call::Neg,
        }
    }
}

/// One row of the prediction report.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub filename: String,
    pub predicted_class: Call,
    pub class_probability: f64,
}

/// The opaque model consuming feature matrices.
///
/// `predict_proba` returns one row per sample with one probability column
/// per entry of `classes`, in matching order.
pub trait Classifier {
    fn fit(&mut self, features: &Array2<f64>, labels: &[Label]) -> Result<()>;

    fn predict_proba(&self, features: &Array2<f64>) -> Result<Array2<f64>>;

    fn classes(&self) -> &[Label];
}

/// Check that an unknown-call threshold lies strictly between 0.5 and 1.0.
///
/// Below 0.5 the most likely class of a binary model always clears the bar,
/// and at 1.0 nothing does, so both ends are rejected.
pub fn validate_unknown_threshold(threshold: f64) -> Result<f64> {
    if threshold > 0.5 && threshold < 1.0 {
        Ok(threshold)
    } else {
        Err(ScreenError::InvalidArgument(
            "Unknown threshold must be between 0.5 and 1.0.".to_string(),
        ))
    }
}

/// Reduce one sample's class probabilities to a call.
///
/// The most likely class wins unless its probability falls below the
/// threshold, in which case the call is [`Call::Unknown`]. The winning
/// probability is reported either way.
pub fn call_sample(probabilities: &[f64], classes: &[Label], threshold: f64) -> (Call, f64) {
    let mut best = 0usize;
    let mut best_prob = f64::NEG_INFINITY;
    for (i, &prob) in probabilities.iter().enumerate() {
        if prob > best_prob {
            best = i;
            best_prob = prob;
        }
    }
    if best_prob < threshold {
        (Call::Unknown, best_prob)
    } else {
        (classes[best].into(), best_prob)
    }
}
