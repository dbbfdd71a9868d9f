//! Trend checks run on a finished training report.

use std::{
    error::Error,
    fmt::{self, Display},
};

use machine_learning::training::{Split, TrainingReport};

/// A failed smoke check.
#[derive(Debug, PartialEq)]
pub enum CheckErr {
    MissingSeries(&'static str),
    TooFewEpochs { got: usize, needed: usize },
    LossNotDecreasing { slope: f32 },
    AccuracyNotImproved { first: f32, last: f32, penultimate: f32 },
}

impl Display for CheckErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckErr::MissingSeries(name) => {
                write!(f, "the validation report has no {name:?} series")
            }
            CheckErr::TooFewEpochs { got, needed } => {
                write!(f, "needed at least {needed} epochs to check a trend, got {got}")
            }
            CheckErr::LossNotDecreasing { slope } => {
                write!(f, "validation loss is not trending down, slope is {slope}")
            }
            CheckErr::AccuracyNotImproved {
                first,
                last,
                penultimate,
            } => write!(
                f,
                "validation accuracy did not improve: first {first}, penultimate {penultimate}, last {last}"
            ),
        }
    }
}

impl Error for CheckErr {}

/// The least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f32,
    pub intercept: f32,
}

/// Fits a line to `ys` against their indices.
///
/// # Returns
/// `None` if there are fewer than two points.
pub fn linregress(ys: &[f32]) -> Option<LinearFit> {
    if ys.len() < 2 {
        return None;
    }

    let n = ys.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = ys.iter().map(|&y| y as f64).sum::<f64>() / n;

    let (sxy, sxx) = ys
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (x, &y)| {
            let dx = x as f64 - mean_x;
            (sxy + dx * (y as f64 - mean_y), sxx + dx * dx)
        });

    let slope = sxy / sxx;
    Some(LinearFit {
        slope: slope as f32,
        intercept: (mean_y - slope * mean_x) as f32,
    })
}

fn val_series<'a>(report: &'a TrainingReport, name: &'static str) -> Result<&'a [f32], CheckErr> {
    report
        .get(Split::Val, name)
        .ok_or(CheckErr::MissingSeries(name))
}

/// Checks the validation loss trends downward over the epochs.
pub fn check_loss_trend(report: &TrainingReport) -> Result<f32, CheckErr> {
    let loss = val_series(report, TrainingReport::LOSS)?;
    let fit = linregress(loss).ok_or(CheckErr::TooFewEpochs {
        got: loss.len(),
        needed: 2,
    })?;

    // A NaN slope means the loss diverged.
    if !(fit.slope < 0.0) {
        return Err(CheckErr::LossNotDecreasing { slope: fit.slope });
    }

    Ok(fit.slope)
}

/// Checks the last or the penultimate validation accuracy beats the first one.
pub fn check_accuracy_improved(report: &TrainingReport, metric: &'static str) -> Result<(), CheckErr> {
    let acc = val_series(report, metric)?;
    let (first, penultimate, last) = match *acc {
        [first, .., penultimate, last] => (first, penultimate, last),
        [first, last] => (first, first, last),
        _ => {
            return Err(CheckErr::TooFewEpochs {
                got: acc.len(),
                needed: 2,
            });
        }
    };

    if first < last || first < penultimate {
        return Ok(());
    }

    Err(CheckErr::AccuracyNotImproved {
        first,
        last,
        penultimate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(loss: &[f32], acc: &[f32]) -> TrainingReport {
        let mut report = TrainingReport::new();
        for (&l, &a) in loss.iter().zip(acc) {
            report.push_epoch(Split::Val, l, [("classif_accuracy", a)]);
        }
        report
    }

    #[test]
    fn fits_an_exact_line() {
        let fit = linregress(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-6);
        assert!((fit.intercept - 1.0).abs() < 1e-6);
        assert!(linregress(&[1.0]).is_none());
    }

    #[test]
    fn noisy_decreasing_loss_passes() {
        let r = report(&[0.9, 0.7, 0.75, 0.5, 0.52], &[0.5; 5]);
        assert!(check_loss_trend(&r).unwrap() < 0.0);
    }

    #[test]
    fn flat_loss_fails() {
        let r = report(&[0.5, 0.5, 0.5], &[0.5; 3]);
        assert_eq!(
            check_loss_trend(&r),
            Err(CheckErr::LossNotDecreasing { slope: 0.0 })
        );
    }

    #[test]
    fn nan_loss_fails() {
        let r = report(&[0.5, f32::NAN, 0.7], &[0.5; 3]);
        assert!(matches!(
            check_loss_trend(&r),
            Err(CheckErr::LossNotDecreasing { slope }) if slope.is_nan()
        ));

        let r = report(&[0.9, 0.6, f32::NAN], &[0.5; 3]);
        assert!(check_loss_trend(&r).is_err());
    }

    #[test]
    fn accuracy_may_improve_on_the_penultimate_epoch() {
        let r = report(&[0.0; 4], &[0.6, 0.7, 0.8, 0.6]);
        assert!(check_accuracy_improved(&r, "classif_accuracy").is_ok());

        let r = report(&[0.0; 4], &[0.6, 0.9, 0.6, 0.5]);
        assert!(matches!(
            check_accuracy_improved(&r, "classif_accuracy"),
            Err(CheckErr::AccuracyNotImproved { .. })
        ));
    }

    #[test]
    fn missing_metric_fails() {
        let r = report(&[0.1, 0.0], &[0.1, 0.2]);
        assert_eq!(
            check_accuracy_improved(&r, "sensitivity"),
            Err(CheckErr::MissingSeries("sensitivity"))
        );
    }
}
