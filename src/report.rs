use crate::bayes::{LikelihoodEstimator, Outcome, Prediction};
use std::io::{self, Write};

const DETECTED: &str = "Heart Disease Detected: please consult a healthcare professional \
immediately for further evaluation and advice.";
const NOT_DETECTED: &str = "No Heart Disease Detected: great! Keep maintaining a healthy \
lifestyle and regular checkups.";

const TIPS: &[&str] = &[
    "Eat a balanced diet rich in fruits and vegetables.",
    "Engage in regular physical activity.",
    "Avoid smoking and limit alcohol intake.",
    "Prioritize adequate sleep and manage stress.",
];

const DISCLAIMER: &str = "Disclaimer: this prediction is based on statistical analysis and \
is not a substitute for professional medical advice.";

pub fn headline(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Positive => DETECTED,
        Outcome::Negative => NOT_DETECTED,
    }
}

/// Writes the result message, the tips and the disclaimer. With `explain`,
/// also writes both joint scores and each attribute's frequencies.
pub fn render<W: Write>(
    out: &mut W,
    estimator: &LikelihoodEstimator<'_>,
    prediction: &Prediction,
    explain: bool,
) -> io::Result<()> {
    writeln!(out, "Prediction Result")?;
    writeln!(out, "{}", headline(prediction.outcome))?;

    if explain {
        let config = estimator.config();
        writeln!(out)?;
        writeln!(
            out,
            "Joint scores: {}={:e}, {}={:e}",
            config.positive_label,
            prediction.score_positive,
            config.negative_label,
            prediction.score_negative
        )?;
        for e in &prediction.evidence {
            writeln!(
                out,
                "  {}={}: {} {} rows ({:.4}), {} {} rows ({:.4})",
                e.column,
                e.value,
                config.positive_label,
                e.count_positive,
                e.p_positive,
                config.negative_label,
                e.count_negative,
                e.p_negative
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Tips for a Healthy Heart:")?;
    for tip in TIPS {
        writeln!(out, "  - {}", tip)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", DISCLAIMER)
}
